//! Spell catalog.
//!
//! Spells are stored by display name; lookups are case-insensitive. Only the
//! data the sheet needs to filter spell lists is kept: level and class lists.

use super::CharacterClass;
use crate::spellcasting;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Spell data from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellData {
    pub name: &'static str,
    /// 0 for cantrips.
    pub level: u8,
    pub school: &'static str,
    pub classes: &'static [CharacterClass],
}

impl SpellData {
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }
}

use CharacterClass::{Bard, Cleric, Druid, Paladin, Ranger, Sorcerer, Warlock, Wizard};

const fn spell(
    name: &'static str,
    level: u8,
    school: &'static str,
    classes: &'static [CharacterClass],
) -> SpellData {
    SpellData {
        name,
        level,
        school,
        classes,
    }
}

static SPELLS: &[SpellData] = &[
    // ========================================================================
    // Cantrips
    // ========================================================================
    spell("Raio de Fogo", 0, "Evocação", &[Sorcerer, Wizard]),
    spell("Raio de Gelo", 0, "Evocação", &[Sorcerer, Wizard]),
    spell("Toque Arrepiante", 0, "Necromancia", &[Sorcerer, Warlock, Wizard]),
    spell("Luz", 0, "Evocação", &[Bard, Cleric, Sorcerer, Wizard]),
    spell("Mãos Mágicas", 0, "Conjuração", &[Bard, Sorcerer, Warlock, Wizard]),
    spell("Prestidigitação", 0, "Transmutação", &[Bard, Sorcerer, Warlock, Wizard]),
    spell("Rajada Mística", 0, "Evocação", &[Warlock]),
    spell("Chama Sagrada", 0, "Evocação", &[Cleric]),
    spell("Orientação", 0, "Adivinhação", &[Cleric, Druid]),
    spell("Bordão Místico", 0, "Transmutação", &[Druid]),
    spell("Zombaria Viciosa", 0, "Encantamento", &[Bard]),
    // ========================================================================
    // 1st level
    // ========================================================================
    spell("Mísseis Mágicos", 1, "Evocação", &[Sorcerer, Wizard]),
    spell("Escudo Arcano", 1, "Abjuração", &[Sorcerer, Wizard]),
    spell("Armadura Arcana", 1, "Abjuração", &[Sorcerer, Wizard]),
    spell("Sono", 1, "Encantamento", &[Bard, Sorcerer, Wizard]),
    spell("Onda Trovejante", 1, "Evocação", &[Bard, Druid, Sorcerer, Wizard]),
    spell(
        "Detectar Magia",
        1,
        "Adivinhação",
        &[Bard, Cleric, Druid, Paladin, Ranger, Sorcerer, Wizard],
    ),
    spell("Curar Ferimentos", 1, "Evocação", &[Bard, Cleric, Druid, Paladin, Ranger]),
    spell("Palavra Curativa", 1, "Evocação", &[Bard, Cleric, Druid]),
    spell("Bênção", 1, "Encantamento", &[Cleric, Paladin]),
    spell("Marca do Caçador", 1, "Adivinhação", &[Ranger]),
    spell("Bruxaria", 1, "Encantamento", &[Warlock]),
    spell("Repreensão Infernal", 1, "Evocação", &[Warlock]),
    spell("Punição Trovejante", 1, "Evocação", &[Paladin]),
    // ========================================================================
    // 2nd level
    // ========================================================================
    spell("Passo Nebuloso", 2, "Conjuração", &[Sorcerer, Warlock, Wizard]),
    spell("Invisibilidade", 2, "Ilusão", &[Bard, Sorcerer, Warlock, Wizard]),
    spell("Raio Ardente", 2, "Evocação", &[Sorcerer, Wizard]),
    spell("Arma Espiritual", 2, "Evocação", &[Cleric]),
    spell(
        "Restauração Menor",
        2,
        "Abjuração",
        &[Bard, Cleric, Druid, Paladin, Ranger],
    ),
    // ========================================================================
    // 3rd level
    // ========================================================================
    spell("Bola de Fogo", 3, "Evocação", &[Sorcerer, Wizard]),
    spell("Relâmpago", 3, "Evocação", &[Sorcerer, Wizard]),
    spell("Contramágica", 3, "Abjuração", &[Sorcerer, Warlock, Wizard]),
    spell("Toque Vampírico", 3, "Necromancia", &[Warlock, Wizard]),
    spell("Revivificar", 3, "Necromancia", &[Cleric, Paladin]),
    spell("Espíritos Guardiões", 3, "Conjuração", &[Cleric]),
    // ========================================================================
    // 4th level and up
    // ========================================================================
    spell("Porta Dimensional", 4, "Conjuração", &[Bard, Sorcerer, Warlock, Wizard]),
    spell("Banimento", 4, "Abjuração", &[Cleric, Paladin, Sorcerer, Warlock, Wizard]),
    spell("Cone de Frio", 5, "Evocação", &[Sorcerer, Wizard]),
    spell("Reviver os Mortos", 5, "Necromancia", &[Bard, Cleric, Paladin]),
    spell("Desintegrar", 6, "Transmutação", &[Sorcerer, Wizard]),
    spell("Teletransporte", 7, "Conjuração", &[Bard, Sorcerer, Wizard]),
    spell(
        "Palavra de Poder Atordoar",
        8,
        "Encantamento",
        &[Bard, Sorcerer, Warlock, Wizard],
    ),
    spell("Desejo", 9, "Conjuração", &[Sorcerer]),
];

static SPELL_DATABASE: LazyLock<HashMap<String, &'static SpellData>> = LazyLock::new(|| {
    SPELLS
        .iter()
        .map(|spell| (spell.name.to_lowercase(), spell))
        .collect()
});

/// Look up a spell by name (case-insensitive).
pub fn get_spell(name: &str) -> Option<&'static SpellData> {
    SPELL_DATABASE.get(&name.trim().to_lowercase()).copied()
}

/// All spells in catalog order.
pub fn all_spells() -> impl Iterator<Item = &'static SpellData> {
    SPELLS.iter()
}

/// Cantrips on a class list.
pub fn cantrips_by_class(class: CharacterClass) -> Vec<&'static SpellData> {
    SPELLS
        .iter()
        .filter(|s| s.is_cantrip() && s.classes.contains(&class))
        .collect()
}

/// Leveled spells a character of this class and level can cast.
///
/// Limited to the highest slot level the class reaches at `level`; a class
/// with no slots gets an empty list.
pub fn spells_by_class_and_level(class: CharacterClass, level: u8) -> Vec<&'static SpellData> {
    let highest = spellcasting::highest_slot_level(class, level);
    SPELLS
        .iter()
        .filter(|s| !s.is_cantrip() && s.level <= highest && s.classes.contains(&class))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CharacterClass;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let spell = get_spell("mísseis mágicos").unwrap();
        assert_eq!(spell.name, "Mísseis Mágicos");
        assert_eq!(spell.level, 1);
        assert!(get_spell("Nonexistent Spell").is_none());
    }

    #[test]
    fn test_cantrips_by_class() {
        let names: Vec<_> = cantrips_by_class(CharacterClass::Warlock)
            .iter()
            .map(|s| s.name)
            .collect();
        assert!(names.contains(&"Rajada Mística"));
        assert!(!names.contains(&"Raio de Fogo"));
        assert!(cantrips_by_class(CharacterClass::Barbarian).is_empty());
    }

    #[test]
    fn test_spells_limited_by_slot_level() {
        let wizard_1: Vec<_> = spells_by_class_and_level(CharacterClass::Wizard, 1)
            .iter()
            .map(|s| s.name)
            .collect();
        assert!(wizard_1.contains(&"Mísseis Mágicos"));
        assert!(!wizard_1.contains(&"Bola de Fogo"));

        let wizard_5 = spells_by_class_and_level(CharacterClass::Wizard, 5);
        assert!(wizard_5.iter().any(|s| s.name == "Bola de Fogo"));

        // Half casters have no slots at level 1
        assert!(spells_by_class_and_level(CharacterClass::Paladin, 1).is_empty());
        assert!(spells_by_class_and_level(CharacterClass::Barbarian, 20).is_empty());
    }

    #[test]
    fn test_spell_names_unique() {
        assert_eq!(SPELL_DATABASE.len(), SPELLS.len());
    }
}
