//! Rule catalog.
//!
//! Immutable tables describing what each class and race grants: ordered
//! feature definitions, spells, feats and backgrounds. Everything here is
//! `'static` data plus pure lookups; the engine modules never mutate it.

mod backgrounds;
mod classes;
mod feats;
mod races;
mod spells;

pub use backgrounds::Background;
pub use classes::CharacterClass;
pub use feats::{all_feats, feat_by_id, Feat};
pub use races::RaceType;
pub use spells::{all_spells, cantrips_by_class, get_spell, spells_by_class_and_level, SpellData};

use crate::character::{Ability, FeatureKind};
use serde::{Deserialize, Serialize};

// ============================================================================
// Choice Options
// ============================================================================

/// One pickable option of a choice feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Points spent from the shared pool when the option is activated.
    pub cost: Option<u32>,
    /// Flat damage annotation in dice notation (`2d6`), shown as written.
    pub damage: Option<&'static str>,
    /// Ability bonuses granted while the option is selected (subraces).
    pub bonuses: &'static [(Ability, i8)],
}

impl ChoiceOption {
    pub const fn new(value: &'static str, label: &'static str, description: &'static str) -> Self {
        Self {
            value,
            label,
            description,
            cost: None,
            damage: None,
            bonuses: &[],
        }
    }

    pub const fn with_cost(self, cost: u32) -> Self {
        Self {
            cost: Some(cost),
            ..self
        }
    }

    pub const fn with_damage(self, damage: &'static str) -> Self {
        Self {
            damage: Some(damage),
            ..self
        }
    }

    pub const fn with_bonuses(self, bonuses: &'static [(Ability, i8)]) -> Self {
        Self { bonuses, ..self }
    }
}

// ============================================================================
// Feature Definitions
// ============================================================================

/// Gate that hides a feature until another feature carries a specific choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubclassPrerequisite {
    pub feature_id: &'static str,
    pub value: &'static str,
}

/// Choice features whose value is not one of a fixed option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeChoice {
    /// Any cantrip from the given class list (high elf bonus cantrip).
    Cantrip(CharacterClass),
    /// Two distinct abilities written as `"str+dex"`, each gaining +1.
    AbilityPair,
}

/// A catalog feature. Class features are gated by `level`; racial ones are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub level: u8,
    pub kind: FeatureKind,
    pub options: &'static [ChoiceOption],
    pub free_choice: Option<FreeChoice>,
    pub prerequisite: Option<SubclassPrerequisite>,
}

const ASI_NAME: &str = "Aumento no Valor de Habilidade";
const ASI_DESCRIPTION: &str =
    "Aumente um valor de habilidade em 2, ou dois valores em 1, ou escolha um talento.";

impl FeatureDefinition {
    pub const fn auto(
        id: &'static str,
        name: &'static str,
        level: u8,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            description,
            level,
            kind: FeatureKind::Auto,
            options: &[],
            free_choice: None,
            prerequisite: None,
        }
    }

    pub const fn choice(
        id: &'static str,
        name: &'static str,
        level: u8,
        description: &'static str,
        options: &'static [ChoiceOption],
    ) -> Self {
        Self {
            kind: FeatureKind::Choice,
            options,
            ..Self::auto(id, name, level, description)
        }
    }

    pub const fn free(
        id: &'static str,
        name: &'static str,
        level: u8,
        description: &'static str,
        free_choice: FreeChoice,
    ) -> Self {
        Self {
            kind: FeatureKind::Choice,
            free_choice: Some(free_choice),
            ..Self::auto(id, name, level, description)
        }
    }

    pub const fn asi(id: &'static str, level: u8) -> Self {
        Self {
            kind: FeatureKind::Asi,
            ..Self::auto(id, ASI_NAME, level, ASI_DESCRIPTION)
        }
    }

    pub const fn requires(self, feature_id: &'static str, value: &'static str) -> Self {
        Self {
            prerequisite: Some(SubclassPrerequisite { feature_id, value }),
            ..self
        }
    }

    pub fn option(&self, value: &str) -> Option<&'static ChoiceOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Whether `value` is a legal choice for this feature.
    pub fn accepts(&self, value: &str) -> bool {
        match self.free_choice {
            Some(FreeChoice::Cantrip(class)) => get_spell(value)
                .is_some_and(|spell| spell.level == 0 && spell.classes.contains(&class)),
            Some(FreeChoice::AbilityPair) => parse_ability_pair(value).is_some(),
            None => self.option(value).is_some(),
        }
    }

    /// Display label for a stored choice value.
    pub fn label_for(&self, value: &str) -> Option<String> {
        match self.free_choice {
            Some(FreeChoice::Cantrip(_)) => get_spell(value).map(|s| s.name.to_string()),
            Some(FreeChoice::AbilityPair) => parse_ability_pair(value)
                .map(|[a, b]| format!("+1 {}, +1 {}", a.abbreviation(), b.abbreviation())),
            None => self.option(value).map(|o| o.label.to_string()),
        }
    }
}

/// Parse `"str+dex"` into two distinct abilities.
pub fn parse_ability_pair(value: &str) -> Option<[Ability; 2]> {
    let (first, second) = value.split_once('+')?;
    let first = Ability::from_key(first)?;
    let second = Ability::from_key(second)?;
    (first != second).then_some([first, second])
}

// ============================================================================
// Lookup
// ============================================================================

/// Who owns a feature list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Class(CharacterClass),
    Race(RaceType),
}

/// Ordered feature definitions for a class or race.
pub fn feature_definitions(source: Source) -> &'static [FeatureDefinition] {
    match source {
        Source::Class(class) => class.features(),
        Source::Race(race) => race.features(),
    }
}

pub fn find_definition(source: Source, feature_id: &str) -> Option<&'static FeatureDefinition> {
    feature_definitions(source)
        .iter()
        .find(|d| d.id == feature_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_feature_ids_unique_per_source() {
        let sources = CharacterClass::all()
            .iter()
            .map(|c| Source::Class(*c))
            .chain(RaceType::all().iter().map(|r| Source::Race(*r)));

        let mut seen = HashSet::new();
        for source in sources {
            for def in feature_definitions(source) {
                assert!(seen.insert(def.id), "duplicate feature id {}", def.id);
            }
        }
    }

    #[test]
    fn test_prerequisites_reference_existing_choices() {
        let sources = CharacterClass::all()
            .iter()
            .map(|c| Source::Class(*c))
            .chain(RaceType::all().iter().map(|r| Source::Race(*r)));

        for source in sources {
            for def in feature_definitions(source) {
                let Some(prereq) = def.prerequisite else {
                    continue;
                };
                let parent = find_definition(source, prereq.feature_id)
                    .unwrap_or_else(|| panic!("{} requires missing {}", def.id, prereq.feature_id));
                assert_eq!(parent.kind, FeatureKind::Choice);
                assert!(
                    parent.accepts(prereq.value),
                    "{} requires unknown value {}",
                    def.id,
                    prereq.value
                );
            }
        }
    }

    #[test]
    fn test_choice_features_have_options() {
        for class in CharacterClass::all() {
            for def in class.features() {
                if def.kind == FeatureKind::Choice && def.free_choice.is_none() {
                    assert!(!def.options.is_empty(), "{} has no options", def.id);
                }
            }
        }
    }

    #[test]
    fn test_damage_annotations() {
        let ancestry = find_definition(Source::Race(RaceType::Dragonborn), "dragonborn_draconic_ancestry")
            .unwrap();
        assert!(ancestry.options.iter().all(|o| o.damage == Some("2d6")));

        let riposte = find_definition(Source::Class(CharacterClass::Fighter), "fighter_maneuver_1")
            .and_then(|d| d.option("riposte"))
            .unwrap();
        assert_eq!(riposte.damage, Some("1d8"));
        assert_eq!(riposte.cost, Some(1));
    }

    #[test]
    fn test_parse_ability_pair() {
        assert_eq!(
            parse_ability_pair("str+dex"),
            Some([Ability::Strength, Ability::Dexterity])
        );
        assert_eq!(parse_ability_pair("str+str"), None);
        assert_eq!(parse_ability_pair("str"), None);
        assert_eq!(parse_ability_pair("foo+bar"), None);
    }

    #[test]
    fn test_free_choice_cantrip_accepts_only_class_cantrips() {
        let def = find_definition(Source::Race(RaceType::Elf), "elf_high_elf_cantrip").unwrap();
        assert!(def.accepts("Raio de Fogo"));
        // Leveled spell, not a cantrip
        assert!(!def.accepts("Mísseis Mágicos"));
        // Cleric cantrip
        assert!(!def.accepts("Chama Sagrada"));
        assert_eq!(def.label_for("raio de fogo").as_deref(), Some("Raio de Fogo"));
    }
}
