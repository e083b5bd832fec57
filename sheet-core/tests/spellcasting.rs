//! Spell slots, spell lists and racial cantrips through reconciliation.

use rstest::rstest;
use sheet_core::catalog::{CharacterClass, RaceType};
use sheet_core::character::{Ability, AbilityScores, Character};
use sheet_core::reconcile::{reconcile, select_choice};
use sheet_core::spellcasting::{
    recover_spell_slot, slot_summary, use_spell_slot, SpellSlotError,
};

fn character(race: RaceType, class: CharacterClass, level: u8) -> Character {
    let mut character = Character::new("Teste", race, class);
    character.level = level;
    character.ability_scores = AbilityScores::new(10, 14, 14, 16, 14, 16);
    reconcile(&character)
}

#[test]
fn test_level_five_warlock_pact_slots() {
    let warlock = character(RaceType::Human, CharacterClass::Warlock, 5);
    let magic = warlock.magic.as_ref().unwrap();
    assert_eq!(magic.spell_slots, [0, 0, 2, 0, 0, 0, 0, 0, 0]);
    assert_eq!(magic.current_spell_slots[2], 2);

    let summary = slot_summary(&warlock);
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].slot_level, 3);
    assert!(summary[0].pact);
}

#[rstest]
#[case(CharacterClass::Wizard, 1, [2, 0, 0, 0, 0, 0, 0, 0, 0])]
#[case(CharacterClass::Wizard, 5, [4, 3, 2, 0, 0, 0, 0, 0, 0])]
#[case(CharacterClass::Cleric, 20, [4, 3, 3, 3, 3, 2, 2, 1, 1])]
#[case(CharacterClass::Paladin, 1, [0, 0, 0, 0, 0, 0, 0, 0, 0])]
#[case(CharacterClass::Paladin, 5, [4, 2, 0, 0, 0, 0, 0, 0, 0])]
#[case(CharacterClass::Ranger, 9, [4, 3, 2, 0, 0, 0, 0, 0, 0])]
#[case(CharacterClass::Warlock, 11, [0, 0, 0, 0, 3, 0, 0, 0, 0])]
fn test_slot_tables(#[case] class: CharacterClass, #[case] level: u8, #[case] slots: [u32; 9]) {
    let caster = character(RaceType::Human, class, level);
    let magic = caster.magic.as_ref().unwrap();
    assert_eq!(magic.spell_slots, slots);
    assert_eq!(magic.current_spell_slots, slots);
}

#[test]
fn test_non_caster_has_no_magic() {
    let fighter = character(RaceType::Human, CharacterClass::Fighter, 5);
    assert!(fighter.magic.is_none());
    assert_eq!(
        use_spell_slot(&fighter, 1),
        Err(SpellSlotError::NotASpellcaster)
    );
}

#[test]
fn test_wizard_to_barbarian_loses_spells() {
    let mut wizard = character(RaceType::Human, CharacterClass::Wizard, 3);
    if let Some(magic) = wizard.magic.as_mut() {
        magic.spells_known_prepared = vec!["Mísseis Mágicos".to_string()];
        magic.spellbook = vec!["Mísseis Mágicos".to_string(), "Sono".to_string()];
    }
    let wizard = reconcile(&wizard);
    assert_eq!(
        wizard.magic.as_ref().unwrap().spells_known_prepared,
        vec!["Mísseis Mágicos".to_string()]
    );

    let mut barbarian = wizard.clone();
    barbarian.class = CharacterClass::Barbarian;
    let barbarian = reconcile(&barbarian);
    assert!(barbarian.magic.is_none());

    // A caster without the spell on its list drops it too
    let mut cleric = wizard.clone();
    cleric.class = CharacterClass::Cleric;
    let cleric = reconcile(&cleric);
    let magic = cleric.magic.as_ref().unwrap();
    assert!(magic.spells_known_prepared.is_empty());
    assert!(magic.spellbook.is_empty());
    assert_eq!(magic.spellcasting_ability, Some(Ability::Wisdom));
}

#[test]
fn test_spells_above_slot_level_dropped() {
    let mut wizard = character(RaceType::Human, CharacterClass::Wizard, 5);
    if let Some(magic) = wizard.magic.as_mut() {
        magic.spells_known_prepared = vec!["Bola de Fogo".to_string(), "Sono".to_string()];
    }
    let wizard = reconcile(&wizard);
    assert_eq!(wizard.magic.as_ref().unwrap().spells_known_prepared.len(), 2);

    let mut lowered = wizard.clone();
    lowered.level = 4;
    let lowered = reconcile(&lowered);
    assert_eq!(
        lowered.magic.as_ref().unwrap().spells_known_prepared,
        vec!["Sono".to_string()]
    );
}

#[test]
fn test_spell_names_match_case_insensitively() {
    let mut sorcerer = character(RaceType::Human, CharacterClass::Sorcerer, 1);
    if let Some(magic) = sorcerer.magic.as_mut() {
        magic.cantrips = vec!["raio de fogo".to_string(), "Raio de Fogo".to_string()];
    }
    let sorcerer = reconcile(&sorcerer);
    assert_eq!(sorcerer.magic.as_ref().unwrap().cantrips.len(), 1);
}

#[test]
fn test_high_elf_cantrip_kept_for_any_class() {
    let elf = character(RaceType::Elf, CharacterClass::Fighter, 1);
    assert!(elf.magic.is_none());

    let elf = select_choice(&elf, "elf_subrace", "high_elf").unwrap();
    let elf = select_choice(&elf, "elf_high_elf_cantrip", "Raio de Fogo").unwrap();
    let magic = elf.magic.as_ref().unwrap();
    assert_eq!(magic.cantrips, vec!["Raio de Fogo".to_string()]);
    assert_eq!(magic.spellcasting_ability, Some(Ability::Intelligence));
    assert_eq!(magic.spell_slots, [0; 9]);

    // Removing it from the list brings it back
    let mut edited = elf.clone();
    if let Some(magic) = edited.magic.as_mut() {
        magic.cantrips.clear();
    }
    let healed = reconcile(&edited);
    assert_eq!(healed.magic.as_ref().unwrap().cantrips, vec!["Raio de Fogo".to_string()]);

    // Not a wizard cantrip
    assert!(select_choice(&elf, "elf_high_elf_cantrip", "Chama Sagrada").is_err());
}

#[test]
fn test_save_dc_and_overrides() {
    // INT 16 (+1 human) = 17 -> +3, proficiency +2 at level 3
    let wizard = character(RaceType::Human, CharacterClass::Wizard, 3);
    let magic = wizard.magic.as_ref().unwrap();
    assert_eq!(magic.spell_save_dc, 13);
    assert_eq!(magic.spell_attack_bonus, 5);
    assert_eq!(magic.spells_prepared, Some(6));

    let mut overridden = wizard.clone();
    if let Some(magic) = overridden.magic.as_mut() {
        magic.save_dc_override = Some(15);
    }
    let overridden = reconcile(&overridden);
    let magic = overridden.magic.as_ref().unwrap();
    assert_eq!(magic.displayed_save_dc(), 15);
    assert_eq!(magic.displayed_attack_bonus(), 5);
}

#[test]
fn test_slot_refill_on_level_up_and_clamp_on_use() {
    let wizard = character(RaceType::Human, CharacterClass::Wizard, 2);
    let spent = use_spell_slot(&wizard, 1).unwrap();
    assert_eq!(spent.magic.as_ref().unwrap().current_spell_slots[0], 2);

    // Same table: spent slots stay spent
    assert_eq!(reconcile(&spent), spent);

    // New table: every slot refills
    let mut leveled = spent.clone();
    leveled.level = 3;
    let leveled = reconcile(&leveled);
    assert_eq!(leveled.magic.as_ref().unwrap().current_spell_slots[0], 4);

    let recovered = recover_spell_slot(&leveled, 1).unwrap();
    assert_eq!(recovered, leveled);
}

#[test]
fn test_slot_errors() {
    let wizard = character(RaceType::Human, CharacterClass::Wizard, 1);
    assert_eq!(use_spell_slot(&wizard, 0), Err(SpellSlotError::InvalidSlotLevel(0)));
    assert_eq!(use_spell_slot(&wizard, 2), Err(SpellSlotError::NoSlotAvailable(2)));

    let warlock = character(RaceType::Human, CharacterClass::Warlock, 3);
    assert_eq!(use_spell_slot(&warlock, 3), Err(SpellSlotError::NoSlotAvailable(3)));
}
