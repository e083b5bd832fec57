//! Feature reconciliation across level, class and race changes.

use rstest::rstest;
use sheet_core::catalog::{CharacterClass, RaceType, Source, feature_definitions};
use sheet_core::character::{AbilityScores, AsiChoice, Character, FeatureKind, RecoveryPolicy};
use sheet_core::reconcile::{reconcile, select_asi, select_choice};
use sheet_core::resources::ResourceKey;
use sheet_core::rest::use_resource;

fn character(race: RaceType, class: CharacterClass, level: u8) -> Character {
    let mut character = Character::new("Teste", race, class);
    character.level = level;
    character.ability_scores = AbilityScores::new(14, 14, 14, 14, 14, 14);
    reconcile(&character)
}

fn assert_pools_valid(character: &Character) {
    for selection in character.features() {
        match (selection.current_uses, selection.max_uses) {
            (Some(current), Some(max)) => assert!(
                current <= max,
                "{} has {current}/{max}",
                selection.feature_id
            ),
            (None, None) => {}
            other => panic!("{} has half a pool: {other:?}", selection.feature_id),
        }
    }
    assert!(character.hit_dice.current <= character.hit_dice.maximum);
    assert_eq!(character.hit_dice.maximum, character.level.max(1) as u32);
    if let Some(magic) = &character.magic {
        for (current, max) in magic.current_spell_slots.iter().zip(magic.spell_slots) {
            assert!(*current <= max);
        }
    }
}

#[test]
fn test_reconcile_is_idempotent_everywhere() {
    for class in CharacterClass::all() {
        for race in RaceType::all() {
            for level in [1, 3, 5, 11, 20] {
                let once = character(*race, *class, level);
                let twice = reconcile(&once);
                assert_eq!(once, twice, "{class} {race} level {level}");
                assert_eq!(
                    serde_json::to_string(&once).unwrap(),
                    serde_json::to_string(&twice).unwrap()
                );
                assert_pools_valid(&once);
            }
        }
    }
}

#[test]
fn test_idempotent_with_choices_and_spent_pools() {
    let mut sorcerer = character(RaceType::HalfElf, CharacterClass::Sorcerer, 3);
    sorcerer = select_choice(&sorcerer, "sorcerer_origin", "draconic").unwrap();
    sorcerer = select_choice(&sorcerer, "sorcerer_metamagic_1", "twinned").unwrap();
    sorcerer = select_choice(&sorcerer, "half_elf_ability_increase", "con+dex").unwrap();
    sorcerer = use_resource(&sorcerer, &ResourceKey::feature("sorcerer_font_of_magic"));

    let again = reconcile(&sorcerer);
    assert_eq!(again, sorcerer);
    assert_eq!(
        serde_json::to_string_pretty(&again).unwrap(),
        serde_json::to_string_pretty(&sorcerer).unwrap()
    );
}

#[rstest]
#[case(1, 2)]
#[case(2, 2)]
#[case(3, 3)]
#[case(6, 4)]
#[case(12, 5)]
#[case(17, 6)]
fn test_rage_by_level(#[case] level: u8, #[case] rages: u32) {
    let barbarian = character(RaceType::Human, CharacterClass::Barbarian, level);
    assert_eq!(barbarian.legacy.rages.maximum, rages);
    assert_eq!(barbarian.legacy.rages.current, rages);
}

#[test]
fn test_full_rage_pool_follows_new_maximum() {
    let barbarian = character(RaceType::Human, CharacterClass::Barbarian, 1);
    assert_eq!(barbarian.legacy.rages.maximum, 2);

    let mut leveled = barbarian.clone();
    leveled.level = 3;
    let leveled = reconcile(&leveled);
    let rage = leveled.feature("barbarian_rage").unwrap();
    assert_eq!(rage.max_uses, Some(3));
    assert_eq!(rage.current_uses, Some(3));
}

#[test]
fn test_spent_rage_pool_is_preserved() {
    let barbarian = character(RaceType::Human, CharacterClass::Barbarian, 1);
    let mut spent = use_resource(&barbarian, &ResourceKey::feature("barbarian_rage"));
    spent.level = 3;
    let spent = reconcile(&spent);
    let rage = spent.feature("barbarian_rage").unwrap();
    assert_eq!(rage.max_uses, Some(3));
    assert_eq!(rage.current_uses, Some(1));
    assert_eq!(spent.legacy.rages.current, 1);
}

#[test]
fn test_battle_master_and_champion() {
    let fighter = character(RaceType::Human, CharacterClass::Fighter, 3);
    let battle_master = select_choice(&fighter, "fighter_martial_archetype", "battle_master").unwrap();

    let dice = battle_master
        .feature("fighter_battle_master_combat_superiority")
        .unwrap();
    assert_eq!(dice.max_uses, Some(4));
    assert_eq!(dice.recovery, RecoveryPolicy::Short);
    assert_eq!(battle_master.legacy.superiority_dice.maximum, 4);

    let battle_master = select_choice(&battle_master, "fighter_maneuver_1", "riposte").unwrap();
    let maneuver = battle_master.feature("fighter_maneuver_1").unwrap();
    // Maneuvers spend from the shared pool
    assert_eq!(maneuver.max_uses, None);

    let champion = select_choice(&battle_master, "fighter_martial_archetype", "champion").unwrap();
    assert!(!champion.has_feature("fighter_battle_master_combat_superiority"));
    assert!(!champion.has_feature("fighter_maneuver_1"));
    assert!(champion.has_feature("fighter_champion_improved_critical"));
    assert_eq!(champion.legacy.superiority_dice.maximum, 0);
}

#[test]
fn test_gated_feature_needs_exact_value() {
    let barbarian = character(RaceType::Human, CharacterClass::Barbarian, 3);
    let totem = select_choice(&barbarian, "barbarian_primal_path", "totem_warrior").unwrap();
    assert!(!totem.has_feature("barbarian_frenzy"));

    let berserker = select_choice(&totem, "barbarian_primal_path", "berserker").unwrap();
    assert!(berserker.has_feature("barbarian_frenzy"));
}

#[test]
fn test_level_up_removes_nothing() {
    for class in CharacterClass::all() {
        let mut previous = character(RaceType::Human, *class, 1);
        for level in 2..=20 {
            let mut next = previous.clone();
            next.level = level;
            let next = reconcile(&next);
            for selection in previous.features() {
                assert!(
                    next.has_feature(&selection.feature_id),
                    "{class} lost {} at level {level}",
                    selection.feature_id
                );
            }
            previous = next;
        }
    }
}

#[test]
fn test_level_down_removes_exactly_higher_features() {
    for class in CharacterClass::all() {
        let high = character(RaceType::Human, *class, 12);
        let mut lowered = high.clone();
        lowered.level = 7;
        let lowered = reconcile(&lowered);

        let definitions = feature_definitions(Source::Class(*class));
        for selection in &high.class_features {
            let definition = definitions
                .iter()
                .find(|d| d.id == selection.feature_id)
                .unwrap();
            assert_eq!(
                lowered.has_feature(&selection.feature_id),
                definition.level <= 7,
                "{class} {}",
                selection.feature_id
            );
        }
    }
}

#[test]
fn test_asi_feat_survives_level_drop() {
    let wizard = character(RaceType::Human, CharacterClass::Wizard, 8);
    let wizard = select_asi(
        &wizard,
        "wizard_asi_8",
        AsiChoice::Feat {
            feat_id: "war_caster".to_string(),
        },
    )
    .unwrap();
    let wizard = select_asi(
        &wizard,
        "wizard_asi_4",
        AsiChoice::AbilityIncrease {
            first: sheet_core::Ability::Intelligence,
            second: None,
        },
    )
    .unwrap();

    let mut lowered = wizard.clone();
    lowered.level = 3;
    let lowered = reconcile(&lowered);
    assert!(lowered.has_feature("wizard_asi_8"));
    assert!(!lowered.has_feature("wizard_asi_4"));
    assert_eq!(lowered.feats.len(), 1);
    assert_eq!(lowered.feats[0].feat_id, "war_caster");
    // The pruned slot takes its increase with it
    assert_eq!(wizard.ability_scores.intelligence, 16);
    assert_eq!(lowered.ability_scores.intelligence, 14);
    assert_eq!(reconcile(&lowered), lowered);

    let mut raised = lowered.clone();
    raised.level = 4;
    let raised = reconcile(&raised);
    assert_eq!(raised.ability_scores.intelligence, 14);
    assert_eq!(raised.feature("wizard_asi_4").unwrap().asi_choice, None);
}

#[test]
fn test_race_change_rederives_racial_features() {
    let elf = character(RaceType::Elf, CharacterClass::Rogue, 1);
    let elf = select_choice(&elf, "elf_subrace", "wood_elf").unwrap();
    assert_eq!(elf.effective_scores().wisdom, 15);

    let mut dwarf = elf.clone();
    dwarf.race = RaceType::Dwarf;
    let dwarf = reconcile(&dwarf);
    assert!(dwarf
        .racial_features
        .iter()
        .all(|s| s.feature_id.starts_with("dwarf_")));
    assert!(!dwarf.has_feature("elf_subrace"));
    assert_eq!(dwarf.effective_scores().wisdom, 14);
    assert_eq!(dwarf.effective_scores().constitution, 16);
}

#[test]
fn test_choice_features_wait_for_a_choice() {
    for class in CharacterClass::all() {
        let character = character(RaceType::Human, *class, 20);
        for selection in character.features() {
            if selection.kind == FeatureKind::Choice {
                panic!("{class} auto-selected {}", selection.feature_id);
            }
        }
    }
}

#[test]
fn test_bardic_inspiration_recovery_changes_at_five() {
    let bard = character(RaceType::Human, CharacterClass::Bard, 4);
    let inspiration = bard.feature("bard_bardic_inspiration").unwrap();
    assert_eq!(inspiration.recovery, RecoveryPolicy::Long);
    // CHA 14 -> +2
    assert_eq!(inspiration.max_uses, Some(2));

    let mut leveled = bard.clone();
    leveled.level = 5;
    let leveled = reconcile(&leveled);
    let inspiration = leveled.feature("bard_bardic_inspiration").unwrap();
    assert_eq!(inspiration.recovery, RecoveryPolicy::Short);
}

#[test]
fn test_tiefling_rebuke_from_level_three() {
    let tiefling = character(RaceType::Tiefling, CharacterClass::Warlock, 2);
    let rebuke = tiefling.feature("tiefling_hellish_rebuke").unwrap();
    assert_eq!(rebuke.max_uses, None);

    let mut leveled = tiefling.clone();
    leveled.level = 3;
    let leveled = reconcile(&leveled);
    let rebuke = leveled.feature("tiefling_hellish_rebuke").unwrap();
    assert_eq!(rebuke.max_uses, Some(1));
    assert_eq!(rebuke.current_uses, Some(1));
}
