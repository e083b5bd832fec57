//! Ability modifiers, proficiency bonus and racial bonuses.
//!
//! Every score that feeds a modifier elsewhere in the crate goes through
//! [`effective_scores`] first, so racial bonuses (including subrace and
//! player-chosen ones) are applied in exactly one place.

use crate::catalog::{self, RaceType, Source};
use crate::character::{Ability, AbilityScores, AsiChoice, Character, FeatureSelection, Skill};
use std::collections::BTreeMap;

/// `floor((score - 10) / 2)`, no lower bound.
pub fn modifier(score: u8) -> i8 {
    (score as i16 - 10).div_euclid(2) as i8
}

/// `ceil(level / 4) + 1`; 0 for level 0.
pub fn proficiency_bonus(level: u8) -> i8 {
    if level == 0 {
        return 0;
    }
    (level.div_ceil(4) + 1) as i8
}

/// Ability bonuses granted by the race, including chosen racial features.
///
/// Only selections whose feature belongs to `race` count, so stale
/// selections from a previous race contribute nothing.
pub fn racial_bonus(race: RaceType, racial_selections: &[FeatureSelection]) -> BTreeMap<Ability, i8> {
    let mut bonuses = BTreeMap::new();
    for (ability, bonus) in race.ability_bonuses() {
        *bonuses.entry(*ability).or_insert(0) += bonus;
    }

    for selection in racial_selections {
        let Some(value) = selection.choice_value.as_deref() else {
            continue;
        };
        let Some(definition) = catalog::find_definition(Source::Race(race), &selection.feature_id)
        else {
            continue;
        };

        if let Some(option) = definition.option(value) {
            for (ability, bonus) in option.bonuses {
                *bonuses.entry(*ability).or_insert(0) += bonus;
            }
        } else if definition.free_choice == Some(catalog::FreeChoice::AbilityPair) {
            if let Some(pair) = catalog::parse_ability_pair(value) {
                for ability in pair {
                    *bonuses.entry(ability).or_insert(0) += 1;
                }
            }
        }
    }

    bonuses
}

/// Base scores plus racial bonuses, saturating at the `u8` bounds.
pub fn effective_scores(
    base: &AbilityScores,
    race: RaceType,
    racial_selections: &[FeatureSelection],
) -> AbilityScores {
    let mut scores = base.clone();
    for (ability, bonus) in racial_bonus(race, racial_selections) {
        let value = scores.get(ability).saturating_add_signed(bonus);
        scores.set(ability, value);
    }
    scores
}

/// Apply an ability increase to base scores. Feat choices leave them unchanged.
pub fn apply_asi(scores: &AbilityScores, choice: &AsiChoice) -> AbilityScores {
    shift_asi(scores, choice, 1)
}

/// Undo a previous [`apply_asi`].
pub fn revert_asi(scores: &AbilityScores, choice: &AsiChoice) -> AbilityScores {
    shift_asi(scores, choice, -1)
}

fn shift_asi(scores: &AbilityScores, choice: &AsiChoice, sign: i8) -> AbilityScores {
    let mut scores = scores.clone();
    if let AsiChoice::AbilityIncrease { first, second } = choice {
        let increases = match second {
            Some(second) if second != first => vec![(*first, 1), (*second, 1)],
            _ => vec![(*first, 2)],
        };
        for (ability, amount) in increases {
            let value = scores.get(ability).saturating_add_signed(amount * sign);
            scores.set(ability, value);
        }
    }
    scores
}

// ============================================================================
// Derived bonuses
// ============================================================================

pub fn saving_throw_bonus(character: &Character, ability: Ability) -> i8 {
    let scores = character.effective_scores();
    let mut bonus = scores.modifier(ability);
    if character.class.saving_throws().contains(&ability) {
        bonus += character.proficiency_bonus();
    }
    bonus
}

pub fn skill_bonus(character: &Character, skill: Skill) -> i8 {
    let scores = character.effective_scores();
    let mut bonus = scores.modifier(skill.ability());
    if character.skill_proficiencies.contains(&skill) {
        bonus += character.proficiency_bonus();
    }
    bonus
}

pub fn passive_perception(character: &Character) -> i8 {
    10 + skill_bonus(character, Skill::Perception)
}

pub fn initiative(character: &Character) -> i8 {
    character.effective_scores().modifier(Ability::Dexterity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CharacterClass;
    use crate::character::{FeatureKind, RecoveryPolicy};
    use rstest::rstest;

    fn racial_choice(feature_id: &str, value: &str) -> FeatureSelection {
        FeatureSelection {
            feature_id: feature_id.to_string(),
            feature_name: String::new(),
            description: String::new(),
            level_acquired: 1,
            kind: FeatureKind::Choice,
            choice_value: Some(value.to_string()),
            choice_label: None,
            asi_choice: None,
            max_uses: None,
            current_uses: None,
            recovery: RecoveryPolicy::None,
        }
    }

    #[rstest]
    #[case(1, -5)]
    #[case(3, -4)]
    #[case(8, -1)]
    #[case(9, -1)]
    #[case(10, 0)]
    #[case(11, 0)]
    #[case(15, 2)]
    #[case(20, 5)]
    #[case(30, 10)]
    fn test_modifier(#[case] score: u8, #[case] expected: i8) {
        assert_eq!(modifier(score), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 2)]
    #[case(4, 2)]
    #[case(5, 3)]
    #[case(9, 4)]
    #[case(13, 5)]
    #[case(17, 6)]
    #[case(20, 6)]
    fn test_proficiency_bonus(#[case] level: u8, #[case] expected: i8) {
        assert_eq!(proficiency_bonus(level), expected);
    }

    #[test]
    fn test_static_racial_bonus() {
        let bonuses = racial_bonus(RaceType::HalfOrc, &[]);
        assert_eq!(bonuses.get(&Ability::Strength), Some(&2));
        assert_eq!(bonuses.get(&Ability::Constitution), Some(&1));
        assert_eq!(bonuses.get(&Ability::Wisdom), None);
    }

    #[test]
    fn test_subrace_choice_adds_bonus() {
        let selections = vec![racial_choice("elf_subrace", "high_elf")];
        let bonuses = racial_bonus(RaceType::Elf, &selections);
        assert_eq!(bonuses.get(&Ability::Dexterity), Some(&2));
        assert_eq!(bonuses.get(&Ability::Intelligence), Some(&1));
    }

    #[test]
    fn test_ability_pair_choice() {
        let selections = vec![racial_choice("half_elf_ability_increase", "str+con")];
        let bonuses = racial_bonus(RaceType::HalfElf, &selections);
        assert_eq!(bonuses.get(&Ability::Charisma), Some(&2));
        assert_eq!(bonuses.get(&Ability::Strength), Some(&1));
        assert_eq!(bonuses.get(&Ability::Constitution), Some(&1));
    }

    #[test]
    fn test_foreign_race_selection_ignored() {
        // An elf subrace stored on a dwarf contributes nothing
        let selections = vec![racial_choice("elf_subrace", "high_elf")];
        let bonuses = racial_bonus(RaceType::Dwarf, &selections);
        assert_eq!(bonuses.len(), 1);
        assert_eq!(bonuses.get(&Ability::Constitution), Some(&2));
    }

    #[test]
    fn test_racial_bonus_idempotent_and_pure() {
        let selections = vec![
            racial_choice("half_elf_ability_increase", "dex+wis"),
        ];
        let snapshot = selections.clone();
        let first = racial_bonus(RaceType::HalfElf, &selections);
        let second = racial_bonus(RaceType::HalfElf, &selections);
        assert_eq!(first, second);
        assert_eq!(selections, snapshot);
    }

    #[test]
    fn test_effective_scores() {
        let base = AbilityScores::new(15, 14, 13, 12, 10, 8);
        let selections = vec![racial_choice("dwarf_subrace", "mountain_dwarf")];
        let effective = effective_scores(&base, RaceType::Dwarf, &selections);
        assert_eq!(effective.strength, 17);
        assert_eq!(effective.constitution, 15);
        assert_eq!(effective.dexterity, 14);
    }

    #[test]
    fn test_apply_and_revert_asi() {
        let base = AbilityScores::new(15, 14, 13, 12, 10, 8);
        let split = AsiChoice::AbilityIncrease {
            first: Ability::Strength,
            second: Some(Ability::Constitution),
        };
        let raised = apply_asi(&base, &split);
        assert_eq!(raised.strength, 16);
        assert_eq!(raised.constitution, 14);
        assert_eq!(revert_asi(&raised, &split), base);

        let single = AsiChoice::AbilityIncrease {
            first: Ability::Dexterity,
            second: None,
        };
        assert_eq!(apply_asi(&base, &single).dexterity, 16);

        let feat = AsiChoice::Feat {
            feat_id: "alert".to_string(),
        };
        assert_eq!(apply_asi(&base, &feat), base);
    }

    #[test]
    fn test_saving_throws_and_skills() {
        let mut character = Character::new("Vex", RaceType::Elf, CharacterClass::Rogue);
        character.ability_scores = AbilityScores::new(10, 15, 12, 14, 12, 10);
        character.skill_proficiencies.insert(Skill::Stealth);

        // DEX 15 + 2 (elf) = 17 -> +3, proficient in DEX saves
        assert_eq!(saving_throw_bonus(&character, Ability::Dexterity), 5);
        assert_eq!(saving_throw_bonus(&character, Ability::Strength), 0);
        assert_eq!(skill_bonus(&character, Skill::Stealth), 5);
        assert_eq!(skill_bonus(&character, Skill::Acrobatics), 3);
        assert_eq!(passive_perception(&character), 11);
        assert_eq!(initiative(&character), 3);
    }
}
