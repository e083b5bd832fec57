//! Rests, resource use and hit dice.
//!
//! Everything here takes a character by reference and returns a new one.
//! Use and recover are forgiving (an empty or full pool is left alone);
//! `consume` and the hit dice functions report why they could not proceed.

use crate::catalog::{self, Source};
use crate::character::{Ability, Character, LegacyResource, RestKind};
use crate::resources::{self, ResourceKey};
use crate::spellcasting::{CasterProgression, pact_slot_level};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Not enough uses of {feature_id}: need {needed}, have {available}")]
    Insufficient {
        feature_id: String,
        needed: u32,
        available: u32,
    },
    #[error("{0} is not a tracked resource")]
    NotTracked(String),
    #[error("Not enough hit dice: requested {requested}, have {available}")]
    NotEnoughHitDice { requested: u32, available: u32 },
    #[error("Roll {roll} is impossible on a d{sides}")]
    InvalidRoll { roll: u32, sides: u32 },
    #[error("{0} has no selected option with a cost")]
    NoOptionCost(String),
}

// ============================================================================
// Rests
// ============================================================================

fn restore_pools(character: &mut Character, rest: RestKind) {
    for selection in character
        .class_features
        .iter_mut()
        .chain(character.racial_features.iter_mut())
    {
        let Some(max) = selection.max_uses else {
            continue;
        };
        // Long rests refill every counter a legacy sheet tracked
        let legacy_mapped = rest == RestKind::Long
            && LegacyResource::for_feature(&selection.feature_id).is_some();
        if selection.recovery.is_restored_by(rest) || legacy_mapped {
            selection.current_uses = Some(max);
        }
    }
    character.legacy = resources::project_legacy(&character.class_features, &character.racial_features);
}

/// Short rest: refill short-rest pools and pact slots.
pub fn apply_short_rest(character: &Character) -> Character {
    let mut next = character.clone();
    restore_pools(&mut next, RestKind::Short);

    if CasterProgression::for_class(next.class) == CasterProgression::Pact {
        let slot = pact_slot_level(next.level).checked_sub(1);
        if let (Some(magic), Some(index)) = (next.magic.as_mut(), slot) {
            let index = index as usize;
            magic.current_spell_slots[index] = magic.spell_slots[index];
        }
    }

    debug!(character = %next.name, "Short rest");
    next
}

/// Short rest that also spends `count` hit dice.
pub fn apply_short_rest_with_hit_dice(
    character: &Character,
    count: u32,
) -> Result<(Character, HitDiceOutcome), ResourceError> {
    let rested = apply_short_rest(character);
    spend_hit_dice(&rested, count)
}

/// Long rest: full hit points, half the hit dice back, every slot and every
/// rest-recovered pool refilled.
pub fn apply_long_rest(character: &Character) -> Character {
    let mut next = character.clone();
    next.hit_points.current = next.hit_points.maximum;

    let recovered = (next.hit_dice.maximum / 2).max(1);
    next.hit_dice.current = (next.hit_dice.current + recovered).min(next.hit_dice.maximum);

    if let Some(magic) = next.magic.as_mut() {
        magic.current_spell_slots = magic.spell_slots;
    }
    restore_pools(&mut next, RestKind::Long);

    debug!(character = %next.name, "Long rest");
    next
}

// ============================================================================
// Resource use
// ============================================================================

fn adjust(character: &Character, key: &ResourceKey, delta: i32) -> Character {
    let mut next = character.clone();
    let Some(holder) = key.resolve(&next) else {
        debug!(resource = %key, "Ignoring untracked resource");
        return next;
    };
    if let Some(selection) = next.feature_mut(&holder) {
        if let (Some(current), Some(max)) = (selection.current_uses, selection.max_uses) {
            selection.current_uses = Some(match delta {
                d if d < 0 => current.saturating_sub(1),
                _ => (current + 1).min(max),
            });
        }
    }
    next.legacy = resources::project_legacy(&next.class_features, &next.racial_features);
    next
}

/// Spend one use. An empty or untracked pool is left unchanged.
pub fn use_resource(character: &Character, key: &ResourceKey) -> Character {
    adjust(character, key, -1)
}

/// Give back one use, never above the maximum.
pub fn recover_resource(character: &Character, key: &ResourceKey) -> Character {
    adjust(character, key, 1)
}

/// Spend `amount` uses from the pool `feature_id` draws on.
pub fn consume(character: &Character, feature_id: &str, amount: u32) -> Result<Character, ResourceError> {
    let holder = resources::pool_holder(character, feature_id)
        .ok_or_else(|| ResourceError::NotTracked(feature_id.to_string()))?;

    let mut next = character.clone();
    let selection = next
        .feature_mut(&holder)
        .ok_or_else(|| ResourceError::NotTracked(feature_id.to_string()))?;
    let available = selection.current_uses.unwrap_or(0);
    if available < amount {
        return Err(ResourceError::Insufficient {
            feature_id: holder,
            needed: amount,
            available,
        });
    }
    selection.current_uses = Some(available - amount);
    next.legacy = resources::project_legacy(&next.class_features, &next.racial_features);
    Ok(next)
}

/// Spend the cost of the option chosen for `feature_id` (a maneuver, a
/// metamagic option) from its shared pool.
pub fn activate_option(character: &Character, feature_id: &str) -> Result<Character, ResourceError> {
    let value = character
        .feature(feature_id)
        .and_then(|s| s.choice_value.as_deref())
        .ok_or_else(|| ResourceError::NotTracked(feature_id.to_string()))?;

    let cost = catalog::find_definition(Source::Class(character.class), feature_id)
        .or_else(|| catalog::find_definition(Source::Race(character.race), feature_id))
        .and_then(|definition| definition.option(value))
        .and_then(|option| option.cost)
        .ok_or_else(|| ResourceError::NoOptionCost(feature_id.to_string()))?;

    consume(character, feature_id, cost)
}

// ============================================================================
// Hit dice
// ============================================================================

/// What spending hit dice produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDiceOutcome {
    pub rolls: Vec<u32>,
    /// Hit points actually restored, after the maximum cap.
    pub healed: u32,
}

/// Spend `count` hit dice, rolling with the thread RNG.
pub fn spend_hit_dice(character: &Character, count: u32) -> Result<(Character, HitDiceOutcome), ResourceError> {
    spend_hit_dice_with_rng(character, count, &mut rand::thread_rng())
}

pub fn spend_hit_dice_with_rng<R: Rng>(
    character: &Character,
    count: u32,
    rng: &mut R,
) -> Result<(Character, HitDiceOutcome), ResourceError> {
    check_available(character, count)?;
    let rolls: Vec<u32> = (0..count)
        .map(|_| character.hit_dice.die.roll_with_rng(rng))
        .collect();
    spend_hit_dice_with_rolls(character, &rolls)
}

/// Spend one hit die per roll, using the given die results.
pub fn spend_hit_dice_with_rolls(
    character: &Character,
    rolls: &[u32],
) -> Result<(Character, HitDiceOutcome), ResourceError> {
    check_available(character, rolls.len() as u32)?;
    let sides = character.hit_dice.die.sides();
    if let Some(&roll) = rolls.iter().find(|&&r| r == 0 || r > sides) {
        return Err(ResourceError::InvalidRoll { roll, sides });
    }

    let con = character.effective_scores().modifier(Ability::Constitution) as i32;
    let mut next = character.clone();
    let mut healed = 0;
    for &roll in rolls {
        let amount = (roll as i32 + con).max(1) as u32;
        healed += next.hit_points.heal(amount);
    }
    next.hit_dice.current -= rolls.len() as u32;

    Ok((
        next,
        HitDiceOutcome {
            rolls: rolls.to_vec(),
            healed,
        },
    ))
}

fn check_available(character: &Character, requested: u32) -> Result<(), ResourceError> {
    let available = character.hit_dice.current;
    if requested > available {
        return Err(ResourceError::NotEnoughHitDice { requested, available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterClass, RaceType};
    use crate::character::{AbilityScores, Pool};
    use crate::reconcile::{reconcile, select_choice};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fighter(level: u8) -> Character {
        let mut character = Character::new("Tordek", RaceType::Human, CharacterClass::Fighter);
        character.level = level;
        // CON 14 + 1 (human) = 15
        character.ability_scores = AbilityScores::new(16, 12, 14, 10, 10, 8);
        reconcile(&character)
    }

    fn uses(character: &Character, feature_id: &str) -> Option<u32> {
        character.feature(feature_id).and_then(|s| s.current_uses)
    }

    #[test]
    fn test_short_rest_on_unleveled_warlock() {
        let mut warlock = Character::new("Hex", RaceType::Tiefling, CharacterClass::Warlock);
        warlock.level = 1;
        let mut warlock = reconcile(&warlock);
        warlock.level = 0;

        let rested = apply_short_rest(&warlock);
        assert_eq!(rested.magic, warlock.magic);
    }

    #[test]
    fn test_use_and_recover() {
        let character = fighter(2);
        let key = ResourceKey::feature("fighter_action_surge");
        let used = use_resource(&character, &key);
        assert_eq!(uses(&used, "fighter_action_surge"), Some(0));
        assert_eq!(used.legacy.action_surge, Pool::new(0, 1));

        // Empty pool stays empty
        assert_eq!(use_resource(&used, &key), used);

        let recovered = recover_resource(&used, &key);
        assert_eq!(uses(&recovered, "fighter_action_surge"), Some(1));
        // Full pool stays put
        assert_eq!(recover_resource(&recovered, &key), recovered);
    }

    #[test]
    fn test_legacy_key_resolves_to_feature() {
        let character = fighter(1);
        let used = use_resource(&character, &ResourceKey::Legacy(LegacyResource::SecondWind));
        assert_eq!(uses(&used, "fighter_second_wind"), Some(0));

        // No backing feature: nothing happens
        let untouched = use_resource(&character, &ResourceKey::Legacy(LegacyResource::Rages));
        assert_eq!(untouched, character);
    }

    #[test]
    fn test_consume_errors() {
        let character = fighter(3);
        let character = select_choice(&character, "fighter_martial_archetype", "battle_master").unwrap();

        let spent = consume(&character, "fighter_battle_master_combat_superiority", 3).unwrap();
        assert_eq!(uses(&spent, "fighter_battle_master_combat_superiority"), Some(1));

        assert_eq!(
            consume(&spent, "fighter_battle_master_combat_superiority", 2),
            Err(ResourceError::Insufficient {
                feature_id: "fighter_battle_master_combat_superiority".to_string(),
                needed: 2,
                available: 1,
            })
        );
        assert_eq!(
            consume(&spent, "barbarian_rage", 1),
            Err(ResourceError::NotTracked("barbarian_rage".to_string()))
        );
    }

    #[test]
    fn test_activate_option_spends_shared_pool() {
        let character = fighter(3);
        let character = select_choice(&character, "fighter_martial_archetype", "battle_master").unwrap();
        let character = select_choice(&character, "fighter_maneuver_1", "trip_attack").unwrap();

        let activated = activate_option(&character, "fighter_maneuver_1").unwrap();
        assert_eq!(uses(&activated, "fighter_battle_master_combat_superiority"), Some(3));
        assert_eq!(activated.legacy.superiority_dice, Pool::new(3, 4));

        assert_eq!(
            activate_option(&character, "fighter_maneuver_2"),
            Err(ResourceError::NotTracked("fighter_maneuver_2".to_string()))
        );
    }

    #[test]
    fn test_short_rest_restores_short_pools_only() {
        let mut character = Character::new("Rex", RaceType::Dragonborn, CharacterClass::Paladin);
        character.level = 3;
        let character = reconcile(&character);
        let character = consume(&character, "paladin_lay_on_hands", 5).unwrap();
        let character = use_resource(&character, &ResourceKey::feature("paladin_channel_divinity"));
        let character = use_resource(&character, &ResourceKey::feature("dragonborn_breath_weapon"));

        let rested = apply_short_rest(&character);
        assert_eq!(uses(&rested, "paladin_channel_divinity"), Some(1));
        assert_eq!(uses(&rested, "dragonborn_breath_weapon"), Some(1));
        assert_eq!(uses(&rested, "paladin_lay_on_hands"), Some(10));

        let rested = apply_long_rest(&rested);
        assert_eq!(uses(&rested, "paladin_lay_on_hands"), Some(15));
    }

    #[test]
    fn test_rest_without_resources_is_noop() {
        let character = reconcile(&Character::new("Pip", RaceType::Halfling, CharacterClass::Rogue));
        assert_eq!(apply_short_rest(&character), character);
        assert_eq!(apply_long_rest(&character), character);
    }

    #[test]
    fn test_long_rest_hit_dice() {
        let mut character = fighter(5);
        character.hit_dice.current = 0;
        character.hit_points.current = 1;
        let rested = apply_long_rest(&character);
        assert_eq!(rested.hit_dice.current, 2);
        assert_eq!(rested.hit_points.current, rested.hit_points.maximum);

        let mut low = fighter(1);
        low.hit_dice.current = 0;
        assert_eq!(apply_long_rest(&low).hit_dice.current, 1);
    }

    #[test]
    fn test_spend_hit_dice_with_rolls() {
        let mut character = fighter(3);
        character.hit_points.maximum = 28;
        character.hit_points.current = 10;

        let (next, outcome) = spend_hit_dice_with_rolls(&character, &[4]).unwrap();
        assert_eq!(outcome.healed, 6);
        assert_eq!(next.hit_points.current, 16);
        assert_eq!(next.hit_dice.current, 2);

        assert_eq!(
            spend_hit_dice_with_rolls(&character, &[1, 2, 3, 4]),
            Err(ResourceError::NotEnoughHitDice {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(
            spend_hit_dice_with_rolls(&character, &[11]),
            Err(ResourceError::InvalidRoll { roll: 11, sides: 10 })
        );
    }

    #[test]
    fn test_hit_dice_heal_at_least_one_and_cap() {
        let mut character = fighter(2);
        character.ability_scores.constitution = 3; // effective 4 -> -3
        character.hit_points.maximum = 20;
        character.hit_points.current = 19;
        let (next, outcome) = spend_hit_dice_with_rolls(&character, &[1, 1]).unwrap();
        assert_eq!(outcome.healed, 1);
        assert_eq!(next.hit_points.current, 20);
        assert_eq!(next.hit_dice.current, 0);
    }

    #[test]
    fn test_spend_hit_dice_with_rng_is_deterministic() {
        let mut character = fighter(4);
        character.hit_points.current = 1;
        let (first, outcome) = spend_hit_dice_with_rng(&character, 2, &mut StdRng::seed_from_u64(7)).unwrap();
        let (second, _) = spend_hit_dice_with_rng(&character, 2, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(outcome.rolls.len(), 2);
        assert!(outcome.rolls.iter().all(|r| (1..=10).contains(r)));
    }
}
