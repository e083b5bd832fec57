//! Spellcasting derivation: slot tables, known/prepared counts and spell
//! list filtering.
//!
//! Slot arrays are always nine long, indexed by spell level minus one.
//! Warlocks use pact magic: all of their slots share one level, looked up by
//! [`pact_slot_level`], and every slot operation routes through that index.

use crate::abilities;
use crate::catalog::{self, CharacterClass, FreeChoice, RaceType, Source, SpellData};
use crate::character::{Ability, Character, FeatureSelection, MagicInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpellSlotError {
    #[error("Character cannot cast spells")]
    NotASpellcaster,
    #[error("Invalid spell slot level: {0}")]
    InvalidSlotLevel(u8),
    #[error("No level {0} spell slot available")]
    NoSlotAvailable(u8),
}

/// How a class gains spell slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasterProgression {
    Full,
    /// Uses the full caster row for `ceil(level / 2)`, starting at level 2.
    Half,
    Pact,
    None,
}

impl CasterProgression {
    pub fn for_class(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Bard
            | CharacterClass::Cleric
            | CharacterClass::Druid
            | CharacterClass::Sorcerer
            | CharacterClass::Wizard => CasterProgression::Full,
            CharacterClass::Paladin | CharacterClass::Ranger => CasterProgression::Half,
            CharacterClass::Warlock => CasterProgression::Pact,
            _ => CasterProgression::None,
        }
    }
}

// ============================================================================
// Slot tables
// ============================================================================

const FULL_CASTER_SLOTS: [[u32; 9]; 20] = [
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

fn full_caster_row(level: u8) -> [u32; 9] {
    match level {
        0 => [0; 9],
        l => FULL_CASTER_SLOTS[(l.min(20) - 1) as usize],
    }
}

/// Spell level of every pact slot at a warlock level.
pub fn pact_slot_level(level: u8) -> u8 {
    match level {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        7..=8 => 4,
        _ => 5,
    }
}

/// Number of pact slots at a warlock level.
pub fn pact_slot_count(level: u8) -> u32 {
    match level {
        0 => 0,
        1 => 1,
        2..=10 => 2,
        11..=16 => 3,
        _ => 4,
    }
}

pub fn max_spell_slots(class: CharacterClass, level: u8) -> [u32; 9] {
    match CasterProgression::for_class(class) {
        CasterProgression::Full => full_caster_row(level),
        CasterProgression::Half if level >= 2 => full_caster_row(level.div_ceil(2)),
        CasterProgression::Pact if level >= 1 => {
            let mut slots = [0; 9];
            slots[(pact_slot_level(level) - 1) as usize] = pact_slot_count(level);
            slots
        }
        _ => [0; 9],
    }
}

/// Highest spell level with at least one slot, or 0.
pub fn highest_slot_level(class: CharacterClass, level: u8) -> u8 {
    max_spell_slots(class, level)
        .iter()
        .rposition(|count| *count > 0)
        .map_or(0, |index| index as u8 + 1)
}

// ============================================================================
// Counts
// ============================================================================

pub fn cantrips_known(class: CharacterClass, level: u8) -> u32 {
    let base = match class {
        CharacterClass::Bard | CharacterClass::Druid | CharacterClass::Warlock => 2,
        CharacterClass::Cleric | CharacterClass::Wizard => 3,
        CharacterClass::Sorcerer => 4,
        _ => return 0,
    };
    match level {
        0..=3 => base,
        4..=9 => base + 1,
        _ => base + 2,
    }
}

const BARD_KNOWN: [u32; 20] = [4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 15, 16, 18, 19, 19, 20, 22, 22, 22];
const SORCERER_KNOWN: [u32; 20] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 12, 13, 13, 14, 14, 15, 15, 15, 15];
const WARLOCK_KNOWN: [u32; 20] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15];
const RANGER_KNOWN: [u32; 20] = [0, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11];

/// Spells known for classes with a fixed list; `None` for preparing classes.
pub fn spells_known(class: CharacterClass, level: u8) -> Option<u32> {
    let table = match class {
        CharacterClass::Bard => &BARD_KNOWN,
        CharacterClass::Sorcerer => &SORCERER_KNOWN,
        CharacterClass::Warlock => &WARLOCK_KNOWN,
        CharacterClass::Ranger => &RANGER_KNOWN,
        _ => return None,
    };
    let index = level.clamp(1, 20) as usize - 1;
    Some(table[index])
}

/// Spells prepared for preparing classes; `None` otherwise.
pub fn spells_prepared(class: CharacterClass, level: u8, modifier: i8) -> Option<u32> {
    let base = match class {
        CharacterClass::Cleric | CharacterClass::Druid | CharacterClass::Wizard => level as i32,
        CharacterClass::Paladin if level < 2 => return Some(0),
        CharacterClass::Paladin => (level / 2) as i32,
        _ => return None,
    };
    Some((base + modifier as i32).max(1) as u32)
}

// ============================================================================
// Derivation
// ============================================================================

/// Cantrip granted by a racial choice feature, if the race has one selected.
pub fn racial_cantrip(
    race: RaceType,
    racial_features: &[FeatureSelection],
) -> Option<&'static SpellData> {
    racial_features.iter().find_map(|selection| {
        let definition = catalog::find_definition(Source::Race(race), &selection.feature_id)?;
        if !matches!(definition.free_choice, Some(FreeChoice::Cantrip(_))) {
            return None;
        }
        let value = selection.choice_value.as_deref()?;
        if !definition.accepts(value) {
            return None;
        }
        catalog::get_spell(value)
    })
}

/// Keep names whose canonical spell passes `legal`, dropping duplicates.
fn filter_spells(names: &[String], legal: impl Fn(&SpellData) -> bool) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for name in names {
        let Some(spell) = catalog::get_spell(name) else {
            debug!(spell = %name, "Dropping unknown spell");
            continue;
        };
        if !legal(spell) {
            debug!(spell = %name, "Dropping spell no longer available");
            continue;
        }
        if kept
            .iter()
            .any(|k| catalog::get_spell(k).is_some_and(|s| s.name == spell.name))
        {
            continue;
        }
        kept.push(name.clone());
    }
    kept
}

/// Recompute the magic record for a character whose class, level and racial
/// features are already up to date.
///
/// Returns `None` when the class cannot cast and no racial feature grants a
/// cantrip. Player overrides and chosen spells carry over from the previous
/// record where still legal.
pub fn derive_magic(character: &Character) -> Option<MagicInfo> {
    let class = character.class;
    let level = character.level;
    let racial = racial_cantrip(character.race, &character.racial_features);

    if !class.is_spellcaster() && racial.is_none() {
        return None;
    }

    let ability = class
        .spellcasting_ability()
        .or(racial.map(|_| Ability::Intelligence));
    let previous = character
        .magic
        .clone()
        .unwrap_or_else(|| MagicInfo::new(ability));

    let scores = character.effective_scores();
    let modifier = ability.map_or(0, |a| scores.modifier(a)) as i32;
    let proficiency = abilities::proficiency_bonus(level) as i32;

    let spell_slots = max_spell_slots(class, level);
    let current_spell_slots = if spell_slots != previous.spell_slots {
        debug!(class = %class, level, "Spell slot table changed, refilling slots");
        spell_slots
    } else {
        let mut current = previous.current_spell_slots;
        for (slot, max) in current.iter_mut().zip(spell_slots) {
            *slot = (*slot).min(max);
        }
        current
    };

    let mut cantrips = filter_spells(&previous.cantrips, |spell| {
        spell.is_cantrip()
            && (spell.classes.contains(&class) || racial.is_some_and(|r| r.name == spell.name))
    });
    if let Some(racial) = racial {
        let present = cantrips
            .iter()
            .any(|name| catalog::get_spell(name).is_some_and(|s| s.name == racial.name));
        if !present {
            cantrips.push(racial.name.to_string());
        }
    }

    let available: Vec<&str> = catalog::spells_by_class_and_level(class, level)
        .iter()
        .map(|s| s.name)
        .collect();
    let spells_known_prepared =
        filter_spells(&previous.spells_known_prepared, |spell| available.contains(&spell.name));
    let spellbook = filter_spells(&previous.spellbook, |spell| {
        class == CharacterClass::Wizard && available.contains(&spell.name)
    });

    let (spell_save_dc, spell_attack_bonus) = match ability {
        Some(_) => (8 + proficiency + modifier, proficiency + modifier),
        None => (0, 0),
    };

    Some(MagicInfo {
        spellcasting_ability: ability,
        spell_save_dc,
        spell_attack_bonus,
        save_dc_override: previous.save_dc_override,
        attack_bonus_override: previous.attack_bonus_override,
        cantrips_known: cantrips_known(class, level),
        spells_known: spells_known(class, level),
        spells_prepared: spells_prepared(class, level, modifier as i8),
        cantrips,
        spells_known_prepared,
        spellbook,
        spell_slots,
        current_spell_slots,
    })
}

// ============================================================================
// Slot use
// ============================================================================

/// Slot array index a request for `slot_level` draws from.
fn slot_index(character: &Character, slot_level: u8) -> Result<usize, SpellSlotError> {
    if !(1..=9).contains(&slot_level) {
        return Err(SpellSlotError::InvalidSlotLevel(slot_level));
    }
    match CasterProgression::for_class(character.class) {
        CasterProgression::Pact => {
            let pact_level = pact_slot_level(character.level);
            if slot_level > pact_level {
                return Err(SpellSlotError::NoSlotAvailable(slot_level));
            }
            Ok((pact_level - 1) as usize)
        }
        _ => Ok((slot_level - 1) as usize),
    }
}

/// Spend one slot. Pact casters spend their pact slot for any level up to
/// the pact slot level.
pub fn use_spell_slot(character: &Character, slot_level: u8) -> Result<Character, SpellSlotError> {
    let index = slot_index(character, slot_level)?;
    let mut next = character.clone();
    let magic = next.magic.as_mut().ok_or(SpellSlotError::NotASpellcaster)?;
    if magic.current_spell_slots[index] == 0 {
        return Err(SpellSlotError::NoSlotAvailable(slot_level));
    }
    magic.current_spell_slots[index] -= 1;
    Ok(next)
}

/// Give one slot back. Already-full slots are left unchanged.
pub fn recover_spell_slot(
    character: &Character,
    slot_level: u8,
) -> Result<Character, SpellSlotError> {
    let index = slot_index(character, slot_level)?;
    let mut next = character.clone();
    let magic = next.magic.as_mut().ok_or(SpellSlotError::NotASpellcaster)?;
    if magic.current_spell_slots[index] < magic.spell_slots[index] {
        magic.current_spell_slots[index] += 1;
    }
    Ok(next)
}

/// One row of the slot display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub slot_level: u8,
    pub current: u32,
    pub maximum: u32,
    pub pact: bool,
}

/// Slot levels with a non-zero maximum, lowest first.
pub fn slot_summary(character: &Character) -> Vec<SlotSummary> {
    let Some(magic) = &character.magic else {
        return Vec::new();
    };
    let pact = CasterProgression::for_class(character.class) == CasterProgression::Pact;
    magic
        .spell_slots
        .iter()
        .zip(magic.current_spell_slots.iter())
        .enumerate()
        .filter(|(_, (max, _))| **max > 0)
        .map(|(index, (max, current))| SlotSummary {
            slot_level: index as u8 + 1,
            current: *current,
            maximum: *max,
            pact,
        })
        .collect()
}
