//! D&D 5e character progression and resource derivation.
//!
//! This crate provides:
//! - A catalog of classes, races, backgrounds, feats and spells
//! - Feature reconciliation: given race, class, level and scores, the
//!   features a character has, their resource pools and spellcasting
//! - Rests, resource use, spell slots and hit dice
//! - Character creation and an editing session with JSON save files
//!
//! # Quick Start
//!
//! ```ignore
//! use sheet_core::{CharacterBuilder, CharacterSheet, SheetConfig};
//! use sheet_core::catalog::{CharacterClass, RaceType};
//! use sheet_core::character::Skill;
//!
//! let character = CharacterBuilder::new()
//!     .name("Thorin")
//!     .race(RaceType::Dwarf)
//!     .class(CharacterClass::Barbarian)
//!     .skills(vec![Skill::Athletics, Skill::Survival])
//!     .build()?;
//!
//! let mut sheet = CharacterSheet::new(character, SheetConfig::default());
//! sheet.set_level(3)?;
//! sheet.choose("barbarian_primal_path", "berserker")?;
//! sheet.long_rest();
//! sheet.save().await?;
//! ```

pub mod abilities;
pub mod builder;
pub mod catalog;
pub mod character;
pub mod dice;
pub mod persist;
pub mod reconcile;
pub mod resources;
pub mod rest;
pub mod sheet;
pub mod spellcasting;

// Primary public API
pub use builder::{BuilderError, CharacterBuilder};
pub use character::{Ability, AbilityScores, AsiChoice, Character, FeatureSelection};
pub use persist::{PersistError, SavedCharacter};
pub use reconcile::{reconcile, SelectionError};
pub use resources::ResourceKey;
pub use rest::{
    apply_long_rest, apply_short_rest, consume, recover_resource, spend_hit_dice, use_resource,
    HitDiceOutcome, ResourceError,
};
pub use sheet::{CharacterSheet, SheetConfig, SheetError};
