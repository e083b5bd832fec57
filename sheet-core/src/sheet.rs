//! Editing session for a single character.
//!
//! [`CharacterSheet`] owns a character and runs [`reconcile`] after every
//! edit, so callers never see stale derived state. Rests and resource use go
//! through [`crate::rest`]; saving and loading through [`crate::persist`].

use crate::builder::starting_hit_points;
use crate::catalog::{CharacterClass, RaceType};
use crate::character::{AbilityScores, AsiChoice, Character};
use crate::persist::{character_save_path, PersistError, SavedCharacter};
use crate::reconcile::{self, reconcile, refresh_current, SelectionError};
use crate::resources::ResourceKey;
use crate::rest::{self, HitDiceOutcome, ResourceError};
use crate::spellcasting::{self, SpellSlotError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Level must be between 1 and 20, got {0}")]
    InvalidLevel(u8),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    SpellSlot(#[from] SpellSlotError),

    #[error("Save error: {0}")]
    Persist(#[from] PersistError),
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    /// Directory for save files.
    pub save_dir: PathBuf,

    /// Heal drift (retired features, stale choices) when a save is loaded.
    pub reconcile_on_load: bool,

    /// Hit dice spent automatically on a short rest.
    pub short_rest_hit_dice: u32,
}

impl SheetConfig {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    pub fn with_reconcile_on_load(mut self, enabled: bool) -> Self {
        self.reconcile_on_load = enabled;
        self
    }

    pub fn with_short_rest_hit_dice(mut self, count: u32) -> Self {
        self.short_rest_hit_dice = count;
        self
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves/characters"),
            reconcile_on_load: true,
            short_rest_hit_dice: 0,
        }
    }
}

pub struct CharacterSheet {
    character: Character,
    config: SheetConfig,
}

impl CharacterSheet {
    pub fn new(character: Character, config: SheetConfig) -> Self {
        Self {
            character: reconcile(&character),
            config,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn into_character(self) -> Character {
        self.character
    }

    /// Replace the character with an edited, reconciled version.
    ///
    /// The hit point maximum moves by the change in fixed-value hit points,
    /// so manual adjustments survive; a full pool stays full.
    fn commit(&mut self, edited: Character) {
        let mut next = reconcile(&edited);
        let before = starting_hit_points(&self.character) as i64;
        let after = starting_hit_points(&next) as i64;
        if before != after {
            let old = &self.character.hit_points;
            let maximum = (old.maximum as i64 + after - before).max(1) as u32;
            next.hit_points.current = refresh_current(Some(old.current), Some(old.maximum), maximum);
            next.hit_points.maximum = maximum;
        }
        self.character = next;
    }

    // ========================================================================
    // Edits
    // ========================================================================

    pub fn set_level(&mut self, level: u8) -> Result<(), SheetError> {
        if !(1..=20).contains(&level) {
            return Err(SheetError::InvalidLevel(level));
        }
        let mut edited = self.character.clone();
        edited.level = level;
        self.commit(edited);
        info!(character = %self.character.name, level, "Level changed");
        Ok(())
    }

    pub fn set_class(&mut self, class: CharacterClass) {
        let mut edited = self.character.clone();
        edited.class = class;
        self.commit(edited);
        info!(character = %self.character.name, class = %class, "Class changed");
    }

    pub fn set_race(&mut self, race: RaceType) {
        let mut edited = self.character.clone();
        edited.race = race;
        self.commit(edited);
        info!(character = %self.character.name, race = %race, "Race changed");
    }

    pub fn set_ability_scores(&mut self, scores: AbilityScores) {
        let mut edited = self.character.clone();
        edited.ability_scores = scores;
        self.commit(edited);
        info!(character = %self.character.name, "Ability scores changed");
    }

    /// Record a choice for a choice feature.
    pub fn choose(&mut self, feature_id: &str, value: &str) -> Result<(), SheetError> {
        let edited = reconcile::select_choice(&self.character, feature_id, value)?;
        self.commit(edited);
        info!(character = %self.character.name, feature = feature_id, value, "Choice recorded");
        Ok(())
    }

    pub fn choose_asi(&mut self, feature_id: &str, choice: AsiChoice) -> Result<(), SheetError> {
        let edited = reconcile::select_asi(&self.character, feature_id, choice)?;
        self.commit(edited);
        info!(character = %self.character.name, feature = feature_id, "Ability score improvement recorded");
        Ok(())
    }

    pub fn clear_choice(&mut self, feature_id: &str) {
        let edited = reconcile::clear_choice(&self.character, feature_id);
        self.commit(edited);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.character.hit_points.take_damage(amount);
    }

    /// Returns the hit points actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.character.hit_points.heal(amount)
    }

    // ========================================================================
    // Rests and resources
    // ========================================================================

    /// Short rest, spending up to the configured number of hit dice.
    pub fn short_rest(&mut self) -> Result<HitDiceOutcome, SheetError> {
        let count = self
            .config
            .short_rest_hit_dice
            .min(self.character.hit_dice.current);
        let (next, outcome) = rest::apply_short_rest_with_hit_dice(&self.character, count)?;
        self.character = next;
        info!(character = %self.character.name, healed = outcome.healed, "Short rest");
        Ok(outcome)
    }

    pub fn long_rest(&mut self) {
        self.character = rest::apply_long_rest(&self.character);
        info!(character = %self.character.name, "Long rest");
    }

    pub fn spend_hit_dice(&mut self, count: u32) -> Result<HitDiceOutcome, SheetError> {
        let (next, outcome) = rest::spend_hit_dice(&self.character, count)?;
        self.character = next;
        Ok(outcome)
    }

    pub fn use_resource(&mut self, key: &ResourceKey) {
        self.character = rest::use_resource(&self.character, key);
    }

    pub fn recover_resource(&mut self, key: &ResourceKey) {
        self.character = rest::recover_resource(&self.character, key);
    }

    pub fn consume(&mut self, feature_id: &str, amount: u32) -> Result<(), SheetError> {
        self.character = rest::consume(&self.character, feature_id, amount)?;
        Ok(())
    }

    pub fn activate_option(&mut self, feature_id: &str) -> Result<(), SheetError> {
        self.character = rest::activate_option(&self.character, feature_id)?;
        Ok(())
    }

    pub fn use_spell_slot(&mut self, slot_level: u8) -> Result<(), SheetError> {
        self.character = spellcasting::use_spell_slot(&self.character, slot_level)?;
        Ok(())
    }

    pub fn recover_spell_slot(&mut self, slot_level: u8) -> Result<(), SheetError> {
        self.character = spellcasting::recover_spell_slot(&self.character, slot_level)?;
        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn save_path(&self) -> PathBuf {
        character_save_path(&self.config.save_dir, &self.character.name)
    }

    /// Write the character to its save file, returning the path.
    pub async fn save(&self) -> Result<PathBuf, SheetError> {
        let path = self.save_path();
        SavedCharacter::new(self.character.clone())
            .save_json(&path)
            .await?;
        info!(character = %self.character.name, path = %path.display(), "Character saved");
        Ok(path)
    }

    pub async fn load(path: impl AsRef<Path>, config: SheetConfig) -> Result<Self, SheetError> {
        let saved = SavedCharacter::load_json(path.as_ref()).await?;
        let character = if config.reconcile_on_load {
            reconcile(&saved.character)
        } else {
            saved.character
        };
        info!(character = %character.name, path = %path.as_ref().display(), "Character loaded");
        Ok(Self { character, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CharacterBuilder;
    use crate::catalog::Background;
    use crate::character::{Ability, Skill};
    use tempfile::tempdir;

    fn sheet() -> CharacterSheet {
        let character = CharacterBuilder::new()
            .name("Brienne")
            .race(RaceType::Human)
            .class(CharacterClass::Fighter)
            .background(Background::Soldier)
            .ability_scores(AbilityScores::new(15, 12, 14, 8, 13, 10))
            .skills(vec![Skill::Perception, Skill::Survival])
            .build()
            .unwrap();
        CharacterSheet::new(character, SheetConfig::default())
    }

    #[test]
    fn test_config_builder() {
        let config = SheetConfig::new("/tmp/saves")
            .with_reconcile_on_load(false)
            .with_short_rest_hit_dice(2);
        assert_eq!(config.save_dir, PathBuf::from("/tmp/saves"));
        assert!(!config.reconcile_on_load);
        assert_eq!(config.short_rest_hit_dice, 2);
        assert!(SheetConfig::default().reconcile_on_load);
    }

    #[test]
    fn test_set_level_validates_and_reconciles() {
        let mut sheet = sheet();
        assert!(matches!(sheet.set_level(0), Err(SheetError::InvalidLevel(0))));
        assert!(matches!(sheet.set_level(21), Err(SheetError::InvalidLevel(21))));

        sheet.set_level(2).unwrap();
        assert!(sheet.character().has_feature("fighter_action_surge"));
        // d10 + 2 at level 1, then 6 + 2
        assert_eq!(sheet.character().hit_points.maximum, 20);
        assert_eq!(sheet.character().hit_points.current, 20);
    }

    #[test]
    fn test_hit_points_follow_edits_but_keep_damage() {
        let mut sheet = sheet();
        sheet.take_damage(5);
        sheet.set_level(2).unwrap();
        assert_eq!(sheet.character().hit_points.maximum, 20);
        assert_eq!(sheet.character().hit_points.current, 7);

        sheet.set_level(1).unwrap();
        assert_eq!(sheet.character().hit_points.maximum, 12);
        assert_eq!(sheet.character().hit_points.current, 7);
    }

    #[test]
    fn test_choose_and_rest() {
        let mut sheet = sheet();
        sheet.set_level(3).unwrap();
        sheet.choose("fighter_martial_archetype", "battle_master").unwrap();
        sheet.choose("fighter_maneuver_1", "trip_attack").unwrap();
        sheet.activate_option("fighter_maneuver_1").unwrap();
        sheet.consume("fighter_battle_master_combat_superiority", 3).unwrap();
        assert!(matches!(
            sheet.consume("fighter_battle_master_combat_superiority", 1),
            Err(SheetError::Resource(ResourceError::Insufficient { .. }))
        ));

        sheet.short_rest().unwrap();
        assert_eq!(sheet.character().legacy.superiority_dice.current, 4);
    }

    #[test]
    fn test_short_rest_spends_configured_hit_dice() {
        let mut sheet = sheet();
        sheet.config.short_rest_hit_dice = 5;
        sheet.take_damage(8);
        let outcome = sheet.short_rest().unwrap();
        // Only one hit die at level 1
        assert_eq!(outcome.rolls.len(), 1);
        assert_eq!(sheet.character().hit_dice.current, 0);
        assert!(outcome.healed >= 3);
    }

    #[test]
    fn test_choose_asi() {
        let mut sheet = sheet();
        sheet.set_level(4).unwrap();
        sheet
            .choose_asi(
                "fighter_asi_4",
                AsiChoice::AbilityIncrease {
                    first: Ability::Constitution,
                    second: Some(Ability::Strength),
                },
            )
            .unwrap();
        // CON 14 + 1 (increase) + 1 (human) = 16
        assert_eq!(sheet.character().effective_scores().constitution, 16);
        assert_eq!(sheet.character().ability_scores.strength, 16);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut sheet = sheet();
        sheet.config = SheetConfig::new(dir.path());
        sheet.set_level(2).unwrap();
        let path = sheet.save().await.unwrap();
        assert_eq!(path, dir.path().join("Brienne.json"));

        let loaded = CharacterSheet::load(&path, SheetConfig::new(dir.path()))
            .await
            .unwrap();
        assert_eq!(loaded.character(), sheet.character());
    }

    #[tokio::test]
    async fn test_load_heals_drift_when_configured() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drift.json");
        let mut character = sheet().into_character();
        character.level = 5;
        SavedCharacter::new(character).save_json(&path).await.unwrap();

        let raw = CharacterSheet::load(&path, SheetConfig::new(dir.path()).with_reconcile_on_load(false))
            .await
            .unwrap();
        assert!(!raw.character().has_feature("fighter_extra_attack"));

        let healed = CharacterSheet::load(&path, SheetConfig::new(dir.path()))
            .await
            .unwrap();
        assert!(healed.character().has_feature("fighter_extra_attack"));
        assert_eq!(healed.character().hit_dice.maximum, 5);
    }
}
