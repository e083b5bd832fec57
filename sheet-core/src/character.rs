//! Character sheet types.
//!
//! The [`Character`] aggregate owns every nested record: feature selections,
//! derived feats, spellcasting data and the legacy resource counters. Derived
//! fields are recomputed by [`crate::reconcile::reconcile`]; nothing here
//! computes rules on its own beyond small accessors.

use crate::abilities;
use crate::catalog::{Background, CharacterClass, RaceType};
use crate::dice::DieType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "FOR",
            Ability::Dexterity => "DES",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "SAB",
            Ability::Charisma => "CAR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Força",
            Ability::Dexterity => "Destreza",
            Ability::Constitution => "Constituição",
            Ability::Intelligence => "Inteligência",
            Ability::Wisdom => "Sabedoria",
            Ability::Charisma => "Carisma",
        }
    }

    /// Stable lowercase key used inside stored choice values (`"str"`, `"dex"`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }

    pub fn from_key(key: &str) -> Option<Ability> {
        Ability::all().into_iter().find(|a| a.key() == key.trim())
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Ability scores container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn standard_array() -> Self {
        Self::new(15, 14, 13, 12, 10, 8)
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: u8) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i8 {
        abilities::modifier(self.get(ability))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

// ============================================================================
// Skills
// ============================================================================

/// D&D 5e skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Skill {
    Athletics,
    Acrobatics,
    SleightOfHand,
    Stealth,
    Arcana,
    History,
    Investigation,
    Nature,
    Religion,
    AnimalHandling,
    Insight,
    Medicine,
    Perception,
    Survival,
    Deception,
    Intimidation,
    Performance,
    Persuasion,
}

impl Skill {
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Athletics => "Atletismo",
            Skill::Acrobatics => "Acrobacia",
            Skill::SleightOfHand => "Prestidigitação",
            Skill::Stealth => "Furtividade",
            Skill::Arcana => "Arcanismo",
            Skill::History => "História",
            Skill::Investigation => "Investigação",
            Skill::Nature => "Natureza",
            Skill::Religion => "Religião",
            Skill::AnimalHandling => "Lidar com Animais",
            Skill::Insight => "Intuição",
            Skill::Medicine => "Medicina",
            Skill::Perception => "Percepção",
            Skill::Survival => "Sobrevivência",
            Skill::Deception => "Enganação",
            Skill::Intimidation => "Intimidação",
            Skill::Performance => "Atuação",
            Skill::Persuasion => "Persuasão",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Hit Points and Hit Dice
// ============================================================================

/// Hit points tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: u32,
    pub maximum: u32,
}

impl HitPoints {
    pub fn new(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Heal up to the maximum, returning the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let old = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - old
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Hit dice pool. The die size follows the class; the maximum follows the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDice {
    pub current: u32,
    pub maximum: u32,
    pub die: DieType,
}

impl HitDice {
    pub fn new(die: DieType, maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
            die,
        }
    }
}

// ============================================================================
// Features
// ============================================================================

/// How a feature enters the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Granted automatically once the level requirement is met.
    Auto,
    /// The player picks one of the catalog options.
    Choice,
    /// Ability Score Improvement slot, spent on raw increases or on a feat.
    Asi,
}

/// When a resource pool refills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPolicy {
    Short,
    Long,
    /// Refills on some other trigger (dawn, initiative) that the sheet does not model.
    Other,
    None,
}

/// The two rest events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestKind {
    Short,
    Long,
}

impl RecoveryPolicy {
    /// Whether a pool with this policy refills on the given rest.
    ///
    /// A long rest recovers everything a short rest does.
    pub fn is_restored_by(&self, rest: RestKind) -> bool {
        match (self, rest) {
            (RecoveryPolicy::Short, _) => true,
            (RecoveryPolicy::Long, RestKind::Long) => true,
            _ => false,
        }
    }
}

/// How the player spent an Ability Score Improvement slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AsiChoice {
    /// +2 to `first`, or +1 to `first` and +1 to `second`.
    AbilityIncrease {
        first: Ability,
        second: Option<Ability>,
    },
    Feat { feat_id: String },
}

impl AsiChoice {
    pub fn feat_id(&self) -> Option<&str> {
        match self {
            AsiChoice::Feat { feat_id } => Some(feat_id),
            AsiChoice::AbilityIncrease { .. } => None,
        }
    }
}

/// A character's materialized instance of a catalog feature definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSelection {
    pub feature_id: String,
    pub feature_name: String,
    pub description: String,
    pub level_acquired: u8,
    pub kind: FeatureKind,
    #[serde(default)]
    pub choice_value: Option<String>,
    #[serde(default)]
    pub choice_label: Option<String>,
    #[serde(default)]
    pub asi_choice: Option<AsiChoice>,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub current_uses: Option<u32>,
    pub recovery: RecoveryPolicy,
}

impl FeatureSelection {
    /// Whether this is an ASI slot spent on a feat.
    pub fn is_asi_feat(&self) -> bool {
        self.kind == FeatureKind::Asi
            && matches!(self.asi_choice, Some(AsiChoice::Feat { .. }))
    }

    pub fn has_choice(&self, value: &str) -> bool {
        self.choice_value.as_deref() == Some(value)
    }
}

/// A feat derived from an ASI selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatSelection {
    pub feat_id: String,
    pub feat_name: String,
    pub description: String,
    pub level_acquired: u8,
}

// ============================================================================
// Legacy Resources
// ============================================================================

/// A current/maximum counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub current: u32,
    pub maximum: u32,
}

impl Pool {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }
}

/// Named resource counters from sheets created before feature-based tracking.
///
/// Each one is a projection of a feature selection; see
/// [`LegacyResource::feature_ids`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LegacyResource {
    Rages,
    KiPoints,
    SorceryPoints,
    BardicInspiration,
    ChannelDivinity,
    LayOnHands,
    WildShape,
    SuperiorityDice,
    SecondWind,
    ActionSurge,
    BreathWeapon,
    RelentlessEndurance,
}

/// Legacy counters as persisted. Missing fields load as empty pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyResources {
    pub rages: Pool,
    pub ki_points: Pool,
    pub sorcery_points: Pool,
    pub bardic_inspiration: Pool,
    pub channel_divinity: Pool,
    pub lay_on_hands: Pool,
    pub wild_shape: Pool,
    pub superiority_dice: Pool,
    pub second_wind: Pool,
    pub action_surge: Pool,
    pub breath_weapon: Pool,
    pub relentless_endurance: Pool,
}

impl LegacyResources {
    pub fn get(&self, resource: LegacyResource) -> Pool {
        match resource {
            LegacyResource::Rages => self.rages,
            LegacyResource::KiPoints => self.ki_points,
            LegacyResource::SorceryPoints => self.sorcery_points,
            LegacyResource::BardicInspiration => self.bardic_inspiration,
            LegacyResource::ChannelDivinity => self.channel_divinity,
            LegacyResource::LayOnHands => self.lay_on_hands,
            LegacyResource::WildShape => self.wild_shape,
            LegacyResource::SuperiorityDice => self.superiority_dice,
            LegacyResource::SecondWind => self.second_wind,
            LegacyResource::ActionSurge => self.action_surge,
            LegacyResource::BreathWeapon => self.breath_weapon,
            LegacyResource::RelentlessEndurance => self.relentless_endurance,
        }
    }

    pub fn get_mut(&mut self, resource: LegacyResource) -> &mut Pool {
        match resource {
            LegacyResource::Rages => &mut self.rages,
            LegacyResource::KiPoints => &mut self.ki_points,
            LegacyResource::SorceryPoints => &mut self.sorcery_points,
            LegacyResource::BardicInspiration => &mut self.bardic_inspiration,
            LegacyResource::ChannelDivinity => &mut self.channel_divinity,
            LegacyResource::LayOnHands => &mut self.lay_on_hands,
            LegacyResource::WildShape => &mut self.wild_shape,
            LegacyResource::SuperiorityDice => &mut self.superiority_dice,
            LegacyResource::SecondWind => &mut self.second_wind,
            LegacyResource::ActionSurge => &mut self.action_surge,
            LegacyResource::BreathWeapon => &mut self.breath_weapon,
            LegacyResource::RelentlessEndurance => &mut self.relentless_endurance,
        }
    }
}

// ============================================================================
// Spellcasting
// ============================================================================

/// Spellcasting state. Slot arrays are indexed by spell level minus one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicInfo {
    pub spellcasting_ability: Option<Ability>,
    pub spell_save_dc: i32,
    pub spell_attack_bonus: i32,
    #[serde(default)]
    pub save_dc_override: Option<i32>,
    #[serde(default)]
    pub attack_bonus_override: Option<i32>,
    pub cantrips_known: u32,
    pub spells_known: Option<u32>,
    pub spells_prepared: Option<u32>,
    #[serde(default)]
    pub cantrips: Vec<String>,
    #[serde(default)]
    pub spells_known_prepared: Vec<String>,
    #[serde(default)]
    pub spellbook: Vec<String>,
    pub spell_slots: [u32; 9],
    pub current_spell_slots: [u32; 9],
}

impl MagicInfo {
    pub fn new(spellcasting_ability: Option<Ability>) -> Self {
        Self {
            spellcasting_ability,
            spell_save_dc: 0,
            spell_attack_bonus: 0,
            save_dc_override: None,
            attack_bonus_override: None,
            cantrips_known: 0,
            spells_known: None,
            spells_prepared: None,
            cantrips: Vec::new(),
            spells_known_prepared: Vec::new(),
            spellbook: Vec::new(),
            spell_slots: [0; 9],
            current_spell_slots: [0; 9],
        }
    }

    /// Save DC shown on the sheet: the player's override, else the computed value.
    pub fn displayed_save_dc(&self) -> i32 {
        self.save_dc_override.unwrap_or(self.spell_save_dc)
    }

    pub fn displayed_attack_bonus(&self) -> i32 {
        self.attack_bonus_override.unwrap_or(self.spell_attack_bonus)
    }
}

// ============================================================================
// Character
// ============================================================================

/// Complete character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,

    // Core inputs
    pub race: RaceType,
    pub class: CharacterClass,
    #[serde(default)]
    pub background: Option<Background>,
    pub level: u8,
    pub ability_scores: AbilityScores,

    // Health
    pub hit_points: HitPoints,
    pub hit_dice: HitDice,

    // Spellcasting
    #[serde(default)]
    pub magic: Option<MagicInfo>,

    // Features
    #[serde(default)]
    pub class_features: Vec<FeatureSelection>,
    #[serde(default)]
    pub racial_features: Vec<FeatureSelection>,
    #[serde(default)]
    pub feats: Vec<FeatSelection>,

    // Proficiencies
    #[serde(default)]
    pub skill_proficiencies: BTreeSet<Skill>,

    #[serde(default)]
    pub legacy: LegacyResources,
}

impl Character {
    /// A level 1 character with no derived state. Run it through
    /// [`crate::reconcile::reconcile`] before display.
    pub fn new(name: impl Into<String>, race: RaceType, class: CharacterClass) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            race,
            class,
            background: None,
            level: 1,
            ability_scores: AbilityScores::default(),
            hit_points: HitPoints::new(class.hit_die().sides()),
            hit_dice: HitDice::new(class.hit_die(), 1),
            magic: None,
            class_features: Vec::new(),
            racial_features: Vec::new(),
            feats: Vec::new(),
            skill_proficiencies: BTreeSet::new(),
            legacy: LegacyResources::default(),
        }
    }

    pub fn class_feature(&self, feature_id: &str) -> Option<&FeatureSelection> {
        self.class_features
            .iter()
            .find(|f| f.feature_id == feature_id)
    }

    pub fn racial_feature(&self, feature_id: &str) -> Option<&FeatureSelection> {
        self.racial_features
            .iter()
            .find(|f| f.feature_id == feature_id)
    }

    /// Look up a selection in either collection.
    pub fn feature(&self, feature_id: &str) -> Option<&FeatureSelection> {
        self.class_feature(feature_id)
            .or_else(|| self.racial_feature(feature_id))
    }

    pub fn feature_mut(&mut self, feature_id: &str) -> Option<&mut FeatureSelection> {
        self.class_features
            .iter_mut()
            .chain(self.racial_features.iter_mut())
            .find(|f| f.feature_id == feature_id)
    }

    pub fn features(&self) -> impl Iterator<Item = &FeatureSelection> {
        self.class_features.iter().chain(self.racial_features.iter())
    }

    pub fn has_feature(&self, feature_id: &str) -> bool {
        self.feature(feature_id).is_some()
    }

    /// Base scores plus racial bonuses.
    pub fn effective_scores(&self) -> AbilityScores {
        abilities::effective_scores(&self.ability_scores, self.race, &self.racial_features)
    }

    pub fn proficiency_bonus(&self) -> i8 {
        abilities::proficiency_bonus(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier() {
        let scores = AbilityScores::new(16, 14, 12, 10, 8, 6);
        assert_eq!(scores.modifier(Ability::Strength), 3);
        assert_eq!(scores.modifier(Ability::Dexterity), 2);
        assert_eq!(scores.modifier(Ability::Constitution), 1);
        assert_eq!(scores.modifier(Ability::Intelligence), 0);
        assert_eq!(scores.modifier(Ability::Wisdom), -1);
        assert_eq!(scores.modifier(Ability::Charisma), -2);

        // Odd scores below 10 round toward negative infinity
        let odd_scores = AbilityScores::new(9, 7, 5, 11, 13, 15);
        assert_eq!(odd_scores.modifier(Ability::Strength), -1);
        assert_eq!(odd_scores.modifier(Ability::Dexterity), -2);
        assert_eq!(odd_scores.modifier(Ability::Constitution), -3);
        assert_eq!(odd_scores.modifier(Ability::Intelligence), 0);
        assert_eq!(odd_scores.modifier(Ability::Wisdom), 1);
        assert_eq!(odd_scores.modifier(Ability::Charisma), 2);
    }

    #[test]
    fn test_ability_keys_round_trip() {
        for ability in Ability::all() {
            assert_eq!(Ability::from_key(ability.key()), Some(ability));
        }
        assert_eq!(Ability::from_key("luck"), None);
    }

    #[test]
    fn test_hit_points_heal_clamps() {
        let mut hp = HitPoints::new(20);
        hp.take_damage(8);
        assert_eq!(hp.current, 12);
        assert_eq!(hp.heal(5), 5);
        assert_eq!(hp.heal(10), 3);
        assert_eq!(hp.current, 20);

        hp.take_damage(50);
        assert_eq!(hp.current, 0);
    }

    #[test]
    fn test_recovery_policy_rest_matrix() {
        assert!(RecoveryPolicy::Short.is_restored_by(RestKind::Short));
        assert!(RecoveryPolicy::Short.is_restored_by(RestKind::Long));
        assert!(!RecoveryPolicy::Long.is_restored_by(RestKind::Short));
        assert!(RecoveryPolicy::Long.is_restored_by(RestKind::Long));
        assert!(!RecoveryPolicy::Other.is_restored_by(RestKind::Long));
        assert!(!RecoveryPolicy::None.is_restored_by(RestKind::Long));
    }

    #[test]
    fn test_pool_clamps_current() {
        let pool = Pool::new(5, 3);
        assert_eq!(pool.current, 3);
        assert_eq!(Pool::full(4), Pool::new(4, 4));
    }

    #[test]
    fn test_legacy_resources_load_from_partial_json() {
        let legacy: LegacyResources =
            serde_json::from_str(r#"{"rages": {"current": 1, "maximum": 2}}"#).unwrap();
        assert_eq!(legacy.get(LegacyResource::Rages), Pool::new(1, 2));
        assert_eq!(legacy.get(LegacyResource::KiPoints), Pool::default());
    }

    #[test]
    fn test_new_character_defaults() {
        let character = Character::new("Thorin", RaceType::Dwarf, CharacterClass::Fighter);
        assert_eq!(character.level, 1);
        assert_eq!(character.hit_dice.die, DieType::D10);
        assert_eq!(character.hit_dice.maximum, 1);
        assert_eq!(character.hit_points.maximum, 10);
        assert!(character.magic.is_none());
    }
}
