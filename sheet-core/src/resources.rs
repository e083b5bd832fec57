//! Resource resolution.
//!
//! [`RESOURCE_TABLE`] is the only place resource maxima are defined. Each
//! entry names a feature id, the formula for its maximum and when it
//! recovers. Features that spend from another feature's pool are listed in
//! [`SHARED_POOLS`] and resolve to `None` themselves.

use crate::abilities;
use crate::catalog::RaceType;
use crate::character::{
    Ability, AbilityScores, Character, FeatureSelection, LegacyResource, LegacyResources, Pool,
    RecoveryPolicy,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum uses and recovery for a tracked feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePolicy {
    pub max: u32,
    pub recovery: RecoveryPolicy,
}

/// Inputs the resolver is allowed to look at.
#[derive(Debug, Clone, Copy)]
pub struct ResourceContext<'a> {
    pub level: u8,
    pub scores: &'a AbilityScores,
    pub race: RaceType,
    pub racial_selections: &'a [FeatureSelection],
}

impl<'a> ResourceContext<'a> {
    pub fn new(
        level: u8,
        scores: &'a AbilityScores,
        race: RaceType,
        racial_selections: &'a [FeatureSelection],
    ) -> Self {
        Self {
            level,
            scores,
            race,
            racial_selections,
        }
    }

    pub fn for_character(character: &'a Character) -> Self {
        Self::new(
            character.level,
            &character.ability_scores,
            character.race,
            &character.racial_features,
        )
    }

    fn modifier(&self, ability: Ability) -> i8 {
        abilities::effective_scores(self.scores, self.race, self.racial_selections)
            .modifier(ability)
    }
}

// ============================================================================
// Formula table
// ============================================================================

/// How a resource maximum is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    Flat(u32),
    /// The character level itself.
    Level,
    /// `(minimum level, value)` brackets in ascending order.
    LevelTable(&'static [(u8, u32)]),
    /// `max(1, modifier)`.
    AbilityModifierMin1(Ability),
    /// `max(1, 1 + modifier)`.
    OnePlusAbilityModifier(Ability),
    ProficiencyBonus,
    LevelMultiple(u32),
    /// Constant granted only to one race, from a minimum level.
    RaceGated {
        race: RaceType,
        min_level: u8,
        max: u32,
    },
}

impl Formula {
    /// Evaluate the formula, or `None` when it does not apply to this context.
    pub fn evaluate(&self, ctx: &ResourceContext<'_>) -> Option<u32> {
        match *self {
            Formula::Flat(max) => Some(max),
            Formula::Level => Some(ctx.level as u32),
            Formula::LevelTable(brackets) => brackets
                .iter()
                .rev()
                .find(|(min_level, _)| ctx.level >= *min_level)
                .map(|(_, value)| *value),
            Formula::AbilityModifierMin1(ability) => Some(ctx.modifier(ability).max(1) as u32),
            Formula::OnePlusAbilityModifier(ability) => {
                Some((1 + ctx.modifier(ability)).max(1) as u32)
            }
            Formula::ProficiencyBonus => Some(abilities::proficiency_bonus(ctx.level).max(0) as u32),
            Formula::LevelMultiple(factor) => Some(ctx.level as u32 * factor),
            Formula::RaceGated {
                race,
                min_level,
                max,
            } => (ctx.race == race && ctx.level >= min_level).then_some(max),
        }
    }
}

/// Recovery policy of a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Fixed(RecoveryPolicy),
    /// Switches policy once the character reaches `level`.
    FromLevel {
        before: RecoveryPolicy,
        level: u8,
        after: RecoveryPolicy,
    },
}

impl Recovery {
    pub fn at_level(&self, level: u8) -> RecoveryPolicy {
        match *self {
            Recovery::Fixed(policy) => policy,
            Recovery::FromLevel {
                before,
                level: switch,
                after,
            } => {
                if level >= switch {
                    after
                } else {
                    before
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRule {
    pub feature_id: &'static str,
    pub formula: Formula,
    pub recovery: Recovery,
}

const fn rule(feature_id: &'static str, formula: Formula, recovery: RecoveryPolicy) -> ResourceRule {
    ResourceRule {
        feature_id,
        formula,
        recovery: Recovery::Fixed(recovery),
    }
}

use RecoveryPolicy::{Long, Short};

pub static RESOURCE_TABLE: &[ResourceRule] = &[
    // Barbarian
    rule(
        "barbarian_rage",
        Formula::LevelTable(&[(1, 2), (3, 3), (6, 4), (12, 5), (17, 6)]),
        Long,
    ),
    // Bard
    ResourceRule {
        feature_id: "bard_bardic_inspiration",
        formula: Formula::AbilityModifierMin1(Ability::Charisma),
        recovery: Recovery::FromLevel {
            before: Long,
            level: 5,
            after: Short,
        },
    },
    // Cleric
    rule(
        "cleric_channel_divinity",
        Formula::LevelTable(&[(2, 1), (6, 2), (18, 3)]),
        Short,
    ),
    rule(
        "cleric_warding_flare",
        Formula::AbilityModifierMin1(Ability::Wisdom),
        Long,
    ),
    rule(
        "cleric_war_priest",
        Formula::AbilityModifierMin1(Ability::Wisdom),
        Long,
    ),
    // Druid
    rule("druid_wild_shape", Formula::Flat(2), Short),
    rule("druid_natural_recovery", Formula::Flat(1), Long),
    // Fighter
    rule("fighter_second_wind", Formula::Flat(1), Short),
    rule(
        "fighter_action_surge",
        Formula::LevelTable(&[(2, 1), (17, 2)]),
        Short,
    ),
    rule(
        "fighter_battle_master_combat_superiority",
        Formula::LevelTable(&[(3, 4), (7, 5), (15, 6)]),
        Short,
    ),
    rule(
        "fighter_indomitable",
        Formula::LevelTable(&[(9, 1), (13, 2), (17, 3)]),
        Long,
    ),
    // Monk
    rule("monk_ki", Formula::Level, Short),
    // Paladin
    rule(
        "paladin_divine_sense",
        Formula::OnePlusAbilityModifier(Ability::Charisma),
        Long,
    ),
    rule("paladin_lay_on_hands", Formula::LevelMultiple(5), Long),
    rule("paladin_channel_divinity", Formula::Flat(1), Short),
    // Ranger
    rule("ranger_favored_foe", Formula::ProficiencyBonus, Long),
    // Rogue
    rule("rogue_stroke_of_luck", Formula::Flat(1), Short),
    // Sorcerer
    rule("sorcerer_font_of_magic", Formula::Level, Long),
    rule("sorcerer_tides_of_chaos", Formula::Flat(1), Long),
    // Warlock
    rule("warlock_fey_presence", Formula::Flat(1), Short),
    rule("warlock_mystic_arcanum", Formula::Flat(1), Long),
    // Wizard
    rule("wizard_arcane_recovery", Formula::Flat(1), Long),
    rule("wizard_portent", Formula::Flat(2), Long),
    // Races
    rule(
        "dragonborn_breath_weapon",
        Formula::RaceGated {
            race: RaceType::Dragonborn,
            min_level: 1,
            max: 1,
        },
        Short,
    ),
    rule(
        "half_orc_relentless_endurance",
        Formula::RaceGated {
            race: RaceType::HalfOrc,
            min_level: 1,
            max: 1,
        },
        Long,
    ),
    rule(
        "tiefling_hellish_rebuke",
        Formula::RaceGated {
            race: RaceType::Tiefling,
            min_level: 3,
            max: 1,
        },
        Long,
    ),
];

/// `(dependant, pool holder)` pairs. Dependants spend from the holder's pool.
pub static SHARED_POOLS: &[(&str, &str)] = &[
    ("fighter_maneuver_1", "fighter_battle_master_combat_superiority"),
    ("fighter_maneuver_2", "fighter_battle_master_combat_superiority"),
    ("fighter_maneuver_3", "fighter_battle_master_combat_superiority"),
    ("sorcerer_metamagic_1", "sorcerer_font_of_magic"),
    ("sorcerer_metamagic_2", "sorcerer_font_of_magic"),
    ("sorcerer_metamagic_3", "sorcerer_font_of_magic"),
    ("monk_flurry_of_blows", "monk_ki"),
    ("monk_patient_defense", "monk_ki"),
    ("monk_step_of_the_wind", "monk_ki"),
    ("monk_stunning_strike", "monk_ki"),
    ("monk_shadow_arts", "monk_ki"),
    ("bard_cutting_words", "bard_bardic_inspiration"),
    ("bard_combat_inspiration", "bard_bardic_inspiration"),
];

/// Resolve the resource policy for a feature.
///
/// Returns `None` for features that are not tracked consumables, for pool
/// dependants, and for formulas that do not apply to the context.
pub fn resolve(feature_id: &str, ctx: &ResourceContext<'_>) -> Option<ResourcePolicy> {
    let rule = RESOURCE_TABLE.iter().find(|r| r.feature_id == feature_id)?;
    let max = rule.formula.evaluate(ctx)?;
    Some(ResourcePolicy {
        max,
        recovery: rule.recovery.at_level(ctx.level),
    })
}

/// The feature holding the pool a dependant spends from.
pub fn shared_pool(feature_id: &str) -> Option<&'static str> {
    SHARED_POOLS
        .iter()
        .find(|(dependant, _)| *dependant == feature_id)
        .map(|(_, holder)| *holder)
}

// ============================================================================
// Legacy shim
// ============================================================================

impl LegacyResource {
    pub fn all() -> [LegacyResource; 12] {
        [
            LegacyResource::Rages,
            LegacyResource::KiPoints,
            LegacyResource::SorceryPoints,
            LegacyResource::BardicInspiration,
            LegacyResource::ChannelDivinity,
            LegacyResource::LayOnHands,
            LegacyResource::WildShape,
            LegacyResource::SuperiorityDice,
            LegacyResource::SecondWind,
            LegacyResource::ActionSurge,
            LegacyResource::BreathWeapon,
            LegacyResource::RelentlessEndurance,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LegacyResource::Rages => "Fúrias",
            LegacyResource::KiPoints => "Pontos de Ki",
            LegacyResource::SorceryPoints => "Pontos de Feitiçaria",
            LegacyResource::BardicInspiration => "Inspiração de Bardo",
            LegacyResource::ChannelDivinity => "Canalizar Divindade",
            LegacyResource::LayOnHands => "Cura pelas Mãos",
            LegacyResource::WildShape => "Forma Selvagem",
            LegacyResource::SuperiorityDice => "Dados de Superioridade",
            LegacyResource::SecondWind => "Retomar o Fôlego",
            LegacyResource::ActionSurge => "Surto de Ação",
            LegacyResource::BreathWeapon => "Arma de Sopro",
            LegacyResource::RelentlessEndurance => "Resistência Implacável",
        }
    }

    /// Feature ids backing this counter, in lookup order.
    pub fn feature_ids(&self) -> &'static [&'static str] {
        match self {
            LegacyResource::Rages => &["barbarian_rage"],
            LegacyResource::KiPoints => &["monk_ki"],
            LegacyResource::SorceryPoints => &["sorcerer_font_of_magic"],
            LegacyResource::BardicInspiration => &["bard_bardic_inspiration"],
            LegacyResource::ChannelDivinity => {
                &["cleric_channel_divinity", "paladin_channel_divinity"]
            }
            LegacyResource::LayOnHands => &["paladin_lay_on_hands"],
            LegacyResource::WildShape => &["druid_wild_shape"],
            LegacyResource::SuperiorityDice => &["fighter_battle_master_combat_superiority"],
            LegacyResource::SecondWind => &["fighter_second_wind"],
            LegacyResource::ActionSurge => &["fighter_action_surge"],
            LegacyResource::BreathWeapon => &["dragonborn_breath_weapon"],
            LegacyResource::RelentlessEndurance => &["half_orc_relentless_endurance"],
        }
    }

    pub fn for_feature(feature_id: &str) -> Option<LegacyResource> {
        LegacyResource::all()
            .into_iter()
            .find(|legacy| legacy.feature_ids().contains(&feature_id))
    }
}

impl fmt::Display for LegacyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Project tracked selections onto the legacy counters.
///
/// Counters with no backing selection are empty.
pub fn project_legacy(
    class_features: &[FeatureSelection],
    racial_features: &[FeatureSelection],
) -> LegacyResources {
    let mut legacy = LegacyResources::default();
    for resource in LegacyResource::all() {
        let pool = class_features
            .iter()
            .chain(racial_features)
            .filter(|s| resource.feature_ids().contains(&s.feature_id.as_str()))
            .find_map(|s| Some(Pool::new(s.current_uses?, s.max_uses?)))
            .unwrap_or_default();
        *legacy.get_mut(resource) = pool;
    }
    legacy
}

/// A resource addressed either by feature id or by legacy counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKey {
    Feature(String),
    Legacy(LegacyResource),
}

impl ResourceKey {
    pub fn feature(feature_id: impl Into<String>) -> Self {
        ResourceKey::Feature(feature_id.into())
    }

    /// The tracked selection this key refers to on `character`.
    ///
    /// Pool dependants resolve to their holder.
    pub fn resolve(&self, character: &Character) -> Option<String> {
        match self {
            ResourceKey::Feature(feature_id) => pool_holder(character, feature_id),
            ResourceKey::Legacy(legacy) => legacy
                .feature_ids()
                .iter()
                .find(|id| {
                    character
                        .feature(id)
                        .is_some_and(|s| s.max_uses.is_some())
                })
                .map(|id| id.to_string()),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Feature(id) => write!(f, "{}", id),
            ResourceKey::Legacy(legacy) => write!(f, "{}", legacy),
        }
    }
}

/// The selection whose pool a feature spends from: itself when tracked,
/// otherwise its shared pool holder when the character has it.
pub fn pool_holder(character: &Character, feature_id: &str) -> Option<String> {
    if character
        .feature(feature_id)
        .is_some_and(|s| s.max_uses.is_some())
    {
        return Some(feature_id.to_string());
    }
    let holder = shared_pool(feature_id)?;
    character
        .feature(holder)
        .is_some_and(|s| s.max_uses.is_some())
        .then(|| holder.to_string())
}
