//! Feature reconciliation.
//!
//! [`reconcile`] recomputes everything derived from a character's race,
//! class, level and ability scores: class and racial feature selections,
//! their resource pools, feats, hit dice, legacy counters and spellcasting.
//! It is pure and idempotent; calling it on its own output changes nothing.
//!
//! Stale data (selections for features the catalog no longer offers, choice
//! values that are no longer options, unknown feats) is dropped quietly.

use crate::abilities;
use crate::catalog::{self, CharacterClass, FeatureDefinition, RaceType, Source, SubclassPrerequisite};
use crate::character::{
    AsiChoice, Character, FeatSelection, FeatureKind, FeatureSelection, LegacyResource,
    LegacyResources, Pool, RecoveryPolicy,
};
use crate::resources::{self, ResourceContext, ResourcePolicy};
use crate::spellcasting;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from recording a player choice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),
    #[error("Feature {feature_id} requires level {required}")]
    LevelTooLow { feature_id: String, required: u8 },
    #[error("Feature {feature_id} requires {prerequisite} = {value}")]
    PrerequisiteNotMet {
        feature_id: String,
        prerequisite: String,
        value: String,
    },
    #[error("Feature {0} is not a choice")]
    NotAChoice(String),
    #[error("Invalid choice '{value}' for {feature_id}")]
    InvalidChoice { feature_id: String, value: String },
    #[error("Feature {0} is not an ability score improvement")]
    NotAnAsi(String),
    #[error("Ability score improvement {0} is not available at this level")]
    AsiNotAvailable(String),
    #[error("Unknown feat: {0}")]
    UnknownFeat(String),
}

// ============================================================================
// Current uses
// ============================================================================

/// New `current` for a pool whose maximum is being set to `new_max`.
///
/// A pool that was full stays full; a partially spent pool keeps its value,
/// clamped to the new maximum; a pool with no stored value starts full.
pub fn refresh_current(previous_current: Option<u32>, previous_max: Option<u32>, new_max: u32) -> u32 {
    match (previous_current, previous_max) {
        (Some(current), Some(max)) if current >= max => new_max,
        (Some(current), _) => current.min(new_max),
        (None, _) => new_max,
    }
}

fn apply_policy(
    selection: &mut FeatureSelection,
    policy: Option<ResourcePolicy>,
    previous_current: Option<u32>,
    previous_max: Option<u32>,
) {
    match policy {
        Some(policy) => {
            selection.current_uses = Some(refresh_current(previous_current, previous_max, policy.max));
            selection.max_uses = Some(policy.max);
            selection.recovery = policy.recovery;
        }
        None => {
            selection.current_uses = None;
            selection.max_uses = None;
            selection.recovery = RecoveryPolicy::None;
        }
    }
}

// ============================================================================
// Selection building
// ============================================================================

fn prerequisite_met(selections: &[FeatureSelection], prerequisite: &SubclassPrerequisite) -> bool {
    selections
        .iter()
        .any(|s| s.feature_id == prerequisite.feature_id && s.has_choice(prerequisite.value))
}

/// Fresh selection for a definition with no prior state.
fn instantiate(
    definition: &FeatureDefinition,
    ctx: &ResourceContext<'_>,
    legacy: &LegacyResources,
) -> FeatureSelection {
    let mut selection = FeatureSelection {
        feature_id: definition.id.to_string(),
        feature_name: definition.name.to_string(),
        description: definition.description.to_string(),
        level_acquired: definition.level,
        kind: definition.kind,
        choice_value: None,
        choice_label: None,
        asi_choice: None,
        max_uses: None,
        current_uses: None,
        recovery: RecoveryPolicy::None,
    };

    // Sheets from before feature tracking carry their pool in a legacy counter
    let seeded = LegacyResource::for_feature(definition.id)
        .map(|resource| legacy.get(resource))
        .filter(|pool| pool.maximum > 0);
    let (current, max) = match seeded {
        Some(pool) => (Some(pool.current), Some(pool.maximum)),
        None => (None, None),
    };
    apply_policy(&mut selection, resources::resolve(definition.id, ctx), current, max);
    selection
}

/// Refresh a prior selection from its definition, or `None` if it no longer
/// holds a legal value.
fn refresh(
    definition: &FeatureDefinition,
    prior: &FeatureSelection,
    ctx: &ResourceContext<'_>,
) -> Option<FeatureSelection> {
    let mut selection = prior.clone();
    selection.feature_name = definition.name.to_string();
    selection.description = definition.description.to_string();
    selection.level_acquired = definition.level;
    selection.kind = definition.kind;

    match definition.kind {
        FeatureKind::Choice => {
            let value = prior.choice_value.as_deref()?;
            if !definition.accepts(value) {
                debug!(feature = definition.id, value, "Dropping stale choice");
                return None;
            }
            selection.choice_label = definition.label_for(value);
            selection.asi_choice = None;
        }
        FeatureKind::Asi => {
            selection.choice_value = None;
            selection.choice_label = None;
        }
        FeatureKind::Auto => {
            selection.choice_value = None;
            selection.choice_label = None;
            selection.asi_choice = None;
        }
    }

    apply_policy(
        &mut selection,
        resources::resolve(definition.id, ctx),
        prior.current_uses,
        prior.max_uses,
    );
    Some(selection)
}

/// One pass over the definitions, with prerequisites checked against `gate`.
fn build_pass(
    definitions: &[FeatureDefinition],
    previous: &[FeatureSelection],
    eligible: &dyn Fn(&FeatureDefinition) -> bool,
    gate: &[FeatureSelection],
    ctx: &ResourceContext<'_>,
    legacy: &LegacyResources,
) -> Vec<FeatureSelection> {
    let mut output = Vec::new();

    for definition in definitions {
        let prior = previous.iter().find(|s| s.feature_id == definition.id);

        if !eligible(definition) {
            // Feats taken through an ASI slot survive a level drop
            if let Some(prior) = prior.filter(|p| definition.kind == FeatureKind::Asi && p.is_asi_feat()) {
                if let Some(selection) = refresh(definition, prior, ctx) {
                    output.push(selection);
                }
            }
            continue;
        }

        if let Some(prerequisite) = &definition.prerequisite {
            if !prerequisite_met(gate, prerequisite) {
                continue;
            }
        }

        match prior {
            Some(prior) => {
                if let Some(selection) = refresh(definition, prior, ctx) {
                    output.push(selection);
                }
            }
            None => match definition.kind {
                FeatureKind::Auto | FeatureKind::Asi => {
                    output.push(instantiate(definition, ctx, legacy));
                }
                // Choices appear once the player records one
                FeatureKind::Choice => {}
            },
        }
    }

    output
}

/// Reconcile against a definition list, iterating until prerequisites are
/// stable against the output itself.
fn reconcile_against(
    definitions: &[FeatureDefinition],
    previous: &[FeatureSelection],
    eligible: &dyn Fn(&FeatureDefinition) -> bool,
    ctx: &ResourceContext<'_>,
    legacy: &LegacyResources,
) -> Vec<FeatureSelection> {
    let mut output = build_pass(definitions, previous, eligible, previous, ctx, legacy);
    // Each pass can only remove gated selections, so this settles within
    // one pass per definition.
    for _ in 0..definitions.len() {
        let next = build_pass(definitions, previous, eligible, &output, ctx, legacy);
        if next == output {
            break;
        }
        output = next;
    }

    for dropped in previous
        .iter()
        .filter(|p| !output.iter().any(|s| s.feature_id == p.feature_id))
    {
        debug!(feature = %dropped.feature_id, "Feature no longer applies");
    }

    output
}

/// Next class feature selections for `class` at `level`.
pub fn reconcile_class_features(
    previous: &[FeatureSelection],
    class: CharacterClass,
    level: u8,
    ctx: &ResourceContext<'_>,
    legacy: &LegacyResources,
) -> Vec<FeatureSelection> {
    reconcile_against(
        catalog::feature_definitions(Source::Class(class)),
        previous,
        &|definition| definition.level <= level,
        ctx,
        legacy,
    )
}

/// Next racial feature selections for `race`. Racial features are not level gated.
pub fn reconcile_racial_features(
    previous: &[FeatureSelection],
    race: RaceType,
    ctx: &ResourceContext<'_>,
    legacy: &LegacyResources,
) -> Vec<FeatureSelection> {
    reconcile_against(
        catalog::feature_definitions(Source::Race(race)),
        previous,
        &|_| true,
        ctx,
        legacy,
    )
}

/// Feats chosen through ASI selections, in selection order.
pub fn derive_feats(class_features: &[FeatureSelection]) -> Vec<FeatSelection> {
    class_features
        .iter()
        .filter_map(|selection| {
            let feat_id = selection.asi_choice.as_ref()?.feat_id()?;
            match catalog::feat_by_id(feat_id) {
                Some(feat) => Some(FeatSelection {
                    feat_id: feat.id.clone(),
                    feat_name: feat.name.clone(),
                    description: feat.description.clone(),
                    level_acquired: selection.level_acquired,
                }),
                None => {
                    warn!(feat_id, feature = %selection.feature_id, "Unknown feat in ASI selection");
                    None
                }
            }
        })
        .collect()
}

/// Take back ability increases spent on ASI slots that no longer apply.
///
/// The slot itself is dropped with its increase, so a slot that comes back
/// on a later level up starts empty against the original scores.
fn release_pruned_increases(character: &Character, level: u8) -> Character {
    let mut next = character.clone();
    let mut scores = character.ability_scores.clone();
    next.class_features.retain(|selection| {
        let Some(choice @ AsiChoice::AbilityIncrease { .. }) = &selection.asi_choice else {
            return true;
        };
        let applies = catalog::find_definition(Source::Class(character.class), &selection.feature_id)
            .is_some_and(|d| d.kind == FeatureKind::Asi && d.level <= level);
        if !applies {
            debug!(feature = %selection.feature_id, "Reverting ability increase");
            scores = abilities::revert_asi(&scores, choice);
        }
        applies
    });
    next.ability_scores = scores;
    next
}

/// Legacy counters that may seed new selections: only those with no
/// tracked selection on the sheet yet.
fn untracked_legacy(character: &Character) -> LegacyResources {
    let mut legacy = character.legacy.clone();
    for resource in LegacyResource::all() {
        if resource.feature_ids().iter().any(|id| character.has_feature(id)) {
            *legacy.get_mut(resource) = Pool::default();
        }
    }
    legacy
}

/// Recompute all derived state.
pub fn reconcile(character: &Character) -> Character {
    let level = character.level.max(1);
    let character = &release_pruned_increases(character, level);
    let seed = untracked_legacy(character);
    let mut next = character.clone();
    next.level = level;

    // Racial selections feed the effective scores used by every formula, so
    // settle their structure first and then refresh pools against the result.
    let provisional_ctx = ResourceContext::new(
        level,
        &character.ability_scores,
        character.race,
        &character.racial_features,
    );
    let provisional = reconcile_racial_features(
        &character.racial_features,
        character.race,
        &provisional_ctx,
        &seed,
    );
    let racial_ctx = ResourceContext::new(level, &character.ability_scores, character.race, &provisional);
    let racial_features =
        reconcile_racial_features(&provisional, character.race, &racial_ctx, &seed);

    let ctx = ResourceContext::new(level, &character.ability_scores, character.race, &racial_features);
    next.class_features = reconcile_class_features(
        &character.class_features,
        character.class,
        level,
        &ctx,
        &seed,
    );
    next.racial_features = racial_features;
    next.feats = derive_feats(&next.class_features);
    next.legacy = resources::project_legacy(&next.class_features, &next.racial_features);

    let hit_dice_max = level as u32;
    next.hit_dice.die = character.class.hit_die();
    next.hit_dice.current = refresh_current(
        Some(character.hit_dice.current),
        Some(character.hit_dice.maximum),
        hit_dice_max,
    );
    next.hit_dice.maximum = hit_dice_max;
    next.hit_points.current = next.hit_points.current.min(next.hit_points.maximum);

    next.magic = spellcasting::derive_magic(&next);
    next
}

// ============================================================================
// Recording choices
// ============================================================================

fn locate(character: &Character, feature_id: &str) -> Option<(Source, &'static FeatureDefinition)> {
    let class = Source::Class(character.class);
    let race = Source::Race(character.race);
    catalog::find_definition(class, feature_id)
        .map(|d| (class, d))
        .or_else(|| catalog::find_definition(race, feature_id).map(|d| (race, d)))
}

/// Record the player's pick for a choice feature and reconcile.
pub fn select_choice(
    character: &Character,
    feature_id: &str,
    value: &str,
) -> Result<Character, SelectionError> {
    let base = reconcile(character);
    let (source, definition) =
        locate(&base, feature_id).ok_or_else(|| SelectionError::UnknownFeature(feature_id.to_string()))?;

    if definition.kind != FeatureKind::Choice {
        return Err(SelectionError::NotAChoice(feature_id.to_string()));
    }
    if matches!(source, Source::Class(_)) && definition.level > base.level {
        return Err(SelectionError::LevelTooLow {
            feature_id: feature_id.to_string(),
            required: definition.level,
        });
    }
    if let Some(prerequisite) = &definition.prerequisite {
        let met = base
            .feature(prerequisite.feature_id)
            .is_some_and(|s| s.has_choice(prerequisite.value));
        if !met {
            return Err(SelectionError::PrerequisiteNotMet {
                feature_id: feature_id.to_string(),
                prerequisite: prerequisite.feature_id.to_string(),
                value: prerequisite.value.to_string(),
            });
        }
    }
    if !definition.accepts(value) {
        return Err(SelectionError::InvalidChoice {
            feature_id: feature_id.to_string(),
            value: value.to_string(),
        });
    }

    let mut next = base;
    match next.feature_mut(feature_id) {
        Some(selection) => selection.choice_value = Some(value.to_string()),
        None => {
            let selection = FeatureSelection {
                feature_id: definition.id.to_string(),
                feature_name: definition.name.to_string(),
                description: definition.description.to_string(),
                level_acquired: definition.level,
                kind: FeatureKind::Choice,
                choice_value: Some(value.to_string()),
                choice_label: definition.label_for(value),
                asi_choice: None,
                max_uses: None,
                current_uses: None,
                recovery: RecoveryPolicy::None,
            };
            match source {
                Source::Class(_) => next.class_features.push(selection),
                Source::Race(_) => next.racial_features.push(selection),
            }
        }
    }

    Ok(reconcile(&next))
}

/// Spend an ASI slot and reconcile.
///
/// Ability increases are applied to the base scores here, once; replacing an
/// earlier increase on the same slot reverts it first.
pub fn select_asi(
    character: &Character,
    feature_id: &str,
    choice: AsiChoice,
) -> Result<Character, SelectionError> {
    let base = reconcile(character);
    let definition = catalog::find_definition(Source::Class(base.class), feature_id)
        .ok_or_else(|| SelectionError::UnknownFeature(feature_id.to_string()))?;
    if definition.kind != FeatureKind::Asi {
        return Err(SelectionError::NotAnAsi(feature_id.to_string()));
    }
    if definition.level > base.level {
        return Err(SelectionError::LevelTooLow {
            feature_id: feature_id.to_string(),
            required: definition.level,
        });
    }
    if let AsiChoice::Feat { feat_id } = &choice {
        if catalog::feat_by_id(feat_id).is_none() {
            return Err(SelectionError::UnknownFeat(feat_id.clone()));
        }
    }

    let mut next = base;
    let selection = next
        .feature_mut(feature_id)
        .ok_or_else(|| SelectionError::AsiNotAvailable(feature_id.to_string()))?;
    let previous = selection.asi_choice.replace(choice.clone());

    if let Some(previous) = previous {
        next.ability_scores = abilities::revert_asi(&next.ability_scores, &previous);
    }
    next.ability_scores = abilities::apply_asi(&next.ability_scores, &choice);

    Ok(reconcile(&next))
}

/// Remove a recorded choice (or reset an ASI slot) and reconcile.
pub fn clear_choice(character: &Character, feature_id: &str) -> Character {
    let mut next = character.clone();
    let mut reverted = None;
    if let Some(selection) = next.feature_mut(feature_id) {
        reverted = selection.asi_choice.take();
    }
    if let Some(previous) = reverted {
        next.ability_scores = abilities::revert_asi(&next.ability_scores, &previous);
    } else {
        next.class_features
            .retain(|s| !(s.feature_id == feature_id && s.kind == FeatureKind::Choice));
        next.racial_features
            .retain(|s| !(s.feature_id == feature_id && s.kind == FeatureKind::Choice));
    }
    reconcile(&next)
}
