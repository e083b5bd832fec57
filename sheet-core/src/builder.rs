//! Step-by-step character creation.
//!
//! The builder validates the creation inputs (class skills, point buy
//! budget, level range), fills in starting hit points and then hands the
//! character to [`reconcile`] so every derived field is populated.

use crate::catalog::{Background, CharacterClass, RaceType};
use crate::character::{Ability, AbilityScores, Character, HitPoints, Skill};
use crate::reconcile::{reconcile, select_choice, SelectionError};
use thiserror::Error;
use tracing::info;

/// Standard array values.
pub const STANDARD_ARRAY: [u8; 6] = [15, 14, 13, 12, 10, 8];

/// Points available for point buy.
pub const POINT_BUY_TOTAL: u32 = 27;

/// Point buy cost for one score, `None` outside 8..=15.
pub fn point_buy_cost(score: u8) -> Option<u32> {
    match score {
        8..=13 => Some(score as u32 - 8),
        14 => Some(7),
        15 => Some(9),
        _ => None,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Character name is required")]
    MissingName,
    #[error("Race selection is required")]
    MissingRace,
    #[error("Class selection is required")]
    MissingClass,
    #[error("Level must be between 1 and 20, got {0}")]
    InvalidLevel(u8),
    #[error("Expected {expected} skills, got {got}")]
    InvalidSkillCount { expected: usize, got: usize },
    #[error("Skill {} is not available for this class", .0.name())]
    SkillNotAvailable(Skill),
    #[error("Score {0} cannot be bought with points")]
    PointBuyOutOfRange(u8),
    #[error("Point buy spends {spent} of {POINT_BUY_TOTAL} points")]
    PointBuyOverBudget { spent: u32 },
    #[error("Standard array must assign 15, 14, 13, 12, 10 and 8 to one ability each")]
    InvalidStandardArray,
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// How the base scores were chosen; decides the validation in `build`.
#[derive(Debug, Clone, Default)]
enum ScoreMethod {
    #[default]
    Manual,
    StandardArray([(u8, Ability); 6]),
    PointBuy,
}

#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    race: Option<RaceType>,
    class: Option<CharacterClass>,
    background: Option<Background>,
    level: Option<u8>,
    ability_scores: Option<AbilityScores>,
    score_method: ScoreMethod,
    skills: Vec<Skill>,
    choices: Vec<(String, String)>,
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn race(mut self, race: RaceType) -> Self {
        self.race = Some(race);
        self
    }

    pub fn class(mut self, class: CharacterClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Starting level; defaults to 1.
    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Base scores, before racial bonuses.
    pub fn ability_scores(mut self, scores: AbilityScores) -> Self {
        self.ability_scores = Some(scores);
        self.score_method = ScoreMethod::Manual;
        self
    }

    /// Assign each standard array value to an ability. Validated on build.
    pub fn standard_array(mut self, assignment: [(u8, Ability); 6]) -> Self {
        let mut scores = AbilityScores::default();
        for (value, ability) in assignment {
            scores.set(ability, value);
        }
        self.ability_scores = Some(scores);
        self.score_method = ScoreMethod::StandardArray(assignment);
        self
    }

    /// Scores bought with the 27 point budget. Validated on build.
    pub fn point_buy(mut self, scores: AbilityScores) -> Self {
        self.ability_scores = Some(scores);
        self.score_method = ScoreMethod::PointBuy;
        self
    }

    /// Class skills. Background skills are added automatically.
    pub fn skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    /// Record a choice (subrace, subclass, fighting style, ...) applied after
    /// the character is assembled.
    pub fn choice(mut self, feature_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.push((feature_id.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<Character, BuilderError> {
        let name = self.name.ok_or(BuilderError::MissingName)?;
        let race = self.race.ok_or(BuilderError::MissingRace)?;
        let class = self.class.ok_or(BuilderError::MissingClass)?;
        let level = self.level.unwrap_or(1);
        if !(1..=20).contains(&level) {
            return Err(BuilderError::InvalidLevel(level));
        }

        let scores = self.ability_scores.unwrap_or_else(AbilityScores::standard_array);
        match &self.score_method {
            ScoreMethod::Manual => {}
            ScoreMethod::StandardArray(assignment) => validate_standard_array(assignment)?,
            ScoreMethod::PointBuy => validate_point_buy(&scores)?,
        }

        let expected = class.skill_count();
        if self.skills.len() != expected {
            return Err(BuilderError::InvalidSkillCount {
                expected,
                got: self.skills.len(),
            });
        }
        if let Some(skill) = self.skills.iter().find(|s| !class.skill_options().contains(*s)) {
            return Err(BuilderError::SkillNotAvailable(*skill));
        }

        let mut character = Character::new(name, race, class);
        character.level = level;
        character.background = self.background;
        character.ability_scores = scores;
        character.skill_proficiencies.extend(self.skills.iter().copied());
        if let Some(background) = self.background {
            character
                .skill_proficiencies
                .extend(background.skill_proficiencies());
        }

        let mut character = reconcile(&character);
        for (feature_id, value) in &self.choices {
            character = select_choice(&character, feature_id, value)?;
        }

        // Racial choices can change CON, so hit points come last
        character.hit_points = HitPoints::new(starting_hit_points(&character));

        info!(
            name = %character.name,
            race = %race,
            class = %class,
            level,
            "Built character"
        );
        Ok(character)
    }
}

fn validate_standard_array(assignment: &[(u8, Ability); 6]) -> Result<(), BuilderError> {
    let mut values: Vec<u8> = assignment.iter().map(|(value, _)| *value).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let covers_every_ability = Ability::all()
        .iter()
        .all(|ability| assignment.iter().any(|(_, a)| a == ability));
    if values != STANDARD_ARRAY || !covers_every_ability {
        return Err(BuilderError::InvalidStandardArray);
    }
    Ok(())
}

fn validate_point_buy(scores: &AbilityScores) -> Result<(), BuilderError> {
    let mut spent = 0;
    for ability in Ability::all() {
        let score = scores.get(ability);
        spent += point_buy_cost(score).ok_or(BuilderError::PointBuyOutOfRange(score))?;
    }
    if spent > POINT_BUY_TOTAL {
        return Err(BuilderError::PointBuyOverBudget { spent });
    }
    Ok(())
}

/// Maximum hit points with the fixed-value method: a full die at level 1,
/// the rounded-up average after that, plus the CON modifier per level.
pub fn starting_hit_points(character: &Character) -> u32 {
    let die = character.class.hit_die();
    let con = character
        .effective_scores()
        .modifier(Ability::Constitution) as i32;
    let first = (die.sides() as i32 + con).max(1);
    let later = (die.average_rounded_up() as i32 + con).max(1);
    let level = character.level.max(1) as i32;
    (first + later * (level - 1)) as u32
}
