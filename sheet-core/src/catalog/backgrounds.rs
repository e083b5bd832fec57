//! Character backgrounds and the skills they grant.

use crate::character::Skill;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Background {
    Acolyte,
    Charlatan,
    Criminal,
    Entertainer,
    FolkHero,
    GuildArtisan,
    Hermit,
    Noble,
    Outlander,
    Sage,
    Sailor,
    Soldier,
    Urchin,
}

impl Background {
    pub fn name(&self) -> &'static str {
        match self {
            Background::Acolyte => "Acólito",
            Background::Charlatan => "Charlatão",
            Background::Criminal => "Criminoso",
            Background::Entertainer => "Artista",
            Background::FolkHero => "Herói do Povo",
            Background::GuildArtisan => "Artesão de Guilda",
            Background::Hermit => "Eremita",
            Background::Noble => "Nobre",
            Background::Outlander => "Forasteiro",
            Background::Sage => "Sábio",
            Background::Sailor => "Marinheiro",
            Background::Soldier => "Soldado",
            Background::Urchin => "Órfão",
        }
    }

    pub fn skill_proficiencies(&self) -> [Skill; 2] {
        match self {
            Background::Acolyte => [Skill::Insight, Skill::Religion],
            Background::Charlatan => [Skill::Deception, Skill::SleightOfHand],
            Background::Criminal => [Skill::Deception, Skill::Stealth],
            Background::Entertainer => [Skill::Acrobatics, Skill::Performance],
            Background::FolkHero => [Skill::AnimalHandling, Skill::Survival],
            Background::GuildArtisan => [Skill::Insight, Skill::Persuasion],
            Background::Hermit => [Skill::Medicine, Skill::Religion],
            Background::Noble => [Skill::History, Skill::Persuasion],
            Background::Outlander => [Skill::Athletics, Skill::Survival],
            Background::Sage => [Skill::Arcana, Skill::History],
            Background::Sailor => [Skill::Athletics, Skill::Perception],
            Background::Soldier => [Skill::Athletics, Skill::Intimidation],
            Background::Urchin => [Skill::SleightOfHand, Skill::Stealth],
        }
    }

    pub fn all() -> &'static [Background] {
        &[
            Background::Acolyte,
            Background::Charlatan,
            Background::Criminal,
            Background::Entertainer,
            Background::FolkHero,
            Background::GuildArtisan,
            Background::Hermit,
            Background::Noble,
            Background::Outlander,
            Background::Sage,
            Background::Sailor,
            Background::Soldier,
            Background::Urchin,
        ]
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
