//! Race table: static ability bonuses and racial feature lists.

use super::{ChoiceOption, FeatureDefinition, FreeChoice};
use crate::catalog::CharacterClass;
use crate::character::Ability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RaceType {
    Human,
    Elf,
    Dwarf,
    Halfling,
    HalfOrc,
    HalfElf,
    Tiefling,
    Gnome,
    Dragonborn,
}

impl RaceType {
    pub fn name(&self) -> &'static str {
        match self {
            RaceType::Human => "Humano",
            RaceType::Elf => "Elfo",
            RaceType::Dwarf => "Anão",
            RaceType::Halfling => "Halfling",
            RaceType::HalfOrc => "Meio-Orc",
            RaceType::HalfElf => "Meio-Elfo",
            RaceType::Tiefling => "Tiefling",
            RaceType::Gnome => "Gnomo",
            RaceType::Dragonborn => "Draconato",
        }
    }

    pub fn all() -> &'static [RaceType] {
        &[
            RaceType::Human,
            RaceType::Elf,
            RaceType::Dwarf,
            RaceType::Halfling,
            RaceType::HalfOrc,
            RaceType::HalfElf,
            RaceType::Tiefling,
            RaceType::Gnome,
            RaceType::Dragonborn,
        ]
    }

    /// Fixed ability bonuses, before any subrace or player choice.
    pub fn ability_bonuses(&self) -> &'static [(Ability, i8)] {
        match self {
            RaceType::Human => &[
                (Ability::Strength, 1),
                (Ability::Dexterity, 1),
                (Ability::Constitution, 1),
                (Ability::Intelligence, 1),
                (Ability::Wisdom, 1),
                (Ability::Charisma, 1),
            ],
            RaceType::Elf | RaceType::Halfling => &[(Ability::Dexterity, 2)],
            RaceType::Dwarf => &[(Ability::Constitution, 2)],
            RaceType::HalfOrc => &[(Ability::Strength, 2), (Ability::Constitution, 1)],
            RaceType::HalfElf => &[(Ability::Charisma, 2)],
            RaceType::Tiefling => &[(Ability::Charisma, 2), (Ability::Intelligence, 1)],
            RaceType::Gnome => &[(Ability::Intelligence, 2)],
            RaceType::Dragonborn => &[(Ability::Strength, 2), (Ability::Charisma, 1)],
        }
    }

    pub fn features(&self) -> &'static [FeatureDefinition] {
        match self {
            RaceType::Human => HUMAN,
            RaceType::Elf => ELF,
            RaceType::Dwarf => DWARF,
            RaceType::Halfling => HALFLING,
            RaceType::HalfOrc => HALF_ORC,
            RaceType::HalfElf => HALF_ELF,
            RaceType::Tiefling => TIEFLING,
            RaceType::Gnome => GNOME,
            RaceType::Dragonborn => DRAGONBORN,
        }
    }
}

impl fmt::Display for RaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Racial features are not level gated; every definition uses level 1.

static HUMAN: &[FeatureDefinition] = &[FeatureDefinition::auto(
    "human_versatility",
    "Versatilidade Humana",
    1,
    "Todos os seus valores de habilidade aumentam em 1.",
)];

static ELF: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "elf_darkvision",
        "Visão no Escuro",
        1,
        "Enxergue na penumbra a até 18 metros.",
    ),
    FeatureDefinition::auto(
        "elf_fey_ancestry",
        "Ancestralidade Feérica",
        1,
        "Vantagem contra encantamento; magia não pode colocá-lo para dormir.",
    ),
    FeatureDefinition::auto(
        "elf_trance",
        "Transe",
        1,
        "Medite por 4 horas em vez de dormir.",
    ),
    FeatureDefinition::choice(
        "elf_subrace",
        "Sub-raça Élfica",
        1,
        "Escolha sua linhagem élfica.",
        &[
            ChoiceOption::new("high_elf", "Alto Elfo", "Mente afiada e um truque de mago.")
                .with_bonuses(&[(Ability::Intelligence, 1)]),
            ChoiceOption::new("wood_elf", "Elfo da Floresta", "Passos rápidos e furtivos.")
                .with_bonuses(&[(Ability::Wisdom, 1)]),
            ChoiceOption::new("drow", "Drow", "Elfo das profundezas.")
                .with_bonuses(&[(Ability::Charisma, 1)]),
        ],
    ),
    FeatureDefinition::free(
        "elf_high_elf_cantrip",
        "Truque de Alto Elfo",
        1,
        "Você conhece um truque da lista de mago.",
        FreeChoice::Cantrip(CharacterClass::Wizard),
    )
    .requires("elf_subrace", "high_elf"),
    FeatureDefinition::auto(
        "elf_mask_of_the_wild",
        "Máscara da Natureza",
        1,
        "Esconda-se mesmo levemente obscurecido por fenômenos naturais.",
    )
    .requires("elf_subrace", "wood_elf"),
];

static DWARF: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "dwarf_darkvision",
        "Visão no Escuro",
        1,
        "Enxergue na penumbra a até 18 metros.",
    ),
    FeatureDefinition::auto(
        "dwarf_resilience",
        "Resiliência Anã",
        1,
        "Vantagem e resistência contra veneno.",
    ),
    FeatureDefinition::choice(
        "dwarf_subrace",
        "Sub-raça Anã",
        1,
        "Escolha sua linhagem anã.",
        &[
            ChoiceOption::new("hill_dwarf", "Anão da Colina", "Robusto e perspicaz.")
                .with_bonuses(&[(Ability::Wisdom, 1)]),
            ChoiceOption::new("mountain_dwarf", "Anão da Montanha", "Forte e treinado em armaduras.")
                .with_bonuses(&[(Ability::Strength, 2)]),
        ],
    ),
    FeatureDefinition::auto(
        "dwarf_toughness",
        "Robustez Anã",
        1,
        "Seu máximo de pontos de vida aumenta em 1 por nível.",
    )
    .requires("dwarf_subrace", "hill_dwarf"),
];

static HALFLING: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "halfling_lucky",
        "Sortudo",
        1,
        "Rerrole resultados 1 em ataques, testes e resistências.",
    ),
    FeatureDefinition::auto(
        "halfling_brave",
        "Bravura",
        1,
        "Vantagem em resistências contra medo.",
    ),
    FeatureDefinition::choice(
        "halfling_subrace",
        "Sub-raça Halfling",
        1,
        "Escolha sua linhagem.",
        &[
            ChoiceOption::new("lightfoot", "Pés-Leves", "Furtivo por natureza.")
                .with_bonuses(&[(Ability::Charisma, 1)]),
            ChoiceOption::new("stout", "Robusto", "Resistente a veneno.")
                .with_bonuses(&[(Ability::Constitution, 1)]),
        ],
    ),
];

static HALF_ORC: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "half_orc_darkvision",
        "Visão no Escuro",
        1,
        "Enxergue na penumbra a até 18 metros.",
    ),
    FeatureDefinition::auto(
        "half_orc_relentless_endurance",
        "Resistência Implacável",
        1,
        "Ao cair a 0 pontos de vida, fique com 1 em vez disso.",
    ),
    FeatureDefinition::auto(
        "half_orc_savage_attacks",
        "Ataques Selvagens",
        1,
        "Role um dado de dano extra em críticos corpo a corpo.",
    ),
];

static HALF_ELF: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "half_elf_darkvision",
        "Visão no Escuro",
        1,
        "Enxergue na penumbra a até 18 metros.",
    ),
    FeatureDefinition::auto(
        "half_elf_fey_ancestry",
        "Ancestralidade Feérica",
        1,
        "Vantagem contra encantamento.",
    ),
    FeatureDefinition::free(
        "half_elf_ability_increase",
        "Aumento de Habilidade",
        1,
        "Dois valores de habilidade à sua escolha aumentam em 1.",
        FreeChoice::AbilityPair,
    ),
];

static TIEFLING: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "tiefling_darkvision",
        "Visão no Escuro",
        1,
        "Enxergue na penumbra a até 18 metros.",
    ),
    FeatureDefinition::auto(
        "tiefling_hellish_resistance",
        "Resistência Infernal",
        1,
        "Resistência a dano de fogo.",
    ),
    FeatureDefinition::auto(
        "tiefling_hellish_rebuke",
        "Repreensão Infernal",
        1,
        "A partir do 3º nível, conjure Repreensão Infernal uma vez por descanso longo.",
    ),
];

static GNOME: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "gnome_darkvision",
        "Visão no Escuro",
        1,
        "Enxergue na penumbra a até 18 metros.",
    ),
    FeatureDefinition::auto(
        "gnome_cunning",
        "Esperteza Gnômica",
        1,
        "Vantagem em resistências de Inteligência, Sabedoria e Carisma contra magia.",
    ),
    FeatureDefinition::choice(
        "gnome_subrace",
        "Sub-raça Gnômica",
        1,
        "Escolha sua linhagem.",
        &[
            ChoiceOption::new("forest_gnome", "Gnomo da Floresta", "Ilusões e animais.")
                .with_bonuses(&[(Ability::Dexterity, 1)]),
            ChoiceOption::new("rock_gnome", "Gnomo das Rochas", "Inventores natos.")
                .with_bonuses(&[(Ability::Constitution, 1)]),
        ],
    ),
];

static DRAGONBORN: &[FeatureDefinition] = &[
    FeatureDefinition::choice(
        "dragonborn_draconic_ancestry",
        "Ancestralidade Dracônica",
        1,
        "Escolha o tipo de dragão; ele define sua arma de sopro e resistência.",
        &[
            ChoiceOption::new("black", "Preto", "Ácido, linha de 1,5 × 9 m.").with_damage("2d6"),
            ChoiceOption::new("blue", "Azul", "Elétrico, linha de 1,5 × 9 m.").with_damage("2d6"),
            ChoiceOption::new("gold", "Ouro", "Fogo, cone de 4,5 m.").with_damage("2d6"),
            ChoiceOption::new("green", "Verde", "Veneno, cone de 4,5 m.").with_damage("2d6"),
            ChoiceOption::new("red", "Vermelho", "Fogo, cone de 4,5 m.").with_damage("2d6"),
            ChoiceOption::new("silver", "Prata", "Frio, cone de 4,5 m.").with_damage("2d6"),
            ChoiceOption::new("white", "Branco", "Frio, cone de 4,5 m.").with_damage("2d6"),
        ],
    ),
    FeatureDefinition::auto(
        "dragonborn_breath_weapon",
        "Arma de Sopro",
        1,
        "Exale energia destrutiva conforme sua ancestralidade.",
    ),
    FeatureDefinition::auto(
        "dragonborn_damage_resistance",
        "Resistência a Dano",
        1,
        "Resistência ao tipo de dano da sua ancestralidade.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bonus_covers_every_ability() {
        let bonuses = RaceType::Human.ability_bonuses();
        assert_eq!(bonuses.len(), 6);
        assert!(bonuses.iter().all(|(_, b)| *b == 1));
    }

    #[test]
    fn test_subrace_options_carry_bonuses() {
        let subrace = ELF.iter().find(|d| d.id == "elf_subrace").unwrap();
        let high_elf = subrace.option("high_elf").unwrap();
        assert_eq!(high_elf.bonuses.to_vec(), vec![(Ability::Intelligence, 1)]);
    }

    #[test]
    fn test_racial_features_not_level_gated() {
        for race in RaceType::all() {
            assert!(race.features().iter().all(|d| d.level == 1));
        }
    }
}
