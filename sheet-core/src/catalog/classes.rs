//! Class table: hit dice, proficiencies and the ordered feature lists.

use super::{ChoiceOption, FeatureDefinition};
use crate::character::{Ability, Skill};
use crate::dice::DieType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    pub fn hit_die(&self) -> DieType {
        match self {
            CharacterClass::Barbarian => DieType::D12,
            CharacterClass::Fighter | CharacterClass::Paladin | CharacterClass::Ranger => {
                DieType::D10
            }
            CharacterClass::Bard
            | CharacterClass::Cleric
            | CharacterClass::Druid
            | CharacterClass::Monk
            | CharacterClass::Rogue
            | CharacterClass::Warlock => DieType::D8,
            CharacterClass::Sorcerer | CharacterClass::Wizard => DieType::D6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Bárbaro",
            CharacterClass::Bard => "Bardo",
            CharacterClass::Cleric => "Clérigo",
            CharacterClass::Druid => "Druida",
            CharacterClass::Fighter => "Guerreiro",
            CharacterClass::Monk => "Monge",
            CharacterClass::Paladin => "Paladino",
            CharacterClass::Ranger => "Patrulheiro",
            CharacterClass::Rogue => "Ladino",
            CharacterClass::Sorcerer => "Feiticeiro",
            CharacterClass::Warlock => "Bruxo",
            CharacterClass::Wizard => "Mago",
        }
    }

    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }

    /// Saving throw proficiencies granted by the class.
    pub fn saving_throws(&self) -> [Ability; 2] {
        match self {
            CharacterClass::Barbarian | CharacterClass::Fighter => {
                [Ability::Strength, Ability::Constitution]
            }
            CharacterClass::Bard => [Ability::Dexterity, Ability::Charisma],
            CharacterClass::Cleric | CharacterClass::Paladin | CharacterClass::Warlock => {
                [Ability::Wisdom, Ability::Charisma]
            }
            CharacterClass::Druid | CharacterClass::Wizard => {
                [Ability::Intelligence, Ability::Wisdom]
            }
            CharacterClass::Monk | CharacterClass::Ranger => {
                [Ability::Strength, Ability::Dexterity]
            }
            CharacterClass::Rogue => [Ability::Dexterity, Ability::Intelligence],
            CharacterClass::Sorcerer => [Ability::Constitution, Ability::Charisma],
        }
    }

    /// Number of class skills picked at creation.
    pub fn skill_count(&self) -> usize {
        match self {
            CharacterClass::Rogue => 4,
            CharacterClass::Bard | CharacterClass::Ranger => 3,
            _ => 2,
        }
    }

    pub fn skill_options(&self) -> &'static [Skill] {
        match self {
            CharacterClass::Barbarian => &[
                Skill::AnimalHandling,
                Skill::Athletics,
                Skill::Intimidation,
                Skill::Nature,
                Skill::Perception,
                Skill::Survival,
            ],
            CharacterClass::Bard => &[
                Skill::Acrobatics, Skill::AnimalHandling, Skill::Arcana, Skill::Athletics,
                Skill::Deception, Skill::History, Skill::Insight, Skill::Intimidation,
                Skill::Investigation, Skill::Medicine, Skill::Nature, Skill::Perception,
                Skill::Performance, Skill::Persuasion, Skill::Religion, Skill::SleightOfHand,
                Skill::Stealth, Skill::Survival,
            ],
            CharacterClass::Cleric => &[
                Skill::History,
                Skill::Insight,
                Skill::Medicine,
                Skill::Persuasion,
                Skill::Religion,
            ],
            CharacterClass::Druid => &[
                Skill::Arcana,
                Skill::AnimalHandling,
                Skill::Insight,
                Skill::Medicine,
                Skill::Nature,
                Skill::Perception,
                Skill::Religion,
                Skill::Survival,
            ],
            CharacterClass::Fighter => &[
                Skill::Acrobatics,
                Skill::AnimalHandling,
                Skill::Athletics,
                Skill::History,
                Skill::Insight,
                Skill::Intimidation,
                Skill::Perception,
                Skill::Survival,
            ],
            CharacterClass::Monk => &[
                Skill::Acrobatics,
                Skill::Athletics,
                Skill::History,
                Skill::Insight,
                Skill::Religion,
                Skill::Stealth,
            ],
            CharacterClass::Paladin => &[
                Skill::Athletics,
                Skill::Insight,
                Skill::Intimidation,
                Skill::Medicine,
                Skill::Persuasion,
                Skill::Religion,
            ],
            CharacterClass::Ranger => &[
                Skill::AnimalHandling,
                Skill::Athletics,
                Skill::Insight,
                Skill::Investigation,
                Skill::Nature,
                Skill::Perception,
                Skill::Stealth,
                Skill::Survival,
            ],
            CharacterClass::Rogue => &[
                Skill::Acrobatics, Skill::Athletics, Skill::Deception, Skill::Insight,
                Skill::Intimidation, Skill::Investigation, Skill::Perception, Skill::Performance,
                Skill::Persuasion, Skill::SleightOfHand, Skill::Stealth,
            ],
            CharacterClass::Sorcerer => &[
                Skill::Arcana,
                Skill::Deception,
                Skill::Insight,
                Skill::Intimidation,
                Skill::Persuasion,
                Skill::Religion,
            ],
            CharacterClass::Warlock => &[
                Skill::Arcana,
                Skill::Deception,
                Skill::History,
                Skill::Intimidation,
                Skill::Investigation,
                Skill::Nature,
                Skill::Religion,
            ],
            CharacterClass::Wizard => &[
                Skill::Arcana,
                Skill::History,
                Skill::Insight,
                Skill::Investigation,
                Skill::Medicine,
                Skill::Religion,
            ],
        }
    }

    pub fn spellcasting_ability(&self) -> Option<Ability> {
        match self {
            CharacterClass::Bard
            | CharacterClass::Paladin
            | CharacterClass::Sorcerer
            | CharacterClass::Warlock => Some(Ability::Charisma),
            CharacterClass::Cleric | CharacterClass::Druid | CharacterClass::Ranger => {
                Some(Ability::Wisdom)
            }
            CharacterClass::Wizard => Some(Ability::Intelligence),
            _ => None,
        }
    }

    pub fn is_spellcaster(&self) -> bool {
        self.spellcasting_ability().is_some()
    }

    /// Ordered feature definitions for this class.
    pub fn features(&self) -> &'static [FeatureDefinition] {
        match self {
            CharacterClass::Barbarian => BARBARIAN,
            CharacterClass::Bard => BARD,
            CharacterClass::Cleric => CLERIC,
            CharacterClass::Druid => DRUID,
            CharacterClass::Fighter => FIGHTER,
            CharacterClass::Monk => MONK,
            CharacterClass::Paladin => PALADIN,
            CharacterClass::Ranger => RANGER,
            CharacterClass::Rogue => ROGUE,
            CharacterClass::Sorcerer => SORCERER,
            CharacterClass::Warlock => WARLOCK,
            CharacterClass::Wizard => WIZARD,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Shared option lists
// ============================================================================

const FIGHTING_STYLES: &[ChoiceOption] = &[
    ChoiceOption::new("archery", "Arquearia", "+2 nas jogadas de ataque com armas à distância."),
    ChoiceOption::new("defense", "Defesa", "+1 na CA enquanto estiver usando armadura."),
    ChoiceOption::new(
        "dueling",
        "Duelismo",
        "+2 no dano com uma arma corpo a corpo empunhada em uma mão.",
    ),
    ChoiceOption::new(
        "great_weapon_fighting",
        "Combate com Armas Grandes",
        "Rerrole 1 e 2 nos dados de dano de armas de duas mãos.",
    ),
    ChoiceOption::new(
        "protection",
        "Proteção",
        "Imponha desvantagem a um ataque contra um aliado adjacente usando um escudo.",
    ),
    ChoiceOption::new(
        "two_weapon_fighting",
        "Combate com Duas Armas",
        "Adicione o modificador de habilidade ao dano do segundo ataque.",
    ),
];

const MANEUVERS: &[ChoiceOption] = &[
    ChoiceOption::new(
        "precision_attack",
        "Ataque Preciso",
        "Some o dado de superioridade à jogada de ataque.",
    )
    .with_cost(1),
    ChoiceOption::new(
        "trip_attack",
        "Ataque Derrubador",
        "Some o dado ao dano; o alvo faz um teste de Força ou cai.",
    )
    .with_cost(1)
    .with_damage("1d8"),
    ChoiceOption::new(
        "menacing_attack",
        "Ataque Ameaçador",
        "Some o dado ao dano; o alvo faz um teste de Sabedoria ou fica amedrontado.",
    )
    .with_cost(1)
    .with_damage("1d8"),
    ChoiceOption::new(
        "riposte",
        "Contra-ataque",
        "Quando um inimigo erra você, use a reação para atacar e somar o dado ao dano.",
    )
    .with_cost(1)
    .with_damage("1d8"),
    ChoiceOption::new(
        "parry",
        "Aparar",
        "Reduza o dano recebido em corpo a corpo pelo dado mais seu modificador de Destreza.",
    )
    .with_cost(1),
    ChoiceOption::new(
        "rally",
        "Reunir",
        "Um aliado recebe pontos de vida temporários iguais ao dado mais seu Carisma.",
    )
    .with_cost(1),
];

const METAMAGIC: &[ChoiceOption] = &[
    ChoiceOption::new(
        "careful",
        "Magia Cuidadosa",
        "Criaturas escolhidas passam automaticamente na resistência.",
    )
    .with_cost(1),
    ChoiceOption::new("distant", "Magia Distante", "Dobre o alcance da magia.").with_cost(1),
    ChoiceOption::new(
        "empowered",
        "Magia Potencializada",
        "Rerrole dados de dano até seu modificador de Carisma.",
    )
    .with_cost(1),
    ChoiceOption::new("extended", "Magia Estendida", "Dobre a duração da magia.").with_cost(1),
    ChoiceOption::new(
        "heightened",
        "Magia Elevada",
        "Um alvo tem desvantagem na primeira resistência.",
    )
    .with_cost(3),
    ChoiceOption::new(
        "quickened",
        "Magia Acelerada",
        "Conjure como ação bônus uma magia de uma ação.",
    )
    .with_cost(2),
    ChoiceOption::new("subtle", "Magia Sutil", "Conjure sem componentes verbais ou somáticos.")
        .with_cost(1),
    ChoiceOption::new(
        "twinned",
        "Magia Gêmea",
        "Uma magia de alvo único afeta uma segunda criatura.",
    )
    .with_cost(1),
];

const INVOCATIONS: &[ChoiceOption] = &[
    ChoiceOption::new(
        "agonizing_blast",
        "Explosão Agonizante",
        "Some seu modificador de Carisma ao dano da Rajada Mística.",
    ),
    ChoiceOption::new(
        "armor_of_shadows",
        "Armadura das Sombras",
        "Conjure Armadura Arcana em si mesmo à vontade.",
    ),
    ChoiceOption::new(
        "devils_sight",
        "Visão do Diabo",
        "Enxergue normalmente na escuridão mágica ou não a até 36 metros.",
    ),
    ChoiceOption::new(
        "eldritch_sight",
        "Visão Mística",
        "Conjure Detectar Magia à vontade.",
    ),
    ChoiceOption::new(
        "repelling_blast",
        "Explosão Repulsiva",
        "A Rajada Mística empurra a criatura 3 metros.",
    ),
];

// ============================================================================
// Barbarian
// ============================================================================

static BARBARIAN: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "barbarian_rage",
        "Fúria",
        1,
        "Como ação bônus, entre em fúria: vantagem em testes de Força, dano bônus e resistência a dano físico.",
    ),
    FeatureDefinition::auto(
        "barbarian_unarmored_defense",
        "Defesa sem Armadura",
        1,
        "Sem armadura, sua CA é 10 + Destreza + Constituição.",
    ),
    FeatureDefinition::auto(
        "barbarian_reckless_attack",
        "Ataque Descuidado",
        2,
        "Ataque com vantagem, mas ataques contra você também têm vantagem.",
    ),
    FeatureDefinition::auto(
        "barbarian_danger_sense",
        "Sentido de Perigo",
        2,
        "Vantagem em resistências de Destreza contra efeitos que você pode ver.",
    ),
    FeatureDefinition::choice(
        "barbarian_primal_path",
        "Caminho Primitivo",
        3,
        "Escolha o caminho que molda sua fúria.",
        &[
            ChoiceOption::new("berserker", "Caminho do Furioso", "Fúria sem limites."),
            ChoiceOption::new(
                "totem_warrior",
                "Caminho do Guerreiro Totêmico",
                "Um espírito animal guia sua fúria.",
            ),
        ],
    ),
    FeatureDefinition::auto(
        "barbarian_frenzy",
        "Frenesi",
        3,
        "Durante a fúria, faça um ataque corpo a corpo extra como ação bônus.",
    )
    .requires("barbarian_primal_path", "berserker"),
    FeatureDefinition::choice(
        "barbarian_totem_spirit",
        "Espírito Totêmico",
        3,
        "Escolha o animal totêmico.",
        &[
            ChoiceOption::new("bear", "Urso", "Resistência a todo dano exceto psíquico durante a fúria."),
            ChoiceOption::new("eagle", "Águia", "Disparada como ação bônus durante a fúria."),
            ChoiceOption::new("wolf", "Lobo", "Aliados têm vantagem contra inimigos perto de você."),
        ],
    )
    .requires("barbarian_primal_path", "totem_warrior"),
    FeatureDefinition::asi("barbarian_asi_4", 4),
    FeatureDefinition::auto(
        "barbarian_extra_attack",
        "Ataque Extra",
        5,
        "Ataque duas vezes ao usar a ação Atacar.",
    ),
    FeatureDefinition::auto(
        "barbarian_fast_movement",
        "Movimento Rápido",
        5,
        "Seu deslocamento aumenta em 3 metros sem armadura pesada.",
    ),
    FeatureDefinition::asi("barbarian_asi_8", 8),
    FeatureDefinition::auto(
        "barbarian_brutal_critical",
        "Crítico Brutal",
        9,
        "Role um dado de dano adicional em acertos críticos.",
    ),
    FeatureDefinition::auto(
        "barbarian_relentless_rage",
        "Fúria Implacável",
        11,
        "Ao cair a 0 pontos de vida em fúria, faça uma resistência de Constituição para ficar com 1.",
    ),
    FeatureDefinition::asi("barbarian_asi_12", 12),
    FeatureDefinition::auto(
        "barbarian_persistent_rage",
        "Fúria Persistente",
        15,
        "Sua fúria só termina quando você cai inconsciente ou decide encerrá-la.",
    ),
    FeatureDefinition::asi("barbarian_asi_16", 16),
    FeatureDefinition::asi("barbarian_asi_19", 19),
    FeatureDefinition::auto(
        "barbarian_primal_champion",
        "Campeão Primitivo",
        20,
        "Força e Constituição aumentam em 4, até um máximo de 24.",
    ),
];

// ============================================================================
// Bard
// ============================================================================

static BARD: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "bard_bardic_inspiration",
        "Inspiração de Bardo",
        1,
        "Como ação bônus, conceda um dado de inspiração a uma criatura.",
    ),
    FeatureDefinition::auto(
        "bard_spellcasting",
        "Conjuração",
        1,
        "Você conjura magias de bardo usando Carisma.",
    ),
    FeatureDefinition::auto(
        "bard_jack_of_all_trades",
        "Versatilidade",
        2,
        "Some metade da proficiência a testes sem proficiência.",
    ),
    FeatureDefinition::auto(
        "bard_song_of_rest",
        "Canção de Descanso",
        2,
        "Aliados recuperam 1d6 pontos de vida extras em descansos curtos.",
    ),
    FeatureDefinition::choice(
        "bard_college",
        "Colégio de Bardo",
        3,
        "Escolha o colégio de bardo.",
        &[
            ChoiceOption::new("lore", "Colégio do Conhecimento", "Segredos e palavras cortantes."),
            ChoiceOption::new("valor", "Colégio da Bravura", "Inspiração em combate."),
        ],
    ),
    FeatureDefinition::auto(
        "bard_expertise",
        "Especialização",
        3,
        "Dobre a proficiência em duas perícias.",
    ),
    FeatureDefinition::auto(
        "bard_cutting_words",
        "Palavras Cortantes",
        3,
        "Use a reação e um dado de inspiração para subtrair de uma jogada inimiga.",
    )
    .requires("bard_college", "lore"),
    FeatureDefinition::auto(
        "bard_combat_inspiration",
        "Inspiração em Combate",
        3,
        "O dado de inspiração pode somar ao dano ou à CA.",
    )
    .requires("bard_college", "valor"),
    FeatureDefinition::asi("bard_asi_4", 4),
    FeatureDefinition::auto(
        "bard_font_of_inspiration",
        "Fonte de Inspiração",
        5,
        "Inspiração de Bardo passa a recuperar em descansos curtos.",
    ),
    FeatureDefinition::auto(
        "bard_countercharm",
        "Contra-encanto",
        6,
        "Aliados têm vantagem contra medo e encantamento.",
    ),
    FeatureDefinition::asi("bard_asi_8", 8),
    FeatureDefinition::auto(
        "bard_magical_secrets",
        "Segredos Mágicos",
        10,
        "Aprenda duas magias de qualquer lista.",
    ),
    FeatureDefinition::asi("bard_asi_12", 12),
    FeatureDefinition::asi("bard_asi_16", 16),
    FeatureDefinition::asi("bard_asi_19", 19),
];

// ============================================================================
// Cleric
// ============================================================================

static CLERIC: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "cleric_spellcasting",
        "Conjuração",
        1,
        "Você prepara e conjura magias de clérigo usando Sabedoria.",
    ),
    FeatureDefinition::choice(
        "cleric_divine_domain",
        "Domínio Divino",
        1,
        "Escolha o domínio de sua divindade.",
        &[
            ChoiceOption::new("life", "Domínio da Vida", "Cura e proteção."),
            ChoiceOption::new("light", "Domínio da Luz", "Fogo e revelação."),
            ChoiceOption::new("war", "Domínio da Guerra", "Bravura e batalha."),
        ],
    ),
    FeatureDefinition::auto(
        "cleric_disciple_of_life",
        "Discípulo da Vida",
        1,
        "Magias de cura restauram 2 + nível da magia pontos de vida adicionais.",
    )
    .requires("cleric_divine_domain", "life"),
    FeatureDefinition::auto(
        "cleric_warding_flare",
        "Labareda Protetora",
        1,
        "Imponha desvantagem a um ataque contra você com um clarão de luz.",
    )
    .requires("cleric_divine_domain", "light"),
    FeatureDefinition::auto(
        "cleric_war_priest",
        "Sacerdote da Guerra",
        1,
        "Faça um ataque com arma como ação bônus após usar a ação Atacar.",
    )
    .requires("cleric_divine_domain", "war"),
    FeatureDefinition::auto(
        "cleric_channel_divinity",
        "Canalizar Divindade",
        2,
        "Canalize energia divina para efeitos como Expulsar Mortos-Vivos.",
    ),
    FeatureDefinition::asi("cleric_asi_4", 4),
    FeatureDefinition::auto(
        "cleric_destroy_undead",
        "Destruir Mortos-Vivos",
        5,
        "Mortos-vivos fracos expulsos são destruídos.",
    ),
    FeatureDefinition::asi("cleric_asi_8", 8),
    FeatureDefinition::auto(
        "cleric_divine_intervention",
        "Intervenção Divina",
        10,
        "Implore à sua divindade que intervenha.",
    ),
    FeatureDefinition::asi("cleric_asi_12", 12),
    FeatureDefinition::asi("cleric_asi_16", 16),
    FeatureDefinition::asi("cleric_asi_19", 19),
];

// ============================================================================
// Druid
// ============================================================================

static DRUID: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "druid_druidic",
        "Druídico",
        1,
        "Você conhece a língua secreta dos druidas.",
    ),
    FeatureDefinition::auto(
        "druid_spellcasting",
        "Conjuração",
        1,
        "Você prepara e conjura magias de druida usando Sabedoria.",
    ),
    FeatureDefinition::auto(
        "druid_wild_shape",
        "Forma Selvagem",
        2,
        "Assuma a forma de uma besta que você já viu.",
    ),
    FeatureDefinition::choice(
        "druid_circle",
        "Círculo Druídico",
        2,
        "Escolha seu círculo.",
        &[
            ChoiceOption::new("land", "Círculo da Terra", "Místicos ligados a uma região."),
            ChoiceOption::new("moon", "Círculo da Lua", "Guardiões ferozes da natureza."),
        ],
    ),
    FeatureDefinition::auto(
        "druid_natural_recovery",
        "Recuperação Natural",
        2,
        "Recupere espaços de magia durante um descanso curto.",
    )
    .requires("druid_circle", "land"),
    FeatureDefinition::auto(
        "druid_combat_wild_shape",
        "Forma Selvagem de Combate",
        2,
        "Use Forma Selvagem como ação bônus e gaste espaços para curar-se.",
    )
    .requires("druid_circle", "moon"),
    FeatureDefinition::asi("druid_asi_4", 4),
    FeatureDefinition::asi("druid_asi_8", 8),
    FeatureDefinition::asi("druid_asi_12", 12),
    FeatureDefinition::asi("druid_asi_16", 16),
    FeatureDefinition::auto(
        "druid_timeless_body",
        "Corpo Atemporal",
        18,
        "Você envelhece muito mais devagar.",
    ),
    FeatureDefinition::asi("druid_asi_19", 19),
    FeatureDefinition::auto(
        "druid_archdruid",
        "Arquidruida",
        20,
        "Use Forma Selvagem um número ilimitado de vezes.",
    ),
];

// ============================================================================
// Fighter
// ============================================================================

static FIGHTER: &[FeatureDefinition] = &[
    FeatureDefinition::choice(
        "fighter_fighting_style",
        "Estilo de Luta",
        1,
        "Adote um estilo de combate particular.",
        FIGHTING_STYLES,
    ),
    FeatureDefinition::auto(
        "fighter_second_wind",
        "Retomar o Fôlego",
        1,
        "Como ação bônus, recupere 1d10 + nível de guerreiro pontos de vida.",
    ),
    FeatureDefinition::auto(
        "fighter_action_surge",
        "Surto de Ação",
        2,
        "Realize uma ação adicional no seu turno.",
    ),
    FeatureDefinition::choice(
        "fighter_martial_archetype",
        "Arquétipo Marcial",
        3,
        "Escolha o arquétipo que define seu estilo de combate.",
        &[
            ChoiceOption::new("champion", "Campeão", "Excelência física pura."),
            ChoiceOption::new("battle_master", "Mestre de Batalha", "Manobras e táticas."),
        ],
    ),
    FeatureDefinition::auto(
        "fighter_champion_improved_critical",
        "Crítico Aprimorado",
        3,
        "Seus ataques com arma são críticos com 19 ou 20.",
    )
    .requires("fighter_martial_archetype", "champion"),
    FeatureDefinition::auto(
        "fighter_battle_master_combat_superiority",
        "Superioridade em Combate",
        3,
        "Você tem dados de superioridade (d8) para alimentar manobras.",
    )
    .requires("fighter_martial_archetype", "battle_master"),
    FeatureDefinition::choice(
        "fighter_maneuver_1",
        "Manobra",
        3,
        "Aprenda uma manobra de Mestre de Batalha.",
        MANEUVERS,
    )
    .requires("fighter_martial_archetype", "battle_master"),
    FeatureDefinition::choice(
        "fighter_maneuver_2",
        "Manobra",
        3,
        "Aprenda uma manobra de Mestre de Batalha.",
        MANEUVERS,
    )
    .requires("fighter_martial_archetype", "battle_master"),
    FeatureDefinition::choice(
        "fighter_maneuver_3",
        "Manobra",
        3,
        "Aprenda uma manobra de Mestre de Batalha.",
        MANEUVERS,
    )
    .requires("fighter_martial_archetype", "battle_master"),
    FeatureDefinition::asi("fighter_asi_4", 4),
    FeatureDefinition::auto(
        "fighter_extra_attack",
        "Ataque Extra",
        5,
        "Ataque duas vezes ao usar a ação Atacar.",
    ),
    FeatureDefinition::asi("fighter_asi_6", 6),
    FeatureDefinition::asi("fighter_asi_8", 8),
    FeatureDefinition::auto(
        "fighter_indomitable",
        "Indomável",
        9,
        "Rerrole uma resistência que falhou.",
    ),
    FeatureDefinition::asi("fighter_asi_12", 12),
    FeatureDefinition::asi("fighter_asi_14", 14),
    FeatureDefinition::asi("fighter_asi_16", 16),
    FeatureDefinition::asi("fighter_asi_19", 19),
];

// ============================================================================
// Monk
// ============================================================================

static MONK: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "monk_unarmored_defense",
        "Defesa sem Armadura",
        1,
        "Sem armadura, sua CA é 10 + Destreza + Sabedoria.",
    ),
    FeatureDefinition::auto(
        "monk_martial_arts",
        "Artes Marciais",
        1,
        "Use Destreza em golpes desarmados e faça um golpe extra como ação bônus.",
    ),
    FeatureDefinition::auto(
        "monk_ki",
        "Ki",
        2,
        "Você tem pontos de ki iguais ao seu nível de monge.",
    ),
    FeatureDefinition::auto(
        "monk_flurry_of_blows",
        "Rajada de Golpes",
        2,
        "Gaste 1 ki para fazer dois golpes desarmados como ação bônus.",
    ),
    FeatureDefinition::auto(
        "monk_patient_defense",
        "Defesa Paciente",
        2,
        "Gaste 1 ki para usar Esquivar como ação bônus.",
    ),
    FeatureDefinition::auto(
        "monk_step_of_the_wind",
        "Passo do Vento",
        2,
        "Gaste 1 ki para Desengajar ou Disparar como ação bônus.",
    ),
    FeatureDefinition::auto(
        "monk_unarmored_movement",
        "Movimento sem Armadura",
        2,
        "Seu deslocamento aumenta sem armadura.",
    ),
    FeatureDefinition::choice(
        "monk_monastic_tradition",
        "Tradição Monástica",
        3,
        "Escolha sua tradição monástica.",
        &[
            ChoiceOption::new("open_hand", "Caminho da Mão Aberta", "Mestres do combate desarmado."),
            ChoiceOption::new("shadow", "Caminho das Sombras", "Furtividade e subterfúgio."),
        ],
    ),
    FeatureDefinition::auto(
        "monk_open_hand_technique",
        "Técnica da Mão Aberta",
        3,
        "A Rajada de Golpes pode derrubar ou empurrar o alvo.",
    )
    .requires("monk_monastic_tradition", "open_hand"),
    FeatureDefinition::auto(
        "monk_shadow_arts",
        "Artes das Sombras",
        3,
        "Gaste 2 ki para conjurar Escuridão, Passos sem Pegadas ou Silêncio.",
    )
    .requires("monk_monastic_tradition", "shadow"),
    FeatureDefinition::asi("monk_asi_4", 4),
    FeatureDefinition::auto(
        "monk_stunning_strike",
        "Ataque Atordoante",
        5,
        "Gaste 1 ki ao acertar para tentar atordoar o alvo.",
    ),
    FeatureDefinition::asi("monk_asi_8", 8),
    FeatureDefinition::asi("monk_asi_12", 12),
    FeatureDefinition::asi("monk_asi_16", 16),
    FeatureDefinition::asi("monk_asi_19", 19),
];

// ============================================================================
// Paladin
// ============================================================================

static PALADIN: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "paladin_divine_sense",
        "Sentido Divino",
        1,
        "Detecte celestiais, corruptores e mortos-vivos próximos.",
    ),
    FeatureDefinition::auto(
        "paladin_lay_on_hands",
        "Cura pelas Mãos",
        1,
        "Reserva de cura igual a 5 × seu nível de paladino.",
    ),
    FeatureDefinition::choice(
        "paladin_fighting_style",
        "Estilo de Luta",
        2,
        "Adote um estilo de combate particular.",
        FIGHTING_STYLES,
    ),
    FeatureDefinition::auto(
        "paladin_spellcasting",
        "Conjuração",
        2,
        "Você prepara e conjura magias de paladino usando Carisma.",
    ),
    FeatureDefinition::auto(
        "paladin_divine_smite",
        "Destruição Divina",
        2,
        "Gaste um espaço de magia para causar 2d8 de dano radiante extra.",
    ),
    FeatureDefinition::choice(
        "paladin_sacred_oath",
        "Juramento Sagrado",
        3,
        "Faça o juramento que o une como paladino.",
        &[
            ChoiceOption::new("devotion", "Juramento de Devoção", "Honestidade e coragem."),
            ChoiceOption::new("vengeance", "Juramento de Vingança", "Punir os malfeitores."),
        ],
    ),
    FeatureDefinition::auto(
        "paladin_channel_divinity",
        "Canalizar Divindade",
        3,
        "Canalize energia divina conforme seu juramento.",
    ),
    FeatureDefinition::auto(
        "paladin_sacred_weapon",
        "Arma Sagrada",
        3,
        "Some seu Carisma às jogadas de ataque com a arma imbuída.",
    )
    .requires("paladin_sacred_oath", "devotion"),
    FeatureDefinition::auto(
        "paladin_vow_of_enmity",
        "Voto de Inimizade",
        3,
        "Ganhe vantagem contra uma criatura por 1 minuto.",
    )
    .requires("paladin_sacred_oath", "vengeance"),
    FeatureDefinition::asi("paladin_asi_4", 4),
    FeatureDefinition::auto(
        "paladin_extra_attack",
        "Ataque Extra",
        5,
        "Ataque duas vezes ao usar a ação Atacar.",
    ),
    FeatureDefinition::auto(
        "paladin_aura_of_protection",
        "Aura de Proteção",
        6,
        "Você e aliados próximos somam seu Carisma às resistências.",
    ),
    FeatureDefinition::asi("paladin_asi_8", 8),
    FeatureDefinition::asi("paladin_asi_12", 12),
    FeatureDefinition::asi("paladin_asi_16", 16),
    FeatureDefinition::asi("paladin_asi_19", 19),
];

// ============================================================================
// Ranger
// ============================================================================

static RANGER: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "ranger_favored_enemy",
        "Inimigo Favorito",
        1,
        "Vantagem para rastrear e recordar informações sobre um tipo de inimigo.",
    ),
    FeatureDefinition::auto(
        "ranger_natural_explorer",
        "Explorador Natural",
        1,
        "Você é especialista em um tipo de terreno.",
    ),
    FeatureDefinition::auto(
        "ranger_favored_foe",
        "Adversário Favorito",
        1,
        "Marque uma criatura para causar 1d4 de dano extra.",
    ),
    FeatureDefinition::choice(
        "ranger_fighting_style",
        "Estilo de Luta",
        2,
        "Adote um estilo de combate particular.",
        FIGHTING_STYLES,
    ),
    FeatureDefinition::auto(
        "ranger_spellcasting",
        "Conjuração",
        2,
        "Você conhece e conjura magias de patrulheiro usando Sabedoria.",
    ),
    FeatureDefinition::choice(
        "ranger_archetype",
        "Arquétipo de Patrulheiro",
        3,
        "Escolha seu arquétipo.",
        &[
            ChoiceOption::new("hunter", "Caçador", "Protetor contra as ameaças da natureza."),
            ChoiceOption::new("beast_master", "Mestre das Feras", "Um companheiro animal."),
        ],
    ),
    FeatureDefinition::choice(
        "ranger_hunters_prey",
        "Presa do Caçador",
        3,
        "Escolha sua técnica de caça.",
        &[
            ChoiceOption::new(
                "colossus_slayer",
                "Matador de Colossos",
                "Dano extra contra alvos feridos, uma vez por turno.",
            )
            .with_damage("1d8"),
            ChoiceOption::new(
                "giant_killer",
                "Matador de Gigantes",
                "Reação contra criaturas Grandes que o atacam.",
            ),
            ChoiceOption::new(
                "horde_breaker",
                "Quebrador de Hordas",
                "Ataque extra contra uma criatura adjacente ao alvo.",
            ),
        ],
    )
    .requires("ranger_archetype", "hunter"),
    FeatureDefinition::auto(
        "ranger_colossus_slayer_training",
        "Treinamento de Matador de Colossos",
        3,
        "Vantagem em testes para identificar pontos fracos de criaturas grandes.",
    )
    .requires("ranger_hunters_prey", "colossus_slayer"),
    FeatureDefinition::auto(
        "ranger_companion",
        "Companheiro do Patrulheiro",
        3,
        "Uma besta o acompanha e luta ao seu lado.",
    )
    .requires("ranger_archetype", "beast_master"),
    FeatureDefinition::asi("ranger_asi_4", 4),
    FeatureDefinition::auto(
        "ranger_extra_attack",
        "Ataque Extra",
        5,
        "Ataque duas vezes ao usar a ação Atacar.",
    ),
    FeatureDefinition::asi("ranger_asi_8", 8),
    FeatureDefinition::asi("ranger_asi_12", 12),
    FeatureDefinition::asi("ranger_asi_16", 16),
    FeatureDefinition::asi("ranger_asi_19", 19),
];

// ============================================================================
// Rogue
// ============================================================================

static ROGUE: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "rogue_expertise",
        "Especialização",
        1,
        "Dobre a proficiência em duas perícias.",
    ),
    FeatureDefinition::auto(
        "rogue_sneak_attack",
        "Ataque Furtivo",
        1,
        "Cause dano extra uma vez por turno quando tiver vantagem.",
    ),
    FeatureDefinition::auto(
        "rogue_thieves_cant",
        "Gíria de Ladrão",
        1,
        "Você conhece o dialeto secreto dos ladrões.",
    ),
    FeatureDefinition::auto(
        "rogue_cunning_action",
        "Ação Ardilosa",
        2,
        "Disparar, Desengajar ou Esconder como ação bônus.",
    ),
    FeatureDefinition::choice(
        "rogue_archetype",
        "Arquétipo Ladino",
        3,
        "Escolha seu arquétipo.",
        &[
            ChoiceOption::new("thief", "Ladrão", "Furtos e agilidade."),
            ChoiceOption::new("assassin", "Assassino", "Mestres da morte súbita."),
            ChoiceOption::new(
                "arcane_trickster",
                "Trapaceiro Arcano",
                "Ilusão e encantamento a serviço da ladinagem.",
            ),
        ],
    ),
    FeatureDefinition::auto(
        "rogue_fast_hands",
        "Mãos Rápidas",
        3,
        "Use objetos como ação bônus.",
    )
    .requires("rogue_archetype", "thief"),
    FeatureDefinition::auto(
        "rogue_assassinate",
        "Assassinar",
        3,
        "Vantagem contra quem ainda não agiu; acertos em surpresos são críticos.",
    )
    .requires("rogue_archetype", "assassin"),
    FeatureDefinition::auto(
        "rogue_arcane_trickster_spellcasting",
        "Conjuração do Trapaceiro",
        3,
        "Aprenda magias de ilusão e encantamento da lista de mago.",
    )
    .requires("rogue_archetype", "arcane_trickster"),
    FeatureDefinition::asi("rogue_asi_4", 4),
    FeatureDefinition::auto(
        "rogue_uncanny_dodge",
        "Esquiva Sobrenatural",
        5,
        "Use a reação para reduzir o dano de um ataque à metade.",
    ),
    FeatureDefinition::auto(
        "rogue_evasion",
        "Evasão",
        7,
        "Nenhum dano em resistências de Destreza bem-sucedidas.",
    ),
    FeatureDefinition::asi("rogue_asi_8", 8),
    FeatureDefinition::asi("rogue_asi_10", 10),
    FeatureDefinition::asi("rogue_asi_12", 12),
    FeatureDefinition::asi("rogue_asi_16", 16),
    FeatureDefinition::asi("rogue_asi_19", 19),
    FeatureDefinition::auto(
        "rogue_stroke_of_luck",
        "Golpe de Sorte",
        20,
        "Transforme um erro em acerto ou uma falha em 20.",
    ),
];

// ============================================================================
// Sorcerer
// ============================================================================

static SORCERER: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "sorcerer_spellcasting",
        "Conjuração",
        1,
        "Você conjura magias de feiticeiro usando Carisma.",
    ),
    FeatureDefinition::choice(
        "sorcerer_origin",
        "Origem Feiticeira",
        1,
        "Escolha a fonte do seu poder.",
        &[
            ChoiceOption::new("draconic", "Linhagem Dracônica", "Sangue de dragão."),
            ChoiceOption::new("wild_magic", "Magia Selvagem", "Caos puro."),
        ],
    ),
    FeatureDefinition::auto(
        "sorcerer_draconic_resilience",
        "Resiliência Dracônica",
        1,
        "Seu máximo de pontos de vida aumenta e sua pele forma escamas.",
    )
    .requires("sorcerer_origin", "draconic"),
    FeatureDefinition::auto(
        "sorcerer_tides_of_chaos",
        "Marés do Caos",
        1,
        "Ganhe vantagem em uma jogada.",
    )
    .requires("sorcerer_origin", "wild_magic"),
    FeatureDefinition::auto(
        "sorcerer_font_of_magic",
        "Fonte de Magia",
        2,
        "Você tem pontos de feitiçaria iguais ao seu nível.",
    ),
    FeatureDefinition::choice(
        "sorcerer_metamagic_1",
        "Metamagia",
        3,
        "Escolha uma opção de metamagia.",
        METAMAGIC,
    ),
    FeatureDefinition::choice(
        "sorcerer_metamagic_2",
        "Metamagia",
        3,
        "Escolha uma opção de metamagia.",
        METAMAGIC,
    ),
    FeatureDefinition::asi("sorcerer_asi_4", 4),
    FeatureDefinition::asi("sorcerer_asi_8", 8),
    FeatureDefinition::choice(
        "sorcerer_metamagic_3",
        "Metamagia",
        10,
        "Escolha uma opção de metamagia.",
        METAMAGIC,
    ),
    FeatureDefinition::asi("sorcerer_asi_12", 12),
    FeatureDefinition::asi("sorcerer_asi_16", 16),
    FeatureDefinition::asi("sorcerer_asi_19", 19),
    FeatureDefinition::auto(
        "sorcerer_sorcerous_restoration",
        "Restauração Feiticeira",
        20,
        "Recupere 4 pontos de feitiçaria em um descanso curto.",
    ),
];

// ============================================================================
// Warlock
// ============================================================================

static WARLOCK: &[FeatureDefinition] = &[
    FeatureDefinition::choice(
        "warlock_otherworldly_patron",
        "Patrono Transcendental",
        1,
        "Escolha o ser com quem fez o pacto.",
        &[
            ChoiceOption::new("archfey", "A Arquifada", "Um senhor ou senhora das fadas."),
            ChoiceOption::new("fiend", "O Corruptor", "Um ser dos planos inferiores."),
            ChoiceOption::new("great_old_one", "O Grande Antigo", "Uma entidade incompreensível."),
        ],
    ),
    FeatureDefinition::auto(
        "warlock_fey_presence",
        "Presença Feérica",
        1,
        "Encante ou amedronte criaturas em um cubo de 3 metros.",
    )
    .requires("warlock_otherworldly_patron", "archfey"),
    FeatureDefinition::auto(
        "warlock_dark_ones_blessing",
        "Bênção do Obscuro",
        1,
        "Ganhe pontos de vida temporários ao reduzir um inimigo a 0.",
    )
    .requires("warlock_otherworldly_patron", "fiend"),
    FeatureDefinition::auto(
        "warlock_awakened_mind",
        "Mente Desperta",
        1,
        "Comunique-se telepaticamente com criaturas a até 9 metros.",
    )
    .requires("warlock_otherworldly_patron", "great_old_one"),
    FeatureDefinition::auto(
        "warlock_pact_magic",
        "Magia de Pacto",
        1,
        "Seus espaços de magia têm o mesmo nível e voltam em descansos curtos.",
    ),
    FeatureDefinition::choice(
        "warlock_eldritch_invocation_1",
        "Invocação Mística",
        2,
        "Aprenda uma invocação mística.",
        INVOCATIONS,
    ),
    FeatureDefinition::choice(
        "warlock_eldritch_invocation_2",
        "Invocação Mística",
        2,
        "Aprenda uma invocação mística.",
        INVOCATIONS,
    ),
    FeatureDefinition::choice(
        "warlock_pact_boon",
        "Dádiva do Pacto",
        3,
        "Seu patrono concede uma dádiva.",
        &[
            ChoiceOption::new("chain", "Pacto da Corrente", "Um familiar especial."),
            ChoiceOption::new("blade", "Pacto da Lâmina", "Uma arma de pacto."),
            ChoiceOption::new("tome", "Pacto do Tomo", "Um Livro das Sombras."),
        ],
    ),
    FeatureDefinition::asi("warlock_asi_4", 4),
    FeatureDefinition::asi("warlock_asi_8", 8),
    FeatureDefinition::auto(
        "warlock_mystic_arcanum",
        "Arcana Mística",
        11,
        "Escolha uma magia de 6º nível para conjurar uma vez por descanso longo.",
    ),
    FeatureDefinition::asi("warlock_asi_12", 12),
    FeatureDefinition::asi("warlock_asi_16", 16),
    FeatureDefinition::asi("warlock_asi_19", 19),
    FeatureDefinition::auto(
        "warlock_eldritch_master",
        "Mestre Místico",
        20,
        "Recupere todos os espaços de pacto implorando ao patrono.",
    ),
];

// ============================================================================
// Wizard
// ============================================================================

static WIZARD: &[FeatureDefinition] = &[
    FeatureDefinition::auto(
        "wizard_spellcasting",
        "Conjuração",
        1,
        "Você prepara magias do seu grimório usando Inteligência.",
    ),
    FeatureDefinition::auto(
        "wizard_arcane_recovery",
        "Recuperação Arcana",
        1,
        "Uma vez por dia, recupere espaços de magia em um descanso curto.",
    ),
    FeatureDefinition::choice(
        "wizard_arcane_tradition",
        "Tradição Arcana",
        2,
        "Escolha sua escola de estudo.",
        &[
            ChoiceOption::new("evocation", "Escola de Evocação", "Energia elemental."),
            ChoiceOption::new("abjuration", "Escola de Abjuração", "Proteção e banimento."),
            ChoiceOption::new("divination", "Escola de Adivinhação", "Visões do futuro."),
        ],
    ),
    FeatureDefinition::auto(
        "wizard_sculpt_spells",
        "Esculpir Magias",
        2,
        "Proteja aliados das suas magias de evocação.",
    )
    .requires("wizard_arcane_tradition", "evocation"),
    FeatureDefinition::auto(
        "wizard_arcane_ward",
        "Proteção Arcana",
        2,
        "Crie uma proteção mágica que absorve dano.",
    )
    .requires("wizard_arcane_tradition", "abjuration"),
    FeatureDefinition::auto(
        "wizard_portent",
        "Prodígio",
        2,
        "Role dois d20 após o descanso longo e substitua jogadas por eles.",
    )
    .requires("wizard_arcane_tradition", "divination"),
    FeatureDefinition::asi("wizard_asi_4", 4),
    FeatureDefinition::asi("wizard_asi_8", 8),
    FeatureDefinition::asi("wizard_asi_12", 12),
    FeatureDefinition::asi("wizard_asi_16", 16),
    FeatureDefinition::auto(
        "wizard_spell_mastery",
        "Maestria em Magia",
        18,
        "Conjure uma magia de 1º e uma de 2º nível à vontade.",
    ),
    FeatureDefinition::asi("wizard_asi_19", 19),
    FeatureDefinition::auto(
        "wizard_signature_spells",
        "Magias Exclusivas",
        20,
        "Duas magias de 3º nível sempre preparadas.",
    ),
];
