//! Feats available through Ability Score Improvement slots.

use serde::{Deserialize, Serialize};

/// A feat from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feat {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Feat {
    fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

lazy_static::lazy_static! {
    /// Feats in display order.
    pub static ref FEATS: Vec<Feat> = vec![
        Feat::new("alert", "Alerta", "+5 na iniciativa e você não pode ser surpreendido."),
        Feat::new("athlete", "Atleta", "+1 em Força ou Destreza; escalar e levantar-se custam menos."),
        Feat::new("great_weapon_master", "Mestre em Armas Grandes", "Troque -5 no ataque por +10 no dano com armas pesadas."),
        Feat::new("lucky", "Sortudo", "Três pontos de sorte por descanso longo para rolar um d20 adicional."),
        Feat::new("mobile", "Móvel", "+3 metros de deslocamento e sem ataques de oportunidade de quem você atacou."),
        Feat::new("observant", "Observador", "+1 em Inteligência ou Sabedoria e +5 em Percepção e Investigação passivas."),
        Feat::new("polearm_master", "Mestre em Armas de Haste", "Ataque bônus com o cabo e ataques de oportunidade ao entrar no alcance."),
        Feat::new("resilient", "Resiliente", "+1 em uma habilidade e proficiência nas resistências dela."),
        Feat::new("sentinel", "Sentinela", "Ataques de oportunidade reduzem o deslocamento do alvo a 0."),
        Feat::new("sharpshooter", "Atirador de Elite", "Ignore cobertura e troque -5 no ataque por +10 no dano à distância."),
        Feat::new("tough", "Robusto", "Seu máximo de pontos de vida aumenta em 2 por nível."),
        Feat::new("war_caster", "Conjurador de Guerra", "Vantagem para manter concentração e magias como ataques de oportunidade."),
    ];
}

/// Look up a feat by id.
pub fn feat_by_id(id: &str) -> Option<&'static Feat> {
    FEATS.iter().find(|f| f.id == id)
}

pub fn all_feats() -> &'static [Feat] {
    &FEATS
}
