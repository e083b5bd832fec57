//! Hit dice.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Die sizes used for hit dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DieType {
    D6,
    D8,
    D10,
    D12,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
        }
    }

    /// Roll a single die of this type.
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(1..=self.sides())
    }

    /// Average result rounded up, as used for fixed hit point gains.
    pub fn average_rounded_up(&self) -> u32 {
        self.sides() / 2 + 1
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_average_rounded_up() {
        assert_eq!(DieType::D6.average_rounded_up(), 4);
        assert_eq!(DieType::D10.average_rounded_up(), 6);
        assert_eq!(DieType::D12.to_string(), "d12");
    }

    #[test]
    fn test_roll_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let roll = DieType::D12.roll_with_rng(&mut rng);
            assert!((1..=12).contains(&roll));
        }
    }
}
