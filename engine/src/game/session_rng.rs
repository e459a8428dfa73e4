use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{FieldSize, Point};

/// Seeded RNG for one game session. Runs are reproducible from the
/// seed alone.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniform cell strictly inside the field border.
    pub fn interior_cell(&mut self, field: &FieldSize) -> Point {
        let x = self.random_range(1..field.width - 1);
        let y = self.random_range(1..field.height - 1);
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let field = FieldSize {
            width: 20,
            height: 20,
        };
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..50 {
            assert_eq!(a.interior_cell(&field), b.interior_cell(&field));
        }
    }

    #[test]
    fn test_interior_cell_avoids_border() {
        let field = FieldSize {
            width: 3,
            height: 3,
        };
        let mut rng = SessionRng::new(1);
        for _ in 0..20 {
            // A 3x3 field has exactly one interior cell.
            assert_eq!(rng.interior_cell(&field), Point::new(1, 1));
        }
    }
}
