//! Group interaction matrix

use crate::constants::MAX_GROUP;
use crate::error::PhysicsError;
use rand::Rng;

/// Signed interaction coefficients, indexed `[influenced][influencer]`.
///
/// Positive cells attract, everything else repels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupMatrix {
    cells: [[f64; MAX_GROUP]; MAX_GROUP],
}

impl GroupMatrix {
    pub fn new() -> Self {
        Self {
            cells: [[0.0; MAX_GROUP]; MAX_GROUP],
        }
    }

    /// Coefficient for `influenced` reacting to `influencer`.
    ///
    /// Particle groups are always in range, so this indexes directly.
    pub fn coefficient(&self, influenced: usize, influencer: usize) -> f64 {
        self.cells[influenced][influencer]
    }

    pub fn try_coefficient(
        &self,
        influenced: usize,
        influencer: usize,
    ) -> Result<f64, PhysicsError> {
        check_group(influenced)?;
        check_group(influencer)?;
        Ok(self.cells[influenced][influencer])
    }

    pub fn set_coefficient(
        &mut self,
        influenced: usize,
        influencer: usize,
        value: f64,
    ) -> Result<(), PhysicsError> {
        check_group(influenced)?;
        check_group(influencer)?;
        self.cells[influenced][influencer] = value;
        Ok(())
    }

    /// Fill every cell with an integer drawn from `[-1, 1)`, i.e. -1 or 0
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.random_range(-1i32..1) as f64;
            }
        }
    }

    pub fn rows(&self) -> &[[f64; MAX_GROUP]; MAX_GROUP] {
        &self.cells
    }
}

impl Default for GroupMatrix {
    fn default() -> Self {
        Self::new()
    }
}

fn check_group(group: usize) -> Result<(), PhysicsError> {
    if group < MAX_GROUP {
        Ok(())
    } else {
        Err(PhysicsError::GroupOutOfRange {
            group,
            max: MAX_GROUP,
        })
    }
}
