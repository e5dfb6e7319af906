use std::f64::consts::PI;

use tracing::debug;

use crate::error::Result;
use crate::math::{step_fraction, Point3};
use crate::point::ControlPointSequence;

use super::PatchDimensions;

/// Attenuation of the lateral offset for the three lower rows.
const ROW_SCALES: [f64; 3] = [0.1, 0.2, 0.3];

/// A chair patch swept along a negative half-turn.
///
/// At parameter step `i` with `t = i / order_u`, `angle = -pi * t`,
/// `x = width * t` and `z = width * sin(angle)`. Each block is
/// `(x, height, 0)`, `(x, 2h/3, 0.1 z)`, `(x, h/3, 0.2 z)`, `(x, 0, 0.3 z)`.
///
/// Fully deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ChairPatch {
    dimensions: PatchDimensions,
}

impl ChairPatch {
    /// Creates a new chair patch.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`](crate::error::ParameterError) if `order_u`
    /// is zero or `width`/`height` is not a finite positive number.
    pub fn new(width: f64, height: f64, order_u: usize) -> Result<Self> {
        Ok(Self {
            dimensions: PatchDimensions::new(width, height, order_u)?,
        })
    }

    /// Returns the patch dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &PatchDimensions {
        &self.dimensions
    }

    /// Unscaled lateral offset at step `i`.
    #[must_use]
    pub fn lateral_offset(&self, i: usize) -> f64 {
        let angle = -PI * step_fraction(i, self.dimensions.order_u);
        self.dimensions.width * angle.sin()
    }

    /// Generates the control points.
    #[must_use]
    pub fn generate(&self) -> ControlPointSequence {
        let PatchDimensions {
            width,
            height,
            order_u,
        } = self.dimensions;
        debug!(width, height, order_u, "generating chair patch");

        let mut points = ControlPointSequence::with_steps(self.dimensions.step_count());
        for i in 0..=order_u {
            let x = width * step_fraction(i, order_u);
            let z = self.lateral_offset(i);

            points.push_step([
                Point3::new(x, height, 0.0),
                Point3::new(x, 2.0 * height / 3.0, z * ROW_SCALES[0]),
                Point3::new(x, height / 3.0, z * ROW_SCALES[1]),
                Point3::new(x, 0.0, z * ROW_SCALES[2]),
            ]);
        }
        points
    }
}

impl Default for ChairPatch {
    fn default() -> Self {
        Self {
            dimensions: PatchDimensions {
                width: 4.9,
                height: 2.5,
                order_u: 5,
            },
        }
    }
}
