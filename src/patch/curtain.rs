use std::f64::consts::FRAC_PI_2;

use rand::Rng;
use tracing::debug;

use crate::error::{ParameterError, Result};
use crate::math::{step_fraction, Point3};
use crate::point::ControlPointSequence;

use super::{ensure_finite, PatchDimensions};

/// A wave-distorted curtain patch.
///
/// At parameter step `i` with `t = i / order_u`:
///
/// `angle = pi/2 * t * spirals`, `x = width * t`, `z = wave * cos(angle)`
///
/// and the step's block is, in this order,
///
/// ```text
/// (x, height,       0)
/// (x, height / 4,   z + r2 * z)
/// (x, 3 height / 4, z + r1 * z)
/// (x, 0,            z)
/// ```
///
/// where `r1` and `r2` are drawn fresh per step as `U[0, 1) * wave - wave`.
/// That range is `[-wave, 0)`, not symmetric about zero, so the two middle
/// rows only ever pull toward the `x`-`y` plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CurtainPatch {
    dimensions: PatchDimensions,
    spirals: f64,
    wave: f64,
}

impl CurtainPatch {
    /// Creates a new curtain patch.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Overall extents (must be positive)
    /// * `order_u` - Number of parameter subdivisions (must be at least 1)
    /// * `spirals` - Quarter-turns swept by the wave angle across the patch
    /// * `wave` - Amplitude of the cosine offset and of the random perturbation
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`](crate::error::ParameterError) if `order_u`
    /// is zero, any real argument is not finite, or `wave` is so large that
    /// the perturbed offsets would overflow.
    pub fn new(width: f64, height: f64, order_u: usize, spirals: f64, wave: f64) -> Result<Self> {
        let dimensions = PatchDimensions::new(width, height, order_u)?;
        let spirals = ensure_finite("spirals", spirals)?;
        let wave = ensure_finite("wave", wave)?;
        // |z + r * z| <= |wave| + wave^2
        if !(wave.abs() + wave * wave).is_finite() {
            return Err(ParameterError::Overflow {
                parameter: "wave",
                value: wave,
            }
            .into());
        }
        Ok(Self {
            dimensions,
            spirals,
            wave,
        })
    }

    /// Returns the patch dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &PatchDimensions {
        &self.dimensions
    }

    /// Returns the spiral multiplier.
    #[must_use]
    pub fn spirals(&self) -> f64 {
        self.spirals
    }

    /// Returns the wave amplitude.
    #[must_use]
    pub fn wave(&self) -> f64 {
        self.wave
    }

    /// Deterministic `z` offset of the bottom row at step `i`.
    #[must_use]
    pub fn wave_offset(&self, i: usize) -> f64 {
        let angle = FRAC_PI_2 * step_fraction(i, self.dimensions.order_u) * self.spirals;
        self.wave * angle.cos()
    }

    /// Generates the control points, drawing two values per step from `rng`.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ControlPointSequence {
        let PatchDimensions {
            width,
            height,
            order_u,
        } = self.dimensions;
        debug!(
            width,
            height,
            order_u,
            spirals = self.spirals,
            wave = self.wave,
            "generating curtain patch"
        );

        let mut points = ControlPointSequence::with_steps(self.dimensions.step_count());
        for i in 0..=order_u {
            let r1 = self.perturbation(rng);
            let r2 = self.perturbation(rng);
            let x = width * step_fraction(i, order_u);
            let z = self.wave_offset(i);

            points.push_step([
                Point3::new(x, height, 0.0),
                Point3::new(x, height / 4.0, z + r2 * z),
                Point3::new(x, 3.0 * height / 4.0, z + r1 * z),
                Point3::new(x, 0.0, z),
            ]);
        }
        points
    }

    /// One draw from `[-wave, 0)`.
    fn perturbation<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random::<f64>() * self.wave - self.wave
    }
}

impl Default for CurtainPatch {
    fn default() -> Self {
        Self {
            dimensions: PatchDimensions {
                width: 30.0,
                height: 38.0,
                order_u: 4,
            },
            spirals: 5.0,
            wave: 0.4,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DraperyError;
    use crate::math::TOLERANCE;
    use crate::point::ControlPoint;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_4;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(0x00C0_FFEE)
    }

    #[test]
    fn length_is_four_per_step() {
        let mut rng = seeded();
        for order_u in 1..=12 {
            let curtain = CurtainPatch::new(10.0, 5.0, order_u, 3.0, 0.5).unwrap();
            let points = curtain.generate(&mut rng);
            assert_eq!(points.len(), 4 * (order_u + 1));
            assert_eq!(points.step_count(), order_u + 1);
        }
    }

    #[test]
    fn first_step_bottom_point_is_wave() {
        let wave = 0.4;
        let curtain = CurtainPatch::new(30.0, 38.0, 4, 5.0, wave).unwrap();
        let points = curtain.generate(&mut seeded());
        let block = points.step(0).unwrap();
        assert_eq!(block[3], ControlPoint::new(0.0, 0.0, wave));
    }

    #[test]
    fn rows_use_fixed_heights_and_shared_x() {
        let (width, height, order_u) = (30.0, 38.0, 4);
        let curtain = CurtainPatch::new(width, height, order_u, 5.0, 0.4).unwrap();
        let points = curtain.generate(&mut seeded());
        for (i, block) in points.steps().enumerate() {
            let x = width * step_fraction(i, order_u);
            for p in block {
                assert_abs_diff_eq!(p.x, x, epsilon = TOLERANCE);
            }
            assert_abs_diff_eq!(block[0].y, height);
            assert_abs_diff_eq!(block[1].y, height / 4.0);
            assert_abs_diff_eq!(block[2].y, 3.0 * height / 4.0);
            assert_abs_diff_eq!(block[3].y, 0.0);
            assert_abs_diff_eq!(block[0].z, 0.0);
        }
        assert_abs_diff_eq!(points.step(order_u).unwrap()[0].x, width, epsilon = TOLERANCE);
    }

    #[test]
    fn bottom_row_follows_cosine() {
        let curtain = CurtainPatch::new(8.0, 2.0, 4, 2.0, 0.5).unwrap();
        let points = curtain.generate(&mut seeded());
        // Two quarter-turns over the range: cos sweeps 1 -> 0 -> -1.
        let expected = [0.5, 0.5 * FRAC_PI_4.cos(), 0.0, -0.5 * FRAC_PI_4.cos(), -0.5];
        for (block, z) in points.steps().zip(expected) {
            assert_abs_diff_eq!(block[3].z, z, epsilon = 1e-12);
        }
    }

    // Draws come from [-wave, 0), not [-wave, wave]. The middle rows can only
    // shrink the cosine offset, and by at most wave * |z|.
    #[test]
    fn perturbation_is_one_sided() {
        let wave = 0.4;
        let curtain = CurtainPatch::new(30.0, 38.0, 16, 5.0, wave).unwrap();
        let mut rng = seeded();
        for _ in 0..50 {
            let points = curtain.generate(&mut rng);
            for block in points.steps() {
                let z = block[3].z;
                for p in &block[1..3] {
                    let delta = p.z - z;
                    assert!(delta.abs() <= wave * z.abs() + TOLERANCE);
                    // The offset never points away from zero.
                    assert!(delta * z <= 0.0);
                }
            }
        }
    }

    #[test]
    fn perturbation_draws_stay_in_half_open_range() {
        let wave = 0.75;
        let curtain = CurtainPatch::new(1.0, 1.0, 1, 1.0, wave).unwrap();
        let mut rng = seeded();
        for _ in 0..10_000 {
            let r = curtain.perturbation(&mut rng);
            assert!((-wave..=0.0).contains(&r));
        }
    }

    #[test]
    fn same_seed_same_points() {
        let curtain = CurtainPatch::default();
        let a = curtain.generate(&mut StdRng::seed_from_u64(42));
        let b = curtain.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_draws_differ() {
        let curtain = CurtainPatch::default();
        let mut rng = seeded();
        let a = curtain.generate(&mut rng);
        let b = curtain.generate(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn zero_wave_is_flat() {
        let curtain = CurtainPatch::new(3.0, 3.0, 3, 5.0, 0.0).unwrap();
        let points = curtain.generate(&mut seeded());
        assert!(points.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn zero_order_is_rejected() {
        let err = CurtainPatch::new(30.0, 38.0, 0, 5.0, 0.4).unwrap_err();
        assert!(matches!(
            err,
            DraperyError::Parameter(ParameterError::ZeroOrder)
        ));
    }

    #[test]
    fn non_finite_wave_and_spirals_are_rejected() {
        let err = CurtainPatch::new(30.0, 38.0, 4, 5.0, f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            DraperyError::Parameter(ParameterError::NonFinite {
                parameter: "wave",
                ..
            })
        ));
        let err = CurtainPatch::new(30.0, 38.0, 4, f64::INFINITY, 0.4).unwrap_err();
        assert!(matches!(
            err,
            DraperyError::Parameter(ParameterError::NonFinite {
                parameter: "spirals",
                ..
            })
        ));
    }

    #[test]
    fn huge_wave_is_rejected() {
        let err = CurtainPatch::new(1.0, 1.0, 1, 0.0, 1e200).unwrap_err();
        assert!(matches!(
            err,
            DraperyError::Parameter(ParameterError::Overflow {
                parameter: "wave",
                ..
            })
        ));
        assert!(CurtainPatch::new(1.0, 1.0, 1, 0.0, -1e200).is_err());
    }

    #[test]
    fn large_accepted_wave_stays_finite() {
        let curtain = CurtainPatch::new(1.0, 1.0, 8, 0.0, 1e150).unwrap();
        let mut rng = seeded();
        for _ in 0..20 {
            assert!(curtain.generate(&mut rng).iter().all(ControlPoint::is_finite));
        }
    }

    #[test]
    fn default_matches_preset() {
        let curtain = CurtainPatch::default();
        assert_eq!(
            curtain,
            CurtainPatch::new(30.0, 38.0, 4, 5.0, 0.4).unwrap()
        );
        assert!(curtain.generate(&mut seeded()).iter().all(ControlPoint::is_finite));
    }
}
