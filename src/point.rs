use std::slice::{ChunksExact, Iter};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceError};
use crate::math::Point3;

/// Number of control points emitted per parameter step, one per depth level
/// of the cross-section.
pub const POINTS_PER_STEP: usize = 4;

/// A single control point, serialized as `{"x": .., "y": .., "z": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ControlPoint {
    /// Creates a new control point.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Point3> for ControlPoint {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<ControlPoint> for Point3 {
    fn from(p: ControlPoint) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

/// Ordered control points of one patch.
///
/// Points are grouped in consecutive blocks of [`POINTS_PER_STEP`], one block
/// per parameter step `i = 0..=order_u`. Within a block, slot order is the
/// fixed depth order chosen by the generator that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ControlPoint>", into = "Vec<ControlPoint>")]
pub struct ControlPointSequence {
    points: Vec<ControlPoint>,
}

impl ControlPointSequence {
    /// Creates an empty sequence with room for `steps` blocks.
    pub(crate) fn with_steps(steps: usize) -> Self {
        Self {
            points: Vec::with_capacity(steps * POINTS_PER_STEP),
        }
    }

    /// Appends the block of one parameter step.
    pub(crate) fn push_step(&mut self, block: [Point3; POINTS_PER_STEP]) {
        self.points.extend(block.map(ControlPoint::from));
    }

    /// Builds a sequence from raw points.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Misaligned`] if the point count is not a
    /// multiple of [`POINTS_PER_STEP`].
    pub fn from_points(points: Vec<ControlPoint>) -> Result<Self> {
        Ok(Self::try_from(points)?)
    }

    /// Total number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the sequence has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of parameter steps (blocks).
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.points.len() / POINTS_PER_STEP
    }

    /// Iterates over the per-step blocks in step order.
    pub fn steps(&self) -> ChunksExact<'_, ControlPoint> {
        self.points.chunks_exact(POINTS_PER_STEP)
    }

    /// Returns the block of parameter step `i`, if present.
    #[must_use]
    pub fn step(&self, i: usize) -> Option<&[ControlPoint]> {
        let start = i.checked_mul(POINTS_PER_STEP)?;
        let end = start.checked_add(POINTS_PER_STEP)?;
        self.points.get(start..end)
    }

    /// Iterates over all points in order.
    pub fn iter(&self) -> Iter<'_, ControlPoint> {
        self.points.iter()
    }

    /// Returns the points as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Consumes the sequence, returning the underlying points.
    #[must_use]
    pub fn into_vec(self) -> Vec<ControlPoint> {
        self.points
    }
}

impl TryFrom<Vec<ControlPoint>> for ControlPointSequence {
    type Error = SequenceError;

    fn try_from(points: Vec<ControlPoint>) -> std::result::Result<Self, Self::Error> {
        if points.len() % POINTS_PER_STEP != 0 {
            return Err(SequenceError::Misaligned {
                len: points.len(),
                block: POINTS_PER_STEP,
            });
        }
        Ok(Self { points })
    }
}

impl From<ControlPointSequence> for Vec<ControlPoint> {
    fn from(seq: ControlPointSequence) -> Self {
        seq.points
    }
}

impl<'a> IntoIterator for &'a ControlPointSequence {
    type Item = &'a ControlPoint;
    type IntoIter = Iter<'a, ControlPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
