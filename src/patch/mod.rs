mod chair;
mod curtain;

pub use chair::ChairPatch;
pub use curtain::CurtainPatch;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{ParameterError, ParseKindError, Result};
use crate::point::ControlPointSequence;

/// Overall extents and subdivision count shared by every patch shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchDimensions {
    width: f64,
    height: f64,
    order_u: usize,
}

impl PatchDimensions {
    /// Creates validated patch dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::ZeroOrder`] if `order_u` is zero, and
    /// [`ParameterError::NonFinite`] / [`ParameterError::NonPositive`] if
    /// `width` or `height` is not a finite positive number.
    /// [`ParameterError::Overflow`] if the row heights derived from `height`
    /// would not be finite.
    pub fn new(width: f64, height: f64, order_u: usize) -> Result<Self> {
        if order_u == 0 {
            return Err(ParameterError::ZeroOrder.into());
        }
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        // Row heights scale `height` by up to 3 before dividing.
        if !(3.0 * height).is_finite() {
            return Err(ParameterError::Overflow {
                parameter: "height",
                value: height,
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            order_u,
        })
    }

    /// Width of the patch along the parameter direction.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of the patch cross-section.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of parameter subdivisions.
    #[must_use]
    pub fn order_u(&self) -> usize {
        self.order_u
    }

    /// Number of parameter steps, `order_u + 1`.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.order_u + 1
    }
}

pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ParameterError::NonFinite { parameter, value }.into());
    }
    Ok(value)
}

fn ensure_positive(parameter: &'static str, value: f64) -> Result<f64> {
    ensure_finite(parameter, value)?;
    if value <= 0.0 {
        return Err(ParameterError::NonPositive { parameter, value }.into());
    }
    Ok(value)
}

/// Which generator the entry point runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatchKind {
    #[default]
    Curtain,
    Chair,
}

impl FromStr for PatchKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "curtain" | "curtains" => Ok(Self::Curtain),
            "chair" => Ok(Self::Chair),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

impl fmt::Display for PatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curtain => f.write_str("curtain"),
            Self::Chair => f.write_str("chair"),
        }
    }
}

/// A configured patch generator of either shape.
#[derive(Debug, Clone)]
pub enum Patch {
    Curtain(CurtainPatch),
    Chair(ChairPatch),
}

impl Patch {
    /// The preset configuration for `kind`.
    #[must_use]
    pub fn preset(kind: PatchKind) -> Self {
        match kind {
            PatchKind::Curtain => Self::Curtain(CurtainPatch::default()),
            PatchKind::Chair => Self::Chair(ChairPatch::default()),
        }
    }

    /// Which shape this patch generates.
    #[must_use]
    pub fn kind(&self) -> PatchKind {
        match self {
            Self::Curtain(_) => PatchKind::Curtain,
            Self::Chair(_) => PatchKind::Chair,
        }
    }

    /// Generates the control points. Only the curtain draws from `rng`.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ControlPointSequence {
        match self {
            Self::Curtain(curtain) => curtain.generate(rng),
            Self::Chair(chair) => chair.generate(),
        }
    }
}
