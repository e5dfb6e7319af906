pub mod error;
pub mod math;
pub mod patch;
pub mod point;
pub mod sink;

pub use error::{DraperyError, Result};
pub use patch::{ChairPatch, CurtainPatch, Patch, PatchDimensions, PatchKind};
pub use point::{ControlPoint, ControlPointSequence, POINTS_PER_STEP};
pub use sink::{JsonFileSink, PointSink};
