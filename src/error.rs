use thiserror::Error;

/// Top-level error type for the drapery control point generators.
#[derive(Debug, Error)]
pub enum DraperyError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Invalid generator arguments. Raised before any point is produced.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("invalid argument: order_u must be at least 1")]
    ZeroOrder,

    #[error("invalid argument: {parameter} = {value} is not finite")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("invalid argument: {parameter} = {value} must be positive")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("invalid argument: {parameter} = {value} is too large for finite control points")]
    Overflow { parameter: &'static str, value: f64 },
}

/// Errors related to the shape of a control point sequence.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("sequence length {len} is not a multiple of {block}")]
    Misaligned { len: usize, block: usize },
}

/// Errors raised while persisting or reading back control points.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed point records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("point records are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Unknown generator name.
#[derive(Debug, Error)]
#[error("unknown patch kind `{0}` (expected `curtain` or `chair`)")]
pub struct ParseKindError(pub String);

/// Convenience type alias for results using [`DraperyError`].
pub type Result<T> = std::result::Result<T, DraperyError>;
