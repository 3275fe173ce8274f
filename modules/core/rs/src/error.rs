use derive_more::{Display, Error};

/// A fatal breach of a coordinate invariant (e.g. an interval with start > end).
/// There is no recovery path for these: the run is expected to abort once one
/// surfaces, so callers propagate it upward instead of handling it locally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("invariant violation: {message}")]
pub struct InvariantViolation {
    message: String,
}

impl InvariantViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
