use super::core::HandlerError;

// ============================================================================
// Dispatch Errors
// ============================================================================

/// One handler that returned an error during a fan-out
#[derive(Debug)]
pub struct HandlerFailure {
    pub handler: String,
    /// Index of the handler in the registration order
    pub position: usize,
    pub error: HandlerError,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Raised after the whole fan-out ran; every handler was still invoked.
    #[error("{} of {invoked} handler(s) failed for {event_type}", .failures.len())]
    HandlersFailed {
        event_type: &'static str,
        invoked: usize,
        failures: Vec<HandlerFailure>,
    },
}

impl DispatchError {
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            DispatchError::HandlersFailed { failures, .. } => failures,
        }
    }
}
