use std::fmt;

// Failures reported by the external services behind the ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    // The focus handle was revoked before the call.
    HandleExpired,
    Unavailable(String),
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::HandleExpired => f.write_str("focus handle expired"),
            PortError::Unavailable(reason) => write!(f, "service unavailable: {reason}"),
        }
    }
}

impl std::error::Error for PortError {}

// Coordinator-level failures. None of these leave the coordinator; they are
// logged and turned into the appropriate (or no) game event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    // A direction was evaluated while no direction was awaited.
    InternalConsistency,
    HandleExpired,
    SpeechFailure(String),
    DuplicateSubscription,
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatorError::InternalConsistency => {
                f.write_str("direction observed with no expected direction")
            }
            CoordinatorError::HandleExpired => f.write_str("focus handle expired"),
            CoordinatorError::SpeechFailure(reason) => write!(f, "speech failed: {reason}"),
            CoordinatorError::DuplicateSubscription => f.write_str("subscription already active"),
        }
    }
}

impl std::error::Error for CoordinatorError {}
