use serde::{Deserialize, Serialize};

/// Severity of a status message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Info,
    Success,
    Error,
    Warning,
}

/// The last lifecycle transition, rendered verbatim by the UI sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub message: String,
    pub kind: StatusKind,
}

impl SessionStatus {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::info("Ready to identify Indian currency notes. Press Start to begin.")
    }
}

/// Lifecycle phase of a detection session.
///
/// Exactly one phase describes the session at any instant. `Error` is
/// transient: it surfaces a failure status and immediately collapses back
/// to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Starting,
    Active,
    Stopping,
    Error,
}

impl SessionPhase {
    /// Validate a phase transition.
    pub fn can_transition(self, next: SessionPhase) -> bool {
        matches!(
            (self, next),
            (SessionPhase::Idle, SessionPhase::Starting)
                | (SessionPhase::Starting, SessionPhase::Active)
                | (SessionPhase::Starting, SessionPhase::Error)
                | (SessionPhase::Starting, SessionPhase::Stopping)
                | (SessionPhase::Active, SessionPhase::Error)
                | (SessionPhase::Active, SessionPhase::Stopping)
                | (SessionPhase::Error, SessionPhase::Idle)
                | (SessionPhase::Error, SessionPhase::Stopping)
                | (SessionPhase::Stopping, SessionPhase::Idle)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_lifecycle_path() {
        assert!(SessionPhase::Idle.can_transition(SessionPhase::Starting));
        assert!(SessionPhase::Starting.can_transition(SessionPhase::Active));
        assert!(SessionPhase::Active.can_transition(SessionPhase::Stopping));
        assert!(SessionPhase::Stopping.can_transition(SessionPhase::Idle));
    }

    #[test]
    fn failure_paths_collapse_to_idle() {
        assert!(SessionPhase::Starting.can_transition(SessionPhase::Error));
        assert!(SessionPhase::Active.can_transition(SessionPhase::Error));
        assert!(SessionPhase::Error.can_transition(SessionPhase::Idle));
    }

    #[test]
    fn duplicate_start_is_invalid() {
        assert!(!SessionPhase::Starting.can_transition(SessionPhase::Starting));
        assert!(!SessionPhase::Active.can_transition(SessionPhase::Starting));
    }

    #[test]
    fn idle_cannot_stop_or_error() {
        assert!(!SessionPhase::Idle.can_transition(SessionPhase::Stopping));
        assert!(!SessionPhase::Idle.can_transition(SessionPhase::Error));
    }
}
