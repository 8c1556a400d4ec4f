//! Remote operation status.

/// Lifecycle of one remote operation against a state slice.
///
/// A slice tracks one of these per operation kind (load, create, delete).
/// The failure message rides along in the status itself, so "failed" and
/// "why" cannot drift apart the way paired booleans let them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpStatus {
    /// Never attempted, or reset.
    #[default]
    Idle,
    /// Request in flight.
    Pending,
    /// Last attempt completed.
    Succeeded,
    /// Last attempt failed with this message.
    Failed(String),
}

impl OpStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, OpStatus::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OpStatus::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OpStatus::Failed(_))
    }

    /// The failure message, when there is one.
    pub fn failure(&self) -> Option<&str> {
        match self {
            OpStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert!(OpStatus::default().is_idle());
    }

    #[test]
    fn failure_message_is_only_exposed_when_failed() {
        assert_eq!(OpStatus::Pending.failure(), None);
        assert_eq!(
            OpStatus::Failed("timeout".to_string()).failure(),
            Some("timeout")
        );
    }
}
