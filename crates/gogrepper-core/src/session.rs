//! Per-process session state

/// Whether the one-shot self-install has been tried in this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallAttemptState {
    #[default]
    NotAttempted,
    Attempted,
}

impl InstallAttemptState {
    /// Move to `Attempted` and report whether this call did the transition.
    pub fn begin(&mut self) -> bool {
        match self {
            InstallAttemptState::NotAttempted => {
                *self = InstallAttemptState::Attempted;
                true
            }
            InstallAttemptState::Attempted => false,
        }
    }

    pub fn is_attempted(&self) -> bool {
        *self == InstallAttemptState::Attempted
    }
}

/// State shared by every action of one running instance.
///
/// Created at startup and never reset.
#[derive(Debug, Default)]
pub struct Session {
    /// Initial value of the next pattern prompt
    pub last_pattern: String,
    pub install: InstallAttemptState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember_pattern(&mut self, pattern: &str) {
        if !pattern.is_empty() {
            self.last_pattern = pattern.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_state_transitions_once() {
        let mut state = InstallAttemptState::default();
        assert!(!state.is_attempted());
        assert!(state.begin());
        assert!(state.is_attempted());
        assert!(!state.begin());
        assert!(!state.begin());
        assert!(state.is_attempted());
    }

    #[test]
    fn test_remember_pattern_ignores_empty_input() {
        let mut session = Session::new();
        session.remember_pattern("a -> b");
        session.remember_pattern("");
        assert_eq!(session.last_pattern, "a -> b");
    }
}
