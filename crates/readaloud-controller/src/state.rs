/// State of the singleton speech session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session; the engine is quiet.
    #[default]
    Idle,
    /// An utterance is being voiced and more phrases are queued behind it.
    Speaking,
    /// The final phrase is being voiced; its end event ends the session.
    Draining,
}

impl SessionState {
    /// Whether a session currently owns the engine.
    pub fn is_active(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "IDLE"),
            SessionState::Speaking => write!(f, "SPEAKING"),
            SessionState::Draining => write!(f, "DRAINING"),
        }
    }
}
