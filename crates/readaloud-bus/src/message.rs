use std::fmt;
use std::sync::Arc;

/// Identity of the logical extension instance that published a message.
///
/// Unrelated publishers may share the transport; consumers compare this
/// against the identity they expect and silently drop mismatches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenderId(Arc<str>);

impl SenderId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of message kinds carried by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    ReadRequest,
    SelectedText,
    StartedSpeaking,
    GotStartedSpeaking,
    EndedSpeaking,
    GotEndSpeaking,
    FinishedSpeaking,
    GotFinishedSpeaking,
    RefreshTts,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::ReadRequest => "READ_REQUEST",
            MessageKind::SelectedText => "SELECTED_TEXT",
            MessageKind::StartedSpeaking => "STARTED_SPEAKING",
            MessageKind::GotStartedSpeaking => "GOT_STARTED_SPEAKING",
            MessageKind::EndedSpeaking => "ENDED_SPEAKING",
            MessageKind::GotEndSpeaking => "GOT_END_SPEAKING",
            MessageKind::FinishedSpeaking => "FINISHED_SPEAKING",
            MessageKind::GotFinishedSpeaking => "GOT_FINISHED_SPEAKING",
            MessageKind::RefreshTts => "REFRESH_TTS",
        };
        f.write_str(name)
    }
}

/// One message body per kind. Bodies are immutable once published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Observer -> controller: speak this selected text.
    ReadRequest { text: String },
    /// Controller -> observer: capture the current selection and forward it.
    SelectedText,
    /// Controller -> observer: the engine reported speech start.
    StartedSpeaking,
    /// Observer -> controller: acknowledges `StartedSpeaking`.
    GotStartedSpeaking,
    /// Controller -> observer: speech ended naturally.
    EndedSpeaking,
    /// Observer -> controller: acknowledges `EndedSpeaking`.
    GotEndSpeaking,
    /// Controller -> observer: speech was stopped, interrupted or errored.
    FinishedSpeaking,
    /// Observer -> controller: acknowledges `FinishedSpeaking`.
    GotFinishedSpeaking,
    /// Observer -> controller: keep-alive nudge for a long utterance.
    RefreshTts,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::ReadRequest { .. } => MessageKind::ReadRequest,
            Message::SelectedText => MessageKind::SelectedText,
            Message::StartedSpeaking => MessageKind::StartedSpeaking,
            Message::GotStartedSpeaking => MessageKind::GotStartedSpeaking,
            Message::EndedSpeaking => MessageKind::EndedSpeaking,
            Message::GotEndSpeaking => MessageKind::GotEndSpeaking,
            Message::FinishedSpeaking => MessageKind::FinishedSpeaking,
            Message::GotFinishedSpeaking => MessageKind::GotFinishedSpeaking,
            Message::RefreshTts => MessageKind::RefreshTts,
        }
    }
}

/// A message together with the identity that published it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub sender: SenderId,
    pub message: Message,
}

impl Envelope {
    pub fn kind(&self) -> MessageKind {
        self.message.kind()
    }

    /// Authentication check used by every consuming context.
    pub fn is_from(&self, expected: &SenderId) -> bool {
        self.sender == *expected
    }
}
