//! Sentinel-marker translation state machine
//!
//! The upstream brackets the answer with `[ANSWER_START]` / `[ANSWER_DONE]`
//! and may append a suggested-questions block framed by `[RELATE_Q_START]`
//! / `[RELATE_Q_DONE]`. Everything else on a `data: ` line is answer text.
//! This type is pure: it sees one line at a time and performs no I/O.

/// Opens the answer
pub const ANSWER_START: &str = "[ANSWER_START]";
/// Closes the answer; nothing after it is read
pub const ANSWER_DONE: &str = "[ANSWER_DONE]";
/// Prefix of the related-questions opener
pub const RELATE_Q_START: &str = "[RELATE_Q_START]";
/// Prefix of the related-questions closer
pub const RELATE_Q_DONE: &str = "[RELATE_Q_DONE]";

/// Only lines with this prefix carry a payload
pub const DATA_PREFIX: &str = "data: ";

/// Where the translator is within one upstream answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranslationState {
    /// Waiting for `[ANSWER_START]`
    #[default]
    Idle,
    /// Inside the answer
    Answering,
    /// `[ANSWER_DONE]` seen, terminal
    Done,
}

/// Output of one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEvent {
    /// The assistant turn begins
    RoleOpen,
    /// A fragment of answer text
    Content(String),
    /// The answer finished normally
    Finish,
}

/// Line-by-line translator for one upstream answer
#[derive(Debug, Default)]
pub struct AnswerTranslator {
    state: TranslationState,
}

impl AnswerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TranslationState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == TranslationState::Done
    }

    /// Feed one complete line (without its newline).
    ///
    /// Lines that are not `data: ` lines never change state.
    pub fn feed_line(&mut self, line: &str) -> Option<AnswerEvent> {
        let payload = line.strip_prefix(DATA_PREFIX)?;
        self.feed_payload(payload.trim())
    }

    /// Apply the transition table to an already trimmed payload
    pub fn feed_payload(&mut self, payload: &str) -> Option<AnswerEvent> {
        use TranslationState::*;

        match (self.state, payload) {
            (Done, _) => None,
            (_, ANSWER_DONE) => {
                self.state = Done;
                Some(AnswerEvent::Finish)
            }
            (Idle, ANSWER_START) => {
                self.state = Answering;
                Some(AnswerEvent::RoleOpen)
            }
            (Idle, _) => None,
            (Answering, ANSWER_START) => None,
            (Answering, p) if is_ignored_payload(p) => None,
            (Answering, p) => Some(AnswerEvent::Content(p.to_string())),
        }
    }

    /// Translate a finite sequence of lines, stopping after the finish event
    pub fn translate<'a, I>(lines: I) -> impl Iterator<Item = AnswerEvent> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        let mut lines = lines.into_iter();
        let mut translator = Self::new();
        std::iter::from_fn(move || {
            while !translator.is_done() {
                if let Some(event) = translator.feed_line(lines.next()?) {
                    return Some(event);
                }
            }
            None
        })
    }
}

fn is_ignored_payload(payload: &str) -> bool {
    payload.is_empty() || payload.starts_with(RELATE_Q_START) || payload.starts_with(RELATE_Q_DONE)
}
