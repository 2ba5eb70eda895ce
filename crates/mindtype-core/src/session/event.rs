use crate::question::Choice;

/// User-originated events consumed by the session.
///
/// These are the only three events the terminal surface produces; the two
/// gateway completions are applied by the session's entry actions instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Begin the test from the welcome screen.
    Start,
    /// Answer the current question with one of its two options.
    Answer(Choice),
    /// Restart: from a result, back to the welcome screen with the same
    /// question batch; from an error, re-run question generation.
    Retry,
}
