use crate::narrative::ResultNarrative;
use crate::scoring::{Tally, TypeCode};

/// The current phase of a quiz session.
///
/// Exactly one variant is active at a time, and each variant carries only
/// the data valid in that phase: a type code cannot exist while testing is
/// still in progress, and a narrative cannot exist without its type code.
/// The immutable question batch lives on the session itself, since it
/// outlives the Testing phase (a retry from Result reuses it).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// Fetching the question batch from the generative service.
    Loading,
    /// Questions are ready; waiting for the user to start.
    Welcome,
    /// Presenting questions one at a time and accumulating the tally.
    Testing {
        /// Index of the question currently shown.
        current: usize,
        /// Per-dimension answer counts so far.
        tally: Tally,
    },
    /// Fetching the narrative for the derived type code.
    Analyzing { type_code: TypeCode },
    /// Terminal until retry: the narrative is ready for display.
    Result {
        type_code: TypeCode,
        narrative: ResultNarrative,
    },
    /// Terminal until retry: an external call failed.
    Error { message: String },
}

impl SessionPhase {
    /// Short phase name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Welcome => "welcome",
            SessionPhase::Testing { .. } => "testing",
            SessionPhase::Analyzing { .. } => "analyzing",
            SessionPhase::Result { .. } => "result",
            SessionPhase::Error { .. } => "error",
        }
    }
}
