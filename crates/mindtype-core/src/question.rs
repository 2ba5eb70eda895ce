//! Quiz question domain model.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// One of the two answer options of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Display text of the option.
    pub text: String,
    /// The dimension an answer for this option counts toward.
    pub dimension: Dimension,
}

/// An immutable quiz question with exactly two options.
///
/// The fixed-size option pair makes an invalid option count
/// unrepresentable once a question has passed gateway validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text shown to the user.
    pub prompt: String,
    /// The two options, one per side of a single axis.
    pub options: [QuestionOption; 2],
}

impl Question {
    /// The option selected by the given choice.
    pub fn option(&self, choice: Choice) -> &QuestionOption {
        match choice {
            Choice::First => &self.options[0],
            Choice::Second => &self.options[1],
        }
    }
}

/// Which of a question's two options the user picked.
///
/// A two-variant enum rather than an index, so an out-of-range selection
/// cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    First,
    Second,
}
