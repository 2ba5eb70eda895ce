//! Capability traits over the external generative service.
//!
//! The session state machine depends only on these seams, so tests can
//! substitute deterministic fakes for the hosted service.

use crate::error::{MindTypeError, Result};
use crate::narrative::ResultNarrative;
use crate::question::Question;
use crate::scoring::TypeCode;

/// Minimum number of entries required in each narrative list field.
pub const MIN_NARRATIVE_LIST_ENTRIES: usize = 2;

/// Source of generated quiz questions.
#[async_trait::async_trait]
pub trait QuestionSource: Send + Sync {
    /// Generates one full question batch.
    ///
    /// A successful return is a validated, non-empty batch; any transport,
    /// parse, or schema failure discards the whole batch.
    async fn generate_questions(&self) -> Result<Vec<Question>>;
}

/// Source of narrative result descriptions.
#[async_trait::async_trait]
pub trait NarrativeSource: Send + Sync {
    /// Generates the structured narrative for a derived type code.
    async fn generate_narrative(&self, type_code: &TypeCode) -> Result<ResultNarrative>;
}

/// Shape-checks a parsed question batch against the declared contract.
///
/// Rejects an empty batch, blank prompt or option text, and options that do
/// not cover both sides of a single axis.
pub fn validate_question_batch(questions: &[Question]) -> Result<()> {
    if questions.is_empty() {
        return Err(MindTypeError::schema("question batch is empty"));
    }

    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;
        if question.prompt.trim().is_empty() {
            return Err(MindTypeError::schema(format!(
                "question {number} has an empty prompt"
            )));
        }
        for option in &question.options {
            if option.text.trim().is_empty() {
                return Err(MindTypeError::schema(format!(
                    "question {number} has an option with empty text"
                )));
            }
        }

        let [first, second] = &question.options;
        if first.dimension.axis() != second.dimension.axis()
            || first.dimension == second.dimension
        {
            return Err(MindTypeError::schema(format!(
                "question {number} options must cover both sides of one axis, got {} and {}",
                first.dimension, second.dimension
            )));
        }
    }

    Ok(())
}

/// Shape-checks a parsed narrative against the declared contract.
pub fn validate_narrative(narrative: &ResultNarrative) -> Result<()> {
    if narrative.title.trim().is_empty() {
        return Err(MindTypeError::schema("narrative title is empty"));
    }
    if narrative.description.trim().is_empty() {
        return Err(MindTypeError::schema("narrative description is empty"));
    }

    let lists = [
        ("strengths", &narrative.strengths),
        ("weaknesses", &narrative.weaknesses),
        ("recommendations", &narrative.recommendations),
        ("reading strategies", &narrative.reading_strategies),
        ("math strategies", &narrative.math_strategies),
        ("science strategies", &narrative.science_strategies),
    ];
    for (name, list) in lists {
        if list.len() < MIN_NARRATIVE_LIST_ENTRIES {
            return Err(MindTypeError::schema(format!(
                "narrative {name} needs at least {MIN_NARRATIVE_LIST_ENTRIES} entries, got {}",
                list.len()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::question::QuestionOption;

    fn question(prompt: &str, first: Dimension, second: Dimension) -> Question {
        Question {
            prompt: prompt.to_string(),
            options: [
                QuestionOption {
                    text: "option one".to_string(),
                    dimension: first,
                },
                QuestionOption {
                    text: "option two".to_string(),
                    dimension: second,
                },
            ],
        }
    }

    fn narrative() -> ResultNarrative {
        ResultNarrative {
            title: "The Curious Explorer".to_string(),
            description: "Learns best by trying things out.".to_string(),
            strengths: vec!["observant".into(), "hands-on".into()],
            weaknesses: vec!["restless".into(), "skips review".into()],
            recommendations: vec!["short sessions".into(), "practice problems".into()],
            reading_strategies: vec!["read aloud".into(), "summarize chapters".into()],
            math_strategies: vec!["use manipulatives".into(), "draw diagrams".into()],
            science_strategies: vec!["run experiments".into(), "keep a log".into()],
        }
    }

    #[test]
    fn test_valid_batch_passes() {
        let batch = vec![
            question("One?", Dimension::E, Dimension::I),
            question("Two?", Dimension::N, Dimension::S),
        ];
        assert!(validate_question_batch(&batch).is_ok());
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let err = validate_question_batch(&[]).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_blank_prompt_is_rejected() {
        let batch = vec![question("   ", Dimension::E, Dimension::I)];
        assert!(validate_question_batch(&batch).is_err());
    }

    #[test]
    fn test_mismatched_axis_is_rejected() {
        let batch = vec![question("One?", Dimension::E, Dimension::T)];
        assert!(validate_question_batch(&batch).is_err());
    }

    #[test]
    fn test_duplicate_dimension_is_rejected() {
        let batch = vec![question("One?", Dimension::J, Dimension::J)];
        assert!(validate_question_batch(&batch).is_err());
    }

    #[test]
    fn test_valid_narrative_passes() {
        assert!(validate_narrative(&narrative()).is_ok());
    }

    #[test]
    fn test_short_list_is_rejected() {
        let mut bad = narrative();
        bad.math_strategies = vec!["only one".into()];
        let err = validate_narrative(&bad).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let mut bad = narrative();
        bad.title = "  ".into();
        assert!(validate_narrative(&bad).is_err());
    }
}
