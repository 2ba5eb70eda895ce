//! Parsing and shape-checking of the JSON payloads the service returns.
//!
//! The generative service replies with candidate text that should match the
//! declared response schema; these functions turn that text into validated
//! domain values, discarding the whole payload on any violation.

use serde::Deserialize;

use mindtype_core::error::{MindTypeError, Result};
use mindtype_core::gateway::{validate_narrative, validate_question_batch};
use mindtype_core::narrative::ResultNarrative;
use mindtype_core::question::{Question, QuestionOption};

#[derive(Deserialize)]
struct QuestionPayload {
    question: String,
    options: Vec<OptionPayload>,
}

#[derive(Deserialize)]
struct OptionPayload {
    text: String,
    #[serde(rename = "type")]
    tag: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NarrativePayload {
    title: String,
    description: String,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    recommendations: Vec<String>,
    reading_strategy: Vec<String>,
    math_strategy: Vec<String>,
    science_strategy: Vec<String>,
}

/// Parses a question-batch payload into validated domain questions.
pub fn parse_question_batch(text: &str) -> Result<Vec<Question>> {
    let payloads: Vec<QuestionPayload> = serde_json::from_str(text.trim())?;

    let mut questions = Vec::with_capacity(payloads.len());
    for (index, payload) in payloads.into_iter().enumerate() {
        questions.push(to_question(index + 1, payload)?);
    }

    validate_question_batch(&questions)?;
    Ok(questions)
}

/// Parses a narrative payload into a validated [`ResultNarrative`].
pub fn parse_narrative(text: &str) -> Result<ResultNarrative> {
    let payload: NarrativePayload = serde_json::from_str(text.trim())?;

    let narrative = ResultNarrative {
        title: payload.title,
        description: payload.description,
        strengths: payload.strengths,
        weaknesses: payload.weaknesses,
        recommendations: payload.recommendations,
        reading_strategies: payload.reading_strategy,
        math_strategies: payload.math_strategy,
        science_strategies: payload.science_strategy,
    };

    validate_narrative(&narrative)?;
    Ok(narrative)
}

fn to_question(number: usize, payload: QuestionPayload) -> Result<Question> {
    let options: [OptionPayload; 2] = payload.options.try_into().map_err(
        |options: Vec<OptionPayload>| {
            MindTypeError::schema(format!(
                "question {number} must have exactly 2 options, got {}",
                options.len()
            ))
        },
    )?;

    let [first, second] = options;
    Ok(Question {
        prompt: payload.question,
        options: [to_option(first)?, to_option(second)?],
    })
}

fn to_option(payload: OptionPayload) -> Result<QuestionOption> {
    Ok(QuestionOption {
        dimension: payload.tag.parse()?,
        text: payload.text,
    })
}
