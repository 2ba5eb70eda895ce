//! Prompt templates and declared response schemas for the two gateway
//! operations.
//!
//! The schemas use the Gemini structured-output dialect (an OpenAPI subset
//! with uppercase type names) and are sent as `generationConfig.responseSchema`
//! alongside the prompt.

use mindtype_core::gateway::MIN_NARRATIVE_LIST_ENTRIES;
use mindtype_core::scoring::TypeCode;
use serde_json::{Value, json};

/// Number of questions requested per batch.
pub const QUESTION_COUNT: usize = 12;

/// Questions requested per opposed pair.
pub const QUESTIONS_PER_AXIS: usize = 3;

/// Instruction for the question-generation operation.
pub fn question_prompt() -> String {
    format!(
        "Create {QUESTION_COUNT} questions to assess the MBTI-based learning style of an \
         elementary school student. \
         Each question must offer exactly two options, and both options of a question must \
         belong to the same MBTI pair (E/I, S/N, T/F or J/P), one option per side. \
         Create {QUESTIONS_PER_AXIS} questions for each of the four pairs \
         ({QUESTIONS_PER_AXIS} for E/I, {QUESTIONS_PER_AXIS} for S/N, \
         {QUESTIONS_PER_AXIS} for T/F, {QUESTIONS_PER_AXIS} for J/P). \
         The questions must describe everyday situations an elementary school student can \
         easily understand. \
         Respond strictly in the declared JSON schema format."
    )
}

/// Instruction for the narrative operation, for the given type code.
pub fn narrative_prompt(type_code: &TypeCode) -> String {
    format!(
        "Write a learning-style analysis for an elementary school student with the \
         \"{type_code}\" type. It must include: \
         1. A short, positive nickname for the type (for example 'The Passionate Explorer' \
         or 'The Warm Mediator'). \
         2. The characteristics of this learning style. \
         3. Key strengths (at least {MIN_NARRATIVE_LIST_ENTRIES}). \
         4. Points worth working on (at least {MIN_NARRATIVE_LIST_ENTRIES}). \
         5. Recommended study methods for this type (at least {MIN_NARRATIVE_LIST_ENTRIES}). \
         6. Concrete study strategies for reading, math and science \
         (at least {MIN_NARRATIVE_LIST_ENTRIES} per subject). \
         Keep everything easy for students and parents to understand, in a very \
         encouraging and positive tone. \
         Respond strictly in the declared JSON schema format."
    )
}

/// Declared schema for the question batch: a non-empty array of questions,
/// each with a prompt and two tagged options.
pub fn question_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING", "description": "Question for the student" },
                "options": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "text": { "type": "STRING", "description": "Option text" },
                            "type": {
                                "type": "STRING",
                                "description": "MBTI dimension tag (E,I,S,N,T,F,J,P)"
                            },
                        },
                        "required": ["text", "type"],
                    },
                },
            },
            "required": ["question", "options"],
        },
    })
}

/// Declared schema for the narrative: title, description, and the six
/// string lists.
pub fn narrative_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "Positive nickname for the type"
            },
            "description": {
                "type": "STRING",
                "description": "Overall description of the learning style"
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Key strengths"
            },
            "weaknesses": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Points worth working on"
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Recommended study methods"
            },
            "readingStrategy": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Study strategies for reading"
            },
            "mathStrategy": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Study strategies for math"
            },
            "scienceStrategy": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Study strategies for science"
            },
        },
        "required": [
            "title",
            "description",
            "strengths",
            "weaknesses",
            "recommendations",
            "readingStrategy",
            "mathStrategy",
            "scienceStrategy"
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindtype_core::scoring::Tally;

    #[test]
    fn test_question_prompt_names_the_contract() {
        let prompt = question_prompt();
        assert!(prompt.contains("12 questions"));
        assert!(prompt.contains("E/I"));
        assert!(prompt.contains("JSON schema"));
    }

    #[test]
    fn test_narrative_prompt_embeds_the_type_code() {
        let code = Tally::new().type_code();
        let prompt = narrative_prompt(&code);
        assert!(prompt.contains("\"ESTJ\""));
    }

    #[test]
    fn test_question_schema_shape() {
        let schema = question_response_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["required"], json!(["question", "options"]));
    }

    #[test]
    fn test_narrative_schema_requires_every_field() {
        let schema = narrative_response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 8);
        for field in ["title", "readingStrategy", "mathStrategy", "scienceStrategy"] {
            assert!(required.contains(&json!(field)));
        }
    }
}
