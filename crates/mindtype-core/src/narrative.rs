//! Narrative result delivered by the generative service.

use serde::{Deserialize, Serialize};

/// The structured learning-style narrative for a derived type code.
///
/// All fields are opaque display content; the gateway shape-checks them
/// against the declared schema before a narrative reaches the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultNarrative {
    /// Positive nickname-style title for the type (e.g. "The Warm Mediator").
    pub title: String,
    /// Overall description of the learning style.
    pub description: String,
    /// Key strengths, at least two.
    pub strengths: Vec<String>,
    /// Points worth working on, at least two.
    pub weaknesses: Vec<String>,
    /// Recommended study methods, at least two.
    pub recommendations: Vec<String>,
    /// Subject strategies for reading, at least two.
    pub reading_strategies: Vec<String>,
    /// Subject strategies for math, at least two.
    pub math_strategies: Vec<String>,
    /// Subject strategies for science, at least two.
    pub science_strategies: Vec<String>,
}
