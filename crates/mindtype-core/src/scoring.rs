//! Answer tallying and type-code derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dimension::{Axis, Dimension};

/// Per-dimension answer counts for one quiz run.
///
/// Counts start at zero, are incremented exactly once per answered question,
/// and are never decremented. The tally is read once, after the final
/// answer, to derive the type code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    counts: [u32; 8],
}

impl Tally {
    /// Creates a zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one answer for the given dimension.
    pub fn record(&mut self, dimension: Dimension) {
        self.counts[dimension.index()] += 1;
    }

    /// The current count for a dimension.
    pub fn count(&self, dimension: Dimension) -> u32 {
        self.counts[dimension.index()]
    }

    /// Total number of recorded answers.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Derives the four-letter type code from the current counts.
    ///
    /// For each axis the member with the strictly-or-equal greater count is
    /// selected; ties go to the first-listed member (E over I, S over N,
    /// T over F, J over P). Pure and idempotent.
    pub fn type_code(&self) -> TypeCode {
        let letters = Axis::ALL.map(|axis| {
            if self.count(axis.first()) >= self.count(axis.second()) {
                axis.first()
            } else {
                axis.second()
            }
        });
        TypeCode(letters)
    }
}

/// A derived personality type: one dimension per axis, in axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeCode([Dimension; 4]);

impl TypeCode {
    /// The four selected dimensions, in axis order.
    pub fn dimensions(&self) -> &[Dimension; 4] {
        &self.0
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dimension in &self.0 {
            write!(f, "{dimension}")?;
        }
        Ok(())
    }
}
