//! MBTI dimension tags and the four opposed axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MindTypeError;

/// One of the eight MBTI dimension tags.
///
/// Serializes as its one-letter tag, matching the wire format the
/// generative service is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Dimension {
    /// All eight tags, in tally order.
    pub const ALL: [Dimension; 8] = [
        Dimension::E,
        Dimension::I,
        Dimension::S,
        Dimension::N,
        Dimension::T,
        Dimension::F,
        Dimension::J,
        Dimension::P,
    ];

    /// The axis this tag belongs to.
    pub fn axis(&self) -> Axis {
        match self {
            Dimension::E | Dimension::I => Axis::EI,
            Dimension::S | Dimension::N => Axis::SN,
            Dimension::T | Dimension::F => Axis::TF,
            Dimension::J | Dimension::P => Axis::JP,
        }
    }

    /// The one-letter representation of this tag.
    pub fn as_char(&self) -> char {
        match self {
            Dimension::E => 'E',
            Dimension::I => 'I',
            Dimension::S => 'S',
            Dimension::N => 'N',
            Dimension::T => 'T',
            Dimension::F => 'F',
            Dimension::J => 'J',
            Dimension::P => 'P',
        }
    }

    /// Position of this tag within [`Dimension::ALL`].
    pub(crate) fn index(&self) -> usize {
        match self {
            Dimension::E => 0,
            Dimension::I => 1,
            Dimension::S => 2,
            Dimension::N => 3,
            Dimension::T => 4,
            Dimension::F => 5,
            Dimension::J => 6,
            Dimension::P => 7,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Dimension {
    type Err = MindTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "E" => Ok(Dimension::E),
            "I" => Ok(Dimension::I),
            "S" => Ok(Dimension::S),
            "N" => Ok(Dimension::N),
            "T" => Ok(Dimension::T),
            "F" => Ok(Dimension::F),
            "J" => Ok(Dimension::J),
            "P" => Ok(Dimension::P),
            other => Err(MindTypeError::schema(format!(
                "'{other}' is not a valid dimension tag"
            ))),
        }
    }
}

/// One opposed pair of dimension tags.
///
/// The first member of each axis is the fixed tie-break winner: E over I,
/// S over N, T over F, J over P.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    /// All four axes, in type-code order.
    pub const ALL: [Axis; 4] = [Axis::EI, Axis::SN, Axis::TF, Axis::JP];

    /// The tie-break-winning member of this axis.
    pub fn first(&self) -> Dimension {
        match self {
            Axis::EI => Dimension::E,
            Axis::SN => Dimension::S,
            Axis::TF => Dimension::T,
            Axis::JP => Dimension::J,
        }
    }

    /// The other member of this axis.
    pub fn second(&self) -> Dimension {
        match self {
            Axis::EI => Dimension::I,
            Axis::SN => Dimension::N,
            Axis::TF => Dimension::F,
            Axis::JP => Dimension::P,
        }
    }
}
