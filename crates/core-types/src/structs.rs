use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single pocket on a roulette wheel.
///
/// `Number(n)` covers 0 and 1..=36. A `Pocket` is only a candidate until a
/// `WheelLayout` accepts it; `Number(37)` can be constructed but no layout contains it.
/// Ordering is numeric with `DoubleZero` after 36.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Pocket {
    Number(u8),
    DoubleZero,
}

impl Pocket {
    pub const ZERO: Pocket = Pocket::Number(0);

    pub const fn new(number: u8) -> Self {
        Pocket::Number(number)
    }

    /// True for 0 and 00.
    pub fn is_zero_class(&self) -> bool {
        matches!(self, Pocket::Number(0) | Pocket::DoubleZero)
    }

    /// The face value for 1..=36, `None` for the zero class and out-of-range numbers.
    pub fn straight(&self) -> Option<u8> {
        match *self {
            Pocket::Number(n) if (1..=36).contains(&n) => Some(n),
            _ => None,
        }
    }
}

impl From<u8> for Pocket {
    fn from(number: u8) -> Self {
        Pocket::Number(number)
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pocket::Number(n) => write!(f, "{}", n),
            Pocket::DoubleZero => write!(f, "00"),
        }
    }
}

impl FromStr for Pocket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "00" {
            return Ok(Pocket::DoubleZero);
        }
        s.parse::<u8>()
            .map(Pocket::Number)
            .map_err(|_| CoreError::InvalidPocket(s.to_string()))
    }
}

impl From<Pocket> for String {
    fn from(pocket: Pocket) -> Self {
        pocket.to_string()
    }
}

impl TryFrom<String> for Pocket {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A two-number split bet, `low` < `high`, adjacent on the betting table.
///
/// Serializes as `"low-high"` so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Split {
    pub low: u8,
    pub high: u8,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for Split {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidInput("split".to_string(), s.to_string());
        let (low, high) = s.trim().split_once('-').ok_or_else(invalid)?;
        let low = low.parse::<u8>().map_err(|_| invalid())?;
        let high = high.parse::<u8>().map_err(|_| invalid())?;
        if low >= high {
            return Err(invalid());
        }
        Ok(Split { low, high })
    }
}

impl From<Split> for String {
    fn from(split: Split) -> Self {
        split.to_string()
    }
}

impl TryFrom<String> for Split {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single validated spin result.
///
/// Only the history store creates these; `sequence_index` is the authoritative
/// ordering key and `timestamp` is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub pocket: Pocket,
    pub sequence_index: u64,
    pub timestamp: Option<DateTime<Utc>>,
}
