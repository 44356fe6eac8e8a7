use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The physical wheel in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelVariant {
    /// Single zero, 37 pockets.
    #[default]
    European,
    /// Zero and double zero, 38 pockets.
    American,
}

impl fmt::Display for WheelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelVariant::European => write!(f, "european"),
            WheelVariant::American => write!(f, "american"),
        }
    }
}

impl FromStr for WheelVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" | "eu" | "single-zero" => Ok(WheelVariant::European),
            "american" | "us" | "double-zero" => Ok(WheelVariant::American),
            other => Err(CoreError::InvalidInput(
                "wheel variant".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// A categorical grouping of pockets.
///
/// The set is closed: every kind maps each pocket through a total function on
/// `WheelLayout`, so analyzers can iterate `AttributeKind::ALL` instead of
/// dispatching on names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Color,
    Parity,
    Dozen,
    Column,
    /// Low (1-18) versus high (19-36).
    Range,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 5] = [
        AttributeKind::Color,
        AttributeKind::Parity,
        AttributeKind::Dozen,
        AttributeKind::Column,
        AttributeKind::Range,
    ];

    /// Every value this kind can take, zero-class bucket included.
    pub fn values(&self) -> &'static [AttributeValue] {
        use AttributeValue::*;
        match self {
            AttributeKind::Color => &[Red, Black, Green],
            AttributeKind::Parity => &[Odd, Even, Zero],
            AttributeKind::Dozen => &[FirstDozen, SecondDozen, ThirdDozen, Zero],
            AttributeKind::Column => &[FirstColumn, SecondColumn, ThirdColumn, Zero],
            AttributeKind::Range => &[Low, High, Zero],
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Color => "color",
            AttributeKind::Parity => "parity",
            AttributeKind::Dozen => "dozen",
            AttributeKind::Column => "column",
            AttributeKind::Range => "range",
        };
        f.write_str(name)
    }
}

/// The value a pocket takes under some `AttributeKind`.
///
/// `Zero` is the shared "none" bucket that 0 and 00 fall into for every kind
/// except color (where they are `Green`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Red,
    Black,
    Green,
    Odd,
    Even,
    Low,
    High,
    FirstDozen,
    SecondDozen,
    ThirdDozen,
    FirstColumn,
    SecondColumn,
    ThirdColumn,
    #[serde(rename = "none")]
    Zero,
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttributeValue::Red => "Red",
            AttributeValue::Black => "Black",
            AttributeValue::Green => "Green",
            AttributeValue::Odd => "Odd",
            AttributeValue::Even => "Even",
            AttributeValue::Low => "Low",
            AttributeValue::High => "High",
            AttributeValue::FirstDozen => "1st Dozen",
            AttributeValue::SecondDozen => "2nd Dozen",
            AttributeValue::ThirdDozen => "3rd Dozen",
            AttributeValue::FirstColumn => "1st Column",
            AttributeValue::SecondColumn => "2nd Column",
            AttributeValue::ThirdColumn => "3rd Column",
            AttributeValue::Zero => "None",
        };
        f.write_str(label)
    }
}

/// The classic call-bet sectors of the European wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    VoisinsDuZero,
    TiersDuCylindre,
    Orphelins,
}

impl Sector {
    pub const ALL: [Sector; 3] = [Sector::VoisinsDuZero, Sector::TiersDuCylindre, Sector::Orphelins];
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sector::VoisinsDuZero => write!(f, "Voisins du Zero"),
            Sector::TiersDuCylindre => write!(f, "Tiers du Cylindre"),
            Sector::Orphelins => write!(f, "Orphelins"),
        }
    }
}

/// The half of the wheel a pocket sits on, seen from the zero.
///
/// `Right` is the run of pockets clockwise from 0, `Left` the run counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelSide {
    Left,
    Right,
}

impl WheelSide {
    pub const ALL: [WheelSide; 2] = [WheelSide::Left, WheelSide::Right];
}

impl fmt::Display for WheelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelSide::Left => write!(f, "Left of Zero"),
            WheelSide::Right => write!(f, "Right of Zero"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parses_aliases() {
        assert_eq!("European".parse::<WheelVariant>(), Ok(WheelVariant::European));
        assert_eq!(" us ".parse::<WheelVariant>(), Ok(WheelVariant::American));
        assert!("french".parse::<WheelVariant>().is_err());
    }

    #[test]
    fn test_every_kind_has_a_zero_class_bucket() {
        for kind in AttributeKind::ALL {
            let values = kind.values();
            let zero_class = values
                .iter()
                .filter(|v| matches!(v, AttributeValue::Green | AttributeValue::Zero))
                .count();
            assert_eq!(zero_class, 1, "kind {}", kind);
        }
    }

    #[test]
    fn test_attribute_value_serializes_zero_as_none() {
        let json = serde_json::to_string(&AttributeValue::Zero).unwrap();
        assert_eq!(json, "\"none\"");
        let json = serde_json::to_string(&AttributeValue::FirstDozen).unwrap();
        assert_eq!(json, "\"first_dozen\"");
    }
}
