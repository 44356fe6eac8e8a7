use crate::enums::{AttributeKind, AttributeValue, Sector, WheelSide, WheelVariant};
use crate::structs::{Pocket, Split};
use serde::Serialize;

const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

const EUROPEAN_WHEEL: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

// 37 marks the double zero slot.
const AMERICAN_WHEEL: [u8; 38] = [
    0, 28, 9, 26, 30, 11, 7, 20, 32, 17, 5, 22, 34, 15, 3, 24, 36, 13, 1, 37, 27, 10, 25, 29, 12,
    8, 19, 31, 18, 6, 21, 33, 16, 4, 23, 35, 14, 2,
];

const VOISINS_DU_ZERO: [u8; 17] = [0, 2, 3, 4, 7, 12, 15, 18, 19, 21, 22, 25, 26, 28, 29, 32, 35];
const TIERS_DU_CYLINDRE: [u8; 12] = [5, 8, 10, 11, 13, 16, 23, 24, 27, 30, 33, 36];

/// Immutable number-to-attribute reference for one wheel variant.
///
/// All attribute functions are total over `pockets()`. The zero class (0, and 00 on
/// the American wheel) is `Green` and falls into the `AttributeValue::Zero` bucket
/// for every other kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WheelLayout {
    variant: WheelVariant,
    /// Table order: 0, then 00 if present, then 1..=36.
    pockets: Vec<Pocket>,
    /// Physical order around the wheel, clockwise from 0.
    wheel_order: Vec<Pocket>,
}

impl WheelLayout {
    pub fn new(variant: WheelVariant) -> Self {
        let mut pockets = vec![Pocket::ZERO];
        if variant == WheelVariant::American {
            pockets.push(Pocket::DoubleZero);
        }
        pockets.extend((1..=36).map(Pocket::new));

        let raw: &[u8] = match variant {
            WheelVariant::European => &EUROPEAN_WHEEL,
            WheelVariant::American => &AMERICAN_WHEEL,
        };
        let wheel_order = raw
            .iter()
            .map(|&n| if n == 37 { Pocket::DoubleZero } else { Pocket::new(n) })
            .collect();

        Self {
            variant,
            pockets,
            wheel_order,
        }
    }

    pub fn european() -> Self {
        Self::new(WheelVariant::European)
    }

    pub fn american() -> Self {
        Self::new(WheelVariant::American)
    }

    pub fn variant(&self) -> WheelVariant {
        self.variant
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    pub fn wheel_order(&self) -> &[Pocket] {
        &self.wheel_order
    }

    pub fn len(&self) -> usize {
        self.pockets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pockets.is_empty()
    }

    pub fn contains(&self, pocket: Pocket) -> bool {
        match pocket {
            Pocket::Number(n) => n <= 36,
            Pocket::DoubleZero => self.variant == WheelVariant::American,
        }
    }

    pub fn color_of(&self, pocket: Pocket) -> AttributeValue {
        match pocket.straight() {
            None => AttributeValue::Green,
            Some(n) if RED_NUMBERS.contains(&n) => AttributeValue::Red,
            Some(_) => AttributeValue::Black,
        }
    }

    pub fn parity_of(&self, pocket: Pocket) -> AttributeValue {
        match pocket.straight() {
            None => AttributeValue::Zero,
            Some(n) if n % 2 == 0 => AttributeValue::Even,
            Some(_) => AttributeValue::Odd,
        }
    }

    pub fn dozen_of(&self, pocket: Pocket) -> AttributeValue {
        match pocket.straight() {
            None => AttributeValue::Zero,
            Some(1..=12) => AttributeValue::FirstDozen,
            Some(13..=24) => AttributeValue::SecondDozen,
            Some(_) => AttributeValue::ThirdDozen,
        }
    }

    pub fn column_of(&self, pocket: Pocket) -> AttributeValue {
        match pocket.straight().map(|n| n % 3) {
            None => AttributeValue::Zero,
            Some(1) => AttributeValue::FirstColumn,
            Some(2) => AttributeValue::SecondColumn,
            Some(_) => AttributeValue::ThirdColumn,
        }
    }

    pub fn range_of(&self, pocket: Pocket) -> AttributeValue {
        match pocket.straight() {
            None => AttributeValue::Zero,
            Some(1..=18) => AttributeValue::Low,
            Some(_) => AttributeValue::High,
        }
    }

    /// Dispatches to the attribute function for `kind`.
    pub fn attribute(&self, kind: AttributeKind, pocket: Pocket) -> AttributeValue {
        match kind {
            AttributeKind::Color => self.color_of(pocket),
            AttributeKind::Parity => self.parity_of(pocket),
            AttributeKind::Dozen => self.dozen_of(pocket),
            AttributeKind::Column => self.column_of(pocket),
            AttributeKind::Range => self.range_of(pocket),
        }
    }

    /// Every attribute value of `pocket`, in `AttributeKind::ALL` order.
    pub fn traits_of(&self, pocket: Pocket) -> Vec<AttributeValue> {
        AttributeKind::ALL
            .iter()
            .map(|&kind| self.attribute(kind, pocket))
            .collect()
    }

    /// Number of pockets in this layout that take `value` under `kind`.
    pub fn pockets_with(&self, kind: AttributeKind, value: AttributeValue) -> usize {
        self.pockets
            .iter()
            .filter(|&&p| self.attribute(kind, p) == value)
            .count()
    }

    /// The call-bet sector of `pocket`. Only the European wheel defines sectors.
    pub fn sector_of(&self, pocket: Pocket) -> Option<Sector> {
        if self.variant != WheelVariant::European {
            return None;
        }
        match pocket {
            Pocket::Number(n) if VOISINS_DU_ZERO.contains(&n) => Some(Sector::VoisinsDuZero),
            Pocket::Number(n) if TIERS_DU_CYLINDRE.contains(&n) => Some(Sector::TiersDuCylindre),
            Pocket::Number(n) if n <= 36 => Some(Sector::Orphelins),
            _ => None,
        }
    }

    /// Which half of the wheel `pocket` sits on. The zero class has no side.
    ///
    /// The 18 pockets clockwise from 0 are `Right`, the 18 counter-clockwise are `Left`;
    /// on the American wheel 00 sits between the two halves.
    pub fn side_of(&self, pocket: Pocket) -> Option<WheelSide> {
        if pocket.is_zero_class() {
            return None;
        }
        let position = self.wheel_order.iter().position(|&p| p == pocket)?;
        let half = (self.wheel_order.len() - 1) / 2;
        if position <= half {
            Some(WheelSide::Right)
        } else {
            Some(WheelSide::Left)
        }
    }

    /// Street `k` (1..=12) covers `3k-2..=3k`.
    pub fn street_of(&self, pocket: Pocket) -> Option<u8> {
        pocket.straight().map(|n| (n - 1) / 3 + 1)
    }

    pub fn streets(&self) -> impl Iterator<Item = u8> {
        1..=12
    }

    /// Six-line `k` (1..=11) covers streets `k` and `k + 1`, i.e. `3k-2..=3k+3`.
    pub fn six_lines_of(&self, pocket: Pocket) -> Vec<u8> {
        match self.street_of(pocket) {
            Some(street) => (street.saturating_sub(1).max(1)..=street.min(11)).collect(),
            None => Vec::new(),
        }
    }

    pub fn six_lines(&self) -> impl Iterator<Item = u8> {
        1..=11
    }

    /// Corners containing `pocket`, each keyed by its lowest number `c`, which covers
    /// `c`, `c+1`, `c+3` and `c+4`.
    pub fn corners_of(&self, pocket: Pocket) -> Vec<u8> {
        let Some(n) = pocket.straight() else {
            return Vec::new();
        };
        let mut corners: Vec<u8> = [n.checked_sub(4), n.checked_sub(3), n.checked_sub(1), Some(n)]
            .into_iter()
            .flatten()
            .filter(|&c| is_corner_key(c) && [c, c + 1, c + 3, c + 4].contains(&n))
            .collect();
        corners.sort_unstable();
        corners.dedup();
        corners
    }

    pub fn corners(&self) -> Vec<u8> {
        (1..=32).filter(|&c| is_corner_key(c)).collect()
    }

    /// Splits containing `pocket`: its horizontal and vertical table neighbours.
    pub fn splits_of(&self, pocket: Pocket) -> Vec<Split> {
        let Some(n) = pocket.straight() else {
            return Vec::new();
        };
        let mut splits = Vec::with_capacity(4);
        if n > 3 {
            splits.push(Split { low: n - 3, high: n });
        }
        if n % 3 != 1 {
            splits.push(Split { low: n - 1, high: n });
        }
        if n % 3 != 0 {
            splits.push(Split { low: n, high: n + 1 });
        }
        if n <= 33 {
            splits.push(Split { low: n, high: n + 3 });
        }
        splits
    }

    pub fn splits(&self) -> Vec<Split> {
        let horizontal = (1..=35u8)
            .filter(|n| n % 3 != 0)
            .map(|n| Split { low: n, high: n + 1 });
        let vertical = (1..=33u8).map(|n| Split { low: n, high: n + 3 });
        let mut splits: Vec<Split> = horizontal.chain(vertical).collect();
        splits.sort_unstable();
        splits
    }

    /// The `k` pockets on each side of `pocket` along the wheel, counter-clockwise
    /// side first. Empty when the pocket is not on this wheel.
    pub fn neighbors(&self, pocket: Pocket, k: usize) -> Vec<Pocket> {
        let Some(position) = self.wheel_order.iter().position(|&p| p == pocket) else {
            return Vec::new();
        };
        let size = self.wheel_order.len();
        let k = k.min((size - 1) / 2);

        let left = (1..=k).rev().map(|step| self.wheel_order[(position + size - step) % size]);
        let right = (1..=k).map(|step| self.wheel_order[(position + step) % size]);
        left.chain(right).collect()
    }
}

// A corner's lowest number sits outside the third column and below the last street.
fn is_corner_key(c: u8) -> bool {
    (1..=32).contains(&c) && c % 3 != 0
}
