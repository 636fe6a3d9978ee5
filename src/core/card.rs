//! Number cards and the per-round set of claimed cards.
//!
//! ## CardValue
//!
//! A base card worth 1 through 12 points. Construction is checked, so a
//! `CardValue` is always inside the deck's domain.
//!
//! ## CardSet
//!
//! The set of card values a player has claimed in the current round.
//! Stored as a 12-bit mask; serialized as a sorted list of values so the
//! document shape stays `[1, 5, 7]`.

use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;

/// Highest base card value in the deck.
pub const MAX_CARD_VALUE: u8 = 12;

/// A base card value in `1..=12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CardValue(u8);

impl CardValue {
    /// Create a card value, or `None` if outside `1..=12`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= MAX_CARD_VALUE {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Points this card is worth.
    #[must_use]
    pub const fn points(self) -> u64 {
        self.0 as u64
    }

    /// Iterate over every card value in ascending order.
    ///
    /// ```
    /// use flip_scorecard::core::CardValue;
    ///
    /// let all: Vec<u8> = CardValue::all().map(CardValue::value).collect();
    /// assert_eq!(all.len(), 12);
    /// assert_eq!(all[0], 1);
    /// assert_eq!(all[11], 12);
    /// ```
    pub fn all() -> impl Iterator<Item = CardValue> {
        (1..=MAX_CARD_VALUE).map(CardValue)
    }

    const fn bit(self) -> u16 {
        1 << (self.0 - 1)
    }
}

impl TryFrom<u8> for CardValue {
    type Error = InvariantViolation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvariantViolation::CardOutOfRange(value))
    }
}

impl From<CardValue> for u8 {
    fn from(card: CardValue) -> Self {
        card.0
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{}", self.0)
    }
}

/// A set of card values.
///
/// ## Example
///
/// ```
/// use flip_scorecard::core::{CardSet, CardValue};
///
/// let mut used = CardSet::new();
/// let five = CardValue::new(5).unwrap();
///
/// assert!(used.insert(five));
/// assert!(!used.insert(five)); // already present
/// assert_eq!(used.total(), 5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct CardSet(u16);

impl CardSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Build a set from raw face values.
    ///
    /// Fails on the first value outside `1..=12`. Duplicates collapse.
    pub fn from_values<I>(values: I) -> Result<Self, InvariantViolation>
    where
        I: IntoIterator<Item = u8>,
    {
        values
            .into_iter()
            .map(CardValue::try_from)
            .collect::<Result<Self, _>>()
    }

    /// Insert a card. Returns true if it was not already present.
    pub fn insert(&mut self, card: CardValue) -> bool {
        let absent = !self.contains(card);
        self.0 |= card.bit();
        absent
    }

    /// Remove a card. Returns true if it was present.
    pub fn remove(&mut self, card: CardValue) -> bool {
        let present = self.contains(card);
        self.0 &= !card.bit();
        present
    }

    /// Flip membership of a card. Returns true if the card is now present.
    pub fn toggle(&mut self, card: CardValue) -> bool {
        self.0 ^= card.bit();
        self.contains(card)
    }

    #[must_use]
    pub const fn contains(self, card: CardValue) -> bool {
        self.0 & card.bit() != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub const fn union(self, other: CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_disjoint(self, other: CardSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Sum of the face values in the set.
    #[must_use]
    pub fn total(self) -> u64 {
        self.iter().map(CardValue::points).sum()
    }

    /// Iterate in ascending order.
    pub fn iter(self) -> impl Iterator<Item = CardValue> {
        CardValue::all().filter(move |card| self.contains(*card))
    }
}

impl FromIterator<CardValue> for CardSet {
    fn from_iter<I: IntoIterator<Item = CardValue>>(iter: I) -> Self {
        let mut set = CardSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<CardValue> for CardSet {
    fn extend<I: IntoIterator<Item = CardValue>>(&mut self, iter: I) {
        for card in iter {
            self.insert(card);
        }
    }
}

impl TryFrom<Vec<u8>> for CardSet {
    type Error = InvariantViolation;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_values(values)
    }
}

impl From<CardSet> for Vec<u8> {
    fn from(set: CardSet) -> Self {
        set.iter().map(CardValue::value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(v: u8) -> CardValue {
        CardValue::new(v).unwrap()
    }

    #[test]
    fn test_card_value_range() {
        assert!(CardValue::new(0).is_none());
        assert!(CardValue::new(13).is_none());
        assert_eq!(CardValue::new(1).map(CardValue::value), Some(1));
        assert_eq!(CardValue::new(12).map(CardValue::value), Some(12));
        assert_eq!(format!("{}", card(7)), "+7");
    }

    #[test]
    fn test_card_value_try_from() {
        assert_eq!(CardValue::try_from(3), Ok(card(3)));
        assert_eq!(
            CardValue::try_from(40),
            Err(InvariantViolation::CardOutOfRange(40))
        );
    }

    #[test]
    fn test_set_insert_remove() {
        let mut set = CardSet::new();
        assert!(set.is_empty());

        assert!(set.insert(card(5)));
        assert!(set.insert(card(7)));
        assert!(!set.insert(card(5)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.total(), 12);

        assert!(set.remove(card(5)));
        assert!(!set.remove(card(5)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_toggle() {
        let mut set = CardSet::new();
        assert!(set.toggle(card(12)));
        assert!(set.contains(card(12)));
        assert!(!set.toggle(card(12)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_union_and_disjoint() {
        let a = CardSet::from_values([1, 2, 3]).unwrap();
        let b = CardSet::from_values([3, 4]).unwrap();
        let c = CardSet::from_values([10]).unwrap();

        assert!(!a.is_disjoint(b));
        assert!(a.is_disjoint(c));
        assert_eq!(a.union(b), CardSet::from_values([1, 2, 3, 4]).unwrap());
    }

    #[test]
    fn test_set_iter_ascending() {
        let set = CardSet::from_values([9, 1, 4]).unwrap();
        let values: Vec<u8> = set.iter().map(CardValue::value).collect();
        assert_eq!(values, vec![1, 4, 9]);
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        assert_eq!(
            CardSet::from_values([1, 13]),
            Err(InvariantViolation::CardOutOfRange(13))
        );
    }

    #[test]
    fn test_set_serializes_as_sorted_list() {
        let set = CardSet::from_values([7, 5]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[5,7]");

        let back: CardSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);

        assert!(serde_json::from_str::<CardSet>("[0]").is_err());
    }
}
