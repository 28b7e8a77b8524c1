//! Retirement age to payout divisor (N) table

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::error::PensionError;

/// Months over which the personal account is paid out, by retirement age
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutDivisorTable {
    divisors: BTreeMap<u32, u32>,
}

impl PayoutDivisorTable {
    /// Create from loaded (age, divisor) pairs
    pub fn from_pairs<I: IntoIterator<Item = (u32, u32)>>(pairs: I) -> Self {
        Self {
            divisors: pairs.into_iter().collect(),
        }
    }

    /// National schedule for ages 50-63
    pub fn standard() -> Self {
        Self::from_pairs([
            (50, 195),
            (51, 183),
            (52, 171),
            (53, 160),
            (54, 150),
            (55, 139),
            (56, 129),
            (57, 119),
            (58, 110),
            (59, 101),
            (60, 93),
            (61, 86),
            (62, 79),
            (63, 73),
        ])
    }

    pub fn get(&self, age: u32) -> Option<u32> {
        self.divisors.get(&age).copied()
    }

    pub fn contains(&self, age: u32) -> bool {
        self.divisors.contains_key(&age)
    }

    /// Divisor for `age`, or [`PensionError::MissingDivisor`]
    pub fn require(&self, age: u32) -> Result<u32, PensionError> {
        self.get(age).ok_or(PensionError::MissingDivisor(age))
    }

    /// Ages within `range` that have a divisor, ascending
    ///
    /// Walks only the table entries, so a wide range costs no more than the
    /// table itself. An empty or reversed range yields nothing.
    pub fn ages_in(&self, range: RangeInclusive<u32>) -> impl Iterator<Item = u32> + '_ {
        let entries = if range.is_empty() {
            None
        } else {
            Some(self.divisors.range(range))
        };
        entries.into_iter().flatten().map(|(age, _)| *age)
    }

    pub fn len(&self) -> usize {
        self.divisors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisors.is_empty()
    }
}

impl Default for PayoutDivisorTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = PayoutDivisorTable::standard();
        assert_eq!(table.get(60), Some(93));
        assert_eq!(table.get(50), Some(195));
        assert_eq!(table.len(), 14);
        assert_eq!(table.ages_in(0..=u32::MAX).next(), Some(50));
    }

    #[test]
    fn test_ages_in_range() {
        let table = PayoutDivisorTable::standard();
        assert_eq!(table.ages_in(60..=70).collect::<Vec<_>>(), vec![60, 61, 62, 63]);
        assert_eq!(table.ages_in(62..=u32::MAX).collect::<Vec<_>>(), vec![62, 63]);
        assert_eq!(table.ages_in(64..=u32::MAX).count(), 0);
        assert_eq!(table.ages_in(RangeInclusive::new(63, 60)).count(), 0);
    }

    #[test]
    fn test_missing_age() {
        let table = PayoutDivisorTable::standard();
        assert_eq!(table.require(64), Err(PensionError::MissingDivisor(64)));
        assert!(!table.contains(49));
    }
}
