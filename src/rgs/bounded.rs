//! Bounded-block-count RGS enumerators (C5): at-most-`k`, exactly-`k`,
//! between `kmin` and `kmax`, an arbitrary discrete set `K`, and the
//! reverse-lexicographic counterpart of each.
//!
//! Every variant here, forward and reverse, is a thin constructor over
//! [`super::core::Bounded`] or [`super::core::Reversed`] with a particular
//! `K`; the general engines already implement the backward-scan/forward-fill
//! machinery (and its decrementing dual), so this module's job is purely
//! translating each variant's public contract into a `K` set and validating
//! its arguments.

use crate::error::PartitionError;
use crate::rgs::core::Bounded;

pub use crate::rgs::core::Reversed;

/// RGSs of length `n` with at most `k` distinct values.
///
/// # Errors
/// Returns [`PartitionError::ArgInvalid`] if `k == 0` or `k > n`.
pub fn at_most_k(n: usize, k: usize) -> Result<Bounded, PartitionError> { Bounded::new(n, 1..=k) }

/// RGSs of length `n` with exactly `k` distinct values.
///
/// # Errors
/// Returns [`PartitionError::ArgInvalid`] if `k == 0` or `k > n`.
pub fn exactly_k(n: usize, k: usize) -> Result<Bounded, PartitionError> { Bounded::new(n, [k]) }

/// RGSs of length `n` with between `kmin` and `kmax` (inclusive) distinct
/// values.
///
/// # Errors
/// Returns [`PartitionError::ArgInvalid`] if `kmin > kmax`, `kmin == 0`, or
/// `kmax > n`.
pub fn range(n: usize, kmin: usize, kmax: usize) -> Result<Bounded, PartitionError> {
    if kmin > kmax {
        return Err(PartitionError::ArgInvalid("kmin must not exceed kmax"));
    }
    Bounded::new(n, kmin..=kmax)
}

/// RGSs of length `n` whose distinct-value count is a member of the
/// arbitrary discrete set `k_values`.
///
/// # Errors
/// Returns [`PartitionError::ArgInvalid`] if `k_values` is empty after
/// deduplication, or any entry is `0` or greater than `n`.
pub fn set_k(n: usize, k_values: impl IntoIterator<Item = usize>) -> Result<Bounded, PartitionError> {
    Bounded::new(n, k_values)
}

/// Reverse-lexicographic counterpart of [`super::core::Lex::new`].
#[must_use]
pub fn reverse_lex(n: usize) -> Reversed { Reversed::lex(n) }

/// Reverse-lexicographic counterpart of [`at_most_k`].
///
/// # Errors
/// Same as [`at_most_k`].
pub fn reverse_at_most_k(n: usize, k: usize) -> Result<Reversed, PartitionError> {
    Reversed::bounded(n, 1..=k)
}

/// Reverse-lexicographic counterpart of [`exactly_k`].
///
/// # Errors
/// Same as [`exactly_k`].
pub fn reverse_exactly_k(n: usize, k: usize) -> Result<Reversed, PartitionError> {
    Reversed::bounded(n, [k])
}

/// Reverse-lexicographic counterpart of [`range`].
///
/// # Errors
/// Same as [`range`].
pub fn reverse_range(n: usize, kmin: usize, kmax: usize) -> Result<Reversed, PartitionError> {
    if kmin > kmax {
        return Err(PartitionError::ArgInvalid("kmin must not exceed kmax"));
    }
    Reversed::bounded(n, kmin..=kmax)
}

/// Reverse-lexicographic counterpart of [`set_k`].
///
/// # Errors
/// Same as [`set_k`].
pub fn reverse_set_k(
    n: usize,
    k_values: impl IntoIterator<Item = usize>,
) -> Result<Reversed, PartitionError> {
    Reversed::bounded(n, k_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgs::core::Lex;

    fn bell(n: usize) -> usize { Lex::new(n).count() }

    #[test]
    fn bell_numbers_small_n() {
        assert_eq!(bell(0), 1);
        assert_eq!(bell(1), 1);
        assert_eq!(bell(2), 2);
        assert_eq!(bell(3), 5);
    }

    #[test]
    fn bell_eight_matches_known_value() { assert_eq!(bell(8), 4140); }

    #[test]
    fn range_matches_sum_of_stirling_second_kind() {
        assert_eq!(range(10, 4, 6).unwrap().count(), 99_457);
        assert_eq!(range(10, 5, 5).unwrap().count(), 42_525);
        assert_eq!(range(10, 1, 5).unwrap().count(), 86_472);
    }

    #[test]
    fn exactly_and_at_most_match_known_values() {
        assert_eq!(exactly_k(10, 6).unwrap().count(), 22_827);
        assert_eq!(at_most_k(10, 6).unwrap().count(), 109_299);
    }

    #[test]
    fn set_k_matches_known_value() {
        assert_eq!(set_k(10, [2, 6, 9]).unwrap().count(), 23_383);
    }

    #[test]
    fn reverse_is_exact_reversal_of_forward() {
        let forward: Vec<_> = set_k(10, [2, 6, 9]).unwrap().collect();
        let reversed: Vec<_> = reverse_set_k(10, [2, 6, 9]).unwrap().collect();
        let mut expected = forward;
        expected.reverse();
        assert_eq!(reversed, expected);
    }

    #[test]
    fn reverse_set_k_matches_forward_on_non_contiguous_k() {
        let forward: Vec<_> = set_k(4, [1, 3]).unwrap().collect();
        let reversed: Vec<_> = reverse_set_k(4, [1, 3]).unwrap().collect();
        assert_eq!(reversed, vec![
            vec![0, 1, 2, 2],
            vec![0, 1, 2, 1],
            vec![0, 1, 2, 0],
            vec![0, 1, 1, 2],
            vec![0, 1, 0, 2],
            vec![0, 0, 1, 2],
            vec![0, 0, 0, 0],
        ]);
        let mut expected = forward;
        expected.reverse();
        assert_eq!(reversed, expected);
    }

    #[test]
    fn reverse_lex_of_empty_is_single_empty_vector() {
        assert_eq!(reverse_lex(0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn rejects_degenerate_bounds() {
        assert!(range(10, 7, 3).is_err());
        assert!(at_most_k(10, 0).is_err());
        assert!(exactly_k(10, 11).is_err());
        assert!(set_k(10, std::iter::empty()).is_err());
    }
}
