//! Restricted growth string enumerators (C4 core, C5 bounded variants),
//! unified behind one enum-dispatched [`RgsEnumerator`] so
//! [`crate::adapter`] can hold a single concrete iterator type regardless of
//! which variant produced it, the way the grounding crate prefers a closed
//! enum dispatch over `Box<dyn Iterator>` at a public seam.

mod bounded;
mod core;

pub use bounded::Reversed;
pub use core::{Bounded, Lex};

use crate::error::PartitionError;

/// Any one of the restricted growth string enumerators this crate
/// implements, dispatched through a closed enum rather than a trait object.
#[derive(Debug, Clone)]
pub enum RgsEnumerator {
    /// C4: every RGS of length `n`, unconstrained.
    Lex(Lex),
    /// C5 forward: at-most-`k`, exactly-`k`, range, or set-`K`, all of which
    /// reduce to the same bounded engine with a different allowed set.
    Bounded(core::Bounded),
    /// C5 reverse: the reverse-lexicographic counterpart of any forward
    /// variant.
    Reversed(Reversed),
}

impl Iterator for RgsEnumerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        match self {
            Self::Lex(it) => it.next(),
            Self::Bounded(it) => it.next(),
            Self::Reversed(it) => it.next(),
        }
    }
}

/// Every RGS of length `n`, in lexicographic order (C4).
#[must_use]
pub fn lex(n: usize) -> RgsEnumerator { RgsEnumerator::Lex(Lex::new(n)) }

/// RGSs of length `n` with at most `k` distinct values.
///
/// # Errors
/// See [`bounded::at_most_k`].
pub fn at_most_k(n: usize, k: usize) -> Result<RgsEnumerator, PartitionError> {
    bounded::at_most_k(n, k).map(RgsEnumerator::Bounded)
}

/// RGSs of length `n` with exactly `k` distinct values.
///
/// # Errors
/// See [`bounded::exactly_k`].
pub fn exactly_k(n: usize, k: usize) -> Result<RgsEnumerator, PartitionError> {
    bounded::exactly_k(n, k).map(RgsEnumerator::Bounded)
}

/// RGSs of length `n` with between `kmin` and `kmax` distinct values.
///
/// # Errors
/// See [`bounded::range`].
pub fn range(n: usize, kmin: usize, kmax: usize) -> Result<RgsEnumerator, PartitionError> {
    bounded::range(n, kmin, kmax).map(RgsEnumerator::Bounded)
}

/// RGSs of length `n` whose distinct-value count is a member of `k_values`.
///
/// # Errors
/// See [`bounded::set_k`].
pub fn set_k(
    n: usize,
    k_values: impl IntoIterator<Item = usize>,
) -> Result<RgsEnumerator, PartitionError> {
    bounded::set_k(n, k_values).map(RgsEnumerator::Bounded)
}

/// Reverse-lexicographic counterpart of [`lex`].
#[must_use]
pub fn reverse_lex(n: usize) -> RgsEnumerator { RgsEnumerator::Reversed(bounded::reverse_lex(n)) }

/// Reverse-lexicographic counterpart of [`at_most_k`].
///
/// # Errors
/// See [`bounded::reverse_at_most_k`].
pub fn reverse_at_most_k(n: usize, k: usize) -> Result<RgsEnumerator, PartitionError> {
    bounded::reverse_at_most_k(n, k).map(RgsEnumerator::Reversed)
}

/// Reverse-lexicographic counterpart of [`exactly_k`].
///
/// # Errors
/// See [`bounded::reverse_exactly_k`].
pub fn reverse_exactly_k(n: usize, k: usize) -> Result<RgsEnumerator, PartitionError> {
    bounded::reverse_exactly_k(n, k).map(RgsEnumerator::Reversed)
}

/// Reverse-lexicographic counterpart of [`range`].
///
/// # Errors
/// See [`bounded::reverse_range`].
pub fn reverse_range(n: usize, kmin: usize, kmax: usize) -> Result<RgsEnumerator, PartitionError> {
    bounded::reverse_range(n, kmin, kmax).map(RgsEnumerator::Reversed)
}

/// Reverse-lexicographic counterpart of [`set_k`].
///
/// # Errors
/// See [`bounded::reverse_set_k`].
pub fn reverse_set_k(
    n: usize,
    k_values: impl IntoIterator<Item = usize>,
) -> Result<RgsEnumerator, PartitionError> {
    bounded::reverse_set_k(n, k_values).map(RgsEnumerator::Reversed)
}
