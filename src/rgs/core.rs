//! Lexicographic enumeration of restricted growth strings, and the general
//! engine every bounded variant in [`super::bounded`] reduces to.
//!
//! A restricted growth string (RGS) of length `n` is a sequence
//! `a[0..n)` with `a[0] = 0` and `a[i] <= 1 + max(a[0..i))`; RGSs of length
//! `n` are in bijection with partitions of an `n`-element set (`a[i]` is the
//! index of the block containing the `i`th element, in order of first
//! appearance). Every bounded variant (at-most-`k`, exactly-`k`, between
//! `kmin` and `kmax`, or an arbitrary discrete set `K` of allowed block
//! counts) constrains which RGSs are legal by constraining the allowed
//! values of `max(a) + 1`; this module implements that constraint generally
//! in terms of an arbitrary non-empty `K ⊆ {1..=n}`; the unconstrained case
//! is simply `K = {1..=n}`.
//!
//! Grounded structurally on the grounding crate's habit of hand-rolling
//! small state-machine iterators that own their state and return owned
//! buffers rather than borrowing (`dfa::scanner`, `union_find::Roots`),
//! rather than building this atop a generic combinatorics crate.

use crate::error::PartitionError;

/// Forward (lexicographic) enumerator over RGSs of length `n` whose
/// distinct-value count lies in a fixed set `K`.
///
/// Maintains `a[0..n)` (the current RGS) and `b[0..n)` with
/// `b[i] = max(a[0..i))` (`b[0] = 0`), plus a lookup table `m[v]` (for
/// `v` in `0..=kmax`) giving the smallest member of `K` that is `>= v`
/// (the best distinct-value total still reachable once the running max so
/// far is `v - 1`). Successor is found by scanning backward for the
/// rightmost position that can be legally incremented without making the
/// eventual total distinct count infeasible, then filling everything to
/// its right with the lexicographically smallest values consistent with
/// reaching some member of `K`.
#[derive(Debug, Clone)]
pub struct Bounded {
    n: usize,
    kmax: usize,
    m: Vec<usize>,
    a: Vec<usize>,
    b: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Bounded {
    /// Build the enumerator for RGSs of length `n` whose distinct-value
    /// count is a member of `k_values`.
    ///
    /// # Errors
    /// Returns [`PartitionError::ArgInvalid`] if `k_values` is empty after
    /// deduplication, or contains an entry outside `[1, n]`.
    pub(crate) fn new(n: usize, k_values: impl IntoIterator<Item = usize>) -> Result<Self, PartitionError> {
        let mut ks: Vec<usize> = k_values.into_iter().collect();
        ks.sort_unstable();
        ks.dedup();
        if ks.is_empty() {
            return Err(PartitionError::ArgInvalid("block-count set must be non-empty"));
        }
        if ks.iter().any(|&k| k == 0 || k > n) {
            return Err(PartitionError::ArgInvalid("block count out of range [1, n]"));
        }
        let kmax = *ks.last().unwrap_or_else(|| unreachable!());
        let kmin = ks[0];
        debug_assert!(ks.windows(2).all(|w| w[0] < w[1]));

        let mut m = vec![kmax; kmax + 1];
        for (v, slot) in m.iter_mut().enumerate() {
            *slot = *ks.iter().find(|&&k| k >= v).unwrap_or(&kmax);
        }

        let mut a = vec![0usize; n];
        let start = n.saturating_sub(kmin.saturating_sub(1));
        for (offset, slot) in a.iter_mut().enumerate().skip(start) {
            *slot = offset - start + 1;
        }
        let mut b = vec![0usize; n];
        for i in 1..n {
            b[i] = b[i - 1].max(a[i - 1]);
        }

        let next = Some(a.clone());
        Ok(Self { n, kmax, m, a, b, next })
    }

    fn rejects(&self, i: usize) -> bool {
        if self.a[i] == self.kmax - 1 {
            return true;
        }
        if self.a[i] > self.b[i] {
            return true;
        }
        let newmax = (self.a[i] + 1).max(self.b[i]);
        let reach = self.m[newmax + 1];
        reach.saturating_sub(newmax + 1) > self.n - i - 1
    }

    fn backward_scan(&self) -> Option<usize> { (1..self.n).rev().find(|&i| !self.rejects(i)) }

    fn advance(&mut self) {
        let Some(i) = self.backward_scan() else {
            self.next = None;
            return;
        };
        self.a[i] += 1;
        if i + 1 >= self.n {
            self.next = Some(self.a.clone());
            return;
        }
        self.b[i + 1] = self.b[i].max(self.a[i]);
        let running_max = self.b[i + 1];
        let mut zeros = running_max as i64 + self.n as i64 - i as i64 - self.m[running_max + 1] as i64;
        for j in (i + 1)..self.n {
            if zeros > 0 {
                self.a[j] = 0;
                zeros -= 1;
            } else {
                self.a[j] = self.b[j] + 1;
            }
            if j + 1 < self.n {
                self.b[j + 1] = self.b[j].max(self.a[j]);
            }
        }
        self.next = Some(self.a.clone());
    }
}

impl Iterator for Bounded {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.n == 0 {
            return self.next.take();
        }
        let current = self.next.take()?;
        self.advance();
        Some(current)
    }
}

/// Unconstrained lexicographic RGS enumerator (C4): every restricted growth
/// string of length `n`, in lexicographic order, one per partition of an
/// `n`-element set (Bell(`n`) outputs total).
#[derive(Debug, Clone)]
pub struct Lex(LexImpl);

#[derive(Debug, Clone)]
enum LexImpl {
    /// `n == 0`: the single empty RGS, handled outside the general engine
    /// since `K` would otherwise have to be empty.
    Empty(bool),
    Bounded(Bounded),
}

impl Lex {
    #[must_use]
    pub fn new(n: usize) -> Self {
        if n == 0 {
            Self(LexImpl::Empty(true))
        } else {
            Self(LexImpl::Bounded(
                Bounded::new(n, 1..=n).unwrap_or_else(|_| unreachable!()),
            ))
        }
    }
}

impl Iterator for Lex {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        match &mut self.0 {
            LexImpl::Empty(pending) => pending.then(|| {
                *pending = false;
                Vec::new()
            }),
            LexImpl::Bounded(b) => b.next(),
        }
    }
}

/// Reverse-lexicographic (decrementing) dual of [`Bounded`]: the same O(n)
/// integer state, walked from the lex-greatest RGS down to the lex-least.
///
/// Initialization places the lex-greatest vector, `a[i] = min(i, kmax-1)`,
/// whose distinct count is always `kmax` itself (the largest member of `K`),
/// so unlike `Bounded` no tail-priming for `kmin` is needed. Predecessor
/// scans backward for the rightmost position that can still be legally
/// decremented without making the eventual total infeasible, decrements it,
/// then fills everything to its right with the lexicographically largest
/// values consistent with landing on some member of `K`: ascend (`b[j] + 1`)
/// until the budget of new blocks still needed has been spent, then hold at
/// the running max for the rest. `mr[v]` (the reverse counterpart of `m[v]`:
/// the largest member of `K` that is `<= v`) bounds how far that ascent is
/// allowed to land.
#[derive(Debug, Clone)]
pub struct ReverseBounded {
    n: usize,
    kmax: usize,
    m: Vec<usize>,
    mr: Vec<usize>,
    a: Vec<usize>,
    b: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl ReverseBounded {
    pub(crate) fn new(n: usize, k_values: impl IntoIterator<Item = usize>) -> Result<Self, PartitionError> {
        let mut ks: Vec<usize> = k_values.into_iter().collect();
        ks.sort_unstable();
        ks.dedup();
        if ks.is_empty() {
            return Err(PartitionError::ArgInvalid("block-count set must be non-empty"));
        }
        if ks.iter().any(|&k| k == 0 || k > n) {
            return Err(PartitionError::ArgInvalid("block count out of range [1, n]"));
        }
        let kmax = *ks.last().unwrap_or_else(|| unreachable!());
        let kmin = ks[0];
        debug_assert!(ks.windows(2).all(|w| w[0] < w[1]));

        let mut m = vec![kmax; kmax + 1];
        for (v, slot) in m.iter_mut().enumerate() {
            *slot = *ks.iter().find(|&&k| k >= v).unwrap_or(&kmax);
        }
        let mut mr = vec![kmin; kmax + 1];
        for (v, slot) in mr.iter_mut().enumerate() {
            *slot = *ks.iter().rev().find(|&&k| k <= v).unwrap_or(&kmin);
        }

        let mut a = vec![0usize; n];
        for (i, slot) in a.iter_mut().enumerate() {
            *slot = i.min(kmax - 1);
        }
        let mut b = vec![0usize; n];
        for i in 1..n {
            b[i] = b[i - 1].max(a[i - 1]);
        }

        let next = Some(a.clone());
        Ok(Self { n, kmax, m, mr, a, b, next })
    }

    fn rejects(&self, i: usize) -> bool {
        if self.a[i] == 0 {
            return true;
        }
        let newmax = (self.a[i] - 1).max(self.b[i]);
        let reach = self.m[newmax + 1];
        reach.saturating_sub(newmax + 1) > self.n - i - 1
    }

    fn backward_scan(&self) -> Option<usize> { (1..self.n).rev().find(|&i| !self.rejects(i)) }

    fn advance(&mut self) {
        let Some(i) = self.backward_scan() else {
            self.next = None;
            return;
        };
        self.a[i] -= 1;
        if i + 1 >= self.n {
            self.next = Some(self.a.clone());
            return;
        }
        self.b[i + 1] = self.b[i].max(self.a[i]);
        let newmax = self.b[i + 1];
        let max_achievable = (newmax + 1 + (self.n - i - 1)).min(self.kmax);
        let target = self.mr[max_achievable];
        let mut budget = target as i64 - (newmax as i64 + 1);
        for j in (i + 1)..self.n {
            if budget > 0 {
                self.a[j] = self.b[j] + 1;
                budget -= 1;
            } else {
                self.a[j] = self.b[j];
            }
            if j + 1 < self.n {
                self.b[j + 1] = self.b[j].max(self.a[j]);
            }
        }
        self.next = Some(self.a.clone());
    }
}

impl Iterator for ReverseBounded {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.n == 0 {
            return self.next.take();
        }
        let current = self.next.take()?;
        self.advance();
        Some(current)
    }
}

/// Reverse-lexicographic counterpart of [`Lex`] or [`Bounded`] (C5 reverse
/// variants): walks the same RGS lattice as its forward counterpart, from
/// greatest to least, in O(n) integer state (plus O(`kmax`) for the `m`/`mr`
/// tables) rather than by replaying a collected forward sequence backward.
#[derive(Debug, Clone)]
pub struct Reversed(ReversedImpl);

#[derive(Debug, Clone)]
enum ReversedImpl {
    /// `n == 0`: the single empty RGS, handled outside the general engine
    /// since `K` would otherwise have to be empty.
    Empty(bool),
    Bounded(ReverseBounded),
}

impl Reversed {
    /// Reverse-lexicographic counterpart of [`Lex::new`].
    #[must_use]
    pub fn lex(n: usize) -> Self {
        if n == 0 {
            Self(ReversedImpl::Empty(true))
        } else {
            Self(ReversedImpl::Bounded(
                ReverseBounded::new(n, 1..=n).unwrap_or_else(|_| unreachable!()),
            ))
        }
    }

    /// Reverse-lexicographic counterpart of [`Bounded::new`].
    ///
    /// # Errors
    /// Same as [`Bounded::new`].
    pub(crate) fn bounded(
        n: usize,
        k_values: impl IntoIterator<Item = usize>,
    ) -> Result<Self, PartitionError> {
        ReverseBounded::new(n, k_values).map(|b| Self(ReversedImpl::Bounded(b)))
    }
}

impl Iterator for Reversed {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        match &mut self.0 {
            ReversedImpl::Empty(pending) => pending.then(|| {
                *pending = false;
                Vec::new()
            }),
            ReversedImpl::Bounded(b) => b.next(),
        }
    }
}
