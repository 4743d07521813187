//! Element-to-RGS adapter (C6): binds an unordered, unordered-iteration
//! element set to a chosen [`RgsEnumerator`](crate::rgs::RgsEnumerator) and
//! materializes a `Partition` from each restricted growth string it
//! produces via a caller-supplied factory.
//!
//! The adapter itself never chooses which `Partition` implementation comes
//! out the other end: it is generic over `P: Partition<T>` and the
//! factory closure decides, matching the grounding crate's preference for
//! pushing representation choice out to the call site rather than hard-
//! coding it (cf. `re::compile`'s generic `Backend` parameter).

use std::marker::PhantomData;

use hashbrown::HashMap;

use crate::{error::PartitionError, partition::Partition, rgs::RgsEnumerator};

/// Lazily yields one `P` per restricted growth string an
/// [`RgsEnumerator`](crate::rgs::RgsEnumerator) produces, each built by
/// applying `factory` to a stable element list and a label closure over
/// that list.
pub struct Adapter<T, P, F> {
    elements: Vec<T>,
    index: HashMap<T, usize>,
    enumerator: RgsEnumerator,
    factory: F,
    _marker: PhantomData<fn() -> P>,
}

impl<T: std::fmt::Debug, P, F> std::fmt::Debug for Adapter<T, P, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("elements", &self.elements)
            .field("enumerator", &self.enumerator)
            .finish_non_exhaustive()
    }
}

impl<T, P, F> Adapter<T, P, F>
where
    T: Eq + std::hash::Hash + Clone,
    F: Fn(&[T], &dyn Fn(&T) -> usize) -> P,
    P: Partition<T>,
{
    /// Build an adapter over `elements`, driven by `enumerator`, yielding
    /// `P`s built through `factory`.
    ///
    /// # Errors
    /// Returns [`PartitionError::ArgInvalid`] if `elements` is empty or
    /// contains a duplicate.
    pub fn new(
        elements: impl IntoIterator<Item = T>,
        enumerator: RgsEnumerator,
        factory: F,
    ) -> Result<Self, PartitionError> {
        let elements: Vec<T> = elements.into_iter().collect();
        if elements.is_empty() {
            return Err(PartitionError::ArgInvalid("elements must be non-empty"));
        }
        let mut index = HashMap::with_capacity(elements.len());
        for (i, t) in elements.iter().enumerate() {
            if index.insert(t.clone(), i).is_some() {
                return Err(PartitionError::ArgInvalid("elements must not contain duplicates"));
            }
        }
        Ok(Self { elements, index, enumerator, factory, _marker: PhantomData })
    }
}

impl<T, P, F> Iterator for Adapter<T, P, F>
where
    T: Eq + std::hash::Hash + Clone,
    F: Fn(&[T], &dyn Fn(&T) -> usize) -> P,
{
    type Item = P;

    fn next(&mut self) -> Option<P> {
        let a = self.enumerator.next()?;
        let index = &self.index;
        Some((self.factory)(&self.elements, &|t: &T| a[index[t]]))
    }
}

impl<T, P, F> std::iter::FusedIterator for Adapter<T, P, F>
where
    T: Eq + std::hash::Hash + Clone,
    F: Fn(&[T], &dyn Fn(&T) -> usize) -> P,
{
}

/// Every partition of `elements` (C4 driving C6).
///
/// # Errors
/// See [`Adapter::new`].
pub fn every_partition<T, P>(
    elements: impl IntoIterator<Item = T>,
    factory: impl Fn(&[T], &dyn Fn(&T) -> usize) -> P,
) -> Result<Adapter<T, P, impl Fn(&[T], &dyn Fn(&T) -> usize) -> P>, PartitionError>
where
    T: Eq + std::hash::Hash + Clone,
    P: Partition<T>,
{
    let elements: Vec<T> = elements.into_iter().collect();
    let n = elements.len();
    Adapter::new(elements, crate::rgs::lex(n), factory)
}

/// Every partition of `elements` into at most `k` blocks.
///
/// # Errors
/// See [`Adapter::new`] and [`crate::rgs::at_most_k`].
pub fn at_most_k<T, P>(
    elements: impl IntoIterator<Item = T>,
    k: usize,
    factory: impl Fn(&[T], &dyn Fn(&T) -> usize) -> P,
) -> Result<Adapter<T, P, impl Fn(&[T], &dyn Fn(&T) -> usize) -> P>, PartitionError>
where
    T: Eq + std::hash::Hash + Clone,
    P: Partition<T>,
{
    let elements: Vec<T> = elements.into_iter().collect();
    let n = elements.len();
    Adapter::new(elements, crate::rgs::at_most_k(n, k)?, factory)
}

/// Every partition of `elements` into exactly `k` blocks.
///
/// # Errors
/// See [`Adapter::new`] and [`crate::rgs::exactly_k`].
pub fn exactly_k<T, P>(
    elements: impl IntoIterator<Item = T>,
    k: usize,
    factory: impl Fn(&[T], &dyn Fn(&T) -> usize) -> P,
) -> Result<Adapter<T, P, impl Fn(&[T], &dyn Fn(&T) -> usize) -> P>, PartitionError>
where
    T: Eq + std::hash::Hash + Clone,
    P: Partition<T>,
{
    let elements: Vec<T> = elements.into_iter().collect();
    let n = elements.len();
    Adapter::new(elements, crate::rgs::exactly_k(n, k)?, factory)
}

/// Every partition of `elements` into between `kmin` and `kmax` blocks.
///
/// # Errors
/// See [`Adapter::new`] and [`crate::rgs::range`].
pub fn range<T, P>(
    elements: impl IntoIterator<Item = T>,
    kmin: usize,
    kmax: usize,
    factory: impl Fn(&[T], &dyn Fn(&T) -> usize) -> P,
) -> Result<Adapter<T, P, impl Fn(&[T], &dyn Fn(&T) -> usize) -> P>, PartitionError>
where
    T: Eq + std::hash::Hash + Clone,
    P: Partition<T>,
{
    let elements: Vec<T> = elements.into_iter().collect();
    let n = elements.len();
    Adapter::new(elements, crate::rgs::range(n, kmin, kmax)?, factory)
}

/// Every partition of `elements` whose block count is a member of
/// `k_values`.
///
/// # Errors
/// See [`Adapter::new`] and [`crate::rgs::set_k`].
pub fn set_k<T, P>(
    elements: impl IntoIterator<Item = T>,
    k_values: impl IntoIterator<Item = usize>,
    factory: impl Fn(&[T], &dyn Fn(&T) -> usize) -> P,
) -> Result<Adapter<T, P, impl Fn(&[T], &dyn Fn(&T) -> usize) -> P>, PartitionError>
where
    T: Eq + std::hash::Hash + Clone,
    P: Partition<T>,
{
    let elements: Vec<T> = elements.into_iter().collect();
    let n = elements.len();
    Adapter::new(elements, crate::rgs::set_k(n, k_values)?, factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union_find::UnionFindPartition;

    fn build(elements: &[u32], label: &dyn Fn(&u32) -> usize) -> UnionFindPartition<u32> {
        let mut blocks: Vec<Vec<u32>> = Vec::new();
        for &t in elements {
            let l = label(&t);
            if l >= blocks.len() {
                blocks.resize(l + 1, Vec::new());
            }
            blocks[l].push(t);
        }
        let mut p = UnionFindPartition::new();
        for block in blocks {
            if !block.is_empty() {
                p.add_subset(block).expect("freshly grouped blocks are disjoint");
            }
        }
        p
    }

    #[test]
    fn every_partition_count_matches_bell_number() {
        let count = every_partition(0..4u32, build).unwrap().count();
        assert_eq!(count, 15);
    }

    #[test]
    fn exactly_k_partitions_all_have_k_blocks() {
        for p in exactly_k(0..6u32, 3, build).unwrap() {
            assert_eq!(p.subset_count(), 3);
        }
    }

    #[test]
    fn rejects_empty_elements() {
        let err = every_partition::<u32, UnionFindPartition<u32>>(std::iter::empty(), build);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_duplicate_elements() {
        let err = every_partition([1u32, 2, 1], build);
        assert!(err.is_err());
    }
}
