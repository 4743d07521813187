//! The shared contract implemented by both partition representations

use hashbrown::HashSet;

use crate::error::PartitionError;

/// A partition of a finite set of distinct elements of type `T` into
/// non-empty, pairwise-disjoint subsets (blocks) whose union is the whole
/// element set.
///
/// Both [`UnionFindPartition`](crate::union_find::UnionFindPartition) (a
/// dynamic disjoint-set structure supporting membership changes) and
/// [`ImmutablePartition`](crate::immutable::ImmutablePartition) (a fixed
/// snapshot) implement this trait, so code generic over "some partition of
/// `T`" can be written once against it.
///
/// Every read method borrows `self` rather than a `dyn Partition`: the
/// mutable implementation threads path-splitting through `Cell`-based
/// interior mutability (see [`crate::union_find`]) precisely so that
/// `subset`/`connected`/`contains` can be called without an exclusive borrow,
/// while the handful of methods that actually restructure the partition take
/// `&mut self` and are therefore statically exclusive with any live view
/// returned by a read method; the borrow checker enforces the single
/// ordering constraint the contract would otherwise only document.
pub trait Partition<T: Eq + std::hash::Hash + Clone> {
    /// The number of elements across all subsets.
    fn size(&self) -> usize;

    /// The number of subsets (always `0` for an empty partition).
    fn subset_count(&self) -> usize;

    /// Whether `t` belongs to any subset of this partition.
    fn contains(&self, t: &T) -> bool;

    /// All elements of the partition, in no specified order.
    fn elements(&self) -> Box<dyn Iterator<Item = T> + '_>;

    /// All subsets of the partition, in no specified order. Each subset is
    /// non-empty per the partition contract.
    fn subsets(&self) -> Box<dyn Iterator<Item = HashSet<T>> + '_>;

    /// The subset containing `t`.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if `t` is not a member of this
    /// partition.
    fn subset(&self, t: &T) -> Result<HashSet<T>, PartitionError>;

    /// Whether `x` and `y` belong to the same subset.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if either argument is not a
    /// member of this partition.
    fn connected(&self, x: &T, y: &T) -> Result<bool, PartitionError>;

    /// Insert `t` as a new singleton subset.
    ///
    /// # Errors
    /// Returns `Ok(false)` (never `Err`) if `t` is already present on a
    /// mutable implementation; returns [`PartitionError::Unsupported`] on an
    /// immutable one.
    fn add(&mut self, t: T) -> Result<bool, PartitionError>;

    /// Insert a whole new subset containing every element of `s`.
    ///
    /// # Errors
    /// Returns [`PartitionError::ArgInvalid`] if `s` is empty or shares an
    /// element with the partition, or [`PartitionError::Unsupported`] on an
    /// immutable implementation.
    fn add_subset(&mut self, s: Vec<T>) -> Result<(), PartitionError>;

    /// Remove `t`, shrinking (or dissolving) its subset.
    ///
    /// # Errors
    /// Returns `Ok(false)` if `t` was not present; [`PartitionError::Unsupported`]
    /// on an immutable implementation.
    fn remove(&mut self, t: &T) -> Result<bool, PartitionError>;

    /// Remove the entire subset containing `t`.
    ///
    /// # Errors
    /// Returns `Ok(false)` if `t` was not present; [`PartitionError::Unsupported`]
    /// on an immutable implementation.
    fn remove_subset(&mut self, t: &T) -> Result<bool, PartitionError>;

    /// Merge the subsets containing `x` and `y`.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if either argument is absent, or
    /// [`PartitionError::Unsupported`] on an immutable implementation.
    fn union(&mut self, x: &T, y: &T) -> Result<bool, PartitionError>;

    /// Isolate `t` into a brand-new singleton subset.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if `t` is absent, or
    /// [`PartitionError::Unsupported`] on an immutable implementation.
    fn split(&mut self, t: &T) -> Result<bool, PartitionError>;

    /// Move `x` into the subset containing `y`. Equivalent to `split(x)`
    /// followed by `union(x, y)`. Named `move_to` since `move` is a Rust
    /// keyword.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if either argument is absent, or
    /// [`PartitionError::Unsupported`] on an immutable implementation.
    fn move_to(&mut self, x: &T, y: &T) -> Result<bool, PartitionError>;

    /// Remove every element, returning the partition to its empty state.
    ///
    /// # Errors
    /// Returns [`PartitionError::Unsupported`] on an immutable implementation.
    fn clear(&mut self) -> Result<(), PartitionError>;
}
