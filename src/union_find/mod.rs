//! A dynamic disjoint-set structure ("Union-Find Partition") supporting
//! element deletion, subset removal, element move, and subset split, with
//! constant amortized time for every operation and constant-time iteration
//! over the elements of any block.
//!
//! The forest itself lives in [`arena::Arena`], generalized from the
//! grounding crate's `vec_forest::VecForestSet`. This module owns the
//! lookup table from element values to arena handles and implements the
//! higher-level contract ([`Partition`]) in terms of the arena's primitives.

use std::hash::{Hash, Hasher};

use hashbrown::HashMap;

pub(crate) mod arena;

use arena::Arena;

use crate::{error::PartitionError, partition::Partition};

/// A mutable partition of a dynamic set of elements, backed by a
/// disjoint-set forest that supports O(1) amortized deletion, split, and
/// move in addition to classical union/find.
///
/// `find`-driven read operations (`subset`, `connected`, and the mutators
/// that resolve roots internally) are realized through `Cell`-based
/// interior mutability inside [`arena::Arena`], so the read half of
/// [`Partition`] only ever needs `&self` even though path splitting mutates
/// state under the hood.
#[derive(Debug, Clone)]
pub struct UnionFindPartition<T> {
    arena: Arena<T>,
    lookup: HashMap<T, usize>,
    subset_count: usize,
}

impl<T> Default for UnionFindPartition<T> {
    fn default() -> Self { Self { arena: Arena::new(), lookup: HashMap::new(), subset_count: 0 } }
}

impl<T: Eq + Hash + Clone> UnionFindPartition<T> {
    /// Construct a new, empty partition.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn collect_block(&self, root: usize) -> hashbrown::HashSet<T> {
        self.arena.block_members(root).map(|i| self.arena.element(i).clone()).collect()
    }

    fn resolve(&self, t: &T) -> Result<usize, PartitionError> {
        self.lookup.get(t).copied().ok_or(PartitionError::NotFound)
    }

    /// Insert `t` as a new singleton block.
    ///
    /// # Errors
    /// Never fails; returns `Ok(false)` if `t` was already present.
    pub fn add(&mut self, t: T) -> Result<bool, PartitionError> {
        if self.lookup.contains_key(&t) {
            return Ok(false);
        }
        let idx = self.arena.insert_root(t.clone());
        self.lookup.insert(t, idx);
        self.subset_count += 1;
        Ok(true)
    }

    /// Insert a whole new block containing every element of `s`.
    ///
    /// # Errors
    /// Returns [`PartitionError::ArgInvalid`] if `s` is empty, contains a
    /// duplicate, or shares any element with this partition.
    pub fn add_subset(&mut self, s: impl IntoIterator<Item = T>) -> Result<(), PartitionError> {
        let items: Vec<T> = s.into_iter().collect();
        if items.is_empty() {
            return Err(PartitionError::ArgInvalid("subset must be non-empty"));
        }
        let mut seen = hashbrown::HashSet::with_capacity(items.len());
        for t in &items {
            if self.lookup.contains_key(t) {
                return Err(PartitionError::ArgInvalid(
                    "subset shares an element with the partition",
                ));
            }
            if !seen.insert(t.clone()) {
                return Err(PartitionError::ArgInvalid("subset contains a duplicate element"));
            }
        }

        let mut items = items.into_iter();
        let first = items.next().unwrap_or_else(|| unreachable!());
        let root = self.arena.insert_root(first.clone());
        self.lookup.insert(first, root);
        let mut prev = root;
        let mut count = 1usize;
        for t in items {
            let idx = self.arena.insert_into_block(t.clone(), prev, root);
            self.lookup.insert(t, idx);
            prev = idx;
            count += 1;
        }
        self.arena.set_size(root, count);
        self.subset_count += 1;
        Ok(())
    }

    /// Remove `t` from the partition, shrinking (or dissolving) its block.
    ///
    /// # Errors
    /// Never fails; returns `Ok(false)` if `t` was not present.
    pub fn remove(&mut self, t: &T) -> Result<bool, PartitionError> {
        let Some(&idx) = self.lookup.get(t) else {
            return Ok(false);
        };
        let root = self.arena.find(idx);
        if idx == root && self.arena.size(root) == 1 {
            self.arena.detach_root(root);
            self.arena.dispose_now(root);
            self.lookup.remove(t);
            self.subset_count -= 1;
            return Ok(true);
        } else if idx == root {
            let neighbour = self.arena.next_in_block(idx);
            self.arena.swap_elements(idx, neighbour);
            let moved = self.arena.element(idx).clone();
            self.lookup.insert(moved, idx);
            self.arena.set_size(root, self.arena.size(root) - 1);
            self.arena.unlink_block(neighbour);
            self.arena.dispose_now(neighbour);
        } else {
            self.arena.set_size(root, self.arena.size(root) - 1);
            self.arena.unlink_block(idx);
            self.arena.dispose_now(idx);
        }
        self.lookup.remove(t);
        Ok(true)
    }

    /// Remove the entire block containing `t`.
    ///
    /// # Errors
    /// Never fails; returns `Ok(false)` if `t` was not present.
    pub fn remove_subset(&mut self, t: &T) -> Result<bool, PartitionError> {
        let Some(&idx) = self.lookup.get(t) else {
            return Ok(false);
        };
        let root = self.arena.find(idx);
        let members: Vec<usize> = self.arena.block_members(root).collect();
        for &m in &members {
            let value = self.arena.element(m).clone();
            self.lookup.remove(&value);
        }
        self.arena.detach_root(root);
        self.arena.free_all(members);
        self.subset_count -= 1;
        Ok(true)
    }

    /// Merge the blocks containing `x` and `y`.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if either argument is absent.
    pub fn union(&mut self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let xi = self.resolve(x)?;
        let yi = self.resolve(y)?;
        let mut rx = self.arena.find(xi);
        let mut ry = self.arena.find(yi);
        if rx == ry {
            return Ok(false);
        }
        let sx = self.arena.size(rx);
        let sy = self.arena.size(ry);
        if sx < sy {
            std::mem::swap(&mut rx, &mut ry);
        }
        self.arena.attach(ry, rx);
        self.arena.set_size(rx, sx + sy);
        self.arena.splice_block_cycles(rx, ry);
        self.arena.detach_root(ry);
        self.subset_count -= 1;
        Ok(true)
    }

    /// Isolate `t` into a brand-new singleton block.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if `t` is absent.
    pub fn split(&mut self, t: &T) -> Result<bool, PartitionError> {
        let idx = self.resolve(t)?;
        let root = self.arena.find(idx);
        if idx == root && self.arena.size(root) == 1 {
            return Ok(false);
        }
        if idx == root {
            let neighbour = self.arena.next_in_block(idx);
            self.arena.swap_elements(idx, neighbour);
            let moved = self.arena.element(idx).clone();
            self.lookup.insert(moved, idx);
            self.arena.set_size(root, self.arena.size(root) - 1);
            self.arena.unlink_block(neighbour);
            self.arena.dispose_now(neighbour);
        } else {
            self.arena.set_size(root, self.arena.size(root) - 1);
            self.arena.unlink_block(idx);
            self.arena.dispose_now(idx);
        }
        let new_idx = self.arena.insert_root(t.clone());
        self.lookup.insert(t.clone(), new_idx);
        self.subset_count += 1;
        Ok(true)
    }

    /// Move `x` into the block containing `y`. Equivalent to
    /// `split(x)` followed by `union(x, y)`.
    ///
    /// # Errors
    /// Returns [`PartitionError::NotFound`] if either argument is absent.
    pub fn move_to(&mut self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let xi = self.resolve(x)?;
        let yi = self.resolve(y)?;
        if self.arena.find(xi) == self.arena.find(yi) {
            return Ok(false);
        }
        self.split(x)?;
        self.union(x, y)?;
        Ok(true)
    }

    /// Remove every element, returning the partition to its empty state.
    pub fn clear(&mut self) {
        self.arena = Arena::new();
        self.lookup.clear();
        self.subset_count = 0;
    }
}

impl<T: Eq + Hash + Clone> Partition<T> for UnionFindPartition<T> {
    fn size(&self) -> usize { self.lookup.len() }

    fn subset_count(&self) -> usize { self.subset_count }

    fn contains(&self, t: &T) -> bool { self.lookup.contains_key(t) }

    fn elements(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.lookup.keys().cloned())
    }

    fn subsets(&self) -> Box<dyn Iterator<Item = hashbrown::HashSet<T>> + '_> {
        Box::new(self.arena.roots().map(|r| self.collect_block(r)))
    }

    fn subset(&self, t: &T) -> Result<hashbrown::HashSet<T>, PartitionError> {
        let idx = self.resolve(t)?;
        Ok(self.collect_block(self.arena.find(idx)))
    }

    fn connected(&self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let xi = self.resolve(x)?;
        let yi = self.resolve(y)?;
        Ok(self.arena.find(xi) == self.arena.find(yi))
    }

    fn add(&mut self, t: T) -> Result<bool, PartitionError> { Self::add(self, t) }

    fn add_subset(&mut self, s: Vec<T>) -> Result<(), PartitionError> { Self::add_subset(self, s) }

    fn remove(&mut self, t: &T) -> Result<bool, PartitionError> { Self::remove(self, t) }

    fn remove_subset(&mut self, t: &T) -> Result<bool, PartitionError> { Self::remove_subset(self, t) }

    fn union(&mut self, x: &T, y: &T) -> Result<bool, PartitionError> { Self::union(self, x, y) }

    fn split(&mut self, t: &T) -> Result<bool, PartitionError> { Self::split(self, t) }

    fn move_to(&mut self, x: &T, y: &T) -> Result<bool, PartitionError> { Self::move_to(self, x, y) }

    fn clear(&mut self) -> Result<(), PartitionError> {
        Self::clear(self);
        Ok(())
    }
}

impl<T: Eq + Hash + Clone> PartialEq for UnionFindPartition<T> {
    /// Two partitions are equal iff they agree on every block, regardless
    /// of internal layout or iteration order (P3).
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.subset_count() != other.subset_count() {
            return false;
        }
        self.subsets().all(|block| {
            let Some(rep) = block.iter().next() else { return false };
            other.subset(rep).map(|other_block| other_block == block).unwrap_or(false)
        })
    }
}

impl<T: Eq + Hash + Clone> Eq for UnionFindPartition<T> {}

impl<T: Eq + Hash + Clone> Hash for UnionFindPartition<T> {
    /// Order-independent combination of per-block, per-element hashes (the
    /// same sum-of-hashcodes idiom `java.util.AbstractSet` uses), so that
    /// two partitions equal under [`PartialEq`] hash identically regardless
    /// of block/element iteration order.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut total: u64 = 0;
        for block in self.subsets() {
            let mut block_hash: u64 = 0;
            for t in &block {
                let mut h = std::collections::hash_map::DefaultHasher::new();
                t.hash(&mut h);
                block_hash = block_hash.wrapping_add(h.finish());
            }
            total = total.wrapping_add(block_hash);
        }
        state.write_u64(total);
    }
}
