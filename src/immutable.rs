//! A fixed, immutable partition snapshot (C3)

use std::{
    hash::{Hash, Hasher},
    rc::Rc,
};

use hashbrown::{HashMap, HashSet};

use crate::{error::PartitionError, partition::Partition};

/// An immutable partition of a fixed element set.
///
/// Blocks are stored as `Rc<HashSet<T>>` so that two elements in the same
/// block share one allocation and `subset`/`subsets` can hand out clones of
/// the `Rc` rather than re-collecting a fresh `HashSet` on every call,
/// unlike [`UnionFindPartition`](crate::union_find::UnionFindPartition),
/// where blocks are a live view over mutable state and therefore must be
/// materialized freshly each time. Block identity (which `Rc` two equal
/// elements resolve to) never changes after construction, matching I3's
/// "identical until the partition itself is dropped" invariant.
///
/// Deliberately `!Send + !Sync`: this crate's contract is defined for
/// single-threaded use (see the crate-level concurrency note), and `Rc`
/// rather than `Arc` keeps that non-negotiable instead of merely advisory.
#[derive(Debug, Clone)]
pub struct ImmutablePartition<T> {
    lookup: HashMap<T, Rc<HashSet<T>>>,
    blocks: Vec<Rc<HashSet<T>>>,
}

impl<T: Eq + Hash + Clone> ImmutablePartition<T> {
    /// Build an immutable partition from an arbitrary collection of blocks.
    ///
    /// # Errors
    /// Returns [`PartitionError::ArgInvalid`] if any block is empty or if
    /// any element appears in more than one block.
    pub fn new(
        blocks: impl IntoIterator<Item = impl IntoIterator<Item = T>>,
    ) -> Result<Self, PartitionError> {
        let mut lookup = HashMap::new();
        let mut rcs = Vec::new();
        for block in blocks {
            let set: HashSet<T> = block.into_iter().collect();
            if set.is_empty() {
                return Err(PartitionError::ArgInvalid("block must be non-empty"));
            }
            let rc = Rc::new(set);
            for t in rc.iter() {
                if lookup.insert(t.clone(), Rc::clone(&rc)).is_some() {
                    return Err(PartitionError::ArgInvalid(
                        "element appears in more than one block",
                    ));
                }
            }
            rcs.push(rc);
        }
        Ok(Self { lookup, blocks: rcs })
    }

    /// An immutable partition with no elements.
    #[must_use]
    pub fn empty() -> Self { Self { lookup: HashMap::new(), blocks: Vec::new() } }

    /// Snapshot every subset of `source` into a frozen partition.
    ///
    /// # Errors
    /// Never fails (a [`Partition`] is already internally consistent).
    pub fn from_partition(source: &impl Partition<T>) -> Result<Self, PartitionError> {
        Self::new(source.subsets().map(|block| block.into_iter().collect::<Vec<T>>()))
    }

    /// Group `elements` into blocks by an arbitrary label: two elements land
    /// in the same block iff `label` gives them the same value.
    ///
    /// # Errors
    /// Never fails for a well-formed `elements`/`label` pair.
    pub fn from_labels(
        elements: impl IntoIterator<Item = T>,
        label: impl Fn(&T) -> usize,
    ) -> Result<Self, PartitionError> {
        let mut by_label: HashMap<usize, Vec<T>> = HashMap::new();
        for t in elements {
            let l = label(&t);
            by_label.entry(l).or_default().push(t);
        }
        Self::new(by_label.into_values())
    }

    /// Parse the canonical string format (C7) directly into a frozen
    /// partition.
    ///
    /// # Errors
    /// See [`crate::format::parse_partition`].
    pub fn parse<E>(
        s: &str,
        deserialize: impl Fn(&str) -> Result<T, E>,
    ) -> Result<Self, crate::error::ParsePartitionError<E>> {
        crate::format::parse_partition(s, deserialize, |elements: &[T], label: &dyn Fn(&T) -> usize| {
            let mut blocks: Vec<Vec<T>> = Vec::new();
            for t in elements {
                let l = label(t);
                if l >= blocks.len() {
                    blocks.resize(l + 1, Vec::new());
                }
                blocks[l].push(t.clone());
            }
            Self::new(blocks).unwrap_or_else(|_| unreachable!())
        })
    }
}

impl<T> Default for ImmutablePartition<T> {
    fn default() -> Self { Self { lookup: HashMap::new(), blocks: Vec::new() } }
}

impl<T: Eq + Hash + Clone> Partition<T> for ImmutablePartition<T> {
    fn size(&self) -> usize { self.lookup.len() }

    fn subset_count(&self) -> usize { self.blocks.len() }

    fn contains(&self, t: &T) -> bool { self.lookup.contains_key(t) }

    fn elements(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.lookup.keys().cloned())
    }

    fn subsets(&self) -> Box<dyn Iterator<Item = HashSet<T>> + '_> {
        Box::new(self.blocks.iter().map(|rc| (**rc).clone()))
    }

    fn subset(&self, t: &T) -> Result<HashSet<T>, PartitionError> {
        self.lookup.get(t).map(|rc| (**rc).clone()).ok_or(PartitionError::NotFound)
    }

    fn connected(&self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let bx = self.lookup.get(x).ok_or(PartitionError::NotFound)?;
        let by = self.lookup.get(y).ok_or(PartitionError::NotFound)?;
        Ok(Rc::ptr_eq(bx, by))
    }

    fn add(&mut self, _t: T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }

    fn add_subset(&mut self, _s: Vec<T>) -> Result<(), PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }

    fn remove(&mut self, _t: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }

    fn remove_subset(&mut self, _t: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }

    fn union(&mut self, _x: &T, _y: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }

    fn split(&mut self, _t: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }

    fn move_to(&mut self, _x: &T, _y: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }

    fn clear(&mut self) -> Result<(), PartitionError> {
        Err(PartitionError::Unsupported("ImmutablePartition is frozen"))
    }
}

impl<T: Eq + Hash + Clone> PartialEq for ImmutablePartition<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.subset_count() != other.subset_count() {
            return false;
        }
        self.blocks.iter().all(|block| {
            let Some(rep) = block.iter().next() else { return false };
            other.lookup.get(rep).map(|other_block| other_block == block).unwrap_or(false)
        })
    }
}

impl<T: Eq + Hash + Clone> Eq for ImmutablePartition<T> {}

impl<T: Eq + Hash + Clone> Hash for ImmutablePartition<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut total: u64 = 0;
        for block in &self.blocks {
            let mut block_hash: u64 = 0;
            for t in block.iter() {
                let mut h = std::collections::hash_map::DefaultHasher::new();
                t.hash(&mut h);
                block_hash = block_hash.wrapping_add(h.finish());
            }
            total = total.wrapping_add(block_hash);
        }
        state.write_u64(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_block() {
        let err = ImmutablePartition::new(vec![vec![1, 2], vec![]]).unwrap_err();
        assert_eq!(err, PartitionError::ArgInvalid("block must be non-empty"));
    }

    #[test]
    fn rejects_shared_element() {
        let err = ImmutablePartition::new(vec![vec![1, 2], vec![2, 3]]).unwrap_err();
        assert_eq!(err, PartitionError::ArgInvalid("element appears in more than one block"));
    }

    #[test]
    fn connected_uses_block_identity() {
        let p = ImmutablePartition::new(vec![vec![1, 2], vec![3]]).unwrap();
        assert!(p.connected(&1, &2).unwrap());
        assert!(!p.connected(&1, &3).unwrap());
        assert_eq!(p.connected(&1, &9), Err(PartitionError::NotFound));
    }

    #[test]
    fn equality_ignores_block_order() {
        let a = ImmutablePartition::new(vec![vec![1, 2], vec![3]]).unwrap();
        let b = ImmutablePartition::new(vec![vec![3], vec![2, 1]]).unwrap();
        assert_eq!(a, b);
    }
}
