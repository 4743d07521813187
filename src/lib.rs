//! Mutable and immutable partitions of a finite set of elements, backed by
//! a deletable disjoint-set structure, plus enumerators over restricted
//! growth strings (the canonical integer encoding of set partitions).

#![deny(
    clippy::disallowed_methods,
    clippy::suspicious,
    clippy::style,
    clippy::clone_on_ref_ptr,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod adapter;
pub mod error;
pub mod format;
pub mod immutable;
pub mod partition;
pub mod rgs;
pub mod union_find;

pub use error::{ParsePartitionError, PartitionError};
pub use format::{parse_partition, write_partition};
pub use immutable::ImmutablePartition;
pub use partition::Partition;
pub use union_find::UnionFindPartition;

#[cfg(any(test, feature = "proptest"))]
pub mod prop {
    //! `proptest` strategies for generating partitions and restricted
    //! growth strings, gated the same way the grounding crate gates its own
    //! `symbol`/`symbol_safe` char-range strategies.

    use hashbrown::HashSet;
    use proptest::prelude::*;

    use crate::union_find::UnionFindPartition;

    /// A restricted growth string of length `len` (`a[0] = 0`,
    /// `a[i] <= 1 + max(a[0..i])`), generated by building it up one prefix
    /// at a time so every candidate is valid by construction.
    pub fn rgs(len: usize) -> impl Strategy<Value = Vec<usize>> {
        if len == 0 {
            return Just(Vec::new()).boxed();
        }
        (1..len.max(1))
            .fold(Just(vec![0usize]).boxed(), |acc, _| {
                acc.prop_flat_map(|prefix: Vec<usize>| {
                    let bound = *prefix.iter().max().unwrap_or(&0) + 1;
                    (0..=bound).prop_map(move |next| {
                        let mut v = prefix.clone();
                        v.push(next);
                        v
                    })
                })
                .boxed()
            })
            .boxed()
    }

    /// A partition of `0..len` as a [`UnionFindPartition`], built by
    /// shuffling elements into a random number of subsets.
    pub fn union_find_partition(len: usize) -> impl Strategy<Value = UnionFindPartition<usize>> {
        prop::collection::vec(0..len.max(1), len).prop_map(move |assignment| {
            let mut blocks: Vec<HashSet<usize>> = Vec::new();
            for (elem, &bucket) in assignment.iter().enumerate().take(len) {
                let bucket = bucket % (elem + 1).max(1);
                if bucket >= blocks.len() {
                    blocks.push(HashSet::new());
                }
                blocks[bucket].insert(elem);
            }
            let mut p = UnionFindPartition::new();
            for block in blocks {
                if !block.is_empty() {
                    p.add_subset(block).expect("freshly built blocks are disjoint");
                }
            }
            p
        })
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;
    use proptest::prelude::*;

    use crate::{
        format::{parse_partition, write_partition},
        immutable::ImmutablePartition,
        partition::Partition,
        prop,
        union_find::UnionFindPartition,
    };

    fn canonical<T: Eq + std::hash::Hash + Clone + Ord>(p: &impl Partition<T>) -> Vec<Vec<T>> {
        let mut blocks: Vec<Vec<T>> = p
            .subsets()
            .map(|b| {
                let mut v: Vec<T> = b.into_iter().collect();
                v.sort();
                v
            })
            .collect();
        blocks.sort();
        blocks
    }

    proptest! {
        /// Invariant 2: `subsets` is pairwise-disjoint, non-empty, and covers
        /// every element exactly once.
        #[test]
        fn subsets_are_disjoint_and_cover_elements(p in prop::union_find_partition(8)) {
            let mut seen = HashSet::new();
            let mut total = 0usize;
            for block in p.subsets() {
                prop_assert!(!block.is_empty());
                for t in &block {
                    prop_assert!(seen.insert(*t));
                }
                total += block.len();
            }
            prop_assert_eq!(total, p.size());
            prop_assert_eq!(p.subsets().count(), p.subset_count());
            let elements: HashSet<usize> = p.elements().collect();
            prop_assert_eq!(elements, seen);
        }

        /// Invariant 3: `subset(t)` contains `t`, and every member of it is
        /// reported connected to `t`.
        #[test]
        fn subset_contains_self_and_agrees_with_connected(p in prop::union_find_partition(8)) {
            for t in p.elements() {
                let block = p.subset(&t).unwrap();
                prop_assert!(block.contains(&t));
                for u in &block {
                    prop_assert!(p.connected(&t, u).unwrap());
                }
            }
        }

        /// Invariant 5: snapshotting a `UnionFindPartition` into an
        /// `ImmutablePartition` preserves every block.
        #[test]
        fn immutable_snapshot_matches_source(p in prop::union_find_partition(8)) {
            let snapshot = ImmutablePartition::from_partition(&p).unwrap();
            prop_assert_eq!(canonical(&p), canonical(&snapshot));
        }

        /// Invariant 4: round-tripping through the canonical string format is
        /// the identity, up to block/element order.
        #[test]
        fn round_trip_through_canonical_format(p in prop::union_find_partition(8)) {
            let s = write_partition(&p, |t: &usize| t.to_string());
            let parsed: UnionFindPartition<usize> = parse_partition(
                &s,
                |tok: &str| tok.parse::<usize>(),
                |elements: &[usize], label: &dyn Fn(&usize) -> usize| {
                    let mut blocks: Vec<Vec<usize>> = Vec::new();
                    for t in elements {
                        let l = label(t);
                        if l >= blocks.len() {
                            blocks.resize(l + 1, Vec::new());
                        }
                        blocks[l].push(*t);
                    }
                    let mut out = UnionFindPartition::new();
                    for block in blocks {
                        if !block.is_empty() {
                            out.add_subset(block).expect("freshly grouped blocks are disjoint");
                        }
                    }
                    out
                },
            )
            .unwrap();
            prop_assert_eq!(canonical(&p), canonical(&parsed));
        }

        /// Invariant 7: `move_to(x, y)` matches `split(x); union(x, y)` when
        /// `x` and `y` start in different blocks, and is a no-op otherwise.
        #[test]
        fn move_to_matches_split_then_union(p in prop::union_find_partition(6)) {
            let elements: Vec<usize> = p.elements().collect();
            prop_assume!(elements.len() >= 2);
            let x = elements[0];
            let y = elements[1];

            let mut via_move = p.clone();
            let same_block_before = via_move.connected(&x, &y).unwrap();
            let moved = via_move.move_to(&x, &y).unwrap();

            if same_block_before {
                prop_assert!(!moved);
                prop_assert_eq!(canonical(&via_move), canonical(&p));
            } else {
                let mut via_split_union = p.clone();
                via_split_union.split(&x).unwrap();
                via_split_union.union(&x, &y).unwrap();
                prop_assert!(moved);
                prop_assert_eq!(canonical(&via_move), canonical(&via_split_union));
            }
        }

        /// Invariant 8: partition equality implies hash equality.
        #[test]
        fn equal_partitions_hash_equally(p in prop::union_find_partition(6)) {
            use std::hash::{Hash, Hasher};

            let a = ImmutablePartition::from_partition(&p).unwrap();
            let b = ImmutablePartition::new(a.subsets().map(|block| block.into_iter().collect::<Vec<_>>())).unwrap();
            prop_assert_eq!(&a, &b);

            let mut ha = std::collections::hash_map::DefaultHasher::new();
            let mut hb = std::collections::hash_map::DefaultHasher::new();
            a.hash(&mut ha);
            b.hash(&mut hb);
            prop_assert_eq!(ha.finish(), hb.finish());
        }
    }

    /// S5. `union(2,3); union(4,5)` over a freshly populated
    /// `UnionFindPartition` collapses to `{{1},{2,3},{4,5}}`.
    #[test]
    fn scenario_union_collapses_blocks() {
        let mut p = UnionFindPartition::new();
        for t in 1..=4u32 {
            p.add(t).unwrap();
        }
        p.add(5).unwrap();
        p.union(&2, &3).unwrap();
        p.union(&4, &5).unwrap();

        assert_eq!(p.subset_count(), 3);
        assert_eq!(canonical(&p), vec![vec![1], vec![2, 3], vec![4, 5]]);

        let mut via_add_subset = UnionFindPartition::new();
        via_add_subset.add_subset(vec![1]).unwrap();
        via_add_subset.add_subset(vec![2, 3]).unwrap();
        via_add_subset.add_subset(vec![4, 5]).unwrap();
        assert_eq!(canonical(&p), canonical(&via_add_subset));
    }

    /// S6. Removing any single element from a block of size >= 2 shrinks
    /// that block by exactly one, leaving the rest untouched.
    #[test]
    fn scenario_remove_shrinks_block() {
        let original: HashSet<u32> = [10, 20, 30].into_iter().collect();
        for &removed in &[10u32, 20, 30] {
            let mut p = UnionFindPartition::new();
            p.add_subset(original.iter().copied().collect::<Vec<_>>()).unwrap();

            let removed_ok = p.remove(&removed).unwrap();
            assert!(removed_ok);
            assert!(!p.contains(&removed));

            let mut remaining: Vec<u32> = original.iter().copied().filter(|&v| v != removed).collect();
            remaining.sort_unstable();
            let rep = remaining[0];
            let block = p.subset(&rep).unwrap();
            assert_eq!(block.len(), original.len() - 1);
            assert_eq!(block, remaining.into_iter().collect::<HashSet<_>>());
            for v in block {
                assert!(p.contains(&v));
            }
        }
    }
}
