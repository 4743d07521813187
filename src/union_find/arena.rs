//! Slab storage for union-find items, generalized from the teacher's
//! `Vec`-backed forest (`vec_forest::VecForestSet`) to support deletion.
//!
//! The teacher's forest is append-only: nodes are identified by their index
//! in a `Vec<Node>` and that index is valid forever. A disjoint-set
//! partition that supports `remove`/`split`/`move_to` needs slots to come
//! back, so this module adds a free-list and turns each node into an
//! [`Item`] that also threads two intrusive cyclic doubly-linked lists (one
//! per block, one over all block roots) the way the contract's "O(1) time to
//! get the next element of a subset" requirement demands.
//!
//! Deletion never relocates a live item's position in the forest. Instead,
//! `remove`/`split` swap the *value* of the item being evicted with a block
//! cycle neighbour (so the root slot, which every other item's path may
//! still reference, never goes vacant), unlink the now-relabelled neighbour
//! from the block cycle, and mark it `disposed`. A disposed item is kept
//! around as an internal forest waypoint for however many of its former
//! children haven't yet been retargeted past it by path splitting; `find`
//! retargets a child past its immediate parent whenever a grandparent is
//! available, and each such retarget decrements the bypassed parent's
//! `child_count` and increments the grandparent's. Once a disposed item's
//! `child_count` reaches zero nothing references it any more, so its slot
//! goes back on the free-list; freeing a slot also counts as losing one
//! child of whatever that slot's own parent was, so freeing cascades up
//! through a chain of disposed waypoints that all bottom out in the same
//! reclaim. `find` therefore needs interior mutability (a `Cell` per
//! handle, plus a `RefCell`-guarded free-list) so it can run from `&self`
//! and still perform this bookkeeping.

use std::cell::{Cell, RefCell};

#[derive(Debug, Clone)]
struct Item<T> {
    element: T,
    parent: Cell<usize>,
    child_count: Cell<usize>,
    disposed: Cell<bool>,
    /// Meaningful only while `self` is a root (`parent == index`): live
    /// element count of the block rooted here.
    size: Cell<usize>,
    next_item: Cell<usize>,
    prev_item: Cell<usize>,
    next_root: Cell<usize>,
    prev_root: Cell<usize>,
}

/// A slab of [`Item`]s addressed by `usize` handle, with O(1) amortized
/// `find`, O(1) splice/unsplice of the intrusive block and root cycles, and
/// slot reuse once a disposed item's last referring child has been
/// retargeted past it.
#[derive(Debug, Default, Clone)]
pub(crate) struct Arena<T> {
    items: Vec<Item<T>>,
    free: RefCell<Vec<usize>>,
    any_root: Option<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self { items: Vec::new(), free: RefCell::new(Vec::new()), any_root: None }
    }

    fn fresh_slot(&mut self, element: T) -> usize {
        let item = Item {
            element,
            parent: Cell::new(0),
            child_count: Cell::new(0),
            disposed: Cell::new(false),
            size: Cell::new(1),
            next_item: Cell::new(0),
            prev_item: Cell::new(0),
            next_root: Cell::new(0),
            prev_root: Cell::new(0),
        };
        let idx = match self.free.get_mut().pop() {
            Some(idx) => {
                self.items[idx] = item;
                idx
            },
            None => {
                self.items.push(item);
                self.items.len() - 1
            },
        };
        let slot = &self.items[idx];
        slot.parent.set(idx);
        slot.next_item.set(idx);
        slot.prev_item.set(idx);
        slot.next_root.set(idx);
        slot.prev_root.set(idx);
        idx
    }

    /// Insert `element` as a brand-new singleton root, linked into the root
    /// cycle. Returns its handle.
    pub(crate) fn insert_root(&mut self, element: T) -> usize {
        let idx = self.fresh_slot(element);
        self.link_root(idx);
        idx
    }

    /// Insert `element` as a new non-root item, attached as a direct child
    /// of `root` and linked into the block cycle right after `sibling`
    /// (which must already be a live member of that block). Does not touch
    /// the root cycle or `root`'s size.
    pub(crate) fn insert_into_block(&mut self, element: T, sibling: usize, root: usize) -> usize {
        let idx = self.fresh_slot(element);
        self.attach(idx, root);
        self.link_after_in_block(sibling, idx);
        idx
    }

    fn link_root(&mut self, idx: usize) {
        match self.any_root {
            None => self.any_root = Some(idx),
            Some(r) => {
                let rp = self.items[r].prev_root.get();
                self.items[idx].next_root.set(r);
                self.items[idx].prev_root.set(rp);
                self.items[rp].next_root.set(idx);
                self.items[r].prev_root.set(idx);
            },
        }
    }

    /// Remove `idx` from the root cycle entirely. `idx` must currently be a
    /// root.
    pub(crate) fn detach_root(&mut self, idx: usize) {
        let p = self.items[idx].prev_root.get();
        let n = self.items[idx].next_root.get();
        if p == idx {
            self.any_root = None;
        } else {
            self.items[p].next_root.set(n);
            self.items[n].prev_root.set(p);
            if self.any_root == Some(idx) {
                self.any_root = Some(n);
            }
        }
    }

    /// Record that `parent` gained a direct child at `child`, retargeting
    /// `child`'s own parent pointer.
    pub(crate) fn attach(&mut self, child: usize, parent: usize) {
        self.items[child].parent.set(parent);
        let c = &self.items[parent].child_count;
        c.set(c.get() + 1);
    }

    pub(crate) fn link_after_in_block(&mut self, prev: usize, idx: usize) {
        let next = self.items[prev].next_item.get();
        self.items[prev].next_item.set(idx);
        self.items[idx].prev_item.set(prev);
        self.items[idx].next_item.set(next);
        self.items[next].prev_item.set(idx);
    }

    /// The next member of `idx`'s block cycle (never `idx` itself unless
    /// the block is a singleton).
    pub(crate) fn next_in_block(&self, idx: usize) -> usize { self.items[idx].next_item.get() }

    /// Remove `idx` from its block cycle, leaving it a singleton loop.
    pub(crate) fn unlink_block(&mut self, idx: usize) {
        let p = self.items[idx].prev_item.get();
        let n = self.items[idx].next_item.get();
        if p != idx {
            self.items[p].next_item.set(n);
            self.items[n].prev_item.set(p);
        }
        self.items[idx].next_item.set(idx);
        self.items[idx].prev_item.set(idx);
    }

    /// Splice the block cycle containing `a` together with the one
    /// containing `b` (both taken as representative members, not
    /// necessarily roots).
    pub(crate) fn splice_block_cycles(&mut self, a: usize, b: usize) {
        let an = self.items[a].next_item.get();
        let bn = self.items[b].next_item.get();
        self.items[a].next_item.set(bn);
        self.items[bn].prev_item.set(a);
        self.items[b].next_item.set(an);
        self.items[an].prev_item.set(b);
    }

    /// Swap the element values stored in two slots, leaving every
    /// structural field (parent, cycle links, size, child count) in place.
    pub(crate) fn swap_elements(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.items.split_at_mut(hi);
        std::mem::swap(&mut left[lo].element, &mut right[0].element);
    }

    fn dec_child(&self, idx: usize) {
        let item = &self.items[idx];
        let c = item.child_count.get() - 1;
        item.child_count.set(c);
        if c == 0 && item.disposed.get() {
            self.release(idx);
        }
    }

    /// Free `idx`'s slot and propagate the loss of this child up to
    /// `idx`'s own parent, cascading further if that parent is itself a
    /// disposed waypoint left with no remaining children.
    fn release(&self, idx: usize) {
        self.free.borrow_mut().push(idx);
        let parent = self.items[idx].parent.get();
        if parent != idx {
            self.dec_child(parent);
        }
    }

    fn inc_child(&self, idx: usize) { self.items[idx].child_count.set(self.items[idx].child_count.get() + 1); }

    /// Resolve `idx`'s block root, path-splitting along the way and
    /// cascading frees for any disposed waypoint whose last referring
    /// child is retargeted past it. Callable through a shared reference:
    /// only `Cell`/`RefCell` fields are touched.
    pub(crate) fn find(&self, mut x: usize) -> usize {
        while self.items[x].parent.get() != x {
            let p = self.items[x].parent.get();
            let gp = self.items[p].parent.get();
            if gp != p {
                self.items[x].parent.set(gp);
                self.dec_child(p);
                self.inc_child(gp);
            }
            x = p;
        }
        debug_assert!(self.items[x].parent.get() == x);
        x
    }

    pub(crate) fn size(&self, root: usize) -> usize { self.items[root].size.get() }

    pub(crate) fn set_size(&mut self, root: usize, size: usize) { self.items[root].size.set(size); }

    pub(crate) fn element(&self, idx: usize) -> &T { &self.items[idx].element }

    /// Mark `idx` as no longer holding a live element and free its slot
    /// immediately if nothing still points to it as a parent. `idx` must
    /// already be detached from the block cycle (and, if it was a root,
    /// from the root cycle) and unreferenced by the owning lookup table.
    pub(crate) fn dispose_now(&mut self, idx: usize) {
        self.items[idx].disposed.set(true);
        if self.items[idx].child_count.get() == 0 {
            self.release(idx);
        }
    }

    /// Free every live slot in an iterator, used when an entire block is
    /// torn down at once (`remove_subset`). Each slot's release also
    /// decrements whatever it counted as a child of, cascading into any
    /// disposed waypoint of this same block that was still lingering
    /// because its last live descendant hadn't been freed yet; no slot in
    /// the iterator can be referenced from outside the block.
    pub(crate) fn free_all(&mut self, slots: impl IntoIterator<Item = usize>) {
        for idx in slots {
            self.release(idx);
        }
    }

    /// Iterate the block cycle starting at (and including) `start`, in
    /// O(1) amortized time per element.
    pub(crate) fn block_members(&self, start: usize) -> BlockMembers<'_, T> {
        BlockMembers { arena: self, start, next: Some(start) }
    }

    /// Iterate every root currently linked into the root cycle.
    pub(crate) fn roots(&self) -> Roots<'_, T> {
        Roots { arena: self, start: self.any_root, next: self.any_root }
    }
}

pub(crate) struct BlockMembers<'a, T> {
    arena: &'a Arena<T>,
    start: usize,
    next: Option<usize>,
}

impl<T> Iterator for BlockMembers<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let cur = self.next?;
        let succ = self.arena.items[cur].next_item.get();
        self.next = if succ == self.start { None } else { Some(succ) };
        Some(cur)
    }
}

pub(crate) struct Roots<'a, T> {
    arena: &'a Arena<T>,
    start: Option<usize>,
    next: Option<usize>,
}

impl<T> Iterator for Roots<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let cur = self.next?;
        let succ = self.arena.items[cur].next_root.get();
        self.next = if Some(succ) == self.start { None } else { Some(succ) };
        Some(cur)
    }
}
