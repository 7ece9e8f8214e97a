//! Ordered set backed by a probabilistic skip list.
//!
//! Keys live in "towers": vertical stacks of nodes, one node per level from
//! 1 up to the tower's randomly drawn height. The nodes of all towers at a
//! given level form a horizontal sorted list, so higher levels hold sparser
//! and sparser subsequences of the key set and searches can skip most of
//! the bottom chain.
//!
//! ```text
//! Level 3: SENT ------------------> 5 ----------> NULL
//! Level 2: SENT ------> 2 --------> 5 ----------> NULL
//! Level 1: SENT -> 1 -> 2 -> 3 -> 4 -> 5 -> 9 --> NULL
//! ```
//!
//! A key-less sentinel tower marks the start of every level and is grown so
//! it always stands strictly taller than every real tower, which guarantees
//! insertion can find a left neighbor at any level it needs to splice into.
//!
//! # Structure
//!
//! Nodes and towers live in `Vec` arenas addressed by `u32` ids, with
//! neighbor links (`left`, `right`, `up`, `down`) stored as ids rather than
//! references. The tower arena owns the keys; everything else is a
//! non-owning id, so the cyclic link graph never turns into an ownership
//! cycle. Freed slots go on free lists and are reused.
//!
//! # Operations
//!
//! - `insert(key)`: expected O(log n) - rejects duplicates
//! - `remove(&key)`: expected O(log n)
//! - `contains(&key)`: expected O(log n)
//! - `min()` / `max()`: O(1) / expected O(log n)
//! - `iter()` / `range(&from, &to)`: lazy ascending walks of level 1
//!
//! Single-threaded by design: there is no internal locking, and callers
//! wanting cross-thread access must wrap the set themselves.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::height::LevelGenerator;
use crate::height::MAX_HEIGHT;

/// Node index type. u32 saves space vs usize on 64-bit.
type NodeId = u32;

/// Tower index type.
type TowerId = u32;

/// Null index marker.
const NIL: u32 = u32::MAX;

/// The sentinel tower always occupies slot 0.
const SENTINEL: TowerId = 0;

/// Error returned by [`SkipListSet::min`] and [`SkipListSet::max`] on an
/// empty set. Distinct from "key not found" so callers can tell an empty
/// structure apart from an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("set is empty")]
pub struct EmptyError;

/// One (key, level) record. The key lives in the owning tower; a node only
/// carries its level and neighbor links.
///
/// `down` is NIL exactly at level 1 and `up` is NIL exactly at the tower
/// top; `left`/`right` only ever reference nodes on the same level.
struct Node {
    tower: TowerId,
    /// 1-based level within the tower.
    level: u32,
    left: NodeId,
    right: NodeId,
    up: NodeId,
    down: NodeId,
}

/// The vertical stack of nodes for one key, spanning levels `1..=height`.
struct Tower<K> {
    /// `None` only for the sentinel and for freed slots.
    key: Option<K>,
    height: u32,
    bottom: NodeId,
    top: NodeId,
}

/// An ordered set with expected O(log n) insert, remove, and lookup.
///
/// Duplicate keys are rejected, not replaced. Iteration is always
/// ascending.
pub struct SkipListSet<K: Ord> {
    nodes: Vec<Node>,
    node_free: Vec<NodeId>,
    towers: Vec<Tower<K>>,
    tower_free: Vec<TowerId>,
    len: usize,
    /// Sentinel height. Strictly greater than every real tower's height
    /// whenever the set is non-empty.
    max_height: u32,
    levels: LevelGenerator,
}

impl<K: Ord> SkipListSet<K> {
    /// Create an empty set.
    pub fn new() -> SkipListSet<K> {
        return SkipListSet::with_generator(LevelGenerator::new(MAX_HEIGHT as u32 - 1));
    }

    /// Create an empty set whose height draws are seeded, so the internal
    /// level structure is reproducible across runs.
    pub fn with_seed(seed: u64) -> SkipListSet<K> {
        return SkipListSet::with_generator(LevelGenerator::with_seed(MAX_HEIGHT as u32 - 1, seed));
    }

    fn with_generator(levels: LevelGenerator) -> SkipListSet<K> {
        let mut set = SkipListSet {
            nodes: Vec::new(),
            node_free: Vec::new(),
            towers: Vec::new(),
            tower_free: Vec::new(),
            len: 0,
            max_height: 1,
            levels,
        };
        let sentinel = set.new_tower(None);
        debug_assert_eq!(sentinel, SENTINEL);
        set.grow_tower(sentinel);
        return set;
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Current overall height (the sentinel tower's height). Exposed for
    /// structural inspection; one more than the tallest real tower when the
    /// set is non-empty, 1 when it is empty.
    pub fn height(&self) -> u32 {
        return self.max_height;
    }

    // --- Arena access helpers ---

    fn node(&self, id: NodeId) -> &Node {
        return &self.nodes[id as usize];
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        return &mut self.nodes[id as usize];
    }

    fn tower(&self, id: TowerId) -> &Tower<K> {
        return &self.towers[id as usize];
    }

    fn tower_mut(&mut self, id: TowerId) -> &mut Tower<K> {
        return &mut self.towers[id as usize];
    }

    /// The key stored in a node's tower. `None` for sentinel nodes, which
    /// compare as less than every key.
    fn key_of(&self, node: NodeId) -> Option<&K> {
        return self.tower(self.node(node).tower).key.as_ref();
    }

    fn sentinel_bottom(&self) -> NodeId {
        return self.tower(SENTINEL).bottom;
    }

    fn alloc_node(&mut self, tower: TowerId, level: u32) -> NodeId {
        let node = Node {
            tower,
            level,
            left: NIL,
            right: NIL,
            up: NIL,
            down: NIL,
        };
        if let Some(id) = self.node_free.pop() {
            self.nodes[id as usize] = node;
            return id;
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        return id;
    }

    fn free_node(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        node.left = NIL;
        node.right = NIL;
        node.up = NIL;
        node.down = NIL;
        self.node_free.push(id);
    }

    fn new_tower(&mut self, key: Option<K>) -> TowerId {
        let tower = Tower {
            key,
            height: 0,
            bottom: NIL,
            top: NIL,
        };
        if let Some(id) = self.tower_free.pop() {
            self.towers[id as usize] = tower;
            return id;
        }
        let id = self.towers.len() as TowerId;
        self.towers.push(tower);
        return id;
    }

    fn free_tower(&mut self, id: TowerId) {
        let tower = self.tower_mut(id);
        tower.key = None;
        tower.height = 0;
        tower.bottom = NIL;
        tower.top = NIL;
        self.tower_free.push(id);
    }

    // --- Tower plumbing ---

    /// Stack one more node on top of a tower.
    fn grow_tower(&mut self, tower: TowerId) {
        let level = self.tower(tower).height + 1;
        let node = self.alloc_node(tower, level);
        let old_top = self.tower(tower).top;
        if old_top != NIL {
            self.node_mut(old_top).up = node;
            self.node_mut(node).down = old_top;
        }
        let t = self.tower_mut(tower);
        if t.bottom == NIL {
            t.bottom = node;
        }
        t.top = node;
        t.height = level;
    }

    /// Build a complete tower of the given height for a key.
    fn build_tower(&mut self, key: K, height: u32) -> TowerId {
        let tower = self.new_tower(Some(key));
        for _ in 0..height {
            self.grow_tower(tower);
        }
        return tower;
    }

    /// The node of a tower at a given level. The caller guarantees
    /// `1 <= level <= height`.
    fn node_at(&self, tower: TowerId, level: u32) -> NodeId {
        let mut walker = self.tower(tower).bottom;
        for _ in 1..level {
            walker = self.node(walker).up;
        }
        return walker;
    }

    /// Splice `tower` into the horizontal lists immediately to the right of
    /// `left_tower`, starting at `from_level` and continuing upward for
    /// every level the two towers share.
    fn connect_from(&mut self, left_tower: TowerId, tower: TowerId, from_level: u32) {
        let mut left = self.tower(left_tower).bottom;
        let mut right = self.tower(tower).bottom;
        while left != NIL && right != NIL && self.node(right).level < from_level {
            left = self.node(left).up;
            right = self.node(right).up;
        }
        while left != NIL && right != NIL {
            let old_right = self.node(left).right;
            self.node_mut(right).right = old_right;
            if old_right != NIL {
                self.node_mut(old_right).left = right;
            }
            self.node_mut(left).right = right;
            self.node_mut(right).left = left;
            left = self.node(left).up;
            right = self.node(right).up;
        }
    }

    // --- Search ---

    /// Bottommost node holding the greatest key <= `target`, or the
    /// sentinel's bottom node when every key exceeds the target (including
    /// the empty set).
    ///
    /// Starts at the sentinel's top and repeatedly drops a level, then
    /// slides right while the next key still fits. Each level is expected
    /// to carry about half the density of the one below, so the walk makes
    /// expected O(log n) comparisons.
    fn search(&self, target: &K) -> NodeId {
        let mut walker = self.tower(SENTINEL).top;
        while self.node(walker).down != NIL {
            walker = self.node(walker).down;
            loop {
                let right = self.node(walker).right;
                if right == NIL {
                    break;
                }
                match self.key_of(right) {
                    Some(key) if key <= target => walker = right,
                    _ => break,
                }
            }
        }
        return walker;
    }

    // --- Set operations ---

    /// Insert a key. Returns `true` if the key was newly added, `false` if
    /// it was already present (the set is unchanged in that case).
    pub fn insert(&mut self, key: K) -> bool {
        let height = self.levels.random();

        // Keep the sentinel strictly taller than every real tower, so any
        // later splice can always find a left neighbor at any level.
        if height >= self.max_height {
            self.max_height = height + 1;
            while self.tower(SENTINEL).height < self.max_height {
                self.grow_tower(SENTINEL);
            }
        }

        if self.len == 0 {
            let tower = self.build_tower(key, height);
            self.connect_from(SENTINEL, tower, 1);
        } else {
            let found = self.search(&key);
            debug_assert_eq!(
                self.node(found).down,
                NIL,
                "search must land on a tower bottom"
            );
            if self.key_of(found) == Some(&key) {
                return false;
            }

            let tower = self.build_tower(key, height);
            let mut left = self.node(found).tower;
            self.connect_from(left, tower, 1);

            // The level-1 predecessor may be shorter than the new tower.
            // Walk left along the predecessor's top level to the nearest
            // tower that also exists one level up (the sentinel always
            // does), and keep splicing from there.
            while self.tower(tower).height > self.tower(left).height {
                let prev_height = self.tower(left).height;
                let mut walker = self.tower(left).top;
                while self.node(walker).up == NIL {
                    walker = self.node(walker).left;
                }
                left = self.node(walker).tower;
                self.connect_from(left, tower, prev_height + 1);
            }
        }

        self.len += 1;
        self.check_invariants();
        return true;
    }

    /// Remove a key. Returns `true` if the key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let found = self.search(key);
        if self.key_of(found) != Some(key) {
            return false;
        }
        let tower = self.node(found).tower;

        // Collect the vertical chain first; unlinking edits the nodes.
        let mut chain: SmallVec<[NodeId; MAX_HEIGHT]> = SmallVec::new();
        let mut walker = self.tower(tower).bottom;
        while walker != NIL {
            chain.push(walker);
            walker = self.node(walker).up;
        }

        for &id in &chain {
            let left = self.node(id).left;
            let right = self.node(id).right;
            // The sentinel exists at every level, so `left` is never NIL.
            self.node_mut(left).right = right;
            if right != NIL {
                self.node_mut(right).left = left;
            }
            self.free_node(id);
        }
        self.free_tower(tower);
        self.len -= 1;

        self.shrink_sentinel();
        self.check_invariants();
        return true;
    }

    /// Drop empty sentinel levels. The top level is empty of real nodes by
    /// construction; while the level below it is empty too, the top level
    /// carries no information and can go. A fully drained set returns to
    /// height 1, indistinguishable from a fresh one.
    fn shrink_sentinel(&mut self) {
        while self.max_height > 1 {
            let top = self.tower(SENTINEL).top;
            debug_assert_eq!(self.node(top).right, NIL);
            let below = self.node(top).down;
            if self.node(below).right != NIL {
                break;
            }
            self.node_mut(below).up = NIL;
            self.free_node(top);
            let sentinel = self.tower_mut(SENTINEL);
            sentinel.top = below;
            sentinel.height -= 1;
            self.max_height -= 1;
        }
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &K) -> bool {
        return self.key_of(self.search(key)) == Some(key);
    }

    /// The smallest key, or [`EmptyError`] on an empty set.
    pub fn min(&self) -> Result<&K, EmptyError> {
        let first = self.node(self.sentinel_bottom()).right;
        if first == NIL {
            return Err(EmptyError);
        }
        return self.key_of(first).ok_or(EmptyError);
    }

    /// The largest key, or [`EmptyError`] on an empty set.
    ///
    /// Walks right as far as possible at each level before dropping down,
    /// so this is expected O(log n) rather than a full bottom-level scan.
    pub fn max(&self) -> Result<&K, EmptyError> {
        let mut walker = self.tower(SENTINEL).top;
        loop {
            while self.node(walker).right != NIL {
                walker = self.node(walker).right;
            }
            let down = self.node(walker).down;
            if down == NIL {
                break;
            }
            walker = down;
        }
        // On an empty set the walk ends on the sentinel itself.
        return self.key_of(walker).ok_or(EmptyError);
    }

    /// Ascending iterator over all keys. Lazy and restartable: each call
    /// starts a fresh walk of the bottom level.
    pub fn iter(&self) -> Iter<'_, K> {
        return Iter {
            set: self,
            cur: self.node(self.sentinel_bottom()).right,
        };
    }

    /// Ascending iterator over the half-open key range `[from, to)`.
    ///
    /// `from` is inclusive, `to` exclusive, matching `std` range
    /// conventions. A `from` greater than `to` yields nothing.
    pub fn range<'a>(&'a self, from: &K, to: &'a K) -> Range<'a, K> {
        let found = self.search(from);
        let start = match self.key_of(found) {
            Some(key) if key >= from => found,
            _ => self.node(found).right,
        };
        return Range {
            set: self,
            cur: start,
            to,
        };
    }

    /// The keys present on one horizontal level, ascending. Level 1 is the
    /// full key set; each higher level is a subset of the one below.
    /// Intended for structural inspection and tests.
    pub fn keys_at_level(&self, level: u32) -> Iter<'_, K> {
        let cur = if level >= 1 && level <= self.tower(SENTINEL).height {
            self.node(self.node_at(SENTINEL, level)).right
        } else {
            NIL
        };
        return Iter { set: self, cur };
    }

    /// Remove every key, resetting to the freshly created state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_free.clear();
        self.towers.clear();
        self.tower_free.clear();
        self.len = 0;
        self.max_height = 1;
        let sentinel = self.new_tower(None);
        debug_assert_eq!(sentinel, SENTINEL);
        self.grow_tower(sentinel);
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        let keys: Vec<&K> = self.iter().collect();
        assert_eq!(
            keys.len(),
            self.len,
            "INVARIANT VIOLATED: level-1 chain holds {} keys, len is {}",
            keys.len(),
            self.len
        );
        for pair in keys.windows(2) {
            assert!(
                pair[0] < pair[1],
                "INVARIANT VIOLATED: level-1 chain not strictly ascending"
            );
        }

        assert_eq!(
            self.tower(SENTINEL).height,
            self.max_height,
            "INVARIANT VIOLATED: sentinel height out of sync with max height"
        );
        assert_eq!(
            self.node(self.tower(SENTINEL).top).right,
            NIL,
            "INVARIANT VIOLATED: top sentinel level must be empty"
        );

        // Tower monotonicity: every key on level L appears on level L - 1.
        // Both chains are sorted, so a single merge-style pass suffices.
        for level in 2..=self.max_height {
            let mut lower = self.keys_at_level(level - 1);
            for key in self.keys_at_level(level) {
                assert!(
                    lower.any(|below| below == key),
                    "INVARIANT VIOLATED: key on level {} missing one level down",
                    level
                );
            }
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<K: Ord> Default for SkipListSet<K> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: Ord> Extend<K> for SkipListSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for SkipListSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = SkipListSet::new();
        set.extend(iter);
        return set;
    }
}

impl<'a, K: Ord> IntoIterator for &'a SkipListSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        return self.iter();
    }
}

/// One row per key, ascending, with a `#` per level of its tower:
///
/// ```text
/// SkipListSet(len=3, height=3)
/// 1 #
/// 2 ##
/// 5 #
/// ```
impl<K: Ord + fmt::Debug> fmt::Debug for SkipListSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SkipListSet(len={}, height={})", self.len, self.max_height)?;
        let mut cur = self.node(self.sentinel_bottom()).right;
        while cur != NIL {
            let height = self.tower(self.node(cur).tower).height as usize;
            if let Some(key) = self.key_of(cur) {
                writeln!(f, "{:?} {}", key, "#".repeat(height))?;
            }
            cur = self.node(cur).right;
        }
        return Ok(());
    }
}

/// Ascending walk along one horizontal level.
pub struct Iter<'a, K: Ord> {
    set: &'a SkipListSet<K>,
    cur: NodeId,
}

impl<'a, K: Ord> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.cur == NIL {
            return None;
        }
        let key = self.set.key_of(self.cur)?;
        self.cur = self.set.node(self.cur).right;
        return Some(key);
    }
}

/// Ascending walk over `[from, to)`, stopping at the first key >= `to`.
pub struct Range<'a, K: Ord> {
    set: &'a SkipListSet<K>,
    cur: NodeId,
    to: &'a K,
}

impl<'a, K: Ord> Iterator for Range<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.cur == NIL {
            return None;
        }
        let key = self.set.key_of(self.cur)?;
        if key >= self.to {
            self.cur = NIL;
            return None;
        }
        self.cur = self.set.node(self.cur).right;
        return Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set() {
        let set: SkipListSet<i32> = SkipListSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.height(), 1);
        assert!(!set.contains(&7));
        assert_eq!(set.min(), Err(EmptyError));
        assert_eq!(set.max(), Err(EmptyError));
        assert_eq!(set.iter().next(), None);
    }

    #[test]
    fn remove_on_empty_returns_false() {
        let mut set: SkipListSet<i32> = SkipListSet::new();
        assert!(!set.remove(&7));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn insert_yields_sorted_iteration() {
        let mut set = SkipListSet::with_seed(1);
        for key in [1, 2, 5, 3, 4] {
            assert!(set.insert(key));
        }
        assert_eq!(set.len(), 5);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(set.contains(&3));
        assert!(!set.contains(&6));
        assert_eq!(set.min(), Ok(&1));
        assert_eq!(set.max(), Ok(&5));
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut set = SkipListSet::with_seed(2);
        assert!(set.insert(10));
        assert!(!set.insert(10));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn remove_present_and_absent() {
        let mut set = SkipListSet::with_seed(3);
        set.extend([5, 1, 9]);

        assert!(!set.remove(&4));
        assert_eq!(set.len(), 3);

        assert!(set.remove(&5));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&5));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 9]);

        assert!(!set.remove(&5));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_min_and_max() {
        let mut set = SkipListSet::with_seed(4);
        set.extend([3, 1, 4, 1, 5, 9, 2, 6]);
        assert_eq!(set.len(), 7);

        assert!(set.remove(&1));
        assert_eq!(set.min(), Ok(&2));
        assert!(set.remove(&9));
        assert_eq!(set.max(), Ok(&6));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn round_trip_leaves_a_fresh_set() {
        let mut set = SkipListSet::with_seed(5);
        let keys: Vec<u32> = (0..200).map(|i| (i * 37) % 1000).collect();
        for &key in &keys {
            set.insert(key);
        }
        assert_eq!(set.len(), 200);

        for &key in &keys {
            assert!(set.remove(&key));
        }
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.iter().next(), None);
        // Sentinel shrinks back down as levels empty out.
        assert_eq!(set.height(), 1);
    }

    #[test]
    fn range_is_half_open() {
        let mut set = SkipListSet::with_seed(6);
        set.extend([1, 2, 3, 4, 5, 8]);

        let collect = |from: i32, to: i32| -> Vec<i32> {
            return set.range(&from, &to).copied().collect();
        };
        assert_eq!(collect(2, 5), vec![2, 3, 4]);
        assert_eq!(collect(0, 2), vec![1]);
        assert_eq!(collect(5, 9), vec![5, 8]);
        assert_eq!(collect(6, 8), Vec::<i32>::new());
        assert_eq!(collect(3, 3), Vec::<i32>::new());
        assert_eq!(collect(5, 2), Vec::<i32>::new());
        assert_eq!(collect(-10, 100), vec![1, 2, 3, 4, 5, 8]);
    }

    #[test]
    fn level_keys_thin_out_upward() {
        let mut set = SkipListSet::with_seed(7);
        for i in 0..500 {
            set.insert(i);
        }

        assert_eq!(set.keys_at_level(1).count(), 500);
        for level in 2..=set.height() {
            let lower: Vec<&i32> = set.keys_at_level(level - 1).collect();
            let upper: Vec<&i32> = set.keys_at_level(level).collect();
            assert!(upper.len() <= lower.len());
            for key in &upper {
                assert!(lower.contains(key), "level {} key missing below", level);
            }
        }
        // Out-of-range levels are empty, not a panic.
        assert_eq!(set.keys_at_level(0).count(), 0);
        assert_eq!(set.keys_at_level(set.height() + 1).count(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut set = SkipListSet::with_seed(8);
        set.extend([4, 2, 7]);
        set.clear();

        assert_eq!(set.len(), 0);
        assert_eq!(set.height(), 1);
        assert_eq!(set.iter().next(), None);

        // Still usable afterwards.
        assert!(set.insert(3));
        assert_eq!(set.min(), Ok(&3));
    }

    #[test]
    fn from_iterator_dedups() {
        let set: SkipListSet<i32> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn into_iterator_for_reference() {
        let set: SkipListSet<i32> = [2, 1].into_iter().collect();
        let mut collected = Vec::new();
        for key in &set {
            collected.push(*key);
        }
        assert_eq!(collected, vec![1, 2]);
    }

    #[test]
    fn debug_render_one_row_per_key() {
        let mut set = SkipListSet::with_seed(9);
        set.extend([10, 30, 20]);

        let rendered = format!("{:?}", set);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("SkipListSet(len=3"));
        assert!(lines[1].starts_with("10 #"));
        assert!(lines[2].starts_with("20 #"));
        assert!(lines[3].starts_with("30 #"));
        // Marker count equals the tower height, at least one per key.
        for line in &lines[1..] {
            assert!(line.ends_with('#'));
        }
    }

    #[test]
    fn string_keys() {
        let mut set = SkipListSet::with_seed(10);
        set.extend(["pear".to_string(), "apple".to_string(), "fig".to_string()]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["apple", "fig", "pear"]
        );
        assert!(set.contains(&"fig".to_string()));
        assert!(set.remove(&"apple".to_string()));
        assert_eq!(set.min(), Ok(&"fig".to_string()));
    }

    #[test]
    fn stress_interleaved_inserts_and_removes() {
        let mut set = SkipListSet::with_seed(11);
        for i in 0..1000u32 {
            set.insert((i * 7919) % 10_000);
        }
        let expected = set.len();

        // Remove every other key via iteration order.
        let keys: Vec<u32> = set.iter().copied().collect();
        for (i, key) in keys.iter().enumerate() {
            if i % 2 == 0 {
                assert!(set.remove(key));
            }
        }
        assert_eq!(set.len(), expected - expected.div_ceil(2));

        let remaining: Vec<u32> = set.iter().copied().collect();
        let mut sorted = remaining.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(remaining, sorted);
        for key in &remaining {
            assert!(set.contains(key));
        }
    }

    #[test]
    fn seeded_sets_build_identical_structure() {
        let mut a = SkipListSet::with_seed(99);
        let mut b = SkipListSet::with_seed(99);
        for i in 0..100 {
            a.insert(i);
            b.insert(i);
        }
        assert_eq!(a.height(), b.height());
        for level in 1..=a.height() {
            let left: Vec<&i32> = a.keys_at_level(level).collect();
            let right: Vec<&i32> = b.keys_at_level(level).collect();
            assert_eq!(left, right, "level {} differs", level);
        }
    }

    #[test]
    fn empty_error_displays() {
        assert_eq!(EmptyError.to_string(), "set is empty");
    }
}
