use std::fmt;
use std::iter::FusedIterator;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use slotmap::SlotMap;

use crate::interval::{Boundary, Interval};
use crate::node::{Node, NodeId};
use crate::query::{Relation, Search};

/// An interval tree over closed intervals, kept balanced as a red-black tree
/// and augmented with the largest high end-point of every subtree.
///
/// The tree is a multiset: equal intervals are stored once per insertion.
/// Insertion and removal take `O(log n)`; queries take `O(log n + m)` for
/// `m` visited candidates and return their results in ascending
/// `(low, high)` order.
///
/// ```
/// use rb_interval_tree::{Interval, IntervalTree};
///
/// let mut tree = IntervalTree::new();
/// tree.insert(Interval::new(20, 30).unwrap());
/// tree.insert(Interval::new(40, 60).unwrap());
/// tree.insert(Interval::new(40, 90).unwrap());
///
/// let query = Interval::new(50, 80).unwrap();
/// assert_eq!(tree.find_overlapping_intervals(&query).len(), 2);
/// assert_eq!(tree.count_intervals_contain_point(&25), 1);
/// ```
#[derive(Clone)]
pub struct IntervalTree<K, V = ()> {
    pub(crate) nodes: SlotMap<NodeId, Node<K, V>>,
    pub(crate) root: Option<NodeId>,
    len: usize,
}

impl<K, V> Default for IntervalTree<K, V> {
    fn default() -> IntervalTree<K, V> {
        IntervalTree {
            nodes: SlotMap::with_key(),
            root: None,
            len: 0,
        }
    }
}

impl<K, V> IntervalTree<K, V> {
    pub fn new() -> IntervalTree<K, V> {
        IntervalTree::default()
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        trace!("interval tree cleared");
    }

    /// Iterates over all stored intervals in ascending `(low, high)` order.
    /// Intervals with equal bounds come out in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_path(self.root);
        iter
    }
}

impl<K, V> IntervalTree<K, V>
where
    K: Ord + Copy,
{
    pub fn insert(&mut self, interval: Interval<K, V>) {
        self.insert_node(interval);
        self.len += 1;
        trace!("inserted interval, tree holds {} intervals", self.len);
    }

    /// Removes one interval equal to `interval` (same bounds and payload)
    /// and returns it. Among several equal intervals, the first one in
    /// iteration order goes.
    pub fn take(&mut self, interval: &Interval<K, V>) -> Option<Interval<K, V>>
    where
        V: PartialEq,
    {
        let Some(id) = self.find_node(interval) else {
            debug!("interval to remove not found among {} intervals", self.len);
            return None;
        };
        let removed = self.remove_node(id)?;
        self.len -= 1;
        trace!("removed interval, tree holds {} intervals", self.len);
        Some(removed)
    }

    /// Removes one interval equal to `interval`. Returns `false`, leaving
    /// the tree untouched, if there is none.
    pub fn remove(&mut self, interval: &Interval<K, V>) -> bool
    where
        V: PartialEq,
    {
        self.take(interval).is_some()
    }

    /// Removes every interval equal to `interval` and returns how many
    /// were removed.
    pub fn remove_all(&mut self, interval: &Interval<K, V>) -> usize
    where
        V: PartialEq,
    {
        let mut removed = 0;
        while self.take(interval).is_some() {
            removed += 1;
        }
        removed
    }

    pub fn contains(&self, interval: &Interval<K, V>) -> bool
    where
        V: PartialEq,
    {
        self.find_node(interval).is_some()
    }

    /// Intervals sharing at least one point with `query`, end-points included.
    pub fn find_overlapping_intervals<W>(&self, query: &Interval<K, W>) -> Vec<&Interval<K, V>> {
        self.find_overlapping_intervals_with(query, Boundary::Inclusive)
    }

    pub fn find_overlapping_intervals_with<W>(
        &self,
        query: &Interval<K, W>,
        boundary: Boundary,
    ) -> Vec<&Interval<K, V>> {
        self.collect_matches(&Search::new(Relation::Overlapping, query, boundary))
    }

    /// Intervals lying inside `query`, end-points included.
    pub fn find_inner_intervals<W>(&self, query: &Interval<K, W>) -> Vec<&Interval<K, V>> {
        self.find_inner_intervals_with(query, Boundary::Inclusive)
    }

    pub fn find_inner_intervals_with<W>(
        &self,
        query: &Interval<K, W>,
        boundary: Boundary,
    ) -> Vec<&Interval<K, V>> {
        self.collect_matches(&Search::new(Relation::Inner, query, boundary))
    }

    /// Intervals containing all of `query`, end-points included.
    ///
    /// Only the start of a stored interval and the subtree maxima can prune
    /// this search, so it is the most expensive of the queries.
    pub fn find_outer_intervals<W>(&self, query: &Interval<K, W>) -> Vec<&Interval<K, V>> {
        self.find_outer_intervals_with(query, Boundary::Inclusive)
    }

    pub fn find_outer_intervals_with<W>(
        &self,
        query: &Interval<K, W>,
        boundary: Boundary,
    ) -> Vec<&Interval<K, V>> {
        self.collect_matches(&Search::new(Relation::Outer, query, boundary))
    }

    /// Intervals containing `point`, end-points included.
    pub fn find_intervals_contain_point(&self, point: &K) -> Vec<&Interval<K, V>> {
        self.find_intervals_contain_point_with(point, Boundary::Inclusive)
    }

    pub fn find_intervals_contain_point_with(
        &self,
        point: &K,
        boundary: Boundary,
    ) -> Vec<&Interval<K, V>> {
        let query = Interval::at_point(*point);
        self.collect_matches(&Search::new(Relation::Overlapping, &query, boundary))
    }

    pub fn count_overlapping_intervals<W>(&self, query: &Interval<K, W>) -> usize {
        self.count_overlapping_intervals_with(query, Boundary::Inclusive)
    }

    pub fn count_overlapping_intervals_with<W>(
        &self,
        query: &Interval<K, W>,
        boundary: Boundary,
    ) -> usize {
        self.count_matches(&Search::new(Relation::Overlapping, query, boundary))
    }

    pub fn count_inner_intervals<W>(&self, query: &Interval<K, W>) -> usize {
        self.count_inner_intervals_with(query, Boundary::Inclusive)
    }

    pub fn count_inner_intervals_with<W>(&self, query: &Interval<K, W>, boundary: Boundary) -> usize {
        self.count_matches(&Search::new(Relation::Inner, query, boundary))
    }

    pub fn count_outer_intervals<W>(&self, query: &Interval<K, W>) -> usize {
        self.count_outer_intervals_with(query, Boundary::Inclusive)
    }

    pub fn count_outer_intervals_with<W>(&self, query: &Interval<K, W>, boundary: Boundary) -> usize {
        self.count_matches(&Search::new(Relation::Outer, query, boundary))
    }

    pub fn count_intervals_contain_point(&self, point: &K) -> usize {
        self.count_intervals_contain_point_with(point, Boundary::Inclusive)
    }

    pub fn count_intervals_contain_point_with(&self, point: &K, boundary: Boundary) -> usize {
        let query = Interval::at_point(*point);
        self.count_matches(&Search::new(Relation::Overlapping, &query, boundary))
    }
}

/// Builds a tree by inserting the intervals one by one, in order.
impl<K, V> FromIterator<Interval<K, V>> for IntervalTree<K, V>
where
    K: Ord + Copy,
{
    fn from_iter<I: IntoIterator<Item = Interval<K, V>>>(iter: I) -> Self {
        let mut tree = IntervalTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V> Extend<Interval<K, V>> for IntervalTree<K, V>
where
    K: Ord + Copy,
{
    fn extend<I: IntoIterator<Item = Interval<K, V>>>(&mut self, iter: I) {
        for interval in iter {
            self.insert(interval);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a IntervalTree<K, V> {
    type Item = &'a Interval<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> PartialEq for IntervalTree<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for IntervalTree<K, V> {}

impl<K, V> fmt::Debug for IntervalTree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// In-order iterator over the intervals of an [`IntervalTree`].
pub struct Iter<'a, K, V> {
    nodes: &'a SlotMap<NodeId, Node<K, V>>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_path(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.nodes[id].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Interval<K, V>;

    fn next(&mut self) -> Option<&'a Interval<K, V>> {
        let id = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[id];
        self.push_left_path(node.right);
        self.remaining -= 1;
        Some(&node.interval)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// A tree serializes as the ordered sequence of its intervals.
#[cfg(feature = "serde")]
impl<K, V> Serialize for IntervalTree<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> Deserialize<'de> for IntervalTree<K, V>
where
    K: Ord + Copy + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let intervals = Vec::<Interval<K, V>>::deserialize(deserializer)?;
        Ok(intervals.into_iter().collect())
    }
}
