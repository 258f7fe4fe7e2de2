//! Pruned in-order searches over an [`IntervalTree`].
//!
//! A subtree is skipped when its largest high end-point cannot reach the
//! query, and once a node starts too late to match, neither it nor anything
//! to its right is visited. Matches are therefore produced in ascending
//! `(low, high)` order.

use crate::interval::{Boundary, Interval};
use crate::interval_tree::IntervalTree;
use crate::node::NodeId;

/// How a stored interval has to relate to the query interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Relation {
    Overlapping,
    /// Stored interval lies inside the query.
    Inner,
    /// Stored interval contains the query.
    Outer,
}

pub(crate) struct Search<'q, K, W> {
    relation: Relation,
    query: &'q Interval<K, W>,
    boundary: Boundary,
}

impl<'q, K, W> Search<'q, K, W>
where
    K: Ord,
{
    pub fn new(relation: Relation, query: &'q Interval<K, W>, boundary: Boundary) -> Self {
        Search {
            relation,
            query,
            boundary,
        }
    }

    /// Whether a subtree whose largest high end-point is `max_high` may hold
    /// a match.
    fn reaches(&self, max_high: &K) -> bool {
        let bound = match self.relation {
            Relation::Outer => self.query.high(),
            Relation::Overlapping | Relation::Inner => self.query.low(),
        };
        self.boundary.before(bound, max_high)
    }

    /// Whether an interval starting at `low`, or any interval sorted after
    /// it, may match.
    fn admits(&self, low: &K) -> bool {
        let bound = match self.relation {
            Relation::Outer => self.query.low(),
            Relation::Overlapping | Relation::Inner => self.query.high(),
        };
        self.boundary.before(low, bound)
    }

    fn matches<V>(&self, interval: &Interval<K, V>) -> bool {
        match self.relation {
            Relation::Overlapping => interval.overlaps(self.query, self.boundary),
            Relation::Inner => interval.is_inner_of(self.query, self.boundary),
            Relation::Outer => interval.is_outer_of(self.query, self.boundary),
        }
    }
}

impl<K, V> IntervalTree<K, V>
where
    K: Ord + Copy,
{
    pub(crate) fn search<'a, W, F>(&'a self, search: &Search<K, W>, visit: &mut F)
    where
        F: FnMut(&'a Interval<K, V>),
    {
        self.search_from(self.root, search, visit);
    }

    fn search_from<'a, W, F>(&'a self, current: Option<NodeId>, search: &Search<K, W>, visit: &mut F)
    where
        F: FnMut(&'a Interval<K, V>),
    {
        let Some(id) = current else {
            return;
        };
        let node = &self.nodes[id];
        if !search.reaches(&node.max_high) {
            return;
        }

        self.search_from(node.left, search, visit);
        if !search.admits(node.interval.low()) {
            return;
        }
        if search.matches(&node.interval) {
            visit(&node.interval);
        }
        self.search_from(node.right, search, visit);
    }

    pub(crate) fn collect_matches<W>(&self, search: &Search<K, W>) -> Vec<&Interval<K, V>> {
        let mut found = Vec::new();
        self.search(search, &mut |interval| found.push(interval));
        found
    }

    pub(crate) fn count_matches<W>(&self, search: &Search<K, W>) -> usize {
        let mut count = 0;
        self.search(search, &mut |_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(low: i32, high: i32) -> Interval<i32> {
        Interval::new(low, high).unwrap()
    }

    /// Number of nodes a search looks at.
    fn visited(tree: &IntervalTree<i32>, search: &Search<i32, ()>) -> usize {
        fn walk(tree: &IntervalTree<i32>, current: Option<NodeId>, search: &Search<i32, ()>) -> usize {
            let Some(id) = current else {
                return 0;
            };
            let node = &tree.nodes[id];
            if !search.reaches(&node.max_high) {
                return 1;
            }
            let left = walk(tree, node.left, search);
            if !search.admits(node.interval.low()) {
                return 1 + left;
            }
            1 + left + walk(tree, node.right, search)
        }
        walk(tree, tree.root, search)
    }

    #[test]
    fn prunes_far_right_of_short_intervals() {
        let tree: IntervalTree<i32> = (0..1024).map(|i| iv(i * 10, i * 10 + 5)).collect();
        let query = iv(5000, 5002);
        let search = Search::new(Relation::Overlapping, &query, Boundary::Inclusive);

        assert_eq!(tree.collect_matches(&search), vec![&iv(5000, 5005)]);
        assert!(visited(&tree, &search) < 100);
    }

    #[test]
    fn outer_prunes_on_max_high() {
        let tree: IntervalTree<i32> = (0..1024).map(|i| iv(i, i + 1)).collect();
        let query = iv(1030, 1040);
        let search = Search::new(Relation::Outer, &query, Boundary::Inclusive);

        assert_eq!(tree.count_matches(&search), 0);
        assert_eq!(visited(&tree, &search), 1);
    }

    #[test]
    fn exclusive_prunes_touching_end_points() {
        let tree: IntervalTree<i32> = [iv(0, 10), iv(10, 20), iv(20, 30)].into_iter().collect();
        let query = iv(10, 20);

        let inclusive = Search::new(Relation::Overlapping, &query, Boundary::Inclusive);
        assert_eq!(tree.count_matches(&inclusive), 3);

        let exclusive = Search::new(Relation::Overlapping, &query, Boundary::Exclusive);
        assert_eq!(tree.collect_matches(&exclusive), vec![&iv(10, 20)]);
    }

    #[test]
    fn relations_share_one_traversal() {
        let tree: IntervalTree<i32> =
            [iv(20, 30), iv(40, 60), iv(70, 90), iv(60, 70), iv(40, 90), iv(80, 90)]
                .into_iter()
                .collect();
        let query = iv(50, 80);

        let inner = Search::new(Relation::Inner, &query, Boundary::Inclusive);
        let outer = Search::new(Relation::Outer, &query, Boundary::Inclusive);
        assert_eq!(tree.collect_matches(&inner), vec![&iv(60, 70)]);
        assert_eq!(tree.collect_matches(&outer), vec![&iv(40, 90)]);
        assert_eq!(tree.count_matches(&outer), 1);
    }
}
