use slotmap::new_key_type;

use crate::interval::Interval;

new_key_type! {
    /// Handle of a node inside the tree arena.
    pub(crate) struct NodeId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A tree node. Children are owned through the arena slots they point to;
/// `parent` is a back-reference used only while walking up for fix-ups.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub interval: Interval<K, V>,
    pub max_high: K, // Max high end-point in this subtree.
    pub color: Color,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<K, V> Node<K, V>
where
    K: Ord + Copy,
{
    /// New nodes are red leaves whose maximum is their own high end-point.
    pub fn new(interval: Interval<K, V>, parent: Option<NodeId>) -> Node<K, V> {
        let max_high = *interval.high();

        Node {
            interval,
            max_high,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    /// Raise the stored maximum if `inserted_max` goes further right.
    pub fn maybe_update_max(&mut self, inserted_max: K) {
        if self.max_high < inserted_max {
            self.max_high = inserted_max;
        }
    }
}
