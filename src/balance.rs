//! Red-black maintenance for [`IntervalTree`].
//!
//! Every structural change keeps two things true before it returns: the five
//! red-black rules, and `max_high` of each node being the largest high
//! end-point found in its subtree. Rotations refresh `max_high` of the two
//! nodes whose subtrees change; nothing above them is affected since a
//! rotation does not change which intervals live under the local root.

use std::cmp::Ordering;
use std::mem;

use crate::interval::Interval;
use crate::interval_tree::IntervalTree;
use crate::node::{Color, Node, NodeId};

impl<K, V> IntervalTree<K, V>
where
    K: Ord + Copy,
{
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.map_or(false, |id| self.nodes[id].color == Color::Red)
    }

    // Empty leaves count as black.
    fn is_black(&self, id: Option<NodeId>) -> bool {
        !self.is_red(id)
    }

    fn set_color(&mut self, id: Option<NodeId>, color: Color) {
        if let Some(id) = id {
            self.nodes[id].color = color;
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    /// Recompute `max_high` of a node from its own interval and its children.
    fn refresh_max(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let mut max_high = *node.interval.high();
        for child in [node.left, node.right].into_iter().flatten() {
            max_high = max_high.max(self.nodes[child].max_high);
        }
        self.nodes[id].max_high = max_high;
    }

    fn refresh_path(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.refresh_max(id);
            current = self.nodes[id].parent;
        }
    }

    /// Put `new` in the slot `old` occupies under `parent`, or at the root.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = &mut self.nodes[p];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Rotate the subtree rooted at `x` to the left and return its new root,
    /// the former right child of `x`.
    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.nodes[x].right else {
            debug_assert!(false, "left rotation without a right child");
            return x;
        };
        let inner = self.nodes[y].left;
        let parent = self.nodes[x].parent;

        self.nodes[x].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }
        self.replace_child(parent, x, Some(y));
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);

        self.refresh_max(x);
        self.refresh_max(y);
        y
    }

    /// Mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.nodes[x].left else {
            debug_assert!(false, "right rotation without a left child");
            return x;
        };
        let inner = self.nodes[y].right;
        let parent = self.nodes[x].parent;

        self.nodes[x].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }
        self.replace_child(parent, x, Some(y));
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);

        self.refresh_max(x);
        self.refresh_max(y);
        y
    }

    /// Link a new red leaf holding `interval` and rebalance. Intervals with
    /// equal bounds descend to the right, so equal keys keep their insertion
    /// order in an in-order walk.
    pub(crate) fn insert_node(&mut self, interval: Interval<K, V>) -> NodeId {
        let high = *interval.high();
        let mut parent = None;
        let mut go_left = false;
        let mut current = self.root;

        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.maybe_update_max(high);
            go_left = interval.cmp_bounds(&node.interval) == Ordering::Less;
            parent = Some(id);
            current = if go_left { node.left } else { node.right };
        }

        let id = self.nodes.insert(Node::new(interval, parent));
        match parent {
            None => self.root = Some(id),
            Some(p) if go_left => self.nodes[p].left = Some(id),
            Some(p) => self.nodes[p].right = Some(id),
        }

        self.insert_fixup(id);
        id
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(mut p) = self.nodes[z].parent {
            if self.nodes[p].color == Color::Black {
                break;
            }
            // A red parent is never the root.
            let Some(g) = self.nodes[p].parent else {
                break;
            };

            if self.nodes[g].left == Some(p) {
                let uncle = self.nodes[g].right;
                if self.is_red(uncle) {
                    self.nodes[p].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[g].color = Color::Red;
                    z = g;
                    continue;
                }
                if self.nodes[p].right == Some(z) {
                    z = p;
                    p = self.rotate_left(z);
                }
                self.nodes[p].color = Color::Black;
                self.nodes[g].color = Color::Red;
                self.rotate_right(g);
            } else {
                let uncle = self.nodes[g].left;
                if self.is_red(uncle) {
                    self.nodes[p].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[g].color = Color::Red;
                    z = g;
                    continue;
                }
                if self.nodes[p].left == Some(z) {
                    z = p;
                    p = self.rotate_right(z);
                }
                self.nodes[p].color = Color::Black;
                self.nodes[g].color = Color::Red;
                self.rotate_left(g);
            }
        }

        self.set_color(self.root, Color::Black);
    }

    /// The first node, in in-order position, holding an interval equal to
    /// `target` (bounds and payload).
    pub(crate) fn find_node(&self, target: &Interval<K, V>) -> Option<NodeId>
    where
        V: PartialEq,
    {
        self.find_from(self.root, target)
    }

    fn find_from(&self, current: Option<NodeId>, target: &Interval<K, V>) -> Option<NodeId>
    where
        V: PartialEq,
    {
        let id = current?;
        let node = &self.nodes[id];

        match target.cmp_bounds(&node.interval) {
            Ordering::Less => self.find_from(node.left, target),
            Ordering::Greater => self.find_from(node.right, target),
            // Rotations can leave equal keys on both sides.
            Ordering::Equal => self
                .find_from(node.left, target)
                .or_else(|| (node.interval == *target).then_some(id))
                .or_else(|| self.find_from(node.right, target)),
        }
    }

    /// Unlink node `z` and rebalance, returning the interval it held.
    ///
    /// A node with two children takes over the interval of its in-order
    /// successor, and the successor's node, which has no left child, is
    /// the one spliced out of the tree.
    pub(crate) fn remove_node(&mut self, z: NodeId) -> Option<Interval<K, V>> {
        let y = match (self.nodes[z].left, self.nodes[z].right) {
            (Some(_), Some(right)) => self.leftmost(right),
            _ => z,
        };
        let child = self.nodes[y].left.or(self.nodes[y].right);
        let parent = self.nodes[y].parent;

        self.replace_child(parent, y, child);
        let spliced = self.nodes.remove(y)?;

        let removed = if y == z {
            spliced.interval
        } else {
            mem::replace(&mut self.nodes[z].interval, spliced.interval)
        };

        // `z`, when it survives, is an ancestor of `parent`.
        self.refresh_path(parent);
        if spliced.color == Color::Black {
            self.remove_fixup(child, parent);
        }

        Some(removed)
    }

    /// Resolve the missing black on the path through `x`, a child of
    /// `parent` that may be an empty leaf.
    fn remove_fixup(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        while x != self.root && self.is_black(x) {
            let Some(p) = parent else {
                break;
            };

            if self.nodes[p].left == x {
                // The sibling side holds at least one black node.
                let Some(mut w) = self.nodes[p].right else {
                    break;
                };
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[p].color = Color::Red;
                    self.rotate_left(p);
                    let Some(next) = self.nodes[p].right else {
                        break;
                    };
                    w = next;
                }
                if self.is_black(self.nodes[w].left) && self.is_black(self.nodes[w].right) {
                    self.nodes[w].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p].parent;
                } else {
                    if self.is_black(self.nodes[w].right) {
                        self.set_color(self.nodes[w].left, Color::Black);
                        self.nodes[w].color = Color::Red;
                        w = self.rotate_right(w);
                    }
                    self.nodes[w].color = self.nodes[p].color;
                    self.nodes[p].color = Color::Black;
                    self.set_color(self.nodes[w].right, Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                    parent = None;
                }
            } else {
                let Some(mut w) = self.nodes[p].left else {
                    break;
                };
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[p].color = Color::Red;
                    self.rotate_right(p);
                    let Some(next) = self.nodes[p].left else {
                        break;
                    };
                    w = next;
                }
                if self.is_black(self.nodes[w].left) && self.is_black(self.nodes[w].right) {
                    self.nodes[w].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p].parent;
                } else {
                    if self.is_black(self.nodes[w].left) {
                        self.set_color(self.nodes[w].right, Color::Black);
                        self.nodes[w].color = Color::Red;
                        w = self.rotate_left(w);
                    }
                    self.nodes[w].color = self.nodes[p].color;
                    self.nodes[p].color = Color::Black;
                    self.set_color(self.nodes[w].left, Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                    parent = None;
                }
            }
        }

        self.set_color(x, Color::Black);
    }
}
