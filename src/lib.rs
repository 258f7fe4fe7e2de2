//! Implementation of an interval tree ([`IntervalTree`]) over closed intervals
//! `[low, high]`, balanced as a red-black tree. It is based on the
//! data structure described in Cormen et al.
//! (2009, Section 14.3: Interval trees, pp. 348–354): every node caches the
//! largest high end-point of its subtree, which lets searches skip subtrees
//! that cannot hold a match.
//!
//! Four relations can be queried, each as a list of matches or as a count:
//! intervals overlapping a query, intervals inside it (inner), intervals
//! containing it (outer), and intervals containing a point. End-points are
//! included by default; every query has a `_with` variant taking a
//! [`Boundary`] to exclude them.
//!
//! Note that any type satisfying the [`Ord`] and [`Copy`] traits can be used
//! as a bound, and intervals may carry a payload of any type.

mod balance;
pub mod error;
pub mod interval;
/// An interval tree implemented with a red-black tree.
pub mod interval_tree;
mod node;
mod query;

pub use error::{IntervalError, Result};
pub use interval::{Boundary, Interval};
pub use interval_tree::{IntervalTree, Iter};
