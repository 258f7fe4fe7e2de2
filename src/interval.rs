use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IntervalError, Result};

/// Whether the end-points of a query take part in a match.
///
/// `Inclusive` compares with `<=` / `>=`, `Exclusive` with `<` / `>`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Boundary {
    #[default]
    Inclusive,
    Exclusive,
}

impl Boundary {
    /// `a <= b` when inclusive, `a < b` otherwise.
    #[inline]
    pub(crate) fn before<K: Ord>(self, a: &K, b: &K) -> bool {
        match self {
            Boundary::Inclusive => a <= b,
            Boundary::Exclusive => a < b,
        }
    }
}

/// A closed interval `[low, high]` carrying an optional payload.
///
/// The bounds are checked on construction, so `low <= high` always holds
/// for a value of this type. Two intervals are equal when both their bounds
/// and their payloads are equal; trees order intervals by `(low, high)` only.
///
/// ```
/// use rb_interval_tree::Interval;
///
/// let interval = Interval::new(20, 30).unwrap();
/// assert_eq!(interval.to_string(), "[20, 30]");
/// assert!(Interval::new(30, 20).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<K, V = ()> {
    low: K,
    high: K,
    value: V,
}

impl<K: Ord> Interval<K> {
    /// Creates an interval without payload.
    pub fn new(low: K, high: K) -> Result<Self> {
        Self::with_value(low, high, ())
    }
}

impl<K: Copy> Interval<K> {
    /// The degenerate interval `[point, point]`.
    pub(crate) fn at_point(point: K) -> Self {
        Interval {
            low: point,
            high: point,
            value: (),
        }
    }
}

impl<K: Ord, V> Interval<K, V> {
    /// Creates an interval carrying `value`. Fails with
    /// [`IntervalError::Malformed`] if `low > high`; the bounds are never
    /// swapped.
    pub fn with_value(low: K, high: K, value: V) -> Result<Self> {
        if low > high {
            return Err(IntervalError::Malformed);
        }
        Ok(Interval { low, high, value })
    }

    pub fn low(&self) -> &K {
        &self.low
    }

    pub fn high(&self) -> &K {
        &self.high
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Lexicographic comparison of `(low, high)`, ignoring payloads.
    pub fn cmp_bounds<W>(&self, other: &Interval<K, W>) -> Ordering {
        self.low
            .cmp(&other.low)
            .then_with(|| self.high.cmp(&other.high))
    }

    /// True if both intervals share at least one point.
    pub fn overlaps<W>(&self, other: &Interval<K, W>, boundary: Boundary) -> bool {
        boundary.before(&self.low, &other.high) && boundary.before(&other.low, &self.high)
    }

    /// True if `self` lies inside `outer`.
    pub fn is_inner_of<W>(&self, outer: &Interval<K, W>, boundary: Boundary) -> bool {
        boundary.before(&outer.low, &self.low) && boundary.before(&self.high, &outer.high)
    }

    /// True if `self` contains `inner` entirely.
    pub fn is_outer_of<W>(&self, inner: &Interval<K, W>, boundary: Boundary) -> bool {
        inner.is_inner_of(self, boundary)
    }

    pub fn contains_point(&self, point: &K, boundary: Boundary) -> bool {
        boundary.before(&self.low, point) && boundary.before(point, &self.high)
    }
}

impl<K: Ord> TryFrom<(K, K)> for Interval<K> {
    type Error = IntervalError;

    fn try_from((low, high): (K, K)) -> Result<Self> {
        Interval::new(low, high)
    }
}

impl<K: Ord> TryFrom<RangeInclusive<K>> for Interval<K> {
    type Error = IntervalError;

    fn try_from(range: RangeInclusive<K>) -> Result<Self> {
        let (low, high) = range.into_inner();
        Interval::new(low, high)
    }
}

impl<K, V> fmt::Display for Interval<K, V>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> Deserialize<'de> for Interval<K, V>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename = "Interval")]
        struct Raw<K, V> {
            low: K,
            high: K,
            value: V,
        }

        let raw = Raw::<K, V>::deserialize(deserializer)?;
        Interval::with_value(raw.low, raw.high, raw.value).map_err(serde::de::Error::custom)
    }
}
