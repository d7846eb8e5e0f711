// Copyright 2025 Cowboy AI, LLC.

//! Host-defined sortable collections.
//!
//! A host collection is a container whose internal shape the engine does not
//! know. It joins a deep sort by exposing single-level sort capabilities:
//! [`SortBy`] for the copying variant and [`SortByMut`] for the in-place
//! variant. The two are queried separately, so a type may offer one without
//! the other. The engine sorts such a collection once and does not recurse
//! into it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::collation::Collation;
use crate::compare::Element;
use crate::errors::DeepSortResult;
use crate::value::Value;

/// A container that can participate in a deep sort as an opaque leaf.
pub trait HostCollection: fmt::Debug + Send + Sync {
    /// Stable name of the concrete type.
    fn type_name(&self) -> &'static str;

    /// Comparable projection, used for ordering, equality, and hashing.
    fn project(&self) -> Value;

    /// Clone into a new box.
    fn clone_box(&self) -> Box<dyn HostCollection>;

    /// Copying single-level sort, if supported.
    fn as_sort_by(&self) -> Option<&dyn SortBy> {
        None
    }

    /// In-place single-level sort, if supported.
    fn as_sort_by_mut(&mut self) -> Option<&mut dyn SortByMut> {
        None
    }
}

/// Single-level copying sort.
pub trait SortBy {
    /// Return a sorted copy. Elements are ordered by `collation` but not
    /// recursed into.
    fn sort_by(&self, collation: &dyn Collation) -> DeepSortResult<HostValue>;
}

/// Single-level in-place sort.
pub trait SortByMut {
    /// Reorder the elements in place by `collation`.
    fn sort_by_mut(&mut self, collation: &dyn Collation) -> DeepSortResult<()>;
}

/// Owned handle to a host collection, stored in [`Value::Host`].
#[derive(Debug)]
pub struct HostValue(Box<dyn HostCollection>);

impl HostValue {
    /// Wrap a host collection.
    pub fn new<H: HostCollection + 'static>(collection: H) -> Self {
        Self(Box::new(collection))
    }

    /// Stable name of the wrapped type.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Comparable projection of the wrapped collection.
    pub fn project(&self) -> Value {
        self.0.project()
    }

    /// Copying capability of the wrapped collection.
    pub fn as_sort_by(&self) -> Option<&dyn SortBy> {
        self.0.as_sort_by()
    }

    /// In-place capability of the wrapped collection.
    pub fn as_sort_by_mut(&mut self) -> Option<&mut dyn SortByMut> {
        self.0.as_sort_by_mut()
    }

    /// Borrow the wrapped collection.
    pub fn inner(&self) -> &dyn HostCollection {
        self.0.as_ref()
    }
}

impl Clone for HostValue {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.project() == other.project()
    }
}

impl Eq for HostValue {}

impl Hash for HostValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name().hash(state);
        self.project().hash(state);
    }
}

/// Immutable sequence that only supports the copying single-level sort.
///
/// A deep sort reorders its elements but never descends into them, and the
/// in-place variant leaves it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenSeq {
    items: Arc<[Value]>,
}

impl FrozenSeq {
    /// Freeze a list of values.
    pub fn new(items: impl Into<Vec<Value>>) -> Self {
        Self {
            items: Arc::from(items.into()),
        }
    }

    /// The frozen elements, in their current order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl HostCollection for FrozenSeq {
    fn type_name(&self) -> &'static str {
        "FrozenSeq"
    }

    fn project(&self) -> Value {
        Value::Seq(self.items.to_vec())
    }

    fn clone_box(&self) -> Box<dyn HostCollection> {
        Box::new(self.clone())
    }

    fn as_sort_by(&self) -> Option<&dyn SortBy> {
        Some(self)
    }
}

impl SortBy for FrozenSeq {
    fn sort_by(&self, collation: &dyn Collation) -> DeepSortResult<HostValue> {
        let elements: Vec<Element<'_>> = self.items.iter().map(Element::Item).collect();
        let order = collation.permutation(&elements)?;
        let sorted: Vec<Value> = order.into_iter().map(|i| self.items[i].clone()).collect();
        Ok(HostValue::new(FrozenSeq::new(sorted)))
    }
}

impl From<FrozenSeq> for Value {
    fn from(seq: FrozenSeq) -> Self {
        Value::Host(HostValue::new(seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation::Natural;

    #[test]
    fn test_frozen_seq_sorts_one_level() {
        let frozen = FrozenSeq::new(vec![Value::seq([2, 1]), Value::seq([1, 9])]);
        let sorted = frozen.sort_by(&Natural).unwrap();
        // Outer order changes, inner sequences are left alone.
        assert_eq!(
            sorted.project(),
            Value::seq([Value::seq([1, 9]), Value::seq([2, 1])])
        );
        assert_eq!(frozen.len(), 2);
    }

    #[test]
    fn test_frozen_seq_has_no_in_place_capability() {
        let mut host = HostValue::new(FrozenSeq::new(vec![Value::from(1)]));
        assert!(host.as_sort_by().is_some());
        assert!(host.as_sort_by_mut().is_none());
    }

    #[test]
    fn test_host_equality_uses_projection() {
        let a = HostValue::new(FrozenSeq::new(vec![Value::from(1), Value::from(2)]));
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(Value::Host(a).to_string(), "[1, 2]");
    }
}
