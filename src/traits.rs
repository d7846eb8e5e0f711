// Copyright 2025 Cowboy AI, LLC.

//! Deep sort capabilities.
//!
//! [`DeepSort`] is the copying capability and [`DeepSortMut`] the in-place
//! one. Both are implemented for [`Value`], for sequences (`Vec<Value>`), and
//! for [`Mapping`], and both run with the default [`SortPolicy`](crate::SortPolicy).
//! Use [`DeepSorter`] directly for another policy.

use std::fmt;

use crate::collation::{ByKey, Collation, Natural};
use crate::compare::Element;
use crate::engine::DeepSorter;
use crate::errors::DeepSortResult;
use crate::value::{Mapping, Value};

/// Copying deep sort.
pub trait DeepSort: Sized {
    /// Deep-sorted copy, ordered by `collation` at every level.
    fn deep_sort_with(&self, collation: &dyn Collation) -> DeepSortResult<Self>;

    /// Deep-sorted copy under the natural order.
    fn deep_sort(&self) -> DeepSortResult<Self> {
        self.deep_sort_with(&Natural)
    }

    /// Deep-sorted copy ordered by `key` at every level.
    ///
    /// Sequence steps pass each element to `key` as [`Element::Item`];
    /// mapping steps pass each pair as [`Element::Entry`].
    fn deep_sort_by<F, K>(&self, key: F) -> DeepSortResult<Self>
    where
        F: Fn(Element<'_>) -> K,
        K: PartialOrd + fmt::Debug,
    {
        self.deep_sort_with(&ByKey::new(key))
    }
}

/// In-place deep sort. Every method returns the receiver it was given.
pub trait DeepSortMut {
    /// Deep-sort in place, ordered by `collation` at every level.
    fn deep_sort_with_mut(&mut self, collation: &dyn Collation) -> DeepSortResult<&mut Self>;

    /// Deep-sort in place under the natural order.
    fn deep_sort_mut(&mut self) -> DeepSortResult<&mut Self> {
        self.deep_sort_with_mut(&Natural)
    }

    /// Deep-sort in place, ordered by `key` at every level.
    fn deep_sort_by_mut<F, K>(&mut self, key: F) -> DeepSortResult<&mut Self>
    where
        F: Fn(Element<'_>) -> K,
        K: PartialOrd + fmt::Debug,
    {
        self.deep_sort_with_mut(&ByKey::new(key))
    }
}

impl DeepSort for Value {
    fn deep_sort_with(&self, collation: &dyn Collation) -> DeepSortResult<Self> {
        DeepSorter::default().sort_value(self, collation)
    }
}

impl DeepSortMut for Value {
    fn deep_sort_with_mut(&mut self, collation: &dyn Collation) -> DeepSortResult<&mut Self> {
        DeepSorter::default().sort_value_mut(self, collation)?;
        Ok(self)
    }
}

impl DeepSort for Vec<Value> {
    fn deep_sort_with(&self, collation: &dyn Collation) -> DeepSortResult<Self> {
        DeepSorter::default().sort_seq(self, collation)
    }
}

impl DeepSortMut for Vec<Value> {
    fn deep_sort_with_mut(&mut self, collation: &dyn Collation) -> DeepSortResult<&mut Self> {
        DeepSorter::default().sort_seq_mut(self, collation)?;
        Ok(self)
    }
}

impl DeepSort for Mapping {
    fn deep_sort_with(&self, collation: &dyn Collation) -> DeepSortResult<Self> {
        DeepSorter::default().sort_map(self, collation)
    }
}

impl DeepSortMut for Mapping {
    fn deep_sort_with_mut(&mut self, collation: &dyn Collation) -> DeepSortResult<&mut Self> {
        DeepSorter::default().sort_map_mut(self, collation)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_deep_sort_mut_returns_receiver() {
        let mut items = vec![Value::from(2), Value::from(1)];
        let ptr: *const Vec<Value> = &items;
        let returned = items.deep_sort_mut().unwrap();
        assert!(std::ptr::eq(returned, ptr));
        assert_eq!(*returned, vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_mapping_deep_sort_by_string_key() {
        let mut map = Mapping::new();
        map.insert(Value::from(10), Value::from("ten"));
        map.insert(Value::from(9), Value::from("nine"));
        // "[10, \"ten\"]" sorts before "[9, \"nine\"]" as strings.
        let sorted = map.deep_sort_by(|e| e.to_string()).unwrap();
        let keys: Vec<_> = sorted.keys().cloned().collect();
        assert_eq!(keys, vec![Value::from(10), Value::from(9)]);

        let natural = map.deep_sort().unwrap();
        let keys: Vec<_> = natural.keys().cloned().collect();
        assert_eq!(keys, vec![Value::from(9), Value::from(10)]);
    }

    #[test]
    fn test_value_deep_sort_leaves_scalars_alone() {
        assert_eq!(Value::from(3).deep_sort().unwrap(), Value::from(3));
        let mut nil = Value::Nil;
        assert!(nil.deep_sort_mut().unwrap().is_nil());
    }
}
