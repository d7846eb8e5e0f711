// Copyright 2025 Cowboy AI, LLC.

//! The deep sort engine.
//!
//! Sorting is bottom-up: the contents of a node are sorted before the node
//! itself, so sibling comparisons always see already-sorted children. At
//! every node the engine dispatches on capability, in this order:
//!
//! 1. sequences and mappings are recursed into
//! 2. host collections exposing a single-level sort are sorted once, without
//!    recursion (the copying variant checks [`SortBy`](crate::SortBy), the
//!    in-place variant checks [`SortByMut`](crate::SortByMut))
//! 3. everything else is returned unchanged
//!
//! Sequences are sorted in place by the mutating variant. Mappings are always
//! rebuilt, since an ordered map offers no entry-reordering primitive that
//! also allows rewriting keys; the values inside them are still sorted in
//! place.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::collation::{apply_permutation, Collation};
use crate::compare::Element;
use crate::errors::{ComparisonError, DeepSortResult};
use crate::policy::SortPolicy;
use crate::value::{Mapping, Value};

/// Recursive sorter for nested values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeepSorter {
    policy: SortPolicy,
}

impl DeepSorter {
    /// Create a sorter with the given policy.
    pub fn new(policy: SortPolicy) -> Self {
        Self { policy }
    }

    /// The policy in effect.
    pub fn policy(&self) -> &SortPolicy {
        &self.policy
    }

    /// Return a deep-sorted copy of `value`.
    pub fn sort_value(&self, value: &Value, collation: &dyn Collation) -> DeepSortResult<Value> {
        self.copy_node(value, collation, 0)
    }

    /// Return a deep-sorted copy of a sequence.
    pub fn sort_seq(&self, items: &[Value], collation: &dyn Collation) -> DeepSortResult<Vec<Value>> {
        self.copy_seq(items, collation, 0)
    }

    /// Return a deep-sorted copy of a mapping.
    pub fn sort_map(&self, map: &Mapping, collation: &dyn Collation) -> DeepSortResult<Mapping> {
        self.copy_map(map, collation, 0)
    }

    /// Deep-sort `value` in place.
    ///
    /// On error the structure may be partially sorted, but no element is
    /// lost or duplicated.
    pub fn sort_value_mut(&self, value: &mut Value, collation: &dyn Collation) -> DeepSortResult<()> {
        self.mut_node(value, collation, 0)
    }

    /// Deep-sort a sequence in place.
    pub fn sort_seq_mut(&self, items: &mut Vec<Value>, collation: &dyn Collation) -> DeepSortResult<()> {
        self.mut_seq(items, collation, 0)
    }

    /// Deep-sort the contents of a mapping in place and rebuild its entries.
    pub fn sort_map_mut(&self, map: &mut Mapping, collation: &dyn Collation) -> DeepSortResult<()> {
        self.mut_map(map, collation, 0)
    }

    fn copy_node(&self, value: &Value, collation: &dyn Collation, depth: usize) -> DeepSortResult<Value> {
        match value {
            Value::Seq(items) => self.copy_seq(items, collation, depth).map(Value::Seq),
            Value::Map(map) => self.copy_map(map, collation, depth).map(Value::Map),
            Value::Host(host) if self.policy.sort_host_collections => match host.as_sort_by() {
                Some(sortable) => sortable
                    .sort_by(collation)
                    .map(Value::Host)
                    .map_err(|err| self.failed(err, depth)),
                None => {
                    trace!(host = host.type_name(), "host collection has no copying sort");
                    Ok(value.clone())
                }
            },
            _ => Ok(value.clone()),
        }
    }

    fn copy_seq(&self, items: &[Value], collation: &dyn Collation, depth: usize) -> DeepSortResult<Vec<Value>> {
        let mut sorted = items
            .iter()
            .map(|item| self.copy_node(item, collation, depth + 1))
            .collect::<DeepSortResult<Vec<_>>>()?;
        let order = {
            let elements: Vec<Element<'_>> = sorted.iter().map(Element::Item).collect();
            self.order(&elements, collation, depth)?
        };
        apply_permutation(&mut sorted, &order);
        Ok(sorted)
    }

    fn copy_map(&self, map: &Mapping, collation: &dyn Collation, depth: usize) -> DeepSortResult<Mapping> {
        let mut keys = Vec::with_capacity(map.len());
        let mut values = Vec::with_capacity(map.len());
        for (key, value) in map {
            if self.policy.canonicalize_keys {
                keys.push(self.copy_node(key, collation, depth + 1)?);
            }
            values.push(self.copy_node(value, collation, depth + 1)?);
        }
        if !self.policy.canonicalize_keys || !all_distinct(&keys) {
            keys = map.keys().cloned().collect();
        }

        let mut entries: Vec<(Value, Value)> = keys.into_iter().zip(values).collect();
        self.reorder_entries(&mut entries, collation, depth)?;
        Ok(entries.into_iter().collect())
    }

    fn mut_node(&self, value: &mut Value, collation: &dyn Collation, depth: usize) -> DeepSortResult<()> {
        match value {
            Value::Seq(items) => self.mut_seq(items, collation, depth),
            Value::Map(map) => self.mut_map(map, collation, depth),
            Value::Host(host) if self.policy.sort_host_collections => {
                let type_name = host.type_name();
                match host.as_sort_by_mut() {
                    Some(sortable) => sortable
                        .sort_by_mut(collation)
                        .map_err(|err| self.failed(err, depth)),
                    None => {
                        trace!(host = type_name, "host collection has no in-place sort");
                        Ok(())
                    }
                }
            }
            _ => Ok(()),
        }
    }

    fn mut_seq(&self, items: &mut Vec<Value>, collation: &dyn Collation, depth: usize) -> DeepSortResult<()> {
        for item in items.iter_mut() {
            self.mut_node(item, collation, depth + 1)?;
        }
        let order = {
            let elements: Vec<Element<'_>> = items.iter().map(Element::Item).collect();
            self.order(&elements, collation, depth)?
        };
        apply_permutation(items, &order);
        Ok(())
    }

    fn mut_map(&self, map: &mut Mapping, collation: &dyn Collation, depth: usize) -> DeepSortResult<()> {
        let mut entries: Vec<(Value, Value)> = std::mem::take(map).into_iter().collect();
        let result = self.rebuild_entries(&mut entries, collation, depth);
        // Entries go back even on failure so nothing is dropped.
        *map = entries.into_iter().collect();
        result
    }

    fn rebuild_entries(
        &self,
        entries: &mut [(Value, Value)],
        collation: &dyn Collation,
        depth: usize,
    ) -> DeepSortResult<()> {
        for (_, value) in entries.iter_mut() {
            self.mut_node(value, collation, depth + 1)?;
        }

        if self.policy.canonicalize_keys {
            let mut keys = Vec::with_capacity(entries.len());
            for (key, _) in entries.iter() {
                let mut key = key.clone();
                self.mut_node(&mut key, collation, depth + 1)?;
                keys.push(key);
            }
            if all_distinct(&keys) {
                for ((key, _), sorted) in entries.iter_mut().zip(keys) {
                    *key = sorted;
                }
            }
        }

        self.reorder_entries(entries, collation, depth)
    }

    fn reorder_entries(
        &self,
        entries: &mut [(Value, Value)],
        collation: &dyn Collation,
        depth: usize,
    ) -> DeepSortResult<()> {
        if !self.policy.reorder_entries {
            return Ok(());
        }
        let order = {
            let elements: Vec<Element<'_>> =
                entries.iter().map(|(k, v)| Element::Entry(k, v)).collect();
            self.order(&elements, collation, depth)?
        };
        apply_permutation(entries, &order);
        Ok(())
    }

    fn order(
        &self,
        elements: &[Element<'_>],
        collation: &dyn Collation,
        depth: usize,
    ) -> DeepSortResult<Vec<usize>> {
        trace!(depth, len = elements.len(), "sorting level");
        collation
            .permutation(elements)
            .map_err(|err| self.failed(err, depth))
    }

    fn failed(&self, err: ComparisonError, depth: usize) -> ComparisonError {
        let err = err.at_depth(depth);
        debug!(depth, left = %err.left, right = %err.right, "deep sort comparison failed");
        err
    }
}

/// True when no two keys are equal. Sorting container keys can make two
/// distinct keys collide; in that case the mapping keeps its original keys.
fn all_distinct(keys: &[Value]) -> bool {
    let mut seen = HashSet::with_capacity(keys.len());
    let distinct = keys.iter().all(|key| seen.insert(key));
    if !distinct {
        debug!("sorted mapping keys collide; keeping original keys");
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation::{ByKey, Natural};
    use crate::host::{FrozenSeq, HostValue};
    use pretty_assertions::assert_eq;

    fn entries(value: &Value) -> Vec<(Value, Value)> {
        value
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[test]
    fn test_sorts_nested_mapping() {
        let input = Value::map([(2, Value::from(4)), (1, Value::seq([3, 2]))]);
        let sorted = DeepSorter::default().sort_value(&input, &Natural).unwrap();
        assert_eq!(
            entries(&sorted),
            vec![
                (Value::from(1), Value::seq([2, 3])),
                (Value::from(2), Value::from(4)),
            ]
        );
        // The input is untouched.
        assert_eq!(entries(&input)[0].0, Value::from(2));
    }

    #[test]
    fn test_in_place_keeps_the_same_allocation() {
        let mut items = vec![Value::from(2), Value::from(1)];
        let before = items.as_ptr();
        DeepSorter::default().sort_seq_mut(&mut items, &Natural).unwrap();
        assert_eq!(items, vec![Value::from(1), Value::from(2)]);
        assert_eq!(items.as_ptr(), before);
    }

    #[test]
    fn test_error_depth_points_at_the_failing_level() {
        let input = Value::seq([Value::seq([Value::map([(2, 3)]), Value::from(1)])]);
        let err = DeepSorter::default().sort_value(&input, &Natural).unwrap_err();
        assert_eq!(err.depth, 1);
    }

    #[test]
    fn test_container_keys_are_canonicalized() {
        let input = Value::map([(Value::seq([2, 1]), Value::from("a"))]);
        let sorted = DeepSorter::default().sort_value(&input, &Natural).unwrap();
        assert_eq!(entries(&sorted), vec![(Value::seq([1, 2]), Value::from("a"))]);

        let mut in_place = input.clone();
        DeepSorter::default().sort_value_mut(&mut in_place, &Natural).unwrap();
        assert_eq!(entries(&in_place), entries(&sorted));
    }

    #[test]
    fn test_colliding_canonical_keys_keep_originals() {
        let input = Value::map([
            (Value::seq([2, 1]), Value::from("b")),
            (Value::seq([1, 2]), Value::from("a")),
        ]);
        let sorted = DeepSorter::default().sort_value(&input, &Natural).unwrap();
        assert_eq!(
            entries(&sorted),
            vec![
                (Value::seq([1, 2]), Value::from("a")),
                (Value::seq([2, 1]), Value::from("b")),
            ]
        );
    }

    #[test]
    fn test_colliding_canonical_keys_keep_originals_in_place() {
        let input = Value::map([
            (Value::seq([2, 1]), Value::from("b")),
            (Value::seq([1, 2]), Value::from("a")),
        ]);
        let copied = DeepSorter::default().sort_value(&input, &Natural).unwrap();

        let mut in_place = input.clone();
        DeepSorter::default().sort_value_mut(&mut in_place, &Natural).unwrap();
        assert_eq!(in_place.as_map().unwrap().len(), 2);
        assert_eq!(
            entries(&in_place),
            vec![
                (Value::seq([1, 2]), Value::from("a")),
                (Value::seq([2, 1]), Value::from("b")),
            ]
        );
        assert_eq!(entries(&in_place), entries(&copied));
    }

    #[test]
    fn test_policy_can_keep_entry_order() {
        let sorter = DeepSorter::new(SortPolicy::default().with_reorder_entries(false));
        let input = Value::map([(2, Value::seq([2, 1])), (1, Value::seq([4, 3]))]);
        let sorted = sorter.sort_value(&input, &Natural).unwrap();
        assert_eq!(
            entries(&sorted),
            vec![
                (Value::from(2), Value::seq([1, 2])),
                (Value::from(1), Value::seq([3, 4])),
            ]
        );
    }

    #[test]
    fn test_policy_can_leave_container_keys_alone() {
        let sorter = DeepSorter::new(SortPolicy::default().with_canonicalize_keys(false));
        let input = Value::map([(Value::seq([2, 1]), Value::from(0))]);
        let sorted = sorter.sort_value(&input, &Natural).unwrap();
        assert_eq!(entries(&sorted)[0].0, Value::seq([2, 1]));
    }

    #[test]
    fn test_host_collections_sort_one_level() {
        let frozen = FrozenSeq::new(vec![Value::seq([2, 1]), Value::seq([0, 5])]);
        let input = Value::seq([Value::from(frozen.clone())]);

        let sorted = DeepSorter::default().sort_value(&input, &Natural).unwrap();
        let host = sorted.as_seq().unwrap()[0].as_host().unwrap();
        assert_eq!(
            host.project(),
            Value::seq([Value::seq([0, 5]), Value::seq([2, 1])])
        );

        // FrozenSeq has no in-place sort, so the mutating variant skips it.
        let mut in_place = input.clone();
        DeepSorter::default().sort_value_mut(&mut in_place, &Natural).unwrap();
        assert_eq!(in_place, input);

        let off = DeepSorter::new(SortPolicy::default().with_sort_host_collections(false));
        assert_eq!(off.sort_value(&input, &Natural).unwrap(), input);
        assert_eq!(
            Value::Host(HostValue::new(frozen)).to_string(),
            "[[2, 1], [0, 5]]"
        );
    }

    #[test]
    fn test_failed_in_place_map_keeps_every_entry() {
        let mut map = Mapping::new();
        map.insert(Value::from(1), Value::seq([Value::from("x"), Value::from(0)]));
        map.insert(Value::from(2), Value::seq([3, 2]));
        let err = DeepSorter::default().sort_map_mut(&mut map, &Natural).unwrap_err();
        assert_eq!(err.depth, 1);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_key_function_sees_whole_entries() {
        // Order entries by value, descending, through the pair view.
        let input = Value::map([("a", 1), ("b", 3), ("c", 2)]);
        let by_value = ByKey::new(|e: Element<'_>| match e {
            Element::Entry(_, v) => -v.as_int().unwrap_or_default(),
            Element::Item(v) => v.as_int().unwrap_or_default(),
        });
        let sorted = DeepSorter::default().sort_value(&input, &by_value).unwrap();
        let keys: Vec<_> = sorted.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec![Value::from("b"), Value::from("c"), Value::from("a")]);
    }
}
