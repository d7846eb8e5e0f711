// Copyright 2025 Cowboy AI, LLC.

//! Comparison strategies and the stable sort primitive behind them.
//!
//! A [`Collation`] decides the order of the elements of one sort step. The
//! engine never compares values itself; it asks the collation for a
//! permutation and applies it, either by moving values into a new container
//! or by swapping them in place.

use std::cmp::Ordering;
use std::fmt;

use crate::compare::Element;
use crate::errors::{ComparisonError, DeepSortResult};

/// Runs of this length or shorter are sorted by insertion.
const INSERTION_THRESHOLD: usize = 16;

/// Ordering strategy for one level of a deep sort.
pub trait Collation {
    /// Stable ascending order of `elements`, as a list of source indices:
    /// position `i` of the result names the element that belongs at `i`.
    fn permutation(&self, elements: &[Element<'_>]) -> DeepSortResult<Vec<usize>>;
}

/// The natural order of values. Equivalent to an identity key function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl Collation for Natural {
    fn permutation(&self, elements: &[Element<'_>]) -> DeepSortResult<Vec<usize>> {
        stable_permutation(elements, |a, b| a.try_cmp(b))
    }
}

/// Order by a key projected from each element.
///
/// Keys are computed once per element per sort step. Two keys whose
/// `partial_cmp` is `None` fail the step with a [`ComparisonError`].
pub struct ByKey<F> {
    key: F,
}

impl<F> ByKey<F> {
    /// Wrap a key extraction function.
    pub fn new(key: F) -> Self {
        Self { key }
    }
}

impl<F> fmt::Debug for ByKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByKey").finish_non_exhaustive()
    }
}

impl<F, K> Collation for ByKey<F>
where
    F: Fn(Element<'_>) -> K,
    K: PartialOrd + fmt::Debug,
{
    fn permutation(&self, elements: &[Element<'_>]) -> DeepSortResult<Vec<usize>> {
        let keys: Vec<K> = elements.iter().map(|element| (self.key)(*element)).collect();
        stable_permutation(&keys, |a, b| {
            a.partial_cmp(b)
                .ok_or_else(|| ComparisonError::new(format!("{a:?}"), format!("{b:?}")))
        })
    }
}

/// Stable merge sort over indices with a fallible comparator.
///
/// Stops at the first failed comparison. `slice::sort_by` is not usable
/// here because it may panic when the comparator is not a total order.
pub fn stable_permutation<T, C>(items: &[T], mut cmp: C) -> DeepSortResult<Vec<usize>>
where
    C: FnMut(&T, &T) -> DeepSortResult<Ordering>,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    if order.len() > 1 {
        let mut scratch = order.clone();
        merge_sort(&mut order, &mut scratch, items, &mut cmp)?;
    }
    Ok(order)
}

fn merge_sort<T, C>(
    order: &mut [usize],
    scratch: &mut [usize],
    items: &[T],
    cmp: &mut C,
) -> DeepSortResult<()>
where
    C: FnMut(&T, &T) -> DeepSortResult<Ordering>,
{
    let len = order.len();
    if len <= INSERTION_THRESHOLD {
        return insertion_sort(order, items, cmp);
    }

    let mid = len / 2;
    {
        let (lo, hi) = order.split_at_mut(mid);
        let (scratch_lo, scratch_hi) = scratch.split_at_mut(mid);
        merge_sort(lo, scratch_lo, items, cmp)?;
        merge_sort(hi, scratch_hi, items, cmp)?;
    }

    // Halves already in order across the seam.
    if cmp(&items[order[mid - 1]], &items[order[mid]])? != Ordering::Greater {
        return Ok(());
    }

    scratch.copy_from_slice(order);
    let (lo, hi) = scratch.split_at(mid);
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < lo.len() && j < hi.len() {
        // Take from the right half only when strictly smaller.
        if cmp(&items[hi[j]], &items[lo[i]])? == Ordering::Less {
            order[k] = hi[j];
            j += 1;
        } else {
            order[k] = lo[i];
            i += 1;
        }
        k += 1;
    }
    let rest_lo = &lo[i..];
    order[k..k + rest_lo.len()].copy_from_slice(rest_lo);
    k += rest_lo.len();
    order[k..].copy_from_slice(&hi[j..]);
    Ok(())
}

fn insertion_sort<T, C>(order: &mut [usize], items: &[T], cmp: &mut C) -> DeepSortResult<()>
where
    C: FnMut(&T, &T) -> DeepSortResult<Ordering>,
{
    for i in 1..order.len() {
        let mut j = i;
        while j > 0 && cmp(&items[order[j]], &items[order[j - 1]])? == Ordering::Less {
            order.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

/// Reorder `items` in place so that `items[i]` becomes the element that was
/// at `perm[i]`. Walks each cycle of the permutation with `swap`.
pub fn apply_permutation<T>(items: &mut [T], perm: &[usize]) {
    debug_assert_eq!(items.len(), perm.len());
    let mut placed = vec![false; perm.len()];
    for start in 0..perm.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let next = perm[current];
            if next == start {
                break;
            }
            items.swap(current, next);
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use proptest::prelude::*;

    fn items(values: &[Value]) -> Vec<Element<'_>> {
        values.iter().map(Element::Item).collect()
    }

    #[test]
    fn test_natural_permutation_is_stable() {
        let values = vec![Value::from(2), Value::from(1), Value::from(2.0), Value::from(1)];
        let order = Natural.permutation(&items(&values)).unwrap();
        // 1 (idx 1) and 1 (idx 3) keep their relative order; Int 2 before Float 2.0.
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_by_key_failure_reports_both_keys() {
        let values = vec![Value::from(1), Value::from("a")];
        let err = ByKey::new(|e: Element<'_>| e.to_value())
            .permutation(&items(&values))
            .unwrap_err();
        assert_eq!(err.left, "Str(\"a\")");
        assert_eq!(err.right, "Int(1)");
    }

    #[test]
    fn test_by_key_string_projection() {
        let values = vec![Value::map([(2, 3)]), Value::from(1)];
        let order = ByKey::new(|e: Element<'_>| e.to_string())
            .permutation(&items(&values))
            .unwrap();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_apply_permutation_follows_cycles() {
        let mut letters = vec!['c', 'a', 'd', 'b'];
        apply_permutation(&mut letters, &[1, 3, 0, 2]);
        assert_eq!(letters, vec!['a', 'b', 'c', 'd']);
    }

    proptest! {
        #[test]
        fn permutation_matches_std_stable_sort(keys in proptest::collection::vec((0i32..8, any::<u16>()), 0..200)) {
            let order = stable_permutation(&keys, |a, b| Ok(a.0.cmp(&b.0))).unwrap();
            let mut sorted = keys.clone();
            apply_permutation(&mut sorted, &order);

            let mut expected = keys.clone();
            expected.sort_by_key(|k| k.0);
            prop_assert_eq!(sorted, expected);
        }
    }
}
