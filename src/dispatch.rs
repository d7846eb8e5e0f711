// Copyright 2025 Cowboy AI, LLC.

//! Free-function entry points that accept any value.
//!
//! Containers are deep-sorted. Host collections get their own single-level
//! sort under the natural order. Everything else comes back unchanged: these
//! functions never fail because a value is not sortable, only because its
//! contents are not mutually comparable.

use tracing::trace;

use crate::collation::Natural;
use crate::errors::DeepSortResult;
use crate::traits::{DeepSort, DeepSortMut};
use crate::value::Value;

/// Deep-sort any value, returning a sorted copy.
pub fn deep_sort(value: &Value) -> DeepSortResult<Value> {
    match value {
        Value::Seq(_) | Value::Map(_) => value.deep_sort(),
        Value::Host(host) => match host.as_sort_by() {
            Some(sortable) => sortable.sort_by(&Natural).map(Value::Host),
            None => {
                trace!(host = host.type_name(), "not sortable, returning unchanged");
                Ok(value.clone())
            }
        },
        _ => {
            trace!(kind = value.kind().name(), "not sortable, returning unchanged");
            Ok(value.clone())
        }
    }
}

/// Deep-sort any value in place, returning the same reference.
pub fn deep_sort_mut(value: &mut Value) -> DeepSortResult<&mut Value> {
    match value {
        Value::Seq(_) | Value::Map(_) => value.deep_sort_mut(),
        Value::Host(host) => {
            let type_name = host.type_name();
            match host.as_sort_by_mut() {
                Some(sortable) => sortable.sort_by_mut(&Natural)?,
                None => trace!(host = type_name, "not sortable in place, leaving unchanged"),
            }
            Ok(value)
        }
        _ => {
            trace!(kind = value.kind().name(), "not sortable, leaving unchanged");
            Ok(value)
        }
    }
}
