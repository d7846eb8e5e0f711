//! # Deep Sort
//!
//! Recursive sorting for nested, heterogeneous structures built from
//! sequences and key-value mappings.
//!
//! A deep sort orders every sequence at every depth, innermost first, and
//! reorders every mapping's entries. Ordering comes from the natural order of
//! values or from a key function. Nothing is added, dropped, or duplicated:
//! the output holds exactly the leaves of the input.
//!
//! - **Value**: dynamic model of scalars, sequences, mappings, and host collections
//! - **DeepSort / DeepSortMut**: copying and in-place capabilities
//! - **Collation**: natural order, or ordering by a projected key
//! - **HostCollection**: extension point for containers the engine cannot see into
//! - **SortPolicy**: which parts of a structure are touched
//!
//! ## Usage
//!
//! ```
//! use deep_sort::{DeepSort, DeepSortMut, Value};
//!
//! let value = Value::map([(2, Value::from(4)), (1, Value::seq([3, 2]))]);
//! let sorted = value.deep_sort().unwrap();
//! assert_eq!(sorted.to_string(), "{1 => [2, 3], 2 => 4}");
//!
//! // A mapping and an integer have no natural order...
//! let mixed = Value::seq([Value::map([(2, 3)]), Value::from(1)]);
//! assert!(mixed.deep_sort().is_err());
//!
//! // ...but their string renderings do.
//! let sorted = mixed.deep_sort_by(|e| e.to_string()).unwrap();
//! assert_eq!(sorted.to_string(), "[1, {2 => 3}]");
//!
//! let mut items = vec![Value::from(2), Value::from(1)];
//! items.deep_sort_mut().unwrap();
//! assert_eq!(items, vec![Value::from(1), Value::from(2)]);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Bottom-up**: children are sorted before their parent compares them
//! 2. **Capability dispatch**: containers recurse, host collections sort one
//!    level, everything else is left as is
//! 3. **Fail whole**: an incomparable pair anywhere aborts the whole call
//! 4. **Stable**: ties keep their input order

#![warn(missing_docs)]

mod collation;
mod compare;
mod dispatch;
mod engine;
mod errors;
mod host;
mod policy;
mod traits;
mod value;
mod value_serde;

pub use collation::{apply_permutation, stable_permutation, ByKey, Collation, Natural};
pub use compare::Element;
pub use dispatch::{deep_sort, deep_sort_mut};
pub use engine::DeepSorter;
pub use errors::{ComparisonError, DeepSortResult, JsonConversionError};
pub use host::{FrozenSeq, HostCollection, HostValue, SortBy, SortByMut};
pub use policy::SortPolicy;
pub use traits::{DeepSort, DeepSortMut};
pub use value::{Mapping, Value, ValueKind};
