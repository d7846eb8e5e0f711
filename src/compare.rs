// Copyright 2025 Cowboy AI, LLC.

//! Natural ordering of values and the element view handed to key functions.
//!
//! The natural order is partial: values of different shapes (a mapping and
//! an integer, say) have no order, and asking for one yields a
//! [`ComparisonError`].

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::errors::{ComparisonError, DeepSortResult};
use crate::value::{float_bits, Value};

impl Value {
    /// Compare two values under the natural order.
    ///
    /// - numbers compare numerically across `Int` and `Float`; on a numeric
    ///   tie the integer sorts first, and NaN sorts after every number
    /// - strings compare bytewise, booleans as `false < true`
    /// - sequences compare lexicographically, then by length
    /// - mappings are only comparable when they are equal
    /// - host collections compare by projection
    pub fn try_cmp(&self, other: &Value) -> DeepSortResult<Ordering> {
        let ordering = match (self, other) {
            (Value::Nil, Value::Nil) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => cmp_floats(*a, *b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b).then(Ordering::Less),
            (Value::Float(a), Value::Int(b)) => {
                cmp_int_float(*b, *a).reverse().then(Ordering::Greater)
            }
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Seq(a), Value::Seq(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.try_cmp(y)? {
                        Ordering::Equal => continue,
                        other => return Ok(other),
                    }
                }
                a.len().cmp(&b.len())
            }
            (Value::Map(a), Value::Map(b)) if a == b => Ordering::Equal,
            (Value::Host(a), Value::Host(b)) => {
                return Ok(a
                    .project()
                    .try_cmp(&b.project())?
                    .then_with(|| a.type_name().cmp(b.type_name())));
            }
            _ => return Err(ComparisonError::new(self.inspect(), other.inspect())),
        };
        Ok(ordering)
    }
}

fn cmp_floats(a: f64, b: f64) -> Ordering {
    f64::from_bits(float_bits(a)).total_cmp(&f64::from_bits(float_bits(b)))
}

/// 2^63, the first float past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Exact comparison of an integer against a float, without rounding the
/// integer through `f64`.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() || float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }
    // In range, so the floor converts to i64 exactly.
    let floor = float.floor();
    match int.cmp(&(floor as i64)) {
        Ordering::Equal if float > floor => Ordering::Less,
        ordering => ordering,
    }
}

/// Agrees with `PartialEq`: `Some(Equal)` exactly when the values are equal.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

/// One element of a sort step, as seen by a key function.
///
/// Sequence steps hand out `Item`s; mapping steps hand out whole `Entry`
/// pairs, so a key function sees the key and the value together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    /// A sequence element
    Item(&'a Value),
    /// A mapping entry
    Entry(&'a Value, &'a Value),
}

impl<'a> Element<'a> {
    /// The sequence element, if this is an item.
    pub fn item(&self) -> Option<&'a Value> {
        match self {
            Element::Item(v) => Some(v),
            Element::Entry(..) => None,
        }
    }

    /// The entry key, if this is an entry.
    pub fn key(&self) -> Option<&'a Value> {
        match self {
            Element::Entry(k, _) => Some(k),
            Element::Item(_) => None,
        }
    }

    /// The entry value, if this is an entry.
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Element::Entry(_, v) => Some(v),
            Element::Item(_) => None,
        }
    }

    /// Owned form: the item itself, or `[key, value]` for an entry.
    pub fn to_value(&self) -> Value {
        match self {
            Element::Item(v) => (*v).clone(),
            Element::Entry(k, v) => Value::Seq(vec![(*k).clone(), (*v).clone()]),
        }
    }

    /// Natural order. Entries compare as `[key, value]` pairs.
    pub fn try_cmp(&self, other: &Element<'_>) -> DeepSortResult<Ordering> {
        match (self, other) {
            (Element::Item(a), Element::Item(b)) => a.try_cmp(b),
            (Element::Entry(ak, av), Element::Entry(bk, bv)) => match ak.try_cmp(bk)? {
                Ordering::Equal => av.try_cmp(bv),
                ordering => Ok(ordering),
            },
            (a, b) => Err(ComparisonError::new(a.to_string(), b.to_string())),
        }
    }
}

impl Display for Element<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Element::Item(v) => Display::fmt(v, f),
            Element::Entry(k, v) => write!(f, "[{}, {}]", k.inspect(), v.inspect()),
        }
    }
}
