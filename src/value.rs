// Copyright 2025 Cowboy AI, LLC.

//! Dynamic value model for nested, heterogeneous containers.
//!
//! A [`Value`] is either a scalar, a sequence, a mapping, or a host-defined
//! sortable collection. Mappings keep insertion order so that the entry
//! order produced by a deep sort is observable, and their keys may be any
//! `Value`, including sequences and other mappings.

use std::collections::hash_map::DefaultHasher;
use std::fmt::{self, Display, Formatter, Write as _};
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::host::HostValue;

/// Ordered key-value collection with unique keys.
pub type Mapping = IndexMap<Value, Value>;

/// A nested, heterogeneous value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Nil,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// String scalar
    Str(String),
    /// Ordered sequence of values
    Seq(Vec<Value>),
    /// Key-value mapping
    Map(Mapping),
    /// Host-defined sortable collection
    Host(HostValue),
}

/// Shape of a [`Value`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Nil`]
    Nil,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Float`]
    Float,
    /// [`Value::Str`]
    Str,
    /// [`Value::Seq`]
    Seq,
    /// [`Value::Map`]
    Map,
    /// [`Value::Host`]
    Host,
}

impl ValueKind {
    /// Lowercase name of the shape, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Seq => "seq",
            Self::Map => "map",
            Self::Host => "host",
        }
    }
}

impl Value {
    /// Build a sequence from anything convertible into values.
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Build a mapping from `(key, value)` pairs. Later duplicates replace
    /// earlier ones but keep the earlier position.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Seq(_) => ValueKind::Seq,
            Value::Map(_) => ValueKind::Map,
            Value::Host(_) => ValueKind::Host,
        }
    }

    /// True for values that are neither containers nor host collections.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Seq(_) | Value::Map(_) | Value::Host(_))
    }

    /// True for [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrow the elements of a sequence.
    pub fn as_seq(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Mutably borrow the elements of a sequence.
    pub fn as_seq_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the entries of a mapping.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Mutably borrow the entries of a mapping.
    pub fn as_map_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow a host collection.
    pub fn as_host(&self) -> Option<&HostValue> {
        match self {
            Value::Host(host) => Some(host),
            _ => None,
        }
    }

    /// Integer contents, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float contents, if this is a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Boolean contents, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Every leaf scalar reachable from this value, mapping keys included.
    ///
    /// Host collections count as a single leaf.
    pub fn leaves(&self) -> impl Iterator<Item = &Value> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out.into_iter()
    }

    /// Literal rendering with strings quoted at every level.
    pub fn inspect(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_literal(&mut out, self, true);
        out
    }
}

fn collect_leaves<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Seq(items) => items.iter().for_each(|item| collect_leaves(item, out)),
        Value::Map(map) => {
            for (k, v) in map {
                collect_leaves(k, out);
                collect_leaves(v, out);
            }
        }
        leaf => out.push(leaf),
    }
}

/// Bit pattern used for float equality and hashing: `-0.0` folds into
/// `0.0` and every NaN folds into one canonical NaN.
pub(crate) fn float_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits(*a) == float_bits(*b),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            // Entry order is not part of mapping equality.
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Host(a), Value::Host(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => float_bits(*f).hash(state),
            Value::Str(s) => s.hash(state),
            Value::Seq(items) => items.hash(state),
            Value::Map(map) => {
                // Order independent, to agree with `PartialEq`.
                let combined = map.iter().fold(0u64, |acc, (k, v)| {
                    let mut entry = DefaultHasher::new();
                    k.hash(&mut entry);
                    v.hash(&mut entry);
                    acc.wrapping_add(entry.finish())
                });
                map.len().hash(state);
                combined.hash(state);
            }
            Value::Host(host) => host.hash(state),
        }
    }
}

fn write_literal(out: &mut impl fmt::Write, value: &Value, quote_strings: bool) -> fmt::Result {
    match value {
        Value::Nil => out.write_str("nil"),
        Value::Bool(b) => write!(out, "{b}"),
        Value::Int(i) => write!(out, "{i}"),
        Value::Float(f) => write!(out, "{f:?}"),
        Value::Str(s) if quote_strings => write!(out, "{s:?}"),
        Value::Str(s) => out.write_str(s),
        Value::Seq(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_literal(out, item, true)?;
            }
            out.write_char(']')
        }
        Value::Map(map) => {
            out.write_char('{')?;
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_literal(out, k, true)?;
                out.write_str(" => ")?;
                write_literal(out, v, true)?;
            }
            out.write_char('}')
        }
        Value::Host(host) => write_literal(out, &host.project(), quote_strings),
    }
}

/// Literal rendering: `nil`, `[1, 2]`, `{2 => 3}`. A top-level string is
/// written bare, nested strings are quoted.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_literal(f, self, false)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::seq(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Map(map)
    }
}

impl From<HostValue> for Value {
    fn from(host: HostValue) -> Self {
        Value::Host(host)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Seq(iter.into_iter().collect())
    }
}

impl FromIterator<(Value, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().collect())
    }
}
