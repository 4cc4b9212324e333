//! The dynamic value universe.
//!
//! Every value the engine ever inspects — arguments, return values, the
//! members of an `EnumType` — is a [`Value`]. Host primitives get their own
//! variants; anything else (a user's `Maybe`, a custom `Functor` instance)
//! arrives as [`Value::Opaque`], a tagged escape hatch that extractors and
//! recognizers operate on the same as any other variant.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use veritype_common::TypeError;

/// A callable value. Boxed behind an `Rc` so `Value` stays cheap to clone
/// and so the same callable can be shared between an outer curried
/// signature and a wrapped callback argument (see the dispatch crate).
pub type CallableFn = dyn Fn(&[Value]) -> Result<Value, TypeError>;

/// An opaque, user-defined container value. `tag` is purely informational
/// (used in `Debug`/diagnostic output); `data` lets user code round-trip
/// its own representation through a `downcast_ref`.
pub struct OpaqueObject {
    pub tag: String,
    pub data: Box<dyn Any>,
}

impl fmt::Debug for OpaqueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.tag)
    }
}

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Record(Rc<RefCell<IndexMap<String, Value>>>),
    Function(Rc<CallableFn>),
    Opaque(Rc<OpaqueObject>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Rc::from(s.into()))
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(values)))
    }

    pub fn record(fields: IndexMap<String, Value>) -> Self {
        Value::Record(Rc::new(RefCell::new(fields)))
    }

    pub fn function(f: impl Fn(&[Value]) -> Result<Value, TypeError> + 'static) -> Self {
        Value::Function(Rc::new(f))
    }

    pub fn opaque(tag: impl Into<String>, data: impl Any) -> Self {
        Value::Opaque(Rc::new(OpaqueObject {
            tag: tag.into(),
            data: Box::new(data),
        }))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Identity used for cycle detection during candidate-type inference.
    /// Scalars have no shareable identity and are never cyclic, so they
    /// report `None` — only heap-allocated containers can participate in a
    /// value cycle.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Record(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Opaque(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Function(rc) => Some(Rc::as_ptr(rc) as *const () as *const () as usize),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        }
    }

    /// Index into a record by field name; used by `RecordType`'s extractor.
    pub fn get_field(&self, key: &str) -> Option<Value> {
        match self {
            Value::Record(fields) => fields.borrow().get(key).cloned(),
            _ => None,
        }
    }

    pub fn has_field(&self, key: &str) -> bool {
        match self {
            Value::Record(fields) => fields.borrow().contains_key(key),
            _ => false,
        }
    }
}

/// Deep structural equality, used by `EnumType` membership. Functions
/// compare by identity (two callables are never structurally equal unless
/// they are literally the same closure); opaque values compare by identity
/// too, since we cannot generically inspect their boxed payload.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Record(a), Value::Record(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Function(_) => write!(f, "function"),
            Value::Opaque(obj) => write!(f, "{}", obj.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_compare_structurally_not_by_identity() {
        let a = Value::array(vec![Value::Number(1.0), Value::Number(2.0)]);
        let b = Value::array(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn identity_distinguishes_two_structurally_equal_arrays() {
        let a = Value::array(vec![Value::Number(1.0)]);
        let b = Value::array(vec![Value::Number(1.0)]);
        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.identity(), a.identity());
    }

    #[test]
    fn scalars_have_no_identity() {
        assert_eq!(Value::Number(1.0).identity(), None);
        assert_eq!(Value::Null.identity(), None);
    }
}
