//! The type-class interface consumed by the engine.
//!
//! A type class is nothing more than a name and a predicate — a collaborator
//! accessed through a small interface, not something this crate implements
//! instances of.

use std::fmt;
use std::rc::Rc;

use crate::Value;

/// `{name, test(value) -> bool}`. Implementors are typically a single
/// closure wrapped via [`TypeClass::new`]; the trait exists so callers can
/// also hand in a richer type with its own `test` logic.
pub trait TypeClassCheck {
    fn name(&self) -> &str;
    fn test(&self, value: &Value) -> bool;
}

/// A concrete, shareable type class built from a name and a predicate
/// closure — the common case (`Semigroup`, `Functor`, ...).
#[derive(Clone)]
pub struct TypeClass {
    name: Rc<str>,
    test: Rc<dyn Fn(&Value) -> bool>,
}

impl TypeClass {
    pub fn new(name: impl Into<String>, test: impl Fn(&Value) -> bool + 'static) -> Self {
        TypeClass {
            name: Rc::from(name.into()),
            test: Rc::new(test),
        }
    }
}

impl TypeClassCheck for TypeClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }
}

impl fmt::Debug for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeClass({})", self.name)
    }
}
