//! A fixed table of pre-built nullary/unary types built on top of the
//! constructors in `veritype-types`. Not core to the engine — a convenience
//! collaborator, same as the teacher's own built-in lib declarations.

use veritype_types::constructors::{nullary_type, unary_type, unknown};
use veritype_types::{Type, Value};

pub fn boolean() -> Type {
    nullary_type("Boolean", |v| matches!(v, Value::Bool(_)))
}

pub fn number() -> Type {
    nullary_type("Number", |v| matches!(v, Value::Number(_)))
}

pub fn string() -> Type {
    nullary_type("String", |v| matches!(v, Value::String(_)))
}

pub fn finite_number() -> Type {
    nullary_type("FiniteNumber", |v| {
        matches!(v, Value::Number(n) if n.is_finite())
    })
}

pub fn integer() -> Type {
    nullary_type("Integer", |v| {
        matches!(v, Value::Number(n) if n.is_finite() && n.fract() == 0.0)
    })
}

pub fn non_zero_integer() -> Type {
    nullary_type("NonZeroInteger", |v| {
        matches!(v, Value::Number(n) if n.is_finite() && n.fract() == 0.0 && *n != 0.0)
    })
}

/// `Array $1`: membership requires every element to inhabit `$1`.
pub fn array_of(element: Type) -> Type {
    (unary_type(
        "Array",
        |v| matches!(v, Value::Array(_)),
        |v| match v {
            Value::Array(items) => items.borrow().clone(),
            _ => Vec::new(),
        },
    ))(element)
}

/// `Nullable $1`: `null` is always a member; any other value must inhabit
/// `$1`. Excluded by name from candidate-type inference (see
/// `veritype_solver::infer`) so it cannot dominate inference by vacuously
/// matching everything once its own child has narrowed to `Unknown`.
pub fn nullable(element: Type) -> Type {
    (unary_type(
        "Nullable",
        |_v| true,
        |v| match v {
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        },
    ))(element)
}

/// The default environment `Options` uses when callers don't supply their
/// own: the scalar catalog plus an `Array` template whose element type
/// starts `Unknown` and is narrowed by inference/solving as values arrive.
pub fn default_env() -> Vec<Type> {
    vec![
        boolean(),
        number(),
        string(),
        finite_number(),
        integer(),
        non_zero_integer(),
        array_of(unknown()),
    ]
}
