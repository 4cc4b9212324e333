//! The error taxonomy.
//!
//! Every failure the engine can produce collapses into a single "type
//! error" category with a distinguishing [`TypeErrorKind`] and a rendered,
//! human-readable banner. Higher crates (`veritype-diagnostics`) own the
//! rendering; this crate only owns the shape callers match on.

use std::fmt;

/// Which of the six taxonomy entries a [`TypeError`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeErrorKind {
    /// Structural membership failed for a value against its expected type.
    InvalidValue,
    /// A type-variable-bound value failed a declared type-class predicate.
    TypeClassViolation,
    /// No environment type is consistent with every observed use of a
    /// type variable.
    TypeVariableViolation,
    /// Too few or too many arguments supplied to a curried callable
    /// (includes wrapped function-typed arguments).
    WrongArityAtCall,
    /// `types.len() - 1` exceeded [`crate::MAX_ARITY`] at definition time.
    Range,
    /// A type constructor was given malformed input, e.g. `RecordType`
    /// mapping a field to a non-type.
    MalformedTypeConstruction,
}

/// A single rendered type error. The `message` is the full multi-line
/// banner (signature line, caret line, label line, body) produced by
/// `veritype-diagnostics`; it is stable enough to snapshot-test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub message: String,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, message: impl Into<String>) -> Self {
        TypeError {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TypeError {}
