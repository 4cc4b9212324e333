//! Candidate-type inference and the type-variable constraint solver.
//!
//! This crate sits between the value/type vocabulary (`veritype-types`) and
//! the two consumers that need it: diagnostics (which renders a
//! [`SolverFailure`] into text) and dispatch (which drives [`Judge`] once
//! per curried argument). It knows nothing about rendering or currying.

pub mod infer;
pub mod judge;
pub mod type_var_map;

pub use infer::{infer, InferMode};
pub use judge::{Judge, SolverFailure};
pub use type_var_map::{update_type_var_map, Occurrence, OverConstrained, TypeVarEntry, TypeVarMap};

use veritype_types::Type;

/// Shared instance of the `Unknown` sentinel, used throughout inference and
/// refinement wherever a fresh, unobserved slot is needed.
pub fn unknown_singleton() -> Type {
    veritype_types::constructors::unknown()
}

/// Shared instance of the `Inconsistent` sentinel, used only by loose-mode
/// inference when no environment type is consistent with the observed
/// values.
pub fn inconsistent_singleton() -> Type {
    veritype_types::constructors::inconsistent()
}
