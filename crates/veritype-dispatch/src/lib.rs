//! Curried dispatch over a [`veritype_solver::Judge`]-checked signature.
//!
//! This crate owns the calling convention (partial application,
//! placeholders, function-argument wrapping); `veritype-solver` owns what
//! "does this value satisfy this type" means and `veritype-diagnostics` owns
//! how a failure becomes text.

mod curried;
mod placeholder;

pub use curried::{Curried, TypeInfo};
pub use placeholder::{is_placeholder, placeholder};
