//! Centralized limits for the engine.
//!
//! A pragmatic cap matched by the curried-dispatch arity-shaping helper; an
//! implementation may raise it without behavioural change.

/// Maximum number of positional parameters a signature may declare
/// (i.e. `types.len() - 1`). Definitions beyond this raise
/// [`crate::TypeError::Range`].
pub const MAX_ARITY: usize = 9;
