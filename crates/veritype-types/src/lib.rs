//! The dynamic value universe, the `Type` representation, and the type
//! constructors used to build one. This crate knows nothing about
//! inference, solving, currying, or diagnostics — it is the vocabulary the
//! rest of the engine is built from.

pub mod constructors;
pub mod kind;
pub mod type_class;
pub mod type_def;
pub mod value;

pub use kind::{Child, Extractor, Kind, PlainStyler, Recognizer, Styler};
pub use type_class::{TypeClass, TypeClassCheck};
pub use type_def::{Type, ValidationFailure};
pub use value::{CallableFn, OpaqueObject, Value};
