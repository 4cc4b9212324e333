//! Veritype: a run-time type-checking engine for curried, dynamically typed
//! functions.
//!
//! ```text
//! let engine = veritype::create(veritype::Options::default());
//! let add = engine
//!     .call("add", Default::default(), vec![number(), number(), number()],
//!           |args| ...)
//!     .unwrap();
//! ```
//!
//! This crate is the facade: it binds an environment and a type-checking
//! toggle (`create`), exposes the `def`-style factory (`Def::call`), and
//! re-exports the constructors, the placeholder sentinel, and the built-in
//! type catalog. The actual engine lives in `veritype-types`
//! (representation/constructors), `veritype-solver` (inference/solving),
//! `veritype-dispatch` (currying), and `veritype-diagnostics` (rendering).

pub mod catalog;

use std::rc::Rc;

use indexmap::IndexMap;

use veritype_common::{TypeError, TypeErrorKind, MAX_ARITY};
use veritype_dispatch::TypeInfo;
use veritype_types::{Type, TypeClass, Value};

pub use veritype_dispatch::{is_placeholder, placeholder, Curried};
pub use veritype_solver::Judge;
pub use veritype_types::constructors::{
    binary_type, binary_type_variable, enum_type, function_type, inconsistent, nullary_type,
    record_type, type_variable, unary_type, unary_type_variable, unknown,
};
pub use veritype_types::{Kind, TypeClassCheck};

/// The engine-wide configuration bound by [`create`]: whether dispatch
/// actually runs the solver, and the candidate-type environment it solves
/// against.
#[derive(Clone)]
pub struct Options {
    pub check_types: bool,
    pub env: Vec<Type>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            check_types: true,
            env: catalog::default_env(),
        }
    }
}

/// A bound environment and type-checking toggle, ready to mint typed
/// callables via [`Def::call`].
pub struct Def {
    options: Options,
}

/// Bind an environment and a type-checking toggle.
pub fn create(options: Options) -> Def {
    Def { options }
}

impl Def {
    /// The spec's `def(name, constraints, types, impl)` factory:
    /// `types.last()` is the return type, earlier elements are the curried
    /// parameter types. Returns a callable [`Value`] of arity
    /// `types.len() - 1`.
    pub fn call(
        &self,
        name: impl Into<String>,
        constraints: IndexMap<String, Vec<TypeClass>>,
        types: Vec<Type>,
        implementation: impl Fn(&[Value]) -> Result<Value, TypeError> + 'static,
    ) -> Result<Value, TypeError> {
        let name = name.into();
        if types.is_empty() {
            return Err(TypeError::new(
                TypeErrorKind::MalformedTypeConstruction,
                format!("{name} declares no types; def requires at least a return type"),
            ));
        }
        let arity = types.len() - 1;
        if arity > MAX_ARITY {
            return Err(TypeError::new(
                TypeErrorKind::Range,
                format!(
                    "{name} declares arity {arity}, exceeding the maximum of {MAX_ARITY}"
                ),
            ));
        }
        tracing::debug!(name = %name, arity, "defining curried callable");
        let info = Rc::new(TypeInfo {
            name,
            types,
            constraints,
            env: self.options.env.clone(),
            checked: self.options.check_types,
            implementation: Box::new(implementation),
        });
        Ok(Curried::new(info).to_value())
    }
}

/// The `test(env, type, value) -> bool` convenience from the spec's
/// external interface: membership using the full solver, with no variable
/// bookkeeping surfaced.
pub fn test(env: &[Type], ty: &Type, value: &Value) -> bool {
    Judge::new(env).test(ty, value)
}
