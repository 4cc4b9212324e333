//! Curried dispatch: a `def`-built signature turned into a chain of
//! partially-applicable calls, each argument checked against its declared
//! type as soon as it is supplied.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use veritype_common::{TypeError, TypeErrorKind};
use veritype_solver::{Judge, SolverFailure, TypeVarMap};
use veritype_types::{Kind, Type, TypeClass, Value};

use crate::placeholder::is_placeholder;

/// Everything a curried call needs: its display name, the curried
/// parameter/return types (`types.last()` is the return type, matching
/// `function_type`'s own convention), the type-class constraints declared
/// per type-variable name, the candidate-type environment, and the actual
/// Rust closure supplied by the caller of `def`.
pub struct TypeInfo {
    pub name: String,
    pub types: Vec<Type>,
    pub constraints: IndexMap<String, Vec<TypeClass>>,
    pub env: Vec<Type>,
    /// When false, dispatch reduces to plain currying with no solver
    /// activity at all — the global type-checking toggle from `Options`.
    pub checked: bool,
    pub implementation: Box<dyn Fn(&[Value]) -> Result<Value, TypeError>>,
}

impl TypeInfo {
    pub fn arity(&self) -> usize {
        self.types.len() - 1
    }

    fn ctx(&self) -> veritype_diagnostics::SignatureContext<'_> {
        veritype_diagnostics::SignatureContext {
            def_name: &self.name,
            param_types: &self.types[..self.types.len() - 1],
            constraints: &self.constraints,
            env: &self.env,
        }
    }

    fn render(&self, failure: SolverFailure) -> TypeError {
        veritype_diagnostics::render(&failure, &self.ctx())
    }

    fn arity_error(&self, received: &[Value]) -> TypeError {
        self.render(SolverFailure::WrongArity {
            param_index: None,
            expected: self.arity(),
            received: received.to_vec(),
        })
    }
}

/// One curried application in progress: some positional slots filled,
/// others open (either never supplied, or explicitly held open with
/// [`crate::placeholder`]).
#[derive(Clone)]
pub struct Curried {
    info: Rc<TypeInfo>,
    applied: Vec<Option<Value>>,
    map: TypeVarMap,
}

impl Curried {
    pub fn new(info: Rc<TypeInfo>) -> Self {
        let arity = info.arity();
        Curried {
            applied: vec![None; arity],
            info,
            map: TypeVarMap::new(),
        }
    }

    /// Supply the next batch of arguments. Returns either a further
    /// [`Value::Function`] (if slots remain open) or the implementation's
    /// validated return value.
    pub fn call(&self, args: &[Value]) -> Result<Value, TypeError> {
        let mut next_applied = self.applied.clone();
        let mut map = self.map.clone();
        let mut args_iter = args.iter();

        for (i, slot) in next_applied.iter_mut().enumerate() {
            if slot.is_some() {
                continue;
            }
            let Some(value) = args_iter.next() else {
                break;
            };
            if is_placeholder(value) {
                continue;
            }
            if self.info.checked {
                let judge = Judge::new(&self.info.env);
                map = judge
                    .check_argument(&self.info.constraints, &self.info.types[i], i, value, map)
                    .map_err(|failure| self.info.render(failure))?;
            }
            *slot = Some(value.clone());
        }

        if args_iter.next().is_some() {
            return Err(self.info.arity_error(args));
        }

        if next_applied.iter().any(Option::is_none) {
            tracing::debug!(name = %self.info.name, "partial application");
            return Ok(Curried {
                info: self.info.clone(),
                applied: next_applied,
                map,
            }
            .to_value());
        }

        self.invoke(next_applied, map)
    }

    fn invoke(&self, applied: Vec<Option<Value>>, map: TypeVarMap) -> Result<Value, TypeError> {
        tracing::debug!(name = %self.info.name, "curry completed, invoking implementation");
        let shared_map = Rc::new(RefCell::new(map));
        let values: Vec<Value> = applied
            .into_iter()
            .enumerate()
            .map(|(i, v)| wrap_if_function(&self.info, i, v.expect("all slots filled"), &shared_map))
            .collect();

        let result = (self.info.implementation)(&values)?;

        if self.info.checked {
            let return_index = self.info.arity();
            let current = shared_map.borrow().clone();
            let judge = Judge::new(&self.info.env);
            judge
                .check_argument(
                    &self.info.constraints,
                    self.info.types.last().expect("def requires a return type"),
                    return_index,
                    &result,
                    current,
                )
                .map_err(|failure| self.info.render(failure))?;
        }
        Ok(result)
    }

    /// Lift this partial application into a callable [`Value`] so it can
    /// travel through the same `Value::Function` channel as any other
    /// function value.
    pub fn to_value(self) -> Value {
        let this = self;
        Value::function(move |args| this.call(args))
    }
}

/// If `types[param_index]` is a `Function` type, wrap the supplied callable
/// so every invocation checks its own arguments/return against the declared
/// inner types, sharing `shared` with the rest of this call — a type
/// variable exercised only inside the callback still narrows the same map
/// used for the callback's sibling parameters.
fn wrap_if_function(
    info: &Rc<TypeInfo>,
    param_index: usize,
    value: Value,
    shared: &Rc<RefCell<TypeVarMap>>,
) -> Value {
    let expected = info.types[param_index].clone();
    if !info.checked || expected.kind() != Kind::Function {
        return value;
    }
    let Value::Function(inner) = value else {
        return value;
    };
    let info = info.clone();
    let shared = shared.clone();
    Value::function(move |inner_args| {
        let judge = Judge::new(&info.env);
        let keys = expected.keys();
        let (param_keys, ret_key) = keys.split_at(keys.len() - 1);

        if inner_args.len() != param_keys.len() {
            return Err(info.render(SolverFailure::WrongArity {
                param_index: Some(param_index),
                expected: param_keys.len(),
                received: inner_args.to_vec(),
            }));
        }

        for (j, key) in param_keys.iter().enumerate() {
            let sub = &expected.child(key).expect("declared key has a child").subtype;
            let value = &inner_args[j];
            let current = shared.borrow().clone();
            let next = judge
                .check_argument(&info.constraints, sub, param_index, value, current)
                .map_err(|failure| info.render(failure))?;
            *shared.borrow_mut() = next;
        }

        let result = (inner)(inner_args)?;

        let ret_sub = &expected
            .child(&ret_key[0])
            .expect("declared key has a child")
            .subtype;
        let current = shared.borrow().clone();
        let next = judge
            .check_argument(&info.constraints, ret_sub, param_index, &result, current)
            .map_err(|failure| info.render(failure))?;
        *shared.borrow_mut() = next;

        Ok(result)
    })
}
