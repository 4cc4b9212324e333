//! The type-variable constraint solver: walks an expected [`Type`] against
//! observed values, threading a [`TypeVarMap`] forward so that two
//! occurrences of the same variable (`a -> a -> Boolean`) are checked for
//! mutual consistency rather than independently.

use indexmap::IndexMap;

use veritype_common::path::{PathSegment, PropPath};
use veritype_types::{Kind, Type, TypeClass, TypeClassCheck, Value};

use crate::type_var_map::{update_type_var_map, Occurrence};
use crate::TypeVarMap;

/// Why an argument (or return value) failed to satisfy its expected type.
/// Carries only data, no rendered text — `veritype-diagnostics` turns this
/// into a formatted [`veritype_common::TypeError`] once it has the wider
/// signature context a banner needs.
#[derive(Clone, Debug)]
pub enum SolverFailure {
    InvalidValue {
        param_index: usize,
        path: PropPath,
        value: Value,
        expected: Type,
    },
    TypeClassViolation {
        param_index: usize,
        path: PropPath,
        value: Value,
        var_name: String,
        class_name: String,
    },
    TypeVariableViolation {
        var_name: String,
        values_by_path: Vec<(Occurrence, Vec<Value>)>,
    },
    /// Too many/too few arguments supplied. `param_index` is the outer
    /// signature slot whose declared `Function` type was mis-invoked, or
    /// `None` when the mismatch is at the outer curried call itself.
    WrongArity {
        param_index: Option<usize>,
        expected: usize,
        received: Vec<Value>,
    },
}

/// Per-call solver state: the environment candidate types a bare type
/// variable may resolve to. Stateless otherwise — every call threads its
/// own [`TypeVarMap`] explicitly.
pub struct Judge<'a> {
    env: &'a [Type],
}

impl<'a> Judge<'a> {
    pub fn new(env: &'a [Type]) -> Self {
        Judge { env }
    }

    /// Check one curried argument at `param_index` against `expected`,
    /// threading `map` forward. `constraints` maps a type-variable name to
    /// the type classes it must satisfy (from `def`'s declared signature).
    pub fn check_argument(
        &self,
        constraints: &IndexMap<String, Vec<TypeClass>>,
        expected: &Type,
        param_index: usize,
        value: &Value,
        map: TypeVarMap,
    ) -> Result<TypeVarMap, SolverFailure> {
        walk(
            expected,
            param_index,
            PropPath::root(),
            std::slice::from_ref(value),
            map,
            self.env,
            constraints,
        )
    }

    /// The standalone membership test exposed to library users: does
    /// `value` inhabit `ty`, with no type-variable bookkeeping surfaced.
    pub fn test(&self, ty: &Type, value: &Value) -> bool {
        let no_constraints = IndexMap::new();
        self.check_argument(&no_constraints, ty, 0, value, TypeVarMap::new())
            .is_ok()
    }
}

fn walk(
    expected: &Type,
    param_index: usize,
    path: PropPath,
    values: &[Value],
    map: TypeVarMap,
    env: &[Type],
    constraints: &IndexMap<String, Vec<TypeClass>>,
) -> Result<TypeVarMap, SolverFailure> {
    match expected.kind() {
        Kind::Variable => solve_variable(expected, param_index, path, values, map, env, constraints),
        Kind::Nullary | Kind::Enum | Kind::Function => {
            for value in values {
                if let Err(failure) = expected.validate(value) {
                    return Err(SolverFailure::InvalidValue {
                        param_index,
                        path: path.join(&failure.path),
                        value: failure.value,
                        expected: expected.clone(),
                    });
                }
            }
            Ok(map)
        }
        Kind::Record => {
            let mut current = map;
            let mut sorted_keys: Vec<&String> = expected.keys().iter().collect();
            sorted_keys.sort();
            for key in sorted_keys {
                let child = expected.child(key).expect("declared key has a child");
                let field_values: Vec<Value> =
                    values.iter().filter_map(|v| v.get_field(key)).collect();
                let child_path = path.push(PathSegment::Name(key.clone()));
                current = walk(
                    &child.subtype,
                    param_index,
                    child_path,
                    &field_values,
                    current,
                    env,
                    constraints,
                )?;
            }
            Ok(current)
        }
        Kind::Unary => {
            let child = expected.child("$1").expect("Unary has $1");
            let inner: Vec<Value> = values.iter().flat_map(|v| (child.extractor)(v)).collect();
            let child_path = path.push(PathSegment::Index(1));
            walk(&child.subtype, param_index, child_path, &inner, map, env, constraints)
        }
        Kind::Binary => {
            let child_a = expected.child("$1").expect("Binary has $1");
            let values_a: Vec<Value> = values.iter().flat_map(|v| (child_a.extractor)(v)).collect();
            let path_a = path.push(PathSegment::Index(1));
            let map_after_a = walk(
                &child_a.subtype,
                param_index,
                path_a,
                &values_a,
                map,
                env,
                constraints,
            )?;

            let child_b = expected.child("$2").expect("Binary has $2");
            let values_b: Vec<Value> = values.iter().flat_map(|v| (child_b.extractor)(v)).collect();
            let path_b = path.push(PathSegment::Index(2));
            walk(
                &child_b.subtype,
                param_index,
                path_b,
                &values_b,
                map_after_a,
                env,
                constraints,
            )
        }
        Kind::Unknown | Kind::Inconsistent => Ok(map),
    }
}

fn solve_variable(
    expected: &Type,
    param_index: usize,
    path: PropPath,
    values: &[Value],
    map: TypeVarMap,
    env: &[Type],
    constraints: &IndexMap<String, Vec<TypeClass>>,
) -> Result<TypeVarMap, SolverFailure> {
    let var_name = expected.name();
    if let Some(classes) = constraints.get(var_name) {
        for value in values {
            for class in classes {
                if !class.test(value) {
                    return Err(SolverFailure::TypeClassViolation {
                        param_index,
                        path: path.clone(),
                        value: value.clone(),
                        var_name: var_name.to_string(),
                        class_name: class.name().to_string(),
                    });
                }
            }
        }
    }

    let occurrence = Occurrence {
        param_index,
        path: path.clone(),
    };
    let next = update_type_var_map(env, &map, var_name, occurrence, values).map_err(|over| {
        SolverFailure::TypeVariableViolation {
            var_name: over.var_name,
            values_by_path: over.values_by_path,
        }
    })?;

    if !expected.keys().is_empty() {
        check_parameterized_variable(expected, &next, param_index, &path, values)?;
    }

    Ok(next)
}

/// For `f a` / `p a b`-style parameterised type variables: the variable's
/// surviving candidates may have had an inner slot narrowed by
/// [`crate::type_var_map::update_type_var_map`] (e.g. `Array` narrowed to
/// `Array Number`). Check that narrowed inner type against the inner type
/// the signature itself declared for this variable, using each candidate's
/// *last-keyed* slot — the slot the declaring signature is actually naming
/// when it writes `f a` (one declared child) or `p a b` (the second).
fn check_parameterized_variable(
    expected: &Type,
    map: &TypeVarMap,
    param_index: usize,
    path: &PropPath,
    values: &[Value],
) -> Result<(), SolverFailure> {
    let declared_last_key = expected.keys().last().expect("checked non-empty");
    let declared_inner = &expected
        .child(declared_last_key)
        .expect("declared key has a child")
        .subtype;
    if declared_inner.kind() == Kind::Variable {
        return Ok(());
    }

    let entry = map.get(expected.name()).expect("just inserted by caller");
    for candidate in &entry.candidates {
        let Some(candidate_last_key) = candidate.keys().last() else {
            continue;
        };
        let child = candidate
            .child(candidate_last_key)
            .expect("declared key has a child");
        for value in values {
            for inner in (child.extractor)(value) {
                if let Err(failure) = declared_inner.validate(&inner) {
                    return Err(SolverFailure::InvalidValue {
                        param_index,
                        path: path.join(&failure.path),
                        value: failure.value,
                        expected: declared_inner.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritype_types::constructors::{nullary_type, type_variable, unary_type};

    fn number_and_string() -> Vec<Type> {
        vec![
            nullary_type("Number", |v| matches!(v, Value::Number(_))),
            nullary_type("String", |v| matches!(v, Value::String(_))),
        ]
    }

    #[test]
    fn leaf_type_rejects_wrong_value_with_invalid_value_failure() {
        let env = number_and_string();
        let judge = Judge::new(&env);
        let constraints = IndexMap::new();
        let err = judge
            .check_argument(&constraints, &env[0], 0, &Value::string("x"), TypeVarMap::new())
            .unwrap_err();
        assert!(matches!(err, SolverFailure::InvalidValue { .. }));
    }

    #[test]
    fn same_variable_twice_must_agree() {
        let env = number_and_string();
        let judge = Judge::new(&env);
        let constraints = IndexMap::new();
        let a = type_variable("a");
        let map = judge
            .check_argument(&constraints, &a, 0, &Value::Number(1.0), TypeVarMap::new())
            .unwrap();
        let err = judge
            .check_argument(&constraints, &a, 1, &Value::string("x"), map)
            .unwrap_err();
        assert!(matches!(err, SolverFailure::TypeVariableViolation { .. }));
    }

    #[test]
    fn type_class_violation_is_reported_before_type_variable_narrowing() {
        let env = number_and_string();
        let judge = Judge::new(&env);
        let mut constraints = IndexMap::new();
        constraints.insert(
            "a".to_string(),
            vec![TypeClass::new("Semigroup", |v| matches!(v, Value::Array(_)))],
        );
        let a = type_variable("a");
        let err = judge
            .check_argument(&constraints, &a, 0, &Value::Number(1.0), TypeVarMap::new())
            .unwrap_err();
        assert!(matches!(err, SolverFailure::TypeClassViolation { .. }));
    }

    #[test]
    fn unary_applied_to_unknown_narrows_then_enforces_declared_inner_type() {
        let number = nullary_type("Number", |v| matches!(v, Value::Number(_)));
        let string_ty = nullary_type("String", |v| matches!(v, Value::String(_)));
        let array_of = unary_type(
            "Array",
            |v| matches!(v, Value::Array(_)),
            |v| match v {
                Value::Array(items) => items.borrow().clone(),
                _ => Vec::new(),
            },
        );
        let env = vec![number.clone(), string_ty, array_of(crate::unknown_singleton())];
        let judge = Judge::new(&env);
        let constraints = IndexMap::new();

        let f_a = veritype_types::constructors::unary_type_variable("f")(number);
        let good = Value::array(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert!(judge
            .check_argument(&constraints, &f_a, 0, &good, TypeVarMap::new())
            .is_ok());

        let bad = Value::array(vec![Value::string("x")]);
        let err = judge
            .check_argument(&constraints, &f_a, 0, &bad, TypeVarMap::new())
            .unwrap_err();
        assert!(matches!(err, SolverFailure::InvalidValue { .. }));
    }

    #[test]
    fn test_helper_reports_plain_membership() {
        let env = number_and_string();
        let judge = Judge::new(&env);
        assert!(judge.test(&env[0], &Value::Number(1.0)));
        assert!(!judge.test(&env[0], &Value::string("x")));
    }
}
