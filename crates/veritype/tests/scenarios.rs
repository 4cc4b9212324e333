//! End-to-end scenarios exercising the whole engine: definition, currying,
//! invalid-value diagnostics, type-variable unification, and type-class
//! constraints.

use indexmap::IndexMap;

use veritype::catalog::{integer, non_zero_integer, number};
use veritype::{
    binary_type_variable, create, function_type, type_variable, unary_type_variable, Options,
};
use veritype_types::{TypeClass, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn call1(f: &Value, a: Value) -> Result<Value, veritype_common::TypeError> {
    let Value::Function(f) = f else { panic!("not a function") };
    f(&[a])
}

fn call2(f: &Value, a: Value, b: Value) -> Result<Value, veritype_common::TypeError> {
    let Value::Function(f) = f else { panic!("not a function") };
    f(&[a, b])
}

#[test]
fn scenario_1_add_numbers_and_wrong_arity() {
    init_tracing();
    let engine = create(Options::default());
    let add = engine
        .call(
            "add",
            IndexMap::new(),
            vec![number(), number(), number()],
            |args| match (&args[0], &args[1]) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                _ => unreachable!(),
            },
        )
        .unwrap();

    let result = call2(&add, Value::Number(2.0), Value::Number(2.0)).unwrap();
    assert!(matches!(result, Value::Number(n) if n == 4.0));

    let Value::Function(f) = &add else { panic!() };
    let err = f(&[Value::Number(2.0), Value::Number(2.0), Value::Number(2.0)]).unwrap_err();
    assert_eq!(err.kind, veritype_common::TypeErrorKind::WrongArityAtCall);
}

#[test]
fn scenario_2_add_strings_is_an_invalid_value() {
    init_tracing();
    let engine = create(Options::default());
    let add = engine
        .call(
            "add",
            IndexMap::new(),
            vec![number(), number(), number()],
            |args| match (&args[0], &args[1]) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                _ => unreachable!(),
            },
        )
        .unwrap();

    let err = call2(&add, Value::string("2"), Value::string("2")).unwrap_err();
    assert_eq!(err.kind, veritype_common::TypeErrorKind::InvalidValue);
    assert!(err.to_string().contains("\"2\""));
}

#[test]
fn scenario_3_polymorphic_identity() {
    init_tracing();
    let engine = create(Options::default());
    let a = type_variable("a");
    let id = engine
        .call("id", IndexMap::new(), vec![a.clone(), a], |args| {
            Ok(args[0].clone())
        })
        .unwrap();

    let forty_two = call1(&id, Value::Number(42.0)).unwrap();
    assert!(matches!(forty_two, Value::Number(n) if n == 42.0));

    let null = call1(&id, Value::Null).unwrap();
    assert!(matches!(null, Value::Null));
}

#[test]
fn scenario_4_cmp_rejects_two_different_types_for_the_same_variable() {
    init_tracing();
    let engine = create(Options::default());
    let a = type_variable("a");
    let cmp = engine
        .call(
            "cmp",
            IndexMap::new(),
            vec![a.clone(), a, number()],
            |_args| Ok(Value::Number(0.0)),
        )
        .unwrap();

    let err = call2(&cmp, Value::Number(0.0), Value::string("1")).unwrap_err();
    assert_eq!(
        err.kind,
        veritype_common::TypeErrorKind::TypeVariableViolation
    );
}

#[test]
fn scenario_5_concat_requires_a_semigroup() {
    init_tracing();
    let engine = create(Options::default());
    let a = type_variable("a");
    let mut constraints = IndexMap::new();
    constraints.insert(
        "a".to_string(),
        vec![TypeClass::new("Semigroup", |v| matches!(v, Value::Array(_)))],
    );
    let concat = engine
        .call("concat", constraints, vec![a.clone(), a, a], |args| {
            match (&args[0], &args[1]) {
                (Value::Array(x), Value::Array(y)) => {
                    let mut merged = x.borrow().clone();
                    merged.extend(y.borrow().iter().cloned());
                    Ok(Value::array(merged))
                }
                _ => unreachable!(),
            }
        })
        .unwrap();

    let ok = call2(
        &concat,
        Value::array(vec![Value::Number(1.0), Value::Number(2.0)]),
        Value::array(vec![Value::Number(3.0), Value::Number(4.0)]),
    )
    .unwrap();
    assert!(matches!(ok, Value::Array(ref items) if items.borrow().len() == 4));

    let err = call2(
        &concat,
        Value::record(IndexMap::new()),
        Value::record(IndexMap::new()),
    )
    .unwrap_err();
    assert_eq!(
        err.kind,
        veritype_common::TypeErrorKind::TypeClassViolation
    );
    assert!(err.to_string().contains("Semigroup"));
}

#[test]
fn scenario_6_map_requires_a_functor() {
    init_tracing();
    let engine = create(Options::default());
    let a = type_variable("a");
    let b = type_variable("b");
    let f_a = unary_type_variable("f")(a.clone());
    let f_b = unary_type_variable("f")(b.clone());
    let mut constraints = IndexMap::new();
    constraints.insert(
        "f".to_string(),
        vec![TypeClass::new("Functor", |v| matches!(v, Value::Array(_)))],
    );

    let map = engine
        .call(
            "map",
            constraints,
            vec![function_type(vec![a, b]), f_a, f_b],
            |args| {
                let Value::Function(f) = &args[0] else { unreachable!() };
                match &args[1] {
                    Value::Array(items) => {
                        let mapped: Result<Vec<Value>, _> =
                            items.borrow().iter().map(|item| f(&[item.clone()])).collect();
                        Ok(Value::array(mapped?))
                    }
                    _ => unreachable!(),
                }
            },
        )
        .unwrap();

    let increment = Value::function(|args| match &args[0] {
        Value::Number(n) => Ok(Value::Number(n + 1.0)),
        _ => unreachable!(),
    });

    let result = call2(
        &map,
        increment.clone(),
        Value::array(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]),
    )
    .unwrap();
    assert!(matches!(result, Value::Array(ref items) if items.borrow().len() == 3));

    let err = call2(&map, increment, Value::string("abc")).unwrap_err();
    assert_eq!(
        err.kind,
        veritype_common::TypeErrorKind::TypeClassViolation
    );
}

#[test]
fn scenario_7_rem_validates_each_slot_independently() {
    init_tracing();
    let engine = create(Options::default());
    let rem = engine
        .call(
            "rem",
            IndexMap::new(),
            vec![integer(), non_zero_integer(), integer()],
            |args| match (&args[0], &args[1]) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a % b)),
                _ => unreachable!(),
            },
        )
        .unwrap();

    let result = call2(&rem, Value::Number(42.0), Value::Number(5.0)).unwrap();
    assert!(matches!(result, Value::Number(n) if n == 2.0));

    let err = call2(&rem, Value::Number(0.5), Value::Number(3.0)).unwrap_err();
    assert_eq!(err.kind, veritype_common::TypeErrorKind::InvalidValue);

    let err = call2(&rem, Value::Number(42.0), Value::Number(0.0)).unwrap_err();
    assert_eq!(err.kind, veritype_common::TypeErrorKind::InvalidValue);
}

#[test]
fn binary_type_variable_is_available_for_two_argument_parameterised_variables() {
    init_tracing();
    let pair_of = binary_type_variable("p");
    let ty = pair_of(type_variable("a"), type_variable("b"));
    assert_eq!(ty.keys(), &["$1".to_string(), "$2".to_string()]);
}
