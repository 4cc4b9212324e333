//! Factories producing `Type` values: the only way to build a `Type` from
//! outside this crate.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::kind::{Child, Extractor, Kind, Recognizer};
use crate::type_def::Type;
use crate::Value;

/// A leaf type: `recognize` is the only thing that matters.
pub fn nullary_type(name: impl Into<String>, predicate: impl Fn(&Value) -> bool + 'static) -> Type {
    let recognize: Recognizer = Rc::new(predicate);
    Type::new(Kind::Nullary, name, Vec::new(), IndexMap::new(), recognize)
}

/// Closes over one sub-type: `UnaryType(name, predicate, extract)(SubType)`.
pub fn unary_type(
    name: impl Into<String>,
    predicate: impl Fn(&Value) -> bool + 'static,
    extract: impl Fn(&Value) -> Vec<Value> + 'static,
) -> impl Fn(Type) -> Type {
    let name = name.into();
    let recognize: Recognizer = Rc::new(predicate);
    let extractor: Extractor = Rc::new(extract);
    move |sub: Type| {
        let mut children = IndexMap::new();
        children.insert("$1".to_string(), Child::new(extractor.clone(), sub));
        Type::new(
            Kind::Unary,
            name.clone(),
            vec!["$1".to_string()],
            children,
            recognize.clone(),
        )
    }
}

/// Closes over two sub-types:
/// `BinaryType(name, predicate, extract1, extract2)(SubA, SubB)`.
pub fn binary_type(
    name: impl Into<String>,
    predicate: impl Fn(&Value) -> bool + 'static,
    extract1: impl Fn(&Value) -> Vec<Value> + 'static,
    extract2: impl Fn(&Value) -> Vec<Value> + 'static,
) -> impl Fn(Type, Type) -> Type {
    let name = name.into();
    let recognize: Recognizer = Rc::new(predicate);
    let extractor1: Extractor = Rc::new(extract1);
    let extractor2: Extractor = Rc::new(extract2);
    move |sub_a: Type, sub_b: Type| {
        let mut children = IndexMap::new();
        children.insert("$1".to_string(), Child::new(extractor1.clone(), sub_a));
        children.insert("$2".to_string(), Child::new(extractor2.clone(), sub_b));
        Type::new(
            Kind::Binary,
            name.clone(),
            vec!["$1".to_string(), "$2".to_string()],
            children,
            recognize.clone(),
        )
    }
}

/// Membership by deep structural equality against an explicit member list.
pub fn enum_type(members: Vec<Value>) -> Type {
    let display = members
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" | ");
    Type::new_enum(display, members)
}

/// Rejects at construction if any value in `fields` is not a `Type` — here
/// that is enforced statically by `fields` being typed as
/// `IndexMap<String, Type>`, so there is no dynamic malformed-construction
/// case left for this constructor to check at runtime. Displays fields in
/// sorted-key order (see [`Type::render`]); membership requires presence
/// of every declared key, extra keys allowed.
pub fn record_type(fields: IndexMap<String, Type>) -> Type {
    let keys: Vec<String> = fields.keys().cloned().collect();
    let mut children = IndexMap::new();
    for (key, subtype) in fields {
        let field_key = key.clone();
        let extractor: Extractor = Rc::new(move |v: &Value| v.get_field(&field_key).into_iter().collect());
        children.insert(key, Child::new(extractor, subtype));
    }
    let declared_keys = keys.clone();
    let recognize: Recognizer = Rc::new(move |v: &Value| {
        matches!(v, Value::Record(_)) && declared_keys.iter().all(|k| v.has_field(k))
    });
    Type::new(Kind::Record, "", keys, children, recognize)
}

/// `types.last()` is the return type; earlier elements are the curried
/// parameter types. Functions are opaque to structural recursion.
pub fn function_type(types: Vec<Type>) -> Type {
    debug_assert!(!types.is_empty(), "Function must declare a return type");
    let keys: Vec<String> = (1..=types.len()).map(|i| format!("${i}")).collect();
    let mut children = IndexMap::new();
    for (key, subtype) in keys.iter().zip(types.into_iter()) {
        children.insert(key.clone(), Child::opaque(subtype));
    }
    let recognize: Recognizer = Rc::new(|v: &Value| v.is_callable());
    Type::new(Kind::Function, "", keys, children, recognize)
}

/// A bare type variable: recognizes anything, no display children.
pub fn type_variable(name: impl Into<String>) -> Type {
    let recognize: Recognizer = Rc::new(|_| true);
    Type::new(Kind::Variable, name, Vec::new(), IndexMap::new(), recognize)
}

/// A type variable parameterised by one display-only child, e.g. `f a`.
pub fn unary_type_variable(name: impl Into<String>) -> impl Fn(Type) -> Type {
    let name = name.into();
    move |sub: Type| {
        let mut children = IndexMap::new();
        children.insert("$1".to_string(), Child::opaque(sub));
        let recognize: Recognizer = Rc::new(|_| true);
        Type::new(
            Kind::Variable,
            name.clone(),
            vec!["$1".to_string()],
            children,
            recognize,
        )
    }
}

/// A type variable parameterised by two display-only children.
pub fn binary_type_variable(name: impl Into<String>) -> impl Fn(Type, Type) -> Type {
    let name = name.into();
    move |sub_a: Type, sub_b: Type| {
        let mut children = IndexMap::new();
        children.insert("$1".to_string(), Child::opaque(sub_a));
        children.insert("$2".to_string(), Child::opaque(sub_b));
        let recognize: Recognizer = Rc::new(|_| true);
        Type::new(
            Kind::Variable,
            name.clone(),
            vec!["$1".to_string(), "$2".to_string()],
            children,
            recognize,
        )
    }
}

/// `recognize ≡ true`, printed as `???`. Used as the initial state of an
/// unobserved type-variable slot and as the "anything goes" answer when no
/// values have been seen yet during candidate-type inference.
pub fn unknown() -> Type {
    let recognize: Recognizer = Rc::new(|_| true);
    Type::new(Kind::Unknown, "???", Vec::new(), IndexMap::new(), recognize)
}

/// `recognize ≡ false`, same printing as `Unknown`. A "no consistent type"
/// sentinel used only inside candidate-type inference's loose mode.
pub fn inconsistent() -> Type {
    let recognize: Recognizer = Rc::new(|_| false);
    Type::new(
        Kind::Inconsistent,
        "???",
        Vec::new(),
        IndexMap::new(),
        recognize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_membership_is_deep_equality() {
        let colors = enum_type(vec![Value::string("red"), Value::string("blue")]);
        assert!(colors.validate(&Value::string("red")).is_ok());
        assert!(colors.validate(&Value::string("green")).is_err());
    }

    #[test]
    fn function_recognizes_only_callables() {
        let number = nullary_type("Number", |v| matches!(v, Value::Number(_)));
        let f = function_type(vec![number.clone(), number]);
        assert!(f.validate(&Value::function(|_| Ok(Value::Null))).is_ok());
        assert!(f.validate(&Value::Null).is_err());
    }

    #[test]
    fn record_type_with_no_declared_fields_matches_any_record() {
        let empty = record_type(IndexMap::new());
        assert!(empty.validate(&Value::record(IndexMap::new())).is_ok());
        assert!(empty.validate(&Value::Null).is_err());
    }
}
