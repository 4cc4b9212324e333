//! Candidate-type inference: the dynamic reverse lookup from a value (or a
//! list of values that must all share one type) to the environment types
//! of which it is a member.

use rustc_hash::FxHashSet;

use veritype_types::{Kind, Type, Value};

/// Strict inference discards values with no consistent type; loose
/// inference returns the [`crate::inconsistent`]-style sentinel instead.
/// Loose is used solely for diagnostic rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferMode {
    Strict,
    Loose,
}

/// Public entry point: produce the environment types of which every value
/// in `values` is a member. A single value `v` is just `infer(env, &[v],
/// mode)`. Filters `Unknown`/`Inconsistent` out of the result, per the
/// spec's "final pass" rule — those sentinels are only meaningful to the
/// recursive machinery, never to a caller outside this module.
pub fn infer(env: &[Type], values: &[Value], mode: InferMode) -> Vec<Type> {
    let mut seen = FxHashSet::default();
    let mut candidates = infer_raw(env, values, mode, &mut seen);
    candidates.retain(|t| !matches!(t.kind(), Kind::Unknown | Kind::Inconsistent));
    candidates
}

fn is_nullable_family(t: &Type) -> bool {
    // `Nullable` is explicitly excluded so it doesn't dominate inference:
    // every value is vacuously a member of `Nullable T` once `T` narrows
    // to `Unknown`, which would otherwise swallow every other candidate.
    t.name() == "Nullable"
}

fn infer_raw(
    env: &[Type],
    values: &[Value],
    mode: InferMode,
    seen: &mut FxHashSet<usize>,
) -> Vec<Type> {
    if values.is_empty() {
        return vec![crate::unknown_singleton()];
    }

    let mut out = Vec::new();
    for candidate in env {
        if is_nullable_family(candidate) {
            continue;
        }
        if !values.iter().all(|v| candidate.recognize(v)) {
            continue;
        }

        match candidate.kind() {
            Kind::Unary
                if candidate
                    .child("$1")
                    .is_some_and(|c| c.subtype.kind() == Kind::Unknown) =>
            {
                let child = candidate.child("$1").unwrap();
                // Each slot gets its own identity set, cloned from the
                // caller's: a cycle through this slot must not make a
                // sibling slot of the same candidate (or a later candidate
                // in this same `for` loop) see its own values as already
                // visited.
                let mut slot_seen = seen.clone();
                let inner_values = extract_all(values, &child.extractor, &mut slot_seen);
                let inner_candidates = infer_raw(env, &inner_values, mode, &mut slot_seen);
                for inner in inner_candidates {
                    out.push(candidate.with_unary_child(inner));
                }
            }
            Kind::Binary => {
                let child_a = candidate.child("$1").unwrap();
                let child_b = candidate.child("$2").unwrap();
                let mut seen_a = seen.clone();
                let values_a = extract_all(values, &child_a.extractor, &mut seen_a);
                let candidates_a = infer_raw(env, &values_a, mode, &mut seen_a);

                let mut seen_b = seen.clone();
                let values_b = extract_all(values, &child_b.extractor, &mut seen_b);
                let candidates_b = infer_raw(env, &values_b, mode, &mut seen_b);
                for a in &candidates_a {
                    for b in &candidates_b {
                        out.push(candidate.with_binary_children(a.clone(), b.clone()));
                    }
                }
            }
            _ => out.push(candidate.clone()),
        }
    }

    if out.is_empty() {
        return match mode {
            InferMode::Loose => vec![crate::inconsistent_singleton()],
            InferMode::Strict => Vec::new(),
        };
    }
    out
}

/// Extract children across every observed value, skipping (contributing
/// nothing for) any value already visited along this inference call —
/// the identity-set cycle guard from the spec's design notes.
fn extract_all(
    values: &[Value],
    extractor: &veritype_types::Extractor,
    seen: &mut FxHashSet<usize>,
) -> Vec<Value> {
    let mut out = Vec::new();
    for value in values {
        if let Some(id) = value.identity() {
            if seen.contains(&id) {
                continue;
            }
            seen.insert(id);
        }
        out.extend(extractor(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritype_types::constructors::{nullary_type, unary_type};

    fn env() -> Vec<Type> {
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
        let array_unknown = array_of(crate::unknown_singleton());
        vec![number, string_ty, array_unknown]
    }

    #[test]
    fn empty_values_infers_unknown_then_filtered_to_empty_externally() {
        assert!(infer(&env(), &[], InferMode::Strict).is_empty());
    }

    #[test]
    fn scalar_infers_its_nullary_type() {
        let candidates = infer(&env(), &[Value::Number(1.0)], InferMode::Strict);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "Number");
    }

    #[test]
    fn array_descends_and_specialises_unknown_child() {
        let candidates = infer(
            &env(),
            &[Value::array(vec![Value::Number(1.0), Value::Number(2.0)])],
            InferMode::Strict,
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "Array");
        assert_eq!(candidates[0].child("$1").unwrap().subtype.name(), "Number");
    }

    #[test]
    fn no_consistent_type_is_empty_in_strict_and_inconsistent_in_loose() {
        let strict = infer(&env(), &[Value::Null], InferMode::Strict);
        assert!(strict.is_empty());
        let loose = infer(&env(), &[Value::Null], InferMode::Loose);
        assert_eq!(loose.len(), 1);
        assert_eq!(loose[0].name(), "???");
    }

    #[test]
    fn adding_a_value_never_expands_the_candidate_set() {
        let one = infer(&env(), &[Value::Number(1.0)], InferMode::Strict);
        let two = infer(
            &env(),
            &[Value::Number(1.0), Value::string("x")],
            InferMode::Strict,
        );
        assert!(two.len() <= one.len());
    }

    #[test]
    fn binary_descends_and_infers_both_slots_of_one_container_value() {
        use veritype_types::constructors::binary_type;

        let number = nullary_type("Number", |v| matches!(v, Value::Number(_)));
        let string_ty = nullary_type("String", |v| matches!(v, Value::String(_)));
        let pair_of = binary_type(
            "Pair",
            |v| matches!(v, Value::Array(a) if a.borrow().len() == 2),
            |v| match v {
                Value::Array(items) => vec![items.borrow()[0].clone()],
                _ => Vec::new(),
            },
            |v| match v {
                Value::Array(items) => vec![items.borrow()[1].clone()],
                _ => Vec::new(),
            },
        );
        let pair_ty = pair_of(number.clone(), string_ty.clone());
        let env = vec![number, string_ty, pair_ty];

        // `pair` itself is the one container whose identity must not be
        // consumed by the `$1` extraction before `$2` ever runs — the
        // regression this guards against shared one identity-visited set
        // across sibling slots of the same candidate.
        let pair = Value::array(vec![Value::Number(1.0), Value::string("x")]);
        let candidates = infer(&env, &[pair], InferMode::Strict);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "Pair");
        assert_eq!(candidates[0].child("$1").unwrap().subtype.name(), "Number");
        assert_eq!(candidates[0].child("$2").unwrap().subtype.name(), "String");
    }

    #[test]
    fn cyclic_array_does_not_infinitely_recurse() {
        let cyclic = Value::array(vec![Value::Number(1.0)]);
        if let Value::Array(items) = &cyclic {
            items.borrow_mut().push(cyclic.clone());
        }
        // Must terminate; the self-reference contributes no candidates.
        let _ = infer(&env(), &[cyclic], InferMode::Loose);
    }
}
