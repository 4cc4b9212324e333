//! `TypeVarMap`: per-call working memory recording, for each type variable,
//! the candidate concrete types still consistent with every value observed
//! so far, and the evidence that narrowed them.

use indexmap::IndexMap;

use veritype_common::path::PropPath;
use veritype_types::{Kind, Type, Value};

use crate::infer::{infer, InferMode};

/// Where in the overall curried signature a type variable was observed:
/// which positional parameter, and the path inside that parameter's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub param_index: usize,
    pub path: PropPath,
}

impl Occurrence {
    pub fn structural_cmp(&self, other: &Occurrence) -> std::cmp::Ordering {
        self.param_index
            .cmp(&other.param_index)
            .then_with(|| self.path.structural_cmp(&other.path))
    }
}

/// One type variable's surviving candidates and the values that narrowed
/// them, grouped by where they were observed.
#[derive(Clone, Default)]
pub struct TypeVarEntry {
    pub candidates: Vec<Type>,
    pub values_by_path: Vec<(Occurrence, Vec<Value>)>,
}

impl TypeVarEntry {
    fn record(&mut self, occurrence: Occurrence, values: &[Value]) {
        if let Some((_, existing)) = self
            .values_by_path
            .iter_mut()
            .find(|(o, _)| *o == occurrence)
        {
            existing.extend(values.iter().cloned());
        } else {
            self.values_by_path.push((occurrence, values.to_vec()));
        }
    }

    pub fn all_values(&self) -> Vec<Value> {
        self.values_by_path
            .iter()
            .flat_map(|(_, vs)| vs.iter().cloned())
            .collect()
    }
}

/// Value-semantic: every refinement produces a fresh map, never mutates in
/// place, matching the spec's lifecycle rule.
#[derive(Clone, Default)]
pub struct TypeVarMap {
    entries: IndexMap<String, TypeVarEntry>,
}

impl TypeVarMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TypeVarEntry> {
        self.entries.get(name)
    }
}

/// The variable has no consistent concrete interpretation: candidates
/// became empty after at least one value was observed.
pub struct OverConstrained {
    pub var_name: String,
    pub values_by_path: Vec<(Occurrence, Vec<Value>)>,
}

/// Refine `prev`'s entry for `var_name` against `values` observed at
/// `occurrence`. A new entry snapshots `env` as its initial candidate
/// list; an existing entry is filtered and, for surviving Unary/Binary
/// candidates with an `Unknown` child, has that child narrowed via strict
/// inference over the value's extracted inner children.
pub fn update_type_var_map(
    env: &[Type],
    prev: &TypeVarMap,
    var_name: &str,
    occurrence: Occurrence,
    values: &[Value],
) -> Result<TypeVarMap, OverConstrained> {
    let mut next = prev.clone();
    let mut entry = next
        .entries
        .get(var_name)
        .cloned()
        .unwrap_or_else(|| TypeVarEntry {
            candidates: env.to_vec(),
            values_by_path: Vec::new(),
        });

    for value in values {
        entry.candidates.retain(|t| t.recognize(value));
        entry.candidates = entry
            .candidates
            .iter()
            .map(|t| narrow_unknown_children(env, t, value))
            .collect();
    }
    entry.record(occurrence, values);

    tracing::trace!(
        var_name,
        surviving_candidates = entry.candidates.len(),
        "refined type variable candidates"
    );

    if entry.candidates.is_empty() && !entry.values_by_path.is_empty() {
        return Err(OverConstrained {
            var_name: var_name.to_string(),
            values_by_path: entry.values_by_path,
        });
    }

    next.entries.insert(var_name.to_string(), entry);
    Ok(next)
}

/// `observing [1, 2] narrows Array ??? to Array Number`: for a surviving
/// Unary/Binary candidate whose child is still `Unknown`, run strict
/// inference over the values extracted from this one observation and, if
/// it settles on exactly one type, adopt it.
fn narrow_unknown_children(env: &[Type], candidate: &Type, value: &Value) -> Type {
    match candidate.kind() {
        Kind::Unary => {
            let child = candidate.child("$1").expect("Unary has $1");
            if child.subtype.kind() != Kind::Unknown {
                return candidate.clone();
            }
            let inner = (child.extractor)(value);
            if inner.is_empty() {
                return candidate.clone();
            }
            let narrowed = infer(env, &inner, InferMode::Strict);
            match narrowed.len() {
                1 => candidate.with_unary_child(narrowed.into_iter().next().unwrap()),
                _ => candidate.clone(),
            }
        }
        Kind::Binary => {
            let child_a = candidate.child("$1").expect("Binary has $1");
            let child_b = candidate.child("$2").expect("Binary has $2");
            let new_a = narrow_one_binary_slot(env, &child_a.subtype, &child_a.extractor, value)
                .unwrap_or_else(|| child_a.subtype.clone());
            let new_b = narrow_one_binary_slot(env, &child_b.subtype, &child_b.extractor, value)
                .unwrap_or_else(|| child_b.subtype.clone());
            candidate.with_binary_children(new_a, new_b)
        }
        _ => candidate.clone(),
    }
}

fn narrow_one_binary_slot(
    env: &[Type],
    current: &Type,
    extractor: &veritype_types::Extractor,
    value: &Value,
) -> Option<Type> {
    if current.kind() != Kind::Unknown {
        return None;
    }
    let inner = extractor(value);
    if inner.is_empty() {
        return None;
    }
    let narrowed = infer(env, &inner, InferMode::Strict);
    if narrowed.len() == 1 {
        Some(narrowed.into_iter().next().unwrap())
    } else {
        None
    }
}
