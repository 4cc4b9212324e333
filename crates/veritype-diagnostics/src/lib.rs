//! Turns a [`veritype_solver::SolverFailure`] into the three-line banner
//! text `veritype` raises as its [`TypeError`] message: the signature, a
//! caret underline, and a numbered-label line, all character-aligned, plus
//! a supplementary body naming the offending value(s) and their
//! loosely-inferred type(s).

mod styler;

use indexmap::IndexMap;

use veritype_common::path::PropPath;
use veritype_common::{TypeError, TypeErrorKind};
use veritype_solver::{infer, InferMode, Occurrence, SolverFailure};
use veritype_types::{PlainStyler, Type, TypeClass, TypeClassCheck, Value};

use styler::{mark_text, Mark, MarkKind, MarkStyler};

/// Everything the renderer needs beyond the bare [`SolverFailure`]: the
/// curried signature and type-class constraints it is judging a call
/// against, the candidate-type environment (for loose inference on
/// offending values), and the name under which the signature was
/// registered (`def`'s first argument).
pub struct SignatureContext<'a> {
    pub def_name: &'a str,
    pub param_types: &'a [Type],
    pub constraints: &'a IndexMap<String, Vec<TypeClass>>,
    pub env: &'a [Type],
}

/// Render a solver failure into a final, user-facing [`TypeError`].
pub fn render(failure: &SolverFailure, ctx: &SignatureContext<'_>) -> TypeError {
    match failure {
        SolverFailure::InvalidValue {
            param_index,
            path,
            value,
            expected,
        } => render_invalid_value(ctx, *param_index, path, value, expected),
        SolverFailure::TypeClassViolation {
            param_index,
            path,
            value,
            var_name,
            class_name,
        } => render_type_class_violation(ctx, *param_index, path, value, var_name, class_name),
        SolverFailure::TypeVariableViolation {
            var_name,
            values_by_path,
        } => render_type_variable_violation(ctx, var_name, values_by_path),
        SolverFailure::WrongArity {
            param_index,
            expected,
            received,
        } => render_wrong_arity(ctx, *param_index, *expected, received),
    }
}

/// `C a => ...` for one constrained variable, `(C a, D b) => ...` for two
/// or more; empty when `constraints` is empty.
fn constraints_repr(constraints: &IndexMap<String, Vec<TypeClass>>) -> String {
    let mut parts = Vec::new();
    for (var, classes) in constraints {
        for class in classes {
            parts.push(format!("{} {}", class.name(), var));
        }
    }
    if parts.is_empty() {
        return String::new();
    }
    let joined = if parts.len() > 1 {
        format!("({})", parts.join(", "))
    } else {
        parts[0].clone()
    };
    format!("{joined} => ")
}

fn inferred_types_loose(env: &[Type], value: &Value) -> String {
    let candidates = infer(env, std::slice::from_ref(value), InferMode::Loose);
    candidates
        .iter()
        .map(Type::name)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render one parameter slot's three aligned lines: the plain signature
/// text, its caret underline, and its numbered-label line.
fn render_param_lines(ty: &Type, marks: &[Mark]) -> (String, String, String) {
    let plain = ty.render(&PropPath::root(), &PlainStyler);
    // A mark at the parameter's own root means the whole slot is the
    // highlighted span; `style_child` is never invoked for the outermost
    // node, so this case is handled directly against the plain text's width.
    if let Some(root_mark) = marks.iter().find(|m| m.path.is_empty()) {
        let width = plain.chars().count();
        let caret = mark_text(MarkKind::Caret, root_mark.label, width);
        let label = mark_text(MarkKind::Label, root_mark.label, width);
        return (plain, caret, label);
    }
    let caret = ty.render(&PropPath::root(), &MarkStyler::new(marks, MarkKind::Caret));
    let label = ty.render(&PropPath::root(), &MarkStyler::new(marks, MarkKind::Label));
    (plain, caret, label)
}

/// Build the three-line banner: `name :: <signature>`, the caret-underline
/// line, and the numbered-label line, each prefixed by the same `name ::
/// constraintsRepr` span so the signature, carets and labels all line up.
fn render_banner(ctx: &SignatureContext<'_>, highlights: &[(usize, PropPath)]) -> String {
    let mut sorted: Vec<(usize, PropPath)> = highlights.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.structural_cmp(&b.1)));
    let numbered: Vec<(usize, Mark)> = sorted
        .into_iter()
        .enumerate()
        .map(|(i, (param_index, path))| (param_index, Mark { path, label: i + 1 }))
        .collect();

    let arrow = " -> ";
    let blank_arrow = " ".repeat(arrow.chars().count());
    let mut sig_parts = Vec::new();
    let mut caret_parts = Vec::new();
    let mut label_parts = Vec::new();

    for (i, ty) in ctx.param_types.iter().enumerate() {
        let marks: Vec<Mark> = numbered
            .iter()
            .filter(|(idx, _)| *idx == i)
            .map(|(_, m)| m.clone())
            .collect();
        let (plain, caret, label) = render_param_lines(ty, &marks);
        sig_parts.push(plain);
        caret_parts.push(caret);
        label_parts.push(label);
    }

    let signature = sig_parts.join(arrow);
    let caret_line = caret_parts.join(&blank_arrow);
    let label_line = label_parts.join(&blank_arrow);

    let prefix = format!("{} :: ", ctx.def_name);
    let repr = constraints_repr(ctx.constraints);
    let blank_repr = " ".repeat(repr.chars().count());

    format!("{prefix}{repr}{signature}\n{prefix}{blank_repr}{caret_line}\n{prefix}{blank_repr}{label_line}")
}

fn render_invalid_value(
    ctx: &SignatureContext<'_>,
    param_index: usize,
    path: &PropPath,
    value: &Value,
    expected: &Type,
) -> TypeError {
    let banner = render_banner(ctx, &[(param_index, path.clone())]);
    let inferred = inferred_types_loose(ctx.env, value);
    let expected_text = expected.render(&PropPath::root(), &PlainStyler);
    let message = format!(
        "{banner}\n\ninvalid value\n\n  {value} :: {inferred}\n\nexpected to satisfy:\n\n  {expected_text}"
    );
    TypeError::new(TypeErrorKind::InvalidValue, message)
}

fn render_type_class_violation(
    ctx: &SignatureContext<'_>,
    param_index: usize,
    path: &PropPath,
    value: &Value,
    var_name: &str,
    class_name: &str,
) -> TypeError {
    let banner = render_banner(ctx, &[(param_index, path.clone())]);
    let inferred = inferred_types_loose(ctx.env, value);
    let message = format!(
        "{banner}\n\n  {value} :: {inferred}\n\ndoes not satisfy the {class_name} constraint required by type variable `{var_name}`"
    );
    TypeError::new(TypeErrorKind::TypeClassViolation, message)
}

fn render_type_variable_violation(
    ctx: &SignatureContext<'_>,
    var_name: &str,
    values_by_path: &[(Occurrence, Vec<Value>)],
) -> TypeError {
    let highlights: Vec<(usize, PropPath)> = values_by_path
        .iter()
        .map(|(occ, _)| (occ.param_index, occ.path.clone()))
        .collect();
    let banner = render_banner(ctx, &highlights);

    let mut sorted: Vec<&(Occurrence, Vec<Value>)> = values_by_path.iter().collect();
    sorted.sort_by(|a, b| a.0.structural_cmp(&b.0));

    let lines: Vec<String> = sorted
        .iter()
        .map(|(occurrence, values)| {
            let rendered: Vec<String> = values
                .iter()
                .map(|v| format!("{v} :: {}", inferred_types_loose(ctx.env, v)))
                .collect();
            format!(
                "  position {}, path `{}`: {}",
                occurrence.param_index,
                occurrence.path,
                rendered.join(", ")
            )
        })
        .collect();

    let message = format!(
        "{banner}\n\ntype variable `{var_name}` could not be resolved to a single type given:\n\n{}",
        lines.join("\n"),
    );
    TypeError::new(TypeErrorKind::TypeVariableViolation, message)
}

fn render_wrong_arity(
    ctx: &SignatureContext<'_>,
    param_index: Option<usize>,
    expected: usize,
    received: &[Value],
) -> TypeError {
    let highlights: Vec<(usize, PropPath)> = match param_index {
        Some(i) => vec![(i, PropPath::root())],
        None => Vec::new(),
    };
    let banner = render_banner(ctx, &highlights);
    let rendered: Vec<String> = received.iter().map(|v| v.to_string()).collect();
    let message = format!(
        "{banner}\n\nwrong arity: expected {expected} argument(s), received {}: [{}]",
        received.len(),
        rendered.join(", "),
    );
    TypeError::new(TypeErrorKind::WrongArityAtCall, message)
}
