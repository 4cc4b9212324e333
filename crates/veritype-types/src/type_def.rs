//! The central `Type` entity: a uniform, recursive, immutable record
//! describing any type in the system, plus the structural operations
//! (`recognize`, `validate`, `render`) that dispatch on its variant.

use std::rc::Rc;

use indexmap::IndexMap;

use veritype_common::path::{PathSegment, PropPath};

use crate::kind::{Child, Kind, Recognizer, Styler};
use crate::Value;

/// A failed [`Type::validate`] call: the offending value and the path
/// inside the type tree at which membership first failed.
#[derive(Clone, Debug)]
pub struct ValidationFailure {
    pub value: Value,
    pub path: PropPath,
}

struct TypeData {
    kind: Kind,
    name: String,
    keys: Vec<String>,
    children: IndexMap<String, Child>,
    recognize: Recognizer,
    /// Only populated for `Kind::Enum`: the explicit member list.
    members: Vec<Value>,
}

/// `Rc`-backed so cloning a `Type` — which the solver and curry layers do
/// constantly while threading state forward — is O(1) and structurally
/// shared, matching the "immutable once constructed" lifecycle rule.
#[derive(Clone)]
pub struct Type(Rc<TypeData>);

impl Type {
    pub(crate) fn new(
        kind: Kind,
        name: impl Into<String>,
        keys: Vec<String>,
        children: IndexMap<String, Child>,
        recognize: Recognizer,
    ) -> Self {
        Type(Rc::new(TypeData {
            kind,
            name: name.into(),
            keys,
            children,
            recognize,
            members: Vec::new(),
        }))
    }

    pub(crate) fn new_enum(name: impl Into<String>, members: Vec<Value>) -> Self {
        let members_for_predicate = members.clone();
        let recognize: Recognizer =
            Rc::new(move |v: &Value| members_for_predicate.iter().any(|m| m == v));
        Type(Rc::new(TypeData {
            kind: Kind::Enum,
            name: name.into(),
            keys: Vec::new(),
            children: IndexMap::new(),
            recognize,
            members,
        }))
    }

    pub fn kind(&self) -> Kind {
        self.0.kind
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn keys(&self) -> &[String] {
        &self.0.keys
    }

    pub fn child(&self, key: &str) -> Option<&Child> {
        self.0.children.get(key)
    }

    pub fn children(&self) -> &IndexMap<String, Child> {
        &self.0.children
    }

    pub fn enum_members(&self) -> &[Value] {
        &self.0.members
    }

    pub fn recognize(&self, value: &Value) -> bool {
        (self.0.recognize)(value)
    }

    /// Recursive membership: `recognize`, then every extracted child
    /// through its declared sub-type. Returns the *first* failure and its
    /// path, matching the spec's early-return contract.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationFailure> {
        self.validate_at(value, &PropPath::root())
    }

    fn validate_at(&self, value: &Value, path: &PropPath) -> Result<(), ValidationFailure> {
        if !self.recognize(value) {
            return Err(ValidationFailure {
                value: value.clone(),
                path: path.clone(),
            });
        }
        for (i, key) in self.0.keys.iter().enumerate() {
            let child = &self.0.children[key];
            let child_path = self.child_path(path, i, key);
            for item in (child.extractor)(value) {
                child.subtype.validate_at(&item, &child_path)?;
            }
        }
        Ok(())
    }

    fn child_path(&self, path: &PropPath, index: usize, key: &str) -> PropPath {
        match self.0.kind {
            Kind::Record => path.push(PathSegment::Name(key.to_string())),
            _ => path.push(PathSegment::Index(index + 1)),
        }
    }

    /// Whether this type ever needs parenthesising when nested as a child
    /// of another composite type. Function/Record carry their own
    /// delimiting punctuation and never need extra parens; a type variable
    /// with no display children is a single token.
    pub fn is_atomic(&self) -> bool {
        match self.0.kind {
            Kind::Unknown
            | Kind::Inconsistent
            | Kind::Nullary
            | Kind::Enum
            | Kind::Record
            | Kind::Function => true,
            Kind::Variable => self.0.keys.is_empty(),
            Kind::Unary | Kind::Binary => false,
        }
    }

    /// Render this type as the *whole* type of a parameter slot or record
    /// field — composite types appear bare here (their own punctuation
    /// already delimits them from their surroundings).
    pub fn render(&self, path: &PropPath, styler: &dyn Styler) -> String {
        match self.0.kind {
            Kind::Unknown | Kind::Inconsistent => styler.style_literal("???"),
            Kind::Nullary | Kind::Enum => styler.style_literal(&self.0.name),
            Kind::Variable | Kind::Unary | Kind::Binary => {
                let mut out = styler.style_literal(&self.0.name);
                for (i, key) in self.0.keys.iter().enumerate() {
                    let child = &self.0.children[key];
                    let child_path = self.child_path(path, i, key);
                    let text = child.subtype.render_as_child(&child_path, styler);
                    out.push(' ');
                    out.push_str(&styler.style_child(&child_path, &text));
                }
                out
            }
            Kind::Record => {
                let mut sorted_keys: Vec<&String> = self.0.keys.iter().collect();
                sorted_keys.sort();
                let parts: Vec<String> = sorted_keys
                    .into_iter()
                    .map(|key| {
                        let child = &self.0.children[key];
                        let child_path = path.push(PathSegment::Name(key.clone()));
                        let text = child.subtype.render(&child_path, styler);
                        let text = styler.style_child(&child_path, &text);
                        format!("{key}: {text}")
                    })
                    .collect();
                format!(
                    "{}{}{}",
                    styler.style_literal("{ "),
                    parts.join(", "),
                    styler.style_literal(" }")
                )
            }
            Kind::Function => {
                let n = self.0.keys.len();
                let (param_keys, ret_keys) = self.0.keys.split_at(n.saturating_sub(1));
                let param_texts: Vec<String> = param_keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| {
                        let child = &self.0.children[key];
                        let child_path = path.push(PathSegment::Index(i + 1));
                        let text = child.subtype.render(&child_path, styler);
                        styler.style_child(&child_path, &text)
                    })
                    .collect();
                let ret_text = ret_keys.first().map_or_else(String::new, |key| {
                    let child = &self.0.children[key];
                    let child_path = path.push(PathSegment::Index(n));
                    let text = child.subtype.render(&child_path, styler);
                    styler.style_child(&child_path, &text)
                });
                if param_texts.len() == 1 {
                    format!(
                        "{} {} {}",
                        param_texts[0],
                        styler.style_literal("->"),
                        ret_text
                    )
                } else {
                    format!(
                        "{}{}{} {} {}",
                        styler.style_literal("("),
                        param_texts.join(", "),
                        styler.style_literal(")"),
                        styler.style_literal("->"),
                        ret_text
                    )
                }
            }
        }
    }

    /// Render this type as a child slot of another composite type:
    /// parenthesised unless it is atomic.
    pub fn render_as_child(&self, path: &PropPath, styler: &dyn Styler) -> String {
        let text = self.render(path, styler);
        if self.is_atomic() {
            text
        } else {
            // Parens go through `style_literal` too, not raw punctuation,
            // so a styler that blanks/marks text (diagnostic caret and
            // label lines) stays the same width as the plain signature.
            format!(
                "{}{}{}",
                styler.style_literal("("),
                text,
                styler.style_literal(")")
            )
        }
    }

    /// Re-lift a specialised child into an existing Unary type, as used by
    /// candidate-type inference and the solver (`UnaryType.from(T)` in the
    /// spec): keeps this type's name/recognizer/extractor, swaps `$1`.
    pub fn with_unary_child(&self, sub: Type) -> Type {
        debug_assert_eq!(self.0.kind, Kind::Unary);
        let mut children = self.0.children.clone();
        if let Some(slot) = children.get_mut("$1") {
            slot.subtype = sub;
        }
        Type(Rc::new(TypeData {
            kind: self.0.kind,
            name: self.0.name.clone(),
            keys: self.0.keys.clone(),
            children,
            recognize: self.0.recognize.clone(),
            members: self.0.members.clone(),
        }))
    }

    /// Re-lift specialised children into an existing Binary type.
    pub fn with_binary_children(&self, a: Type, b: Type) -> Type {
        debug_assert_eq!(self.0.kind, Kind::Binary);
        let mut children = self.0.children.clone();
        if let Some(slot) = children.get_mut("$1") {
            slot.subtype = a;
        }
        if let Some(slot) = children.get_mut("$2") {
            slot.subtype = b;
        }
        Type(Rc::new(TypeData {
            kind: self.0.kind,
            name: self.0.name.clone(),
            keys: self.0.keys.clone(),
            children,
            recognize: self.0.recognize.clone(),
            members: self.0.members.clone(),
        }))
    }
}

impl std::fmt::Debug for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.render(&PropPath::root(), &crate::kind::PlainStyler))
    }
}
