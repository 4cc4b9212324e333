//! The variant tag and child-slot machinery shared by every `Type`.

use std::rc::Rc;

use crate::Type;
use crate::Value;

/// Which shape a `Type` has. Structural operations (validate, render,
/// traversal) all dispatch on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Unknown,
    Inconsistent,
    Variable,
    Nullary,
    Unary,
    Binary,
    Enum,
    Record,
    Function,
}

/// A function extracting the values a container holds at one declared
/// slot. Functions are opaque to structural recursion: their extractor
/// always yields an empty sequence.
pub type Extractor = Rc<dyn Fn(&Value) -> Vec<Value>>;

/// A recognizer: the shallow membership predicate.
pub type Recognizer = Rc<dyn Fn(&Value) -> bool>;

/// One child slot: how to pull its values out of a container, and what
/// type those values must inhabit.
#[derive(Clone)]
pub struct Child {
    pub extractor: Extractor,
    pub subtype: Type,
}

impl Child {
    pub fn new(extractor: Extractor, subtype: Type) -> Self {
        Child { extractor, subtype }
    }

    /// A child slot with no extraction, used for `Function` parameter
    /// slots and for the display-only children of type variables.
    pub fn opaque(subtype: Type) -> Self {
        Child {
            extractor: Rc::new(|_| Vec::new()),
            subtype,
        }
    }
}

/// Colours/underlines the pieces of a rendered signature. `style_literal`
/// styles a type's own name and punctuation ("outer" in spec terms);
/// `style_child` wraps the already-rendered text of a child subtree,
/// keyed by that subtree's full path ("inner(k)" in spec terms, but
/// parameterised on the whole path rather than just the immediate key so
/// a single styler can decide how to highlight at any depth).
pub trait Styler {
    fn style_literal(&self, text: &str) -> String;
    fn style_child(&self, path: &veritype_common::PropPath, text: &str) -> String;
}

/// The identity styler: renders plain text with no highlighting, used for
/// the plain signature line of a diagnostic banner.
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn style_literal(&self, text: &str) -> String {
        text.to_string()
    }

    fn style_child(&self, _path: &veritype_common::PropPath, text: &str) -> String {
        text.to_string()
    }
}
