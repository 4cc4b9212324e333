//! Stylers that re-walk a rendered [`veritype_types::Type`] tree to produce
//! the caret-underline and numbered-label lines of a diagnostic banner,
//! character-aligned with the plain signature line.

use veritype_common::path::PropPath;
use veritype_types::Styler;

/// One highlighted sub-type: the path it sits at, and the label number it
/// is annotated with on the numbered-label line.
#[derive(Clone, Debug)]
pub struct Mark {
    pub path: PropPath,
    pub label: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkKind {
    Caret,
    Label,
}

/// Renders blanks everywhere except at a marked path, where it emits a
/// caret underline or a centred label number — always the same character
/// width as the plain rendering at that position, so the three banner
/// lines line up column-for-column.
pub struct MarkStyler<'a> {
    marks: &'a [Mark],
    kind: MarkKind,
}

impl<'a> MarkStyler<'a> {
    pub fn new(marks: &'a [Mark], kind: MarkKind) -> Self {
        MarkStyler { marks, kind }
    }

    fn find(&self, path: &PropPath) -> Option<&Mark> {
        self.marks.iter().find(|m| &m.path == path)
    }
}

impl Styler for MarkStyler<'_> {
    fn style_literal(&self, text: &str) -> String {
        " ".repeat(text.chars().count())
    }

    fn style_child(&self, path: &PropPath, text: &str) -> String {
        match self.find(path) {
            Some(mark) => mark_text(self.kind, mark.label, text.chars().count()),
            None => text.to_string(),
        }
    }
}

pub fn mark_text(kind: MarkKind, label: usize, width: usize) -> String {
    let width = width.max(1);
    match kind {
        MarkKind::Caret => "^".repeat(width),
        MarkKind::Label => center(&label.to_string(), width),
    }
}

fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.chars().take(width).collect();
    }
    let pad = width - len;
    let left = pad / 2;
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pads_evenly_around_a_short_label() {
        assert_eq!(center("1", 5), "  1  ");
    }

    #[test]
    fn center_truncates_a_label_wider_than_its_slot() {
        assert_eq!(center("12", 1), "1");
    }

    #[test]
    fn caret_fills_the_whole_width() {
        assert_eq!(mark_text(MarkKind::Caret, 1, 6), "^^^^^^");
    }
}
