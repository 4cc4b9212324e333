//! Property paths: the coordinates used to locate a sub-type inside a type
//! tree, both for rendering diagnostics and for accumulating type-variable
//! evidence in `valuesByPath`.

use std::cmp::Ordering;
use std::fmt;

/// One step into a type tree: a positional slot (`$1`, `$2`, ...) or a
/// named record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A positional child slot, e.g. the `$1` in `Array $1`.
    Index(usize),
    /// A named record field.
    Name(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "${i}"),
            PathSegment::Name(name) => write!(f, "{name}"),
        }
    }
}

/// An ordered path into a type tree, e.g. `["x", "$2"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropPath(Vec<PathSegment>);

impl PropPath {
    pub fn root() -> Self {
        PropPath(Vec::new())
    }

    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        PropPath(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Append another path's segments after this one's, used when a
    /// recursive check reports a failure path relative to the sub-type it
    /// was called with and the caller needs it relative to the whole
    /// signature.
    pub fn join(&self, suffix: &PropPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(suffix.0.iter().cloned());
        PropPath(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Structural ordering: index-first integer compare, then lexicographic
    /// comparison of trailing named components. This replaces the naive
    /// lexicographic string sort over serialized keys that only "works for
    /// indexes <10" — a plain string sort puts `"$10"` before `"$2"`, which
    /// this comparator avoids by comparing indices numerically.
    pub fn structural_cmp(&self, other: &PropPath) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            let ord = match (a, b) {
                (PathSegment::Index(x), PathSegment::Index(y)) => x.cmp(y),
                (PathSegment::Name(x), PathSegment::Name(y)) => x.cmp(y),
                (PathSegment::Index(_), PathSegment::Name(_)) => Ordering::Less,
                (PathSegment::Name(_), PathSegment::Index(_)) => Ordering::Greater,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl fmt::Display for PropPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_sort_orders_indices_numerically_past_ten() {
        let mut paths: Vec<PropPath> = (0..12)
            .map(|i| PropPath::root().push(PathSegment::Index(i)))
            .collect();
        paths.sort_by(|a, b| a.structural_cmp(b));
        let indices: Vec<usize> = paths
            .iter()
            .map(|p| match p.segments()[0] {
                PathSegment::Index(i) => i,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn display_renders_dollar_prefixed_indices() {
        let path = PropPath::root()
            .push(PathSegment::Name("x".into()))
            .push(PathSegment::Index(2));
        assert_eq!(path.to_string(), "x.$2");
    }
}
