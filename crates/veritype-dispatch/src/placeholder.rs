//! The placeholder sentinel used to hold a positional argument open during
//! partial application, the way `R.__` works in Ramda-style curry.

use veritype_types::Value;

const PLACEHOLDER_TAG: &str = "veritype::placeholder";

/// A value that, when passed at a given position, leaves that position
/// unfilled for a later call to supply — letting callers curry
/// out-of-order (`add(__, 2)(1)` instead of only `add(1)(2)`).
pub fn placeholder() -> Value {
    Value::opaque(PLACEHOLDER_TAG, ())
}

pub fn is_placeholder(value: &Value) -> bool {
    matches!(value, Value::Opaque(obj) if obj.tag == PLACEHOLDER_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_recognized_and_distinct_from_other_opaques() {
        assert!(is_placeholder(&placeholder()));
        assert!(!is_placeholder(&Value::opaque("something-else", ())));
        assert!(!is_placeholder(&Value::Null));
    }
}
