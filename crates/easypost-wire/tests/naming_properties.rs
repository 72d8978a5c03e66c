//! Property tests for identifier conversion.
//!
//! The converter is a total function over arbitrary text: it must never
//! panic, must be idempotent, and its output must never contain uppercase
//! letters or spaces.

use easypost_wire::{to_wire_name, NameConverter};
use proptest::prelude::*;

/// Identifier-like strings: letters of both cases, digits, separators, spaces.
fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_ ]{0,40}"
}

proptest! {
    #[test]
    fn conversion_is_idempotent(name in identifier()) {
        let once = to_wire_name(&name);
        prop_assert_eq!(to_wire_name(&once), once);
    }

    #[test]
    fn conversion_is_idempotent_on_arbitrary_text(name in any::<String>()) {
        let once = to_wire_name(&name);
        prop_assert_eq!(to_wire_name(&once), once);
    }

    #[test]
    fn output_has_no_uppercase_or_spaces(name in identifier()) {
        let converted = to_wire_name(&name);
        prop_assert!(!converted.chars().any(|c| c.is_uppercase()), "{}", converted);
        prop_assert!(!converted.contains(' '), "{}", converted);
    }

    #[test]
    fn lowercase_snake_names_are_fixed_points(name in "[a-z][a-z0-9]{0,8}(_[a-z0-9]{1,8}){0,4}") {
        prop_assert_eq!(to_wire_name(&name), name);
    }

    #[test]
    fn kebab_conversion_is_idempotent(name in identifier()) {
        let kebab = NameConverter::with_separator('-');
        let once = kebab.convert(&name);
        prop_assert_eq!(kebab.convert(&once), once);
    }
}

#[test]
fn documented_examples() {
    assert_eq!(to_wire_name(""), "");
    assert_eq!(to_wire_name("APIKey"), "api_key");
    assert_eq!(to_wire_name("FirstName"), "first_name");
    assert_eq!(to_wire_name("ID"), "id");
}
