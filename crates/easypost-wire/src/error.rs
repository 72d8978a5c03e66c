//! # Error Types — Scalar Conversion Failures
//!
//! Every failure carries the offending wire token (rendered by
//! [`describe_token`]) or value, plus the [`ScalarKind`] that was requested,
//! so callers can report exactly which field failed and why. [`FieldError`]
//! adds the name of the field being converted.

use serde_json::Value;
use thiserror::Error;

use crate::codec::ScalarKind;

/// Error while converting between a wire value and a typed scalar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A codec was requested for a type outside the supported scalar set.
    ///
    /// Raised at codec lookup, never during decode.
    #[error("unsupported scalar type: {type_name}")]
    UnsupportedScalarKind {
        /// The declared type name that could not be resolved.
        type_name: String,
    },

    /// The wire token's variant cannot be coerced into the target kind
    /// (e.g. a boolean into a numeric field).
    #[error("cannot decode {token} as {target}")]
    DecodeMismatch {
        /// Description of the offending wire token.
        token: String,
        /// The kind that was requested.
        target: ScalarKind,
    },

    /// A numeric value overflowed the target width, was not integral, or a
    /// string was not a valid literal for the target type.
    #[error("cannot decode {token} as {target}: {reason}")]
    DecodeRangeOrParse {
        /// Description of the offending wire token.
        token: String,
        /// The kind that was requested.
        target: ScalarKind,
        /// What went wrong (overflow, parse error message).
        reason: String,
    },

    /// A scalar was handed to the codec of a different kind.
    #[error("cannot encode {value} with the {target} codec")]
    EncodeMismatch {
        /// Debug rendering of the scalar.
        value: String,
        /// The codec's kind.
        target: ScalarKind,
    },

    /// NaN and infinities have no JSON representation.
    #[error("cannot encode non-finite {target} value {value}")]
    NonFiniteFloat {
        /// Rendering of the float.
        value: String,
        /// The codec's kind.
        target: ScalarKind,
    },
}

/// A [`ConversionError`] attributed to one field of an object.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("field `{field}`: {source}")]
pub struct FieldError {
    /// The model identifier of the failing field.
    pub field: String,
    /// What went wrong.
    #[source]
    pub source: ConversionError,
}

/// Render a wire value for error messages: `null`, `boolean true`,
/// `number 3.5`, `string "abc"`, `array`, `object`.
pub fn describe_token(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tokens_are_described_by_variant() {
        assert_eq!(describe_token(&Value::Null), "null");
        assert_eq!(describe_token(&json!(true)), "boolean true");
        assert_eq!(describe_token(&json!(3.5)), "number 3.5");
        assert_eq!(describe_token(&json!("abc")), "string \"abc\"");
        assert_eq!(describe_token(&json!([1])), "array");
        assert_eq!(describe_token(&json!({"a": 1})), "object");
    }

    #[test]
    fn mismatch_message_names_token_and_target() {
        let err = ConversionError::DecodeMismatch {
            token: describe_token(&json!(true)),
            target: ScalarKind::I32,
        };
        assert_eq!(err.to_string(), "cannot decode boolean true as i32");
    }
}
