//! Property tests for the scalar codecs.

use easypost_wire::{CodecTable, ConversionError, Scalar, ScalarKind};
use proptest::prelude::*;
use serde_json::{json, Value};

/// JSON scalars of every variant, including null.
fn wire_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<u64>().prop_map(|n| json!(n)),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| json!(f)),
        "\\PC{0,20}".prop_map(Value::String),
    ]
}

fn kind() -> impl Strategy<Value = ScalarKind> {
    prop::sample::select(ScalarKind::ALL.to_vec())
}

proptest! {
    /// Decoding is total: every (value, kind) pair yields a value of that
    /// kind or a typed error, never a panic.
    #[test]
    fn decode_returns_requested_kind_or_error(value in wire_scalar(), kind in kind()) {
        match CodecTable::standard().decode(kind, &value) {
            Ok(scalar) => prop_assert_eq!(scalar.kind(), kind),
            Err(ConversionError::DecodeMismatch { target, .. })
            | Err(ConversionError::DecodeRangeOrParse { target, .. }) => prop_assert_eq!(target, kind),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    /// Integer literals sent as strings decode to the same value.
    #[test]
    fn integer_text_decodes_to_same_value(n in any::<i32>()) {
        let decoded = CodecTable::standard().decode_as::<i64>(&Value::String(n.to_string()));
        prop_assert_eq!(decoded, Ok(i64::from(n)));
    }

    /// Anything that decodes as text re-encodes as a JSON string.
    #[test]
    fn text_decode_then_encode_is_string(value in wire_scalar()) {
        let table = CodecTable::standard();
        if let Ok(scalar @ Scalar::Text(_)) = table.decode(ScalarKind::Text, &value) {
            prop_assert!(table.encode(&scalar).unwrap().is_string());
        }
    }
}
