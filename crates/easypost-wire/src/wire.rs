//! # Wire Format — Serialization Configuration
//!
//! [`WireFormat`] bundles the [`NameConverter`] and the [`CodecTable`] into
//! the single configuration object that every client handle carries. The
//! resource-model layer describes an object as a list of [`FieldSpec`]s and
//! uses the format to move between typed scalars and JSON objects keyed by
//! wire names.
//!
//! Decoding is per field: one bad field does not discard its siblings. The
//! caller decides whether a failed field invalidates the whole object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{CodecTable, Scalar, ScalarKind};
use crate::error::{ConversionError, FieldError};
use crate::naming::NameConverter;

/// One field of a resource model: its model identifier and declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Identifier as written in the model (e.g. `"APIKey"`).
    pub identifier: String,
    /// Declared scalar kind.
    pub kind: ScalarKind,
}

impl FieldSpec {
    pub fn new(identifier: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
        }
    }

    /// Build a field from a declared type name (`"int"`, `"string"`...).
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnsupportedScalarKind`] if the type is not a
    /// supported scalar.
    pub fn declared(identifier: impl Into<String>, type_name: &str) -> Result<Self, ConversionError> {
        Ok(Self::new(identifier, type_name.parse()?))
    }
}

/// Result of decoding one field of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    /// Model identifier.
    pub identifier: String,
    /// Key that was read from the JSON object.
    pub wire_name: String,
    /// Decoded value, or why it could not be decoded.
    pub value: Result<Scalar, ConversionError>,
}

impl DecodedField {
    /// The decoded scalar, with the field name attached to any error.
    pub fn into_result(self) -> Result<Scalar, FieldError> {
        let identifier = self.identifier;
        self.value.map_err(|source| FieldError {
            field: identifier,
            source,
        })
    }
}

/// Naming policy plus scalar codecs, shared by every request and response.
#[derive(Debug, Clone, Copy)]
pub struct WireFormat {
    names: NameConverter,
    codecs: &'static CodecTable,
}

impl Default for WireFormat {
    fn default() -> Self {
        Self::new(NameConverter::snake_case(), CodecTable::standard())
    }
}

impl WireFormat {
    pub fn new(names: NameConverter, codecs: &'static CodecTable) -> Self {
        Self { names, codecs }
    }

    pub fn names(&self) -> &NameConverter {
        &self.names
    }

    pub fn codecs(&self) -> &'static CodecTable {
        self.codecs
    }

    /// Wire name for a model identifier.
    pub fn wire_name(&self, identifier: &str) -> String {
        self.names.convert(identifier)
    }

    /// Encode `(identifier, value)` pairs into a JSON object keyed by wire name.
    ///
    /// # Errors
    ///
    /// The first field whose value cannot be encoded.
    pub fn encode_object<'a, I>(&self, fields: I) -> Result<Map<String, Value>, FieldError>
    where
        I: IntoIterator<Item = (&'a str, &'a Scalar)>,
    {
        let mut object = Map::new();
        for (identifier, scalar) in fields {
            let value = self.codecs.encode(scalar).map_err(|source| FieldError {
                field: identifier.to_string(),
                source,
            })?;
            object.insert(self.wire_name(identifier), value);
        }
        Ok(object)
    }

    /// Decode one field. A missing key is treated like `null`.
    pub fn decode_field(&self, spec: &FieldSpec, object: &Map<String, Value>) -> DecodedField {
        let wire_name = self.wire_name(&spec.identifier);
        let value = object.get(&wire_name).unwrap_or(&Value::Null);
        DecodedField {
            identifier: spec.identifier.clone(),
            value: self.codecs.decode(spec.kind, value),
            wire_name,
        }
    }

    /// Decode every field in `schema`, in schema order.
    pub fn decode_object(&self, schema: &[FieldSpec], object: &Map<String, Value>) -> Vec<DecodedField> {
        schema.iter().map(|spec| self.decode_field(spec, object)).collect()
    }
}

/// Serde adapters applying the null-tolerant codecs to plain Rust fields.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Parcel {
///     #[serde(default, deserialize_with = "easypost_wire::lenient::deserialize")]
///     weight: f64,
/// }
///
/// let parcel: Parcel = serde_json::from_str(r#"{"weight": "12.5"}"#).unwrap();
/// assert_eq!(parcel.weight, 12.5);
/// let parcel: Parcel = serde_json::from_str(r#"{"weight": null}"#).unwrap();
/// assert_eq!(parcel.weight, 0.0);
/// ```
///
/// `deserialize_with` only runs for keys that are present; pair it with
/// `#[serde(default)]` so absent keys also get the zero value.
pub mod lenient {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use crate::codec::{CodecTable, WireScalar};

    /// Deserialize any JSON scalar (or `null`) into `T`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: WireScalar,
    {
        let value = Value::deserialize(deserializer)?;
        CodecTable::standard()
            .decode_as::<T>(&value)
            .map_err(serde::de::Error::custom)
    }

    /// Serialize `T` as its natural JSON value.
    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: WireScalar + Clone,
    {
        CodecTable::standard()
            .encode_value(value.clone())
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}
