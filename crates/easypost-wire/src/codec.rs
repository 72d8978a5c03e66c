//! # Scalar Coercion — Null-Tolerant Codecs
//!
//! The EasyPost wire format is loose about scalars: numbers arrive as JSON
//! strings, identifiers arrive as numbers, and any field may be `null`
//! regardless of its declared type. This module maps every supported
//! [`ScalarKind`] to a [`ScalarCodec`] that decodes whatever JSON scalar
//! shows up into the declared type, and encodes typed scalars back.
//!
//! ## Decode rules
//!
//! | Wire \ Target | `Text` | `Bool` | integers | floats |
//! |---------------|--------|--------|----------|--------|
//! | `null` | `""` | `false` | `0` | `0.0` |
//! | boolean | `"true"`/`"false"` | as-is | mismatch | mismatch |
//! | number | decimal text | mismatch | range-checked | converted |
//! | string | as-is | mismatch | parsed | parsed |
//! | array/object | mismatch | mismatch | mismatch | mismatch |
//!
//! `null` always decodes to the target's zero value. This is lossy: after
//! decoding, `null` and an explicit default cannot be told apart. Field
//! models depend on it, so it is kept.
//!
//! ## Dispatch
//!
//! [`ScalarKind`] is a closed set. The [`CodecTable`] is a `static` array
//! indexed by kind, built at compile time and never mutated, so lookups need
//! no synchronization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{describe_token, ConversionError};

/// Number of [`ScalarKind`] variants.
pub const SCALAR_KIND_COUNT: usize = 12;

/// The closed set of scalar types this layer can decode and encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ScalarKind {
    /// JSON boolean.
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Single-precision float.
    F32,
    /// Double-precision float.
    F64,
    /// UTF-8 text; also the target for identifiers sent as numbers.
    Text,
}

impl ScalarKind {
    /// Every kind, in table order.
    pub const ALL: [ScalarKind; SCALAR_KIND_COUNT] = [
        Self::Bool,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Text,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Text => "text",
        }
    }

    /// True for the signed and unsigned integer kinds.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64
        )
    }

    /// True for `F32` and `F64`.
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = ConversionError;

    /// Resolve a declared type name, ignoring case. Accepts the Rust
    /// primitive names, the keyword names the resource models use (`int`,
    /// `long`, `double`, `string`...) and the framework type names (`Int32`,
    /// `UInt64`, `System.Single`...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("system.").unwrap_or(&lowered);
        let kind = match name {
            "bool" | "boolean" => Self::Bool,
            "i8" | "sbyte" => Self::I8,
            "i16" | "short" | "int16" => Self::I16,
            "i32" | "int" | "integer" | "int32" => Self::I32,
            "i64" | "long" | "int64" => Self::I64,
            "u8" | "byte" => Self::U8,
            "u16" | "ushort" | "uint16" => Self::U16,
            "u32" | "uint" | "uint32" => Self::U32,
            "u64" | "ulong" | "uint64" => Self::U64,
            "f32" | "float" | "single" => Self::F32,
            "f64" | "double" => Self::F64,
            "text" | "string" | "str" => Self::Text,
            _ => {
                return Err(ConversionError::UnsupportedScalarKind {
                    type_name: s.to_string(),
                })
            }
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ScalarKind {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScalarKind> for &'static str {
    fn from(kind: ScalarKind) -> Self {
        kind.as_str()
    }
}

/// A typed scalar value, one variant per [`ScalarKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A [`ScalarKind::Bool`] value.
    Bool(bool),
    /// A [`ScalarKind::I8`] value.
    I8(i8),
    /// A [`ScalarKind::I16`] value.
    I16(i16),
    /// A [`ScalarKind::I32`] value.
    I32(i32),
    /// A [`ScalarKind::I64`] value.
    I64(i64),
    /// A [`ScalarKind::U8`] value.
    U8(u8),
    /// A [`ScalarKind::U16`] value.
    U16(u16),
    /// A [`ScalarKind::U32`] value.
    U32(u32),
    /// A [`ScalarKind::U64`] value.
    U64(u64),
    /// A [`ScalarKind::F32`] value.
    F32(f32),
    /// A [`ScalarKind::F64`] value.
    F64(f64),
    /// A [`ScalarKind::Text`] value.
    Text(String),
}

impl Scalar {
    /// The kind of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::Text(_) => ScalarKind::Text,
        }
    }

    /// The zero value substituted when the wire sends `null`.
    pub fn default_for(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::I8 => Self::I8(0),
            ScalarKind::I16 => Self::I16(0),
            ScalarKind::I32 => Self::I32(0),
            ScalarKind::I64 => Self::I64(0),
            ScalarKind::U8 => Self::U8(0),
            ScalarKind::U16 => Self::U16(0),
            ScalarKind::U32 => Self::U32(0),
            ScalarKind::U64 => Self::U64(0),
            ScalarKind::F32 => Self::F32(0.0),
            ScalarKind::F64 => Self::F64(0.0),
            ScalarKind::Text => Self::Text(String::new()),
        }
    }
}

/// A Rust primitive that has a [`ScalarKind`].
///
/// Implemented for `bool`, every integer width up to 64 bits, `f32`, `f64`
/// and `String`.
pub trait WireScalar: Sized {
    /// The kind whose codec handles this type.
    const KIND: ScalarKind;

    /// Wrap the value in a [`Scalar`].
    fn into_scalar(self) -> Scalar;

    /// Unwrap a [`Scalar`] of kind [`Self::KIND`]; `None` for any other kind.
    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

macro_rules! wire_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl WireScalar for $ty {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

wire_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Text,
}

// -- Decode functions ---------------------------------------------------------
//
// Null never reaches these; `ScalarCodec::decode` substitutes the default first.

type DecodeFn = fn(&Value) -> Result<Scalar, ConversionError>;

fn mismatch(value: &Value, target: ScalarKind) -> ConversionError {
    ConversionError::DecodeMismatch {
        token: describe_token(value),
        target,
    }
}

fn range_or_parse(value: &Value, target: ScalarKind, reason: impl Into<String>) -> ConversionError {
    ConversionError::DecodeRangeOrParse {
        token: describe_token(value),
        target,
        reason: reason.into(),
    }
}

fn decode_bool(value: &Value) -> Result<Scalar, ConversionError> {
    match value {
        Value::Bool(b) => Ok(Scalar::Bool(*b)),
        other => Err(mismatch(other, ScalarKind::Bool)),
    }
}

fn decode_text(value: &Value) -> Result<Scalar, ConversionError> {
    match value {
        Value::String(s) => Ok(Scalar::Text(s.clone())),
        Value::Bool(b) => Ok(Scalar::Text(b.to_string())),
        Value::Number(n) => Ok(Scalar::Text(number_text(n))),
        other => Err(mismatch(other, ScalarKind::Text)),
    }
}

/// Magnitudes at or above this render in exponent form.
const EXPONENT_ABOVE: f64 = 1e15;
/// Non-zero magnitudes below this render in exponent form.
const EXPONENT_BELOW: f64 = 1e-4;

/// Integral rendering when the number fits an `i64`. Other numbers use the
/// shortest round-trip decimal, switching to exponent form (`1e300`,
/// `1.5e-7`) for very large or very small magnitudes.
fn number_text(n: &Number) -> String {
    match (n.as_i64(), n.as_f64()) {
        (Some(i), _) => i.to_string(),
        (None, Some(f)) => float_text(f),
        (None, None) => n.to_string(),
    }
}

fn float_text(f: f64) -> String {
    let magnitude = f.abs();
    if magnitude >= EXPONENT_ABOVE || (magnitude != 0.0 && magnitude < EXPONENT_BELOW) {
        format!("{f:e}")
    } else {
        f.to_string()
    }
}

fn decode_integer<T>(value: &Value) -> Result<Scalar, ConversionError>
where
    T: WireScalar + TryFrom<i64> + TryFrom<u64> + FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    match value {
        Value::Number(n) => {
            let converted = if let Some(i) = n.as_i64() {
                <T as TryFrom<i64>>::try_from(i).ok()
            } else if let Some(u) = n.as_u64() {
                <T as TryFrom<u64>>::try_from(u).ok()
            } else {
                return Err(range_or_parse(value, T::KIND, "not an integral value"));
            };
            converted
                .map(T::into_scalar)
                .ok_or_else(|| range_or_parse(value, T::KIND, format!("out of range for {}", T::KIND)))
        }
        Value::String(s) => s
            .parse::<T>()
            .map(T::into_scalar)
            .map_err(|e| range_or_parse(value, T::KIND, e.to_string())),
        other => Err(mismatch(other, T::KIND)),
    }
}

fn decode_f32(value: &Value) -> Result<Scalar, ConversionError> {
    match value {
        Value::Number(n) => {
            let wide = n
                .as_f64()
                .ok_or_else(|| range_or_parse(value, ScalarKind::F32, "not representable as f64"))?;
            if wide.abs() > f64::from(f32::MAX) {
                return Err(range_or_parse(value, ScalarKind::F32, "out of range for f32"));
            }
            Ok(Scalar::F32(wide as f32))
        }
        Value::String(s) => parse_float::<f32>(value, s, ScalarKind::F32).map(Scalar::F32),
        other => Err(mismatch(other, ScalarKind::F32)),
    }
}

fn decode_f64(value: &Value) -> Result<Scalar, ConversionError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(Scalar::F64)
            .ok_or_else(|| range_or_parse(value, ScalarKind::F64, "not representable as f64")),
        Value::String(s) => parse_float::<f64>(value, s, ScalarKind::F64).map(Scalar::F64),
        other => Err(mismatch(other, ScalarKind::F64)),
    }
}

/// Parse a float literal. Rust's grammar saturates overflowing literals to
/// infinity; that is reported as out of range unless the text spells infinity.
fn parse_float<T>(value: &Value, text: &str, target: ScalarKind) -> Result<T, ConversionError>
where
    T: FromStr + Into<f64> + Copy,
    <T as FromStr>::Err: fmt::Display,
{
    let parsed = text
        .parse::<T>()
        .map_err(|e| range_or_parse(value, target, e.to_string()))?;
    let unsigned = text.trim_start_matches(&['+', '-'][..]);
    let spells_infinity = unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    let wide: f64 = parsed.into();
    if wide.is_infinite() && !spells_infinity {
        return Err(range_or_parse(value, target, format!("out of range for {target}")));
    }
    Ok(parsed)
}

// -- Codec and table ----------------------------------------------------------

/// Encode/decode pair for one [`ScalarKind`].
#[derive(Clone, Copy)]
pub struct ScalarCodec {
    kind: ScalarKind,
    decode: DecodeFn,
}

impl fmt::Debug for ScalarCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarCodec").field("kind", &self.kind).finish()
    }
}

impl ScalarCodec {
    const fn new(kind: ScalarKind, decode: DecodeFn) -> Self {
        Self { kind, decode }
    }

    /// The kind this codec produces and accepts.
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Decode a wire value into this codec's kind. `null` yields the zero value.
    pub fn decode(&self, value: &Value) -> Result<Scalar, ConversionError> {
        if value.is_null() {
            tracing::trace!(target_kind = %self.kind, "null wire value decoded as default");
            return Ok(Scalar::default_for(self.kind));
        }
        (self.decode)(value)
    }

    /// Encode a scalar of this codec's kind as its natural JSON value.
    ///
    /// # Errors
    ///
    /// [`ConversionError::EncodeMismatch`] if `scalar` is of another kind;
    /// [`ConversionError::NonFiniteFloat`] for NaN or infinite floats.
    pub fn encode(&self, scalar: &Scalar) -> Result<Value, ConversionError> {
        if scalar.kind() != self.kind {
            return Err(ConversionError::EncodeMismatch {
                value: format!("{scalar:?}"),
                target: self.kind,
            });
        }
        let value = match scalar {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::I8(v) => Value::from(*v),
            Scalar::I16(v) => Value::from(*v),
            Scalar::I32(v) => Value::from(*v),
            Scalar::I64(v) => Value::from(*v),
            Scalar::U8(v) => Value::from(*v),
            Scalar::U16(v) => Value::from(*v),
            Scalar::U32(v) => Value::from(*v),
            Scalar::U64(v) => Value::from(*v),
            Scalar::F32(v) => self.encode_float(widen_f32(*v), &v.to_string())?,
            Scalar::F64(v) => self.encode_float(*v, &v.to_string())?,
            Scalar::Text(s) => Value::String(s.clone()),
        };
        Ok(value)
    }

    fn encode_float(&self, v: f64, rendered: &str) -> Result<Value, ConversionError> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| ConversionError::NonFiniteFloat {
                value: rendered.to_string(),
                target: self.kind,
            })
    }
}

/// Widen through the shortest decimal that round-trips the `f32`, so `0.1f32`
/// goes out as `0.1` rather than `0.10000000149011612`.
fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or_else(|_| f64::from(v))
}

/// Immutable mapping from [`ScalarKind`] to its [`ScalarCodec`].
#[derive(Debug)]
pub struct CodecTable {
    codecs: [ScalarCodec; SCALAR_KIND_COUNT],
}

/// Entries are in [`ScalarKind::ALL`] order.
static STANDARD: CodecTable = CodecTable {
    codecs: [
        ScalarCodec::new(ScalarKind::Bool, decode_bool),
        ScalarCodec::new(ScalarKind::I8, decode_integer::<i8>),
        ScalarCodec::new(ScalarKind::I16, decode_integer::<i16>),
        ScalarCodec::new(ScalarKind::I32, decode_integer::<i32>),
        ScalarCodec::new(ScalarKind::I64, decode_integer::<i64>),
        ScalarCodec::new(ScalarKind::U8, decode_integer::<u8>),
        ScalarCodec::new(ScalarKind::U16, decode_integer::<u16>),
        ScalarCodec::new(ScalarKind::U32, decode_integer::<u32>),
        ScalarCodec::new(ScalarKind::U64, decode_integer::<u64>),
        ScalarCodec::new(ScalarKind::F32, decode_f32),
        ScalarCodec::new(ScalarKind::F64, decode_f64),
        ScalarCodec::new(ScalarKind::Text, decode_text),
    ],
};

impl CodecTable {
    /// The process-wide codec table.
    pub fn standard() -> &'static CodecTable {
        &STANDARD
    }

    /// Codec for `kind`.
    pub fn get(&self, kind: ScalarKind) -> &ScalarCodec {
        &self.codecs[kind.index()]
    }

    /// Codec for a declared type name (`"int"`, `"string"`, `"f64"`...).
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnsupportedScalarKind`] if the name is outside the
    /// supported set.
    pub fn codec_for(&self, type_name: &str) -> Result<&ScalarCodec, ConversionError> {
        let kind: ScalarKind = type_name.parse()?;
        Ok(self.get(kind))
    }

    /// Decode `value` as `kind`.
    pub fn decode(&self, kind: ScalarKind, value: &Value) -> Result<Scalar, ConversionError> {
        self.get(kind).decode(value)
    }

    /// Encode `scalar` with the codec of its own kind.
    pub fn encode(&self, scalar: &Scalar) -> Result<Value, ConversionError> {
        self.get(scalar.kind()).encode(scalar)
    }

    /// Decode `value` straight into a Rust primitive.
    pub fn decode_as<T: WireScalar>(&self, value: &Value) -> Result<T, ConversionError> {
        let scalar = self.decode(T::KIND, value)?;
        T::from_scalar(scalar).ok_or_else(|| mismatch(value, T::KIND))
    }

    /// Encode a Rust primitive.
    pub fn encode_value<T: WireScalar>(&self, value: T) -> Result<Value, ConversionError> {
        self.encode(&value.into_scalar())
    }
}
