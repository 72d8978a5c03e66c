//! # easypost-wire — Wire-Format Core for the EasyPost Client
//!
//! Everything the client needs to talk the EasyPost JSON dialect, with no
//! I/O of its own:
//!
//! - **Field naming.** Model identifiers such as `APIKey` or `FirstName`
//!   become `api_key` and `first_name` on the wire.
//! - **Scalar coercion.** The API sends numbers as strings, ids as numbers,
//!   and `null` for fields declared as plain scalars. Each supported
//!   [`ScalarKind`] has a codec that decodes any JSON scalar into the
//!   declared type and substitutes the zero value for `null`.
//! - **Wire format.** [`WireFormat`] bundles both and is the serialization
//!   configuration attached to every client handle.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`naming`] | [`NameConverter`], [`to_wire_name`] |
//! | [`codec`] | [`ScalarKind`], [`Scalar`], [`ScalarCodec`], [`CodecTable`], [`WireScalar`] |
//! | [`wire`] | [`WireFormat`], [`FieldSpec`], [`DecodedField`], [`lenient`] serde adapters |
//! | [`error`] | [`ConversionError`], [`FieldError`] |
//!
//! ## Crate Policy
//!
//! - No network, file or process I/O.
//! - All types are immutable after construction and `Send + Sync`.
//! - No `.unwrap()` outside tests.

pub mod codec;
pub mod error;
pub mod naming;
pub mod wire;

pub use codec::{CodecTable, Scalar, ScalarCodec, ScalarKind, WireScalar, SCALAR_KIND_COUNT};
pub use error::{describe_token, ConversionError, FieldError};
pub use naming::{to_wire_name, NameConverter, DEFAULT_SEPARATOR};
pub use wire::{lenient, DecodedField, FieldSpec, WireFormat};

/// A parsed JSON value as produced by the response parser.
pub type WireValue = serde_json::Value;
