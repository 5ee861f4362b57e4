//! Error types for dispatch, normalization and conversion.
//!
//! Every fallible operation in the crate returns a [`RegistryError`]. None of
//! them are retried internally: the core is deterministic, so the same input
//! always fails the same way.

use thiserror::Error;

use crate::kind::{TransactionKind, WireVersion};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised while dispatching, normalizing or converting a request.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The `(kind, version)` pair is not in the dispatch table.
    #[error("unsupported dispatch: {kind} has no wire version {version}")]
    UnsupportedDispatch {
        /// Requested kind.
        kind: TransactionKind,
        /// Requested wire version.
        version: WireVersion,
    },

    /// A field needed to resolve the record is structurally absent.
    #[error("missing field `{field}` for {kind}")]
    MissingField {
        /// Kind being normalized.
        kind: TransactionKind,
        /// Canonical name of the missing field.
        field: &'static str,
    },

    /// Script source that is not base64 even after prefix stripping.
    #[error("malformed script: {reason}")]
    MalformedScript {
        /// Decoder diagnostic.
        reason: String,
    },

    /// The raw JSON does not fit the record shape of the kind.
    #[error("invalid fields for {kind}: {source}")]
    InvalidFields {
        /// Kind whose record failed to deserialize.
        kind: TransactionKind,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A base58 field used in a locally assembled layout failed to decode.
    #[error("invalid base58 in `{field}`: {reason}")]
    InvalidBase58 {
        /// Canonical field name.
        field: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A string too long for its `u16` length prefix.
    #[error("field `{field}` is {len} bytes, over the u16 length prefix")]
    FieldTooLong {
        /// Canonical field name.
        field: &'static str,
        /// Encoded length in bytes.
        len: usize,
    },

    /// A normalized record handed to an encoder that does not serve its kind.
    #[error("{encoder} encoder cannot serialize {kind}")]
    EncoderMismatch {
        /// Encoder that was asked.
        encoder: crate::encoding::ByteEncoder,
        /// Kind of the record it received.
        kind: TransactionKind,
    },

    /// A normalized record handed to a node converter that does not serve its kind.
    #[error("{converter} node converter cannot convert {kind}")]
    ConverterMismatch {
        /// Converter that was asked.
        converter: crate::node::NodeConverter,
        /// Kind of the record it received.
        kind: TransactionKind,
    },

    /// A timestamp that is neither epoch milliseconds nor an RFC 3339 date.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The network byte does not map to a printable network code.
    #[error("invalid network byte: {0:#04x}")]
    InvalidNetworkByte(u8),

    /// Numeric code or name that matches no transaction kind.
    #[error("unknown transaction kind: {0}")]
    UnknownKind(String),

    /// The dispatch table breaks one of its per-kind invariants.
    #[error("invalid dispatch table: {kind} {reason}")]
    InvalidDispatchTable {
        /// Kind whose rows are inconsistent.
        kind: TransactionKind,
        /// What is wrong with them.
        reason: String,
    },

    /// Order price rescaling overflowed a 64-bit coin amount.
    #[error("order price overflows after rescaling")]
    PriceOverflow,

    /// A normalized record was handed to the encoder or converter of another kind.
    #[error("record kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        /// Kind the encoder or converter serves.
        expected: TransactionKind,
        /// Kind of the record it received.
        actual: TransactionKind,
    },

    /// Failure reported by an external collaborator, passed through untouched.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl RegistryError {
    pub(crate) fn missing(kind: TransactionKind, field: &'static str) -> Self {
        Self::MissingField { kind, field }
    }
}
