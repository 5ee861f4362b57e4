//! # Field Records
//!
//! Two families of per-kind records:
//!
//! ```text
//! raw.rs        — RawFields: what callers send, legacy aliases included
//! normalized.rs — NormalizedFields: canonical names, resolved values
//! money.rs      — Money: the money-like amount both families share
//! ```
//!
//! Both are tagged unions over [`TransactionKind`], so a normalizer is a
//! total function from one variant to the matching other one.

pub mod money;
pub mod normalized;
pub mod raw;

use serde::Serialize;

use crate::error::{RegistryError, Result};
use crate::kind::TransactionKind;

pub use money::Money;
pub use normalized::*;
pub use raw::*;

// ---------------------------------------------------------------------------
// RawFields
// ---------------------------------------------------------------------------

/// Caller-supplied fields of one request, shaped per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFields {
    AuthChallenge(RawAuthChallenge),
    MatcherOrdersRequest(RawMatcherOrdersRequest),
    MatcherOrderCreate(RawOrder),
    MatcherOrderCancel(RawCancelOrder),
    CoinomatConfirmation(RawCoinomatConfirmation),
    Issue(RawIssue),
    Transfer(RawTransfer),
    Reissue(RawReissue),
    Burn(RawBurn),
    Exchange(RawExchange),
    Lease(RawLease),
    CancelLease(RawCancelLease),
    CreateAlias(RawCreateAlias),
    MassTransfer(RawMassTransfer),
    Data(RawData),
    SetScript(RawSetScript),
    Sponsorship(RawSponsorship),
    SetAssetScript(RawSetAssetScript),
    ScriptInvocation(RawScriptInvocation),
}

impl RawFields {
    /// Reads the raw record of `kind` out of a loosely shaped JSON object.
    ///
    /// Unknown keys are ignored.
    pub fn from_json(kind: TransactionKind, value: serde_json::Value) -> Result<Self> {
        fn parse<T: serde::de::DeserializeOwned>(
            kind: TransactionKind,
            value: serde_json::Value,
        ) -> Result<T> {
            serde_json::from_value(value)
                .map_err(|source| RegistryError::InvalidFields { kind, source })
        }

        use TransactionKind as K;
        Ok(match kind {
            K::AuthChallenge => Self::AuthChallenge(parse(kind, value)?),
            K::MatcherOrdersRequest => Self::MatcherOrdersRequest(parse(kind, value)?),
            K::MatcherOrderCreate => Self::MatcherOrderCreate(parse(kind, value)?),
            K::MatcherOrderCancel => Self::MatcherOrderCancel(parse(kind, value)?),
            K::CoinomatConfirmation => Self::CoinomatConfirmation(parse(kind, value)?),
            K::Issue => Self::Issue(parse(kind, value)?),
            K::Transfer => Self::Transfer(parse(kind, value)?),
            K::Reissue => Self::Reissue(parse(kind, value)?),
            K::Burn => Self::Burn(parse(kind, value)?),
            K::Exchange => Self::Exchange(parse(kind, value)?),
            K::Lease => Self::Lease(parse(kind, value)?),
            K::CancelLease => Self::CancelLease(parse(kind, value)?),
            K::CreateAlias => Self::CreateAlias(parse(kind, value)?),
            K::MassTransfer => Self::MassTransfer(parse(kind, value)?),
            K::Data => Self::Data(parse(kind, value)?),
            K::SetScript => Self::SetScript(parse(kind, value)?),
            K::Sponsorship => Self::Sponsorship(parse(kind, value)?),
            K::SetAssetScript => Self::SetAssetScript(parse(kind, value)?),
            K::ScriptInvocation => Self::ScriptInvocation(parse(kind, value)?),
        })
    }

    pub fn kind(&self) -> TransactionKind {
        use TransactionKind as K;
        match self {
            Self::AuthChallenge(_) => K::AuthChallenge,
            Self::MatcherOrdersRequest(_) => K::MatcherOrdersRequest,
            Self::MatcherOrderCreate(_) => K::MatcherOrderCreate,
            Self::MatcherOrderCancel(_) => K::MatcherOrderCancel,
            Self::CoinomatConfirmation(_) => K::CoinomatConfirmation,
            Self::Issue(_) => K::Issue,
            Self::Transfer(_) => K::Transfer,
            Self::Reissue(_) => K::Reissue,
            Self::Burn(_) => K::Burn,
            Self::Exchange(_) => K::Exchange,
            Self::Lease(_) => K::Lease,
            Self::CancelLease(_) => K::CancelLease,
            Self::CreateAlias(_) => K::CreateAlias,
            Self::MassTransfer(_) => K::MassTransfer,
            Self::Data(_) => K::Data,
            Self::SetScript(_) => K::SetScript,
            Self::Sponsorship(_) => K::Sponsorship,
            Self::SetAssetScript(_) => K::SetAssetScript,
            Self::ScriptInvocation(_) => K::ScriptInvocation,
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedFields
// ---------------------------------------------------------------------------

/// Canonical fields of one request, ready for encoders and converters.
///
/// Serializes as the inner record (no tag).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedFields {
    AuthChallenge(AuthChallenge),
    MatcherOrdersRequest(MatcherOrdersRequest),
    MatcherOrderCreate(Order),
    MatcherOrderCancel(CancelOrder),
    CoinomatConfirmation(CoinomatConfirmation),
    Issue(Issue),
    Transfer(Transfer),
    Reissue(Reissue),
    Burn(Burn),
    Exchange(Exchange),
    Lease(Lease),
    CancelLease(CancelLease),
    CreateAlias(CreateAlias),
    MassTransfer(MassTransfer),
    Data(Data),
    SetScript(SetScript),
    Sponsorship(Sponsorship),
    SetAssetScript(SetAssetScript),
    ScriptInvocation(ScriptInvocation),
}

impl NormalizedFields {
    pub fn kind(&self) -> TransactionKind {
        use TransactionKind as K;
        match self {
            Self::AuthChallenge(_) => K::AuthChallenge,
            Self::MatcherOrdersRequest(_) => K::MatcherOrdersRequest,
            Self::MatcherOrderCreate(_) => K::MatcherOrderCreate,
            Self::MatcherOrderCancel(_) => K::MatcherOrderCancel,
            Self::CoinomatConfirmation(_) => K::CoinomatConfirmation,
            Self::Issue(_) => K::Issue,
            Self::Transfer(_) => K::Transfer,
            Self::Reissue(_) => K::Reissue,
            Self::Burn(_) => K::Burn,
            Self::Exchange(_) => K::Exchange,
            Self::Lease(_) => K::Lease,
            Self::CancelLease(_) => K::CancelLease,
            Self::CreateAlias(_) => K::CreateAlias,
            Self::MassTransfer(_) => K::MassTransfer,
            Self::Data(_) => K::Data,
            Self::SetScript(_) => K::SetScript,
            Self::Sponsorship(_) => K::Sponsorship,
            Self::SetAssetScript(_) => K::SetAssetScript,
            Self::ScriptInvocation(_) => K::ScriptInvocation,
        }
    }

    /// JSON object view of the record.
    pub fn to_json(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        match serde_json::to_value(self).map_err(anyhow::Error::from)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(anyhow::anyhow!("record serialized to non-object {other}").into()),
        }
    }
}
