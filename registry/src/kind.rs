//! Transaction kinds, wire versions and signing capabilities.
//!
//! These types are the vocabulary of the dispatch table. They are small and
//! `Copy` so they can be used as map keys and passed around freely.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Per-kind wire version. Numbering is independent for every kind.
pub type WireVersion = u8;

// ---------------------------------------------------------------------------
// TransactionKind
// ---------------------------------------------------------------------------

/// Logical category of a transaction or signable request.
///
/// Ledger kinds carry the node's transaction type number as their code.
/// Off-chain kinds (auth challenges, matcher requests, coinomat
/// confirmations) live in the `1000..` range and never reach the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionKind {
    /// Host/data authentication challenge.
    AuthChallenge,
    /// Timestamp-authenticated request for the matcher's order list.
    MatcherOrdersRequest,
    /// New order submitted to the matcher.
    MatcherOrderCreate,
    /// Cancellation of a matcher order.
    MatcherOrderCancel,
    /// Coinomat gateway confirmation.
    CoinomatConfirmation,
    Issue,
    Transfer,
    Reissue,
    Burn,
    Exchange,
    Lease,
    CancelLease,
    CreateAlias,
    MassTransfer,
    Data,
    SetScript,
    Sponsorship,
    SetAssetScript,
    ScriptInvocation,
}

impl TransactionKind {
    /// Every kind the registry knows about, in code order.
    pub const ALL: [TransactionKind; 19] = [
        Self::Issue,
        Self::Transfer,
        Self::Reissue,
        Self::Burn,
        Self::Exchange,
        Self::Lease,
        Self::CancelLease,
        Self::CreateAlias,
        Self::MassTransfer,
        Self::Data,
        Self::SetScript,
        Self::Sponsorship,
        Self::SetAssetScript,
        Self::ScriptInvocation,
        Self::AuthChallenge,
        Self::MatcherOrdersRequest,
        Self::MatcherOrderCreate,
        Self::MatcherOrderCancel,
        Self::CoinomatConfirmation,
    ];

    /// Numeric code used by wallet requests.
    pub fn code(self) -> u16 {
        match self {
            Self::Issue => 3,
            Self::Transfer => 4,
            Self::Reissue => 5,
            Self::Burn => 6,
            Self::Exchange => 7,
            Self::Lease => 8,
            Self::CancelLease => 9,
            Self::CreateAlias => 10,
            Self::MassTransfer => 11,
            Self::Data => 12,
            Self::SetScript => 13,
            Self::Sponsorship => 14,
            Self::SetAssetScript => 15,
            Self::ScriptInvocation => 16,
            Self::AuthChallenge => 1000,
            Self::MatcherOrdersRequest => 1001,
            Self::MatcherOrderCreate => 1002,
            Self::MatcherOrderCancel => 1003,
            Self::CoinomatConfirmation => 1004,
        }
    }

    /// Transaction type number on the ledger, `None` for off-chain kinds.
    pub fn ledger_type(self) -> Option<u8> {
        match self.code() {
            code @ 3..=16 => Some(code as u8),
            _ => None,
        }
    }

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::AuthChallenge => "auth-challenge",
            Self::MatcherOrdersRequest => "matcher-orders-request",
            Self::MatcherOrderCreate => "matcher-order-create",
            Self::MatcherOrderCancel => "matcher-order-cancel",
            Self::CoinomatConfirmation => "coinomat-confirmation",
            Self::Issue => "issue",
            Self::Transfer => "transfer",
            Self::Reissue => "reissue",
            Self::Burn => "burn",
            Self::Exchange => "exchange",
            Self::Lease => "lease",
            Self::CancelLease => "cancel-lease",
            Self::CreateAlias => "create-alias",
            Self::MassTransfer => "mass-transfer",
            Self::Data => "data",
            Self::SetScript => "set-script",
            Self::Sponsorship => "sponsorship",
            Self::SetAssetScript => "set-asset-script",
            Self::ScriptInvocation => "script-invocation",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u16> for TransactionKind {
    type Error = RegistryError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| RegistryError::UnknownKind(code.to_string()))
    }
}

impl FromStr for TransactionKind {
    type Err = RegistryError;

    /// Accepts the kebab-case name or the decimal code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u16>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RegistryError::UnknownKind(s.to_string()))
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CodeOrName {
            Code(u16),
            Name(String),
        }

        match CodeOrName::deserialize(deserializer)? {
            CodeOrName::Code(code) => Self::try_from(code).map_err(serde::de::Error::custom),
            CodeOrName::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Signing operation a kind requires from the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Generic request signing (`sign_request`).
    Request,
    /// Ledger transaction signing (`sign_transaction`).
    Transaction,
    /// Matcher order signing (`sign_order`).
    Order,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => write!(f, "sign-request"),
            Self::Transaction => write!(f, "sign-transaction"),
            Self::Order => write!(f, "sign-order"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_try_from() {
        for kind in TransactionKind::ALL {
            assert_eq!(TransactionKind::try_from(kind.code()).unwrap(), kind);
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<u16> = TransactionKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), TransactionKind::ALL.len());
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            TransactionKind::try_from(2),
            Err(RegistryError::UnknownKind(_))
        ));
    }

    #[test]
    fn parses_names_and_codes() {
        assert_eq!(
            "mass-transfer".parse::<TransactionKind>().unwrap(),
            TransactionKind::MassTransfer
        );
        assert_eq!(
            "1003".parse::<TransactionKind>().unwrap(),
            TransactionKind::MatcherOrderCancel
        );
        assert!("teleport".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn ledger_types_only_for_ledger_kinds() {
        assert_eq!(TransactionKind::Transfer.ledger_type(), Some(4));
        assert_eq!(TransactionKind::ScriptInvocation.ledger_type(), Some(16));
        assert_eq!(TransactionKind::AuthChallenge.ledger_type(), None);
        assert_eq!(TransactionKind::MatcherOrderCreate.ledger_type(), None);
    }

    #[test]
    fn deserializes_from_code_or_name() {
        let by_code: TransactionKind = serde_json::from_str("4").unwrap();
        let by_name: TransactionKind = serde_json::from_str("\"transfer\"").unwrap();
        assert_eq!(by_code, TransactionKind::Transfer);
        assert_eq!(by_name, TransactionKind::Transfer);
        assert_eq!(
            serde_json::to_string(&TransactionKind::CancelLease).unwrap(),
            "\"cancel-lease\""
        );
    }

    #[test]
    fn capability_display() {
        assert_eq!(Capability::Order.to_string(), "sign-order");
        assert_eq!(Capability::Request.to_string(), "sign-request");
    }
}
