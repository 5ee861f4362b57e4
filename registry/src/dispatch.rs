//! # Dispatch Table
//!
//! The `(kind, version)` table every request is routed through. It is built
//! once per process and never mutated afterwards; a key that is not in the
//! table is an error, never a fallback to a neighbouring version.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::encoding::ByteEncoder;
use crate::error::{RegistryError, Result};
use crate::kind::{Capability, TransactionKind, WireVersion};
use crate::node::NodeConverter;

/// Key of one dispatch entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DispatchKey {
    pub kind: TransactionKind,
    pub version: WireVersion,
}

/// Everything the registry knows about one `(kind, version)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchEntry {
    pub key: DispatchKey,
    pub encoder: ByteEncoder,
    pub capability: Capability,
    pub converter: Option<NodeConverter>,
}

/// Per-kind row of the standard table.
struct KindRow {
    kind: TransactionKind,
    versions: &'static [WireVersion],
    encoder: ByteEncoder,
    capability: Capability,
    converter: Option<NodeConverter>,
}

fn row(
    kind: TransactionKind,
    versions: &'static [WireVersion],
    encoder: ByteEncoder,
    capability: Capability,
    converter: Option<NodeConverter>,
) -> KindRow {
    KindRow {
        kind,
        versions,
        encoder,
        capability,
        converter,
    }
}

fn ledger(
    kind: TransactionKind,
    versions: &'static [WireVersion],
    converter: NodeConverter,
) -> KindRow {
    row(
        kind,
        versions,
        ByteEncoder::Transaction,
        Capability::Transaction,
        Some(converter),
    )
}

fn standard_rows() -> Vec<KindRow> {
    use Capability as C;
    use NodeConverter as N;
    use TransactionKind as K;

    vec![
        row(K::AuthChallenge, &[1], ByteEncoder::AuthChallenge, C::Request, None),
        row(K::MatcherOrdersRequest, &[1], ByteEncoder::MatcherOrders, C::Request, None),
        row(
            K::MatcherOrderCreate,
            &[0, 1, 2, 3],
            ByteEncoder::Order,
            C::Order,
            Some(N::CreateOrder),
        ),
        row(
            K::MatcherOrderCancel,
            &[0, 1],
            ByteEncoder::CancelOrder,
            C::Request,
            Some(N::CancelOrder),
        ),
        row(
            K::CoinomatConfirmation,
            &[1],
            ByteEncoder::CoinomatConfirmation,
            C::Request,
            None,
        ),
        ledger(K::Issue, &[2], N::Generic),
        ledger(K::Transfer, &[2], N::Generic),
        ledger(K::Reissue, &[2], N::Generic),
        ledger(K::Burn, &[2], N::Generic),
        ledger(K::Exchange, &[0, 2], N::Exchange),
        ledger(K::Lease, &[2], N::Generic),
        ledger(K::CancelLease, &[2], N::Generic),
        ledger(K::CreateAlias, &[2], N::CreateAlias),
        ledger(K::MassTransfer, &[0, 1], N::Generic),
        ledger(K::Data, &[0, 1], N::Generic),
        ledger(K::SetScript, &[0, 1], N::Generic),
        ledger(K::Sponsorship, &[0, 1], N::Generic),
        ledger(K::SetAssetScript, &[0, 1], N::Generic),
        ledger(K::ScriptInvocation, &[0, 1], N::Generic),
    ]
}

// ---------------------------------------------------------------------------
// DispatchTable
// ---------------------------------------------------------------------------

/// Read-only `(kind, version)` table.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    entries: BTreeMap<DispatchKey, DispatchEntry>,
}

impl DispatchTable {
    /// Table with every kind and wire version the wallet signs.
    pub fn standard() -> Self {
        let mut entries = BTreeMap::new();
        for row in standard_rows() {
            for &version in row.versions {
                let key = DispatchKey {
                    kind: row.kind,
                    version,
                };
                entries.insert(
                    key,
                    DispatchEntry {
                        key,
                        encoder: row.encoder,
                        capability: row.capability,
                        converter: row.converter,
                    },
                );
            }
        }
        debug!(entries = entries.len(), "dispatch table built");
        Self { entries }
    }

    /// Process-wide standard table.
    pub fn global() -> &'static Self {
        static TABLE: OnceLock<DispatchTable> = OnceLock::new();
        TABLE.get_or_init(Self::standard)
    }

    /// Entry of `(kind, version)`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnsupportedDispatch`] when the pair is not in the
    /// table.
    pub fn lookup(&self, kind: TransactionKind, version: WireVersion) -> Result<&DispatchEntry> {
        self.entries
            .get(&DispatchKey { kind, version })
            .ok_or_else(|| {
                warn!(%kind, version, "no dispatch entry");
                RegistryError::UnsupportedDispatch { kind, version }
            })
    }

    /// Wire versions of `kind`, ascending.
    pub fn versions(&self, kind: TransactionKind) -> Vec<WireVersion> {
        self.entries
            .keys()
            .filter(|key| key.kind == kind)
            .map(|key| key.version)
            .collect()
    }

    /// All entries, ordered by kind then version.
    pub fn entries(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.entries.values()
    }

    /// Kinds with at least one entry, in table order.
    pub fn kinds(&self) -> Vec<TransactionKind> {
        let mut kinds: Vec<TransactionKind> = self.entries.keys().map(|key| key.kind).collect();
        kinds.dedup();
        kinds
    }

    /// Capability of `kind`, if the kind has any entry.
    pub fn capability(&self, kind: TransactionKind) -> Option<Capability> {
        self.entries()
            .find(|entry| entry.key.kind == kind)
            .map(|entry| entry.capability)
    }

    /// Node converter of `kind`, if the kind has one.
    pub fn converter(&self, kind: TransactionKind) -> Option<NodeConverter> {
        self.entries()
            .find(|entry| entry.key.kind == kind)
            .and_then(|entry| entry.converter)
    }

    /// Checks the table invariants.
    ///
    /// Every kind has at least one version, and capability and converter
    /// are the same across all versions of a kind.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidDispatchTable`] naming the first kind that
    /// breaks an invariant.
    pub fn validate(&self) -> Result<()> {
        for kind in TransactionKind::ALL {
            let invalid = |reason: String| RegistryError::InvalidDispatchTable { kind, reason };
            let mut rows = self.entries().filter(|entry| entry.key.kind == kind);
            let first = rows
                .next()
                .ok_or_else(|| invalid("has no wire version".into()))?;
            for entry in rows {
                if entry.capability != first.capability {
                    return Err(invalid(format!(
                        "v{} signs with {}, v{} with {}",
                        first.key.version, first.capability, entry.key.version, entry.capability
                    )));
                }
                if entry.converter != first.converter {
                    return Err(invalid(format!(
                        "v{} and v{} disagree on the node converter",
                        first.key.version, entry.key.version
                    )));
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Free-standing queries over the global table
// ---------------------------------------------------------------------------

/// Byte encoder of `(kind, version)`.
pub fn get_byte_encoder(kind: TransactionKind, version: WireVersion) -> Result<ByteEncoder> {
    DispatchTable::global()
        .lookup(kind, version)
        .map(|entry| entry.encoder)
}

/// Node converter of `kind`; `None` for kinds that are never broadcast.
pub fn get_node_converter(kind: TransactionKind) -> Option<NodeConverter> {
    DispatchTable::global().converter(kind)
}

/// Signing capability of `kind`; `None` only for a kind with no table entry,
/// which [`DispatchTable::validate`] rules out for the standard table.
pub fn get_required_capability(kind: TransactionKind) -> Option<Capability> {
    DispatchTable::global().capability(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_valid() {
        DispatchTable::standard().validate().unwrap();
    }

    #[test]
    fn every_kind_is_present() {
        let table = DispatchTable::global();
        assert_eq!(table.kinds().len(), TransactionKind::ALL.len());
        for kind in TransactionKind::ALL {
            assert!(!table.versions(kind).is_empty(), "{kind} has no versions");
        }
    }

    #[test]
    fn entry_count_matches_the_version_lists() {
        // 9 off-chain entries, 7 + 2 + 12 for ledger kinds
        assert_eq!(DispatchTable::standard().entries().count(), 30);
    }

    #[test]
    fn versions_are_listed_ascending() {
        let table = DispatchTable::global();
        assert_eq!(table.versions(TransactionKind::MatcherOrderCreate), vec![0, 1, 2, 3]);
        assert_eq!(table.versions(TransactionKind::Exchange), vec![0, 2]);
        assert_eq!(table.versions(TransactionKind::Transfer), vec![2]);
    }

    #[test]
    fn missing_versions_do_not_fall_back() {
        let err = get_byte_encoder(TransactionKind::Exchange, 1).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnsupportedDispatch {
                kind: TransactionKind::Exchange,
                version: 1
            }
        ));
        assert!(get_byte_encoder(TransactionKind::Transfer, 3).is_err());
    }

    #[test]
    fn encoders_follow_the_kind() {
        assert_eq!(
            get_byte_encoder(TransactionKind::Transfer, 2).unwrap(),
            ByteEncoder::Transaction
        );
        assert_eq!(
            get_byte_encoder(TransactionKind::MatcherOrderCreate, 3).unwrap(),
            ByteEncoder::Order
        );
        assert_eq!(
            get_byte_encoder(TransactionKind::MatcherOrderCancel, 0).unwrap(),
            ByteEncoder::CancelOrder
        );
        assert_eq!(
            get_byte_encoder(TransactionKind::AuthChallenge, 1).unwrap(),
            ByteEncoder::AuthChallenge
        );
    }

    #[test]
    fn capabilities() {
        assert_eq!(
            get_required_capability(TransactionKind::AuthChallenge),
            Some(Capability::Request)
        );
        assert_eq!(
            get_required_capability(TransactionKind::MatcherOrderCancel),
            Some(Capability::Request)
        );
        assert_eq!(
            get_required_capability(TransactionKind::MatcherOrderCreate),
            Some(Capability::Order)
        );
        for kind in TransactionKind::ALL.into_iter().filter(|k| k.ledger_type().is_some()) {
            assert_eq!(get_required_capability(kind), Some(Capability::Transaction));
        }
    }

    #[test]
    fn off_chain_requests_have_no_converter() {
        assert_eq!(get_node_converter(TransactionKind::AuthChallenge), None);
        assert_eq!(get_node_converter(TransactionKind::MatcherOrdersRequest), None);
        assert_eq!(get_node_converter(TransactionKind::CoinomatConfirmation), None);
        assert_eq!(
            get_node_converter(TransactionKind::MatcherOrderCancel),
            Some(NodeConverter::CancelOrder)
        );
        assert_eq!(
            get_node_converter(TransactionKind::CreateAlias),
            Some(NodeConverter::CreateAlias)
        );
        assert_eq!(
            get_node_converter(TransactionKind::Data),
            Some(NodeConverter::Generic)
        );
    }

    #[test]
    fn validation_catches_inconsistent_capabilities() {
        let mut table = DispatchTable::standard();
        let key = DispatchKey {
            kind: TransactionKind::Exchange,
            version: 2,
        };
        if let Some(entry) = table.entries.get_mut(&key) {
            entry.capability = Capability::Request;
        }
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidDispatchTable {
                kind: TransactionKind::Exchange,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "invalid dispatch table: exchange v0 signs with sign-transaction, v2 with sign-request"
        );
    }

    #[test]
    fn validation_catches_missing_kinds() {
        let mut table = DispatchTable::standard();
        table
            .entries
            .retain(|key, _| key.kind != TransactionKind::Burn);
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidDispatchTable {
                kind: TransactionKind::Burn,
                ..
            }
        ));
        assert_eq!(err.to_string(), "invalid dispatch table: burn has no wire version");
    }

    #[test]
    fn capability_comes_only_from_the_table() {
        let mut table = DispatchTable::standard();
        table
            .entries
            .retain(|key, _| key.kind != TransactionKind::Lease);
        assert_eq!(table.capability(TransactionKind::Lease), None);
        assert_eq!(
            table.capability(TransactionKind::Transfer),
            Some(Capability::Transaction)
        );
    }
}
