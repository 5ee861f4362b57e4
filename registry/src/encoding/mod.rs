//! # Byte-Encoding Dispatch
//!
//! Every dispatch entry names one [`ByteEncoder`]. Ledger transactions and
//! matcher orders are serialized by an external [`KindEncoder`]; the
//! off-chain requests are laid out here.
//!
//! ```text
//! primitives.rs — short strings, big-endian longs, base58 fields
//! offchain.rs   — auth, coinomat, matcher-orders and cancel-order layouts
//! ```

pub mod offchain;
pub mod primitives;

use serde::Serialize;
use std::fmt;

use crate::error::{RegistryError, Result};
use crate::fields::{NormalizedFields, Order};
use crate::kind::WireVersion;

/// Serializer for ledger transactions and matcher orders.
///
/// Implementations own the full byte layout of every kind and version. They
/// receive records that are already normalized.
pub trait KindEncoder: Send + Sync {
    /// Signing bytes of a ledger transaction.
    fn serialize_transaction(
        &self,
        version: WireVersion,
        fields: &NormalizedFields,
    ) -> anyhow::Result<Vec<u8>>;

    /// Signing bytes of a matcher order.
    fn serialize_order(&self, version: WireVersion, order: &Order) -> anyhow::Result<Vec<u8>>;
}

/// Byte layout selected by a dispatch entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteEncoder {
    /// Generic ledger transaction serializer.
    Transaction,
    /// Matcher order serializer.
    Order,
    AuthChallenge,
    CoinomatConfirmation,
    MatcherOrders,
    CancelOrder,
}

impl ByteEncoder {
    /// `true` when the layout is assembled in this crate.
    pub fn is_local(self) -> bool {
        !matches!(self, Self::Transaction | Self::Order)
    }

    /// Produces the signing bytes of `fields`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EncoderMismatch`] when `fields` is not a record this
    /// encoder serves; encoder failures otherwise.
    pub fn encode(
        self,
        version: WireVersion,
        fields: &NormalizedFields,
        kinds: &dyn KindEncoder,
    ) -> Result<Vec<u8>> {
        let bytes = match (self, fields) {
            (Self::Transaction, fields) if fields.kind().ledger_type().is_some() => {
                kinds.serialize_transaction(version, fields)?
            }
            (Self::Order, NormalizedFields::MatcherOrderCreate(order)) => {
                kinds.serialize_order(version, order)?
            }
            (Self::AuthChallenge, NormalizedFields::AuthChallenge(auth)) => {
                offchain::auth_challenge_bytes(auth)?
            }
            (Self::CoinomatConfirmation, NormalizedFields::CoinomatConfirmation(confirmation)) => {
                offchain::coinomat_confirmation_bytes(confirmation)?
            }
            (Self::MatcherOrders, NormalizedFields::MatcherOrdersRequest(request)) => {
                offchain::matcher_orders_bytes(request)?
            }
            (Self::CancelOrder, NormalizedFields::MatcherOrderCancel(cancel)) => {
                offchain::cancel_order_bytes(cancel)?
            }
            (encoder, fields) => {
                return Err(RegistryError::EncoderMismatch {
                    encoder,
                    kind: fields.kind(),
                })
            }
        };
        Ok(bytes)
    }
}

impl fmt::Display for ByteEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transaction => "transaction",
            Self::Order => "order",
            Self::AuthChallenge => "auth-challenge",
            Self::CoinomatConfirmation => "coinomat-confirmation",
            Self::MatcherOrders => "matcher-orders",
            Self::CancelOrder => "cancel-order",
        };
        f.write_str(name)
    }
}
