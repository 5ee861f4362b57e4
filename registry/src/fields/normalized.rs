//! Canonical records produced by the normalizers.
//!
//! Only canonical field names survive here, timestamps are epoch
//! milliseconds, recipients are resolved and scripts carry their `base64:`
//! prefix. These records serialize to the camelCase shape node converters
//! start from.

use serde::Serialize;

use super::money::Money;
use super::raw::{DataEntry, FunctionCall, OrderSide};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Common {
    pub sender_public_key: Option<String>,
    pub timestamp: i64,
    pub fee: Option<Money>,
    pub proofs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthChallenge {
    pub host: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinomatConfirmation {
    pub prefix: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatcherOrdersRequest {
    pub sender_public_key: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrder {
    pub order_id: String,
    pub sender_public_key: String,
    pub proofs: Vec<String>,
}

/// Matcher order.
///
/// `price` is the raw, unscaled amount the caller signed; the node converter
/// rescales it on its own path. Orders embedded in an exchange always carry
/// both `signature` and a non-empty `proofs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_type: OrderSide,
    pub amount: Money,
    pub price: Money,
    pub matcher_public_key: Option<String>,
    pub sender_public_key: Option<String>,
    pub timestamp: i64,
    pub expiration: Option<i64>,
    pub matcher_fee: Option<Money>,
    pub version: Option<u8>,
    pub signature: Option<String>,
    pub proofs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub name: String,
    pub description: String,
    pub quantity: Money,
    pub precision: u8,
    pub reissuable: bool,
    pub script: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reissue {
    pub asset_id: String,
    pub quantity: Money,
    pub reissuable: bool,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Burn {
    pub asset_id: String,
    pub quantity: Money,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub recipient: String,
    pub amount: Money,
    pub asset_id: Option<String>,
    pub attachment: String,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub buy_order: Order,
    pub sell_order: Order,
    pub amount: Option<Money>,
    pub price: Option<Money>,
    pub buy_matcher_fee: Option<Money>,
    pub sell_matcher_fee: Option<Money>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub recipient: String,
    pub amount: Option<Money>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelLease {
    pub lease_id: String,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlias {
    pub alias: String,
    pub chain_id: u8,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MassTransferItem {
    pub recipient: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MassTransfer {
    pub asset_id: Option<String>,
    pub transfers: Vec<MassTransferItem>,
    pub attachment: String,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Data {
    pub data: Vec<DataEntry>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetScript {
    pub script: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub asset_id: Option<String>,
    pub min_sponsored_asset_fee: Option<Money>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAssetScript {
    pub asset_id: String,
    pub script: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptInvocation {
    pub d_app: String,
    pub call: Option<FunctionCall>,
    pub payment: Vec<Money>,
    #[serde(flatten)]
    pub common: Common,
}
