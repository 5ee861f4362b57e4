//! Caller-shaped records.
//!
//! Raw records accept everything a wallet has historically sent, legacy
//! aliases included, and enforce nothing beyond basic JSON shape. Any field a
//! normalizer has to resolve is an `Option` so its absence surfaces as a
//! [`MissingField`](crate::RegistryError::MissingField) instead of a serde
//! error.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Timestamp as sent by the caller: epoch milliseconds or a date-like string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Text(String),
}

/// Attachment as sent by the caller: free text or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawAttachment {
    Text(String),
    Bytes(Vec<u8>),
}

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// One key/value entry of a data transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: DataType,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Integer,
    Boolean,
    Binary,
    String,
}

/// dApp function call of a script invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub function: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

/// Fields shared by every ledger transaction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommon {
    pub sender_public_key: Option<String>,
    pub timestamp: Option<RawTimestamp>,
    pub fee: Option<Money>,
    pub proofs: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Off-chain requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAuthChallenge {
    pub host: Option<String>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCoinomatConfirmation {
    pub prefix: Option<String>,
    pub timestamp: Option<RawTimestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatcherOrdersRequest {
    pub sender_public_key: Option<String>,
    pub timestamp: Option<RawTimestamp>,
}

/// Order cancellation. `id`/`orderId` and `sender`/`senderPublicKey` are
/// both accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCancelOrder {
    pub id: Option<String>,
    pub order_id: Option<String>,
    pub sender: Option<String>,
    pub sender_public_key: Option<String>,
    pub signature: Option<String>,
    pub proofs: Option<Vec<String>>,
}

/// Matcher order, standalone (create-order) or embedded in an exchange.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub order_type: Option<OrderSide>,
    pub amount: Option<Money>,
    pub price: Option<Money>,
    pub matcher_public_key: Option<String>,
    pub expiration: Option<RawTimestamp>,
    pub matcher_fee: Option<Money>,
    pub version: Option<u8>,
    pub signature: Option<String>,
    pub sender_public_key: Option<String>,
    pub timestamp: Option<RawTimestamp>,
    pub proofs: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Ledger transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIssue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: Option<Money>,
    pub quantity: Option<Money>,
    pub precision: Option<u8>,
    #[serde(default)]
    pub reissuable: bool,
    pub script: Option<String>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReissue {
    pub asset_id: Option<String>,
    pub amount: Option<Money>,
    pub quantity: Option<Money>,
    #[serde(default)]
    pub reissuable: bool,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBurn {
    pub asset_id: Option<String>,
    pub amount: Option<Money>,
    pub quantity: Option<Money>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransfer {
    pub recipient: Option<String>,
    pub amount: Option<Money>,
    pub asset_id: Option<String>,
    pub attachment: Option<RawAttachment>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExchange {
    pub buy_order: Option<RawOrder>,
    pub sell_order: Option<RawOrder>,
    pub amount: Option<Money>,
    pub price: Option<Money>,
    pub buy_matcher_fee: Option<Money>,
    pub sell_matcher_fee: Option<Money>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLease {
    pub recipient: Option<String>,
    pub amount: Option<Money>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCancelLease {
    #[serde(default)]
    pub lease_id: String,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCreateAlias {
    #[serde(default)]
    pub alias: String,
    pub chain_id: Option<u8>,
    #[serde(flatten)]
    pub common: RawCommon,
}

/// One mass-transfer entry; `name` is the legacy spelling of `recipient`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMassTransferItem {
    pub recipient: Option<String>,
    pub name: Option<String>,
    pub amount: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMassTransfer {
    pub asset_id: Option<String>,
    #[serde(default)]
    pub transfers: Vec<RawMassTransferItem>,
    pub attachment: Option<RawAttachment>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawData {
    #[serde(default)]
    pub data: Vec<DataEntry>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSetScript {
    pub script: Option<String>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSponsorship {
    pub asset_id: Option<String>,
    pub min_sponsored_asset_fee: Option<Money>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSetAssetScript {
    #[serde(default)]
    pub asset_id: String,
    pub script: Option<String>,
    #[serde(flatten)]
    pub common: RawCommon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScriptInvocation {
    pub d_app: Option<String>,
    pub call: Option<FunctionCall>,
    #[serde(default)]
    pub payment: Vec<Money>,
    #[serde(flatten)]
    pub common: RawCommon,
}
