//! # Node Conversion
//!
//! Turns a normalized record into the JSON object a node accepts for
//! broadcast. Most kinds go through the same three steps:
//!
//! ```text
//! NormalizedFields ──money_like_to_node──▶ params ──EntityFactory──▶ node ──▶ timestamp fix-up
//! ```
//!
//! A handful of kinds add a step of their own (order price rescaling, the
//! exchange order rename, the alias chain id). Matcher cancellations skip the
//! entity factory entirely.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;
use tracing::debug;

use crate::config::{NetworkContext, MAINNET_BYTE};
use crate::error::{RegistryError, Result};
use crate::fields::{CancelOrder, Exchange, Money, NormalizedFields, Order};
use crate::kind::{TransactionKind, WireVersion};
use crate::normalize::{coerce_json_timestamp, to_order_price};

// ---------------------------------------------------------------------------
// Entity construction
// ---------------------------------------------------------------------------

/// Builds the domain entity of a kind from node-shaped parameters.
pub trait EntityFactory: Send + Sync {
    /// Node payload for `kind` at `version`.
    fn construct(
        &self,
        kind: TransactionKind,
        version: WireVersion,
        params: Map<String, Value>,
    ) -> anyhow::Result<Value>;
}

/// Entity factory that stamps the envelope fields and nothing else.
///
/// Ledger payloads get `type`, `version`, `chainId` and an empty `proofs`
/// list when the params carry none. Values already present are kept, except
/// `type`, which always follows the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicEntityFactory {
    chain_id: u8,
}

impl BasicEntityFactory {
    pub fn new(chain_id: u8) -> Self {
        Self { chain_id }
    }

    /// Factory stamping the chain id of `ctx`.
    pub fn for_network(ctx: &NetworkContext) -> Self {
        Self::new(ctx.network_byte())
    }

    pub fn chain_id(&self) -> u8 {
        self.chain_id
    }
}

impl Default for BasicEntityFactory {
    fn default() -> Self {
        Self::new(MAINNET_BYTE)
    }
}

impl EntityFactory for BasicEntityFactory {
    fn construct(
        &self,
        kind: TransactionKind,
        version: WireVersion,
        mut params: Map<String, Value>,
    ) -> anyhow::Result<Value> {
        if let Some(ledger_type) = kind.ledger_type() {
            params.insert("type".into(), ledger_type.into());
            params
                .entry("chainId")
                .or_insert_with(|| self.chain_id.into());
        }
        params.entry("version").or_insert_with(|| version.into());
        params.entry("proofs").or_insert_with(|| json!([]));
        Ok(Value::Object(params))
    }
}

// ---------------------------------------------------------------------------
// Money-like flattening
// ---------------------------------------------------------------------------

/// Node field that receives the asset id of a money-valued field.
fn asset_field(key: &str) -> Option<&'static str> {
    match key {
        "amount" | "quantity" | "minSponsoredAssetFee" => Some("assetId"),
        "fee" => Some("feeAssetId"),
        "matcherFee" => Some("matcherFeeAssetId"),
        _ => None,
    }
}

/// Money objects as serialized by [`Money`]: `{coins, assetId, decimals}`.
fn split_money(object: &Map<String, Value>) -> Option<(Value, Value)> {
    if !(object.contains_key("coins") && object.contains_key("decimals")) {
        return None;
    }
    let coins = object.get("coins")?.clone();
    let asset = object.get("assetId").cloned().unwrap_or(Value::Null);
    Some((coins, asset))
}

fn array_item_to_node(item: Value) -> Value {
    match item {
        Value::Object(object) => match split_money(&object) {
            Some((coins, asset)) => json!({ "amount": coins, "assetId": asset }),
            None => Value::Object(
                object
                    .into_iter()
                    .map(|(key, value)| match &value {
                        Value::Object(inner) => match split_money(inner) {
                            Some((coins, _)) => (key, coins),
                            None => (key, value),
                        },
                        _ => (key, value),
                    })
                    .collect(),
            ),
        },
        other => other,
    }
}

/// Replaces money objects with integer coins.
///
/// `amount`, `quantity` and `minSponsoredAssetFee` contribute `assetId`,
/// `fee` contributes `feeAssetId` and `matcherFee` contributes
/// `matcherFeeAssetId`. A native-asset money only fills its asset field when
/// the object has none. Nested objects are flattened the same way. Money
/// inside arrays becomes `{amount, assetId}`.
pub fn money_like_to_node(object: Map<String, Value>) -> Map<String, Value> {
    let mut node = Map::with_capacity(object.len());
    let mut assets: Vec<(&'static str, Value)> = Vec::new();

    for (key, value) in object {
        let value = match value {
            Value::Object(inner) => match split_money(&inner) {
                Some((coins, asset)) => {
                    if let Some(target) = asset_field(&key) {
                        assets.push((target, asset));
                    }
                    coins
                }
                None => Value::Object(money_like_to_node(inner)),
            },
            Value::Array(items) => {
                Value::Array(items.into_iter().map(array_item_to_node).collect())
            }
            other => other,
        };
        node.insert(key, value);
    }

    for (target, asset) in assets {
        if asset.is_null() {
            node.entry(target).or_insert(Value::Null);
        } else {
            node.insert(target.into(), asset);
        }
    }
    node
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value).map_err(anyhow::Error::from)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!("record serialized to non-object {other}").into()),
    }
}

// ---------------------------------------------------------------------------
// Converters
// ---------------------------------------------------------------------------

/// Per-kind conversion to node-submission JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeConverter {
    /// Money flattening followed by the entity factory.
    Generic,
    /// Rescales the price to matcher precision and adds `assetPair`.
    CreateOrder,
    /// Direct payload, no entity factory.
    CancelOrder,
    /// Renames the embedded orders to `order1`/`order2`.
    Exchange,
    /// Re-attaches `chainId` after construction.
    CreateAlias,
}

impl NodeConverter {
    /// Node payload of `fields` at wire `version`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ConverterMismatch`] when `fields` is not a record this
    /// converter serves, [`RegistryError::PriceOverflow`] from order price
    /// rescaling, entity-factory failures otherwise.
    pub fn convert(
        self,
        version: WireVersion,
        fields: &NormalizedFields,
        ctx: &NetworkContext,
        entities: &dyn EntityFactory,
    ) -> Result<Value> {
        let kind = fields.kind();
        debug!(
            %kind,
            version,
            converter = %self,
            network = %ctx.network_code(),
            "converting to node payload"
        );

        let mut node = match (self, fields) {
            (Self::Generic, fields) if kind.ledger_type().is_some() => {
                let params = money_like_to_node(fields.to_json()?);
                entities.construct(kind, version, params)?
            }
            (Self::CreateOrder, NormalizedFields::MatcherOrderCreate(order)) => {
                let params = order_params(version, order)?;
                entities.construct(kind, version, params)?
            }
            (Self::CancelOrder, NormalizedFields::MatcherOrderCancel(cancel)) => {
                cancel_order_node(cancel)
            }
            (Self::Exchange, NormalizedFields::Exchange(exchange)) => {
                exchange_node(version, exchange, entities)?
            }
            (Self::CreateAlias, NormalizedFields::CreateAlias(alias)) => {
                let params = money_like_to_node(fields.to_json()?);
                let mut node = entities.construct(kind, version, params)?;
                if let Value::Object(object) = &mut node {
                    object.insert("chainId".into(), alias.chain_id.into());
                }
                node
            }
            (converter, fields) => {
                return Err(RegistryError::ConverterMismatch {
                    converter,
                    kind: fields.kind(),
                })
            }
        };

        if let Value::Object(object) = &mut node {
            coerce_json_timestamp(object)?;
        }
        Ok(node)
    }
}

impl fmt::Display for NodeConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generic => "generic",
            Self::CreateOrder => "create-order",
            Self::CancelOrder => "cancel-order",
            Self::Exchange => "exchange",
            Self::CreateAlias => "create-alias",
        };
        f.write_str(name)
    }
}

/// Order params with the price at matcher precision.
///
/// Only the node path sees the scaled price; the signing bytes keep the raw
/// one. An order without its own version carries the dispatched one.
fn order_params(version: WireVersion, order: &Order) -> Result<Map<String, Value>> {
    let scaled = to_order_price(&order.amount, &order.price)?;
    let price = Money {
        coins: scaled,
        ..order.price.clone()
    };
    let mut params = to_object(&Order {
        price,
        ..order.clone()
    })?;
    params = money_like_to_node(params);
    params.remove("assetId");
    if params.get("version").map_or(true, Value::is_null) {
        params.insert("version".into(), version.into());
    }
    params.insert(
        "assetPair".into(),
        json!({
            "amountAsset": order.amount.asset_id,
            "priceAsset": order.price.asset_id,
        }),
    );
    Ok(params)
}

fn cancel_order_node(cancel: &CancelOrder) -> Value {
    json!({
        "orderId": cancel.order_id,
        "sender": cancel.sender_public_key,
        "senderPublicKey": cancel.sender_public_key,
        "signature": cancel.proofs.first(),
    })
}

fn exchange_node(
    version: WireVersion,
    exchange: &Exchange,
    entities: &dyn EntityFactory,
) -> Result<Value> {
    let mut params = money_like_to_node(to_object(exchange)?);
    let order1 = with_proofs(params.remove("buyOrder"), &exchange.buy_order);
    let order2 = with_proofs(params.remove("sellOrder"), &exchange.sell_order);
    params.insert("order1".into(), order1);
    params.insert("order2".into(), order2);

    let mut node = entities.construct(TransactionKind::Exchange, version, params)?;
    if let Value::Object(object) = &mut node {
        for (slot, order) in [("order1", &exchange.buy_order), ("order2", &exchange.sell_order)] {
            let restored = with_proofs(object.remove(slot), order);
            object.insert(slot.into(), restored);
        }
    }
    Ok(node)
}

/// Embedded order with both proof shapes of `order` put back.
///
/// A null `version` is dropped; the exchange version does not apply to the
/// orders it embeds.
fn with_proofs(node: Option<Value>, order: &Order) -> Value {
    let mut object = match node {
        Some(Value::Object(object)) => object,
        _ => Map::new(),
    };
    if object.get("version").is_some_and(Value::is_null) {
        object.remove("version");
    }
    object.insert("signature".into(), json!(order.signature));
    object.insert("proofs".into(), json!(order.proofs));
    Value::Object(object)
}
