//! # Field Normalizer
//!
//! Turns a [`RawFields`] record into the [`NormalizedFields`] record the
//! encoders and node converters expect. Every rule is a pure function of the
//! raw record and the [`NetworkContext`]; normalizing the same input twice
//! yields the same output.
//!
//! ```text
//! processors.rs — scripts, attachments, timestamps, recipients, order prices
//! mod.rs        — one normalizer per kind, dispatched by `normalize`
//! ```
//!
//! Normalization does not validate business rules. It only fails when a
//! value it has to resolve is missing or unreadable.

pub mod processors;

use tracing::debug;

use crate::config::NetworkContext;
use crate::error::{RegistryError, Result};
use crate::fields::*;
use crate::kind::TransactionKind;

pub use processors::{
    coerce_json_timestamp, coerce_timestamp, denormalize_proofs, encode_attachment,
    process_script, resolve_timestamp, to_order_price, AliasResolver, RecipientResolver,
};

use processors::resolve_recipient;

/// Normalizes the raw record of `kind`.
///
/// # Errors
///
/// - [`RegistryError::KindMismatch`] if `raw` belongs to another kind.
/// - [`RegistryError::MissingField`] if a value needed for resolution is absent.
/// - [`RegistryError::MalformedScript`] for undecodable script text.
/// - [`RegistryError::InvalidTimestamp`] for unreadable timestamps.
/// - [`RegistryError::Collaborator`] if the recipient resolver fails.
pub fn normalize(
    kind: TransactionKind,
    raw: RawFields,
    ctx: &NetworkContext,
    resolver: &dyn RecipientResolver,
) -> Result<NormalizedFields> {
    if raw.kind() != kind {
        return Err(RegistryError::KindMismatch {
            expected: kind,
            actual: raw.kind(),
        });
    }
    debug!(%kind, network = %ctx.network_code(), "normalizing fields");

    let fields = match raw {
        RawFields::AuthChallenge(raw) => NormalizedFields::AuthChallenge(AuthChallenge {
            host: raw.host.unwrap_or_default(),
            data: raw.data.unwrap_or_default(),
        }),
        RawFields::CoinomatConfirmation(raw) => {
            NormalizedFields::CoinomatConfirmation(CoinomatConfirmation {
                prefix: raw.prefix.ok_or_else(|| RegistryError::missing(kind, "prefix"))?,
                timestamp: resolve_timestamp(raw.timestamp.as_ref(), ctx, kind)?,
            })
        }
        RawFields::MatcherOrdersRequest(raw) => {
            NormalizedFields::MatcherOrdersRequest(MatcherOrdersRequest {
                sender_public_key: raw
                    .sender_public_key
                    .ok_or_else(|| RegistryError::missing(kind, "senderPublicKey"))?,
                timestamp: resolve_timestamp(raw.timestamp.as_ref(), ctx, kind)?,
            })
        }
        RawFields::MatcherOrderCancel(raw) => {
            NormalizedFields::MatcherOrderCancel(normalize_cancel_order(raw, kind)?)
        }
        RawFields::MatcherOrderCreate(raw) => {
            NormalizedFields::MatcherOrderCreate(normalize_order(raw, ctx, kind)?)
        }
        RawFields::Issue(raw) => NormalizedFields::Issue(normalize_issue(raw, ctx, kind)?),
        RawFields::Reissue(raw) => {
            let quantity = pick_quantity(kind, raw.amount, raw.quantity)?;
            let (asset_id, quantity) = asset_of_quantity(kind, raw.asset_id, quantity)?;
            NormalizedFields::Reissue(Reissue {
                asset_id,
                quantity,
                reissuable: raw.reissuable,
                common: normalize_common(raw.common, ctx, kind)?,
            })
        }
        RawFields::Burn(raw) => {
            let quantity = pick_quantity(kind, raw.amount, raw.quantity)?;
            let (asset_id, quantity) = asset_of_quantity(kind, raw.asset_id, quantity)?;
            NormalizedFields::Burn(Burn {
                asset_id,
                quantity,
                common: normalize_common(raw.common, ctx, kind)?,
            })
        }
        RawFields::Transfer(raw) => {
            NormalizedFields::Transfer(normalize_transfer(raw, ctx, resolver, kind)?)
        }
        RawFields::Exchange(raw) => NormalizedFields::Exchange(normalize_exchange(raw, ctx, kind)?),
        RawFields::Lease(raw) => NormalizedFields::Lease(Lease {
            recipient: resolve_recipient(
                resolver,
                ctx,
                kind,
                "recipient",
                raw.recipient.as_deref(),
            )?,
            amount: raw.amount,
            common: normalize_common(raw.common, ctx, kind)?,
        }),
        RawFields::CancelLease(raw) => NormalizedFields::CancelLease(CancelLease {
            lease_id: raw.lease_id,
            common: normalize_common(raw.common, ctx, kind)?,
        }),
        RawFields::CreateAlias(raw) => NormalizedFields::CreateAlias(CreateAlias {
            alias: raw.alias,
            chain_id: raw.chain_id.unwrap_or_else(|| ctx.network_byte()),
            common: normalize_common(raw.common, ctx, kind)?,
        }),
        RawFields::MassTransfer(raw) => {
            NormalizedFields::MassTransfer(normalize_mass_transfer(raw, ctx, resolver, kind)?)
        }
        RawFields::Data(raw) => NormalizedFields::Data(Data {
            data: raw.data,
            common: normalize_common(raw.common, ctx, kind)?,
        }),
        RawFields::SetScript(raw) => NormalizedFields::SetScript(SetScript {
            script: process_script(raw.script.as_deref())?,
            common: normalize_common(raw.common, ctx, kind)?,
        }),
        RawFields::Sponsorship(raw) => {
            let asset_id = raw.asset_id.or_else(|| {
                raw.min_sponsored_asset_fee
                    .as_ref()
                    .and_then(|fee| fee.asset_id.clone())
            });
            NormalizedFields::Sponsorship(Sponsorship {
                asset_id,
                min_sponsored_asset_fee: raw.min_sponsored_asset_fee,
                common: normalize_common(raw.common, ctx, kind)?,
            })
        }
        RawFields::SetAssetScript(raw) => NormalizedFields::SetAssetScript(SetAssetScript {
            asset_id: raw.asset_id,
            script: process_script(raw.script.as_deref())?,
            common: normalize_common(raw.common, ctx, kind)?,
        }),
        RawFields::ScriptInvocation(raw) => {
            NormalizedFields::ScriptInvocation(ScriptInvocation {
                d_app: resolve_recipient(resolver, ctx, kind, "dApp", raw.d_app.as_deref())?,
                call: raw.call,
                payment: raw.payment,
                common: normalize_common(raw.common, ctx, kind)?,
            })
        }
    };
    Ok(fields)
}

/// Parses `value` as the raw record of `kind` and normalizes it.
pub fn normalize_json(
    kind: TransactionKind,
    value: serde_json::Value,
    ctx: &NetworkContext,
    resolver: &dyn RecipientResolver,
) -> Result<NormalizedFields> {
    normalize(kind, RawFields::from_json(kind, value)?, ctx, resolver)
}

// ---------------------------------------------------------------------------
// Shared rules
// ---------------------------------------------------------------------------

fn normalize_common(raw: RawCommon, ctx: &NetworkContext, kind: TransactionKind) -> Result<Common> {
    Ok(Common {
        sender_public_key: raw.sender_public_key,
        timestamp: resolve_timestamp(raw.timestamp.as_ref(), ctx, kind)?,
        fee: raw.fee,
        proofs: raw.proofs.unwrap_or_default(),
    })
}

/// `amount` wins over `quantity` when both are present.
fn pick_quantity(
    kind: TransactionKind,
    amount: Option<Money>,
    quantity: Option<Money>,
) -> Result<Money> {
    amount
        .or(quantity)
        .ok_or_else(|| RegistryError::missing(kind, "quantity"))
}

/// Explicit `assetId` first, then the quantity's own asset.
fn asset_of_quantity(
    kind: TransactionKind,
    asset_id: Option<String>,
    quantity: Money,
) -> Result<(String, Money)> {
    let asset_id = asset_id
        .or_else(|| quantity.asset_id.clone())
        .ok_or_else(|| RegistryError::missing(kind, "assetId"))?;
    let quantity = quantity.with_asset_id(Some(asset_id.clone()));
    Ok((asset_id, quantity))
}

// ---------------------------------------------------------------------------
// Per-kind rules
// ---------------------------------------------------------------------------

fn normalize_issue(raw: RawIssue, ctx: &NetworkContext, kind: TransactionKind) -> Result<Issue> {
    let quantity = pick_quantity(kind, raw.amount, raw.quantity)?;
    Ok(Issue {
        name: raw.name,
        description: raw.description,
        precision: raw.precision.unwrap_or(quantity.decimals),
        quantity,
        reissuable: raw.reissuable,
        script: process_script(raw.script.as_deref())?,
        common: normalize_common(raw.common, ctx, kind)?,
    })
}

fn normalize_transfer(
    raw: RawTransfer,
    ctx: &NetworkContext,
    resolver: &dyn RecipientResolver,
    kind: TransactionKind,
) -> Result<Transfer> {
    let amount = raw
        .amount
        .ok_or_else(|| RegistryError::missing(kind, "amount"))?;
    let asset_id = raw.asset_id.or_else(|| amount.asset_id.clone());
    Ok(Transfer {
        recipient: resolve_recipient(resolver, ctx, kind, "recipient", raw.recipient.as_deref())?,
        amount: amount.with_asset_id(asset_id.clone()),
        asset_id,
        attachment: encode_attachment(raw.attachment.as_ref()),
        common: normalize_common(raw.common, ctx, kind)?,
    })
}

fn normalize_mass_transfer(
    raw: RawMassTransfer,
    ctx: &NetworkContext,
    resolver: &dyn RecipientResolver,
    kind: TransactionKind,
) -> Result<MassTransfer> {
    let asset_id = raw.asset_id.or_else(|| {
        raw.transfers
            .first()
            .and_then(|item| item.amount.asset_id.clone())
    });
    let transfers = raw
        .transfers
        .into_iter()
        .map(|item| {
            let recipient = item.name.as_deref().or(item.recipient.as_deref());
            Ok(MassTransferItem {
                recipient: resolve_recipient(
                    resolver,
                    ctx,
                    kind,
                    "transfers.recipient",
                    recipient,
                )?,
                amount: item.amount,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(MassTransfer {
        asset_id,
        transfers,
        attachment: encode_attachment(raw.attachment.as_ref()),
        common: normalize_common(raw.common, ctx, kind)?,
    })
}

/// `id` wins over `orderId`, `senderPublicKey` over `sender`.
fn normalize_cancel_order(raw: RawCancelOrder, kind: TransactionKind) -> Result<CancelOrder> {
    let order_id = raw
        .id
        .or(raw.order_id)
        .ok_or_else(|| RegistryError::missing(kind, "orderId"))?;
    let sender_public_key = raw
        .sender_public_key
        .or(raw.sender)
        .ok_or_else(|| RegistryError::missing(kind, "senderPublicKey"))?;
    let proofs = denormalize_proofs(raw.signature.as_deref(), raw.proofs.as_deref())
        .map(|(_, proofs)| proofs)
        .unwrap_or_default();
    Ok(CancelOrder {
        order_id,
        sender_public_key,
        proofs,
    })
}

fn normalize_order(raw: RawOrder, ctx: &NetworkContext, kind: TransactionKind) -> Result<Order> {
    let (signature, proofs) =
        match denormalize_proofs(raw.signature.as_deref(), raw.proofs.as_deref()) {
            Some((signature, proofs)) => (Some(signature), proofs),
            None => (None, Vec::new()),
        };
    Ok(Order {
        order_type: raw
            .order_type
            .ok_or_else(|| RegistryError::missing(kind, "orderType"))?,
        amount: raw
            .amount
            .ok_or_else(|| RegistryError::missing(kind, "amount"))?,
        price: raw
            .price
            .ok_or_else(|| RegistryError::missing(kind, "price"))?,
        matcher_public_key: raw.matcher_public_key,
        sender_public_key: raw.sender_public_key,
        timestamp: resolve_timestamp(raw.timestamp.as_ref(), ctx, kind)?,
        expiration: raw.expiration.as_ref().map(coerce_timestamp).transpose()?,
        matcher_fee: raw.matcher_fee,
        version: raw.version,
        signature,
        proofs,
    })
}

/// Both embedded orders must come out carrying `signature` and `proofs`.
fn normalize_exchange(
    raw: RawExchange,
    ctx: &NetworkContext,
    kind: TransactionKind,
) -> Result<Exchange> {
    let embed = |order: Option<RawOrder>, slot: &'static str, proof: &'static str| {
        let order = order.ok_or_else(|| RegistryError::missing(kind, slot))?;
        let order = normalize_order(order, ctx, kind)?;
        if order.signature.is_none() {
            return Err(RegistryError::missing(kind, proof));
        }
        Ok(order)
    };
    Ok(Exchange {
        buy_order: embed(raw.buy_order, "buyOrder", "buyOrder.signature")?,
        sell_order: embed(raw.sell_order, "sellOrder", "sellOrder.signature")?,
        amount: raw.amount,
        price: raw.price,
        buy_matcher_fee: raw.buy_matcher_fee,
        sell_matcher_fee: raw.sell_matcher_fee,
        common: normalize_common(raw.common, ctx, kind)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimestampPolicy;
    use serde_json::{json, Value};

    fn ctx() -> NetworkContext {
        NetworkContext::testnet().with_timestamp_policy(TimestampPolicy::Fixed(1_600_000_000_000))
    }

    fn run(kind: TransactionKind, value: Value) -> Result<NormalizedFields> {
        normalize_json(kind, value, &ctx(), &AliasResolver)
    }

    #[test]
    fn rejects_records_of_another_kind() {
        let raw = RawFields::from_json(TransactionKind::Lease, json!({})).unwrap();
        let err = normalize(TransactionKind::Transfer, raw, &ctx(), &AliasResolver).unwrap_err();
        assert!(matches!(err, RegistryError::KindMismatch { .. }));
    }

    #[test]
    fn quantity_alias_is_idempotent() {
        for kind in [
            TransactionKind::Issue,
            TransactionKind::Reissue,
            TransactionKind::Burn,
        ] {
            let legacy = run(kind, json!({"amount": 500, "assetId": "Asset1", "timestamp": 1}));
            let canonical =
                run(kind, json!({"quantity": 500, "assetId": "Asset1", "timestamp": 1}));
            assert_eq!(legacy.unwrap(), canonical.unwrap(), "{kind}");
        }
    }

    #[test]
    fn amount_wins_over_quantity() {
        let fields = run(
            TransactionKind::Burn,
            json!({"amount": 1, "quantity": 2, "assetId": "A"}),
        )
        .unwrap();
        let NormalizedFields::Burn(burn) = fields else {
            panic!("expected burn");
        };
        assert_eq!(burn.quantity.coins, 1);
    }

    #[test]
    fn missing_quantity_is_reported() {
        let err = run(TransactionKind::Reissue, json!({"assetId": "A"})).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingField {
                field: "quantity",
                ..
            }
        ));
    }

    #[test]
    fn reissue_takes_asset_from_money() {
        let fields = run(
            TransactionKind::Reissue,
            json!({"quantity": {"coins": 10, "assetId": "Gold", "decimals": 2}}),
        )
        .unwrap();
        let NormalizedFields::Reissue(reissue) = fields else {
            panic!("expected reissue");
        };
        assert_eq!(reissue.asset_id, "Gold");
        assert_eq!(reissue.quantity.asset_id.as_deref(), Some("Gold"));
    }

    #[test]
    fn negative_quantity_is_not_validated() {
        let fields = run(TransactionKind::Issue, json!({"quantity": -5, "name": "X"})).unwrap();
        let NormalizedFields::Issue(issue) = fields else {
            panic!("expected issue");
        };
        assert_eq!(issue.quantity.coins, -5);
    }

    #[test]
    fn scripts_are_canonical_for_every_script_kind() {
        for kind in [
            TransactionKind::Issue,
            TransactionKind::SetScript,
            TransactionKind::SetAssetScript,
        ] {
            let bare = run(kind, json!({"script": "AQa3b8tH", "quantity": 1})).unwrap();
            let prefixed = run(kind, json!({"script": "base64:AQa3b8tH", "quantity": 1})).unwrap();
            assert_eq!(bare, prefixed, "{kind}");

            let empty = run(kind, json!({"script": "", "quantity": 1})).unwrap();
            let absent = run(kind, json!({"quantity": 1})).unwrap();
            assert_eq!(empty, absent, "{kind}");
        }
    }

    #[test]
    fn set_script_without_source_is_null() {
        let NormalizedFields::SetScript(set) = run(TransactionKind::SetScript, json!({})).unwrap()
        else {
            panic!("expected set-script");
        };
        assert_eq!(set.script, None);
    }

    #[test]
    fn transfer_resolves_recipient_and_attachment() {
        let fields = run(
            TransactionKind::Transfer,
            json!({"recipient": "bob", "amount": 100, "attachment": "hi"}),
        )
        .unwrap();
        let NormalizedFields::Transfer(transfer) = fields else {
            panic!("expected transfer");
        };
        assert_eq!(transfer.recipient, "alias:T:bob");
        assert_eq!(transfer.attachment, "8wr");
        assert_eq!(transfer.common.timestamp, 1_600_000_000_000);
    }

    #[test]
    fn transfer_without_recipient_is_missing_field() {
        let err = run(TransactionKind::Transfer, json!({"amount": 1})).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingField {
                field: "recipient",
                ..
            }
        ));
    }

    #[test]
    fn mass_transfer_preserves_order_and_resolves_each_item() {
        let fields = run(
            TransactionKind::MassTransfer,
            json!({
                "transfers": [
                    {"recipient": "carol", "amount": {"coins": 1, "assetId": "Tok"}},
                    {"name": "dave", "amount": 2},
                    {"name": "erin", "recipient": "ignored", "amount": 3},
                ]
            }),
        )
        .unwrap();
        let NormalizedFields::MassTransfer(mass) = fields else {
            panic!("expected mass-transfer");
        };
        let recipients: Vec<_> = mass.transfers.iter().map(|t| t.recipient.as_str()).collect();
        assert_eq!(recipients, ["alias:T:carol", "alias:T:dave", "alias:T:erin"]);
        let coins: Vec<_> = mass.transfers.iter().map(|t| t.amount.coins).collect();
        assert_eq!(coins, [1, 2, 3]);
        assert_eq!(mass.asset_id.as_deref(), Some("Tok"));
    }

    #[test]
    fn exchange_orders_get_both_proof_shapes() {
        let order = |extra: Value| {
            let mut base = json!({"orderType": "buy", "amount": 1, "price": 2, "timestamp": 3});
            base.as_object_mut()
                .unwrap()
                .extend(extra.as_object().unwrap().clone());
            base
        };
        let fields = run(
            TransactionKind::Exchange,
            json!({
                "buyOrder": order(json!({"signature": "SigA"})),
                "sellOrder": order(json!({"orderType": "sell", "proofs": ["P0", "P1"]})),
            }),
        )
        .unwrap();
        let NormalizedFields::Exchange(exchange) = fields else {
            panic!("expected exchange");
        };
        assert_eq!(exchange.buy_order.signature.as_deref(), Some("SigA"));
        assert_eq!(exchange.buy_order.proofs, vec!["SigA".to_string()]);
        assert_eq!(exchange.sell_order.signature.as_deref(), Some("P0"));
        assert_eq!(exchange.sell_order.proofs, vec!["P0".to_string(), "P1".to_string()]);
    }

    #[test]
    fn exchange_order_without_proofs_is_missing_field() {
        let err = run(
            TransactionKind::Exchange,
            json!({
                "buyOrder": {"orderType": "buy", "amount": 1, "price": 2, "signature": "S"},
                "sellOrder": {"orderType": "sell", "amount": 1, "price": 2},
            }),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingField {
                field: "sellOrder.signature",
                ..
            }
        ));
    }

    #[test]
    fn cancel_order_accepts_legacy_names() {
        let legacy = run(
            TransactionKind::MatcherOrderCancel,
            json!({"id": "Order1", "sender": "Key1"}),
        )
        .unwrap();
        let canonical = run(
            TransactionKind::MatcherOrderCancel,
            json!({"orderId": "Order1", "senderPublicKey": "Key1"}),
        )
        .unwrap();
        assert_eq!(legacy, canonical);
    }

    #[test]
    fn cancel_order_without_key_is_missing_field() {
        let err = run(TransactionKind::MatcherOrderCancel, json!({"orderId": "O"})).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingField {
                field: "senderPublicKey",
                ..
            }
        ));
    }

    #[test]
    fn create_order_keeps_raw_price() {
        let fields = run(
            TransactionKind::MatcherOrderCreate,
            json!({
                "orderType": "sell",
                "amount": {"coins": 100, "assetId": "Amt", "decimals": 2},
                "price": {"coins": 150, "assetId": "Prc", "decimals": 2},
                "expiration": "2020-10-13T12:26:40Z",
            }),
        )
        .unwrap();
        let NormalizedFields::MatcherOrderCreate(order) = fields else {
            panic!("expected order");
        };
        assert_eq!(order.price.coins, 150);
        assert_eq!(order.expiration, Some(1_602_592_000_000));
    }

    #[test]
    fn create_alias_defaults_chain_to_context() {
        let NormalizedFields::CreateAlias(alias) =
            run(TransactionKind::CreateAlias, json!({"alias": "bob"})).unwrap()
        else {
            panic!("expected create-alias");
        };
        assert_eq!(alias.chain_id, b'T');
    }

    #[test]
    fn invocation_resolves_dapp() {
        let NormalizedFields::ScriptInvocation(call) = run(
            TransactionKind::ScriptInvocation,
            json!({"dApp": "oracle", "payment": [5]}),
        )
        .unwrap() else {
            panic!("expected script-invocation");
        };
        assert_eq!(call.d_app, "alias:T:oracle");
        assert_eq!(call.payment, vec![Money::native(5)]);
    }

    #[test]
    fn off_chain_requests() {
        let NormalizedFields::AuthChallenge(auth) =
            run(TransactionKind::AuthChallenge, json!({"host": "dex.example"})).unwrap()
        else {
            panic!("expected auth");
        };
        assert_eq!(auth.data, "");

        let err = run(TransactionKind::CoinomatConfirmation, json!({"timestamp": 1})).unwrap_err();
        assert!(matches!(err, RegistryError::MissingField { field: "prefix", .. }));

        let err = run(TransactionKind::MatcherOrdersRequest, json!({})).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingField {
                field: "senderPublicKey",
                ..
            }
        ));
    }

    #[test]
    fn lease_recipient_is_resolved_on_the_context_network() {
        let fields =
            run(TransactionKind::Lease, json!({"recipient": "bob", "amount": 10})).unwrap();
        let NormalizedFields::Lease(lease) = fields else {
            panic!("expected lease");
        };
        assert_eq!(lease.recipient, "alias:T:bob");
        assert_eq!(lease.amount, Some(Money::native(10)));
    }

    #[test]
    fn lease_without_recipient_is_reported() {
        for data in [json!({"amount": 10}), json!({"recipient": "  ", "amount": 10})] {
            let err = run(TransactionKind::Lease, data).unwrap_err();
            assert!(matches!(
                err,
                RegistryError::MissingField {
                    kind: TransactionKind::Lease,
                    field: "recipient",
                }
            ));
        }
    }

    #[test]
    fn sponsorship_asset_falls_back_to_the_fee_asset() {
        let fee = json!({"coins": 5, "assetId": "SPONSORED", "decimals": 3});
        let fields = run(
            TransactionKind::Sponsorship,
            json!({"minSponsoredAssetFee": fee}),
        )
        .unwrap();
        let NormalizedFields::Sponsorship(sponsorship) = fields else {
            panic!("expected sponsorship");
        };
        assert_eq!(sponsorship.asset_id.as_deref(), Some("SPONSORED"));

        // an explicit assetId wins
        let fields = run(
            TransactionKind::Sponsorship,
            json!({"assetId": "EXPLICIT", "minSponsoredAssetFee": fee}),
        )
        .unwrap();
        let NormalizedFields::Sponsorship(sponsorship) = fields else {
            panic!("expected sponsorship");
        };
        assert_eq!(sponsorship.asset_id.as_deref(), Some("EXPLICIT"));
    }
}
