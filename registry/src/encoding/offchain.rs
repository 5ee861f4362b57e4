//! Byte layouts for requests that never reach the ledger.
//!
//! These have no canonical node representation, so their signing bytes are
//! assembled here by plain concatenation instead of going through the kind
//! encoder.

use bytes::BytesMut;

use super::primitives::{put_base58, put_long, put_short_string};
use crate::config::AUTH_PREFIX;
use crate::error::Result;
use crate::fields::{AuthChallenge, CancelOrder, CoinomatConfirmation, MatcherOrdersRequest};

/// `prefix ‖ host ‖ data`, each a short string.
pub fn auth_challenge_bytes(auth: &AuthChallenge) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(64);
    put_short_string(&mut buf, "prefix", AUTH_PREFIX)?;
    put_short_string(&mut buf, "host", &auth.host)?;
    put_short_string(&mut buf, "data", &auth.data)?;
    Ok(buf.to_vec())
}

/// `prefix ‖ timestamp`.
pub fn coinomat_confirmation_bytes(confirmation: &CoinomatConfirmation) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(32);
    put_short_string(&mut buf, "prefix", &confirmation.prefix)?;
    put_long(&mut buf, confirmation.timestamp);
    Ok(buf.to_vec())
}

/// `senderPublicKey ‖ timestamp`.
pub fn matcher_orders_bytes(request: &MatcherOrdersRequest) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(40);
    put_base58(&mut buf, "senderPublicKey", &request.sender_public_key)?;
    put_long(&mut buf, request.timestamp);
    Ok(buf.to_vec())
}

/// `senderPublicKey ‖ orderId`.
pub fn cancel_order_bytes(cancel: &CancelOrder) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(64);
    put_base58(&mut buf, "senderPublicKey", &cancel.sender_public_key)?;
    put_base58(&mut buf, "orderId", &cancel.order_id)?;
    Ok(buf.to_vec())
}
