//! Field processors shared by the per-kind normalizers.
//!
//! Each processor is a pure function of its input (plus the network context
//! where noted), so running it twice on the same value gives the same result.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::DateTime;

use crate::config::{
    NetworkContext, ADDRESS_LENGTH, ALIAS_PREFIX, ORDER_PRICE_DECIMALS, SCRIPT_PREFIX,
};
use crate::error::{RegistryError, Result};
use crate::fields::{Money, RawAttachment, RawTimestamp};
use crate::kind::TransactionKind;

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

/// Canonical script text: one `base64:` prefix, or `None` when empty.
///
/// # Errors
///
/// [`RegistryError::MalformedScript`] when the body is not valid base64.
pub fn process_script(source: Option<&str>) -> Result<Option<String>> {
    let source = source.unwrap_or("").trim();
    let body = source.strip_prefix(SCRIPT_PREFIX).unwrap_or(source).trim();
    if body.is_empty() {
        return Ok(None);
    }
    STANDARD
        .decode(body)
        .map_err(|e| RegistryError::MalformedScript {
            reason: e.to_string(),
        })?;
    Ok(Some(format!("{SCRIPT_PREFIX}{body}")))
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// Base58 form of an attachment; text is taken as UTF-8 bytes.
pub fn encode_attachment(attachment: Option<&RawAttachment>) -> String {
    match attachment {
        None => String::new(),
        Some(RawAttachment::Text(text)) => bs58::encode(text.as_bytes()).into_string(),
        Some(RawAttachment::Bytes(bytes)) => bs58::encode(bytes).into_string(),
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Epoch milliseconds from a raw timestamp.
///
/// Accepts integers, integer strings and RFC 3339 dates.
pub fn coerce_timestamp(raw: &RawTimestamp) -> Result<i64> {
    match raw {
        RawTimestamp::Millis(ms) => Ok(*ms),
        RawTimestamp::Text(text) => coerce_timestamp_text(text),
    }
}

fn coerce_timestamp_text(text: &str) -> Result<i64> {
    let text = text.trim();
    if let Ok(ms) = text.parse::<i64>() {
        return Ok(ms);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| RegistryError::InvalidTimestamp(format!("`{text}`: {e}")))
}

/// Coerced timestamp, or the context's fill value when absent.
pub fn resolve_timestamp(
    raw: Option<&RawTimestamp>,
    ctx: &NetworkContext,
    kind: TransactionKind,
) -> Result<i64> {
    match raw {
        Some(raw) => coerce_timestamp(raw),
        None => ctx
            .timestamp_policy()
            .fill()
            .ok_or_else(|| RegistryError::missing(kind, "timestamp")),
    }
}

/// Re-coerces a `timestamp` member of a node payload to an integer.
///
/// Entity libraries sometimes hand back a date-like string instead of a
/// number.
pub fn coerce_json_timestamp(
    object: &mut serde_json::Map<String, serde_json::Value>,
) -> Result<()> {
    let coerced = match object.get("timestamp") {
        Some(serde_json::Value::String(text)) => coerce_timestamp_text(text)?,
        Some(serde_json::Value::Number(n)) if n.as_i64().is_none() => n
            .as_f64()
            .map(|f| f.trunc() as i64)
            .ok_or_else(|| RegistryError::InvalidTimestamp(n.to_string()))?,
        _ => return Ok(()),
    };
    object.insert("timestamp".into(), coerced.into());
    Ok(())
}

// ---------------------------------------------------------------------------
// Recipients
// ---------------------------------------------------------------------------

/// Resolves a recipient field against a network code.
pub trait RecipientResolver: Send + Sync {
    /// Canonical recipient for `recipient` on network `network_code`.
    fn resolve(&self, network_code: char, recipient: &str) -> anyhow::Result<String>;
}

/// Address-or-alias resolver.
///
/// - a base58 string decoding to a 26-byte address is returned as is,
/// - an `alias:<code>:<name>` string is returned as is when `<code>` is the
///   given network, and rejected otherwise,
/// - anything else is taken as a bare alias name on the given network.
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasResolver;

impl RecipientResolver for AliasResolver {
    fn resolve(&self, network_code: char, recipient: &str) -> anyhow::Result<String> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            anyhow::bail!("empty recipient");
        }
        if let Some(qualified) = recipient.strip_prefix(&format!("{ALIAS_PREFIX}:")) {
            let network = network_code.to_string();
            return match qualified.split_once(':') {
                Some((code, _)) if code != network => {
                    anyhow::bail!("alias {recipient} is not on network {network_code}")
                }
                Some((_, name)) if !name.is_empty() => Ok(recipient.to_string()),
                _ => anyhow::bail!("malformed alias {recipient}"),
            };
        }
        if is_address(recipient) {
            return Ok(recipient.to_string());
        }
        Ok(format!("{ALIAS_PREFIX}:{network_code}:{recipient}"))
    }
}

fn is_address(candidate: &str) -> bool {
    bs58::decode(candidate)
        .into_vec()
        .map(|bytes| bytes.len() == ADDRESS_LENGTH)
        .unwrap_or(false)
}

/// Resolves through `resolver`, turning an absent or blank value into a
/// missing-field error.
pub(crate) fn resolve_recipient(
    resolver: &dyn RecipientResolver,
    ctx: &NetworkContext,
    kind: TransactionKind,
    field: &'static str,
    recipient: Option<&str>,
) -> Result<String> {
    let recipient = recipient
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| RegistryError::missing(kind, field))?;
    Ok(resolver.resolve(ctx.network_code(), recipient)?)
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Matcher-precision price for an order.
///
/// `price` is in coins of the price asset. The matcher wants
/// `tokens * 10^(8 + priceDecimals - amountDecimals)`, which reduces to
/// `coins * 10^(8 - amountDecimals)`, truncated toward zero.
pub fn to_order_price(amount: &Money, price: &Money) -> Result<i64> {
    let exponent = ORDER_PRICE_DECIMALS as i32 - i32::from(amount.decimals);
    let coins = i128::from(price.coins);
    let scaled = if exponent >= 0 {
        10i128
            .checked_pow(exponent as u32)
            .and_then(|factor| coins.checked_mul(factor))
    } else {
        10i128
            .checked_pow(exponent.unsigned_abs())
            .map(|divisor| coins / divisor)
    };
    let scaled = scaled.ok_or(RegistryError::PriceOverflow)?;
    i64::try_from(scaled).map_err(|_| RegistryError::PriceOverflow)
}

/// Both proof shapes of an order: `(signature, proofs)`.
///
/// The signature falls back to the first proof and the proofs fall back to
/// a single-element list holding the signature. `None` when the order has
/// neither.
pub fn denormalize_proofs(
    signature: Option<&str>,
    proofs: Option<&[String]>,
) -> Option<(String, Vec<String>)> {
    let proofs = proofs.filter(|p| !p.is_empty());
    let signature = signature
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| proofs.and_then(|p| p.first().cloned()))?;
    let proofs = proofs
        .map(<[String]>::to_vec)
        .unwrap_or_else(|| vec![signature.clone()]);
    Some((signature, proofs))
}
