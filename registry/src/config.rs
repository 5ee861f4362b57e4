//! # Protocol Constants & Network Context
//!
//! Every magic value the registry relies on lives here, together with the
//! [`NetworkContext`] that carries per-request network settings into the
//! normalizers.

use chrono::Utc;

/// Crate version, as reported by tooling built on the registry.
pub const REGISTRY_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Mainnet chain id byte (`'W'`).
pub const MAINNET_BYTE: u8 = b'W';

/// Testnet chain id byte (`'T'`).
pub const TESTNET_BYTE: u8 = b'T';

/// Stagenet chain id byte (`'S'`).
pub const STAGENET_BYTE: u8 = b'S';

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Fixed prefix signed in front of every authentication challenge.
pub const AUTH_PREFIX: &str = "BancoinWalletAuthentication";

/// Prefix carried by canonical script text.
pub const SCRIPT_PREFIX: &str = "base64:";

/// Prefix of a canonical alias recipient: `alias:<network code>:<name>`.
pub const ALIAS_PREFIX: &str = "alias";

/// Length of a decoded account address.
pub const ADDRESS_LENGTH: usize = 26;

/// Decimals of the native asset.
pub const NATIVE_DECIMALS: u8 = 8;

/// Base precision the matcher expresses order prices in.
pub const ORDER_PRICE_DECIMALS: u32 = 8;

// ---------------------------------------------------------------------------
// NetworkContext
// ---------------------------------------------------------------------------

/// How absent timestamps are filled during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Use the wall clock at normalization time.
    #[default]
    Now,
    /// Use a fixed epoch-millisecond value.
    Fixed(i64),
    /// Refuse to fill; an absent timestamp is a missing field.
    Require,
}

impl TimestampPolicy {
    /// Returns the fill value, or `None` under [`TimestampPolicy::Require`].
    pub fn fill(self) -> Option<i64> {
        match self {
            Self::Now => Some(Utc::now().timestamp_millis()),
            Self::Fixed(ms) => Some(ms),
            Self::Require => None,
        }
    }
}

/// Network settings for one normalization or conversion request.
///
/// The numeric network byte is turned into its single-character code once,
/// here, so that no per-kind rule has to do it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkContext {
    network_byte: u8,
    timestamp_policy: TimestampPolicy,
}

impl NetworkContext {
    /// Builds a context for the given network byte.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidNetworkByte`](crate::RegistryError::InvalidNetworkByte)
    /// unless the byte is an ASCII letter or digit.
    pub fn new(network_byte: u8) -> crate::Result<Self> {
        if !network_byte.is_ascii_alphanumeric() {
            return Err(crate::RegistryError::InvalidNetworkByte(network_byte));
        }
        Ok(Self {
            network_byte,
            timestamp_policy: TimestampPolicy::default(),
        })
    }

    /// Builds a context from the network code character.
    pub fn from_code(code: char) -> crate::Result<Self> {
        let byte = u8::try_from(u32::from(code))
            .map_err(|_| crate::RegistryError::InvalidNetworkByte(u8::MAX))?;
        Self::new(byte)
    }

    pub fn mainnet() -> Self {
        Self {
            network_byte: MAINNET_BYTE,
            timestamp_policy: TimestampPolicy::default(),
        }
    }

    pub fn testnet() -> Self {
        Self {
            network_byte: TESTNET_BYTE,
            timestamp_policy: TimestampPolicy::default(),
        }
    }

    /// Replaces the timestamp policy.
    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamp_policy = policy;
        self
    }

    pub fn network_byte(&self) -> u8 {
        self.network_byte
    }

    /// Single-character network code (`'W'`, `'T'`, ...).
    pub fn network_code(&self) -> char {
        char::from(self.network_byte)
    }

    pub fn timestamp_policy(&self) -> TimestampPolicy {
        self.timestamp_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_derived_from_byte() {
        let ctx = NetworkContext::new(84).unwrap();
        assert_eq!(ctx.network_code(), 'T');
        assert_eq!(ctx, NetworkContext::testnet());
    }

    #[test]
    fn rejects_non_printable_bytes() {
        assert!(NetworkContext::new(0).is_err());
        assert!(NetworkContext::new(b':').is_err());
        assert!(NetworkContext::from_code('é').is_err());
    }

    #[test]
    fn fixed_policy_fills_deterministically() {
        let ctx = NetworkContext::mainnet().with_timestamp_policy(TimestampPolicy::Fixed(42));
        assert_eq!(ctx.timestamp_policy().fill(), Some(42));
        assert_eq!(TimestampPolicy::Require.fill(), None);
    }

    #[test]
    fn now_policy_reads_the_clock() {
        let filled = TimestampPolicy::Now.fill().unwrap();
        assert!(filled > 1_600_000_000_000);
    }
}
