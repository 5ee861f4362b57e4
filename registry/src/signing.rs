//! Signing capability surface.
//!
//! The registry never touches key material. It hands the signing bytes of a
//! request to a [`SigningAdapter`] through the one method its capability tag
//! names.

use tracing::debug;

use crate::error::Result;
use crate::kind::Capability;

/// Signer consumed by the registry. Every method returns a base58 signature.
pub trait SigningAdapter: Send + Sync {
    /// Signs ledger transaction bytes.
    fn sign_transaction(&self, bytes: &[u8]) -> anyhow::Result<String>;

    /// Signs matcher order bytes.
    fn sign_order(&self, bytes: &[u8]) -> anyhow::Result<String>;

    /// Signs off-chain request bytes.
    fn sign_request(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

impl Capability {
    /// Signs `bytes` through the adapter method this capability names.
    pub fn sign(self, adapter: &dyn SigningAdapter, bytes: &[u8]) -> Result<String> {
        debug!(capability = %self, len = bytes.len(), "signing");
        let signature = match self {
            Self::Transaction => adapter.sign_transaction(bytes)?,
            Self::Order => adapter.sign_order(bytes)?,
            Self::Request => adapter.sign_request(bytes)?,
        };
        Ok(signature)
    }
}
