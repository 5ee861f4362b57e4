//! # Registry Facade
//!
//! Request-level pipeline over the dispatch table:
//!
//! ```text
//! SignRequest ──lookup──▶ DispatchEntry
//!             ──normalize──▶ NormalizedFields ──encoder──▶ signing bytes
//!                                             ──converter──▶ node payload
//! PreparedRequest ──capability──▶ SigningAdapter ──▶ signature
//! ```
//!
//! The registry owns its collaborators and nothing else. Each request is
//! normalized from scratch; nothing is cached between calls.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::NetworkContext;
use crate::dispatch::{DispatchEntry, DispatchTable};
use crate::encoding::KindEncoder;
use crate::error::Result;
use crate::fields::{NormalizedFields, RawFields};
use crate::kind::{TransactionKind, WireVersion};
use crate::node::EntityFactory;
use crate::normalize::{normalize, RecipientResolver};
use crate::signing::SigningAdapter;

/// A signing request as the wallet receives it:
/// `{"type": <code>, "version": <n>, "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub version: WireVersion,
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl SignRequest {
    pub fn new(kind: TransactionKind, version: WireVersion, data: Value) -> Self {
        Self {
            kind,
            version,
            data,
        }
    }
}

/// A request resolved against the table, ready to be signed.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub entry: DispatchEntry,
    pub fields: NormalizedFields,
    /// Signing bytes.
    pub bytes: Vec<u8>,
    /// Node-submission payload; `None` for kinds that are never broadcast.
    pub node: Option<Value>,
}

/// Dispatch table plus the collaborators it routes to.
#[derive(Clone)]
pub struct Registry {
    table: &'static DispatchTable,
    encoder: Arc<dyn KindEncoder>,
    entities: Arc<dyn EntityFactory>,
    resolver: Arc<dyn RecipientResolver>,
}

impl Registry {
    pub fn new(
        encoder: impl KindEncoder + 'static,
        entities: impl EntityFactory + 'static,
        resolver: impl RecipientResolver + 'static,
    ) -> Self {
        Self {
            table: DispatchTable::global(),
            encoder: Arc::new(encoder),
            entities: Arc::new(entities),
            resolver: Arc::new(resolver),
        }
    }

    pub fn table(&self) -> &'static DispatchTable {
        self.table
    }

    /// Looks the request up and normalizes its fields.
    pub fn fields(
        &self,
        request: &SignRequest,
        ctx: &NetworkContext,
    ) -> Result<(DispatchEntry, NormalizedFields)> {
        let entry = *self.table.lookup(request.kind, request.version)?;
        let raw = RawFields::from_json(request.kind, request.data.clone())?;
        let fields = normalize(request.kind, raw, ctx, self.resolver.as_ref())?;
        Ok((entry, fields))
    }

    /// Signing bytes of normalized `fields`.
    pub fn encode(&self, entry: &DispatchEntry, fields: &NormalizedFields) -> Result<Vec<u8>> {
        entry
            .encoder
            .encode(entry.key.version, fields, self.encoder.as_ref())
    }

    /// Node payload of normalized `fields`, if the kind is ever broadcast.
    pub fn node(
        &self,
        entry: &DispatchEntry,
        fields: &NormalizedFields,
        ctx: &NetworkContext,
    ) -> Result<Option<Value>> {
        entry
            .converter
            .map(|converter| {
                converter.convert(entry.key.version, fields, ctx, self.entities.as_ref())
            })
            .transpose()
    }

    /// Runs the whole pipeline short of signing.
    ///
    /// # Errors
    ///
    /// Whatever the first failing stage reports: an unsupported dispatch key,
    /// a field the normalizer cannot resolve, or a collaborator failure.
    pub fn prepare(&self, request: &SignRequest, ctx: &NetworkContext) -> Result<PreparedRequest> {
        let (entry, fields) = self.fields(request, ctx)?;
        let bytes = self.encode(&entry, &fields)?;
        let node = self.node(&entry, &fields, ctx)?;
        debug!(
            kind = %request.kind,
            version = request.version,
            bytes = bytes.len(),
            broadcast = node.is_some(),
            "request prepared"
        );
        Ok(PreparedRequest {
            entry,
            fields,
            bytes,
            node,
        })
    }

    /// Signs a prepared request through its capability.
    pub fn sign(&self, prepared: &PreparedRequest, adapter: &dyn SigningAdapter) -> Result<String> {
        let signature = prepared.entry.capability.sign(adapter, &prepared.bytes)?;
        info!(
            kind = %prepared.entry.key.kind,
            version = prepared.entry.key.version,
            capability = %prepared.entry.capability,
            "request signed"
        );
        Ok(signature)
    }
}
