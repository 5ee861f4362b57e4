// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Bancoin Transaction Registry
//!
//! The registry a wallet consults before it signs anything. Given a
//! transaction kind and a wire version it answers three questions:
//!
//! 1. Which byte layout do we sign? ([`encoding::ByteEncoder`])
//! 2. Which signing capability does the adapter have to use? ([`kind::Capability`])
//! 3. What does the node expect when we broadcast it? ([`node::NodeConverter`])
//!
//! Transaction formats have evolved for years and several wire versions stay
//! signable at the same time. Every kind also carries its own field quirks:
//! `amount` vs `quantity`, aliases that depend on the network byte,
//! attachments, embedded orders with either a signature or a proofs list.
//! The [`normalize`] module makes those quirks disappear the same way every
//! time.
//!
//! ## Architecture
//!
//! - **kind** — Transaction kinds, wire versions and capability tags.
//! - **fields** — Raw (caller-shaped) and normalized per-kind records.
//! - **normalize** — Per-kind normalization rules and their processors.
//! - **encoding** — Byte-encoder dispatch and the off-chain layouts built here.
//! - **node** — Conversion to node-submission JSON.
//! - **dispatch** — The `(kind, version)` table, built once per process.
//! - **signing** — The signing capability surface consumed from adapters.
//! - **registry** — Request-level facade wiring all of the above together.
//! - **config** — Protocol constants and the per-request network context.
//!
//! ## What this crate does not do
//!
//! It does not validate balances, fees or permissions, it does not persist or
//! broadcast anything, and it never holds key material. Ledger byte layouts,
//! domain-entity construction and signing are reached through the traits in
//! [`encoding`], [`node`] and [`signing`].

pub mod config;
pub mod dispatch;
pub mod encoding;
pub mod error;
pub mod fields;
pub mod kind;
pub mod node;
pub mod normalize;
pub mod registry;
pub mod signing;

pub use config::{NetworkContext, TimestampPolicy};
pub use dispatch::{
    get_byte_encoder, get_node_converter, get_required_capability, DispatchEntry, DispatchKey,
    DispatchTable,
};
pub use encoding::{ByteEncoder, KindEncoder};
pub use error::{RegistryError, Result};
pub use fields::{Money, NormalizedFields, RawFields};
pub use kind::{Capability, TransactionKind, WireVersion};
pub use node::{BasicEntityFactory, EntityFactory, NodeConverter};
pub use normalize::{normalize, normalize_json, AliasResolver, RecipientResolver};
pub use registry::{PreparedRequest, Registry, SignRequest};
pub use signing::SigningAdapter;
