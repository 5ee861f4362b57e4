// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Bancoin Transaction Inspector
//!
//! Entry point for the `bancoin-tx` binary. Parses CLI arguments,
//! initializes logging, and runs signing requests through the registry
//! without ever signing them.
//!
//! The binary supports three subcommands:
//!
//! - `kinds`   — print the dispatch table
//! - `inspect` — dispatch, normalize, encode and convert one request
//! - `version` — print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::io::Read;

use bancoin_tx_registry::config::REGISTRY_VERSION;
use bancoin_tx_registry::fields::Order;
use bancoin_tx_registry::{
    AliasResolver, BasicEntityFactory, DispatchTable, KindEncoder, NetworkContext,
    NormalizedFields, Registry, SignRequest, TimestampPolicy, WireVersion,
};

use cli::{BancoinTxCli, Commands};

fn main() -> Result<()> {
    let cli = BancoinTxCli::parse();
    logging::init_logging("bancoin_tx=info,bancoin_tx_registry=info", cli.log_format);

    match cli.command {
        Commands::Kinds(args) => print_kinds(args),
        Commands::Inspect(args) => inspect(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Kind encoder for a binary that links no ledger layouts.
///
/// `inspect` only asks for bytes of layouts assembled by the registry itself,
/// so reaching this is a bug in the caller.
struct NoLedgerLayouts;

impl KindEncoder for NoLedgerLayouts {
    fn serialize_transaction(
        &self,
        _version: WireVersion,
        fields: &NormalizedFields,
    ) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("no ledger layout linked for {}", fields.kind())
    }

    fn serialize_order(&self, _version: WireVersion, _order: &Order) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("no order layout linked")
    }
}

fn print_kinds(args: cli::KindsArgs) -> Result<()> {
    let table = DispatchTable::global();

    if args.json {
        let entries: Vec<_> = table.entries().collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{:<24} {:>5}  {:<10} {:<17} {}",
        "KIND", "CODE", "VERSIONS", "CAPABILITY", "CONVERTER"
    );
    for kind in table.kinds() {
        let versions = table
            .versions(kind)
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let capability = table
            .capability(kind)
            .map(|c| c.to_string())
            .unwrap_or_default();
        let converter = table
            .converter(kind)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:>5}  {:<10} {:<17} {}",
            kind.name(),
            kind.code(),
            versions,
            capability,
            converter
        );
    }
    Ok(())
}

fn read_request(path: &std::path::Path) -> Result<SignRequest> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read request from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?
    };
    serde_json::from_str(&text)
        .context("request is not a valid {\"type\", \"version\", \"data\"} object")
}

fn inspect(args: cli::InspectArgs) -> Result<()> {
    let request = read_request(&args.file)?;
    let policy = args
        .timestamp
        .map(TimestampPolicy::Fixed)
        .unwrap_or(TimestampPolicy::Now);
    let ctx = NetworkContext::from_code(args.network)
        .with_context(|| format!("unusable network code {:?}", args.network))?
        .with_timestamp_policy(policy);

    tracing::info!(
        kind = %request.kind,
        version = request.version,
        network = %ctx.network_code(),
        "inspecting request"
    );

    let registry = Registry::new(
        NoLedgerLayouts,
        BasicEntityFactory::for_network(&ctx),
        AliasResolver,
    );
    let (entry, fields) = registry.fields(&request, &ctx)?;
    let bytes = if entry.encoder.is_local() {
        let bytes = registry.encode(&entry, &fields)?;
        json!({
            "base58": bs58::encode(&bytes).into_string(),
            "hex": hex::encode(&bytes),
        })
    } else {
        Value::Null
    };
    let node = registry.node(&entry, &fields, &ctx)?;

    let report = json!({
        "kind": request.kind,
        "code": request.kind.code(),
        "version": request.version,
        "network": ctx.network_code().to_string(),
        "encoder": entry.encoder,
        "capability": entry.capability,
        "converter": entry.converter,
        "fields": fields,
        "bytes": bytes,
        "node": node,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_version() {
    println!("bancoin-tx {}", env!("CARGO_PKG_VERSION"));
    println!("registry   {}", REGISTRY_VERSION);
    println!(
        "dispatch   {} kinds, {} entries",
        DispatchTable::global().kinds().len(),
        DispatchTable::global().entries().count()
    );
}
