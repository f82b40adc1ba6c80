//! Builder - commit an allowlist to a Merkle root
//!
//! Reads an allowlist JSON document (an array of `[address, amount]` string
//! pairs), builds the commitment tree, writes the serialized artifact, and
//! prints the root. Optionally publishes the root to the distributor
//! contract.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use drip_core::{format_hash_hex, parse_allowlist, AllowlistEntry, LeafSchema};
use drip_ledger::{JsonRpcLedger, LedgerClient, LedgerConfig};
use drip_tree::{MerkleTree, TreeArtifact};

/// Builder configuration
#[derive(Debug, Clone)]
struct BuilderConfig {
    /// Allowlist input document
    allowlist_path: String,
    /// Artifact output document
    artifact_path: String,
    /// Whether to publish the root after building
    submit_root: bool,
}

impl BuilderConfig {
    fn from_env() -> Self {
        Self {
            allowlist_path: env::var("DRIP_ALLOWLIST")
                .unwrap_or_else(|_| "allowlist.json".to_string()),
            artifact_path: env::var("DRIP_ARTIFACT").unwrap_or_else(|_| "tree.json".to_string()),
            submit_root: env::var("DRIP_SUBMIT_ROOT")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let config = BuilderConfig::from_env();
    info!("Building allowlist commitment");
    info!("  allowlist: {}", config.allowlist_path);
    info!("  artifact:  {}", config.artifact_path);

    let document = fs::read_to_string(&config.allowlist_path)
        .with_context(|| format!("reading allowlist {}", config.allowlist_path))?;
    let entries: Vec<AllowlistEntry> =
        serde_json::from_str(&document).context("parsing allowlist document")?;
    let leaves = parse_allowlist(&entries)?;

    let tree = MerkleTree::build(leaves, LeafSchema::address_uint256())?;
    let root = tree.root();
    info!("Committed {} leaves", tree.len());
    info!("Merkle root: {}", format_hash_hex(&root));

    let artifact = TreeArtifact::from_tree(&tree);
    fs::write(&config.artifact_path, artifact.to_json()?)
        .with_context(|| format!("writing artifact {}", config.artifact_path))?;
    info!("Artifact written to {}", config.artifact_path);

    if config.submit_root {
        let ledger = JsonRpcLedger::new(LedgerConfig::from_env());
        let tx_id = ledger.submit_root(root).await?;
        info!("Root published: {}", tx_id);
    }

    Ok(())
}
