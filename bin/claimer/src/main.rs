//! Claimer - prove allowlist membership and claim
//!
//! Loads a tree artifact, locates the claimant's address, produces the
//! inclusion proof, verifies it locally against the recomputed root, and
//! optionally submits the claim to the distributor contract. Nothing leaves
//! the process before the proof verifies locally.

use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use drip_core::{format_hash_hex, Address};
use drip_ledger::{JsonRpcLedger, LedgerClient, LedgerConfig};
use drip_tree::{verify, TreeArtifact};

/// Claimer configuration
#[derive(Debug, Clone)]
struct ClaimerConfig {
    /// Artifact input document
    artifact_path: String,
    /// Address to claim for
    claim_address: String,
    /// Whether to submit the claim after proving
    submit_claim: bool,
}

impl ClaimerConfig {
    fn from_env() -> Self {
        Self {
            artifact_path: env::var("DRIP_ARTIFACT").unwrap_or_else(|_| "tree.json".to_string()),
            claim_address: env::var("DRIP_CLAIM_ADDRESS").unwrap_or_default(),
            submit_claim: env::var("DRIP_SUBMIT_CLAIM")
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

    let config = ClaimerConfig::from_env();
    if config.claim_address.is_empty() {
        return Err(anyhow!("DRIP_CLAIM_ADDRESS is not set"));
    }
    let account: Address = config
        .claim_address
        .parse()
        .map_err(|e| anyhow!("malformed claim address {:?}: {}", config.claim_address, e))?;

    let document = fs::read_to_string(&config.artifact_path)
        .with_context(|| format!("reading artifact {}", config.artifact_path))?;
    let tree = TreeArtifact::from_json(&document)?.into_tree()?;
    let root = tree.root();
    info!(
        "Loaded artifact: {} leaves, root {}",
        tree.len(),
        format_hash_hex(&root)
    );

    let claim = tree.prove_by_address(account)?;
    info!(
        "Matched leaf {} with amount {}",
        claim.index, claim.leaf.amount
    );
    for (level, sibling) in claim.proof.siblings.iter().enumerate() {
        info!("  proof[{}]: {}", level, format_hash_hex(sibling));
    }

    if !verify(&claim.leaf, &claim.proof, &root) {
        return Err(anyhow!("generated proof failed local verification"));
    }
    info!("Proof verified locally against the root");

    if config.submit_claim {
        let ledger = JsonRpcLedger::new(LedgerConfig::from_env());
        let tx_id = ledger.submit_claim(&claim.leaf, &claim.proof).await?;
        info!("Claim submitted: {}", tx_id);
    }

    Ok(())
}
