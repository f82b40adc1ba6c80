//! JSON-RPC ledger client

use async_trait::async_trait;
use tiny_keccak::{Hasher, Keccak};
use tracing::info;

use drip_core::{format_address_hex, format_hash_hex, Hash, LeafRecord};
use drip_tree::InclusionProof;

use crate::client::{LedgerClient, TxId};
use crate::config::LedgerConfig;
use crate::error::LedgerError;

/// Compute keccak256 hash
fn keccak(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Ledger client speaking JSON-RPC to a node with an unlocked sender
/// account, via `eth_sendTransaction`. Suitable for devnets and test
/// deployments; a production sender would sign locally instead.
pub struct JsonRpcLedger {
    config: LedgerConfig,
    http_client: reqwest::Client,
}

impl JsonRpcLedger {
    /// Create a client over the given configuration
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Encode `setMerkleRoot(bytes32)` calldata
    fn root_calldata(root: &Hash) -> Vec<u8> {
        let selector = &keccak(b"setMerkleRoot(bytes32)")[..4];

        let mut calldata = Vec::with_capacity(4 + 32);
        calldata.extend_from_slice(selector);
        calldata.extend_from_slice(root);
        calldata
    }

    /// Encode `claim(uint256,bytes32[])` calldata: the amount word, the
    /// dynamic array offset and length, then the proof elements
    fn claim_calldata(leaf: &LeafRecord, proof: &InclusionProof) -> Vec<u8> {
        let selector = &keccak(b"claim(uint256,bytes32[])")[..4];
        let siblings = &proof.siblings;

        let mut calldata = Vec::with_capacity(4 + 32 * (3 + siblings.len()));
        calldata.extend_from_slice(selector);
        calldata.extend_from_slice(&leaf.amount.to_be_bytes::<32>());

        // offset of the array payload within the argument block
        let mut offset = [0u8; 32];
        offset[31] = 0x40;
        calldata.extend_from_slice(&offset);

        let mut length = [0u8; 32];
        length[24..].copy_from_slice(&(siblings.len() as u64).to_be_bytes());
        calldata.extend_from_slice(&length);

        for sibling in siblings {
            calldata.extend_from_slice(sibling);
        }
        calldata
    }

    /// Send a transaction and extract the tx hash from the response
    async fn send_transaction(&self, calldata: Vec<u8>) -> Result<TxId, LedgerError> {
        let tx_request = serde_json::json!({
            "from": self.config.sender_address,
            "to": self.config.distributor_address,
            "data": format!("0x{}", hex::encode(&calldata)),
            "gas": format!("0x{:x}", self.config.gas_limit),
        });

        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_sendTransaction",
            "params": [tx_request],
            "id": 1
        });

        let response = self
            .http_client
            .post(&self.config.rpc_url)
            .json(&request)
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        if let Some(error) = response.get("error") {
            return Err(LedgerError::RejectedByLedger {
                message: error.to_string(),
            });
        }

        let tx_hash = response
            .get("result")
            .and_then(|r| r.as_str())
            .ok_or_else(|| LedgerError::MalformedResponse {
                reason: "no tx hash in response".to_string(),
            })?;

        Ok(tx_hash.to_string())
    }
}

#[async_trait]
impl LedgerClient for JsonRpcLedger {
    async fn submit_root(&self, root: Hash) -> Result<TxId, LedgerError> {
        info!(
            "Submitting root {} to {}",
            format_hash_hex(&root),
            self.config.distributor_address
        );
        let tx_id = self.send_transaction(Self::root_calldata(&root)).await?;
        info!("  tx_hash: {}", tx_id);
        Ok(tx_id)
    }

    async fn submit_claim(
        &self,
        leaf: &LeafRecord,
        proof: &InclusionProof,
    ) -> Result<TxId, LedgerError> {
        info!(
            "Submitting claim for {} ({} proof elements)",
            format_address_hex(&leaf.account),
            proof.siblings.len()
        );
        let tx_id = self
            .send_transaction(Self::claim_calldata(leaf, proof))
            .await?;
        info!("  tx_hash: {}", tx_id);
        Ok(tx_id)
    }
}
