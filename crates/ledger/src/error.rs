//! Ledger failure surface

use thiserror::Error;

/// Failures of the ledger collaborator. `RejectedByLedger` carries the
/// node's message through uninterpreted; deciding what a revert or a wrong
/// network means is the caller's problem.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger rejected the submission
    #[error("rejected by ledger: {message}")]
    RejectedByLedger { message: String },

    /// Transport failure talking to the node
    #[error("ledger transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with something that is not a JSON-RPC result
    #[error("malformed ledger response: {reason}")]
    MalformedResponse { reason: String },
}
