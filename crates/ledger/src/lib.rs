//! Ledger collaborator for the drip distributor
//!
//! The commitment core produces roots and proofs; this crate ships them to a
//! ledger and surfaces failures without interpreting them. Submission is the
//! only part of the system that touches a network.

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod rpc;

pub use client::{LedgerClient, TxId};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use mock::{MockLedger, Submission};
pub use rpc::JsonRpcLedger;
