//! Effects - side effects requested by the reducer, executed by the shell.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Tear down any previous client handle and dial the endpoint.
    Connect { generation: u64, endpoint: String },

    /// Query the free balance of each address, concurrently.
    LoadBalances {
        generation: u64,
        addresses: Vec<String>,
    },

    /// Assemble transfer call data for the recipient.
    BuildTransfer { recipient: String },

    /// Sign the raw payload with the vault key for `address`.
    SignTransfer { raw_hex: String, address: String },

    /// Broadcast the signed payload.
    SubmitTransfer { signed_hex: String },

    /// Write the committed endpoint to the config file.
    PersistEndpoint(String),
}
