//! Events - user interactions and async completions.

use serde::{Deserialize, Serialize};

use super::types::AccountInfo;

/// Everything that can happen to the application. Async completions carry
/// the connection generation they were issued under so the reducer can
/// discard work superseded by a reconnect.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Event {
    // ===== Async completions =====
    /// Vault enumeration finished; the account set is replaced wholesale.
    AccountsLoaded(Vec<AccountInfo>),

    /// A connection attempt resolved.
    ClientReady { generation: u64, endpoint: String },

    /// A connection attempt failed.
    ClientFailed { generation: u64, error: String },

    /// One balance query completed.
    BalanceUpdated {
        generation: u64,
        address: String,
        display: String,
    },

    /// One balance query failed.
    BalanceFailed {
        generation: u64,
        address: String,
        error: String,
    },

    /// Call data was assembled for the current recipient.
    RawBuilt { raw_hex: String },

    /// Call data construction failed.
    BuildFailed { error: String },

    /// The raw payload was signed into a full extrinsic.
    SignedReady { signed_hex: String },

    /// Signing failed.
    SignFailed { error: String },

    /// Submission succeeded with the given extrinsic hash.
    Submitted { hash: String },

    /// Submission failed.
    SubmitFailed { error: String },

    // ===== User interactions =====
    /// The endpoint field changed (uncommitted).
    EndpointEdited(String),

    /// The endpoint field was committed (enter / focus loss).
    EndpointCommitted,

    /// A row's radio control was clicked.
    AccountSelected(AccountInfo),

    /// The recipient field changed.
    RecipientEdited(String),

    /// The raw-transaction editor changed.
    RawEdited(String),

    /// The signed-transaction editor changed.
    SignedEdited(String),

    /// "Make Raw" was clicked.
    MakeRawClicked,

    /// "Sign" was clicked.
    SignClicked,

    /// "Send Signed" was clicked.
    SendClicked,
}
