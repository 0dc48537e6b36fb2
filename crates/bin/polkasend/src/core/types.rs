//! Core types - pure data structures shared between reducer and shell.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use polkasend_client::AccountInfo;

/// Connection lifecycle for the node endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "offline",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        }
    }
}

/// Status line contents: plain text, or text plus a block-explorer link.
/// Always overwritten as a whole, never appended to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Text(String),
    Link { text: String, url: String },
}

impl Default for Status {
    fn default() -> Self {
        Status::Text(String::new())
    }
}

impl Status {
    pub fn text(msg: impl Into<String>) -> Self {
        Status::Text(msg.into())
    }

    pub fn link(msg: impl Into<String>, url: impl Into<String>) -> Self {
        Status::Link {
            text: msg.into(),
            url: url.into(),
        }
    }
}

/// Snapshot of everything the widgets need for one frame.
#[derive(Clone, Debug)]
pub struct ViewModel {
    pub endpoint_input: String,
    pub connection: ConnectionState,
    pub accounts: Vec<AccountInfo>,
    pub selected: Option<AccountInfo>,
    pub balances: HashMap<String, String>,
    pub recipient: String,
    pub raw_transaction: String,
    pub signed_transaction: String,
    pub status: Status,
}
