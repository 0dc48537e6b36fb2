//! Chain access and key vault for the polkasend transfer console.
//!
//! The GUI crate stays free of subxt details: everything it needs from the
//! node (balances, call data, signing, submission) and from the local key
//! vault goes through the types in here.

pub mod chain;
pub mod error;
pub mod units;
pub mod vault;

pub use chain::{parse_account, ChainClient};
pub use error::{ClientError, Result};
pub use vault::{AccountInfo, Vault, VaultSigner};
