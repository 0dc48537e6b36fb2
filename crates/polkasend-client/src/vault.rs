//! Local key vault.
//!
//! Stands in for a browser wallet extension: a directory of secret-URI
//! files is enumerated into account descriptors, and signing requests are
//! resolved per address. A missing directory means "no accounts", not an
//! error, so the console can run in watch-only mode.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sp_core::{crypto::Ss58Codec, sr25519, Pair};
use subxt::utils::{AccountId32, MultiSignature};
use subxt::PolkadotConfig;
use tracing::{info, warn};

use crate::error::{ClientError, Result};

/// Well-known dev key derivations, used behind `--dev`.
const DEV_SURIS: &[(&str, &str)] = &[
    ("alice", "//Alice"),
    ("bob", "//Bob"),
    ("charlie", "//Charlie"),
];

/// Account descriptor handed to the UI: the SS58 address plus the name of
/// the vault that supplied it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: String,
    pub source: String,
}

struct VaultKey {
    label: String,
    address: String,
    pair: sr25519::Pair,
}

/// A named collection of signing keys.
pub struct Vault {
    name: String,
    keys: Vec<VaultKey>,
}

impl Vault {
    /// Read every secret-URI file in `dir`. Each file holds one URI
    /// (a mnemonic or a `//Name` dev path); the file stem becomes the key
    /// label. Unparseable entries are skipped with a warning.
    pub fn open(dir: &Path) -> Result<Self> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vault".into());

        if !dir.is_dir() {
            info!("key vault {} not found, starting with no accounts", dir.display());
            return Ok(Self { name, keys: Vec::new() });
        }

        let mut keys = Vec::new();
        let entries = fs::read_dir(dir)
            .map_err(|e| ClientError::Vault(format!("reading {}: {}", dir.display(), e)))?;
        for entry in entries {
            let entry = entry.map_err(|e| ClientError::Vault(e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let label = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let suri = match fs::read_to_string(&path) {
                Ok(contents) => contents.trim().to_string(),
                Err(e) => {
                    warn!("skipping unreadable key file {}: {}", path.display(), e);
                    continue;
                }
            };
            match sr25519::Pair::from_string(&suri, None) {
                Ok(pair) => keys.push(VaultKey {
                    label,
                    address: pair.public().to_ss58check(),
                    pair,
                }),
                Err(e) => warn!("skipping invalid key file {}: {:?}", path.display(), e),
            }
        }

        // deterministic enumeration order regardless of directory order
        keys.sort_by(|a, b| a.label.cmp(&b.label));
        info!("opened key vault {:?} with {} key(s)", name, keys.len());
        Ok(Self { name, keys })
    }

    /// The well-known dev trio (Alice, Bob, Charlie).
    pub fn dev() -> Self {
        let keys = DEV_SURIS
            .iter()
            .map(|(label, suri)| {
                let pair = sr25519::Pair::from_string(suri, None)
                    .expect("dev suris are well-formed");
                VaultKey {
                    label: (*label).to_string(),
                    address: pair.public().to_ss58check(),
                    pair,
                }
            })
            .collect();
        Self { name: "dev".into(), keys }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Enumerate accounts for the UI. The set is rebuilt wholesale on
    /// every call.
    pub fn accounts(&self) -> Vec<AccountInfo> {
        self.keys
            .iter()
            .map(|k| AccountInfo {
                address: k.address.clone(),
                source: self.name.clone(),
            })
            .collect()
    }

    /// Signer lookup by address. `None` when the vault holds no key for
    /// the address.
    pub fn signer_for(&self, address: &str) -> Option<VaultSigner> {
        self.keys
            .iter()
            .find(|k| k.address == address)
            .map(|k| VaultSigner::from_pair(k.pair.clone()))
    }
}

/// Subxt signer backed by an sr25519 pair from the vault.
pub struct VaultSigner {
    pair: sr25519::Pair,
    account_id: AccountId32,
}

impl VaultSigner {
    pub fn from_suri(suri: &str) -> Result<Self> {
        let pair = sr25519::Pair::from_string(suri, None)
            .map_err(|e| ClientError::Vault(format!("invalid secret uri: {:?}", e)))?;
        Ok(Self::from_pair(pair))
    }

    fn from_pair(pair: sr25519::Pair) -> Self {
        let account_id = AccountId32::from(pair.public().0);
        Self { pair, account_id }
    }

    pub fn address(&self) -> String {
        self.pair.public().to_ss58check()
    }
}

impl subxt::tx::Signer<PolkadotConfig> for VaultSigner {
    fn account_id(&self) -> AccountId32 {
        self.account_id.clone()
    }

    fn address(&self) -> <PolkadotConfig as subxt::Config>::Address {
        self.account_id.clone().into()
    }

    fn sign(&self, payload: &[u8]) -> <PolkadotConfig as subxt::Config>::Signature {
        let sig = self.pair.sign(payload);
        MultiSignature::Sr25519(sig.0)
    }
}
