//! Chain access over a subxt online client.
//!
//! All calls are dynamic (no generated runtime bindings), so the console
//! works against any chain exposing the standard `System.Account` storage
//! and `Balances::transfer_keep_alive` call.

use sp_core::crypto::Ss58Codec;
use subxt::dynamic::Value;
use subxt::ext::scale_value::At;
use subxt::tx::{Payload, SubmittableExtrinsic};
use subxt::utils::AccountId32;
use subxt::{Metadata, OnlineClient, PolkadotConfig};
use tracing::info;

use crate::error::{ClientError, Result};
use crate::units;
use crate::vault::VaultSigner;

/// Call data that was assembled earlier (and possibly edited by hand in
/// the raw-transaction field). The bytes are passed through verbatim.
struct RawCall(Vec<u8>);

impl Payload for RawCall {
    fn encode_call_data_to(
        &self,
        _metadata: &Metadata,
        out: &mut Vec<u8>,
    ) -> std::result::Result<(), subxt::ext::subxt_core::Error> {
        out.extend_from_slice(&self.0);
        Ok(())
    }
}

/// Handle to a node. Cheap to clone; dropping the last clone tears the
/// connection down, which is exactly the reconnect semantics the console
/// wants (no explicit close call).
#[derive(Clone)]
pub struct ChainClient {
    inner: OnlineClient<PolkadotConfig>,
}

impl ChainClient {
    /// Open a WebSocket connection and fetch the runtime metadata.
    /// Unbounded in time; callers surface a "connecting" state meanwhile.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        info!("connecting to {}", endpoint);
        let inner = OnlineClient::<PolkadotConfig>::from_url(endpoint).await?;
        info!("connected to {}", endpoint);
        Ok(Self { inner })
    }

    /// Free balance of an account in planck. An absent storage entry is an
    /// unfunded account, not an error.
    pub async fn free_balance(&self, address: &str) -> Result<u128> {
        let account_id = parse_account(address)?;
        let storage_key = subxt::dynamic::storage(
            "System",
            "Account",
            vec![Value::from_bytes(account_id.0)],
        );

        let entry = self
            .inner
            .storage()
            .at_latest()
            .await?
            .fetch(&storage_key)
            .await?;

        let Some(entry) = entry else {
            return Ok(0);
        };
        let data = entry.to_value().map_err(subxt::Error::from)?;
        data.at("data")
            .and_then(|d| d.at("free"))
            .and_then(|f| f.as_u128())
            .ok_or_else(|| {
                ClientError::Rpc(subxt::Error::Other(
                    "unexpected System.Account storage shape".into(),
                ))
            })
    }

    /// SCALE call data for `Balances::transfer_keep_alive(recipient, amount)`.
    pub fn transfer_call_data(&self, recipient: &str, amount: u128) -> Result<Vec<u8>> {
        let dest = parse_account(recipient)?;
        let tx = subxt::dynamic::tx(
            "Balances",
            "transfer_keep_alive",
            vec![
                Value::unnamed_variant("Id", vec![Value::from_bytes(dest.0)]),
                Value::u128(amount),
            ],
        );
        Ok(self.inner.tx().call_data(&tx)?)
    }

    /// Build and sign a full extrinsic over arbitrary call data, fetching
    /// the signer's nonce from the node.
    pub async fn sign_call_data(&self, call: Vec<u8>, signer: &VaultSigner) -> Result<Vec<u8>> {
        let call = RawCall(call);
        let signed = self
            .inner
            .tx()
            .create_signed(&call, signer, Default::default())
            .await?;
        Ok(signed.into_encoded())
    }

    /// Broadcast an encoded signed extrinsic; returns the extrinsic hash
    /// as 0x-prefixed hex.
    pub async fn submit_signed(&self, tx_bytes: Vec<u8>) -> Result<String> {
        let tx = SubmittableExtrinsic::from_bytes(self.inner.clone(), tx_bytes);
        let hash = tx.submit().await?;
        Ok(units::to_hex(hash.as_ref()))
    }
}

/// Parse an SS58 address into an account id.
pub fn parse_account(addr: &str) -> Result<AccountId32> {
    let account = sp_core::sr25519::Public::from_ss58check(addr)
        .map_err(|e| ClientError::BadAddress(format!("{:?}", e)))?;
    Ok(AccountId32::from(account.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn parses_well_known_address() {
        let account = parse_account(ALICE).unwrap();
        // round-trips through ss58
        let display = sp_core::sr25519::Public::from_raw(account.0).to_ss58check();
        assert_eq!(display, ALICE);
    }

    #[test]
    fn rejects_malformed_address() {
        assert!(matches!(
            parse_account("not-an-address"),
            Err(ClientError::BadAddress(_))
        ));
        assert!(parse_account("").is_err());
    }
}
