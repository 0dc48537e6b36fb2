//! Planck arithmetic, hex helpers, and display constants.

use crate::error::Result;

/// One token in planck (Westend uses 12 decimals).
pub const UNIT: u128 = 1_000_000_000_000;

/// The demo transfer moves exactly one token.
pub const TRANSFER_AMOUNT: u128 = UNIT;

/// Default node endpoint (public Westend RPC).
pub const DEFAULT_ENDPOINT: &str = "wss://westend-rpc.polkadot.io/";

const EXPLORER_BASE: &str = "https://westend.subscan.io/extrinsic";

/// Free balance as a display string with two decimal places.
pub fn format_balance(planck: u128) -> String {
    format!("{:.2}", planck as f64 / UNIT as f64)
}

/// Block explorer link for an extrinsic hash.
pub fn explorer_url(hash: &str) -> String {
    format!("{}/{}", EXPLORER_BASE, hash)
}

/// Encode bytes as a 0x-prefixed hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex string, tolerating surrounding whitespace and a 0x prefix.
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s.trim().trim_start_matches("0x"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimal_places() {
        assert_eq!(format_balance(0), "0.00");
        assert_eq!(format_balance(UNIT), "1.00");
        assert_eq!(format_balance(1_500_000_000_000), "1.50");
        assert_eq!(format_balance(12_340_000_000_000), "12.34");
    }

    #[test]
    fn hex_roundtrip_with_and_without_prefix() {
        let bytes = vec![0xde, 0xad, 0xbe, 0xef];
        let encoded = to_hex(&bytes);
        assert_eq!(encoded, "0xdeadbeef");
        assert_eq!(from_hex(&encoded).unwrap(), bytes);
        assert_eq!(from_hex("deadbeef").unwrap(), bytes);
        assert_eq!(from_hex("  0xdeadbeef\n").unwrap(), bytes);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(from_hex("0xzz").is_err());
        assert!(from_hex("0xabc").is_err()); // odd length
    }

    #[test]
    fn explorer_link_shape() {
        let url = explorer_url("0xabcd");
        assert_eq!(url, "https://westend.subscan.io/extrinsic/0xabcd");
    }
}
