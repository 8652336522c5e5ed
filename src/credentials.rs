//! Signing credentials.
//!
//! # Security
//! - Credentials are read ONLY from environment bindings
//! - Secret values are never logged or serialized; `Debug` and `Serialize`
//!   show the derived address at most
//! - Shape is checked eagerly so a malformed key fails at resolution time,
//!   not when the first transaction is signed

use std::fmt;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::config::schema::CredentialFormat;

/// Why a present credential binding was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The binding is set but has no key material.
    #[error("value is empty")]
    Empty,

    /// The binding contains non-hex characters.
    #[error("value is not hex-encoded")]
    NotHex,

    /// The binding is hex but not a usable secp256k1 private key.
    #[error("invalid private key: {0}")]
    InvalidKey(String),
}

/// A validated signing secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: String,
    address: Option<Address>,
}

impl Credential {
    /// Validate `raw` against `format`.
    ///
    /// The value is kept exactly as supplied, `0x` prefix included.
    pub fn parse(raw: &str, format: CredentialFormat) -> Result<Self, CredentialError> {
        let key_hex = raw.strip_prefix("0x").unwrap_or(raw);
        if key_hex.is_empty() {
            return Err(CredentialError::Empty);
        }
        if !key_hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CredentialError::NotHex);
        }

        let signer = key_hex.parse::<PrivateKeySigner>();
        let address = match (format, signer) {
            (_, Ok(signer)) => Some(signer.address()),
            (CredentialFormat::Secp256k1, Err(e)) => {
                return Err(CredentialError::InvalidKey(e.to_string()));
            }
            (CredentialFormat::Hex, Err(_)) => None,
        };

        Ok(Self {
            secret: raw.to_string(),
            address,
        })
    }

    /// The raw secret, for handing to a signer.
    pub fn expose(&self) -> &str {
        &self.secret
    }

    /// Account address, when the secret is a valid private key.
    pub fn address(&self) -> Option<Address> {
        self.address
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("address", &self.address)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Serialize for Credential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.address {
            Some(address) => serializer.serialize_str(&address.to_string()),
            None => serializer.serialize_str("<redacted>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_secp256k1_key_derives_address() {
        let credential = Credential::parse(TEST_PRIVATE_KEY, CredentialFormat::Secp256k1).unwrap();
        assert_eq!(
            credential.address().unwrap().to_string().to_lowercase(),
            TEST_ADDRESS
        );
    }

    #[test]
    fn test_secp256k1_key_with_0x_prefix() {
        let raw = format!("0x{}", TEST_PRIVATE_KEY);
        let credential = Credential::parse(&raw, CredentialFormat::Secp256k1).unwrap();
        assert_eq!(credential.expose(), raw);
        assert!(credential.address().is_some());
    }

    #[test]
    fn test_short_key_is_invalid_secp256k1() {
        let result = Credential::parse("0xdead", CredentialFormat::Secp256k1);
        assert!(matches!(result, Err(CredentialError::InvalidKey(_))));
    }

    #[test]
    fn test_short_hex_accepted_without_address() {
        let credential = Credential::parse("0xdead", CredentialFormat::Hex).unwrap();
        assert_eq!(credential.expose(), "0xdead");
        assert_eq!(credential.address(), None);
    }

    #[test]
    fn test_empty_and_non_hex_rejected() {
        assert_eq!(Credential::parse("", CredentialFormat::Hex), Err(CredentialError::Empty));
        assert_eq!(Credential::parse("0x", CredentialFormat::Hex), Err(CredentialError::Empty));
        assert_eq!(
            Credential::parse("not-a-key", CredentialFormat::Hex),
            Err(CredentialError::NotHex)
        );
        assert_eq!(
            Credential::parse(" 0xdead", CredentialFormat::Hex),
            Err(CredentialError::NotHex)
        );
    }

    #[test]
    fn test_debug_and_serialize_never_show_secret() {
        let credential = Credential::parse(TEST_PRIVATE_KEY, CredentialFormat::Hex).unwrap();
        let debug = format!("{:?}", credential);
        assert!(!debug.contains(TEST_PRIVATE_KEY));

        let json = serde_json::to_string(&credential).unwrap();
        assert!(!json.contains(TEST_PRIVATE_KEY));
        assert_eq!(json.to_lowercase(), format!("\"{}\"", TEST_ADDRESS));

        let short = Credential::parse("0xdead", CredentialFormat::Hex).unwrap();
        assert_eq!(serde_json::to_string(&short).unwrap(), "\"<redacted>\"");
    }
}
