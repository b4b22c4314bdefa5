//! Typed Mainnet signatures.
//!
//! A typed signature is 66 bytes: `scheme (1) ‖ r (32) ‖ s (32) ‖ v (1)`.
//! The scheme byte says how the 32-byte payload digest was prepared before
//! it was signed, which lets wallets that can only sign personal messages
//! and oracles that sign raw digests share a single verification path.
//!
//! Recovery is delegated to the host (`Api::secp256k1_recover_pubkey`); the
//! recovered key is reduced to a Mainnet address and compared with the
//! expected signer.

use cosmwasm_std::Api;
use thiserror::Error;

use crate::foreign_address::ForeignAddress;
use crate::hash::keccak256;

/// Length of a typed signature in bytes
pub const TYPED_SIGNATURE_LEN: usize = 66;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

#[derive(Error, Debug, PartialEq)]
pub enum SignatureError {
    #[error("Invalid signature length: expected 66 bytes, got {got}")]
    InvalidLength { got: usize },

    #[error("Unsupported signature scheme: {scheme}")]
    UnsupportedScheme { scheme: u8 },

    #[error("Invalid recovery id: {v}")]
    InvalidRecoveryId { v: u8 },

    #[error("Public key recovery failed: {reason}")]
    RecoveryFailed { reason: String },

    #[error("Signer mismatch: expected {expected}, recovered {recovered}")]
    SignerMismatch { expected: String, recovered: String },
}

/// How a payload digest is prepared before signing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureScheme {
    /// The payload digest itself is signed
    Eip712 = 0,
    /// The digest is wrapped in the `personal_sign` prefix first
    Geth = 1,
}

impl SignatureScheme {
    pub fn from_byte(byte: u8) -> Result<Self, SignatureError> {
        match byte {
            0 => Ok(Self::Eip712),
            1 => Ok(Self::Geth),
            scheme => Err(SignatureError::UnsupportedScheme { scheme }),
        }
    }

    /// Digest that is actually signed for `payload_hash` under this scheme
    pub fn signing_hash(&self, payload_hash: &[u8; 32]) -> [u8; 32] {
        match self {
            Self::Eip712 => *payload_hash,
            Self::Geth => {
                let mut data = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + 32);
                data.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
                data.extend_from_slice(payload_hash);
                keccak256(&data)
            }
        }
    }
}

/// Borrowed view over the parts of a typed signature
#[derive(Debug)]
pub struct TypedSignature<'a> {
    pub scheme: SignatureScheme,
    pub rs: &'a [u8],
    pub recovery_id: u8,
}

impl<'a> TypedSignature<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, SignatureError> {
        if bytes.len() != TYPED_SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength { got: bytes.len() });
        }
        let scheme = SignatureScheme::from_byte(bytes[0])?;
        let v = bytes[65];
        // Accept both the legacy 27/28 encoding and raw 0/1
        let recovery_id = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            _ => return Err(SignatureError::InvalidRecoveryId { v }),
        };
        Ok(Self {
            scheme,
            rs: &bytes[1..65],
            recovery_id,
        })
    }
}

/// Recover the Mainnet address that produced `signature` over `payload_hash`.
pub fn recover_signer(
    api: &dyn Api,
    payload_hash: &[u8; 32],
    signature: &[u8],
) -> Result<ForeignAddress, SignatureError> {
    let typed = TypedSignature::parse(signature)?;
    let signing_hash = typed.scheme.signing_hash(payload_hash);

    let public_key = api
        .secp256k1_recover_pubkey(&signing_hash, typed.rs, typed.recovery_id)
        .map_err(|e| SignatureError::RecoveryFailed {
            reason: e.to_string(),
        })?;

    ForeignAddress::from_public_key(&public_key).map_err(|e| SignatureError::RecoveryFailed {
        reason: e.to_string(),
    })
}

/// Check that `signature` over `payload_hash` was produced by `expected`.
pub fn verify_signer(
    api: &dyn Api,
    payload_hash: &[u8; 32],
    signature: &[u8],
    expected: &ForeignAddress,
) -> Result<(), SignatureError> {
    let recovered = recover_signer(api, payload_hash, signature)?;
    if &recovered != expected {
        return Err(SignatureError::SignerMismatch {
            expected: expected.to_hex(),
            recovered: recovered.to_hex(),
        });
    }
    Ok(())
}
