//! Deterministic Mainnet signers for contract tests.
//!
//! Produces typed signatures the same way an oracle or a wallet would, so
//! tests exercise the real recovery path instead of a stubbed verifier.

use cosmwasm_std::Binary;
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::foreign_address::ForeignAddress;
use crate::hash::mapping_hash;
use crate::signature::SignatureScheme;

pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    /// Build a signer from a one-byte seed. Seed 0 is remapped since the
    /// all-zero scalar is not a valid key.
    pub fn new(seed: u8) -> Self {
        let mut secret = [0x11u8; 32];
        secret[31] = seed.max(1);
        secret[0] = seed;
        let key = SigningKey::from_slice(&secret).expect("valid secp256k1 scalar");
        Self { key }
    }

    pub fn address(&self) -> ForeignAddress {
        let point = self.key.verifying_key().as_affine().to_encoded_point(false);
        ForeignAddress::from_public_key(point.as_bytes()).expect("uncompressed key")
    }

    /// Typed signature (`scheme ‖ r ‖ s ‖ v`) over a 32-byte payload digest
    pub fn sign(&self, scheme: SignatureScheme, payload_hash: &[u8; 32]) -> Binary {
        let digest = scheme.signing_hash(payload_hash);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .expect("signing a 32-byte digest");

        let mut out = Vec::with_capacity(66);
        out.push(scheme as u8);
        out.extend_from_slice(&signature.to_bytes());
        out.push(recovery_id.to_byte() + 27);
        Binary::from(out)
    }

    /// Proof that this key controls `self.address()` and wants it bound to
    /// `local` (identity mappings and contract mappings use the same digest)
    pub fn sign_mapping(&self, local: &str) -> Binary {
        self.sign(SignatureScheme::Eip712, &mapping_hash(&self.address(), local))
    }

    /// Same digest as [`Self::sign_mapping`] but for an arbitrary foreign
    /// address, e.g. a contract deployed by this key
    pub fn sign_contract_mapping(&self, foreign_contract: &ForeignAddress, local: &str) -> Binary {
        self.sign(SignatureScheme::Eip712, &mapping_hash(foreign_contract, local))
    }
}
