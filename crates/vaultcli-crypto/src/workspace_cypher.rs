use tracing::instrument;
use zeroize::Zeroizing;

use crate::{
    rsa::{decrypt_pkcs1v15, encrypt_pkcs1v15, sign_pkcs1v15_sha1, verify_pkcs1v15_sha1},
    util::{decode_b64, encode_b64},
    AsymmetricKeyPair, PrivateKey, Result,
};

/// # Workspace key cypher
///
/// Wraps and unwraps workspace keys with the user's RSA key pair and signs authentication
/// challenges. Everything uses PKCS#1 v1.5: encryption for the wrapping, signatures over a
/// SHA-1 digest for the challenges.
///
/// Encryption and verification use the public half, decryption and signing the private half.
#[derive(Clone, Debug)]
pub struct WorkspaceCypher {
    key_pair: AsymmetricKeyPair,
}

impl WorkspaceCypher {
    /// Cypher for an already loaded key pair.
    pub fn new(key_pair: AsymmetricKeyPair) -> Self {
        Self { key_pair }
    }

    /// Build the cypher from a private key alone, the public key is derived from it.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        Self::new(AsymmetricKeyPair::from_private_key(private_key))
    }

    /// Build the cypher from the PEM text of a private key.
    pub fn from_private_pem(pem: &str) -> Result<Self> {
        Ok(Self::new(AsymmetricKeyPair::from_private_pem(pem)?))
    }

    /// The RSA key pair used for wrapping and signing.
    pub fn key_pair(&self) -> &AsymmetricKeyPair {
        &self.key_pair
    }

    /// Sign `message` with the private key.
    #[instrument(skip_all, err)]
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        sign_pkcs1v15_sha1(self.key_pair.private_key(), message)
    }

    /// Check a signature produced by [Self::sign] against the public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify_pkcs1v15_sha1(self.key_pair.public_key(), message, signature)
    }

    /// Encrypt `data` for the public key and return it as base64.
    #[instrument(skip_all, err)]
    pub fn encrypt(&self, data: &[u8]) -> Result<String> {
        let encrypted = encrypt_pkcs1v15(self.key_pair.public_key(), data)?;
        Ok(encode_b64(&encrypted))
    }

    /// Decrypt base64 `data` with the private key.
    ///
    /// Returns [CryptoError::KeyMismatch](crate::CryptoError::KeyMismatch) when the data cannot
    /// have been encrypted for this key pair.
    #[instrument(skip_all, err)]
    pub fn decrypt(&self, data: &str) -> Result<Zeroizing<Vec<u8>>> {
        let raw = decode_b64(data)?;
        Ok(Zeroizing::new(decrypt_pkcs1v15(
            self.key_pair.private_key(),
            &raw,
        )?))
    }
}
