use std::pin::Pin;

use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding},
    traits::PublicKeyParts,
    RsaPrivateKey, RsaPublicKey,
};
use tracing::{debug, instrument};

use crate::{error::RsaError, CryptoError, Result};

/// RSA private key of the user, loaded from the key file.
#[derive(Clone)]
pub struct PrivateKey {
    // RsaPrivateKey is not a Copy type so this isn't completely necessary, but
    // to keep the compiler from making stack copies when moving this struct around,
    // we use a Box to keep the values on the heap. We also pin the box to make sure
    // that the contents can't be pulled out of the box and moved
    inner: Pin<Box<RsaPrivateKey>>,
}

// Note that RsaPrivateKey already implements ZeroizeOnDrop, so we don't need to do anything
// We add this assertion to make sure that this is still true in the future
const _: fn() = || {
    fn assert_zeroize_on_drop<T: zeroize::ZeroizeOnDrop>() {}
    assert_zeroize_on_drop::<RsaPrivateKey>();
};
impl zeroize::ZeroizeOnDrop for PrivateKey {}

impl PrivateKey {
    /// Parse a PEM private key, either PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1
    /// (`BEGIN RSA PRIVATE KEY`).
    #[instrument(skip_all, err)]
    pub fn from_pem(pem: &str) -> Result<Self> {
        let pem = pem.trim();
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|_| RsaError::ParsePrivateKey)?;
        debug!(bits = key.size() * 8, "Loaded RSA private key");

        Ok(Self::from(key))
    }

    /// Derives the public key corresponding to this private key. This is deterministic
    /// and always derives the same public key.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    /// Modulus size in bytes.
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub(crate) fn inner(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self {
            inner: Box::pin(key),
        }
    }
}

// We manually implement these to make sure we don't print any sensitive data
impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &(self.size() * 8))
            .finish()
    }
}

/// RSA public key, used to wrap workspace keys and verify signatures.
#[derive(Clone, PartialEq, Debug)]
pub struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// Parse a PEM public key, either SubjectPublicKeyInfo (`BEGIN PUBLIC KEY`) or PKCS#1
    /// (`BEGIN RSA PUBLIC KEY`).
    #[instrument(skip_all, err)]
    pub fn from_pem(pem: &str) -> Result<Self> {
        let pem = pem.trim();
        let key = RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map_err(|_| RsaError::ParsePublicKey)?;

        Ok(Self { inner: key })
    }

    /// SubjectPublicKeyInfo PEM serialization.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_public_key_pem(LineEnding::LF)
            .map_err(|_| CryptoError::InvalidKey)
    }

    pub(crate) fn inner(&self) -> &RsaPublicKey {
        &self.inner
    }
}

/// The user's key pair.
///
/// Usually built from the private key alone, the public half is then derived from it. An explicit
/// public key can be supplied when the key file ships both halves.
#[derive(Clone, Debug)]
pub struct AsymmetricKeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl AsymmetricKeyPair {
    /// Build the pair from a private key, deriving the public key.
    pub fn from_private_key(private: PrivateKey) -> Self {
        let public = private.to_public_key();
        Self { private, public }
    }

    /// Build the pair from both halves.
    ///
    /// Fails with [CryptoError::InvalidKey] if the public key does not belong to the private key.
    pub fn from_parts(private: PrivateKey, public: PublicKey) -> Result<Self> {
        if private.to_public_key() != public {
            return Err(CryptoError::InvalidKey);
        }
        Ok(Self { private, public })
    }

    /// Parse a PEM private key and derive the public key.
    pub fn from_private_pem(pem: &str) -> Result<Self> {
        Ok(Self::from_private_key(PrivateKey::from_pem(pem)?))
    }

    /// Parse both PEM halves.
    pub fn from_pems(private_pem: &str, public_pem: &str) -> Result<Self> {
        Self::from_parts(
            PrivateKey::from_pem(private_pem)?,
            PublicKey::from_pem(public_pem)?,
        )
    }

    /// The private half.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// The public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}
