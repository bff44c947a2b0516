//! Low level RSA PKCS#1 v1.5 operations.
//!
//! Only [WorkspaceCypher](crate::WorkspaceCypher) should call into this module.

use rsa::{traits::PublicKeyParts, BigUint, Pkcs1v15Encrypt, Pkcs1v15Sign};
use sha1::{Digest, Sha1};

use crate::{error::RsaError, CryptoError, PrivateKey, PublicKey, Result};

/// Encrypt data using RSA PKCS#1 v1.5 padding.
pub(crate) fn encrypt_pkcs1v15(public_key: &PublicKey, data: &[u8]) -> Result<Vec<u8>> {
    let mut rng = rand::thread_rng();

    public_key
        .inner()
        .encrypt(&mut rng, Pkcs1v15Encrypt, data)
        .map_err(|e| CryptoError::Rsa(RsaError::Encrypt(e)))
}

/// Decrypt data using RSA PKCS#1 v1.5 padding.
///
/// Ciphertexts that could never have been produced for this key (wrong length, not below the
/// modulus) and ciphertexts whose padding does not check out are reported as
/// [CryptoError::KeyMismatch]. With a key that parsed fine, a bad padding means the data was
/// wrapped for someone else.
pub(crate) fn decrypt_pkcs1v15(private_key: &PrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    let key = private_key.inner();
    if data.len() != key.size() || BigUint::from_bytes_be(data) >= *key.n() {
        return Err(CryptoError::KeyMismatch);
    }

    key.decrypt(Pkcs1v15Encrypt, data).map_err(|e| match e {
        rsa::Error::Decryption => CryptoError::KeyMismatch,
        _ => CryptoError::Rsa(RsaError::Decrypt),
    })
}

/// PKCS#1 v1.5 signature over the SHA-1 digest of `message`.
pub(crate) fn sign_pkcs1v15_sha1(private_key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let digest = Sha1::digest(message);

    private_key
        .inner()
        .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
        .map_err(|e| CryptoError::Rsa(RsaError::Sign(e)))
}

/// Verify a signature produced by [sign_pkcs1v15_sha1].
pub(crate) fn verify_pkcs1v15_sha1(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let digest = Sha1::digest(message);

    public_key
        .inner()
        .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, signature)
        .is_ok()
}
