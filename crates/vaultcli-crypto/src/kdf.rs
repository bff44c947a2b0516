//! # Legacy passphrase key derivation
//!
//! OpenSSL's `EVP_BytesToKey` with MD5, as used by `openssl enc -md md5` and CryptoJS passphrase
//! encryption. Every stored payload was produced with it, so the output has to stay identical
//! byte for byte. Do not use it for anything new.

use md5::{Digest, Md5};
use zeroize::Zeroizing;

/// Size of a derivation word in bytes.
pub(crate) const WORD_SIZE: usize = 4;

/// Key and IV material produced by [evp_bytes_to_key].
pub struct DerivedKeyMaterial {
    key: Zeroizing<Vec<u8>>,
    iv: Zeroizing<Vec<u8>>,
}

impl DerivedKeyMaterial {
    /// Cipher key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Initialization vector bytes.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

// We manually implement these to make sure we don't print any sensitive data
impl std::fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKeyMaterial")
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}

/// Derive `key_words + iv_words` 32-bit words from a passphrase and salt.
///
/// Each round hashes the previous block (when there is one), the passphrase and the salt, then
/// rehashes the result `iterations - 1` more times. Blocks are concatenated until enough bytes
/// exist and the output is truncated to the requested length.
pub fn evp_bytes_to_key(
    passphrase: &[u8],
    salt: &[u8],
    key_words: usize,
    iv_words: usize,
    iterations: u32,
) -> DerivedKeyMaterial {
    let target_len = (key_words + iv_words) * WORD_SIZE;
    let mut derived = Zeroizing::new(Vec::with_capacity(target_len + Md5::output_size()));
    let mut block: Option<Zeroizing<Vec<u8>>> = None;

    while derived.len() < target_len {
        let mut hasher = Md5::new();
        if let Some(previous) = &block {
            hasher.update(previous.as_slice());
        }
        hasher.update(passphrase);
        hasher.update(salt);
        let mut digest = Zeroizing::new(hasher.finalize().to_vec());

        for _ in 1..iterations {
            digest = Zeroizing::new(Md5::digest(digest.as_slice()).to_vec());
        }

        derived.extend_from_slice(&digest);
        block = Some(digest);
    }

    derived.truncate(target_len);
    let iv = Zeroizing::new(derived.split_off(key_words * WORD_SIZE));

    DerivedKeyMaterial { key: derived, iv }
}
