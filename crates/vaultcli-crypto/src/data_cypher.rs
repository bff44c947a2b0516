//! # Data cypher
//!
//! Encrypts secret payloads under a raw workspace key.
//!
//! The workspace key is used as a passphrase: a fresh 8 byte salt and the key go through the
//! legacy MD5 KDF, which yields 48 bytes. The last 16 bytes are the IV and the first 32 the
//! AES-256-CBC key. The padded ciphertext is stored in a [SaltedEnvelope].

use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use tracing::instrument;
use zeroize::Zeroizing;

use crate::{
    envelope::{SaltedEnvelope, SALT_LEN},
    evp_bytes_to_key,
    kdf::WORD_SIZE,
    pkcs7::{pad, unpad, BLOCK_SIZE},
    util::generate_salt,
    CryptoError, EncodingError, Result, WorkspaceKey,
};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Words requested from the KDF, key and IV are both cut from this output.
const DERIVED_WORDS: usize = 12;
const IV_LEN: usize = 16;

/// Symmetric payload cypher bound to one passphrase, normally a [WorkspaceKey].
pub struct DataCypher {
    passphrase: Zeroizing<Vec<u8>>,
}

impl DataCypher {
    /// Create a cypher using arbitrary bytes as the passphrase.
    pub fn new(passphrase: impl Into<Vec<u8>>) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.into()),
        }
    }

    /// Create a cypher for the payloads of a workspace.
    pub fn from_workspace_key(key: &WorkspaceKey) -> Self {
        Self::new(key.as_bytes())
    }

    /// Encrypt `plaintext` with a random salt and return the base64 envelope.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        Ok(self.encrypt_envelope(plaintext)?.to_string())
    }

    /// Encrypt `plaintext` with a random salt, the counterpart of [Self::open].
    #[instrument(skip_all, err)]
    pub fn encrypt_envelope(&self, plaintext: &[u8]) -> Result<SaltedEnvelope> {
        self.seal(plaintext, generate_salt())
    }

    /// Decrypt a base64 envelope and return the plaintext as UTF-8 text.
    ///
    /// Binary payloads must go through [Self::decrypt_bytes] instead.
    pub fn decrypt(&self, encrypted: &str) -> Result<String> {
        let plaintext = self.decrypt_bytes(encrypted)?;
        String::from_utf8(plaintext).map_err(|_| EncodingError::InvalidUtf8.into())
    }

    /// Decrypt a base64 envelope and return the raw plaintext bytes.
    #[instrument(skip_all, err)]
    pub fn decrypt_bytes(&self, encrypted: &str) -> Result<Vec<u8>> {
        let envelope: SaltedEnvelope = encrypted.parse()?;
        self.open(&envelope)
    }

    /// Encrypt `plaintext` into an envelope using the given salt.
    pub(crate) fn seal(&self, plaintext: &[u8], salt: [u8; SALT_LEN]) -> Result<SaltedEnvelope> {
        let (key, iv) = self.derive(&salt);
        let padded = Zeroizing::new(pad(plaintext, BLOCK_SIZE));

        let ciphertext = Aes256CbcEnc::new_from_slices(&key[..], &iv[..])
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: 32,
                actual: key.len(),
            })?
            .encrypt_padded_vec_mut::<NoPadding>(&padded);

        Ok(SaltedEnvelope::new(salt, ciphertext))
    }

    /// Decrypt an already parsed envelope.
    pub fn open(&self, envelope: &SaltedEnvelope) -> Result<Vec<u8>> {
        let (key, iv) = self.derive(envelope.salt());

        let decrypted = Zeroizing::new(
            Aes256CbcDec::new_from_slices(&key[..], &iv[..])
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: 32,
                    actual: key.len(),
                })?
                .decrypt_padded_vec_mut::<NoPadding>(envelope.ciphertext())
                .map_err(|_| CryptoError::InvalidPadding)?,
        );

        Ok(unpad(&decrypted, BLOCK_SIZE)?.to_vec())
    }

    /// Cipher key and IV for `salt`: `iv = raw[32..48]`, `key = raw[0..32]`.
    fn derive(&self, salt: &[u8]) -> (Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>) {
        let derived = evp_bytes_to_key(&self.passphrase, salt, DERIVED_WORDS, 0, 1);
        let raw = derived.key();
        debug_assert_eq!(raw.len(), DERIVED_WORDS * WORD_SIZE);

        let (key, iv) = raw.split_at(raw.len() - IV_LEN);
        (Zeroizing::new(key.to_vec()), Zeroizing::new(iv.to_vec()))
    }
}

// We manually implement these to make sure we don't print any sensitive data
impl std::fmt::Debug for DataCypher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCypher").finish_non_exhaustive()
    }
}
