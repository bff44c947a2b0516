use crate::{CryptoError, DataCypher, SaltedEnvelope};

/// Types that can be encrypted into `Output` with a [DataCypher].
pub trait KeyEncryptable<Output> {
    /// Encrypt `self` with a data cypher.
    fn encrypt_with_key(self, key: &DataCypher) -> Result<Output, CryptoError>;
}

/// Types that can be decrypted into `Output` with a [DataCypher].
pub trait KeyDecryptable<Output> {
    /// Decrypt `self` with a data cypher.
    fn decrypt_with_key(&self, key: &DataCypher) -> Result<Output, CryptoError>;
}

impl KeyEncryptable<SaltedEnvelope> for &[u8] {
    fn encrypt_with_key(self, key: &DataCypher) -> Result<SaltedEnvelope, CryptoError> {
        key.encrypt_envelope(self)
    }
}

impl KeyEncryptable<SaltedEnvelope> for String {
    fn encrypt_with_key(self, key: &DataCypher) -> Result<SaltedEnvelope, CryptoError> {
        self.as_bytes().encrypt_with_key(key)
    }
}

impl KeyDecryptable<Vec<u8>> for SaltedEnvelope {
    fn decrypt_with_key(&self, key: &DataCypher) -> Result<Vec<u8>, CryptoError> {
        key.open(self)
    }
}

impl KeyDecryptable<String> for SaltedEnvelope {
    fn decrypt_with_key(&self, key: &DataCypher) -> Result<String, CryptoError> {
        let bytes: Vec<u8> = self.decrypt_with_key(key)?;
        String::from_utf8(bytes).map_err(|_| crate::EncodingError::InvalidUtf8.into())
    }
}

impl<T: KeyDecryptable<Output>, Output> KeyDecryptable<Option<Output>> for Option<T> {
    fn decrypt_with_key(&self, key: &DataCypher) -> Result<Option<Output>, CryptoError> {
        self.as_ref().map(|e| e.decrypt_with_key(key)).transpose()
    }
}

impl<T: KeyEncryptable<Output>, Output> KeyEncryptable<Option<Output>> for Option<T> {
    fn encrypt_with_key(self, key: &DataCypher) -> Result<Option<Output>, CryptoError> {
        self.map(|e| e.encrypt_with_key(key)).transpose()
    }
}
