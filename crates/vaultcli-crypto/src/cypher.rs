use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

use crate::{
    DataCypher, EncodingError, KeyWrap, Result, WorkspaceKey, WrappedWorkspaceKey,
};

/// # Cypher
///
/// Entry point for everything that touches secret payloads. A payload is always encrypted
/// with the workspace key, which is itself wrapped by `W` for the current member. Every
/// operation unwraps the key, uses it once and drops it.
///
/// ```
/// # use vaultcli_crypto::{Cypher, SymmetricWrap, CryptoError};
/// # fn main() -> Result<(), CryptoError> {
/// let cypher = Cypher::new(SymmetricWrap::new("passphrase"));
/// let wrapped = cypher.generate_wrapped_workspace_key(46)?;
///
/// let payload = cypher.encrypt(&wrapped, b"hello")?;
/// assert_eq!(cypher.decrypt_to_string(&wrapped, &payload)?, "hello");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cypher<W: KeyWrap> {
    wrap: W,
}

impl<W: KeyWrap> Cypher<W> {
    /// Build a façade over a key wrapping scheme.
    pub fn new(wrap: W) -> Self {
        Self { wrap }
    }

    /// The key wrapping scheme in use.
    pub fn key_wrap(&self) -> &W {
        &self.wrap
    }

    /// Recover the raw workspace key from its wrapped form.
    pub fn unwrap_workspace_key(&self, wrapped: &WrappedWorkspaceKey) -> Result<WorkspaceKey> {
        self.wrap.unwrap(wrapped)
    }

    /// Create a new random workspace key of `size` bytes, returned already wrapped.
    #[instrument(skip(self), err)]
    pub fn generate_wrapped_workspace_key(&self, size: usize) -> Result<WrappedWorkspaceKey> {
        let key = WorkspaceKey::generate(size);
        self.wrap.wrap(&key)
    }

    /// Decrypt a payload encrypted with the workspace key.
    #[instrument(skip_all, err)]
    pub fn decrypt(&self, wrapped: &WrappedWorkspaceKey, payload: &str) -> Result<Vec<u8>> {
        let cypher = self.data_cypher(wrapped)?;
        cypher.decrypt_bytes(payload)
    }

    /// Decrypt a payload and interpret it as UTF-8 text.
    pub fn decrypt_to_string(&self, wrapped: &WrappedWorkspaceKey, payload: &str) -> Result<String> {
        let cypher = self.data_cypher(wrapped)?;
        cypher.decrypt(payload)
    }

    /// Encrypt `plaintext` with the workspace key and return the base64 envelope.
    #[instrument(skip_all, err)]
    pub fn encrypt(&self, wrapped: &WrappedWorkspaceKey, plaintext: &[u8]) -> Result<String> {
        let cypher = self.data_cypher(wrapped)?;
        cypher.encrypt(plaintext)
    }

    /// Serialize `value` as JSON and encrypt it.
    pub fn encrypt_json<T: Serialize + ?Sized>(
        &self,
        wrapped: &WrappedWorkspaceKey,
        value: &T,
    ) -> Result<String> {
        let json = serde_json::to_vec(value).map_err(EncodingError::InvalidJson)?;
        self.encrypt(wrapped, &json)
    }

    /// Decrypt a payload holding a JSON document and deserialize it.
    pub fn decrypt_json<T: DeserializeOwned>(
        &self,
        wrapped: &WrappedWorkspaceKey,
        payload: &str,
    ) -> Result<T> {
        let json = self.decrypt(wrapped, payload)?;
        Ok(serde_json::from_slice(&json).map_err(EncodingError::InvalidJson)?)
    }

    fn data_cypher(&self, wrapped: &WrappedWorkspaceKey) -> Result<DataCypher> {
        let key = self.unwrap_workspace_key(wrapped)?;
        debug!(len = key.len(), "Unwrapped workspace key");
        Ok(DataCypher::from_workspace_key(&key))
    }
}
