//! # Workspace key wrapping
//!
//! A workspace key is never stored in the clear. [KeyWrap] abstracts how it is protected for a
//! member, with one implementation per scheme:
//!
//! - [AsymmetricWrap]: RSA PKCS#1 v1.5 under the member's public key. This is what the server
//!   stores in `membership.workspace_key`.
//! - [SymmetricWrap]: the data cypher envelope under a shared passphrase.
//!
//! The scheme is picked explicitly through [WrapScheme], usually from the configuration file.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    AsymmetricKeyPair, DataCypher, Result, WorkspaceCypher, WorkspaceKey, WrappedWorkspaceKey,
};

/// Protects workspace keys for storage on the server.
pub trait KeyWrap {
    /// Wrap a raw workspace key.
    fn wrap(&self, key: &WorkspaceKey) -> Result<WrappedWorkspaceKey>;

    /// Recover the raw workspace key.
    fn unwrap(&self, wrapped: &WrappedWorkspaceKey) -> Result<WorkspaceKey>;
}

/// Available [KeyWrap] schemes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapScheme {
    /// RSA key pair, see [AsymmetricWrap].
    #[default]
    Asymmetric,
    /// Shared passphrase, see [SymmetricWrap].
    Symmetric,
}

/// Wraps workspace keys under the user's RSA key pair.
#[derive(Clone, Debug)]
pub struct AsymmetricWrap {
    cypher: WorkspaceCypher,
}

impl AsymmetricWrap {
    /// Wrap workspace keys for the public half of `key_pair`.
    pub fn new(key_pair: AsymmetricKeyPair) -> Self {
        Self {
            cypher: WorkspaceCypher::new(key_pair),
        }
    }

    /// The underlying RSA cypher, also used for signing.
    pub fn cypher(&self) -> &WorkspaceCypher {
        &self.cypher
    }
}

impl From<WorkspaceCypher> for AsymmetricWrap {
    fn from(cypher: WorkspaceCypher) -> Self {
        Self { cypher }
    }
}

impl KeyWrap for AsymmetricWrap {
    fn wrap(&self, key: &WorkspaceKey) -> Result<WrappedWorkspaceKey> {
        Ok(self.cypher.encrypt(key.as_bytes())?.into())
    }

    fn unwrap(&self, wrapped: &WrappedWorkspaceKey) -> Result<WorkspaceKey> {
        Ok(self.cypher.decrypt(wrapped.as_str())?.into())
    }
}

/// Wraps workspace keys with the data cypher under a passphrase.
#[derive(Debug)]
pub struct SymmetricWrap {
    cypher: DataCypher,
}

impl SymmetricWrap {
    /// Wrap workspace keys under `passphrase`.
    pub fn new(passphrase: impl Into<Vec<u8>>) -> Self {
        Self {
            cypher: DataCypher::new(passphrase),
        }
    }
}

impl KeyWrap for SymmetricWrap {
    fn wrap(&self, key: &WorkspaceKey) -> Result<WrappedWorkspaceKey> {
        Ok(self.cypher.encrypt(key.as_bytes())?.into())
    }

    fn unwrap(&self, wrapped: &WrappedWorkspaceKey) -> Result<WorkspaceKey> {
        Ok(self.cypher.decrypt_bytes(wrapped.as_str())?.into())
    }
}

/// A [KeyWrap] selected at runtime from a [WrapScheme].
#[derive(Debug)]
pub enum KeyWrapper {
    /// [WrapScheme::Asymmetric]
    Asymmetric(AsymmetricWrap),
    /// [WrapScheme::Symmetric]
    Symmetric(SymmetricWrap),
}

impl KeyWrapper {
    /// Build the wrapper for `scheme` from the content of the user's key file.
    ///
    /// For [WrapScheme::Asymmetric] the material is a PEM private key, for
    /// [WrapScheme::Symmetric] it is the passphrase itself.
    #[instrument(skip(key_material), err)]
    pub fn from_scheme(scheme: WrapScheme, key_material: &str) -> Result<Self> {
        Ok(match scheme {
            WrapScheme::Asymmetric => Self::Asymmetric(AsymmetricWrap::new(
                AsymmetricKeyPair::from_private_pem(key_material)?,
            )),
            WrapScheme::Symmetric => Self::Symmetric(SymmetricWrap::new(key_material.trim_end())),
        })
    }

    /// The scheme this wrapper implements.
    pub fn scheme(&self) -> WrapScheme {
        match self {
            Self::Asymmetric(_) => WrapScheme::Asymmetric,
            Self::Symmetric(_) => WrapScheme::Symmetric,
        }
    }
}

impl KeyWrap for KeyWrapper {
    fn wrap(&self, key: &WorkspaceKey) -> Result<WrappedWorkspaceKey> {
        match self {
            Self::Asymmetric(w) => w.wrap(key),
            Self::Symmetric(w) => w.wrap(key),
        }
    }

    fn unwrap(&self, wrapped: &WrappedWorkspaceKey) -> Result<WorkspaceKey> {
        match self {
            Self::Asymmetric(w) => w.unwrap(wrapped),
            Self::Symmetric(w) => w.unwrap(wrapped),
        }
    }
}
