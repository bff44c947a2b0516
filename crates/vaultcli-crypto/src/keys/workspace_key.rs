use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::{util::generate_random_bytes, CryptoError};

/// Length of a newly generated workspace key in bytes.
pub const DEFAULT_WORKSPACE_KEY_SIZE: usize = 46;

/// Raw symmetric key of a single workspace.
///
/// The bytes are used as the passphrase of the [DataCypher](crate::DataCypher). They only live in
/// memory for the duration of one operation and are zeroized on drop.
#[derive(Clone)]
pub struct WorkspaceKey(Zeroizing<Vec<u8>>);

impl WorkspaceKey {
    /// Generate a new random key of `size` bytes.
    pub fn generate(size: usize) -> Self {
        Self(generate_random_bytes(size))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for WorkspaceKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl From<Zeroizing<Vec<u8>>> for WorkspaceKey {
    fn from(bytes: Zeroizing<Vec<u8>>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for WorkspaceKey {
    fn from(bytes: &[u8]) -> Self {
        Self(Zeroizing::new(bytes.to_vec()))
    }
}

impl PartialEq for WorkspaceKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for WorkspaceKey {}

// We manually implement these to make sure we don't print any sensitive data
impl std::fmt::Debug for WorkspaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceKey")
            .field("len", &self.0.len())
            .finish()
    }
}

/// A [WorkspaceKey] wrapped for one workspace member, as stored by the server in
/// `membership.workspace_key`.
///
/// The content is opaque base64 text, its meaning depends on the [KeyWrap](crate::KeyWrap)
/// scheme that produced it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrappedWorkspaceKey(String);

impl WrappedWorkspaceKey {
    /// The base64 text as stored on the server.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WrappedWorkspaceKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for WrappedWorkspaceKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_owned()))
    }
}

impl Display for WrappedWorkspaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for WrappedWorkspaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WrappedWorkspaceKey").field(&self.0).finish()
    }
}
