use serde::{Deserialize, Serialize};
use vaultcli_crypto::WrappedWorkspaceKey;

use crate::VaultError;

/// Top level container. Every member gets their own copy of the workspace key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workspace {
    /// Server side id
    pub id: u64,
    /// URL friendly name, generated by the server
    #[serde(default)]
    pub slug: String,
    /// Display name
    pub name: String,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Present when the current user is a member
    #[serde(default)]
    pub membership: Option<Membership>,
}

/// Membership of the current user in a [Workspace].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Membership {
    /// Server side id of the membership
    #[serde(default)]
    pub id: Option<u64>,
    /// Workspace key wrapped for this member, empty until the workspace is shared
    #[serde(default)]
    pub workspace_key: Option<WrappedWorkspaceKey>,
}

impl Workspace {
    /// The workspace key wrapped for the current member.
    ///
    /// A workspace created by someone else has no key until it has been shared with us.
    pub fn workspace_key(&self) -> Result<&WrappedWorkspaceKey, VaultError> {
        self.membership
            .as_ref()
            .and_then(|m| m.workspace_key.as_ref())
            .filter(|k| !k.as_str().is_empty())
            .ok_or(VaultError::MissingWorkspaceKey(self.id))
    }
}
