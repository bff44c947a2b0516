use serde::{Deserialize, Serialize};

use crate::lookup::Named;

/// A vault inside a [Workspace](crate::Workspace), holding cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Server side id
    pub id: u64,
    /// URL friendly name, generated by the server
    #[serde(default)]
    pub slug: String,
    /// Display name, unique within the workspace
    pub name: String,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Label color shown by the web client
    #[serde(default)]
    pub color: Option<String>,
    /// Id of the parent workspace
    pub workspace: u64,
}

impl Named for Vault {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
