use serde::{Deserialize, Serialize};

use crate::lookup::Named;

/// A card groups related secrets inside a [Vault](crate::Vault).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Server side id
    pub id: u64,
    /// URL friendly name, generated by the server
    #[serde(default)]
    pub slug: String,
    /// Display name, unique within the vault
    pub name: String,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Id of the parent vault
    pub vault: u64,
}

impl Named for Card {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
