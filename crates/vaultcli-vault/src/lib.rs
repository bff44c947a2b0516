#![doc = include_str!("../README.md")]

mod card;
pub use card::Card;
mod error;
pub use error::VaultError;
mod file;
pub use file::{latin1, FileMeta, SecretBlob, SecretFile, DEFAULT_FILE_TYPE};
mod lookup;
pub use lookup::{find_or_create, NameIndex, Named};
mod secret;
pub use secret::{Secret, SecretData, SecretEdit, SecretType, SecretView};
mod vault;
pub use vault::Vault;
mod workspace;
pub use workspace::{Membership, Workspace};
