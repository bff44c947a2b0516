use thiserror::Error;

use crate::SecretType;

/// Errors raised while converting between encrypted and decrypted models.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Crypto(#[from] vaultcli_crypto::CryptoError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error("Workspace {0} has no key for the current member")]
    MissingWorkspaceKey(u64),
    #[error("Secret is a {0}, not a file")]
    NotAFile(SecretType),
    #[error("Secret has no file attached")]
    MissingFileMeta,
    #[error("Sorry, but secret notes cannot handle URLs, usernames, passwords or files.")]
    NoteFields,
    #[error("File data contains a character outside of latin-1 at position {0}")]
    InvalidLatin1(usize),
}
