use serde::{Deserialize, Serialize};
use tracing::debug;
use vaultcli_crypto::{DataCypher, KeyDecryptable, KeyEncryptable, SaltedEnvelope};

use crate::{
    secret::{decrypt_json, encrypt_json},
    Secret, SecretType, VaultError,
};

/// MIME type used when the caller does not know better.
pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

/// Decrypted `blob_meta` of a file secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Original file name, as given by the uploader
    pub filename: String,
    /// Size of the decrypted content in bytes
    pub filesize: u64,
    /// MIME type
    #[serde(default)]
    pub filetype: String,
}

/// Encrypted file content together with its metadata, as uploaded to the secret blob endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SecretBlob {
    /// Encrypted `{"filedata": ...}` document
    pub blob_data: SaltedEnvelope,
    /// Encrypted [FileMeta]
    pub blob_meta: SaltedEnvelope,
}

/// Plaintext of the `blob_data` envelope.
#[derive(Serialize, Deserialize)]
struct FileData {
    filedata: String,
}

/// A decrypted attachment.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretFile {
    /// Name, size and MIME type of the file.
    pub meta: FileMeta,
    /// Raw file content.
    pub data: Vec<u8>,
}

impl SecretFile {
    /// Wrap raw file content, `filesize` is taken from `data`.
    pub fn new(filename: impl Into<String>, filetype: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            meta: FileMeta {
                filename: filename.into(),
                filesize: data.len() as u64,
                filetype: filetype.into(),
            },
            data,
        }
    }

    /// Decrypt a blob downloaded for a file secret.
    pub fn decrypt(blob: &SecretBlob, key: &DataCypher) -> Result<Self, VaultError> {
        let meta: FileMeta = decrypt_json(Some(&blob.blob_meta), key)?
            .ok_or(VaultError::MissingFileMeta)?;
        let data = decrypt_file_data(&blob.blob_data, key)?;

        if data.len() as u64 != meta.filesize {
            debug!(
                expected = meta.filesize,
                actual = data.len(),
                "File size does not match its metadata"
            );
        }

        Ok(Self { meta, data })
    }

    /// Encrypt the content and metadata for upload.
    pub fn encrypt(&self, key: &DataCypher) -> Result<SecretBlob, VaultError> {
        let blob_meta =
            encrypt_json(Some(&self.meta), key)?.ok_or(VaultError::MissingFileMeta)?;
        let blob_data = encrypt_file_data(&self.data, key)?;

        Ok(SecretBlob {
            blob_data,
            blob_meta,
        })
    }
}

// We manually implement these to make sure we don't print any sensitive data
impl std::fmt::Debug for SecretFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretFile")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl Secret {
    /// Decrypt the file attached to this secret from its downloaded `blob_data`.
    pub fn decrypt_file(
        &self,
        blob_data: &SaltedEnvelope,
        key: &DataCypher,
    ) -> Result<SecretFile, VaultError> {
        if self.r#type != SecretType::File {
            return Err(VaultError::NotAFile(self.r#type));
        }
        let blob_meta = self.blob_meta.clone().ok_or(VaultError::MissingFileMeta)?;

        SecretFile::decrypt(
            &SecretBlob {
                blob_data: blob_data.clone(),
                blob_meta,
            },
            key,
        )
    }
}

fn encrypt_file_data(data: &[u8], key: &DataCypher) -> Result<SaltedEnvelope, VaultError> {
    let json = serde_json::to_vec(&FileData {
        filedata: latin1::encode(data),
    })?;
    Ok(json.as_slice().encrypt_with_key(key)?)
}

fn decrypt_file_data(envelope: &SaltedEnvelope, key: &DataCypher) -> Result<Vec<u8>, VaultError> {
    let json: Vec<u8> = envelope.decrypt_with_key(key)?;
    let file: FileData = serde_json::from_slice(&json)?;
    latin1::decode(&file.filedata)
}

/// File content travels inside JSON as a string holding one latin-1 character per byte.
pub mod latin1 {
    use crate::VaultError;

    /// Map every byte to the character with the same code point.
    pub fn encode(data: &[u8]) -> String {
        data.iter().map(|&b| char::from(b)).collect()
    }

    /// Reverse of [encode]. Fails on characters above U+00FF.
    pub fn decode(text: &str) -> Result<Vec<u8>, VaultError> {
        text.chars()
            .enumerate()
            .map(|(i, c)| u8::try_from(c).map_err(|_| VaultError::InvalidLatin1(i)))
            .collect()
    }
}
