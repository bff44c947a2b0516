use std::fmt::Display;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use vaultcli_crypto::{
    CryptoError, Cypher, DataCypher, EncodingError, KeyDecryptable, KeyEncryptable, KeyWrap,
    SaltedEnvelope, WrappedWorkspaceKey,
};

use crate::{FileMeta, VaultError};

/// Kind of secret, serialized as the integer code used by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u16)]
pub enum SecretType {
    /// Free text only
    Note = 100,
    /// URL, username, password and note
    Password = 200,
    /// Like [SecretType::Password] with an attached file
    File = 300,
}

impl Display for SecretType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretType::Note => write!(f, "Note"),
            SecretType::Password => write!(f, "Password"),
            SecretType::File => write!(f, "File"),
        }
    }
}

/// A secret as stored on the server, `data` and `blob_meta` are encrypted with the workspace key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Secret {
    /// Server side id, absent before the first upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Note, password or file
    pub r#type: SecretType,
    /// Display name, stored in clear
    pub name: String,
    /// Encrypted [SecretData]
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<SaltedEnvelope>,
    /// Encrypted [FileMeta], file secrets only
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub blob_meta: Option<SaltedEnvelope>,
    /// Id of the parent card
    pub card: u64,
}

/// Decrypted form of a [Secret].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretView {
    /// See [Secret::id]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Note, password or file
    pub r#type: SecretType,
    /// See [Secret::name]
    pub name: String,
    /// Decrypted `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SecretData>,
    /// Decrypted `blob_meta`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_meta: Option<FileMeta>,
    /// See [Secret::card]
    pub card: u64,
}

/// Content of the encrypted `data` field.
///
/// Notes only carry `note`, passwords and files carry all four fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretData {
    /// Site the credentials are for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Login name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// The password itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SecretData {
    /// Normalize data for a secret of type `kind`.
    ///
    /// Notes drop everything except the note, other types get every field, missing ones
    /// set to an empty string.
    pub fn for_type(self, kind: SecretType) -> Self {
        match kind {
            SecretType::Note => SecretData {
                note: Some(self.note.unwrap_or_default()),
                ..Default::default()
            },
            SecretType::Password | SecretType::File => SecretData {
                url: Some(self.url.unwrap_or_default()),
                username: Some(self.username.unwrap_or_default()),
                password: Some(self.password.unwrap_or_default()),
                note: Some(self.note.unwrap_or_default()),
            },
        }
    }
}

/// Changes requested on an existing secret, `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct SecretEdit {
    /// New display name
    pub name: Option<String>,
    /// New [SecretData::url]
    pub url: Option<String>,
    /// New [SecretData::username]
    pub username: Option<String>,
    /// New [SecretData::password]
    pub password: Option<String>,
    /// New [SecretData::note]
    pub note: Option<String>,
}

impl SecretView {
    /// New secret in `card`, with `data` normalized for `kind`.
    pub fn new(card: u64, kind: SecretType, name: impl Into<String>, data: SecretData) -> Self {
        Self {
            id: None,
            r#type: kind,
            name: name.into(),
            data: Some(data.for_type(kind)),
            blob_meta: None,
            card,
        }
    }

    /// Apply `edit` in place. Notes reject anything but a name or a note.
    pub fn apply(&mut self, edit: SecretEdit) -> Result<(), VaultError> {
        if self.r#type == SecretType::Note
            && (edit.url.is_some() || edit.username.is_some() || edit.password.is_some())
        {
            return Err(VaultError::NoteFields);
        }

        if let Some(name) = edit.name {
            self.name = name;
        }

        let mut data = self.data.take().unwrap_or_default();
        data.url = edit.url.or(data.url);
        data.username = edit.username.or(data.username);
        data.password = edit.password.or(data.password);
        data.note = edit.note.or(data.note);
        self.data = Some(data.for_type(self.r#type));

        Ok(())
    }

    /// Encrypt with the workspace key wrapped in `workspace_key`.
    pub fn encrypt<W: KeyWrap>(
        self,
        cypher: &Cypher<W>,
        workspace_key: &WrappedWorkspaceKey,
    ) -> Result<Secret, VaultError> {
        let key = DataCypher::from_workspace_key(&cypher.unwrap_workspace_key(workspace_key)?);
        Ok(self.encrypt_with_key(&key)?)
    }
}

impl Secret {
    /// Decrypt with the workspace key wrapped in `workspace_key`.
    pub fn decrypt<W: KeyWrap>(
        &self,
        cypher: &Cypher<W>,
        workspace_key: &WrappedWorkspaceKey,
    ) -> Result<SecretView, VaultError> {
        let key = DataCypher::from_workspace_key(&cypher.unwrap_workspace_key(workspace_key)?);
        Ok(self.decrypt_with_key(&key)?)
    }
}

impl KeyEncryptable<Secret> for SecretView {
    fn encrypt_with_key(self, key: &DataCypher) -> Result<Secret, CryptoError> {
        Ok(Secret {
            id: self.id,
            r#type: self.r#type,
            name: self.name,
            data: encrypt_json(self.data.as_ref(), key)?,
            blob_meta: encrypt_json(self.blob_meta.as_ref(), key)?,
            card: self.card,
        })
    }
}

impl KeyDecryptable<SecretView> for Secret {
    fn decrypt_with_key(&self, key: &DataCypher) -> Result<SecretView, CryptoError> {
        Ok(SecretView {
            id: self.id,
            r#type: self.r#type,
            name: self.name.clone(),
            data: decrypt_json(self.data.as_ref(), key)?,
            blob_meta: decrypt_json(self.blob_meta.as_ref(), key)?,
            card: self.card,
        })
    }
}

pub(crate) fn encrypt_json<T: Serialize>(
    value: Option<&T>,
    key: &DataCypher,
) -> Result<Option<SaltedEnvelope>, CryptoError> {
    value
        .map(|v| -> Result<SaltedEnvelope, CryptoError> {
            let json = serde_json::to_vec(v).map_err(EncodingError::InvalidJson)?;
            json.as_slice().encrypt_with_key(key)
        })
        .transpose()
}

pub(crate) fn decrypt_json<T: DeserializeOwned>(
    envelope: Option<&SaltedEnvelope>,
    key: &DataCypher,
) -> Result<Option<T>, CryptoError> {
    envelope
        .map(|e| -> Result<T, CryptoError> {
            let json: Vec<u8> = e.decrypt_with_key(key)?;
            Ok(serde_json::from_slice(&json).map_err(EncodingError::InvalidJson)?)
        })
        .transpose()
}

/// The server sends an empty string instead of `null` for secrets without a payload.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<SaltedEnvelope>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
