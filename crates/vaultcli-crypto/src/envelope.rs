use std::{fmt::Display, str::FromStr};

use serde::{de::Visitor, Deserialize, Serialize};

use crate::{
    util::{decode_b64, encode_b64},
    CryptoError, FormatError,
};

/// Literal prefix of every serialized envelope.
pub const SALT_MARKER: &[u8; 8] = b"Salted__";
/// Length of the random KDF salt.
pub const SALT_LEN: usize = 8;

/// # Salted envelope
///
/// Serialized form of every encrypted payload, compatible with `openssl enc`:
///
/// ```text
/// base64("Salted__" || salt[8] || ciphertext)
/// ```
///
/// The salt feeds the key derivation, the ciphertext is AES-256-CBC over the PKCS#7 padded
/// plaintext. Serialized as a base64 string, which always starts with `U2FsdGVk`.
#[derive(Clone, PartialEq, Eq)]
pub struct SaltedEnvelope {
    salt: [u8; SALT_LEN],
    ciphertext: Vec<u8>,
}

impl SaltedEnvelope {
    pub(crate) fn new(salt: [u8; SALT_LEN], ciphertext: Vec<u8>) -> Self {
        Self { salt, ciphertext }
    }

    /// The 8 byte salt following the marker.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Everything after the salt.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Parse the raw (base64 decoded) envelope bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
        let rest = data
            .strip_prefix(SALT_MARKER.as_slice())
            .ok_or(FormatError::MissingSaltMarker)?;
        if rest.len() < SALT_LEN {
            return Err(FormatError::Truncated);
        }
        let (salt, ciphertext) = rest.split_at(SALT_LEN);

        let mut salt_bytes = [0u8; SALT_LEN];
        salt_bytes.copy_from_slice(salt);
        Ok(Self::new(salt_bytes, ciphertext.to_vec()))
    }

    /// Raw envelope bytes, marker included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SALT_MARKER.len() + SALT_LEN + self.ciphertext.len());
        bytes.extend_from_slice(SALT_MARKER);
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }
}

impl FromStr for SaltedEnvelope {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_b64(s)?;
        Ok(Self::from_bytes(&bytes)?)
    }
}

impl Display for SaltedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", encode_b64(&self.to_bytes()))
    }
}

impl std::fmt::Debug for SaltedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaltedEnvelope")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

impl<'de> Deserialize<'de> for SaltedEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(EnvelopeVisitor)
    }
}

struct EnvelopeVisitor;

impl Visitor<'_> for EnvelopeVisitor {
    type Value = SaltedEnvelope;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "a base64 encoded salted envelope")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        SaltedEnvelope::from_str(v).map_err(|e| E::custom(format!("{e}")))
    }
}

impl Serialize for SaltedEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
