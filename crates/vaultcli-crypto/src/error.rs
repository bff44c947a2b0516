use thiserror::Error;

/// Errors produced by the crypto core.
///
/// None of these are transient, callers should report them and abort the current command.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Encrypted data is incorrect, cannot decrypt: {0}")]
    Format(#[from] FormatError),
    #[error("Input is not padded or padding is corrupt")]
    InvalidPadding,
    #[error("Wrong private key for this ciphertext, check your key file")]
    KeyMismatch,
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("Invalid key")]
    InvalidKey,
    #[error("Invalid key length, expected {expected} bytes but got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("Rsa error, {0:?}")]
    Rsa(#[from] RsaError),
}

/// The serialized form of a ciphertext could not be parsed.
#[allow(missing_docs)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid base64")]
    InvalidBase64,
    #[error("Missing `Salted__` marker")]
    MissingSaltMarker,
    #[error("Envelope is too short to contain a salt")]
    Truncated,
}

/// Decrypted data could not be turned into the requested representation.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Decrypted data is not valid UTF-8")]
    InvalidUtf8,
    #[error("Invalid JSON payload, {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum RsaError {
    #[error("Unable to parse private key")]
    ParsePrivateKey,
    #[error("Unable to parse public key")]
    ParsePublicKey,
    #[error("Unable to encrypt, {0}")]
    Encrypt(rsa::Error),
    #[error("Unable to decrypt")]
    Decrypt,
    #[error("Unable to sign, {0}")]
    Sign(rsa::Error),
}

/// Alias for `Result<T, CryptoError>`.
pub(crate) type Result<T, E = CryptoError> = std::result::Result<T, E>;
