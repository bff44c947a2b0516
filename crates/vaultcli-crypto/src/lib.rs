#![doc = include_str!("../README.md")]

mod auth;
pub use auth::{AuthChallenge, AuthRequest};
mod cypher;
pub use cypher::Cypher;
mod data_cypher;
pub use data_cypher::DataCypher;
mod envelope;
pub use envelope::{SaltedEnvelope, SALT_LEN, SALT_MARKER};
mod error;
pub(crate) use error::Result;
pub use error::{CryptoError, EncodingError, FormatError, RsaError};
mod kdf;
pub use kdf::{evp_bytes_to_key, DerivedKeyMaterial};
mod key_wrap;
pub use key_wrap::{AsymmetricWrap, KeyWrap, KeyWrapper, SymmetricWrap, WrapScheme};
mod keys;
pub use keys::*;
mod pkcs7;
pub use pkcs7::{pad, unpad, BLOCK_SIZE};
mod rsa;
mod traits;
pub use traits::{KeyDecryptable, KeyEncryptable};
mod util;
pub use util::generate_random_bytes;
mod workspace_cypher;
pub use workspace_cypher::WorkspaceCypher;

#[cfg(test)]
pub(crate) mod test_fixtures;
