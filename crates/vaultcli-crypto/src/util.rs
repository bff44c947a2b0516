use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{Rng, RngCore};
use zeroize::Zeroizing;

use crate::{envelope::SALT_LEN, FormatError};

/// Generate `len` random bytes from a cryptographically secure source
pub fn generate_random_bytes(len: usize) -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0u8; len]);
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

pub(crate) fn generate_salt() -> [u8; SALT_LEN] {
    rand::thread_rng().gen()
}

/// Standard base64 without line breaks.
pub(crate) fn encode_b64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64, ignoring embedded ASCII whitespace.
///
/// Wrapped keys uploaded by older clients carry a trailing newline.
pub(crate) fn decode_b64(data: &str) -> Result<Vec<u8>, FormatError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|_| FormatError::InvalidBase64)
}
