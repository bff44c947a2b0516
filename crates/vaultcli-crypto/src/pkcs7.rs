//! PKCS#7 padding for the 16 byte AES block.

use crate::{CryptoError, Result};

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Pad `data` to a multiple of `block_size`.
///
/// A full block of padding is appended when the input is already aligned.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let pad_len = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strip the padding added by [pad].
///
/// Only the final byte is inspected, matching the payloads written by existing clients. A pad
/// length of zero strips nothing.
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8]> {
    let Some(&last) = data.last() else {
        return Err(CryptoError::InvalidPadding);
    };
    let pad_len = last as usize;
    if pad_len > block_size || pad_len > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    Ok(&data[..data.len() - pad_len])
}
