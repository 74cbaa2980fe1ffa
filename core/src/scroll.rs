//! Program loader.
//!
//! A scroll is a sequence of big-endian 32-bit platters. Loading converts the
//! raw bytes into the initial contents of array 0.

use crate::Vec;
use crate::vm::Platter;

/// Errors that prevent a scroll from being loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("scroll is empty")]
    Empty,

    /// The byte length is not a whole number of platters.
    #[error("scroll length {len} is not a multiple of 4 bytes")]
    Misaligned { len: usize },
}

/// Decodes scroll bytes into platters, preserving order.
pub fn load(bytes: &[u8]) -> Result<Vec<Platter>, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }
    if bytes.len() % 4 != 0 {
        return Err(LoadError::Misaligned { len: bytes.len() });
    }

    let platters: Vec<Platter> = bytes
        .chunks_exact(4)
        .map(|chunk| Platter::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    tracing::debug!(platters = platters.len(), "loaded scroll");
    Ok(platters)
}

/// Encodes platters as scroll bytes.
pub fn to_bytes(platters: &[Platter]) -> Vec<u8> {
    platters.iter().flat_map(|p| p.to_be_bytes()).collect()
}
