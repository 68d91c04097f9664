//! Library-wide error and result types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong building, compressing, or reading back an
/// encrypted image.
///
/// There is deliberately no "wrong key" variant: decrypting with the wrong
/// key produces garbage pixels, not an error (see spec §7: no integrity
/// check on ciphertext).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid image data: expected {expected} bytes, got {actual}")]
    InvalidImageData { expected: usize, actual: usize },

    #[error("invalid quantization level {0}: must be a power of two in [1, 128]")]
    InvalidQuantization(u32),

    #[error("entropy codec failure")]
    EntropyCodec(#[source] std::io::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("invalid key size {0}: binary keys must be 16, 24, or 32 bytes")]
    BadKeySize(usize),

    #[error("image error")]
    Image(#[from] image::ImageError),

    #[error("serialization error")]
    Serialization(#[from] bincode::Error),
}
