//! Lossy image compression that commutes with encryption.
//!
//! A sender encrypts a grayscale image under a secret key ([`encrypt`]); an
//! untrusted intermediary compresses the ciphertext without the key
//! ([`compress`]); a receiver decrypts and reconstructs an approximation of
//! the original ([`decrypt`]). The three roles never need to interact
//! online; each arrow below is an offline transform over a serializable
//! artifact:
//!
//! ```text
//! Image -> encrypt -> EncryptedImage -> compress -> CompressedImage -> decrypt -> Image
//! ```
//!
//! Compression is possible without the key because encryption masks pixels
//! additively rather than destroying the relationship between them: the two
//! kept pixels of each 2x2 block share one mask byte, so their difference is
//! invariant under masking and therefore compressible. See [`compress`] and
//! [`decrypt`] for the quantization and reconstruction steps respectively.

pub mod artifact;
pub mod cai;
pub mod compress;
pub mod decrypt;
pub mod encrypt;
pub mod entropy;
pub mod error;
pub mod key;
pub mod permute;
pub mod picture;
pub mod rng;

pub use artifact::{CompressedImage, EncryptedImage, Qtable};
pub use compress::compress;
pub use decrypt::decrypt;
pub use encrypt::{encrypt, OsSalt, SaltSource};
pub use error::{Error, Result};
pub use key::Key;
pub use picture::Image;
