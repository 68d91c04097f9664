//! The keystream RNG shared by the encryptor, compressor, and decryptor.
//!
//! This is AES in counter mode with the salt as the initial 128-bit counter
//! block, incremented by one per 16-byte keystream block: exactly what the
//! `ctr` crate's big-endian counter mode does when the salt is passed as the
//! IV. Two capabilities are exposed: a raw byte-stream read, and a
//! bounded-integer draw used by the permutation protocol (§4.5). Both must
//! match the spec's construction exactly, byte for byte.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::{Aes128, Aes192, Aes256};
use ctr::Ctr128BE;

use crate::key::Key;

type Cipher128 = Ctr128BE<Aes128>;
type Cipher192 = Ctr128BE<Aes192>;
type Cipher256 = Ctr128BE<Aes256>;

/// A deterministic byte stream derived from `(key, salt)`.
pub struct Keystream {
    cipher: Box<dyn StreamCipher + Send>,
}

impl Keystream {
    /// Construct the keystream for a `(key, salt)` pair. `salt` is used
    /// directly as the initial CTR counter block.
    pub fn new(key: &Key, salt: &[u8; 16]) -> Self {
        let cipher: Box<dyn StreamCipher + Send> = match key {
            Key::Aes128(k) => Box::new(
                Cipher128::new_from_slices(k, salt).expect("key/iv sizes are fixed and valid"),
            ),
            Key::Aes192(k) => Box::new(
                Cipher192::new_from_slices(k, salt).expect("key/iv sizes are fixed and valid"),
            ),
            Key::Aes256(k) => Box::new(
                Cipher256::new_from_slices(k, salt).expect("key/iv sizes are fixed and valid"),
            ),
        };
        Self { cipher }
    }

    /// Fill `buf` with the next `buf.len()` keystream bytes.
    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        buf.fill(0);
        self.cipher
            .try_apply_keystream(buf)
            .expect("keystream never exhausts within a single image's byte budget");
    }

    /// Draw a uniformly distributed integer in `[0, n)`.
    ///
    /// Consumes exactly 8 keystream bytes, clears the top bit of the first
    /// one, assembles the remaining 63 bits big-endian, then reduces modulo
    /// `n`. Mask before assembly, not after.
    pub fn bounded(&mut self, n: u64) -> u64 {
        assert!(n >= 1, "bounded() requires n >= 1");
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        buf[0] &= 0x7f;
        u64::from_be_bytes(buf) % n
    }
}
