//! The external entropy coder, treated as an opaque byte-to-byte codec
//! (spec §6). `zstd` is used here: its compressor is itself FSE/tANS-backed
//! internally, which makes it a faithful stand-in for the "Finite-State-
//! Entropy byte codec" the distilled spec names, without requiring any
//! framing of our own above it (grounded on `exefer-hakkit`'s
//! `compression/zstd.rs`, which wraps the same crate the same way).

use crate::error::{Error, Result};

/// Compress `src`, returning the encoded bytes.
pub fn encode(src: &[u8]) -> Result<Vec<u8>> {
    zstd::stream::encode_all(src, 0).map_err(Error::EntropyCodec)
}

/// Decompress `src` back to the original bytes.
pub fn decode(src: &[u8]) -> Result<Vec<u8>> {
    zstd::stream::decode_all(src).map_err(Error::EntropyCodec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let original: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let encoded = encode(&original).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn round_trips_empty_input() {
        let encoded = encode(&[]).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert!(decode(b"not a zstd frame").is_err());
    }
}
