//! The two persisted artifact kinds (spec §3 data model, §6 persisted
//! formats): [`EncryptedImage`] and [`CompressedImage`]. Both derive
//! `serde::{Serialize, Deserialize}` and are written to disk with `bincode`,
//! which is self-describing enough (field order, length-prefixed vectors) to
//! carry every field including the salt. Bit-exact on-disk compatibility with
//! any other implementation is not attempted (spec §6).

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Half the pixels of a padded grayscale image: the top-left and
/// bottom-right pixel of every 2x2 block, masked and permuted (spec §3, §4.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedImage {
    pub half: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub pad_w: bool,
    pub pad_h: bool,
    pub salt: [u8; 16],
}

/// Lookup from quantization bucket index to representative difference value
/// (spec §3, §4.3). Length is always `256 / quantization`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qtable(pub Vec<u8>);

impl Qtable {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The compressed half of a half-image: one pixel per block plus a
/// quantization table and entropy-coded bucket indices (spec §3, §4.3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedImage {
    pub quarter: Vec<u8>,
    pub qtable: Qtable,
    pub encoded_qdiffs: Vec<u8>,
    pub salt: [u8; 16],
    pub width: u32,
    pub height: u32,
    pub pad_w: bool,
    pub pad_h: bool,
}

impl EncryptedImage {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}

impl CompressedImage {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypted_image_round_trips_through_bincode() {
        let img = EncryptedImage {
            half: vec![1, 2, 3, 4, 5, 6],
            width: 4,
            height: 3,
            pad_w: false,
            pad_h: true,
            salt: [9u8; 16],
        };
        let bytes = bincode::serialize(&img).unwrap();
        let decoded: EncryptedImage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn compressed_image_round_trips_through_bincode() {
        let img = CompressedImage {
            quarter: vec![10, 20, 30],
            qtable: Qtable(vec![0, 16, 32, 48]),
            encoded_qdiffs: vec![0xde, 0xad, 0xbe, 0xef],
            salt: [1u8; 16],
            width: 4,
            height: 4,
            pad_w: false,
            pad_h: false,
        };
        let bytes = bincode::serialize(&img).unwrap();
        let decoded: CompressedImage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, img);
    }
}
