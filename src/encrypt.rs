//! The encryptor: masks each 2x2 block's diagonal pixels with a shared
//! keystream byte, keeps only those two diagonal pixels, and permutes the
//! resulting half-image (spec §4.2).
//!
//! Generalizes the teacher's `encrypt_image`
//! (`examples/andrei-toterman-image_encryption/src/lib.rs`): where the
//! teacher XORs and shuffles every whole pixel, this discards three of every
//! four pixels up front so the untrusted compressor downstream has something
//! to exploit, and masks with addition (not XOR) so the block's kept
//! difference is mask-invariant.

use log::info;
use rand::RngCore;

use crate::artifact::EncryptedImage;
use crate::key::Key;
use crate::permute::permute_pairs;
use crate::picture::Image;
use crate::rng::Keystream;

/// Produces a fresh 16-byte salt. Defaults to an OS-backed CSPRNG; tests
/// inject a constant closure instead (spec §9: no global mutable `genSalt`).
pub trait SaltSource {
    fn next_salt(&mut self) -> [u8; 16];
}

impl<F: FnMut() -> [u8; 16]> SaltSource for F {
    fn next_salt(&mut self) -> [u8; 16] {
        (self)()
    }
}

/// The default salt source: 16 bytes from the OS CSPRNG.
pub struct OsSalt;

impl SaltSource for OsSalt {
    fn next_salt(&mut self) -> [u8; 16] {
        let mut salt = [0u8; 16];
        rand::rngs::OsRng.fill_bytes(&mut salt);
        salt
    }
}

#[cfg(not(feature = "parallel"))]
fn mask_blocks(img: &Image, mask: &[u8], blocks_x: usize, blocks_y: usize) -> Vec<u8> {
    let w = img.width as usize;
    let mut half = vec![0u8; blocks_x * blocks_y * 2];
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block = by * blocks_x + bx;
            let m = mask[block];
            let tl = img.pixels[2 * by * w + 2 * bx];
            let br = img.pixels[(2 * by + 1) * w + 2 * bx + 1];
            half[2 * block] = tl.wrapping_add(m);
            half[2 * block + 1] = br.wrapping_add(m);
        }
    }
    half
}

#[cfg(feature = "parallel")]
fn mask_blocks(img: &Image, mask: &[u8], blocks_x: usize, blocks_y: usize) -> Vec<u8> {
    use rayon::prelude::*;

    let w = img.width as usize;
    let mut half = vec![0u8; blocks_x * blocks_y * 2];
    half.par_chunks_mut(2)
        .enumerate()
        .for_each(|(block, pair)| {
            let by = block / blocks_x;
            let bx = block % blocks_x;
            let m = mask[block];
            let tl = img.pixels[2 * by * w + 2 * bx];
            let br = img.pixels[(2 * by + 1) * w + 2 * bx + 1];
            pair[0] = tl.wrapping_add(m);
            pair[1] = br.wrapping_add(m);
        });
    half
}

/// Encrypt `img` under `key`, drawing a fresh salt from `salt_source`.
pub fn encrypt(img: &Image, key: &Key, salt_source: &mut impl SaltSource) -> EncryptedImage {
    let salt = salt_source.next_salt();
    let mut rng = Keystream::new(key, &salt);

    let w = img.width as usize;
    let h = img.height as usize;
    let blocks_x = w / 2;
    let blocks_y = h / 2;
    let pairs = blocks_x * blocks_y;

    let mut mask = vec![0u8; pairs];
    rng.fill_bytes(&mut mask);

    let mut half = mask_blocks(img, &mask, blocks_x, blocks_y);

    permute_pairs(&mut half, &mut rng);

    info!(
        "encrypted {}x{} image ({} blocks) -> half-image of {} bytes",
        img.width,
        img.height,
        pairs,
        half.len()
    );

    EncryptedImage {
        half,
        width: img.width,
        height: img.height,
        pad_w: img.pad_w,
        pad_h: img.pad_h,
        salt,
    }
}
