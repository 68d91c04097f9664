//! The decryptor/reconstructor: entropy-decodes the compressed artifact,
//! undoes the keyed permutation, undoes the mask, and fills in the three
//! missing quarters of every 2x2 block with Context Adaptive Interpolation
//! (spec §4.4).
//!
//! Generalizes the teacher's `decrypt_image`
//! (`examples/andrei-toterman-image_encryption/src/lib.rs`): the teacher
//! inverts a whole-pixel permutation and XOR chain with nothing left to
//! reconstruct; here three of every four pixels were never transmitted, so
//! after undoing the permutation and mask this module also has to predict
//! them (§4.6).

use log::info;

use crate::artifact::CompressedImage;
use crate::cai::interpolate;
use crate::entropy;
use crate::error::Result;
use crate::key::Key;
use crate::permute::{block_permutation, unpermute};
use crate::picture::Image;
use crate::rng::Keystream;

#[derive(Debug, Clone, Copy, Default)]
struct Block {
    tl: u8,
    tr: u8,
    bl: u8,
    br: u8,
}

fn quadrants_for(
    blocks: &[Block],
    blocks_x: usize,
    blocks_y: usize,
    by: usize,
    bx: usize,
) -> (u8, u8) {
    let idx = by * blocks_x + bx;
    let tl = blocks[idx].tl;
    let br = blocks[idx].br;

    let n_tr = if by == 0 {
        br
    } else {
        blocks[(by - 1) * blocks_x + bx].br
    };
    let e_tr = if bx == blocks_x - 1 {
        tl
    } else {
        blocks[by * blocks_x + bx + 1].tl
    };
    let tr = interpolate(n_tr, e_tr, br, tl);

    let s_bl = if by == blocks_y - 1 {
        tl
    } else {
        blocks[(by + 1) * blocks_x + bx].tl
    };
    let w_bl = if bx == 0 {
        br
    } else {
        blocks[by * blocks_x + bx - 1].br
    };
    let bl = interpolate(tl, br, s_bl, w_bl);

    (tr, bl)
}

#[cfg(not(feature = "parallel"))]
fn reconstruct_quadrants(blocks: &mut [Block], blocks_x: usize, blocks_y: usize) {
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let idx = by * blocks_x + bx;
            let (tr, bl) = quadrants_for(blocks, blocks_x, blocks_y, by, bx);
            blocks[idx].tr = tr;
            blocks[idx].bl = bl;
        }
    }
}

#[cfg(feature = "parallel")]
fn reconstruct_quadrants(blocks: &mut [Block], blocks_x: usize, blocks_y: usize) {
    use rayon::prelude::*;

    let snapshot = blocks.to_vec();
    blocks.par_iter_mut().enumerate().for_each(|(idx, block)| {
        let by = idx / blocks_x;
        let bx = idx % blocks_x;
        let (tr, bl) = quadrants_for(&snapshot, blocks_x, blocks_y, by, bx);
        block.tr = tr;
        block.bl = bl;
    });
}

/// Decrypt and reconstruct `compressed` under `key`.
pub fn decrypt(compressed: &CompressedImage, key: &Key) -> Result<Image> {
    let blocks_x = (compressed.width / 2) as usize;
    let blocks_y = (compressed.height / 2) as usize;
    let pairs = blocks_x * blocks_y;

    let qdiffs = entropy::decode(&compressed.encoded_qdiffs)?;

    let blocks: Vec<Block> = (0..pairs)
        .map(|i| {
            let tl = compressed.quarter[i];
            let br = tl.wrapping_add(compressed.qtable.0[qdiffs[i] as usize]);
            Block {
                tl,
                br,
                tr: 0,
                bl: 0,
            }
        })
        .collect();

    let mut rng = Keystream::new(key, &compressed.salt);
    let mut mask = vec![0u8; pairs];
    rng.fill_bytes(&mut mask);

    let sigma = block_permutation(pairs, &mut rng);
    let mut blocks = unpermute(&blocks, &sigma);

    for (i, block) in blocks.iter_mut().enumerate() {
        block.tl = block.tl.wrapping_sub(mask[i]);
        block.br = block.br.wrapping_sub(mask[i]);
    }

    reconstruct_quadrants(&mut blocks, blocks_x, blocks_y);

    let mut pixels = vec![0u8; compressed.width as usize * compressed.height as usize];
    let w = compressed.width as usize;
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block = blocks[by * blocks_x + bx];
            pixels[2 * by * w + 2 * bx] = block.tl;
            pixels[2 * by * w + 2 * bx + 1] = block.tr;
            pixels[(2 * by + 1) * w + 2 * bx] = block.bl;
            pixels[(2 * by + 1) * w + 2 * bx + 1] = block.br;
        }
    }

    info!(
        "decrypted {}x{} image ({} blocks) from compressed artifact",
        compressed.width, compressed.height, pairs
    );

    Image::new(
        pixels,
        compressed.width,
        compressed.height,
    )
    .map(|mut img| {
        img.pad_w = compressed.pad_w;
        img.pad_h = compressed.pad_h;
        img
    })
}
