//! The compressor: quantizes the per-block pixel differences and
//! entropy-codes the resulting bucket indices (spec §4.3).
//!
//! No teacher precedent: the teacher repo has no compression stage, so this
//! module is built directly from the spec, using `entropy.rs` for the
//! black-box codec step.

use log::info;

use crate::artifact::{CompressedImage, EncryptedImage, Qtable};
use crate::entropy;
use crate::error::{Error, Result};

// distortions[v] accumulates the squared wrapped residual for candidate
// representative value v, widened to u64 so a whole image's worth of squared
// 8-bit residuals can't overflow.
#[cfg(not(feature = "parallel"))]
fn accumulate_distortions(diffs: &[u8], logq: u32, maskq: u8, q: u32) -> [u64; 256] {
    let mut distortions = [0u64; 256];
    for &v in diffs {
        let k = (v >> logq) as usize;
        for j in 0..q {
            let residual = v.wrapping_sub(j as u8) & maskq;
            let slot = (k << logq) + j as usize;
            distortions[slot] += (residual as u64).pow(2);
        }
    }
    distortions
}

#[cfg(feature = "parallel")]
fn accumulate_distortions(diffs: &[u8], logq: u32, maskq: u8, q: u32) -> [u64; 256] {
    use rayon::prelude::*;

    diffs
        .par_iter()
        .fold(
            || [0u64; 256],
            |mut distortions, &v| {
                let k = (v >> logq) as usize;
                for j in 0..q {
                    let residual = v.wrapping_sub(j as u8) & maskq;
                    let slot = (k << logq) + j as usize;
                    distortions[slot] += (residual as u64).pow(2);
                }
                distortions
            },
        )
        .reduce(
            || [0u64; 256],
            |mut a, b| {
                for i in 0..256 {
                    a[i] += b[i];
                }
                a
            },
        )
}

/// Compress `encrypted` at quantization level `q` (a power of two in
/// `[1, 128]`).
pub fn compress(encrypted: &EncryptedImage, q: u32) -> Result<CompressedImage> {
    if q == 0 || q > 128 || !q.is_power_of_two() {
        return Err(Error::InvalidQuantization(q));
    }
    let logq = q.trailing_zeros();
    let maskq: u8 = (q - 1) as u8;

    let half = &encrypted.half;
    let pairs = half.len() / 2;

    let diffs: Vec<u8> = (0..pairs)
        .map(|i| half[2 * i + 1].wrapping_sub(half[2 * i]))
        .collect();

    let distortions = accumulate_distortions(&diffs, logq, maskq, q);

    let table_len = (256 >> logq) as usize;
    let mut qtable = vec![0u8; table_len];
    for k in 0..table_len {
        let mut best_j = 0u32;
        let mut best_distortion = u64::MAX;
        for j in 0..q {
            let slot = (k << logq) + j as usize;
            if distortions[slot] < best_distortion {
                best_distortion = distortions[slot];
                best_j = j;
            }
        }
        qtable[k] = ((k << logq) as u32 + best_j) as u8;
    }

    let qdiffs: Vec<u8> = diffs.iter().map(|&v| v >> logq).collect();
    let quarter: Vec<u8> = (0..pairs).map(|i| half[2 * i]).collect();
    let encoded_qdiffs = entropy::encode(&qdiffs)?;

    info!(
        "compressed half-image of {} pairs at q={} -> quarter {} bytes, qdiffs encoded to {} bytes",
        pairs,
        q,
        quarter.len(),
        encoded_qdiffs.len()
    );

    Ok(CompressedImage {
        quarter,
        qtable: Qtable(qtable),
        encoded_qdiffs,
        salt: encrypted.salt,
        width: encrypted.width,
        height: encrypted.height,
        pad_w: encrypted.pad_w,
        pad_h: encrypted.pad_h,
    })
}
