//! The keyed block permutation shared by the encryptor and the decryptor.
//!
//! Generalizes the teacher's `permutation.shuffle(&mut rng)` /
//! `inv_permutation` pair (`examples/andrei-toterman-image_encryption`) from a
//! whole-pixel Fisher-Yates shuffle to a 2x2-block-at-a-time shuffle over the
//! half-image's diagonal pixel pairs.
//!
//! The decryption-side inverse replays the encryptor's draw sequence over an
//! index array rather than the pixel bytes (see DESIGN.md for why).

use crate::rng::Keystream;

/// Permute `half` (laid out as `pairs` adjacent 2-byte units) in place,
/// consuming one `bounded(remaining_pairs)` draw per swap.
///
/// Encryption-side algorithm (§4.5): for each position, draw a block index
/// among the pairs not yet fixed, swap that pair into the current head
/// position, then advance past it.
pub fn permute_pairs(half: &mut [u8], rng: &mut Keystream) {
    assert!(half.len() % 2 == 0, "half-image must hold whole pairs");
    let mut remaining = half.len() / 2;
    let mut offset = 0usize;
    while remaining > 1 {
        let n = rng.bounded(remaining as u64) as usize * 2;
        half.swap(offset, offset + n);
        half.swap(offset + 1, offset + n + 1);
        offset += 2;
        remaining -= 1;
    }
}

/// Replay the same draw sequence `permute_pairs` would consume over `pairs`
/// byte-pairs, but on an index array, yielding `sigma` such that
/// `permuted[k] == original[sigma[k]]` for every `k`.
pub fn block_permutation(pairs: usize, rng: &mut Keystream) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..pairs).collect();
    let mut offset = 0usize;
    let mut remaining = pairs;
    while remaining > 1 {
        let n = rng.bounded(remaining as u64) as usize;
        indices.swap(offset, offset + n);
        offset += 1;
        remaining -= 1;
    }
    indices
}

/// Invert `sigma` against `permuted`, producing the original order:
/// `original[sigma[k]] = permuted[k]`.
pub fn unpermute<T: Clone>(permuted: &[T], sigma: &[usize]) -> Vec<T> {
    assert_eq!(permuted.len(), sigma.len());
    let mut original = permuted.to_vec();
    for (k, &j) in sigma.iter().enumerate() {
        original[j] = permuted[k].clone();
    }
    original
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;

    #[test]
    fn permute_then_unpermute_on_arbitrary_payload_round_trips() {
        let original = b"Do I look like half an image to you?".to_vec();
        assert_eq!(original.len() % 2, 0);
        let key = Key::from_bytes(b"0123456789abcdef").unwrap();
        let salt = [7u8; 16];
        let pairs = original.len() / 2;

        let mut permuted = original.clone();
        let mut enc_rng = Keystream::new(&key, &salt);
        permute_pairs(&mut permuted, &mut enc_rng);
        assert_ne!(permuted, original);

        let mut dec_rng = Keystream::new(&key, &salt);
        let sigma = block_permutation(pairs, &mut dec_rng);

        let permuted_pairs: Vec<[u8; 2]> = permuted.chunks(2).map(|c| [c[0], c[1]]).collect();
        let original_pairs: Vec<[u8; 2]> = unpermute(&permuted_pairs, &sigma);
        let recovered: Vec<u8> = original_pairs.into_iter().flatten().collect();

        assert_eq!(recovered, original);
    }

    #[test]
    fn single_block_is_a_no_op() {
        let key = Key::from_bytes(&[0u8; 16]).unwrap();
        let salt = [0u8; 16];
        let mut half = [1u8, 2u8];
        let mut rng = Keystream::new(&key, &salt);
        permute_pairs(&mut half, &mut rng);
        assert_eq!(half, [1u8, 2u8]);
    }
}
