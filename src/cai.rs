//! Context Adaptive Interpolation: predicts one missing pixel from its four
//! neighbors, picking between a flat-region average, a horizontal-gradient
//! estimate, a vertical-gradient estimate, or the neighborhood median
//! depending on how much local contrast the neighbors show.

/// Threshold fixed by the spec: a region is "flat" when `max - min <= T`.
const THRESHOLD: i32 = 20;

/// Order statistics of four neighbor bytes.
///
/// `median` is the *lower* of the two middle order statistics: a free
/// choice among the two tolerated by the spec's invariant, picked here to
/// remove the sort-order-dependent nondeterminism the source had.
fn minmaxmedian(p: [u8; 4]) -> (u8, u8, u8) {
    let mut sorted = p;
    sorted.sort_unstable();
    (sorted[0], sorted[3], sorted[1])
}

fn absdiff(a: u8, b: u8) -> i32 {
    (a as i32 - b as i32).abs()
}

fn round_avg4(n: u8, e: u8, s: u8, w: u8) -> u8 {
    let sum = n as i32 + e as i32 + s as i32 + w as i32;
    ((sum + 2) / 4) as u8
}

fn round_avg2(a: u8, b: u8) -> u8 {
    ((a as i32 + b as i32 + 1) / 2) as u8
}

/// Predict one pixel from its four clockwise neighbors `(N, E, S, W)`.
pub fn interpolate(n: u8, e: u8, s: u8, w: u8) -> u8 {
    let (min, max, median) = minmaxmedian([n, e, s, w]);
    if (max - min) as i32 <= THRESHOLD {
        round_avg4(n, e, s, w)
    } else if absdiff(e, w) - absdiff(n, s) > THRESHOLD {
        round_avg2(n, s)
    } else if absdiff(n, s) - absdiff(e, w) > THRESHOLD {
        round_avg2(e, w)
    } else {
        median
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::{max, min};

    fn permutations_of_1234() -> Vec<[u8; 4]> {
        let base = [1u8, 2, 3, 4];
        let mut perms = Vec::new();
        let mut indices = [0, 1, 2, 3];
        // Heap's algorithm over 4 elements
        fn heap(k: usize, indices: &mut [usize; 4], out: &mut Vec<[u8; 4]>, base: &[u8; 4]) {
            if k == 1 {
                out.push([
                    base[indices[0]],
                    base[indices[1]],
                    base[indices[2]],
                    base[indices[3]],
                ]);
                return;
            }
            for i in 0..k {
                heap(k - 1, indices, out, base);
                if k % 2 == 0 {
                    indices.swap(i, k - 1);
                } else {
                    indices.swap(0, k - 1);
                }
            }
        }
        heap(4, &mut indices, &mut perms, &base);
        perms
    }

    #[test]
    fn minmaxmedian_over_all_permutations_of_1234() {
        for p in permutations_of_1234() {
            let (mn, mx, med) = minmaxmedian(p);
            assert_eq!(mn, 1);
            assert_eq!(mx, 4);
            assert!(med == 2 || med == 3);
        }
    }

    #[test]
    fn minmaxmedian_is_order_statistics() {
        let p = [7u8, 3, 9, 1];
        let (mn, mx, med) = minmaxmedian(p);
        assert_eq!(mn, *p.iter().min().unwrap());
        assert_eq!(mx, *p.iter().max().unwrap());
        let mut sorted = p;
        sorted.sort_unstable();
        assert!(med == sorted[1] || med == sorted[2]);
        assert!(min(mn, mx) <= med && med <= max(mn, mx));
    }

    #[test]
    fn flat_region_returns_rounded_average() {
        // all neighbors within THRESHOLD of each other
        assert_eq!(interpolate(100, 101, 99, 100), round_avg4(100, 101, 99, 100));
    }

    #[test]
    fn strong_horizontal_gradient_uses_vertical_neighbors() {
        // E/W very different, N/S close -> horizontal gradient dominates -> (N+S)/2
        let (n, e, s, w) = (50u8, 200u8, 52u8, 10u8);
        assert_eq!(interpolate(n, e, s, w), round_avg2(n, s));
    }

    #[test]
    fn strong_vertical_gradient_uses_horizontal_neighbors() {
        let (n, e, s, w) = (10u8, 80u8, 220u8, 82u8);
        assert_eq!(interpolate(n, e, s, w), round_avg2(e, w));
    }
}
