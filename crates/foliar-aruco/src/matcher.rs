//! Rotation-aware dictionary matching.

use crate::dictionary::{rotate_code, Dictionary};

/// A successful dictionary match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub id: u32,
    /// Rotation `0..=3` such that `observed == rotate(dict_code, rotation)`.
    pub rotation: u8,
    pub hamming: u8,
}

/// Matcher for a fixed dictionary.
///
/// Brute-force search over all ids and rotations. For dictionaries of this
/// size (tens of ids) that is faster than it sounds and avoids precomputing
/// a Hamming-ball lookup table.
#[derive(Clone, Debug)]
pub struct Matcher {
    dict: Dictionary,
    max_hamming: u8,
    rotated: Vec<[u64; 4]>,
}

impl Matcher {
    pub fn new(dict: Dictionary, max_hamming: u8) -> Self {
        let bits = dict.bit_count();
        assert!(
            bits <= 64,
            "marker_size {} implies {} bits > 64 (unsupported)",
            dict.marker_size,
            bits
        );

        let rotated = dict
            .codes
            .iter()
            .map(|&base| {
                [
                    base,
                    rotate_code(base, dict.marker_size, 1),
                    rotate_code(base, dict.marker_size, 2),
                    rotate_code(base, dict.marker_size, 3),
                ]
            })
            .collect();

        Self {
            dict,
            max_hamming,
            rotated,
        }
    }

    #[inline]
    pub fn dictionary(&self) -> Dictionary {
        self.dict
    }

    #[inline]
    pub fn max_hamming(&self) -> u8 {
        self.max_hamming
    }

    /// Find the best match within `max_hamming`, if any.
    pub fn match_code(&self, observed: u64) -> Option<Match> {
        let mut best: Option<Match> = None;

        for (id, rots) in self.rotated.iter().enumerate() {
            for (rot, &cand) in rots.iter().enumerate() {
                let h = (observed ^ cand).count_ones() as u8;
                if h > self.max_hamming {
                    continue;
                }
                if best.map(|b| h < b.hamming).unwrap_or(true) {
                    best = Some(Match {
                        id: id as u32,
                        rotation: rot as u8,
                        hamming: h,
                    });
                    if h == 0 {
                        return best;
                    }
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;

    #[test]
    fn finds_rotated_code() {
        let dict = builtins::FOLIAR_4X4_50;
        let matcher = Matcher::new(dict, 0);

        let observed = rotate_code(dict.codes[7], dict.marker_size, 3);
        let m = matcher.match_code(observed).expect("match");
        assert_eq!(m.id, 7);
        assert_eq!(m.rotation, 3);
        assert_eq!(m.hamming, 0);
    }

    #[test]
    fn corrects_a_single_bit_flip() {
        let dict = builtins::FOLIAR_4X4_50;
        let matcher = Matcher::new(dict, dict.max_correction_bits);

        let observed = dict.codes[13] ^ (1 << 5);
        let m = matcher.match_code(observed).expect("match");
        assert_eq!(m.id, 13);
        assert_eq!(m.hamming, 1);
    }

    #[test]
    fn rejects_codes_beyond_max_hamming() {
        let dict = builtins::FOLIAR_4X4_50;
        let matcher = Matcher::new(dict, 0);
        // Flip two bits of an id; with max_hamming 0 nothing may match.
        let observed = dict.codes[0] ^ 0b11;
        assert!(matcher.match_code(observed).is_none());
    }
}
