//! Square fiducial marker detection for scale calibration.
//!
//! This crate is focused on:
//! - an embedded 4x4 marker dictionary (compiled into the binary),
//! - rotation-aware matching against that dictionary,
//! - finding and decoding free-standing markers anywhere in a photograph.
//!
//! Markers follow the usual layout: a one-cell black border around an NxN
//! payload, bits stored row-major with **black = 1**. Detection walks dark
//! contours, fits candidate quads, samples the cell grid through a 4-point
//! homography and matches the observed code.

mod decode;
mod detector;
mod dictionary;
mod matcher;
mod quad;
mod threshold;

pub mod builtins;

pub use decode::DecodeParams;
pub use detector::{MarkerDetection, MarkerDetector, MarkerDetectorParams};
pub use dictionary::{rotate_code, Dictionary};
pub use matcher::{Match, Matcher};
