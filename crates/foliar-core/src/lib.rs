//! Core types and utilities for foliar area measurement.
//!
//! This crate is intentionally small: grayscale buffer views with the
//! sampling primitives the marker decoder needs, a 4-point homography
//! estimator, and a minimal logger. It does *not* depend on any concrete
//! image container or detector.

mod homography;
mod image;
mod logger;

pub use homography::{homography_from_4pt, Homography};
pub use image::{GrayView, GrayViewError};
pub use logger::init_with_level;
