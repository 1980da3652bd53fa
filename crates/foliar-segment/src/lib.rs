//! Green-region segmentation for foliar area measurement.
//!
//! The pipeline is fixed: smooth, classify pixels in HSV space, clean the
//! mask morphologically (close, then open; the order is part of the
//! contract), then accumulate external contour areas.

mod contours;
mod mask;

pub use contours::{contour_area, external_contours, total_area_px};
pub use mask::{clean_mask, green_mask, smooth, HsvTriple, SegmentParams};

use image::{GrayImage, RgbImage};
use log::debug;

/// Run the full segmentation: smooth, mask, clean.
///
/// The returned mask has the same dimensions as `img`; 255 marks pixels
/// inside the configured green range after cleanup.
pub fn segment_mask(img: &RgbImage, params: &SegmentParams) -> GrayImage {
    let smoothed = smooth(img, params.blur_sigma);
    let raw = green_mask(&smoothed, params);
    let cleaned = clean_mask(&raw, params.morph_radius);
    debug!(
        "segmentation: {} of {} pixels in range",
        cleaned.as_raw().iter().filter(|&&v| v > 0).count(),
        cleaned.as_raw().len()
    );
    cleaned
}
