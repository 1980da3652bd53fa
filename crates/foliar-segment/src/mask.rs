//! Smoothing, HSV range masking and morphological cleanup.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{close, open};
use palette::{Hsv, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

/// An HSV bound: hue in degrees `[0, 360)`, saturation and value in
/// `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HsvTriple {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl HsvTriple {
    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// Segmentation parameters.
///
/// The defaults select the classic leaf-green band: hue 72°..172° with
/// saturation and value above ~10%, a blur equivalent to a 7x7 Gaussian
/// kernel, and a 5x5 structuring element for cleanup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentParams {
    /// Lower HSV bound of the green range.
    pub lower: HsvTriple,
    /// Upper HSV bound of the green range.
    pub upper: HsvTriple,
    /// Gaussian smoothing strength applied before masking.
    pub blur_sigma: f32,
    /// Chebyshev radius of the close/open structuring element
    /// (2 -> 5x5).
    pub morph_radius: u8,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            lower: HsvTriple::new(72.0, 25.0 / 255.0, 25.0 / 255.0),
            upper: HsvTriple::new(172.0, 1.0, 1.0),
            blur_sigma: 1.4,
            morph_radius: 2,
        }
    }
}

impl SegmentParams {
    /// Whether an HSV pixel falls inside the configured range.
    ///
    /// Hue wraps: a range with `lower.hue > upper.hue` crosses 0°.
    pub fn contains(&self, hue: f32, saturation: f32, value: f32) -> bool {
        let hue_ok = if self.lower.hue <= self.upper.hue {
            hue >= self.lower.hue && hue <= self.upper.hue
        } else {
            hue >= self.lower.hue || hue <= self.upper.hue
        };
        hue_ok
            && saturation >= self.lower.saturation
            && saturation <= self.upper.saturation
            && value >= self.lower.value
            && value <= self.upper.value
    }
}

/// Gaussian smoothing; reduces high-frequency color noise before
/// thresholding.
pub fn smooth(img: &RgbImage, sigma: f32) -> RgbImage {
    if sigma <= 0.0 {
        return img.clone();
    }
    gaussian_blur_f32(img, sigma)
}

/// Binary mask (255 = in range) of pixels inside the green HSV band.
pub fn green_mask(img: &RgbImage, params: &SegmentParams) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y).0;
        let hsv: Hsv = Srgb::new(
            p[0] as f32 / 255.0,
            p[1] as f32 / 255.0,
            p[2] as f32 / 255.0,
        )
        .into_color();
        let hue = hsv.hue.into_positive_degrees();
        if params.contains(hue, hsv.saturation, hsv.value) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Morphological cleanup: close (fills pinholes inside leaf regions),
/// then open (drops isolated speckle). The order must not be swapped.
pub fn clean_mask(mask: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    let closed = close(mask, Norm::LInf, radius);
    open(&closed, Norm::LInf, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const LEAF_GREEN: Rgb<u8> = Rgb([40u8, 200, 60]);

    #[test]
    fn green_is_in_default_range() {
        let params = SegmentParams::default();
        let img = RgbImage::from_pixel(4, 4, LEAF_GREEN);
        let mask = green_mask(&img, &params);
        assert!(mask.as_raw().iter().all(|&v| v == 255));
    }

    #[test]
    fn red_and_white_are_outside_default_range() {
        let params = SegmentParams::default();
        for px in [Rgb([200u8, 30, 30]), Rgb([255u8, 255, 255])] {
            let img = RgbImage::from_pixel(2, 2, px);
            let mask = green_mask(&img, &params);
            assert!(mask.as_raw().iter().all(|&v| v == 0), "{px:?} leaked in");
        }
    }

    #[test]
    fn hue_range_can_wrap_around_zero() {
        let params = SegmentParams {
            lower: HsvTriple::new(350.0, 0.2, 0.2),
            upper: HsvTriple::new(10.0, 1.0, 1.0),
            ..SegmentParams::default()
        };
        assert!(params.contains(355.0, 0.8, 0.8));
        assert!(params.contains(5.0, 0.8, 0.8));
        assert!(!params.contains(180.0, 0.8, 0.8));
    }

    #[test]
    fn clean_fills_pinholes_and_drops_speckle() {
        let mut mask = GrayImage::new(60, 60);
        for y in 20..40 {
            for x in 20..40 {
                mask.put_pixel(x, y, Luma([255u8]));
            }
        }
        // Pinhole inside the region, speckle far outside it.
        mask.put_pixel(30, 30, Luma([0u8]));
        mask.put_pixel(50, 10, Luma([255u8]));

        let cleaned = clean_mask(&mask, 2);
        assert_eq!(cleaned.get_pixel(30, 30)[0], 255, "pinhole not filled");
        assert_eq!(cleaned.get_pixel(50, 10)[0], 0, "speckle not removed");
        assert_eq!(cleaned.get_pixel(25, 25)[0], 255);
        assert_eq!(cleaned.get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn zero_radius_is_identity() {
        let mut mask = GrayImage::new(8, 8);
        mask.put_pixel(3, 3, Luma([255u8]));
        assert_eq!(clean_mask(&mask, 0).as_raw(), mask.as_raw());
    }
}
