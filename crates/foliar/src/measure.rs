//! The measurement pipeline.

use image::RgbImage;
use log::info;
use thiserror::Error;

use foliar_segment::{external_contours, segment_mask, total_area_px};

use crate::annotate::annotate;
use crate::calibrate::{calibrate, ScaleCalibration};
use crate::config::MeasurementConfig;

/// Errors produced by [`measure`].
#[derive(Error, Debug)]
pub enum MeasureError {
    /// The input image has no pixels. Everything downstream assumes a
    /// non-empty image, so this fails fast instead of producing garbage.
    #[error("empty input image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// One completed measurement.
///
/// Created fresh per invocation and never mutated afterwards; whether it is
/// stored anywhere is the caller's business.
#[derive(Clone, Debug)]
pub struct MeasurementResult {
    /// Total green area, cm². Zero is a valid result (no green detected).
    pub area_cm2: f64,
    /// Whether the area came from a marker-derived scale or from the
    /// fallback density constant.
    pub calibrated: bool,
    /// Copy of the input with contours, markers and the area label drawn.
    pub annotated: RgbImage,
}

/// Measure the green area of `img`.
///
/// Runs calibration, segmentation and contour accumulation, then converts
/// pixels to cm²: quadratically through the marker scale when one was
/// found, linearly through the configured fallback density otherwise.
pub fn measure(img: &RgbImage, cfg: &MeasurementConfig) -> Result<MeasurementResult, MeasureError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(MeasureError::EmptyImage {
            width: img.width(),
            height: img.height(),
        });
    }

    let calibration = calibrate(img, cfg);

    let mask = segment_mask(img, &cfg.segment);
    let contours = external_contours(&mask);
    let area_px = total_area_px(&contours);

    let (area_cm2, calibrated) = match &calibration {
        ScaleCalibration::Calibrated {
            scale_cm_per_px, ..
        } => {
            // Area scales with the square of a linear factor.
            (area_px * scale_cm_per_px * scale_cm_per_px, true)
        }
        ScaleCalibration::Uncalibrated => (area_px * cfg.fallback_density_cm2_per_px, false),
    };

    info!(
        "measured {:.2} cm2 from {:.0} px2 across {} contours (calibrated: {})",
        area_cm2,
        area_px,
        contours.len(),
        calibrated
    );

    let annotated = annotate(img, &contours, &calibration, area_cm2, &cfg.annotation);

    Ok(MeasurementResult {
        area_cm2,
        calibrated,
        annotated,
    })
}
