//! Marker-based scale calibration.

use image::RgbImage;
use log::{debug, info};

use foliar_aruco::{builtins, MarkerDetection, MarkerDetector};

use crate::config::MeasurementConfig;

/// Outcome of scale calibration.
///
/// A missing marker is a normal outcome, not an error; the two cases are a
/// tagged variant so every caller handles the fallback path explicitly.
#[derive(Clone, Debug)]
pub enum ScaleCalibration {
    /// A marker was found; `scale_cm_per_px` converts pixel lengths to cm.
    Calibrated {
        scale_cm_per_px: f64,
        /// All decoded markers, in detection order. The first one produced
        /// the scale; the rest are reported for annotation only.
        markers: Vec<MarkerDetection>,
    },
    /// No marker found.
    Uncalibrated,
}

impl ScaleCalibration {
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        matches!(self, Self::Calibrated { .. })
    }

    /// The cm-per-pixel factor, if a marker was found.
    pub fn scale(&self) -> Option<f64> {
        match self {
            Self::Calibrated {
                scale_cm_per_px, ..
            } => Some(*scale_cm_per_px),
            Self::Uncalibrated => None,
        }
    }
}

/// Detect the calibration marker and derive the cm-per-pixel scale.
///
/// The scale comes from the first detection in detection order: the pixel
/// distance between two adjacent corners of that marker divides the known
/// physical side length. Additional markers do not refine the scale.
pub fn calibrate(img: &RgbImage, cfg: &MeasurementConfig) -> ScaleCalibration {
    let gray = image::imageops::grayscale(img);
    let detector = MarkerDetector::new(builtins::FOLIAR_4X4_50, cfg.detector.clone());
    let markers = detector.detect(&gray);

    let Some(first) = markers.first() else {
        debug!("calibration: no marker found");
        return ScaleCalibration::Uncalibrated;
    };

    let side_px = (first.corners[1] - first.corners[0]).norm() as f64;
    if side_px <= 0.0 {
        debug!("calibration: degenerate marker side, ignoring");
        return ScaleCalibration::Uncalibrated;
    }

    let scale = cfg.marker_side_cm / side_px;
    info!(
        "calibration: marker id {} side {:.1} px -> {:.5} cm/px",
        first.id, side_px, scale
    );
    ScaleCalibration::Calibrated {
        scale_cm_per_px: scale,
        markers,
    }
}
