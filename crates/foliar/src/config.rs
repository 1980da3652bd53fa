//! Measurement configuration.
//!
//! Everything the pipeline needs is carried here explicitly and passed in
//! at call time; there is no ambient process-wide state.

use foliar_aruco::MarkerDetectorParams;
use foliar_segment::SegmentParams;
use serde::{Deserialize, Serialize};

/// Assumed pixel density when no marker is present: 20 px/cm, i.e.
/// 1/400 cm² per pixel.
pub const DEFAULT_FALLBACK_DENSITY: f64 = 1.0 / (20.0 * 20.0);

/// Configuration of one measurement pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeasurementConfig {
    /// Physical side length of the calibration marker, in cm.
    pub marker_side_cm: f64,
    /// cm² per pixel assumed when no marker is detected.
    ///
    /// Note this is a global assumption while the marker scale is derived
    /// per image; the two are deliberately not reconciled.
    pub fallback_density_cm2_per_px: f64,
    /// Green segmentation parameters.
    pub segment: SegmentParams,
    /// Marker detection parameters. Not serialized; reconstructed from
    /// defaults on deserialization.
    #[serde(skip)]
    pub detector: MarkerDetectorParams,
    /// Annotation style.
    pub annotation: AnnotationStyle,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            marker_side_cm: 5.0,
            fallback_density_cm2_per_px: DEFAULT_FALLBACK_DENSITY,
            segment: SegmentParams::default(),
            detector: MarkerDetectorParams::default(),
            annotation: AnnotationStyle::default(),
        }
    }
}

/// Colors, stroke width and label placement for the annotated output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnotationStyle {
    /// Contour outline color (RGB).
    pub contour_color: [u8; 3],
    /// Marker outline and id color (RGB).
    pub marker_color: [u8; 3],
    /// Area label color (RGB).
    pub text_color: [u8; 3],
    /// Stroke radius of the contour overlay, in pixels.
    pub stroke_radius: i32,
    /// Top-left anchor of the area label.
    pub label_origin: (i32, i32),
    /// Label height in pixels.
    pub label_scale: f32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            contour_color: [0, 255, 0],
            marker_color: [0, 160, 255],
            text_color: [255, 40, 40],
            stroke_radius: 1,
            label_origin: (10, 10),
            label_scale: 24.0,
        }
    }
}
