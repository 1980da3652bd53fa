//! Leaf surface area measurement from photographs.
//!
//! The pipeline isolates green pixels and converts the enclosed pixel area
//! to cm². When a square fiducial marker of known size is visible the
//! conversion uses a per-image scale derived from it; otherwise a
//! configured fallback density is assumed. Either way the caller gets the
//! numeric area plus an annotated copy of the image.
//!
//! ## Quickstart
//!
//! ```no_run
//! use foliar::{measure, MeasurementConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("leaf.jpg")?.to_rgb8();
//! let result = measure(&img, &MeasurementConfig::default())?;
//! println!(
//!     "{:.2} cm2 (calibrated: {})",
//!     result.area_cm2, result.calibrated
//! );
//! result.annotated.save("leaf_annotated.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`measure`]: the whole pipeline, one image in, one result out.
//! - [`calibrate`]: marker detection and scale derivation on its own.
//! - `foliar::aruco`: marker dictionary and detector.
//! - `foliar::segment`: HSV masking, morphology and contour areas.
//! - `foliar::core`: image views, homographies, logger.

pub use foliar_aruco as aruco;
pub use foliar_core as core;
pub use foliar_segment as segment;

mod annotate;
mod calibrate;
mod config;
mod measure;

pub use calibrate::{calibrate, ScaleCalibration};
pub use config::{AnnotationStyle, MeasurementConfig, DEFAULT_FALLBACK_DENSITY};
pub use measure::{measure, MeasureError, MeasurementResult};
