mod common;

use approx::assert_relative_eq;
use common::synthetic::{field, paint_rect, render_marker, LEAF_GREEN, SOIL_BROWN};
use foliar::aruco::builtins::FOLIAR_4X4_50;
use foliar::segment::{external_contours, segment_mask, total_area_px};
use foliar::{calibrate, measure, MeasurementConfig, ScaleCalibration};
use image::Rgb;

#[test]
fn no_green_measures_zero_uncalibrated() {
    let img = field(160, 160, SOIL_BROWN);
    let result = measure(&img, &MeasurementConfig::default()).expect("measure");
    assert_eq!(result.area_cm2, 0.0);
    assert!(!result.calibrated);
}

#[test]
fn no_green_measures_zero_even_when_calibrated() {
    let mut img = field(200, 200, Rgb([128u8, 128, 128]));
    render_marker(&mut img, FOLIAR_4X4_50.codes[0], 4, 48, 10, 80, 80);

    let result = measure(&img, &MeasurementConfig::default()).expect("measure");
    assert!(result.calibrated, "marker should calibrate the scale");
    assert_eq!(result.area_cm2, 0.0);
}

#[test]
fn fallback_path_scales_pixel_area_exactly() {
    let mut img = field(200, 200, SOIL_BROWN);
    paint_rect(&mut img, 20, 20, 80, 60, LEAF_GREEN);

    let cfg = MeasurementConfig::default();
    let result = measure(&img, &cfg).expect("measure");
    assert!(!result.calibrated);

    // The reported value is exactly the contour pixel area times the
    // configured density.
    let mask = segment_mask(&img, &cfg.segment);
    let area_px = total_area_px(&external_contours(&mask));
    assert_eq!(result.area_cm2, area_px * cfg.fallback_density_cm2_per_px);

    // And the pixel area is the painted rectangle give or take the blur.
    let expected = 79.0 * 59.0;
    assert!(
        (area_px - expected).abs() < 0.15 * expected,
        "pixel area {area_px} too far from {expected}"
    );
}

#[test]
fn doubling_the_density_doubles_the_fallback_area() {
    let mut img = field(120, 120, SOIL_BROWN);
    paint_rect(&mut img, 30, 30, 40, 40, LEAF_GREEN);

    let cfg = MeasurementConfig::default();
    let mut doubled = cfg.clone();
    doubled.fallback_density_cm2_per_px *= 2.0;

    let a = measure(&img, &cfg).expect("measure").area_cm2;
    let b = measure(&img, &doubled).expect("measure").area_cm2;
    assert!(a > 0.0);
    assert_eq!(b, 2.0 * a);
}

#[test]
fn full_green_frame_without_marker_uses_fallback() {
    let mut img = field(200, 200, LEAF_GREEN);
    img.put_pixel(100, 100, Rgb([200u8, 30, 30]));

    let cfg = MeasurementConfig::default();
    let result = measure(&img, &cfg).expect("measure");
    assert!(!result.calibrated);

    // 200x200 px at the assumed 1/400 cm2/px is 100 cm2; the boundary
    // polygon and the smoothed-away stray pixel shave a little off.
    let expected = 200.0 * 200.0 * cfg.fallback_density_cm2_per_px;
    assert_relative_eq!(result.area_cm2, expected, max_relative = 0.05);
}

#[test]
fn marker_in_frame_calibrates_the_scale() {
    let mut img = field(200, 200, LEAF_GREEN);
    render_marker(&mut img, FOLIAR_4X4_50.codes[4], 4, 50, 10, 140, 140);

    let cfg = MeasurementConfig::default();
    let calibration = calibrate(&img, &cfg);
    match &calibration {
        ScaleCalibration::Calibrated {
            scale_cm_per_px,
            markers,
        } => {
            assert_eq!(markers[0].id, 4);
            // 5 cm over a 50 px side.
            assert_relative_eq!(*scale_cm_per_px, 0.1, max_relative = 0.05);
        }
        ScaleCalibration::Uncalibrated => panic!("marker not found"),
    }

    let result = measure(&img, &cfg).expect("measure");
    assert!(result.calibrated);
    assert!(result.area_cm2 > 0.0);
}

#[test]
fn calibrated_area_matches_the_known_scale() {
    // Green patch of known pixel size next to a marker of known pixel
    // side; the reported cm2 must equal the pixel area through the squared
    // scale.
    let mut img = field(220, 220, SOIL_BROWN);
    paint_rect(&mut img, 20, 20, 80, 60, LEAF_GREEN);
    render_marker(&mut img, FOLIAR_4X4_50.codes[11], 4, 48, 10, 140, 140);

    let cfg = MeasurementConfig::default();
    let result = measure(&img, &cfg).expect("measure");
    assert!(result.calibrated);

    let scale = calibrate(&img, &cfg).scale().expect("calibrated");
    let mask = segment_mask(&img, &cfg.segment);
    let area_px = total_area_px(&external_contours(&mask));
    let expected = area_px * scale * scale;
    assert!(
        (result.area_cm2 - expected).abs() < 1e-9,
        "got {} cm2, expected {expected}",
        result.area_cm2
    );

    // Sanity on the absolute value: ~4661 px2 at ~(5/47)^2 cm2/px2.
    assert!(result.area_cm2 > 30.0 && result.area_cm2 < 80.0);
}

#[test]
fn measurement_is_idempotent() {
    let mut img = field(180, 180, SOIL_BROWN);
    paint_rect(&mut img, 40, 50, 60, 50, LEAF_GREEN);
    render_marker(&mut img, FOLIAR_4X4_50.codes[7], 4, 36, 8, 120, 120);

    let cfg = MeasurementConfig::default();
    let first = measure(&img, &cfg).expect("measure");
    let second = measure(&img, &cfg).expect("measure");

    assert_eq!(first.area_cm2.to_bits(), second.area_cm2.to_bits());
    assert_eq!(first.calibrated, second.calibrated);
    assert_eq!(first.annotated.as_raw(), second.annotated.as_raw());
}

#[test]
fn annotated_output_differs_from_the_input() {
    let mut img = field(120, 120, SOIL_BROWN);
    paint_rect(&mut img, 30, 30, 50, 40, LEAF_GREEN);

    let result = measure(&img, &MeasurementConfig::default()).expect("measure");
    assert_ne!(result.annotated.as_raw(), img.as_raw());
    assert_eq!(result.annotated.dimensions(), img.dimensions());
}
