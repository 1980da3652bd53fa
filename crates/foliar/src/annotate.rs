//! Annotated output rendering.

use std::sync::OnceLock;

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::contours::Contour;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use log::warn;

use crate::calibrate::ScaleCalibration;
use crate::config::AnnotationStyle;

static FONT: OnceLock<Option<FontRef<'static>>> = OnceLock::new();

fn label_font() -> Option<&'static FontRef<'static>> {
    FONT.get_or_init(|| {
        let font = FontRef::try_from_slice(include_bytes!("../resources/DejaVuSans.ttf"));
        if font.is_err() {
            warn!("embedded font failed to parse; area label will be omitted");
        }
        font.ok()
    })
    .as_ref()
}

/// Draw contours, markers and the area label on a copy of `img`.
pub(crate) fn annotate(
    img: &RgbImage,
    contours: &[Contour<i32>],
    calibration: &ScaleCalibration,
    area_cm2: f64,
    style: &AnnotationStyle,
) -> RgbImage {
    let mut out = img.clone();

    let contour_color = Rgb(style.contour_color);
    for contour in contours {
        for p in &contour.points {
            draw_filled_circle_mut(&mut out, (p.x, p.y), style.stroke_radius, contour_color);
        }
    }

    if let ScaleCalibration::Calibrated { markers, .. } = calibration {
        let marker_color = Rgb(style.marker_color);
        for m in markers {
            for i in 0..4 {
                let a = m.corners[i];
                let b = m.corners[(i + 1) % 4];
                draw_line_segment_mut(&mut out, (a.x, a.y), (b.x, b.y), marker_color);
            }
            if let Some(font) = label_font() {
                let cx = m.corners.iter().map(|c| c.x).sum::<f32>() / 4.0;
                let cy = m.corners.iter().map(|c| c.y).sum::<f32>() / 4.0;
                draw_text_mut(
                    &mut out,
                    marker_color,
                    cx as i32,
                    cy as i32,
                    PxScale::from(style.label_scale * 0.75),
                    font,
                    &format!("id={}", m.id),
                );
            }
        }
    }

    if let Some(font) = label_font() {
        let label = if calibration.is_calibrated() {
            format!("Area: {area_cm2:.2} cm2")
        } else {
            format!("Area (manual): {area_cm2:.2} cm2")
        };
        draw_text_mut(
            &mut out,
            Rgb(style.text_color),
            style.label_origin.0,
            style.label_origin.1,
            PxScale::from(style.label_scale),
            font,
            &label,
        );
    }

    out
}
