//! Candidate quad finding.
//!
//! Markers carry a black border, so candidates are external contours of the
//! dark side of a global Otsu split. Corners are assigned by geometric
//! position; a contour qualifies only if it actually fills its corner quad
//! like a solid square.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;
use nalgebra::Point2;

use crate::threshold::otsu_threshold;

#[derive(Clone, Debug)]
pub(crate) struct QuadCandidate {
    /// Image-space corners, ordered TL, TR, BR, BL.
    pub corners: [Point2<f32>; 4],
}

/// Find candidate quads in scan order of their contours.
pub(crate) fn find_marker_candidates(
    gray: &GrayImage,
    min_side_px: f32,
    max_side_px: f32,
    min_fill: f32,
) -> Vec<QuadCandidate> {
    let thr = otsu_threshold(gray.as_raw());
    let dark = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] < thr {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    let mut out = Vec::new();
    for contour in find_contours::<i32>(&dark) {
        if contour.border_type != BorderType::Outer || contour.points.len() < 4 {
            continue;
        }
        let corners = corner_quad(&contour.points);
        let (shortest, longest) = side_extremes(&corners);
        if shortest < min_side_px || longest > max_side_px || !is_convex(&corners) {
            continue;
        }

        // A marker blob fills its corner quad; ragged or round blobs do not.
        let quad = quad_area(&corners);
        if quad <= 0.0 {
            continue;
        }
        let ratio = contour_area(&contour.points) / quad;
        if ratio < min_fill as f64 || ratio > 1.0 / min_fill as f64 {
            continue;
        }

        out.push(QuadCandidate { corners });
    }
    out
}

/// Corner assignment by geometric position, image coordinates (y down):
/// TL = min(x+y), TR = max(x-y), BR = max(x+y), BL = min(x-y).
fn corner_quad(points: &[Point<i32>]) -> [Point2<f32>; 4] {
    let mut tl = points[0];
    let mut tr = points[0];
    let mut br = points[0];
    let mut bl = points[0];
    for &p in points {
        if p.x + p.y < tl.x + tl.y {
            tl = p;
        }
        if p.x - p.y > tr.x - tr.y {
            tr = p;
        }
        if p.x + p.y > br.x + br.y {
            br = p;
        }
        if p.x - p.y < bl.x - bl.y {
            bl = p;
        }
    }
    [tl, tr, br, bl].map(|p| Point2::new(p.x as f32, p.y as f32))
}

fn side_extremes(corners: &[Point2<f32>; 4]) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = 0.0f32;
    for i in 0..4 {
        let d = (corners[(i + 1) % 4] - corners[i]).norm();
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

fn is_convex(corners: &[Point2<f32>; 4]) -> bool {
    let mut sign = 0.0f32;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let c = corners[(i + 2) % 4];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

fn quad_area(corners: &[Point2<f32>; 4]) -> f64 {
    let mut acc = 0.0f64;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        acc += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    acc.abs() / 2.0
}

fn contour_area(points: &[Point<i32>]) -> f64 {
    let mut acc = 0.0f64;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        acc += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    acc.abs() / 2.0
}
