//! External contour extraction and pixel-area accumulation.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;

/// External (outer) contours of the mask's nonzero regions.
///
/// Hole contours are dropped: enclosed background does not reduce the
/// measured area, matching the external-retrieval contour semantics of the
/// measurement contract.
pub fn external_contours(mask: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .collect()
}

/// Shoelace area of a closed boundary polygon, in pixel units.
///
/// Boundary points are pixel centers, so a w x h rectangle of mask pixels
/// measures (w-1)*(h-1); degenerate contours (single pixels, lines)
/// measure 0.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        acc += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    acc.abs() / 2.0
}

/// Total enclosed area of every external contour. Disjoint regions all
/// count; an empty mask yields 0.
pub fn total_area_px(contours: &[Contour<i32>]) -> f64 {
    contours.iter().map(|c| contour_area(&c.points)).sum()
}
