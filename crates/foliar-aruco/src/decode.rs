//! Marker bit sampling and decoding through a quad homography.

use foliar_core::{homography_from_4pt, GrayView};
use nalgebra::Point2;

use crate::threshold::otsu_threshold;

/// Parameters for reading bits out of a candidate quad.
#[derive(Clone, Debug)]
pub struct DecodeParams {
    /// Marker border width in cells.
    pub border_bits: usize,
    /// Fraction of the quad to ignore near its edges. The quad corners sit
    /// on the outer black border, so 0 samples the full marker.
    pub inset_frac: f32,
    /// Require border-black ratio >= this.
    pub min_border_score: f32,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            border_bits: 1,
            inset_frac: 0.0,
            min_border_score: 0.85,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Observation {
    /// Observed inner bits (row-major, black = 1).
    pub code: u64,
    pub border_score: f32,
    /// Whether polarity was inverted to maximize `border_score`.
    pub inverted: bool,
}

/// Subdivision of the threshold sampling grid relative to the cell grid.
const THRESH_SUBDIV: usize = 3;

/// Sample the cell grid of `corners` (TL, TR, BR, BL) and decode the code.
pub(crate) fn decode_quad(
    img: &GrayView<'_>,
    corners: &[Point2<f32>; 4],
    bits: usize,
    params: &DecodeParams,
) -> Option<Observation> {
    let border = params.border_bits;
    let cells = bits + 2 * border;
    if bits * bits > 64 || cells == 0 {
        return None;
    }

    let unit = [
        Point2::new(0.0f32, 0.0),
        Point2::new(1.0f32, 0.0),
        Point2::new(1.0f32, 1.0),
        Point2::new(0.0f32, 1.0),
    ];
    let h = homography_from_4pt(&unit, corners)?;

    let inset = params.inset_frac.clamp(0.0, 0.4);
    let start = inset;
    let span = 1.0 - 2.0 * inset;

    // Cell centers for bit classification.
    let step = span / cells as f32;
    let mut samples = Vec::with_capacity(cells * cells);
    for cy in 0..cells {
        for cx in 0..cells {
            let p = h.apply(Point2::new(
                start + (cx as f32 + 0.5) * step,
                start + (cy as f32 + 0.5) * step,
            ));
            samples.push(img.mean_3x3(p.x, p.y));
        }
    }

    // A denser grid just for the threshold estimate.
    let grid = cells * THRESH_SUBDIV;
    let tstep = span / grid as f32;
    let mut thr_samples = Vec::with_capacity(grid * grid);
    for ty in 0..grid {
        for tx in 0..grid {
            let p = h.apply(Point2::new(
                start + (tx as f32 + 0.5) * tstep,
                start + (ty as f32 + 0.5) * tstep,
            ));
            thr_samples.push(img.mean_3x3(p.x, p.y));
        }
    }

    decode_samples(
        &samples,
        otsu_threshold(&thr_samples),
        cells,
        bits,
        border,
        params.min_border_score,
    )
}

fn decode_samples(
    samples: &[u8],
    thr: u8,
    cells: usize,
    bits: usize,
    border: usize,
    min_border_score: f32,
) -> Option<Observation> {
    if samples.len() != cells * cells {
        return None;
    }

    let mut best: Option<Observation> = None;

    for inverted in [false, true] {
        let mut border_ok = 0u32;
        let mut border_total = 0u32;
        let mut code = 0u64;

        for cy in 0..cells {
            for cx in 0..cells {
                let v = samples[cy * cells + cx];
                let mut is_black = v < thr;
                if inverted {
                    is_black = !is_black;
                }

                let on_border = cx < border
                    || cy < border
                    || cx >= cells - border
                    || cy >= cells - border;
                if on_border {
                    border_total += 1;
                    if is_black {
                        border_ok += 1;
                    }
                } else {
                    let bx = cx - border;
                    let by = cy - border;
                    if is_black {
                        code |= 1u64 << (by * bits + bx);
                    }
                }
            }
        }

        let border_score = border_ok as f32 / border_total.max(1) as f32;
        if border_score < min_border_score {
            continue;
        }
        if best
            .as_ref()
            .map(|b| border_score > b.border_score)
            .unwrap_or(true)
        {
            best = Some(Observation {
                code,
                border_score,
                inverted,
            });
        }
    }

    best
}
