//! End-to-end marker detection on grayscale images.

use std::collections::HashMap;

use image::GrayImage;
use log::debug;
use nalgebra::Point2;

use foliar_core::GrayView;

use crate::decode::{decode_quad, DecodeParams};
use crate::dictionary::Dictionary;
use crate::matcher::Matcher;
use crate::quad::find_marker_candidates;

/// Detector configuration.
#[derive(Clone, Debug)]
pub struct MarkerDetectorParams {
    /// Reject quads with a side shorter than this (pixels).
    pub min_side_px: f32,
    /// Reject quads with a side longer than this fraction of the smaller
    /// image dimension. Keeps frame-sized dark regions out of decoding.
    pub max_side_frac: f32,
    /// Contour-to-quad area ratio bounds; round or ragged blobs fail this.
    pub min_fill: f32,
    /// Maximum Hamming distance for dictionary matching.
    pub max_hamming: u8,
    /// Bit sampling parameters.
    pub decode: DecodeParams,
}

impl Default for MarkerDetectorParams {
    fn default() -> Self {
        Self {
            min_side_px: 12.0,
            max_side_frac: 0.9,
            min_fill: 0.75,
            max_hamming: 1,
            decode: DecodeParams::default(),
        }
    }
}

/// One decoded marker.
#[derive(Clone, Debug)]
pub struct MarkerDetection {
    pub id: u32,
    /// Image-space corners rotated so index 0 is the marker's canonical
    /// top-left corner; consecutive entries are adjacent corners.
    pub corners: [Point2<f32>; 4],
    /// Quarter turns between the marker's canonical orientation and its
    /// appearance in the image.
    pub rotation: u8,
    pub hamming: u8,
    pub border_score: f32,
    /// Border quality discounted by the Hamming penalty, in `[0, 1]`.
    pub score: f32,
    /// True when the marker was read with inverted polarity.
    pub inverted: bool,
}

/// Finds and decodes all markers of one dictionary in an image.
pub struct MarkerDetector {
    matcher: Matcher,
    params: MarkerDetectorParams,
}

impl MarkerDetector {
    pub fn new(dict: Dictionary, params: MarkerDetectorParams) -> Self {
        let matcher = Matcher::new(dict, params.max_hamming);
        Self { matcher, params }
    }

    #[inline]
    pub fn dictionary(&self) -> Dictionary {
        self.matcher.dictionary()
    }

    /// Detect markers, reported in contour scan order (top to bottom).
    ///
    /// When the same id decodes from several quads only the best-scoring
    /// one is kept; its position in the output is that of the first
    /// occurrence.
    pub fn detect(&self, gray: &GrayImage) -> Vec<MarkerDetection> {
        let Ok(view) = GrayView::from_raw(
            gray.width() as usize,
            gray.height() as usize,
            gray.as_raw(),
        ) else {
            return Vec::new();
        };

        let max_side_px = self.params.max_side_frac * gray.width().min(gray.height()) as f32;
        let candidates = find_marker_candidates(
            gray,
            self.params.min_side_px,
            max_side_px,
            self.params.min_fill,
        );
        debug!("marker detection: {} candidate quads", candidates.len());

        let dict = self.matcher.dictionary();
        let mut detections: Vec<MarkerDetection> = Vec::new();
        let mut index_by_id: HashMap<u32, usize> = HashMap::new();

        for cand in &candidates {
            let Some(obs) =
                decode_quad(&view, &cand.corners, dict.marker_size, &self.params.decode)
            else {
                continue;
            };
            let Some(m) = self.matcher.match_code(obs.code) else {
                continue;
            };

            let bits = dict.bit_count().max(1) as f32;
            let score = (obs.border_score * (1.0 - m.hamming as f32 / bits)).clamp(0.0, 1.0);

            // The decode sampled corners as-found; shift so index 0 is the
            // marker's own top-left.
            let mut corners = cand.corners;
            corners.rotate_left(m.rotation as usize);

            let det = MarkerDetection {
                id: m.id,
                corners,
                rotation: m.rotation,
                hamming: m.hamming,
                border_score: obs.border_score,
                score,
                inverted: obs.inverted,
            };

            match index_by_id.get(&det.id) {
                None => {
                    index_by_id.insert(det.id, detections.len());
                    detections.push(det);
                }
                Some(&i) => {
                    if det.score > detections[i].score {
                        detections[i] = det;
                    }
                }
            }
        }

        debug!("marker detection: {} markers decoded", detections.len());
        detections
    }
}
