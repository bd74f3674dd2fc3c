//! Extremal-point corner selection for a single card blob.

use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};

/// Four card corners ordered (top-left, top-right, bottom-right, bottom-left).
///
/// The labels follow the sum/difference heuristic of [`find_corners`], not
/// necessarily the geometric position in the photo; the rectifier's mirror
/// step compensates for the swapped diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerQuad {
    pub corners: [Point2<f32>; 4],
    /// Whether the 90° relabeling fired because the quad was wider than tall.
    pub rotated: bool,
}

impl CornerQuad {
    #[inline]
    pub fn top_left(&self) -> Point2<f32> {
        self.corners[0]
    }

    #[inline]
    pub fn top_right(&self) -> Point2<f32> {
        self.corners[1]
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<f32> {
        self.corners[2]
    }

    #[inline]
    pub fn bottom_left(&self) -> Point2<f32> {
        self.corners[3]
    }

    /// Mean length of the top and bottom edges.
    pub fn mean_width(&self) -> f32 {
        let [tl, tr, br, bl] = self.corners;
        0.5 * (distance(&tl, &tr) + distance(&bl, &br))
    }

    /// Mean length of the left and right edges.
    pub fn mean_height(&self) -> f32 {
        let [tl, tr, br, bl] = self.corners;
        0.5 * (distance(&tl, &bl) + distance(&tr, &br))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CornerError {
    #[error("need at least 4 points to locate corners, got {0}")]
    TooFewPoints(usize),
    #[error("corner quad has a zero-length edge")]
    DegenerateQuad,
}

/// Pick the card corners from a point set.
///
/// `x + y` is minimised at the top-left and maximised at the bottom-right;
/// `x - y` is minimised at the top-right and maximised at the bottom-left.
/// When the mean horizontal edge is longer than the mean vertical edge the
/// labels are rotated one step to (bottom-left, top-left, top-right,
/// bottom-right) so the long axis is treated as height.
///
/// This is exact for axis-aligned and near-45° quads only; arbitrary rotations
/// are out of its reach.
pub fn find_corners(points: &[Point2<f32>]) -> Result<CornerQuad, CornerError> {
    if points.len() < 4 {
        return Err(CornerError::TooFewPoints(points.len()));
    }

    let mut tl = points[0];
    let mut tr = points[0];
    let mut br = points[0];
    let mut bl = points[0];
    let (mut min_sum, mut max_sum) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut min_diff, mut max_diff) = (f32::INFINITY, f32::NEG_INFINITY);

    for &p in points {
        let sum = p.x + p.y;
        let diff = p.x - p.y;
        if sum < min_sum {
            min_sum = sum;
            tl = p;
        }
        if sum > max_sum {
            max_sum = sum;
            br = p;
        }
        if diff < min_diff {
            min_diff = diff;
            tr = p;
        }
        if diff > max_diff {
            max_diff = diff;
            bl = p;
        }
    }

    let quad = CornerQuad {
        corners: [tl, tr, br, bl],
        rotated: false,
    };
    let edges = [
        distance(&tl, &tr),
        distance(&tr, &br),
        distance(&br, &bl),
        distance(&bl, &tl),
    ];
    if edges.iter().any(|&e| e < f32::EPSILON) {
        return Err(CornerError::DegenerateQuad);
    }

    if quad.mean_width() > quad.mean_height() {
        return Ok(CornerQuad {
            corners: [bl, tl, tr, br],
            rotated: true,
        });
    }
    Ok(quad)
}
