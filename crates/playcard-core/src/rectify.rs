//! Quad-to-rectangle rectification by inverse bilinear edge interpolation.
//!
//! This is not a homography: for each destination pixel the source point is
//! interpolated along the top and bottom quad edges and then between them.
//! It is exact for parallelograms and approximate for perspective-skewed quads.

use crate::{CornerQuad, RgbImage, RgbImageView};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RectifyError {
    #[error("source image is empty")]
    EmptySource,
    #[error("invalid output size {width}x{height}")]
    InvalidOutputSize { width: usize, height: usize },
}

/// Warp the quad `corners` of `src` into a `dst_w`×`dst_h` image.
///
/// Destination pixel `(x, y)` uses `u = x / (dst_w - 1)`, `v = y / (dst_h - 1)`;
/// the source point is `lerp(lerp(c0, c1, u), lerp(c3, c2, u), v)`, floored,
/// clamped to the source and copied without resampling.
pub fn warp_quad(
    src: &RgbImageView<'_>,
    quad: &CornerQuad,
    dst_w: usize,
    dst_h: usize,
) -> Result<RgbImage, RectifyError> {
    if src.is_empty() {
        return Err(RectifyError::EmptySource);
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(RectifyError::InvalidOutputSize {
            width: dst_w,
            height: dst_h,
        });
    }

    // Integer weight numerators over a single denominator keep grid-aligned
    // quads exact: no `x / n * n` round-off before flooring.
    let n = (dst_w - 1).max(1) as f64;
    let m = (dst_h - 1).max(1) as f64;
    let denom = n * m;
    let c = quad.corners.map(|p| (p.x as f64, p.y as f64));
    let max_x = (src.width - 1) as f64;
    let max_y = (src.height - 1) as f64;

    let mut data = vec![0u8; dst_w * dst_h * 3];
    for y in 0..dst_h {
        let wy1 = y as f64;
        let wy0 = m - wy1;
        for x in 0..dst_w {
            let wx1 = x as f64;
            let wx0 = n - wx1;
            let w0 = wx0 * wy0;
            let w1 = wx1 * wy0;
            let w2 = wx1 * wy1;
            let w3 = wx0 * wy1;
            let px = (w0 * c[0].0 + w1 * c[1].0 + w2 * c[2].0 + w3 * c[3].0) / denom;
            let py = (w0 * c[0].1 + w1 * c[1].1 + w2 * c[2].1 + w3 * c[3].1) / denom;

            let sx = px.floor().clamp(0.0, max_x) as usize;
            let sy = py.floor().clamp(0.0, max_y) as usize;
            let o = (y * dst_w + x) * 3;
            data[o..o + 3].copy_from_slice(src.pixel(sx, sy));
        }
    }

    Ok(RgbImage {
        width: dst_w,
        height: dst_h,
        data,
    })
}

/// Mirror left-right: `out(x, y) = img(w - 1 - x, y)`.
pub fn mirror_horizontal(img: &RgbImageView<'_>) -> RgbImage {
    let mut data = Vec::with_capacity(img.data.len());
    for y in 0..img.height {
        for x in (0..img.width).rev() {
            data.extend_from_slice(img.pixel(x, y));
        }
    }
    RgbImage {
        width: img.width,
        height: img.height,
        data,
    }
}

/// Warp the card quad to `dst_w`×`dst_h` and mirror it into the canonical
/// orientation (index glyph in the top-left corner).
pub fn rectify_card(
    src: &RgbImageView<'_>,
    quad: &CornerQuad,
    dst_w: usize,
    dst_h: usize,
) -> Result<RgbImage, RectifyError> {
    let warped = warp_quad(src, quad, dst_w, dst_h)?;
    Ok(mirror_horizontal(&warped.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn textured(w: usize, h: usize) -> RgbImage {
        let mut img = RgbImage::filled(w, h, [0, 0, 0]);
        for y in 0..h {
            for x in 0..w {
                img.set_pixel(x, y, [(x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8]);
            }
        }
        img
    }

    fn axis_quad(x0: f32, y0: f32, x1: f32, y1: f32) -> CornerQuad {
        CornerQuad {
            corners: [
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
            rotated: false,
        }
    }

    #[test]
    fn aligned_quad_reproduces_source_exactly() {
        let src = textured(37, 50);
        let quad = axis_quad(0.0, 0.0, 36.0, 49.0);
        let warped = warp_quad(&src.view(), &quad, 37, 50).unwrap();
        assert_eq!(warped, src);
    }

    #[test]
    fn rectify_mirrors_after_warping() {
        let src = textured(23, 31);
        let quad = axis_quad(0.0, 0.0, 22.0, 30.0);
        let out = rectify_card(&src.view(), &quad, 23, 31).unwrap();
        for y in 0..31 {
            for x in 0..23 {
                assert_eq!(out.pixel(x, y), src.pixel(22 - x, y));
            }
        }
    }

    #[test]
    fn sub_region_is_scaled_up() {
        let src = textured(40, 40);
        let quad = axis_quad(10.0, 20.0, 19.0, 29.0);
        let out = warp_quad(&src.view(), &quad, 19, 19).unwrap();
        // Every second destination pixel lands on a source grid point.
        for k in 0..10 {
            assert_eq!(out.pixel(2 * k, 2 * k), src.pixel(10 + k, 20 + k));
        }
    }

    #[test]
    fn samples_outside_the_source_are_clamped() {
        let src = textured(5, 5);
        let quad = axis_quad(-10.0, -10.0, 20.0, 20.0);
        let out = warp_quad(&src.view(), &quad, 4, 4).unwrap();
        assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
        assert_eq!(out.pixel(3, 3), src.pixel(4, 4));
    }

    #[test]
    fn mirror_twice_is_identity() {
        let src = textured(6, 3);
        let once = mirror_horizontal(&src.view());
        assert_ne!(once, src);
        assert_eq!(mirror_horizontal(&once.view()), src);
    }

    #[test]
    fn invalid_sizes_are_errors() {
        let src = textured(4, 4);
        let quad = axis_quad(0.0, 0.0, 3.0, 3.0);
        assert_eq!(
            warp_quad(&src.view(), &quad, 0, 5),
            Err(RectifyError::InvalidOutputSize {
                width: 0,
                height: 5
            })
        );
        let empty = RgbImage::filled(0, 0, [0, 0, 0]);
        assert_eq!(
            warp_quad(&empty.view(), &quad, 4, 4),
            Err(RectifyError::EmptySource)
        );
    }
}
