//! Bilinear resizing of single-channel images.

use crate::{GrayImage, GrayImageView};

/// Resize `src` to `out_w`×`out_h` with bilinear interpolation.
///
/// Output pixel `(x, y)` maps to source `(x * in_w / out_w, y * in_h / out_h)`;
/// the right/bottom neighbours are clamped to the last column/row. Uniform
/// images stay uniform for any target size.
pub fn resize_bilinear(src: &GrayImageView<'_>, out_w: usize, out_h: usize) -> GrayImage {
    let mut data = Vec::with_capacity(out_w * out_h);
    if src.is_empty() {
        data.resize(out_w * out_h, 0);
        return GrayImage {
            width: out_w,
            height: out_h,
            data,
        };
    }

    let sx_scale = src.width as f32 / out_w.max(1) as f32;
    let sy_scale = src.height as f32 / out_h.max(1) as f32;

    for y in 0..out_h {
        let fy_src = y as f32 * sy_scale;
        let y0 = (fy_src as usize).min(src.height - 1);
        let y1 = (y0 + 1).min(src.height - 1);
        let fy = fy_src - y0 as f32;
        for x in 0..out_w {
            let fx_src = x as f32 * sx_scale;
            let x0 = (fx_src as usize).min(src.width - 1);
            let x1 = (x0 + 1).min(src.width - 1);
            let fx = fx_src - x0 as f32;

            let p00 = src.get(x0, y0) as f32;
            let p10 = src.get(x1, y0) as f32;
            let p01 = src.get(x0, y1) as f32;
            let p11 = src.get(x1, y1) as f32;

            let a = p00 + fx * (p10 - p00);
            let b = p01 + fx * (p11 - p01);
            let v = a + fy * (b - a);
            data.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }

    GrayImage {
        width: out_w,
        height: out_h,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_round_trip_is_exact() {
        let src = GrayImage::filled(13, 7, [173]);
        for (w, h) in [(1, 1), (5, 29), (70, 100), (13, 7)] {
            let up = resize_bilinear(&src.view(), w, h);
            assert!(up.data.iter().all(|&v| v == 173));
            let back = resize_bilinear(&up.view(), 13, 7);
            assert_eq!(back, src);
        }
    }

    #[test]
    fn same_size_is_identity() {
        let src = GrayImage::new(4, 3, (0..12).map(|v| v * 20).collect()).unwrap();
        assert_eq!(resize_bilinear(&src.view(), 4, 3), src);
    }

    #[test]
    fn upsampling_interpolates_between_columns() {
        let src = GrayImage::new(2, 1, vec![0, 100]).unwrap();
        let out = resize_bilinear(&src.view(), 4, 1);
        // x = 0, 0.5, 1.0 (clamped neighbour), 1.5 (clamped neighbour)
        assert_eq!(out.data, vec![0, 50, 100, 100]);
    }

    #[test]
    fn downsampling_picks_scaled_positions() {
        let src = GrayImage::new(4, 1, vec![10, 20, 30, 40]).unwrap();
        let out = resize_bilinear(&src.view(), 2, 1);
        assert_eq!(out.data, vec![10, 30]);
    }
}
