//! Debug overlays drawn onto RGB copies of the input.

use crate::{CornerQuad, RgbImage, RgbImageView};

pub const MARKER_RED: [u8; 3] = [255, 0, 0];

/// Copy `src` and paint a filled `(2 * half_size + 1)²` square on every corner.
///
/// Squares are clipped at the image border.
pub fn draw_corner_markers(
    src: &RgbImageView<'_>,
    quad: &CornerQuad,
    half_size: usize,
    color: [u8; 3],
) -> RgbImage {
    let mut out = src.to_owned_image();
    let r = half_size as i64;
    for c in &quad.corners {
        let (cx, cy) = (c.x as i64, c.y as i64);
        for y in (cy - r)..=(cy + r) {
            for x in (cx - r)..=(cx + r) {
                if x < 0 || y < 0 || x >= out.width as i64 || y >= out.height as i64 {
                    continue;
                }
                out.set_pixel(x as usize, y as usize, color);
            }
        }
    }
    out
}
