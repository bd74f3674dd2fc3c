//! Luminance conversion and fixed-threshold binarization.

use crate::{GrayImage, GrayImageView, RgbImageView};

/// Rec. 601 luma weights used for every RGB -> gray conversion.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Mask value of foreground samples.
pub const FOREGROUND: u8 = 255;
/// Mask value of background samples.
pub const BACKGROUND: u8 = 0;

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    let y = wr * r as f32 + wg * g as f32 + wb * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB image to luminance, `round(0.299 r + 0.587 g + 0.114 b)`.
pub fn to_grayscale(rgb: &RgbImageView<'_>) -> GrayImage {
    let data = rgb
        .data
        .chunks_exact(3)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect();
    GrayImage {
        width: rgb.width,
        height: rgb.height,
        data,
    }
}

/// Two-level mask: samples strictly above `threshold` become 255, the rest 0.
pub fn binarize(gray: &GrayImageView<'_>, threshold: u8) -> GrayImage {
    let data = gray
        .data
        .iter()
        .map(|&v| if v > threshold { FOREGROUND } else { BACKGROUND })
        .collect();
    GrayImage {
        width: gray.width,
        height: gray.height,
        data,
    }
}

/// Grayscale + binarize in one pass.
pub fn binarize_rgb(rgb: &RgbImageView<'_>, threshold: u8) -> GrayImage {
    let data = rgb
        .data
        .chunks_exact(3)
        .map(|px| {
            if luma(px[0], px[1], px[2]) > threshold {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })
        .collect();
    GrayImage {
        width: rgb.width,
        height: rgb.height,
        data,
    }
}

/// Swap foreground and background (`255 - v`).
pub fn invert(mask: &GrayImageView<'_>) -> GrayImage {
    GrayImage {
        width: mask.width,
        height: mask.height,
        data: mask.data.iter().map(|&v| 255 - v).collect(),
    }
}
