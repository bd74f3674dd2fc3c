//! Sub-rectangle extraction: fixed crops, content-derived crops and row splits.

use crate::{GrayImageView, Image, ImageView};
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, `x..x + width` × `y..y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    /// Rectangle spanning the inclusive corners `(x0, y0)`–`(x1, y1)`.
    pub fn from_inclusive(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0 + 1,
            height: y1 - y0 + 1,
        }
    }

    /// Grow by `padding` on every side, clamped to a `width`×`height` image.
    pub fn padded(&self, padding: usize, width: usize, height: usize) -> Self {
        let x0 = self.x.saturating_sub(padding);
        let y0 = self.y.saturating_sub(padding);
        let x1 = (self.x + self.width - 1 + padding).min(width.saturating_sub(1));
        let y1 = (self.y + self.height - 1 + padding).min(height.saturating_sub(1));
        Self::from_inclusive(x0, y0, x1, y1)
    }

    fn fits(&self, width: usize, height: usize) -> bool {
        self.x + self.width <= width && self.y + self.height <= height
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CropError {
    #[error("crop {rect:?} exceeds {width}x{height} image")]
    OutOfBounds {
        rect: PixelRect,
        width: usize,
        height: usize,
    },
    #[error("crop would produce an empty image")]
    Empty,
    #[error("split ratio {0} must lie in (0, 1)")]
    InvalidRatio(f32),
}

/// Copy `rect` out of `img`.
pub fn crop<const C: usize>(img: &ImageView<'_, C>, rect: PixelRect) -> Result<Image<C>, CropError> {
    if rect.width == 0 || rect.height == 0 {
        return Err(CropError::Empty);
    }
    if !rect.fits(img.width, img.height) {
        return Err(CropError::OutOfBounds {
            rect,
            width: img.width,
            height: img.height,
        });
    }

    let row_len = rect.width * C;
    let mut data = Vec::with_capacity(rect.height * row_len);
    for y in rect.y..rect.y + rect.height {
        let start = (y * img.width + rect.x) * C;
        data.extend_from_slice(&img.data[start..start + row_len]);
    }
    Ok(Image {
        width: rect.width,
        height: rect.height,
        data,
    })
}

/// Fixed `cw`×`ch` crop anchored at the origin.
pub fn crop_top_left<const C: usize>(
    img: &ImageView<'_, C>,
    cw: usize,
    ch: usize,
) -> Result<Image<C>, CropError> {
    crop(
        img,
        PixelRect {
            x: 0,
            y: 0,
            width: cw,
            height: ch,
        },
    )
}

/// Bounding box of all samples equal to `value`, padded and clamped to the image.
///
/// Returns `None` when no sample matches.
pub fn content_bounds(mask: &GrayImageView<'_>, value: u8, padding: usize) -> Option<PixelRect> {
    let mut min_x = usize::MAX;
    let mut min_y = usize::MAX;
    let mut max_x = 0usize;
    let mut max_y = 0usize;

    for (i, &v) in mask.data.iter().enumerate() {
        if v != value {
            continue;
        }
        let (x, y) = (i % mask.width, i / mask.width);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if min_x == usize::MAX {
        return None;
    }
    Some(PixelRect::from_inclusive(min_x, min_y, max_x, max_y).padded(
        padding,
        mask.width,
        mask.height,
    ))
}

/// Split into rows `0..round(ratio*h)` and the remainder.
pub fn split_rows<const C: usize>(
    img: &ImageView<'_, C>,
    ratio: f32,
) -> Result<(Image<C>, Image<C>), CropError> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(CropError::InvalidRatio(ratio));
    }
    let mid = (ratio * img.height as f32).round() as usize;
    if mid == 0 || mid >= img.height {
        return Err(CropError::Empty);
    }
    let top = crop(
        img,
        PixelRect {
            x: 0,
            y: 0,
            width: img.width,
            height: mid,
        },
    )?;
    let bottom = crop(
        img,
        PixelRect {
            x: 0,
            y: mid,
            width: img.width,
            height: img.height - mid,
        },
    )?;
    Ok((top, bottom))
}
