//! Pixel-buffer primitives for playing-card recognition.
//!
//! Every stage is a pure function over borrowed buffers that returns a freshly
//! allocated result:
//! - [`to_grayscale`] / [`binarize`]: luminance and two-level masks,
//! - [`largest_component`]: 4-connected flood fill of the biggest blob,
//! - [`find_corners`]: extremal-point corner selection with 90° relabeling,
//! - [`rectify_card`]: inverse bilinear quad warp plus canonical mirror,
//! - [`crop`], [`content_bounds`], [`split_rows`]: region extraction,
//! - [`resize_bilinear`]: single-channel resampling.
//!
//! The crate does no file I/O and depends on no image codec.
//!
//! ```
//! use playcard_core::{binarize, largest_component, GrayImage};
//!
//! let mut gray = GrayImage::filled(8, 8, [0]);
//! for y in 2..5 {
//!     for x in 3..6 {
//!         gray.set_pixel(x, y, [200]);
//!     }
//! }
//! let mask = binarize(&gray.view(), 120);
//! assert_eq!(largest_component(&mask.view()).len(), 9);
//! ```

mod components;
mod corners;
mod crop;
mod image;
mod logger;
mod overlay;
mod rectify;
mod resample;
mod threshold;

pub use components::{largest_component, Component};
pub use corners::{find_corners, CornerError, CornerQuad};
pub use crop::{content_bounds, crop, crop_top_left, split_rows, CropError, PixelRect};
pub use image::{
    GrayImage, GrayImageView, Image, ImageError, ImageView, RgbImage, RgbImageView,
};
pub use overlay::{draw_corner_markers, MARKER_RED};
pub use rectify::{mirror_horizontal, rectify_card, warp_quad, RectifyError};
pub use resample::resize_bilinear;
pub use threshold::{
    binarize, binarize_rgb, invert, luma, to_grayscale, BACKGROUND, FOREGROUND, LUMA_WEIGHTS,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
