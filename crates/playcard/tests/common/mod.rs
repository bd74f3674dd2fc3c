//! Synthetic card photos and glyph templates shared by the integration tests.
#![allow(dead_code)]

use playcard::core::RgbImage;

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Paint the inclusive rectangle `(x0, y0)`–`(x1, y1)`.
pub fn fill(img: &mut RgbImage, x0: usize, y0: usize, x1: usize, y1: usize, color: [u8; 3]) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.set_pixel(x, y, color);
        }
    }
}

/// A 100x150 white card at (50, 40) on a black 200x230 table, with a black
/// rank block and a black suit block in its top-left index.
///
/// Rectified to 200x300 the index ink spans x 9..=24, y 13..=64, so the rank
/// half crops to 20x28 and the suit half to 20x20, each with a 16-pixel-wide
/// glyph two pixels in from the border.
pub fn synthetic_card() -> RgbImage {
    let mut img = RgbImage::filled(200, 230, BLACK);
    fill(&mut img, 50, 40, 149, 189, WHITE);
    fill(&mut img, 54, 46, 61, 57, BLACK);
    fill(&mut img, 54, 64, 61, 71, BLACK);
    img
}

/// Silhouette area of [`synthetic_card`]: card minus both glyph blocks.
pub const SYNTHETIC_CARD_AREA: usize = 100 * 150 - 8 * 12 - 8 * 8;

/// Rank glyph exactly as the matcher crops it from [`synthetic_card`].
pub fn rank_template() -> RgbImage {
    let mut img = RgbImage::filled(20, 28, BLACK);
    fill(&mut img, 2, 2, 17, 25, WHITE);
    img
}

/// Suit glyph as the matcher crops it from [`synthetic_card`].
pub fn suit_template() -> RgbImage {
    let mut img = RgbImage::filled(20, 20, BLACK);
    fill(&mut img, 2, 2, 17, 17, WHITE);
    img
}

pub fn blank(width: usize, height: usize) -> RgbImage {
    RgbImage::filled(width, height, BLACK)
}

pub const MARKER: [u8; 3] = [200, 0, 0];

/// White 300x300 image with a black 100x100 square spanning x 30..=129,
/// y 150..=249. A red 20x20 marker at (40, 220) sits inside the square; its
/// luma is below every card threshold, so it still counts as square.
pub fn dark_square() -> RgbImage {
    let mut img = RgbImage::filled(300, 300, WHITE);
    fill(&mut img, 30, 150, 129, 249, BLACK);
    fill(&mut img, 40, 220, 59, 239, MARKER);
    img
}
