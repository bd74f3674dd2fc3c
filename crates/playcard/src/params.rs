use playcard_glyphs::GlyphMatchParams;
use serde::{Deserialize, Serialize};

/// Which side of the card threshold is the card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPolarity {
    /// Light card on a darker background.
    #[default]
    Bright,
    /// Dark card on a lighter background; the card mask is inverted.
    Dark,
}

/// Thresholds and geometry of the recognition pipeline.
///
/// Defaults are tuned for a standard card photographed on a dark table and
/// for reference glyphs cut from the top-left index of a 200x300 rectified
/// card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerParams {
    /// Luminance cutoff that separates the card from the background.
    pub card_threshold: u8,
    pub card_polarity: CardPolarity,
    /// Smallest card silhouette, in pixels, that is accepted.
    pub min_card_area: usize,
    /// `[width, height]` of the rectified card.
    pub rectified_size: [usize; 2],
    /// `[width, height]` of the top-left index region of the rectified card.
    pub corner_region: [usize; 2],
    /// Luminance cutoff that finds dark glyph ink inside the index region.
    pub corner_threshold: u8,
    /// Margin kept around the glyph ink when cropping the index region.
    pub content_padding: usize,
    /// Fraction of the glyph crop's height that belongs to the rank.
    pub split_ratio: f32,
    /// Luminance cutoff applied to each half before matching.
    pub glyph_threshold: u8,
    /// Half size of the squares drawn on the corner debug overlay.
    pub marker_half_size: usize,
    pub rank: GlyphMatchParams,
    pub suit: GlyphMatchParams,
}

impl Default for RecognizerParams {
    fn default() -> Self {
        Self {
            card_threshold: 120,
            card_polarity: CardPolarity::Bright,
            min_card_area: 100,
            rectified_size: [200, 300],
            corner_region: [33, 90],
            corner_threshold: 100,
            content_padding: 2,
            split_ratio: 0.60,
            glyph_threshold: 120,
            marker_half_size: 5,
            rank: GlyphMatchParams::default(),
            suit: GlyphMatchParams::default(),
        }
    }
}
