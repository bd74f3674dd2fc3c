//! End-to-end card recognition: segmentation, rectification, index crop and
//! glyph matching.

use std::path::Path;

use crate::core::{
    binarize_rgb, content_bounds, crop, crop_top_left, draw_corner_markers, find_corners, invert,
    largest_component, rectify_card, split_rows, CornerError, CornerQuad, CropError, GrayImage,
    GrayImageView, RectifyError, RgbImage, RgbImageView, BACKGROUND, MARKER_RED,
};
use crate::glyphs::{
    rank_name, suit_name, GlyphError, GlyphMatch, GlyphMatcher, TemplateLoader, TemplateSet,
};
use crate::{CardPolarity, RecognizerParams};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Subdirectory of a template root holding the rank glyphs.
pub const RANKS_SUBDIR: &str = "Ranks";
/// Subdirectory of a template root holding the suit glyphs.
pub const SUITS_SUBDIR: &str = "Suits";

/// Card-level failures. Glyph-level outcomes are reported per branch in
/// [`Classification`] instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecognizeError {
    #[error("input image is empty")]
    EmptyImage,
    #[error("no card silhouette found")]
    NoCard,
    #[error("card silhouette too small ({area} < {min} pixels)")]
    CardTooSmall { area: usize, min: usize },
    #[error(transparent)]
    Corners(#[from] CornerError),
    #[error(transparent)]
    Rectify(#[from] RectifyError),
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error("no glyph ink in the corner region")]
    NoCornerContent,
}

/// Outcome of one glyph branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    Matched(GlyphMatch),
    /// No template could be compared.
    Unmatched,
    /// The half contained no glyph.
    NoContour,
}

impl Classification {
    pub fn best(&self) -> Option<GlyphMatch> {
        match self {
            Classification::Matched(m) => Some(*m),
            _ => None,
        }
    }

    #[inline]
    pub fn is_matched(&self) -> bool {
        matches!(self, Classification::Matched(_))
    }
}

/// Result of recognizing one card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardRecognition {
    /// Pixel count of the card silhouette.
    pub card_area: usize,
    pub corners: CornerQuad,
    pub rank: Classification,
    pub suit: Classification,
}

impl CardRecognition {
    /// Both rank and suit were matched.
    pub fn is_complete(&self) -> bool {
        self.rank.is_matched() && self.suit.is_matched()
    }

    /// Rank name of the matched label, `"Unknown"` otherwise.
    pub fn rank_name(&self) -> &'static str {
        rank_name(self.rank.best().map_or(0, |m| i64::from(m.label)))
    }

    /// Suit name of the matched label, `"Unknown"` otherwise.
    pub fn suit_name(&self) -> &'static str {
        suit_name(self.suit.best().map_or(-1, |m| i64::from(m.label)))
    }
}

/// Intermediate buffer handed to a [`DebugObserver`].
#[derive(Clone, Copy, Debug)]
pub enum DebugArtifact<'a> {
    /// Card segmentation mask.
    CardMask(&'a GrayImage),
    /// Input with the located corners marked.
    CornerOverlay(&'a RgbImage),
    Rectified(&'a RgbImage),
    /// Fixed top-left index region of the rectified card.
    CornerRegion(&'a RgbImage),
    /// Index region cropped to its ink.
    GlyphCrop(&'a RgbImage),
    RankHalf(&'a GrayImage),
    SuitHalf(&'a GrayImage),
    /// Rank glyph isolated and cropped, glyph = 255.
    RankCandidate(&'a GrayImage),
    /// Suit glyph isolated, cropped and presized, glyph = 255.
    SuitCandidate(&'a GrayImage),
}

impl DebugArtifact<'_> {
    /// Stable file-friendly name.
    pub fn name(&self) -> &'static str {
        match self {
            DebugArtifact::CardMask(_) => "card_mask",
            DebugArtifact::CornerOverlay(_) => "corners",
            DebugArtifact::Rectified(_) => "rectified",
            DebugArtifact::CornerRegion(_) => "corner_region",
            DebugArtifact::GlyphCrop(_) => "glyph",
            DebugArtifact::RankHalf(_) => "rank",
            DebugArtifact::SuitHalf(_) => "suit",
            DebugArtifact::RankCandidate(_) => "rank_candidate",
            DebugArtifact::SuitCandidate(_) => "suit_candidate",
        }
    }
}

/// Receives intermediate pipeline buffers.
pub trait DebugObserver {
    /// When `false` the recognizer skips building artifacts that exist only
    /// for observation.
    fn enabled(&self) -> bool {
        true
    }

    fn observe(&mut self, artifact: DebugArtifact<'_>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl DebugObserver for NoopObserver {
    fn enabled(&self) -> bool {
        false
    }

    fn observe(&mut self, _artifact: DebugArtifact<'_>) {}
}

/// Recognizer bound to a rank and a suit template set.
#[derive(Clone, Debug)]
pub struct CardRecognizer {
    params: RecognizerParams,
    rank: GlyphMatcher,
    suit: GlyphMatcher,
}

impl CardRecognizer {
    pub fn new(params: RecognizerParams, rank_set: TemplateSet, suit_set: TemplateSet) -> Self {
        let rank = GlyphMatcher::new(rank_set, params.rank.clone());
        let suit = GlyphMatcher::new(suit_set, params.suit.clone());
        Self { params, rank, suit }
    }

    /// Recognizer over the standard layout `root/Ranks/*.ext`, `root/Suits/*.ext`.
    pub fn standard(params: RecognizerParams, root: impl AsRef<Path>, ext: &str) -> Self {
        let root = root.as_ref();
        Self::new(
            params,
            TemplateSet::standard_ranks(root.join(RANKS_SUBDIR), ext),
            TemplateSet::standard_suits(root.join(SUITS_SUBDIR), ext),
        )
    }

    #[inline]
    pub fn params(&self) -> &RecognizerParams {
        &self.params
    }

    pub fn recognize<L: TemplateLoader + ?Sized>(
        &self,
        rgb: &RgbImageView<'_>,
        loader: &L,
    ) -> Result<CardRecognition, RecognizeError> {
        self.recognize_with_observer(rgb, loader, &mut NoopObserver)
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, rgb, loader, observer),
            fields(width = rgb.width, height = rgb.height)
        )
    )]
    pub fn recognize_with_observer<L, O>(
        &self,
        rgb: &RgbImageView<'_>,
        loader: &L,
        observer: &mut O,
    ) -> Result<CardRecognition, RecognizeError>
    where
        L: TemplateLoader + ?Sized,
        O: DebugObserver + ?Sized,
    {
        if rgb.is_empty() {
            return Err(RecognizeError::EmptyImage);
        }
        let p = &self.params;

        let mut mask = binarize_rgb(rgb, p.card_threshold);
        if p.card_polarity == CardPolarity::Dark {
            mask = invert(&mask.view());
        }
        observer.observe(DebugArtifact::CardMask(&mask));

        let card = largest_component(&mask.view());
        if card.is_empty() {
            return Err(RecognizeError::NoCard);
        }
        if card.len() < p.min_card_area {
            return Err(RecognizeError::CardTooSmall {
                area: card.len(),
                min: p.min_card_area,
            });
        }
        log::debug!("card silhouette: {} px", card.len());

        let corners = find_corners(&card.points)?;
        log::debug!(
            "card corners {:?} (rotated: {})",
            corners.corners.map(|c| [c.x, c.y]),
            corners.rotated
        );
        if observer.enabled() {
            let overlay = draw_corner_markers(rgb, &corners, p.marker_half_size, MARKER_RED);
            observer.observe(DebugArtifact::CornerOverlay(&overlay));
        }

        let [rw, rh] = p.rectified_size;
        let rectified = rectify_card(rgb, &corners, rw, rh)?;
        observer.observe(DebugArtifact::Rectified(&rectified));

        let [cw, ch] = p.corner_region;
        let region = crop_top_left(&rectified.view(), cw, ch)?;
        observer.observe(DebugArtifact::CornerRegion(&region));

        let region_mask = binarize_rgb(&region.view(), p.corner_threshold);
        let ink = content_bounds(&region_mask.view(), BACKGROUND, p.content_padding)
            .ok_or(RecognizeError::NoCornerContent)?;
        let glyphs = crop(&region.view(), ink)?;
        observer.observe(DebugArtifact::GlyphCrop(&glyphs));
        log::debug!("index ink {:?}", ink);

        let (top, bottom) = split_rows(&glyphs.view(), p.split_ratio)?;
        let rank_mask = binarize_rgb(&top.view(), p.glyph_threshold);
        let suit_mask = binarize_rgb(&bottom.view(), p.glyph_threshold);
        observer.observe(DebugArtifact::RankHalf(&rank_mask));
        observer.observe(DebugArtifact::SuitHalf(&suit_mask));

        let rank = classify(
            &self.rank,
            &rank_mask.view(),
            loader,
            observer,
            |m| DebugArtifact::RankCandidate(m),
        );
        let suit = classify(
            &self.suit,
            &suit_mask.view(),
            loader,
            observer,
            |m| DebugArtifact::SuitCandidate(m),
        );
        log::info!("rank: {rank:?}, suit: {suit:?}");

        Ok(CardRecognition {
            card_area: card.len(),
            corners,
            rank,
            suit,
        })
    }
}

fn classify<L, O>(
    matcher: &GlyphMatcher,
    mask: &GrayImageView<'_>,
    loader: &L,
    observer: &mut O,
    artifact: fn(&GrayImage) -> DebugArtifact<'_>,
) -> Classification
where
    L: TemplateLoader + ?Sized,
    O: DebugObserver + ?Sized,
{
    match matcher.match_glyph(mask, loader) {
        Ok(report) => {
            observer.observe(artifact(&report.candidate));
            report
                .best
                .map_or(Classification::Unmatched, Classification::Matched)
        }
        Err(GlyphError::NoContour) => {
            log::warn!("{}: no glyph contour", matcher.templates().name);
            Classification::NoContour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::InMemoryTemplates;

    fn card_on_table() -> RgbImage {
        let mut img = RgbImage::filled(120, 160, [10, 10, 10]);
        for y in 20..140 {
            for x in 30..110 {
                img.set_pixel(x, y, [240, 240, 240]);
            }
        }
        img
    }

    #[derive(Default)]
    struct Names(Vec<&'static str>);

    impl DebugObserver for Names {
        fn observe(&mut self, artifact: DebugArtifact<'_>) {
            self.0.push(artifact.name());
        }
    }

    #[test]
    fn empty_and_blank_inputs_are_card_errors() {
        let rec = CardRecognizer::new(
            RecognizerParams::default(),
            TemplateSet::new("r", vec![]),
            TemplateSet::new("s", vec![]),
        );
        let loader = InMemoryTemplates::new();
        let empty = RgbImage::filled(0, 0, [0, 0, 0]);
        assert_eq!(
            rec.recognize(&empty.view(), &loader),
            Err(RecognizeError::EmptyImage)
        );
        let dark = RgbImage::filled(20, 20, [0, 0, 0]);
        assert_eq!(
            rec.recognize(&dark.view(), &loader),
            Err(RecognizeError::NoCard)
        );
    }

    #[test]
    fn tiny_silhouette_is_rejected() {
        let mut img = RgbImage::filled(20, 20, [0, 0, 0]);
        for y in 5..10 {
            for x in 5..10 {
                img.set_pixel(x, y, [255, 255, 255]);
            }
        }
        let rec = CardRecognizer::new(
            RecognizerParams::default(),
            TemplateSet::new("r", vec![]),
            TemplateSet::new("s", vec![]),
        );
        assert_eq!(
            rec.recognize(&img.view(), &InMemoryTemplates::new()),
            Err(RecognizeError::CardTooSmall { area: 25, min: 100 })
        );
    }

    #[test]
    fn blank_card_has_no_corner_content() {
        let rec = CardRecognizer::standard(RecognizerParams::default(), "t", "png");
        let img = card_on_table();
        let mut names = Names::default();
        let err = rec
            .recognize_with_observer(&img.view(), &InMemoryTemplates::new(), &mut names)
            .unwrap_err();
        assert_eq!(err, RecognizeError::NoCornerContent);
        assert_eq!(
            names.0,
            vec!["card_mask", "corners", "rectified", "corner_region"]
        );
    }

    #[test]
    fn names_default_to_unknown() {
        let rec = CardRecognition {
            card_area: 1,
            corners: CornerQuad {
                corners: [nalgebra::Point2::origin(); 4],
                rotated: false,
            },
            rank: Classification::Unmatched,
            suit: Classification::NoContour,
        };
        assert!(!rec.is_complete());
        assert_eq!(rec.rank_name(), "Unknown");
        assert_eq!(rec.suit_name(), "Unknown");
    }
}
