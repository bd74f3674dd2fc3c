mod common;

use std::path::Path;

use approx::assert_relative_eq;
use common::*;
use playcard::core::{GrayImage, RgbImage};
use playcard::glyphs::{CachingLoader, InMemoryTemplates, TemplateSet};
use playcard::{
    CardPolarity, CardRecognizer, Classification, DebugArtifact, DebugObserver, Rank,
    RecognizeError, RecognizerParams, Suit,
};

fn templates(root: &str) -> InMemoryTemplates {
    let root = Path::new(root);
    InMemoryTemplates::new()
        .with(root.join("Ranks/2.png"), rank_template())
        .with(root.join("Ranks/3.png"), blank(20, 28))
        .with(root.join("Suits/hearts.png"), suit_template())
        .with(root.join("Suits/diamonds.png"), blank(20, 20))
}

#[derive(Default)]
struct Capture {
    names: Vec<&'static str>,
    rectified: Option<RgbImage>,
    glyph_size: Option<(usize, usize)>,
    halves: Vec<GrayImage>,
    candidates: Vec<GrayImage>,
}

impl DebugObserver for Capture {
    fn observe(&mut self, artifact: DebugArtifact<'_>) {
        self.names.push(artifact.name());
        match artifact {
            DebugArtifact::Rectified(img) => self.rectified = Some(img.clone()),
            DebugArtifact::GlyphCrop(img) => self.glyph_size = Some((img.width, img.height)),
            DebugArtifact::RankHalf(img) | DebugArtifact::SuitHalf(img) => {
                self.halves.push(img.clone())
            }
            DebugArtifact::RankCandidate(img) | DebugArtifact::SuitCandidate(img) => {
                self.candidates.push(img.clone())
            }
            _ => {}
        }
    }
}

#[test]
fn recognizes_synthetic_two_of_hearts() {
    let img = synthetic_card();
    let recognizer = CardRecognizer::standard(RecognizerParams::default(), "tpl", "png");
    let result = recognizer
        .recognize(&img.view(), &templates("tpl"))
        .expect("card recognized");

    assert_eq!(result.card_area, SYNTHETIC_CARD_AREA);
    assert!(result.corners.rotated, "tall card takes the rotated labeling");
    let expected = [(149.0, 40.0), (50.0, 40.0), (50.0, 189.0), (149.0, 189.0)];
    for (c, (x, y)) in result.corners.corners.iter().zip(expected) {
        assert_relative_eq!(c.x, x);
        assert_relative_eq!(c.y, y);
    }

    let rank = result.rank.best().expect("rank matched");
    assert_eq!(Rank::from_label(rank.label), Some(Rank::Two));
    assert_eq!(rank.distance, 0);
    let suit = result.suit.best().expect("suit matched");
    assert_eq!(Suit::from_label(suit.label), Some(Suit::Hearts));

    assert!(result.is_complete());
    assert_eq!(result.rank_name(), "Two");
    assert_eq!(result.suit_name(), "Hearts");
}

#[test]
fn observer_sees_every_stage() {
    let img = synthetic_card();
    let recognizer = CardRecognizer::standard(RecognizerParams::default(), "tpl", "png");
    let mut capture = Capture::default();
    recognizer
        .recognize_with_observer(&img.view(), &templates("tpl"), &mut capture)
        .unwrap();

    assert_eq!(
        capture.names,
        vec![
            "card_mask",
            "corners",
            "rectified",
            "corner_region",
            "glyph",
            "rank",
            "suit",
            "rank_candidate",
            "suit_candidate"
        ]
    );
    let rectified = capture.rectified.unwrap();
    assert_eq!((rectified.width, rectified.height), (200, 300));
    assert_eq!(capture.glyph_size, Some((20, 56)));
    let sizes: Vec<_> = capture.halves.iter().map(|h| (h.width, h.height)).collect();
    assert_eq!(sizes, vec![(20, 34), (20, 22)]);
    for half in &capture.halves {
        assert!(half.data.iter().all(|&v| v == 0 || v == 255));
    }
    let sizes: Vec<_> = capture
        .candidates
        .iter()
        .map(|c| (c.width, c.height))
        .collect();
    assert_eq!(sizes, vec![(20, 28), (70, 100)]);
    let rank_candidate = &capture.candidates[0];
    assert_eq!(rank_candidate.pixel(0, 0), &[0]);
    assert_eq!(rank_candidate.pixel(10, 14), &[255]);
}

#[test]
fn missing_templates_leave_both_branches_unmatched() {
    let img = synthetic_card();
    let recognizer = CardRecognizer::standard(RecognizerParams::default(), "tpl", "png");
    let result = recognizer
        .recognize(&img.view(), &InMemoryTemplates::new())
        .unwrap();
    assert_eq!(result.rank, Classification::Unmatched);
    assert_eq!(result.suit, Classification::Unmatched);
    assert!(!result.is_complete());
    assert_eq!(result.rank_name(), "Unknown");
}

#[test]
fn dark_square_on_white_is_segmented_with_dark_polarity() {
    let img = dark_square();
    let params = RecognizerParams {
        card_polarity: CardPolarity::Dark,
        ..RecognizerParams::default()
    };
    let recognizer = CardRecognizer::new(
        params,
        TemplateSet::new("ranks", vec![]),
        TemplateSet::new("suits", vec![]),
    );
    let mut capture = Capture::default();
    let result = recognizer
        .recognize_with_observer(&img.view(), &InMemoryTemplates::new(), &mut capture)
        .unwrap();

    assert_eq!(result.card_area, 100 * 100);
    assert!(!result.corners.rotated);
    let expected = [(30.0, 150.0), (30.0, 249.0), (129.0, 249.0), (129.0, 150.0)];
    for (c, (x, y)) in result.corners.corners.iter().zip(expected) {
        assert_relative_eq!(c.x, x);
        assert_relative_eq!(c.y, y);
    }

    // Rectified (x, y) samples the square at column 30 + 99y/299 and row
    // 150 + 99(199 - x)/199: scaled to 200x300 and mirrored left-right.
    let rectified = capture.rectified.unwrap();
    assert_eq!((rectified.width, rectified.height), (200, 300));
    for y in 0..300 {
        for x in 0..200 {
            let src = img.pixel(30 + 99 * y / 299, 150 + 99 * (199 - x) / 199);
            assert_eq!(rectified.pixel(x, y), src, "rectified ({x}, {y})");
        }
    }
    // The marker lands at x 19..=58, y 31..=90 after scaling and mirroring.
    for (x, y) in [(19, 31), (58, 90), (40, 60)] {
        assert_eq!(rectified.pixel(x, y), &MARKER, "marker at ({x}, {y})");
    }
    for (x, y) in [(18, 31), (59, 60), (30, 30), (30, 91), (0, 0), (199, 299)] {
        assert_eq!(rectified.pixel(x, y), &BLACK, "square at ({x}, {y})");
    }

    assert_eq!(result.rank, Classification::Unmatched);
    assert_eq!(result.suit, Classification::Unmatched);
}

#[test]
fn bright_polarity_segments_the_surround_instead() {
    let img = dark_square();
    let recognizer = CardRecognizer::new(
        RecognizerParams::default(),
        TemplateSet::new("ranks", vec![]),
        TemplateSet::new("suits", vec![]),
    );
    // The white surround becomes the silhouette. Its index region maps to
    // source rows 250..=299, below the square, and holds no ink.
    assert_eq!(
        recognizer.recognize(&img.view(), &InMemoryTemplates::new()),
        Err(RecognizeError::NoCornerContent)
    );
}

#[test]
fn caching_loader_is_reused_across_cards() {
    let img = synthetic_card();
    let recognizer = CardRecognizer::standard(RecognizerParams::default(), "tpl", "png");
    let loader = CachingLoader::new(templates("tpl"));
    let first = recognizer.recognize(&img.view(), &loader).unwrap();
    let second = recognizer.recognize(&img.view(), &loader).unwrap();
    assert_eq!(first, second);
    assert_eq!(loader.cached(), 4);
}

#[cfg(feature = "image")]
#[test]
fn recognizes_a_card_decoded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.png");
    let img = synthetic_card();
    image::save_buffer(
        &path,
        &img.data,
        img.width as u32,
        img.height as u32,
        image::ExtendedColorType::Rgb8,
    )
    .unwrap();

    let recognizer = CardRecognizer::standard(RecognizerParams::default(), "tpl", "png");
    let result = playcard::detect::recognize_file(&path, &recognizer, &templates("tpl")).unwrap();
    assert_eq!(result.card_area, SYNTHETIC_CARD_AREA);
    assert_eq!(result.rank_name(), "Two");
    assert_eq!(result.suit_name(), "Hearts");

    let missing = playcard::detect::recognize_file(
        dir.path().join("absent.png"),
        &recognizer,
        &templates("tpl"),
    );
    assert!(matches!(missing, Err(playcard::detect::DetectError::Load { .. })));
}
