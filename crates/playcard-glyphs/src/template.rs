//! Reference glyph sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Rank, Suit};

/// Default extension of the bundled reference glyphs.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "jpg";

/// Candidate size the suit matcher normalizes to before per-template resizing.
pub const SUIT_PRESIZE: [usize; 2] = [70, 100];

/// One reference glyph: where to load it from and which label it votes for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub path: PathBuf,
    pub label: u32,
}

/// An ordered list of reference glyphs for one glyph class.
///
/// Order matters: on equal distances the earlier entry wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    /// Human-readable name (for logging/reports).
    pub name: String,
    pub entries: Vec<TemplateEntry>,
    /// Optional `[width, height]` the candidate is resampled to before being
    /// resized to each template.
    #[serde(default)]
    pub presize: Option<[usize; 2]>,
}

impl TemplateSet {
    pub fn new(name: impl Into<String>, entries: Vec<TemplateEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            presize: None,
        }
    }

    pub fn with_presize(mut self, presize: Option<[usize; 2]>) -> Self {
        self.presize = presize;
        self
    }

    /// The 13 rank glyphs `dir/{2..9,0,jack,queen,king,ace}.{ext}`, labels 1..=13.
    pub fn standard_ranks(dir: impl AsRef<Path>, ext: &str) -> Self {
        let dir = dir.as_ref();
        let entries = Rank::ALL
            .iter()
            .map(|r| TemplateEntry {
                path: dir.join(format!("{}.{ext}", r.template_stem())),
                label: r.label(),
            })
            .collect();
        Self::new("ranks", entries)
    }

    /// The 4 suit glyphs `dir/{hearts,diamonds,clubs,spades}.{ext}`, labels 0..=3,
    /// presized to [`SUIT_PRESIZE`].
    pub fn standard_suits(dir: impl AsRef<Path>, ext: &str) -> Self {
        let dir = dir.as_ref();
        let entries = Suit::ALL
            .iter()
            .map(|s| TemplateEntry {
                path: dir.join(format!("{}.{ext}", s.template_stem())),
                label: s.label(),
            })
            .collect();
        Self::new("suits", entries).with_presize(Some(SUIT_PRESIZE))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
