//! Nearest-template glyph matching by binary disagreement count.

use std::path::PathBuf;

use playcard_core::{
    binarize, binarize_rgb, crop, invert, largest_component, resize_bilinear, GrayImage,
    GrayImageView, PixelRect,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{TemplateLoader, TemplateSet};

/// Tunables shared by the rank and suit matchers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphMatchParams {
    /// Margin added around the glyph's bounding box before cropping.
    pub padding: usize,
    /// Luminance cutoff applied to template bitmaps.
    pub template_threshold: u8,
    /// Cutoff that re-binarizes the candidate after bilinear resizing.
    pub candidate_threshold: u8,
}

impl Default for GlyphMatchParams {
    fn default() -> Self {
        Self {
            padding: 2,
            template_threshold: 120,
            candidate_threshold: 127,
        }
    }
}

/// Best template for a candidate glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphMatch {
    /// Label of the winning template.
    pub label: u32,
    /// Index of the winning template in its set.
    pub index: usize,
    /// Number of disagreeing samples at the template's resolution.
    pub distance: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrialOutcome {
    Compared { distance: u64 },
    Skipped { reason: String },
}

/// What happened with one template during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTrial {
    pub index: usize,
    pub label: u32,
    pub path: PathBuf,
    pub outcome: TrialOutcome,
}

/// Result of matching one candidate against a template set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphReport {
    /// Region of the input mask that was used as the candidate.
    pub candidate_rect: PixelRect,
    /// Normalized candidate (glyph = 255) before per-template resizing.
    #[serde(skip)]
    pub candidate: GrayImage,
    /// `None` when no template could be compared.
    pub best: Option<GlyphMatch>,
    pub trials: Vec<TemplateTrial>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    #[error("no glyph contour in candidate region")]
    NoContour,
}

/// Number of positions where two equally sized masks differ.
///
/// Returns `None` when the sizes differ.
pub fn disagreement_count(a: &GrayImageView<'_>, b: &GrayImageView<'_>) -> Option<u64> {
    if a.width != b.width || a.height != b.height {
        return None;
    }
    Some(a.data.iter().zip(b.data).filter(|(x, y)| x != y).count() as u64)
}

/// Matcher bound to one template set.
#[derive(Clone, Debug)]
pub struct GlyphMatcher {
    set: TemplateSet,
    params: GlyphMatchParams,
}

impl GlyphMatcher {
    pub fn new(set: TemplateSet, params: GlyphMatchParams) -> Self {
        Self { set, params }
    }

    #[inline]
    pub fn templates(&self) -> &TemplateSet {
        &self.set
    }

    #[inline]
    pub fn params(&self) -> &GlyphMatchParams {
        &self.params
    }

    /// Isolate the glyph in a binary mask (glyph = 0) and return it with
    /// template polarity (glyph = 255), cropped to its padded bounding box and
    /// resampled to the set's presize if any.
    pub fn normalize_candidate(
        &self,
        mask: &GrayImageView<'_>,
    ) -> Result<(GrayImage, PixelRect), GlyphError> {
        let inverted = invert(mask);
        let glyph = largest_component(&inverted.view());
        let bounds = glyph.bounds().ok_or(GlyphError::NoContour)?;
        let rect = bounds.padded(self.params.padding, mask.width, mask.height);
        let cropped = crop(&inverted.view(), rect).map_err(|_| GlyphError::NoContour)?;

        let candidate = match self.set.presize {
            Some([w, h]) => {
                let resized = resize_bilinear(&cropped.view(), w, h);
                binarize(&resized.view(), self.params.candidate_threshold)
            }
            None => cropped,
        };
        Ok((candidate, rect))
    }

    /// Compare the glyph in `mask` against every template of the set.
    ///
    /// Templates that fail to load are skipped. The smallest disagreement
    /// count wins and ties keep the earliest template.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(set = %self.set.name, width = mask.width, height = mask.height))
    )]
    pub fn match_glyph<L: TemplateLoader + ?Sized>(
        &self,
        mask: &GrayImageView<'_>,
        loader: &L,
    ) -> Result<GlyphReport, GlyphError> {
        let (candidate, candidate_rect) = self.normalize_candidate(mask)?;
        let mut best: Option<GlyphMatch> = None;
        let mut trials = Vec::with_capacity(self.set.len());

        for (index, entry) in self.set.entries.iter().enumerate() {
            let outcome = match loader.load(&entry.path) {
                Err(err) => {
                    log::warn!("{}: skipping template {index}: {err}", self.set.name);
                    TrialOutcome::Skipped {
                        reason: err.to_string(),
                    }
                }
                Ok(tpl) if tpl.is_empty() => TrialOutcome::Skipped {
                    reason: "empty template image".to_string(),
                },
                Ok(tpl) => {
                    let tpl_mask = binarize_rgb(&tpl.view(), self.params.template_threshold);
                    let resized = resize_bilinear(&candidate.view(), tpl.width, tpl.height);
                    let resized = binarize(&resized.view(), self.params.candidate_threshold);
                    let distance = disagreement_count(&resized.view(), &tpl_mask.view())
                        .unwrap_or(u64::MAX);
                    log::debug!(
                        "{}: template {index} (label {}) distance {distance}",
                        self.set.name,
                        entry.label
                    );
                    if best.is_none_or(|b| distance < b.distance) {
                        best = Some(GlyphMatch {
                            label: entry.label,
                            index,
                            distance,
                        });
                    }
                    TrialOutcome::Compared { distance }
                }
            };
            trials.push(TemplateTrial {
                index,
                label: entry.label,
                path: entry.path.clone(),
                outcome,
            });
        }

        match best {
            Some(m) => log::debug!("{}: best label {} (distance {})", self.set.name, m.label, m.distance),
            None => log::debug!("{}: unmatched", self.set.name),
        }

        Ok(GlyphReport {
            candidate_rect,
            candidate,
            best,
            trials,
        })
    }
}
