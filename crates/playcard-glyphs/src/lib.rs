//! Rank and suit glyph classification against reference bitmaps.
//!
//! A [`GlyphMatcher`] takes a binary mask of one half of a card's corner
//! region, isolates the glyph, and scores it against each entry of a
//! [`TemplateSet`] by counting disagreeing samples. Bitmaps come from a
//! [`TemplateLoader`], so this crate stays codec-free.

mod labels;
mod loader;
mod matcher;
mod template;

pub use labels::{rank_name, suit_name, Rank, Suit, UNKNOWN};
pub use loader::{CachingLoader, InMemoryTemplates, TemplateLoadError, TemplateLoader};
pub use matcher::{
    disagreement_count, GlyphError, GlyphMatch, GlyphMatchParams, GlyphMatcher, GlyphReport,
    TemplateTrial, TrialOutcome,
};
pub use template::{TemplateEntry, TemplateSet, DEFAULT_TEMPLATE_EXTENSION, SUIT_PRESIZE};
