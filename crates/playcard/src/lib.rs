//! Recognize the rank and suit of a playing card in a photograph.
//!
//! This crate provides:
//! - re-exports of the pixel primitives (`playcard-core`) and the glyph
//!   matcher (`playcard-glyphs`),
//! - [`CardRecognizer`], which wires the stages together behind one
//!   [`RecognizerParams`] value,
//! - (feature `image`) decoding helpers, a filesystem template loader, a PNG
//!   debug dump and JSON config/report files,
//! - (feature `cli`) the `playcard` binary.
//!
//! ## Quickstart
//!
//! ```no_run
//! use playcard::detect::{load_rgb, rgb_view, FsTemplateLoader};
//! use playcard::{CardRecognizer, RecognizerParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = load_rgb("card.jpg")?;
//! let recognizer = CardRecognizer::standard(RecognizerParams::default(), "Card_Imgs", "jpg");
//! let result = recognizer.recognize(&rgb_view(&img), &FsTemplateLoader)?;
//! println!("{} of {}", result.rank_name(), result.suit_name());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `playcard::core`: image containers and pipeline stages.
//! - `playcard::glyphs`: template sets, loaders, matcher and labels.
//! - `playcard::detect` (feature `image`): helpers around `image::RgbImage`.
//! - `playcard::io` (feature `image`): JSON config and report files.

pub use playcard_core as core;
pub use playcard_glyphs as glyphs;

mod params;
mod recognizer;

pub use params::{CardPolarity, RecognizerParams};
pub use recognizer::{
    CardRecognition, CardRecognizer, Classification, DebugArtifact, DebugObserver, NoopObserver,
    RecognizeError, RANKS_SUBDIR, SUITS_SUBDIR,
};

pub use playcard_glyphs::{Rank, Suit};

#[cfg(feature = "image")]
pub mod detect;

#[cfg(feature = "image")]
pub mod io;
