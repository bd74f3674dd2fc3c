//! Helpers around `image::RgbImage`: decoding, template loading and PNG
//! debug dumps.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ::image::{ExtendedColorType, ImageReader};

use crate::core::{self, GrayImage, RgbImage};
use crate::glyphs::{TemplateLoadError, TemplateLoader};
use crate::{CardRecognition, CardRecognizer, DebugArtifact, DebugObserver, RecognizeError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid RGB image buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbBuffer { expected: usize, got: usize },

    #[error("invalid RGB image dimensions (width={width}, height={height})")]
    InvalidRgbDimensions { width: u32, height: u32 },

    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error(transparent)]
    Recognize(#[from] RecognizeError),
}

/// Decode any supported format into 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<::image::RgbImage, DetectError> {
    let path = path.as_ref();
    let load = || -> Result<::image::RgbImage, ::image::ImageError> {
        Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?.to_rgb8())
    };
    load().map_err(|source| DetectError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert an `image::RgbImage` into the lightweight `playcard-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> core::RgbImageView<'_> {
    core::RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build an `image::RgbImage` from a packed RGB buffer.
pub fn rgb_image_from_slice(
    width: u32,
    height: u32,
    bytes: &[u8],
) -> Result<::image::RgbImage, DetectError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(DetectError::InvalidRgbDimensions { width, height })?;
    if bytes.len() != expected {
        return Err(DetectError::InvalidRgbBuffer {
            expected,
            got: bytes.len(),
        });
    }
    ::image::RgbImage::from_raw(width, height, bytes.to_vec())
        .ok_or(DetectError::InvalidRgbDimensions { width, height })
}

/// Load an image from disk and recognize the card in it.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))
)]
pub fn recognize_file<L: TemplateLoader + ?Sized>(
    path: impl AsRef<Path>,
    recognizer: &CardRecognizer,
    loader: &L,
) -> Result<CardRecognition, DetectError> {
    let img = load_rgb(path)?;
    Ok(recognizer.recognize(&rgb_view(&img), loader)?)
}

/// Decodes templates from the filesystem with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsTemplateLoader;

impl TemplateLoader for FsTemplateLoader {
    fn load(&self, path: &Path) -> Result<Rc<RgbImage>, TemplateLoadError> {
        if !path.is_file() {
            return Err(TemplateLoadError::NotFound(path.to_path_buf()));
        }
        let decoded = load_rgb(path).map_err(|e| TemplateLoadError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Rc::new(RgbImage {
            width: decoded.width() as usize,
            height: decoded.height() as usize,
            data: decoded.into_raw(),
        }))
    }
}

/// Writes every observed artifact to `dir/<name>.png`.
///
/// Write failures are logged and otherwise ignored.
#[derive(Clone, Debug)]
pub struct ImageDumpObserver {
    dir: PathBuf,
}

impl ImageDumpObserver {
    /// Create the observer, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save(&self, name: &str, data: &[u8], width: usize, height: usize, color: ExtendedColorType) {
        let path = self.dir.join(format!("{name}.png"));
        if let Err(err) = ::image::save_buffer(&path, data, width as u32, height as u32, color) {
            log::warn!("failed to write {}: {err}", path.display());
        } else {
            log::debug!("wrote {}", path.display());
        }
    }

    fn save_gray(&self, name: &str, img: &GrayImage) {
        self.save(name, &img.data, img.width, img.height, ExtendedColorType::L8);
    }

    fn save_rgb(&self, name: &str, img: &RgbImage) {
        self.save(name, &img.data, img.width, img.height, ExtendedColorType::Rgb8);
    }
}

impl DebugObserver for ImageDumpObserver {
    fn observe(&mut self, artifact: DebugArtifact<'_>) {
        let name = artifact.name();
        match artifact {
            DebugArtifact::CardMask(img)
            | DebugArtifact::RankHalf(img)
            | DebugArtifact::SuitHalf(img)
            | DebugArtifact::RankCandidate(img)
            | DebugArtifact::SuitCandidate(img) => self.save_gray(name, img),
            DebugArtifact::CornerOverlay(img)
            | DebugArtifact::Rectified(img)
            | DebugArtifact::CornerRegion(img)
            | DebugArtifact::GlyphCrop(img) => self.save_rgb(name, img),
        }
    }
}
