//! Template loading seam.
//!
//! The matcher never decodes files itself; it asks a [`TemplateLoader`] for the
//! raw RGB bitmap of each entry. Codec-backed loaders live in the facade crate.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use playcard_core::RgbImage;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateLoadError {
    #[error("template not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode template {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Source of template bitmaps.
pub trait TemplateLoader {
    fn load(&self, path: &Path) -> Result<Rc<RgbImage>, TemplateLoadError>;
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for &L {
    fn load(&self, path: &Path) -> Result<Rc<RgbImage>, TemplateLoadError> {
        (**self).load(path)
    }
}

/// Templates held in memory, keyed by path. Useful for tests and embedded sets.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTemplates {
    images: HashMap<PathBuf, Rc<RgbImage>>,
}

impl InMemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbImage) {
        self.images.insert(path.into(), Rc::new(image));
    }

    pub fn with(mut self, path: impl Into<PathBuf>, image: RgbImage) -> Self {
        self.insert(path, image);
        self
    }
}

impl TemplateLoader for InMemoryTemplates {
    fn load(&self, path: &Path) -> Result<Rc<RgbImage>, TemplateLoadError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| TemplateLoadError::NotFound(path.to_path_buf()))
    }
}

/// Memoizes successful loads of an inner loader across classification calls.
///
/// Failures are not cached, so a template that appears later is picked up.
#[derive(Debug)]
pub struct CachingLoader<L> {
    inner: L,
    cache: RefCell<HashMap<PathBuf, Rc<RgbImage>>>,
}

impl<L: TemplateLoader> CachingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of cached templates.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: TemplateLoader> TemplateLoader for CachingLoader<L> {
    fn load(&self, path: &Path) -> Result<Rc<RgbImage>, TemplateLoadError> {
        if let Some(img) = self.cache.borrow().get(path) {
            return Ok(Rc::clone(img));
        }
        let img = self.inner.load(path)?;
        self.cache
            .borrow_mut()
            .insert(path.to_path_buf(), Rc::clone(&img));
        Ok(img)
    }
}
