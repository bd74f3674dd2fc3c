//! JSON configuration and report files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::glyphs::DEFAULT_TEMPLATE_EXTENSION;
use crate::{CardRecognition, CardRecognizer, RecognizeError, RecognizerParams};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_templates_dir() -> String {
    "Card_Imgs".to_string()
}

fn default_template_extension() -> String {
    DEFAULT_TEMPLATE_EXTENSION.to_string()
}

/// Configuration of one recognition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizeConfig {
    #[serde(default)]
    pub image_path: Option<String>,
    /// Root holding `Ranks/` and `Suits/`.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "default_template_extension")]
    pub template_extension: String,
    /// Where to write the JSON report.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Where to dump intermediate PNGs.
    #[serde(default)]
    pub debug_dir: Option<String>,
    #[serde(default)]
    pub params: RecognizerParams,
}

impl Default for RecognizeConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            templates_dir: default_templates_dir(),
            template_extension: default_template_extension(),
            output_path: None,
            debug_dir: None,
            params: RecognizerParams::default(),
        }
    }
}

impl RecognizeConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Recognizer over the standard template layout below `templates_dir`.
    pub fn build_recognizer(&self) -> CardRecognizer {
        CardRecognizer::standard(
            self.params.clone(),
            &self.templates_dir,
            &self.template_extension,
        )
    }
}

/// Outcome of one run as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizeReport {
    pub image_path: String,
    pub templates_dir: String,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub suit: Option<String>,
    #[serde(default)]
    pub recognition: Option<CardRecognition>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RecognizeReport {
    pub fn new(
        image_path: impl AsRef<Path>,
        config: &RecognizeConfig,
        result: &Result<CardRecognition, RecognizeError>,
    ) -> Self {
        let (recognition, error) = match result {
            Ok(rec) => (Some(rec.clone()), None),
            Err(err) => (None, Some(err.to_string())),
        };
        let name_of = |matched: bool, name: &str| matched.then(|| name.to_string());
        Self {
            image_path: image_path.as_ref().display().to_string(),
            templates_dir: config.templates_dir.clone(),
            rank: recognition
                .as_ref()
                .and_then(|r| name_of(r.rank.is_matched(), r.rank_name())),
            suit: recognition
                .as_ref()
                .and_then(|r| name_of(r.suit.is_matched(), r.suit_name())),
            recognition,
            error,
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Resolve an optional path string.
pub fn optional_path(path: &Option<String>) -> Option<PathBuf> {
    path.as_ref().map(PathBuf::from)
}
