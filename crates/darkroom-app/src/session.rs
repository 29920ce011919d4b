//! Per-user session context.
//!
//! A [`Session`] owns at most two rasters: the `current` source and the
//! `processed` result derived from it. Loading a new source discards the
//! stale result. Operations that fail leave both untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use darkroom_core::scopes::{self, Analysis};
use darkroom_core::{ChannelMode, ProcessRequest, Raster};
use darkroom_io::export::{self, ExportArtifact};
use darkroom_io::remote::{self, FetchOutcome, RemoteSource};
use darkroom_io::source::{self, LoadedImage};
use darkroom_io::SourceInfo;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Loaded / processed flags shown in the debug panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStatus {
    pub has_current: bool,
    pub has_processed: bool,
}

/// Analysis of the current raster, and of the processed one when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub current: Analysis,
    pub processed: Option<Analysis>,
}

/// Summary of a processed raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedInfo {
    pub width: u32,
    pub height: u32,
    pub mode: ChannelMode,
}

#[derive(Debug, Default)]
pub struct Session {
    config: AppConfig,
    current: Option<LoadedImage>,
    processed: Option<Raster>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            current: None,
            processed: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn current(&self) -> Option<&Raster> {
        self.current.as_ref().map(|c| &c.raster)
    }

    pub fn current_info(&self) -> Option<&SourceInfo> {
        self.current.as_ref().map(|c| &c.info)
    }

    pub fn processed(&self) -> Option<&Raster> {
        self.processed.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            has_current: self.current.is_some(),
            has_processed: self.processed.is_some(),
        }
    }

    /// Decode an uploaded file and make it the current image.
    pub fn load_upload(&mut self, name: &str, declared: Option<&str>, bytes: &[u8]) -> AppResult<&SourceInfo> {
        let loaded = source::load_upload(name, declared, bytes)?;
        Ok(self.replace_current(loaded))
    }

    /// Fetch `url` through `remote` and make the result the current image.
    pub fn load_url(&mut self, remote: &dyn RemoteSource, url: &str) -> AppResult<&SourceInfo> {
        let loaded = remote::load_url(remote, url)?;
        Ok(self.replace_current(loaded))
    }

    /// Make the response of an externally performed fetch the current image.
    pub fn load_fetched(&mut self, url: &str, outcome: FetchOutcome) -> AppResult<&SourceInfo> {
        let loaded = remote::resolve(url, outcome)?;
        Ok(self.replace_current(loaded))
    }

    /// Use an in-memory raster as the current image.
    pub fn load_raster(&mut self, raster: Raster) -> &SourceInfo {
        self.replace_current(source::from_raster(raster))
    }

    fn replace_current(&mut self, loaded: LoadedImage) -> &SourceInfo {
        if self.processed.take().is_some() {
            debug!("discarded processed image of previous source");
        }
        &self.current.insert(loaded).info
    }

    /// Filter and optionally resize the current image into `processed`.
    pub fn process(&mut self, request: &ProcessRequest) -> AppResult<ProcessedInfo> {
        let current = self.current().ok_or(AppError::NoImage)?;
        let filter = request.filter;
        if let Some(slider) = self.config.slider(filter.kind) {
            if !slider.contains(filter.intensity) {
                debug!(
                    filter = filter.kind.label(),
                    intensity = filter.intensity,
                    min = slider.min,
                    max = slider.max,
                    "intensity outside slider range, applying as given"
                );
            }
        }
        let out = darkroom_core::process(current, request)?;
        let info = ProcessedInfo {
            width: out.width(),
            height: out.height(),
            mode: out.mode(),
        };
        self.processed = Some(out);
        Ok(info)
    }

    /// Scopes of the current image, with the processed one for comparison.
    pub fn analyze(&self) -> AppResult<Comparison> {
        let current = self.current().ok_or(AppError::NoImage)?;
        let comparison = Comparison {
            current: scopes::analyze(current),
            processed: self.processed.as_ref().map(scopes::analyze),
        };
        debug!(with_processed = comparison.processed.is_some(), "analysis complete");
        Ok(comparison)
    }

    /// Encode the processed image for download.
    pub fn export(&self) -> AppResult<ExportArtifact> {
        let processed = self.processed.as_ref().ok_or(AppError::NoProcessedImage)?;
        let mut artifact = export::export(processed)?;
        artifact.file_name.clone_from(&self.config.export_file_name);
        info!(file_name = %artifact.file_name, "export ready");
        Ok(artifact)
    }
}
