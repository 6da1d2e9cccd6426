//! Background extraction with staleness tokens.
//!
//! Each request gets a [`RequestToken`] and runs image decoding plus
//! clustering on tokio's blocking pool. Only the outcome of the most
//! recently issued request is turned into a palette; anything older that
//! finishes late is dropped. Nothing is cancelled, superseded work simply
//! runs to completion and is ignored.

use crate::error::AppError;
use crate::services::image_loader;
use palette_engine::{extract_with_options, ExtractOptions, PaletteRecord, Rgb};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

/// Identifies one extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestToken {
    id: u64,
    source: PathBuf,
    colors: usize,
}

impl RequestToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn colors(&self) -> usize {
        self.colors
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.source.display(), self.colors, self.id)
    }
}

/// What a finished request produced.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub token: RequestToken,
    pub result: Result<Vec<Rgb>, AppError>,
}

/// A request in flight.
#[derive(Debug)]
pub struct PendingExtraction {
    pub token: RequestToken,
    handle: JoinHandle<Result<Vec<Rgb>, AppError>>,
}

impl PendingExtraction {
    /// Wait for the worker. A panicked worker becomes [`AppError::Task`].
    pub async fn wait(self) -> ExtractionOutcome {
        let result = match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(e.into()),
        };
        ExtractionOutcome {
            token: self.token,
            result,
        }
    }
}

/// Issues extraction requests and filters out stale results.
pub struct ExtractionService {
    options: ExtractOptions,
    /// Id of the most recently issued request; 0 before the first.
    latest: AtomicU64,
}

impl ExtractionService {
    /// `options` supplies everything but the color count, which each
    /// request sets.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            latest: AtomicU64::new(0),
        }
    }

    /// Start extracting `colors` colors from the image at `path`.
    ///
    /// The new request supersedes every earlier one. Must be called from
    /// within a tokio runtime.
    pub fn request(&self, path: impl Into<PathBuf>, colors: usize) -> PendingExtraction {
        let token = self.issue(path.into(), colors);
        tracing::debug!(%token, "Extraction requested");

        let options = self.options.clone().k(colors);
        let source = token.source.clone();
        let handle = tokio::task::spawn_blocking(move || -> Result<Vec<Rgb>, AppError> {
            let pixels = image_loader::load_pixels(&source)?;
            Ok(extract_with_options(&pixels, &options)?)
        });
        PendingExtraction { token, handle }
    }

    /// Allocate the next id and publish it as the latest in one step, so
    /// concurrent callers cannot leave an older id published.
    fn issue(&self, source: PathBuf, colors: usize) -> RequestToken {
        let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        RequestToken { id, source, colors }
    }

    /// Whether `token` belongs to the most recent request.
    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.id
    }

    /// Turn the outcome of the current request into a palette.
    ///
    /// Returns `Ok(None)` for a superseded request, whether it succeeded or
    /// failed. Errors of the current request are returned unchanged.
    pub fn accept(&self, outcome: ExtractionOutcome) -> Result<Option<PaletteRecord>, AppError> {
        if !self.is_current(&outcome.token) {
            tracing::debug!(token = %outcome.token, "Dropping stale extraction result");
            return Ok(None);
        }
        let colors = outcome.result?;
        tracing::info!(token = %outcome.token, colors = colors.len(), "Extraction finished");
        Ok(Some(PaletteRecord::from_image(
            colors,
            outcome.token.source.display().to_string(),
        )))
    }

    /// Request, wait and accept in one step.
    pub async fn extract(
        &self,
        path: impl Into<PathBuf>,
        colors: usize,
    ) -> Result<Option<PaletteRecord>, AppError> {
        let outcome = self.request(path, colors).wait().await;
        self.accept(outcome)
    }
}

impl Default for ExtractionService {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}
