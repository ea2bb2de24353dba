//! Compression engine.
//!
//! # Responsibilities
//! - Stage uploads in a per-request temporary directory
//! - Single-pass compression at the preset resolution
//! - Target-size mode: bisect the DPI range until the output lands within
//!   tolerance of the requested size, keeping the closest candidate
//!
//! # Design Decisions
//! - Ghostscript failure mid-search keeps the best candidate so far
//! - A search that produces nothing falls back to one run at the DPI floor
//! - The temp directory (and every intermediate file) is removed on drop

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::compress::ghostscript::{Ghostscript, GsError};
use crate::compress::quality::Quality;
use crate::config::CompressionConfig;

/// Error type for a compression request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("workspace I/O error: {0}")]
    Workspace(#[from] std::io::Error),

    #[error(transparent)]
    Run(#[from] GsError),

    #[error("target-size search exhausted, fallback run failed: {0}")]
    Exhausted(#[source] GsError),
}

/// Result of a successful compression.
#[derive(Debug)]
pub struct CompressionOutcome {
    /// The compressed PDF.
    pub data: Vec<u8>,
    /// Size of the upload in bytes.
    pub original_size: u64,
    /// Preset the request resolved to.
    pub quality: Quality,
    /// Requested target size, if any.
    pub target_size_mb: Option<f64>,
    /// Image resolution of the winning run.
    pub dpi: u32,
}

impl CompressionOutcome {
    /// Size of the compressed PDF in bytes.
    pub fn compressed_size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Compressed / original ratio.
    pub fn ratio(&self) -> f64 {
        self.data.len() as f64 / self.original_size as f64
    }
}

/// Bisection window over the DPI range.
///
/// Output size grows with DPI, so an oversized candidate lowers the top of
/// the window and an undersized one raises the bottom.
#[derive(Debug)]
struct DpiSearch {
    low: f64,
    high: f64,
}

impl DpiSearch {
    fn new(min_dpi: u32, start_dpi: u32) -> Self {
        Self {
            low: f64::from(min_dpi),
            high: f64::from(start_dpi),
        }
    }

    fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    fn narrow(&mut self, candidate_size: i64, target_bytes: i64) {
        let mid = self.midpoint();
        if candidate_size > target_bytes {
            self.high = mid;
        } else {
            self.low = mid;
        }
    }

    fn exhausted(&self) -> bool {
        (self.high - self.low) < 1.0
    }
}

/// Ghostscript-backed PDF compressor.
pub struct Compressor {
    gs: Ghostscript,
    config: CompressionConfig,
}

impl Compressor {
    pub fn new(gs: Ghostscript, config: CompressionConfig) -> Self {
        Self { gs, config }
    }

    /// Path of the Ghostscript binary in use.
    pub fn gs_path(&self) -> &std::path::Path {
        self.gs.path()
    }

    /// Compress an uploaded PDF.
    ///
    /// `filename` must already be sanitised; it is used to name staged
    /// files inside the request's temp directory.
    pub async fn compress(
        &self,
        filename: &str,
        data: &[u8],
        quality: Quality,
        target_size_mb: Option<f64>,
    ) -> Result<CompressionOutcome, EngineError> {
        let workspace = tempfile::tempdir()?;
        let input = workspace.path().join(filename);
        tokio::fs::write(&input, data).await?;

        let original_size = data.len() as u64;
        let original_mb = original_size as f64 / (1024.0 * 1024.0);
        let timeout = Duration::from_secs(self.config.gs_timeout_secs);

        // Single pass when there is no target, or the target is no smaller
        // than the upload.
        let target = match target_size_mb {
            Some(target) if target < original_mb => target,
            _ => {
                let output = workspace.path().join(format!("compressed_{filename}"));
                self.gs
                    .compress(&input, &output, quality.dpi(), quality.pdf_settings(), timeout)
                    .await?;
                let data = tokio::fs::read(&output).await?;

                tracing::debug!(
                    dpi = quality.dpi(),
                    original_size,
                    compressed_size = data.len(),
                    "Single-pass compression complete"
                );

                return Ok(CompressionOutcome {
                    data,
                    original_size,
                    quality,
                    target_size_mb,
                    dpi: quality.dpi(),
                });
            }
        };

        let target_bytes = (target * 1024.0 * 1024.0) as i64;

        let mut search = DpiSearch::new(self.config.min_dpi, quality.dpi());
        let mut best: Option<(PathBuf, u32)> = None;
        let mut best_diff = u64::MAX;

        for iteration in 0..self.config.max_iterations {
            let mid = search.midpoint();
            let dpi = mid as u32;
            let output = workspace.path().join(format!("out_{dpi}.pdf"));

            if let Err(error) = self
                .gs
                .compress(&input, &output, dpi, quality.pdf_settings(), timeout)
                .await
            {
                tracing::warn!(%error, dpi, iteration, "Ghostscript pass failed, stopping search");
                break;
            }

            let candidate_size = tokio::fs::metadata(&output).await?.len();
            let diff = (candidate_size as i64 - target_bytes).unsigned_abs();

            tracing::debug!(
                iteration,
                dpi,
                candidate_size,
                target_bytes,
                "Target-size search pass"
            );

            if diff < best_diff {
                best_diff = diff;
                best = Some((output, dpi));
            }
            if diff <= self.config.target_tolerance_bytes {
                break;
            }
            search.narrow(candidate_size as i64, target_bytes);
            if search.exhausted() {
                break;
            }
        }

        let (winner, dpi) = match best {
            Some(found) => found,
            None => {
                // Every pass failed; one last attempt at the floor.
                let output = workspace.path().join(format!("fallback_{filename}"));
                self.gs
                    .compress(
                        &input,
                        &output,
                        self.config.min_dpi,
                        quality.pdf_settings(),
                        timeout,
                    )
                    .await
                    .map_err(EngineError::Exhausted)?;
                (output, self.config.min_dpi)
            }
        };

        let data = tokio::fs::read(&winner).await?;
        tracing::debug!(
            dpi,
            original_size,
            compressed_size = data.len(),
            target_bytes,
            "Target-size compression complete"
        );

        Ok(CompressionOutcome {
            data,
            original_size,
            quality,
            target_size_mb,
            dpi,
        })
    }
}
