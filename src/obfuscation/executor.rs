//! End-to-end obfuscation: parse, fetch, decode, mask, encode.

use super::codec::TabularCodec;
use super::format::SupportedFormat;
use super::masking::mask_with_stats;
use super::request::ObfuscationRequest;
use crate::config::ObfuscatorConfig;
use crate::error::Result;
use crate::storage::{ObjectFetcher, StorageUri};
use polars::prelude::DataFrame;
use std::time::{Duration, Instant};

/// Report generated after a successful invocation
#[derive(Debug, Clone)]
pub struct RunReport {
    pub location: String,
    pub format: SupportedFormat,
    pub rows: usize,
    pub columns: usize,
    /// Columns that were masked, in request order
    pub masked_columns: Vec<String>,
    /// Null cells replaced with the missing-value sentinel
    pub missing_cells: usize,
    pub bytes_in: usize,
    pub bytes_out: usize,
    pub duration: Duration,
}

impl RunReport {
    /// Create a summary message
    pub fn summary(&self) -> String {
        format!(
            "Obfuscated {} ({}): {} rows, {} columns, masked [{}] ({} missing), {} → {} bytes, {:.2}s",
            self.location,
            self.format,
            self.rows,
            self.columns,
            self.masked_columns.join(", "),
            self.missing_cells,
            self.bytes_in,
            self.bytes_out,
            self.duration.as_secs_f64()
        )
    }
}

/// Runs obfuscation requests against one storage collaborator.
///
/// Holds no per-invocation state; the same instance can serve any number of
/// requests.
#[derive(Debug, Clone)]
pub struct Obfuscator<F> {
    fetcher: F,
    codec: TabularCodec,
}

impl<F: ObjectFetcher> Obfuscator<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            codec: TabularCodec::default(),
        }
    }

    pub fn with_config(fetcher: F, config: &ObfuscatorConfig) -> Self {
        Self {
            fetcher,
            codec: TabularCodec::new(config.codec.clone()),
        }
    }

    /// Returns the masked file, re-encoded in its original format.
    pub fn process(&self, raw_request: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        self.process_with_report(raw_request).map(|(bytes, _)| bytes)
    }

    pub fn process_with_report(&self, raw_request: impl AsRef<[u8]>) -> Result<(Vec<u8>, RunReport)> {
        let result = self.run(raw_request.as_ref());
        match &result {
            Ok((_, report)) => tracing::info!("{}", report.summary()),
            Err(e) => tracing::warn!(kind = ?e.kind(), "Obfuscation failed: {e}"),
        }
        result
    }

    /// Fetches and decodes the file at `location`.
    ///
    /// `location` is either a plain `s3://` URI or the wrapped
    /// `{"file_to_obfuscate": "s3://..."}` form.
    pub fn load_table(&self, location: &str) -> Result<(DataFrame, SupportedFormat)> {
        let uri = StorageUri::resolve(location)?;
        let format = SupportedFormat::from_path(&uri.to_string())?;
        let bytes = uri.fetch_with(&self.fetcher)?;
        Ok((self.codec.decode(&bytes, format)?, format))
    }

    fn run(&self, raw_request: &[u8]) -> Result<(Vec<u8>, RunReport)> {
        let start = Instant::now();

        let request = ObfuscationRequest::parse(raw_request)?;
        tracing::info!(
            location = %request.location,
            format = %request.format,
            "Obfuscating {} column(s)",
            request.columns.len()
        );

        let input = request.location.fetch_with(&self.fetcher)?;
        let df = self.codec.decode(&input, request.format)?;
        let (mut masked, stats) = mask_with_stats(df, &request.columns)?;
        let output = self.codec.encode(&mut masked, request.format)?;

        let report = RunReport {
            location: request.location.to_string(),
            format: request.format,
            rows: masked.height(),
            columns: masked.width(),
            masked_columns: stats.column_names(),
            missing_cells: stats.total_missing(),
            bytes_in: input.len(),
            bytes_out: output.len(),
            duration: start.elapsed(),
        };
        Ok((output, report))
    }
}

/// One-shot [`Obfuscator::process`] with default settings.
pub fn process(raw_request: impl AsRef<[u8]>, fetcher: &impl ObjectFetcher) -> Result<Vec<u8>> {
    Obfuscator::new(fetcher).process(raw_request)
}
