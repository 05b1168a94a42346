//! Decoding and encoding of tabular payloads.
//!
//! Every format has exactly one reader and one writer, chosen by a single
//! `match` on [`SupportedFormat`], so the read and write paths cannot drift
//! apart. Payloads are held entirely in memory.

use super::format::SupportedFormat;
use crate::error::{ObfuscatorError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::num::NonZeroUsize;

/// Tuning knobs for the polars readers and writers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Rows scanned to infer CSV column types. `None` scans the whole file.
    pub csv_infer_schema_length: Option<usize>,
    /// Records scanned to infer JSON columns and types. `None` scans every record.
    pub json_infer_schema_length: Option<usize>,
    /// Parquet row group size; `None` leaves the polars default.
    pub parquet_row_group_size: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct TabularCodec {
    options: CodecOptions,
}

impl TabularCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn decode(&self, bytes: &[u8], format: SupportedFormat) -> Result<DataFrame> {
        let df = match format {
            SupportedFormat::Csv => self.read_csv(bytes)?,
            SupportedFormat::Json => JsonReader::new(Cursor::new(bytes))
                .with_json_format(JsonFormat::Json)
                .infer_schema_len(
                    self.options
                        .json_infer_schema_length
                        .and_then(NonZeroUsize::new),
                )
                .finish()
                .map_err(|e| ObfuscatorError::data("Failed to read JSON", e))?,
            SupportedFormat::Parquet => ParquetReader::new(Cursor::new(bytes))
                .finish()
                .map_err(|e| ObfuscatorError::data("Failed to read Parquet", e))?,
        };

        tracing::debug!(
            %format,
            rows = df.height(),
            columns = df.width(),
            "Decoded {} bytes",
            bytes.len()
        );
        Ok(df)
    }

    /// Decodes using a format name such as `"csv"` or `".parquet"`.
    pub fn decode_named(&self, bytes: &[u8], format: &str) -> Result<DataFrame> {
        self.decode(bytes, format.parse()?)
    }

    pub fn encode(&self, df: &mut DataFrame, format: SupportedFormat) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();

        match format {
            SupportedFormat::Csv => CsvWriter::new(&mut buffer)
                .include_header(true)
                .finish(df)
                .map_err(|e| ObfuscatorError::data("Failed to write CSV", e))?,
            SupportedFormat::Json => JsonWriter::new(&mut buffer)
                .with_json_format(JsonFormat::Json)
                .finish(df)
                .map_err(|e| ObfuscatorError::data("Failed to write JSON", e))?,
            SupportedFormat::Parquet => {
                ParquetWriter::new(&mut buffer)
                    .with_row_group_size(self.options.parquet_row_group_size)
                    .finish(df)
                    .map_err(|e| ObfuscatorError::data("Failed to write Parquet", e))?;
            }
        }

        tracing::debug!(%format, rows = df.height(), "Encoded {} bytes", buffer.len());
        Ok(buffer)
    }

    pub fn encode_named(&self, df: &mut DataFrame, format: &str) -> Result<Vec<u8>> {
        self.encode(df, format.parse()?)
    }

    fn read_csv(&self, bytes: &[u8]) -> Result<DataFrame> {
        // Without a header there is nothing to name the columns after.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ObfuscatorError::NoColumnsToParse);
        }

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.options.csv_infer_schema_length)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|e| ObfuscatorError::data("Failed to read CSV", e))
    }
}

/// Decodes with default [`CodecOptions`].
pub fn decode(bytes: &[u8], format: SupportedFormat) -> Result<DataFrame> {
    TabularCodec::default().decode(bytes, format)
}

/// Encodes with default [`CodecOptions`].
pub fn encode(df: &mut DataFrame, format: SupportedFormat) -> Result<Vec<u8>> {
    TabularCodec::default().encode(df, format)
}
