//! The closed set of file formats the obfuscator reads and writes.

use crate::error::{ObfuscatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extensions accepted in a location, in display order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "json", "parquet"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFormat {
    /// Comma-delimited text with a header row.
    Csv,
    /// An array of flat JSON objects, one per row.
    Json,
    /// Apache Parquet, the columnar binary format.
    Parquet,
}

impl SupportedFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Parquet => "parquet",
        }
    }

    /// Derives the format from the trailing extension of a path or key.
    ///
    /// Only the final path segment is considered, so a dotted directory name
    /// never counts as an extension. Matching is case-insensitive.
    pub fn from_path(path: &str) -> Result<Self> {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        Self::from_extension(&extension).map_err(|_| ObfuscatorError::UnsupportedFormat {
            extension,
            location: Some(path.to_owned()),
        })
    }

    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "parquet" => Ok(Self::Parquet),
            other => Err(ObfuscatorError::UnsupportedFormat {
                extension: other.to_owned(),
                location: None,
            }),
        }
    }
}

impl FromStr for SupportedFormat {
    type Err = ObfuscatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(
            SupportedFormat::from_path("s3://bucket/data/FILE.CSV").ok(),
            Some(SupportedFormat::Csv)
        );
        assert_eq!(
            SupportedFormat::from_path("s3://bucket/data.v2/file.Parquet").ok(),
            Some(SupportedFormat::Parquet)
        );
    }

    #[test]
    fn test_from_path_ignores_dotted_directories() {
        let err = SupportedFormat::from_path("s3://bucket/data.csv/readme")
            .expect_err("no extension on the file name");
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = SupportedFormat::from_path("s3://bucket/file.txt").expect_err("txt");
        assert!(err.to_string().contains(".txt"));
        assert!(err.to_string().contains("s3://bucket/file.txt"));

        let err = "xml".parse::<SupportedFormat>().expect_err("xml");
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_from_str_accepts_leading_dot() {
        assert_eq!(".json".parse::<SupportedFormat>().ok(), Some(SupportedFormat::Json));
    }
}
