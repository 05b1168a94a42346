//! PII obfuscation of tabular files.
//!
//! The pipeline is a straight line of pure stages around one external call:
//!
//! ```text
//! raw request ─> ObfuscationRequest::parse
//!             ─> ObjectFetcher::fetch        (external)
//!             ─> TabularCodec::decode
//!             ─> mask
//!             ─> TabularCodec::encode        ─> bytes
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pii_obfuscator::obfuscation::Obfuscator;
//! use pii_obfuscator::storage::LocalStore;
//!
//! let obfuscator = Obfuscator::new(LocalStore::new("/srv/buckets"));
//! let bytes = obfuscator.process(
//!     r#"{"file_to_obfuscate": "s3://mybucket/data.csv", "pii_fields": ["name", "email_address"]}"#,
//! )?;
//! std::fs::write("data.masked.csv", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod executor;
pub mod format;
pub mod masking;
pub mod request;

pub use codec::{CodecOptions, TabularCodec, decode, encode};
pub use executor::{Obfuscator, RunReport, process};
pub use format::{SUPPORTED_EXTENSIONS, SupportedFormat};
pub use masking::{ColumnMaskStats, MASK_TOKEN, MISSING_VALUE, MaskStats, mask, mask_with_stats};
pub use request::{COLUMNS_FIELD, ObfuscationRequest};
