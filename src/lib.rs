//! # PII Obfuscator
//!
//! Fetches a CSV, JSON or Parquet file from object storage, masks the
//! requested personally identifiable columns and returns the file re-encoded
//! in its original format.
//!
//! ## Quick Start
//!
//! ```
//! use pii_obfuscator::obfuscation::Obfuscator;
//! use pii_obfuscator::storage::MemoryStore;
//!
//! let store = MemoryStore::new().with_object(
//!     "mybucket",
//!     "students.csv",
//!     "student_id,name,email_address\n1234,Jane Walker,jane.walker@example.com\n",
//! );
//!
//! let request = r#"{
//!     "file_to_obfuscate": "s3://mybucket/students.csv",
//!     "pii_fields": ["name", "email_address"]
//! }"#;
//!
//! let bytes = Obfuscator::new(store).process(request)?;
//! assert_eq!(
//!     String::from_utf8(bytes)?,
//!     "student_id,name,email_address\n1234,******,******\n"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`obfuscation`]: request parsing, format codec, masking and the pipeline
//! - [`storage`]: the object-fetch boundary and the bundled stores
//! - [`error`]: error types
//! - [`config`] / [`logging`]: host-side setup
//!
//! ## Missing Values
//!
//! Present values in a masked column become `"******"`; nulls become
//! `"MISSING VALUE"`, so the masked file still shows which records lacked the
//! field.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;
pub mod obfuscation;
pub mod storage;

pub use error::{ErrorKind, FetchError, ObfuscatorError, Result};
pub use obfuscation::{ObfuscationRequest, Obfuscator, SupportedFormat, process};
