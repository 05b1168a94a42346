//! Column masking.
//!
//! Each requested column is rewritten cell by cell: a present value becomes
//! [`MASK_TOKEN`], a null becomes [`MISSING_VALUE`]. The two outcomes are kept
//! distinct so a reader of the masked file can still tell which records never
//! had the field.

use crate::error::{ObfuscatorError, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Replacement for a present value.
pub const MASK_TOKEN: &str = "******";

/// Replacement for a null value.
pub const MISSING_VALUE: &str = "MISSING VALUE";

/// What a masking pass touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskStats {
    pub columns: Vec<ColumnMaskStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMaskStats {
    pub name: String,
    /// Cells replaced by [`MASK_TOKEN`].
    pub masked: usize,
    /// Cells replaced by [`MISSING_VALUE`].
    pub missing: usize,
}

impl MaskStats {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }

    pub fn total_masked(&self) -> usize {
        self.columns.iter().map(|c| c.masked).sum()
    }
}

/// Masks `columns` in `df`, returning the new frame.
///
/// # Errors
///
/// - [`ObfuscatorError::EmptyTable`] if `df` has no rows (checked first).
/// - [`ObfuscatorError::MissingColumns`] naming every requested column that
///   `df` lacks, in request order.
pub fn mask<S: AsRef<str>>(df: DataFrame, columns: &[S]) -> Result<DataFrame> {
    mask_with_stats(df, columns).map(|(df, _)| df)
}

/// Like [`mask`], also reporting per-column replacement counts.
pub fn mask_with_stats<S: AsRef<str>>(
    df: DataFrame,
    columns: &[S],
) -> Result<(DataFrame, MaskStats)> {
    let targets = resolve_targets(&df, columns)?;
    if targets.is_empty() {
        return Ok((df, MaskStats::default()));
    }

    let rows = df.height();
    let mut stats = MaskStats::default();
    for name in &targets {
        let missing = df.column(name)?.null_count();
        stats.columns.push(ColumnMaskStats {
            name: name.clone(),
            masked: rows - missing,
            missing,
        });
    }

    let exprs: Vec<Expr> = df
        .get_column_names()
        .into_iter()
        .map(|name| {
            if targets.iter().any(|t| t == name.as_str()) {
                masked_column(name.as_str())
            } else {
                col(name.as_str())
            }
        })
        .collect();

    let masked = df
        .lazy()
        .select(exprs)
        .collect()
        .map_err(|e| ObfuscatorError::data("Failed to mask columns", e))?;

    tracing::debug!(
        columns = ?stats.column_names(),
        missing = stats.total_missing(),
        "Masked {rows} rows"
    );
    Ok((masked, stats))
}

fn masked_column(name: &str) -> Expr {
    when(col(name).is_null())
        .then(lit(MISSING_VALUE))
        .otherwise(lit(MASK_TOKEN))
        .alias(name)
}

/// Checks preconditions and returns the unique requested columns in order.
fn resolve_targets<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<Vec<String>> {
    if df.height() == 0 {
        return Err(ObfuscatorError::EmptyTable);
    }

    let present: HashSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .collect();

    let mut targets: Vec<String> = Vec::with_capacity(columns.len());
    let mut missing: Vec<String> = Vec::new();
    for name in columns.iter().map(AsRef::as_ref) {
        let bucket = if present.contains(name) {
            &mut targets
        } else {
            &mut missing
        };
        if !bucket.iter().any(|n| n == name) {
            bucket.push(name.to_owned());
        }
    }

    if !missing.is_empty() {
        return Err(ObfuscatorError::MissingColumns(missing));
    }
    Ok(targets)
}
