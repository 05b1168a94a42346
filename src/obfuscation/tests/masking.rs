use super::*;
use crate::error::ErrorKind;
use crate::obfuscation::{
    MASK_TOKEN, MISSING_VALUE, MaskStats, SupportedFormat, decode, mask, mask_with_stats,
};

fn tokens(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some((*v).to_owned())).collect()
}

#[test]
fn test_mask_replaces_requested_columns_only() -> Result<()> {
    let df = decode(
        b"student_id,name,course,cohort,graduation_date,email_address\n\
          1234,Jane Walker,Data Science,2023-08-15,2025-06-30,jane.walker@example.com\n",
        SupportedFormat::Csv,
    )?;
    let masked = mask(df.clone(), &["name", "email_address"])?;

    assert_eq!(strings(&masked, "name")?, tokens(&[MASK_TOKEN]));
    assert_eq!(strings(&masked, "email_address")?, tokens(&[MASK_TOKEN]));
    assert_eq!(strings(&masked, "course")?, strings(&df, "course")?);
    assert_eq!(column_names(&masked), column_names(&df));
    assert_eq!(
        masked.column("student_id")?.dtype(),
        df.column("student_id")?.dtype()
    );
    Ok(())
}

#[test]
fn test_nulls_become_missing_value_sentinel() -> Result<()> {
    let (masked, stats) = mask_with_stats(students_with_gaps()?, &["name", "email_address"])?;

    assert_eq!(
        strings(&masked, "name")?,
        tokens(&[MISSING_VALUE, MASK_TOKEN, MASK_TOKEN, MISSING_VALUE, MASK_TOKEN])
    );
    assert_eq!(
        strings(&masked, "email_address")?,
        tokens(&[MASK_TOKEN, MISSING_VALUE, MASK_TOKEN, MASK_TOKEN, MISSING_VALUE])
    );
    assert_eq!(stats.column_names(), vec!["name", "email_address"]);
    assert_eq!(stats.total_missing(), 4);
    assert_eq!(stats.total_masked(), 6);
    Ok(())
}

#[test]
fn test_all_null_json_columns_are_missing_not_masked() -> Result<()> {
    let df = decode(
        br#"[{"student_id": 1, "name": null, "email_address": null}]"#,
        SupportedFormat::Json,
    )?;
    let masked = mask(df, &["name", "email_address"])?;

    assert_eq!(strings(&masked, "name")?, tokens(&[MISSING_VALUE]));
    assert_eq!(strings(&masked, "email_address")?, tokens(&[MISSING_VALUE]));
    Ok(())
}

#[test]
fn test_mask_is_idempotent() -> Result<()> {
    let once = mask(students_with_gaps()?, &["name"])?;
    let twice = mask(once.clone(), &["name"])?;

    assert_eq!(strings(&twice, "name")?, tokens(&[MASK_TOKEN; 5]));
    assert!(!strings(&twice, "name")?.contains(&Some(MISSING_VALUE.to_owned())));
    assert!(twice.column("course")?.as_materialized_series().equals(
        once.column("course")?.as_materialized_series()
    ));
    Ok(())
}

#[test]
fn test_empty_column_list_is_noop() -> Result<()> {
    let df = students_with_gaps()?;
    let no_columns: [&str; 0] = [];
    let (masked, stats) = mask_with_stats(df.clone(), &no_columns)?;

    assert!(masked.equals_missing(&df));
    assert_eq!(stats, MaskStats::default());
    Ok(())
}

#[test]
fn test_zero_rows_is_empty_table_even_with_bad_columns() -> Result<()> {
    let df = decode(
        b"student_id,name,course,cohort,graduation_date,email_address",
        SupportedFormat::Csv,
    )?;
    let err = mask(df, &["name", "ghost_column"]).expect_err("no rows");
    assert_eq!(err.kind(), ErrorKind::EmptyTable);
    assert_eq!(
        err.to_string(),
        "Input DataFrame is empty. Cannot proceed with processing."
    );

    let err = mask(DataFrame::empty(), &["email_address"]).expect_err("no columns at all");
    assert_eq!(err.kind(), ErrorKind::EmptyTable);
    Ok(())
}

#[test]
fn test_missing_columns_listed_in_request_order() -> Result<()> {
    let err = mask(
        students_with_gaps()?,
        &["zeta", "name", "ghost_column", "zeta"],
    )
    .expect_err("unknown columns");

    match err {
        crate::error::ObfuscatorError::MissingColumns(missing) => {
            assert_eq!(missing, vec!["zeta", "ghost_column"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn test_single_ghost_column() -> Result<()> {
    let err = mask(students_with_gaps()?, &["name", "ghost_column"]).expect_err("ghost");
    assert_eq!(
        err.to_string(),
        "The following columns to obfuscate are missing in the DataFrame provided. \
         Missing columns: ghost_column"
    );
    Ok(())
}

#[test]
fn test_row_order_is_preserved() -> Result<()> {
    let df = students_with_gaps()?;
    let masked = mask(df.clone(), &["email_address"])?;
    assert!(masked.column("student_id")?.as_materialized_series().equals(
        df.column("student_id")?.as_materialized_series()
    ));
    assert_eq!(strings(&masked, "name")?, strings(&df, "name")?);
    Ok(())
}
