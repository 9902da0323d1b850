//! Reading the recitations CSV.
//!
//! [`read_rows`] loads the whole table into memory in file order. Rows are deserialized with
//! Serde by header name, so column order does not matter and unknown columns are ignored.
//! Ragged rows are accepted: missing trailing cells read as empty and cells beyond the header
//! are dropped.

use crate::error::{ImportError, ImportResult};
use crate::io::compression::auto_detect_reader;
use crate::row::{REQUIRED_COLUMNS, Row};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Read every row of the CSV at `path`.
///
/// # Errors
/// - [`ImportError::InputNotFound`] if the file does not exist.
/// - [`ImportError::InputMalformed`] if the file cannot be read as CSV, or its header lacks
///   one of [`REQUIRED_COLUMNS`]. Row numbers in messages are 1-based and exclude the header.
pub fn read_rows(path: impl AsRef<Path>) -> ImportResult<Vec<Row>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ImportError::InputNotFound(path.to_path_buf()),
        _ => ImportError::InputMalformed(format!("open {}: {e}", path.display())),
    })?;
    let rdr = auto_detect_reader(f, path).map_err(|e| {
        ImportError::InputMalformed(format!("setup decompression for {}: {e:#}", path.display()))
    })?;
    read_rows_from(rdr)
}

/// Parse rows from any reader; see [`read_rows`].
///
/// # Errors
/// Returns [`ImportError::InputMalformed`] on a missing column or unparsable content.
pub fn read_rows_from<R: Read>(reader: R) -> ImportResult<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = rdr
        .headers()
        .map_err(|e| ImportError::InputMalformed(format!("read CSV header: {e}")))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}'))
        .collect();
    check_columns(&headers)?;

    let width = headers.len();
    let mut out = Vec::<Row>::new();
    for (i, rec) in rdr.records().enumerate() {
        let malformed =
            |e: csv::Error| ImportError::InputMalformed(format!("parse CSV record #{}: {e}", i + 1));
        let mut record = rec.map_err(malformed)?;
        record.truncate(width);
        while record.len() < width {
            record.push_field("");
        }
        out.push(record.deserialize::<Row>(Some(&headers)).map_err(malformed)?);
    }
    debug!(rows = out.len(), "parsed CSV");
    Ok(out)
}

fn check_columns(headers: &csv::StringRecord) -> ImportResult<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::InputMalformed(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_columns_become_empty() -> anyhow::Result<()> {
        let data = "Recitation,Context,Axis,Archived,Active\n   ,Work,  ,FALSE,TRUE\n";
        let rows = read_rows_from(data.as_bytes())?;
        assert_eq!(rows, vec![Row::new("", "Work", "", "FALSE", "TRUE")]);
        Ok(())
    }

    #[test]
    fn flags_pass_through_raw() -> anyhow::Result<()> {
        let data = "Recitation,Context,Axis,Archived,Active\nHi,,, true ,\n";
        let rows = read_rows_from(data.as_bytes())?;
        assert_eq!(rows[0].archived, " true ");
        assert_eq!(rows[0].active, "");
        Ok(())
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() -> anyhow::Result<()> {
        let data = "Notes,Active,Archived,Axis,Context,Recitation\nx,TRUE,FALSE,Body,Gym,I move\n";
        let rows = read_rows_from(data.as_bytes())?;
        assert_eq!(rows, vec![Row::new("I move", "Gym", "Body", "FALSE", "TRUE")]);
        Ok(())
    }

    #[test]
    fn short_rows_are_padded() -> anyhow::Result<()> {
        let data = "Recitation,Context,Axis,Archived,Active\nHi,Work\n";
        let rows = read_rows_from(data.as_bytes())?;
        assert_eq!(rows, vec![Row::new("Hi", "Work", "", "", "")]);
        Ok(())
    }

    #[test]
    fn long_rows_drop_extra_cells() -> anyhow::Result<()> {
        let data = "Recitation,Context,Axis,Archived,Active\nHi,Work,Body,FALSE,TRUE,stray,more\n";
        let rows = read_rows_from(data.as_bytes())?;
        assert_eq!(rows, vec![Row::new("Hi", "Work", "Body", "FALSE", "TRUE")]);
        Ok(())
    }

    #[test]
    fn missing_column_is_malformed() {
        let data = "Recitation,Context,Axis\nHi,Work,Body\n";
        let err = read_rows_from(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::InputMalformed(_)));
        assert!(err.to_string().contains("Archived, Active"));
    }

    #[test]
    fn byte_order_mark_is_ignored() -> anyhow::Result<()> {
        let data = "\u{feff}Recitation,Context,Axis,Archived,Active\nHi,,,,\n";
        let rows = read_rows_from(data.as_bytes())?;
        assert_eq!(rows[0].recitation_text, "Hi");
        Ok(())
    }
}
