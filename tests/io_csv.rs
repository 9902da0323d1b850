use recitations::{ImportError, Row, read_rows};
use std::fs;

const HEADER: &str = "Recitation,Context,Axis,Archived,Active\n";

#[test]
fn read_rows_preserves_file_order() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("Dashboard - Recitations.csv");
    fs::write(
        &path,
        format!("{HEADER}Zeta,Work,,FALSE,TRUE\nAlpha,,Body,TRUE,\nZeta,Home,,FALSE,FALSE\n"),
    )?;

    let rows = read_rows(&path)?;
    assert_eq!(
        rows,
        vec![
            Row::new("Zeta", "Work", "", "FALSE", "TRUE"),
            Row::new("Alpha", "", "Body", "TRUE", ""),
            Row::new("Zeta", "Home", "", "FALSE", "FALSE"),
        ]
    );
    Ok(())
}

#[test]
fn quoted_cells_with_commas_and_newlines() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("quoted.csv");
    fs::write(
        &path,
        format!("{HEADER}\"I breathe, then act\",\"Work\nDesk\",,FALSE,TRUE\n"),
    )?;

    let rows = read_rows(&path)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].recitation_text, "I breathe, then act");
    assert_eq!(rows[0].context, "Work\nDesk");
    Ok(())
}

#[test]
fn ragged_rows_are_padded_or_cut_to_the_header() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("ragged.csv");
    fs::write(
        &path,
        format!("{HEADER}Hello,Ctx1\nBye,Home,Mind,TRUE\nLong,Gym,Body,FALSE,TRUE,extra\n"),
    )?;

    let rows = read_rows(&path)?;
    assert_eq!(
        rows,
        vec![
            Row::new("Hello", "Ctx1", "", "", ""),
            Row::new("Bye", "Home", "Mind", "TRUE", ""),
            Row::new("Long", "Gym", "Body", "FALSE", "TRUE"),
        ]
    );
    Ok(())
}

#[test]
fn header_only_file_has_no_rows() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("empty.csv");
    fs::write(&path, HEADER)?;
    assert!(read_rows(&path)?.is_empty());
    Ok(())
}

#[test]
fn missing_file_is_input_not_found() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("nope.csv");
    match read_rows(&path) {
        Err(ImportError::InputNotFound(p)) => assert_eq!(p, path),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
    Ok(())
}

#[test]
fn missing_columns_are_malformed() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("bad.csv");
    fs::write(&path, "Recitation,Context\nHi,Work\n")?;

    let err = read_rows(&path).unwrap_err();
    assert!(matches!(err, ImportError::InputMalformed(_)));
    assert!(err.is_fatal());
    let msg = err.to_string();
    assert!(msg.contains("Axis"));
    assert!(msg.contains("Active"));
    Ok(())
}

#[test]
fn empty_file_is_malformed() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("blank.csv");
    fs::write(&path, "")?;
    assert!(matches!(read_rows(&path), Err(ImportError::InputMalformed(_))));
    Ok(())
}

#[test]
fn invalid_utf8_is_malformed() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("latin1.csv");
    let mut bytes = HEADER.as_bytes().to_vec();
    bytes.extend_from_slice(b"Caf\xe9,,,,\n");
    fs::write(&path, bytes)?;

    let err = read_rows(&path).unwrap_err();
    assert!(matches!(err, ImportError::InputMalformed(_)));
    assert!(err.to_string().contains("parse CSV record #1"));
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn gzip_input_is_decompressed() -> anyhow::Result<()> {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("recitations.csv.gz");
    let mut enc = GzEncoder::new(fs::File::create(&path)?, Compression::default());
    enc.write_all(format!("{HEADER}Hello,Ctx1,,FALSE,TRUE\n").as_bytes())?;
    enc.finish()?;

    let rows = read_rows(&path)?;
    assert_eq!(rows, vec![Row::new("Hello", "Ctx1", "", "FALSE", "TRUE")]);
    Ok(())
}
