use std::{fs, io::Write, path::PathBuf};

use csv::StringRecord;
use csv_pgload::datasets::{PURCHASE, SURVEY};
use csv_pgload::error::{Error, LoadErrorKind};
use csv_pgload::loader::{encode_copy_buffer, read_source};
use tempfile::tempdir;

fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).expect("create fixture csv");
    file.write_all(contents.as_bytes()).expect("write fixture");
    path
}

#[test]
fn read_source_returns_all_rows_in_file_order() {
    let dir = tempdir().expect("temp dir");
    let path = write_csv(
        &dir,
        "survey.csv",
        "question,user_id,response\n\
         Do you wear glasses?,u1,Yes\n\
         \"Contacts, or glasses?\",u2,\"Glasses\"\n",
    );

    let rows = read_source(&SURVEY, &path, b',').expect("well-formed file");
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Do you wear glasses?");
    assert_eq!(&rows[0][1], "u1");
    assert_eq!(&rows[0][2], "Yes");
    assert_eq!(&rows[1][0], "Contacts, or glasses?");
}

#[test]
fn read_source_fails_on_missing_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("survey.csv");
    let err = read_source(&SURVEY, &path, b',').expect_err("missing file");
    match err {
        Error::Load { table, source, .. } => {
            assert_eq!(table, "survey");
            assert!(matches!(source, LoadErrorKind::Read(_)));
        }
        other => panic!("Expected load error, got {other:?}"),
    }
}

#[test]
fn read_source_fails_fast_on_header_mismatch() {
    let dir = tempdir().expect("temp dir");
    let path = write_csv(
        &dir,
        "survey.csv",
        "user_id,question,response\nu1,Do you wear glasses?,Yes\n",
    );
    let err = read_source(&SURVEY, &path, b',').expect_err("reordered header");
    assert!(matches!(
        err,
        Error::Load {
            source: LoadErrorKind::HeaderMismatch { .. },
            ..
        }
    ));
}

#[test]
fn read_source_reports_row_number_for_short_record() {
    let dir = tempdir().expect("temp dir");
    let path = write_csv(
        &dir,
        "survey.csv",
        "question,user_id,response\n\
         Do you wear glasses?,u1,Yes\n\
         Do you wear glasses?,u2\n",
    );
    let err = read_source(&SURVEY, &path, b',').expect_err("short record");
    match err {
        Error::Load {
            source: LoadErrorKind::FieldCount { row, expected, found },
            ..
        } => {
            assert_eq!(row, 3);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("Expected field count error, got {other:?}"),
    }
}

#[test]
fn read_source_rejects_value_that_does_not_fit_integer_column() {
    let dir = tempdir().expect("temp dir");
    let path = write_csv(
        &dir,
        "purchase.csv",
        "user_id,product_id,style,model_name,color,price\n\
         u1,4,Round,Haskell,Black,95\n\
         u2,4,Round,Haskell,Black,free\n",
    );
    let err = read_source(&PURCHASE, &path, b',').expect_err("bad price");
    match err {
        Error::Load {
            source:
                LoadErrorKind::TypeMismatch {
                    row,
                    column,
                    value,
                    ..
                },
            ..
        } => {
            assert_eq!(row, 3);
            assert_eq!(column, "price");
            assert_eq!(value, "free");
        }
        other => panic!("Expected type mismatch, got {other:?}"),
    }
}

#[test]
fn read_source_rejects_overlong_varchar_value() {
    let dir = tempdir().expect("temp dir");
    let long_id = "u".repeat(256);
    let path = write_csv(
        &dir,
        "survey.csv",
        &format!("question,user_id,response\nDo you wear glasses?,{long_id},Yes\n"),
    );
    let err = read_source(&SURVEY, &path, b',').expect_err("overlong user_id");
    assert!(matches!(
        err,
        Error::Load {
            source: LoadErrorKind::TypeMismatch { row: 2, .. },
            ..
        }
    ));
}

#[test]
fn read_source_honours_alternate_delimiters() {
    let dir = tempdir().expect("temp dir");
    let path = write_csv(
        &dir,
        "survey.csv",
        "question;user_id;response\nDo you wear glasses?;u1;Yes\n",
    );
    let rows = read_source(&SURVEY, &path, b';').expect("semicolon file");
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "u1");
}

#[test]
fn encode_copy_buffer_quotes_every_field() {
    let rows = vec![StringRecord::from(vec!["Do you wear glasses?", "u1", "Yes"])];
    let buffer = encode_copy_buffer(&rows).expect("encode");
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "\"Do you wear glasses?\",\"u1\",\"Yes\"\n"
    );
}

#[test]
fn encode_copy_buffer_keeps_empty_strings_distinct_from_null() {
    // An unquoted empty field would load as NULL under CSV COPY rules.
    let rows = vec![StringRecord::from(vec!["", "u1", ""])];
    let buffer = encode_copy_buffer(&rows).expect("encode");
    assert_eq!(String::from_utf8(buffer).unwrap(), "\"\",\"u1\",\"\"\n");
}

#[test]
fn encode_copy_buffer_escapes_embedded_quotes_and_delimiters() {
    let rows = vec![StringRecord::from(vec![
        "Say \"cheese\", please",
        "u1",
        "line one\nline two",
    ])];
    let buffer = encode_copy_buffer(&rows).expect("encode");
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "\"Say \"\"cheese\"\", please\",\"u1\",\"line one\nline two\"\n"
    );
}

#[test]
fn encode_copy_buffer_of_no_rows_is_empty() {
    let buffer = encode_copy_buffer(&[]).expect("encode");
    assert!(buffer.is_empty());
}
