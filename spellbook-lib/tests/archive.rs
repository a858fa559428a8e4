use std::fs::File;
use std::io::Write;
use std::path::Path;

use spellbook_lib::{LibError, extract_json, fetch_archive};
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, contents) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn extracts_json_entry() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("AllSets-x.json.zip");
    write_zip(
        &archive,
        &[("README.txt", "not this"), ("AllSets-x.json", r#"{"LEA": {}}"#)],
    );

    let dest = dir.path().join("AllSets-x.json");
    extract_json(&archive, &dest).unwrap();
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), r#"{"LEA": {}}"#);
}

#[test]
fn archive_without_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("empty.zip");
    write_zip(&archive, &[("README.txt", "nothing here")]);

    let err = extract_json(&archive, &dir.path().join("out.json")).unwrap_err();
    assert!(matches!(err, LibError::MissingEntry { .. }));
}

#[test]
fn existing_json_skips_download() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("AllSets-x.json");
    std::fs::write(&json, "{}").unwrap();

    // Unreachable URL: only succeeds if nothing is fetched.
    let path = fetch_archive("http://127.0.0.1:9/AllSets-x.json.zip", dir.path(), false).unwrap();
    assert_eq!(path, json);
}
