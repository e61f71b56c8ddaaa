use std::fs;

use thumbnail_engine::{ensure_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("incoming");
    assert!(!new_dir.exists());
    ensure_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rejects_file_in_place_of_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("outgoing");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_dir(&file_path).is_err());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("a.jpg", b"hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "a.jpg");
    assert_eq!(fs::read(&first).unwrap(), b"hello");

    let second = writer.write("a.jpg", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"world");

    // Only the target remains; no temp files are left behind.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("a.jpg", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("a.jpg").exists());
}
