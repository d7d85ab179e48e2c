use std::fs;

use describer_engine::AtomicFileWriter;
use tempfile::TempDir;

#[test]
fn first_write_creates_missing_data_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("data");
    assert!(!new_dir.exists());

    let writer = AtomicFileWriter::new(new_dir.clone());
    writer.write("config.ron", "()").unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("links.ron", "[]").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("links.ron", "[(id: 1)]").unwrap();
    assert_eq!(first, second);
    assert_eq!(writer.read("links.ron").unwrap().as_deref(), Some("[(id: 1)]"));
}

#[test]
fn missing_file_reads_as_none() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    assert_eq!(writer.read("absent.ron").unwrap(), None);
}

#[test]
fn data_dir_that_is_a_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("links.ron", "[]").is_err());
    assert!(!file_path.with_file_name("links.ron").exists());
}
