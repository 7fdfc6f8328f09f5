//! Integration tests for the file-upload path of the input aggregator.
//!
//! Exercises: read_sources ordering, all-or-nothing failure, and applying a
//! batch to an InputBuffer.

use std::path::PathBuf;

use coderev_core::input::{filter_allowed, read_sources};
use coderev_core::InputBuffer;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn two_files_are_combined_in_selection_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = write(&dir, "a.cpp", "X");
    let b = write(&dir, "b.cpp", "Y");

    let files = read_sources(&[a, b]).await.unwrap();
    let mut buf = InputBuffer::default();
    buf.set_code("previous code");
    buf.apply_sources(&files);

    assert_eq!(
        buf.code(),
        "// --- FILE: a.cpp ---\n\nX\n\n// --- FILE: b.cpp ---\n\nY"
    );
}

#[tokio::test]
async fn order_follows_selection_not_name() {
    let dir = tempfile::TempDir::new().unwrap();
    let z = write(&dir, "z.h", "struct Z;");
    let a = write(&dir, "a.c", "int a;");

    let files = read_sources(&[z, a]).await.unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["z.h", "a.c"]);
}

#[tokio::test]
async fn one_missing_file_fails_the_whole_batch() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = write(&dir, "a.cpp", "X");
    let missing = dir.path().join("missing.cpp");

    let result = read_sources(&[a, missing]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn invalid_utf8_is_read_lossily() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bin.txt");
    std::fs::write(&path, [b'o', b'k', 0xff]).unwrap();

    let files = read_sources(&[path]).await.unwrap();
    assert!(files[0].content.starts_with("ok"));
}

#[tokio::test]
async fn disallowed_extensions_never_reach_the_reader() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = write(&dir, "a.cpp", "X");
    let script = write(&dir, "build.sh", "rm -rf /");

    let kept = filter_allowed(vec![a.clone(), script]);
    assert_eq!(kept, vec![a]);
    let files = read_sources(&kept).await.unwrap();
    assert_eq!(files.len(), 1);
}
