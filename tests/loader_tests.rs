//! Tests for the line loader and debug dump
//!
//! These tests verify:
//! - One entry per line, with terminators stripped
//! - Loading from files on disk
//! - Dump output format before and after compaction

use std::io::{Cursor, Write};

use shardbuf::dump::{dump_to_string, write_dump};
use shardbuf::loader::{extend_from_lines, load_file, load_lines};
use shardbuf::{Config, ShardBuffer, ShardError};
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

fn contents(store: &ShardBuffer) -> Vec<Vec<u8>> {
    (0..store.len()).map(|i| store.read(i).unwrap()).collect()
}

// =============================================================================
// Loader Tests
// =============================================================================

#[test]
fn test_load_lines_one_entry_per_line() {
    let store = load_lines(Cursor::new("alpha\nbeta\ngamma\n"), Config::default()).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(
        contents(&store),
        vec![b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()]
    );
}

#[test]
fn test_load_lines_without_trailing_newline() {
    let store = load_lines(Cursor::new("one\ntwo"), Config::default()).unwrap();

    assert_eq!(contents(&store), vec![b"one".to_vec(), b"two".to_vec()]);
}

#[test]
fn test_load_lines_strips_crlf_and_keeps_blank_lines() {
    let store = load_lines(Cursor::new("a\r\n\r\nb\n\nc\n"), Config::default()).unwrap();

    assert_eq!(
        contents(&store),
        vec![
            b"a".to_vec(),
            Vec::new(),
            b"b".to_vec(),
            Vec::new(),
            b"c".to_vec()
        ]
    );
}

#[test]
fn test_load_lines_empty_input() {
    let store = load_lines(Cursor::new(""), Config::default()).unwrap();

    assert!(store.is_empty());
}

#[test]
fn test_load_lines_raw_bytes() {
    let input: &[u8] = &[0xff, 0x00, b'\n', 0xfe];
    let store = load_lines(Cursor::new(input), Config::default()).unwrap();

    assert_eq!(contents(&store), vec![vec![0xffu8, 0x00], vec![0xfeu8]]);
}

#[test]
fn test_load_lines_rejects_bad_config() {
    let config = Config::builder().chunk_log(0).build();

    assert!(matches!(
        load_lines(Cursor::new("x\n"), config),
        Err(ShardError::Config(_))
    ));
}

#[test]
fn test_extend_from_lines_appends_after_existing() {
    let mut store = ShardBuffer::new();
    store.push_back(b"existing");

    let added = extend_from_lines(&mut store, Cursor::new("x\ny\n")).unwrap();

    assert_eq!(added, 2);
    assert_eq!(store.read(2).unwrap(), b"y".to_vec());
}

#[test]
fn test_load_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "hello").unwrap();
    writeln!(file, "world").unwrap();
    file.flush().unwrap();

    let mut store = load_file(file.path(), Config::default()).unwrap();
    store.compact().unwrap();

    assert_eq!(contents(&store), vec![b"hello".to_vec(), b"world".to_vec()]);
    assert_eq!(&store.chunks()[0][..], b"helloworld");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    assert!(matches!(
        load_file(&missing, Config::default()),
        Err(ShardError::Io(_))
    ));
}

// =============================================================================
// Dump Tests
// =============================================================================

#[test]
fn test_dump_format() {
    let mut store = ShardBuffer::new();
    store.push_back(b"hello");
    store.push_back(b"world");
    store.compact().unwrap();
    store.append(0, b" there").unwrap();
    store.push_back(b"new");

    let dump = dump_to_string(&store).unwrap();

    assert_eq!(
        dump,
        "entry 0 (0:0,5): [ there]\n\
         entry 1 (0:5,5): []\n\
         entry 2 (-,0): [new]\n\
         chunk-0: [helloworld]\n"
    );
}

#[test]
fn test_dump_empty_store() {
    let store = ShardBuffer::new();
    let mut out = Vec::new();

    write_dump(&store, &mut out).unwrap();

    assert!(out.is_empty());
}
