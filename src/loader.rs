//! Line Loader
//!
//! Builds a store from line-oriented text: one entry per line, in order.
//!
//! ## Line Rules
//! - `\n` and `\r\n` terminators are stripped
//! - No entry is created after a final trailing newline
//! - Empty interior lines become empty entries
//! - Lines are raw bytes; no UTF-8 requirement

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::shard::ShardBuffer;

/// Push every line of `reader` as a new entry
pub fn load_lines<R: BufRead>(reader: R, config: Config) -> Result<ShardBuffer> {
    let mut store = ShardBuffer::with_config(config)?;
    extend_from_lines(&mut store, reader)?;
    Ok(store)
}

/// Open `path` and load it with `load_lines`
pub fn load_file(path: &Path, config: Config) -> Result<ShardBuffer> {
    let file = File::open(path)?;
    let store = load_lines(BufReader::new(file), config)?;

    tracing::info!(
        path = %path.display(),
        entries = store.len(),
        "loaded entries from file"
    );

    Ok(store)
}

/// Append every line of `reader` to an existing store.
///
/// Returns the number of entries added.
pub fn extend_from_lines<R: BufRead>(store: &mut ShardBuffer, reader: R) -> Result<usize> {
    let mut added = 0;
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        store.push_back(&line);
        added += 1;
    }
    Ok(added)
}
