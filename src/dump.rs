//! Debug Dump
//!
//! Human-readable listing of a store's entries and chunks.
//!
//! ## Format
//! ```text
//! entry 0 (0:0,5): [ world]
//! entry 1 (-,0): [fresh bytes]
//! chunk-0: [hello]
//! ```
//! Entries show `chunk index:chunk offset,chunk length` and their overlay.
//! Bytes are rendered as lossy UTF-8.

use std::io::Write;

use crate::error::Result;
use crate::shard::ShardBuffer;

/// Write the dump of `store` to `out`
pub fn write_dump<W: Write>(store: &ShardBuffer, out: &mut W) -> Result<()> {
    for (idx, entry) in store.entries().iter().enumerate() {
        match entry.chunk {
            Some(chunk) => write!(
                out,
                "entry {} ({}:{},{}): ",
                idx, chunk.addr.index, chunk.addr.offset, chunk.len
            )?,
            None => write!(out, "entry {} (-,0): ", idx)?,
        }
        writeln!(out, "[{}]", String::from_utf8_lossy(&entry.overlay))?;
    }

    for (idx, chunk) in store.chunks().iter().enumerate() {
        writeln!(out, "chunk-{}: [{}]", idx, String::from_utf8_lossy(chunk))?;
    }

    Ok(())
}

/// Render the dump into a string
pub fn dump_to_string(store: &ShardBuffer) -> Result<String> {
    let mut out = Vec::new();
    write_dump(store, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
