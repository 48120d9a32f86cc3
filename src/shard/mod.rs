//! Shard Module
//!
//! Chunked entry store: immutable packed chunks plus per-entry overlays.
//!
//! ## Responsibilities
//! - Map virtual addresses to (chunk index, chunk offset) pairs
//! - Point reads/writes, append, full and partial deletes per entry
//! - Compaction of chunk + overlay content into fresh chunk storage
//!
//! ## Layout
//! ```text
//!   entries                           chunks
//! ┌─────────────────────────────┐   ┌──────────────────────┐
//! │ 0: span 0:0+5   overlay ""  │──▶│ chunk-0: helloworld  │
//! │ 1: span 0:5+5   overlay "!" │──▶│                      │
//! │ 2: no span      overlay "x" │   └──────────────────────┘
//! └─────────────────────────────┘
//! ```
//! Logical content of an entry = chunk span bytes, then overlay bytes.

mod addressing;
mod entry;
mod buffer;
mod compaction;

pub use addressing::{ChunkAddr, ChunkGeometry};
pub use entry::{ChunkRef, Entry};
pub use buffer::ShardBuffer;
pub use compaction::CompactionStats;
