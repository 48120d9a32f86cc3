//! # ShardBuf
//!
//! A compact in-memory store of byte-string entries with:
//! - Immutable packed chunks holding previously compacted data
//! - A mutable overlay per entry for fresh writes and appends
//! - Partial deletes that never shift shared chunk bytes
//! - Compaction that repacks chunk + overlay content
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │             Callers (CLI, line loader, dump)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ set / get / append / clear /
//!                       │ delete_range / push_back / compact
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     ShardBuffer                              │
//! │               (Vec<Entry>, Vec<Bytes>)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Overlay   │          │   Chunks    │
//!   │  (mutable)  │          │ (immutable) │
//!   └──────┬──────┘          └──────▲──────┘
//!          │       compaction       │
//!          └────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod shard;
pub mod loader;
pub mod dump;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ShardError, Result};
pub use config::Config;
pub use shard::{ChunkAddr, ChunkGeometry, ChunkRef, CompactionStats, Entry, ShardBuffer};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ShardBuf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
