//! Configuration for ShardBuf
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, ShardError};

/// Smallest accepted chunk log (2-byte chunks)
pub const MIN_CHUNK_LOG: u32 = 1;

/// Largest accepted chunk log: 1 TiB chunks, capped so a chunk size
/// still fits in `usize` on narrower targets
pub const MAX_CHUNK_LOG: u32 = if usize::BITS - 1 < 40 {
    usize::BITS - 1
} else {
    40
};

/// Main configuration for a ShardBuffer instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Chunk Geometry
    // -------------------------------------------------------------------------
    /// Base-2 log of the chunk size.
    /// A virtual address splits into:
    ///   chunk_index  = loc >> chunk_log
    ///   chunk_offset = loc & (2^chunk_log - 1)
    pub chunk_log: u32,

    // -------------------------------------------------------------------------
    // Capacity Hints
    // -------------------------------------------------------------------------
    /// Number of entry slots to reserve up front
    pub entry_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_log: 20, // 1 MiB chunks
            entry_capacity: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration describes a usable store
    pub fn validate(&self) -> Result<()> {
        if !(MIN_CHUNK_LOG..=MAX_CHUNK_LOG).contains(&self.chunk_log) {
            return Err(ShardError::Config(format!(
                "chunk_log {} outside {}..={}",
                self.chunk_log, MIN_CHUNK_LOG, MAX_CHUNK_LOG
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the chunk log (chunk size = 2^chunk_log bytes)
    pub fn chunk_log(mut self, log: u32) -> Self {
        self.config.chunk_log = log;
        self
    }

    /// Reserve room for this many entries
    pub fn entry_capacity(mut self, count: usize) -> Self {
        self.config.entry_capacity = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
