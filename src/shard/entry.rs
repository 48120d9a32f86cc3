//! Entry records
//!
//! One struct per entry so a chunk reference and its overlay can never
//! drift out of step.

use super::ChunkAddr;

/// Reference to an entry's chunk-resident bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRef {
    /// Where the span starts
    pub addr: ChunkAddr,

    /// Number of bytes in the span
    pub len: usize,
}

impl ChunkRef {
    pub fn new(addr: ChunkAddr, len: usize) -> Self {
        Self { addr, len }
    }
}

/// A logical record: chunk-resident prefix followed by overlay suffix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Previously compacted bytes (`None` = empty reference)
    pub chunk: Option<ChunkRef>,

    /// Bytes written since the last compaction
    pub overlay: Vec<u8>,
}

impl Entry {
    /// Overlay-only entry
    pub fn from_overlay(overlay: Vec<u8>) -> Self {
        Self {
            chunk: None,
            overlay,
        }
    }

    /// Length of the chunk-resident prefix
    pub fn chunk_len(&self) -> usize {
        self.chunk.map_or(0, |c| c.len)
    }

    /// Chunk-resident length plus overlay length
    pub fn logical_len(&self) -> usize {
        self.chunk_len() + self.overlay.len()
    }

    /// Chunk the entry's span lives in, if it has one
    pub fn chunk_index(&self) -> Option<usize> {
        self.chunk.map(|c| c.addr.index)
    }

    /// Drop all content
    pub fn reset(&mut self) {
        self.chunk = None;
        self.overlay.clear();
    }
}
