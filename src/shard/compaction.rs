//! Compaction
//!
//! Folds every entry's chunk span and overlay into freshly packed chunks.
//!
//! ## Algorithm
//! 1. Placement: an entry with a chunk span stays in that chunk. An entry
//!    without one (fresh `push_back`, `set`, `clear`) goes first-fit into
//!    the earliest chunk, from a forward-moving cursor, that still has room
//!    under the chunk size; a new chunk is opened when none does
//! 2. Allocate `max(target) + 1` chunks, sized from the placement
//! 3. Walk entries in index order, appending span bytes then overlay
//!    bytes to the entry's target chunk, recording the new offset/length
//! 4. Install the new chunk sequence, rewrite references, drop overlays
//!
//! Steps 1-3 only read the store, so a failure leaves it untouched.
//! Entries sharing a chunk end up packed together in entry order, and a
//! second pass right after the first reproduces the same layout.

use std::collections::BTreeSet;

use bytes::BytesMut;

use crate::error::{Result, ShardError};

use super::{ChunkAddr, ChunkRef, ShardBuffer};

/// Summary of one compaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionStats {
    /// Entries rewritten
    pub entries: usize,

    /// Chunks in the new chunk sequence
    pub chunks: usize,

    /// Chunks that received at least one entry
    pub live_chunks: usize,

    /// Bytes packed into the new chunks
    pub bytes_written: usize,

    /// Old chunk bytes no entry referenced any more
    pub bytes_reclaimed: usize,

    /// New chunks that ended up larger than the configured chunk size
    pub oversized_chunks: usize,
}

impl ShardBuffer {
    /// Rewrite all entries into new chunk storage and clear the overlays.
    ///
    /// Logical content of every entry is unchanged. Fails with
    /// `ShardError::Invariant` if an entry references bytes outside the
    /// current chunk sequence; the store is not modified in that case.
    pub fn compact(&mut self) -> Result<CompactionStats> {
        let (targets, loads) = self.place_entries();
        let chunk_count = loads.len();
        let live: BTreeSet<usize> = targets.iter().copied().collect();

        let mut chunks: Vec<BytesMut> = loads
            .iter()
            .map(|&size| BytesMut::with_capacity(size))
            .collect();
        let mut refs = Vec::with_capacity(self.entries.len());
        let mut referenced_chunk_bytes = 0usize;

        for (idx, (entry, &index)) in self.entries.iter().zip(&targets).enumerate() {
            let chunk = chunks.get_mut(index).ok_or_else(|| {
                ShardError::Invariant(format!(
                    "entry {} targets chunk {} but only {} allocated",
                    idx, index, chunk_count
                ))
            })?;

            let span = self.chunk_bytes(entry)?;
            referenced_chunk_bytes += span.len();

            let offset = chunk.len();
            chunk.extend_from_slice(span);
            chunk.extend_from_slice(&entry.overlay);

            refs.push(ChunkRef::new(ChunkAddr::new(index, offset), chunk.len() - offset));
        }

        let chunk_size = self.geometry.chunk_size();
        let mut oversized_chunks = 0;
        for (index, chunk) in chunks.iter().enumerate() {
            if !self.geometry.fits(ChunkAddr::new(index, 0), chunk.len()) {
                oversized_chunks += 1;
                tracing::warn!(
                    chunk = index,
                    len = chunk.len(),
                    chunk_size,
                    "compacted chunk exceeds configured chunk size"
                );
            }
        }

        let stats = CompactionStats {
            entries: self.entries.len(),
            chunks: chunk_count,
            live_chunks: live.len(),
            bytes_written: chunks.iter().map(BytesMut::len).sum(),
            bytes_reclaimed: self
                .chunk_bytes_total()
                .saturating_sub(referenced_chunk_bytes),
            oversized_chunks,
        };

        // Commit: nothing below can fail
        self.chunks = chunks.into_iter().map(BytesMut::freeze).collect();
        for (entry, chunk) in self.entries.iter_mut().zip(refs) {
            entry.chunk = Some(chunk);
            entry.overlay = Vec::new();
        }

        tracing::debug!(
            entries = stats.entries,
            chunks = stats.chunks,
            bytes_written = stats.bytes_written,
            bytes_reclaimed = stats.bytes_reclaimed,
            "compaction finished"
        );

        Ok(stats)
    }

    /// Pick a target chunk for every entry.
    ///
    /// Returns the target per entry and the packed size per chunk.
    fn place_entries(&self) -> (Vec<usize>, Vec<usize>) {
        let chunk_size = self.geometry.chunk_size();

        // Placed entries first, so unplaced ones see the real load
        let mut loads: Vec<usize> = Vec::new();
        for entry in &self.entries {
            if let Some(index) = entry.chunk_index() {
                if index >= loads.len() {
                    loads.resize(index + 1, 0);
                }
                loads[index] += entry.logical_len();
            }
        }

        let mut cursor = 0;
        let mut targets = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let index = match entry.chunk_index() {
                Some(index) => index,
                None => {
                    let len = entry.logical_len();
                    while cursor < loads.len() && loads[cursor] + len > chunk_size {
                        cursor += 1;
                    }
                    if cursor == loads.len() {
                        loads.push(0);
                    }
                    loads[cursor] += len;
                    cursor
                }
            };
            targets.push(index);
        }

        (targets, loads)
    }
}
