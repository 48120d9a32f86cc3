//! ShardBuffer implementation
//!
//! Entry-indexed store over immutable chunks and mutable overlays.

use bytes::Bytes;

use crate::config::Config;
use crate::error::{Result, ShardError};

use super::{ChunkAddr, ChunkGeometry, ChunkRef, Entry};

/// In-memory chunked entry store
///
/// ## Ownership Model
/// - All mutation goes through `&mut self`, so a compaction can never
///   overlap a read or another write. Callers that share a store across
///   threads wrap the whole thing in their own lock.
/// - Chunk bytes are never modified in place. Deletes shrink or move an
///   entry's span reference; compaction drops whatever is left unreferenced.
pub struct ShardBuffer {
    /// Store configuration
    pub(super) config: Config,

    /// Chunk size used to split virtual addresses
    pub(super) geometry: ChunkGeometry,

    /// Packed chunk storage, replaced wholesale on compaction
    pub(super) chunks: Vec<Bytes>,

    /// Entry records, indexed by stable entry index
    pub(super) entries: Vec<Entry>,
}

impl ShardBuffer {
    /// Create an empty store with the default config
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            geometry: ChunkGeometry::new(config.chunk_log),
            config,
            chunks: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Create an empty store with the given config
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            geometry: ChunkGeometry::new(config.chunk_log),
            chunks: Vec::new(),
            entries: Vec::with_capacity(config.entry_capacity),
            config,
        })
    }

    // =========================================================================
    // Entry Operations
    // =========================================================================

    /// Replace an entry's whole content.
    ///
    /// The old chunk span becomes unreferenced and is dropped by the next
    /// compaction.
    pub fn set(&mut self, idx: usize, data: &[u8]) -> Result<()> {
        let entry = self.entry_mut(idx)?;
        entry.chunk = None;
        entry.overlay.clear();
        entry.overlay.extend_from_slice(data);
        Ok(())
    }

    /// Copy an entry's logical content into `out`.
    ///
    /// Returns the number of bytes written. Fails with `Overflow` without
    /// touching `out` if the content does not fit.
    pub fn get(&self, idx: usize, out: &mut [u8]) -> Result<usize> {
        let entry = self.entry(idx)?;
        let required = entry.logical_len();
        if required > out.len() {
            return Err(ShardError::Overflow {
                required,
                capacity: out.len(),
            });
        }

        let chunk = self.chunk_bytes(entry)?;
        out[..chunk.len()].copy_from_slice(chunk);
        out[chunk.len()..required].copy_from_slice(&entry.overlay);

        Ok(required)
    }

    /// Read an entry's logical content into a fresh buffer
    pub fn read(&self, idx: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.logical_len(idx)?];
        let written = self.get(idx, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Append bytes to an entry's overlay
    pub fn append(&mut self, idx: usize, data: &[u8]) -> Result<()> {
        self.entry_mut(idx)?.overlay.extend_from_slice(data);
        Ok(())
    }

    /// Truncate an entry to zero length (the slot itself stays)
    pub fn clear(&mut self, idx: usize) -> Result<()> {
        self.entry_mut(idx)?.reset();
        Ok(())
    }

    /// Remove the logical byte range `[offset, offset + len)` from an entry.
    ///
    /// A range reaching past the entry's logical length fails with
    /// `InvalidRange` and leaves the entry unchanged.
    pub fn delete_range(&mut self, idx: usize, offset: usize, len: usize) -> Result<()> {
        let entry = self.entry(idx)?;
        let logical_len = entry.logical_len();
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= logical_len)
            .ok_or(ShardError::InvalidRange {
                idx,
                offset,
                len,
                logical_len,
            })?;

        if len == 0 {
            return Ok(());
        }

        let chunk_len = entry.chunk_len();
        if end <= chunk_len {
            self.delete_in_chunk(idx, offset, len)
        } else if offset < chunk_len {
            // Spans the boundary: chunk tail goes, then the overlay head
            let delta = end - chunk_len;
            tracing::trace!(idx, offset, len, delta, "delete across chunk/overlay boundary");

            let entry = &mut self.entries[idx];
            if let Some(chunk) = entry.chunk.as_mut() {
                chunk.len = offset;
            }
            entry.overlay.drain(..delta);
            Ok(())
        } else {
            let start = offset - chunk_len;
            tracing::trace!(idx, offset, len, "delete within overlay");

            self.entries[idx].overlay.drain(start..start + len);
            Ok(())
        }
    }

    /// Add a new overlay-only entry and return its index
    pub fn push_back(&mut self, data: &[u8]) -> usize {
        let idx = self.entries.len();
        self.entries.push(Entry::from_overlay(data.to_vec()));
        idx
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chunk-resident length plus overlay length of an entry
    pub fn logical_len(&self, idx: usize) -> Result<usize> {
        Ok(self.entry(idx)?.logical_len())
    }

    /// Borrow an entry record
    pub fn entry(&self, idx: usize) -> Result<&Entry> {
        let len = self.entries.len();
        self.entries
            .get(idx)
            .ok_or(ShardError::OutOfRange { idx, len })
    }

    /// All entry records in index order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Current chunk sequence
    pub fn chunks(&self) -> &[Bytes] {
        &self.chunks
    }

    /// Number of chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total bytes held in chunks, referenced or not
    pub fn chunk_bytes_total(&self) -> usize {
        self.chunks.iter().map(Bytes::len).sum()
    }

    /// Total bytes held in overlays
    pub fn overlay_bytes_total(&self) -> usize {
        self.entries.iter().map(|e| e.overlay.len()).sum()
    }

    /// Virtual address of an entry's chunk span.
    ///
    /// `None` when the entry has no chunk span, or its offset lies beyond
    /// one chunk size (a consolidated chunk grew past the geometry).
    pub fn chunk_loc(&self, idx: usize) -> Result<Option<usize>> {
        Ok(self
            .entry(idx)?
            .chunk
            .and_then(|c| self.geometry.join(c.addr)))
    }

    pub fn chunk_geometry(&self) -> ChunkGeometry {
        self.geometry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn entry_mut(&mut self, idx: usize) -> Result<&mut Entry> {
        let len = self.entries.len();
        self.entries
            .get_mut(idx)
            .ok_or(ShardError::OutOfRange { idx, len })
    }

    /// Resolve an entry's chunk span to its bytes
    pub(super) fn chunk_bytes(&self, entry: &Entry) -> Result<&[u8]> {
        match entry.chunk {
            None => Ok(&[]),
            Some(chunk) => self.resolve(chunk),
        }
    }

    fn resolve(&self, chunk: ChunkRef) -> Result<&[u8]> {
        let end = chunk.addr.offset.checked_add(chunk.len);
        self.chunks
            .get(chunk.addr.index)
            .zip(end)
            .and_then(|(bytes, end)| bytes.get(chunk.addr.offset..end))
            .ok_or_else(|| {
                ShardError::Invariant(format!(
                    "chunk span {}:{}+{} outside {} chunks",
                    chunk.addr.index,
                    chunk.addr.offset,
                    chunk.len,
                    self.chunks.len()
                ))
            })
    }

    /// Delete `[offset, offset + len)` lying wholly inside the chunk span.
    ///
    /// Chunk bytes stay put: tail and head deletes only move the span
    /// bounds. A middle delete keeps the head in the chunk and relocates the
    /// surviving tail to the front of the overlay.
    fn delete_in_chunk(&mut self, idx: usize, offset: usize, len: usize) -> Result<()> {
        let Some(chunk) = self.entries[idx].chunk else {
            return Err(ShardError::Invariant(format!(
                "entry {} has no chunk span to delete from",
                idx
            )));
        };
        let end = offset + len;

        if end == chunk.len {
            tracing::trace!(idx, offset, len, "delete chunk tail");
            self.entries[idx].chunk = Some(ChunkRef { len: offset, ..chunk });
        } else if offset == 0 {
            tracing::trace!(idx, len, "delete chunk head");
            let addr = ChunkAddr::new(chunk.addr.index, chunk.addr.offset + len);
            self.entries[idx].chunk = Some(ChunkRef::new(addr, chunk.len - len));
        } else {
            let tail = self.resolve(chunk)?[end..].to_vec();
            tracing::debug!(
                idx,
                offset,
                len,
                relocated = tail.len(),
                "delete inside chunk span, relocating tail to overlay"
            );

            let entry = &mut self.entries[idx];
            entry.chunk = Some(ChunkRef { len: offset, ..chunk });
            let mut overlay = tail;
            overlay.extend_from_slice(&entry.overlay);
            entry.overlay = overlay;
        }

        Ok(())
    }
}

impl Default for ShardBuffer {
    fn default() -> Self {
        Self::new()
    }
}
