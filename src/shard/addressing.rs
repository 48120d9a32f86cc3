//! Chunk addressing
//!
//! Splits a single virtual address (`chunk_loc`) into a chunk index and an
//! offset within that chunk, for chunks of size `2^chunk_log`.

/// Physical position of a byte: which chunk, and where inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChunkAddr {
    /// Position of the chunk in the chunk sequence
    pub index: usize,

    /// Byte offset inside that chunk
    pub offset: usize,
}

impl ChunkAddr {
    pub fn new(index: usize, offset: usize) -> Self {
        Self { index, offset }
    }
}

/// Fixed-size partitioning of the virtual address space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkGeometry {
    chunk_log: u32,
}

impl ChunkGeometry {
    /// Geometry with chunks of `2^chunk_log` bytes.
    ///
    /// `chunk_log` is expected to be validated by `Config::validate`.
    pub fn new(chunk_log: u32) -> Self {
        Self { chunk_log }
    }

    pub fn chunk_log(&self) -> u32 {
        self.chunk_log
    }

    /// Size of one chunk in bytes
    pub fn chunk_size(&self) -> usize {
        1usize << self.chunk_log
    }

    /// `loc / chunk_size`
    pub fn chunk_index(&self, loc: usize) -> usize {
        loc >> self.chunk_log
    }

    /// `loc mod chunk_size`
    pub fn chunk_offset(&self, loc: usize) -> usize {
        loc & (self.chunk_size() - 1)
    }

    /// Decompose a virtual address
    pub fn split(&self, loc: usize) -> ChunkAddr {
        ChunkAddr {
            index: self.chunk_index(loc),
            offset: self.chunk_offset(loc),
        }
    }

    /// Compose a virtual address.
    ///
    /// Returns `None` when the offset does not fit inside one chunk or the
    /// result overflows `usize`.
    pub fn join(&self, addr: ChunkAddr) -> Option<usize> {
        if addr.offset >= self.chunk_size() {
            return None;
        }
        let base = addr.index.checked_mul(self.chunk_size())?;
        base.checked_add(addr.offset)
    }

    /// Whether `[addr.offset, addr.offset + len)` stays inside one chunk
    pub fn fits(&self, addr: ChunkAddr, len: usize) -> bool {
        addr.offset
            .checked_add(len)
            .map_or(false, |end| end <= self.chunk_size())
    }
}
