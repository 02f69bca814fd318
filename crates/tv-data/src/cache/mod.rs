//! Chunk cache
//!
//! Pages are kept in the order they were read from the source and are never
//! evicted: `chunks[i]` is always the i-th batch of the stream.

use tv_core::Chunk;

/// Append-only store of the chunks read so far
#[derive(Debug, Default)]
pub struct ChunkCache {
    chunks: Vec<Chunk>,
}

impl ChunkCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a chunk from cache
    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Append the next chunk of the stream
    pub fn push(&mut self, chunk: Chunk) {
        debug_assert_eq!(chunk.index(), self.chunks.len(), "chunk cache must stay gapless");
        self.chunks.push(chunk);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tv_core::{build_text_batch, text_schema};

    fn chunk(index: usize) -> Chunk {
        let batch = build_text_batch(text_schema(&["v"]), &[vec![Some(index.to_string())]]).unwrap();
        Chunk::new(index, index + 1, batch)
    }

    #[test]
    fn test_cache_is_indexed_by_read_order() {
        let mut cache = ChunkCache::new();
        cache.push(chunk(0));
        cache.push(chunk(1));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1).map(|c| c.index()), Some(1));
        assert!(cache.get(2).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }
}
