//! Fixed-width character chunking for length-limited summarizers.
//!
//! Text is cut every `max_chars` characters (Unicode scalar values, not bytes) with no overlap
//! and no attempt to respect word or sentence boundaries. Concatenating the chunks in order
//! reproduces the input exactly.

use super::types::ChunkingError;

/// Maximum characters handed to the summarizer in a single request.
pub const MAX_CHUNK_CHARS: usize = 1000;

/// Lazy iterator over consecutive slices of at most `max_chars` characters.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    remaining: &'a str,
    max_chars: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let split_at = self
            .remaining
            .char_indices()
            .nth(self.max_chars)
            .map_or(self.remaining.len(), |(offset, _)| offset);
        let (chunk, rest) = self.remaining.split_at(split_at);
        self.remaining = rest;
        Some(chunk)
    }
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// An empty string yields no chunks. A zero width is rejected since it could never make
/// progress.
pub fn chunk_text(text: &str, max_chars: usize) -> Result<Chunks<'_>, ChunkingError> {
    if max_chars == 0 {
        return Err(ChunkingError::InvalidChunkSize);
    }
    Ok(Chunks {
        remaining: text,
        max_chars,
    })
}
