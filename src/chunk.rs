use std::ops::Range;

/// A contiguous, half-open slice of the nonce space owned by one worker at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub index: u64,
    pub lower: u64,
    pub upper: u64,
}

impl Chunk {
    pub fn nonces(&self) -> Range<u64> {
        self.lower..self.upper
    }

    pub fn contains(&self, nonce: u64) -> bool {
        self.nonces().contains(&nonce)
    }
}

/// Yields chunks `0, 1, 2, ...` of a fixed size, never repeating or skipping
/// an index. Ends when the next lower bound no longer fits in a `u64`.
///
/// Upper bounds are exclusive `u64` values, so the last chunk stops at
/// `u64::MAX` and the single nonce `u64::MAX` is never dispatched.
#[derive(Debug)]
pub struct ChunkSequence {
    chunk_size: u64,
    next_index: u64,
}

impl ChunkSequence {
    pub fn new(chunk_size: u64) -> Self {
        Self {
            chunk_size,
            next_index: 0,
        }
    }
}

impl Iterator for ChunkSequence {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let lower = self.next_index.checked_mul(self.chunk_size)?;
        let upper = lower.saturating_add(self.chunk_size);
        if lower == upper {
            return None;
        }

        let chunk = Chunk {
            index: self.next_index,
            lower,
            upper,
        };
        self.next_index += 1;

        Some(chunk)
    }
}
