//! Search parameters shared by the scheduler and every worker.

use std::time::Duration;

use tokio::sync::Semaphore;

use crate::{
    constant::{DEFAULT_CHUNK_SIZE, DEFAULT_THRESHOLD, MAX_DIFFICULTY, SEARCH_TIMEOUT},
    error::{SolverError, SolverResult},
};

/// Immutable once a search starts; the scheduler keeps it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Text hashed in front of the decimal nonce.
    pub prefix: String,
    /// Required number of leading zero bits.
    pub difficulty: u32,
    /// Nonces handed to a worker per dispatch.
    pub chunk_size: u64,
    /// Maximum number of chunks scanned at the same time.
    pub worker_count: usize,
    /// Wall-clock budget for the whole search.
    pub timeout: Duration,
}

impl SearchConfig {
    /// Validates the difficulty and fills the remaining fields with defaults.
    ///
    /// Fails with a configuration error for `difficulty <= 0` or a difficulty
    /// wider than the digest. Nothing is hashed before this returns.
    pub fn new(prefix: impl Into<String>, difficulty: i64) -> SolverResult<Self> {
        if difficulty <= 0 {
            return Err(SolverError::NonPositiveDifficulty(difficulty));
        }
        if difficulty > MAX_DIFFICULTY as i64 {
            return Err(SolverError::DifficultyOutOfRange(difficulty));
        }

        Ok(Self {
            prefix: prefix.into(),
            difficulty: difficulty as u32,
            chunk_size: DEFAULT_CHUNK_SIZE,
            worker_count: DEFAULT_THRESHOLD,
            timeout: SEARCH_TIMEOUT,
        })
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks the fields the builder does not guard.
    ///
    /// `difficulty == 0` passes here: it is rejected by [`SearchConfig::new`],
    /// while a hand-built config may use it to get the trivial solution.
    pub fn validate(&self) -> SolverResult<()> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(SolverError::DifficultyOutOfRange(self.difficulty as i64));
        }
        if self.worker_count == 0 {
            return Err(SolverError::NoWorkers);
        }
        if self.worker_count > Semaphore::MAX_PERMITS {
            return Err(SolverError::TooManyWorkers(self.worker_count));
        }
        if self.chunk_size == 0 {
            return Err(SolverError::EmptyChunk);
        }
        Ok(())
    }
}
