use thiserror::Error;

use crate::constant::MAX_DIFFICULTY;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("difficulty should be > 0, got {0}")]
    NonPositiveDifficulty(i64),
    #[error("difficulty {0} exceeds the {} bits of a sha256 digest", MAX_DIFFICULTY)]
    DifficultyOutOfRange(i64),
    #[error("worker count should be > 0")]
    NoWorkers,
    #[error("worker count {0} exceeds the limit of {}", tokio::sync::Semaphore::MAX_PERMITS)]
    TooManyWorkers(usize),
    #[error("chunk size should be > 0")]
    EmptyChunk,
}

pub type SolverResult<T> = Result<T, SolverError>;
