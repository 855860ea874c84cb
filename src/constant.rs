use std::time::Duration;

pub const DEFAULT_DIFFICULTY: i64 = 26;
pub const DEFAULT_THRESHOLD: usize = 10;
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000_000;

/// SHA-256 output width in bits; no difficulty above this can ever be met.
pub const MAX_DIFFICULTY: u32 = 256;

pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// How many nonces a worker hashes between two looks at the stop flag.
pub const STOP_CHECK_INTERVAL: u64 = 10_000;
