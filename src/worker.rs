use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    chunk::Chunk,
    constant::STOP_CHECK_INTERVAL,
    difficulty,
    hasher::{Hash, NonceHasher},
};

/// What a worker reports for the one chunk it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// First nonce of the chunk that meets the difficulty.
    Match { nonce: u64, hash: Hash, attempts: u64 },
    /// Every nonce of the chunk was hashed, none matched.
    Exhausted { attempts: u64 },
    /// The search was decided elsewhere before the chunk was finished.
    Abandoned { attempts: u64 },
}

impl WorkerOutcome {
    pub fn attempts(&self) -> u64 {
        match self {
            WorkerOutcome::Match { attempts, .. }
            | WorkerOutcome::Exhausted { attempts }
            | WorkerOutcome::Abandoned { attempts } => *attempts,
        }
    }
}

/// Scans `chunk` in increasing nonce order and returns on the first match.
///
/// `stop` is polled before the first nonce and then every
/// [`STOP_CHECK_INTERVAL`] nonces.
pub fn run_chunk(prefix: &str, difficulty: u32, chunk: &Chunk, stop: &AtomicBool) -> WorkerOutcome {
    let hasher = NonceHasher::new(prefix);
    let mut attempts = 0;

    for nonce in chunk.nonces() {
        if attempts % STOP_CHECK_INTERVAL == 0 && stop.load(Ordering::Relaxed) {
            return WorkerOutcome::Abandoned { attempts };
        }

        let hash = hasher.hash(nonce);
        attempts += 1;

        if difficulty::is_satisfied(&hash, difficulty) {
            return WorkerOutcome::Match { nonce, hash, attempts };
        }
    }

    WorkerOutcome::Exhausted { attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkSequence;

    fn chunk(index: u64, size: u64) -> Chunk {
        ChunkSequence::new(size).nth(index as usize).unwrap()
    }

    /// Sequential scan used as ground truth.
    fn first_match(prefix: &str, difficulty: u32, from: u64, to: u64) -> Option<u64> {
        let hasher = NonceHasher::new(prefix);
        (from..to).find(|nonce| difficulty::is_satisfied(&hasher.hash(*nonce), difficulty))
    }

    #[test]
    fn test_zero_difficulty_matches_first_nonce() {
        let stop = AtomicBool::new(false);
        let outcome = run_chunk("anything", 0, &chunk(0, 100), &stop);

        match outcome {
            WorkerOutcome::Match { nonce, attempts, .. } => {
                assert_eq!(nonce, 0);
                assert_eq!(attempts, 1);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_returns_first_match_in_chunk() {
        let stop = AtomicBool::new(false);
        let expected = first_match("test", 8, 0, 100_000).unwrap();
        let chunk = chunk(0, 100_000);

        match run_chunk("test", 8, &chunk, &stop) {
            WorkerOutcome::Match { nonce, hash, attempts } => {
                assert_eq!(nonce, expected);
                assert_eq!(attempts, nonce - chunk.lower + 1);
                assert_eq!(hash, NonceHasher::new("test").hash(nonce));
                assert_eq!(hash[0], 0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_exhausts_chunk_without_match() {
        let stop = AtomicBool::new(false);

        // a chunk that ends right before the first solution
        let first = first_match("test", 8, 0, 100_000).unwrap();
        let chunk = Chunk {
            index: 0,
            lower: 0,
            upper: first,
        };

        assert_eq!(run_chunk("test", 8, &chunk, &stop), WorkerOutcome::Exhausted { attempts: first });
    }

    #[test]
    fn test_already_stopped_hashes_nothing() {
        let stop = AtomicBool::new(true);
        let outcome = run_chunk("test", 0, &chunk(3, STOP_CHECK_INTERVAL * 10), &stop);

        assert_eq!(outcome, WorkerOutcome::Abandoned { attempts: 0 });
    }

    #[test]
    fn test_abandons_at_next_poll_when_stopped_mid_chunk() {
        let stop = AtomicBool::new(false);
        let chunk = chunk(3, STOP_CHECK_INTERVAL * 10);

        let outcome = std::thread::scope(|scope| {
            let worker = scope.spawn(|| run_chunk("test", 200, &chunk, &stop));
            stop.store(true, Ordering::Relaxed);
            worker.join().unwrap()
        });

        match outcome {
            WorkerOutcome::Abandoned { attempts } => assert_eq!(attempts % STOP_CHECK_INTERVAL, 0),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_scans_only_its_own_range() {
        let stop = AtomicBool::new(false);
        let chunk = chunk(5, 2_000);

        if let WorkerOutcome::Match { nonce, .. } = run_chunk("test", 6, &chunk, &stop) {
            assert!(chunk.contains(nonce));
            assert_eq!(Some(nonce), first_match("test", 6, chunk.lower, chunk.upper));
        } else {
            assert_eq!(first_match("test", 6, chunk.lower, chunk.upper), None);
        }
    }
}
