//! Chunked search over the nonce space.
//!
//! A dispatch task hands out chunks `0, 1, 2, ...` to at most `worker_count`
//! blocking workers at a time. Each worker holds a semaphore permit for the
//! lifetime of its chunk; dropping the permit is the completion signal that
//! frees the slot for the next chunk. The first worker to match claims the
//! shared stop flag and is the only one allowed to report, and `run` races
//! that report against the configured deadline.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use tokio::{
    sync::{mpsc, Semaphore},
    time,
};
use tracing::{debug, info, warn};

use crate::{
    chunk::ChunkSequence,
    config::SearchConfig,
    difficulty,
    error::SolverResult,
    format_duration,
    hasher::Hash,
    utils,
    worker::{self, WorkerOutcome},
};

/// The winning nonce of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub nonce: u64,
    pub chunk_index: u64,
    /// Nonces hashed in the winning chunk, the winner included.
    pub attempts: u64,
    pub hash: Hash,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn bit_string(&self) -> String {
        difficulty::to_bit_string(&self.hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SearchResult),
    TimedOut,
}

#[derive(Debug, Default)]
struct SearchStats {
    chunks_dispatched: AtomicU64,
    hashes: AtomicU64,
}

/// Everything one run shares between the dispatcher and its workers.
#[derive(Clone)]
struct SearchState {
    config: Arc<SearchConfig>,
    slots: Arc<Semaphore>,
    stop: Arc<AtomicBool>,
    stats: Arc<SearchStats>,
}

pub struct ChunkScheduler {
    config: Arc<SearchConfig>,
}

impl ChunkScheduler {
    pub fn new(config: SearchConfig) -> SolverResult<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches until a worker matches or the timeout elapses.
    ///
    /// Every call builds its own slots, channel and stop flag, so concurrent
    /// runs never observe each other. Workers still scanning when the search
    /// is decided are told to stop and their outcomes are dropped.
    pub async fn run(&self) -> SearchOutcome {
        let started = Instant::now();
        let deadline = time::Instant::now() + self.config.timeout;

        let state = SearchState {
            config: self.config.clone(),
            slots: Arc::new(Semaphore::new(self.config.worker_count)),
            stop: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(SearchStats::default()),
        };
        let (match_tx, mut match_rx) = mpsc::unbounded_channel();

        let dispatcher = tokio::spawn(dispatch(state.clone(), match_tx));

        let outcome = match time::timeout_at(deadline, match_rx.recv()).await {
            Ok(Some((chunk_index, WorkerOutcome::Match { nonce, hash, attempts }))) => {
                SearchOutcome::Found(SearchResult {
                    nonce,
                    chunk_index,
                    attempts,
                    hash,
                    elapsed: started.elapsed(),
                })
            }
            Ok(_) => {
                // senders only drop without a match once the nonce space ran out
                time::sleep_until(deadline).await;
                SearchOutcome::TimedOut
            }
            Err(_) => SearchOutcome::TimedOut,
        };

        state.stop.store(true, Ordering::Release);
        state.slots.close();
        dispatcher.abort();

        let elapsed = started.elapsed();
        let hashes = state.stats.hashes.load(Ordering::Relaxed);
        let chunks = state.stats.chunks_dispatched.load(Ordering::Relaxed);

        match &outcome {
            SearchOutcome::Found(result) => info!(
                nonce = result.nonce,
                chunk = result.chunk_index,
                zeros = difficulty::leading_zero_bits(&result.hash),
                "nonce found"
            ),
            SearchOutcome::TimedOut => warn!(timeout = format_duration!(self.config.timeout), "search timed out"),
        }
        info!(
            chunks,
            hashes,
            elapsed = format_duration!(elapsed),
            hashrate = format_args!("{:.0} H/s", utils::hashrate(hashes, elapsed)),
            "search finished"
        );

        outcome
    }
}

async fn dispatch(state: SearchState, matches: mpsc::UnboundedSender<(u64, WorkerOutcome)>) {
    let mut chunks = ChunkSequence::new(state.config.chunk_size);

    loop {
        let permit = match state.slots.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return,
        };

        if state.stop.load(Ordering::Acquire) {
            return;
        }

        let Some(chunk) = chunks.next() else {
            warn!("nonce space exhausted, no more chunks to dispatch");
            return;
        };

        debug!(chunk = chunk.index, lower = chunk.lower, "chunk dispatched");
        state.stats.chunks_dispatched.fetch_add(1, Ordering::Relaxed);

        let config = state.config.clone();
        let stop = state.stop.clone();
        let stats = state.stats.clone();
        let matches = matches.clone();

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let outcome = worker::run_chunk(&config.prefix, config.difficulty, &chunk, &stop);
            stats.hashes.fetch_add(outcome.attempts(), Ordering::Relaxed);

            match outcome {
                WorkerOutcome::Match { nonce, .. } => {
                    debug_assert!(chunk.contains(nonce));

                    if !report_match(&stop, &matches, chunk.index, outcome) {
                        debug!(chunk = chunk.index, nonce, "late match dropped");
                    }
                }
                WorkerOutcome::Exhausted { attempts } => {
                    debug!(chunk = chunk.index, attempts, "chunk exhausted");
                }
                WorkerOutcome::Abandoned { attempts } => {
                    debug!(chunk = chunk.index, attempts, "chunk abandoned");
                }
            }
        });
    }
}

/// Sends `outcome` only if this caller is the first to raise `stop`.
///
/// Returns whether the match was sent.
fn report_match(
    stop: &AtomicBool,
    matches: &mpsc::UnboundedSender<(u64, WorkerOutcome)>,
    chunk_index: u64,
    outcome: WorkerOutcome,
) -> bool {
    if stop.swap(true, Ordering::AcqRel) {
        return false;
    }
    let _ = matches.send((chunk_index, outcome));
    true
}
