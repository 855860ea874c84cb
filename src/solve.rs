use eyre::WrapErr;
use tracing::info;

use crate::{
    config::SearchConfig,
    constant::SEARCH_TIMEOUT,
    format_duration,
    scheduler::{ChunkScheduler, SearchOutcome},
    Solver,
};

impl Solver {
    pub fn search_config(&self) -> eyre::Result<SearchConfig> {
        let config = SearchConfig::new(self.prefix.as_str(), self.difficulty)?
            .with_workers(self.threshold)
            .with_chunk_size(self.chunk_size)
            .with_timeout(SEARCH_TIMEOUT);

        config.validate()?;
        Ok(config)
    }

    pub async fn solve(&self) -> eyre::Result<()> {
        let config = self.search_config().wrap_err("invalid search configuration")?;
        let scheduler = ChunkScheduler::new(config)?;

        let config = scheduler.config();
        info!(
            prefix = %config.prefix,
            difficulty = config.difficulty,
            workers = config.worker_count,
            chunk_size = config.chunk_size,
            timeout = format_duration!(config.timeout),
            "search started"
        );

        match scheduler.run().await {
            SearchOutcome::Found(result) => {
                println!("[+] attempts: {}", result.nonce);
                println!("[*] time spent: {}", format_duration!(result.elapsed));
                if self.bin_string {
                    println!("[+] bin string: {}", result.bit_string());
                }
            }
            SearchOutcome::TimedOut => println!("timeout!"),
        }

        Ok(())
    }
}
