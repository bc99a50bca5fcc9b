use std::path::PathBuf;

use moira_core::{pool_size, CheckerConfig};
use tokio::sync::mpsc;

use crate::coordinator::ShutdownCoordinator;
use crate::error::Result;
use crate::launcher::WorkerLauncher;
use crate::signals::ShutdownSignals;
use crate::supervisor::Supervisor;

/// Number of workers for this host, honoring a fixed `worker.workers` setting.
pub fn resolve_pool_size(config: &CheckerConfig, parallelism: usize) -> usize {
	if config.worker.workers > 0 {
		config.worker.workers
	} else {
		pool_size(parallelism)
	}
}

pub fn available_parallelism() -> usize {
	std::thread::available_parallelism()
		.map(|n| n.get())
		.unwrap_or(1)
}

/// Runs the checker master until a worker exits or a termination signal arrives.
pub async fn run(config: &CheckerConfig, config_path: PathBuf, log_dir: String) -> Result<()> {
	let size = resolve_pool_size(config, available_parallelism());
	let launcher = WorkerLauncher::new(&config.worker, config_path, log_dir);
	let mut signals = ShutdownSignals::register()?;

	let (events_tx, mut events_rx) = mpsc::unbounded_channel();
	let mut supervisor = Supervisor::new(launcher, size, events_tx);
	let mut coordinator = ShutdownCoordinator::new();

	tracing::info!("checker master started (pid {}), {} workers", std::process::id(), size);
	supervisor.start()?;

	coordinator
		.run(&mut supervisor, &mut events_rx, async move {
			let name = signals.recv().await;
			tracing::info!("received {}", name);
		})
		.await;

	tracing::info!("checker master stopped");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pool_size_from_parallelism() {
		let config = CheckerConfig::default();
		assert_eq!(resolve_pool_size(&config, 4), 3);
		assert_eq!(resolve_pool_size(&config, 1), 1);
	}

	#[test]
	fn fixed_pool_size_wins() {
		let mut config = CheckerConfig::default();
		config.worker.workers = 6;
		assert_eq!(resolve_pool_size(&config, 2), 6);
	}
}
