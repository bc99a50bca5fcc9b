use std::sync::Mutex;

use moira_core::logs::{DailyLogFile, LogTarget, MASTER_LOG_NAME};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: stdout, or a daily `checker.log` in the log directory.
pub fn init(target: &LogTarget) -> std::io::Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	match target {
		LogTarget::Stdout => {
			tracing_subscriber::fmt()
				.with_env_filter(filter)
				.with_writer(std::io::stdout)
				.init();
		}
		LogTarget::Directory(dir) => {
			let file = DailyLogFile::open(dir, MASTER_LOG_NAME)?;
			tracing_subscriber::fmt()
				.with_env_filter(filter)
				.with_ansi(false)
				.with_writer(Mutex::new(file))
				.init();
		}
	}
	Ok(())
}
