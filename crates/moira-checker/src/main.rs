use std::process::ExitCode;

use moira_checker::cli::{self, Invocation};
use moira_checker::{logging, master};
use moira_core::logs::LogTarget;
use moira_core::CheckerConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let args: Vec<String> = std::env::args().skip(1).collect();

	let args = match cli::parse(&args) {
		Ok(Invocation::Run(args)) => args,
		Ok(Invocation::Help) => {
			println!("{}", cli::usage());
			return ExitCode::SUCCESS;
		}
		Ok(Invocation::Version) => {
			println!("moira-checker {}", env!("CARGO_PKG_VERSION"));
			return ExitCode::SUCCESS;
		}
		Err(e) => {
			eprintln!("error: {}\n\n{}", e, cli::usage());
			return ExitCode::from(2);
		}
	};

	let config = match CheckerConfig::load(&args.config_path) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("error: {}", e);
			return ExitCode::FAILURE;
		}
	};
	let log_dir = args.log_dir.unwrap_or_else(|| config.logs.dir.clone());

	if let Err(e) = logging::init(&LogTarget::parse(&log_dir)) {
		eprintln!("error: failed to open log in {}: {}", log_dir, e);
		return ExitCode::FAILURE;
	}

	match master::run(&config, args.config_path, log_dir).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			tracing::error!("{}", e);
			ExitCode::FAILURE
		}
	}
}
