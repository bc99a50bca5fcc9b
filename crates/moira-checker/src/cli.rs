use std::path::PathBuf;

use moira_core::config::DEFAULT_CONFIG_PATH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
	pub config_path: PathBuf,
	/// Overrides `logs.dir` from the config file.
	pub log_dir: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
	Run(Args),
	Help,
	Version,
}

pub fn parse(args: &[String]) -> Result<Invocation, String> {
	let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
	let mut log_dir = None;

	let mut iter = args.iter();
	while let Some(arg) = iter.next() {
		match arg.as_str() {
			"-h" | "--help" => return Ok(Invocation::Help),
			"-V" | "--version" => return Ok(Invocation::Version),
			"-c" | "--config" => {
				let value = iter.next().ok_or_else(|| format!("{} requires a path", arg))?;
				config_path = PathBuf::from(value);
			}
			"-l" | "--log-dir" => {
				let value = iter.next().ok_or_else(|| format!("{} requires a directory", arg))?;
				log_dir = Some(value.clone());
			}
			other => return Err(format!("unknown argument: {}", other)),
		}
	}

	Ok(Invocation::Run(Args { config_path, log_dir }))
}

pub fn usage() -> String {
	format!(
		"moira-checker {}\n\n\
		 usage: moira-checker [-c <config>] [-l <log dir|stdout>]\n\n\
		 \x20 -c, --config   config file (default {})\n\
		 \x20 -l, --log-dir  log directory, or 'stdout'\n\
		 \x20 -h, --help     show this help\n\
		 \x20 -V, --version  show version",
		env!("CARGO_PKG_VERSION"),
		DEFAULT_CONFIG_PATH
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn strings(args: &[&str]) -> Vec<String> {
		args.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn defaults_without_arguments() {
		assert_eq!(
			parse(&[]).unwrap(),
			Invocation::Run(Args {
				config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
				log_dir: None,
			})
		);
	}

	#[test]
	fn config_and_log_dir() {
		let parsed = parse(&strings(&["-c", "/tmp/checker.toml", "-l", "stdout"])).unwrap();
		assert_eq!(
			parsed,
			Invocation::Run(Args {
				config_path: PathBuf::from("/tmp/checker.toml"),
				log_dir: Some("stdout".into()),
			})
		);
	}

	#[test]
	fn help_and_version() {
		assert_eq!(parse(&strings(&["--help"])).unwrap(), Invocation::Help);
		assert_eq!(parse(&strings(&["-V"])).unwrap(), Invocation::Version);
	}

	#[test]
	fn missing_value_is_an_error() {
		assert!(parse(&strings(&["-c"])).unwrap_err().contains("-c"));
		assert!(parse(&strings(&["--bogus"])).is_err());
	}
}
