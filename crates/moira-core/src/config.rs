use serde::Deserialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/moira/checker.toml";
pub const STDOUT_LOG_TARGET: &str = "stdout";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CheckerConfig {
	#[serde(default)]
	pub worker: WorkerConfig,
	#[serde(default)]
	pub logs: LogsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
	/// Executable the OS starts for every worker.
	#[serde(default = "default_program")]
	pub program: PathBuf,
	/// Entry point arguments placed before `-n/-c/-l`.
	#[serde(default = "default_args")]
	pub args: Vec<String>,
	#[serde(default = "default_arg0")]
	pub arg0: String,
	/// Fixed pool size; 0 derives it from available parallelism.
	#[serde(default)]
	pub workers: usize,
}

impl Default for WorkerConfig {
	fn default() -> Self {
		Self {
			program: default_program(),
			args: default_args(),
			arg0: default_arg0(),
			workers: 0,
		}
	}
}

fn default_program() -> PathBuf {
	PathBuf::from("moira-checker-worker")
}
fn default_args() -> Vec<String> {
	Vec::new()
}
fn default_arg0() -> String {
	"moira-checker".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
	#[serde(default = "default_log_dir")]
	pub dir: String,
}

impl Default for LogsConfig {
	fn default() -> Self {
		Self {
			dir: default_log_dir(),
		}
	}
}

fn default_log_dir() -> String {
	STDOUT_LOG_TARGET.into()
}

#[derive(Debug)]
pub enum ConfigError {
	Read { path: PathBuf, source: io::Error },
	Parse { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigError::Read { path, source } => {
				write!(f, "failed to read {}: {}", path.display(), source)
			}
			ConfigError::Parse { path, message } => {
				write!(f, "failed to parse {}: {}", path.display(), message)
			}
		}
	}
}

impl std::error::Error for ConfigError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ConfigError::Read { source, .. } => Some(source),
			ConfigError::Parse { .. } => None,
		}
	}
}

impl CheckerConfig {
	/// Loads the config file, falling back to defaults when it does not exist.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			return Ok(Self::default());
		}
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::parse(&content).map_err(|message| ConfigError::Parse {
			path: path.to_path_buf(),
			message,
		})
	}

	pub fn parse(content: &str) -> Result<Self, String> {
		toml::from_str(content).map_err(|e| e.to_string())
	}
}
