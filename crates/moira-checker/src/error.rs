use std::fmt;
use std::io;

/// Errors surfaced by the checker master.
#[derive(Debug)]
pub enum Error {
	/// The OS refused to start the worker for a slot.
	Spawn { index: usize, source: io::Error },
	/// A termination request could not be delivered.
	Signal { pid: u32, source: nix::Error },
	Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::Spawn { index, source } => {
				write!(f, "failed to spawn worker {}: {}", index, source)
			}
			Error::Signal { pid, source } => write!(f, "failed to signal pid {}: {}", pid, source),
			Error::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Spawn { source, .. } => Some(source),
			Error::Signal { source, .. } => Some(source),
			Error::Io(e) => Some(e),
		}
	}
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Error::Io(e)
	}
}
