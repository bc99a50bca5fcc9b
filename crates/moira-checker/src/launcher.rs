use std::ffi::OsString;
use std::future::Future;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use moira_core::config::WorkerConfig;
use moira_core::ExitReason;
use tokio::process::{ChildStdin, Command};

use crate::error::{Error, Result};

/// Resolves once the worker process has terminated.
pub type ExitFuture = Pin<Box<dyn Future<Output = ExitReason> + Send>>;

/// One spawned worker as seen by the master.
#[derive(Debug)]
pub struct ProcessHandle {
	index: usize,
	pid: u32,
	stdin: Option<ChildStdin>,
}

impl ProcessHandle {
	pub fn new(index: usize, pid: u32, stdin: Option<ChildStdin>) -> Self {
		Self { index, pid, stdin }
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn pid(&self) -> u32 {
		self.pid
	}

	/// Whether the parent still holds the writable end of the worker's stdin.
	pub fn has_control_pipe(&self) -> bool {
		self.stdin.is_some()
	}

	pub(crate) fn close_control_pipe(&mut self) {
		self.stdin = None;
	}
}

pub struct Launched {
	pub handle: ProcessHandle,
	pub exit: ExitFuture,
}

/// The OS capability the supervisor needs from a worker: spawn it,
/// observe its exit, and ask it to terminate.
pub trait Launcher {
	fn launch(&self, index: usize) -> Result<Launched>;

	fn terminate(&self, pid: u32) -> Result<()>;
}

/// Starts checker workers as OS processes.
pub struct WorkerLauncher {
	program: PathBuf,
	entry_args: Vec<String>,
	arg0: String,
	config_path: PathBuf,
	log_dir: String,
}

impl WorkerLauncher {
	/// `config_path` and `log_dir` are forwarded to every worker as given.
	pub fn new(worker: &WorkerConfig, config_path: PathBuf, log_dir: String) -> Self {
		Self {
			program: worker.program.clone(),
			entry_args: worker.args.clone(),
			arg0: worker.arg0.clone(),
			config_path,
			log_dir,
		}
	}

	/// Arguments following `argv[0]`: entry point, then `-n <index> -c <config> -l <logs>`.
	pub fn command_args(&self, index: usize) -> Vec<OsString> {
		let mut args: Vec<OsString> = self.entry_args.iter().map(OsString::from).collect();
		args.push("-n".into());
		args.push(index.to_string().into());
		args.push("-c".into());
		args.push(self.config_path.clone().into_os_string());
		args.push("-l".into());
		args.push(self.log_dir.clone().into());
		args
	}

	fn command(&self, index: usize) -> Command {
		let mut cmd = Command::new(&self.program);
		cmd.arg0(&self.arg0)
			.args(self.command_args(index))
			.stdin(Stdio::piped())
			.stdout(Stdio::inherit())
			.stderr(Stdio::inherit());
		cmd
	}
}

impl Launcher for WorkerLauncher {
	fn launch(&self, index: usize) -> Result<Launched> {
		let mut child = self
			.command(index)
			.spawn()
			.map_err(|source| Error::Spawn { index, source })?;

		let pid = child.id().ok_or_else(|| Error::Spawn {
			index,
			source: std::io::Error::other("process exited before its pid was read"),
		})?;
		let stdin = child.stdin.take();

		let exit: ExitFuture = Box::pin(async move {
			match child.wait().await {
				Ok(status) => exit_reason(status),
				Err(e) => ExitReason::Lost {
					message: e.to_string(),
				},
			}
		});

		Ok(Launched {
			handle: ProcessHandle::new(index, pid, stdin),
			exit,
		})
	}

	fn terminate(&self, pid: u32) -> Result<()> {
		use nix::sys::signal::{kill, Signal};
		use nix::unistd::Pid;
		kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(|source| Error::Signal { pid, source })
	}
}

pub fn exit_reason(status: ExitStatus) -> ExitReason {
	if let Some(code) = status.code() {
		ExitReason::Exited { code }
	} else if let Some(signal) = status.signal() {
		ExitReason::Signaled { signal }
	} else {
		ExitReason::Lost {
			message: format!("unrecognized exit status {:?}", status),
		}
	}
}
