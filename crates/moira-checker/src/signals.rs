//! Termination signals delivered to the master.
//!
//! Listeners are registered up front so a failure to install them aborts
//! startup instead of surfacing after the workers are already running.

use tokio::signal::unix::{signal, Signal, SignalKind};

pub struct ShutdownSignals {
	sigint: Signal,
	sigterm: Signal,
	sigquit: Signal,
}

impl ShutdownSignals {
	pub fn register() -> std::io::Result<Self> {
		Ok(Self {
			sigint: signal(SignalKind::interrupt())?,
			sigterm: signal(SignalKind::terminate())?,
			sigquit: signal(SignalKind::quit())?,
		})
	}

	/// Waits for the next termination signal and returns its name.
	pub async fn recv(&mut self) -> &'static str {
		tokio::select! {
			_ = self.sigint.recv() => "SIGINT",
			_ = self.sigterm.recv() => "SIGTERM",
			_ = self.sigquit.recv() => "SIGQUIT",
		}
	}
}
