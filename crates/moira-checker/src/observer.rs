use moira_core::ExitReason;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::launcher::ExitFuture;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
	Started { index: usize, pid: u32 },
	Exited { index: usize, pid: u32, reason: ExitReason },
}

pub type EventSender = mpsc::UnboundedSender<LifecycleEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<LifecycleEvent>;

/// Reports one worker's start and exit into the event loop.
pub struct LifecycleObserver {
	index: usize,
	events: EventSender,
}

impl LifecycleObserver {
	pub fn new(index: usize, events: EventSender) -> Self {
		Self { index, events }
	}

	pub fn on_start(&self, pid: u32) {
		tracing::info!("run worker {} - pid {}", self.index, pid);
		let _ = self.events.send(LifecycleEvent::Started {
			index: self.index,
			pid,
		});
	}

	pub fn on_exit(&self, pid: u32, reason: ExitReason) {
		if reason.is_clean() {
			tracing::info!("worker {} (pid {}) ended: {}", self.index, pid, reason);
		} else {
			tracing::warn!("worker {} (pid {}) ended: {}", self.index, pid, reason);
		}
		let _ = self.events.send(LifecycleEvent::Exited {
			index: self.index,
			pid,
			reason,
		});
	}

	/// Reports the start, waits for the process to end, then reports the exit.
	/// Both events come from one task, so start always precedes exit.
	pub fn watch(self, pid: u32, exit: ExitFuture) -> JoinHandle<()> {
		tokio::spawn(async move {
			self.on_start(pid);
			let reason = exit.await;
			self.on_exit(pid, reason);
		})
	}
}
