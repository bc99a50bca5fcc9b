use moira_core::{ExitReason, SlotState, SlotStatus};

use crate::coordinator::{Control, Service};
use crate::error::Result;
use crate::launcher::{Launched, Launcher, ProcessHandle};
use crate::observer::{EventSender, LifecycleEvent, LifecycleObserver};

/// A fixed position in the pool, bound to one worker for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSlot {
	pub index: usize,
	pub state: SlotState,
}

/// Owns the worker pool and its shutdown policy: any worker exit ends the run.
pub struct Supervisor<L> {
	launcher: L,
	slots: Vec<WorkerSlot>,
	checkers: Vec<ProcessHandle>,
	events: EventSender,
}

impl<L: Launcher> Supervisor<L> {
	pub fn new(launcher: L, size: usize, events: EventSender) -> Self {
		let slots = (0..size)
			.map(|index| WorkerSlot {
				index,
				state: SlotState::Pending,
			})
			.collect();
		Self {
			launcher,
			slots,
			checkers: Vec::with_capacity(size),
			events,
		}
	}

	pub fn size(&self) -> usize {
		self.slots.len()
	}

	pub fn slots(&self) -> &[WorkerSlot] {
		&self.slots
	}

	/// Handles of spawned workers, in spawn order.
	pub fn checkers(&self) -> &[ProcessHandle] {
		&self.checkers
	}

	pub fn launcher(&self) -> &L {
		&self.launcher
	}

	pub fn status(&self) -> Vec<SlotStatus> {
		self.slots
			.iter()
			.map(|slot| SlotStatus {
				index: slot.index,
				state: slot.state.clone(),
			})
			.collect()
	}

	/// Launches every slot in order. The first spawn failure is returned
	/// as-is; workers started before it keep running.
	pub fn start(&mut self) -> Result<()> {
		for index in 0..self.slots.len() {
			match self.launcher.launch(index) {
				Ok(Launched { handle, exit }) => {
					let pid = handle.pid();
					self.slots[index].state = SlotState::Running { pid };
					LifecycleObserver::new(index, self.events.clone()).watch(pid, exit);
					self.checkers.push(handle);
				}
				Err(e) => {
					self.slots[index].state = SlotState::Exited {
						reason: ExitReason::SpawnFailed {
							message: e.to_string(),
						},
					};
					return Err(e);
				}
			}
		}
		tracing::info!("started {} checker workers", self.slots.len());
		Ok(())
	}

	/// Requests termination of every running worker, in slot order.
	/// Returns the number of requests delivered.
	pub fn teardown(&mut self) -> usize {
		if let Ok(status) = serde_json::to_string(&self.status()) {
			tracing::debug!("pool at shutdown: {}", status);
		}

		let mut delivered = 0;
		for slot in &self.slots {
			let Some(pid) = slot.state.pid() else {
				continue;
			};
			match self.launcher.terminate(pid) {
				Ok(()) => {
					tracing::info!("terminating worker {} (pid {})", slot.index, pid);
					delivered += 1;
				}
				Err(e) => tracing::warn!("worker {}: {}", slot.index, e),
			}
		}
		delivered
	}

	fn record_exit(&mut self, index: usize, pid: u32, reason: ExitReason) {
		let Some(slot) = self.slots.get_mut(index) else {
			tracing::warn!("exit reported for unknown worker {}", index);
			return;
		};
		if slot.state.is_exited() {
			tracing::debug!("worker {} already exited", index);
			return;
		}
		if slot.state.pid() != Some(pid) {
			tracing::warn!("worker {} reported exit while {:?}", index, slot.state);
			return;
		}
		slot.state = SlotState::Exited { reason };
		if let Some(handle) = self.checkers.iter_mut().find(|h| h.index() == index) {
			handle.close_control_pipe();
		}
	}
}

impl<L: Launcher> Service for Supervisor<L> {
	type Event = LifecycleEvent;

	fn on_event(&mut self, event: LifecycleEvent) -> Control {
		match event {
			LifecycleEvent::Started { index, pid } => {
				let confirmed = self
					.slots
					.get(index)
					.is_some_and(|slot| slot.state == SlotState::Running { pid });
				if !confirmed {
					tracing::warn!("unexpected start of worker {} (pid {})", index, pid);
				}
				Control::Continue
			}
			LifecycleEvent::Exited { index, pid, reason } => {
				tracing::info!("checker process {} ended with reason: {}", index, reason);
				self.record_exit(index, pid, reason);
				Control::Stop
			}
		}
	}

	fn before_shutdown(&mut self) {
		let delivered = self.teardown();
		tracing::info!("sent termination to {} workers", delivered);
	}
}
