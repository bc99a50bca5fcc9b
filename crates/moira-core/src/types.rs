use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a worker stopped running.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExitReason {
	/// The process exited on its own with a status code.
	Exited { code: i32 },
	/// The process was terminated by a signal.
	Signaled { signal: i32 },
	/// The OS refused to start the process.
	SpawnFailed { message: String },
	/// The exit status could not be collected.
	Lost { message: String },
}

impl ExitReason {
	pub fn is_clean(&self) -> bool {
		matches!(self, ExitReason::Exited { code: 0 })
	}
}

impl fmt::Display for ExitReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ExitReason::Exited { code } => write!(f, "exited with code {}", code),
			ExitReason::Signaled { signal } => write!(f, "killed by signal {}", signal),
			ExitReason::SpawnFailed { message } => write!(f, "spawn failed: {}", message),
			ExitReason::Lost { message } => write!(f, "exit status lost: {}", message),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotState {
	Pending,
	Running { pid: u32 },
	Exited { reason: ExitReason },
}

impl SlotState {
	pub fn is_running(&self) -> bool {
		matches!(self, SlotState::Running { .. })
	}

	pub fn is_exited(&self) -> bool {
		matches!(self, SlotState::Exited { .. })
	}

	pub fn pid(&self) -> Option<u32> {
		match self {
			SlotState::Running { pid } => Some(*pid),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotStatus {
	pub index: usize,
	#[serde(flatten)]
	pub state: SlotState,
}

/// `max(1, parallelism - 1)`: one unit of parallelism stays with the master.
pub fn pool_size(parallelism: usize) -> usize {
	parallelism.saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pool_size_reserves_one_unit() {
		for p in 2..=64 {
			assert_eq!(pool_size(p), p - 1);
		}
	}

	#[test]
	fn pool_size_floor_is_one() {
		assert_eq!(pool_size(1), 1);
		assert_eq!(pool_size(0), 1);
	}

	#[test]
	fn slot_state_pid_only_while_running() {
		assert_eq!(SlotState::Pending.pid(), None);
		assert_eq!(SlotState::Running { pid: 42 }.pid(), Some(42));
		let exited = SlotState::Exited {
			reason: ExitReason::Exited { code: 0 },
		};
		assert_eq!(exited.pid(), None);
		assert!(exited.is_exited());
		assert!(!exited.is_running());
	}

	#[test]
	fn exit_reason_display() {
		assert_eq!(ExitReason::Exited { code: 3 }.to_string(), "exited with code 3");
		assert_eq!(ExitReason::Signaled { signal: 15 }.to_string(), "killed by signal 15");
		assert!(ExitReason::Exited { code: 0 }.is_clean());
		assert!(!ExitReason::Signaled { signal: 9 }.is_clean());
	}
}
