//! # moira-checker
//!
//! Master process of the moira checker. It starts one trigger-checking worker
//! per spare CPU, watches their lifecycle from a single-threaded event loop,
//! and shuts the whole service down as soon as any worker ends or a
//! termination signal arrives.
//!
//! ```rust,no_run
//! use moira_checker::{Supervisor, ShutdownCoordinator, WorkerLauncher};
//! use moira_core::{pool_size, CheckerConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> moira_checker::Result<()> {
//! let config = CheckerConfig::default();
//! let launcher = WorkerLauncher::new(&config.worker, "/etc/moira/checker.toml".into(), "stdout".into());
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//! let mut supervisor = Supervisor::new(launcher, pool_size(4), tx);
//! supervisor.start()?;
//!
//! ShutdownCoordinator::new()
//!     .run(&mut supervisor, &mut rx, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod coordinator;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod master;
pub mod observer;
pub mod signals;
pub mod supervisor;

pub use coordinator::{Control, Service, ShutdownCoordinator};
pub use error::{Error, Result};
pub use launcher::{ExitFuture, Launched, Launcher, ProcessHandle, WorkerLauncher};
pub use observer::{LifecycleEvent, LifecycleObserver};
pub use supervisor::{Supervisor, WorkerSlot};
