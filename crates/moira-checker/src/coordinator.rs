use std::future::Future;

use tokio::sync::mpsc::UnboundedReceiver;

/// What the event loop should do after a service handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
	Continue,
	Stop,
}

/// A component driven by the event loop.
pub trait Service {
	type Event;

	fn on_event(&mut self, event: Self::Event) -> Control;

	/// Runs once, synchronously, before the loop exits.
	fn before_shutdown(&mut self);
}

#[derive(Debug, Default)]
pub struct ShutdownState {
	shutting_down: bool,
}

/// Single-threaded event loop that owns the shutdown decision.
#[derive(Debug, Default)]
pub struct ShutdownCoordinator {
	state: ShutdownState,
}

impl ShutdownCoordinator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_shutting_down(&self) -> bool {
		self.state.shutting_down
	}

	/// Begins shutdown and runs the service's teardown hook.
	/// Returns `false` when shutdown was already underway.
	pub fn stop<S: Service>(&mut self, service: &mut S) -> bool {
		if self.state.shutting_down {
			tracing::debug!("shutdown already in progress");
			return false;
		}
		self.state.shutting_down = true;
		tracing::info!("shutting down");
		service.before_shutdown();
		true
	}

	/// Feeds events to `service` until it asks to stop, the event source
	/// closes, or `shutdown` completes. Events already queued when that
	/// happens are handled before the teardown hook runs.
	pub async fn run<S, F>(&mut self, service: &mut S, events: &mut UnboundedReceiver<S::Event>, shutdown: F)
	where
		S: Service,
		F: Future<Output = ()>,
	{
		tokio::pin!(shutdown);

		while !self.is_shutting_down() {
			tokio::select! {
				event = events.recv() => match event {
					Some(event) => {
						if service.on_event(event) == Control::Stop {
							drain(service, events);
							self.stop(service);
						}
					}
					None => {
						tracing::warn!("lifecycle event source closed");
						self.stop(service);
					}
				},
				_ = &mut shutdown => {
					tracing::info!("termination requested");
					drain(service, events);
					self.stop(service);
				}
			}
		}
	}
}

fn drain<S: Service>(service: &mut S, events: &mut UnboundedReceiver<S::Event>) {
	while let Ok(event) = events.try_recv() {
		service.on_event(event);
	}
}
