use std::time::Duration;

use leptos::prelude::{IntervalHandle, set_interval_with_handle};
use log::debug;

use crate::error::{Error, Result};

/// Something that can run a callback every `period` until cancelled.
pub trait Schedule {
	/// Token returned by [`Schedule::every`] and consumed by [`Schedule::cancel`].
	type Handle;

	/// Starts calling `on_tick` every `period`.
	fn every(&self, period: Duration, on_tick: Box<dyn Fn()>) -> Result<Self::Handle>;

	/// Stops the interval behind `handle`.
	fn cancel(&self, handle: Self::Handle);
}

/// `setInterval` on the browser window.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserInterval;

impl Schedule for BrowserInterval {
	type Handle = IntervalHandle;

	fn every(&self, period: Duration, on_tick: Box<dyn Fn()>) -> Result<IntervalHandle> {
		set_interval_with_handle(on_tick, period).map_err(|e| Error::Timer(format!("{e:?}")))
	}

	fn cancel(&self, handle: IntervalHandle) {
		handle.clear();
	}
}

/// Owns the interval driving live updates.
///
/// Restarting replaces the running interval; stopping or dropping the
/// ticker clears it.
pub struct Ticker<S: Schedule = BrowserInterval> {
	period: Duration,
	scheduler: S,
	handle: Option<S::Handle>,
}

impl Ticker {
	/// Ticker backed by the browser's `setInterval`.
	pub fn new(period: Duration) -> Self {
		Self::with_scheduler(period, BrowserInterval)
	}
}

impl<S: Schedule> Ticker<S> {
	/// Ticker backed by `scheduler`. Nothing runs until [`Ticker::start`].
	pub fn with_scheduler(period: Duration, scheduler: S) -> Self {
		Self {
			period,
			scheduler,
			handle: None,
		}
	}

	/// Time between ticks.
	pub fn period(&self) -> Duration {
		self.period
	}

	/// Whether an interval is currently scheduled.
	pub fn is_running(&self) -> bool {
		self.handle.is_some()
	}

	/// Schedules `on_tick`, replacing any interval already running.
	pub fn start(&mut self, on_tick: impl Fn() + 'static) -> Result<()> {
		self.stop();
		let handle = self.scheduler.every(self.period, Box::new(on_tick))?;
		debug!("ticker started every {:?}", self.period);
		self.handle = Some(handle);
		Ok(())
	}

	/// Clears the running interval, if any.
	pub fn stop(&mut self) {
		if let Some(handle) = self.handle.take() {
			self.scheduler.cancel(handle);
			debug!("ticker stopped");
		}
	}

	/// Runs while `live` holds: starts an idle ticker, stops a running one
	/// once `live` is false, and leaves a running ticker alone otherwise.
	pub fn follow(&mut self, live: bool, on_tick: impl Fn() + 'static) -> Result<()> {
		if !live {
			self.stop();
			return Ok(());
		}
		if self.is_running() {
			return Ok(());
		}
		self.start(on_tick)
	}
}

impl<S: Schedule> Drop for Ticker<S> {
	fn drop(&mut self) {
		self.stop();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use super::*;

	/// Records scheduled intervals so tests can fire and inspect them.
	#[derive(Clone, Default)]
	struct Manual {
		next: Rc<Cell<u32>>,
		active: Rc<RefCell<Vec<(u32, Box<dyn Fn()>)>>>,
		cancelled: Rc<RefCell<Vec<u32>>>,
	}

	impl Manual {
		fn fire(&self) {
			for (_, on_tick) in self.active.borrow().iter() {
				on_tick();
			}
		}

		fn active(&self) -> usize {
			self.active.borrow().len()
		}

		fn started(&self) -> u32 {
			self.next.get()
		}
	}

	impl Schedule for Manual {
		type Handle = u32;

		fn every(&self, _period: Duration, on_tick: Box<dyn Fn()>) -> Result<u32> {
			let id = self.next.get();
			self.next.set(id + 1);
			self.active.borrow_mut().push((id, on_tick));
			Ok(id)
		}

		fn cancel(&self, handle: u32) {
			self.active.borrow_mut().retain(|(id, _)| *id != handle);
			self.cancelled.borrow_mut().push(handle);
		}
	}

	struct Refused;

	impl Schedule for Refused {
		type Handle = ();

		fn every(&self, _period: Duration, _on_tick: Box<dyn Fn()>) -> Result<()> {
			Err(Error::Timer("no timers here".into()))
		}

		fn cancel(&self, _handle: ()) {}
	}

	fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
		let count = Rc::new(Cell::new(0));
		let inner = count.clone();
		(count, move || inner.set(inner.get() + 1))
	}

	fn ticker(manual: &Manual) -> Ticker<Manual> {
		Ticker::with_scheduler(Duration::from_millis(250), manual.clone())
	}

	#[test]
	fn idle_ticker_stops_cleanly() {
		let manual = Manual::default();
		let mut ticker = ticker(&manual);
		assert!(!ticker.is_running());
		ticker.stop();
		assert!(!ticker.is_running());
		assert!(manual.cancelled.borrow().is_empty());
		assert_eq!(ticker.period(), Duration::from_millis(250));
	}

	#[test]
	fn start_stop_restart() {
		let manual = Manual::default();
		let mut ticker = ticker(&manual);
		let (count, on_tick) = counter();

		ticker.start(on_tick).unwrap();
		assert!(ticker.is_running());
		manual.fire();
		manual.fire();
		assert_eq!(count.get(), 2);

		ticker.stop();
		assert!(!ticker.is_running());
		assert_eq!(manual.active(), 0);
		manual.fire();
		assert_eq!(count.get(), 2);

		let (again, on_tick) = counter();
		ticker.start(on_tick).unwrap();
		assert!(ticker.is_running());
		manual.fire();
		assert_eq!(again.get(), 1);
		assert_eq!(manual.started(), 2);
		assert_eq!(*manual.cancelled.borrow(), vec![0]);
	}

	#[test]
	fn restarting_replaces_the_interval() {
		let manual = Manual::default();
		let mut ticker = ticker(&manual);
		ticker.start(|| {}).unwrap();
		ticker.start(|| {}).unwrap();
		assert_eq!(manual.active(), 1);
		assert_eq!(*manual.cancelled.borrow(), vec![0]);
	}

	#[test]
	fn dropping_a_running_ticker_clears_it() {
		let manual = Manual::default();
		let (count, on_tick) = counter();
		{
			let mut ticker = ticker(&manual);
			ticker.start(on_tick).unwrap();
			assert_eq!(manual.active(), 1);
		}
		assert_eq!(manual.active(), 0);
		assert_eq!(*manual.cancelled.borrow(), vec![0]);
		manual.fire();
		assert_eq!(count.get(), 0);
	}

	#[test]
	fn follow_tracks_the_live_flag() {
		let manual = Manual::default();
		let mut ticker = ticker(&manual);

		ticker.follow(false, || {}).unwrap();
		assert!(!ticker.is_running());
		assert_eq!(manual.started(), 0);

		ticker.follow(true, || {}).unwrap();
		ticker.follow(true, || {}).unwrap();
		assert!(ticker.is_running());
		assert_eq!(manual.started(), 1);
		assert_eq!(manual.active(), 1);

		ticker.follow(false, || {}).unwrap();
		assert!(!ticker.is_running());
		assert_eq!(manual.active(), 0);

		ticker.follow(true, || {}).unwrap();
		assert_eq!(manual.started(), 2);
	}

	#[test]
	fn failed_start_leaves_ticker_idle() {
		let mut ticker = Ticker::with_scheduler(Duration::from_secs(1), Refused);
		let err = ticker.start(|| {}).unwrap_err();
		assert!(matches!(err, Error::Timer(_)));
		assert!(!ticker.is_running());
	}
}
