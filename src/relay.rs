//! Payload-less notification channels between the control panel and the
//! graph canvas.
//!
//! A [`Relay`] calls every live subscriber, synchronously and in the order
//! they subscribed. Nothing is buffered: a subscriber added after a
//! notification never sees it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
	next_id: u64,
	entries: Vec<(u64, Listener)>,
}

/// A single notification channel. Clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct Relay {
	inner: Rc<RefCell<Listeners>>,
}

impl fmt::Debug for Relay {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Relay")
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

impl Relay {
	/// Relay with no subscribers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` until the returned guard is dropped.
	#[must_use = "dropping the subscription unsubscribes immediately"]
	pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
		let mut inner = self.inner.borrow_mut();
		let id = inner.next_id;
		inner.next_id += 1;
		inner.entries.push((id, Rc::new(listener)));
		Subscription {
			id,
			relay: Rc::downgrade(&self.inner),
		}
	}

	/// Calls every current subscriber once.
	pub fn notify(&self) {
		// Snapshot so listeners may subscribe, unsubscribe or notify again.
		let listeners: Vec<Listener> = self
			.inner
			.borrow()
			.entries
			.iter()
			.map(|(_, l)| l.clone())
			.collect();
		for listener in listeners {
			listener();
		}
	}

	/// Number of live subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.inner.borrow().entries.len()
	}
}

/// Keeps a listener registered; dropping it unsubscribes.
pub struct Subscription {
	id: u64,
	relay: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(inner) = self.relay.upgrade() {
			inner.borrow_mut().entries.retain(|(id, _)| *id != self.id);
		}
	}
}

/// The three commands the control panel sends to the canvas.
#[derive(Clone, Debug, Default)]
pub struct GraphRelays {
	/// Re-run the layout with the current data.
	pub update: Relay,
	/// Scale and translate so the whole graph is visible.
	pub zoom_to_fit: Relay,
	/// Translate so the graph is centered, keeping the zoom.
	pub center: Relay,
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn delivers_in_registration_order() {
		let relay = Relay::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let subs: Vec<Subscription> = (0..3)
			.map(|i| {
				let log = log.clone();
				relay.subscribe(move || log.borrow_mut().push(i))
			})
			.collect();
		relay.notify();
		relay.notify();
		assert_eq!(*log.borrow(), vec![0, 1, 2, 0, 1, 2]);
		drop(subs);
	}

	#[test]
	fn late_subscribers_get_no_replay() {
		let relay = Relay::new();
		relay.notify();
		let hits = Rc::new(Cell::new(0));
		let h = hits.clone();
		let _sub = relay.subscribe(move || h.set(h.get() + 1));
		assert_eq!(hits.get(), 0);
		relay.notify();
		assert_eq!(hits.get(), 1);
	}

	#[test]
	fn dropping_the_guard_unsubscribes() {
		let relay = Relay::new();
		let hits = Rc::new(Cell::new(0));
		let h = hits.clone();
		let sub = relay.subscribe(move || h.set(h.get() + 1));
		assert_eq!(relay.subscriber_count(), 1);
		drop(sub);
		assert_eq!(relay.subscriber_count(), 0);
		relay.notify();
		assert_eq!(hits.get(), 0);
	}

	#[test]
	fn clones_share_subscribers() {
		let relays = GraphRelays::default();
		let hits = Rc::new(Cell::new(0));
		let h = hits.clone();
		let _sub = relays.center.subscribe(move || h.set(h.get() + 1));
		relays.clone().center.notify();
		relays.zoom_to_fit.notify();
		assert_eq!(hits.get(), 1);
	}

	#[test]
	fn listeners_may_notify_reentrantly() {
		let relay = Relay::new();
		let other = Relay::new();
		let hits = Rc::new(Cell::new(0));
		let h = hits.clone();
		let _inner = other.subscribe(move || h.set(h.get() + 1));
		let forward = other.clone();
		let _outer = relay.subscribe(move || forward.notify());
		relay.notify();
		assert_eq!(hits.get(), 1);
	}
}
