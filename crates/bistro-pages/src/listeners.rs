//! Event listener registration.
//!
//! Every listener a behavior attaches is kept in a [`ListenerRegistry`] so the
//! closure stays alive for as long as the controller does. Dropping a
//! registered [`EventListener`] removes it from its target.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::error::{BehaviorError, BehaviorResult, js_reason};

/// A listener attached to an event target.
pub struct EventListener {
	target: EventTarget,
	event_type: String,
	callback: Closure<dyn FnMut(Event)>,
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(&self.event_type, self.callback.as_ref().unchecked_ref());
	}
}

impl std::fmt::Debug for EventListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventListener")
			.field("event_type", &self.event_type)
			.finish()
	}
}

/// Owns the listeners attached while mounting behaviors.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
	listeners: Vec<EventListener>,
}

impl ListenerRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches `handler` for `event_type` on `target`.
	pub fn listen<F>(&mut self, target: &EventTarget, event_type: &str, handler: F) -> BehaviorResult<()>
	where
		F: FnMut(Event) + 'static,
	{
		self.attach(target, event_type, handler, false)
	}

	/// Attaches a passive `handler`, which may not call `preventDefault`.
	pub fn listen_passive<F>(
		&mut self,
		target: &EventTarget,
		event_type: &str,
		handler: F,
	) -> BehaviorResult<()>
	where
		F: FnMut(Event) + 'static,
	{
		self.attach(target, event_type, handler, true)
	}

	fn attach<F>(&mut self, target: &EventTarget, event_type: &str, handler: F, passive: bool) -> BehaviorResult<()>
	where
		F: FnMut(Event) + 'static,
	{
		let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
		let attached = if passive {
			let options = AddEventListenerOptions::new();
			options.set_passive(true);
			target.add_event_listener_with_callback_and_add_event_listener_options(
				event_type,
				callback.as_ref().unchecked_ref(),
				&options,
			)
		} else {
			target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
		};

		attached.map_err(|err| BehaviorError::Listener {
			event_type: event_type.to_string(),
			reason: js_reason(&err),
		})?;

		self.listeners.push(EventListener {
			target: target.clone(),
			event_type: event_type.to_string(),
			callback,
		});
		Ok(())
	}

	/// Number of attached listeners.
	pub fn len(&self) -> usize {
		self.listeners.len()
	}

	pub fn is_empty(&self) -> bool {
		self.listeners.is_empty()
	}

	/// Takes ownership of every listener in `other`.
	pub fn append(&mut self, mut other: ListenerRegistry) {
		self.listeners.append(&mut other.listeners);
	}

	/// Detaches every listener.
	pub fn clear(&mut self) {
		self.listeners.clear();
	}
}
