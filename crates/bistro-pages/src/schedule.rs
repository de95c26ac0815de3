//! Timer and animation-frame scheduling.
//!
//! The browser side wraps `setInterval` and `requestAnimationFrame` in
//! `RepeatingTask` and `FrameTask`. A repeating task owns its callback, so it
//! is cleared when cancelled or dropped. A frame task's callback frees itself
//! after running; dropping its handle leaves it scheduled.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::BehaviorResult;

/// Coalesces bursts of events into at most one pending frame update.
#[derive(Debug, Default)]
pub struct FrameThrottle {
	pending: Cell<bool>,
}

impl FrameThrottle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims the pending slot. Returns true if the caller should schedule a
	/// frame; false if an update is already in flight.
	pub fn request(&self) -> bool {
		!self.pending.replace(true)
	}

	/// Releases the slot once the scheduled update has run.
	pub fn complete(&self) {
		self.pending.set(false);
	}

	pub fn is_pending(&self) -> bool {
		self.pending.get()
	}
}

/// Something that can run a callback on the next rendered frame.
pub trait FrameScheduler {
	/// Schedules `callback` for the next frame.
	fn request_frame(&self, callback: Box<dyn FnOnce()>) -> BehaviorResult<()>;

	/// Cancels the frame scheduled last, if it has not run yet.
	fn cancel_pending(&self);
}

impl<S: FrameScheduler> FrameScheduler for Rc<S> {
	fn request_frame(&self, callback: Box<dyn FnOnce()>) -> BehaviorResult<()> {
		(**self).request_frame(callback)
	}

	fn cancel_pending(&self) {
		(**self).cancel_pending()
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser_tasks::{AnimationFrames, FrameTask, RepeatingTask};

#[cfg(target_arch = "wasm32")]
mod browser_tasks {
	use std::cell::RefCell;
	use std::rc::Rc;
	use std::time::Duration;

	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;
	use web_sys::Window;

	use super::FrameScheduler;
	use crate::error::{BehaviorError, BehaviorResult, js_reason};
	use crate::warn_log;

	/// A `setInterval` registration owning its callback.
	pub struct RepeatingTask {
		window: Window,
		handle: i32,
		_callback: Closure<dyn FnMut()>,
	}

	impl RepeatingTask {
		/// Starts calling `tick` every `period`.
		pub fn start<F>(window: &Window, period: Duration, tick: F) -> BehaviorResult<Self>
		where
			F: FnMut() + 'static,
		{
			let callback = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
			let timeout = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
			let handle = window
				.set_interval_with_callback_and_timeout_and_arguments_0(
					callback.as_ref().unchecked_ref(),
					timeout,
				)
				.map_err(|err| BehaviorError::Schedule {
					task: "interval",
					reason: js_reason(&err),
				})?;

			Ok(Self {
				window: window.clone(),
				handle,
				_callback: callback,
			})
		}

		/// Stops the interval and releases the callback.
		pub fn cancel(self) {
			drop(self);
		}
	}

	impl Drop for RepeatingTask {
		fn drop(&mut self) {
			self.window.clear_interval_with_handle(self.handle);
		}
	}

	impl std::fmt::Debug for RepeatingTask {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("RepeatingTask")
				.field("handle", &self.handle)
				.finish()
		}
	}

	/// A single `requestAnimationFrame` registration.
	///
	/// The callback frees itself after running; a cancelled callback is never
	/// invoked and its closure stays allocated.
	#[derive(Debug)]
	pub struct FrameTask {
		window: Window,
		handle: i32,
	}

	impl FrameTask {
		pub fn schedule<F>(window: &Window, callback: F) -> BehaviorResult<Self>
		where
			F: FnOnce() + 'static,
		{
			let callback = Closure::once_into_js(callback);
			let handle = window
				.request_animation_frame(callback.unchecked_ref())
				.map_err(|err| BehaviorError::Schedule {
					task: "animation frame",
					reason: js_reason(&err),
				})?;

			Ok(Self {
				window: window.clone(),
				handle,
			})
		}

		pub fn cancel(self) {
			if let Err(err) = self.window.cancel_animation_frame(self.handle) {
				warn_log!("animation frame {} not cancelled: {}", self.handle, js_reason(&err));
			}
		}
	}

	/// [`FrameScheduler`] backed by `window.requestAnimationFrame`.
	///
	/// Only a frame that has not run yet is held; the slot is emptied when the
	/// frame fires.
	#[derive(Debug)]
	pub struct AnimationFrames {
		window: Window,
		pending: Rc<RefCell<Option<FrameTask>>>,
	}

	impl AnimationFrames {
		pub fn new(window: &Window) -> Self {
			Self {
				window: window.clone(),
				pending: Rc::new(RefCell::new(None)),
			}
		}

		/// True while a requested frame has not run.
		pub fn has_pending(&self) -> bool {
			self.pending.borrow().is_some()
		}
	}

	impl FrameScheduler for AnimationFrames {
		fn request_frame(&self, callback: Box<dyn FnOnce()>) -> BehaviorResult<()> {
			let slot = Rc::clone(&self.pending);
			let task = FrameTask::schedule(&self.window, move || {
				slot.borrow_mut().take();
				callback();
			})?;
			self.pending.replace(Some(task));
			Ok(())
		}

		fn cancel_pending(&self) {
			if let Some(task) = self.pending.take() {
				task.cancel();
			}
		}
	}
}
