//! Bistro Pages - interactive behaviors for the Bistro marketing site
//!
//! A small WebAssembly controller that wires the static site's markup to its
//! interactive behaviors:
//!
//! - [`behaviors::nav`]: mobile navigation toggle with outside-click and Escape dismissal
//! - [`behaviors::year`]: copyright year stamping
//! - [`behaviors::reveal`]: one-shot reveal-on-scroll
//! - [`behaviors::parallax`]: frame-throttled hero parallax (desktop only)
//! - [`behaviors::menu`]: menu category filter with staggered entry animations
//! - [`behaviors::testimonials`]: testimonial rotator
//! - [`behaviors::reservation`]: reservation form acknowledgment
//!
//! ## Architecture
//!
//! Behavior state is plain Rust and reaches the page only through the
//! [`DomNode`] trait. On `wasm32` the [`browser`] module implements it over
//! `web_sys::Element` and the controller attaches listeners, the intersection
//! observer and timers. On native targets the same behaviors run against
//! [`testing::FakeNode`], which is how they are unit-tested.
//!
//! ```text
//! DOMContentLoaded ─► PageController::mount
//!                       ├─ query anchors (skip behavior if absent)
//!                       ├─ build behavior state
//!                       └─ listen / observe / schedule ─► state transition ─► DomNode projection
//! ```
//!
//! ## Usage
//!
//! The module mounts itself with the default configuration when it is
//! instantiated. Pages with different markup can remount with overrides:
//!
//! ```ignore
//! import init, { mountWithConfig } from "./bistro_pages.js";
//!
//! await init();
//! mountWithConfig(JSON.stringify({ timing: { rotation_period_ms: 8000 } }));
//! ```

pub mod behaviors;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod logging;
pub mod schedule;
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod listeners;

pub use behaviors::{
	Filter, MenuFilter, NavState, Navigation, Parallax, ParallaxGate, ReservationIntercept,
	RevealStrategy, RevealTracker, Rotator, ScrollParallax, StaggerSlot, TestimonialRotator,
};
pub use config::{ACKNOWLEDGMENT, BehaviorConfig};
#[cfg(target_arch = "wasm32")]
pub use controller::PageController;
pub use controller::{BehaviorKind, Environment, MountOutcome, MountReport};
pub use dom::{ClickTarget, DomNode, FormNode};
pub use error::{BehaviorError, BehaviorResult};
pub use schedule::{FrameScheduler, FrameThrottle};

#[doc(hidden)]
pub mod __private {
	pub use tracing;
	pub use web_sys;
}

#[cfg(target_arch = "wasm32")]
pub use entry::{mount_with_config, teardown};

#[cfg(target_arch = "wasm32")]
mod entry {
	use std::cell::RefCell;

	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;

	use crate::browser;
	use crate::config::BehaviorConfig;
	use crate::controller::{MountReport, PageController};
	use crate::error::{BehaviorError, BehaviorResult, js_reason};
	use crate::error_log;

	thread_local! {
		static CONTROLLER: RefCell<Option<PageController>> = const { RefCell::new(None) };
		static LATEST_CONFIG: RefCell<Option<BehaviorConfig>> = const { RefCell::new(None) };
	}

	/// Mounts the default behaviors once the document content is ready.
	#[wasm_bindgen(start)]
	pub fn start() -> Result<(), JsValue> {
		when_content_ready(BehaviorConfig::default())?;
		Ok(())
	}

	/// Replaces the mounted behaviors with ones built from a JSON override.
	#[wasm_bindgen(js_name = mountWithConfig)]
	pub fn mount_with_config(json: &str) -> Result<(), JsValue> {
		let config = BehaviorConfig::from_json(json)?;
		mount_now(&config)?;
		Ok(())
	}

	/// Detaches every behavior mounted by this module.
	#[wasm_bindgen]
	pub fn teardown() {
		let controller = CONTROLLER.with(|slot| slot.borrow_mut().take());
		if let Some(controller) = controller {
			controller.teardown();
		}
	}

	fn when_content_ready(config: BehaviorConfig) -> BehaviorResult<()> {
		let window = browser::window()?;
		let document = browser::document(&window)?;
		let ready_state = js_sys::Reflect::get(&document, &"readyState".into())
			.ok()
			.and_then(|state| state.as_string());

		if ready_state.as_deref() != Some("loading") {
			mount_now(&config)?;
			return Ok(());
		}

		let callback = Closure::once_into_js(move || {
			// A page may have remounted with overrides while the document was loading.
			let config = LATEST_CONFIG
				.with(|slot| slot.borrow().clone())
				.unwrap_or(config);
			if let Err(err) = mount_now(&config) {
				error_log!("page behaviors not mounted: {}", err);
			}
		});
		document
			.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
			.map_err(|err| BehaviorError::Listener {
				event_type: "DOMContentLoaded".to_string(),
				reason: js_reason(&err),
			})
	}

	fn mount_now(config: &BehaviorConfig) -> BehaviorResult<MountReport> {
		let window = browser::window()?;
		let document = browser::document(&window)?;

		teardown();
		let controller = PageController::mount(&window, &document, config);
		let report = controller.report().clone();
		CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
		LATEST_CONFIG.with(|slot| *slot.borrow_mut() = Some(config.clone()));
		Ok(report)
	}
}
