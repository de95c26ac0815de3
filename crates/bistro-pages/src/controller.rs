//! Page behavior controller.
//!
//! [`PageController::mount`] runs every behavior against the current document.
//! Behaviors are independent: one whose anchors are missing is skipped, and
//! one whose browser calls fail is logged and skipped without affecting the
//! rest. The controller owns every listener, observer and timer it created.

use std::fmt;

/// The behaviors mounted by the controller, in mount order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
	Navigation,
	Year,
	Reveal,
	Parallax,
	Menu,
	Testimonials,
	Reservation,
}

impl BehaviorKind {
	pub const ALL: [BehaviorKind; 7] = [
		Self::Navigation,
		Self::Year,
		Self::Reveal,
		Self::Parallax,
		Self::Menu,
		Self::Testimonials,
		Self::Reservation,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Navigation => "navigation",
			Self::Year => "year",
			Self::Reveal => "reveal",
			Self::Parallax => "parallax",
			Self::Menu => "menu",
			Self::Testimonials => "testimonials",
			Self::Reservation => "reservation",
		}
	}
}

impl fmt::Display for BehaviorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of mounting one behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
	Mounted,
	/// Anchors absent or conditions (reduced motion, viewport) not met.
	Skipped,
	/// A browser call failed; the message is logged.
	Failed(String),
}

/// Which behaviors mounted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountReport {
	entries: Vec<(BehaviorKind, MountOutcome)>,
}

impl MountReport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, kind: BehaviorKind, outcome: MountOutcome) {
		self.entries.push((kind, outcome));
	}

	pub fn outcome(&self, kind: BehaviorKind) -> Option<&MountOutcome> {
		self.entries
			.iter()
			.find(|(k, _)| *k == kind)
			.map(|(_, outcome)| outcome)
	}

	pub fn is_mounted(&self, kind: BehaviorKind) -> bool {
		self.outcome(kind) == Some(&MountOutcome::Mounted)
	}

	pub fn mounted(&self) -> Vec<BehaviorKind> {
		self.filter(|outcome| *outcome == MountOutcome::Mounted)
	}

	pub fn skipped(&self) -> Vec<BehaviorKind> {
		self.filter(|outcome| *outcome == MountOutcome::Skipped)
	}

	pub fn failed(&self) -> Vec<BehaviorKind> {
		self.filter(|outcome| matches!(outcome, MountOutcome::Failed(_)))
	}

	fn filter(&self, predicate: impl Fn(&MountOutcome) -> bool) -> Vec<BehaviorKind> {
		self.entries
			.iter()
			.filter(|(_, outcome)| predicate(outcome))
			.map(|(kind, _)| *kind)
			.collect()
	}
}

impl fmt::Display for MountReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names = |kinds: Vec<BehaviorKind>| {
			kinds
				.iter()
				.map(BehaviorKind::as_str)
				.collect::<Vec<_>>()
				.join(", ")
		};
		write!(
			f,
			"mounted [{}], skipped [{}], failed [{}]",
			names(self.mounted()),
			names(self.skipped()),
			names(self.failed())
		)
	}
}

/// User and viewport conditions read once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Environment {
	/// `(prefers-reduced-motion: reduce)` matched.
	pub reduced_motion: bool,
	/// The desktop breakpoint matched.
	pub desktop: bool,
	/// `IntersectionObserver` is available.
	pub observer_supported: bool,
}

#[cfg(target_arch = "wasm32")]
pub use browser_controller::PageController;

#[cfg(target_arch = "wasm32")]
mod browser_controller {
	use std::cell::RefCell;
	use std::rc::Rc;

	use wasm_bindgen::JsCast;
	use wasm_bindgen::JsValue;
	use wasm_bindgen::closure::Closure;
	use web_sys::{
		Document, Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
		KeyboardEvent, Window,
	};

	use super::{BehaviorKind, Environment, MountOutcome, MountReport};
	use crate::behaviors::{
		MenuClasses, MenuFilter, Navigation, Parallax, ParallaxGate, ReservationIntercept,
		RevealStrategy, RevealTracker, ScrollParallax, TestimonialRotator, current_year, stamp_year,
	};
	use crate::browser::{
		BrowserNode, click_target, intersection_observer_supported, media_matches, query, query_all,
		query_all_within,
	};
	use crate::config::BehaviorConfig;
	use crate::error::{BehaviorError, BehaviorResult, js_reason};
	use crate::listeners::ListenerRegistry;
	use crate::schedule::{AnimationFrames, RepeatingTask};
	use crate::{debug_log, info_log, warn_log};

	const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

	type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

	impl Environment {
		/// Reads the media queries and feature support from the window.
		pub fn detect(window: &Window, config: &BehaviorConfig) -> Self {
			Self {
				reduced_motion: media_matches(window, REDUCED_MOTION_QUERY),
				desktop: media_matches(window, &config.timing.desktop_query()),
				observer_supported: intersection_observer_supported(window),
			}
		}
	}

	struct RevealObserver {
		observer: IntersectionObserver,
		_callback: ObserverCallback,
	}

	impl Drop for RevealObserver {
		fn drop(&mut self) {
			self.observer.disconnect();
		}
	}

	/// Owns everything the behaviors attached to the page.
	pub struct PageController {
		listeners: ListenerRegistry,
		reveal: Option<RevealObserver>,
		rotation: Option<RepeatingTask>,
		parallax: Option<Rc<ScrollParallax<BrowserNode, AnimationFrames>>>,
		report: MountReport,
	}

	impl std::fmt::Debug for PageController {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("PageController")
				.field("listeners", &self.listeners.len())
				.field("report", &self.report)
				.finish()
		}
	}

	impl PageController {
		/// Mounts every behavior against `document`.
		pub fn mount(window: &Window, document: &Document, config: &BehaviorConfig) -> Self {
			let env = Environment::detect(window, config);
			debug_log!("page environment: {:?}", env);

			let mut controller = Self {
				listeners: ListenerRegistry::new(),
				reveal: None,
				rotation: None,
				parallax: None,
				report: MountReport::new(),
			};

			for kind in BehaviorKind::ALL {
				let result = match kind {
					BehaviorKind::Navigation => controller.mount_navigation(document, config),
					BehaviorKind::Year => controller.mount_year(document, config),
					BehaviorKind::Reveal => controller.mount_reveal(document, config, &env),
					BehaviorKind::Parallax => controller.mount_parallax(window, document, config, &env),
					BehaviorKind::Menu => controller.mount_menu(document, config, &env),
					BehaviorKind::Testimonials => {
						controller.mount_testimonials(window, document, config, &env)
					}
					BehaviorKind::Reservation => controller.mount_reservation(document, config),
				};
				controller.record(kind, result);
			}

			info_log!("page behaviors: {}", controller.report);
			controller
		}

		pub fn report(&self) -> &MountReport {
			&self.report
		}

		/// Detaches listeners, disconnects the observer and cancels timers.
		pub fn teardown(mut self) {
			self.listeners.clear();
			self.reveal.take();
			if let Some(task) = self.rotation.take() {
				task.cancel();
			}
			if let Some(parallax) = self.parallax.take() {
				parallax.cancel();
			}
		}

		fn record(&mut self, kind: BehaviorKind, result: BehaviorResult<bool>) {
			let outcome = match result {
				Ok(true) => MountOutcome::Mounted,
				Ok(false) => {
					debug_log!("{} skipped", kind);
					MountOutcome::Skipped
				}
				Err(err) => {
					warn_log!("{} not mounted: {}", kind, err);
					MountOutcome::Failed(err.to_string())
				}
			};
			self.report.record(kind, outcome);
		}

		fn mount_navigation(&mut self, document: &Document, config: &BehaviorConfig) -> BehaviorResult<bool> {
			let selectors = &config.selectors;
			let (Some(toggle), Some(panel)) = (
				query(document, &selectors.nav_toggle)?,
				query(document, &selectors.nav_panel)?,
			) else {
				return Ok(false);
			};

			let mut listeners = ListenerRegistry::new();
			let nav = Rc::new(Navigation::new(toggle.clone(), panel.clone(), &config.classes.nav_open));

			let on_toggle = Rc::clone(&nav);
			listeners.listen(toggle.event_target(), "click", move |_| {
				on_toggle.toggle();
			})?;

			for link in query_all_within(&panel, &selectors.nav_link)? {
				let on_link = Rc::clone(&nav);
				listeners.listen(link.event_target(), "click", move |_| {
					on_link.close();
				})?;
			}

			let on_click = Rc::clone(&nav);
			listeners.listen(document.as_ref(), "click", move |event: Event| {
				on_click.handle_document_click(click_target(&event, &toggle, &panel));
			})?;

			let on_key = nav;
			listeners.listen(document.as_ref(), "keydown", move |event: Event| {
				if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
					on_key.handle_key(&key_event.key());
				}
			})?;

			self.listeners.append(listeners);
			Ok(true)
		}

		fn mount_year(&mut self, document: &Document, config: &BehaviorConfig) -> BehaviorResult<bool> {
			let nodes = query_all(document, &config.selectors.year)?;
			Ok(stamp_year(&nodes, current_year()) > 0)
		}

		fn mount_reveal(
			&mut self,
			document: &Document,
			config: &BehaviorConfig,
			env: &Environment,
		) -> BehaviorResult<bool> {
			let items = query_all(document, &config.selectors.reveal)?;
			if items.is_empty() {
				return Ok(false);
			}

			let mut tracker = RevealTracker::new(items, &config.classes.visible);
			let threshold = match RevealStrategy::select(
				env.observer_supported,
				env.reduced_motion,
				config.timing.reveal_threshold,
			) {
				RevealStrategy::Observe { threshold } => threshold,
				RevealStrategy::Immediate => {
					tracker.reveal_all();
					return Ok(true);
				}
			};

			let targets: Vec<BrowserNode> = tracker.nodes().cloned().collect();
			let tracker = Rc::new(RefCell::new(tracker));
			let callback: ObserverCallback = Closure::wrap(Box::new(
				move |entries: js_sys::Array, observer: IntersectionObserver| {
					for entry in entries.iter() {
						let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
							continue;
						};
						let node = BrowserNode::new(entry.target());
						if tracker.borrow_mut().handle_entry(&node, entry.is_intersecting()) {
							observer.unobserve(node.element());
						}
					}
				},
			)
				as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

			let init = IntersectionObserverInit::new();
			init.set_threshold(&JsValue::from_f64(threshold));
			let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
				.map_err(|err| BehaviorError::Observer(js_reason(&err)))?;

			for target in &targets {
				observer.observe(target.element());
			}

			self.reveal = Some(RevealObserver {
				observer,
				_callback: callback,
			});
			Ok(true)
		}

		fn mount_parallax(
			&mut self,
			window: &Window,
			document: &Document,
			config: &BehaviorConfig,
			env: &Environment,
		) -> BehaviorResult<bool> {
			let Some(hero) = query(document, &config.selectors.parallax)? else {
				return Ok(false);
			};
			let gate = ParallaxGate {
				reduced_motion: env.reduced_motion,
				desktop: env.desktop,
			};
			if !gate.allows() {
				return Ok(false);
			}

			let scroll_window = window.clone();
			let handler = Rc::new(ScrollParallax::new(
				Parallax::new(hero, config.timing.parallax_factor, config.timing.parallax_max_px),
				AnimationFrames::new(window),
				move || scroll_window.scroll_y().unwrap_or(0.0),
			));

			let on_scroll = Rc::clone(&handler);
			self.listeners.listen_passive(window.as_ref(), "scroll", move |_| {
				on_scroll.handle_scroll();
			})?;

			self.parallax = Some(handler);
			Ok(true)
		}

		fn mount_menu(
			&mut self,
			document: &Document,
			config: &BehaviorConfig,
			env: &Environment,
		) -> BehaviorResult<bool> {
			let Some(wrap) = query(document, &config.selectors.menu_filters)? else {
				return Ok(false);
			};
			let buttons = query_all_within(&wrap, &config.selectors.filter_button)?;
			let items = query_all(document, &config.selectors.menu_item)?;

			let classes = MenuClasses {
				active: config.classes.active.clone(),
				hidden: config.classes.hidden.clone(),
				staggered: config.classes.staggered.clone(),
			};
			let menu = Rc::new(MenuFilter::new(
				buttons.clone(),
				items,
				classes,
				env.reduced_motion,
				config.timing.stagger_step(),
			));
			menu.restagger();

			let mut listeners = ListenerRegistry::new();
			for (index, button) in buttons.iter().enumerate() {
				let on_select = Rc::clone(&menu);
				listeners.listen(button.event_target(), "click", move |_| {
					on_select.select(index);
				})?;
			}

			self.listeners.append(listeners);
			Ok(true)
		}

		fn mount_testimonials(
			&mut self,
			window: &Window,
			document: &Document,
			config: &BehaviorConfig,
			env: &Environment,
		) -> BehaviorResult<bool> {
			let cards = query_all(document, &config.selectors.testimonial_cards())?;
			let Some(mut rotator) = TestimonialRotator::new(cards, env.reduced_motion, &config.classes.active)
			else {
				return Ok(false);
			};

			let task = RepeatingTask::start(window, config.timing.rotation_period(), move || {
				rotator.tick();
			})?;
			self.rotation = Some(task);
			Ok(true)
		}

		fn mount_reservation(&mut self, document: &Document, config: &BehaviorConfig) -> BehaviorResult<bool> {
			let Some(form) = query(document, &config.selectors.reservation_form)? else {
				return Ok(false);
			};

			let intercept = ReservationIntercept::mount(
				form.clone(),
				&config.classes.form_status,
				&config.acknowledgment,
			)?;
			self.listeners.listen(form.event_target(), "submit", move |event: Event| {
				event.prevent_default();
				intercept.submit();
			})?;

			Ok(true)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_report_partitions_outcomes() {
		let mut report = MountReport::new();
		report.record(BehaviorKind::Navigation, MountOutcome::Mounted);
		report.record(BehaviorKind::Parallax, MountOutcome::Skipped);
		report.record(BehaviorKind::Reveal, MountOutcome::Failed("observer".into()));
		report.record(BehaviorKind::Reservation, MountOutcome::Mounted);

		assert_eq!(
			report.mounted(),
			vec![BehaviorKind::Navigation, BehaviorKind::Reservation]
		);
		assert_eq!(report.skipped(), vec![BehaviorKind::Parallax]);
		assert_eq!(report.failed(), vec![BehaviorKind::Reveal]);
		assert!(report.is_mounted(BehaviorKind::Navigation));
		assert!(!report.is_mounted(BehaviorKind::Menu));
		assert_eq!(report.outcome(BehaviorKind::Menu), None);
	}

	#[rstest]
	fn test_report_display() {
		let mut report = MountReport::new();
		report.record(BehaviorKind::Year, MountOutcome::Mounted);
		report.record(BehaviorKind::Menu, MountOutcome::Skipped);
		assert_eq!(
			report.to_string(),
			"mounted [year], skipped [menu], failed []"
		);
	}

	#[rstest]
	fn test_kinds_are_in_mount_order() {
		let names: Vec<_> = BehaviorKind::ALL.iter().map(|k| k.to_string()).collect();
		assert_eq!(
			names,
			vec!["navigation", "year", "reveal", "parallax", "menu", "testimonials", "reservation"]
		);
	}
}
