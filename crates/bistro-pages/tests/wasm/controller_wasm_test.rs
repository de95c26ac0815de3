//! Page Controller WASM Tests
//!
//! Mounts the behaviors against a real document and drives them with
//! dispatched DOM events.
//!
//! **Run with**: `wasm-pack test --headless --firefox crates/bistro-pages`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlElement, KeyboardEvent, KeyboardEventInit, Window};

use bistro_pages::behaviors::current_year;
use bistro_pages::listeners::ListenerRegistry;
use bistro_pages::schedule::{AnimationFrames, FrameScheduler};
use bistro_pages::{ACKNOWLEDGMENT, BehaviorConfig, BehaviorKind, PageController};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<header>
	<button class="nav-toggle" aria-expanded="false">Menu</button>
	<nav class="site-nav"><a href="#menu">Menu</a><a href="#book">Book</a></nav>
</header>
<section data-reveal>Story</section>
<div data-menu-filters>
	<button data-filter="all" class="is-active">All</button>
	<button data-filter="mains">Mains</button>
</div>
<article class="menu-item" data-category="starters">Soup</article>
<article class="menu-item" data-category="mains">Steak</article>
<div data-testimonials>
	<blockquote class="testimonial is-active">One</blockquote>
	<blockquote class="testimonial">Two</blockquote>
</div>
<form class="reservation-form"><input name="name" value=""></form>
<footer>&copy; <span id="year"></span></footer>
"##;

fn mount_page() -> (Window, Document, PageController) {
	let window = web_sys::window().unwrap();
	let document = window.document().unwrap();
	document.body().unwrap().set_inner_html(PAGE);
	let controller = PageController::mount(&window, &document, &BehaviorConfig::default());
	(window, document, controller)
}

fn element(document: &Document, selector: &str) -> HtmlElement {
	document
		.query_selector(selector)
		.unwrap()
		.unwrap()
		.dyn_into::<HtmlElement>()
		.unwrap()
}

fn press_key(document: &Document, key: &str) {
	let init = KeyboardEventInit::new();
	init.set_key(key);
	init.set_bubbles(true);
	let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
	document.dispatch_event(&event).unwrap();
}

// ============================================================================
// Mount Report Tests
// ============================================================================

/// Test every behavior with markup on the page mounts
#[wasm_bindgen_test]
fn test_full_page_mounts_core_behaviors() {
	let (_window, _document, controller) = mount_page();

	for kind in [
		BehaviorKind::Navigation,
		BehaviorKind::Year,
		BehaviorKind::Reveal,
		BehaviorKind::Menu,
		BehaviorKind::Reservation,
	] {
		assert!(controller.report().is_mounted(kind), "{kind} not mounted");
	}
	assert!(controller.report().failed().is_empty());

	controller.teardown();
}

/// Test an empty page skips everything without failing
#[wasm_bindgen_test]
fn test_empty_page_skips() {
	let window = web_sys::window().unwrap();
	let document = window.document().unwrap();
	document.body().unwrap().set_inner_html("<main></main>");

	let controller = PageController::mount(&window, &document, &BehaviorConfig::default());

	assert!(controller.report().mounted().is_empty());
	assert!(controller.report().failed().is_empty());
	controller.teardown();
}

// ============================================================================
// Navigation Tests
// ============================================================================

/// Test toggle click opens the panel and the bubbled click keeps it open
#[wasm_bindgen_test]
fn test_toggle_click_opens() {
	let (_window, document, controller) = mount_page();
	let toggle = element(&document, ".nav-toggle");
	let panel = element(&document, ".site-nav");

	toggle.click();

	assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
	assert!(panel.class_list().contains("is-open"));

	controller.teardown();
}

/// Test Escape closes an open panel
#[wasm_bindgen_test]
fn test_escape_closes() {
	let (_window, document, controller) = mount_page();
	let toggle = element(&document, ".nav-toggle");
	let panel = element(&document, ".site-nav");

	toggle.click();
	press_key(&document, "Tab");
	assert!(panel.class_list().contains("is-open"));

	press_key(&document, "Escape");
	assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
	assert!(!panel.class_list().contains("is-open"));

	controller.teardown();
}

/// Test clicking outside the navigation closes it
#[wasm_bindgen_test]
fn test_outside_click_closes() {
	let (_window, document, controller) = mount_page();
	let toggle = element(&document, ".nav-toggle");
	let panel = element(&document, ".site-nav");

	toggle.click();
	element(&document, "footer").click();

	assert!(!panel.class_list().contains("is-open"));
	controller.teardown();
}

// ============================================================================
// Year, Menu and Reservation Tests
// ============================================================================

/// Test the year element holds the current year
#[wasm_bindgen_test]
fn test_year_stamped() {
	let (_window, document, controller) = mount_page();

	let year = element(&document, "#year");
	assert_eq!(year.text_content(), Some(current_year().to_string()));

	controller.teardown();
}

/// Test a filter click hides non-matching items
#[wasm_bindgen_test]
fn test_menu_filter_click() {
	let (_window, document, controller) = mount_page();
	let mains = element(&document, "[data-filter=\"mains\"]");
	let all = element(&document, "[data-filter=\"all\"]");

	mains.click();

	assert!(mains.class_list().contains("is-active"));
	assert!(!all.class_list().contains("is-active"));
	let soup = element(&document, "[data-category=\"starters\"]");
	let steak = element(&document, "[data-category=\"mains\"]");
	assert!(soup.class_list().contains("is-hidden"));
	assert!(!steak.class_list().contains("is-hidden"));

	controller.teardown();
}

/// Test submitting the reservation form is intercepted and acknowledged
#[wasm_bindgen_test]
fn test_reservation_submit_intercepted() {
	let (_window, document, controller) = mount_page();
	let form = element(&document, ".reservation-form");

	let init = EventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	let event = Event::new_with_event_init_dict("submit", &init).unwrap();
	form.dispatch_event(&event).unwrap();

	assert!(event.default_prevented());
	let status = element(&document, ".reservation-form .form-status");
	assert_eq!(status.text_content().as_deref(), Some(ACKNOWLEDGMENT));

	controller.teardown();
}

/// Test teardown detaches the listeners
#[wasm_bindgen_test]
fn test_teardown_detaches() {
	let (_window, document, controller) = mount_page();
	controller.teardown();

	let toggle = element(&document, ".nav-toggle");
	toggle.click();

	assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
}

// ============================================================================
// Remount Tests
// ============================================================================

fn status_count(document: &Document) -> u32 {
	document
		.query_selector_all(".reservation-form .form-status")
		.unwrap()
		.length()
}

/// Test remounting the controller keeps a single status element
#[wasm_bindgen_test]
fn test_remount_reuses_status() {
	let (window, document, first) = mount_page();
	first.teardown();

	let second = PageController::mount(&window, &document, &BehaviorConfig::default());
	assert_eq!(status_count(&document), 1);

	let form = element(&document, ".reservation-form");
	let init = EventInit::new();
	init.set_cancelable(true);
	form.dispatch_event(&Event::new_with_event_init_dict("submit", &init).unwrap())
		.unwrap();
	let status = element(&document, ".reservation-form .form-status");
	assert_eq!(status.text_content().as_deref(), Some(ACKNOWLEDGMENT));

	second.teardown();
}

/// Test mounting with overrides through the exported entry point
#[wasm_bindgen_test]
fn test_mount_with_config_twice() {
	let document = web_sys::window().unwrap().document().unwrap();
	document.body().unwrap().set_inner_html(PAGE);

	bistro_pages::mount_with_config("{}").unwrap();
	bistro_pages::mount_with_config(r#"{ "acknowledgment": "See you soon." }"#).unwrap();
	assert_eq!(status_count(&document), 1);

	let form = element(&document, ".reservation-form");
	let init = EventInit::new();
	init.set_cancelable(true);
	let event = Event::new_with_event_init_dict("submit", &init).unwrap();
	form.dispatch_event(&event).unwrap();

	assert!(event.default_prevented());
	let status = element(&document, ".reservation-form .form-status");
	assert_eq!(status.text_content().as_deref(), Some("See you soon."));

	bistro_pages::teardown();
}

/// Test invalid overrides are rejected without mounting
#[wasm_bindgen_test]
fn test_mount_with_invalid_config() {
	assert!(bistro_pages::mount_with_config("{ not json").is_err());
}

// ============================================================================
// Listener Registry Tests
// ============================================================================

/// Test appended listeners move to the receiving registry
#[wasm_bindgen_test]
fn test_registry_append_transfers_ownership() {
	let (_window, document, controller) = mount_page();
	controller.teardown();
	let button = element(&document, "[data-filter=\"mains\"]");
	let clicks = Rc::new(Cell::new(0));

	let mut local = ListenerRegistry::new();
	let counter = Rc::clone(&clicks);
	local
		.listen(button.as_ref(), "click", move |_| counter.set(counter.get() + 1))
		.unwrap();

	let mut owner = ListenerRegistry::new();
	owner.append(local);
	assert_eq!(owner.len(), 1);

	button.click();
	assert_eq!(clicks.get(), 1);

	drop(owner);
	button.click();
	assert_eq!(clicks.get(), 1);
}

// ============================================================================
// Animation Frame Tests
// ============================================================================

async fn next_frame(window: &Window) {
	let promise = js_sys::Promise::new(&mut |resolve, _reject| {
		let callback = Closure::once_into_js(move || {
			resolve.call0(&JsValue::UNDEFINED).unwrap();
		});
		window.request_animation_frame(callback.unchecked_ref()).unwrap();
	});
	JsFuture::from(promise).await.unwrap();
}

/// Test a frame that has run is no longer held as pending
#[wasm_bindgen_test]
async fn test_frame_slot_clears_after_running() {
	let window = web_sys::window().unwrap();
	let frames = AnimationFrames::new(&window);
	let ran = Rc::new(Cell::new(false));

	let flag = Rc::clone(&ran);
	frames
		.request_frame(Box::new(move || flag.set(true)))
		.unwrap();
	assert!(frames.has_pending());

	next_frame(&window).await;

	assert!(ran.get());
	assert!(!frames.has_pending());
	frames.cancel_pending();
}

/// Test cancelling a pending frame prevents its callback
#[wasm_bindgen_test]
async fn test_cancelled_frame_never_runs() {
	let window = web_sys::window().unwrap();
	let frames = AnimationFrames::new(&window);
	let ran = Rc::new(Cell::new(false));

	let flag = Rc::clone(&ran);
	frames
		.request_frame(Box::new(move || flag.set(true)))
		.unwrap();
	frames.cancel_pending();
	assert!(!frames.has_pending());

	next_frame(&window).await;
	assert!(!ran.get());
}
