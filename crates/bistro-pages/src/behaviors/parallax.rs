//! Scroll-linked parallax on the hero image.

use std::rc::Rc;

use crate::dom::DomNode;
use crate::schedule::{FrameScheduler, FrameThrottle};
use crate::warn_log;

/// Conditions evaluated once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallaxGate {
	pub reduced_motion: bool,
	/// The desktop breakpoint matched when the page loaded.
	pub desktop: bool,
}

impl ParallaxGate {
	pub fn allows(&self) -> bool {
		!self.reduced_motion && self.desktop
	}
}

/// Vertical offset in px for a scroll position.
pub fn parallax_offset(scroll_y: f64, factor: f64, max: f64) -> f64 {
	(scroll_y * factor).min(max)
}

/// CSS transform for an offset.
pub fn translate_y(offset: f64) -> String {
	format!("translateY({offset}px)")
}

/// The parallax element and its tuning.
#[derive(Debug)]
pub struct Parallax<N: DomNode> {
	node: N,
	factor: f64,
	max: f64,
}

impl<N: DomNode> Parallax<N> {
	pub fn new(node: N, factor: f64, max: f64) -> Self {
		Self { node, factor, max }
	}

	/// Writes the transform for `scroll_y` and returns the offset applied.
	pub fn apply(&self, scroll_y: f64) -> f64 {
		let offset = parallax_offset(scroll_y, self.factor, self.max);
		self.node.set_style("transform", &translate_y(offset));
		offset
	}
}

/// Scroll handler that applies the parallax at most once per frame.
pub struct ScrollParallax<N: DomNode, S: FrameScheduler> {
	parallax: Rc<Parallax<N>>,
	throttle: Rc<FrameThrottle>,
	frames: S,
	scroll_y: Rc<dyn Fn() -> f64>,
}

impl<N: DomNode + 'static, S: FrameScheduler> ScrollParallax<N, S> {
	/// `scroll_y` is read when the frame runs, not when the event fires.
	pub fn new(parallax: Parallax<N>, frames: S, scroll_y: impl Fn() -> f64 + 'static) -> Self {
		Self {
			parallax: Rc::new(parallax),
			throttle: Rc::new(FrameThrottle::new()),
			frames,
			scroll_y: Rc::new(scroll_y),
		}
	}

	/// Handles one scroll event.
	pub fn handle_scroll(&self) {
		if !self.throttle.request() {
			return;
		}

		let parallax = Rc::clone(&self.parallax);
		let throttle = Rc::clone(&self.throttle);
		let scroll_y = Rc::clone(&self.scroll_y);
		let update = Box::new(move || {
			parallax.apply(scroll_y());
			throttle.complete();
		});

		if let Err(err) = self.frames.request_frame(update) {
			warn_log!("parallax frame not scheduled: {}", err);
			self.throttle.complete();
		}
	}

	pub fn is_pending(&self) -> bool {
		self.throttle.is_pending()
	}

	/// Cancels a scheduled but not yet run update.
	pub fn cancel(&self) {
		self.frames.cancel_pending();
		self.throttle.complete();
	}
}

impl<N: DomNode, S: FrameScheduler> std::fmt::Debug for ScrollParallax<N, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ScrollParallax")
			.field("pending", &self.throttle.is_pending())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{FakeNode, ManualFrames};
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	#[case(false, true, true)]
	#[case(true, true, false)]
	#[case(false, false, false)]
	#[case(true, false, false)]
	fn test_gate(#[case] reduced_motion: bool, #[case] desktop: bool, #[case] allowed: bool) {
		let gate = ParallaxGate {
			reduced_motion,
			desktop,
		};
		assert_eq!(gate.allows(), allowed);
	}

	#[rstest]
	#[case(0.0, 0.0)]
	#[case(100.0, 8.0)]
	#[case(275.0, 22.0)]
	#[case(5000.0, 22.0)]
	fn test_offset(#[case] scroll: f64, #[case] expected: f64) {
		assert!((parallax_offset(scroll, 0.08, 22.0) - expected).abs() < 1e-9);
	}

	#[rstest]
	#[case(8.0, "translateY(8px)")]
	#[case(1.6, "translateY(1.6px)")]
	#[case(22.0, "translateY(22px)")]
	fn test_translate_format(#[case] offset: f64, #[case] expected: &str) {
		assert_eq!(translate_y(offset), expected);
	}

	#[rstest]
	fn test_scroll_burst_coalesces_into_one_frame() {
		let hero = FakeNode::new("img");
		let frames = Rc::new(ManualFrames::new());
		let scroll = Rc::new(Cell::new(0.0));
		let source = Rc::clone(&scroll);
		let handler = ScrollParallax::new(
			Parallax::new(hero.clone(), 0.08, 22.0),
			Rc::clone(&frames),
			move || source.get(),
		);

		for y in [10.0, 50.0, 100.0] {
			scroll.set(y);
			handler.handle_scroll();
		}
		assert_eq!(frames.requested(), 1);
		assert!(handler.is_pending());
		assert_eq!(hero.style("transform"), None);

		frames.run_frame();
		assert!(!handler.is_pending());
		assert_eq!(hero.style("transform").as_deref(), Some("translateY(8px)"));

		scroll.set(1000.0);
		handler.handle_scroll();
		frames.run_frame();
		assert_eq!(frames.requested(), 2);
		assert_eq!(hero.style("transform").as_deref(), Some("translateY(22px)"));
	}

	#[rstest]
	fn test_cancel_releases_throttle() {
		let hero = FakeNode::new("img");
		let frames = Rc::new(ManualFrames::new());
		let handler = ScrollParallax::new(Parallax::new(hero.clone(), 0.08, 22.0), Rc::clone(&frames), || 400.0);

		handler.handle_scroll();
		handler.cancel();
		assert_eq!(frames.pending(), 0);
		assert!(!handler.is_pending());
		assert_eq!(hero.style("transform"), None);
	}
}
