//! Testimonial rotator.

use std::time::Duration;

use crate::dom::DomNode;

/// Cyclic active index over `len` cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotator {
	len: usize,
	active: usize,
}

impl Rotator {
	/// Starts at index 0. Returns `None` when there is nothing to rotate.
	pub fn new(len: usize) -> Option<Self> {
		(len > 1).then_some(Self { len, active: 0 })
	}

	pub fn active(&self) -> usize {
		self.active
	}

	pub fn len(&self) -> usize {
		self.len
	}

	/// Moves to the next card, wrapping to 0. Returns `(previous, next)`.
	pub fn advance(&mut self) -> (usize, usize) {
		let previous = self.active;
		self.active = (self.active + 1) % self.len;
		(previous, self.active)
	}

	/// Index after `elapsed` time with a tick every `period`.
	///
	/// Periods below one millisecond never tick, matching an interval timer's
	/// millisecond resolution.
	pub fn index_after(&self, elapsed: Duration, period: Duration) -> usize {
		let period_ms = period.as_millis();
		if period_ms == 0 {
			return self.active;
		}
		let ticks = (elapsed.as_millis() / period_ms) as usize;
		(self.active + ticks % self.len) % self.len
	}
}

/// Testimonial cards driven by a [`Rotator`].
#[derive(Debug)]
pub struct TestimonialRotator<N: DomNode> {
	cards: Vec<N>,
	rotator: Rotator,
	active_class: String,
}

impl<N: DomNode> TestimonialRotator<N> {
	/// Returns `None` for fewer than two cards or when reduced motion is requested.
	pub fn new(cards: Vec<N>, reduced_motion: bool, active_class: &str) -> Option<Self> {
		if reduced_motion {
			return None;
		}
		let rotator = Rotator::new(cards.len())?;
		Some(Self {
			cards,
			rotator,
			active_class: active_class.to_string(),
		})
	}

	pub fn active(&self) -> usize {
		self.rotator.active()
	}

	/// One timer tick: deactivate the current card, activate the next.
	pub fn tick(&mut self) -> usize {
		let (previous, next) = self.rotator.advance();
		self.cards[previous].remove_class(&self.active_class);
		self.cards[next].add_class(&self.active_class);
		next
	}
}
