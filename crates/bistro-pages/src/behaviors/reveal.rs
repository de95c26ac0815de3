//! Reveal-on-scroll.
//!
//! Each tracked element makes a single `Hidden -> Visible` transition. The
//! browser binding feeds intersection entries into [`RevealTracker`] and
//! unobserves an element as soon as the tracker reports its transition.

use crate::dom::DomNode;

/// How reveal items are made visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealStrategy {
	/// Observe viewport intersection and reveal at `threshold`.
	Observe { threshold: f64 },
	/// Reveal everything at once.
	Immediate,
}

impl RevealStrategy {
	/// Observation needs `IntersectionObserver` and a user that has not asked
	/// for reduced motion; otherwise every item is shown immediately.
	pub fn select(observer_supported: bool, reduced_motion: bool, threshold: f64) -> Self {
		if observer_supported && !reduced_motion {
			Self::Observe { threshold }
		} else {
			Self::Immediate
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
	Hidden,
	Visible,
}

/// Reveal state for every tracked element.
#[derive(Debug)]
pub struct RevealTracker<N: DomNode> {
	items: Vec<(N, RevealPhase)>,
	visible_class: String,
}

impl<N: DomNode> RevealTracker<N> {
	pub fn new(items: Vec<N>, visible_class: &str) -> Self {
		Self {
			items: items
				.into_iter()
				.map(|item| (item, RevealPhase::Hidden))
				.collect(),
			visible_class: visible_class.to_string(),
		}
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn nodes(&self) -> impl Iterator<Item = &N> {
		self.items.iter().map(|(node, _)| node)
	}

	pub fn phase(&self, node: &N) -> Option<RevealPhase> {
		self.items
			.iter()
			.find(|(item, _)| item == node)
			.map(|(_, phase)| *phase)
	}

	pub fn visible_count(&self) -> usize {
		self.items
			.iter()
			.filter(|(_, phase)| *phase == RevealPhase::Visible)
			.count()
	}

	/// Applies an intersection entry. Returns true when `node` has just become
	/// visible and should no longer be observed.
	pub fn handle_entry(&mut self, node: &N, is_intersecting: bool) -> bool {
		is_intersecting && self.reveal(node)
	}

	/// Reveals a single node. Returns false if it was unknown or already visible.
	pub fn reveal(&mut self, node: &N) -> bool {
		let class = &self.visible_class;
		match self.items.iter_mut().find(|(item, _)| item == node) {
			Some((item, phase)) if *phase == RevealPhase::Hidden => {
				item.add_class(class);
				*phase = RevealPhase::Visible;
				true
			}
			_ => false,
		}
	}

	/// Reveals every node still hidden.
	pub fn reveal_all(&mut self) -> usize {
		let mut revealed = 0;
		for (item, phase) in &mut self.items {
			if *phase == RevealPhase::Hidden {
				item.add_class(&self.visible_class);
				*phase = RevealPhase::Visible;
				revealed += 1;
			}
		}
		revealed
	}
}
