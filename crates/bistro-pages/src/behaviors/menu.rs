//! Menu category filter with staggered entry animations.
//!
//! Selecting a filter recomputes which items are visible and then re-runs the
//! entry animation of the visible items, each delayed by one step more than the
//! previous visible item.

use std::time::Duration;

use crate::dom::DomNode;

/// Sentinel `data-filter` value that shows every item.
pub const FILTER_ALL: &str = "all";

/// The active category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
	All,
	Category(String),
	/// The button has no `data-filter`; matches items without `data-category`.
	Uncategorized,
}

impl Filter {
	pub fn from_attr(value: Option<&str>) -> Self {
		match value {
			Some(FILTER_ALL) => Self::All,
			Some(category) => Self::Category(category.to_string()),
			None => Self::Uncategorized,
		}
	}

	pub fn matches(&self, category: Option<&str>) -> bool {
		match self {
			Self::All => true,
			Self::Category(wanted) => category == Some(wanted.as_str()),
			Self::Uncategorized => category.is_none(),
		}
	}
}

/// Animation state assigned to one menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaggerSlot {
	/// No animation class and no delay.
	Cleared,
	/// Animate after the given delay.
	Delayed(Duration),
}

/// Computes the stagger slot of every item from its hidden flag.
///
/// Visible items are numbered `0..k` in order and delayed by `index * step`;
/// hidden items, and every item under reduced motion, are cleared.
pub fn stagger_plan<I>(hidden: I, reduced_motion: bool, step: Duration) -> Vec<StaggerSlot>
where
	I: IntoIterator<Item = bool>,
{
	let mut visible_index = 0u32;
	hidden
		.into_iter()
		.map(|is_hidden| {
			if reduced_motion || is_hidden {
				StaggerSlot::Cleared
			} else {
				let slot = StaggerSlot::Delayed(step * visible_index);
				visible_index += 1;
				slot
			}
		})
		.collect()
}

/// CSS value for `animation-delay`.
pub fn animation_delay(delay: Duration) -> String {
	format!("{}ms", delay.as_millis())
}

/// Writes a stagger plan to the items.
///
/// A delayed item has its animation class removed, its layout read, its delay
/// set and the class added back, so the animation restarts on every call.
pub fn apply_stagger<N: DomNode>(items: &[N], plan: &[StaggerSlot], staggered_class: &str) {
	for (item, slot) in items.iter().zip(plan) {
		item.remove_class(staggered_class);
		match slot {
			StaggerSlot::Cleared => item.remove_style("animation-delay"),
			StaggerSlot::Delayed(delay) => {
				item.force_layout();
				item.set_style("animation-delay", &animation_delay(*delay));
				item.add_class(staggered_class);
			}
		}
	}
}

/// Class names used by the menu filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuClasses {
	pub active: String,
	pub hidden: String,
	pub staggered: String,
}

/// Filter buttons bound to the menu items they control.
#[derive(Debug)]
pub struct MenuFilter<N: DomNode> {
	buttons: Vec<N>,
	items: Vec<N>,
	classes: MenuClasses,
	reduced_motion: bool,
	step: Duration,
}

impl<N: DomNode> MenuFilter<N> {
	pub fn new(
		buttons: Vec<N>,
		items: Vec<N>,
		classes: MenuClasses,
		reduced_motion: bool,
		step: Duration,
	) -> Self {
		Self {
			buttons,
			items,
			classes,
			reduced_motion,
			step,
		}
	}

	pub fn buttons(&self) -> &[N] {
		&self.buttons
	}

	pub fn items(&self) -> &[N] {
		&self.items
	}

	/// Handles a click on the button at `index`. Returns the applied filter.
	pub fn select(&self, index: usize) -> Option<Filter> {
		let button = self.buttons.get(index)?;

		for other in &self.buttons {
			other.remove_class(&self.classes.active);
		}
		button.add_class(&self.classes.active);

		let filter = Filter::from_attr(button.attribute("data-filter").as_deref());
		for item in &self.items {
			let visible = filter.matches(item.attribute("data-category").as_deref());
			item.toggle_class(&self.classes.hidden, !visible);
		}

		self.restagger();
		Some(filter)
	}

	/// Recomputes and applies the stagger for the current hidden flags.
	pub fn restagger(&self) -> Vec<StaggerSlot> {
		let plan = stagger_plan(
			self.items
				.iter()
				.map(|item| item.has_class(&self.classes.hidden)),
			self.reduced_motion,
			self.step,
		);
		apply_stagger(&self.items, &plan, &self.classes.staggered);
		plan
	}
}
