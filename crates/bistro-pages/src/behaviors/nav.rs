//! Mobile navigation toggle.
//!
//! The open/closed state lives in [`Navigation`]; every transition writes the
//! same state to the toggle's `aria-expanded` attribute and to the panel's
//! open class, so the two can never disagree.

use std::cell::Cell;

use crate::dom::{ClickTarget, DomNode};

const ARIA_EXPANDED: &str = "aria-expanded";

/// Navigation panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
	Open,
	#[default]
	Closed,
}

impl NavState {
	/// Reads the state server-rendered into `aria-expanded`.
	pub fn from_aria(value: Option<&str>) -> Self {
		match value {
			Some("true") => Self::Open,
			_ => Self::Closed,
		}
	}

	pub fn toggled(self) -> Self {
		match self {
			Self::Open => Self::Closed,
			Self::Closed => Self::Open,
		}
	}

	pub fn is_open(self) -> bool {
		self == Self::Open
	}

	/// Value written to `aria-expanded`.
	pub fn aria_value(self) -> &'static str {
		if self.is_open() { "true" } else { "false" }
	}
}

/// The navigation toggle bound to its panel.
#[derive(Debug)]
pub struct Navigation<N: DomNode> {
	toggle: N,
	panel: N,
	open_class: String,
	state: Cell<NavState>,
}

impl<N: DomNode> Navigation<N> {
	/// Binds the toggle and panel, adopting the state the toggle was rendered with.
	pub fn new(toggle: N, panel: N, open_class: &str) -> Self {
		let state = NavState::from_aria(toggle.attribute(ARIA_EXPANDED).as_deref());
		Self {
			toggle,
			panel,
			open_class: open_class.to_string(),
			state: Cell::new(state),
		}
	}

	pub fn state(&self) -> NavState {
		self.state.get()
	}

	/// Handles a click on the toggle.
	///
	/// Flips the state currently rendered in `aria-expanded`, so markup changed
	/// by other scripts since the last transition is respected.
	pub fn toggle(&self) -> NavState {
		let rendered = NavState::from_aria(self.toggle.attribute(ARIA_EXPANDED).as_deref());
		self.transition(rendered.toggled())
	}

	/// Closes the panel. Safe to call when already closed.
	pub fn close(&self) -> NavState {
		self.transition(NavState::Closed)
	}

	/// Handles a click anywhere in the document.
	pub fn handle_document_click(&self, target: ClickTarget) -> NavState {
		match target {
			ClickTarget::Outside => self.close(),
			ClickTarget::Toggle | ClickTarget::Panel | ClickTarget::NotElement => self.state(),
		}
	}

	/// Handles a keydown anywhere in the document.
	pub fn handle_key(&self, key: &str) -> NavState {
		if key == "Escape" {
			self.close()
		} else {
			self.state()
		}
	}

	fn transition(&self, next: NavState) -> NavState {
		self.state.set(next);
		self.project(next);
		next
	}

	/// Writes `state` to the toggle attribute and the panel class.
	pub fn project(&self, state: NavState) {
		self.toggle.set_attribute(ARIA_EXPANDED, state.aria_value());
		self.panel.toggle_class(&self.open_class, state.is_open());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeNode;
	use rstest::{fixture, rstest};

	#[fixture]
	fn nav() -> Navigation<FakeNode> {
		let toggle = FakeNode::new("button").with_attribute(ARIA_EXPANDED, "false");
		let panel = FakeNode::new("nav").with_class("site-nav");
		Navigation::new(toggle, panel, "is-open")
	}

	fn assert_agrees(nav: &Navigation<FakeNode>) {
		let aria = nav.toggle.attribute(ARIA_EXPANDED);
		assert_eq!(aria.as_deref(), Some(nav.state().aria_value()));
		assert_eq!(nav.panel.has_class("is-open"), nav.state().is_open());
	}

	#[rstest]
	#[case(Some("true"), NavState::Open)]
	#[case(Some("false"), NavState::Closed)]
	#[case(Some("TRUE"), NavState::Closed)]
	#[case(None, NavState::Closed)]
	fn test_state_from_aria(#[case] value: Option<&str>, #[case] expected: NavState) {
		assert_eq!(NavState::from_aria(value), expected);
	}

	#[rstest]
	fn test_toggle_flips_and_projects(nav: Navigation<FakeNode>) {
		assert_eq!(nav.toggle(), NavState::Open);
		assert_agrees(&nav);
		assert_eq!(nav.toggle(), NavState::Closed);
		assert_agrees(&nav);
	}

	#[rstest]
	fn test_initial_state_from_markup() {
		let toggle = FakeNode::new("button").with_attribute(ARIA_EXPANDED, "true");
		let panel = FakeNode::new("nav");
		let nav = Navigation::new(toggle, panel, "is-open");
		assert_eq!(nav.state(), NavState::Open);
		assert_eq!(nav.toggle(), NavState::Closed);
		assert_agrees(&nav);
	}

	#[rstest]
	#[case(ClickTarget::Outside, NavState::Closed)]
	#[case(ClickTarget::Toggle, NavState::Open)]
	#[case(ClickTarget::Panel, NavState::Open)]
	#[case(ClickTarget::NotElement, NavState::Open)]
	fn test_document_click_while_open(
		nav: Navigation<FakeNode>,
		#[case] target: ClickTarget,
		#[case] expected: NavState,
	) {
		nav.toggle();
		assert_eq!(nav.handle_document_click(target), expected);
		assert_agrees(&nav);
	}

	#[rstest]
	#[case("Escape", NavState::Closed)]
	#[case("Enter", NavState::Open)]
	#[case("Esc", NavState::Open)]
	fn test_keys(nav: Navigation<FakeNode>, #[case] key: &str, #[case] expected: NavState) {
		nav.toggle();
		assert_eq!(nav.handle_key(key), expected);
		assert_agrees(&nav);
	}

	#[rstest]
	#[case("true", NavState::Closed)]
	#[case("false", NavState::Open)]
	fn test_toggle_follows_rendered_attribute(
		nav: Navigation<FakeNode>,
		#[case] rendered: &str,
		#[case] expected: NavState,
	) {
		nav.toggle.set_attribute(ARIA_EXPANDED, rendered);
		assert_eq!(nav.toggle(), expected);
		assert_agrees(&nav);
	}

	#[rstest]
	fn test_toggle_after_external_open() {
		let toggle = FakeNode::new("button").with_attribute(ARIA_EXPANDED, "false");
		let panel = FakeNode::new("nav");
		let nav = Navigation::new(toggle.clone(), panel.clone(), "is-open");

		toggle.set_attribute(ARIA_EXPANDED, "true");
		panel.add_class("is-open");

		assert_eq!(nav.toggle(), NavState::Closed);
		assert!(!panel.has_class("is-open"));
	}

	#[rstest]
	fn test_close_is_idempotent(nav: Navigation<FakeNode>) {
		nav.close();
		nav.close();
		assert_eq!(nav.state(), NavState::Closed);
		assert_agrees(&nav);
		// The close path still writes the projection.
		assert_eq!(nav.toggle.journal().len(), 2);
	}
}
