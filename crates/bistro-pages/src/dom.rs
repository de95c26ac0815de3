//! DOM seam used by every behavior.
//!
//! Behaviors keep their state in plain Rust types and write the result to
//! the page through [`DomNode`]. The browser implementation lives in
//! [`crate::browser`]; [`crate::testing::FakeNode`] is an in-memory
//! implementation for native tests.

use crate::error::BehaviorResult;

/// Operations a behavior needs on a single element.
///
/// Mutations never fail from the caller's point of view: a browser refusing a
/// class token or style value leaves the element unchanged.
pub trait DomNode: Clone + PartialEq {
	/// Adds a class to the element's class list.
	fn add_class(&self, class: &str);

	/// Removes a class from the element's class list.
	fn remove_class(&self, class: &str);

	/// Returns true if the element carries the class.
	fn has_class(&self, class: &str) -> bool;

	/// Adds the class when `force` is true, removes it otherwise.
	fn toggle_class(&self, class: &str, force: bool) {
		if force {
			self.add_class(class);
		} else {
			self.remove_class(class);
		}
	}

	/// Reads an attribute.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Writes an attribute.
	fn set_attribute(&self, name: &str, value: &str);

	/// Sets an inline style property.
	fn set_style(&self, property: &str, value: &str);

	/// Clears an inline style property.
	fn remove_style(&self, property: &str);

	/// Replaces the element's text content.
	fn set_text(&self, text: &str);

	/// Reads layout on this element so that a removed animation class takes
	/// effect before it is added again.
	fn force_layout(&self);
}

/// A form element that can be reset and host a status message.
pub trait FormNode: DomNode {
	/// Restores every field to its default value.
	fn reset(&self);

	/// Returns the first direct child carrying `class`.
	fn find_status(&self, class: &str) -> Option<Self>;

	/// Creates a `<p>` with the given class and appends it to the form.
	fn append_status(&self, class: &str) -> BehaviorResult<Self>;
}

/// Where a document-level click landed relative to the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
	/// Inside the toggle button.
	Toggle,
	/// Inside the navigation panel.
	Panel,
	/// An element outside both.
	Outside,
	/// The event target was not an element (text node, window, ...).
	NotElement,
}
