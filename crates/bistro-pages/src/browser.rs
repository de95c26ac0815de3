//! Browser bindings: the [`DomNode`] implementation over `web_sys::Element`
//! and the query helpers used to locate anchor elements.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, NodeList, Window};

use crate::dom::{ClickTarget, DomNode, FormNode};
use crate::error::{BehaviorError, BehaviorResult, js_reason};

/// A live DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserNode(Element);

impl BrowserNode {
	pub fn new(element: Element) -> Self {
		Self(element)
	}

	pub fn element(&self) -> &Element {
		&self.0
	}

	pub fn event_target(&self) -> &EventTarget {
		self.0.as_ref()
	}

	/// Returns true if `other` is this element or one of its descendants.
	pub fn contains(&self, other: &Element) -> bool {
		let node: &web_sys::Node = other.as_ref();
		self.0.contains(Some(node))
	}

	fn html(&self) -> Option<&HtmlElement> {
		self.0.dyn_ref::<HtmlElement>()
	}
}

impl DomNode for BrowserNode {
	fn add_class(&self, class: &str) {
		let _ = self.0.class_list().add_1(class);
	}

	fn remove_class(&self, class: &str) {
		let _ = self.0.class_list().remove_1(class);
	}

	fn has_class(&self, class: &str) -> bool {
		self.0.class_list().contains(class)
	}

	fn toggle_class(&self, class: &str, force: bool) {
		let _ = self.0.class_list().toggle_with_force(class, force);
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.0.get_attribute(name)
	}

	fn set_attribute(&self, name: &str, value: &str) {
		let _ = self.0.set_attribute(name, value);
	}

	fn set_style(&self, property: &str, value: &str) {
		if let Some(html) = self.html() {
			let _ = html.style().set_property(property, value);
		}
	}

	fn remove_style(&self, property: &str) {
		if let Some(html) = self.html() {
			let _ = html.style().remove_property(property);
		}
	}

	fn set_text(&self, text: &str) {
		self.0.set_text_content(Some(text));
	}

	fn force_layout(&self) {
		if let Some(html) = self.html() {
			let _ = html.offset_width();
		}
	}
}

impl FormNode for BrowserNode {
	fn reset(&self) {
		if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
			form.reset();
		}
	}

	fn find_status(&self, class: &str) -> Option<Self> {
		let mut child = self.0.first_element_child();
		while let Some(element) = child {
			if element.class_list().contains(class) {
				return Some(Self(element));
			}
			child = element.next_element_sibling();
		}
		None
	}

	fn append_status(&self, class: &str) -> BehaviorResult<Self> {
		let document = self
			.0
			.owner_document()
			.ok_or(BehaviorError::Environment("document"))?;
		let status = document
			.create_element("p")
			.map_err(|err| BehaviorError::Dom(js_reason(&err)))?;
		status.set_class_name(class);
		self.0
			.append_child(&status)
			.map_err(|err| BehaviorError::Dom(js_reason(&err)))?;
		Ok(Self(status))
	}
}

/// Returns the global window.
pub fn window() -> BehaviorResult<Window> {
	web_sys::window().ok_or(BehaviorError::Environment("window"))
}

/// Returns the window's document.
pub fn document(window: &Window) -> BehaviorResult<Document> {
	window
		.document()
		.ok_or(BehaviorError::Environment("document"))
}

/// Finds the first element matching `selector` in the document.
pub fn query(document: &Document, selector: &str) -> BehaviorResult<Option<BrowserNode>> {
	document
		.query_selector(selector)
		.map(|found| found.map(BrowserNode))
		.map_err(|err| BehaviorError::Dom(format!("{selector}: {}", js_reason(&err))))
}

/// Finds every element matching `selector` in the document, in document order.
pub fn query_all(document: &Document, selector: &str) -> BehaviorResult<Vec<BrowserNode>> {
	document
		.query_selector_all(selector)
		.map(collect_elements)
		.map_err(|err| BehaviorError::Dom(format!("{selector}: {}", js_reason(&err))))
}

/// Finds every descendant of `root` matching `selector`, in document order.
pub fn query_all_within(root: &BrowserNode, selector: &str) -> BehaviorResult<Vec<BrowserNode>> {
	root.0
		.query_selector_all(selector)
		.map(collect_elements)
		.map_err(|err| BehaviorError::Dom(format!("{selector}: {}", js_reason(&err))))
}

fn collect_elements(list: NodeList) -> Vec<BrowserNode> {
	(0..list.length())
		.filter_map(|index| list.item(index))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.map(BrowserNode)
		.collect()
}

/// Evaluates a media query, treating unsupported queries as non-matching.
pub fn media_matches(window: &Window, query: &str) -> bool {
	window
		.match_media(query)
		.ok()
		.flatten()
		.is_some_and(|list| list.matches())
}

/// Returns true if `window.IntersectionObserver` exists.
pub fn intersection_observer_supported(window: &Window) -> bool {
	js_sys::Reflect::has(window, &"IntersectionObserver".into()).unwrap_or(false)
}

/// Classifies a document click relative to the navigation toggle and panel.
pub fn click_target(event: &Event, toggle: &BrowserNode, panel: &BrowserNode) -> ClickTarget {
	let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
		return ClickTarget::NotElement;
	};

	if panel.contains(&target) {
		ClickTarget::Panel
	} else if toggle.contains(&target) {
		ClickTarget::Toggle
	} else {
		ClickTarget::Outside
	}
}
