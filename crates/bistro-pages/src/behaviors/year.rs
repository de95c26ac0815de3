//! Copyright year stamping.

use crate::dom::DomNode;

/// The current four-digit year in the user's local time zone.
#[cfg(target_arch = "wasm32")]
pub fn current_year() -> i32 {
	js_sys::Date::new_0().get_full_year() as i32
}

/// The current four-digit year in the local time zone.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_year() -> i32 {
	use chrono::Datelike;

	chrono::Local::now().year()
}

/// Writes `year` as the text of every node. Returns the number of nodes stamped.
pub fn stamp_year<N: DomNode>(nodes: &[N], year: i32) -> usize {
	let text = year.to_string();
	for node in nodes {
		node.set_text(&text);
	}
	nodes.len()
}
