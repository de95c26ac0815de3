//! Test doubles for driving behaviors without a browser.
//!
//! - [`FakeNode`]: an in-memory element implementing [`DomNode`] and
//!   [`FormNode`], recording every mutation in a journal.
//! - [`ManualClock`]: a simulated `setInterval` clock.
//! - [`ManualFrames`]: a simulated animation-frame queue.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::dom::{DomNode, FormNode};
use crate::error::BehaviorResult;
use crate::schedule::FrameScheduler;

/// A mutation applied to a [`FakeNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomOp {
	AddClass(String),
	RemoveClass(String),
	SetAttribute(String, String),
	SetStyle(String, String),
	RemoveStyle(String),
	SetText(String),
	ForceLayout,
	Reset,
	AppendChild,
}

#[derive(Debug, Default)]
struct FakeState {
	tag: String,
	classes: Vec<String>,
	attributes: BTreeMap<String, String>,
	styles: BTreeMap<String, String>,
	text: Option<String>,
	fields: BTreeMap<String, (String, String)>,
	children: Vec<FakeNode>,
	journal: Vec<DomOp>,
}

/// An in-memory element. Clones share state; equality is identity.
#[derive(Debug, Clone, Default)]
pub struct FakeNode {
	inner: Rc<RefCell<FakeState>>,
}

impl PartialEq for FakeNode {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl FakeNode {
	pub fn new(tag: &str) -> Self {
		let node = Self::default();
		node.inner.borrow_mut().tag = tag.to_string();
		node
	}

	pub fn with_class(self, class: &str) -> Self {
		self.inner.borrow_mut().classes.push(class.to_string());
		self
	}

	pub fn with_attribute(self, name: &str, value: &str) -> Self {
		self.inner
			.borrow_mut()
			.attributes
			.insert(name.to_string(), value.to_string());
		self
	}

	/// Adds a form field with a default value.
	pub fn with_field(self, name: &str, default: &str) -> Self {
		self.inner
			.borrow_mut()
			.fields
			.insert(name.to_string(), (default.to_string(), default.to_string()));
		self
	}

	pub fn tag(&self) -> String {
		self.inner.borrow().tag.clone()
	}

	pub fn classes(&self) -> Vec<String> {
		self.inner.borrow().classes.clone()
	}

	pub fn style(&self, property: &str) -> Option<String> {
		self.inner.borrow().styles.get(property).cloned()
	}

	pub fn text(&self) -> Option<String> {
		self.inner.borrow().text.clone()
	}

	/// Simulates the user typing into a field.
	pub fn set_field(&self, name: &str, value: &str) {
		if let Some(field) = self.inner.borrow_mut().fields.get_mut(name) {
			field.1 = value.to_string();
		}
	}

	pub fn field(&self, name: &str) -> Option<String> {
		self.inner.borrow().fields.get(name).map(|(_, value)| value.clone())
	}

	pub fn children(&self) -> Vec<FakeNode> {
		self.inner.borrow().children.clone()
	}

	/// Every mutation since creation or the last [`clear_journal`](Self::clear_journal).
	pub fn journal(&self) -> Vec<DomOp> {
		self.inner.borrow().journal.clone()
	}

	pub fn clear_journal(&self) {
		self.inner.borrow_mut().journal.clear();
	}

	fn record(&self, op: DomOp) {
		self.inner.borrow_mut().journal.push(op);
	}
}

impl DomNode for FakeNode {
	fn add_class(&self, class: &str) {
		{
			let mut state = self.inner.borrow_mut();
			if !state.classes.iter().any(|c| c == class) {
				state.classes.push(class.to_string());
			}
		}
		self.record(DomOp::AddClass(class.to_string()));
	}

	fn remove_class(&self, class: &str) {
		self.inner.borrow_mut().classes.retain(|c| c != class);
		self.record(DomOp::RemoveClass(class.to_string()));
	}

	fn has_class(&self, class: &str) -> bool {
		self.inner.borrow().classes.iter().any(|c| c == class)
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.inner.borrow().attributes.get(name).cloned()
	}

	fn set_attribute(&self, name: &str, value: &str) {
		self.inner
			.borrow_mut()
			.attributes
			.insert(name.to_string(), value.to_string());
		self.record(DomOp::SetAttribute(name.to_string(), value.to_string()));
	}

	fn set_style(&self, property: &str, value: &str) {
		self.inner
			.borrow_mut()
			.styles
			.insert(property.to_string(), value.to_string());
		self.record(DomOp::SetStyle(property.to_string(), value.to_string()));
	}

	fn remove_style(&self, property: &str) {
		self.inner.borrow_mut().styles.remove(property);
		self.record(DomOp::RemoveStyle(property.to_string()));
	}

	fn set_text(&self, text: &str) {
		self.inner.borrow_mut().text = Some(text.to_string());
		self.record(DomOp::SetText(text.to_string()));
	}

	fn force_layout(&self) {
		self.record(DomOp::ForceLayout);
	}
}

impl FormNode for FakeNode {
	fn reset(&self) {
		for (default, value) in self.inner.borrow_mut().fields.values_mut() {
			value.clone_from(default);
		}
		self.record(DomOp::Reset);
	}

	fn find_status(&self, class: &str) -> Option<Self> {
		self.inner
			.borrow()
			.children
			.iter()
			.find(|child| child.has_class(class))
			.cloned()
	}

	fn append_status(&self, class: &str) -> BehaviorResult<Self> {
		let status = FakeNode::new("p").with_class(class);
		self.inner.borrow_mut().children.push(status.clone());
		self.record(DomOp::AppendChild);
		Ok(status)
	}
}

/// Identifies a timer registered with [`ManualClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(usize);

struct ManualTimer {
	id: TimerId,
	period: Duration,
	next_due: Duration,
	callback: Box<dyn FnMut()>,
}

/// Simulated repeating timers advanced by hand.
#[derive(Default)]
pub struct ManualClock {
	now: Duration,
	next_id: usize,
	timers: Vec<ManualTimer>,
}

impl std::fmt::Debug for ManualClock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ManualClock")
			.field("now", &self.now)
			.field("timers", &self.timers.len())
			.finish()
	}
}

impl ManualClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `callback` to fire every `period` (at least 1ms).
	pub fn every<F>(&mut self, period: Duration, callback: F) -> TimerId
	where
		F: FnMut() + 'static,
	{
		let period = period.max(Duration::from_millis(1));
		let id = TimerId(self.next_id);
		self.next_id += 1;
		self.timers.push(ManualTimer {
			id,
			period,
			next_due: self.now + period,
			callback: Box::new(callback),
		});
		id
	}

	/// Removes a timer. Returns false if it was not registered.
	pub fn cancel(&mut self, id: TimerId) -> bool {
		let before = self.timers.len();
		self.timers.retain(|timer| timer.id != id);
		self.timers.len() != before
	}

	/// Moves time forward, firing every timer that comes due in order.
	/// Returns the number of callbacks fired.
	pub fn advance(&mut self, by: Duration) -> usize {
		let target = self.now + by;
		let mut fired = 0;

		while let Some(timer) = self
			.timers
			.iter_mut()
			.filter(|timer| timer.next_due <= target)
			.min_by_key(|timer| timer.next_due)
		{
			self.now = timer.next_due;
			timer.next_due += timer.period;
			(timer.callback)();
			fired += 1;
		}

		self.now = target;
		fired
	}

	pub fn now(&self) -> Duration {
		self.now
	}
}

/// Simulated animation-frame queue.
#[derive(Default)]
pub struct ManualFrames {
	queue: RefCell<Vec<Box<dyn FnOnce()>>>,
	requested: Cell<usize>,
}

impl std::fmt::Debug for ManualFrames {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ManualFrames")
			.field("pending", &self.pending())
			.finish()
	}
}

impl ManualFrames {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of callbacks waiting for the next frame.
	pub fn pending(&self) -> usize {
		self.queue.borrow().len()
	}

	/// Total number of frames requested so far.
	pub fn requested(&self) -> usize {
		self.requested.get()
	}

	/// Runs every queued callback, as the browser does before painting.
	pub fn run_frame(&self) -> usize {
		let callbacks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
		let count = callbacks.len();
		for callback in callbacks {
			callback();
		}
		count
	}
}

impl FrameScheduler for ManualFrames {
	fn request_frame(&self, callback: Box<dyn FnOnce()>) -> BehaviorResult<()> {
		self.queue.borrow_mut().push(callback);
		self.requested.set(self.requested.get() + 1);
		Ok(())
	}

	fn cancel_pending(&self) {
		self.queue.borrow_mut().pop();
	}
}
