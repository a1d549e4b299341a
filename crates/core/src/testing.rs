//! In-memory test doubles for harness code.
//!
//! [`MockPage`] implements [`PageLike`] over a hash map of selectors, so
//! wait strategies, queries, and probes can be exercised without a browser.
//! Every mutating call is recorded as a [`MockAction`] for assertions on
//! what the harness actually did.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::error::{HarnessError, Result};
use crate::page::PageLike;

/// One simulated DOM element.
#[derive(Debug, Clone)]
pub struct MockElement {
	pub text: String,
	pub visible: bool,
	pub enabled: bool,
	pub attributes: HashMap<String, String>,
}

impl MockElement {
	pub fn new() -> Self {
		Self {
			text: String::new(),
			visible: true,
			enabled: true,
			attributes: HashMap::new(),
		}
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	pub fn hidden(mut self) -> Self {
		self.visible = false;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}

	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}
}

impl Default for MockElement {
	fn default() -> Self {
		Self::new()
	}
}

/// A recorded interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
	Navigate { url: String },
	Click { selector: String },
	Type { selector: String, text: String },
	Select { selector: String, value: String },
	Eval { expression: String },
}

/// Scriptable [`PageLike`] backed by plain maps.
#[derive(Debug, Default)]
pub struct MockPage {
	url: Mutex<String>,
	elements: Mutex<HashMap<String, Vec<MockElement>>>,
	deferred: Mutex<HashMap<String, usize>>,
	eval_results: Mutex<HashMap<String, Value>>,
	eval_queues: Mutex<HashMap<String, VecDeque<Value>>>,
	actions: Mutex<Vec<MockAction>>,
}

impl MockPage {
	pub fn new() -> Self {
		let page = Self::default();
		*page.url.lock().unwrap() = "about:blank".to_string();
		page
	}

	/// Registers another match for `css`, appended after existing ones.
	pub fn add_element(&self, css: &str, element: MockElement) {
		self.elements
			.lock()
			.unwrap()
			.entry(css.to_string())
			.or_default()
			.push(element);
	}

	/// Like [`MockPage::add_element`], but `count` reports zero matches for
	/// the first `polls` calls. Simulates content that renders late.
	pub fn add_element_after(&self, css: &str, polls: usize, element: MockElement) {
		self.add_element(css, element);
		self.deferred.lock().unwrap().insert(css.to_string(), polls);
	}

	pub fn set_text(&self, css: &str, index: usize, text: impl Into<String>) {
		let mut elements = self.elements.lock().unwrap();
		if let Some(element) = elements.get_mut(css).and_then(|list| list.get_mut(index)) {
			element.text = text.into();
		}
	}

	/// Fixed result for an exact expression string.
	pub fn set_eval_result(&self, expression: &str, value: Value) {
		self.eval_results
			.lock()
			.unwrap()
			.insert(expression.to_string(), value);
	}

	/// Results consumed one per call; after the queue drains, the fixed
	/// result (or null) applies. Simulates state that changes between polls.
	pub fn queue_eval_results(&self, expression: &str, values: impl IntoIterator<Item = Value>) {
		self.eval_queues
			.lock()
			.unwrap()
			.entry(expression.to_string())
			.or_default()
			.extend(values);
	}

	pub fn actions(&self) -> Vec<MockAction> {
		self.actions.lock().unwrap().clone()
	}

	pub fn clear_actions(&self) {
		self.actions.lock().unwrap().clear();
	}

	fn record(&self, action: MockAction) {
		self.actions.lock().unwrap().push(action);
	}

	fn element(&self, css: &str, index: usize) -> Result<MockElement> {
		self.elements
			.lock()
			.unwrap()
			.get(css)
			.and_then(|list| list.get(index))
			.cloned()
			.ok_or_else(|| HarnessError::NotFound {
				selector: label(css, index),
			})
	}
}

fn label(css: &str, index: usize) -> String {
	if index == 0 {
		css.to_string()
	} else {
		format!("{css} (match {index})")
	}
}

#[async_trait]
impl PageLike for MockPage {
	async fn navigate(&self, url: &str) -> Result<()> {
		self.record(MockAction::Navigate { url: url.to_string() });
		*self.url.lock().unwrap() = url.to_string();
		Ok(())
	}

	async fn current_url(&self) -> Result<String> {
		Ok(self.url.lock().unwrap().clone())
	}

	async fn eval(&self, expression: &str) -> Result<Value> {
		self.record(MockAction::Eval { expression: expression.to_string() });
		if let Some(queue) = self.eval_queues.lock().unwrap().get_mut(expression) {
			if let Some(value) = queue.pop_front() {
				return Ok(value);
			}
		}
		Ok(self
			.eval_results
			.lock()
			.unwrap()
			.get(expression)
			.cloned()
			.unwrap_or(Value::Null))
	}

	async fn count(&self, css: &str) -> Result<usize> {
		let mut deferred = self.deferred.lock().unwrap();
		if let Some(remaining) = deferred.get_mut(css) {
			if *remaining > 0 {
				*remaining -= 1;
				return Ok(0);
			}
		}
		drop(deferred);
		Ok(self
			.elements
			.lock()
			.unwrap()
			.get(css)
			.map_or(0, Vec::len))
	}

	async fn text(&self, css: &str, index: usize) -> Result<String> {
		Ok(self.element(css, index)?.text)
	}

	async fn attribute(&self, css: &str, index: usize, name: &str) -> Result<Option<String>> {
		Ok(self.element(css, index)?.attributes.get(name).cloned())
	}

	async fn is_visible(&self, css: &str, index: usize) -> Result<bool> {
		Ok(self.element(css, index)?.visible)
	}

	async fn is_enabled(&self, css: &str, index: usize) -> Result<bool> {
		Ok(self.element(css, index)?.enabled)
	}

	async fn click(&self, css: &str, index: usize) -> Result<()> {
		self.element(css, index)?;
		self.record(MockAction::Click { selector: label(css, index) });
		Ok(())
	}

	async fn type_text(&self, css: &str, index: usize, text: &str) -> Result<()> {
		{
			let mut elements = self.elements.lock().unwrap();
			let element = elements
				.get_mut(css)
				.and_then(|list| list.get_mut(index))
				.ok_or_else(|| HarnessError::NotFound {
					selector: label(css, index),
				})?;
			element.text.push_str(text);
		}
		self.record(MockAction::Type {
			selector: label(css, index),
			text: text.to_string(),
		});
		Ok(())
	}

	async fn select_value(&self, css: &str, index: usize, value: &str) -> Result<()> {
		{
			let mut elements = self.elements.lock().unwrap();
			let element = elements
				.get_mut(css)
				.and_then(|list| list.get_mut(index))
				.ok_or_else(|| HarnessError::NotFound {
					selector: label(css, index),
				})?;
			element
				.attributes
				.insert("value".to_string(), value.to_string());
		}
		self.record(MockAction::Select {
			selector: label(css, index),
			value: value.to_string(),
		});
		Ok(())
	}
}

/// Installs a stderr subscriber honoring `RUST_LOG`, defaulting to `info`.
/// Safe to call from every test; repeat installs are ignored.
pub fn init_logging() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.compact()
		.try_init();
}
