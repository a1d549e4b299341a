//! Page abstraction over the browser backend.
//!
//! [`PageLike`] is the surface every harness operation drives. The real
//! implementation ([`Page`]) wraps a CDP page; [`crate::testing::MockPage`]
//! implements the same surface for browser-free tests.

use async_trait::async_trait;
use chromiumoxide::page::Page as CdpPage;
use serde_json::Value;
use tracing::debug;

use crate::error::{HarnessError, Result};

/// Backend surface the harness drives.
///
/// Element-addressed methods resolve `css` freshly on every call and index
/// into the current match list, so callers always observe live page state.
/// An index past the match list fails with [`HarnessError::NotFound`] naming
/// the selector.
#[async_trait]
pub trait PageLike: Send + Sync {
	/// Navigates to `url`.
	async fn navigate(&self, url: &str) -> Result<()>;

	/// Current URL as the page reports it.
	async fn current_url(&self) -> Result<String>;

	/// Evaluates a JavaScript expression and returns the completion value.
	///
	/// A returned promise is awaited first; null and undefined completions
	/// both decode to [`Value::Null`].
	async fn eval(&self, expression: &str) -> Result<Value>;

	/// Number of nodes currently matching `css`.
	async fn count(&self, css: &str) -> Result<usize>;

	/// `innerText` of match `index`.
	async fn text(&self, css: &str, index: usize) -> Result<String>;

	/// Attribute `name` of match `index`; `None` when the attribute is absent.
	async fn attribute(&self, css: &str, index: usize, name: &str) -> Result<Option<String>>;

	/// Whether match `index` takes up layout space.
	async fn is_visible(&self, css: &str, index: usize) -> Result<bool>;

	/// Whether match `index` is not disabled.
	async fn is_enabled(&self, css: &str, index: usize) -> Result<bool>;

	/// Clicks match `index` with a trusted input event.
	async fn click(&self, css: &str, index: usize) -> Result<()>;

	/// Focuses match `index` and types `text` through key events.
	async fn type_text(&self, css: &str, index: usize, text: &str) -> Result<()>;

	/// Selects the option with `value` on a `<select>` match and fires
	/// `input` and `change` so the page reacts as it would to a user.
	async fn select_value(&self, css: &str, index: usize, value: &str) -> Result<()>;
}

/// Live page driven over CDP.
pub struct Page {
	inner: CdpPage,
}

/// Encodes `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
	Value::String(value.to_string()).to_string()
}

fn element_label(css: &str, index: usize) -> String {
	if index == 0 {
		css.to_string()
	} else {
		format!("{css} (match {index})")
	}
}

impl Page {
	pub(crate) fn new(inner: CdpPage) -> Self {
		Self { inner }
	}

	/// Resolves match `index` of `css` to a live element reference.
	///
	/// Counts via script first so "no match" is a [`HarnessError::NotFound`]
	/// rather than a backend lookup error.
	async fn nth_element(&self, css: &str, index: usize) -> Result<chromiumoxide::Element> {
		if self.count(css).await? <= index {
			return Err(HarnessError::NotFound {
				selector: element_label(css, index),
			});
		}
		let mut found = self
			.inner
			.find_elements(css)
			.await
			.map_err(|e| anyhow::anyhow!("element lookup for `{css}` failed: {e}"))?;
		if found.len() <= index {
			return Err(HarnessError::NotFound {
				selector: element_label(css, index),
			});
		}
		Ok(found.swap_remove(index))
	}

	async fn require_match(&self, css: &str, index: usize) -> Result<()> {
		if self.count(css).await? <= index {
			return Err(HarnessError::NotFound {
				selector: element_label(css, index),
			});
		}
		Ok(())
	}
}

#[async_trait]
impl PageLike for Page {
	async fn navigate(&self, url: &str) -> Result<()> {
		debug!(target = "check", url = %url, "navigate");
		self.inner
			.goto(url)
			.await
			.map(|_| ())
			.map_err(|e| HarnessError::Navigation {
				url: url.to_string(),
				source: anyhow::Error::new(e),
			})
	}

	async fn current_url(&self) -> Result<String> {
		let url = self
			.inner
			.url()
			.await
			.map_err(|e| anyhow::anyhow!("url lookup failed: {e}"))?;
		Ok(url.unwrap_or_else(|| "about:blank".to_string()))
	}

	async fn eval(&self, expression: &str) -> Result<Value> {
		let result = self
			.inner
			.evaluate(expression)
			.await
			.map_err(|e| HarnessError::Script(e.to_string()))?;
		Ok(result.into_value::<Value>().unwrap_or(Value::Null))
	}

	async fn count(&self, css: &str) -> Result<usize> {
		let expression = format!("document.querySelectorAll({}).length", js_string(css));
		let value = self.eval(&expression).await?;
		Ok(value.as_u64().unwrap_or(0) as usize)
	}

	async fn text(&self, css: &str, index: usize) -> Result<String> {
		let element = self.nth_element(css, index).await?;
		let text = element
			.inner_text()
			.await
			.map_err(|e| anyhow::anyhow!("innerText of `{css}` failed: {e}"))?;
		Ok(text.unwrap_or_default())
	}

	async fn attribute(&self, css: &str, index: usize, name: &str) -> Result<Option<String>> {
		self.require_match(css, index).await?;
		let expression = format!(
			"(() => {{ const el = document.querySelectorAll({css})[{index}]; \
			 return el ? el.getAttribute({name}) : null; }})()",
			css = js_string(css),
			name = js_string(name),
		);
		Ok(match self.eval(&expression).await? {
			Value::String(s) => Some(s),
			Value::Null => None,
			other => Some(other.to_string()),
		})
	}

	async fn is_visible(&self, css: &str, index: usize) -> Result<bool> {
		self.require_match(css, index).await?;
		let expression = format!(
			"(() => {{ const el = document.querySelectorAll({css})[{index}]; \
			 return !!(el && (el.offsetWidth || el.offsetHeight || el.getClientRects().length)); }})()",
			css = js_string(css),
		);
		Ok(self.eval(&expression).await?.as_bool().unwrap_or(false))
	}

	async fn is_enabled(&self, css: &str, index: usize) -> Result<bool> {
		self.require_match(css, index).await?;
		let expression = format!(
			"(() => {{ const el = document.querySelectorAll({css})[{index}]; \
			 return !!el && !el.disabled; }})()",
			css = js_string(css),
		);
		Ok(self.eval(&expression).await?.as_bool().unwrap_or(false))
	}

	async fn click(&self, css: &str, index: usize) -> Result<()> {
		let element = self.nth_element(css, index).await?;
		element
			.click()
			.await
			.map(|_| ())
			.map_err(|e| anyhow::anyhow!("click on `{css}` failed: {e}"))?;
		Ok(())
	}

	async fn type_text(&self, css: &str, index: usize, text: &str) -> Result<()> {
		let element = self.nth_element(css, index).await?;
		// Click to focus before typing; key events land on the focused node.
		element
			.click()
			.await
			.map(|_| ())
			.map_err(|e| anyhow::anyhow!("focus click on `{css}` failed: {e}"))?;
		element
			.type_str(text)
			.await
			.map(|_| ())
			.map_err(|e| anyhow::anyhow!("typing into `{css}` failed: {e}"))?;
		Ok(())
	}

	async fn select_value(&self, css: &str, index: usize, value: &str) -> Result<()> {
		self.require_match(css, index).await?;
		let expression = format!(
			"(() => {{ const el = document.querySelectorAll({css})[{index}]; \
			 if (!el) return false; \
			 el.value = {value}; \
			 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
			 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
			 return el.value === {value}; }})()",
			css = js_string(css),
			value = js_string(value),
		);
		let selected = self.eval(&expression).await?.as_bool().unwrap_or(false);
		if !selected {
			return Err(HarnessError::Script(format!(
				"select `{css}` has no option with value `{value}`"
			)));
		}
		Ok(())
	}
}
