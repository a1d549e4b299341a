//! Selector-addressed element handles.

use std::fmt;

use crate::error::{HarnessError, Result};
use crate::page::PageLike;
use crate::selector::Selector;

/// Reference to one match of a selector.
///
/// Holds no DOM state: every operation re-resolves the selector against the
/// live page and indexes into the current match list. Valid only while the
/// owning session is alive.
pub struct ElementHandle<'a> {
	page: &'a dyn PageLike,
	selector: Selector,
	index: usize,
}

impl<'a> ElementHandle<'a> {
	pub(crate) fn new(page: &'a dyn PageLike, selector: Selector, index: usize) -> Self {
		Self { page, selector, index }
	}

	pub fn selector(&self) -> &Selector {
		&self.selector
	}

	/// Position among the selector's matches at lookup time.
	pub fn index(&self) -> usize {
		self.index
	}

	pub async fn text(&self) -> Result<String> {
		self.page.text(&self.selector.to_css(), self.index).await
	}

	pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
		self.page
			.attribute(&self.selector.to_css(), self.index, name)
			.await
	}

	pub async fn is_visible(&self) -> Result<bool> {
		self.page.is_visible(&self.selector.to_css(), self.index).await
	}

	pub async fn is_enabled(&self) -> Result<bool> {
		self.page.is_enabled(&self.selector.to_css(), self.index).await
	}

	pub async fn click(&self) -> Result<()> {
		self.page.click(&self.selector.to_css(), self.index).await
	}

	pub async fn type_text(&self, text: &str) -> Result<()> {
		self.page
			.type_text(&self.selector.to_css(), self.index, text)
			.await
	}

	pub async fn select_value(&self, value: &str) -> Result<()> {
		self.page
			.select_value(&self.selector.to_css(), self.index, value)
			.await
	}
}

impl fmt::Debug for ElementHandle<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementHandle")
			.field("selector", &self.selector)
			.field("index", &self.index)
			.finish()
	}
}

/// First match of `selector`.
///
/// Fails with [`HarnessError::NotFound`] carrying the selector when nothing
/// matches, so the failure surfaces in the assertion message.
pub async fn find<'a>(page: &'a dyn PageLike, selector: &Selector) -> Result<ElementHandle<'a>> {
	let css = selector.to_css();
	if page.count(&css).await? == 0 {
		return Err(HarnessError::NotFound { selector: css });
	}
	Ok(ElementHandle::new(page, selector.clone(), 0))
}

/// One handle per current match of `selector`; empty when nothing matches.
pub async fn find_all<'a>(
	page: &'a dyn PageLike,
	selector: &Selector,
) -> Result<Vec<ElementHandle<'a>>> {
	let matched = page.count(&selector.to_css()).await?;
	Ok((0..matched)
		.map(|index| ElementHandle::new(page, selector.clone(), index))
		.collect())
}
