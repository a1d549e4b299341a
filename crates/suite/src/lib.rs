//! Page model and shared flows for the book-search page checks.
//!
//! The page under test is a static book-search form backed by a public book
//! API: a text input, a mode selector, a submit button, a results list, and
//! a detail panel for the selected book. This crate pins down the stable
//! ids, classes, and known-good queries, and wraps the multi-step flows the
//! integration tests repeat.
//!
//! The page's location comes from the `BOOKSEARCH_SITE_DIR` environment
//! variable; every test that needs the page or a browser is ignored unless
//! the host provides both.

use std::env;
use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use pagecheck::{
	AssetSnapshot, ElementHandle, HarnessError, LoadStrategy, PageLike, Result, Selector,
	Session, SessionOptions, Target, Wait, find_all, probe,
};

/// Environment variable naming the directory that holds the page under test.
pub const SITE_DIR_ENV: &str = "BOOKSEARCH_SITE_DIR";
/// Markup asset, relative to the site directory.
pub const MARKUP_ASSET: &str = "index.html";
/// Stylesheet asset, relative to the site directory.
pub const STYLESHEET_ASSET: &str = "styles.css";

/// Opening forms of the semantic section tags counted in the markup.
pub const SEMANTIC_TAG_MARKERS: [&str; 10] = [
	"<article",
	"<aside",
	"<details",
	"<figcaption",
	"<figure",
	"<footer",
	"<header",
	"<main",
	"<nav",
	"<section",
];

/// Any one of these makes the stylesheet count as responsive.
pub const RESPONSIVE_MARKERS: [&str; 3] = ["@media", "grid", "flex"];

/// Stable element ids the page exposes.
pub mod ids {
	pub const SEARCH_FORM: &str = "search-form";
	pub const SEARCH_INPUT: &str = "search-input";
	pub const SEARCH_TYPE: &str = "search-type";
	pub const SUBMIT_BUTTON: &str = "submit-button";
	pub const BOOK_LIST: &str = "book-list";
	pub const SELECTED_BOOK: &str = "selected-book";
}

/// Classes carried by each rendered result entry and the detail panel.
pub mod classes {
	pub const TITLE: &str = "title-element";
	pub const COVER: &str = "cover-element";
	pub const RATING: &str = "rating-element";
	pub const EBOOK: &str = "ebook-element";
}

pub fn search_form() -> Selector {
	Selector::id(ids::SEARCH_FORM)
}

pub fn search_input() -> Selector {
	Selector::id(ids::SEARCH_INPUT)
}

pub fn search_type() -> Selector {
	Selector::id(ids::SEARCH_TYPE)
}

pub fn submit_button() -> Selector {
	Selector::id(ids::SUBMIT_BUTTON)
}

pub fn book_list() -> Selector {
	Selector::id(ids::BOOK_LIST)
}

pub fn selected_book() -> Selector {
	Selector::id(ids::SELECTED_BOOK)
}

/// Every rendered result entry.
pub fn book_entries() -> Selector {
	Selector::css("#book-list > li")
}

/// The entry a detail-panel test clicks.
pub fn first_entry() -> Selector {
	Selector::css("#book-list > li:first-child")
}

/// A classed sub-element of the result entry at `index` (zero-based).
pub fn entry_part(index: usize, class: &str) -> Selector {
	Selector::css(format!("#book-list > li:nth-child({}) .{class}", index + 1))
}

/// The cover inside the selected-book detail panel.
pub fn selected_book_cover() -> Selector {
	selected_book().descendant(&Selector::class(classes::COVER))
}

/// The three search modes the form must offer, and no others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
	Title,
	Author,
	Isbn,
}

impl SearchType {
	pub const ALL: [SearchType; 3] = [SearchType::Title, SearchType::Author, SearchType::Isbn];

	/// The option value the form uses for this mode.
	pub fn value(self) -> &'static str {
		match self {
			SearchType::Title => "title",
			SearchType::Author => "author",
			SearchType::Isbn => "isbn",
		}
	}
}

impl fmt::Display for SearchType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.value())
	}
}

/// A query known to produce results for the given mode.
pub fn known_query(kind: SearchType) -> &'static str {
	match kind {
		SearchType::Title => "harry potter",
		SearchType::Author => "poe",
		SearchType::Isbn => "9781725757264",
	}
}

/// Probe body invoking the page's own search function. The promise settles
/// to a JSON string so the whole result list crosses back as one value.
pub const SEARCH_BOOKS_BODY: &str =
	"return searchBooks(arguments[0], arguments[1]).then(JSON.stringify);";

/// Calls `searchBooks(query, kind)` inside the page; returns the raw JSON text.
pub async fn search_books(page: &dyn PageLike, query: &str, kind: SearchType) -> Result<String> {
	let result = probe::evaluate(
		page,
		SEARCH_BOOKS_BODY,
		&[
			Value::String(query.to_string()),
			Value::String(kind.value().to_string()),
		],
	)
	.await?;
	result.decode(&format!("searchBooks({query:?}, {kind})"))
}

/// Parses a `searchBooks` payload into its result records.
pub fn parse_results(payload: &str) -> Result<Vec<Value>> {
	let decoded: Value = serde_json::from_str(payload)?;
	match decoded {
		Value::Array(items) => Ok(items),
		other => Err(HarnessError::Script(format!(
			"searchBooks returned {other} where a result list was expected"
		))),
	}
}

/// Types a query, picks a mode, submits, and waits for populated results.
/// Returns one handle per rendered entry.
pub async fn submit_search<'a>(
	page: &'a dyn PageLike,
	wait: &Wait,
	query: &str,
	kind: SearchType,
) -> Result<Vec<ElementHandle<'a>>> {
	let input = wait.clickable(page, &search_input()).await?;
	// Typing appends to the field's current value, so clear it for re-runs.
	let field = Value::String(search_input().to_css()).to_string();
	page.eval(&format!("document.querySelector({field}).value = ''")).await?;
	input.type_text(query).await?;
	let mode = wait.present(page, &search_type()).await?;
	mode.select_value(kind.value()).await?;
	let submit = wait.clickable(page, &submit_button()).await?;
	submit.click().await?;
	wait.visible(page, &book_list()).await?;
	wait.all_present(page, &book_entries()).await
}

/// Values of every type option the search form currently offers.
pub async fn option_values(page: &dyn PageLike) -> Result<Vec<String>> {
	let options = find_all(page, &search_form().descendant(&Selector::tag("option"))).await?;
	let mut values = Vec::with_capacity(options.len());
	for option in &options {
		values.push(option.attribute("value").await?.unwrap_or_default());
	}
	Ok(values)
}

/// Directory holding the page under test, from `BOOKSEARCH_SITE_DIR`.
pub fn site_dir() -> Result<PathBuf> {
	env::var_os(SITE_DIR_ENV).map(PathBuf::from).ok_or_else(|| {
		anyhow::anyhow!(
			"{SITE_DIR_ENV} is not set; point it at the directory holding {MARKUP_ASSET}"
		)
		.into()
	})
}

pub fn asset_path(name: &str) -> Result<PathBuf> {
	Ok(site_dir()?.join(name))
}

pub fn load_asset(name: &str) -> Result<AssetSnapshot> {
	AssetSnapshot::load(asset_path(name)?)
}

/// Starts a session on the page. Full readiness, since the page wires its
/// form handlers and search function at the end of loading.
pub async fn open_page() -> Result<Session> {
	let markup = asset_path(MARKUP_ASSET)?;
	Session::start(
		&Target::file(markup),
		SessionOptions::default().with_load_strategy(LoadStrategy::Full),
	)
	.await
}
