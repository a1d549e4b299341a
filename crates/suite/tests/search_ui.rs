//! Form structure, result rendering, and the detail panel, observed through
//! the DOM the way a reader of the page would.
//!
//! Ignored by default: they need a Chromium binary (or `PAGECHECK_CHROME`)
//! and `BOOKSEARCH_SITE_DIR` pointing at the page.

use std::collections::BTreeSet;

use booksearch_suite::{
	SearchType, classes, entry_part, first_entry, known_query, open_page, option_values,
	search_form, search_input, search_type, selected_book, selected_book_cover, submit_button,
	submit_search,
};
use pagecheck::testing::init_logging;
use pagecheck::find;

#[tokio::test]
#[ignore = "requires a Chromium binary and BOOKSEARCH_SITE_DIR"]
async fn search_form_offers_exactly_the_three_modes() {
	init_logging();
	let session = open_page().await.unwrap();
	let page = session.page();

	find(page, &search_form()).await.unwrap();
	find(page, &search_input()).await.unwrap();
	find(page, &search_type()).await.unwrap();
	find(page, &submit_button()).await.unwrap();

	let values = option_values(page).await.unwrap();
	assert_eq!(values.len(), 3, "unexpected option set {values:?}");
	let normalized: BTreeSet<String> = values.iter().map(|v| v.to_lowercase()).collect();
	let expected: BTreeSet<String> =
		["author", "isbn", "title"].into_iter().map(String::from).collect();
	assert_eq!(normalized, expected);

	session.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary and BOOKSEARCH_SITE_DIR"]
async fn submitting_a_search_renders_complete_entries() {
	init_logging();
	let session = open_page().await.unwrap();
	let page = session.page();
	let wait = session.wait();

	let entries = submit_search(page, &wait, "test", SearchType::Title).await.unwrap();
	assert!(!entries.is_empty(), "no result entries rendered");

	for index in 0..entries.len() {
		for class in [classes::TITLE, classes::RATING, classes::EBOOK] {
			let part = find(page, &entry_part(index, class)).await.unwrap();
			let text = part.text().await.unwrap();
			assert!(
				!text.trim().is_empty(),
				"entry {index} has an empty {class}"
			);
		}
		// Presence only: whether the cover image renders varies with what
		// the book API returns for each record.
		find(page, &entry_part(index, classes::COVER)).await.unwrap();
	}

	session.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary and BOOKSEARCH_SITE_DIR"]
async fn rerunning_searches_keeps_the_list_populated() {
	init_logging();
	let session = open_page().await.unwrap();
	let page = session.page();
	let wait = session.wait();

	let first_run = submit_search(page, &wait, known_query(SearchType::Author), SearchType::Author)
		.await
		.unwrap();
	assert!(!first_run.is_empty(), "first search rendered no entries");

	// Same document, a new query through the same form.
	let second_run = submit_search(page, &wait, known_query(SearchType::Title), SearchType::Title)
		.await
		.unwrap();
	assert!(!second_run.is_empty(), "re-run rendered no entries");

	// Fresh document state, then the form once more.
	session.reload().await.unwrap();
	let after_reload = submit_search(page, &wait, "test", SearchType::Title).await.unwrap();
	assert!(!after_reload.is_empty(), "post-reload search rendered no entries");

	session.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary and BOOKSEARCH_SITE_DIR"]
async fn selecting_the_first_result_opens_the_detail_panel() {
	init_logging();
	let session = open_page().await.unwrap();
	let page = session.page();
	let wait = session.wait();

	let entries = submit_search(page, &wait, "test", SearchType::Title).await.unwrap();
	assert!(!entries.is_empty(), "no result entries rendered");

	let first = wait.clickable(page, &first_entry()).await.unwrap();
	first.click().await.unwrap();

	let panel = wait.visible(page, &selected_book()).await.unwrap();
	assert!(panel.is_visible().await.unwrap());
	wait.present(page, &selected_book_cover()).await.unwrap();

	session.stop().await.unwrap();
}
