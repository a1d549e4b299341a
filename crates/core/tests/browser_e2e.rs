//! End-to-end checks against a real Chromium over CDP.
//!
//! Ignored by default: they need a Chromium binary on the host (or
//! `PAGECHECK_CHROME` pointing at one). Run with `cargo test -- --ignored`.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::json;

use pagecheck::testing::init_logging;
use pagecheck::{PageLike, Selector, Session, SessionOptions, Target, find, probe};

const FIXTURE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Harness Fixture</title></head>
<body>
<input id="query" type="text">
<select id="kind">
	<option value="title">Title</option>
	<option value="author">Author</option>
</select>
<button id="go">Go</button>
<ul id="results" hidden></ul>
<script>
document.getElementById('go').addEventListener('click', function () {
	setTimeout(function () {
		var list = document.getElementById('results');
		list.removeAttribute('hidden');
		var item = document.createElement('li');
		item.textContent = document.getElementById('query').value
			+ ':' + document.getElementById('kind').value;
		list.appendChild(item);
	}, 150);
});
function describe(name) {
	return Promise.resolve({ name: name, ok: true });
}
</script>
</body>
</html>
"#;

fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
	let path = dir.path().join("fixture.html");
	fs::write(&path, FIXTURE).unwrap();
	path
}

fn options() -> SessionOptions {
	SessionOptions::default()
		.with_timeout(Duration::from_secs(10))
		.with_poll_interval(Duration::from_millis(100))
}

#[tokio::test]
#[ignore = "requires a Chromium binary"]
async fn session_drives_a_live_page() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let fixture = write_fixture(&dir);
	let session = Session::start(&Target::file(&fixture), options()).await.unwrap();
	let page = session.page();
	let wait = session.wait();
	assert_eq!(wait.timeout(), session.options().timeout);

	let url = page.current_url().await.unwrap();
	assert_eq!(url, session.url());
	assert!(url.ends_with("fixture.html"), "unexpected url {url}");

	let input = wait.clickable(page, &Selector::id("query")).await.unwrap();
	input.type_text("poe").await.unwrap();
	let kind = wait.present(page, &Selector::id("kind")).await.unwrap();
	kind.select_value("author").await.unwrap();
	let go = wait.clickable(page, &Selector::id("go")).await.unwrap();
	go.click().await.unwrap();

	let entry = wait
		.visible(page, &Selector::css("#results > li"))
		.await
		.unwrap();
	assert_eq!(entry.text().await.unwrap(), "poe:author");

	session.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary"]
async fn probes_settle_promises_before_returning() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let fixture = write_fixture(&dir);
	let session = Session::start(&Target::file(&fixture), options()).await.unwrap();

	let value = probe::evaluate(session.page(), "return describe(arguments[0]);", &[json!("road")])
		.await
		.unwrap()
		.require("describe result")
		.unwrap();
	assert_eq!(value["name"], json!("road"));
	assert_eq!(value["ok"], json!(true));

	let missing = probe::evaluate(session.page(), "return window.noSuchGlobal;", &[])
		.await
		.unwrap();
	assert!(missing.is_null());

	session.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary"]
async fn queries_reflect_the_live_dom() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let fixture = write_fixture(&dir);
	let session = Session::start(&Target::file(&fixture), options()).await.unwrap();
	let page = session.page();

	let select = find(page, &Selector::id("kind")).await.unwrap();
	assert!(select.is_enabled().await.unwrap());
	assert!(find(page, &Selector::id("never-rendered")).await.is_err());

	// The results list exists from the start but is hidden until a search runs.
	let results = find(page, &Selector::id("results")).await.unwrap();
	assert!(!results.is_visible().await.unwrap());

	session.stop().await.unwrap();
}
