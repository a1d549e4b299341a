//! Browser session lifecycle.
//!
//! A [`Session`] owns one Chromium process, the CDP event loop draining its
//! messages, and a single page navigated to the target. [`Session::stop`]
//! closes the browser cleanly; a session dropped without it falls back to
//! killing the child process, so teardown still happens when a test panics
//! mid-assertion.

use std::path::PathBuf;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::chrome::find_chrome;
use crate::config::SessionOptions;
use crate::error::{HarnessError, Result};
use crate::page::{Page, PageLike};
use crate::wait::Wait;

/// What the session should load: a file served over `file://` or a URL as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
	File(PathBuf),
	Url(String),
}

impl Target {
	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self::File(path.into())
	}

	pub fn url(url: impl Into<String>) -> Self {
		Self::Url(url.into())
	}

	/// Resolves to a navigable URL. A file target must exist on disk here;
	/// catching a bad path before launch beats diagnosing a blank tab after.
	pub fn to_url(&self) -> Result<String> {
		match self {
			Self::File(path) => {
				let absolute = path.canonicalize().map_err(|source| HarnessError::Asset {
					path: path.clone(),
					source,
				})?;
				Ok(format!("file://{}", absolute.display()))
			}
			Self::Url(url) => Ok(url.clone()),
		}
	}
}

/// A running browser with one page open on the target.
pub struct Session {
	browser: Browser,
	handler: JoinHandle<()>,
	page: Page,
	url: String,
	options: SessionOptions,
	// Profile directory; removed when the session is dropped.
	_user_data: tempfile::TempDir,
}

impl Session {
	/// Launches Chromium, opens the target, and waits for it to load.
	pub async fn start(target: &Target, options: SessionOptions) -> Result<Self> {
		let url = target.to_url()?;
		let executable = find_chrome(options.chrome.as_deref())?;
		let user_data = tempfile::tempdir()?;
		info!(
			target = "check",
			url = %url,
			chrome = %executable.display(),
			headless = options.headless,
			"starting session"
		);

		let (width, height) = options.window;
		let mut builder = BrowserConfig::builder()
			.chrome_executable(&executable)
			.no_sandbox()
			.arg("--disable-gpu")
			.arg("--disable-dev-shm-usage")
			.arg("--no-first-run")
			.arg("--no-default-browser-check")
			.user_data_dir(user_data.path())
			.window_size(width, height);
		builder = if options.headless {
			builder.arg("--headless=new")
		} else {
			builder.with_head()
		};
		let config = builder
			.build()
			.map_err(|e| HarnessError::Launch(e.to_string()))?;

		let (mut browser, mut events) = Browser::launch(config)
			.await
			.map_err(|e| HarnessError::Launch(e.to_string()))?;
		let handler = tokio::spawn(async move {
			while let Some(event) = events.next().await {
				if event.is_err() {
					break;
				}
			}
		});

		let page = match browser.new_page("about:blank").await {
			Ok(page) => page,
			Err(e) => {
				let _ = browser.close().await;
				handler.abort();
				return Err(HarnessError::Launch(format!("page open failed: {e}")));
			}
		};

		let session = Self {
			browser,
			handler,
			page: Page::new(page),
			url,
			options,
			_user_data: user_data,
		};
		if let Err(e) = session.open().await {
			let _ = session.stop().await;
			return Err(e);
		}
		Ok(session)
	}

	async fn open(&self) -> Result<()> {
		self.page.navigate(&self.url).await?;
		self.wait().ready(&self.page, self.options.load_strategy).await
	}

	/// Navigates the page back to the target and waits for readiness again.
	/// Resets page state between independent checks.
	pub async fn reload(&self) -> Result<()> {
		self.open().await
	}

	pub fn page(&self) -> &Page {
		&self.page
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn options(&self) -> &SessionOptions {
		&self.options
	}

	/// A [`Wait`] configured with the session's timeout and poll interval.
	pub fn wait(&self) -> Wait {
		Wait::new(self.options.timeout, self.options.poll_interval)
	}

	/// Closes the browser and stops the event loop.
	pub async fn stop(mut self) -> Result<()> {
		debug!(target = "check", url = %self.url, "stopping session");
		let closed = self.browser.close().await;
		let _ = self.browser.wait().await;
		self.handler.abort();
		closed.map_err(|e| HarnessError::Launch(format!("browser close failed: {e}")))?;
		Ok(())
	}
}
