use std::path::PathBuf;
use std::time::Duration;

/// Document readiness threshold applied after navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStrategy {
	/// DOM parsed; subresources may still be loading.
	#[default]
	Eager,
	/// Everything loaded, `document.readyState` is `complete`.
	Full,
}

/// Configuration for launching a browser session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
	pub headless: bool,
	pub load_strategy: LoadStrategy,
	/// Explicit Chromium executable; discovery runs when unset.
	pub chrome: Option<PathBuf>,
	/// Window size as (width, height).
	pub window: (u32, u32),
	/// Default timeout for waits created via [`crate::Session::wait`].
	pub timeout: Duration,
	/// Poll interval for waits created via [`crate::Session::wait`].
	pub poll_interval: Duration,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			headless: true,
			load_strategy: LoadStrategy::default(),
			chrome: None,
			window: (1280, 720),
			timeout: Duration::from_secs(30),
			poll_interval: Duration::from_millis(500),
		}
	}
}

impl SessionOptions {
	pub fn with_headless(mut self, headless: bool) -> Self {
		self.headless = headless;
		self
	}

	pub fn with_load_strategy(mut self, strategy: LoadStrategy) -> Self {
		self.load_strategy = strategy;
		self
	}

	pub fn with_chrome(mut self, path: impl Into<PathBuf>) -> Self {
		self.chrome = Some(path.into());
		self
	}

	pub fn with_window(mut self, width: u32, height: u32) -> Self {
		self.window = (width, height);
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_headless_and_eager() {
		let options = SessionOptions::default();
		assert!(options.headless);
		assert_eq!(options.load_strategy, LoadStrategy::Eager);
		assert!(options.chrome.is_none());
		assert_eq!(options.timeout, Duration::from_secs(30));
	}

	#[test]
	fn builders_override_fields() {
		let options = SessionOptions::default()
			.with_headless(false)
			.with_load_strategy(LoadStrategy::Full)
			.with_window(800, 600)
			.with_timeout(Duration::from_secs(5))
			.with_poll_interval(Duration::from_millis(50));
		assert!(!options.headless);
		assert_eq!(options.load_strategy, LoadStrategy::Full);
		assert_eq!(options.window, (800, 600));
		assert_eq!(options.timeout, Duration::from_secs(5));
		assert_eq!(options.poll_interval, Duration::from_millis(50));
	}
}
