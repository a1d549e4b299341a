//! Chromium executable discovery.
//!
//! Resolution order: explicit option, `PAGECHECK_CHROME`, a `which` lookup
//! over well-known binary names, then common install locations. An explicit
//! setting that points nowhere is an error rather than a silent fallback.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HarnessError, Result};

/// Environment variable overriding discovery.
pub const CHROME_ENV: &str = "PAGECHECK_CHROME";

const BINARY_NAMES: &[&str] = &[
	"chromium",
	"chromium-browser",
	"google-chrome",
	"google-chrome-stable",
	"chrome",
];

const COMMON_LOCATIONS: &[&str] = &[
	"/usr/bin/chromium",
	"/usr/bin/chromium-browser",
	"/usr/bin/google-chrome",
	"/snap/bin/chromium",
	"/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
];

/// Resolves the Chromium executable to launch.
pub fn find_chrome(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		if path.is_file() {
			return Ok(path.to_path_buf());
		}
		return Err(HarnessError::Launch(format!(
			"configured chrome executable does not exist: {}",
			path.display()
		)));
	}

	if let Ok(from_env) = std::env::var(CHROME_ENV) {
		let path = PathBuf::from(&from_env);
		if path.is_file() {
			debug!(target = "check", path = %path.display(), "chrome executable from environment");
			return Ok(path);
		}
		return Err(HarnessError::Launch(format!(
			"{CHROME_ENV} points at a missing executable: {from_env}"
		)));
	}

	for name in BINARY_NAMES {
		if let Ok(path) = which::which(name) {
			debug!(target = "check", binary = %name, path = %path.display(), "chrome executable on PATH");
			return Ok(path);
		}
	}

	for location in COMMON_LOCATIONS {
		let path = Path::new(location);
		if path.is_file() {
			return Ok(path.to_path_buf());
		}
	}

	Err(HarnessError::Launch(format!(
		"no Chromium executable found; install one of [{}] or set {CHROME_ENV}",
		BINARY_NAMES.join(", ")
	)))
}
