//! Source-level checks on the files a page is served from.
//!
//! Rendered-DOM assertions cannot see everything: markup the page author
//! wrote, media queries in a stylesheet, layout keywords. [`AssetSnapshot`]
//! reads the file once and answers substring questions about the raw text.
//!
//! An unreadable file is always an error, never an empty snapshot, so a
//! misconfigured path cannot make substring checks pass vacuously.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HarnessError, Result};

/// The full text of one static asset, captured at load time.
#[derive(Debug, Clone)]
pub struct AssetSnapshot {
	path: PathBuf,
	content: String,
}

impl AssetSnapshot {
	/// Reads the file at `path`. Missing or unreadable files fail with
	/// [`HarnessError::Asset`] carrying the path and the I/O cause.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let content = fs::read_to_string(&path).map_err(|source| HarnessError::Asset {
			path: path.clone(),
			source,
		})?;
		debug!(target = "check", path = %path.display(), bytes = content.len(), "asset loaded");
		Ok(Self { path, content })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn contains(&self, needle: &str) -> bool {
		self.content.contains(needle)
	}

	pub fn contains_any(&self, needles: &[&str]) -> bool {
		needles.iter().any(|needle| self.content.contains(needle))
	}

	/// How many of `needles` occur at least once each.
	pub fn count_containing(&self, needles: &[&str]) -> usize {
		needles.iter().filter(|needle| self.content.contains(**needle)).count()
	}
}
