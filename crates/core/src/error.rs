use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
	#[error("browser launch failed: {0}")]
	Launch(String),

	#[error("navigation failed: {url}")]
	Navigation {
		url: String,
		#[source]
		source: anyhow::Error,
	},

	#[error("element not found: {selector}")]
	NotFound { selector: String },

	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error("script evaluation failed: {0}")]
	Script(String),

	#[error("probe returned null: {context}")]
	UnexpectedNull { context: String },

	#[error("asset unreadable: {path}")]
	Asset {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}
