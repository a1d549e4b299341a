use std::fmt;

/// Locating strategy for DOM elements.
///
/// Every strategy lowers to a CSS selector string before it reaches the page,
/// so error messages and mock configuration always speak CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// Element id, matched as `#id`.
	Id(String),
	/// Raw CSS selector, used as-is.
	Css(String),
	/// Tag name, e.g. `li` or `option`.
	Tag(String),
	/// Single class name, matched as `.name`.
	Class(String),
}

impl Selector {
	pub fn id(value: impl Into<String>) -> Self {
		Self::Id(value.into())
	}

	pub fn css(value: impl Into<String>) -> Self {
		Self::Css(value.into())
	}

	pub fn tag(value: impl Into<String>) -> Self {
		Self::Tag(value.into())
	}

	pub fn class(value: impl Into<String>) -> Self {
		Self::Class(value.into())
	}

	/// The CSS form sent to the page.
	pub fn to_css(&self) -> String {
		match self {
			Self::Id(id) => format!("#{id}"),
			Self::Css(css) => css.clone(),
			Self::Tag(tag) => tag.clone(),
			Self::Class(class) => format!(".{class}"),
		}
	}

	/// Scopes `child` under this selector as a descendant.
	pub fn descendant(&self, child: &Selector) -> Selector {
		Selector::Css(format!("{} {}", self.to_css(), child.to_css()))
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}
