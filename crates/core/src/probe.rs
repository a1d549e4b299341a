//! Scripted probes: run a JavaScript function body against the page and get
//! its return value back as JSON.
//!
//! A probe body is written like a function body and reaches its arguments
//! through `arguments[0]`, `arguments[1]`, and so on. Returned promises are
//! settled before the value crosses back, so async page APIs probe the same
//! as sync ones.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HarnessError, Result};
use crate::page::PageLike;

/// Wraps a function body and its arguments into a self-invoking expression.
///
/// Arguments are JSON-encoded, which is valid JavaScript literal syntax, so
/// the body sees them as plain values.
pub fn script(body: &str, args: &[Value]) -> String {
	let encoded = Value::Array(args.to_vec()).to_string();
	format!("(function() {{ {body} }}).apply(null, {encoded})")
}

/// Runs `body` with `args` on the page and captures the result.
pub async fn evaluate(page: &dyn PageLike, body: &str, args: &[Value]) -> Result<ProbeResult> {
	let value = page.eval(&script(body, args)).await?;
	Ok(ProbeResult(value))
}

/// The JSON value a probe produced. `null` and `undefined` both come back
/// as [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult(Value);

impl ProbeResult {
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	pub fn is_null(&self) -> bool {
		self.0.is_null()
	}

	pub fn value(&self) -> &Value {
		&self.0
	}

	pub fn into_value(self) -> Value {
		self.0
	}

	/// Rejects null results. `context` names what the probe was for, so the
	/// error reads as "probe returned null: search results".
	pub fn require(self, context: &str) -> Result<Value> {
		if self.0.is_null() {
			return Err(HarnessError::UnexpectedNull { context: context.to_string() });
		}
		Ok(self.0)
	}

	/// Deserializes a non-null result into `T`.
	pub fn decode<T: DeserializeOwned>(self, context: &str) -> Result<T> {
		let value = self.require(context)?;
		Ok(serde_json::from_value(value)?)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::testing::MockPage;

	#[test]
	fn script_wraps_body_and_arguments() {
		let wrapped = script("return arguments[0] + arguments[1];", &[json!(2), json!(3)]);
		assert_eq!(
			wrapped,
			"(function() { return arguments[0] + arguments[1]; }).apply(null, [2,3])"
		);
	}

	#[test]
	fn script_encodes_string_arguments_as_literals() {
		let wrapped = script("return arguments[0];", &[json!("o'brien \"quoted\"")]);
		assert!(wrapped.contains(r#"["o'brien \"quoted\""]"#));
	}

	#[test]
	fn require_rejects_null() {
		let err = ProbeResult::new(Value::Null).require("search results").unwrap_err();
		match err {
			HarnessError::UnexpectedNull { context } => {
				assert_eq!(context, "search results");
			}
			other => panic!("expected null rejection, got {other}"),
		}
	}

	#[test]
	fn decode_produces_typed_values() {
		let titles: Vec<String> = ProbeResult::new(json!(["The Road", "Child of God"]))
			.decode("titles")
			.unwrap();
		assert_eq!(titles, ["The Road", "Child of God"]);
	}

	#[test]
	fn decode_surfaces_shape_mismatches() {
		let err = ProbeResult::new(json!("not a list"))
			.decode::<Vec<String>>("titles")
			.unwrap_err();
		assert!(matches!(err, HarnessError::Json(_)));
	}

	#[tokio::test]
	async fn evaluate_sends_the_wrapped_expression() {
		let page = MockPage::new();
		let expression = script("return arguments[0].length;", &[json!("abc")]);
		page.set_eval_result(&expression, json!(3));
		let result = evaluate(&page, "return arguments[0].length;", &[json!("abc")])
			.await
			.unwrap();
		assert_eq!(result.value(), &json!(3));
		assert_eq!(result.into_value(), json!(3));
	}
}
