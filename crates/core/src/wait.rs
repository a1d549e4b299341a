//! Bounded polling over page state.
//!
//! Every wait in the harness goes through [`Wait::until`]: a condition is
//! re-evaluated once per tick with a sleep in between, and expiry produces a
//! [`HarnessError::Timeout`] carrying the condition's description. The typed
//! wrappers cover the common condition kinds; anything else fits through
//! [`Wait::until`] or [`Wait::truthy`] directly.

use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::debug;

use crate::config::LoadStrategy;
use crate::error::{HarnessError, Result};
use crate::page::PageLike;
use crate::query::ElementHandle;
use crate::selector::Selector;

/// Polling configuration: how long to keep trying and how often.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
	timeout: Duration,
	poll_interval: Duration,
}

impl Default for Wait {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(30),
			poll_interval: Duration::from_millis(500),
		}
	}
}

impl Wait {
	pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
		Self { timeout, poll_interval }
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn poll_interval(&self) -> Duration {
		self.poll_interval
	}

	/// Polls `poll` until it yields a value or the timeout elapses.
	///
	/// The condition is evaluated at least once, then once per tick with a
	/// sleep for the poll interval in between, so waiting never floods the
	/// browser's command channel.
	pub async fn until<'a, T>(
		&self,
		condition: &str,
		mut poll: impl FnMut() -> BoxFuture<'a, Result<Option<T>>>,
	) -> Result<T> {
		let started = Instant::now();
		let mut attempts = 0u32;
		loop {
			attempts += 1;
			if let Some(value) = poll().await? {
				debug!(target = "check", condition, attempts, "wait satisfied");
				return Ok(value);
			}
			if started.elapsed() >= self.timeout {
				return Err(HarnessError::Timeout {
					ms: self.timeout.as_millis() as u64,
					condition: condition.to_string(),
				});
			}
			tokio::time::sleep(self.poll_interval).await;
		}
	}

	/// Element present; returns its handle.
	pub async fn present<'a>(
		&self,
		page: &'a dyn PageLike,
		selector: &Selector,
	) -> Result<ElementHandle<'a>> {
		let described = format!("element present: {selector}");
		let css = selector.to_css();
		let wanted = selector.clone();
		self.until(&described, move || {
			let css = css.clone();
			let selector = wanted.clone();
			Box::pin(async move {
				let matched = page.count(&css).await?;
				Ok((matched > 0).then(|| ElementHandle::new(page, selector, 0)))
			})
		})
		.await
	}

	/// Element present and visible.
	pub async fn visible<'a>(
		&self,
		page: &'a dyn PageLike,
		selector: &Selector,
	) -> Result<ElementHandle<'a>> {
		let described = format!("element visible: {selector}");
		let css = selector.to_css();
		let wanted = selector.clone();
		self.until(&described, move || {
			let css = css.clone();
			let selector = wanted.clone();
			Box::pin(async move {
				if page.count(&css).await? == 0 {
					return Ok(None);
				}
				// The element can vanish between the count and the check;
				// treat that as "not yet", not as a failure.
				let shown = match page.is_visible(&css, 0).await {
					Ok(shown) => shown,
					Err(HarnessError::NotFound { .. }) => return Ok(None),
					Err(e) => return Err(e),
				};
				Ok(shown.then(|| ElementHandle::new(page, selector, 0)))
			})
		})
		.await
	}

	/// Element visible and enabled, ready to receive a click.
	pub async fn clickable<'a>(
		&self,
		page: &'a dyn PageLike,
		selector: &Selector,
	) -> Result<ElementHandle<'a>> {
		let described = format!("element clickable: {selector}");
		let css = selector.to_css();
		let wanted = selector.clone();
		self.until(&described, move || {
			let css = css.clone();
			let selector = wanted.clone();
			Box::pin(async move {
				if page.count(&css).await? == 0 {
					return Ok(None);
				}
				let state = async {
					let shown = page.is_visible(&css, 0).await?;
					let enabled = page.is_enabled(&css, 0).await?;
					Ok::<_, HarnessError>(shown && enabled)
				};
				let ready = match state.await {
					Ok(ready) => ready,
					Err(HarnessError::NotFound { .. }) => return Ok(None),
					Err(e) => return Err(e),
				};
				Ok(ready.then(|| ElementHandle::new(page, selector, 0)))
			})
		})
		.await
	}

	/// At least one match; returns handles for every current match.
	pub async fn all_present<'a>(
		&self,
		page: &'a dyn PageLike,
		selector: &Selector,
	) -> Result<Vec<ElementHandle<'a>>> {
		let described = format!("elements present: {selector}");
		let css = selector.to_css();
		let wanted = selector.clone();
		self.until(&described, move || {
			let css = css.clone();
			let selector = wanted.clone();
			Box::pin(async move {
				let matched = page.count(&css).await?;
				if matched == 0 {
					return Ok(None);
				}
				let handles = (0..matched)
					.map(|index| ElementHandle::new(page, selector.clone(), index))
					.collect();
				Ok(Some(handles))
			})
		})
		.await
	}

	/// Custom predicate: an expression that must evaluate truthy.
	pub async fn truthy(&self, page: &dyn PageLike, expression: &str) -> Result<()> {
		let described = format!("script truthy: {expression}");
		let expression = expression.to_string();
		self.until(&described, move || {
			let expression = expression.clone();
			Box::pin(async move {
				let value = page.eval(&expression).await?;
				Ok(js_truthy(&value).then_some(()))
			})
		})
		.await
	}

	/// Document readiness per the load strategy.
	pub async fn ready(&self, page: &dyn PageLike, strategy: LoadStrategy) -> Result<()> {
		let expression = match strategy {
			LoadStrategy::Eager => "document.readyState !== 'loading'",
			LoadStrategy::Full => "document.readyState === 'complete'",
		};
		self.truthy(page, expression).await
	}
}

fn js_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicU32, Ordering};

	use serde_json::json;

	use super::*;

	#[test]
	fn defaults_and_builders_configure_polling() {
		let wait = Wait::default();
		assert_eq!(wait.timeout(), Duration::from_secs(30));
		assert_eq!(wait.poll_interval(), Duration::from_millis(500));

		let tuned = wait
			.with_timeout(Duration::from_secs(2))
			.with_poll_interval(Duration::from_millis(20));
		assert_eq!(tuned.timeout(), Duration::from_secs(2));
		assert_eq!(tuned.poll_interval(), Duration::from_millis(20));
	}

	#[tokio::test]
	async fn until_reevaluates_every_tick() {
		let wait = Wait::new(Duration::from_secs(5), Duration::from_millis(1));
		let calls = AtomicU32::new(0);
		let counter = &calls;
		let value = wait
			.until("counter reaches three", move || {
				Box::pin(async move {
					let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
					Ok((seen >= 3).then_some(seen))
				})
			})
			.await
			.unwrap();
		assert_eq!(value, 3);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn expiry_names_the_condition() {
		let wait = Wait::new(Duration::ZERO, Duration::from_millis(1));
		let err = wait
			.until::<()>("results list populated", move || {
				Box::pin(async move { Ok(None) })
			})
			.await
			.unwrap_err();
		match err {
			HarnessError::Timeout { ms, condition } => {
				assert_eq!(ms, 0);
				assert_eq!(condition, "results list populated");
			}
			other => panic!("expected timeout, got {other}"),
		}
	}

	#[tokio::test]
	async fn condition_is_evaluated_at_least_once() {
		let wait = Wait::new(Duration::ZERO, Duration::from_millis(1));
		let calls = AtomicU32::new(0);
		let counter = &calls;
		let _ = wait
			.until::<()>("never", move || {
				Box::pin(async move {
					counter.fetch_add(1, Ordering::SeqCst);
					Ok(None)
				})
			})
			.await;
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn truthiness_follows_javascript() {
		assert!(!js_truthy(&Value::Null));
		assert!(!js_truthy(&json!(false)));
		assert!(!js_truthy(&json!(0)));
		assert!(!js_truthy(&json!("")));
		assert!(js_truthy(&json!(true)));
		assert!(js_truthy(&json!(1)));
		assert!(js_truthy(&json!("complete")));
		assert!(js_truthy(&json!([])));
	}
}
