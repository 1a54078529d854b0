//! Bounded waits.
//!
//! Every read that depends on asynchronous rendering goes through one of the
//! two loops here, each with an explicit [`WaitOptions`]:
//!
//! * [`poll_until`] ends in [`Error::Timeout`] when the deadline passes.
//! * [`expect_eventually`] ends in [`Error::Assertion`] carrying the last
//!   observed value.
//!
//! Errors returned by the check itself are never retried.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Default upper bound for a wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default delay between two checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout and polling cadence for a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
	pub timeout: Duration,
	pub poll_interval: Duration,
}

impl Default for WaitOptions {
	fn default() -> Self {
		Self {
			timeout: DEFAULT_TIMEOUT,
			poll_interval: DEFAULT_POLL_INTERVAL,
		}
	}
}

impl WaitOptions {
	/// Wait up to `ms` milliseconds with the default poll interval.
	pub fn from_millis(ms: u64) -> Self {
		Self::default().with_timeout(Duration::from_millis(ms))
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
		self.poll_interval = poll_interval;
		self
	}

	pub fn timeout_ms(&self) -> u64 {
		u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
	}
}

/// Sleeps until the next check; returns `false` once the deadline has passed.
async fn pause(deadline: Instant, options: &WaitOptions) -> bool {
	let remaining = deadline.saturating_duration_since(Instant::now());
	if remaining.is_zero() {
		return false;
	}
	tokio::time::sleep(options.poll_interval.min(remaining)).await;
	true
}

/// Re-runs `check` until it yields `Some`, or fails with [`Error::Timeout`].
///
/// The check always runs at least once, even with a zero timeout.
pub async fn poll_until<T, F, Fut>(condition: &str, options: WaitOptions, mut check: F) -> Result<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<Option<T>>>,
{
	let deadline = Instant::now() + options.timeout;
	let mut attempts = 0u32;

	loop {
		attempts += 1;
		if let Some(value) = check().await? {
			trace!(target: "screenplay", condition, attempts, "wait satisfied");
			return Ok(value);
		}

		if !pause(deadline, &options).await {
			debug!(target: "screenplay", condition, attempts, timeout_ms = options.timeout_ms(), "wait timed out");
			return Err(Error::Timeout {
				ms: options.timeout_ms(),
				condition: condition.to_string(),
			});
		}
	}
}

/// Re-observes a value until `matches` accepts it, or fails with
/// [`Error::Assertion`] describing `expected` and the last observation.
pub async fn expect_eventually<T, F, Fut, P>(expected: &str, options: WaitOptions, mut observe: F, matches: P) -> Result<T>
where
	T: Debug,
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T>>,
	P: Fn(&T) -> bool,
{
	let deadline = Instant::now() + options.timeout;

	loop {
		let observed = observe().await?;
		if matches(&observed) {
			return Ok(observed);
		}

		if !pause(deadline, &options).await {
			return Err(Error::Assertion(format!(
				"expected {expected}, but found {observed:?} after {}ms",
				options.timeout_ms()
			)));
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicU32, Ordering};

	use super::*;

	fn quick() -> WaitOptions {
		WaitOptions::from_millis(50).with_poll_interval(Duration::from_millis(5))
	}

	#[tokio::test]
	async fn poll_until_returns_first_some() {
		let calls = &AtomicU32::new(0);
		let value = poll_until("third call", quick(), move || async move {
			let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
			Ok((n >= 3).then_some(n))
		})
		.await
		.unwrap();

		assert_eq!(value, 3);
	}

	#[tokio::test]
	async fn poll_until_times_out_with_condition() {
		let err = poll_until::<(), _, _>("never", quick(), || async { Ok(None) }).await.unwrap_err();
		match err {
			Error::Timeout { ms, condition } => {
				assert_eq!(ms, 50);
				assert_eq!(condition, "never");
			}
			other => panic!("expected timeout, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn poll_until_does_not_retry_check_errors() {
		let calls = &AtomicU32::new(0);
		let err = poll_until::<(), _, _>("broken", quick(), move || async move {
			calls.fetch_add(1, Ordering::SeqCst);
			Err(Error::Transport("connection reset".into()))
		})
		.await
		.unwrap_err();

		assert!(err.is_transport());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn zero_timeout_still_checks_once() {
		let value = poll_until("immediate", WaitOptions::from_millis(0), || async { Ok(Some("ready")) })
			.await
			.unwrap();
		assert_eq!(value, "ready");
	}

	#[tokio::test]
	async fn expect_eventually_reports_last_observation() {
		let err = expect_eventually("title \"panda\"", quick(), || async { Ok("parrot".to_string()) }, |t: &String| t == "panda")
			.await
			.unwrap_err();

		let message = err.to_string();
		assert!(err.is_assertion());
		assert!(message.contains("title \"panda\""), "{message}");
		assert!(message.contains("\"parrot\""), "{message}");
	}
}
