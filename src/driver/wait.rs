//! Bounded waiting for page conditions
//!
//! The dashboard updates asynchronously after a click. Conditions are polled
//! at a fixed interval until they hold or the timeout elapses. There is no
//! retry beyond that single bounded wait.

use crate::driver::{DriverError, ElementRef, Locator, WebDriver};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Timeout and poll interval for waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

/// Why a wait ended without the condition holding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("timed out after {timeout:?} waiting for {condition}{}", .last_seen.as_ref().map(|s| format!(" (last seen: '{}')", s)).unwrap_or_default())]
    TimedOut {
        /// Description of the awaited condition
        condition: String,
        /// The timeout that elapsed
        timeout: Duration,
        /// The last observed text, if the condition was about text
        last_seen: Option<String>,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Wait until an element is displayed and enabled
///
/// Returns the element so the caller can click it without another lookup.
pub async fn wait_for_clickable<D: WebDriver>(
    driver: &mut D,
    locator: &Locator,
    policy: &WaitPolicy,
) -> Result<ElementRef, WaitError> {
    let deadline = Instant::now() + policy.timeout;

    loop {
        match clickable(driver, locator).await {
            Ok(Some(element)) => return Ok(element),
            Ok(None) => {}
            Err(error) if error.is_transient() => {
                debug!(%locator, %error, "Element not ready yet");
            }
            Err(error) => return Err(error.into()),
        }

        if !pause_until_next_poll(deadline, policy).await {
            return Err(WaitError::TimedOut {
                condition: format!("{} to be clickable", locator),
                timeout: policy.timeout,
                last_seen: None,
            });
        }
    }
}

/// Wait until an element's text equals the expected text exactly
pub async fn wait_for_text<D: WebDriver>(
    driver: &mut D,
    locator: &Locator,
    expected: &str,
    policy: &WaitPolicy,
) -> Result<(), WaitError> {
    let deadline = Instant::now() + policy.timeout;
    let mut last_seen = None;

    loop {
        match element_text(driver, locator).await {
            Ok(text) if text == expected => return Ok(()),
            Ok(text) => last_seen = Some(text),
            Err(error) if error.is_transient() => {
                debug!(%locator, %error, "Element not present yet");
            }
            Err(error) => return Err(error.into()),
        }

        if !pause_until_next_poll(deadline, policy).await {
            return Err(WaitError::TimedOut {
                condition: format!("{} to read '{}'", locator, expected),
                timeout: policy.timeout,
                last_seen,
            });
        }
    }
}

async fn clickable<D: WebDriver>(
    driver: &mut D,
    locator: &Locator,
) -> Result<Option<ElementRef>, DriverError> {
    let element = driver.find(locator).await?;
    if driver.is_displayed(&element).await? && driver.is_enabled(&element).await? {
        Ok(Some(element))
    } else {
        Ok(None)
    }
}

async fn element_text<D: WebDriver>(
    driver: &mut D,
    locator: &Locator,
) -> Result<String, DriverError> {
    let element = driver.find(locator).await?;
    driver.text(&element).await
}

/// Sleep one poll interval, capped at the deadline
///
/// Returns false once the deadline has passed.
async fn pause_until_next_poll(deadline: Instant, policy: &WaitPolicy) -> bool {
    let now = Instant::now();
    if now >= deadline {
        return false;
    }
    sleep(policy.poll_interval.min(deadline - now)).await;
    true
}
