//! Browser automation boundary
//!
//! The dashboard has no API, so every interaction goes through a browser
//! driven over the WebDriver protocol. This module defines the capability set
//! the balancer needs as the [`WebDriver`] trait, so the workflow can run
//! against the real [`RemoteWebDriver`] or an in-memory fake.
//!
//! # Components
//!
//! - `remote` - W3C WebDriver HTTP client (geckodriver, chromedriver, Selenium)
//! - `wait` - Bounded polling for element conditions

use std::fmt;
use thiserror::Error;

pub mod remote;
pub mod wait;

pub use remote::RemoteWebDriver;
pub use wait::{wait_for_clickable, wait_for_text, WaitError, WaitPolicy};

/// How to find an element in the current page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Element with the given `id` attribute
    Id(String),
    /// CSS selector
    Css(String),
    /// Tag name
    Tag(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Locator::Tag(name.into())
    }

    /// W3C location strategy and value for this locator
    ///
    /// The protocol has no id strategy, so ids are expressed as attribute selectors.
    pub fn strategy(&self) -> (&'static str, String) {
        match self {
            Locator::Id(id) => ("css selector", format!("[id=\"{}\"]", id.replace('"', "\\\""))),
            Locator::Css(selector) => ("css selector", selector.clone()),
            Locator::Tag(name) => ("tag name", name.clone()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::Css(selector) => write!(f, "{}", selector),
            Locator::Tag(name) => write!(f, "<{}>", name),
        }
    }
}

/// Opaque handle to an element of the current page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        ElementRef(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Errors reported by a WebDriver implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The WebDriver server could not be reached or answered garbage
    #[error("HTTP request to the WebDriver server failed: {message}")]
    Http {
        /// Description of the transport error
        message: String,
    },

    /// The WebDriver server rejected a command
    #[error("WebDriver error '{error}': {message}")]
    Protocol {
        /// W3C error code, e.g. `element not interactable`
        error: String,
        /// Human readable message from the server
        message: String,
    },

    /// No element matched the locator
    #[error("No element matches {locator}")]
    NoSuchElement {
        /// The locator that was searched for
        locator: String,
    },

    /// The server answered with a payload of the wrong shape
    #[error("Unexpected WebDriver response: {message}")]
    UnexpectedResponse {
        /// What was wrong with the payload
        message: String,
    },

    /// A command was issued after the session was released
    #[error("The browser session is already closed")]
    SessionClosed,
}

impl DriverError {
    /// Whether the condition can resolve itself while the page keeps loading
    ///
    /// Waits keep polling on these instead of failing.
    pub fn is_transient(&self) -> bool {
        match self {
            DriverError::NoSuchElement { .. } => true,
            DriverError::Protocol { error, .. } => matches!(
                error.as_str(),
                "no such element" | "stale element reference" | "element not interactable"
            ),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DriverError {
    fn from(error: reqwest::Error) -> Self {
        DriverError::Http {
            message: error.to_string(),
        }
    }
}

/// Capabilities of a browser automation session
///
/// Every call blocks until the browser has carried out the command. Timeouts
/// for individual commands are owned by the implementation; bounded waiting
/// for page conditions is done with the helpers in [`wait`].
#[allow(async_fn_in_trait)]
pub trait WebDriver {
    /// Navigate the browser to a URL
    async fn goto(&mut self, url: &str) -> Result<(), DriverError>;

    /// Find the first element matching a locator
    async fn find(&mut self, locator: &Locator) -> Result<ElementRef, DriverError>;

    /// Find all elements matching a locator, possibly none
    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError>;

    /// Find all descendants of an element matching a locator, possibly none
    async fn find_all_within(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError>;

    /// Rendered text of an element
    async fn text(&mut self, element: &ElementRef) -> Result<String, DriverError>;

    /// Clear the value of an input element
    async fn clear(&mut self, element: &ElementRef) -> Result<(), DriverError>;

    /// Type text into an input element
    async fn send_keys(&mut self, element: &ElementRef, text: &str) -> Result<(), DriverError>;

    async fn click(&mut self, element: &ElementRef) -> Result<(), DriverError>;

    async fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, DriverError>;

    async fn is_enabled(&mut self, element: &ElementRef) -> Result<bool, DriverError>;

    /// End the browser session
    ///
    /// Must be safe to call more than once.
    async fn quit(&mut self) -> Result<(), DriverError>;
}

/// Lend a driver to a consumer that takes ownership, such as [`crate::app::run`]
impl<T: WebDriver> WebDriver for &mut T {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        (**self).goto(url).await
    }

    async fn find(&mut self, locator: &Locator) -> Result<ElementRef, DriverError> {
        (**self).find(locator).await
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        (**self).find_all(locator).await
    }

    async fn find_all_within(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError> {
        (**self).find_all_within(parent, locator).await
    }

    async fn text(&mut self, element: &ElementRef) -> Result<String, DriverError> {
        (**self).text(element).await
    }

    async fn clear(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        (**self).clear(element).await
    }

    async fn send_keys(&mut self, element: &ElementRef, text: &str) -> Result<(), DriverError> {
        (**self).send_keys(element, text).await
    }

    async fn click(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        (**self).click(element).await
    }

    async fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, DriverError> {
        (**self).is_displayed(element).await
    }

    async fn is_enabled(&mut self, element: &ElementRef) -> Result<bool, DriverError> {
        (**self).is_enabled(element).await
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        (**self).quit().await
    }
}
