//! W3C WebDriver HTTP client
//!
//! Speaks the JSON wire format of the W3C WebDriver specification, which is
//! what geckodriver (and chromedriver, Selenium) expose. Every response has
//! the shape `{"value": ...}`; failures carry `{"value": {"error", "message"}}`.

use crate::driver::{DriverError, ElementRef, Locator, WebDriver};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// JSON key identifying a web element reference in W3C payloads
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct ErrorValue {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct WebElement {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    id: String,
}

/// Capabilities requesting a Firefox session from geckodriver
pub fn firefox_capabilities() -> Value {
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "firefox"
            }
        }
    })
}

/// WebDriver session on a remote WebDriver server
#[derive(Debug)]
pub struct RemoteWebDriver {
    client: Client,
    server_url: String,
    session_id: Option<String>,
}

impl RemoteWebDriver {
    /// Start a Firefox session on the given WebDriver server
    pub async fn connect(server_url: &str) -> Result<Self, DriverError> {
        Self::connect_with(server_url, firefox_capabilities()).await
    }

    /// Start a session with explicit capabilities
    ///
    /// # Arguments
    ///
    /// * `server_url` - Base URL of the WebDriver server, e.g. `http://localhost:4444`
    /// * `capabilities` - The `POST /session` request body
    pub async fn connect_with(server_url: &str, capabilities: Value) -> Result<Self, DriverError> {
        let mut driver = RemoteWebDriver {
            client: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
            session_id: None,
        };

        let session: NewSession = driver
            .command(Method::POST, "/session".to_string(), Some(capabilities))
            .await?;
        info!(session = %session.session_id, server = %driver.server_url, "Browser session started");
        driver.session_id = Some(session.session_id);

        Ok(driver)
    }

    /// Identifier of the active session, `None` after `quit`
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn session_path(&self, suffix: &str) -> Result<String, DriverError> {
        let id = self.session_id.as_ref().ok_or(DriverError::SessionClosed)?;
        Ok(format!("/session/{}{}", id, suffix))
    }

    fn element_path(&self, element: &ElementRef, suffix: &str) -> Result<String, DriverError> {
        self.session_path(&format!("/element/{}{}", element.as_str(), suffix))
    }

    async fn command<T: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> Result<T, DriverError> {
        let url = format!("{}{}", self.server_url, path);
        debug!(%method, %url, "WebDriver command");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let payload: Value = response.json().await?;

        if !status.is_success() {
            let error = serde_json::from_value::<Envelope<ErrorValue>>(payload)
                .map_err(|e| DriverError::UnexpectedResponse {
                    message: format!("HTTP {} without W3C error body: {}", status, e),
                })?
                .value;
            return Err(DriverError::Protocol {
                error: error.error,
                message: error.message,
            });
        }

        serde_json::from_value::<Envelope<T>>(payload)
            .map(|envelope| envelope.value)
            .map_err(|e| DriverError::UnexpectedResponse {
                message: e.to_string(),
            })
    }

    async fn locate<T: DeserializeOwned>(
        &self,
        path: String,
        locator: &Locator,
    ) -> Result<T, DriverError> {
        let (using, value) = locator.strategy();
        self.command(Method::POST, path, Some(json!({ "using": using, "value": value })))
            .await
            .map_err(|error| match error {
                DriverError::Protocol { error, .. } if error == "no such element" => {
                    DriverError::NoSuchElement {
                        locator: locator.to_string(),
                    }
                }
                other => other,
            })
    }
}

impl WebDriver for RemoteWebDriver {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        let path = self.session_path("/url")?;
        self.command::<Value>(Method::POST, path, Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    async fn find(&mut self, locator: &Locator) -> Result<ElementRef, DriverError> {
        let path = self.session_path("/element")?;
        let element: WebElement = self.locate(path, locator).await?;
        Ok(ElementRef(element.id))
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let path = self.session_path("/elements")?;
        let elements: Vec<WebElement> = self.locate(path, locator).await?;
        Ok(elements.into_iter().map(|e| ElementRef(e.id)).collect())
    }

    async fn find_all_within(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError> {
        let path = self.element_path(parent, "/elements")?;
        let elements: Vec<WebElement> = self.locate(path, locator).await?;
        Ok(elements.into_iter().map(|e| ElementRef(e.id)).collect())
    }

    async fn text(&mut self, element: &ElementRef) -> Result<String, DriverError> {
        let path = self.element_path(element, "/text")?;
        self.command(Method::GET, path, None).await
    }

    async fn clear(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        let path = self.element_path(element, "/clear")?;
        self.command::<Value>(Method::POST, path, Some(json!({})))
            .await?;
        Ok(())
    }

    async fn send_keys(&mut self, element: &ElementRef, text: &str) -> Result<(), DriverError> {
        let path = self.element_path(element, "/value")?;
        self.command::<Value>(Method::POST, path, Some(json!({ "text": text })))
            .await?;
        Ok(())
    }

    async fn click(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        let path = self.element_path(element, "/click")?;
        self.command::<Value>(Method::POST, path, Some(json!({})))
            .await?;
        Ok(())
    }

    async fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, DriverError> {
        let path = self.element_path(element, "/displayed")?;
        self.command(Method::GET, path, None).await
    }

    async fn is_enabled(&mut self, element: &ElementRef) -> Result<bool, DriverError> {
        let path = self.element_path(element, "/enabled")?;
        self.command(Method::GET, path, None).await
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        let Some(id) = self.session_id.take() else {
            return Ok(());
        };

        self.command::<Value>(Method::DELETE, format!("/session/{}", id), None)
            .await?;
        info!(session = %id, "Browser session released");
        Ok(())
    }
}
