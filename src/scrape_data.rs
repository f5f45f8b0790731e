/// Data structures exchanged with the browser and the job tracker service
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tab as reported by `chrome.tabs.query`. Only `id` and `url` are read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabDescriptor {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabDescriptor {
    pub fn new(id: i32, url: &str) -> TabDescriptor {
        TabDescriptor {
            id: Some(id),
            url: Some(url.to_string()),
        }
    }
}

/// Per-frame result of `chrome.scripting.executeScript`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InjectionResult {
    #[serde(default)]
    pub result: Option<Value>,
}

/// Body of `POST /scrape-job`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeRequest {
    pub url: String,
    pub page_content: String,
}

/// Parsed reply from `POST /scrape-job`.
///
/// Any JSON value is accepted; fields are read leniently and a missing or
/// mistyped field reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeResponse {
    pub body: Value,
}

impl ScrapeResponse {
    pub fn new(body: Value) -> ScrapeResponse {
        ScrapeResponse { body }
    }

    pub fn detail(&self) -> Option<&Value> {
        self.body.get("detail")
    }

    /// `data.role`, when it is a string
    pub fn role(&self) -> Option<&str> {
        self.body
            .get("data")
            .and_then(|data| data.get("role"))
            .and_then(Value::as_str)
    }

    /// Top-level `message`, when it is a string
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// Raw HTTP reply before interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: &str) -> HttpReply {
        HttpReply {
            status,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
