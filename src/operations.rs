/// Pure steps of an analyze run: tab resolution, content pick, reply interpretation

use crate::error::ScrapeError;
use crate::scrape_data::{HttpReply, InjectionResult, ScrapeResponse, TabDescriptor};
use serde_json::Value;

const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// The tab the popup will scrape
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTab {
    pub id: i32,
    pub url: String,
}

/// Take the first queried tab. It must carry a real id; Chrome uses -1 for
/// tabs without one.
pub fn resolve_active_tab(tabs: &[TabDescriptor]) -> Result<ResolvedTab, ScrapeError> {
    let tab = tabs
        .first()
        .ok_or_else(|| ScrapeError::tab_access("tab query returned no tabs"))?;

    let id = tab
        .id
        .filter(|id| *id >= 1)
        .ok_or_else(|| {
            ScrapeError::tab_access(format!("active tab has no usable id ({:?})", tab.id))
        })?;

    let url = tab.url.clone().unwrap_or_else(|| {
        log::warn!("Active tab {} has no URL; submitting an empty one", id);
        String::new()
    });

    Ok(ResolvedTab { id, url })
}

/// Text returned by the first frame's extraction
pub fn page_content(results: &[InjectionResult]) -> Result<String, ScrapeError> {
    let first = results
        .first()
        .ok_or_else(|| ScrapeError::extraction("script injection returned no results"))?;

    match &first.result {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Null) | None => Err(ScrapeError::extraction("frame returned no result")),
        Some(other) => Err(ScrapeError::extraction(format!(
            "expected page text, got {}",
            json_kind(other)
        ))),
    }
}

/// Map an HTTP reply onto the popup's outcome.
///
/// The body must be JSON whatever the status. A 2xx status is success; any
/// other status is a server error described by `detail`.
pub fn interpret_reply(reply: &HttpReply) -> Result<ScrapeResponse, ScrapeError> {
    let body: Value =
        serde_json::from_str(&reply.body).map_err(|e| ScrapeError::MalformedResponse {
            reason: format!("Unexpected response from server ({})", e),
        })?;
    let response = ScrapeResponse::new(body);

    if reply.is_success() {
        return Ok(response);
    }

    let detail = response
        .detail()
        .and_then(detail_text)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

    Err(ScrapeError::Server {
        status: reply.status,
        detail,
    })
}

/// Human-readable form of a `detail` field.
///
/// Validation failures arrive as a list of `{loc, msg, type}` entries; those
/// are reduced to their messages.
pub fn detail_text(detail: &Value) -> Option<String> {
    let text = match detail {
        Value::String(s) => s.trim().to_string(),
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map.get("msg").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    if text.is_empty() { None } else { Some(text) }
}

/// Message shown after a successful submission
pub fn success_message(response: &ScrapeResponse) -> String {
    let role = response.role().filter(|role| !role.trim().is_empty());

    if let Some(role) = role {
        return format!("Success! Added \"{}\" to Notion.", role);
    }

    match response.message() {
        Some(message) if !message.trim().is_empty() => message.to_string(),
        _ => "Success! Job sent to Notion.".to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
