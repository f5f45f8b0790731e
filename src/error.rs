use thiserror::Error;

/// Failures of a single analyze run.
///
/// `Display` is what the popup shows in its message line. The `reason` fields
/// carry the underlying cause for console logging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrapeError {
    /// The popup is not running inside an extension (no `chrome.tabs`).
    #[error("This must be run as a Chrome extension.")]
    Environment,

    #[error("Could not get active tab. Try again.")]
    TabAccess { reason: String },

    #[error("Failed to scrape page. Try refreshing the page.")]
    Extraction { reason: String },

    #[error("Error: Invalid endpoint configuration ({reason})")]
    Config { reason: String },

    #[error("Error: {reason}")]
    Network { reason: String },

    /// The service answered with a non-2xx status.
    #[error("Error: {detail}")]
    Server { status: u16, detail: String },

    #[error("Error: {reason}")]
    MalformedResponse { reason: String },
}

impl ScrapeError {
    pub fn tab_access(reason: impl Into<String>) -> Self {
        ScrapeError::TabAccess { reason: reason.into() }
    }

    pub fn extraction(reason: impl Into<String>) -> Self {
        ScrapeError::Extraction { reason: reason.into() }
    }
}
