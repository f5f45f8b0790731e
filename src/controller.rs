/// The analyze flow: tab lookup, content extraction, submission.
///
/// Host capabilities sit behind `Host` and `Transport` so the flow can run
/// against the browser or against in-memory fakes. Each step either feeds the
/// next one or ends the run with a single `Action::Failed`.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::operations::{interpret_reply, page_content, resolve_active_tab, success_message};
use crate::scrape_data::{HttpReply, InjectionResult, ScrapeRequest, TabDescriptor};
use crate::state::Action;
use log::{debug, info, warn};
use url::Url;

/// Browser capabilities used by the popup
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Whether the extension tab APIs are reachable at all
    fn has_extension_api(&self) -> bool;

    async fn load_config(&self) -> Config;

    /// Tabs matching `{active: true, currentWindow: true}`
    async fn query_active_tabs(&self) -> Result<Vec<TabDescriptor>, ScrapeError>;

    /// Run the page-text extraction inside `tab_id`, one result per frame
    async fn extract_page_text(&self, tab_id: i32) -> Result<Vec<InjectionResult>, ScrapeError>;
}

/// Outbound HTTP
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// POST `body` as `application/json`. Any status counts as a reply;
    /// only failing to get one is an error.
    async fn post_json(&self, url: &Url, body: String) -> Result<HttpReply, ScrapeError>;
}

/// Run one analyze invocation, emitting every state transition.
///
/// Emits `Start` first, at most one `Submitting`, then exactly one of
/// `Succeeded` or `Failed`.
pub async fn analyze<H, T, F>(host: &H, transport: &T, mut emit: F)
where
    H: Host,
    T: Transport,
    F: FnMut(Action),
{
    info!("Analyze requested");
    emit(Action::Start);

    match scrape_and_submit(host, transport, &mut emit).await {
        Ok(message) => {
            info!("Job submitted: {}", message);
            emit(Action::Succeeded(message));
        }
        Err(err) => {
            warn!("Analyze failed: {:?}", err);
            emit(Action::Failed(err));
        }
    }
}

async fn scrape_and_submit<H, T, F>(host: &H, transport: &T, emit: &mut F) -> Result<String, ScrapeError>
where
    H: Host,
    T: Transport,
    F: FnMut(Action),
{
    if !host.has_extension_api() {
        return Err(ScrapeError::Environment);
    }

    let tabs = host.query_active_tabs().await?;
    let tab = resolve_active_tab(&tabs)?;
    debug!("Active tab {} at {}", tab.id, tab.url);

    let results = host.extract_page_text(tab.id).await?;
    let content = page_content(&results)?;
    debug!("Extracted {} characters", content.chars().count());

    let endpoint = host.load_config().await.scrape_url()?;

    emit(Action::Submitting);

    let request = ScrapeRequest {
        url: tab.url,
        page_content: content,
    };
    let body = serde_json::to_string(&request).map_err(|e| ScrapeError::Network {
        reason: format!("Failed to encode request ({})", e),
    })?;

    info!("POST {}", endpoint);
    let reply = transport.post_json(&endpoint, body).await?;
    debug!("Reply status {}", reply.status);

    let response = interpret_reply(&reply)?;
    Ok(success_message(&response))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::state::{SessionState, Status};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;

    struct FakeHost {
        extension: bool,
        tabs: Result<Vec<TabDescriptor>, ScrapeError>,
        frames: Result<Vec<InjectionResult>, ScrapeError>,
        config: Config,
        injected_into: RefCell<Vec<i32>>,
    }

    impl FakeHost {
        fn with_page(id: i32, url: &str, text: &str) -> Self {
            FakeHost {
                extension: true,
                tabs: Ok(vec![TabDescriptor::new(id, url)]),
                frames: Ok(vec![InjectionResult {
                    result: Some(json!(text)),
                }]),
                config: Config::default(),
                injected_into: RefCell::new(Vec::new()),
            }
        }
    }

    impl Host for FakeHost {
        fn has_extension_api(&self) -> bool {
            self.extension
        }

        async fn load_config(&self) -> Config {
            self.config.clone()
        }

        async fn query_active_tabs(&self) -> Result<Vec<TabDescriptor>, ScrapeError> {
            self.tabs.clone()
        }

        async fn extract_page_text(&self, tab_id: i32) -> Result<Vec<InjectionResult>, ScrapeError> {
            self.injected_into.borrow_mut().push(tab_id);
            self.frames.clone()
        }
    }

    struct FakeTransport {
        reply: Result<HttpReply, ScrapeError>,
        sent: RefCell<Vec<(String, String)>>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            FakeTransport {
                reply: Ok(HttpReply::new(status, body)),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        async fn post_json(&self, url: &Url, body: String) -> Result<HttpReply, ScrapeError> {
            self.sent.borrow_mut().push((url.to_string(), body));
            self.reply.clone()
        }
    }

    async fn run(host: &FakeHost, transport: &FakeTransport) -> (Vec<Action>, SessionState) {
        let mut actions = Vec::new();
        analyze(host, transport, |action| actions.push(action)).await;

        let mut state = SessionState::default();
        for action in actions.clone() {
            if let Some(next) = state.apply(action) {
                state = next;
            }
        }
        (actions, state)
    }

    #[tokio::test]
    async fn test_posts_tab_url_and_content() {
        let host = FakeHost::with_page(1, "https://x.test/job", "Senior Engineer...");
        let transport = FakeTransport::replying(200, r#"{"data":{"role":"Senior Engineer"}}"#);

        let (_, state) = run(&host, &transport).await;

        assert_eq!(
            transport.sent.borrow().clone(),
            vec![(
                "http://0.0.0.0:8080/scrape-job".to_string(),
                r#"{"url":"https://x.test/job","page_content":"Senior Engineer..."}"#.to_string()
            )]
        );
        assert_eq!(*host.injected_into.borrow(), vec![1]);
        assert_eq!(state.status, Status::Success);
        assert_eq!(state.message, "Success! Added \"Senior Engineer\" to Notion.");
    }

    #[tokio::test]
    async fn test_action_sequence_on_success() {
        let host = FakeHost::with_page(1, "https://x.test/job", "text");
        let transport = FakeTransport::replying(200, r#"{"status":"success"}"#);

        let (actions, _) = run(&host, &transport).await;

        assert_eq!(
            actions,
            vec![
                Action::Start,
                Action::Submitting,
                Action::Succeeded("Success! Job sent to Notion.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_extension_api() {
        let host = FakeHost {
            extension: false,
            ..FakeHost::with_page(1, "https://x.test/job", "text")
        };
        let transport = FakeTransport::replying(200, "{}");

        let (actions, state) = run(&host, &transport).await;

        assert_eq!(
            actions,
            vec![Action::Start, Action::Failed(ScrapeError::Environment)]
        );
        assert_eq!(state.status, Status::Error);
        assert_eq!(state.message, "This must be run as a Chrome extension.");
        assert!(transport.sent.borrow().is_empty());
        assert!(host.injected_into.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_no_active_tab() {
        let host = FakeHost {
            tabs: Ok(Vec::new()),
            ..FakeHost::with_page(1, "https://x.test/job", "text")
        };
        let transport = FakeTransport::replying(200, "{}");

        let (_, state) = run(&host, &transport).await;

        assert_eq!(state.status, Status::Error);
        assert_eq!(state.message, "Could not get active tab. Try again.");
        assert!(host.injected_into.borrow().is_empty());
        assert!(transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_tab_query_rejected() {
        let host = FakeHost {
            tabs: Err(ScrapeError::tab_access("permission denied")),
            ..FakeHost::with_page(1, "https://x.test/job", "text")
        };
        let transport = FakeTransport::replying(200, "{}");

        let (_, state) = run(&host, &transport).await;

        assert_eq!(state.message, "Could not get active tab. Try again.");
    }

    #[tokio::test]
    async fn test_injection_error() {
        let host = FakeHost {
            frames: Err(ScrapeError::extraction("Cannot access contents of the page")),
            ..FakeHost::with_page(4, "chrome://extensions", "text")
        };
        let transport = FakeTransport::replying(200, "{}");

        let (_, state) = run(&host, &transport).await;

        assert_eq!(state.status, Status::Error);
        assert_eq!(state.message, "Failed to scrape page. Try refreshing the page.");
        assert!(transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_injection_without_results() {
        let host = FakeHost {
            frames: Ok(Vec::new()),
            ..FakeHost::with_page(1, "https://x.test/job", "text")
        };
        let transport = FakeTransport::replying(200, "{}");

        let (actions, state) = run(&host, &transport).await;

        assert!(!actions.contains(&Action::Submitting));
        assert_eq!(state.message, "Failed to scrape page. Try refreshing the page.");
    }

    #[tokio::test]
    async fn test_server_error_detail() {
        let host = FakeHost::with_page(1, "https://x.test/job", "text");
        let transport = FakeTransport::replying(400, r#"{"detail":"bad url"}"#);

        let (_, state) = run(&host, &transport).await;

        assert_eq!(state.status, Status::Error);
        assert_eq!(state.message, "Error: bad url");
    }

    #[tokio::test]
    async fn test_network_failure() {
        let host = FakeHost::with_page(1, "https://x.test/job", "text");
        let transport = FakeTransport {
            reply: Err(ScrapeError::Network {
                reason: "Failed to fetch (connection refused)".to_string(),
            }),
            sent: RefCell::new(Vec::new()),
        };

        let (actions, state) = run(&host, &transport).await;

        assert_eq!(actions.len(), 3);
        assert_eq!(state.status, Status::Error);
        assert_eq!(state.message, "Error: Failed to fetch (connection refused)");
    }

    #[tokio::test]
    async fn test_configured_endpoint() {
        let host = FakeHost {
            config: Config::new("https://tracker.example.com/api"),
            ..FakeHost::with_page(1, "https://x.test/job", "text")
        };
        let transport = FakeTransport::replying(200, "{}");

        run(&host, &transport).await;

        assert_eq!(
            transport.sent.borrow()[0].0,
            "https://tracker.example.com/api/scrape-job"
        );
    }

    #[tokio::test]
    async fn test_invalid_endpoint_stops_before_post() {
        let host = FakeHost {
            config: Config::new("::not-a-url"),
            ..FakeHost::with_page(1, "https://x.test/job", "text")
        };
        let transport = FakeTransport::replying(200, "{}");

        let (_, state) = run(&host, &transport).await;

        assert_eq!(state.status, Status::Error);
        assert!(state.message.starts_with("Error: Invalid endpoint configuration"));
        assert!(transport.sent.borrow().is_empty());
    }
}
