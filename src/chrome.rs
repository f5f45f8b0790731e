/// Browser-backed `Host` and `Transport`

use crate::config::{CONFIG_STORAGE_KEY, Config};
use crate::controller::{Host, Transport};
use crate::error::ScrapeError;
use crate::scrape_data::{HttpReply, InjectionResult, TabDescriptor};
use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryActiveTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn extractPageText(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;
}

/// True when `chrome.tabs` exists in the global scope
pub fn has_extension_api() -> bool {
    let global = js_sys::global();

    js_sys::Reflect::get(&global, &JsValue::from_str("chrome"))
        .ok()
        .filter(|chrome| chrome.is_object())
        .and_then(|chrome| js_sys::Reflect::get(&chrome, &JsValue::from_str("tabs")).ok())
        .is_some_and(|tabs| tabs.is_object())
}

/// Best-effort text of a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Decode a stored config value; absent or malformed values yield the default.
pub fn config_from_js(value: JsValue) -> Config {
    if value.is_null() || value.is_undefined() {
        return Config::default();
    }

    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed {}: {:?}", CONFIG_STORAGE_KEY, e);
        Config::default()
    })
}

pub struct ChromeHost;

impl Host for ChromeHost {
    fn has_extension_api(&self) -> bool {
        has_extension_api()
    }

    async fn load_config(&self) -> Config {
        match getStorage(CONFIG_STORAGE_KEY).await {
            Ok(value) => config_from_js(value),
            Err(e) => {
                log::warn!("Failed to read storage: {}", js_error_message(&e));
                Config::default()
            }
        }
    }

    async fn query_active_tabs(&self) -> Result<Vec<TabDescriptor>, ScrapeError> {
        let tabs_js = queryActiveTabs()
            .await
            .map_err(|e| ScrapeError::tab_access(js_error_message(&e)))?;

        serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| ScrapeError::tab_access(format!("Failed to parse tabs: {:?}", e)))
    }

    async fn extract_page_text(&self, tab_id: i32) -> Result<Vec<InjectionResult>, ScrapeError> {
        let results_js = extractPageText(tab_id)
            .await
            .map_err(|e| ScrapeError::extraction(js_error_message(&e)))?;

        if results_js.is_null() || results_js.is_undefined() {
            return Ok(Vec::new());
        }

        serde_wasm_bindgen::from_value(results_js).map_err(|e| {
            ScrapeError::extraction(format!("Failed to parse injection results: {:?}", e))
        })
    }
}

/// `window.fetch` transport
pub struct FetchTransport;

impl FetchTransport {
    fn network(e: JsValue) -> ScrapeError {
        ScrapeError::Network {
            reason: js_error_message(&e),
        }
    }
}

impl Transport for FetchTransport {
    async fn post_json(&self, url: &Url, body: String) -> Result<HttpReply, ScrapeError> {
        let window = web_sys::window().ok_or_else(|| ScrapeError::Network {
            reason: "No window to fetch from".to_string(),
        })?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url.as_str(), &opts).map_err(Self::network)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(Self::network)?;

        let response_js = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(Self::network)?;
        let response: Response = response_js.dyn_into().map_err(Self::network)?;

        let text_promise = response.text().map_err(|e| ScrapeError::MalformedResponse {
            reason: format!("Unreadable response ({})", js_error_message(&e)),
        })?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| ScrapeError::MalformedResponse {
                reason: format!("Unreadable response ({})", js_error_message(&e)),
            })?;

        Ok(HttpReply {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}
