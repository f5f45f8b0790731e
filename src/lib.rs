/// AI Job Tracker - Chrome extension popup that sends the active job posting
/// to the job tracker service for analysis and Notion logging.
/// Built with Rust + WASM + Yew

pub mod chrome;
pub mod config;
pub mod controller;
pub mod error;
pub mod operations;
pub mod scrape_data;
pub mod state;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
