//! Widget app — WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the browser adapters and hands the chat core to the host
//! page's UI code as a single `ChatWidget` handle.

mod app;

pub use app::ChatWidget;

use wasm_bindgen::prelude::*;

/// Called once when the WASM module loads.
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("chat widget core loaded");
}
