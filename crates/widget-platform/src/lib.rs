//! Browser platform adapters — implements widget-core port traits via
//! wasm-bindgen.

pub mod storage;
pub mod clock;
pub mod token;
pub mod http;
