//! Shapeboard Web
//!
//! Browser binding for the Shapeboard interaction controller. The scene
//! graph lives in JavaScript and is reached through callbacks.

mod backend;
mod canvas;

pub use backend::JsBackend;
pub use canvas::ShapeboardCanvas;

/// WebAssembly entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("A logger was already installed");
    }
    log::info!("Starting Shapeboard (WASM)");
}
