#![cfg(target_arch = "wasm32")]
//! Content-script front-end: binds the scroll engine to the live page.

use wasm_bindgen::prelude::*;

mod api;
mod constants;
mod dom;
mod events;
mod frame;
mod scan;

pub use api::SmoothScroll;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("smooth-scroll-web loaded");
    Ok(())
}
