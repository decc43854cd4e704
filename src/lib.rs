#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod blog;
#[cfg(feature = "pipeline")]
pub mod cache;
pub mod config;
#[cfg(feature = "pipeline")]
mod highlight;
#[cfg(feature = "pipeline")]
pub mod markdown;
pub mod reveal;
#[cfg(feature = "rss")]
pub mod rss;
pub mod slug;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    // a second init only happens on hot reload
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(App);
}
