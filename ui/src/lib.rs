pub mod assets;
pub mod config;
pub mod meshes;
pub mod navigation;
pub mod render;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod app;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod components;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod pages;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod routes;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use crate::app::App;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod entry {
    use leptos::mount::mount_to_body;
    use leptos::prelude::*;
    use wasm_bindgen::prelude::*;

    use crate::App;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::error_1(&format!("logger init failed: {e}").into());
        }
        log::info!("rover viewer {}", env!("CARGO_PKG_VERSION"));

        mount_to_body(|| view! { <App/> });
    }
}
