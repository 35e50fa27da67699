use anyhow::{Context, Result, anyhow};
use glam::Vec2;
use leptos::prelude::{ClassAttribute, ElementChild};
use leptos::{IntoView, component, view};
use wasm_bindgen::{JsCast, convert::FromWasmAbi, prelude::Closure};
use web_sys::{EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent};

#[component]
pub fn WebGlNotSupportedMsg() -> impl IntoView {
    view! {
        <div class="max-w-md mx-auto bg-blue-50 border border-blue-200 rounded-lg p-6 shadow-sm text-blue-800">
          <h2 class="text-xl font-semibold mb-2">"WebGL not available"</h2>
          <p class="mb-4 leading-relaxed">
            "The rover viewer draws with "<span class="font-bold">"WebGL2"</span>
            " and could not get a context from this browser."
          </p>
          <p class="text-sm text-blue-700">
            "Check that hardware acceleration is enabled, or try a current Chrome, Edge or Firefox."
          </p>
        </div>
    }
}

/// Attach `f` for the lifetime of the page. Listeners are never removed.
pub fn add_listener<T, F>(target: &EventTarget, ty: &str, f: F)
where
    T: 'static + JsCast + FromWasmAbi,
    F: 'static + FnMut(T),
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback(ty, cb.as_ref().unchecked_ref()) {
        log::error!("could not listen for {ty}: {e:?}");
        return;
    }
    cb.forget();
}

pub fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .context("no document")?
        .get_element_by_id(id)
        .with_context(|| format!("#{id} not in DOM yet"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{id} is not a canvas"))
}

/// Canvas-relative pointer position in **device pixels**, the unit the
/// surface and the preview rectangle are measured in.
pub fn to_surface_px(e: &MouseEvent, canvas: &HtmlCanvasElement) -> Vec2 {
    let html: &HtmlElement = canvas.unchecked_ref();
    let rect = html.get_bounding_client_rect();
    let scale_x = canvas.width() as f32 / rect.width().max(1.0) as f32; // Hi-DPI
    let scale_y = canvas.height() as f32 / rect.height().max(1.0) as f32;

    Vec2::new(
        (e.client_x() as f32 - rect.left() as f32) * scale_x,
        (e.client_y() as f32 - rect.top() as f32) * scale_y,
    )
}

/// Backing-store size the canvas should have for its current CSS size.
pub fn display_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    let w = (canvas.client_width() as f64 * dpr).round() as u32;
    let h = (canvas.client_height() as f64 * dpr).round() as u32;
    (w.max(1), h.max(1))
}
