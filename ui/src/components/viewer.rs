use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::{
    ClassAttribute, Effect, ElementChild, Get, GetUntracked, GlobalAttributes, LocalStorage, RwSignal, Set, SetValue,
    Show, StoredValue, StyleAttribute,
};
use leptos::{IntoView, component, view};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, MouseEvent, PointerEvent};

use crate::assets::{decode_background, decode_model, fetch_bytes, load_config};
use crate::navigation::{ActiveCamera, AppContext, Direction, FrameReport, InputEvent, InputQueue, Viewport};
use crate::render::renderer::gpu::GpuState;
use crate::render::web_gpu::init_wgpu;

use super::debug_panel::DebugPanel;
use super::nav_buttons::NavButtons;
use super::utils::{self, WebGlNotSupportedMsg, add_listener};

const CANVAS_ID: &str = "rover-canvas";

type RafSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// What the DOM around the canvas shows. Written from the frame loop only
/// when a value actually changed.
#[derive(Clone, Copy)]
struct Hud {
    affordances: RwSignal<Vec<Direction>>,
    at_home: RwSignal<bool>,
    hovering: RwSignal<bool>,
}

impl Hud {
    fn new() -> Self {
        Self {
            affordances: RwSignal::new(Vec::new()),
            at_home: RwSignal::new(true),
            hovering: RwSignal::new(false),
        }
    }

    fn show(&self, report: &FrameReport) {
        let dirs: Vec<Direction> = report.affordances.iter().map(|t| t.direction).collect();
        if self.affordances.get_untracked() != dirs {
            self.affordances.set(dirs);
        }

        let home = report.active == ActiveCamera::Home;
        if self.at_home.get_untracked() != home {
            self.at_home.set(home);
        }

        let hovering = home && report.hovered.is_some();
        if self.hovering.get_untracked() != hovering {
            self.hovering.set(hovering);
        }
    }
}

#[component]
pub fn Viewer() -> impl IntoView {
    let gpu_support = RwSignal::new(true);
    let hud = Hud::new();
    let debug_values = RwSignal::new(Vec::<f32>::new());
    // replaced by the context's own queue once it exists
    let queue = StoredValue::new_local(InputQueue::default());

    Effect::new(move |_| {
        spawn_local(async move {
            // wait until the <canvas> actually exists
            TimeoutFuture::new(0).await;

            if let Err(e) = boot(queue, gpu_support, hud, debug_values).await {
                log::error!("viewer start failed: {e:#}");
            }
        });
    });

    view! {
        <div class="relative w-full h-[80vh] group select-none">
          <Show
            when=move || gpu_support.get()
            fallback=move || view! { <WebGlNotSupportedMsg/> }
          >
            <canvas
              id=CANVAS_ID
              class="w-full h-full block"
              style:cursor=move || if hud.hovering.get() { "pointer" } else { "default" }
            ></canvas>

            <NavButtons affordances=hud.affordances at_home=hud.at_home queue/>
            <DebugPanel values=debug_values queue/>
          </Show>
        </div>
    }
}

async fn boot(
    queue: StoredValue<InputQueue, LocalStorage>,
    gpu_support: RwSignal<bool>,
    hud: Hud,
    debug_values: RwSignal<Vec<f32>>,
) -> Result<()> {
    let canvas = utils::canvas_by_id(CANVAS_ID)?;
    let (width, height) = utils::display_size(&canvas);
    canvas.set_width(width);
    canvas.set_height(height);

    let config = load_config().await;
    let ctx = AppContext::from_config(&config, Viewport::new(width, height));

    let gpu = match init_wgpu(&canvas, ctx.picker().geometry()).await {
        Ok(gpu) => gpu,
        Err(e) => {
            gpu_support.set(false);
            return Err(e.context("WebGL init failed"));
        }
    };

    queue.set_value(ctx.input());
    if config.debug_panel {
        debug_values.set(ctx.bindings().iter().map(|b| b.value(&ctx)).collect());
    }
    add_pointer_listeners(&canvas, ctx.input());

    let gpu = Rc::new(RefCell::new(gpu));
    load_model(gpu.clone(), config.model_url.clone());
    if let Some(url) = config.background_url.clone() {
        load_background(gpu.clone(), url);
    }

    start_rendering(canvas, Rc::new(RefCell::new(ctx)), gpu, hud);
    Ok(())
}

fn add_pointer_listeners(canvas: &HtmlCanvasElement, input: InputQueue) {
    let cv = canvas.clone();
    let q = input.clone();
    add_listener(canvas, "pointermove", move |e: PointerEvent| {
        let p = utils::to_surface_px(&e, &cv);
        q.push(InputEvent::PointerMoved { x: p.x, y: p.y });
    });

    // taps never send a pointermove, so the click carries its own position
    let cv = canvas.clone();
    add_listener(canvas, "click", move |e: MouseEvent| {
        let p = utils::to_surface_px(&e, &cv);
        input.push(InputEvent::PointerMoved { x: p.x, y: p.y });
        input.push(InputEvent::Clicked);
    });
}

fn load_model(gpu: Rc<RefCell<GpuState>>, url: String) {
    spawn_local(async move {
        let model = match fetch_bytes(&url).await.and_then(|bytes| decode_model(&bytes)) {
            Ok(model) => model,
            Err(e) => {
                log::error!("model {url}: {e:#}");
                return;
            }
        };
        gpu.borrow_mut().set_model(&model);
    });
}

fn load_background(gpu: Rc<RefCell<GpuState>>, url: String) {
    spawn_local(async move {
        match fetch_bytes(&url).await.and_then(|bytes| decode_background(&bytes)) {
            Ok(img) => gpu.borrow_mut().set_background(&img),
            Err(e) => log::error!("background {url}: {e:#}"),
        }
    });
}

fn request_frame(slot: &RafSlot) {
    let Some(window) = web_sys::window() else { return };
    if let Some(cb) = slot.borrow().as_ref() {
        if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }
}

fn start_rendering(
    canvas: HtmlCanvasElement,
    ctx: Rc<RefCell<AppContext>>,
    gpu: Rc<RefCell<GpuState>>,
    hud: Hud,
) {
    let input = ctx.borrow().input();

    // we store the RAF callback so it can re-schedule itself each frame
    let f: RafSlot = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        {
            let (Ok(mut ctx), Ok(mut gpu)) = (ctx.try_borrow_mut(), gpu.try_borrow_mut()) else {
                // an asset upload holds the renderer, try again next refresh
                request_frame(&f);
                return;
            };

            let (width, height) = utils::display_size(&canvas);
            if (width, height) != gpu.resolution() {
                canvas.set_width(width);
                canvas.set_height(height);
                gpu.resize(width, height);
                input.push(InputEvent::Resized { width, height });
            }

            let report = ctx.frame(now, &mut *gpu);
            gpu.present();
            hud.show(&report);
        }

        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));

    // initial kick
    request_frame(&g);
}
