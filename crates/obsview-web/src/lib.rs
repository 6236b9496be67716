#![cfg(target_arch = "wasm32")]
mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod panel;
mod render;
mod status;
mod upload;

use obsview_core::{OrbitCamera, RenderParams, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("obsview-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            status::report(&format!("Viewer failed to start: {:#}", e));
        }
    });
    Ok(())
}

fn find_or_create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = dom::ensure_element(document, constants::CANVAS_ID, "canvas")?;
    let canvas = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", constants::CANVAS_ID, e))?;
    if canvas.get_attribute("style").is_none() {
        // Fill the page and keep touch drags from scrolling it.
        let _ = canvas.set_attribute(
            "style",
            "position:fixed;inset:0;width:100%;height:100%;display:block;touch-action:none",
        );
    }
    Ok(canvas)
}

// Maintain canvas internal pixel size to match CSS size * devicePixelRatio
fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    dom::add_event_listener(window, "resize", move |_ev| {
        dom::sync_canvas_backing_size(&canvas_resize);
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = find_or_create_canvas(&document)?;
    wire_canvas_resize(&window, &canvas);
    status::ensure(&document)?;

    let params = Rc::new(RefCell::new(RenderParams::default()));
    let scene = Rc::new(RefCell::new(Scene::new()));
    let inbox: upload::TextureInbox = Rc::new(RefCell::new(Vec::new()));
    let camera = Rc::new(RefCell::new(OrbitCamera::new(
        canvas.width().max(1) as f32 / canvas.height().max(1) as f32,
    )));

    let file_input = panel::build_settings_panel(&document, params.clone())?;
    upload::wire_upload(
        &file_input,
        upload::UploadContext {
            document: document.clone(),
            scene: scene.clone(),
            inbox: inbox.clone(),
        },
    );
    events::wire_orbit_controls(events::OrbitWiring {
        canvas: canvas.clone(),
        camera: camera.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let mut gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        status::show_error(
            &document,
            "WebGPU is not available in this browser; the scene cannot be drawn.",
        );
    }

    // Load-bearing assets arrive before the first frame; failures keep placeholders.
    let loaded = assets::load_startup_assets().await;
    if let Some(g) = gpu.as_mut() {
        if let Some(mesh) = &loaded.model {
            g.set_model(mesh);
        }
        g.set_environment(&loaded.environment);
        g.set_skybox(&loaded.skybox);
    }
    if loaded.model.is_none() {
        status::show_error(
            &document,
            &format!("Model {} could not be loaded.", obsview_core::MODEL_URL),
        );
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        canvas, params, scene, camera, inbox, gpu,
    )));
    frame::start_loop(frame_ctx);
    log::info!("[init] ready");
    Ok(())
}
