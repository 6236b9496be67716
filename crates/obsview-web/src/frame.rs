use crate::constants::FPS_LOG_INTERVAL_SEC;
use crate::render;
use crate::status;
use crate::upload::TextureInbox;
use instant::Instant;
use obsview_core::{step_frame, ModelSpin, OrbitCamera, RenderParams, Scene, TextureState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub params: Rc<RefCell<RenderParams>>,
    pub scene: Rc<RefCell<Scene>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub inbox: TextureInbox,

    pub spin: ModelSpin,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
    pub fps_frames: u32,
    pub fps_elapsed: f32,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        params: Rc<RefCell<RenderParams>>,
        scene: Rc<RefCell<Scene>>,
        camera: Rc<RefCell<OrbitCamera>>,
        inbox: TextureInbox,
        gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        Self {
            canvas,
            params,
            scene,
            camera,
            inbox,
            spin: ModelSpin::default(),
            gpu,
            last_instant: Instant::now(),
            fps_frames: 0,
            fps_elapsed: 0.0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.track_fps(dt_sec);

        // Params are read once per frame; toggles made mid-frame apply next frame.
        let params = *self.params.borrow();
        let update = step_frame(&mut self.spin, &params);

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.camera.borrow_mut().set_viewport(w, h);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(w, h);

        g.sync_observations(&self.scene.borrow());
        let arrived: Vec<_> = self.inbox.borrow_mut().drain(..).collect();
        for loaded in arrived {
            let state = match g.set_observation_texture(loaded.id, &loaded.image) {
                Ok(true) => TextureState::Ready,
                Ok(false) => {
                    log::warn!("[frame] texture for unknown observation #{}", loaded.id.0);
                    continue;
                }
                Err(e) => {
                    status::report(&format!(
                        "Observation image {} for #{} was not uploaded: {}",
                        loaded.url, loaded.id.0, e
                    ));
                    TextureState::Failed
                }
            };
            self.scene.borrow_mut().set_texture_state(loaded.id, state);
        }

        let camera = self.camera.borrow().clone();
        match g.render(&camera, &update, &self.scene.borrow()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[frame] surface lost, reconfiguring");
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    fn track_fps(&mut self, dt_sec: f32) {
        self.fps_frames += 1;
        self.fps_elapsed += dt_sec;
        if self.fps_elapsed >= FPS_LOG_INTERVAL_SEC {
            log::debug!(
                "[frame] {:.1} fps, {} observation(s), {} texture(s) pending",
                self.fps_frames as f32 / self.fps_elapsed,
                self.scene.borrow().len(),
                self.scene.borrow().pending_textures()
            );
            self.fps_frames = 0;
            self.fps_elapsed = 0.0;
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
