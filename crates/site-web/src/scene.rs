use crate::constants::{SCENE_CANVAS_ID, STARFIELD_SEED};
use crate::dom::{self, ListenerHandle};
use crate::frame::{self, FrameLoop};
use crate::render;
use site_core::input::InputSnapshot;
use site_core::scene::{
    object_parts, starfield_transform, update_object, ObjectMotion, QualityTier, SCENE_OBJECTS,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Live 3D scene: its frame loop, its listeners and its GPU state, released
/// together on teardown. Setup hands the caller this handle; the caller
/// guarantees `teardown` runs on every exit path (drop does it too).
pub struct SceneHandle {
    frames: Option<FrameLoop>,
    listeners: Vec<ListenerHandle>,
    gpu: Rc<RefCell<Option<render::GpuState<'static>>>>,
}

impl SceneHandle {
    fn noop() -> Self {
        Self {
            frames: None,
            listeners: Vec::new(),
            gpu: Rc::new(RefCell::new(None)),
        }
    }

    pub fn teardown(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        self.listeners.clear();
        if let Some(gpu) = self.gpu.borrow_mut().take() {
            gpu.teardown();
        }
    }
}

impl Drop for SceneHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    tier: QualityTier,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, tier, STARFIELD_SEED).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Build the scene graph once and start the per-frame update. A missing
/// canvas or missing WebGPU adapter yields an inert handle; the page works
/// without the backdrop. The quality tier was decided at mount and is not
/// re-evaluated on later resizes.
pub async fn mount(
    document: &web::Document,
    input: Rc<RefCell<InputSnapshot>>,
    tier: QualityTier,
) -> SceneHandle {
    let canvas = match document
        .get_element_by_id(SCENE_CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
    {
        Some(c) => c,
        None => {
            log::warn!("no scene canvas; skipping 3D backdrop");
            return SceneHandle::noop();
        }
    };
    dom::sync_canvas_backing_size(&canvas);

    let gpu = match init_gpu(&canvas, tier).await {
        Some(g) => Rc::new(RefCell::new(Some(g))),
        None => return SceneHandle::noop(),
    };

    // keep the backing store in step with CSS size; the camera aspect and
    // surface follow in the frame loop
    let mut listeners = Vec::new();
    if let Some(window) = web::window() {
        let canvas_resize = canvas.clone();
        listeners.push(ListenerHandle::new(
            window.as_ref(),
            "resize",
            move |_ev| {
                dom::sync_canvas_backing_size(&canvas_resize);
            },
        ));
    }

    let mut motions: Vec<ObjectMotion> = SCENE_OBJECTS.iter().map(ObjectMotion::new).collect();
    let gpu_tick = gpu.clone();
    let frames = frame::start_loop(move |elapsed, dt| {
        let snapshot = *input.borrow();

        let mut parts = Vec::with_capacity(8);
        for (i, desc) in SCENE_OBJECTS.iter().enumerate() {
            update_object(desc, i, &mut motions[i], elapsed, dt, &snapshot);
            for (shape, model) in object_parts(desc, &motions[i]) {
                parts.push((shape, model, desc.color));
            }
        }
        let star_model = starfield_transform(elapsed, snapshot.scroll_y);

        if let Some(gpu) = gpu_tick.borrow_mut().as_mut() {
            gpu.resize_if_needed(canvas.width(), canvas.height());
            if let Err(e) = gpu.render(elapsed, &parts, star_model) {
                log::error!("render error: {:?}", e);
            }
        }
    });

    SceneHandle {
        frames: Some(frames),
        listeners,
        gpu,
    }
}
