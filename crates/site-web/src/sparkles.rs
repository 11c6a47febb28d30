use crate::frame::{self, FrameLoop};
use site_core::sparkles::{FieldParams, ParticleField};
use wasm_bindgen::JsCast;
use web_sys as web;

/// A running particle field bound to a 2D canvas. Dropping the handle
/// cancels the frame loop; the particle batch goes with it.
pub struct Sparkles {
    _frames: FrameLoop,
}

/// Mount the field on the canvas with the given id. Missing canvas or
/// missing 2D context is a silent no-op: the loader simply renders without
/// sparkles.
pub fn mount(document: &web::Document, canvas_id: &str, seed: u64) -> Option<Sparkles> {
    let canvas = document
        .get_element_by_id(canvas_id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;

    let parent = canvas.parent_element()?;
    let width = parent.client_width().max(1) as u32;
    let height = parent.client_height().max(1) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()?;
    ctx.set_fill_style_str("#ffffff");

    let mut field = ParticleField::new(width as f32, height as f32, FieldParams::default(), seed);

    // full clear-and-redraw every frame, no incremental diffing
    let frames = frame::start_loop(move |_elapsed, _dt| {
        field.step();
        ctx.clear_rect(0.0, 0.0, field.width() as f64, field.height() as f64);
        for p in &field.particles {
            ctx.set_global_alpha(p.opacity as f64);
            ctx.begin_path();
            let _ = ctx.arc(p.x as f64, p.y as f64, p.radius as f64, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
    });

    Some(Sparkles { _frames: frames })
}
