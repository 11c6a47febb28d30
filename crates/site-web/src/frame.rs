//! Cancellable frame and timer loops.
//!
//! The 3D scene, the particle field, the menu stepper and the progress
//! ticker each own an independent loop instance; teardown of the owning
//! component cancels its loop. Nothing here is shared between loops.

use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that stops scheduling once cancelled.
/// Dropping the handle cancels the loop.
pub struct FrameLoop {
    alive: Rc<Cell<bool>>,
    raf_id: Rc<Cell<i32>>,
    _tick: TickClosure,
}

impl FrameLoop {
    pub fn cancel(&self) {
        if self.alive.replace(false) {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(self.raf_id.get());
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a frame loop; the callback receives `(elapsed_sec, dt_sec)` from a
/// real-time clock so animation speed is independent of frame rate.
pub fn start_loop(mut frame: impl FnMut(f32, f32) + 'static) -> FrameLoop {
    let alive = Rc::new(Cell::new(true));
    let raf_id = Rc::new(Cell::new(0));
    let tick: TickClosure = Rc::new(RefCell::new(None));

    let epoch = Instant::now();
    let mut last = epoch;
    let alive_tick = alive.clone();
    let raf_tick = raf_id.clone();
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive_tick.get() {
            return;
        }
        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;
        frame((now - epoch).as_secs_f32(), dt);
        if alive_tick.get() {
            if let Some(w) = web::window() {
                if let Ok(id) = w.request_animation_frame(
                    tick_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                ) {
                    raf_tick.set(id);
                }
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            raf_id.set(id);
        }
    }

    FrameLoop {
        alive,
        raf_id,
        _tick: tick,
    }
}

/// A `setInterval` timer. `cancel` clears the timer immediately and is safe
/// to call from inside the timer's own callback; the closure itself is only
/// released when the handle is dropped.
pub struct IntervalHandle {
    id: Cell<Option<i32>>,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalHandle {
    pub fn cancel(&self) {
        if let Some(id) = self.id.take() {
            if let Some(w) = web::window() {
                w.clear_interval_with_handle(id);
            }
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn set_interval(period_ms: i32, f: impl FnMut() + 'static) -> Option<IntervalHandle> {
    let window = web::window()?;
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    let id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        )
        .ok()?;
    Some(IntervalHandle {
        id: Cell::new(Some(id)),
        _closure: closure,
    })
}

/// One-shot timer; the closure is released after it runs.
pub fn set_timeout_once(delay_ms: i32, f: impl FnOnce() + 'static) {
    if let Some(window) = web::window() {
        let cb = Closure::once_into_js(f);
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms);
    }
}
