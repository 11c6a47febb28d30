use crate::constants::*;
use crate::dom;
use crate::frame::{self, IntervalHandle};
use crate::sparkles::{self, Sparkles};
use site_core::preloader::{status_label, LoadSequencer};
use site_core::scene::QualityTier;
use site_core::{LOADER_INCREMENT_MAX, LOADER_SETTLE_MS, LOADER_TICK_MS};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Mount the loading stage: start the progress ticker and, on capable
/// displays, the particle field behind it. When the sequencer reaches 100
/// the ticker stops, the READY state stays visible for the settle delay,
/// then the loader is hidden and `on_complete` runs exactly once.
pub fn mount(document: &web::Document, tier: QualityTier, on_complete: impl FnOnce() + 'static) {
    let seq = Rc::new(RefCell::new(LoadSequencer::new()));
    let sparkles: Rc<RefCell<Option<Sparkles>>> = Rc::new(RefCell::new(match tier {
        QualityTier::Full => sparkles::mount(document, LOADER_CANVAS_ID, SPARKLE_SEED),
        QualityTier::Lite => None,
    }));
    let interval: Rc<RefCell<Option<IntervalHandle>>> = Rc::new(RefCell::new(None));
    let on_complete: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
        Rc::new(RefCell::new(Some(Box::new(on_complete))));

    let doc = document.clone();
    let seq_tick = seq.clone();
    let sparkles_tick = sparkles.clone();
    let interval_tick = interval.clone();
    let tick = move || {
        let jump = (js_sys::Math::random() * LOADER_INCREMENT_MAX as f64).floor() as u8 + 1;
        let completed = {
            let mut s = seq_tick.borrow_mut();
            s.advance(jump);
            let p = s.progress();
            dom::set_text(&doc, LOADER_COUNT_ID, &format!("{p}%"));
            dom::set_text(&doc, LOADER_STATUS_ID, status_label(p));
            if let Some(bar) = dom::element(&doc, LOADER_BAR_ID) {
                dom::set_style(&bar, &format!("width:{p}%"));
            }
            s.take_completion()
        };
        if completed {
            // stop ticking now; the closure itself is released later, once
            // the settle timeout takes the handle
            if let Some(h) = interval_tick.borrow().as_ref() {
                h.cancel();
            }
            // the loading stage owns the field; completion unmounts it
            sparkles_tick.borrow_mut().take();

            let doc = doc.clone();
            let interval = interval_tick.clone();
            let cb = on_complete.clone();
            frame::set_timeout_once(LOADER_SETTLE_MS, move || {
                interval.borrow_mut().take();
                if let Some(root) = dom::element(&doc, LOADER_ROOT_ID) {
                    dom::set_style(&root, "display:none");
                }
                if let Some(f) = cb.borrow_mut().take() {
                    f();
                }
            });
        }
    };

    *interval.borrow_mut() = frame::set_interval(LOADER_TICK_MS, tick);
    if interval.borrow().is_none() {
        log::warn!("loader ticker could not start");
    }
}
