use crate::dom::{self, ListenerHandle};
use site_core::input::{pointer_to_ndc, InputSnapshot};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire the global pointer/scroll listeners that feed the shared input
/// snapshot. Samples overwrite the snapshot as they arrive; frame loops read
/// it once per frame. Returns the handles so the caller controls teardown.
pub fn wire_global_input(input: Rc<RefCell<InputSnapshot>>) -> Vec<ListenerHandle> {
    let mut handles = Vec::new();
    let Some(window) = web::window() else {
        return handles;
    };
    let target: &web::EventTarget = window.as_ref();

    {
        let input = input.clone();
        handles.push(ListenerHandle::new(target, "pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                let w = dom::viewport_width() as f32;
                let h = dom::viewport_height() as f32;
                input.borrow_mut().pointer_ndc =
                    pointer_to_ndc(ev.client_x() as f32, ev.client_y() as f32, w, h);
            }
        }));
    }
    {
        let input = input.clone();
        handles.push(ListenerHandle::new(target, "scroll", move |_ev| {
            if let Some(w) = web::window() {
                input.borrow_mut().scroll_y = w.scroll_y().unwrap_or(0.0) as f32;
            }
        }));
    }
    handles
}
