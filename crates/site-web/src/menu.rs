use crate::constants::{MENU_ITEM_SELECTOR, MENU_OVERLAY_ID, MENU_TOGGLE_ID};
use crate::dom::{self, ListenerHandle};
use crate::frame::{self, FrameLoop};
use site_core::constants::MENU_ITEM_DURATION_SEC;
use site_core::menu::{MenuOverlay, OverlayPhase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct MenuHandles {
    _frames: FrameLoop,
    _listeners: Vec<ListenerHandle>,
}

fn item_style(visible: bool, delay_sec: f32) -> String {
    let (opacity, shift) = if visible { (1.0, 0.0) } else { (0.0, 24.0) };
    format!(
        "opacity:{opacity};transform:translateY({shift}px);\
         transition:all {MENU_ITEM_DURATION_SEC}s ease-out;transition-delay:{delay_sec}s"
    )
}

fn collect_items(overlay_el: &web::Element) -> Vec<web::Element> {
    let mut items = Vec::new();
    if let Ok(nodes) = overlay_el.query_selector_all(MENU_ITEM_SELECTOR) {
        for i in 0..nodes.length() {
            if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                items.push(el);
            }
        }
    }
    items
}

/// Wire the full-screen menu overlay: toggle button, staggered items, scroll
/// lock, and the stepper that walks the overlay through its phases. The
/// overlay element is only display-none'd once the last item finished
/// animating out.
pub fn mount(document: &web::Document) -> Option<MenuHandles> {
    let overlay_el = dom::element(document, MENU_OVERLAY_ID)?;
    let toggle_el = dom::element(document, MENU_TOGGLE_ID)?;
    let items = collect_items(&overlay_el);

    let overlay = Rc::new(RefCell::new(MenuOverlay::new(items.len())));
    let mut listeners = Vec::new();

    let apply_open = {
        let overlay = overlay.clone();
        let overlay_el = overlay_el.clone();
        let items = items.clone();
        let document = document.clone();
        move || {
            let o = overlay.borrow();
            dom::set_style(&overlay_el, "display:flex");
            dom::set_body_scroll_lock(&document, true);
            for (i, item) in items.iter().enumerate() {
                dom::set_style(item, &item_style(true, o.item_enter_delay(i)));
            }
        }
    };
    let apply_close = {
        let overlay = overlay.clone();
        let items = items.clone();
        move || {
            let o = overlay.borrow();
            for (i, item) in items.iter().enumerate() {
                dom::set_style(item, &item_style(false, o.item_exit_delay(i)));
            }
        }
    };

    {
        let overlay = overlay.clone();
        let apply_open = apply_open.clone();
        let apply_close = apply_close.clone();
        listeners.push(ListenerHandle::new(
            toggle_el.as_ref(),
            "click",
            move |_ev| {
                let phase = overlay.borrow().phase();
                match phase {
                    OverlayPhase::Closed => {
                        overlay.borrow_mut().open();
                        apply_open();
                    }
                    OverlayPhase::Opening | OverlayPhase::Open => {
                        overlay.borrow_mut().close();
                        apply_close();
                    }
                    OverlayPhase::Closing => {}
                }
            },
        ));
    }

    // navigating from a menu item closes the overlay
    for item in &items {
        let overlay = overlay.clone();
        let apply_close = apply_close.clone();
        listeners.push(ListenerHandle::new(item.as_ref(), "click", move |_ev| {
            if matches!(
                overlay.borrow().phase(),
                OverlayPhase::Opening | OverlayPhase::Open
            ) {
                overlay.borrow_mut().close();
                apply_close();
            }
        }));
    }

    // park the items hidden so the first open staggers from scratch
    for item in &items {
        dom::set_style(item, &item_style(false, 0.0));
    }
    dom::set_style(&overlay_el, "display:none");

    // stepper: runs for the page's lifetime, torn down with the handles
    let document = document.clone();
    let frames = frame::start_loop(move |_elapsed, dt| {
        let mut o = overlay.borrow_mut();
        if o.step(dt) && o.phase() == OverlayPhase::Closed {
            dom::set_style(&overlay_el, "display:none");
            dom::set_body_scroll_lock(&document, false);
        }
    });

    Some(MenuHandles {
        _frames: frames,
        _listeners: listeners,
    })
}
