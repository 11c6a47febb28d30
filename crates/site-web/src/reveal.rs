use crate::constants::*;
use crate::dom::{self, ListenerHandle};
use crate::frame::{self, IntervalHandle};
use site_core::constants::{
    HERO_CHAR_REVEAL_SEC, SCRAMBLE_TICK_MS, SECTION_REVEAL_SEC, SECTION_STAGGER_SEC,
};
use site_core::reveal::{
    char_delay, char_hidden, char_hover, child_delay, CharTransform, RevealRegistry, Scramble,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Listeners and the section observer, dismantled together on drop.
pub struct RevealHandles {
    listeners: Vec<ListenerHandle>,
    observer: Option<web::IntersectionObserver>,
    _observer_cb: Option<Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>>,
}

impl Default for RevealHandles {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            observer: None,
            _observer_cb: None,
        }
    }
}

impl Drop for RevealHandles {
    fn drop(&mut self) {
        if let Some(obs) = &self.observer {
            obs.disconnect();
        }
    }
}

fn char_style(t: &CharTransform, delay_sec: f32) -> String {
    format!(
        "display:inline-block;white-space:pre;opacity:{};\
         transform:translateY({}px) rotate({}deg) scale({});filter:blur({}px);\
         transition:all {HERO_CHAR_REVEAL_SEC}s cubic-bezier(0.22,1,0.36,1);\
         transition-delay:{delay_sec}s",
        t.opacity, t.y_offset_px, t.rotation_deg, t.scale, t.blur_px
    )
}

/// Split the hero heading into per-character spans, parked in their hidden
/// state. Runs while the loader still covers the page.
pub fn prepare_hero(document: &web::Document) {
    let Some(el) = dom::element(document, HERO_TITLE_ID) else {
        return;
    };
    let text = el.text_content().unwrap_or_default();
    el.set_text_content(Some(""));
    for (i, ch) in text.chars().enumerate() {
        if let Ok(span) = document.create_element("span") {
            span.set_text_content(Some(&ch.to_string()));
            let _ = span.set_attribute("class", HERO_CHAR_CLASS);
            dom::set_style(&span, &char_style(&char_hidden(), char_delay(i)));
            let _ = el.append_child(&span);
        }
    }
}

/// Release the hero characters into their entrance and wire the per-char
/// hover response.
pub fn reveal_hero(document: &web::Document, handles: &mut RevealHandles) {
    let Ok(spans) = document.query_selector_all(&format!(".{HERO_CHAR_CLASS}")) else {
        return;
    };
    for i in 0..spans.length() {
        let Some(el) = spans.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let delay = char_delay(i as usize);
        dom::set_style(&el, &char_style(&visible_char(), delay));

        // hover swaps the transition delay out so the response is immediate
        let el_enter = el.clone();
        handles.listeners.push(ListenerHandle::new(
            el.as_ref(),
            "mouseenter",
            move |_ev| {
                let style = format!(
                    "{};color:{HERO_HOVER_COLOR}",
                    char_style(&char_hover(), 0.0)
                );
                dom::set_style(&el_enter, &style);
            },
        ));
        let el_leave = el.clone();
        handles.listeners.push(ListenerHandle::new(
            el.as_ref(),
            "mouseleave",
            move |_ev| {
                dom::set_style(&el_leave, &char_style(&visible_char(), 0.0));
            },
        ));
    }
}

pub(crate) fn visible_char() -> CharTransform {
    CharTransform {
        y_offset_px: 0.0,
        rotation_deg: 0.0,
        blur_px: 0.0,
        opacity: 1.0,
        scale: 1.0,
    }
}

fn section_hidden_style() -> String {
    format!(
        "opacity:0;transform:translateY(30px);\
         transition:all {SECTION_REVEAL_SEC}s ease-out"
    )
}

fn section_visible_style(delay_sec: f32) -> String {
    format!(
        "opacity:1;transform:translateY(0);\
         transition:all {SECTION_REVEAL_SEC}s ease-out;transition-delay:{delay_sec}s"
    )
}

/// Observe every `.reveal-section`: the first time one scrolls into view its
/// children stagger in, then the section is dropped from observation. A
/// section never replays.
pub fn wire_sections(document: &web::Document, handles: &mut RevealHandles) {
    let Ok(sections) = document.query_selector_all(SECTION_SELECTOR) else {
        return;
    };

    let registry = Rc::new(RefCell::new(RevealRegistry::new()));
    let cb = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if !registry.borrow_mut().should_reveal(&target.id()) {
                    continue;
                }
                dom::set_style(&target, &section_visible_style(0.0));
                if let Ok(items) = target.query_selector_all(ITEM_SELECTOR) {
                    for i in 0..items.length() {
                        if let Some(item) =
                            items.get(i).and_then(|n| n.dyn_into::<web::Element>().ok())
                        {
                            let delay = child_delay(0.0, SECTION_STAGGER_SEC, i as usize);
                            dom::set_style(&item, &section_visible_style(delay));
                        }
                    }
                }
                observer.unobserve(&target);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let observer = match web::IntersectionObserver::new(cb.as_ref().unchecked_ref()) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
            return;
        }
    };
    for i in 0..sections.length() {
        if let Some(el) = sections.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            dom::set_style(&el, &section_hidden_style());
            if let Ok(items) = el.query_selector_all(ITEM_SELECTOR) {
                for j in 0..items.length() {
                    if let Some(item) =
                        items.get(j).and_then(|n| n.dyn_into::<web::Element>().ok())
                    {
                        dom::set_style(&item, &section_hidden_style());
                    }
                }
            }
            observer.observe(&el);
        }
    }
    handles.observer = Some(observer);
    handles._observer_cb = Some(cb);
}

/// Hover scramble for `.hypertext` elements: each hover restarts the
/// resolve-left-to-right cycle; the element's interval stops itself when
/// the text settles.
pub fn wire_scramble(document: &web::Document, handles: &mut RevealHandles) {
    let Ok(nodes) = document.query_selector_all(SCRAMBLE_SELECTOR) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let target_text = el.text_content().unwrap_or_default();
        if target_text.is_empty() {
            continue;
        }
        let slot: Rc<RefCell<Option<IntervalHandle>>> = Rc::new(RefCell::new(None));
        let el_tick = el.clone();
        handles.listeners.push(ListenerHandle::new(
            el.as_ref(),
            "mouseenter",
            move |_ev| {
                let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
                let scramble = Rc::new(RefCell::new(Scramble::new(&target_text, seed)));
                let el = el_tick.clone();
                let slot_inner = slot.clone();
                let interval = frame::set_interval(SCRAMBLE_TICK_MS, move || {
                    let mut s = scramble.borrow_mut();
                    el.set_text_content(Some(&s.step()));
                    if s.done() {
                        // safe: cancel only clears the timer id
                        if let Some(h) = slot_inner.borrow().as_ref() {
                            h.cancel();
                        }
                    }
                });
                // replacing a previous run's handle also stops it
                *slot.borrow_mut() = interval;
            },
        ));
    }
}
