//! Embedded media player wiring (YouTube IFrame API).
//!
//! The API script is loaded from its remote host; once its global ready hook
//! fires, a hidden player is constructed and the controller mirrors the
//! player's own state-change notifications. Playback state is never inferred
//! locally. A failed script load is deliberately unhandled: playback simply
//! never starts.

use crate::constants::{AUDIO_TOGGLE_ID, PLAYER_MOUNT_ID};
use crate::dom::ListenerHandle;
use crate::frame;
use site_core::audio::{toggle_action, PlayerStatus, ToggleAction, UnlockLatch};
use site_core::{PLAYER_START_SEC, PLAYER_VIDEO_ID, PLAYER_VOLUME};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    type YtPlayer;

    #[wasm_bindgen(constructor, js_namespace = YT, js_class = "Player")]
    fn new(element_id: &str, options: &JsValue) -> YtPlayer;

    // autoplay may be blocked by platform policy; the call must be caught
    #[wasm_bindgen(method, catch, js_name = playVideo)]
    fn play_video(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = pauseVideo)]
    fn pause_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = getPlayerState)]
    fn get_player_state(this: &YtPlayer) -> i32;

    #[wasm_bindgen(method, js_name = setVolume)]
    fn set_volume(this: &YtPlayer, volume: i32);
}

const API_SRC: &str = "https://www.youtube.com/iframe_api";
const READY_HOOK: &str = "onYouTubeIframeAPIReady";

struct PlayerShared {
    player: Option<YtPlayer>,
    status: Option<PlayerStatus>,
    _on_ready: Option<Closure<dyn FnMut(JsValue)>>,
    _on_state: Option<Closure<dyn FnMut(JsValue)>>,
}

#[derive(Clone)]
pub struct PlayerController {
    shared: Rc<RefCell<PlayerShared>>,
}

fn set_prop(obj: &js_sys::Object, key: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), value);
}

fn player_options(
    on_ready: &Closure<dyn FnMut(JsValue)>,
    on_state: &Closure<dyn FnMut(JsValue)>,
) -> JsValue {
    let vars = js_sys::Object::new();
    set_prop(&vars, "playsinline", &1.into());
    set_prop(&vars, "controls", &0.into());
    set_prop(&vars, "start", &PLAYER_START_SEC.into());
    set_prop(&vars, "loop", &1.into());
    // looping a single video requires it to double as the playlist
    set_prop(&vars, "playlist", &PLAYER_VIDEO_ID.into());

    let events = js_sys::Object::new();
    set_prop(&events, "onReady", on_ready.as_ref());
    set_prop(&events, "onStateChange", on_state.as_ref());

    let options = js_sys::Object::new();
    set_prop(&options, "height", &"0".into());
    set_prop(&options, "width", &"0".into());
    set_prop(&options, "videoId", &PLAYER_VIDEO_ID.into());
    set_prop(&options, "playerVars", &vars);
    set_prop(&options, "events", &events);
    options.into()
}

/// Inject the remote API script and arrange for the hidden player to be
/// constructed once the API announces itself.
pub fn install(document: &web::Document) -> anyhow::Result<PlayerController> {
    let shared = Rc::new(RefCell::new(PlayerShared {
        player: None,
        status: None,
        _on_ready: None,
        _on_state: None,
    }));
    let controller = PlayerController {
        shared: shared.clone(),
    };

    // event closures live as long as the player does
    {
        let shared_ready = shared.clone();
        let on_ready = Closure::wrap(Box::new(move |ev: JsValue| {
            if let Ok(target) = js_sys::Reflect::get(&ev, &JsValue::from_str("target")) {
                let player: YtPlayer = target.unchecked_into();
                player.set_volume(PLAYER_VOLUME);
                // keep this instance too; the ready event hands us the same
                // player the constructor returned
                shared_ready.borrow_mut().player.get_or_insert(player);
            }
            log::info!("embedded player ready");
        }) as Box<dyn FnMut(JsValue)>);

        let shared_state = shared.clone();
        let on_state = Closure::wrap(Box::new(move |ev: JsValue| {
            let code = js_sys::Reflect::get(&ev, &JsValue::from_str("data"))
                .ok()
                .and_then(|v| v.as_f64())
                .map(|v| v as i32);
            let status = code.and_then(PlayerStatus::from_code);
            shared_state.borrow_mut().status = status;
            update_toggle_button(status);
        }) as Box<dyn FnMut(JsValue)>);

        let mut s = shared.borrow_mut();
        s._on_ready = Some(on_ready);
        s._on_state = Some(on_state);
    }

    // global hook the API script calls when it has finished loading
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let shared_hook = shared.clone();
    let hook = Closure::once_into_js(move || {
        let mut s = shared_hook.borrow_mut();
        let options = match (&s._on_ready, &s._on_state) {
            (Some(r), Some(st)) => player_options(r, st),
            _ => return,
        };
        s.player = Some(YtPlayer::new(PLAYER_MOUNT_ID, &options));
    });
    js_sys::Reflect::set(&window, &JsValue::from_str(READY_HOOK), &hook)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // load the API script the way it documents: before the first script tag
    let tag: web::HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("script element cast failed"))?;
    tag.set_src(API_SRC);
    let scripts = document.get_elements_by_tag_name("script");
    match scripts.item(0).and_then(|first| first.parent_node().map(|p| (p, first))) {
        Some((parent, first)) => {
            let first_node: &web::Node = first.as_ref();
            let _ = parent.insert_before(&tag, Some(first_node));
        }
        None => {
            if let Some(head) = document.head() {
                let _ = head.append_child(&tag);
            }
        }
    }

    Ok(controller)
}

fn update_toggle_button(status: Option<PlayerStatus>) {
    if let Some(document) = crate::dom::window_document() {
        if let Some(btn) = document.get_element_by_id(AUDIO_TOGGLE_ID) {
            let playing = status.map(PlayerStatus::is_playing).unwrap_or(false);
            let list = btn.class_list();
            if playing {
                let _ = list.add_1("playing");
            } else {
                let _ = list.remove_1("playing");
            }
        }
    }
}

impl PlayerController {
    /// Try to start playback; blocked autoplay is logged and otherwise
    /// ignored (the unlock chain retries on the next interaction).
    pub fn attempt_play(&self) {
        if let Some(player) = &self.shared.borrow().player {
            if let Err(e) = player.play_video() {
                log::warn!("play attempt failed: {:?}", e);
            }
        }
    }

    /// Flip between playing and paused based on the player's own report.
    pub fn toggle(&self) {
        let shared = self.shared.borrow();
        let Some(player) = &shared.player else {
            return;
        };
        let status = PlayerStatus::from_code(player.get_player_state());
        match toggle_action(status) {
            ToggleAction::Pause => player.pause_video(),
            ToggleAction::Play => {
                if let Err(e) = player.play_video() {
                    log::warn!("play attempt failed: {:?}", e);
                }
            }
        }
    }
}

/// Arm the one-shot autoplay fallback: the first click, key press, touch or
/// scroll anywhere re-attempts playback and dismantles the whole listener
/// chain. Only one chain is ever active.
pub fn arm_unlock(controller: &PlayerController) {
    let Some(window) = web::window() else {
        return;
    };
    let latch = Rc::new(RefCell::new(UnlockLatch::new()));
    let handles: Rc<RefCell<Vec<ListenerHandle>>> = Rc::new(RefCell::new(Vec::new()));

    let target: &web::EventTarget = window.as_ref();
    for event in ["click", "keydown", "touchstart", "scroll"] {
        let latch = latch.clone();
        let handles_fire = handles.clone();
        let controller = controller.clone();
        handles.borrow_mut().push(ListenerHandle::new(
            target,
            event,
            move |_ev| {
                if latch.borrow_mut().try_fire() {
                    controller.attempt_play();
                    // listeners cannot be dropped from inside their own
                    // dispatch; the cleanup runs on the next timer turn
                    let handles_drop = handles_fire.clone();
                    frame::set_timeout_once(0, move || {
                        handles_drop.borrow_mut().clear();
                    });
                }
            },
        ));
    }
}
