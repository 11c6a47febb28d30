#![cfg(target_arch = "wasm32")]

mod constants;
mod dom;
mod events;
mod frame;
mod menu;
mod player;
mod preloader;
mod render;
mod reveal;
mod scene;
mod sparkles;

use crate::constants::{AUDIO_TOGGLE_ID, MAIN_CONTENT_ID};
use crate::dom::ListenerHandle;
use site_core::input::InputSnapshot;
use site_core::scene::QualityTier;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Everything the page keeps alive after init. Dropping this tears down
/// every frame loop, listener and GPU resource the components own.
struct Page {
    _input_listeners: Vec<ListenerHandle>,
    _menu: Option<menu::MenuHandles>,
    _reveal: Rc<RefCell<reveal::RevealHandles>>,
    _scene: Rc<RefCell<Option<scene::SceneHandle>>>,
    _post_load: Rc<RefCell<Vec<ListenerHandle>>>,
    _player: player::PlayerController,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("site-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // quality decisions are locked in at mount time and are not revisited
    // when the viewport later crosses the breakpoint
    let tier = QualityTier::select(dom::viewport_width());
    log::info!("quality tier: {:?}", tier);

    let input = Rc::new(RefCell::new(InputSnapshot::default()));
    let input_listeners = events::wire_global_input(input.clone());

    let controller = player::install(&document)?;
    reveal::prepare_hero(&document);
    let menu_handles = menu::mount(&document);

    let reveal_handles = Rc::new(RefCell::new(reveal::RevealHandles::default()));
    let scene_slot: Rc<RefCell<Option<scene::SceneHandle>>> = Rc::new(RefCell::new(None));
    let post_load: Rc<RefCell<Vec<ListenerHandle>>> = Rc::new(RefCell::new(Vec::new()));

    // the loader gates everything below; its completion callback unveils the
    // content, starts the backdrop and kicks off audio
    let on_complete = {
        let document = document.clone();
        let controller = controller.clone();
        let input = input.clone();
        let reveal_handles = reveal_handles.clone();
        let scene_slot = scene_slot.clone();
        let post_load = post_load.clone();
        move || {
            if let Some(main) = dom::element(&document, MAIN_CONTENT_ID) {
                dom::set_style(&main, "opacity:1;transition:opacity 0.8s ease-in-out");
            }
            {
                let mut handles = reveal_handles.borrow_mut();
                reveal::reveal_hero(&document, &mut handles);
                reveal::wire_sections(&document, &mut handles);
                reveal::wire_scramble(&document, &mut handles);
            }
            {
                let document = document.clone();
                let input = input.clone();
                let scene_slot = scene_slot.clone();
                spawn_local(async move {
                    let handle = scene::mount(&document, input, tier).await;
                    *scene_slot.borrow_mut() = Some(handle);
                });
            }
            controller.attempt_play();
            player::arm_unlock(&controller);
            if let Some(btn) = dom::element(&document, AUDIO_TOGGLE_ID) {
                dom::set_style(&btn, "display:flex");
                let controller = controller.clone();
                post_load.borrow_mut().push(ListenerHandle::new(
                    btn.as_ref(),
                    "click",
                    move |_ev| controller.toggle(),
                ));
            }
            log::info!("loading complete; entrance sequence started");
        }
    };
    preloader::mount(&document, tier, on_complete);

    PAGE.with(|page| {
        *page.borrow_mut() = Some(Page {
            _input_listeners: input_listeners,
            _menu: menu_handles,
            _reveal: reveal_handles,
            _scene: scene_slot,
            _post_load: post_load,
            _player: controller,
        });
    });
    Ok(())
}
