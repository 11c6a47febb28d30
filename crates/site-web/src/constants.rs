// Element ids and selectors the front-end binds to in web/index.html,
// plus web-side seeds for the deterministic generators.

pub const LOADER_ROOT_ID: &str = "loader";
pub const LOADER_CANVAS_ID: &str = "loader-canvas";
pub const LOADER_COUNT_ID: &str = "loader-count";
pub const LOADER_STATUS_ID: &str = "loader-status";
pub const LOADER_BAR_ID: &str = "loader-bar";

pub const SCENE_CANVAS_ID: &str = "scene-canvas";
pub const MAIN_CONTENT_ID: &str = "main-content";
pub const HERO_TITLE_ID: &str = "hero-title";

pub const MENU_TOGGLE_ID: &str = "menu-toggle";
pub const MENU_OVERLAY_ID: &str = "menu-overlay";
pub const MENU_ITEM_SELECTOR: &str = ".menu-item";

pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const PLAYER_MOUNT_ID: &str = "yt-audio-player";

pub const HERO_HOVER_COLOR: &str = "#7dd3fc";

pub const SECTION_SELECTOR: &str = ".reveal-section";
pub const ITEM_SELECTOR: &str = ".reveal-item";
pub const SCRAMBLE_SELECTOR: &str = ".hypertext";
pub const HERO_CHAR_CLASS: &str = "hero-char";

pub const SPARKLE_SEED: u64 = 0x5eed_0001;
pub const STARFIELD_SEED: u64 = 0x5eed_0002;
