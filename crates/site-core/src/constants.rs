use glam::Vec3;

// Shared tuning constants used by the loader, reveal and scene subsystems.

// Loading sequencer
pub const LOADER_TICK_MS: i32 = 50; // progress tick period
pub const LOADER_INCREMENT_MAX: u8 = 5; // random jump in 1..=5 per tick
pub const LOADER_SETTLE_MS: i32 = 800; // "READY" stays visible before handoff

pub const LABEL_INITIALIZING: &str = "INITIALIZING";
pub const LABEL_LOADING_ASSETS: &str = "LOADING ASSETS";
pub const LABEL_UPLINK: &str = "ESTABLISHING UPLINK";
pub const LABEL_READY: &str = "READY";

// Status thresholds are inclusive: progress == threshold takes the higher label
pub const THRESHOLD_LOADING_ASSETS: u8 = 30;
pub const THRESHOLD_UPLINK: u8 = 60;
pub const THRESHOLD_READY: u8 = 90;

// Particle field
pub const FIELD_DENSITY: f32 = 40.0;
pub const FIELD_AREA_NORM: f32 = 10_000.0; // particle count = density * area / norm
pub const FIELD_MIN_RADIUS: f32 = 0.6;
pub const FIELD_MAX_RADIUS: f32 = 1.4;
pub const FIELD_MAX_DRIFT: f32 = 0.25; // px per frame on each axis
pub const FIELD_FADE_STEP: f32 = 0.01; // opacity step per frame

// Scene layout and motion
pub const MOBILE_BREAKPOINT_PX: u32 = 768;
pub const CAMERA_Z: f32 = 8.0;
pub const BOB_AMPLITUDE: f32 = 0.35;
pub const POSITION_SMOOTHING: f32 = 0.05; // exponential blend per frame, never 1.0
pub const POINTER_PARALLAX: f32 = 0.22; // world units per NDC unit, scaled by index
pub const SCROLL_PARALLAX: f32 = 0.0012; // world units per scroll px

// Base per-axis rotation rates (rad/s) plus a per-object offset so the
// roster desynchronizes instead of tumbling in lockstep.
pub const ROT_RATE_X: f32 = 0.18;
pub const ROT_RATE_Y: f32 = 0.26;
pub const ROT_RATE_Z: f32 = 0.11;
pub const ROT_RATE_INDEX_OFFSET: f32 = 0.07;

// Kind-specific motion
pub const RING_SPIN_INNER: f32 = 0.9; // rad/s
pub const RING_SPIN_MID: f32 = 0.6;
pub const HEAD_YAW_RATE: f32 = 0.8;
pub const HEAD_YAW_AMPLITUDE: f32 = 0.45;
pub const HALO_SPIN_RATE: f32 = 1.2;
pub const HALO_WOBBLE_RATE: f32 = 0.7;
pub const HALO_WOBBLE_AMPLITUDE: f32 = 0.25;

// Starfield
pub const STARFIELD_EXTENT: f32 = 24.0; // cubic volume half-extent
pub const STARFIELD_COUNT_FULL: usize = 900;
pub const STARFIELD_COUNT_LITE: usize = 300;
pub const STARFIELD_ROT_RATE: f32 = 0.02; // rad/s about +Y
pub const STARFIELD_SCROLL_PARALLAX: f32 = 0.0018;
pub const STAR_MIN_SIZE: f32 = 0.03;
pub const STAR_MAX_SIZE: f32 = 0.10;

// Entrance orchestration
pub const SECTION_STAGGER_SEC: f32 = 0.2;
pub const SECTION_REVEAL_SEC: f32 = 0.6;
pub const HERO_CHAR_STAGGER_SEC: f32 = 0.035;
pub const HERO_CHAR_REVEAL_SEC: f32 = 0.7;
pub const HERO_CHAR_RISE_PX: f32 = 36.0;
pub const HERO_CHAR_TILT_DEG: f32 = 12.0;
pub const HERO_CHAR_BLUR_PX: f32 = 8.0;
pub const HERO_HOVER_SCALE: f32 = 1.15;

// Menu overlay
pub const MENU_ITEM_STAGGER_SEC: f32 = 0.08;
pub const MENU_ITEM_DURATION_SEC: f32 = 0.3;

// Hover scramble
pub const SCRAMBLE_TICK_MS: i32 = 30;
pub const SCRAMBLE_STEP: f32 = 1.0 / 3.0; // resolved characters advance per tick

// Embedded player
pub const PLAYER_VIDEO_ID: &str = "fYD7YsSRHOY";
pub const PLAYER_START_SEC: u32 = 40;
pub const PLAYER_VOLUME: i32 = 50;

#[inline]
pub fn camera_eye() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_Z)
}
