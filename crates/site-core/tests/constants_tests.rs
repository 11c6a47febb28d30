// Host-side tests for constants and their relationships.

use site_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn loader_constants_are_sane() {
    assert!(LOADER_TICK_MS > 0);
    assert!(LOADER_SETTLE_MS > 0);
    assert!(LOADER_INCREMENT_MAX >= 1);

    // thresholds are strictly ordered and inside the progress range
    assert!(THRESHOLD_LOADING_ASSETS < THRESHOLD_UPLINK);
    assert!(THRESHOLD_UPLINK < THRESHOLD_READY);
    assert!(THRESHOLD_READY < 100);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn field_constants_are_sane() {
    assert!(FIELD_DENSITY > 0.0);
    assert!(FIELD_AREA_NORM > 0.0);
    assert!(FIELD_MIN_RADIUS > 0.0);
    assert!(FIELD_MAX_RADIUS > FIELD_MIN_RADIUS);
    assert!(FIELD_MAX_DRIFT > 0.0);
    // a fade step of 1.0 would skip every intermediate opacity
    assert!(FIELD_FADE_STEP > 0.0 && FIELD_FADE_STEP < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_constants_are_sane() {
    assert!(MOBILE_BREAKPOINT_PX > 0);
    assert!(CAMERA_Z > 0.0);
    assert!(BOB_AMPLITUDE > 0.0);
    // exponential blend must lag, never teleport
    assert!(POSITION_SMOOTHING > 0.0 && POSITION_SMOOTHING < 1.0);
    assert!(ROT_RATE_INDEX_OFFSET > 0.0);
    assert!(STARFIELD_COUNT_LITE < STARFIELD_COUNT_FULL);
    assert!(STAR_MIN_SIZE < STAR_MAX_SIZE);
    assert!(STARFIELD_EXTENT > CAMERA_Z, "stars must surround the camera");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn stagger_constants_are_sane() {
    assert!(SECTION_STAGGER_SEC > 0.0);
    assert!(HERO_CHAR_STAGGER_SEC > 0.0);
    assert!(HERO_CHAR_STAGGER_SEC < SECTION_STAGGER_SEC);
    assert!(MENU_ITEM_STAGGER_SEC > 0.0);
    assert!(MENU_ITEM_DURATION_SEC > MENU_ITEM_STAGGER_SEC);
    assert!(HERO_HOVER_SCALE > 1.0);
    assert!(SCRAMBLE_STEP > 0.0 && SCRAMBLE_STEP <= 1.0);
}
