// Host-side tests for stagger math, the hero character reveal, fire-once
// tracking, the hover scramble and the menu overlay lifecycle.

use site_core::constants::*;
use site_core::menu::{MenuOverlay, OverlayPhase};
use site_core::reveal::*;

#[test]
fn stagger_delays_grow_linearly_with_index() {
    for i in 0..12 {
        let d = child_delay(0.1, SECTION_STAGGER_SEC, i);
        assert!((d - (0.1 + SECTION_STAGGER_SEC * i as f32)).abs() < 1e-6);
    }
    assert!(char_delay(0) < char_delay(1));
    assert!(char_delay(5) < char_delay(20));
}

#[test]
fn char_entrance_interpolates_hidden_to_identity() {
    let start = char_entrance(0.0);
    assert_eq!(start, char_hidden());

    let end = char_entrance(1.0);
    assert_eq!(end.y_offset_px, 0.0);
    assert_eq!(end.rotation_deg, 0.0);
    assert_eq!(end.blur_px, 0.0);
    assert_eq!(end.opacity, 1.0);

    // progress beyond the ends is clamped
    assert_eq!(char_entrance(-1.0), start);
    assert_eq!(char_entrance(2.0), end);

    // opacity rises and offset falls monotonically
    let mut prev = start;
    for step in 1..=20 {
        let t = step as f32 / 20.0;
        let c = char_entrance(t);
        assert!(c.opacity >= prev.opacity);
        assert!(c.y_offset_px <= prev.y_offset_px);
        assert!(c.blur_px <= prev.blur_px);
        prev = c;
    }
}

#[test]
fn hover_state_only_scales() {
    let h = char_hover();
    assert_eq!(h.opacity, 1.0);
    assert_eq!(h.y_offset_px, 0.0);
    assert!(h.scale > 1.0);
}

#[test]
fn reveal_registry_fires_once_per_key() {
    let mut reg = RevealRegistry::new();
    assert!(reg.should_reveal("portfolio"));
    assert!(!reg.should_reveal("portfolio"), "sections never replay");
    assert!(reg.should_reveal("expertise"));
    assert!(!reg.should_reveal("portfolio"));
    assert_eq!(reg.revealed_count(), 2);
}

#[test]
fn scramble_resolves_left_to_right_and_terminates() {
    let target = "NETWORKING";
    let mut s = Scramble::new(target, 5);
    let mut steps = 0usize;
    while !s.done() {
        // characters left of the iteration front are guaranteed resolved
        let front = steps as f32 * SCRAMBLE_STEP;
        let guaranteed = (0..target.len()).take_while(|&i| (i as f32) < front).count();
        let text = s.step();
        assert_eq!(text.chars().count(), target.chars().count());
        let prefix = text
            .chars()
            .zip(target.chars())
            .take_while(|(a, b)| a == b)
            .count();
        assert!(
            prefix >= guaranteed,
            "step {steps}: prefix {prefix} behind the front ({guaranteed})"
        );
        steps += 1;
        assert!(steps < 1_000, "scramble failed to terminate");
    }
    assert_eq!(s.step(), target, "finished scramble settles on the target");
}

#[test]
fn menu_overlay_locks_scroll_for_its_whole_lifetime() {
    let mut menu = MenuOverlay::new(4);
    assert_eq!(menu.phase(), OverlayPhase::Closed);
    assert!(!menu.scroll_locked());

    menu.open();
    assert_eq!(menu.phase(), OverlayPhase::Opening);
    assert!(menu.scroll_locked(), "locked as soon as it starts opening");

    // run to fully open
    while menu.phase() == OverlayPhase::Opening {
        menu.step(1.0 / 60.0);
    }
    assert_eq!(menu.phase(), OverlayPhase::Open);
    assert!(menu.scroll_locked());

    menu.close();
    assert!(menu.scroll_locked(), "still locked while closing");
    while menu.phase() == OverlayPhase::Closing {
        menu.step(1.0 / 60.0);
    }
    assert_eq!(menu.phase(), OverlayPhase::Closed);
    assert!(!menu.scroll_locked(), "unlocked once fully removed");
}

#[test]
fn menu_children_enter_in_order_and_exit_reversed() {
    let mut menu = MenuOverlay::new(4);
    menu.open();
    assert!(menu.item_enter_delay(0) < menu.item_enter_delay(3));

    // midway through opening, the first child is ahead of the last
    menu.step(menu.travel_total() * 0.5);
    assert!(
        menu.item_progress(0) > menu.item_progress(3),
        "first child must animate in before the last"
    );

    // only once the last child lands is the overlay Open
    assert_eq!(menu.phase(), OverlayPhase::Opening);
    menu.step(menu.travel_total());
    assert_eq!(menu.phase(), OverlayPhase::Open);
    assert_eq!(menu.item_progress(3), 1.0);

    menu.close();
    // exit order is reversed: the last child leaves first
    assert!(menu.item_exit_delay(3) < menu.item_exit_delay(0));
    menu.step(menu.travel_total() * 0.5);
    assert!(
        menu.item_progress(3) > menu.item_progress(0),
        "last child must animate out before the first"
    );
}

#[test]
fn menu_open_close_are_idempotent_per_phase() {
    let mut menu = MenuOverlay::new(3);
    menu.close(); // closing a closed overlay does nothing
    assert_eq!(menu.phase(), OverlayPhase::Closed);
    menu.open();
    menu.open(); // reopening mid-open does not restart the stagger
    menu.step(menu.travel_total() * 0.5);
    assert_eq!(menu.phase(), OverlayPhase::Opening);
    // closing mid-open is allowed
    menu.close();
    assert_eq!(menu.phase(), OverlayPhase::Closing);
}
