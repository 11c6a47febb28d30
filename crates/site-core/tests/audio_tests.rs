// Host-side tests for the audio controller decisions.

use site_core::audio::{toggle_action, PlayerStatus, ToggleAction, UnlockLatch};

#[test]
fn state_codes_map_to_reported_statuses() {
    assert_eq!(PlayerStatus::from_code(-1), Some(PlayerStatus::Unstarted));
    assert_eq!(PlayerStatus::from_code(0), Some(PlayerStatus::Ended));
    assert_eq!(PlayerStatus::from_code(1), Some(PlayerStatus::Playing));
    assert_eq!(PlayerStatus::from_code(2), Some(PlayerStatus::Paused));
    assert_eq!(PlayerStatus::from_code(3), Some(PlayerStatus::Buffering));
    assert_eq!(PlayerStatus::from_code(5), Some(PlayerStatus::Cued));
    // unknown codes are not guessed at
    assert_eq!(PlayerStatus::from_code(4), None);
    assert_eq!(PlayerStatus::from_code(42), None);
}

#[test]
fn toggle_pauses_only_a_playing_player() {
    assert_eq!(
        toggle_action(Some(PlayerStatus::Playing)),
        ToggleAction::Pause
    );
    for status in [
        PlayerStatus::Unstarted,
        PlayerStatus::Ended,
        PlayerStatus::Paused,
        PlayerStatus::Buffering,
        PlayerStatus::Cued,
    ] {
        assert_eq!(
            toggle_action(Some(status)),
            ToggleAction::Play,
            "{status:?} should map to a play attempt"
        );
    }
    // no report yet -> try to play
    assert_eq!(toggle_action(None), ToggleAction::Play);
}

#[test]
fn unlock_latch_fires_exactly_once() {
    let mut latch = UnlockLatch::new();
    assert!(!latch.spent());
    assert!(latch.try_fire(), "first interaction unlocks");
    assert!(latch.spent());
    for _ in 0..5 {
        assert!(!latch.try_fire(), "later interactions are ignored");
    }
}
