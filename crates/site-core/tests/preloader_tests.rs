// Host-side tests for the loading sequencer state machine.

use rand::prelude::*;
use site_core::constants::*;
use site_core::preloader::{status_label, LoadPhase, LoadSequencer};

#[test]
fn progress_is_bounded_and_non_decreasing() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut seq = LoadSequencer::new();
    let mut prev = seq.progress();
    for _ in 0..500 {
        let jump = rng.gen_range(1..=LOADER_INCREMENT_MAX);
        seq.advance(jump);
        let p = seq.progress();
        assert!(p <= 100, "progress overshot: {p}");
        assert!(p >= prev, "progress decreased: {prev} -> {p}");
        prev = p;
    }
    assert_eq!(seq.progress(), 100);
    assert_eq!(seq.phase(), LoadPhase::Complete);
}

#[test]
fn completion_fires_exactly_once_and_only_at_100() {
    let mut seq = LoadSequencer::new();
    assert!(!seq.take_completion(), "completion before any progress");

    seq.advance(99);
    assert_eq!(seq.progress(), 99);
    assert_eq!(seq.phase(), LoadPhase::Running);
    assert!(!seq.take_completion(), "completion below 100");

    seq.advance(5); // clamps to exactly 100
    assert_eq!(seq.progress(), 100);
    assert!(seq.take_completion(), "first take after completion");
    assert!(!seq.take_completion(), "second take must be refused");
}

#[test]
fn ticks_after_completion_are_no_ops() {
    let mut seq = LoadSequencer::new();
    seq.advance(100);
    assert_eq!(seq.phase(), LoadPhase::Complete);
    for _ in 0..10 {
        seq.advance(5);
        assert_eq!(seq.progress(), 100);
    }
}

#[test]
fn status_labels_follow_inclusive_thresholds() {
    // Boundary values resolve to the higher label.
    let cases: [(u8, &str); 11] = [
        (0, LABEL_INITIALIZING),
        (29, LABEL_INITIALIZING),
        (30, LABEL_LOADING_ASSETS),
        (45, LABEL_LOADING_ASSETS),
        (59, LABEL_LOADING_ASSETS),
        (60, LABEL_UPLINK),
        (75, LABEL_UPLINK),
        (89, LABEL_UPLINK),
        (90, LABEL_READY),
        (95, LABEL_READY),
        (100, LABEL_READY),
    ];
    for (progress, expected) in cases {
        assert_eq!(
            status_label(progress),
            expected,
            "wrong label at progress {progress}"
        );
    }
}

#[test]
fn labels_never_regress_as_progress_rises() {
    let rank = |label: &str| match label {
        LABEL_INITIALIZING => 0,
        LABEL_LOADING_ASSETS => 1,
        LABEL_UPLINK => 2,
        LABEL_READY => 3,
        other => panic!("unexpected label {other}"),
    };
    let mut prev = 0;
    for p in 0..=100u8 {
        let r = rank(status_label(p));
        assert!(r >= prev, "label regressed at progress {p}");
        prev = r;
    }
}
