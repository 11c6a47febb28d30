// Host-side tests for the scene model: motion, part transforms, starfield,
// quality selection and resource accounting.

use glam::{Vec2, Vec4Swizzles};
use site_core::constants::*;
use site_core::input::InputSnapshot;
use site_core::ledger::{LedgerError, ResourceLedger};
use site_core::scene::*;

fn desc(kind: SceneObjectKind) -> &'static SceneObjectDesc {
    SCENE_OBJECTS
        .iter()
        .find(|d| d.kind == kind)
        .expect("roster covers every kind")
}

const DT: f32 = 1.0 / 60.0;

#[test]
fn statue_torso_stays_upright_across_frames() {
    let d = desc(SceneObjectKind::Statue);
    let mut motion = ObjectMotion::new(d);
    let input = InputSnapshot {
        pointer_ndc: Vec2::new(0.7, -0.4),
        scroll_y: 900.0,
    };
    for frame in 0..240 {
        let elapsed = frame as f32 * DT;
        update_object(d, 1, &mut motion, elapsed, DT, &input);
        assert_eq!(
            motion.rotation.x, 0.0,
            "statue X rotation must be cancelled every frame (frame {frame})"
        );
    }
    // the rest of the rotation still advances
    assert!(motion.rotation.y > 0.0);
    assert!(motion.rotation.z > 0.0);
}

#[test]
fn rendered_position_smooths_toward_target_without_jumping() {
    let d = desc(SceneObjectKind::Knot);
    let mut motion = ObjectMotion::new(d);
    // a large pointer swing far from the anchor
    let input = InputSnapshot {
        pointer_ndc: Vec2::new(1.0, 1.0),
        scroll_y: 2000.0,
    };
    // target at elapsed == 0: bob is zero, offsets fully applied
    let target = d.anchor
        + site_core::input::pointer_offset(input.pointer_ndc, 2)
        + site_core::input::scroll_offset(input.scroll_y);

    let before = motion.position;
    update_object(d, 2, &mut motion, 0.0, DT, &input);
    let moved = (motion.position - before).length();
    let full_gap = (target - before).length();

    // moved, but only by the blend fraction of the full gap
    assert!(moved > 0.0, "position must track the target");
    assert!(
        moved < full_gap * (POSITION_SMOOTHING * 1.5),
        "position jumped: moved {moved} of gap {full_gap}"
    );

    // repeated updates converge on a held target
    for _ in 1..400 {
        update_object(d, 2, &mut motion, 0.0, DT, &input);
    }
    let end_gap = (target - motion.position).length();
    assert!(
        end_gap < full_gap * 0.01,
        "smoothing failed to converge: {end_gap}"
    );
}

#[test]
fn objects_desynchronize_by_index() {
    let d = desc(SceneObjectKind::Crystal);
    let input = InputSnapshot::default();
    let mut a = ObjectMotion::new(d);
    let mut b = ObjectMotion::new(d);
    for frame in 0..120 {
        let elapsed = frame as f32 * DT;
        update_object(d, 0, &mut a, elapsed, DT, &input);
        update_object(d, 3, &mut b, elapsed, DT, &input);
    }
    assert!(
        (a.rotation.y - b.rotation.y).abs() > 1e-3,
        "same-rate rotations would tumble in lockstep"
    );
}

#[test]
fn gyroscope_rings_spin_independently_of_outer_rotation() {
    let d = desc(SceneObjectKind::Gyroscope);
    let mut motion = ObjectMotion::new(d);
    let input = InputSnapshot::default();
    for frame in 0..60 {
        update_object(d, 0, &mut motion, frame as f32 * DT, DT, &input);
    }
    match &motion.kind_state {
        KindState::Gyroscope { ring_spin } => {
            assert!(ring_spin[0] > 0.0);
            assert!(ring_spin[1] < 0.0, "mid ring spins the other way");
            assert!((ring_spin[0] - motion.rotation.y).abs() > 1e-3);
        }
        other => panic!("wrong kind state: {other:?}"),
    }
}

#[test]
fn part_lists_match_object_kind() {
    for d in &SCENE_OBJECTS {
        let motion = ObjectMotion::new(d);
        let parts = object_parts(d, &motion);
        match d.kind {
            SceneObjectKind::Gyroscope => assert_eq!(parts.len(), 3),
            SceneObjectKind::Statue => assert_eq!(parts.len(), 3),
            SceneObjectKind::Knot | SceneObjectKind::Crystal => assert_eq!(parts.len(), 1),
        }
        for (_, model) in &parts {
            let t = model.col(3).xyz();
            assert!(
                (t - motion.position).length() < 3.0,
                "part transform strayed from its object"
            );
        }
    }
}

#[test]
fn quality_tier_locks_to_the_breakpoint() {
    assert_eq!(QualityTier::select(MOBILE_BREAKPOINT_PX - 1), QualityTier::Lite);
    assert_eq!(QualityTier::select(MOBILE_BREAKPOINT_PX), QualityTier::Full);
    assert_eq!(QualityTier::select(2560), QualityTier::Full);
    assert!(QualityTier::Lite.wireframe_only());
    assert!(!QualityTier::Full.wireframe_only());
    assert!(QualityTier::Lite.starfield_count() < QualityTier::Full.starfield_count());
}

#[test]
fn starfield_scatters_inside_the_volume() {
    let stars = generate_starfield(500, STARFIELD_EXTENT, 1);
    assert_eq!(stars.len(), 500);
    for s in &stars {
        for c in s.position {
            assert!(c.abs() <= STARFIELD_EXTENT);
        }
        assert!(s.size >= STAR_MIN_SIZE && s.size <= STAR_MAX_SIZE);
    }
    // seeded generation is reproducible
    let again = generate_starfield(500, STARFIELD_EXTENT, 1);
    assert_eq!(stars[0].position, again[0].position);
}

#[test]
fn starfield_parallax_is_linear_in_scroll() {
    let a = starfield_transform(0.0, 500.0);
    let b = starfield_transform(0.0, 1000.0);
    let ya = a.col(3).y;
    let yb = b.col(3).y;
    assert!((yb - 2.0 * ya).abs() < 1e-5, "parallax must be linear");
    assert!((ya - 500.0 * STARFIELD_SCROLL_PARALLAX).abs() < 1e-5);
}

#[test]
fn ledger_drains_exactly_once_per_resource() {
    let mut ledger = ResourceLedger::new();
    let ids: Vec<_> = (0..8).map(|_| ledger.alloc("mesh buffer")).collect();
    assert_eq!(ledger.live_count(), 8);
    assert!(!ledger.is_drained());

    for id in &ids {
        ledger.dispose(*id).expect("first dispose succeeds");
    }
    assert!(ledger.is_drained());
    assert_eq!(ledger.disposed_count(), 8);

    // double-free is an error, not a silent no-op
    assert!(matches!(
        ledger.dispose(ids[0]),
        Err(LedgerError::DoubleDispose(_))
    ));
}
