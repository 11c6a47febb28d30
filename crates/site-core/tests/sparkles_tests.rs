// Host-side tests for the 2D particle field.

use site_core::sparkles::{particle_count, FieldParams, ParticleField};

fn make_field() -> ParticleField {
    ParticleField::new(400.0, 300.0, FieldParams::default(), 99)
}

#[test]
fn count_scales_with_area_and_density() {
    let params = FieldParams::default();
    let expected = ((params.density * 400.0 * 300.0) / 10_000.0) as usize;
    let field = make_field();
    assert_eq!(field.particles.len(), expected);
    assert_eq!(particle_count(400.0, 300.0, params.density), expected);

    // double the area, double the batch
    let big = ParticleField::new(800.0, 300.0, params, 99);
    assert_eq!(big.particles.len(), expected * 2);
}

#[test]
fn opacity_never_leaves_unit_interval() {
    let mut field = make_field();
    for _ in 0..2_000 {
        field.step();
        for p in &field.particles {
            assert!(
                (0.0..=1.0).contains(&p.opacity),
                "opacity out of range: {}",
                p.opacity
            );
        }
    }
}

#[test]
fn fading_out_relocates_before_fading_back_in() {
    let mut field = make_field();
    let (old_x, old_y) = {
        let p = &mut field.particles[0];
        p.opacity = 0.004; // below one fade step
        p.fade_dir = -1.0;
        p.vx = 0.0;
        p.vy = 0.0;
        (p.x, p.y)
    };
    field.step();
    let p = &field.particles[0];
    assert_eq!(p.fade_dir, 1.0, "must flip to fade-in at zero");
    assert!(
        p.x != old_x || p.y != old_y,
        "fully transparent particle must not park in place"
    );
    assert!(p.x >= 0.0 && p.x <= field.width());
    assert!(p.y >= 0.0 && p.y <= field.height());
}

#[test]
fn fully_opaque_flips_to_fade_out() {
    let mut field = make_field();
    {
        let p = &mut field.particles[0];
        p.opacity = 0.999;
        p.fade_dir = 1.0;
    }
    field.step();
    let p = &field.particles[0];
    assert_eq!(p.opacity, 1.0);
    assert_eq!(p.fade_dir, -1.0);
}

#[test]
fn positions_wrap_across_all_four_edges() {
    let mut field = make_field();
    let w = field.width();
    let h = field.height();

    // hold opacity steady so the relocate branch stays out of the way
    for p in &mut field.particles {
        p.opacity = 0.5;
        p.fade_dir = 1.0;
    }

    field.particles[0].x = w - 0.01;
    field.particles[0].vx = 0.2;
    field.particles[1].x = 0.01;
    field.particles[1].vx = -0.2;
    field.particles[2].y = h - 0.01;
    field.particles[2].vy = 0.2;
    field.particles[3].y = 0.01;
    field.particles[3].vy = -0.2;

    field.step();

    assert_eq!(field.particles[0].x, 0.0, "right edge wraps to left");
    assert_eq!(field.particles[1].x, w, "left edge wraps to right");
    assert_eq!(field.particles[2].y, 0.0, "bottom edge wraps to top");
    assert_eq!(field.particles[3].y, h, "top edge wraps to bottom");
}

#[test]
fn resize_regenerates_the_whole_batch() {
    let mut field = make_field();
    let before = field.particles.len();
    field.resize(200.0, 150.0);
    assert_eq!(field.particles.len(), before / 4);
    for p in &field.particles {
        assert!(p.x >= 0.0 && p.x <= 200.0);
        assert!(p.y >= 0.0 && p.y <= 150.0);
    }
}
