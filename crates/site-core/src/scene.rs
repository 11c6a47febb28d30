//! Pure model of the 3D ambient scene.
//!
//! The renderer owns GPU handles; this module owns everything that can be
//! computed without a device: the object roster, per-frame motion, the part
//! transforms each object contributes, and the starfield data. All updates
//! are driven by elapsed wall-clock time, not frame count, so motion speed
//! is independent of frame rate.

use crate::constants::*;
use crate::geometry::{self, MeshData};
use crate::input::{pointer_offset, scroll_offset, InputSnapshot};
use glam::{Mat4, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

/// Render quality chosen once at mount from the viewport width and kept for
/// the lifetime of that mount; later resizes do not re-evaluate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityTier {
    Full,
    Lite,
}

impl QualityTier {
    pub fn select(viewport_width_px: u32) -> Self {
        if viewport_width_px < MOBILE_BREAKPOINT_PX {
            QualityTier::Lite
        } else {
            QualityTier::Full
        }
    }

    pub fn starfield_count(self) -> usize {
        match self {
            QualityTier::Full => STARFIELD_COUNT_FULL,
            QualityTier::Lite => STARFIELD_COUNT_LITE,
        }
    }

    /// Lite renders wireframe only; Full renders glass with wire accents.
    pub fn wireframe_only(self) -> bool {
        self == QualityTier::Lite
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneObjectKind {
    Gyroscope,
    Statue,
    Knot,
    Crystal,
}

#[derive(Clone, Copy, Debug)]
pub struct SceneObjectDesc {
    pub name: &'static str,
    pub kind: SceneObjectKind,
    pub anchor: Vec3,
    pub color: [f32; 3],
    pub speed: f32,
}

/// Fixed roster: every object is created once at scene init and lives until
/// teardown.
pub const SCENE_OBJECTS: [SceneObjectDesc; 4] = [
    SceneObjectDesc {
        name: "gyroscope",
        kind: SceneObjectKind::Gyroscope,
        anchor: Vec3::new(-3.2, 1.4, -2.0),
        color: [0.35, 0.80, 0.95],
        speed: 1.1,
    },
    SceneObjectDesc {
        name: "statue",
        kind: SceneObjectKind::Statue,
        anchor: Vec3::new(3.0, -0.6, -1.5),
        color: [0.92, 0.88, 0.78],
        speed: 0.7,
    },
    SceneObjectDesc {
        name: "knot",
        kind: SceneObjectKind::Knot,
        anchor: Vec3::new(-2.4, -1.8, -3.0),
        color: [0.75, 0.45, 0.95],
        speed: 0.9,
    },
    SceneObjectDesc {
        name: "crystal",
        kind: SceneObjectKind::Crystal,
        anchor: Vec3::new(2.6, 2.0, -3.5),
        color: [0.45, 0.95, 0.70],
        speed: 1.4,
    },
];

/// Kind-specific animation state, dispatched on the object's type tag.
#[derive(Clone, Debug)]
pub enum KindState {
    Gyroscope { ring_spin: [f32; 2] },
    Statue { head_yaw: f32, halo_spin: f32, halo_wobble: f32 },
    Solid,
}

#[derive(Clone, Debug)]
pub struct ObjectMotion {
    pub rotation: Vec3,
    pub position: Vec3,
    pub kind_state: KindState,
}

impl ObjectMotion {
    pub fn new(desc: &SceneObjectDesc) -> Self {
        let kind_state = match desc.kind {
            SceneObjectKind::Gyroscope => KindState::Gyroscope { ring_spin: [0.0; 2] },
            SceneObjectKind::Statue => KindState::Statue {
                head_yaw: 0.0,
                halo_spin: 0.0,
                halo_wobble: 0.0,
            },
            _ => KindState::Solid,
        };
        Self {
            rotation: Vec3::ZERO,
            position: desc.anchor,
            kind_state,
        }
    }
}

/// Advance one object by one frame.
///
/// The rendered position is the exponentially smoothed blend of the anchor,
/// the vertical bob, the index-scaled pointer offset, and the scroll offset;
/// it is never assigned the target directly. A statue keeps its torso
/// upright: the generic X rotation is cancelled every frame.
pub fn update_object(
    desc: &SceneObjectDesc,
    index: usize,
    motion: &mut ObjectMotion,
    elapsed: f32,
    dt: f32,
    input: &InputSnapshot,
) {
    let offset = ROT_RATE_INDEX_OFFSET * index as f32;
    motion.rotation.y += (ROT_RATE_Y + offset) * dt;
    motion.rotation.z += (ROT_RATE_Z + offset) * dt;

    match &mut motion.kind_state {
        KindState::Statue {
            head_yaw,
            halo_spin,
            halo_wobble,
        } => {
            motion.rotation.x = 0.0;
            *head_yaw = (elapsed * desc.speed * HEAD_YAW_RATE).sin() * HEAD_YAW_AMPLITUDE;
            *halo_spin += HALO_SPIN_RATE * dt;
            *halo_wobble = (elapsed * HALO_WOBBLE_RATE).sin() * HALO_WOBBLE_AMPLITUDE;
        }
        KindState::Gyroscope { ring_spin } => {
            motion.rotation.x += (ROT_RATE_X + offset) * dt;
            ring_spin[0] += RING_SPIN_INNER * dt;
            ring_spin[1] -= RING_SPIN_MID * dt;
        }
        KindState::Solid => {
            motion.rotation.x += (ROT_RATE_X + offset) * dt;
        }
    }

    let bob = (elapsed * desc.speed).sin() * BOB_AMPLITUDE;
    let target = desc.anchor
        + Vec3::new(0.0, bob, 0.0)
        + pointer_offset(input.pointer_ndc, index)
        + scroll_offset(input.scroll_y);
    motion.position += (target - motion.position) * POSITION_SMOOTHING;
}

/// Mesh shapes the renderer uploads once; each scene object draws one or
/// more of them under per-frame transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartShape {
    RingLarge,
    RingMid,
    RingSmall,
    Torso,
    Head,
    Halo,
    Knot,
    Crystal,
}

pub const ALL_PART_SHAPES: [PartShape; 8] = [
    PartShape::RingLarge,
    PartShape::RingMid,
    PartShape::RingSmall,
    PartShape::Torso,
    PartShape::Head,
    PartShape::Halo,
    PartShape::Knot,
    PartShape::Crystal,
];

/// Build the mesh for a shape at the detail level of the given tier.
pub fn shape_mesh(shape: PartShape, tier: QualityTier) -> MeshData {
    let (ring_maj, ring_min) = match tier {
        QualityTier::Full => (96, 16),
        QualityTier::Lite => (48, 8),
    };
    match shape {
        PartShape::RingLarge => geometry::torus(1.0, 0.05, ring_maj, ring_min),
        PartShape::RingMid => geometry::torus(0.75, 0.05, ring_maj, ring_min),
        PartShape::RingSmall => geometry::torus(0.5, 0.05, ring_maj, ring_min),
        PartShape::Torso => geometry::cylinder(0.28, 0.45, 1.3, if tier == QualityTier::Full { 32 } else { 16 }),
        PartShape::Head => geometry::icosphere(if tier == QualityTier::Full { 2 } else { 1 }),
        PartShape::Halo => geometry::torus(0.55, 0.04, ring_maj, ring_min),
        PartShape::Knot => {
            let (tub, rad) = match tier {
                QualityTier::Full => (128, 16),
                QualityTier::Lite => (64, 8),
            };
            geometry::torus_knot(2, 3, 1.1, 0.3, tub, rad)
        }
        PartShape::Crystal => geometry::icosphere(0),
    }
}

const HEAD_SCALE: f32 = 0.32;
const HEAD_RISE: f32 = 1.0;
const HALO_RISE: f32 = 1.55;

fn euler_matrix(rotation: Vec3) -> Mat4 {
    Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_z(rotation.z)
}

/// World transforms for every part an object draws this frame.
pub fn object_parts(
    desc: &SceneObjectDesc,
    motion: &ObjectMotion,
) -> SmallVec<[(PartShape, Mat4); 3]> {
    let base = Mat4::from_translation(motion.position) * euler_matrix(motion.rotation);
    let mut parts = SmallVec::new();
    match (&desc.kind, &motion.kind_state) {
        (SceneObjectKind::Gyroscope, KindState::Gyroscope { ring_spin }) => {
            parts.push((PartShape::RingLarge, base));
            parts.push((
                PartShape::RingMid,
                base * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2)
                    * Mat4::from_rotation_z(ring_spin[0]),
            ));
            parts.push((
                PartShape::RingSmall,
                base * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2)
                    * Mat4::from_rotation_z(ring_spin[1]),
            ));
        }
        (SceneObjectKind::Statue, KindState::Statue { head_yaw, halo_spin, halo_wobble }) => {
            parts.push((PartShape::Torso, base));
            parts.push((
                PartShape::Head,
                base * Mat4::from_translation(Vec3::new(0.0, HEAD_RISE, 0.0))
                    * Mat4::from_rotation_y(*head_yaw)
                    * Mat4::from_scale(Vec3::splat(HEAD_SCALE)),
            ));
            parts.push((
                PartShape::Halo,
                base * Mat4::from_translation(Vec3::new(0.0, HALO_RISE, 0.0))
                    * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2 + *halo_wobble)
                    * Mat4::from_rotation_z(*halo_spin),
            ));
        }
        (SceneObjectKind::Knot, _) => parts.push((PartShape::Knot, base)),
        (SceneObjectKind::Crystal, _) => parts.push((PartShape::Crystal, base)),
        // desc/state mismatch cannot be constructed through ObjectMotion::new
        _ => parts.push((PartShape::Crystal, base)),
    }
    parts
}

/// One starfield point, uploaded as an instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub phase: f32,
    pub _pad: [f32; 3],
}

/// Scatter `count` points uniformly in the cubic volume.
pub fn generate_starfield(count: usize, extent: f32, seed: u64) -> Vec<StarInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| StarInstance {
            position: [
                (rng.gen::<f32>() * 2.0 - 1.0) * extent,
                (rng.gen::<f32>() * 2.0 - 1.0) * extent,
                (rng.gen::<f32>() * 2.0 - 1.0) * extent,
            ],
            size: STAR_MIN_SIZE + rng.gen::<f32>() * (STAR_MAX_SIZE - STAR_MIN_SIZE),
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
            _pad: [0.0; 3],
        })
        .collect()
}

/// Starfield model matrix: a slow yaw about +Y plus scroll parallax.
pub fn starfield_transform(elapsed: f32, scroll_y: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, scroll_y * STARFIELD_SCROLL_PARALLAX, 0.0))
        * Mat4::from_rotation_y(elapsed * STARFIELD_ROT_RATE)
}
