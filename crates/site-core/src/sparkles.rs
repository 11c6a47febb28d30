use crate::constants::{
    FIELD_AREA_NORM, FIELD_DENSITY, FIELD_FADE_STEP, FIELD_MAX_DRIFT, FIELD_MAX_RADIUS,
    FIELD_MIN_RADIUS,
};
use rand::prelude::*;

/// One drifting, fading dot in the 2D field.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
    /// +1.0 fading in, -1.0 fading out.
    pub fade_dir: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldParams {
    pub density: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub max_drift: f32,
    pub fade_step: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            density: FIELD_DENSITY,
            min_radius: FIELD_MIN_RADIUS,
            max_radius: FIELD_MAX_RADIUS,
            max_drift: FIELD_MAX_DRIFT,
            fade_step: FIELD_FADE_STEP,
        }
    }
}

/// Number of particles for a container of the given size.
#[inline]
pub fn particle_count(width: f32, height: f32, density: f32) -> usize {
    ((density * width * height) / FIELD_AREA_NORM).max(0.0) as usize
}

/// The whole field. Created in one batch at mount, mutated every frame,
/// regenerated wholesale on resize.
pub struct ParticleField {
    width: f32,
    height: f32,
    params: FieldParams,
    rng: StdRng,
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(width: f32, height: f32, params: FieldParams, seed: u64) -> Self {
        let mut field = Self {
            width,
            height,
            params,
            rng: StdRng::seed_from_u64(seed),
            particles: Vec::new(),
        };
        field.regenerate();
        field
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn regenerate(&mut self) {
        let count = particle_count(self.width, self.height, self.params.density);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let p = Particle {
                x: self.rng.gen::<f32>() * self.width,
                y: self.rng.gen::<f32>() * self.height,
                radius: self.params.min_radius
                    + self.rng.gen::<f32>() * (self.params.max_radius - self.params.min_radius),
                vx: (self.rng.gen::<f32>() * 2.0 - 1.0) * self.params.max_drift,
                vy: (self.rng.gen::<f32>() * 2.0 - 1.0) * self.params.max_drift,
                opacity: self.rng.gen::<f32>(),
                fade_dir: if self.rng.gen::<bool>() { 1.0 } else { -1.0 },
            };
            self.particles.push(p);
        }
    }

    /// Drops the old batch and creates a fresh one sized for the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    /// Advance every particle by one frame: drift, fade, wrap.
    ///
    /// A particle that fades out completely is relocated to a fresh random
    /// position before it starts fading back in, so fully transparent dots
    /// never park in place.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        let fade = self.params.fade_step;
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.opacity += fade * p.fade_dir;

            if p.opacity >= 1.0 {
                p.opacity = 1.0;
                p.fade_dir = -1.0;
            } else if p.opacity <= 0.0 {
                p.opacity = 0.0;
                p.fade_dir = 1.0;
                p.x = self.rng.gen::<f32>() * w;
                p.y = self.rng.gen::<f32>() * h;
            }

            // Wrap across all four edges, never clamp
            if p.x > w {
                p.x = 0.0;
            } else if p.x < 0.0 {
                p.x = w;
            }
            if p.y > h {
                p.y = 0.0;
            } else if p.y < 0.0 {
                p.y = h;
            }
        }
    }
}
