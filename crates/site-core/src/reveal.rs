use crate::constants::{
    HERO_CHAR_BLUR_PX, HERO_CHAR_RISE_PX, HERO_CHAR_STAGGER_SEC, HERO_CHAR_TILT_DEG,
    HERO_HOVER_SCALE, SCRAMBLE_STEP,
};
use fnv::FnvHashSet;
use rand::prelude::*;

/// Delay before child `index` starts animating inside a staggered group.
#[inline]
pub fn child_delay(base_sec: f32, stagger_sec: f32, index: usize) -> f32 {
    base_sec + stagger_sec * index as f32
}

/// Entrance delay for one hero character.
#[inline]
pub fn char_delay(index: usize) -> f32 {
    child_delay(0.0, HERO_CHAR_STAGGER_SEC, index)
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Visual state of one independently animatable character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharTransform {
    pub y_offset_px: f32,
    pub rotation_deg: f32,
    pub blur_px: f32,
    pub opacity: f32,
    pub scale: f32,
}

/// Pre-entrance state: pushed down, tilted, blurred, invisible.
pub fn char_hidden() -> CharTransform {
    CharTransform {
        y_offset_px: HERO_CHAR_RISE_PX,
        rotation_deg: HERO_CHAR_TILT_DEG,
        blur_px: HERO_CHAR_BLUR_PX,
        opacity: 0.0,
        scale: 1.0,
    }
}

/// Entrance state at eased progress `t` in [0,1]; `t == 1` is identity.
pub fn char_entrance(t: f32) -> CharTransform {
    let e = ease_out_cubic(t);
    CharTransform {
        y_offset_px: HERO_CHAR_RISE_PX * (1.0 - e),
        rotation_deg: HERO_CHAR_TILT_DEG * (1.0 - e),
        blur_px: HERO_CHAR_BLUR_PX * (1.0 - e),
        opacity: e,
        scale: 1.0,
    }
}

/// Hover response for a revealed character.
pub fn char_hover() -> CharTransform {
    CharTransform {
        y_offset_px: 0.0,
        rotation_deg: 0.0,
        blur_px: 0.0,
        opacity: 1.0,
        scale: HERO_HOVER_SCALE,
    }
}

/// Fire-once tracking for on-scroll reveals: an element key is accepted the
/// first time and refused forever after, so sections never replay.
#[derive(Default)]
pub struct RevealRegistry {
    seen: FnvHashSet<String>,
}

impl RevealRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_reveal(&mut self, key: &str) -> bool {
        self.seen.insert(key.to_owned())
    }

    pub fn revealed_count(&self) -> usize {
        self.seen.len()
    }
}

const SCRAMBLE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Hover scramble: characters resolve left to right from random capitals to
/// the target text. `step()` returns the next frame of text; the iteration
/// front advances by a fixed fraction per tick so longer words take
/// proportionally longer.
pub struct Scramble {
    target: Vec<char>,
    iteration: f32,
    rng: StdRng,
}

impl Scramble {
    pub fn new(text: &str, seed: u64) -> Self {
        Self {
            target: text.chars().collect(),
            iteration: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn done(&self) -> bool {
        self.iteration >= self.target.len() as f32
    }

    pub fn step(&mut self) -> String {
        let front = self.iteration;
        let out: String = self
            .target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if (i as f32) < front {
                    c
                } else {
                    SCRAMBLE_ALPHABET[self.rng.gen_range(0..SCRAMBLE_ALPHABET.len())] as char
                }
            })
            .collect();
        self.iteration += SCRAMBLE_STEP;
        out
    }
}
