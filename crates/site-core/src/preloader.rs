use crate::constants::{
    LABEL_INITIALIZING, LABEL_LOADING_ASSETS, LABEL_READY, LABEL_UPLINK, THRESHOLD_LOADING_ASSETS,
    THRESHOLD_READY, THRESHOLD_UPLINK,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Running,
    Complete,
}

/// Simulated loading progress: a monotone counter advanced by randomized
/// increments on a fixed tick, with a one-shot completion signal.
///
/// The sequencer never produces the increments itself; the caller injects
/// them, which keeps the transition function deterministic under test.
#[derive(Clone, Debug)]
pub struct LoadSequencer {
    progress: u8,
    phase: LoadPhase,
    completion_fired: bool,
}

impl Default for LoadSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self {
            progress: 0,
            phase: LoadPhase::Running,
            completion_fired: false,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Advance by one tick. Progress is clamped at 100; ticks after
    /// completion are no-ops so a straggling timer cannot overshoot.
    pub fn advance(&mut self, increment: u8) {
        if self.phase == LoadPhase::Complete {
            return;
        }
        let next = (self.progress as u16 + increment as u16).min(100) as u8;
        self.progress = next;
        if self.progress == 100 {
            self.phase = LoadPhase::Complete;
        }
    }

    /// True exactly once, and only after progress reached 100. The caller is
    /// expected to wait the settle delay before acting on it.
    pub fn take_completion(&mut self) -> bool {
        if self.phase == LoadPhase::Complete && !self.completion_fired {
            self.completion_fired = true;
            true
        } else {
            false
        }
    }
}

/// Status text for a progress value. Ordered inclusive thresholds; the
/// highest threshold met wins, so 30/60/90 resolve to the higher label.
pub fn status_label(progress: u8) -> &'static str {
    let mut label = LABEL_INITIALIZING;
    if progress >= THRESHOLD_LOADING_ASSETS {
        label = LABEL_LOADING_ASSETS;
    }
    if progress >= THRESHOLD_UPLINK {
        label = LABEL_UPLINK;
    }
    if progress >= THRESHOLD_READY {
        label = LABEL_READY;
    }
    label
}
