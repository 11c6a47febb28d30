/// Playback state as reported by the embedded player's own notifications.
/// The controller never infers state locally; it mirrors what the player
/// says it is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerStatus {
    /// Numeric codes from the embedded player API.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(PlayerStatus::Unstarted),
            0 => Some(PlayerStatus::Ended),
            1 => Some(PlayerStatus::Playing),
            2 => Some(PlayerStatus::Paused),
            3 => Some(PlayerStatus::Buffering),
            5 => Some(PlayerStatus::Cued),
            _ => None,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlayerStatus::Playing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
}

/// Flip between playing and paused: only an actually-playing player gets a
/// pause; every other reported state (paused, cued, unstarted, buffering,
/// ended, or no report yet) gets a play attempt.
pub fn toggle_action(status: Option<PlayerStatus>) -> ToggleAction {
    match status {
        Some(PlayerStatus::Playing) => ToggleAction::Pause,
        _ => ToggleAction::Play,
    }
}

/// One-shot guard for the autoplay unlock fallback. The first interaction
/// wins; afterwards the whole listener chain is dismantled, so only one
/// unlock attempt chain is ever active.
#[derive(Debug, Default)]
pub struct UnlockLatch {
    spent: bool,
}

impl UnlockLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only on the first call.
    pub fn try_fire(&mut self) -> bool {
        !std::mem::replace(&mut self.spent, true)
    }

    pub fn spent(&self) -> bool {
        self.spent
    }
}
