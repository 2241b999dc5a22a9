//! Double key-press detection for the capitalization shortcut.
//!
//! The host owns the state and feeds it every press of the watched key
//! (Control in the caption editor); the decision itself is a pure function.

use std::time::{Duration, Instant};

/// Configuration for double-press detection
#[derive(Debug, Clone, Copy)]
pub struct DoublePressConfig {
    /// Maximum delay between two consecutive presses
    pub window: Duration,
    /// Presses needed inside the window to fire
    pub required_presses: u32,
}

impl Default for DoublePressConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(500),
            required_presses: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressState {
    pub last_press: Option<Instant>,
    pub press_count: u32,
}

/// Register a press at `now` and decide whether the shortcut fires.
///
/// A press more than `window` after the previous one starts a new sequence.
/// When the sequence completes, the returned state is reset.
pub fn should_trigger(state: PressState, now: Instant, config: &DoublePressConfig) -> (PressState, bool) {
    let in_window = state
        .last_press
        .is_some_and(|last| now.saturating_duration_since(last) <= config.window);

    let press_count = if in_window { state.press_count + 1 } else { 1 };

    if press_count >= config.required_presses {
        return (PressState::default(), true);
    }

    (
        PressState {
            last_press: Some(now),
            press_count,
        },
        false,
    )
}

/// Mutable wrapper for hosts that keep one detector per editing surface.
#[derive(Debug, Default)]
pub struct DoublePressDetector {
    config: DoublePressConfig,
    state: PressState,
}

impl DoublePressDetector {
    pub fn new(config: DoublePressConfig) -> Self {
        Self {
            config,
            state: PressState::default(),
        }
    }

    /// Process a key press and return whether the shortcut fires
    pub fn register_press(&mut self, now: Instant) -> bool {
        let (state, fired) = should_trigger(self.state, now, &self.config);
        self.state = state;
        if fired {
            log::debug!("Double press detected");
        }
        fired
    }

    /// Reset the detector state
    pub fn reset(&mut self) {
        self.state = PressState::default();
    }

    pub fn state(&self) -> PressState {
        self.state
    }
}
