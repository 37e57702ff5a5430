use tracing::debug;

use crate::constants::{CHASE_SECONDS, SCATTER_SECONDS};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Scatter,
    Chase,
}

impl Mode {
    pub fn duration(self) -> f32 {
        match self {
            Mode::Scatter => SCATTER_SECONDS,
            Mode::Chase => CHASE_SECONDS,
        }
    }
}

/// Alternates a ghost between scatter and chase on a fixed schedule.
#[derive(Debug, Clone)]
pub struct ModeController {
    current: Mode,
    timer: f32,
    time: f32,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    pub fn new() -> Self {
        let mut controller = Self {
            current: Mode::Scatter,
            timer: 0.0,
            time: 0.0,
        };
        controller.enter(Mode::Scatter);
        controller
    }

    pub fn advance(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer >= self.time {
            let next = match self.current {
                Mode::Scatter => Mode::Chase,
                Mode::Chase => Mode::Scatter,
            };
            debug!(from = ?self.current, to = ?next, "ghost mode change");
            self.enter(next);
        }
    }

    // Time left over past the threshold is dropped.
    fn enter(&mut self, mode: Mode) {
        self.current = mode;
        self.time = mode.duration();
        self.timer = 0.0;
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn elapsed(&self) -> f32 {
        self.timer
    }

    pub fn threshold(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_scatter() {
        let mode = ModeController::new();
        assert_eq!(mode.current(), Mode::Scatter);
        assert_eq!(mode.elapsed(), 0.0);
        assert_eq!(mode.threshold(), 7.0);
    }

    #[test]
    fn test_scatter_to_chase_at_threshold() {
        let mut mode = ModeController::new();
        mode.advance(7.0);
        assert_eq!(mode.current(), Mode::Chase);
        assert_eq!(mode.elapsed(), 0.0);
        assert_eq!(mode.threshold(), 20.0);
    }

    #[test]
    fn test_stays_in_scatter_below_threshold() {
        let mut mode = ModeController::new();
        mode.advance(6.9);
        assert_eq!(mode.current(), Mode::Scatter);
        assert!((mode.elapsed() - 6.9).abs() < 1e-6);
    }

    #[test]
    fn test_chase_back_to_scatter() {
        let mut mode = ModeController::new();
        mode.advance(7.0);
        mode.advance(19.5);
        assert_eq!(mode.current(), Mode::Chase);
        mode.advance(0.5);
        assert_eq!(mode.current(), Mode::Scatter);
        assert_eq!(mode.threshold(), 7.0);

        mode.advance(7.0);
        assert_eq!(mode.current(), Mode::Chase);
        mode.advance(20.0);
        assert_eq!(mode.current(), Mode::Scatter);
        assert_eq!(mode.elapsed(), 0.0);
    }

    #[test]
    fn test_incremental_ticks() {
        let mut mode = ModeController::new();
        // 0.25 is exact in binary, so 28 steps land on 7.0
        for _ in 0..27 {
            mode.advance(0.25);
        }
        assert_eq!(mode.current(), Mode::Scatter);
        mode.advance(0.25);
        assert_eq!(mode.current(), Mode::Chase);
    }

    #[test]
    fn test_overflow_is_discarded() {
        let mut mode = ModeController::new();
        mode.advance(10.0);
        assert_eq!(mode.current(), Mode::Chase);
        assert_eq!(mode.elapsed(), 0.0);
    }
}
