//! Frame timing.
//!
//! The ticker owns no clock: the caller passes the current time in
//! milliseconds and gets back a [`TickerDelta`] when a frame should run.

use crate::settings::Settings;
use crate::types::{TickerDelta, TARGET_FPMS};

#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    /// Multiplier applied to elapsed time before it reaches the simulation.
    pub speed: f64,
    /// Upper bound for one frame's elapsed time (e.g. after a stall).
    pub max_elapsed_ms: f64,
    /// Frames arriving sooner than this are skipped. `0` disables the cap.
    pub min_elapsed_ms: f64,
    pub paused: bool,
    last_time: Option<f64>,
    last_frame: f64,
    elapsed_ms: f64,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            speed: 0.005,
            max_elapsed_ms: 100.0,
            min_elapsed_ms: 0.0,
            paused: false,
            last_time: None,
            last_frame: 0.0,
            elapsed_ms: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            speed: settings.speed,
            max_elapsed_ms: settings.max_elapsed_ms,
            ..Self::new()
        }
        .with_max_fps(settings.max_fps)
    }

    /// Cap the frame rate; `0` or less removes the cap.
    pub fn with_max_fps(mut self, max_fps: f64) -> Self {
        self.min_elapsed_ms = if max_fps > 0.0 { 1000.0 / max_fps } else { 0.0 };
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Compute the delta for a frame at `now_ms`.
    ///
    /// The first call only records the start time. Returns `None` when time
    /// did not advance, when paused, or when the frame cap skips this frame.
    pub fn update(&mut self, now_ms: f64) -> Option<TickerDelta> {
        let Some(last_time) = self.last_time else {
            self.last_time = Some(now_ms);
            self.last_frame = now_ms;
            return None;
        };
        if now_ms <= last_time {
            return None;
        }

        if self.min_elapsed_ms > 0.0 {
            let since_frame = now_ms - self.last_frame;
            if since_frame < self.min_elapsed_ms {
                return None;
            }
            self.last_frame = now_ms - since_frame % self.min_elapsed_ms;
        }

        let elapsed_ms = (now_ms - last_time).min(self.max_elapsed_ms);
        self.last_time = Some(now_ms);
        self.elapsed_ms = elapsed_ms;
        if self.paused {
            return None;
        }

        let delta_ms = elapsed_ms * self.speed;
        Some(TickerDelta {
            delta_ms,
            delta_time: delta_ms * TARGET_FPMS,
            elapsed_ms,
            speed: self.speed,
        })
    }

    /// Frames per second implied by the last frame's elapsed time.
    pub fn fps(&self) -> f64 {
        if self.elapsed_ms > 0.0 {
            1000.0 / self.elapsed_ms
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_only_starts_clock() {
        let mut ticker = Ticker::new().with_speed(1.0);
        assert_eq!(ticker.update(1000.0), None);
        let delta = ticker.update(1016.0).unwrap();
        assert_eq!(delta.elapsed_ms, 16.0);
        assert_eq!(delta.delta_ms, 16.0);
        assert!((ticker.fps() - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_is_clamped_and_scaled() {
        let mut ticker = Ticker::new();
        ticker.update(0.0);
        let delta = ticker.update(5000.0).unwrap();
        assert_eq!(delta.elapsed_ms, 100.0);
        assert!((delta.delta_ms - 0.5).abs() < 1e-12);
        assert!((delta.delta_time - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_time_must_advance() {
        let mut ticker = Ticker::new();
        ticker.update(10.0);
        assert_eq!(ticker.update(10.0), None);
        assert_eq!(ticker.update(5.0), None);
    }

    #[test]
    fn test_frame_cap_skips_early_frames() {
        let mut ticker = Ticker::new().with_speed(1.0).with_max_fps(50.0);
        ticker.update(0.0);
        assert_eq!(ticker.update(10.0), None);
        // skipped frames keep accumulating elapsed time
        let delta = ticker.update(25.0).unwrap();
        assert_eq!(delta.elapsed_ms, 25.0);
        assert_eq!(ticker.update(39.0), None);
        assert!(ticker.update(45.0).is_some());
    }

    #[test]
    fn test_paused_ticker_advances_clock_only() {
        let mut ticker = Ticker::new();
        ticker.update(0.0);
        ticker.paused = true;
        assert_eq!(ticker.update(50.0), None);
        ticker.paused = false;
        assert_eq!(ticker.update(60.0).unwrap().elapsed_ms, 10.0);
    }
}
