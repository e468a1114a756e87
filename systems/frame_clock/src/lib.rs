#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-rate measurement producing the per-tick normalisation ratio.
//!
//! The clock counts ticks inside a rolling one-second window. When a window
//! closes, the ratio becomes the reference rate divided by the observed
//! count, so every distance and animation hold in the simulation can be
//! expressed per reference tick and scaled to the host's actual cadence.
//! Until the first window closes the ratio is the identity.

use std::time::Duration;

use lane_defence_core::{FrameRatio, REFERENCE_FRAME_RATE};

/// Width of the measurement window.
const WINDOW: Duration = Duration::from_secs(1);

/// Rolling frame counter that yields a [`FrameRatio`] per tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    window_start: Option<Duration>,
    frames: u32,
    ratio: FrameRatio,
}

impl FrameClock {
    /// Creates a clock reporting the identity ratio.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one tick at `now` and returns the ratio to apply to it.
    ///
    /// `now` is any monotonic timestamp expressed as a duration from a fixed
    /// origin. The very first tick only establishes the window start and is
    /// not counted toward it. The tick that closes a window is counted toward
    /// that window, and the new measurement takes effect from the following
    /// tick.
    pub fn tick(&mut self, now: Duration) -> FrameRatio {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return self.ratio;
        };
        self.frames = self.frames.saturating_add(1);
        if now.saturating_sub(start) >= WINDOW {
            self.ratio = FrameRatio::new(REFERENCE_FRAME_RATE as f32 / self.frames as f32);
            self.frames = 0;
            self.window_start = Some(now);
        }
        self.ratio
    }

    /// The most recently measured ratio.
    #[must_use]
    pub fn ratio(&self) -> FrameRatio {
        self.ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `frames - 1` ticks inside the window starting at `origin`, then
    /// one closing tick exactly one second after it. The window start must
    /// already be established, either by a baseline tick at `origin` or by
    /// the close of the previous window.
    fn close_window(clock: &mut FrameClock, origin: Duration, frames: u32) -> FrameRatio {
        for tick in 0..frames - 1 {
            let _ = clock.tick(origin + Duration::from_millis(u64::from(tick)));
        }
        clock.tick(origin + WINDOW)
    }

    #[test]
    fn ratio_is_identity_before_the_first_window_closes() {
        let mut clock = FrameClock::new();
        for tick in 0..30u32 {
            let ratio = clock.tick(Duration::from_millis(u64::from(tick) * 16));
            assert_eq!(ratio.get(), 1.0);
        }
    }

    #[test]
    fn sixty_frames_per_second_measures_a_ratio_of_three() {
        let mut clock = FrameClock::new();
        let _ = clock.tick(Duration::ZERO);
        let ratio = close_window(&mut clock, Duration::ZERO, 60);
        assert!((ratio.get() - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reference_rate_measures_the_identity_ratio() {
        let mut clock = FrameClock::new();
        let _ = clock.tick(Duration::ZERO);
        let ratio = close_window(&mut clock, Duration::ZERO, REFERENCE_FRAME_RATE);
        assert!((ratio.get() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn measurement_restarts_each_window() {
        let mut clock = FrameClock::new();
        let _ = clock.tick(Duration::ZERO);
        let _ = close_window(&mut clock, Duration::ZERO, 60);
        let ratio = close_window(&mut clock, WINDOW, 90);
        assert!((ratio.get() - 2.0).abs() < f32::EPSILON);
        assert!((clock.ratio().get() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn opening_window_measures_the_same_rate_as_later_windows() {
        // A steady 50 fps cadence with millisecond-exact steps. The tick
        // that starts the run only anchors the window, so both the opening
        // window and the one after it count exactly fifty frames.
        let mut clock = FrameClock::new();
        let step = Duration::from_millis(20);
        let mut first_window = FrameRatio::default();
        let mut second_window = FrameRatio::default();
        for tick in 0..=100u32 {
            let ratio = clock.tick(step * tick);
            if tick == 50 {
                first_window = ratio;
            }
            if tick == 100 {
                second_window = ratio;
            }
        }
        assert!((first_window.get() - 3.6).abs() < f32::EPSILON);
        assert_eq!(first_window.get(), second_window.get());
    }
}
