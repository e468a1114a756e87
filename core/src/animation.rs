//! Frame-indexed animation state shared by every drawable entity.
//!
//! Entities embed an [`AnimationState`] per sprite sheet instead of
//! inheriting draw behaviour; the renderer only ever consumes the current
//! frame index.

use crate::FrameRatio;

/// Cyclic animation counter whose hold time scales with the frame ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationState {
    frame_count: u32,
    hold: u32,
    elapsed: u32,
    current: u32,
}

impl AnimationState {
    /// Creates a new animation over `frame_count` frames held for `hold`
    /// ticks each at the reference rate. A zero frame count is treated as
    /// one so the current frame always names a valid sheet column.
    #[must_use]
    pub const fn new(frame_count: u32, hold: u32) -> Self {
        let frame_count = if frame_count == 0 { 1 } else { frame_count };
        Self {
            frame_count,
            hold,
            elapsed: 0,
            current: 0,
        }
    }

    /// Current frame index in `[0, frame_count)`.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.current
    }

    /// Number of frames in the cycle.
    #[must_use]
    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Whether the cycle sits on its final frame.
    #[must_use]
    pub const fn is_on_last_frame(&self) -> bool {
        self.current + 1 >= self.frame_count
    }

    /// Advances the counter by one tick.
    ///
    /// The configured hold is divided by the frame ratio and floored, with a
    /// minimum of one tick, so a faster external tick rate holds each frame
    /// proportionally longer and the on-screen cadence stays constant.
    pub fn advance(&mut self, ratio: FrameRatio) {
        self.elapsed = self.elapsed.wrapping_add(1);
        let scaled_hold = (self.hold as f32 / ratio.get()).floor().max(1.0) as u32;
        if self.elapsed % scaled_hold == 0 {
            self.current += 1;
            if self.current >= self.frame_count {
                self.current = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnimationState;
    use crate::FrameRatio;

    #[test]
    fn frames_advance_after_each_hold_period() {
        let mut anim = AnimationState::new(4, 3);
        let ratio = FrameRatio::default();

        anim.advance(ratio);
        anim.advance(ratio);
        assert_eq!(anim.frame(), 0);
        anim.advance(ratio);
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn cycle_wraps_to_first_frame() {
        let mut anim = AnimationState::new(2, 1);
        let ratio = FrameRatio::default();

        anim.advance(ratio);
        assert_eq!(anim.frame(), 1);
        assert!(anim.is_on_last_frame());
        anim.advance(ratio);
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn higher_ratio_shortens_the_hold() {
        let mut slow = AnimationState::new(6, 30);
        let mut fast = AnimationState::new(6, 30);

        for _ in 0..15 {
            slow.advance(FrameRatio::new(1.0));
            fast.advance(FrameRatio::new(2.0));
        }

        assert_eq!(slow.frame(), 0);
        assert_eq!(fast.frame(), 1);
    }

    #[test]
    fn hold_never_drops_below_one_tick() {
        let mut anim = AnimationState::new(3, 2);
        let ratio = FrameRatio::new(100.0);

        anim.advance(ratio);
        assert_eq!(anim.frame(), 1);
        anim.advance(ratio);
        assert_eq!(anim.frame(), 2);
    }

    #[test]
    fn zero_frame_count_is_treated_as_one() {
        let mut anim = AnimationState::new(0, 5);
        anim.advance(FrameRatio::default());
        assert_eq!(anim.frame(), 0);
        assert_eq!(anim.frame_count(), 1);
    }
}
