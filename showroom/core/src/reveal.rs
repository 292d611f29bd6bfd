//! Reveal Timing
//!
//! Time-to-value curves for the page's decorative motion: sections fading in
//! when they come into view, sparkles pulsing, the hero's scroll hint
//! bouncing. Everything here is a pure function of elapsed time, so surfaces
//! sample it once per frame and tests need no clock.

use std::time::Duration;

/// Default length of a section fade-in
pub const FADE_IN_DURATION: Duration = Duration::from_millis(800);
/// Default rise distance of a fade-in, in the surface's units
pub const FADE_IN_OFFSET: f32 = 40.0;
/// Delay between consecutive children of a staggered reveal
pub const STAGGER_STEP: Duration = Duration::from_millis(300);

/// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EasingFunction {
    /// No easing
    #[default]
    Linear,
    /// Slow start
    EaseIn,
    /// Slow finish
    EaseOut,
    /// Slow start and finish
    EaseInOut,
}

impl EasingFunction {
    /// Apply the curve; input is clamped to `[0, 1]`
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// A repeating piecewise curve through evenly spaced values
///
/// One cycle is `delay`, then `duration` spent moving through `values`, then
/// `repeat_delay` resting on the last value. Before its first start the curve
/// holds the first value.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes {
    values: Vec<f32>,
    duration: Duration,
    delay: Duration,
    repeat_delay: Duration,
    easing: EasingFunction,
}

impl Keyframes {
    /// Curve through `values` over `duration`; a single value is constant
    ///
    /// An empty `values` list is treated as `[0.0]`.
    #[must_use]
    pub fn new(values: impl Into<Vec<f32>>, duration: Duration) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self {
            values,
            duration,
            delay: Duration::ZERO,
            repeat_delay: Duration::ZERO,
            easing: EasingFunction::Linear,
        }
    }

    /// Sparkle pulse: 0 → 1 → 0 over two seconds
    #[must_use]
    pub fn sparkle() -> Self {
        Self::new([0.0, 1.0, 0.0], Duration::from_secs(2)).with_easing(EasingFunction::EaseInOut)
    }

    /// Scroll hint bounce: 0 → 10 → 0 over one and a half seconds
    #[must_use]
    pub fn bounce() -> Self {
        Self::new([0.0, 10.0, 0.0], Duration::from_millis(1500))
    }

    /// Wait before the first cycle
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Rest between cycles
    #[must_use]
    pub fn with_repeat_delay(mut self, repeat_delay: Duration) -> Self {
        self.repeat_delay = repeat_delay;
        self
    }

    /// Easing within each segment
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Value `elapsed` after the curve was created
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> f32 {
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        if elapsed < self.delay {
            return first;
        }

        let cycle = self.duration + self.repeat_delay;
        if cycle.is_zero() {
            return last;
        }

        let in_cycle = (elapsed - self.delay).as_secs_f64() % cycle.as_secs_f64();
        let active = self.duration.as_secs_f64();
        if self.duration.is_zero() || in_cycle >= active {
            return last;
        }

        let segments = self.values.len() - 1;
        if segments == 0 {
            return first;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let position = (in_cycle / active) as f32 * segments as f32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segment = (position.floor() as usize).min(segments - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = self.easing.apply(position - segment as f32);

        let from = self.values[segment];
        let to = self.values[segment + 1];
        from + (to - from) * local
    }
}

/// Opacity and rise of a section sliding into view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeIn {
    duration: Duration,
    offset: f32,
    delay: Duration,
}

impl Default for FadeIn {
    fn default() -> Self {
        Self {
            duration: FADE_IN_DURATION,
            offset: FADE_IN_OFFSET,
            delay: Duration::ZERO,
        }
    }
}

impl FadeIn {
    /// Fade over `duration`, rising from `offset`
    #[must_use]
    pub fn new(duration: Duration, offset: f32) -> Self {
        Self {
            duration,
            offset,
            delay: Duration::ZERO,
        }
    }

    /// The `index`-th child of a staggered group
    #[must_use]
    pub fn staggered(index: u32) -> Self {
        Self {
            delay: STAGGER_STEP * index,
            ..Self::default()
        }
    }

    /// Eased progress in `[0, 1]`
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let Some(running) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let t = (running.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        EasingFunction::EaseOut.apply(t)
    }

    /// Opacity in `[0, 1]`
    #[must_use]
    pub fn opacity(&self, elapsed: Duration) -> f32 {
        self.progress(elapsed)
    }

    /// Remaining vertical offset, `offset` down to 0
    #[must_use]
    pub fn offset(&self, elapsed: Duration) -> f32 {
        self.offset * (1.0 - self.progress(elapsed))
    }

    /// Whether the fade has finished
    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
        ] {
            assert!(close(easing.apply(0.0), 0.0));
            assert!(close(easing.apply(1.0), 1.0));
            assert!(close(easing.apply(2.0), 1.0), "input is clamped");
        }
        assert!(EasingFunction::EaseOut.apply(0.5) > 0.5);
        assert!(EasingFunction::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn test_bounce_peaks_midway_and_repeats() {
        let bounce = Keyframes::bounce();
        assert!(close(bounce.sample(Duration::ZERO), 0.0));
        assert!(close(bounce.sample(Duration::from_millis(750)), 10.0));
        assert!(close(bounce.sample(Duration::from_millis(375)), 5.0));
        assert!(close(bounce.sample(Duration::from_millis(1500 + 750)), 10.0));
    }

    #[test]
    fn test_delay_and_repeat_delay() {
        let curve = Keyframes::new([0.0, 1.0], Duration::from_secs(1))
            .with_delay(Duration::from_secs(1))
            .with_repeat_delay(Duration::from_secs(1));

        assert!(close(curve.sample(Duration::from_millis(500)), 0.0));
        assert!(close(curve.sample(Duration::from_millis(1500)), 0.5));
        assert!(close(curve.sample(Duration::from_millis(2500)), 1.0), "resting");
        assert!(close(curve.sample(Duration::from_millis(3500)), 0.5), "second cycle");
    }

    #[test]
    fn test_degenerate_keyframes() {
        assert!(close(Keyframes::new(vec![], Duration::from_secs(1)).sample(Duration::ZERO), 0.0));
        assert!(close(Keyframes::new([3.0], Duration::from_secs(1)).sample(Duration::from_millis(10)), 3.0));
        assert!(close(Keyframes::new([1.0, 2.0], Duration::ZERO).sample(Duration::from_secs(5)), 2.0));
    }

    #[test]
    fn test_fade_in() {
        let fade = FadeIn::default();
        assert!(close(fade.opacity(Duration::ZERO), 0.0));
        assert!(close(fade.offset(Duration::ZERO), FADE_IN_OFFSET));
        assert!(close(fade.opacity(FADE_IN_DURATION), 1.0));
        assert!(close(fade.offset(Duration::from_secs(5)), 0.0));
        assert!(fade.is_complete(FADE_IN_DURATION));
    }

    #[test]
    fn test_staggered_children_start_later() {
        let second = FadeIn::staggered(1);
        assert!(close(second.opacity(Duration::from_millis(299)), 0.0));
        assert!(second.opacity(Duration::from_millis(700)) > 0.0);
        assert!(!second.is_complete(FADE_IN_DURATION));
    }
}
