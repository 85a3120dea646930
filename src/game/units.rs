use serde::{Deserialize, Serialize};

// ── Newtypes ────────────────────────────────────────────────────────

/// Energy units. Always clamped to [0, max] by pool operations.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Energy(pub f32);

impl Energy {
    pub fn new(v: f32) -> Self {
        debug_assert!(v.is_finite(), "Energy must be finite");
        Self(v.max(0.0))
    }

    pub fn add_clamped(self, delta: f32, max: f32) -> Self {
        let v = (self.0 + delta).clamp(0.0, max);
        debug_assert!(v.is_finite());
        Self(v)
    }

    pub fn sub_clamped(self, delta: f32) -> Self {
        let v = (self.0 - delta).max(0.0);
        debug_assert!(v.is_finite());
        Self(v)
    }
}

/// Duration in seconds. Always >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(pub f32);

impl Seconds {
    pub fn new(v: f32) -> Self {
        Self(v.max(0.0))
    }

    /// Decrement by dt, clamped to 0.
    pub fn dec(self, dt: f32) -> Self {
        Self((self.0 - dt).max(0.0))
    }

    pub fn is_expired(self) -> bool {
        self.0 <= 0.0
    }
}

// ── Interpolation driver ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Ease-in-out (3t² − 2t³).
    SmoothStep,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Fixed-duration progress driver, advanced once per tick by the frame loop.
/// Hands an eased t in [0, 1] to the owning session.
#[derive(Debug, Clone)]
pub struct Timeline {
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Timeline {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Advance by dt and return the eased progress.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.easing.apply(self.elapsed / self.duration)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn seconds_dec_clamps_at_zero() {
        let s = Seconds::new(0.3).dec(0.5);
        assert_eq!(s.0, 0.0);
        assert!(s.is_expired());
    }

    #[test]
    fn energy_arithmetic_stays_in_bounds() {
        let e = Energy::new(5.0).sub_clamped(10.0);
        assert_eq!(e.0, 0.0);
        let e = e.add_clamped(250.0, 100.0);
        assert_eq!(e.0, 100.0);
    }

    #[test]
    fn timeline_progress_is_monotonic_and_completes() {
        let mut tl = Timeline::new(1.0, Easing::Linear);
        let mut last = 0.0;
        for _ in 0..10 {
            let t = tl.advance(0.1);
            assert!(t >= last);
            last = t;
        }
        tl.advance(0.1);
        assert!(tl.is_complete());
        assert_abs_diff_eq!(tl.progress(), 1.0);
    }

    #[test]
    fn smoothstep_hits_exact_endpoints() {
        assert_eq!(Easing::SmoothStep.apply(0.0), 0.0);
        assert_eq!(Easing::SmoothStep.apply(1.0), 1.0);
        assert_abs_diff_eq!(Easing::SmoothStep.apply(0.5), 0.5);
    }
}
