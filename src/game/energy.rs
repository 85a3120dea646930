use bevy::prelude::*;

use super::units::Energy;

/// Shared energy pool backing boost and dash.
#[derive(Component, Debug, Clone)]
pub struct EnergyPool {
    pub current: Energy,
    pub max: f32,
}

impl EnergyPool {
    pub fn full(max: f32) -> Self {
        Self {
            current: Energy::new(max),
            max,
        }
    }

    /// Continuous drain. Returns true exactly when this call crossed to 0.
    pub fn deplete(&mut self, rate: f32, dt: f32) -> bool {
        let was_positive = self.current.0 > 0.0;
        self.current = self.current.sub_clamped(rate * dt);
        was_positive && self.current.0 <= 0.0
    }

    /// Continuous recovery, capped at max.
    pub fn regen(&mut self, rate: f32, dt: f32) {
        self.current = self.current.add_clamped(rate * dt, self.max);
    }

    /// Discrete ability cost. Never fails; callers gate on the energy floor
    /// before calling.
    pub fn debit(&mut self, cost: f32) {
        self.current = self.current.sub_clamped(cost);
    }

    pub fn is_empty(&self) -> bool {
        self.current.0 <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn deplete_floors_at_zero_and_reports_crossing_once() {
        let mut pool = EnergyPool::full(10.0);
        assert!(!pool.deplete(20.0, 0.25)); // 10 -> 5
        assert!(pool.deplete(20.0, 0.5)); // 5 -> 0, crossing
        assert_eq!(pool.current.0, 0.0);
        assert!(!pool.deplete(20.0, 0.5)); // already empty, no second report
    }

    #[test]
    fn regen_caps_at_max() {
        let mut pool = EnergyPool::full(100.0);
        pool.debit(30.0);
        pool.regen(10.0, 500.0);
        assert_abs_diff_eq!(pool.current.0, 100.0);
    }

    #[test]
    fn debit_floors_at_zero() {
        let mut pool = EnergyPool::full(5.0);
        pool.debit(10.0);
        assert_eq!(pool.current.0, 0.0);
    }

    #[test]
    fn invariant_holds_over_mixed_call_sequence() {
        let mut pool = EnergyPool::full(100.0);
        let dt = 1.0 / 60.0;
        for i in 0..600 {
            match i % 4 {
                0 => {
                    pool.deplete(20.0, dt);
                }
                1 => pool.regen(10.0, dt),
                2 => pool.debit(10.0),
                _ => pool.regen(45.0, dt),
            }
            assert!(pool.current.0 >= 0.0 && pool.current.0 <= pool.max);
        }
    }
}
