use bevy::prelude::*;

use crate::config::tuning::Tuning;

use super::components::Kinematics;
use super::units::{Easing, Timeline};

/// Clamp each axis component of `v` to [-limit, +limit].
pub fn clamp_axes(v: Vec3, limit: f32) -> Vec3 {
    let l = limit.abs();
    Vec3::new(v.x.clamp(-l, l), v.y.clamp(-l, l), v.z.clamp(-l, l))
}

/// Componentwise lerp of `current` toward `target`.
pub fn damp_towards(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    current.lerp(target, t.clamp(0.0, 1.0))
}

/// Timed damping phase: while a fast launch settles, axis components beyond
/// the soft bound are pulled back toward it. Distinct from the hard
/// post-launch clamp.
#[derive(Component, Debug)]
pub struct DampSession {
    pub timeline: Timeline,
}

impl DampSession {
    pub fn new(duration: f32) -> Self {
        Self {
            timeline: Timeline::new(duration, Easing::Linear),
        }
    }

    /// One tick of soft damping at eased progress `t`.
    pub fn damp(&self, velocity: Vec3, bound: f32, t: f32) -> Vec3 {
        let target = clamp_axes(velocity, bound);
        if velocity == target {
            velocity
        } else {
            damp_towards(velocity, target, t)
        }
    }
}

/// AbilitySet: advance active soft-damping sessions, retiring finished ones.
pub fn advance_damp_sessions(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Kinematics, &mut DampSession)>,
) {
    let dt = time.delta_secs();
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    for (entity, mut kin, mut session) in &mut query {
        let t = session.timeline.advance(dt);
        kin.velocity = session.damp(kin.velocity, tuning.dash_soft_damp_bound, t);
        if session.timeline.is_complete() {
            commands.entity(entity).remove::<DampSession>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clamp_axes_pins_each_component_to_the_bound() {
        let v = clamp_axes(Vec3::new(15_000.0, -3_500.0, 1_200.0), 2_000.0);
        assert_eq!(v, Vec3::new(2_000.0, -2_000.0, 1_200.0));
    }

    #[test]
    fn damp_towards_lerps_componentwise() {
        let v = damp_towards(Vec3::new(100.0, 0.0, -40.0), Vec3::ZERO, 0.5);
        assert_abs_diff_eq!(v.x, 50.0);
        assert_abs_diff_eq!(v.z, -20.0);
    }

    #[test]
    fn soft_damp_leaves_in_bound_velocity_untouched() {
        let session = DampSession::new(0.4);
        let v = Vec3::new(1_500.0, 0.0, -900.0);
        assert_eq!(session.damp(v, 24_000.0, 0.7), v);
    }

    #[test]
    fn soft_damp_pulls_excess_toward_the_bound() {
        let session = DampSession::new(0.4);
        let v = session.damp(Vec3::new(30_000.0, 0.0, 0.0), 24_000.0, 0.5);
        assert_abs_diff_eq!(v.x, 27_000.0);
    }
}
