use bevy::prelude::*;

use crate::config::tuning::Tuning;

use super::units::{Easing, Timeline};

/// In-place turn maneuver: facing and look direction are captured at the
/// moment of trigger, the session is discarded once the timeline completes.
#[derive(Component, Debug)]
pub struct TurnDashSession {
    pub start_yaw: f32,
    /// Signed turn direction from the look-intent Y value at capture.
    pub sign: f32,
    pub timeline: Timeline,
}

impl TurnDashSession {
    pub fn capture(rotation: Quat, look_y: f32, tuning: &Tuning) -> Self {
        let sign = if look_y == 0.0 { 0.0 } else { look_y.signum() };
        Self {
            start_yaw: yaw_of(rotation),
            sign,
            timeline: Timeline::new(tuning.turn_dash_duration, Easing::SmoothStep),
        }
    }

    /// Target yaw for eased progress `t` and a full turn of `full_angle`
    /// radians.
    pub fn yaw_at(&self, t: f32, full_angle: f32) -> f32 {
        self.start_yaw + t * full_angle * self.sign
    }
}

/// Extract the yaw component of a facing rotation.
pub fn yaw_of(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::YXZ).0
}

/// AbilitySet: drive active turn sessions, writing yaw straight onto the
/// facing rotation every tick until the timeline completes.
pub fn advance_turn_dash(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Transform, &mut TurnDashSession)>,
) {
    let dt = time.delta_secs();
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    let full_angle = tuning.turn_dash_angle_deg.to_radians();
    for (entity, mut transform, mut session) in &mut query {
        let t = session.timeline.advance(dt);
        transform.rotation = Quat::from_rotation_y(session.yaw_at(t, full_angle));
        if session.timeline.is_complete() {
            commands.entity(entity).remove::<TurnDashSession>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn capture_records_yaw_and_look_sign() {
        let tuning = Tuning::default();
        let rotation = Quat::from_rotation_y(0.5);
        let session = TurnDashSession::capture(rotation, -0.8, &tuning);
        assert_abs_diff_eq!(session.start_yaw, 0.5, epsilon = 1e-5);
        assert_eq!(session.sign, -1.0);
    }

    #[test]
    fn full_progress_is_a_quarter_turn() {
        let tuning = Tuning::default();
        let session = TurnDashSession::capture(Quat::IDENTITY, 1.0, &tuning);
        let yaw = session.yaw_at(1.0, tuning.turn_dash_angle_deg.to_radians());
        assert_abs_diff_eq!(yaw, FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn zero_look_turns_in_place_to_itself() {
        let tuning = Tuning::default();
        let session = TurnDashSession::capture(Quat::from_rotation_y(1.2), 0.0, &tuning);
        let yaw = session.yaw_at(1.0, tuning.turn_dash_angle_deg.to_radians());
        assert_abs_diff_eq!(yaw, 1.2, epsilon = 1e-5);
    }
}
