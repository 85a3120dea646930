use bevy::prelude::*;

use crate::config::tuning::Tuning;

use super::components::{Grounded, Kinematics, Mech, SpeedCap};
use super::events::{ControlMessage, MechEvent};
use super::intent::Intent;
use super::turn::TurnDashSession;
use super::velocity::damp_towards;

/// Height of the mech origin above the floor plane (world units).
pub const MECH_RIDE_HEIGHT: f32 = 1.2;

/// Settle a horizontal velocity back toward the speed cap. Impulses may
/// exceed the cap; they are reined in over several ticks rather than
/// clipped.
pub(crate) fn settle_over_cap(horizontal: Vec3, cap: f32, settle: f32) -> Vec3 {
    let speed = horizontal.length();
    if speed <= cap || speed <= 0.0 {
        return horizontal;
    }
    let target = horizontal * (cap / speed);
    damp_towards(horizontal, target, settle)
}

/// MovementSet: jump triggers. Hook messages fire before the jump logic so
/// host systems can observe or extend the transition.
pub fn handle_jump(
    tuning: Res<Tuning>,
    mut messages: MessageReader<ControlMessage>,
    mut events: MessageWriter<MechEvent>,
    mut query: Query<(Entity, &mut Kinematics, &Grounded), With<Mech>>,
) {
    for message in messages.read() {
        match message {
            ControlMessage::JumpStart => {
                for (entity, mut kin, grounded) in &mut query {
                    events.write(MechEvent::JumpStarted { entity });
                    if grounded.0 {
                        kin.velocity.y = tuning.jump_velocity;
                    }
                }
            }
            ControlMessage::JumpStop => {
                for (entity, _, _) in &mut query {
                    events.write(MechEvent::JumpStopped { entity });
                }
            }
            _ => {}
        }
    }
}

/// MovementSet: continuous yaw from look input. An active turn dash owns
/// the facing rotation, so those entities are skipped.
pub fn apply_look(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut query: Query<(&Intent, &mut Transform), (With<Mech>, Without<TurnDashSession>)>,
) {
    let dt = time.delta_secs();
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    for (intent, mut transform) in &mut query {
        if intent.look_axis.x != 0.0 {
            let yaw = -intent.look_axis.x * tuning.look_yaw_rate * dt;
            transform.rotation = Quat::from_rotation_y(yaw) * transform.rotation;
        }
    }
}

/// MovementSet: continuous locomotion — accelerate the horizontal velocity
/// toward the intent direction under the current speed cap, with air
/// control scaling while airborne, and keep the relative-velocity
/// bookkeeping current.
pub fn apply_locomotion(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut query: Query<(&Intent, &Transform, &mut Kinematics, &SpeedCap, &Grounded), With<Mech>>,
) {
    let dt = time.delta_secs();
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    for (intent, transform, mut kin, cap, grounded) in &mut query {
        let forward = transform.rotation * Vec3::NEG_Z;
        let right = transform.rotation * Vec3::X;
        let wish = forward * intent.move_axis.y + right * intent.move_axis.x;
        let control = if grounded.0 { 1.0 } else { tuning.air_control };

        let mut horizontal = Vec3::new(kin.velocity.x, 0.0, kin.velocity.z);

        if intent.is_move_idle() {
            if grounded.0 {
                horizontal *= tuning.ground_friction.powf(dt * 60.0);
            }
        } else {
            let accel = wish.clamp_length_max(1.0) * tuning.move_accel * control * dt;
            horizontal += accel;
        }

        horizontal = settle_over_cap(horizontal, cap.0, tuning.over_cap_settle);

        kin.velocity.x = horizontal.x;
        kin.velocity.z = horizontal.z;
        kin.refresh_relative(transform.rotation);
    }
}

/// MovementSet: integrate velocity into translation with scaled gravity and
/// ground contact at the floor plane.
pub fn integrate_movement(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut query: Query<(&mut Transform, &mut Kinematics, &mut Grounded), With<Mech>>,
) {
    let dt = time.delta_secs();
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    let scale = 1.0 / tuning.units_per_meter.max(1.0);
    for (mut transform, mut kin, mut grounded) in &mut query {
        kin.velocity.y -= tuning.gravity * tuning.gravity_scale * dt;

        transform.translation += kin.velocity * dt * scale;

        if transform.translation.y <= MECH_RIDE_HEIGHT {
            transform.translation.y = MECH_RIDE_HEIGHT;
            if kin.velocity.y < 0.0 {
                kin.velocity.y = 0.0;
            }
            grounded.0 = true;
        } else {
            grounded.0 = false;
        }

        kin.refresh_relative(transform.rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn settle_leaves_velocity_under_the_cap_alone() {
        let v = Vec3::new(300.0, 0.0, -400.0);
        assert_eq!(settle_over_cap(v, 600.0, 0.1), v);
    }

    #[test]
    fn settle_pulls_excess_speed_toward_the_cap() {
        let v = settle_over_cap(Vec3::new(2_000.0, 0.0, 0.0), 600.0, 0.1);
        assert_abs_diff_eq!(v.x, 2_000.0 + (600.0 - 2_000.0) * 0.1);
        assert!(v.x < 2_000.0);
    }

    #[test]
    fn settle_preserves_direction() {
        let v = settle_over_cap(Vec3::new(1_500.0, 0.0, -1_500.0), 600.0, 1.0);
        assert_abs_diff_eq!(v.length(), 600.0, epsilon = 1e-3);
        assert!(v.x > 0.0 && v.z < 0.0);
    }
}
