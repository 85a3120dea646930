use bevy::prelude::*;

// ── Marker components ───────────────────────────────────────────────

#[derive(Component)]
pub struct Mech;

#[derive(Component)]
pub struct PlayerControlled;

// ── Mech runtime state ──────────────────────────────────────────────

/// Position-independent movement snapshot. Facing lives on the Transform.
#[derive(Component, Default, Debug, Clone)]
pub struct Kinematics {
    /// World-space velocity (cm/s).
    pub velocity: Vec3,
    /// Velocity re-expressed in the actor's local frame:
    /// x = forward, y = right (lateral), z = up.
    pub relative_velocity: Vec3,
}

impl Kinematics {
    /// Recompute the actor-relative velocity from the current facing.
    pub fn refresh_relative(&mut self, rotation: Quat) {
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        self.relative_velocity = Vec3::new(
            self.velocity.dot(forward),
            self.velocity.dot(right),
            self.velocity.y,
        );
    }

    /// Apply an instantaneous velocity change. Does not clamp.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
    }
}

/// Ground contact flag, maintained by the integrator.
#[derive(Component, Default)]
pub struct Grounded(pub bool);

/// Current horizontal speed cap, retargeted every tick by the boost
/// controller.
#[derive(Component)]
pub struct SpeedCap(pub f32);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn relative_velocity_tracks_facing() {
        let mut kin = Kinematics {
            velocity: Vec3::new(0.0, 0.0, -100.0),
            ..Default::default()
        };
        // Identity facing: forward is -Z, so this is pure forward motion.
        kin.refresh_relative(Quat::IDENTITY);
        assert_abs_diff_eq!(kin.relative_velocity.x, 100.0);
        assert_abs_diff_eq!(kin.relative_velocity.y, 0.0);

        // Quarter turn left: the same world velocity now points along the
        // actor's right axis.
        kin.refresh_relative(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert_abs_diff_eq!(kin.relative_velocity.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(kin.relative_velocity.y, 100.0, epsilon = 1e-4);
    }
}
