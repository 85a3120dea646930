use bevy::prelude::*;

/// Input intent: written in Update, consumed in FixedUpdate.
#[derive(Component, Default)]
pub struct Intent {
    /// Desired movement axes, [-1, 1] each (x = strafe right, y = forward).
    pub move_axis: Vec2,
    /// Desired look axes, [-1, 1] each (x = yaw, y = pitch).
    pub look_axis: Vec2,
}

impl Intent {
    /// True when no meaningful movement input is present.
    pub fn is_move_idle(&self) -> bool {
        self.move_axis.length_squared() < 1e-4
    }
}
