use bevy::prelude::*;

use crate::config::tuning::Tuning;

use super::components::{Kinematics, Mech};
use super::energy::EnergyPool;
use super::events::{ControlMessage, MechEvent};
use super::intent::Intent;
use super::turn::TurnDashSession;
use super::units::Seconds;
use super::velocity::{DampSession, clamp_axes};

/// Resolved dash flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashKind {
    Forward,
    Back,
    Left,
    Right,
    Turn,
}

// ── Availability state machine ──────────────────────────────────────

/// Per-direction readiness flags. Forward/side are a coupled pair: any
/// launch dash clears both and the shared cooldown re-arms both. Using one
/// side always re-arms the other.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DashAvailability {
    pub forward_ready: bool,
    pub side_ready: bool,
    pub left_ready: bool,
    pub right_ready: bool,
}

impl Default for DashAvailability {
    fn default() -> Self {
        Self {
            forward_ready: true,
            side_ready: true,
            left_ready: true,
            right_ready: true,
        }
    }
}

impl DashAvailability {
    /// Forward/back use: clears the coupled forward/side pair.
    pub fn use_forward(&mut self) {
        self.forward_ready = false;
        self.side_ready = false;
    }

    /// Side use: flips the used side, re-arms the opposite, clears the pair.
    pub fn use_side(&mut self, right: bool) {
        self.forward_ready = false;
        self.side_ready = false;
        if right {
            self.right_ready = false;
            self.left_ready = true;
        } else {
            self.left_ready = false;
            self.right_ready = true;
        }
    }

    /// Batched re-arm on cooldown expiry.
    pub fn rearm_all(&mut self) {
        *self = Self::default();
    }
}

/// Single pending cooldown deadline; re-arming replaces any outstanding one,
/// so only the most recent dash's cooldown governs.
#[derive(Component, Default, Debug)]
pub struct DashCooldown(pub Option<Seconds>);

impl DashCooldown {
    pub fn rearm(&mut self, secs: f32) {
        self.0 = Some(Seconds::new(secs));
    }

    /// Tick the pending deadline. Returns true when it fires this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.0 {
            Some(remaining) => {
                let remaining = remaining.dec(dt);
                if remaining.is_expired() {
                    self.0 = None;
                    true
                } else {
                    self.0 = Some(remaining);
                    false
                }
            }
            None => false,
        }
    }
}

// ── Resolver ────────────────────────────────────────────────────────

/// What a dash trigger resolved to.
#[derive(Debug)]
pub enum DashResolution {
    Launched { kind: DashKind },
    Turn(TurnDashSession),
}

/// Reversal check: a side dash whose carried lateral momentum matches the
/// dash side inverts that momentum and launches at the reduced multiplier;
/// otherwise the dash is fresh and costs nothing.
pub(crate) fn side_dash_multiplier(tuning: &Tuning, lateral: f32, right: bool) -> (bool, f32) {
    let reversing = if right { lateral > 0.0 } else { lateral < 0.0 };
    if reversing {
        (true, tuning.dash_side_reversal_mult)
    } else {
        (false, tuning.dash_side_fresh_mult)
    }
}

/// Re-express a local-frame (forward, right, up) vector in world space.
fn world_from_relative(rotation: Quat, rel: Vec3) -> Vec3 {
    let forward = rotation * Vec3::NEG_Z;
    let right = rotation * Vec3::X;
    forward * rel.x + right * rel.y + Vec3::Y * rel.z
}

/// Resolve and apply one dash trigger. Returns None when the trigger is
/// silently ignored: energy at or below the floor, the implicated readiness
/// flag down, or an unconfigured turn timeline.
pub fn resolve_dash(
    tuning: &Tuning,
    intent: &Intent,
    rotation: Quat,
    kin: &mut Kinematics,
    energy: &mut EnergyPool,
    avail: &mut DashAvailability,
    cooldown: &mut DashCooldown,
) -> Option<DashResolution> {
    if energy.current.0 <= tuning.dash_energy_floor {
        return None;
    }

    if intent.is_move_idle() {
        if tuning.turn_dash_duration <= 0.0 {
            return None;
        }
        let session = TurnDashSession::capture(rotation, intent.look_axis.y, tuning);
        return Some(DashResolution::Turn(session));
    }

    let axis = intent.move_axis;
    if axis.y * axis.y >= axis.x * axis.x {
        // Vertical-dominant, ties included: forward/back dash.
        if !avail.forward_ready {
            return None;
        }
        let forward = rotation * Vec3::NEG_Z;
        let launch = forward * tuning.dash_forward_mult * axis.y.signum();
        energy.debit(tuning.dash_energy_cost);
        kin.apply_impulse(launch);
        kin.velocity = clamp_axes(kin.velocity, tuning.dash_velocity_clamp);
        avail.use_forward();
        cooldown.rearm(tuning.dash_cooldown_secs);
        let kind = if axis.y >= 0.0 {
            DashKind::Forward
        } else {
            DashKind::Back
        };
        return Some(DashResolution::Launched { kind });
    }

    // Horizontal-dominant: side dash.
    let right = axis.x > 0.0;
    let ready = if right {
        avail.right_ready
    } else {
        avail.left_ready
    };
    if !ready {
        return None;
    }

    let (reversing, mult) = side_dash_multiplier(tuning, kin.relative_velocity.y, right);
    if reversing {
        let mut rel = kin.relative_velocity;
        rel.y = -rel.y;
        kin.velocity = world_from_relative(rotation, rel);
        energy.debit(tuning.dash_energy_cost);
    }

    let right_vec = rotation * Vec3::X;
    let launch = right_vec * mult * axis.x.signum();
    kin.apply_impulse(launch);
    kin.velocity = clamp_axes(kin.velocity, tuning.dash_velocity_clamp);
    avail.use_side(right);
    cooldown.rearm(tuning.dash_cooldown_secs);
    let kind = if right { DashKind::Right } else { DashKind::Left };
    Some(DashResolution::Launched { kind })
}

// ── Systems ─────────────────────────────────────────────────────────

/// AbilitySet: consume dash triggers and resolve them against the ability
/// state. Ignored triggers leave every component untouched.
pub fn attempt_dash(
    tuning: Res<Tuning>,
    mut commands: Commands,
    mut triggers: MessageReader<ControlMessage>,
    mut events: MessageWriter<MechEvent>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &Intent,
            &mut Kinematics,
            &mut EnergyPool,
            &mut DashAvailability,
            &mut DashCooldown,
        ),
        With<Mech>,
    >,
) {
    let trigger_count = triggers
        .read()
        .filter(|m| **m == ControlMessage::DashTrigger)
        .count();

    for _ in 0..trigger_count {
        for (entity, transform, intent, mut kin, mut energy, mut avail, mut cooldown) in &mut query
        {
            match resolve_dash(
                &tuning,
                intent,
                transform.rotation,
                &mut kin,
                &mut energy,
                &mut avail,
                &mut cooldown,
            ) {
                Some(DashResolution::Launched { kind }) => {
                    commands
                        .entity(entity)
                        .insert(DampSession::new(tuning.damp_duration));
                    events.write(MechEvent::DashLaunched { entity, kind });
                }
                Some(DashResolution::Turn(session)) => {
                    commands.entity(entity).insert(session);
                    events.write(MechEvent::DashLaunched {
                        entity,
                        kind: DashKind::Turn,
                    });
                }
                None => {}
            }
        }
    }
}

/// AbilitySet: tick the shared cooldown; expiry re-arms all four flags at
/// once.
pub fn tick_dash_cooldown(
    time: Res<Time>,
    mut query: Query<(&mut DashCooldown, &mut DashAvailability)>,
) {
    let dt = time.delta_secs();
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    for (mut cooldown, mut avail) in &mut query {
        if cooldown.tick(dt) {
            avail.rearm_all();
        }
    }
}
