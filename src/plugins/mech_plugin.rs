use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::{
    boost::{self, BoostState},
    components::*,
    dash::{self, DashAvailability, DashCooldown},
    energy::EnergyPool,
    events::{ControlMessage, MechEvent},
    hooks,
    intent::Intent,
    movement::{self, MECH_RIDE_HEIGHT},
    turn, velocity,
};

// ── SystemSets (strict FixedUpdate ordering) ────────────────────────

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedMechSet {
    BoostSet,
    AbilitySet,
    MovementSet,
    HookSet,
}

pub struct MechPlugin;

impl Plugin for MechPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ControlMessage>();
        app.add_message::<MechEvent>();

        app.configure_sets(
            FixedUpdate,
            (
                FixedMechSet::BoostSet,
                FixedMechSet::AbilitySet,
                FixedMechSet::MovementSet,
                FixedMechSet::HookSet,
            )
                .chain(),
        );

        // BoostSet — the speed cap and energy trajectory are retargeted
        // before anything consumes them this tick.
        app.add_systems(
            FixedUpdate,
            (boost::read_boost_messages, boost::boost_tick)
                .chain()
                .in_set(FixedMechSet::BoostSet),
        );

        // AbilitySet — chained: dash resolution before the timelines that
        // it may have started are advanced.
        app.add_systems(
            FixedUpdate,
            (
                dash::attempt_dash,
                dash::tick_dash_cooldown,
                turn::advance_turn_dash,
                velocity::advance_damp_sessions,
            )
                .chain()
                .in_set(FixedMechSet::AbilitySet),
        );

        // MovementSet
        app.add_systems(
            FixedUpdate,
            (
                movement::handle_jump,
                movement::apply_look,
                movement::apply_locomotion,
                movement::integrate_movement,
            )
                .chain()
                .in_set(FixedMechSet::MovementSet),
        );

        // HookSet
        app.add_systems(
            FixedUpdate,
            hooks::process_hooks.in_set(FixedMechSet::HookSet),
        );

        app.add_systems(Startup, setup_arena);
    }
}

// ── Startup ─────────────────────────────────────────────────────────

fn setup_arena(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 14.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -1.0, 0.4, 0.0)),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.24, 0.27, 0.3))),
    ));

    commands.spawn((
        Mech,
        PlayerControlled,
        Mesh3d(meshes.add(Capsule3d::new(0.6, 1.2))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.6, 1.0))),
        Transform::from_xyz(0.0, MECH_RIDE_HEIGHT, 0.0),
        Intent::default(),
        Kinematics::default(),
        Grounded(true),
        SpeedCap(tuning.normal_speed),
        EnergyPool::full(tuning.energy_max),
        BoostState::default(),
        DashAvailability::default(),
        DashCooldown::default(),
    ));
}
