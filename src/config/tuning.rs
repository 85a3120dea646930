use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All tunable mech parameters, loaded from tuning.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Tuning {
    pub dt: f32,
    /// Velocity units (cm) per world render unit.
    pub units_per_meter: f32,
    pub normal_speed: f32,
    pub boost_speed: f32,
    pub move_accel: f32,
    /// Idle friction factor per 1/60 s (applied as friction^(dt*60)).
    pub ground_friction: f32,
    /// Per-tick lerp toward the speed cap when an impulse pushed past it.
    pub over_cap_settle: f32,
    /// Yaw rate from look input (radians per second).
    pub look_yaw_rate: f32,
    pub energy_max: f32,
    pub energy_deplete_rate: f32,
    pub energy_regen_rate: f32,
    pub dash_energy_cost: f32,
    pub dash_energy_floor: f32,
    pub dash_forward_mult: f32,
    pub dash_side_fresh_mult: f32,
    pub dash_side_reversal_mult: f32,
    /// Hard per-axis velocity clamp applied right after a dash impulse.
    pub dash_velocity_clamp: f32,
    /// Soft per-axis bound the timed damping phase pulls toward.
    pub dash_soft_damp_bound: f32,
    pub damp_duration: f32,
    pub dash_cooldown_secs: f32,
    /// 0 disables the in-place turn dash.
    pub turn_dash_duration: f32,
    pub turn_dash_angle_deg: f32,
    pub jump_velocity: f32,
    pub air_control: f32,
    pub gravity: f32,
    pub gravity_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            units_per_meter: 100.0,
            normal_speed: 600.0,
            boost_speed: 1200.0,
            move_accel: 2400.0,
            ground_friction: 0.9,
            over_cap_settle: 0.1,
            look_yaw_rate: 2.5,
            energy_max: 100.0,
            energy_deplete_rate: 20.0,
            energy_regen_rate: 10.0,
            dash_energy_cost: 10.0,
            dash_energy_floor: 10.0,
            dash_forward_mult: 15000.0,
            dash_side_fresh_mult: 15000.0,
            dash_side_reversal_mult: 12000.0,
            dash_velocity_clamp: 2000.0,
            dash_soft_damp_bound: 24000.0,
            damp_duration: 0.4,
            dash_cooldown_secs: 1.0,
            turn_dash_duration: 0.3,
            turn_dash_angle_deg: 90.0,
            jump_velocity: 1200.0,
            air_control: 0.8,
            gravity: 980.0,
            gravity_scale: 1.5,
        }
    }
}

impl Tuning {
    /// Get the data directory for tuning files.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("mech_strike")
    }

    /// Path to the tuning file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("tuning.ron")
    }

    /// Load from file, or create default if not found.
    pub fn load_or_default() -> Self {
        let path = Self::file_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str(&contents) {
                    Ok(tuning) => return tuning,
                    Err(e) => {
                        warn!("Failed to parse tuning.ron: {e}, using defaults");
                    }
                },
                Err(e) => {
                    warn!("Failed to read tuning.ron: {e}, using defaults");
                }
            }
        }
        let tuning = Self::default();
        tuning.save();
        tuning
    }

    /// Save current tuning to file.
    pub fn save(&self) {
        let path = Self::file_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let pretty = ron::ser::PrettyConfig::default();
        match ron::ser::to_string_pretty(self, pretty) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    warn!("Failed to write tuning.ron: {e}");
                }
            }
            Err(e) => {
                warn!("Failed to serialize tuning: {e}");
            }
        }
    }

    /// Reload from file (called by key press).
    pub fn reload(&mut self) {
        *self = Self::load_or_default();
        info!("Tuning reloaded");
    }
}
