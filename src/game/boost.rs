use bevy::prelude::*;

use crate::config::tuning::Tuning;

use super::components::{Mech, SpeedCap};
use super::energy::EnergyPool;
use super::events::{ControlMessage, MechEvent};

/// Boost latch: engaged by a boost-start message while energy remains,
/// cleared by boost-end or depletion. A depleted boost cannot re-engage
/// until the input is re-asserted.
#[derive(Component, Default, Debug)]
pub struct BoostState {
    pub boosting: bool,
}

/// One frame of the boost controller. Returns true when this frame depleted
/// the pool (the flag is cleared and the cap reverted in the same frame).
pub(crate) fn boost_frame(
    tuning: &Tuning,
    dt: f32,
    boost: &mut BoostState,
    energy: &mut EnergyPool,
    cap: &mut f32,
) -> bool {
    if boost.boosting && !energy.is_empty() {
        *cap = tuning.boost_speed;
        if energy.deplete(tuning.energy_deplete_rate, dt) {
            boost.boosting = false;
            *cap = tuning.normal_speed;
            return true;
        }
        return false;
    }

    boost.boosting = false;
    *cap = tuning.normal_speed;
    energy.regen(tuning.energy_regen_rate, dt);
    false
}

/// BoostSet: consume boost start/stop messages. Engaging requires energy in
/// the pool; a depleted latch stays down until the next start message.
pub fn read_boost_messages(
    mut messages: MessageReader<ControlMessage>,
    mut query: Query<(&mut BoostState, &EnergyPool), With<Mech>>,
) {
    for message in messages.read() {
        match message {
            ControlMessage::BoostStart => {
                for (mut boost, energy) in &mut query {
                    if !energy.is_empty() {
                        boost.boosting = true;
                    }
                }
            }
            ControlMessage::BoostEnd => {
                for (mut boost, _) in &mut query {
                    boost.boosting = false;
                }
            }
            _ => {}
        }
    }
}

/// BoostSet: evaluated unconditionally every tick — retargets the speed cap
/// and moves energy along its continuous trajectory.
pub fn boost_tick(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut events: MessageWriter<MechEvent>,
    mut query: Query<(Entity, &mut BoostState, &mut EnergyPool, &mut SpeedCap), With<Mech>>,
) {
    let dt = time.delta_secs();
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    for (entity, mut boost, mut energy, mut cap) in &mut query {
        if boost_frame(&tuning, dt, &mut boost, &mut energy, &mut cap.0) {
            info!("[Boost] energy depleted");
            events.write(MechEvent::BoostDepleted { entity });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn depletion_clears_boost_and_reverts_cap_in_the_same_frame() {
        let tuning = Tuning::default();
        let mut boost = BoostState { boosting: true };
        let mut energy = EnergyPool::full(1.0);
        let mut cap = tuning.normal_speed;

        // 1 unit at 20 units/s is gone within 0.05 s.
        let depleted = boost_frame(&tuning, 0.1, &mut boost, &mut energy, &mut cap);
        assert!(depleted);
        assert!(!boost.boosting);
        assert_abs_diff_eq!(cap, tuning.normal_speed);
        assert_eq!(energy.current.0, 0.0);
    }

    #[test]
    fn boost_does_not_restart_until_reasserted() {
        let tuning = Tuning::default();
        let mut boost = BoostState { boosting: true };
        let mut energy = EnergyPool::full(0.5);
        let mut cap = tuning.normal_speed;

        assert!(boost_frame(&tuning, 1.0, &mut boost, &mut energy, &mut cap));

        // Input still held, energy regenerating: the latch stays down.
        for _ in 0..120 {
            let depleted = boost_frame(&tuning, 1.0 / 60.0, &mut boost, &mut energy, &mut cap);
            assert!(!depleted);
            assert!(!boost.boosting);
            assert_abs_diff_eq!(cap, tuning.normal_speed);
        }
        assert!(energy.current.0 > 0.0);
    }

    #[test]
    fn boosting_drains_and_raises_the_cap() {
        let tuning = Tuning::default();
        let mut boost = BoostState { boosting: true };
        let mut energy = EnergyPool::full(tuning.energy_max);
        let mut cap = tuning.normal_speed;

        boost_frame(&tuning, 0.5, &mut boost, &mut energy, &mut cap);
        assert_abs_diff_eq!(cap, tuning.boost_speed);
        assert_abs_diff_eq!(
            energy.current.0,
            tuning.energy_max - tuning.energy_deplete_rate * 0.5
        );
    }

    #[test]
    fn idle_regen_caps_at_max() {
        let tuning = Tuning::default();
        let mut boost = BoostState::default();
        let mut energy = EnergyPool::full(tuning.energy_max);
        energy.debit(40.0);
        let mut cap = tuning.boost_speed;

        for _ in 0..600 {
            boost_frame(&tuning, 1.0 / 60.0, &mut boost, &mut energy, &mut cap);
        }
        assert_abs_diff_eq!(cap, tuning.normal_speed);
        assert_abs_diff_eq!(energy.current.0, tuning.energy_max);
    }
}
