use bevy::prelude::*;

use super::dash::DashKind;

/// Discrete control triggers from the input layer (separate message type so
/// the binding layer stays decoupled from the ability core).
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    JumpStart,
    JumpStop,
    BoostStart,
    BoostEnd,
    DashTrigger,
}

/// Ability and locomotion transitions emitted by the core, consumed by the
/// hook pipeline.
#[derive(Message, Debug, Clone)]
pub enum MechEvent {
    JumpStarted { entity: Entity },
    JumpStopped { entity: Entity },
    DashLaunched { entity: Entity, kind: DashKind },
    BoostDepleted { entity: Entity },
}
