use bevy::prelude::*;

use super::events::MechEvent;

/// Hook pipeline: the overridable seam for host code. The core only reports
/// transitions; plugins that want custom jump/dash/boost behavior add their
/// own readers of the same messages.
pub fn process_hooks(mut events: MessageReader<MechEvent>) {
    for event in events.read() {
        match event {
            MechEvent::JumpStarted { .. } => info!("[Hook] jump start"),
            MechEvent::JumpStopped { .. } => info!("[Hook] jump stop"),
            MechEvent::DashLaunched { kind, .. } => info!("[Hook] dash {kind:?}"),
            MechEvent::BoostDepleted { .. } => info!("[Hook] boost depleted"),
        }
    }
}
