//! Ventilation control driven by room occupancy.

use std::sync::atomic::{AtomicBool, Ordering};

use atria_registry::OccupancyObserver;
use atria_types::RoomId;
use tracing::{debug, info};

/// Per-room ventilation proxy.
///
/// Follows the room's occupied flag: people in the room switch the fans
/// on, an empty room switches them off. The "device" is an in-memory
/// flag readable through [`is_ventilating`](Self::is_ventilating).
///
/// Notifications arrive on every occupancy report, so repeats with an
/// unchanged flag are common; the controller treats them as no-ops.
pub struct HvacController {
    room: RoomId,
    ventilating: AtomicBool,
}

impl HvacController {
    /// Controller for `room`, fans off.
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            ventilating: AtomicBool::new(false),
        }
    }

    /// The room this controller serves.
    pub fn room(&self) -> RoomId {
        self.room
    }

    /// Whether the fans are currently running.
    pub fn is_ventilating(&self) -> bool {
        self.ventilating.load(Ordering::SeqCst)
    }
}

impl OccupancyObserver for HvacController {
    fn on_occupancy(&self, room: RoomId, occupied: bool) -> Result<(), String> {
        let was = self.ventilating.swap(occupied, Ordering::SeqCst);
        if was == occupied {
            debug!(%room, ventilating = occupied, "hvac already in target state");
        } else if occupied {
            info!(%room, "ventilation on");
        } else {
            info!(%room, "ventilation off");
        }
        Ok(())
    }
}
