//! Lighting control driven by room occupancy.

use std::sync::atomic::{AtomicBool, Ordering};

use atria_registry::OccupancyObserver;
use atria_types::RoomId;
use tracing::{debug, info};

/// Per-room lighting circuit proxy.
///
/// Same follow-the-flag discipline as the HVAC controller: lights on
/// while the room counts as occupied, off once it empties. State is an
/// in-memory flag readable through [`is_lit`](Self::is_lit).
pub struct LightingController {
    room: RoomId,
    lit: AtomicBool,
}

impl LightingController {
    /// Controller for `room`, lights off.
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            lit: AtomicBool::new(false),
        }
    }

    /// The room this controller serves.
    pub fn room(&self) -> RoomId {
        self.room
    }

    /// Whether the circuit is currently on.
    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::SeqCst)
    }
}

impl OccupancyObserver for LightingController {
    fn on_occupancy(&self, room: RoomId, occupied: bool) -> Result<(), String> {
        let was = self.lit.swap(occupied, Ordering::SeqCst);
        if was == occupied {
            debug!(%room, lit = occupied, "lighting already in target state");
        } else if occupied {
            info!(%room, "lights on");
        } else {
            info!(%room, "lights off");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_controller_starts_dark() {
        let lights = LightingController::new(RoomId(2));
        assert_eq!(lights.room(), RoomId(2));
        assert!(!lights.is_lit());
    }

    #[test]
    fn test_lights_follow_the_occupancy_flag() {
        let lights = LightingController::new(RoomId(2));

        lights.on_occupancy(RoomId(2), true).unwrap();
        assert!(lights.is_lit());

        // Identical repeat changes nothing.
        lights.on_occupancy(RoomId(2), true).unwrap();
        assert!(lights.is_lit());

        lights.on_occupancy(RoomId(2), false).unwrap();
        assert!(!lights.is_lit());
    }
}
