//! Occupancy observers and the per-room subscription table.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use atria_types::{RoomId, SubscriberId};

/// Counter for generating unique subscriber ids.
///
/// Process-wide and never reused, so a handle kept past `remove_observer`
/// can't accidentally remove a later subscription.
static NEXT_SUBSCRIBER_ID: AtomicU64 = AtomicU64::new(1);

/// Receives a room's derived occupied/unoccupied state.
///
/// Implementations react by toggling whatever they control (ventilation,
/// a lighting circuit, a dashboard). Two contract points:
///
/// - **Idempotence.** The registry notifies on every accepted occupancy
///   report, not only on transitions, so handlers see repeated identical
///   notifications and must treat them as no-ops.
/// - **Isolation.** Returning `Err` reports a handler-local failure. The
///   registry logs it and continues with the remaining subscribers; it
///   never rolls back the room state or aborts the broadcast.
///
/// Handlers run outside all registry locks and may call back into the
/// registry (e.g. `get_status`), but must not block for long: they run
/// on the reporting caller's thread.
pub trait OccupancyObserver: Send + Sync {
    /// Called with the room and its newly computed occupied flag.
    fn on_occupancy(&self, room: RoomId, occupied: bool) -> Result<(), String>;
}

/// Per-room subscription lists.
///
/// Append-only per room so notification order is registration order.
/// Duplicates are permitted and not deduplicated: registering the same
/// observer twice means it is invoked twice per report.
#[derive(Default)]
pub(crate) struct ObserverTable {
    by_room: HashMap<RoomId, Vec<(SubscriberId, Arc<dyn OccupancyObserver>)>>,
}

impl ObserverTable {
    /// Append a subscription for `room` and hand back its id.
    pub(crate) fn subscribe(
        &mut self,
        room: RoomId,
        observer: Arc<dyn OccupancyObserver>,
    ) -> SubscriberId {
        let id = SubscriberId(NEXT_SUBSCRIBER_ID.fetch_add(1, Ordering::Relaxed));
        self.by_room.entry(room).or_default().push((id, observer));
        id
    }

    /// Remove a subscription. Returns `true` if it existed.
    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        for entries in self.by_room.values_mut() {
            if let Some(pos) = entries.iter().position(|(sid, _)| *sid == id) {
                entries.remove(pos);
                return true;
            }
        }
        false
    }

    /// The subscribers for one room, cloned out in registration order.
    ///
    /// Cloning (cheap `Arc` bumps) lets the caller drop the table lock
    /// before invoking any handler.
    pub(crate) fn subscribers_for(
        &self,
        room: RoomId,
    ) -> Vec<(SubscriberId, Arc<dyn OccupancyObserver>)> {
        self.by_room.get(&room).cloned().unwrap_or_default()
    }

    /// Number of subscriptions currently held for `room`.
    pub(crate) fn count_for(&self, room: RoomId) -> usize {
        self.by_room.get(&room).map_or(0, Vec::len)
    }
}
