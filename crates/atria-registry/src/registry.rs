//! The room registry: shared state, synchronized access, and the
//! occupancy broadcast.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use atria_types::{RoomId, RoomSnapshot, SubscriberId};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::observer::{ObserverTable, OccupancyObserver};
use crate::room::Room;

/// Recover the guard from a lock, poisoned or not.
///
/// Critical sections under registry locks contain no panicking code, so
/// a poisoned guard still holds consistent data; recovery keeps one
/// crashed caller from wedging every later one.
fn recover<G>(result: Result<G, PoisonError<G>>) -> G {
    result.unwrap_or_else(PoisonError::into_inner)
}

/// Process-shared room state and the observer broadcast.
///
/// Locking discipline, outer to inner:
///
/// - the `rooms` readers-writer lock: held for write only by
///   [`configure`](Self::configure) (the full-barrier reset), for read
///   by every per-room operation;
/// - one `Mutex` per room: makes read-check-write sequences on that room
///   indivisible, while operations on distinct rooms run in parallel;
/// - the observer lock, never held together with a room lock. Handlers
///   run after the mutation commits, outside all registry locks.
///
/// A registry is a plain value with no global state behind it: construct
/// one at the composition point (usually inside an [`Arc`]) and pass it
/// to the operations in [`crate::ops`]. Tests can run any number of
/// independent registries side by side.
pub struct RoomRegistry {
    /// Rooms stored densely: id `n` lives at index `n - 1`.
    rooms: RwLock<Vec<Mutex<Room>>>,
    /// Subscriptions keyed by room id, not room instance, so they
    /// survive reconfiguration.
    observers: RwLock<ObserverTable>,
}

impl RoomRegistry {
    /// An unconfigured registry with no rooms.
    ///
    /// Every room id resolves to `NotFound` until
    /// [`configure`](Self::configure) runs. Observers may be registered
    /// before the first configure.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(Vec::new()),
            observers: RwLock::new(ObserverTable::default()),
        }
    }

    /// A registry with `config` already applied.
    pub fn with_config(config: RegistryConfig) -> Self {
        let registry = Self::new();
        registry.configure(config);
        registry
    }

    // -----------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------

    /// Replace the entire room set with fresh rooms built from `config`.
    ///
    /// Rooms get ids `1..=room_count`, the default capacity, no
    /// occupancy, no booking. This is an explicit reset, not an additive
    /// operation: prior bookings and occupancy are discarded. Registered
    /// observers are kept.
    ///
    /// Always succeeds (out-of-range config values are clamped, see
    /// [`RegistryConfig::validated`]). Holding the write lock makes this
    /// a full barrier: no other registry operation overlaps it.
    pub fn configure(&self, config: RegistryConfig) {
        let config = config.validated();
        let fresh: Vec<Mutex<Room>> = (1..=u64::from(config.room_count))
            .map(|id| Mutex::new(Room::new(RoomId(id), config.default_capacity)))
            .collect();

        {
            let mut rooms = recover(self.rooms.write());
            *rooms = fresh;
        }

        info!(
            room_count = config.room_count,
            default_capacity = config.default_capacity,
            "registry configured"
        );
    }

    // -----------------------------------------------------------------
    // Room access
    // -----------------------------------------------------------------

    /// Index of a room id in the dense store.
    ///
    /// Id zero and anything past the end of the vector resolve to
    /// `NotFound` at the lookup site.
    fn index_of(room_id: RoomId) -> Option<usize> {
        room_id.0.checked_sub(1).and_then(|ix| usize::try_from(ix).ok())
    }

    /// Run `f` on one room under the outer read lock plus that room's
    /// mutex.
    ///
    /// This is the atomicity primitive every operation builds on: while
    /// `f` runs, no other caller can touch the same room, and `configure`
    /// is fully excluded. `f` must not call back into the registry.
    pub(crate) fn with_room<T>(
        &self,
        room_id: RoomId,
        f: impl FnOnce(&mut Room) -> T,
    ) -> Result<T, RegistryError> {
        let rooms = recover(self.rooms.read());
        let slot = Self::index_of(room_id)
            .and_then(|ix| rooms.get(ix))
            .ok_or(RegistryError::NotFound(room_id))?;
        let mut room = recover(slot.lock());
        Ok(f(&mut room))
    }

    /// The current state of one room as an immutable copy.
    ///
    /// A snapshot, not a live reference: holding the result never blocks
    /// other callers, and concurrent updates are simply not visible in
    /// it.
    pub fn get_status(&self, room_id: RoomId) -> Result<RoomSnapshot, RegistryError> {
        self.with_room(room_id, |room| room.snapshot())
    }

    /// Update one room's capacity ceiling in place.
    ///
    /// Fails with `NotFound` for an unknown id, `InvalidArgument` for a
    /// zero capacity. Does not touch occupancy or booking state.
    pub fn set_max_capacity(
        &self,
        room_id: RoomId,
        max_capacity: u32,
    ) -> Result<(), RegistryError> {
        self.with_room(room_id, |room| {
            if max_capacity == 0 {
                return Err(RegistryError::InvalidArgument(
                    "max_capacity must be positive".to_string(),
                ));
            }
            room.max_capacity = max_capacity;
            info!(%room_id, max_capacity, "room capacity updated");
            Ok(())
        })?
    }

    /// Number of rooms currently configured.
    pub fn room_count(&self) -> usize {
        recover(self.rooms.read()).len()
    }

    /// Snapshots of every configured room, in id order.
    ///
    /// Rooms are locked one at a time, so the result is consistent per
    /// room but not a cross-room atomic view.
    pub fn snapshot_all(&self) -> Vec<RoomSnapshot> {
        let rooms = recover(self.rooms.read());
        rooms
            .iter()
            .map(|slot| recover(slot.lock()).snapshot())
            .collect()
    }

    // -----------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------

    /// Register `observer` for `room_id` and return its subscription id.
    ///
    /// Appends without deduplication: registering the same observer
    /// twice means two notifications per report, and notification order
    /// is registration order. Never fails. The room id does not have to
    /// be configured yet — subscriptions are keyed by id and survive
    /// [`configure`](Self::configure); one for an out-of-range id simply
    /// never fires.
    pub fn add_observer(
        &self,
        room_id: RoomId,
        observer: Arc<dyn OccupancyObserver>,
    ) -> SubscriberId {
        let subscriber_id = recover(self.observers.write()).subscribe(room_id, observer);
        debug!(%room_id, %subscriber_id, "observer registered");
        subscriber_id
    }

    /// Drop one subscription. Returns `true` if it existed.
    pub fn remove_observer(&self, subscriber_id: SubscriberId) -> bool {
        let removed = recover(self.observers.write()).unsubscribe(subscriber_id);
        if removed {
            debug!(%subscriber_id, "observer removed");
        }
        removed
    }

    /// Number of subscriptions registered for `room_id`.
    pub fn observer_count(&self, room_id: RoomId) -> usize {
        recover(self.observers.read()).count_for(room_id)
    }

    /// Broadcast `occupied` to every subscriber registered for
    /// `room_id`, in registration order. Returns how many were invoked.
    ///
    /// The subscriber list is copied out and the observer lock released
    /// before the first handler runs, so a slow handler cannot stall
    /// registrations and a handler may safely call back into the
    /// registry. A failing handler is logged and skipped; the remaining
    /// subscribers are still notified.
    pub fn notify(&self, room_id: RoomId, occupied: bool) -> usize {
        let subscribers = recover(self.observers.read()).subscribers_for(room_id);
        for (subscriber_id, observer) in &subscribers {
            if let Err(error) = observer.on_occupancy(room_id, occupied) {
                warn!(
                    %room_id,
                    %subscriber_id,
                    error = %error,
                    "observer notification failed"
                );
            }
        }
        subscribers.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
