//! Integration tests for the registry and operations using mock observers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use atria_registry::ops::{Book, Cancel, ReportOccupancy};
use atria_registry::{
    ConflictReason, OccupancyObserver, RegistryConfig, RegistryError, RoomRegistry,
};
use atria_types::{RoomId, Timestamp};

// =========================================================================
// Mock observers
// =========================================================================

type NotificationLog = Arc<Mutex<Vec<(&'static str, RoomId, bool)>>>;

/// Appends its tag to a shared log on every notification.
struct TaggedObserver {
    tag: &'static str,
    log: NotificationLog,
}

impl TaggedObserver {
    fn new(tag: &'static str, log: &NotificationLog) -> Arc<Self> {
        Arc::new(Self {
            tag,
            log: Arc::clone(log),
        })
    }
}

impl OccupancyObserver for TaggedObserver {
    fn on_occupancy(&self, room: RoomId, occupied: bool) -> Result<(), String> {
        self.log.lock().unwrap().push((self.tag, room, occupied));
        Ok(())
    }
}

/// Always fails, simulating a broken device handler.
struct FaultyObserver;

impl OccupancyObserver for FaultyObserver {
    fn on_occupancy(&self, _room: RoomId, _occupied: bool) -> Result<(), String> {
        Err("device offline".to_string())
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn registry_with_rooms(rooms: u32) -> RoomRegistry {
    RoomRegistry::with_config(RegistryConfig {
        room_count: rooms,
        default_capacity: 10,
    })
}

fn empty_log() -> NotificationLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn hour() -> Duration {
    Duration::from_secs(3_600)
}

// =========================================================================
// End-to-end booking lifecycle
// =========================================================================

#[test]
fn test_booking_lifecycle_end_to_end() {
    let registry = registry_with_rooms(3);
    let log = empty_log();
    registry.add_observer(RoomId(1), TaggedObserver::new("hvac", &log));

    // Book room 1 for an hour starting now.
    let start = Timestamp::now();
    let window = Book::new(RoomId(1), start, hour())
        .apply(&registry)
        .unwrap();
    assert_eq!(window.end, start.saturating_add(hour()));

    // Three people walk in: occupied, observer sees `true`.
    let outcome = ReportOccupancy::new(RoomId(1), 3).apply(&registry).unwrap();
    assert!(outcome.occupied);
    assert!(outcome.changed);
    assert_eq!(outcome.notified, 1);
    assert_eq!(*log.lock().unwrap(), vec![("hvac", RoomId(1), true)]);

    let snap = registry.get_status(RoomId(1)).unwrap();
    assert!(snap.is_occupied);
    assert_eq!(snap.booking, Some(window));

    // Cancel clears the window.
    Cancel::new(RoomId(1)).apply(&registry).unwrap();
    assert!(registry.get_status(RoomId(1)).unwrap().booking.is_none());

    // Cancelling again is the benign NotBooked outcome.
    assert!(matches!(
        Cancel::new(RoomId(1)).apply(&registry),
        Err(RegistryError::NotBooked(RoomId(1)))
    ));
}

#[test]
fn test_single_occupant_room_stays_unoccupied() {
    let registry = registry_with_rooms(3);
    let outcome = ReportOccupancy::new(RoomId(2), 1).apply(&registry).unwrap();
    assert!(!outcome.occupied);
    assert!(!registry.get_status(RoomId(2)).unwrap().is_occupied);
}

#[test]
fn test_every_operation_rejects_out_of_range_ids() {
    let registry = registry_with_rooms(3);

    for id in [RoomId(0), RoomId(4), RoomId(99)] {
        assert!(matches!(
            registry.get_status(id),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.set_max_capacity(id, 5),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            Book::new(id, Timestamp::now(), hour()).apply(&registry),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            Cancel::new(id).apply(&registry),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            ReportOccupancy::new(id, 2).apply(&registry),
            Err(RegistryError::NotFound(_))
        ));
    }
}

#[test]
fn test_occupied_room_cannot_be_booked_until_cleared() {
    let registry = registry_with_rooms(1);
    ReportOccupancy::new(RoomId(1), 2).apply(&registry).unwrap();

    assert!(matches!(
        Book::new(RoomId(1), Timestamp::now(), hour()).apply(&registry),
        Err(RegistryError::Conflict {
            reason: ConflictReason::Occupied,
            ..
        })
    ));

    // Everyone leaves; booking goes through.
    ReportOccupancy::new(RoomId(1), 0).apply(&registry).unwrap();
    Book::new(RoomId(1), Timestamp::now(), hour())
        .apply(&registry)
        .unwrap();
}

// =========================================================================
// Observer notification semantics
// =========================================================================

#[test]
fn test_observers_notified_on_every_report_even_unchanged() {
    let registry = registry_with_rooms(1);
    let log = empty_log();
    registry.add_observer(RoomId(1), TaggedObserver::new("hvac", &log));

    let first = ReportOccupancy::new(RoomId(1), 3).apply(&registry).unwrap();
    let second = ReportOccupancy::new(RoomId(1), 3).apply(&registry).unwrap();

    assert!(first.changed);
    assert!(!second.changed);
    // Both reports reached the observer, identical flag included.
    assert_eq!(
        *log.lock().unwrap(),
        vec![("hvac", RoomId(1), true), ("hvac", RoomId(1), true)]
    );
}

#[test]
fn test_observers_notified_in_registration_order() {
    let registry = registry_with_rooms(1);
    let log = empty_log();
    registry.add_observer(RoomId(1), TaggedObserver::new("first", &log));
    registry.add_observer(RoomId(1), TaggedObserver::new("second", &log));
    registry.add_observer(RoomId(1), TaggedObserver::new("third", &log));

    ReportOccupancy::new(RoomId(1), 0).apply(&registry).unwrap();

    let tags: Vec<_> = log.lock().unwrap().iter().map(|(tag, _, _)| *tag).collect();
    assert_eq!(tags, vec!["first", "second", "third"]);
}

#[test]
fn test_duplicate_registration_notified_twice() {
    let registry = registry_with_rooms(1);
    let log = empty_log();
    let observer = TaggedObserver::new("dup", &log);

    registry.add_observer(RoomId(1), observer.clone());
    registry.add_observer(RoomId(1), observer);

    let outcome = ReportOccupancy::new(RoomId(1), 2).apply(&registry).unwrap();
    assert_eq!(outcome.notified, 2);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn test_observer_for_other_room_not_invoked() {
    let registry = registry_with_rooms(2);
    let log = empty_log();
    registry.add_observer(RoomId(2), TaggedObserver::new("other", &log));

    let outcome = ReportOccupancy::new(RoomId(1), 5).apply(&registry).unwrap();
    assert_eq!(outcome.notified, 0);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_failing_observer_does_not_block_later_ones() {
    let registry = registry_with_rooms(1);
    let log = empty_log();
    registry.add_observer(RoomId(1), TaggedObserver::new("before", &log));
    registry.add_observer(RoomId(1), Arc::new(FaultyObserver));
    registry.add_observer(RoomId(1), TaggedObserver::new("after", &log));

    // The report still succeeds and all three handlers were invoked.
    let outcome = ReportOccupancy::new(RoomId(1), 4).apply(&registry).unwrap();
    assert_eq!(outcome.notified, 3);

    let tags: Vec<_> = log.lock().unwrap().iter().map(|(tag, _, _)| *tag).collect();
    assert_eq!(tags, vec!["before", "after"]);
}

#[test]
fn test_remove_observer_stops_future_notifications() {
    let registry = registry_with_rooms(1);
    let log = empty_log();
    let removed = registry.add_observer(RoomId(1), TaggedObserver::new("gone", &log));
    registry.add_observer(RoomId(1), TaggedObserver::new("kept", &log));

    assert!(registry.remove_observer(removed));
    // A second removal of the same handle is a no-op.
    assert!(!registry.remove_observer(removed));

    ReportOccupancy::new(RoomId(1), 2).apply(&registry).unwrap();

    let tags: Vec<_> = log.lock().unwrap().iter().map(|(tag, _, _)| *tag).collect();
    assert_eq!(tags, vec!["kept"]);
    assert_eq!(registry.observer_count(RoomId(1)), 1);
}

#[test]
fn test_observers_survive_reconfigure() {
    let registry = registry_with_rooms(2);
    let log = empty_log();
    registry.add_observer(RoomId(1), TaggedObserver::new("hvac", &log));

    // Full reset: bookings and occupancy are gone, the subscription is not.
    registry.configure(RegistryConfig {
        room_count: 4,
        default_capacity: 6,
    });
    assert_eq!(registry.observer_count(RoomId(1)), 1);

    ReportOccupancy::new(RoomId(1), 2).apply(&registry).unwrap();
    assert_eq!(*log.lock().unwrap(), vec![("hvac", RoomId(1), true)]);
}

#[test]
fn test_observer_can_read_registry_reentrantly() {
    /// Looks the room back up during notification.
    struct StatusReader {
        registry: Arc<RoomRegistry>,
        seen_count: Mutex<Option<u32>>,
    }

    impl OccupancyObserver for StatusReader {
        fn on_occupancy(&self, room: RoomId, _occupied: bool) -> Result<(), String> {
            let snap = self.registry.get_status(room).map_err(|e| e.to_string())?;
            *self.seen_count.lock().unwrap() = Some(snap.occupant_count);
            Ok(())
        }
    }

    let registry = Arc::new(registry_with_rooms(1));
    let reader = Arc::new(StatusReader {
        registry: Arc::clone(&registry),
        seen_count: Mutex::new(None),
    });
    registry.add_observer(RoomId(1), reader.clone());

    ReportOccupancy::new(RoomId(1), 7).apply(&registry).unwrap();

    // The handler ran outside the room lock and saw the committed count.
    assert_eq!(*reader.seen_count.lock().unwrap(), Some(7));
}
