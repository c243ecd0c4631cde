//! The three reservation operations, as command-style values.
//!
//! Each operation is a plain serializable struct carrying its
//! parameters. Construct one and `apply` it against a registry
//! reference. Operations read and write nothing they were not handed
//! explicitly, so the same command value can be replayed against
//! different registries (or logged, or shipped across a channel) without
//! surprises.

use std::time::Duration;

use atria_types::{BookingWindow, RoomId, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{ConflictReason, RegistryError, RoomRegistry};

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

/// Reserve a room for the window `[start, start + duration)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// The room to reserve.
    pub room: RoomId,
    /// When the reservation begins.
    pub start: Timestamp,
    /// How long it lasts. Must be positive.
    pub duration: Duration,
}

impl Book {
    /// Booking request for `room` starting at `start`.
    pub fn new(room: RoomId, start: Timestamp, duration: Duration) -> Self {
        Self {
            room,
            start,
            duration,
        }
    }

    /// Validate and apply this booking against `registry`.
    ///
    /// Checks run in a fixed order, each failing the whole operation:
    ///
    /// 1. unknown room id → `NotFound`;
    /// 2. zero `duration` → `InvalidArgument`;
    /// 3. room currently occupied → `Conflict` (occupancy blocks booking
    ///    even when no reservation is in place);
    /// 4. a reservation whose end lies after the current time →
    ///    `Conflict` carrying that end time.
    ///
    /// An expired window does not block: it is overwritten without an
    /// explicit cancel. On success the stored window comes back; its
    /// `end` is the computed end time. The whole check-and-set is atomic
    /// with respect to other operations on the same room.
    pub fn apply(&self, registry: &RoomRegistry) -> Result<BookingWindow, RegistryError> {
        let now = Timestamp::now();
        let booked = registry.with_room(self.room, |room| {
            if self.duration.is_zero() {
                return Err(RegistryError::InvalidArgument(
                    "duration must be positive".to_string(),
                ));
            }
            if room.occupied {
                return Err(RegistryError::Conflict {
                    room: room.id,
                    reason: ConflictReason::Occupied,
                });
            }
            if let Some(window) = room.booking.filter(|w| w.is_active(now)) {
                return Err(RegistryError::Conflict {
                    room: room.id,
                    reason: ConflictReason::AlreadyBooked { until: window.end },
                });
            }
            let window = BookingWindow::starting_at(self.start, self.duration);
            room.booking = Some(window);
            Ok(window)
        })?;

        match &booked {
            Ok(window) => info!(room = %self.room, window = %window, "room booked"),
            Err(error) => debug!(room = %self.room, error = %error, "booking refused"),
        }
        booked
    }
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

/// Release a room's reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cancel {
    /// The room whose reservation to clear.
    pub room: RoomId,
}

impl Cancel {
    /// Cancellation request for `room`.
    pub fn new(room: RoomId) -> Self {
        Self { room }
    }

    /// Apply this cancellation against `registry`.
    ///
    /// Clears the window whether it is still active or already lapsed,
    /// returning what was cleared. `NotBooked` means there was nothing
    /// to clear — a benign, idempotent outcome that mutates no state and
    /// is safe for callers to ignore. An unknown id still fails with
    /// `NotFound`.
    pub fn apply(&self, registry: &RoomRegistry) -> Result<BookingWindow, RegistryError> {
        let cancelled = registry.with_room(self.room, |room| {
            room.clear_booking().ok_or(RegistryError::NotBooked(room.id))
        })?;

        match &cancelled {
            Ok(window) => info!(room = %self.room, window = %window, "booking cancelled"),
            Err(_) => debug!(room = %self.room, "cancel on unbooked room"),
        }
        cancelled
    }
}

// ---------------------------------------------------------------------------
// ReportOccupancy
// ---------------------------------------------------------------------------

/// Outcome of an accepted occupancy report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyOutcome {
    /// The newly derived occupied flag.
    pub occupied: bool,
    /// Whether the flag differs from its previous value.
    pub changed: bool,
    /// How many subscribers were notified.
    pub notified: usize,
}

/// Record a fresh headcount for a room and broadcast the derived state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOccupancy {
    /// The room the headcount belongs to.
    pub room: RoomId,
    /// Latest sensor reading. Replaces the previous count outright.
    pub occupant_count: u32,
}

impl ReportOccupancy {
    /// Occupancy report of `occupant_count` people in `room`.
    pub fn new(room: RoomId, occupant_count: u32) -> Self {
        Self {
            room,
            occupant_count,
        }
    }

    /// Apply this report against `registry`.
    ///
    /// Stores the count, derives `occupied` from the occupancy
    /// threshold, then notifies every subscriber for the room — on every
    /// report, changed or not, so subscribers must be idempotent (see
    /// [`OccupancyObserver`](crate::OccupancyObserver)). The broadcast
    /// runs after the room lock is released.
    ///
    /// `NotFound` is the only failure. A count above `max_capacity` is
    /// stored as reported: capacity is a planning ceiling, not a sensor
    /// validation bound.
    pub fn apply(&self, registry: &RoomRegistry) -> Result<OccupancyOutcome, RegistryError> {
        let (occupied, changed) = registry.with_room(self.room, |room| {
            let changed = room.record_occupancy(self.occupant_count);
            (room.occupied, changed)
        })?;

        let notified = registry.notify(self.room, occupied);

        if changed {
            info!(
                room = %self.room,
                count = self.occupant_count,
                occupied,
                notified,
                "occupancy changed"
            );
        } else {
            debug!(
                room = %self.room,
                count = self.occupant_count,
                occupied,
                notified,
                "occupancy reported"
            );
        }

        Ok(OccupancyOutcome {
            occupied,
            changed,
            notified,
        })
    }
}

// =========================================================================
// Tests
// =========================================================================
