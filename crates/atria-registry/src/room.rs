//! A single room's mutable state.

use atria_types::{BookingWindow, OCCUPANCY_THRESHOLD, RoomId, RoomSnapshot};

/// One room's state: capacity, last reported occupancy, and the current
/// reservation.
///
/// Rooms are owned exclusively by the registry behind its per-room lock
/// and never escape as live references; callers observe [`RoomSnapshot`]
/// copies or act through operations.
///
/// "Occupied" and "booked" are independent axes: a room can be occupied
/// with no reservation (walk-ins) and reserved while physically empty
/// (the meeting hasn't started). Nothing here couples the two.
#[derive(Debug)]
pub(crate) struct Room {
    pub(crate) id: RoomId,
    pub(crate) max_capacity: u32,
    pub(crate) occupant_count: u32,
    pub(crate) occupied: bool,
    pub(crate) booking: Option<BookingWindow>,
}

impl Room {
    /// A fresh room: unoccupied, unbooked.
    pub(crate) fn new(id: RoomId, max_capacity: u32) -> Self {
        Self {
            id,
            max_capacity,
            occupant_count: 0,
            occupied: false,
            booking: None,
        }
    }

    /// Copy the current state out for callers.
    pub(crate) fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.id,
            max_capacity: self.max_capacity,
            occupant_count: self.occupant_count,
            is_occupied: self.occupied,
            booking: self.booking,
        }
    }

    /// Store a fresh headcount and recompute the occupied flag.
    ///
    /// Occupancy is always derived from the latest report, never
    /// accumulated. Returns `true` if the flag flipped.
    pub(crate) fn record_occupancy(&mut self, count: u32) -> bool {
        let occupied = count >= OCCUPANCY_THRESHOLD;
        let changed = occupied != self.occupied;
        self.occupant_count = count;
        self.occupied = occupied;
        changed
    }

    /// Take the reservation out, returning it if one was set.
    pub(crate) fn clear_booking(&mut self) -> Option<BookingWindow> {
        self.booking.take()
    }
}
