//! Shared vocabulary types for the Atria room core.
//!
//! Everything in this crate is a plain value: identifiers, timestamps,
//! booking windows, and the snapshot struct that status reads return.
//! There is no behavior here beyond construction and comparison — the
//! registry crate owns all mutable state.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Occupancy policy
// ---------------------------------------------------------------------------

/// Minimum reported headcount at which a room counts as occupied.
///
/// This is the minimum-quorum rule: a single person in a ten-person
/// conference room does not flip the room to occupied, two or more do.
/// Occupancy is always recomputed from the latest report — the registry
/// never increments or decrements a running tally.
pub const OCCUPANCY_THRESHOLD: u32 = 2;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a room.
///
/// Newtype over `u64` so a room id can't be confused with a capacity or
/// a headcount in a signature. Valid ids are assigned by the registry at
/// configure time, starting from 1; `RoomId(0)` is never configured and
/// resolves to "not found" everywhere.
///
/// `#[serde(transparent)]` makes `RoomId(3)` serialize as the plain
/// number `3`, not as a one-field object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// A unique identifier for an observer subscription.
///
/// Returned by `add_observer` and consumed by `remove_observer`. Ids are
/// process-wide unique and never reused, so a stale handle can't remove
/// somebody else's later subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(pub u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A point in time, in whole milliseconds since the Unix epoch.
///
/// The core only ever compares timestamps and adds durations to them, so
/// a plain ordered integer is enough — no timezone or calendar logic.
/// Using an absolute integer (rather than `Instant`) also lets tests
/// fabricate bookings in the past or far future without sleeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        // A system clock before 1970 yields epoch rather than a panic.
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    /// Construct from raw milliseconds since the Unix epoch.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw milliseconds since the Unix epoch.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward by `d`, saturating at the numeric
    /// limit instead of wrapping.
    pub fn saturating_add(self, d: Duration) -> Self {
        Self(self.0.saturating_add(d.as_millis() as u64))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ---------------------------------------------------------------------------
// BookingWindow
// ---------------------------------------------------------------------------

/// A half-open reservation interval `[start, end)`.
///
/// Windows are only built through [`BookingWindow::starting_at`], so both
/// endpoints are always present together — a room either has a whole
/// window or none at all (`Option<BookingWindow>`), never a start without
/// an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    /// When the reservation begins.
    pub start: Timestamp,
    /// When the reservation ends (exclusive).
    pub end: Timestamp,
}

impl BookingWindow {
    /// Build the window `[start, start + duration)`.
    pub fn starting_at(start: Timestamp, duration: Duration) -> Self {
        Self {
            start,
            end: start.saturating_add(duration),
        }
    }

    /// Whether this window still blocks new bookings at time `now`.
    ///
    /// A window is active while its end lies strictly in the future. At
    /// exactly `end` the reservation has lapsed: the room is bookable
    /// again without an explicit cancellation.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.end > now
    }
}

impl fmt::Display for BookingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// RoomSnapshot
// ---------------------------------------------------------------------------

/// An immutable copy of one room's state at the moment of a status read.
///
/// Snapshots are plain data: holding one never blocks registry progress,
/// and a snapshot taken before a concurrent update simply shows the
/// older state. Field names are part of the public JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// The room this snapshot describes.
    pub id: RoomId,
    /// Configured capacity ceiling (always at least 1).
    pub max_capacity: u32,
    /// Headcount from the most recent occupancy report (0 if none yet).
    pub occupant_count: u32,
    /// Whether the room counts as occupied
    /// (`occupant_count >= OCCUPANCY_THRESHOLD`).
    pub is_occupied: bool,
    /// The current reservation, if any. Presence alone does not mean the
    /// reservation is still active — the window may have lapsed.
    pub booking: Option<BookingWindow>,
}

// =========================================================================
// Tests
// =========================================================================
