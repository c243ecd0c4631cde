//! Error types for the registry layer.

use atria_types::{RoomId, Timestamp};

/// Why a booking attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// The room is currently occupied (headcount at or above threshold).
    Occupied,
    /// A reservation is in place and its end lies in the future.
    AlreadyBooked {
        /// When the blocking reservation lapses.
        until: Timestamp,
    },
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Occupied => write!(f, "room occupied"),
            Self::AlreadyBooked { until } => {
                write!(f, "already booked until {until}")
            }
        }
    }
}

/// Errors that can occur during registry operations.
///
/// None of these are fatal: every operation returns a discriminated
/// result and the registry stays consistent after any of them.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The room id is outside the configured range.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// A parameter failed validation (zero capacity, zero duration).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The booking was blocked by occupancy or an existing reservation.
    #[error("booking conflict on room {room}: {reason}")]
    Conflict {
        /// The contested room.
        room: RoomId,
        /// What blocked the booking.
        reason: ConflictReason,
    },

    /// Cancellation on a room with no reservation. Benign and expected:
    /// cancel is idempotent, and this outcome never mutates state.
    #[error("room {0} has no booking to cancel")]
    NotBooked(RoomId),
}
