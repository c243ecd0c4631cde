//! Room registry core for Atria.
//!
//! A [`RoomRegistry`] owns a fixed set of rooms, each carrying a booking
//! window, a last-reported headcount, and the occupied flag derived from
//! it. Callers mutate rooms through the three command operations in
//! [`ops`]; every accepted occupancy report is broadcast to the
//! [`OccupancyObserver`]s subscribed to that room.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — shared state, synchronized per room
//! - [`ops::Book`], [`ops::Cancel`], [`ops::ReportOccupancy`] — the operations
//! - [`OccupancyObserver`] — the notification capability
//! - [`RegistryConfig`] — room count and default capacity for `configure`
//! - [`RegistryError`] — the non-fatal failure taxonomy
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use atria_registry::ops::{Book, ReportOccupancy};
//! use atria_registry::{RegistryConfig, RoomRegistry};
//! use atria_types::{RoomId, Timestamp};
//!
//! let registry = RoomRegistry::with_config(RegistryConfig::with_rooms(3));
//!
//! let window = Book::new(RoomId(1), Timestamp::now(), Duration::from_secs(3_600))
//!     .apply(&registry)?;
//! assert_eq!(registry.get_status(RoomId(1))?.booking, Some(window));
//!
//! let outcome = ReportOccupancy::new(RoomId(1), 3).apply(&registry)?;
//! assert!(outcome.occupied);
//! # Ok::<(), atria_registry::RegistryError>(())
//! ```

mod config;
mod error;
mod observer;
pub mod ops;
mod registry;
mod room;

pub use config::RegistryConfig;
pub use error::{ConflictReason, RegistryError};
pub use observer::OccupancyObserver;
pub use registry::RoomRegistry;
