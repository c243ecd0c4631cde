//! # Atria
//!
//! Room reservation and occupancy core for smart-building sites.
//!
//! Atria models a fixed set of rooms that accept bookings and headcount
//! reports. Each report re-derives the room's occupied flag and fans it out
//! to subscribed observers, so environment controllers react to presence
//! without polling. Implement [`OccupancyObserver`](prelude::OccupancyObserver)
//! for your own devices, or use the bundled HVAC and lighting controllers.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use atria::prelude::*;
//!
//! # fn main() -> Result<(), RegistryError> {
//! let site = Site::builder()
//!     .rooms(3)
//!     .default_capacity(8)
//!     .with_hvac()
//!     .with_lighting()
//!     .build();
//!
//! let registry = site.registry();
//! Book::new(RoomId(1), Timestamp::now(), Duration::from_secs(3_600)).apply(registry)?;
//! ReportOccupancy::new(RoomId(1), 3).apply(registry)?;
//!
//! assert!(site.hvac(RoomId(1)).is_some_and(|hvac| hvac.is_ventilating()));
//! assert!(site.lighting(RoomId(1)).is_some_and(|lights| lights.is_lit()));
//! # Ok(())
//! # }
//! ```

mod site;

pub use site::{Site, SiteBuilder};

pub mod prelude {
    pub use atria_control::{HvacController, LightingController};
    pub use atria_registry::ops::{Book, Cancel, OccupancyOutcome, ReportOccupancy};
    pub use atria_registry::{
        ConflictReason, OccupancyObserver, RegistryConfig, RegistryError, RoomRegistry,
    };
    pub use atria_types::{
        BookingWindow, RoomId, RoomSnapshot, SubscriberId, Timestamp, OCCUPANCY_THRESHOLD,
    };

    pub use crate::site::{Site, SiteBuilder};
}
