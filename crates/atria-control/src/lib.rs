//! Simulated environment controllers for Atria.
//!
//! Concrete [`OccupancyObserver`] implementations that react to a room's
//! derived occupied state by toggling an in-memory device: ventilation
//! ([`HvacController`]) and a lighting circuit ([`LightingController`]).
//! Both are idempotent to the repeated identical notifications the
//! registry delivers, and both expose their device flag for assertions
//! and dashboards.
//!
//! Wiring one up:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use atria_control::HvacController;
//! use atria_registry::ops::ReportOccupancy;
//! use atria_registry::{RegistryConfig, RoomRegistry};
//! use atria_types::RoomId;
//!
//! let registry = RoomRegistry::with_config(RegistryConfig::with_rooms(1));
//! let hvac = Arc::new(HvacController::new(RoomId(1)));
//! registry.add_observer(RoomId(1), hvac.clone());
//!
//! ReportOccupancy::new(RoomId(1), 3).apply(&registry)?;
//! assert!(hvac.is_ventilating());
//! # Ok::<(), atria_registry::RegistryError>(())
//! ```
//!
//! [`OccupancyObserver`]: atria_registry::OccupancyObserver

mod hvac;
mod lighting;

pub use hvac::HvacController;
pub use lighting::LightingController;
