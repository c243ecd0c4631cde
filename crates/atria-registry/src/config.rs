//! Registry configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration applied by [`RoomRegistry::configure`].
///
/// Configuring is a full reset: the registry replaces its entire room
/// set with fresh rooms built from these values.
///
/// [`RoomRegistry::configure`]: crate::RoomRegistry::configure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Number of rooms to create. Rooms get ids `1..=room_count`.
    pub room_count: u32,

    /// Capacity assigned to every room at configure time. Individual
    /// rooms can be adjusted afterwards with `set_max_capacity`.
    pub default_capacity: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            room_count: 8,
            default_capacity: 10,
        }
    }
}

impl RegistryConfig {
    /// Config for a specific number of rooms with the default capacity.
    pub fn with_rooms(room_count: u32) -> Self {
        Self {
            room_count,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to apply.
    ///
    /// Called automatically by `configure`, which never fails: a zero
    /// `default_capacity` is raised to 1 rather than rejected. A zero
    /// `room_count` is legal and leaves the registry empty.
    pub fn validated(mut self) -> Self {
        if self.default_capacity == 0 {
            warn!("default_capacity must be positive, clamping to 1");
            self.default_capacity = 1;
        }
        self
    }
}
