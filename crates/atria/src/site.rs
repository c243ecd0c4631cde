//! Site assembly.
//!
//! A [`Site`] bundles a configured [`RoomRegistry`] with the environment
//! controllers wired to it. The [`SiteBuilder`] decides how many rooms the
//! site has and which controller families get subscribed to each room.

use std::sync::Arc;

use atria_control::{HvacController, LightingController};
use atria_registry::{RegistryConfig, RoomRegistry};
use atria_types::RoomId;
use tracing::info;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Fluent builder for a [`Site`].
///
/// Starts from [`RegistryConfig::default`] and opts controller families in
/// per call. `build` never fails; out-of-range configuration values are
/// clamped by the registry itself.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    config: RegistryConfig,
    hvac: bool,
    lighting: bool,
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
            hvac: false,
            lighting: false,
        }
    }

    /// Sets how many rooms the site manages.
    pub fn rooms(mut self, room_count: u32) -> Self {
        self.config.room_count = room_count;
        self
    }

    /// Sets the capacity every room starts out with.
    pub fn default_capacity(mut self, capacity: u32) -> Self {
        self.config.default_capacity = capacity;
        self
    }

    /// Attaches one ventilation controller to every room.
    pub fn with_hvac(mut self) -> Self {
        self.hvac = true;
        self
    }

    /// Attaches one lighting controller to every room.
    pub fn with_lighting(mut self) -> Self {
        self.lighting = true;
        self
    }

    /// Builds the registry and subscribes the requested controllers.
    pub fn build(self) -> Site {
        let registry = Arc::new(RoomRegistry::with_config(self.config.clone()));

        let mut hvac = Vec::new();
        let mut lighting = Vec::new();
        for id in 1..=u64::from(self.config.room_count) {
            let room = RoomId(id);
            if self.hvac {
                let controller = Arc::new(HvacController::new(room));
                registry.add_observer(room, controller.clone());
                hvac.push(controller);
            }
            if self.lighting {
                let controller = Arc::new(LightingController::new(room));
                registry.add_observer(room, controller.clone());
                lighting.push(controller);
            }
        }

        info!(
            rooms = self.config.room_count,
            hvac = self.hvac,
            lighting = self.lighting,
            "site ready"
        );

        Site {
            registry,
            hvac,
            lighting,
        }
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

/// A running site: the room registry plus the controllers observing it.
///
/// The registry is shared behind an [`Arc`] so callers can hand clones to
/// worker tasks while the site keeps the controllers alive for inspection.
pub struct Site {
    registry: Arc<RoomRegistry>,
    hvac: Vec<Arc<HvacController>>,
    lighting: Vec<Arc<LightingController>>,
}

impl Site {
    pub fn builder() -> SiteBuilder {
        SiteBuilder::new()
    }

    /// The shared room registry.
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// The ventilation controller for `room`, if the site was built with HVAC.
    pub fn hvac(&self, room: RoomId) -> Option<&HvacController> {
        self.hvac
            .iter()
            .find(|controller| controller.room() == room)
            .map(|controller| controller.as_ref())
    }

    /// The lighting controller for `room`, if the site was built with lighting.
    pub fn lighting(&self, room: RoomId) -> Option<&LightingController> {
        self.lighting
            .iter()
            .find(|controller| controller.room() == room)
            .map(|controller| controller.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
