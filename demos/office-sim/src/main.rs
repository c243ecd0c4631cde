//! Simulated office morning: concurrent organizers fight over rooms, sensor
//! feeds drive occupancy, and the site's controllers follow along.
//!
//! Run with `RUST_LOG=debug` to see refused bookings and controller no-ops.

use std::time::Duration;

use atria::prelude::*;
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Simulation parameters
// ---------------------------------------------------------------------------

const ROOMS: u32 = 6;
const SEATS_PER_ROOM: u32 = 12;
/// More organizers than rooms, so the last ones go without.
const ORGANIZERS: u64 = 8;
/// Everybody's first choice.
const CORNER_ROOM: RoomId = RoomId(1);
const MEETING_LENGTH: Duration = Duration::from_secs(1_800);
const SENSOR_STEPS: u32 = 6;
const MEETING_PEAK: u32 = 5;

// ---------------------------------------------------------------------------
// Booking agents
// ---------------------------------------------------------------------------

/// Try the corner room first, then fall back to any free one.
async fn book_morning_meeting(registry: &RoomRegistry, organizer: u64) -> Option<RoomId> {
    let start = Timestamp::now();

    // Arrival jitter so the contention order varies run to run.
    let jitter = rand::rng().random_range(0..25);
    tokio::time::sleep(Duration::from_millis(jitter)).await;

    let rooms = registry.room_count() as u64;
    let fallbacks = (1..=rooms).map(RoomId).filter(|id| *id != CORNER_ROOM);
    for id in std::iter::once(CORNER_ROOM).chain(fallbacks) {
        match Book::new(id, start, MEETING_LENGTH).apply(registry) {
            Ok(window) => {
                info!(organizer, room = %id, window = %window, "meeting scheduled");
                return Some(id);
            }
            Err(RegistryError::Conflict { .. }) => continue,
            Err(error) => {
                warn!(organizer, %error, "booking attempt failed");
                return None;
            }
        }
    }

    info!(organizer, "no free room this morning");
    None
}

// ---------------------------------------------------------------------------
// Occupancy sensors
// ---------------------------------------------------------------------------

/// Symmetric headcount curve: builds to `peak` mid-meeting, empties by the end.
fn attendance(step: u32, steps: u32, peak: u32) -> u32 {
    if steps <= 1 || step >= steps {
        return 0;
    }
    let half = steps / 2;
    let distance = if step <= half { step } else { steps - step };
    (peak * distance) / half.max(1)
}

/// Feed one meeting's headcount curve into the registry.
async fn run_sensor(registry: &RoomRegistry, room: RoomId) -> Result<(), RegistryError> {
    let seats = registry.get_status(room)?.max_capacity;
    let peak = seats.min(MEETING_PEAK);

    for step in 0..=SENSOR_STEPS {
        let headcount = attendance(step, SENSOR_STEPS, peak);
        let outcome = ReportOccupancy::new(room, headcount).apply(registry)?;
        if outcome.changed {
            info!(room = %room, headcount, occupied = outcome.occupied, "presence changed");
        }

        let jitter = rand::rng().random_range(5..20);
        tokio::time::sleep(Duration::from_millis(jitter)).await;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

fn status_line(snap: &RoomSnapshot) -> String {
    let booking = match &snap.booking {
        Some(window) => window.to_string(),
        None => "free".to_string(),
    };
    format!(
        "{}: {}/{} present, occupied={}, booking={}",
        snap.id, snap.occupant_count, snap.max_capacity, snap.is_occupied, booking
    )
}

/// Dump the final state of every room plus its device panel.
fn print_site_report(site: &Site) -> Result<(), serde_json::Error> {
    let snapshots = site.registry().snapshot_all();

    println!("\n=== Site report ===");
    for snap in &snapshots {
        let hvac = site.hvac(snap.id).is_some_and(HvacController::is_ventilating);
        let lights = site.lighting(snap.id).is_some_and(LightingController::is_lit);
        println!("{} | hvac={hvac} lights={lights}", status_line(snap));
    }

    println!("\n{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let site = Site::builder()
        .rooms(ROOMS)
        .default_capacity(SEATS_PER_ROOM)
        .with_hvac()
        .with_lighting()
        .build();

    // Morning rush: all organizers book at once.
    let mut bookings = vec![];
    for organizer in 0..ORGANIZERS {
        let registry = site.registry().clone();
        bookings.push(tokio::spawn(async move {
            book_morning_meeting(&registry, organizer).await
        }));
    }
    let mut booked = vec![];
    for handle in bookings {
        if let Some(room) = handle.await? {
            booked.push(room);
        }
    }
    info!(meetings = booked.len(), "morning rush settled");

    // Meetings run: each booked room gets its own sensor feed.
    let mut sensors = vec![];
    for room in booked.clone() {
        let registry = site.registry().clone();
        sensors.push(tokio::spawn(
            async move { run_sensor(&registry, room).await },
        ));
    }
    for handle in sensors {
        handle.await??;
    }

    // Wind down: release whatever is still booked.
    for room in booked {
        match Cancel::new(room).apply(site.registry()) {
            Ok(_) | Err(RegistryError::NotBooked(_)) => {}
            Err(error) => return Err(error.into()),
        }
    }

    print_site_report(&site)?;
    Ok(())
}
