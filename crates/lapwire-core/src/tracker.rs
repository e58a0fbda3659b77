use std::time::Instant;

use tracing::debug;

use crate::registry::DeviceRegistry;

/// Smallest delta accepted as a lap, milliseconds.
pub const MIN_LAP_MS: u64 = 1;

/// Largest delta accepted as a lap: 20 minutes. Anything above this is a
/// clock anomaly or a device that left the track, not a lap.
pub const MAX_LAP_MS: u64 = 20 * 60 * 1000;

/// Outcome of recording one sighting of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LapEvent {
    /// Delta since the previous sighting, when it passed the sanity gate.
    pub lap_time_ms: Option<u64>,
    /// Truncating integer mean of all counted laps for this device.
    pub average_lap_ms: Option<u64>,
}

/// Record a sighting of `device_id` at monotonic instant `now`.
///
/// The lap duration is the monotonic delta to the previous sighting of the
/// same device. A delta is counted only when `1 <= delta <= 20 min`; zero,
/// negative (monotonic went backwards across a host suspend), and oversized
/// deltas are discarded without touching any counter. Every sighting,
/// counted or not, resets the reference instant — a stray health-check
/// notification restarts the current lap rather than inflating the next one.
pub fn record(registry: &mut DeviceRegistry, device_id: u16, now: Instant) -> LapEvent {
    let state = registry.state_mut(device_id);

    let delta_ms = state
        .last_seen
        .and_then(|prev| now.checked_duration_since(prev))
        .map(|gap| gap.as_millis() as u64);

    let lap_time_ms = match delta_ms {
        Some(ms) if (MIN_LAP_MS..=MAX_LAP_MS).contains(&ms) => Some(ms),
        Some(ms) => {
            debug!(device_id, delta_ms = ms, "implausible lap delta discarded");
            None
        }
        None => None,
    };

    if let Some(ms) = lap_time_ms {
        state.laps_ms.push(ms);
        state.lap_count += 1;
        if state.best_lap_ms.is_none_or(|best| ms < best) {
            state.best_lap_ms = Some(ms);
        }
    }

    // Every sighting resets the reference point, counted or not.
    state.last_seen = Some(now);

    LapEvent {
        lap_time_ms,
        average_lap_ms: state.average_lap_ms(),
    }
}
