use std::collections::BTreeMap;
use std::time::Instant;

/// Mutable lap-timing state for one transponder.
///
/// Created lazily on the first sighting of a device and never destroyed for
/// the lifetime of the registry. Mutated only by [`tracker::record`].
///
/// [`tracker::record`]: crate::tracker::record
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    /// Monotonic instant of the most recent sighting, counted or not.
    pub last_seen: Option<Instant>,
    /// Counted lap durations in arrival order, milliseconds.
    pub laps_ms: Vec<u64>,
    /// Number of counted laps.
    pub lap_count: u32,
    /// Fastest counted lap, milliseconds.
    pub best_lap_ms: Option<u64>,
}

impl DeviceState {
    /// Truncating integer mean of all counted laps, if any.
    pub fn average_lap_ms(&self) -> Option<u64> {
        if self.laps_ms.is_empty() {
            return None;
        }
        let total: u64 = self.laps_ms.iter().sum();
        Some(total / self.laps_ms.len() as u64)
    }

    /// Whether this device has anything worth a summary line.
    pub fn has_laps(&self) -> bool {
        self.lap_count > 0 || self.best_lap_ms.is_some()
    }
}

/// Owner of all per-device timing state, keyed by device identifier.
///
/// Backed by a `BTreeMap` so iteration is in ascending identifier order by
/// construction, which is what makes the summary file reproducible.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<u16, DeviceState>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a device, creating a fresh zeroed entry if absent.
    pub fn state_mut(&mut self, device_id: u16) -> &mut DeviceState {
        self.devices.entry(device_id).or_default()
    }

    /// State for a device, if it has been seen.
    pub fn state(&self, device_id: u16) -> Option<&DeviceState> {
        self.devices.get(&device_id)
    }

    /// All known devices in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &DeviceState)> {
        self.devices.iter().map(|(id, state)| (*id, state))
    }

    /// Number of devices seen so far.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
