//! Per-device lap-timing state, driven by decoded telemetry frames.
//!
//! This is the core value-add layer of lapwire. The transport (a BLE
//! notification loop, a capture replay, a test) hands the pipeline one raw
//! buffer at a time together with the clocks it was observed under; the
//! pipeline decodes it, updates the owning [`DeviceRegistry`], republishes
//! the summary file after every counted lap, and turns every fault into a
//! diagnostic record instead of propagating it.
//!
//! Lap durations come purely from monotonic time between successive
//! sightings of the same device. The frame's own cumulative-seconds field is
//! untrusted and only ever displayed.

pub mod diagnostics;
pub mod error;
pub mod event_log;
pub mod format;
pub mod names;
pub mod pipeline;
pub mod registry;
pub mod summary;
pub mod tracker;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, JsonLineSink, MemorySink};
pub use error::{CoreError, Result};
pub use event_log::EventLog;
pub use names::RiderNameTable;
pub use pipeline::EventPipeline;
pub use registry::{DeviceRegistry, DeviceState};
pub use summary::SummaryPublisher;
pub use tracker::{LapEvent, MAX_LAP_MS, MIN_LAP_MS};
