//! Facade crate re-exporting the lapwire stack.
//!
//! Most embedders want [`EventPipeline`] plus a transport of their own: call
//! [`EventPipeline::on_raw_notification`] once per raw BLE notification with
//! the buffer and the clocks it arrived under. See `examples/feed-pipeline.rs`.

pub use lapwire_core::{
    Diagnostic, DiagnosticKind, DiagnosticSink, DeviceRegistry, DeviceState, EventLog,
    EventPipeline, JsonLineSink, MemorySink, RiderNameTable, SummaryPublisher,
};
pub use lapwire_frame::{decode_frame, Frame, FRAME_LEN, START_MARKER, TERMINATOR};
