use std::time::Instant;

use chrono::{DateTime, Local};
use lapwire_frame::{decode_frame, Frame};
use tracing::{info, warn};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::event_log::EventLog;
use crate::format::format_lap_ms;
use crate::names::RiderNameTable;
use crate::registry::DeviceRegistry;
use crate::summary::SummaryPublisher;
use crate::tracker::{self, LapEvent};

/// Timestamp layout shared by the event log and diagnostics: ISO-8601 with
/// millisecond precision.
const WALL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Orchestrates one notification at a time: decode, track, publish, log.
///
/// The pipeline owns all mutable timing state and takes `&mut self` per
/// notification, so serialization is enforced by ownership — a host that
/// receives notifications on multiple threads must funnel them through a
/// single-consumer queue or a mutex before they reach this type.
///
/// `on_raw_notification` never fails: malformed buffers and filesystem
/// faults become diagnostic records, and the next notification is processed
/// normally. The caller supplies both clocks, which keeps the pipeline
/// deterministic under test and in capture replay.
pub struct EventPipeline<S> {
    registry: DeviceRegistry,
    names: RiderNameTable,
    publisher: SummaryPublisher,
    event_log: EventLog,
    diagnostics: S,
}

impl<S: DiagnosticSink> EventPipeline<S> {
    pub fn new(
        names: RiderNameTable,
        publisher: SummaryPublisher,
        event_log: EventLog,
        diagnostics: S,
    ) -> Self {
        Self {
            registry: DeviceRegistry::new(),
            names,
            publisher,
            event_log,
            diagnostics,
        }
    }

    /// The registry this pipeline owns. The summary file is always a pure
    /// projection of this state.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &S {
        &self.diagnostics
    }

    /// Handle one raw notification from the transport.
    ///
    /// `source` is a transport-supplied hint (characteristic UUID, capture
    /// line number) carried into diagnostics verbatim; `wall` is the
    /// wall-clock timestamp the buffer arrived under and `now` the matching
    /// monotonic instant.
    pub fn on_raw_notification(
        &mut self,
        source: &str,
        buf: &[u8],
        wall: DateTime<Local>,
        now: Instant,
    ) {
        let stamp = wall.format(WALL_FORMAT).to_string();

        let Some(frame) = decode_frame(buf) else {
            self.diagnostics
                .emit(Diagnostic::raw(stamp, buf).with_source(source));
            return;
        };

        let event = tracker::record(&mut self.registry, frame.device_id, now);

        if event.lap_time_ms.is_some() {
            // The summary must reflect every counted lap before the next
            // notification is handled, not be batched.
            if let Err(err) = self.publisher.publish(&self.registry, &self.names) {
                warn!(%err, "summary publish failed; registry remains authoritative");
                self.diagnostics
                    .emit(Diagnostic::error(stamp.clone(), &err).with_source(source));
            }
        }

        let line = self.render_line(&stamp, &frame, &event);
        info!("{line}");
        if let Err(err) = self.event_log.append(&line) {
            self.diagnostics
                .emit(Diagnostic::error(stamp, &err).with_source(source));
        }
    }

    fn render_line(&self, stamp: &str, frame: &Frame, event: &LapEvent) -> String {
        format!(
            "{stamp} {} | Lap {} | Lap Time {} | CumulativeField {}s | Avg Lap {}",
            self.names.display_name(frame.device_id),
            frame.lap_number,
            format_lap_ms(event.lap_time_ms),
            frame.cumulative_seconds,
            format_lap_ms(event.average_lap_ms),
        )
    }
}
