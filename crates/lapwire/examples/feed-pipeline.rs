//! Feed a pipeline by hand, the way a BLE notification callback would.
//!
//! Run with: `cargo run --example feed-pipeline`

use std::time::{Duration, Instant};

use chrono::Local;
use lapwire::{EventLog, EventPipeline, MemorySink, RiderNameTable, SummaryPublisher};

fn main() {
    let mut names = RiderNameTable::new();
    names.insert(79, "Ventress");

    let dir = std::env::temp_dir();
    let mut pipeline = EventPipeline::new(
        names,
        SummaryPublisher::new(dir.join("laptimes.txt")),
        EventLog::new(dir.join("laplogs.txt")),
        MemorySink::default(),
    );

    // Two sightings of device 79, 21.111 s apart.
    let frame = [
        0x23, 0x6C, 0x01, 0x4C, 0x00, 0x01, 0x00, 0x4F, 0x00, 0x00, 0x00, 0x00, 0xA5,
    ];
    let base = Instant::now();
    pipeline.on_raw_notification("example", &frame, Local::now(), base);
    pipeline.on_raw_notification(
        "example",
        &frame,
        Local::now(),
        base + Duration::from_millis(21_111),
    );

    // Something that is not a telemetry frame at all.
    pipeline.on_raw_notification("example", &[0xDE, 0xAD], Local::now(), Instant::now());

    println!(
        "summary at {}:\n{}",
        dir.join("laptimes.txt").display(),
        std::fs::read_to_string(dir.join("laptimes.txt")).unwrap_or_default()
    );
    println!("diagnostics: {:?}", pipeline.diagnostics().records);
}
