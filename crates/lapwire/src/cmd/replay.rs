use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Local;
use lapwire_core::{EventLog, EventPipeline, JsonLineSink, RiderNameTable, SummaryPublisher};
use tracing::info;

use crate::cmd::ReplayArgs;
use crate::exit::{core_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};

pub fn run(args: ReplayArgs) -> CliResult<i32> {
    let names = match &args.riders {
        Some(path) => RiderNameTable::from_json_file(path)
            .map_err(|err| core_error("rider table load failed", err))?,
        None => RiderNameTable::new(),
    };

    let mut pipeline = EventPipeline::new(
        names,
        SummaryPublisher::new(&args.summary),
        EventLog::new(&args.event_log),
        JsonLineSink::new(std::io::stdout()),
    );

    let reader: Box<dyn BufRead> = if args.input == Path::new("-") {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(&args.input)
            .map_err(|err| io_error("capture open failed", err))?;
        Box::new(BufReader::new(file))
    };

    let base = Instant::now();
    let mut fed = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| io_error("capture read failed", err))?;
        let Some((offset_ms, buf)) = parse_line(&line, index)? else {
            continue;
        };

        let now = match offset_ms {
            Some(ms) => base + Duration::from_millis(ms),
            None => Instant::now(),
        };

        let source = format!("{}:{}", args.input.display(), index + 1);
        pipeline.on_raw_notification(&source, &buf, Local::now(), now);
        fed += 1;
    }

    info!(
        notifications = fed,
        devices = pipeline.registry().len(),
        summary = %args.summary.display(),
        "replay complete"
    );
    Ok(SUCCESS)
}

/// Parse one capture line into `(offset, buffer)`. Blank lines and `#`
/// comments are skipped.
fn parse_line(line: &str, index: usize) -> CliResult<Option<(Option<u64>, Vec<u8>)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    let (offset_ms, hex_token) = match tokens.next() {
        Some(second) => {
            let offset = first.parse::<u64>().map_err(|err| {
                CliError::new(
                    DATA_INVALID,
                    format!("line {}: bad offset {first:?}: {err}", index + 1),
                )
            })?;
            (Some(offset), second)
        }
        None => (None, first),
    };

    if tokens.next().is_some() {
        return Err(CliError::new(
            DATA_INVALID,
            format!("line {}: expected `[offset_ms] hex`", index + 1),
        ));
    }

    let buf = hex::decode(hex_token).map_err(|err| {
        CliError::new(
            DATA_INVALID,
            format!("line {}: invalid hex: {err}", index + 1),
        )
    })?;
    Ok(Some((offset_ms, buf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_hex_line() {
        let (offset, buf) = parse_line("deadbeef", 0)
            .expect("line should parse")
            .expect("line should yield a buffer");
        assert_eq!(offset, None);
        assert_eq!(buf, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn parses_offset_line() {
        let (offset, buf) = parse_line("21111 a5", 0)
            .expect("line should parse")
            .expect("line should yield a buffer");
        assert_eq!(offset, Some(21111));
        assert_eq!(buf, vec![0xA5]);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert!(parse_line("", 0).expect("blank should parse").is_none());
        assert!(parse_line("   ", 0).expect("spaces should parse").is_none());
        assert!(parse_line("# capture of 2026-08-22 practice", 0)
            .expect("comment should parse")
            .is_none());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_line("notanumber a5 extra", 0).is_err());
        assert!(parse_line("12 zz", 0).is_err());
        assert!(parse_line("zz", 0).is_err());
    }
}
