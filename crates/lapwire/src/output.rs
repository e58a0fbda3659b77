use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use lapwire_frame::Frame;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    message_type: &'a str,
    lap_number: u16,
    device_id: u16,
    aux: u16,
    cumulative_seconds: u16,
}

pub fn print_frame(frame: &Frame, format: OutputFormat) {
    let message_type = format!("0x{:04X}", frame.message_type);
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                message_type: &message_type,
                lap_number: frame.lap_number,
                device_id: frame.device_id,
                aux: frame.aux,
                cumulative_seconds: frame.cumulative_seconds,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MSGTYPE", "LAP", "DEVICE", "AUX", "CUMSEC"])
                .add_row(vec![
                    message_type.clone(),
                    frame.lap_number.to_string(),
                    frame.device_id.to_string(),
                    frame.aux.to_string(),
                    frame.cumulative_seconds.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "msgtype={message_type} lap={} device={} aux={} cumulative={}s",
                frame.lap_number, frame.device_id, frame.aux, frame.cumulative_seconds
            );
        }
    }
}
