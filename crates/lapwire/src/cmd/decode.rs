use lapwire_frame::decode_frame;

use crate::cmd::DecodeArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    for arg in &args.buffers {
        let compact: String = arg.split_whitespace().collect();
        let buf = hex::decode(&compact)
            .map_err(|err| CliError::new(DATA_INVALID, format!("invalid hex {arg:?}: {err}")))?;

        match decode_frame(&buf) {
            Some(frame) => print_frame(&frame, format),
            None => {
                return Err(CliError::new(
                    DATA_INVALID,
                    format!("not a telemetry frame: {compact}"),
                ))
            }
        }
    }

    Ok(SUCCESS)
}
