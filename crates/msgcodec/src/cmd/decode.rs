use std::fs;

use msgcodec_wire::decode;

use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_message, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let wire = resolve_input(&args)?;
    let message = decode(&wire).map_err(|err| codec_error("decode failed", err))?;
    print_message(&message, format);
    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(text) = &args.hex {
        return parse_hex(text);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "one of --hex or --file is required"))
}

fn parse_hex(text: &str) -> CliResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact)
        .map_err(|err| CliError::new(DATA_INVALID, format!("--hex is not valid hex: {err}")))
}
