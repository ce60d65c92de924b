use std::collections::BTreeMap;
use std::fs;

use bytes::Bytes;
use msgcodec_wire::{encode, Message};

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let headers = parse_headers(&args.headers)?;
    let payload = resolve_payload(&args)?;
    let message = Message::new(headers, payload);

    let wire = encode(&message).map_err(|err| codec_error("encode failed", err))?;

    match &args.out {
        Some(path) => {
            fs::write(path, &wire).map_err(|err| {
                io_error(&format!("failed writing {}", path.display()), err)
            })?;
            tracing::info!(path = %path.display(), wire_size = wire.len(), "wrote encoded message");
        }
        None => print_encoded(&wire, format),
    }

    Ok(SUCCESS)
}

fn parse_headers(raw: &[String]) -> CliResult<BTreeMap<String, String>> {
    let mut headers = BTreeMap::new();
    for entry in raw {
        let (name, value) = entry.split_once('=').ok_or_else(|| {
            CliError::new(
                DATA_INVALID,
                format!("--header must be NAME=VALUE, got {entry:?}"),
            )
        })?;
        if headers.insert(name.to_string(), value.to_string()).is_some() {
            tracing::warn!(header = name, "duplicate header, keeping last value");
        }
    }
    Ok(headers)
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Bytes> {
    if let Some(data) = &args.data {
        return Ok(Bytes::copy_from_slice(data.as_bytes()));
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map(Bytes::from)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Bytes::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_headers_splits_on_first_equals() {
        let raw = vec!["Content-Type=application/json".to_string(), "q=a=b".to_string()];
        let headers = parse_headers(&raw).unwrap();
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["q"], "a=b");
    }

    #[test]
    fn parse_headers_allows_empty_value() {
        let headers = parse_headers(&["k=".to_string()]).unwrap();
        assert_eq!(headers["k"], "");
    }

    #[test]
    fn parse_headers_rejects_missing_separator() {
        let err = parse_headers(&["no-separator".to_string()]).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn parse_headers_last_duplicate_wins() {
        let headers = parse_headers(&["k=1".to_string(), "k=2".to_string()]).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["k"], "2");
    }
}
