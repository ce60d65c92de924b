use std::collections::BTreeMap;

use msgcodec_wire::{Message, MessageCodec};
use serde::Serialize;

use crate::cmd::DemoArgs;
use crate::exit::{codec_error, CliResult, FAILURE, SUCCESS};
use crate::output::{message_table, payload_preview, MessageOutput, OutputFormat};

#[derive(Serialize)]
struct DemoOutput<'a> {
    schema_id: &'static str,
    wire_size: usize,
    roundtrip_equal: bool,
    decoded: MessageOutput<'a>,
}

pub fn sample_message() -> Message {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("X-Request-Id".to_string(), "12345".to_string());
    Message::new(headers, &b"{\"key\":\"value\"}"[..])
}

pub fn run(_args: DemoArgs, format: OutputFormat) -> CliResult<i32> {
    let codec = MessageCodec::new();
    let message = sample_message();

    let wire = codec
        .encode(&message)
        .map_err(|err| codec_error("encode failed", err))?;
    let decoded = codec
        .decode(&wire)
        .map_err(|err| codec_error("decode failed", err))?;
    let equal = decoded == message;

    if !equal {
        tracing::error!("decoded message differs from the original");
    }

    match format {
        OutputFormat::Json => {
            let out = DemoOutput {
                schema_id: "https://schemas.3leaps.dev/msgcodec/cli/v1/demo-roundtrip.schema.json",
                wire_size: wire.len(),
                roundtrip_equal: equal,
                decoded: MessageOutput::from_message(&decoded),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("{}", message_table(&decoded));
            println!("Round-trip: {}", if equal { "equal" } else { "MISMATCH" });
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!("{:?}", decoded.headers);
            println!("{}", payload_preview(decoded.payload.as_ref()));
            println!("{equal}");
        }
    }

    Ok(if equal { SUCCESS } else { FAILURE })
}
