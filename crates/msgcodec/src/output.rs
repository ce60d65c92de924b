use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use msgcodec_wire::Message;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
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
pub struct MessageOutput<'a> {
    pub header_count: usize,
    pub headers: &'a BTreeMap<String, String>,
    pub payload_size: usize,
    pub payload: String,
}

impl<'a> MessageOutput<'a> {
    pub fn from_message(message: &'a Message) -> Self {
        Self {
            header_count: message.headers.len(),
            headers: &message.headers,
            payload_size: message.payload.len(),
            payload: payload_preview(message.payload.as_ref()),
        }
    }
}

#[derive(Serialize)]
struct DecodedOutput<'a> {
    schema_id: &'a str,
    #[serde(flatten)]
    message: MessageOutput<'a>,
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    schema_id: &'a str,
    wire_size: usize,
    hex: String,
}

pub fn print_message(message: &Message, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DecodedOutput {
                schema_id: "https://schemas.3leaps.dev/msgcodec/cli/v1/message-decoded.schema.json",
                message: MessageOutput::from_message(message),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("{}", message_table(message));
        }
        OutputFormat::Pretty => {
            println!(
                "headers={} payload_size={}",
                message.headers.len(),
                message.payload.len()
            );
            for (name, value) in &message.headers {
                println!("  {name}: {value}");
            }
            println!("payload={}", payload_preview(message.payload.as_ref()));
        }
        OutputFormat::Raw => {
            print_raw(message.payload.as_ref());
        }
    }
}

pub fn print_encoded(wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                schema_id: "https://schemas.3leaps.dev/msgcodec/cli/v1/message-encoded.schema.json",
                wire_size: wire.len(),
                hex: hex::encode(wire),
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
                .set_header(vec!["WIRE SIZE", "HEX"])
                .add_row(vec![wire.len().to_string(), hex::encode(wire)]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{}", hex::encode(wire));
        }
        OutputFormat::Raw => {
            print_raw(wire);
        }
    }
}

pub fn message_table(message: &Message) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["HEADER", "VALUE"]);
    for (name, value) in &message.headers {
        table.add_row(vec![name.as_str(), value.as_str()]);
    }
    table.add_row(vec![
        format!("<payload {} bytes>", message.payload.len()),
        payload_preview(message.payload.as_ref()),
    ]);
    table
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_text_and_binary() {
        assert_eq!(payload_preview(b"{\"key\":\"value\"}"), "{\"key\":\"value\"}");
        assert_eq!(payload_preview(&[0xFF, 0xFE]), "<binary 2 bytes>");
    }

    #[test]
    fn message_output_serializes_headers_in_name_order() {
        let message = Message::empty()
            .with_header("b", "2")
            .with_header("a", "1");
        let out = MessageOutput::from_message(&message);
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(
            json,
            r#"{"header_count":2,"headers":{"a":"1","b":"2"},"payload_size":0,"payload":""}"#
        );
    }
}
