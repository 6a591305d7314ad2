use serde_json::{json, Value};

use crate::model::config::AlignConfig;
use crate::model::record::Record;
use crate::services::{extract, merge};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_records_from_payload(payload: &Value) -> Result<Vec<Record>, String> {
    let arr = payload
        .get("records")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "payload.records must be an array".to_string())?;

    let mut records: Vec<Record> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<Record>(v) {
            Ok(r) => records.push(r),
            Err(e) => return Err(format!("invalid record at index {}: {}", i, e)),
        }
    }

    Ok(records)
}

fn parse_config_from_payload(payload: &Value) -> Result<AlignConfig, String> {
    match payload.get("config") {
        None | Some(Value::Null) => Ok(AlignConfig::default()),
        Some(v) => {
            serde_json::from_value(v.clone()).map_err(|e| format!("invalid payload.config: {e}"))
        }
    }
}

pub fn handle(input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let payload = get_payload(&req);

    match Command::from(get_cmd(&req)) {
        Command::Ping => ok(id, json!({ "message": "align-core alive" })),

        Command::ExtractLines => {
            let source_field = payload
                .get("source_field")
                .and_then(|v| v.as_str())
                .unwrap_or("Text_Korean");
            let target_field = payload
                .get("target_field")
                .and_then(|v| v.as_str())
                .unwrap_or("Text_English");
            let skip_translated = payload
                .get("skip_translated")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

            let records = match parse_records_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let text = extract::extract_lines(&records, source_field, target_field, skip_translated);
            ok(id, json!({ "text": text }))
        }

        Command::ApplyLines => {
            let target_field = payload
                .get("target_field")
                .and_then(|v| v.as_str())
                .unwrap_or("Text_English");
            let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");

            let mut records = match parse_records_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let lines = merge::split_artifact(text);
            let updated = merge::apply_lines(&mut records, &lines, target_field);

            ok(id, json!({ "records": records, "updated": updated }))
        }

        Command::Extract => {
            let cfg = match parse_config_from_payload(payload) {
                Ok(c) => c,
                Err(e) => return err(id, e),
            };

            match extract::run(&cfg) {
                Ok(report) => ok(id, json!({ "report": report })),
                Err(e) => err(id, e),
            }
        }

        Command::MergeBack => {
            let cfg = match parse_config_from_payload(payload) {
                Ok(c) => c,
                Err(e) => return err(id, e),
            };

            match merge::run(&cfg) {
                Ok(report) => ok(id, json!({ "report": report })),
                Err(e) => err(id, e),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}
