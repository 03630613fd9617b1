//! Persist decoded records into an embedded SQLite database through the
//! `OutputSink` trait, using the table shape the broker deployments use.
//!
//! Run with: `cargo run --example sqlite_sink`

use aissens_lib::dispatch::{Dispatch, Dispatcher};
use aissens_lib::error::SinkError;
use aissens_lib::sink::OutputSink;
use bytes::Bytes;
use rusqlite::Connection;
use serde_json::{Map, Value};

struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    fn open(path: &str) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                sensor_name TEXT NOT NULL,
                data_type INTEGER NOT NULL,
                json_value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }
}

impl OutputSink for SqliteSink {
    fn write(&mut self, name: &str, fields: &Map<String, Value>) -> Result<(), SinkError> {
        if name != "data" {
            return Err(SinkError::Backend(format!("table '{name}' not defined")));
        }
        let json_value = fields
            .get("payload")
            .map(Value::to_string)
            .unwrap_or_default();
        self.conn
            .execute(
                "INSERT INTO data (timestamp, sensor_name, data_type, json_value)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    fields.get("timestamp").and_then(Value::as_str),
                    fields.get("sensor_name").and_then(Value::as_str),
                    fields.get("data_type").and_then(Value::as_i64),
                    json_value,
                ],
            )
            .map_err(|e| SinkError::Backend(e.to_string()))?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let sink = SqliteSink::open("aissens_demo.sqlite")?;
    let mut dispatcher = Dispatcher::new("data", sink);

    // A synthetic OA summary packet: type 9, status 1, battery 80%,
    // adcavg 1.5 V, 23.5 degC, OA (0.1, 0.2, 0.3)
    let mut payload = vec![9u8];
    payload.extend_from_slice(&45i32.to_be_bytes());
    payload.extend_from_slice(&1_700_000_000u64.to_le_bytes());
    payload.push(1);
    payload.push(80);
    payload.extend_from_slice(&1500i16.to_le_bytes());
    payload.extend_from_slice(&1520i16.to_le_bytes());
    payload.extend_from_slice(&23_500i16.to_le_bytes());
    for value in [0.1f32, 0.2, 0.3] {
        payload.extend_from_slice(&value.to_le_bytes());
    }
    payload.extend_from_slice(&[0u8; 17]);

    match dispatcher.dispatch("S9IMP6000067BSF/report", Bytes::from(payload)) {
        Dispatch::Decoded(data_type) => println!("stored packet with code {}", u8::from(data_type)),
        other => println!("nothing stored: {other:?}"),
    }

    let conn = Connection::open("aissens_demo.sqlite")?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM data", [], |row| row.get(0))?;
    println!("rows in data table: {count}");
    Ok(())
}
