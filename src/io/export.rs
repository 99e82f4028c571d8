//! CSV export for simulated minute records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use rand::Rng;

use crate::sim::engine::Engine;
use crate::sim::summary::RunSummary;
use crate::sim::types::MinuteRecord;

/// Timestamp layout of the `datetime` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Header row: `datetime,power,<device names...>`.
pub fn header<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut fields = Vec::with_capacity(names.len() + 2);
    fields.push("datetime".to_string());
    fields.push("power".to_string());
    fields.extend(names.iter().map(|n| n.as_ref().to_string()));
    fields
}

/// Data row: timestamp, power with one decimal, then `1`/`0` per device.
pub fn row(record: &MinuteRecord) -> Vec<String> {
    let mut fields = Vec::with_capacity(record.on.len() + 2);
    fields.push(record.timestamp.format(TIMESTAMP_FORMAT).to_string());
    fields.push(format!("{:.1}", record.power_w));
    fields.extend(
        record
            .on
            .iter()
            .map(|on| String::from(if *on { "1" } else { "0" })),
    );
    fields
}

/// Runs `engine` to completion, streaming one CSV row per minute into `writer`.
///
/// # Arguments
///
/// * `engine` - Engine to drive; every remaining minute is simulated
/// * `writer` - Destination implementing `Write`
///
/// # Returns
///
/// Statistics of the streamed minutes.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails. Minutes already written stay in
/// the destination.
pub fn write_csv<R: Rng>(
    engine: &mut Engine<R>,
    writer: impl Write,
) -> Result<RunSummary, csv::Error> {
    let names: Vec<String> = engine.device_names().into_iter().map(str::to_owned).collect();
    let mut summary = RunSummary::new(&names);
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(header(&names))?;
    while let Some(record) = engine.step() {
        wtr.write_record(row(&record))?;
        summary.record(&record);
    }

    wtr.flush()?;
    Ok(summary)
}

/// Runs `engine` to completion and writes the CSV feed to a file at `path`.
///
/// # Errors
///
/// Returns a `csv::Error` if file creation or writing fails.
pub fn export_csv<R: Rng>(engine: &mut Engine<R>, path: &Path) -> Result<RunSummary, csv::Error> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(engine, buf)
}

/// Writes already collected records as CSV to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_records<S: AsRef<str>>(
    names: &[S],
    records: &[MinuteRecord],
    writer: impl Write,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(names))?;
    for r in records {
        wtr.write_record(row(r))?;
    }
    wtr.flush()?;
    Ok(())
}
