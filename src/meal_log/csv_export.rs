//! CSV projection of the meal log

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::models::MealLogEntry;

pub const CSV_HEADER: [&str; 10] = [
    "date", "time", "foods", "calories", "protein", "carbs", "fat", "fiber", "portion", "goal",
];

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn row(entry: &MealLogEntry) -> [String; 10] {
    [
        entry.date.format("%Y-%m-%d").to_string(),
        entry.time_label(),
        entry.foods_label(),
        entry.calories.to_string(),
        format!("{:.1}", entry.protein),
        format!("{:.1}", entry.carbs),
        format!("{:.1}", entry.fat),
        format!("{:.1}", entry.fiber),
        entry.portion.to_string(),
        entry.goal.to_string(),
    ]
}

/// Write header plus one row per entry. Thumbnails are never exported.
pub fn write_csv<'a, W, I>(writer: W, entries: I) -> Result<(), CsvExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a MealLogEntry>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for entry in entries {
        wtr.write_record(row(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string<'a, I>(entries: I) -> Result<String, CsvExportError>
where
    I: IntoIterator<Item = &'a MealLogEntry>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, entries)?;
    Ok(String::from_utf8(buf)?)
}

pub fn export_to_file<'a, I>(path: &Path, entries: I) -> Result<(), CsvExportError>
where
    I: IntoIterator<Item = &'a MealLogEntry>,
{
    let file = File::create(path)?;
    write_csv(file, entries)
}
