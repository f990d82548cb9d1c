//! Schedule serialization: atomic JSON output and flattened CSV.
//!
//! JSON keeps the full record shape. CSV flattens to one row per exercise
//! per day for spreadsheet use.

use crate::{Error, Result, Schedule};
use fs2::FileExt;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A flattened row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    day: u32,
    date: String,
    workout: usize,
    exercise: &'a str,
    reps: i32,
    sets: i32,
    weight: f64,
    volume: f64,
    weighted_volume: f64,
    total_volume: f64,
    total_weighted_volume: f64,
}

/// Write the schedule as pretty-printed JSON.
///
/// Atomic: the document is written to a locked temp file in the target
/// directory, synced, then renamed over the destination.
pub fn write_json(schedule: &Schedule, path: &Path) -> Result<()> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string_pretty(schedule)?;
        writer.write_all(contents.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {} day(s) to {:?}", schedule.days.len(), path);
    Ok(())
}

/// Write the schedule as CSV, one row per exercise per day.
pub fn write_csv(schedule: &Schedule, path: &Path) -> Result<()> {
    std::fs::create_dir_all(parent_dir(path))?;

    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0usize;

    for day in &schedule.days {
        let date = day.date.to_string();
        for (i, exercise) in day.exercises.iter().enumerate() {
            writer.serialize(CsvRow {
                day: day.day,
                date: date.clone(),
                workout: day.workout,
                exercise,
                reps: day.reps[i],
                sets: day.sets[i],
                weight: day.weights[i],
                volume: day.volumes[i],
                weighted_volume: day.weighted_volumes[i],
                total_volume: day.total_volume,
                total_weighted_volume: day.total_weighted_volume,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    tracing::debug!("Wrote {} CSV row(s) to {:?}", rows, path);
    Ok(())
}

// An output path like "schedule.json" has an empty parent; treat it as cwd.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
