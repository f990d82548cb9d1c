//! Loaders for the exercise, startpoint, and routine definition files.
//!
//! All three are small JSON documents. Loading is strict: a missing file,
//! malformed JSON, or a routine naming an exercise the catalog doesn't have
//! aborts before any simulation starts.

use crate::{Catalog, Error, ExerciseDef, Result, Routine};
use std::collections::HashMap;
use std::path::Path;

/// Load the per-exercise definitions (`{"name": {"reps": [lo, hi], ...}}`).
pub fn load_exercise_defs(path: &Path) -> Result<HashMap<String, ExerciseDef>> {
    let contents = read(path, "exercise definitions")?;
    serde_json::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "malformed exercise definitions in {}: {}",
            path.display(),
            e
        ))
    })
}

/// Load the startpoint map (`{"name": weight}`, negative = body-weight ratio).
pub fn load_startpoints(path: &Path) -> Result<HashMap<String, f64>> {
    let contents = read(path, "startpoints")?;
    serde_json::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "malformed startpoints in {}: {}",
            path.display(),
            e
        ))
    })
}

/// Load the routine (`{"workouts": [["name", ...], ...]}`).
pub fn load_routine(path: &Path) -> Result<Routine> {
    let contents = read(path, "routine")?;
    serde_json::from_str(&contents).map_err(|e| {
        Error::Config(format!("malformed routine in {}: {}", path.display(), e))
    })
}

/// Load all three input files and assemble a validated catalog and routine.
pub fn load_plan(
    exercises_path: &Path,
    startpoints_path: &Path,
    routine_path: &Path,
) -> Result<(Catalog, Routine)> {
    let defs = load_exercise_defs(exercises_path)?;
    let startpoints = load_startpoints(startpoints_path)?;
    let routine = load_routine(routine_path)?;

    let catalog = Catalog::from_definitions(&defs, &startpoints)?;
    catalog.ensure_valid()?;

    let errors = routine.validate(&catalog);
    if !errors.is_empty() {
        return Err(Error::CatalogValidation(errors.join("; ")));
    }

    tracing::info!(
        "Loaded {} exercise(s) and a cycle of {} workout(s)",
        catalog.exercises.len(),
        routine.workouts.len()
    );

    Ok((catalog, routine))
}

fn read(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("unable to read {} {}: {}", what, path.display(), e))
    })
}
