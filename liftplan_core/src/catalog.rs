//! Exercise catalog construction and validation.
//!
//! A catalog maps exercise names to their immutable specifications. It is
//! assembled once at startup from parsed definitions plus a startpoint map
//! and passed by reference into everything that needs it.

use crate::{Catalog, Error, ExerciseDef, ExerciseSpec, Result, Routine};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Startpoint entry holding the lifter's body weight. A negative startpoint
/// for an exercise is read as a multiplier against this entry.
pub const BODY_WEIGHT_KEY: &str = "Body Weight";

/// Cached built-in demo catalog and routine - built once and reused
static BUILTIN: Lazy<(Catalog, Routine)> = Lazy::new(build_builtin);

/// A small barbell catalog usable without any input files.
pub fn builtin_catalog() -> &'static Catalog {
    &BUILTIN.0
}

/// The three-workout cycle that goes with [`builtin_catalog`].
pub fn builtin_routine() -> &'static Routine {
    &BUILTIN.1
}

fn build_builtin() -> (Catalog, Routine) {
    let mut defs = HashMap::new();
    defs.insert(
        "Squat".to_string(),
        ExerciseDef {
            reps: [5, 8],
            sets: [3, 5],
            weight_inc: 2.5,
        },
    );
    defs.insert(
        "Bench Press".to_string(),
        ExerciseDef {
            reps: [5, 8],
            sets: [3, 5],
            weight_inc: 2.5,
        },
    );
    defs.insert(
        "Deadlift".to_string(),
        ExerciseDef {
            reps: [3, 6],
            sets: [1, 3],
            weight_inc: 5.0,
        },
    );
    defs.insert(
        "Overhead Press".to_string(),
        ExerciseDef {
            reps: [5, 8],
            sets: [3, 5],
            weight_inc: 1.25,
        },
    );
    defs.insert(
        "Barbell Row".to_string(),
        ExerciseDef {
            reps: [5, 8],
            sets: [3, 5],
            weight_inc: 2.5,
        },
    );
    defs.insert(
        "Pull Up".to_string(),
        ExerciseDef {
            reps: [3, 8],
            sets: [3, 5],
            weight_inc: 1.25,
        },
    );

    let mut startpoints = HashMap::new();
    startpoints.insert(BODY_WEIGHT_KEY.to_string(), 80.0);
    startpoints.insert("Squat".to_string(), 60.0);
    startpoints.insert("Bench Press".to_string(), 40.0);
    startpoints.insert("Deadlift".to_string(), 80.0);
    startpoints.insert("Overhead Press".to_string(), 25.0);
    startpoints.insert("Barbell Row".to_string(), 40.0);
    // Pull-ups start from half body weight
    startpoints.insert("Pull Up".to_string(), -0.5);

    let catalog = Catalog::from_definitions(&defs, &startpoints)
        .expect("built-in catalog is well-formed");

    let routine = Routine {
        workouts: vec![
            vec![
                "Squat".to_string(),
                "Bench Press".to_string(),
                "Barbell Row".to_string(),
            ],
            vec![
                "Squat".to_string(),
                "Overhead Press".to_string(),
                "Pull Up".to_string(),
            ],
            vec![
                "Deadlift".to_string(),
                "Bench Press".to_string(),
                "Barbell Row".to_string(),
            ],
        ],
    };

    (catalog, routine)
}

impl Catalog {
    /// Assemble a catalog from raw definitions and starting weights.
    ///
    /// Every exercise must have a startpoint entry. A negative startpoint is
    /// resolved as `-startpoint * body_weight` using the [`BODY_WEIGHT_KEY`]
    /// entry, which itself names no exercise.
    pub fn from_definitions(
        defs: &HashMap<String, ExerciseDef>,
        startpoints: &HashMap<String, f64>,
    ) -> Result<Self> {
        let mut exercises = HashMap::new();

        for (name, def) in defs {
            let weight_initial = resolve_startpoint(name, startpoints)?;
            exercises.insert(
                name.clone(),
                ExerciseSpec {
                    name: name.clone(),
                    rep_range: (def.reps[0], def.reps[1]),
                    set_range: (def.sets[0], def.sets[1]),
                    weight_initial,
                    weight_increment: def.weight_inc,
                },
            );
        }

        tracing::debug!("Assembled catalog with {} exercises", exercises.len());
        Ok(Self { exercises })
    }

    pub fn get(&self, name: &str) -> Option<&ExerciseSpec> {
        self.exercises.get(name)
    }

    /// Look up an exercise, failing with a descriptive error when absent.
    pub fn require(&self, name: &str) -> Result<&ExerciseSpec> {
        self.exercises
            .get(name)
            .ok_or_else(|| Error::Config(format!("unknown exercise '{}'", name)))
    }

    /// Validate the catalog for consistency.
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, spec) in &self.exercises {
            if name.is_empty() || spec.name.is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if name != &spec.name {
                errors.push(format!(
                    "Exercise key '{}' doesn't match spec.name '{}'",
                    name, spec.name
                ));
            }
            if spec.rep_low() > spec.rep_high() {
                errors.push(format!(
                    "Exercise '{}': rep range low {} > high {}",
                    name,
                    spec.rep_low(),
                    spec.rep_high()
                ));
            }
            if spec.set_low() > spec.set_high() {
                errors.push(format!(
                    "Exercise '{}': set range low {} > high {}",
                    name,
                    spec.set_low(),
                    spec.set_high()
                ));
            }
            if spec.rep_low() < 1 {
                errors.push(format!(
                    "Exercise '{}': rep range must start at 1 or above",
                    name
                ));
            }
            if spec.set_low() < 1 {
                errors.push(format!(
                    "Exercise '{}': set range must start at 1 or above",
                    name
                ));
            }
            if spec.weight_increment <= 0.0 {
                errors.push(format!(
                    "Exercise '{}': weight increment {} must be positive",
                    name, spec.weight_increment
                ));
            }
            if spec.weight_initial < 0.0 {
                errors.push(format!(
                    "Exercise '{}': initial weight {} must not be negative",
                    name, spec.weight_initial
                ));
            }
        }

        errors
    }

    /// Fail fast on an invalid catalog.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::CatalogValidation(errors.join("; ")))
        }
    }
}

impl Routine {
    /// Validate a routine against a catalog.
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self, catalog: &Catalog) -> Vec<String> {
        let mut errors = Vec::new();

        if self.workouts.is_empty() {
            errors.push("Routine has no workouts".to_string());
        }

        for (i, workout) in self.workouts.iter().enumerate() {
            if workout.is_empty() {
                errors.push(format!("Workout {} lists no exercises", i));
            }
            for name in workout {
                if catalog.get(name).is_none() {
                    errors.push(format!(
                        "Workout {} references unknown exercise '{}'",
                        i, name
                    ));
                }
            }
        }

        errors
    }
}

fn resolve_startpoint(name: &str, startpoints: &HashMap<String, f64>) -> Result<f64> {
    let raw = startpoints
        .get(name)
        .copied()
        .ok_or_else(|| Error::Config(format!("no starting weight for exercise '{}'", name)))?;

    if raw >= 0.0 {
        return Ok(raw);
    }

    let body_weight = startpoints.get(BODY_WEIGHT_KEY).copied().ok_or_else(|| {
        Error::Config(format!(
            "exercise '{}' has a body-weight-relative startpoint but no '{}' entry exists",
            name, BODY_WEIGHT_KEY
        ))
    })?;

    Ok(-raw * body_weight)
}
