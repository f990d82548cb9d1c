//! Core domain types for the liftplan scheduler.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise specifications and their quantization parameters
//! - Exercise runs (concrete weight/rep/set assignments) and volume metrics
//! - Routines (ordered workout cycles)
//! - Day records and generated schedules

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Exercise Types
// ============================================================================

/// Immutable per-exercise configuration.
///
/// Rep and set bounds are inclusive. `weight_initial` is the starting load
/// and `weight_increment` the smallest step the load may change by; every
/// weight ever assigned is `weight_initial + k * weight_increment`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSpec {
    pub name: String,
    pub rep_range: (i32, i32),
    pub set_range: (i32, i32),
    pub weight_initial: f64,
    pub weight_increment: f64,
}

impl ExerciseSpec {
    pub fn rep_low(&self) -> i32 {
        self.rep_range.0
    }

    pub fn rep_high(&self) -> i32 {
        self.rep_range.1
    }

    pub fn set_low(&self) -> i32 {
        self.set_range.0
    }

    pub fn set_high(&self) -> i32 {
        self.set_range.1
    }
}

/// Raw exercise definition as found in the exercises input file.
///
/// Starting weights live in a separate startpoint file, so this only carries
/// the ranges and the increment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseDef {
    pub reps: [i32; 2],
    pub sets: [i32; 2],
    #[serde(rename = "weightInc")]
    pub weight_inc: f64,
}

/// A concrete (weight, reps, sets) assignment for one exercise on one day.
///
/// Runs are values: advancement produces a new run, it never mutates one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRun {
    pub exercise: String,
    pub weight: f64,
    pub reps: i32,
    pub sets: i32,
}

impl ExerciseRun {
    pub fn new(exercise: impl Into<String>, weight: f64, reps: i32, sets: i32) -> Self {
        Self {
            exercise: exercise.into(),
            weight,
            reps,
            sets,
        }
    }

    /// The run an exercise starts from: lowest reps, lowest sets, initial weight.
    pub fn starting(spec: &ExerciseSpec) -> Self {
        Self::new(
            spec.name.clone(),
            spec.weight_initial,
            spec.rep_low(),
            spec.set_low(),
        )
    }

    /// Work-done proxy: `weight * reps * sets`.
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps) * f64::from(self.sets)
    }

    /// Exponential-in-weight variant of volume: `exp(weight / 10) * reps * sets`.
    ///
    /// Strictly increasing in weight, reps, and sets individually; the
    /// progression search depends on that monotonicity.
    pub fn weighted_volume(&self) -> f64 {
        (self.weight / 10.0).exp() * f64::from(self.reps) * f64::from(self.sets)
    }
}

// ============================================================================
// Routine and Catalog Types
// ============================================================================

/// An ordered cycle of workouts, each listing exercise names in emission order.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Routine {
    pub workouts: Vec<Vec<String>>,
}

/// The complete catalog of exercise specifications, keyed by exercise name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: HashMap<String, ExerciseSpec>,
}

// ============================================================================
// Schedule Output Types
// ============================================================================

/// One simulated day: the current workout's runs plus aggregate volumes.
///
/// The per-exercise vectors are parallel; position `i` in each refers to the
/// same exercise slot of the workout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: u32,
    pub date: NaiveDate,
    pub workout: usize,
    pub exercises: Vec<String>,
    pub reps: Vec<i32>,
    pub sets: Vec<i32>,
    pub weights: Vec<f64>,
    pub volumes: Vec<f64>,
    pub weighted_volumes: Vec<f64>,
    pub total_volume: f64,
    pub total_weighted_volume: f64,
}

/// Where and why schedule generation stopped early.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StallReport {
    pub day: u32,
    pub workout: usize,
    /// Set when a single exercise exhausted its weight window; `None` when
    /// the advancement cap was reached without one.
    pub exercise: Option<String>,
    pub attempts: u32,
}

/// Metadata attached to a generated schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleMeta {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub days_requested: u32,
    pub volume_slope: f64,
    pub stalled: Option<StallReport>,
}

/// A fully generated schedule: one record per simulated day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub meta: ScheduleMeta,
    pub days: Vec<DayRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_spec() -> ExerciseSpec {
        ExerciseSpec {
            name: "Overhead Press".into(),
            rep_range: (5, 8),
            set_range: (3, 5),
            weight_initial: 40.0,
            weight_increment: 1.25,
        }
    }

    #[test]
    fn test_starting_run_uses_range_floors() {
        let spec = press_spec();
        let run = ExerciseRun::starting(&spec);

        assert_eq!(run.exercise, "Overhead Press");
        assert_eq!(run.reps, 5);
        assert_eq!(run.sets, 3);
        assert_eq!(run.weight, 40.0);
    }

    #[test]
    fn test_volume_formula() {
        let run = ExerciseRun::new("Squat", 100.0, 5, 3);
        assert_eq!(run.volume(), 1500.0);
    }

    #[test]
    fn test_weighted_volume_formula() {
        let run = ExerciseRun::new("Squat", 100.0, 5, 3);
        let expected = (100.0f64 / 10.0).exp() * 15.0;
        assert!((run.weighted_volume() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_volume_monotone_in_weight() {
        let base = ExerciseRun::new("Squat", 100.0, 5, 3);
        let heavier = ExerciseRun::new("Squat", 102.5, 5, 3);
        assert!(heavier.weighted_volume() > base.weighted_volume());
    }

    #[test]
    fn test_weighted_volume_monotone_in_reps() {
        let base = ExerciseRun::new("Squat", 100.0, 5, 3);
        let more_reps = ExerciseRun::new("Squat", 100.0, 6, 3);
        assert!(more_reps.weighted_volume() > base.weighted_volume());
    }

    #[test]
    fn test_weighted_volume_monotone_in_sets() {
        let base = ExerciseRun::new("Squat", 100.0, 5, 3);
        let more_sets = ExerciseRun::new("Squat", 100.0, 5, 4);
        assert!(more_sets.weighted_volume() > base.weighted_volume());
    }

    #[test]
    fn test_exercise_def_field_names() {
        let json = r#"{ "reps": [5, 8], "sets": [3, 5], "weightInc": 2.5 }"#;
        let def: ExerciseDef = serde_json::from_str(json).unwrap();

        assert_eq!(def.reps, [5, 8]);
        assert_eq!(def.sets, [3, 5]);
        assert_eq!(def.weight_inc, 2.5);
    }
}
