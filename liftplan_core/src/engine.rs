//! Day-by-day schedule generation.
//!
//! Rotates through the routine's workout cycle, one workout per simulated
//! day, advancing the current workout until its weighted-volume growth rate
//! clears the configured slope. Emits one record per day.

use crate::workout::Workout;
use crate::{
    Catalog, DayRecord, Error, Result, Routine, Schedule, ScheduleMeta, StallReport,
};
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

/// Tunables for one generation run.
#[derive(Clone, Debug)]
pub struct ScheduleParams {
    /// Number of days to simulate.
    pub days: u32,
    /// Minimum acceptable average daily growth of weighted volume.
    pub volume_slope: f64,
    /// Upper bound on advancement attempts within a single day.
    pub advance_cap: u32,
    /// On stall, keep the partial schedule instead of failing.
    pub allow_partial: bool,
    /// Calendar date of day 1.
    pub start_date: NaiveDate,
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self {
            days: 260,
            volume_slope: 0.0,
            advance_cap: 128,
            allow_partial: false,
            start_date: Utc::now().date_naive(),
        }
    }
}

/// Generate a schedule for `routine` over `params.days` simulated days.
///
/// Validates the catalog and routine up front; a stall during advancement
/// either fails ([`Error::ProgressionStalled`] / [`Error::ProgressionExhausted`])
/// or, with `allow_partial`, returns the days generated so far with a
/// [`StallReport`] in the metadata.
pub fn generate_schedule(
    catalog: &Catalog,
    routine: &Routine,
    params: &ScheduleParams,
) -> Result<Schedule> {
    catalog.ensure_valid()?;
    let routine_errors = routine.validate(catalog);
    if !routine_errors.is_empty() {
        return Err(Error::CatalogValidation(routine_errors.join("; ")));
    }
    if params.days == 0 {
        return Err(Error::Config("day count must be positive".into()));
    }

    let mut workouts = routine
        .workouts
        .iter()
        .map(|names| Workout::from_names(catalog, names))
        .collect::<Result<Vec<_>>>()?;
    let cycle_len = workouts.len();

    tracing::info!(
        "Generating {} day(s) over a cycle of {} workout(s), slope target {}",
        params.days,
        cycle_len,
        params.volume_slope
    );

    let mut meta = ScheduleMeta {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        days_requested: params.days,
        volume_slope: params.volume_slope,
        stalled: None,
    };
    let mut days = Vec::with_capacity(params.days as usize);

    let mut index = 0usize;
    let mut past_volume = 0.0f64;
    let mut unchanged_days = 0u32;

    'days: for day in 1..=params.days {
        unchanged_days += 1;
        let workout = &mut workouts[index];

        let mut slope =
            (workout.total_weighted_volume() - past_volume) / f64::from(unchanged_days);
        let mut advanced = false;
        let mut attempts = 0u32;

        while slope <= params.volume_slope {
            if attempts >= params.advance_cap {
                tracing::warn!(
                    "workout {} stalled on day {}: slope {} after {} attempts",
                    index,
                    day,
                    slope,
                    attempts
                );
                if params.allow_partial {
                    meta.stalled = Some(StallReport {
                        day,
                        workout: index,
                        exercise: None,
                        attempts,
                    });
                    break 'days;
                }
                return Err(Error::ProgressionStalled {
                    workout: index,
                    day,
                    attempts,
                });
            }

            let outcome = workout.advance(catalog)?;
            attempts += 1;
            advanced = true;

            if let Some(exercise) = outcome.escaped {
                tracing::warn!(
                    "exercise '{}' exhausted its weight window on day {}",
                    exercise,
                    day
                );
                if params.allow_partial {
                    meta.stalled = Some(StallReport {
                        day,
                        workout: index,
                        exercise: Some(exercise),
                        attempts,
                    });
                    break 'days;
                }
                return Err(Error::ProgressionExhausted {
                    exercise,
                    workout: index,
                    day,
                });
            }

            slope =
                (workout.total_weighted_volume() - past_volume) / f64::from(unchanged_days);
        }

        if advanced {
            tracing::debug!(
                "day {}: workout {} advanced {} time(s), new weighted volume {}",
                day,
                index,
                attempts,
                workout.total_weighted_volume()
            );
            unchanged_days = 0;
            past_volume = workout.total_weighted_volume();
        }

        days.push(day_record(day, params.start_date, index, workout));
        index = (index + 1) % cycle_len;
    }

    tracing::info!("Generated {} day record(s)", days.len());
    Ok(Schedule { meta, days })
}

fn day_record(day: u32, start_date: NaiveDate, index: usize, workout: &Workout) -> DayRecord {
    let runs = workout.runs();

    DayRecord {
        day,
        date: start_date + Duration::days(i64::from(day) - 1),
        workout: index,
        exercises: runs.iter().map(|r| r.exercise.clone()).collect(),
        reps: runs.iter().map(|r| r.reps).collect(),
        sets: runs.iter().map(|r| r.sets).collect(),
        weights: runs.iter().map(|r| r.weight).collect(),
        volumes: runs.iter().map(|r| r.volume()).collect(),
        weighted_volumes: runs.iter().map(|r| r.weighted_volume()).collect(),
        total_volume: workout.total_volume(),
        total_weighted_volume: workout.total_weighted_volume(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_catalog, builtin_routine};
    use crate::ExerciseSpec;
    use std::collections::HashMap;

    fn params(days: u32, volume_slope: f64) -> ScheduleParams {
        ScheduleParams {
            days,
            volume_slope,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            ..ScheduleParams::default()
        }
    }

    fn single_exercise_setup(weight_initial: f64) -> (Catalog, Routine) {
        let mut exercises = HashMap::new();
        exercises.insert(
            "Press".to_string(),
            ExerciseSpec {
                name: "Press".into(),
                rep_range: (5, 5),
                set_range: (3, 3),
                weight_initial,
                weight_increment: 2.5,
            },
        );
        let routine = Routine {
            workouts: vec![vec!["Press".to_string()]],
        };
        (Catalog { exercises }, routine)
    }

    #[test]
    fn test_record_count_matches_requested_days() {
        let schedule = generate_schedule(
            builtin_catalog(),
            builtin_routine(),
            &params(14, 0.0),
        )
        .unwrap();

        assert_eq!(schedule.days.len(), 14);
        assert!(schedule.meta.stalled.is_none());
    }

    #[test]
    fn test_rotation_visits_every_workout_in_order() {
        // Slope 0 with a fresh catalog never forces advancement, so the
        // cycle index is the only thing moving.
        let schedule = generate_schedule(
            builtin_catalog(),
            builtin_routine(),
            &params(9, 0.0),
        )
        .unwrap();

        let indices: Vec<usize> = schedule.days.iter().map(|d| d.workout).collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_zero_slope_keeps_starting_weights() {
        let (catalog, routine) = single_exercise_setup(100.0);
        let schedule = generate_schedule(&catalog, &routine, &params(5, 0.0)).unwrap();

        for day in &schedule.days {
            assert_eq!(day.weights, vec![100.0]);
            assert_eq!(day.reps, vec![5]);
            assert_eq!(day.sets, vec![3]);
        }
    }

    #[test]
    fn test_days_are_numbered_and_dated_consecutively() {
        let (catalog, routine) = single_exercise_setup(100.0);
        let schedule = generate_schedule(&catalog, &routine, &params(4, 0.0)).unwrap();

        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        for (i, day) in schedule.days.iter().enumerate() {
            assert_eq!(day.day, i as u32 + 1);
            assert_eq!(day.date, start + Duration::days(i as i64));
        }
    }

    #[test]
    fn test_forced_advancement_moves_weight() {
        // With a 10^6 slope target and the exercise pinned to 5x3, the first
        // day must climb the weight axis until weighted volume outruns the
        // target: exp((100 + 2.5k) / 10) * 15 > 10^6 first holds at k = 5.
        let (catalog, routine) = single_exercise_setup(100.0);
        let schedule = generate_schedule(&catalog, &routine, &params(1, 1e6)).unwrap();

        assert_eq!(schedule.days[0].weights, vec![112.5]);
    }

    #[test]
    fn test_advance_cap_reports_stall() {
        let (catalog, routine) = single_exercise_setup(100.0);
        let mut p = params(3, f64::MAX);
        p.advance_cap = 4;

        let err = generate_schedule(&catalog, &routine, &p).unwrap_err();
        match err {
            Error::ProgressionStalled { workout, day, attempts } => {
                assert_eq!(workout, 0);
                assert_eq!(day, 1);
                assert_eq!(attempts, 4);
            }
            other => panic!("expected ProgressionStalled, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausted_window_reports_exercise() {
        // exp() saturates at this load, so the very first advancement
        // escapes the weight window.
        let (catalog, routine) = single_exercise_setup(8000.0);
        let err = generate_schedule(&catalog, &routine, &params(2, f64::INFINITY))
            .unwrap_err();

        match err {
            Error::ProgressionExhausted { exercise, workout, day } => {
                assert_eq!(exercise, "Press");
                assert_eq!(workout, 0);
                assert_eq!(day, 1);
            }
            other => panic!("expected ProgressionExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_allow_partial_keeps_generated_days() {
        let (catalog, routine) = single_exercise_setup(8000.0);
        let mut p = params(2, f64::INFINITY);
        p.allow_partial = true;

        let schedule = generate_schedule(&catalog, &routine, &p).unwrap();

        let stall = schedule.meta.stalled.expect("stall must be reported");
        assert_eq!(stall.day, 1);
        assert_eq!(stall.exercise.as_deref(), Some("Press"));
        // The poisoned day is not emitted.
        assert!(schedule.days.is_empty());
    }

    #[test]
    fn test_rejects_zero_days() {
        let (catalog, routine) = single_exercise_setup(100.0);
        assert!(generate_schedule(&catalog, &routine, &params(0, 0.0)).is_err());
    }

    #[test]
    fn test_rejects_routine_with_unknown_exercise() {
        let (catalog, _) = single_exercise_setup(100.0);
        let routine = Routine {
            workouts: vec![vec!["Press".to_string(), "Curl".to_string()]],
        };

        let err = generate_schedule(&catalog, &routine, &params(1, 0.0)).unwrap_err();
        assert!(matches!(err, Error::CatalogValidation(_)));
    }

    #[test]
    fn test_record_totals_match_runs() {
        let schedule = generate_schedule(
            builtin_catalog(),
            builtin_routine(),
            &params(3, 0.0),
        )
        .unwrap();

        for day in &schedule.days {
            let volume_sum: f64 = day.volumes.iter().sum();
            assert!((day.total_volume - volume_sum).abs() < 1e-9);
            assert_eq!(day.exercises.len(), day.reps.len());
            assert_eq!(day.exercises.len(), day.weighted_volumes.len());
        }
    }
}
