//! Progression search: find the next harder assignment for an exercise.
//!
//! Advancement is a brute-force scan of every (reps, sets, weight) the
//! exercise allows, bounded to a small weight window above the current run,
//! keeping the candidate with the smallest weighted volume that still beats
//! the current one. The grid stays small: tens to a few hundred points per
//! search.

use crate::{ExerciseRun, ExerciseSpec};

/// Number of increment steps above the current weight the search may reach.
/// Keeps weight progression gradual and the scan bounded.
const WEIGHT_WINDOW_STEPS: f64 = 8.0;

/// Tolerance when comparing quantized weights.
const WEIGHT_EPS: f64 = 1e-9;

/// Highest weight the search may assign when progressing from `run`.
pub fn weight_ceiling(run: &ExerciseRun, spec: &ExerciseSpec) -> f64 {
    run.weight + WEIGHT_WINDOW_STEPS * spec.weight_increment
}

/// Whether `next` stayed inside the weight window opened from `prev`.
///
/// A result outside the window is the degenerate "no further progression
/// found" case; callers must not treat such a run as a usable assignment.
pub fn within_window(prev: &ExerciseRun, next: &ExerciseRun, spec: &ExerciseSpec) -> bool {
    next.weight <= weight_ceiling(prev, spec) + WEIGHT_EPS
}

/// Find the run with the smallest weighted volume strictly above `run`'s.
///
/// The search space is the full grid of reps in `[rep_low, rep_high]`, sets
/// in `[set_low, set_high]`, and weight in `weight_initial + k * increment`
/// up to [`weight_ceiling`]. Enumeration order is reps, then sets, then
/// weight; the first grid point at the minimum qualifying weighted volume
/// wins ties.
///
/// When no grid point beats `run` (in practice only once the weighted volume
/// saturates), the returned run carries maximal reps and sets at a weight
/// one increment past the ceiling; [`within_window`] detects this.
pub fn find_next_run(run: &ExerciseRun, spec: &ExerciseSpec) -> ExerciseRun {
    let ceiling = weight_ceiling(run, spec);
    let current = run.weighted_volume();

    // Sentinel beyond the window: any qualifying grid point replaces it.
    let mut best = ExerciseRun::new(
        spec.name.clone(),
        ceiling + spec.weight_increment,
        spec.rep_high(),
        spec.set_high(),
    );

    // A non-positive increment would never exit the weight scan; validation
    // rejects such specs before we get here.
    if spec.weight_increment <= 0.0 {
        tracing::warn!(
            "refusing progression search for '{}': non-positive weight increment",
            spec.name
        );
        return best;
    }

    for reps in spec.rep_low()..=spec.rep_high() {
        for sets in spec.set_low()..=spec.set_high() {
            let mut step = 0u32;
            loop {
                let weight = spec.weight_initial + f64::from(step) * spec.weight_increment;
                if weight > ceiling + WEIGHT_EPS {
                    break;
                }

                let candidate = ExerciseRun::new(spec.name.clone(), weight, reps, sets);
                let wv = candidate.weighted_volume();
                if wv < best.weighted_volume() && wv > current {
                    best = candidate;
                }

                step += 1;
            }
        }
    }

    tracing::trace!(
        "next run for '{}': {}x{} @ {} (from {}x{} @ {})",
        spec.name,
        best.sets,
        best.reps,
        best.weight,
        run.sets,
        run.reps,
        run.weight
    );

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(
        rep_range: (i32, i32),
        set_range: (i32, i32),
        weight_initial: f64,
        weight_increment: f64,
    ) -> ExerciseSpec {
        ExerciseSpec {
            name: "Press".into(),
            rep_range,
            set_range,
            weight_initial,
            weight_increment,
        }
    }

    #[test]
    fn test_single_point_ranges_move_weight_only() {
        // With reps and sets pinned, only the weight axis can progress.
        let spec = spec((5, 5), (3, 3), 100.0, 2.5);
        let run = ExerciseRun::starting(&spec);

        let next = find_next_run(&run, &spec);

        assert_eq!(next.reps, 5);
        assert_eq!(next.sets, 3);
        assert_eq!(next.weight, 102.5);
        assert!(within_window(&run, &next, &spec));
    }

    #[test]
    fn test_result_is_strictly_harder() {
        let spec = spec((5, 8), (3, 5), 60.0, 2.5);
        let mut run = ExerciseRun::starting(&spec);

        for _ in 0..50 {
            let next = find_next_run(&run, &spec);
            assert!(
                next.weighted_volume() > run.weighted_volume(),
                "expected strict improvement from {:?} to {:?}",
                run,
                next
            );
            run = next;
        }
    }

    #[test]
    fn test_result_stays_in_bounds() {
        let spec = spec((5, 8), (3, 5), 60.0, 2.5);
        let mut run = ExerciseRun::starting(&spec);

        for _ in 0..50 {
            let next = find_next_run(&run, &spec);
            assert!(next.reps >= spec.rep_low() && next.reps <= spec.rep_high());
            assert!(next.sets >= spec.set_low() && next.sets <= spec.set_high());
            assert!(next.weight >= spec.weight_initial);
            assert!(next.weight <= weight_ceiling(&run, &spec) + 1e-9);
            run = next;
        }
    }

    #[test]
    fn test_weights_stay_quantized() {
        let spec = spec((5, 8), (3, 5), 60.0, 2.5);
        let mut run = ExerciseRun::starting(&spec);

        for _ in 0..50 {
            run = find_next_run(&run, &spec);
            let steps = (run.weight - spec.weight_initial) / spec.weight_increment;
            assert!(
                (steps - steps.round()).abs() < 1e-6,
                "weight {} is not on the increment grid",
                run.weight
            );
        }
    }

    #[test]
    fn test_search_may_deload_weight() {
        // The window's floor is the initial weight, so a lighter assignment
        // with more reps can be the smallest qualifying step up.
        let spec = spec((5, 8), (3, 3), 100.0, 2.5);
        let run = ExerciseRun::new("Press", 102.5, 5, 3);

        let next = find_next_run(&run, &spec);

        // 21 * exp(10.0) beats every heavier candidate above 15 * exp(10.25).
        assert_eq!(next.weight, 100.0);
        assert_eq!(next.reps, 7);
        assert!(next.weighted_volume() > run.weighted_volume());
    }

    #[test]
    fn test_saturated_volume_returns_out_of_window_run() {
        // exp(weight / 10) overflows well before 8000; every grid point then
        // compares equal to the current run and the sentinel survives.
        let spec = spec((5, 5), (3, 3), 8000.0, 2.5);
        let run = ExerciseRun::starting(&spec);

        let next = find_next_run(&run, &spec);

        assert!(!within_window(&run, &next, &spec));
        assert_eq!(next.reps, spec.rep_high());
        assert_eq!(next.sets, spec.set_high());
    }

    #[test]
    fn test_tie_break_prefers_enumeration_order() {
        // From wv = 5 the minimum qualifying volume is 4 * exp(0.3), reached
        // at weight 3 by (reps=1, sets=4), (2, 2), and (4, 1) alike. The
        // reps-outer, sets-middle scan keeps the first of the three.
        let spec = spec((1, 8), (1, 8), 0.0, 1.0);
        let run = ExerciseRun::new("Press", 0.0, 5, 1); // wv = 5

        let next = find_next_run(&run, &spec);

        assert!(next.weighted_volume() > run.weighted_volume());
        assert_eq!((next.reps, next.sets), (1, 4));
        assert_eq!(next.weight, 3.0);
    }
}
