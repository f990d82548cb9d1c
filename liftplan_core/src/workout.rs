//! A workout: the ordered exercise runs of one training session.
//!
//! Aggregates volume across its runs and owns the advancement step that
//! swaps every run for its progression-search result.

use crate::progression::{find_next_run, within_window};
use crate::{Catalog, ExerciseRun, Result};

/// Ordered runs for one session, plus the memoized next assignments.
///
/// The memo is position-aligned with `runs` and cleared on every
/// advancement, so a stale set of next runs can never be observed.
#[derive(Clone, Debug)]
pub struct Workout {
    runs: Vec<ExerciseRun>,
    next: Option<Vec<ExerciseRun>>,
}

/// Outcome of advancing a workout.
#[derive(Clone, Debug, Default)]
pub struct AdvanceReport {
    /// First exercise whose next run left its weight window, if any. Such a
    /// run is not a usable assignment; callers should stop advancing.
    pub escaped: Option<String>,
}

impl Workout {
    /// Build a workout from exercise names, each starting at its spec's floor.
    pub fn from_names<S: AsRef<str>>(catalog: &Catalog, names: &[S]) -> Result<Self> {
        let runs = names
            .iter()
            .map(|name| catalog.require(name.as_ref()).map(ExerciseRun::starting))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { runs, next: None })
    }

    pub fn runs(&self) -> &[ExerciseRun] {
        &self.runs
    }

    /// Sum of plain volume over the current runs.
    pub fn total_volume(&self) -> f64 {
        self.runs.iter().map(ExerciseRun::volume).sum()
    }

    /// Aggregate weighted volume: `exp(total_weight / 10) * total_rep_sets`.
    ///
    /// This recombines the summed load and the summed rep*set count through
    /// the exponential weighting rather than summing per-run weighted
    /// volumes, so the total load of the whole session drives the exponent.
    pub fn total_weighted_volume(&self) -> f64 {
        let weight: f64 = self.runs.iter().map(|r| r.weight).sum();
        let count: f64 = self
            .runs
            .iter()
            .map(|r| f64::from(r.reps) * f64::from(r.sets))
            .sum();

        (weight / 10.0).exp() * count
    }

    /// The next assignment for every run, memoized until the next advance.
    pub fn next_runs(&mut self, catalog: &Catalog) -> Result<&[ExerciseRun]> {
        if self.next.is_none() {
            self.next = Some(self.compute_next(catalog)?);
        }
        Ok(self.next.as_deref().unwrap_or_default())
    }

    fn compute_next(&self, catalog: &Catalog) -> Result<Vec<ExerciseRun>> {
        self.runs
            .iter()
            .map(|run| {
                catalog
                    .require(&run.exercise)
                    .map(|spec| find_next_run(run, spec))
            })
            .collect()
    }

    /// Replace every run with its progression-search result.
    ///
    /// The only operation that mutates the run list. Reuses the memoized
    /// next runs when present and always leaves the memo cleared.
    pub fn advance(&mut self, catalog: &Catalog) -> Result<AdvanceReport> {
        let next = match self.next.take() {
            Some(next) => next,
            None => self.compute_next(catalog)?,
        };

        let mut escaped = None;
        for (prev, new) in self.runs.iter().zip(&next) {
            let spec = catalog.require(&prev.exercise)?;
            if !within_window(prev, new, spec) {
                escaped = Some(prev.exercise.clone());
                break;
            }
        }

        self.runs = next;
        Ok(AdvanceReport { escaped })
    }
}
