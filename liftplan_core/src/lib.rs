#![forbid(unsafe_code)]

//! Core domain model and scheduling logic for liftplan.
//!
//! This crate provides:
//! - Domain types (exercise specs, runs, routines, schedules)
//! - Catalog construction and validation
//! - The progression search for the next harder assignment
//! - Workout aggregation and advancement
//! - The day-by-day schedule engine
//! - Input parsing and schedule export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod input;
pub mod progression;
pub mod workout;
pub mod engine;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{builtin_catalog, builtin_routine, BODY_WEIGHT_KEY};
pub use config::{Config, OutputFormat};
pub use engine::{generate_schedule, ScheduleParams};
pub use input::load_plan;
pub use progression::find_next_run;
pub use workout::{AdvanceReport, Workout};
