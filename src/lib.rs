//! # Emberweave
//!
//! A two-phase, adaptive simulated annealing engine for constraint-satisfaction
//! problems, with a course-timetabling adapter.
//!
//! ## Overview
//!
//! Simulated annealing is a probabilistic technique for approximating the
//! global optimum of a cost function. This engine specializes it for
//! constraint satisfaction: constraints are tagged *hard* (feasibility) or
//! *soft* (preference), and the run is split into two regimes. The first
//! phase eliminates hard violations; the second optimizes soft penalties
//! and never accepts a candidate that regresses past the best
//! hard-violation count reached. Neighbor states come from a library of
//! named move generators picked adaptively by per-operator credit, and
//! prolonged stagnation triggers bounded reheating.
//!
//! The library focuses on:
//!
//! - Strict separation of satisfiability and preference
//! - Deterministic behavior (when seeded)
//! - Modular, reusable components behind small object-safe traits
//!
//! ## Core Components
//!
//! - `State`: a candidate solution supplying a deep-clone operation
//! - `Constraint`: a pure hard/soft scoring function over a state
//! - `MoveGenerator`: a neighborhood operator with an applicability predicate
//! - `FitnessEvaluator`: aggregation of constraint scores into one cost
//! - `OperatorSelector`: adaptive, credit-based operator selection
//! - `Annealer`: the two-phase driver
//!
//! ## Example
//!
//! ```rust
//! use emberweave::prelude::*;
//! use emberweave::timetable::constraints::{LecturerConflict, RoomConflict};
//! use emberweave::timetable::model::*;
//! use emberweave::timetable::moves::{ChangeRoom, ChangeTimeSlot};
//!
//! // Two classes collide in room R101 on Monday morning.
//! let slots = vec![
//!     TimeSlot::new(Weekday::Monday, 8 * 60, 10 * 60, 1),
//!     TimeSlot::new(Weekday::Monday, 10 * 60, 12 * 60, 2),
//!     TimeSlot::new(Weekday::Tuesday, 8 * 60, 10 * 60, 1),
//! ];
//! let assignment = |class: &str, lecturer: &str, slot: TimeSlot| Assignment {
//!     class_id: class.to_string(),
//!     room_id: "R101".to_string(),
//!     lecturer_ids: vec![lecturer.to_string()],
//!     slot,
//!     credit_hours: 2,
//!     participants: 25,
//!     class_type: ClassType::Morning,
//!     requires_lab: false,
//!     prayer_extension_min: 0,
//!     overflow: false,
//! };
//! let timetable = Timetable {
//!     assignments: vec![
//!         assignment("CS101", "L1", slots[0]),
//!         assignment("MA102", "L2", slots[0]),
//!     ],
//!     rooms: vec![Room::new("R101", 30, false), Room::new("R102", 30, false)],
//!     lecturers: vec![Lecturer::new("L1", "Ada"), Lecturer::new("L2", "Noam")],
//!     slots,
//! };
//!
//! let constraints: Vec<Box<dyn Constraint<Timetable>>> =
//!     vec![Box::new(RoomConflict), Box::new(LecturerConflict)];
//! let operators: Vec<Box<dyn MoveGenerator<Timetable>>> =
//!     vec![Box::new(ChangeTimeSlot), Box::new(ChangeRoom)];
//!
//! let config = AnnealerConfig {
//!     initial_temperature: 100.0,
//!     max_iterations: 5_000,
//!     ..AnnealerConfig::default()
//! };
//!
//! let mut annealer = Annealer::new(config, constraints, operators, seeded_rng(42)).unwrap();
//! let solution = annealer.solve(&timetable);
//!
//! assert_eq!(solution.hard_violations, 0);
//! assert!(solution.violations.is_empty());
//! ```

pub mod core;
pub mod prelude;
pub mod rng;
pub mod timetable;
pub mod utils;

// Re-export core components for convenient access
pub use crate::core::acceptance::Phase;
pub use crate::core::annealer::{Annealer, Solution};
pub use crate::core::config::{AnnealerConfig, ConfigError};
pub use crate::core::constraint::{Constraint, ConstraintKind};
pub use crate::core::fitness::{Evaluation, FitnessEvaluator};
pub use crate::core::moves::MoveGenerator;
pub use crate::core::progress::{LogLevel, LogOptions, OperatorReport, ProgressRecord, ProgressSink};
pub use crate::core::selector::{OperatorSelector, OperatorStats};
pub use crate::core::state::State;
pub use crate::rng::seeded_rng::seeded_rng;
