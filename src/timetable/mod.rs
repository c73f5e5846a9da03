//! University course-timetabling adapter for the annealing engine.
//!
//! This module shapes the generic engine for the timetabling problem:
//!
//! - `model`: the timetable state and its reference catalogs
//! - `constraints`: the hard feasibility rules and soft preferences
//! - `moves`: the neighborhood operators the engine selects among
//!
//! The initial seed timetable comes from an external builder; the adapter
//! makes no assumption about its feasibility.

pub mod constraints;
pub mod model;
pub mod moves;
