//! Concrete constraints for the timetabling domain.
//!
//! Hard constraints score with the `1/(1 + conflicts)` shape and enumerate
//! their violations explicitly, so the engine counts them from the list
//! rather than the inference shim. Soft constraints score as the fraction
//! of assignments that satisfy the preference, which keeps the score and
//! the violation list trivially consistent.

use crate::core::constraint::{Constraint, ConstraintKind};
use crate::timetable::model::{ClassType, Timetable};

/// Noon boundary for morning classes, minutes from midnight.
const MORNING_ENDS: u16 = 12 * 60;
/// Earliest start for evening classes, minutes from midnight.
const EVENING_BEGINS: u16 = 17 * 60;
/// Fraction of a room's capacity a class should fill.
const UTILIZATION_FLOOR: f64 = 0.3;

/// No two classes may occupy one room at overlapping times.
pub struct RoomConflict;

impl RoomConflict {
    fn conflicts(&self, state: &Timetable) -> Vec<String> {
        let mut found = Vec::new();
        for i in 0..state.assignments.len() {
            for j in (i + 1)..state.assignments.len() {
                let (a, b) = (&state.assignments[i], &state.assignments[j]);
                if a.room_id == b.room_id && a.overlaps(b) {
                    found.push(format!(
                        "room {} hosts both {} and {} at {}",
                        a.room_id, a.class_id, b.class_id, a.slot
                    ));
                }
            }
        }
        found
    }
}

impl Constraint<Timetable> for RoomConflict {
    fn name(&self) -> &str {
        "room-conflict"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Hard
    }

    fn evaluate(&self, state: &Timetable) -> f64 {
        1.0 / (1.0 + self.conflicts(state).len() as f64)
    }

    fn violations(&self, state: &Timetable) -> Option<Vec<String>> {
        Some(self.conflicts(state))
    }
}

/// No lecturer may teach two classes at overlapping times.
pub struct LecturerConflict;

impl LecturerConflict {
    fn conflicts(&self, state: &Timetable) -> Vec<String> {
        let mut found = Vec::new();
        for i in 0..state.assignments.len() {
            for j in (i + 1)..state.assignments.len() {
                let (a, b) = (&state.assignments[i], &state.assignments[j]);
                if a.shares_lecturer(b) && a.overlaps(b) {
                    let shared = a
                        .lecturer_ids
                        .iter()
                        .find(|id| b.lecturer_ids.contains(*id))
                        .cloned()
                        .unwrap_or_default();
                    found.push(format!(
                        "lecturer {} is double-booked for {} and {} at {}",
                        shared, a.class_id, b.class_id, a.slot
                    ));
                }
            }
        }
        found
    }
}

impl Constraint<Timetable> for LecturerConflict {
    fn name(&self) -> &str {
        "lecturer-conflict"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Hard
    }

    fn evaluate(&self, state: &Timetable) -> f64 {
        1.0 / (1.0 + self.conflicts(state).len() as f64)
    }

    fn violations(&self, state: &Timetable) -> Option<Vec<String>> {
        Some(self.conflicts(state))
    }
}

/// Classes must fit their room unless explicitly flagged as overflow.
pub struct RoomCapacity;

impl RoomCapacity {
    fn overfull(&self, state: &Timetable) -> Vec<String> {
        let mut found = Vec::new();
        for assignment in &state.assignments {
            match state.room(&assignment.room_id) {
                Some(room) => {
                    if !assignment.overflow && assignment.participants > room.capacity {
                        found.push(format!(
                            "{} puts {} participants into {} (capacity {})",
                            assignment.class_id,
                            assignment.participants,
                            room.id,
                            room.capacity
                        ));
                    }
                }
                None => {
                    found.push(format!(
                        "{} references unknown room {}",
                        assignment.class_id, assignment.room_id
                    ));
                }
            }
        }
        found
    }
}

impl Constraint<Timetable> for RoomCapacity {
    fn name(&self) -> &str {
        "room-capacity"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Hard
    }

    fn evaluate(&self, state: &Timetable) -> f64 {
        1.0 / (1.0 + self.overfull(state).len() as f64)
    }

    fn violations(&self, state: &Timetable) -> Option<Vec<String>> {
        Some(self.overfull(state))
    }
}

/// Lab classes must sit in lab rooms.
pub struct LabRequirement;

impl LabRequirement {
    fn misplaced(&self, state: &Timetable) -> Vec<String> {
        state
            .assignments
            .iter()
            .filter(|a| a.requires_lab)
            .filter(|a| matches!(state.room(&a.room_id), Some(room) if !room.is_lab))
            .map(|a| format!("{} requires a lab but sits in {}", a.class_id, a.room_id))
            .collect()
    }
}

impl Constraint<Timetable> for LabRequirement {
    fn name(&self) -> &str {
        "lab-requirement"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Hard
    }

    fn evaluate(&self, state: &Timetable) -> f64 {
        1.0 / (1.0 + self.misplaced(state).len() as f64)
    }

    fn violations(&self, state: &Timetable) -> Option<Vec<String>> {
        Some(self.misplaced(state))
    }
}

/// Morning classes should run before noon, evening classes from 17:00.
pub struct ClassTypeTimePreference {
    weight: f64,
}

impl ClassTypeTimePreference {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }

    fn matches(&self, class_type: ClassType, start: u16) -> bool {
        match class_type {
            ClassType::Morning => start < MORNING_ENDS,
            ClassType::Evening => start >= EVENING_BEGINS,
        }
    }

    fn mismatched(&self, state: &Timetable) -> Vec<String> {
        state
            .assignments
            .iter()
            .filter(|a| !self.matches(a.class_type, a.slot.start))
            .map(|a| {
                let expected = match a.class_type {
                    ClassType::Morning => "a morning slot",
                    ClassType::Evening => "an evening slot",
                };
                format!("{} expects {} but is scheduled at {}", a.class_id, expected, a.slot)
            })
            .collect()
    }
}

impl Constraint<Timetable> for ClassTypeTimePreference {
    fn name(&self) -> &str {
        "class-type-time-preference"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Soft {
            weight: self.weight,
        }
    }

    fn evaluate(&self, state: &Timetable) -> f64 {
        if state.assignments.is_empty() {
            return 1.0;
        }
        let mismatched = self.mismatched(state).len();
        (state.assignments.len() - mismatched) as f64 / state.assignments.len() as f64
    }

    fn violations(&self, state: &Timetable) -> Option<Vec<String>> {
        Some(self.mismatched(state))
    }
}

/// Classes should not rattle around in rooms far larger than they need.
pub struct RoomUtilization {
    weight: f64,
}

impl RoomUtilization {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }

    fn wasteful(&self, state: &Timetable) -> Vec<String> {
        state
            .assignments
            .iter()
            .filter_map(|a| {
                let room = state.room(&a.room_id)?;
                if room.capacity == 0 {
                    return None;
                }
                let utilization = a.participants as f64 / room.capacity as f64;
                if utilization < UTILIZATION_FLOOR {
                    Some(format!(
                        "{} fills only {:.0}% of {}",
                        a.class_id,
                        utilization * 100.0,
                        room.id
                    ))
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Constraint<Timetable> for RoomUtilization {
    fn name(&self) -> &str {
        "room-utilization"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Soft {
            weight: self.weight,
        }
    }

    fn evaluate(&self, state: &Timetable) -> f64 {
        if state.assignments.is_empty() {
            return 1.0;
        }
        let wasteful = self.wasteful(state).len();
        (state.assignments.len() - wasteful) as f64 / state.assignments.len() as f64
    }

    fn violations(&self, state: &Timetable) -> Option<Vec<String>> {
        Some(self.wasteful(state))
    }
}
