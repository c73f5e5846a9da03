//! Move-operator library for the timetabling domain.
//!
//! Three blind operators perturb single assignments or pairs, and one
//! targeted operator repairs conflicts directly. All of them return an
//! independent state; the targeted operator returns the state unchanged
//! when there is nothing to repair, which the engine treats as a neutral
//! candidate.

use crate::core::moves::MoveGenerator;
use crate::core::state::State;
use crate::timetable::model::Timetable;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// How many random (slot, room) placements the repair operator probes
/// before giving up on an iteration.
const RELOCATE_PROBES: usize = 20;

/// Moves one random class to a different catalog slot.
pub struct ChangeTimeSlot;

impl MoveGenerator<Timetable> for ChangeTimeSlot {
    fn name(&self) -> &str {
        "change-time-slot"
    }

    fn applicable(&self, state: &Timetable) -> bool {
        !state.assignments.is_empty() && state.slots.len() > 1
    }

    fn generate(&self, state: &Timetable, _temperature: f64, rng: &mut StdRng) -> Timetable {
        let mut next = state.deep_clone();
        let idx = rng.gen_range(0..next.assignments.len());
        let current = next.assignments[idx].slot;

        let choices: Vec<_> = next.slots.iter().filter(|s| **s != current).collect();
        if let Some(slot) = choices.choose(rng) {
            next.assignments[idx].slot = **slot;
        }
        next
    }
}

/// Moves one random class to a different room.
pub struct ChangeRoom;

impl MoveGenerator<Timetable> for ChangeRoom {
    fn name(&self) -> &str {
        "change-room"
    }

    fn applicable(&self, state: &Timetable) -> bool {
        !state.assignments.is_empty() && state.rooms.len() > 1
    }

    fn generate(&self, state: &Timetable, _temperature: f64, rng: &mut StdRng) -> Timetable {
        let mut next = state.deep_clone();
        let idx = rng.gen_range(0..next.assignments.len());
        let current = next.assignments[idx].room_id.clone();

        let choices: Vec<String> = next
            .rooms
            .iter()
            .filter(|r| r.id != current)
            .map(|r| r.id.clone())
            .collect();
        if let Some(room_id) = choices.choose(rng) {
            next.assignments[idx].room_id = room_id.clone();
        }
        next
    }
}

/// Exchanges the time slots of two random classes.
pub struct SwapTimeSlots;

impl MoveGenerator<Timetable> for SwapTimeSlots {
    fn name(&self) -> &str {
        "swap-time-slots"
    }

    fn applicable(&self, state: &Timetable) -> bool {
        state.assignments.len() >= 2
    }

    fn generate(&self, state: &Timetable, _temperature: f64, rng: &mut StdRng) -> Timetable {
        let mut next = state.deep_clone();
        let first = rng.gen_range(0..next.assignments.len());
        let mut second = rng.gen_range(0..next.assignments.len());
        while second == first {
            second = rng.gen_range(0..next.assignments.len());
        }

        let slot = next.assignments[first].slot;
        next.assignments[first].slot = next.assignments[second].slot;
        next.assignments[second].slot = slot;
        next
    }
}

/// Targeted repair: moves one conflicted class to a conflict-free
/// placement.
///
/// Picks a random assignment that currently collides on its room or
/// lecturer and probes random (slot, room) pairs until one resolves the
/// collision without violating capacity or the lab requirement. Returns
/// the state unchanged when nothing conflicts or no probe lands.
pub struct RelocateConflicted;

impl RelocateConflicted {
    fn placement_works(state: &Timetable, idx: usize) -> bool {
        let assignment = &state.assignments[idx];

        match state.room(&assignment.room_id) {
            Some(room) => {
                if assignment.requires_lab && !room.is_lab {
                    return false;
                }
                if !assignment.overflow && assignment.participants > room.capacity {
                    return false;
                }
            }
            None => return false,
        }

        state.assignments.iter().enumerate().all(|(j, other)| {
            j == idx
                || !assignment.overlaps(other)
                || (assignment.room_id != other.room_id && !assignment.shares_lecturer(other))
        })
    }
}

impl MoveGenerator<Timetable> for RelocateConflicted {
    fn name(&self) -> &str {
        "relocate-conflicted"
    }

    fn applicable(&self, state: &Timetable) -> bool {
        !state.assignments.is_empty() && !state.slots.is_empty() && !state.rooms.is_empty()
    }

    fn generate(&self, state: &Timetable, _temperature: f64, rng: &mut StdRng) -> Timetable {
        let conflicted = state.conflicted_indices();
        let Some(&idx) = conflicted.choose(rng) else {
            return state.deep_clone();
        };

        let mut next = state.deep_clone();
        let original_slot = next.assignments[idx].slot;
        let original_room = next.assignments[idx].room_id.clone();

        for _ in 0..RELOCATE_PROBES {
            let slot = *next.slots.choose(rng).unwrap();
            let room_id = next.rooms.choose(rng).unwrap().id.clone();
            next.assignments[idx].slot = slot;
            next.assignments[idx].room_id = room_id;

            if Self::placement_works(&next, idx) {
                return next;
            }
        }

        next.assignments[idx].slot = original_slot;
        next.assignments[idx].room_id = original_room;
        next
    }
}
