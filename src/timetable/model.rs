//! Data model for the course-timetabling domain.
//!
//! The state is tree-shaped: a sequence of assignments plus read-only
//! catalogs of rooms, lecturers, and available time slots. Assignments
//! reference catalog entries by identifier, never by pointer, so the
//! derived `Clone` is already a correct deep clone.

use crate::core::state::State;
use std::fmt;

/// Day of the teaching week.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        };
        write!(f, "{name}")
    }
}

/// Whether a class belongs to the morning or the evening program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassType {
    Morning,
    Evening,
}

/// A bookable teaching interval. Times are minutes from midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSlot {
    pub day: Weekday,
    pub start: u16,
    pub end: u16,
    /// Ordinal of the slot within its day, starting at 1.
    pub period: u8,
}

impl TimeSlot {
    /// Creates a slot; `start` and `end` are minutes from midnight.
    pub fn new(day: Weekday, start: u16, end: u16, period: u8) -> Self {
        Self {
            day,
            start,
            end,
            period,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}-{:02}:{:02}",
            self.day,
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// A teaching room from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub id: String,
    pub capacity: u32,
    pub is_lab: bool,
}

impl Room {
    pub fn new(id: impl Into<String>, capacity: u32, is_lab: bool) -> Self {
        Self {
            id: id.into(),
            capacity,
            is_lab,
        }
    }
}

/// A lecturer from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Lecturer {
    pub id: String,
    pub name: String,
}

impl Lecturer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One scheduled class: the unit the move operators rearrange.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub class_id: String,
    pub room_id: String,
    pub lecturer_ids: Vec<String>,
    pub slot: TimeSlot,
    pub credit_hours: u8,
    pub participants: u32,
    pub class_type: ClassType,
    pub requires_lab: bool,
    /// Extra minutes the room stays occupied past the slot end when the
    /// class runs into a prayer break.
    pub prayer_extension_min: u16,
    /// Set when the class is deliberately allowed to exceed room capacity.
    pub overflow: bool,
}

impl Assignment {
    /// Minute at which the class actually releases its room.
    pub fn occupied_until(&self) -> u16 {
        self.slot.end.saturating_add(self.prayer_extension_min)
    }

    /// Whether the occupied intervals of two assignments intersect.
    pub fn overlaps(&self, other: &Assignment) -> bool {
        self.slot.day == other.slot.day
            && self.slot.start < other.occupied_until()
            && other.slot.start < self.occupied_until()
    }

    /// Whether two assignments share at least one lecturer.
    pub fn shares_lecturer(&self, other: &Assignment) -> bool {
        self.lecturer_ids
            .iter()
            .any(|id| other.lecturer_ids.contains(id))
    }
}

/// The timetabling state: assignments under optimization plus the
/// read-only reference catalogs they resolve their identifiers against.
#[derive(Clone, Debug, PartialEq)]
pub struct Timetable {
    pub assignments: Vec<Assignment>,
    pub rooms: Vec<Room>,
    pub lecturers: Vec<Lecturer>,
    pub slots: Vec<TimeSlot>,
}

impl Timetable {
    /// Looks up a room by identifier.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Looks up a lecturer by identifier.
    pub fn lecturer(&self, id: &str) -> Option<&Lecturer> {
        self.lecturers.iter().find(|l| l.id == id)
    }

    /// Indices of assignments that currently sit in a room or lecturer
    /// conflict with some other assignment.
    pub fn conflicted_indices(&self) -> Vec<usize> {
        let mut conflicted = vec![false; self.assignments.len()];
        for i in 0..self.assignments.len() {
            for j in (i + 1)..self.assignments.len() {
                let (a, b) = (&self.assignments[i], &self.assignments[j]);
                if a.overlaps(b) && (a.room_id == b.room_id || a.shares_lecturer(b)) {
                    conflicted[i] = true;
                    conflicted[j] = true;
                }
            }
        }
        conflicted
            .into_iter()
            .enumerate()
            .filter(|(_, c)| *c)
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl State for Timetable {}
