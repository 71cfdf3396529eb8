use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Task;
use crate::validators::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Priority,
    CreatedAt,
    LastUpdatedAt,
    /// Case-insensitive task text.
    Text,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Priority,
        SortField::CreatedAt,
        SortField::LastUpdatedAt,
        SortField::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Priority => "priority",
            SortField::CreatedAt => "createdAt",
            SortField::LastUpdatedAt => "lastUpdatedAt",
            SortField::Text => "text",
        }
    }

    /// Ascending order of two tasks by this field.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortField::Priority => a.priority.cmp(&b.priority),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::LastUpdatedAt => a.last_updated_at.cmp(&b.last_updated_at),
            SortField::Text => a.text.to_lowercase().cmp(&b.text.to_lowercase()),
        }
    }

    fn index(self) -> usize {
        match self {
            SortField::Priority => 0,
            SortField::CreatedAt => 1,
            SortField::LastUpdatedAt => 2,
            SortField::Text => 3,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" | "Priority" => Ok(SortField::Priority),
            "createdAt" | "created_at" | "Created" => Ok(SortField::CreatedAt),
            "lastUpdatedAt" | "last_updated_at" | "LastUpdated" => Ok(SortField::LastUpdatedAt),
            "text" | "Task" => Ok(SortField::Text),
            other => Err(ValidationError::UnknownSortField(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Per-field ascending/descending toggles.
///
/// Each field starts ascending. Sorting by a field uses its current
/// direction and then flips only that field's toggle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortController {
    /// `true` once a field has been sorted ascending, meaning the next sort descends.
    flipped: [bool; 4],
    last_applied: Option<(SortField, Direction)>,
}

impl SortController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction the next `sort_by(field)` will use.
    pub fn next_direction(&self, field: SortField) -> Direction {
        if self.flipped[field.index()] {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    /// The most recent sort, re-applied after every reload.
    pub fn last_applied(&self) -> Option<(SortField, Direction)> {
        self.last_applied
    }

    /// Stable-sorts `tasks` ascending by `field`, reverses if the field's
    /// toggle says descending, then flips the toggle.
    pub fn sort_by(&mut self, field: SortField, tasks: &mut [Task]) -> Direction {
        let direction = self.next_direction(field);
        apply(field, direction, tasks);

        let toggle = &mut self.flipped[field.index()];
        *toggle = !*toggle;
        self.last_applied = Some((field, direction));
        direction
    }

    /// Repeats the last sort on fresh data without touching any toggle.
    pub fn reapply(&self, tasks: &mut [Task]) {
        if let Some((field, direction)) = self.last_applied {
            apply(field, direction, tasks);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn apply(field: SortField, direction: Direction, tasks: &mut [Task]) {
    tasks.sort_by(|a, b| field.compare(a, b));
    if direction == Direction::Descending {
        tasks.reverse();
    }
}
