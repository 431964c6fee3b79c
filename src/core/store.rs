use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;

use crate::{
    record::{DailyTodo, ProgressRecord},
    types::{DsaStatus, LectureId, QuestionId, TodoId},
};

use super::calendar::{day_label, today, week_of};

/// One day of the weekly activity summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayActivity {
    /// Three-letter weekday label.
    pub label: &'static str,
    /// Calendar day.
    pub date: NaiveDate,
    /// Net lectures completed that day.
    pub lectures: u32,
    /// Net questions solved that day.
    pub questions: u32,
    /// True when this entry is the current day.
    pub is_today: bool,
}

/// Authoritative in-memory progress record with mutation and derived-read
/// operations.
///
/// Pure state machine, no I/O: the session runtime applies mutations here and
/// drains the dirty flag to drive local mirroring and remote scheduling.
/// Mutations that change nothing (todo ops on a missing id) leave the flag
/// clear.
#[derive(Debug, Default)]
pub struct ProgressStore {
    record: ProgressRecord,
    dirty: bool,
}

impl ProgressStore {
    /// Creates a store over an all-default record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over a loaded record.
    pub fn from_record(record: ProgressRecord) -> Self {
        Self {
            record,
            dirty: false,
        }
    }

    /// Current record.
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    /// Replaces the record wholesale without marking it dirty. Used for
    /// identity loads and remote-originated snapshots, which are already
    /// durable where they came from.
    pub fn adopt(&mut self, record: ProgressRecord) {
        self.record = record;
        self.dirty = false;
    }

    /// Takes and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Applies a caller-supplied transform to the record.
    pub fn update<F>(&mut self, transform: F)
    where
        F: FnOnce(ProgressRecord) -> ProgressRecord,
    {
        self.record = transform(std::mem::take(&mut self.record));
        self.dirty = true;
    }

    /// Overwrites the program start date.
    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.record.start_date = date;
        self.dirty = true;
    }

    /// Flips completion of `id` and adjusts today's activity counters.
    pub fn toggle_lecture(&mut self, id: LectureId) {
        let day = today();
        let was_completed = !self.record.completed_lectures.insert(id);
        if was_completed {
            self.record.completed_lectures.remove(&id);
        }

        self.record.activity_dates.insert(day);
        let count = self.record.daily_lectures.entry(day).or_insert(0);
        *count = if was_completed {
            count.saturating_sub(1)
        } else {
            *count + 1
        };
        self.dirty = true;
    }

    /// Sets the status of `question`, counting today's solves only on
    /// transitions into or out of solved.
    pub fn update_dsa_status(&mut self, question: QuestionId, status: DsaStatus) {
        let day = today();
        let prev = self
            .record
            .dsa_progress
            .get(&question)
            .copied()
            .unwrap_or_default();
        self.record.dsa_progress.insert(question, status);
        self.record.activity_dates.insert(day);

        let was_solved = prev == DsaStatus::Solved;
        let is_solved = status == DsaStatus::Solved;
        if is_solved && !was_solved {
            *self.record.daily_questions.entry(day).or_insert(0) += 1;
        } else if was_solved && !is_solved {
            if let Some(count) = self.record.daily_questions.get_mut(&day) {
                *count = count.saturating_sub(1);
            }
        }
        self.dirty = true;
    }

    /// Replaces the record with all-empty defaults.
    pub fn reset(&mut self) {
        self.record = ProgressRecord::default();
        self.dirty = true;
    }

    /// Overwrites the note for `date`, last write wins.
    pub fn update_daily_note(&mut self, date: NaiveDate, text: impl Into<String>) {
        self.record.daily_notes.insert(date, text.into());
        self.dirty = true;
    }

    /// Appends an uncompleted todo to `date`'s list and returns its id.
    pub fn add_daily_todo(&mut self, date: NaiveDate, text: impl Into<String>) -> TodoId {
        let todos = self.record.daily_todos.entry(date).or_default();
        let id = next_todo_id(todos);
        todos.push(DailyTodo {
            id,
            text: text.into(),
            completed: false,
        });
        self.dirty = true;
        id
    }

    /// Flips the completed flag of the matching todo; no-op when absent.
    pub fn toggle_daily_todo(&mut self, date: NaiveDate, id: TodoId) {
        let found = self
            .record
            .daily_todos
            .get_mut(&date)
            .and_then(|todos| todos.iter_mut().find(|todo| todo.id == id));
        if let Some(todo) = found {
            todo.completed = !todo.completed;
            self.dirty = true;
        }
    }

    /// Removes the matching todo; no-op when absent.
    pub fn delete_daily_todo(&mut self, date: NaiveDate, id: TodoId) {
        if let Some(todos) = self.record.daily_todos.get_mut(&date) {
            if let Some(pos) = todos.iter().position(|todo| todo.id == id) {
                todos.remove(pos);
                self.dirty = true;
            }
        }
    }

    /// True when `id` is marked done.
    pub fn lecture_completed(&self, id: LectureId) -> bool {
        self.record.completed_lectures.contains(&id)
    }

    /// Status of `question`, unsolved when absent.
    pub fn dsa_status(&self, question: QuestionId) -> DsaStatus {
        self.record
            .dsa_progress
            .get(&question)
            .copied()
            .unwrap_or_default()
    }

    /// Number of questions currently solved.
    pub fn solved_count(&self) -> usize {
        self.record
            .dsa_progress
            .values()
            .filter(|status| **status == DsaStatus::Solved)
            .count()
    }

    /// Activity for the seven days of the current week, Monday first.
    /// Days without recorded activity report zero.
    pub fn weekly_activity(&self) -> Vec<DayActivity> {
        let now = today();
        week_of(now)
            .into_iter()
            .map(|date| DayActivity {
                label: day_label(date),
                date,
                lectures: self.record.daily_lectures.get(&date).copied().unwrap_or(0),
                questions: self.record.daily_questions.get(&date).copied().unwrap_or(0),
                is_today: date == now,
            })
            .collect()
    }
}

// Clock-derived so ids stay unique across sessions that append to the same
// day; bumped past the day's max when two adds land in the same millisecond.
fn next_todo_id(todos: &[DailyTodo]) -> TodoId {
    let max_existing = todos.iter().map(|todo| todo.id).max().unwrap_or(0);
    now_ms().max(max_existing + 1)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
