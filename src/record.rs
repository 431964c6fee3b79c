//! Progress record document and its JSON codec.

use chrono::NaiveDate;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::types::{DsaStatus, LectureId, QuestionId, TodoId};

/// One entry in a day's task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTodo {
    /// Identifier unique within the day's list.
    pub id: TodoId,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
}

/// Full progress document for one identity.
///
/// Serialized field names are the stored JSON document shape. Every field is
/// defaulted on decode, so documents written before a field existed back-fill
/// to empty collections instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    /// User-chosen program start date.
    pub start_date: Option<NaiveDate>,
    /// Lectures marked done.
    pub completed_lectures: HashSet<LectureId>,
    /// Per-question status; absent key reads as unsolved.
    pub dsa_progress: HashMap<QuestionId, DsaStatus>,
    /// Days with any recorded activity. Append-only.
    pub activity_dates: HashSet<NaiveDate>,
    /// Net lectures toggled on per day. Never negative.
    pub daily_lectures: HashMap<NaiveDate, u32>,
    /// Net questions moved into solved per day. Never negative.
    pub daily_questions: HashMap<NaiveDate, u32>,
    /// One free-text note per day, last write wins.
    pub daily_notes: HashMap<NaiveDate, String>,
    /// Per-day ordered task lists.
    pub daily_todos: HashMap<NaiveDate, Vec<DailyTodo>>,
}

impl ProgressRecord {
    /// True when the record carries progress worth migrating to a fresh
    /// account: any completed lecture or any question whose status differs
    /// from the unsolved default.
    pub fn has_progress(&self) -> bool {
        !self.completed_lectures.is_empty()
            || self
                .dsa_progress
                .values()
                .any(|status| *status != DsaStatus::Unsolved)
    }
}

/// Decodes a stored JSON document, back-filling absent fields with defaults.
pub fn decode_record(payload: &str) -> Result<ProgressRecord, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Encodes a record into its stored JSON document form.
pub fn encode_record(record: &ProgressRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}
