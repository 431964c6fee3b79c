//! Static lecture and question catalogs.
//!
//! Read-only reference data: the store never mutates catalogs, it only counts
//! progress against them.

use serde::{Deserialize, Serialize};

use crate::{
    record::ProgressRecord,
    types::{DsaStatus, LectureId, QuestionId},
};

/// One lecture in the ordered syllabus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureInfo {
    /// Catalog-stable identifier.
    pub id: LectureId,
    /// Lecture title.
    pub title: String,
    /// Free-form grouping label ("Intro", "Graphs", ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Ordered lecture syllabus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureCatalog {
    /// Lectures in syllabus order.
    pub lectures: Vec<LectureInfo>,
}

impl LectureCatalog {
    /// Total number of lectures.
    pub fn total(&self) -> usize {
        self.lectures.len()
    }

    /// Number of catalog lectures marked done in `record`.
    pub fn completed_count(&self, record: &ProgressRecord) -> usize {
        self.lectures
            .iter()
            .filter(|lecture| record.completed_lectures.contains(&lecture.id))
            .count()
    }
}

/// One practice question with optional external links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionInfo {
    /// Catalog-stable identifier.
    pub id: QuestionId,
    /// Question heading.
    pub heading: String,
    /// Optional practice link.
    #[serde(default)]
    pub practice_link: Option<String>,
    /// Optional LeetCode link.
    #[serde(default)]
    pub leetcode_link: Option<String>,
    /// Optional video walkthrough link.
    #[serde(default)]
    pub video_link: Option<String>,
}

/// Named group of questions within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCategory {
    /// Category display name.
    pub name: String,
    /// Questions in catalog order.
    pub questions: Vec<QuestionInfo>,
}

/// Top-level topic grouping categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTopic {
    /// Topic display name.
    pub name: String,
    /// Categories in catalog order.
    pub categories: Vec<QuestionCategory>,
}

/// Nested question catalog: topics, categories, questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCatalog {
    /// Topics in catalog order.
    pub topics: Vec<QuestionTopic>,
}

impl QuestionCatalog {
    /// Iterates every question in catalog order.
    pub fn questions(&self) -> impl Iterator<Item = &QuestionInfo> {
        self.topics
            .iter()
            .flat_map(|topic| topic.categories.iter())
            .flat_map(|category| category.questions.iter())
    }

    /// Total number of questions.
    pub fn total(&self) -> usize {
        self.questions().count()
    }

    /// Number of catalog questions marked solved in `record`.
    pub fn solved_count(&self, record: &ProgressRecord) -> usize {
        self.questions()
            .filter(|question| {
                record.dsa_progress.get(&question.id).copied() == Some(DsaStatus::Solved)
            })
            .count()
    }
}
