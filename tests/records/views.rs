//! Derived record types used by the record store suite.

use lexideck::Record;
use serde::{Deserialize, Serialize};

/// Denormalized course listing row, keyed by the course id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "course_summaries")]
pub struct CourseSummary {
    #[record(id)]
    pub course_id: String,
    pub name: String,
    pub topic_count: u32,
}

/// Uses the derive defaults: collection "study_streaks", id field `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct StudyStreak {
    pub id: String,
    pub days: u32,
}

impl CourseSummary {
    pub fn new(course_id: impl Into<String>, name: impl Into<String>, topic_count: u32) -> Self {
        CourseSummary {
            course_id: course_id.into(),
            name: name.into(),
            topic_count,
        }
    }
}
