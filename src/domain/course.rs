use serde::{Deserialize, Serialize};

use lexideck_macros::Record;

/// Publication state of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    Published,
    Draft,
}

/// A course: the top-level unit learners buy and study.
///
/// `topic_ids` is insertion-ordered and the order is significant — it is
/// the display order of the course's topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "courses")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub description: String,
    pub level: String,
    /// Price in minor currency units.
    pub price: u32,
    pub thumbnail: Option<String>,
    pub status: CourseStatus,
    pub topic_ids: Vec<String>,
}

/// Creation fields for a course. The id and the topic list are owned by
/// the store.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub name: String,
    pub description: String,
    pub level: String,
    pub price: u32,
    pub thumbnail: Option<String>,
    pub status: CourseStatus,
}

/// Shallow-merge update for a course. `Some` fields are applied, `None`
/// fields are left untouched. Cannot touch `topic_ids`.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub price: Option<u32>,
    pub thumbnail: Option<String>,
    pub status: Option<CourseStatus>,
}

impl Course {
    pub(crate) fn from_draft(id: String, draft: CourseDraft) -> Self {
        Course {
            id,
            name: draft.name,
            description: draft.description,
            level: draft.level,
            price: draft.price,
            thumbnail: draft.thumbnail,
            status: draft.status,
            topic_ids: Vec::new(),
        }
    }

    pub(crate) fn merge(&mut self, patch: CoursePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = Some(thumbnail);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }
}
