use serde::{Deserialize, Serialize};

use lexideck_macros::Record;

use super::UNASSIGNED;

/// A vocabulary topic inside a course.
///
/// `course_id` is the back-reference to the owning course; the empty
/// string means the topic is currently unassigned. `word_ids` is
/// insertion-ordered and the order is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "topics")]
pub struct Topic {
    pub id: String,
    pub course_id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub word_ids: Vec<String>,
}

/// Creation fields for a topic. An absent `course_id` creates the topic
/// unassigned.
#[derive(Debug, Clone)]
pub struct TopicDraft {
    pub course_id: Option<String>,
    pub name: String,
    pub description: String,
    pub thumbnail: Option<String>,
}

/// Shallow-merge update for a topic. Cannot touch `course_id` or
/// `word_ids` — reparenting goes through attach/detach.
#[derive(Debug, Clone, Default)]
pub struct TopicPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl Topic {
    pub(crate) fn from_draft(id: String, draft: TopicDraft) -> Self {
        Topic {
            id,
            course_id: draft.course_id.unwrap_or_default(),
            name: draft.name,
            description: draft.description,
            thumbnail: draft.thumbnail,
            word_ids: Vec::new(),
        }
    }

    pub(crate) fn merge(&mut self, patch: TopicPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = Some(thumbnail);
        }
    }

    /// The owning course id, or None while unassigned.
    pub fn course(&self) -> Option<&str> {
        if self.course_id == UNASSIGNED {
            None
        } else {
            Some(&self.course_id)
        }
    }
}
