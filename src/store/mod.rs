//! Admin store — the relational in-memory state container.
//!
//! Holds the course/topic/word/user collections with explicit
//! parent-child id lists (`Course::topic_ids`, `Topic::word_ids`) and
//! keeps both sides of each relationship consistent: deleting a parent
//! detaches its children (clears their back-references) rather than
//! deleting them, and detach operations never destroy records.
//!
//! ## Example
//!
//! ```ignore
//! use lexideck::{AdminStore, CourseDraft, CourseStatus, Removal};
//!
//! let store = AdminStore::new();
//! store.subscribe_all(|change| println!("changed: {}", change))?;
//!
//! let course = store.add_course(CourseDraft { /* ... */ })?;
//! let topic = store.add_topic(TopicDraft { course_id: Some(course.clone()), /* ... */ })?;
//!
//! // "remove from this course" vs "delete entirely"
//! store.resolve_topic_removal(&topic, &course, Removal::DetachOnly)?;
//! ```

mod admin_store;
mod change;

pub use admin_store::{AdminStore, LinkChange, Removal, STORE_CHANGED};
pub use change::ChangeRecord;
