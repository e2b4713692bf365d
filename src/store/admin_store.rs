use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Course, CourseDraft, CoursePatch, StaffUser, StaffUserDraft, StaffUserPatch, Topic,
    TopicDraft, TopicPatch, Word, WordDraft, WordPatch,
};
use crate::record::{InMemoryRecordStore, RecordError, RecordsExt};

use super::ChangeRecord;

/// Event name carrying every change record, regardless of kind.
pub const STORE_CHANGED: &str = "store.changed";

/// How to take an entity out of its parent context.
///
/// The admin UI's delete dialog offers both paths whenever the target has
/// a parent: `DetachOnly` clears the one link and keeps the record,
/// `Purge` deletes the record everywhere. A record is never destroyed as
/// a side effect of a detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    DetachOnly,
    Purge,
}

/// Payload of `*.attached` / `*.detached` change records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkChange {
    pub child_id: String,
    pub parent_id: String,
}

/// The admin console's relational state container.
///
/// Owns the course/topic/word/user collections and keeps both sides of
/// each parent-child relationship consistent: the parent's ordered id
/// list and the child's back-reference. Mutations are synchronous; every
/// successful mutation appends to the change feed, which subscribers
/// receive as JSON-encoded [`ChangeRecord`]s.
///
/// Cloning is cheap and clones share everything — storage, id sequence,
/// and subscribers — so a handle can be passed to each view instead of
/// living in a global.
///
/// Operations on unknown ids are silent no-ops: ids are expected to come
/// from this store's own getters, so a dangling id is defensive slack,
/// not an error. The only errors returned are substrate faults.
#[derive(Clone)]
pub struct AdminStore {
    records: InMemoryRecordStore,
    id_seq: Arc<AtomicU64>,
    change_seq: Arc<AtomicU64>,
    emitter: Arc<Mutex<EventEmitter>>,
}

impl Default for AdminStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        AdminStore {
            records: InMemoryRecordStore::new(),
            id_seq: Arc::new(AtomicU64::new(0)),
            change_seq: Arc::new(AtomicU64::new(0)),
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.id_seq.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", prefix, n)
    }

    fn publish<T: Serialize>(&self, kind: &str, payload: &T) -> Result<(), RecordError> {
        let sequence = self.change_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let change = ChangeRecord::encode(kind, payload, sequence)?;
        let json =
            serde_json::to_string(&change).map_err(|e| RecordError::Serde(e.to_string()))?;

        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| RecordError::Storage("emitter lock poisoned".into()))?;
        emitter.emit(kind, json.clone());
        emitter.emit(STORE_CHANGED, json);
        Ok(())
    }

    // ---- subscriptions ----

    /// Register a listener for a single change kind (e.g. `"words.added"`).
    /// Returns the listener id for [`unsubscribe`](Self::unsubscribe).
    ///
    /// Listeners receive the JSON-encoded [`ChangeRecord`] and run on the
    /// emitter's delivery thread, after the mutation has been applied.
    pub fn subscribe<F>(&self, kind: &str, listener: F) -> Result<String, RecordError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| RecordError::Storage("emitter lock poisoned".into()))?;
        Ok(emitter.on(kind, listener))
    }

    /// Register a listener for every change, whatever the kind.
    pub fn subscribe_all<F>(&self, listener: F) -> Result<String, RecordError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.subscribe(STORE_CHANGED, listener)
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, listener_id: &str) -> Result<(), RecordError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| RecordError::Storage("emitter lock poisoned".into()))?;
        emitter.remove_listener(listener_id);
        Ok(())
    }

    // ---- courses ----

    /// Create a course. Returns the new id.
    pub fn add_course(&self, draft: CourseDraft) -> Result<String, RecordError> {
        let id = self.next_id("c");
        let course = Course::from_draft(id.clone(), draft);
        self.records.records::<Course>().save(&course)?;
        self.publish("courses.added", &course)?;
        Ok(id)
    }

    /// Shallow-merge `patch` into the course. No-op on unknown id.
    pub fn update_course(&self, id: &str, patch: CoursePatch) -> Result<(), RecordError> {
        let Some(mut course) = self.course(id)? else {
            return Ok(());
        };
        course.merge(patch);
        self.records.records::<Course>().save(&course)?;
        self.publish("courses.updated", &course)
    }

    /// Delete a course. Its topics are detached, not deleted: each member
    /// topic's `course_id` is cleared and the topic stays in the global
    /// collection. No-op on unknown id.
    pub fn delete_course(&self, id: &str) -> Result<(), RecordError> {
        let Some(course) = self.course(id)? else {
            return Ok(());
        };
        self.records.records::<Course>().delete(id)?;

        let members = self.records.records::<Topic>().find(&|t| t.course_id == id)?;
        for mut topic in members.into_iter().map(|v| v.data) {
            topic.course_id.clear();
            self.records.records::<Topic>().save(&topic)?;
        }

        self.publish("courses.deleted", &course)
    }

    pub fn course(&self, id: &str) -> Result<Option<Course>, RecordError> {
        Ok(self.records.records::<Course>().get(id)?.map(|v| v.data))
    }

    /// All courses, name-sorted.
    pub fn courses(&self) -> Result<Vec<Course>, RecordError> {
        let mut list: Vec<Course> = self
            .records
            .records::<Course>()
            .find(&|_| true)?
            .into_iter()
            .map(|v| v.data)
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    // ---- topics ----

    /// Create a topic. When the draft names a course and that course
    /// exists, the new topic is appended to its `topic_ids`; an unknown
    /// course id is accepted silently and the back-link stays dangling
    /// (it reads as unassigned through the getters).
    pub fn add_topic(&self, draft: TopicDraft) -> Result<String, RecordError> {
        let id = self.next_id("t");
        let topic = Topic::from_draft(id.clone(), draft);

        if let Some(parent) = topic.course() {
            if let Some(mut course) = self.course(parent)? {
                course.topic_ids.push(id.clone());
                self.records.records::<Course>().save(&course)?;
            }
        }

        self.records.records::<Topic>().save(&topic)?;
        self.publish("topics.added", &topic)?;
        Ok(id)
    }

    /// Shallow-merge `patch` into the topic. No-op on unknown id. Cannot
    /// reparent — `course_id` is not expressible in [`TopicPatch`].
    pub fn update_topic(&self, id: &str, patch: TopicPatch) -> Result<(), RecordError> {
        let Some(mut topic) = self.topic(id)? else {
            return Ok(());
        };
        topic.merge(patch);
        self.records.records::<Topic>().save(&topic)?;
        self.publish("topics.updated", &topic)
    }

    /// Delete a topic: removed from the global collection and from any
    /// course's `topic_ids`; its words are detached, not deleted. No-op
    /// on unknown id.
    pub fn delete_topic(&self, id: &str) -> Result<(), RecordError> {
        let Some(topic) = self.topic(id)? else {
            return Ok(());
        };
        self.records.records::<Topic>().delete(id)?;

        let referencing = self
            .records
            .records::<Course>()
            .find(&|c| c.topic_ids.iter().any(|t| t == id))?;
        for mut course in referencing.into_iter().map(|v| v.data) {
            course.topic_ids.retain(|t| t != id);
            self.records.records::<Course>().save(&course)?;
        }

        let members = self.records.records::<Word>().find(&|w| w.topic_id == id)?;
        for mut word in members.into_iter().map(|v| v.data) {
            word.topic_id.clear();
            self.records.records::<Word>().save(&word)?;
        }

        self.publish("topics.deleted", &topic)
    }

    /// Attach a topic to a course: append to `topic_ids` unless already
    /// present (idempotent) and point the topic's `course_id` at the
    /// course.
    ///
    /// Deliberately does NOT detach the topic from a previous course's
    /// list first — attaching a topic that is still listed elsewhere
    /// leaves the old list stale. Callers moving a topic must detach it
    /// from the old course themselves.
    pub fn add_topic_to_course(&self, topic_id: &str, course_id: &str) -> Result<(), RecordError> {
        let mut changed = false;

        if let Some(mut course) = self.course(course_id)? {
            if !course.topic_ids.iter().any(|t| t == topic_id) {
                course.topic_ids.push(topic_id.to_string());
                self.records.records::<Course>().save(&course)?;
                changed = true;
            }
        }
        if let Some(mut topic) = self.topic(topic_id)? {
            if topic.course_id != course_id {
                topic.course_id = course_id.to_string();
                self.records.records::<Topic>().save(&topic)?;
                changed = true;
            }
        }

        if changed {
            self.publish(
                "topics.attached",
                &LinkChange {
                    child_id: topic_id.to_string(),
                    parent_id: course_id.to_string(),
                },
            )?;
        }
        Ok(())
    }

    /// Detach a topic from a course without deleting it: the topic leaves
    /// the course's `topic_ids` and its `course_id` is cleared. No-op if
    /// the link does not currently exist.
    pub fn remove_topic_from_course(
        &self,
        topic_id: &str,
        course_id: &str,
    ) -> Result<(), RecordError> {
        let mut changed = false;

        if let Some(mut course) = self.course(course_id)? {
            let before = course.topic_ids.len();
            course.topic_ids.retain(|t| t != topic_id);
            if course.topic_ids.len() != before {
                self.records.records::<Course>().save(&course)?;
                changed = true;
            }
        }
        if let Some(mut topic) = self.topic(topic_id)? {
            if topic.course_id == course_id {
                topic.course_id.clear();
                self.records.records::<Topic>().save(&topic)?;
                changed = true;
            }
        }

        if changed {
            self.publish(
                "topics.detached",
                &LinkChange {
                    child_id: topic_id.to_string(),
                    parent_id: course_id.to_string(),
                },
            )?;
        }
        Ok(())
    }

    /// Apply the outcome of the delete-confirmation dialog for a topic.
    pub fn resolve_topic_removal(
        &self,
        topic_id: &str,
        course_id: &str,
        removal: Removal,
    ) -> Result<(), RecordError> {
        match removal {
            Removal::DetachOnly => self.remove_topic_from_course(topic_id, course_id),
            Removal::Purge => self.delete_topic(topic_id),
        }
    }

    pub fn topic(&self, id: &str) -> Result<Option<Topic>, RecordError> {
        Ok(self.records.records::<Topic>().get(id)?.map(|v| v.data))
    }

    /// All topics, name-sorted.
    pub fn topics(&self) -> Result<Vec<Topic>, RecordError> {
        let mut list: Vec<Topic> = self
            .records
            .records::<Topic>()
            .find(&|_| true)?
            .into_iter()
            .map(|v| v.data)
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    /// The course's topics in the course's `topic_ids` order. Empty when
    /// the course is unknown; listed ids that no longer resolve are
    /// skipped.
    pub fn topics_by_course(&self, course_id: &str) -> Result<Vec<Topic>, RecordError> {
        let Some(course) = self.course(course_id)? else {
            return Ok(Vec::new());
        };
        let mut topics = Vec::with_capacity(course.topic_ids.len());
        for topic_id in &course.topic_ids {
            if let Some(topic) = self.topic(topic_id)? {
                topics.push(topic);
            }
        }
        Ok(topics)
    }

    // ---- words ----

    /// Create a word, registering it into the named topic's `word_ids`
    /// when the topic exists. An unknown topic id is accepted silently.
    pub fn add_word(&self, draft: WordDraft) -> Result<String, RecordError> {
        let id = self.next_id("w");
        let word = Word::from_draft(id.clone(), draft);

        if let Some(parent) = word.topic() {
            if let Some(mut topic) = self.topic(parent)? {
                topic.word_ids.push(id.clone());
                self.records.records::<Topic>().save(&topic)?;
            }
        }

        self.records.records::<Word>().save(&word)?;
        self.publish("words.added", &word)?;
        Ok(id)
    }

    /// Shallow-merge `patch` into the word. No-op on unknown id.
    pub fn update_word(&self, id: &str, patch: WordPatch) -> Result<(), RecordError> {
        let Some(mut word) = self.word(id)? else {
            return Ok(());
        };
        word.merge(patch);
        self.records.records::<Word>().save(&word)?;
        self.publish("words.updated", &word)
    }

    /// Delete a word: removed from the global collection and scrubbed
    /// from any topic's `word_ids`. No-op on unknown id.
    pub fn delete_word(&self, id: &str) -> Result<(), RecordError> {
        let Some(word) = self.word(id)? else {
            return Ok(());
        };
        self.records.records::<Word>().delete(id)?;

        let referencing = self
            .records
            .records::<Topic>()
            .find(&|t| t.word_ids.iter().any(|w| w == id))?;
        for mut topic in referencing.into_iter().map(|v| v.data) {
            topic.word_ids.retain(|w| w != id);
            self.records.records::<Topic>().save(&topic)?;
        }

        self.publish("words.deleted", &word)
    }

    /// Attach a word to a topic. Idempotent on the topic's `word_ids`;
    /// the word's `topic_id` is set unconditionally. Same caveat as
    /// [`add_topic_to_course`](Self::add_topic_to_course): no auto-detach
    /// from a previous topic.
    pub fn add_word_to_topic(&self, word_id: &str, topic_id: &str) -> Result<(), RecordError> {
        let mut changed = false;

        if let Some(mut topic) = self.topic(topic_id)? {
            if !topic.word_ids.iter().any(|w| w == word_id) {
                topic.word_ids.push(word_id.to_string());
                self.records.records::<Topic>().save(&topic)?;
                changed = true;
            }
        }
        if let Some(mut word) = self.word(word_id)? {
            if word.topic_id != topic_id {
                word.topic_id = topic_id.to_string();
                self.records.records::<Word>().save(&word)?;
                changed = true;
            }
        }

        if changed {
            self.publish(
                "words.attached",
                &LinkChange {
                    child_id: word_id.to_string(),
                    parent_id: topic_id.to_string(),
                },
            )?;
        }
        Ok(())
    }

    /// Detach a word from a topic without deleting it. No-op if the link
    /// does not currently exist.
    pub fn remove_word_from_topic(&self, word_id: &str, topic_id: &str) -> Result<(), RecordError> {
        let mut changed = false;

        if let Some(mut topic) = self.topic(topic_id)? {
            let before = topic.word_ids.len();
            topic.word_ids.retain(|w| w != word_id);
            if topic.word_ids.len() != before {
                self.records.records::<Topic>().save(&topic)?;
                changed = true;
            }
        }
        if let Some(mut word) = self.word(word_id)? {
            if word.topic_id == topic_id {
                word.topic_id.clear();
                self.records.records::<Word>().save(&word)?;
                changed = true;
            }
        }

        if changed {
            self.publish(
                "words.detached",
                &LinkChange {
                    child_id: word_id.to_string(),
                    parent_id: topic_id.to_string(),
                },
            )?;
        }
        Ok(())
    }

    /// Apply the outcome of the delete-confirmation dialog for a word.
    pub fn resolve_word_removal(
        &self,
        word_id: &str,
        topic_id: &str,
        removal: Removal,
    ) -> Result<(), RecordError> {
        match removal {
            Removal::DetachOnly => self.remove_word_from_topic(word_id, topic_id),
            Removal::Purge => self.delete_word(word_id),
        }
    }

    pub fn word(&self, id: &str) -> Result<Option<Word>, RecordError> {
        Ok(self.records.records::<Word>().get(id)?.map(|v| v.data))
    }

    /// All words, sorted by headword.
    pub fn words(&self) -> Result<Vec<Word>, RecordError> {
        let mut list: Vec<Word> = self
            .records
            .records::<Word>()
            .find(&|_| true)?
            .into_iter()
            .map(|v| v.data)
            .collect();
        list.sort_by(|a, b| a.word.cmp(&b.word).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    /// The topic's words in the topic's `word_ids` order. Empty when the
    /// topic is unknown.
    pub fn words_by_topic(&self, topic_id: &str) -> Result<Vec<Word>, RecordError> {
        let Some(topic) = self.topic(topic_id)? else {
            return Ok(Vec::new());
        };
        let mut words = Vec::with_capacity(topic.word_ids.len());
        for word_id in &topic.word_ids {
            if let Some(word) = self.word(word_id)? {
                words.push(word);
            }
        }
        Ok(words)
    }

    // ---- staff users ----

    /// Create a staff user record. Returns the new id.
    pub fn add_user(&self, draft: StaffUserDraft) -> Result<String, RecordError> {
        let id = self.next_id("u");
        let user = StaffUser::from_draft(id.clone(), draft);
        self.records.records::<StaffUser>().save(&user)?;
        self.publish("users.added", &user)?;
        Ok(id)
    }

    /// Shallow-merge `patch` into the user. No-op on unknown id.
    pub fn update_user(&self, id: &str, patch: StaffUserPatch) -> Result<(), RecordError> {
        let Some(mut user) = self.user(id)? else {
            return Ok(());
        };
        user.merge(patch);
        self.records.records::<StaffUser>().save(&user)?;
        self.publish("users.updated", &user)
    }

    /// Delete a staff user record. No-op on unknown id.
    pub fn delete_user(&self, id: &str) -> Result<(), RecordError> {
        let Some(user) = self.user(id)? else {
            return Ok(());
        };
        self.records.records::<StaffUser>().delete(id)?;
        self.publish("users.deleted", &user)
    }

    pub fn user(&self, id: &str) -> Result<Option<StaffUser>, RecordError> {
        Ok(self.records.records::<StaffUser>().get(id)?.map(|v| v.data))
    }

    /// All staff users, name-sorted.
    pub fn users(&self) -> Result<Vec<StaffUser>, RecordError> {
        let mut list: Vec<StaffUser> = self
            .records
            .records::<StaffUser>()
            .find(&|_| true)?
            .into_iter()
            .map(|v| v.data)
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }
}
