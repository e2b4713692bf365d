//! Integration tests for the record substrate (Record + RecordStore).

mod views;

use lexideck::{InMemoryRecordStore, Record, RecordError, RecordsExt};
use views::{CourseSummary, StudyStreak};

#[test]
fn derive_honors_collection_and_id_attributes() {
    assert_eq!(CourseSummary::COLLECTION, "course_summaries");
    let summary = CourseSummary::new("c-9", "Basics", 4);
    assert_eq!(summary.id(), "c-9");
}

#[test]
fn derive_defaults_to_snake_case_plural_and_id_field() {
    assert_eq!(StudyStreak::COLLECTION, "study_streaks");
    let streak = StudyStreak {
        id: "u-1".into(),
        days: 12,
    };
    assert_eq!(streak.id(), "u-1");
}

#[test]
fn save_load_update_delete_round_trip() {
    let store = InMemoryRecordStore::new();
    let records = store.records::<CourseSummary>();

    let saved = records.save(&CourseSummary::new("c-1", "Basics", 0)).unwrap();
    assert_eq!(saved.version, 1);

    let mut loaded = records.get("c-1").unwrap().unwrap();
    assert_eq!(loaded.data.name, "Basics");

    loaded.data.topic_count = 3;
    let updated = records.update(&loaded.data, loaded.version).unwrap();
    assert_eq!(updated.version, 2);

    assert!(records.delete("c-1").unwrap());
    assert!(records.get("c-1").unwrap().is_none());
}

#[test]
fn insert_refuses_duplicates() {
    let store = InMemoryRecordStore::new();
    let records = store.records::<CourseSummary>();

    records.insert(&CourseSummary::new("c-1", "Basics", 0)).unwrap();
    let err = records
        .insert(&CourseSummary::new("c-1", "Basics again", 0))
        .unwrap_err();
    assert!(matches!(err, RecordError::ConcurrencyConflict { .. }));
}

#[test]
fn stale_update_is_a_conflict() {
    let store = InMemoryRecordStore::new();
    let records = store.records::<CourseSummary>();

    records.save(&CourseSummary::new("c-1", "Basics", 0)).unwrap();
    records.save(&CourseSummary::new("c-1", "Basics", 1)).unwrap();

    let err = records
        .update(&CourseSummary::new("c-1", "Basics", 2), 1)
        .unwrap_err();
    match err {
        RecordError::ConcurrencyConflict {
            expected, actual, ..
        } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn collections_do_not_collide() {
    let store = InMemoryRecordStore::new();

    store
        .records::<CourseSummary>()
        .save(&CourseSummary::new("shared-id", "Basics", 0))
        .unwrap();
    store
        .records::<StudyStreak>()
        .save(&StudyStreak {
            id: "shared-id".into(),
            days: 2,
        })
        .unwrap();

    // Same id, different collections: both present, independently typed.
    assert!(store
        .records::<CourseSummary>()
        .get("shared-id")
        .unwrap()
        .is_some());
    assert!(store
        .records::<StudyStreak>()
        .get("shared-id")
        .unwrap()
        .is_some());

    assert!(store.records::<StudyStreak>().delete("shared-id").unwrap());
    assert!(store
        .records::<CourseSummary>()
        .get("shared-id")
        .unwrap()
        .is_some());
}

#[test]
fn find_filters_within_the_collection() {
    let store = InMemoryRecordStore::new();
    let records = store.records::<CourseSummary>();

    records.save(&CourseSummary::new("c-1", "Basics", 5)).unwrap();
    records.save(&CourseSummary::new("c-2", "Travel", 1)).unwrap();
    records.save(&CourseSummary::new("c-3", "Business", 8)).unwrap();

    let busy = records.find(&|s| s.topic_count >= 5).unwrap();
    assert_eq!(busy.len(), 2);
}
