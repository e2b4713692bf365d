//! Integration tests for the admin store's relational consistency rules.

mod support;

use std::sync::{mpsc, Mutex};
use std::time::Duration;

use lexideck::{AdminStore, ChangeRecord, Removal, TopicPatch};
use support::{assert_links_consistent, course, topic, word};

#[test]
fn links_stay_consistent_through_crud() {
    let store = AdminStore::new();

    let basics = store.add_course(course("Basics")).unwrap();
    let travel = store.add_course(course("Travel")).unwrap();
    let greetings = store.add_topic(topic("Greetings", Some(&basics))).unwrap();
    let airport = store.add_topic(topic("At the airport", Some(&travel))).unwrap();
    let hello = store.add_word(word("hello", Some(&greetings))).unwrap();
    store.add_word(word("goodbye", Some(&greetings))).unwrap();
    store.add_word(word("gate", Some(&airport))).unwrap();
    assert_links_consistent(&store);

    store
        .update_topic(
            &greetings,
            TopicPatch {
                description: Some("Openers and closers".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_links_consistent(&store);

    store.remove_word_from_topic(&hello, &greetings).unwrap();
    assert_links_consistent(&store);

    store.add_word_to_topic(&hello, &airport).unwrap();
    assert_links_consistent(&store);

    store.delete_topic(&airport).unwrap();
    store.delete_course(&travel).unwrap();
    assert_links_consistent(&store);
}

#[test]
fn delete_course_detaches_its_topics() {
    let store = AdminStore::new();
    let basics = store.add_course(course("Basics")).unwrap();
    let t1 = store.add_topic(topic("Greetings", Some(&basics))).unwrap();
    let t2 = store.add_topic(topic("Numbers", Some(&basics))).unwrap();

    store.delete_course(&basics).unwrap();

    assert!(store.topics_by_course(&basics).unwrap().is_empty());
    for id in [&t1, &t2] {
        let topic = store.topic(id).unwrap().expect("topic must survive");
        assert_eq!(topic.course_id, "");
    }
}

#[test]
fn detach_keeps_the_topic_record() {
    let store = AdminStore::new();
    let basics = store.add_course(course("Basics")).unwrap();
    let greetings = store.add_topic(topic("Greetings", Some(&basics))).unwrap();

    store.remove_topic_from_course(&greetings, &basics).unwrap();

    let detached = store.topic(&greetings).unwrap().expect("still present");
    assert_eq!(detached.course_id, "");
    assert!(!store
        .course(&basics)
        .unwrap()
        .unwrap()
        .topic_ids
        .contains(&greetings));
}

#[test]
fn new_topic_lands_at_the_end_of_the_course() {
    let store = AdminStore::new();
    let basics = store.add_course(course("Basics")).unwrap();
    store.add_topic(topic("Greetings", Some(&basics))).unwrap();
    store.add_topic(topic("Numbers", Some(&basics))).unwrap();
    let food = store.add_topic(topic("Food", Some(&basics))).unwrap();

    let listed = store.topics_by_course(&basics).unwrap();
    let occurrences = listed.iter().filter(|t| t.id == food).count();
    assert_eq!(occurrences, 1);
    assert_eq!(listed.last().unwrap().id, food);
    assert_eq!(listed.len(), 3);
}

#[test]
fn attaching_a_word_twice_lists_it_once() {
    let store = AdminStore::new();
    let greetings = store.add_topic(topic("Greetings", None)).unwrap();
    let hello = store.add_word(word("hello", None)).unwrap();

    store.add_word_to_topic(&hello, &greetings).unwrap();
    store.add_word_to_topic(&hello, &greetings).unwrap();

    let listed = store.topic(&greetings).unwrap().unwrap().word_ids;
    assert_eq!(listed.iter().filter(|w| *w == &hello).count(), 1);
}

#[test]
fn deleting_a_topic_detaches_its_words() {
    let store = AdminStore::new();
    let basics = store.add_course(course("Basics")).unwrap();
    let greetings = store.add_topic(topic("Greetings", Some(&basics))).unwrap();
    let hello = store.add_word(word("hello", Some(&greetings))).unwrap();

    let listed = store.words_by_topic(&greetings).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].word, "hello");

    // "Delete entirely" on the topic: the topic goes, its words survive
    // unassigned.
    store
        .resolve_topic_removal(&greetings, &basics, Removal::Purge)
        .unwrap();

    assert!(store.topic(&greetings).unwrap().is_none());
    let survivor = store.word(&hello).unwrap().expect("word must survive");
    assert_eq!(survivor.topic_id, "");
    for t in store.topics().unwrap() {
        assert!(!t.word_ids.contains(&hello));
    }
}

#[test]
fn deleting_a_word_scrubs_its_topic() {
    let store = AdminStore::new();
    let greetings = store.add_topic(topic("Greetings", None)).unwrap();
    let hello = store.add_word(word("hello", Some(&greetings))).unwrap();

    store.delete_word(&hello).unwrap();

    assert!(store.word(&hello).unwrap().is_none());
    assert!(store
        .topic(&greetings)
        .unwrap()
        .unwrap()
        .word_ids
        .is_empty());
}

#[test]
fn word_detach_only_removal_keeps_the_word() {
    let store = AdminStore::new();
    let greetings = store.add_topic(topic("Greetings", None)).unwrap();
    let hello = store.add_word(word("hello", Some(&greetings))).unwrap();

    store
        .resolve_word_removal(&hello, &greetings, Removal::DetachOnly)
        .unwrap();

    let survivor = store.word(&hello).unwrap().expect("word must survive");
    assert_eq!(survivor.topic_id, "");
    assert!(store.words_by_topic(&greetings).unwrap().is_empty());
}

#[test]
fn change_feed_orders_every_mutation() {
    let store = AdminStore::new();
    let (tx, rx) = mpsc::channel::<String>();
    let tx = Mutex::new(tx);
    store
        .subscribe_all(move |json| {
            let _ = tx.lock().unwrap().send(json);
        })
        .unwrap();

    let basics = store.add_course(course("Basics")).unwrap();
    let greetings = store.add_topic(topic("Greetings", Some(&basics))).unwrap();
    store.remove_topic_from_course(&greetings, &basics).unwrap();

    // Delivery threads may interleave; the sequence numbers carry the
    // mutation order.
    let mut changes: Vec<ChangeRecord> = (0..3)
        .map(|_| {
            let json = rx.recv_timeout(Duration::from_secs(2)).unwrap();
            serde_json::from_str(&json).unwrap()
        })
        .collect();
    changes.sort_by_key(|c| c.sequence);

    let kinds: Vec<&str> = changes.iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(kinds, vec!["courses.added", "topics.added", "topics.detached"]);
    assert_eq!(
        changes.iter().map(|c| c.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}
