//! Shared builders and invariant checks for the admin store suite.

use lexideck::{AdminStore, CourseDraft, CourseStatus, TopicDraft, WordDraft, WordLevel};

pub fn course(name: &str) -> CourseDraft {
    CourseDraft {
        name: name.into(),
        description: format!("{} course", name),
        level: "Beginner".into(),
        price: 199_000,
        thumbnail: None,
        status: CourseStatus::Published,
    }
}

pub fn topic(name: &str, course_id: Option<&str>) -> TopicDraft {
    TopicDraft {
        course_id: course_id.map(|s| s.to_string()),
        name: name.into(),
        description: format!("{} topic", name),
        thumbnail: None,
    }
}

pub fn word(headword: &str, topic_id: Option<&str>) -> WordDraft {
    WordDraft {
        topic_id: topic_id.map(|s| s.to_string()),
        word: headword.into(),
        phonetic: format!("/{}/", headword),
        translation: format!("{} (translated)", headword),
        part_of_speech: "noun".into(),
        example: format!("Example with {}.", headword),
        example_translation: String::new(),
        level: WordLevel::Beginner,
        image: None,
        audio_url: None,
    }
}

/// Both directions of each parent-child relationship must agree: every
/// listed child exists and points back, every assigned child is listed
/// exactly once.
pub fn assert_links_consistent(store: &AdminStore) {
    let courses = store.courses().unwrap();
    let topics = store.topics().unwrap();
    let words = store.words().unwrap();

    for course in &courses {
        for topic_id in &course.topic_ids {
            let listed = course.topic_ids.iter().filter(|t| *t == topic_id).count();
            assert_eq!(listed, 1, "topic {} listed {} times", topic_id, listed);

            let topic = store
                .topic(topic_id)
                .unwrap()
                .unwrap_or_else(|| panic!("dangling topic id {} in {}", topic_id, course.id));
            assert_eq!(topic.course_id, course.id);
        }
    }
    for topic in &topics {
        if let Some(course_id) = topic.course() {
            let course = store
                .course(course_id)
                .unwrap()
                .unwrap_or_else(|| panic!("dangling course id {} on {}", course_id, topic.id));
            let listed = course.topic_ids.iter().filter(|t| *t == &topic.id).count();
            assert_eq!(listed, 1, "topic {} listed {} times", topic.id, listed);
        }

        for word_id in &topic.word_ids {
            let listed = topic.word_ids.iter().filter(|w| *w == word_id).count();
            assert_eq!(listed, 1, "word {} listed {} times", word_id, listed);

            let word = store
                .word(word_id)
                .unwrap()
                .unwrap_or_else(|| panic!("dangling word id {} in {}", word_id, topic.id));
            assert_eq!(word.topic_id, topic.id);
        }
    }
    for word in &words {
        if let Some(topic_id) = word.topic() {
            let topic = store
                .topic(topic_id)
                .unwrap()
                .unwrap_or_else(|| panic!("dangling topic id {} on {}", topic_id, word.id));
            let listed = topic.word_ids.iter().filter(|w| *w == &word.id).count();
            assert_eq!(listed, 1, "word {} listed {} times", word.id, listed);
        }
    }
}
