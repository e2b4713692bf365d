use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use lexideck_macros::Record;

use super::UNASSIGNED;

/// Difficulty level of a word, serialized as the numbers 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WordLevel {
    Beginner,
    Elementary,
    Intermediate,
    Advanced,
}

impl WordLevel {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WordLevel::Beginner),
            2 => Some(WordLevel::Elementary),
            3 => Some(WordLevel::Intermediate),
            4 => Some(WordLevel::Advanced),
            _ => None,
        }
    }

    pub fn as_number(self) -> u8 {
        match self {
            WordLevel::Beginner => 1,
            WordLevel::Elementary => 2,
            WordLevel::Intermediate => 3,
            WordLevel::Advanced => 4,
        }
    }
}

impl Default for WordLevel {
    fn default() -> Self {
        WordLevel::Beginner
    }
}

impl fmt::Display for WordLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

impl Serialize for WordLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_number())
    }
}

impl<'de> Deserialize<'de> for WordLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        WordLevel::from_number(n)
            .ok_or_else(|| de::Error::custom(format!("invalid word level: {}", n)))
    }
}

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "words")]
pub struct Word {
    pub id: String,
    pub topic_id: String,
    pub word: String,
    pub phonetic: String,
    pub translation: String,
    pub part_of_speech: String,
    pub example: String,
    pub example_translation: String,
    pub level: WordLevel,
    pub image: Option<String>,
    pub audio_url: Option<String>,
}

/// Creation fields for a word. An absent `topic_id` creates the word
/// unassigned.
#[derive(Debug, Clone)]
pub struct WordDraft {
    pub topic_id: Option<String>,
    pub word: String,
    pub phonetic: String,
    pub translation: String,
    pub part_of_speech: String,
    pub example: String,
    pub example_translation: String,
    pub level: WordLevel,
    pub image: Option<String>,
    pub audio_url: Option<String>,
}

/// Shallow-merge update for a word. Cannot touch `topic_id`.
#[derive(Debug, Clone, Default)]
pub struct WordPatch {
    pub word: Option<String>,
    pub phonetic: Option<String>,
    pub translation: Option<String>,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
    pub example_translation: Option<String>,
    pub level: Option<WordLevel>,
    pub image: Option<String>,
    pub audio_url: Option<String>,
}

impl Word {
    pub(crate) fn from_draft(id: String, draft: WordDraft) -> Self {
        Word {
            id,
            topic_id: draft.topic_id.unwrap_or_default(),
            word: draft.word,
            phonetic: draft.phonetic,
            translation: draft.translation,
            part_of_speech: draft.part_of_speech,
            example: draft.example,
            example_translation: draft.example_translation,
            level: draft.level,
            image: draft.image,
            audio_url: draft.audio_url,
        }
    }

    pub(crate) fn merge(&mut self, patch: WordPatch) {
        if let Some(word) = patch.word {
            self.word = word;
        }
        if let Some(phonetic) = patch.phonetic {
            self.phonetic = phonetic;
        }
        if let Some(translation) = patch.translation {
            self.translation = translation;
        }
        if let Some(part_of_speech) = patch.part_of_speech {
            self.part_of_speech = part_of_speech;
        }
        if let Some(example) = patch.example {
            self.example = example;
        }
        if let Some(example_translation) = patch.example_translation {
            self.example_translation = example_translation;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(audio_url) = patch.audio_url {
            self.audio_url = Some(audio_url);
        }
    }

    /// The owning topic id, or None while unassigned.
    pub fn topic(&self) -> Option<&str> {
        if self.topic_id == UNASSIGNED {
            None
        } else {
            Some(&self.topic_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_numbers_round_trip() {
        for n in 1..=4u8 {
            let level = WordLevel::from_number(n).unwrap();
            assert_eq!(level.as_number(), n);
        }
        assert!(WordLevel::from_number(0).is_none());
        assert!(WordLevel::from_number(5).is_none());
    }

    #[test]
    fn level_serializes_as_number() {
        let json = serde_json::to_string(&WordLevel::Intermediate).unwrap();
        assert_eq!(json, "3");

        let level: WordLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level, WordLevel::Advanced);
    }

    #[test]
    fn level_rejects_out_of_range() {
        assert!(serde_json::from_str::<WordLevel>("7").is_err());
    }
}
