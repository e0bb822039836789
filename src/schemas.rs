//! Wire records exchanged with the learning backend.
//!
//! Optional request fields are left out of the JSON body when unset. Optional
//! response fields accept either a missing key or `null`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// GET /dashboard/status

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatusSummary {
    pub level: String,
    pub known_vocab: i64,
    pub weak_focus: String,
}

// GET /lessons/next

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVocabularyItem {
    pub korean: String,
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonContent {
    pub lesson_id: i64,
    pub grammar_pattern: String,
    pub explanation_text: String,
    pub example_sentences: Vec<String>,
    pub new_vocabulary: Vec<NewVocabularyItem>,
}

// POST /exercises/generate

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_concept_id: Option<String>,
}

impl ExerciseRequest {
    /// No filters: the backend picks the exercise.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    pub fn with_target_concept(mut self, concept_id: impl Into<String>) -> Self {
        self.target_concept_id = Some(concept_id.into());
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.kind.is_none() && self.sub_type.is_none() && self.target_concept_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDetails {
    pub exercise_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub sub_type: String,
    pub question_text: String,
    pub expected_format: String,
}

// POST /exercises/submit

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub exercise_id: i64,
    pub user_response: String,
}

impl Submission {
    pub fn new(exercise_id: i64, user_response: impl Into<String>) -> Self {
        Self {
            exercise_id,
            user_response: user_response.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryUpdate {
    pub concept: String,
    pub new_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags_added: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub grade: f64,
    pub feedback_text: String,
    pub mastery_updates: Vec<MasteryUpdate>,
}

impl EvaluationResult {
    /// Every weakness flag raised by this submission, in update order.
    pub fn flags_added(&self) -> impl Iterator<Item = &str> {
        self.mastery_updates
            .iter()
            .filter_map(|u| u.flags_added.as_deref())
            .flatten()
            .map(String::as_str)
    }
}

// GET /review/history

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseListItem {
    pub exercise_id: i64,
    pub grade: f64,
    #[serde(rename = "type")]
    pub kind: String,
    /// ISO-8601, kept as sent.
    pub date: String,
}

impl ExerciseListItem {
    /// Parses `date`. Timestamps without an offset are taken as UTC, and a
    /// bare date is midnight UTC.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

// GET /mastery/grammar, GET /mastery/vocab

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarMasteryItem {
    pub pattern: String,
    pub mastery_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weakness_flags: Option<Vec<String>>,
}

impl GrammarMasteryItem {
    pub fn has_weakness(&self) -> bool {
        self.weakness_flags.as_ref().is_some_and(|f| !f.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyMasteryItem {
    pub word_korean: String,
    pub mastery_score: f64,
    pub times_incorrect: i64,
}
