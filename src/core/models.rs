use serde::{
    Deserialize,
    Serialize,
};

/// Interval given to a word the first time it is reviewed.
pub const DEFAULT_CARDS_UNTIL_NEXT_REVIEW: i64 = 10;
/// Halving after a wrong answer never goes below this.
pub const MIN_CARDS_UNTIL_NEXT_REVIEW: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub sentence: String,
    #[serde(alias = "sentence_translation")]
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
    pub word: String,
    pub examples: Vec<Example>,
}

impl VocabItem {
    pub fn new(word: impl Into<String>, examples: Vec<Example>) -> Self {
        Self { word: word.into(), examples }
    }
}

impl Example {
    pub fn new(sentence: impl Into<String>, translation: impl Into<String>) -> Self {
        Self { sentence: sentence.into(), translation: translation.into() }
    }
}

/// Per-word review state, persisted under `cardProgress`.
///
/// Counters are signed so that externally written state (negative or
/// otherwise odd values) loads as-is instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProgress {
    pub last_shown_at: i64,
    pub cards_until_next_review: i64,
}

impl Default for ItemProgress {
    fn default() -> Self {
        Self { last_shown_at: 0, cards_until_next_review: DEFAULT_CARDS_UNTIL_NEXT_REVIEW }
    }
}

impl ItemProgress {
    /// Global review ordinal at which the word becomes eligible again.
    pub fn due_at(&self) -> i64 {
        self.last_shown_at.saturating_add(self.cards_until_next_review)
    }

    pub fn is_overdue(&self, total_shown: i64) -> bool {
        self.due_at() < total_shown
    }
}

/// Scheduling view of a catalog word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Unseen,
    Seen(ItemProgress),
}

impl ItemState {
    pub fn from_entry(entry: Option<&ItemProgress>) -> Self {
        match entry {
            Some(progress) => ItemState::Seen(*progress),
            None => ItemState::Unseen,
        }
    }

    /// `None` for unseen words, which never take part in due-date comparison.
    pub fn due_at(&self) -> Option<i64> {
        match self {
            ItemState::Unseen => None,
            ItemState::Seen(progress) => Some(progress.due_at()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewOutcome {
    Correct,
    Incorrect,
}

impl ReviewOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, ReviewOutcome::Correct)
    }
}

impl From<bool> for ReviewOutcome {
    fn from(is_correct: bool) -> Self {
        if is_correct {
            ReviewOutcome::Correct
        } else {
            ReviewOutcome::Incorrect
        }
    }
}
