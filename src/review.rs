use chrono::NaiveDate;

use crate::{
    core::{
        date_key,
        models::MIN_CARDS_UNTIL_NEXT_REVIEW,
        ItemProgress,
        ReviewOutcome,
        VokabelError,
    },
    persistence::KeyValueStore,
    progress::{
        ProgressStore,
        CARD_PROGRESS_KEY,
        DAILY_PROGRESS_KEY,
        TOTAL_CARDS_SHOWN_KEY,
    },
};

/// What a single review left behind in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedReview {
    pub progress: ItemProgress,
    pub total_shown: i64,
    /// The day's correct count after this review (unchanged on a wrong answer).
    pub daily_count: i64,
}

/// Interval after a review of a word that had been reviewed before.
///
/// Correct doubles. Wrong halves, but never below the floor.
pub fn next_interval(current: i64, outcome: ReviewOutcome) -> i64 {
    match outcome {
        ReviewOutcome::Correct => current.saturating_mul(2),
        ReviewOutcome::Incorrect => (current / 2).max(MIN_CARDS_UNTIL_NEXT_REVIEW),
    }
}

/// Applies one review outcome for `word`, dated `today`.
///
/// The word's progress, the shown counter and (for a correct answer) the
/// day's count are written together. If any write fails the store is left
/// as it was and the error is returned.
pub fn record_review<S: KeyValueStore>(
    store: &mut ProgressStore<S>,
    word: &str,
    outcome: ReviewOutcome,
    today: NaiveDate,
) -> Result<RecordedReview, VokabelError> {
    let mut all = store.card_progress();
    let had_prior_entry = all.contains_key(word);
    let mut progress = all.get(word).copied().unwrap_or_default();

    let total_shown = store.total_shown().saturating_add(1);
    progress.last_shown_at = total_shown - 1;

    // The first review only stamps the word, the interval starts moving on the second
    if had_prior_entry {
        progress.cards_until_next_review = next_interval(progress.cards_until_next_review, outcome);
    }
    all.insert(word.to_string(), progress);

    let mut entries = vec![
        (CARD_PROGRESS_KEY, serde_json::to_string(&all)?),
        (TOTAL_CARDS_SHOWN_KEY, total_shown.to_string()),
    ];

    let mut daily = store.daily_progress();
    let day_key = date_key(today);
    let mut daily_count = daily.get(&day_key).copied().unwrap_or(0);
    if outcome.is_correct() {
        daily_count = daily_count.saturating_add(1);
        daily.insert(day_key, daily_count);
        entries.push((DAILY_PROGRESS_KEY, serde_json::to_string(&daily)?));
    }

    store.commit(entries)?;

    tracing::debug!(
        word,
        ?outcome,
        total_shown,
        interval = progress.cards_until_next_review,
        daily_count,
        "review recorded"
    );

    Ok(RecordedReview { progress, total_shown, daily_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{
        memory_store::FailingKeyValueStore,
        MemoryKeyValueStore,
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn store() -> ProgressStore<MemoryKeyValueStore> {
        ProgressStore::new(MemoryKeyValueStore::new())
    }

    #[test]
    fn test_first_review_keeps_default_interval() {
        let mut store = store();
        let review = record_review(&mut store, "Hund", ReviewOutcome::Correct, day()).unwrap();

        assert_eq!(review.progress, ItemProgress { last_shown_at: 0, cards_until_next_review: 10 });
        assert_eq!(review.total_shown, 1);
        assert_eq!(store.item_progress("Hund"), Some(review.progress));

        let mut store2 = self::store();
        let review = record_review(&mut store2, "Hund", ReviewOutcome::Incorrect, day()).unwrap();
        assert_eq!(review.progress.cards_until_next_review, 10);
    }

    #[test]
    fn test_correct_reviews_double_from_second_review() {
        let mut store = store();
        let intervals: Vec<i64> = (0..3)
            .map(|_| record_review(&mut store, "Hund", ReviewOutcome::Correct, day()).unwrap())
            .map(|review| review.progress.cards_until_next_review)
            .collect();

        assert_eq!(intervals, vec![10, 20, 40]);
    }

    #[test]
    fn test_wrong_answer_halves_with_floor() {
        assert_eq!(next_interval(10, ReviewOutcome::Incorrect), 10);
        assert_eq!(next_interval(40, ReviewOutcome::Incorrect), 20);
        assert_eq!(next_interval(25, ReviewOutcome::Incorrect), 12);
        assert_eq!(next_interval(15, ReviewOutcome::Incorrect), 10);
        assert_eq!(next_interval(20, ReviewOutcome::Correct), 40);

        let mut store = store();
        record_review(&mut store, "Hund", ReviewOutcome::Correct, day()).unwrap();
        let review = record_review(&mut store, "Hund", ReviewOutcome::Incorrect, day()).unwrap();
        assert_eq!(review.progress.cards_until_next_review, 10);
    }

    #[test]
    fn test_last_shown_at_uses_pre_increment_ordinal() {
        let mut store = store();
        record_review(&mut store, "Hund", ReviewOutcome::Correct, day()).unwrap();
        record_review(&mut store, "Katze", ReviewOutcome::Incorrect, day()).unwrap();
        let review = record_review(&mut store, "Hund", ReviewOutcome::Correct, day()).unwrap();

        assert_eq!(review.total_shown, 3);
        assert_eq!(review.progress.last_shown_at, 2);
        assert_eq!(store.item_progress("Katze").unwrap().last_shown_at, 1);
        assert_eq!(store.total_shown(), 3);
    }

    #[test]
    fn test_daily_counter_counts_only_correct_answers() {
        let mut store = store();
        let review = record_review(&mut store, "Hund", ReviewOutcome::Incorrect, day()).unwrap();
        assert_eq!(review.daily_count, 0);
        assert_eq!(store.backend().get(DAILY_PROGRESS_KEY), None);

        record_review(&mut store, "Katze", ReviewOutcome::Correct, day()).unwrap();
        let review = record_review(&mut store, "Maus", ReviewOutcome::Correct, day()).unwrap();
        assert_eq!(review.daily_count, 2);

        record_review(&mut store, "Maus", ReviewOutcome::Incorrect, day()).unwrap();
        assert_eq!(store.daily_progress().get(&date_key(day())), Some(&2));
    }

    #[test]
    fn test_daily_counter_is_keyed_by_review_date() {
        let mut store = store();
        let tomorrow = day().succ_opt().unwrap();
        record_review(&mut store, "Hund", ReviewOutcome::Correct, day()).unwrap();
        record_review(&mut store, "Hund", ReviewOutcome::Correct, tomorrow).unwrap();

        assert_eq!(store.daily_count(day()), 1);
        assert_eq!(store.daily_count(tomorrow), 1);
    }

    #[test]
    fn test_injected_negative_count_keeps_counting() {
        let mut store = store();
        store.set_daily_count(day(), -3);
        let review = record_review(&mut store, "Hund", ReviewOutcome::Correct, day()).unwrap();
        assert_eq!(review.daily_count, -2);
    }

    #[test]
    fn test_failed_progress_write_leaves_store_unchanged() {
        let mut store = ProgressStore::new(FailingKeyValueStore::failing_on(CARD_PROGRESS_KEY));

        let result = record_review(&mut store, "Hund", ReviewOutcome::Correct, day());
        assert!(result.is_err());
        assert_eq!(store.total_shown(), 0);
        assert!(store.card_progress().is_empty());
        assert_eq!(store.daily_count(day()), 0);
    }

    #[test]
    fn test_failed_daily_write_rolls_back_progress_and_counter() {
        let mut store = ProgressStore::new(FailingKeyValueStore::failing_on(DAILY_PROGRESS_KEY));

        // A wrong answer never touches the daily entry
        record_review(&mut store, "Hund", ReviewOutcome::Incorrect, day()).unwrap();
        assert_eq!(store.total_shown(), 1);

        assert!(record_review(&mut store, "Katze", ReviewOutcome::Correct, day()).is_err());
        assert_eq!(store.total_shown(), 1);
        assert_eq!(store.item_progress("Katze"), None);
        assert_eq!(store.item_progress("Hund").unwrap().last_shown_at, 0);
    }
}
