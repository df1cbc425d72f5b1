use chrono::NaiveDate;

use super::ProgressStore;
use crate::{
    catalog::Catalog,
    core::ItemState,
    persistence::KeyValueStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StudyStats {
    pub total_reviews: i64,
    pub words_seen: usize,
    pub words_unseen: usize,
    pub words_overdue: usize,
    pub correct_today: i64,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn stats(&self, catalog: &Catalog, today: NaiveDate) -> StudyStats {
        let progress = self.card_progress();
        let total_reviews = self.total_shown();
        let mut stats = StudyStats {
            total_reviews,
            correct_today: self.daily_count(today),
            ..StudyStats::default()
        };

        for item in catalog.items() {
            match ItemState::from_entry(progress.get(&item.word)) {
                ItemState::Unseen => stats.words_unseen += 1,
                ItemState::Seen(p) => {
                    stats.words_seen += 1;
                    if p.is_overdue(total_reviews) {
                        stats.words_overdue += 1;
                    }
                }
            }
        }

        stats
    }
}
