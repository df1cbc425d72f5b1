use rand::Rng;

use crate::{
    catalog::Catalog,
    core::{
        Example,
        ItemState,
        VocabItem,
    },
    persistence::KeyValueStore,
    progress::ProgressStore,
};

/// Picks the catalog index of the word to show next.
///
/// Order of preference: the word with the earliest due date if it is
/// strictly overdue, then the first word never shown, then the earliest
/// due word anyway so practice can continue past the schedule.
pub fn select_next_index<S: KeyValueStore>(catalog: &Catalog, store: &ProgressStore<S>) -> Option<usize> {
    if catalog.is_empty() {
        return None;
    }

    let progress = store.card_progress();
    if progress.is_empty() {
        return Some(0);
    }

    let total_shown = store.total_shown();
    let mut next_due: Option<(usize, i64)> = None;
    let mut first_unseen: Option<usize> = None;

    for (index, item) in catalog.items().iter().enumerate() {
        match ItemState::from_entry(progress.get(&item.word)) {
            ItemState::Seen(item_progress) => {
                let due_at = item_progress.due_at();
                // strict less-than keeps the earlier word on ties
                if next_due.map_or(true, |(_, best)| due_at < best) {
                    next_due = Some((index, due_at));
                }
            }
            ItemState::Unseen => {
                if first_unseen.is_none() {
                    first_unseen = Some(index);
                }
            }
        }
    }

    if let Some((index, due_at)) = next_due {
        if due_at < total_shown {
            tracing::debug!(word = %catalog.items()[index].word, due_at, total_shown, "overdue word");
            return Some(index);
        }
    }

    if let Some(index) = first_unseen {
        tracing::debug!(word = %catalog.items()[index].word, "introducing new word");
        return Some(index);
    }

    next_due.map(|(index, _)| index)
}

pub fn select_next<'a, S: KeyValueStore>(
    catalog: &'a Catalog,
    store: &ProgressStore<S>,
) -> Option<&'a VocabItem> {
    select_next_index(catalog, store).and_then(|index| catalog.get(index))
}

/// Uniformly random example index. `None` only for an item without examples.
pub fn pick_example_index<R: Rng>(item: &VocabItem, rng: &mut R) -> Option<usize> {
    if item.examples.is_empty() {
        return None;
    }
    Some(rng.random_range(0..item.examples.len()))
}

pub fn pick_example<'a, R: Rng>(item: &'a VocabItem, rng: &mut R) -> Option<&'a Example> {
    pick_example_index(item, rng).map(|index| &item.examples[index])
}
