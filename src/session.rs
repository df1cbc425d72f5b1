use rand::Rng;

use crate::{
    catalog::Catalog,
    core::{
        Clock,
        ReviewOutcome,
        VokabelError,
    },
    persistence::KeyValueStore,
    progress::ProgressStore,
    quota::{
        CompletionLatch,
        QuotaDisplay,
        QuotaTarget,
    },
    review::record_review,
    scheduler::{
        pick_example_index,
        select_next_index,
    },
};

/// Notifications for whatever draws the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// `None` when there is nothing left to show.
    CurrentItemChanged(Option<String>),
    DailyCountChanged(i64),
    CompletionReached(i64),
    CompletionDismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShownCard {
    item_index: usize,
    example_index: usize,
    revealed: bool,
}

/// What the user currently sees. The translation stays hidden until revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView<'a> {
    pub word: &'a str,
    pub sentence: &'a str,
    pub translation: Option<&'a str>,
    pub revealed: bool,
}

/// One drilling sitting over a catalog and a progress store.
pub struct DrillSession<S, C, R> {
    catalog: Catalog,
    store: ProgressStore<S>,
    quota: QuotaTarget,
    clock: C,
    rng: R,
    current: Option<ShownCard>,
    latch: CompletionLatch,
}

impl<S, C, R> DrillSession<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    pub fn new(catalog: Catalog, store: ProgressStore<S>, quota: QuotaTarget, clock: C, rng: R) -> Self {
        Self { catalog, store, quota, clock, rng, current: None, latch: CompletionLatch::new() }
    }

    /// Loads today's count and shows either the first card or, if the stored
    /// count is exactly the target, the completion state.
    pub fn start(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let count = self.today_count();
        events.push(SessionEvent::DailyCountChanged(count));

        if self.latch.observe(count, &self.quota) {
            self.enter_completion(&mut events);
        } else {
            self.advance(&mut events);
        }
        events
    }

    pub fn reveal(&mut self) -> Result<(), VokabelError> {
        let card = self.current.as_mut().ok_or(VokabelError::NoCurrentCard)?;
        card.revealed = true;
        Ok(())
    }

    /// Records the answer for the revealed card. A failed write keeps the
    /// card on screen and leaves the store untouched.
    pub fn answer(&mut self, outcome: ReviewOutcome) -> Result<Vec<SessionEvent>, VokabelError> {
        let card = self.current.ok_or(VokabelError::NoCurrentCard)?;
        if !card.revealed {
            return Err(VokabelError::NotRevealed);
        }
        let word = self
            .catalog
            .get(card.item_index)
            .map(|item| item.word.clone())
            .ok_or(VokabelError::NoCurrentCard)?;

        let review = record_review(&mut self.store, &word, outcome, self.clock.today())?;

        let mut events = Vec::new();
        // Only a correct answer can complete the day; outside changes wait for refresh()
        if outcome.is_correct() {
            events.push(SessionEvent::DailyCountChanged(review.daily_count));
            if self.latch.observe(review.daily_count, &self.quota) {
                self.enter_completion(&mut events);
                return Ok(events);
            }
        }

        self.advance(&mut events);
        Ok(events)
    }

    /// The "continue practicing" action.
    pub fn dismiss_completion(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.latch.dismiss() {
            events.push(SessionEvent::CompletionDismissed);
            self.advance(&mut events);
        }
        events
    }

    /// Picks up state written to the store from outside this session.
    pub fn refresh(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let count = self.today_count();
        if self.latch.last_count() != Some(count) {
            events.push(SessionEvent::DailyCountChanged(count));
        }
        if self.latch.observe(count, &self.quota) {
            self.enter_completion(&mut events);
        }
        events
    }

    pub fn current_card(&self) -> Option<CardView<'_>> {
        let card = self.current?;
        let item = self.catalog.get(card.item_index)?;
        let example = item.examples.get(card.example_index)?;
        Some(CardView {
            word: &item.word,
            sentence: &example.sentence,
            translation: card.revealed.then_some(example.translation.as_str()),
            revealed: card.revealed,
        })
    }

    pub fn is_completion_showing(&self) -> bool {
        self.latch.is_showing()
    }

    pub fn today_count(&self) -> i64 {
        self.store.daily_count(self.clock.today())
    }

    pub fn quota(&self) -> QuotaDisplay {
        self.quota.render(self.today_count())
    }

    pub fn quota_target(&self) -> &QuotaTarget {
        &self.quota
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore<S> {
        &mut self.store
    }

    pub fn into_store(self) -> ProgressStore<S> {
        self.store
    }

    fn enter_completion(&mut self, events: &mut Vec<SessionEvent>) {
        tracing::info!(daily_target = self.quota.target(), "daily target reached");
        self.current = None;
        events.push(SessionEvent::CompletionReached(self.quota.target()));
    }

    fn advance(&mut self, events: &mut Vec<SessionEvent>) {
        self.current = select_next_index(&self.catalog, &self.store).and_then(|item_index| {
            let item = self.catalog.get(item_index)?;
            let example_index = pick_example_index(item, &mut self.rng)?;
            Some(ShownCard { item_index, example_index, revealed: false })
        });

        let word = self
            .current
            .and_then(|card| self.catalog.get(card.item_index))
            .map(|item| item.word.clone());
        events.push(SessionEvent::CurrentItemChanged(word));
    }
}
