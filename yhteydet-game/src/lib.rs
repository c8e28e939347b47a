//! Yhteydet Puzzle Engine
//!
//! Platform-agnostic core logic for the Yhteydet word-grouping puzzle:
//! sixteen words hide four categories of four, and the player uncovers
//! them within a four-mistake budget. This crate owns puzzle scheduling,
//! guess evaluation, session state, and result sharing without any UI or
//! platform-specific dependencies.

pub mod data;
pub mod evaluate;
pub mod schedule;
pub mod session;
pub mod share;
pub mod shuffle;
pub mod store;

// Re-export commonly used types
pub use data::{CATEGORY_COUNT, Catalog, CatalogError, Category, PuzzleDefinition, TILE_COUNT};
pub use evaluate::{Verdict, classify};
pub use schedule::{next_monday, resolve_weekly_puzzle, week_index_for, week_key};
pub use session::{
    Attempt, CanonicalCombo, MISTAKE_LIMIT, SELECTION_LIMIT, SessionMode, SessionPhase,
    SessionState, SubmitOutcome, Tile, ToggleOutcome,
};
pub use share::share_text;
pub use store::{MemoryStore, WeeklyRecord, WeeklyStore};

use chrono::NaiveDate;

/// A submit result together with whether the weekly record, if one was
/// due, actually reached the store. Persistence failure is a soft
/// warning; the session itself is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub persisted: bool,
}

/// Main engine binding a puzzle catalog to a weekly-record store.
pub struct PuzzleEngine<S>
where
    S: WeeklyStore,
{
    catalog: Catalog,
    store: S,
}

impl<S> PuzzleEngine<S>
where
    S: WeeklyStore,
{
    /// Create an engine over the given catalog and store backend.
    pub const fn new(catalog: Catalog, store: S) -> Self {
        Self { catalog, store }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start a practice session on the catalog entry at `index`.
    #[must_use]
    pub fn practice(&self, index: usize) -> Option<SessionState> {
        let puzzle = self.catalog.get(index)?.clone();
        Some(SessionState::new(
            puzzle,
            SessionMode::Practice,
            shuffle::entropy_seed(),
        ))
    }

    /// Enter weekly mode for `today`. Reads the week's record exactly
    /// once: an existing record yields a locked session replaying the
    /// stored outcome, otherwise play starts fresh on the week's puzzle.
    /// The week's storage key is pinned on the session here, so the
    /// round persists under the week it began even if finished after a
    /// Monday rollover. A store read failure is treated as an absent
    /// record.
    pub fn load_weekly(&self, today: NaiveDate) -> SessionState {
        let week = week_index_for(today);
        let key = week_key(week);
        let puzzle = resolve_weekly_puzzle(&self.catalog, week).clone();

        let record = match self.store.load(&key) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("weekly record load failed for {key}: {err}");
                None
            }
        };
        let session = match record {
            Some(record) => SessionState::locked(puzzle, SessionMode::Weekly, &record),
            None => SessionState::new(puzzle, SessionMode::Weekly, shuffle::entropy_seed()),
        };
        session.with_week_key(key)
    }

    /// Submit the session's current selection. When a weekly session
    /// reaches a terminal phase through this call, its record is saved
    /// exactly once under the session's pinned week key; a save failure
    /// is downgraded to a soft warning and reported via
    /// [`SubmitReport::persisted`].
    pub fn submit(&self, session: &mut SessionState) -> SubmitReport {
        let was_over = session.is_game_over();
        let outcome = session.submit();

        let mut persisted = true;
        if session.mode().is_weekly() && !was_over && session.is_game_over() {
            if let Some(key) = session.week_key() {
                if let Err(err) = self.store.save(key, &session.weekly_record()) {
                    log::warn!("weekly record save failed for {key}: {err}");
                    persisted = false;
                }
            } else {
                log::warn!("weekly session carries no week key; result not persisted");
                persisted = false;
            }
        }
        SubmitReport { outcome, persisted }
    }

    /// Discard the session and start the same puzzle over. In weekly mode
    /// this also clears the stored record for the session's week: an
    /// explicit re-attempt invalidates the weekly lock.
    pub fn reset(&self, session: &mut SessionState) {
        let puzzle = session.puzzle().clone();
        self.reset_with(session, puzzle);
    }

    /// Discard the session and start a different puzzle in the same mode.
    pub fn reset_with(&self, session: &mut SessionState, puzzle: PuzzleDefinition) {
        if session.mode().is_weekly() {
            if let Some(key) = session.week_key() {
                if let Err(err) = self.store.delete(key) {
                    log::warn!("weekly record delete failed for {key}: {err}");
                }
            }
        }
        let week_key = session.week_key().map(str::to_owned);
        let mut fresh = SessionState::new(puzzle, session.mode(), shuffle::entropy_seed());
        if let Some(key) = week_key {
            fresh = fresh.with_week_key(key);
        }
        *session = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_puzzle;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> PuzzleEngine<MemoryStore> {
        let catalog = Catalog::new(vec![sample_puzzle("a"), sample_puzzle("b")]).unwrap();
        PuzzleEngine::new(catalog, MemoryStore::new())
    }

    fn solve(engine: &PuzzleEngine<MemoryStore>, session: &mut SessionState) {
        for category in 0u8..4 {
            session.deselect_all();
            for id in category * 4..category * 4 + 4 {
                session.toggle_select(id);
            }
            let report = engine.submit(session);
            assert_eq!(report.outcome, SubmitOutcome::Correct { category });
            assert!(report.persisted);
        }
    }

    #[test]
    fn weekly_session_persists_once_and_relocks() {
        let engine = engine();
        let monday = ymd(2025, 8, 18);

        let mut session = engine.load_weekly(monday);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.puzzle().id, "a");
        assert_eq!(session.week_key(), Some("connections-weekly-week-1"));
        solve(&engine, &mut session);
        assert_eq!(session.phase(), SessionPhase::Solved);

        // A returning player the same week only reviews the outcome.
        let relock = engine.load_weekly(ymd(2025, 8, 22));
        assert_eq!(relock.phase(), SessionPhase::Locked);
        assert_eq!(relock.solved_order(), &[0, 1, 2, 3]);
        assert_eq!(relock.mistakes(), 0);

        // The following week rotates to the next puzzle, unlocked.
        let next_week = engine.load_weekly(ymd(2025, 8, 25));
        assert_eq!(next_week.phase(), SessionPhase::Playing);
        assert_eq!(next_week.puzzle().id, "b");
    }

    #[test]
    fn reset_clears_the_weekly_lock() {
        let engine = engine();
        let monday = ymd(2025, 8, 18);
        let mut session = engine.load_weekly(monday);
        solve(&engine, &mut session);
        assert_eq!(engine.load_weekly(monday).phase(), SessionPhase::Locked);

        engine.reset(&mut session);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.mistakes(), 0);
        assert!(session.history().is_empty());
        // The rebuilt session still persists under the same week.
        assert_eq!(session.week_key(), Some("connections-weekly-week-1"));
        assert_eq!(engine.load_weekly(monday).phase(), SessionPhase::Playing);
    }

    #[test]
    fn weekly_round_saves_under_the_week_it_began() {
        let engine = engine();
        // Sunday, last day of week 1. The key is pinned at load time, so
        // the record lands in week 1 even if play runs past midnight.
        let mut session = engine.load_weekly(ymd(2025, 8, 24));
        assert_eq!(session.week_key(), Some("connections-weekly-week-1"));
        solve(&engine, &mut session);

        let sunday = engine.load_weekly(ymd(2025, 8, 24));
        assert_eq!(sunday.phase(), SessionPhase::Locked);
        // Week 2 starts fresh; the record did not leak across the rollover.
        let monday = engine.load_weekly(ymd(2025, 8, 25));
        assert_eq!(monday.phase(), SessionPhase::Playing);
    }

    #[test]
    fn practice_sessions_never_touch_the_store() {
        let engine = engine();
        let today = ymd(2025, 8, 20);
        let mut session = engine.practice(1).unwrap();
        assert_eq!(session.puzzle().id, "b");
        assert_eq!(session.week_key(), None);
        solve(&engine, &mut session);
        assert_eq!(engine.load_weekly(today).phase(), SessionPhase::Playing);
        assert!(engine.practice(7).is_none());
    }

    mod failing_store {
        use super::*;
        use std::fmt;

        #[derive(Debug)]
        pub struct SaveRefused;

        impl fmt::Display for SaveRefused {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("save refused")
            }
        }

        impl std::error::Error for SaveRefused {}

        /// Store whose writes always fail; reads see nothing.
        pub struct FailingStore;

        impl WeeklyStore for FailingStore {
            type Error = SaveRefused;

            fn load(&self, _week_key: &str) -> Result<Option<WeeklyRecord>, Self::Error> {
                Ok(None)
            }

            fn save(&self, _week_key: &str, _record: &WeeklyRecord) -> Result<(), Self::Error> {
                Err(SaveRefused)
            }

            fn delete(&self, _week_key: &str) -> Result<(), Self::Error> {
                Err(SaveRefused)
            }
        }
    }

    #[test]
    fn save_failure_is_a_soft_warning() {
        let catalog = Catalog::new(vec![sample_puzzle("a")]).unwrap();
        let engine = PuzzleEngine::new(catalog, failing_store::FailingStore);
        let monday = ymd(2025, 8, 18);
        let mut session = engine.load_weekly(monday);

        for category in 0u8..4 {
            for id in category * 4..category * 4 + 4 {
                session.toggle_select(id);
            }
            let report = engine.submit(&mut session);
            assert_eq!(report.outcome, SubmitOutcome::Correct { category });
            // Only the terminal transition attempts the save.
            assert_eq!(report.persisted, category != 3);
        }
        // Session state survives the failed save.
        assert_eq!(session.phase(), SessionPhase::Solved);
        // Reset tolerates a failing delete too.
        engine.reset(&mut session);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }
}
