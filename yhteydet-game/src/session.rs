//! Session state machine for one puzzle round.
//!
//! All mutable state of a round lives here. Operations take the current
//! state, apply one player action to completion, and report a status
//! signal the presentation layer can map to feedback text. A session is
//! replaced wholesale on reset or puzzle switch; nothing mutates across
//! puzzle boundaries.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;

use crate::data::{CATEGORY_COUNT, PuzzleDefinition, TILE_COUNT};
use crate::evaluate::{Verdict, classify};
use crate::share;
use crate::shuffle;
use crate::store::WeeklyRecord;

/// A submission always carries exactly four tiles.
pub const SELECTION_LIMIT: usize = 4;
/// Mistake budget; the fourth distinct miss ends the round.
pub const MISTAKE_LIMIT: u8 = 4;

/// Tile ids currently chosen by the player, at most four, duplicate-free.
pub type Selection = SmallVec<[u8; SELECTION_LIMIT]>;

/// One playable word instance with a stable identity and a hidden
/// category membership. Created once per puzzle instantiation; only its
/// position in the displayed ordering ever changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u8,
    pub label: String,
    pub category: u8,
}

/// Order-independent signature of an attempt's four category memberships,
/// used to reject repeated wrong guesses without charging a mistake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalCombo(SmallVec<[u8; SELECTION_LIMIT]>);

impl CanonicalCombo {
    /// Canonicalize by sorting the memberships ascending.
    #[must_use]
    pub fn new(categories: impl IntoIterator<Item = u8>) -> Self {
        let mut sorted: SmallVec<[u8; SELECTION_LIMIT]> = categories.into_iter().collect();
        sorted.sort_unstable();
        Self(sorted)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// How many of the attempt's tiles fell in each category.
    #[must_use]
    pub fn counts(&self) -> [u8; CATEGORY_COUNT] {
        let mut counts = [0u8; CATEGORY_COUNT];
        for &category in &self.0 {
            if let Some(count) = counts.get_mut(usize::from(category)) {
                *count += 1;
            }
        }
        counts
    }
}

/// A logged submission; the attempt history is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attempt {
    Correct { category: u8 },
    Wrong { combo: CanonicalCombo },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Practice,
    Weekly,
}

impl SessionMode {
    #[must_use]
    pub const fn is_weekly(self) -> bool {
        matches!(self, Self::Weekly)
    }
}

/// Observable lifecycle of a session. `Solved` and `Failed` are terminal;
/// `Locked` means play never starts (weekly record already exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Playing,
    Solved,
    Failed,
    Locked,
}

impl SessionPhase {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Playing => "phase.playing",
            Self::Solved => "phase.solved",
            Self::Failed => "phase.failed",
            Self::Locked => "phase.locked",
        }
    }
}

/// Result of toggling one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Locked, game over, tile already solved, or selection full.
    Ignored,
}

/// Result of submitting the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct { category: u8 },
    OneAway,
    Wrong,
    /// Canonical combination was already tried; no mistake charged.
    Duplicate,
    /// Selection does not hold exactly four tiles.
    Incomplete,
    /// Weekly session restored from a persisted record; play never starts.
    Locked,
    /// Round already ended, solved or failed.
    GameOver,
}

impl SubmitOutcome {
    /// Stable message key for the presentation layer.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Correct { .. } => "msg.correct",
            Self::OneAway => "msg.one-away",
            Self::Wrong => "msg.wrong",
            Self::Duplicate => "msg.duplicate",
            Self::Incomplete => "msg.incomplete",
            Self::Locked => "msg.locked",
            Self::GameOver => "msg.game-over",
        }
    }
}

/// All mutable state of one puzzle round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    puzzle: PuzzleDefinition,
    mode: SessionMode,
    /// Displayed arrangement; solved groups float to the front.
    tiles: Vec<Tile>,
    /// Precomputed id -> category membership, indexed by tile id.
    category_of: Vec<u8>,
    selection: Selection,
    /// Categories in discovery order, append-only.
    solved_order: Vec<u8>,
    mistakes: u8,
    tried_wrong: HashSet<CanonicalCombo>,
    history: Vec<Attempt>,
    locked: bool,
    /// Storage key fixed when weekly play starts; the record persists
    /// under the week the session began even if the round straddles a
    /// Monday rollover.
    #[serde(default)]
    week_key: Option<String>,
}

impl SessionState {
    /// Fresh session: sixteen tiles built in category order, then shuffled
    /// with the given seed.
    #[must_use]
    pub fn new(puzzle: PuzzleDefinition, mode: SessionMode, seed: f64) -> Self {
        let mut session = Self::in_category_order(puzzle, mode);
        shuffle::shuffle_in_place(&mut session.tiles, seed);
        session
    }

    /// Locked session restored from a persisted weekly record. Tiles are
    /// left in unshuffled category order since play is disabled; the
    /// returning player only reviews prior results.
    #[must_use]
    pub fn locked(puzzle: PuzzleDefinition, mode: SessionMode, record: &WeeklyRecord) -> Self {
        let mut session = Self::in_category_order(puzzle, mode);
        session.solved_order = record
            .solved_order
            .iter()
            .copied()
            .filter(|&c| usize::from(c) < CATEGORY_COUNT)
            .collect();
        session.mistakes = record.mistakes.min(MISTAKE_LIMIT);
        session.locked = true;
        session
    }

    fn in_category_order(puzzle: PuzzleDefinition, mode: SessionMode) -> Self {
        let mut tiles = Vec::with_capacity(TILE_COUNT);
        let mut category_of = Vec::with_capacity(TILE_COUNT);
        for (ci, category) in puzzle.categories.iter().enumerate() {
            for word in &category.words {
                #[allow(clippy::cast_possible_truncation)]
                let tile = Tile {
                    id: tiles.len() as u8,
                    label: word.clone(),
                    category: ci as u8,
                };
                category_of.push(tile.category);
                tiles.push(tile);
            }
        }
        Self {
            puzzle,
            mode,
            tiles,
            category_of,
            selection: Selection::new(),
            solved_order: Vec::new(),
            mistakes: 0,
            tried_wrong: HashSet::new(),
            history: Vec::new(),
            locked: false,
            week_key: None,
        }
    }

    /// Pin the weekly storage key this round persists under.
    #[must_use]
    pub fn with_week_key(mut self, key: impl Into<String>) -> Self {
        self.week_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn week_key(&self) -> Option<&str> {
        self.week_key.as_deref()
    }

    #[must_use]
    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn selection(&self) -> &[u8] {
        &self.selection
    }

    #[must_use]
    pub fn solved_order(&self) -> &[u8] {
        &self.solved_order
    }

    #[must_use]
    pub const fn mistakes(&self) -> u8 {
        self.mistakes
    }

    #[must_use]
    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    /// All four categories discovered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.solved_order.len() == CATEGORY_COUNT
    }

    /// Terminal either way: solved, or mistake budget exhausted.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_complete() || self.mistakes >= MISTAKE_LIMIT
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.locked {
            SessionPhase::Locked
        } else if self.is_complete() {
            SessionPhase::Solved
        } else if self.mistakes >= MISTAKE_LIMIT {
            SessionPhase::Failed
        } else {
            SessionPhase::Playing
        }
    }

    fn tile_category(&self, tile_id: u8) -> Option<u8> {
        self.category_of.get(usize::from(tile_id)).copied()
    }

    fn is_category_solved(&self, category: u8) -> bool {
        self.solved_order.contains(&category)
    }

    fn is_tile_solved(&self, tile_id: u8) -> bool {
        self.tile_category(tile_id)
            .is_some_and(|c| self.is_category_solved(c))
    }

    /// Add the tile to the selection, or remove it if already chosen.
    /// No-op while locked or game over, for solved tiles, and when the
    /// selection is already full.
    pub fn toggle_select(&mut self, tile_id: u8) -> ToggleOutcome {
        if self.locked || self.is_game_over() || self.is_tile_solved(tile_id) {
            return ToggleOutcome::Ignored;
        }
        if let Some(pos) = self.selection.iter().position(|&id| id == tile_id) {
            self.selection.remove(pos);
            ToggleOutcome::Deselected
        } else if self.selection.len() < SELECTION_LIMIT {
            self.selection.push(tile_id);
            ToggleOutcome::Selected
        } else {
            ToggleOutcome::Ignored
        }
    }

    /// Judge the current selection.
    ///
    /// A correct guess logs the category, floats its tiles behind the
    /// already-solved block, and clears the selection. A wrong guess is
    /// first checked against previously tried combinations: a repeat costs
    /// nothing, a new miss is recorded and charged. The selection is left
    /// in place on a miss so the caller decides whether to clear it.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.locked {
            return SubmitOutcome::Locked;
        }
        if self.is_game_over() {
            return SubmitOutcome::GameOver;
        }
        if self.selection.len() != SELECTION_LIMIT {
            return SubmitOutcome::Incomplete;
        }

        let mut resolved = [None; SELECTION_LIMIT];
        for (slot, &tile_id) in resolved.iter_mut().zip(&self.selection) {
            *slot = self.tile_category(tile_id);
        }

        match classify(resolved) {
            Verdict::AllCorrect(category) => {
                self.history.push(Attempt::Correct { category });
                self.solved_order.push(category);
                self.float_solved_to_front();
                self.selection.clear();
                SubmitOutcome::Correct { category }
            }
            verdict @ (Verdict::OneAway | Verdict::Wrong) => {
                let combo = CanonicalCombo::new(resolved.into_iter().flatten());
                if self.tried_wrong.contains(&combo) {
                    return SubmitOutcome::Duplicate;
                }
                self.tried_wrong.insert(combo.clone());
                self.history.push(Attempt::Wrong { combo });
                self.mistakes += 1;
                if verdict == Verdict::OneAway {
                    SubmitOutcome::OneAway
                } else {
                    SubmitOutcome::Wrong
                }
            }
        }
    }

    /// Re-permute the unsolved tiles; solved groups keep their block at
    /// the front. No-op while locked.
    pub fn shuffle_unsolved(&mut self, seed: f64) {
        if self.locked {
            return;
        }
        let solved = self.solved_order.clone();
        let tiles = std::mem::take(&mut self.tiles);
        let (mut front, mut rest): (Vec<Tile>, Vec<Tile>) = tiles
            .into_iter()
            .partition(|tile| solved.contains(&tile.category));
        shuffle::shuffle_in_place(&mut rest, seed);
        front.append(&mut rest);
        self.tiles = front;
    }

    /// Clear the selection. Allowed even when game over so the UI can
    /// reset highlighting; no-op while locked.
    pub fn deselect_all(&mut self) {
        if self.locked {
            return;
        }
        self.selection.clear();
    }

    /// Render the attempt history as shareable text.
    #[must_use]
    pub fn share_text(&self) -> String {
        share::share_text(&self.history, &self.puzzle.title, self.is_complete())
    }

    /// Snapshot of the round's outcome for weekly persistence.
    #[must_use]
    pub fn weekly_record(&self) -> WeeklyRecord {
        WeeklyRecord {
            completed: self.is_complete(),
            mistakes: self.mistakes,
            solved_order: self.solved_order.clone(),
        }
    }

    /// Stable reorder: solved groups in discovery order first, unsolved
    /// tiles after them with relative order preserved.
    fn float_solved_to_front(&mut self) {
        let solved = self.solved_order.clone();
        self.tiles.sort_by_key(|tile| {
            solved
                .iter()
                .position(|&c| c == tile.category)
                .unwrap_or(solved.len())
        });
    }
}
