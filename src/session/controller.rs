//! Session controller: the single owner of mutable game state.
//!
//! ## Responsibilities
//!
//! - Current `GameState`, replaced wholesale on every transition
//! - Undo `History`
//! - Status machine `NotStarted -> InProgress -> Won`
//! - Elapsed clock and debounced autoplay, both as `ScheduledTask`s
//! - `Statistics`, written through to a `KeyValueStore` on every change
//! - Drag session, drop targets, and card focus
//!
//! ## Time
//!
//! The controller is driven by `advance(now)` with a monotonic timestamp
//! from the host's event loop. Every accepted transition re-arms autoplay
//! relative to the last timestamp seen.
//!
//! ```
//! use std::time::Duration;
//! use freecell_engine::core::EngineConfig;
//! use freecell_engine::session::{Controller, GameStatus, MemoryStore};
//!
//! let mut controller = Controller::with_seed(EngineConfig::default(), MemoryStore::new(), 7);
//! assert_eq!(controller.status(), GameStatus::NotStarted);
//! controller.advance(Duration::from_secs(1));
//! assert_eq!(controller.elapsed_secs(), 0);
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::core::{deal, Card, EngineConfig, GameRng, GameState, LoadError};
use crate::rules::{apply_move, autoplay_step, quick_move, InvalidMove};
use crate::zones::{Move, Source};

use super::clipboard::Clipboard;
use super::drag::{DragRelease, DragSession, DropTargets, Point};
use super::history::History;
use super::scheduler::ScheduledTask;
use super::stats::Statistics;
use super::storage::{KeyValueStore, MemoryStore};

/// Clock tick interval.
const CLOCK_TICK: Duration = Duration::from_secs(1);

/// Lifecycle of the active game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Dealt, no move made yet.
    #[default]
    NotStarted,
    /// At least one move made.
    InProgress,
    /// All 52 cards on foundations. Terminal until a new game.
    Won,
}

/// A focused card and its same-color twin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Focus {
    pub card: Card,
    pub twin: Card,
}

/// Result of releasing the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// The drop was a legal move and is now the current state.
    Committed(Move),
    /// Dropped nowhere, or the move was illegal. State unchanged.
    Cancelled,
    /// Press and release without dragging.
    Click(Source),
}

/// Result of a clipboard sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Export written; clipboard held nothing new.
    Exported,
    /// Clipboard held a different valid state, which is now loaded.
    Imported,
    /// Channel or parse failure; the export was logged instead.
    Failed,
}

/// Top-level game controller.
pub struct Controller<S = MemoryStore> {
    config: EngineConfig,
    state: GameState,
    history: History,
    status: GameStatus,
    seed: Option<u64>,

    // === Timers ===
    now: Duration,
    elapsed_secs: u64,
    clock: ScheduledTask,
    autoplay: ScheduledTask,

    // === Statistics ===
    stats: Statistics,
    store: S,

    // === Interaction ===
    drag: DragSession,
    targets: DropTargets,
    focus: Option<Focus>,
}

impl<S: KeyValueStore> Controller<S> {
    /// Create a controller with a freshly shuffled deal.
    ///
    /// Statistics are loaded from `store` once, here.
    #[must_use]
    pub fn new(config: EngineConfig, store: S) -> Self {
        Self::from_rng(config, store, GameRng::from_entropy())
    }

    /// Create a controller with a reproducible deal.
    #[must_use]
    pub fn with_seed(config: EngineConfig, store: S, seed: u64) -> Self {
        Self::from_rng(config, store, GameRng::new(seed))
    }

    fn from_rng(config: EngineConfig, store: S, mut rng: GameRng) -> Self {
        let stats = Statistics::load(&store, &config.stats_key);
        let state = deal(&mut rng);
        info!(seed = rng.seed(), "Dealt new game");

        Self {
            history: History::new(config.history_limit),
            status: GameStatus::NotStarted,
            seed: Some(rng.seed()),
            now: Duration::ZERO,
            elapsed_secs: 0,
            clock: ScheduledTask::new(CLOCK_TICK),
            autoplay: ScheduledTask::new(config.autoplay_delay),
            stats,
            store,
            drag: DragSession::new(config.drag_threshold),
            targets: DropTargets::new(),
            focus: None,
            state,
            config,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed of the current deal; `None` after loading an external state.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.status != GameStatus::Won && !self.history.is_empty()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Elapsed time as `m:ss`.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_time(self.elapsed_secs)
    }

    #[must_use]
    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    #[must_use]
    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn drop_targets_mut(&mut self) -> &mut DropTargets {
        &mut self.targets
    }

    /// Is an autoplay scan pending?
    #[must_use]
    pub fn autoplay_pending(&self) -> bool {
        self.autoplay.is_armed()
    }

    // === Game lifecycle ===

    /// Deal a new game. Statistics are not touched.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, seed: Option<u64>) {
        let mut rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
        self.state = deal(&mut rng);
        self.seed = Some(rng.seed());
        self.history.clear();
        self.status = GameStatus::NotStarted;
        self.elapsed_secs = 0;
        self.clock.cancel();
        self.autoplay.cancel();
        self.drag.cancel();
        self.focus = None;
        info!(seed = rng.seed(), "Dealt new game");
    }

    /// Give up the current game: records a loss if it was in progress,
    /// then deals a new one.
    #[instrument(skip(self))]
    pub fn resign(&mut self) {
        if self.status == GameStatus::InProgress {
            self.stats.record_loss(
                self.elapsed_secs,
                self.state.moves,
                Utc::now(),
                self.config.recent_games_capacity,
            );
            info!(
                time = self.elapsed_secs,
                moves = self.state.moves,
                "Game resigned"
            );
            self.persist_stats();
        }
        self.new_game(None);
    }

    // === Moves ===

    /// Validate and apply a move.
    ///
    /// Rejection leaves everything unchanged.
    #[instrument(skip(self))]
    pub fn attempt_move(&mut self, mv: Move) -> Result<(), InvalidMove> {
        if self.status == GameStatus::Won {
            return Err(InvalidMove::GameOver);
        }
        match apply_move(&self.state, mv) {
            Ok(next) => {
                debug!(%mv, moves = next.moves, "Move applied");
                self.commit(next);
                Ok(())
            }
            Err(e) => {
                debug!(%mv, reason = %e, "Move rejected");
                Err(e)
            }
        }
    }

    /// Double-click: send a card to its foundation, or a column card to the
    /// first empty freecell. Returns the move made.
    #[instrument(skip(self))]
    pub fn quick_move(&mut self, source: Source) -> Option<Move> {
        if self.status == GameStatus::Won {
            return None;
        }
        let mv = quick_move(&self.state, source)?;
        self.attempt_move(mv).ok().map(|()| mv)
    }

    /// Restore the state before the last player move, along with any
    /// autoplay that followed it.
    ///
    /// No-op when there is no history or the game is won. Never pushes
    /// history itself.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        if self.status == GameStatus::Won {
            return false;
        }
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.state = previous;
        self.focus = None;
        self.drag.cancel();
        debug!(moves = self.state.moves, remaining = self.history.len(), "Undo");
        self.rearm_autoplay();
        true
    }

    /// Record a player transition: push history, replace state, update status.
    fn commit(&mut self, next: GameState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
        self.settle();
    }

    /// Status bookkeeping after the current state changed.
    fn settle(&mut self) {
        if self.status == GameStatus::NotStarted {
            self.status = GameStatus::InProgress;
            self.clock.arm(self.now);
        }

        if self.state.is_won() {
            self.finish_win();
        } else {
            self.rearm_autoplay();
        }
    }

    fn finish_win(&mut self) {
        self.status = GameStatus::Won;
        self.clock.cancel();
        self.autoplay.cancel();
        self.stats.record_win(
            self.elapsed_secs,
            self.state.moves,
            Utc::now(),
            self.config.recent_games_capacity,
        );
        info!(
            time = self.elapsed_secs,
            moves = self.state.moves,
            streak = self.stats.current_streak,
            "Game won"
        );
        self.persist_stats();
    }

    fn persist_stats(&mut self) {
        if let Err(e) = self.stats.save(&mut self.store, &self.config.stats_key) {
            warn!(error = %e, "Failed to persist statistics");
        }
    }

    // === Autoplay and clock ===

    /// Enable or disable autoplay. Takes effect at the next scan.
    #[instrument(skip(self))]
    pub fn set_autoplay_enabled(&mut self, enabled: bool) {
        self.config.autoplay_enabled = enabled;
        if enabled {
            self.rearm_autoplay();
        } else {
            self.autoplay.cancel();
        }
    }

    fn rearm_autoplay(&mut self) {
        if self.config.autoplay_enabled && self.status == GameStatus::InProgress {
            self.autoplay.arm(self.now);
        }
    }

    /// Advance the host clock to `now`, firing due clock ticks and autoplay.
    pub fn advance(&mut self, now: Duration) {
        self.now = self.now.max(now);

        while let Some(due) = self.clock.take_due(self.now) {
            if self.status != GameStatus::InProgress {
                break;
            }
            self.elapsed_secs += 1;
            self.clock.arm(due);
        }

        if self.autoplay.take_due(self.now).is_some() {
            if self.drag.is_dragging() {
                // Held cards stay put until release.
                self.autoplay.arm(self.now);
            } else {
                self.autoplay_scan();
            }
        }
    }

    /// Run one autoplay scan now. At most one card moves.
    ///
    /// Honors the enabled flag, and does nothing before the first move,
    /// after a win, or while cards are being dragged.
    ///
    /// Autoplay moves count toward `moves` but push no history: they belong
    /// to the undo step of the move that exposed them.
    #[instrument(skip(self))]
    pub fn autoplay_scan(&mut self) -> Option<Move> {
        if !self.config.autoplay_enabled
            || self.status != GameStatus::InProgress
            || self.drag.is_dragging()
        {
            return None;
        }
        let (mv, next) = autoplay_step(&self.state)?;
        debug!(%mv, "Autoplay");
        self.state = next;
        self.settle();
        Some(mv)
    }

    // === External state ===

    /// Adopt an externally supplied state.
    ///
    /// Resets history, focus and the win flag. Rejected states leave
    /// everything unchanged.
    #[instrument(skip(self, candidate))]
    pub fn load_state(&mut self, candidate: GameState) -> Result<(), LoadError> {
        if let Err(e) = candidate.check_invariants() {
            error!(error = %e, "Invalid game state provided");
            return Err(e.into());
        }
        self.adopt(candidate);
        Ok(())
    }

    /// Parse and adopt a state from its text form.
    #[instrument(skip(self, text))]
    pub fn load_text(&mut self, text: &str) -> Result<(), LoadError> {
        match GameState::from_json(text) {
            Ok(state) => {
                self.adopt(state);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Invalid game state provided");
                Err(e)
            }
        }
    }

    fn adopt(&mut self, state: GameState) {
        self.state = state;
        self.seed = None;
        self.history.clear();
        self.focus = None;
        self.drag.cancel();
        self.autoplay.cancel();
        if self.state.is_won() {
            self.status = GameStatus::Won;
            self.clock.cancel();
        } else {
            self.status = GameStatus::InProgress;
            if !self.clock.is_armed() {
                self.clock.arm(self.now);
            }
            self.rearm_autoplay();
        }
        info!(moves = self.state.moves, "Game state successfully restored");
    }

    /// Current state as text.
    pub fn export_state(&self) -> Result<String, serde_json::Error> {
        self.state.to_json()
    }

    /// Write the export to `clipboard`, read it back, and load whatever a
    /// different instance may have left there.
    ///
    /// Falls back to logging the export on any failure.
    #[instrument(skip(self, clipboard))]
    pub fn sync_clipboard(&mut self, clipboard: &mut impl Clipboard) -> SyncOutcome {
        let exported = match self.export_state() {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "State export failed");
                return SyncOutcome::Failed;
            }
        };

        let read_back = clipboard
            .write_text(&exported)
            .and_then(|()| clipboard.read_text());

        match read_back {
            Ok(text) if text.is_empty() || text == exported => SyncOutcome::Exported,
            Ok(text) => match self.load_text(&text) {
                Ok(()) => SyncOutcome::Imported,
                Err(_) => {
                    info!(state = %exported, "State");
                    SyncOutcome::Failed
                }
            },
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable");
                info!(state = %exported, "State");
                SyncOutcome::Failed
            }
        }
    }

    // === Interaction ===

    /// Focus a card, highlighting its twin. Replaces any previous focus.
    pub fn focus_card(&mut self, card: Card) -> Focus {
        let focus = Focus {
            card,
            twin: card.twin(),
        };
        self.focus = Some(focus);
        focus
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// Press on a card. Clears focus.
    pub fn pointer_down(&mut self, origin: Source, point: Point) -> bool {
        self.focus = None;
        if self.status == GameStatus::Won {
            return false;
        }
        self.drag.pointer_down(origin, point)
    }

    /// Pointer moved. Returns true if a drag just started.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.drag.pointer_move(&self.state, point)
    }

    /// Pointer released: commit the drop if legal, otherwise cancel.
    #[instrument(skip(self))]
    pub fn pointer_up(&mut self) -> Option<DragOutcome> {
        let release = self.drag.pointer_up(&self.state, &self.targets)?;
        Some(match release {
            DragRelease::Drop(mv) => match self.attempt_move(mv) {
                Ok(()) => DragOutcome::Committed(mv),
                Err(_) => DragOutcome::Cancelled,
            },
            DragRelease::Cancelled => DragOutcome::Cancelled,
            DragRelease::Click(source) => DragOutcome::Click(source),
        })
    }
}

/// Format seconds as `m:ss`.
#[must_use]
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
