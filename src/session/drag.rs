//! Drag session: an input-agnostic state machine for moving cards.
//!
//! ```text
//! Idle --press--> Armed --moved past threshold--> Dragging --release--> Idle
//!                   |                                  |
//!                   +--release (a click)--> Idle       +--> Drop(move) | Cancelled
//! ```
//!
//! While `Dragging`, the session owns the picked-up cards; no other
//! interaction can start until release. Release over a registered drop
//! target yields a `Move` for the controller to validate and commit;
//! anywhere else cancels with no state change.
//!
//! Mouse, touch, or synthetic test input all drive the same three calls:
//! `pointer_down`, `pointer_move`, `pointer_up`.

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameState};
use crate::rules::{pick_up, Run};
use crate::zones::{Move, Source, Zone, ZoneAddress};

/// Pointer position in host coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned hit box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Registered drop zones, hit-tested on release.
///
/// Later registrations sit on top: when boxes overlap, the most recently
/// registered one wins.
#[derive(Clone, Debug, Default)]
pub struct DropTargets {
    targets: Vec<(ZoneAddress, Rect)>,
}

impl DropTargets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) a zone's hit box.
    pub fn register(&mut self, address: ZoneAddress, rect: Rect) {
        self.targets.retain(|(a, _)| *a != address);
        self.targets.push((address, rect));
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Zone under `point`, if any. Addresses that do not name a real zone
    /// are skipped.
    #[must_use]
    pub fn resolve(&self, point: Point) -> Option<Zone> {
        self.targets
            .iter()
            .rev()
            .filter(|(_, rect)| rect.contains(point))
            .find_map(|(address, _)| Zone::from_address(*address))
    }
}

/// Current phase of the drag session.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragPhase {
    /// No pointer held.
    #[default]
    Idle,
    /// Pointer held on a card, not yet moved far enough.
    Armed { origin: Source, start: Point },
    /// Cards picked up and following the pointer.
    Dragging {
        origin: Source,
        cards: Run,
        pointer: Point,
    },
}

/// What a release produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragRelease {
    /// Released over a drop target: a move to validate.
    Drop(Move),
    /// Released over nothing.
    Cancelled,
    /// Released without ever dragging.
    Click(Source),
}

/// Drag state machine.
#[derive(Clone, Debug)]
pub struct DragSession {
    phase: DragPhase,
    threshold: f32,
}

impl DragSession {
    /// Create an idle session with a movement threshold in pixels.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Cards currently owned by the drag.
    #[must_use]
    pub fn dragged_cards(&self) -> Option<&[Card]> {
        match &self.phase {
            DragPhase::Dragging { cards, .. } => Some(cards.as_slice()),
            _ => None,
        }
    }

    /// Press on a card. Ignored unless idle.
    pub fn pointer_down(&mut self, origin: Source, point: Point) -> bool {
        if self.phase != DragPhase::Idle {
            return false;
        }
        self.phase = DragPhase::Armed { origin, start: point };
        true
    }

    /// Pointer moved. Returns true when this call started a drag.
    ///
    /// Crossing the threshold only starts a drag if the pressed cards form
    /// a movable run; otherwise the session stays armed.
    pub fn pointer_move(&mut self, state: &GameState, point: Point) -> bool {
        let origin = match &mut self.phase {
            DragPhase::Idle => return false,
            DragPhase::Dragging { pointer, .. } => {
                *pointer = point;
                return false;
            }
            DragPhase::Armed { origin, start } => {
                let dx = (point.x - start.x).abs();
                let dy = (point.y - start.y).abs();
                if dx <= self.threshold && dy <= self.threshold {
                    return false;
                }
                *origin
            }
        };

        match pick_up(state, origin) {
            Ok(cards) => {
                self.phase = DragPhase::Dragging {
                    origin,
                    cards,
                    pointer: point,
                };
                true
            }
            Err(_) => false,
        }
    }

    /// Pointer released. Returns `None` if nothing was pressed.
    ///
    /// A drop is only produced if `origin` still holds exactly the cards
    /// picked up; if `state` changed under the drag, the drag is cancelled.
    pub fn pointer_up(&mut self, state: &GameState, targets: &DropTargets) -> Option<DragRelease> {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => None,
            DragPhase::Armed { origin, .. } => Some(DragRelease::Click(origin)),
            DragPhase::Dragging {
                origin,
                cards,
                pointer,
            } => {
                if !matches!(pick_up(state, origin), Ok(current) if current == cards) {
                    return Some(DragRelease::Cancelled);
                }
                Some(match targets.resolve(pointer) {
                    Some(to) => DragRelease::Drop(Move::new(origin, to)),
                    None => DragRelease::Cancelled,
                })
            }
        }
    }

    /// Abandon any press or drag.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{card, Suit};
    use crate::zones::ZoneKind;

    fn state() -> GameState {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(9, Suit::Spades));
        state.columns[0].push_back(card(8, Suit::Hearts));
        state.columns[1].push_back(card(4, Suit::Clubs));
        state.columns[1].push_back(card(6, Suit::Hearts));
        state
    }

    fn targets() -> DropTargets {
        let mut targets = DropTargets::new();
        targets.register(ZoneAddress::new(ZoneKind::Column, 2), Rect::new(200.0, 100.0, 80.0, 400.0));
        targets.register(ZoneAddress::new(ZoneKind::Freecell, 0), Rect::new(0.0, 0.0, 80.0, 100.0));
        targets
    }

    #[test]
    fn test_click_without_drag() {
        let mut session = DragSession::new(5.0);
        let origin = Source::Column { index: 0, depth: 1 };
        assert!(session.pointer_down(origin, Point::new(10.0, 10.0)));
        assert!(!session.pointer_move(&state(), Point::new(13.0, 14.0)));
        assert_eq!(session.pointer_up(&state(), &targets()), Some(DragRelease::Click(origin)));
        assert_eq!(session.phase(), &DragPhase::Idle);
    }

    #[test]
    fn test_drag_and_drop() {
        let mut session = DragSession::new(5.0);
        let origin = Source::Column { index: 0, depth: 0 };
        session.pointer_down(origin, Point::new(10.0, 10.0));
        assert!(session.pointer_move(&state(), Point::new(30.0, 10.0)));
        assert!(session.is_dragging());
        assert_eq!(session.dragged_cards().map(<[Card]>::len), Some(2));

        // A second press while dragging is ignored
        assert!(!session.pointer_down(Source::Freecell(0), Point::new(0.0, 0.0)));

        session.pointer_move(&state(), Point::new(240.0, 300.0));
        assert_eq!(
            session.pointer_up(&state(), &targets()),
            Some(DragRelease::Drop(Move::from_column(0, 0, Zone::Column(2))))
        );
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_drop_outside_targets_cancels() {
        let mut session = DragSession::new(5.0);
        session.pointer_down(Source::Column { index: 0, depth: 1 }, Point::new(10.0, 10.0));
        session.pointer_move(&state(), Point::new(900.0, 900.0));
        assert_eq!(session.pointer_up(&state(), &targets()), Some(DragRelease::Cancelled));
    }

    #[test]
    fn test_invalid_run_does_not_start_drag() {
        let mut session = DragSession::new(5.0);
        session.pointer_down(Source::Column { index: 1, depth: 0 }, Point::new(10.0, 10.0));
        assert!(!session.pointer_move(&state(), Point::new(50.0, 50.0)));
        assert!(matches!(session.phase(), DragPhase::Armed { .. }));
    }

    #[test]
    fn test_state_change_under_drag_cancels() {
        let mut session = DragSession::new(5.0);
        let origin = Source::Column { index: 0, depth: 0 };
        session.pointer_down(origin, Point::new(10.0, 10.0));
        assert!(session.pointer_move(&state(), Point::new(30.0, 10.0)));

        // The top card of the held run left the column mid-drag
        let mut changed = state();
        changed.columns[0].pop_back();
        session.pointer_move(&changed, Point::new(240.0, 300.0));

        assert_eq!(session.pointer_up(&changed, &targets()), Some(DragRelease::Cancelled));
        assert_eq!(session.phase(), &DragPhase::Idle);
    }

    #[test]
    fn test_release_when_idle() {
        let mut session = DragSession::new(5.0);
        assert_eq!(session.pointer_up(&state(), &targets()), None);
    }

    #[test]
    fn test_topmost_target_wins() {
        let mut targets = DropTargets::new();
        targets.register(ZoneAddress::new(ZoneKind::Column, 0), Rect::new(0.0, 0.0, 100.0, 100.0));
        targets.register(ZoneAddress::new(ZoneKind::Freecell, 1), Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(targets.resolve(Point::new(10.0, 10.0)), Some(Zone::Freecell(1)));
        assert_eq!(targets.resolve(Point::new(80.0, 80.0)), Some(Zone::Column(0)));
        assert_eq!(targets.resolve(Point::new(180.0, 80.0)), None);
    }

    #[test]
    fn test_invalid_address_is_skipped() {
        let mut targets = DropTargets::new();
        targets.register(ZoneAddress::new(ZoneKind::Column, 0), Rect::new(0.0, 0.0, 100.0, 100.0));
        targets.register(ZoneAddress::new(ZoneKind::Column, 42), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(targets.resolve(Point::new(10.0, 10.0)), Some(Zone::Column(0)));
    }

    #[test]
    fn test_reregister_replaces() {
        let mut targets = DropTargets::new();
        let address = ZoneAddress::new(ZoneKind::Column, 3);
        targets.register(address, Rect::new(0.0, 0.0, 10.0, 10.0));
        targets.register(address, Rect::new(100.0, 0.0, 10.0, 10.0));
        assert_eq!(targets.len(), 1);
        assert_eq!(targets.resolve(Point::new(5.0, 5.0)), None);
    }
}
