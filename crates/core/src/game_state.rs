//! Game state module - the per-frame state machine
//!
//! [`GameState::step`] is the only way the game advances. Each call consumes at most
//! one input and runs, in order: entry delay and spawn, floor budget refresh, input
//! dispatch, lock-down countdown, gravity, then line clearing for any lock that
//! happened during the frame.

use crate::field::Field;
use crate::piece::Piece;
use crate::pieces::try_rotate;
use crate::rng::Bag;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_score};
use crate::snapshot::GameSnapshot;
use crate::types::{CoreLastEvent, Flow, GameAction, PieceKind, Timing, Vec2, FLOOR_MOVES};

/// A lock that still needs its line clear resolved this frame.
#[derive(Debug, Clone, Copy)]
struct PendingLock {
    kind: PieceKind,
    hard_drop_cells: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    field: Field,
    bag: Bag,
    /// `None` while the entry delay runs
    active: Option<Piece>,
    next: Piece,
    held: Option<Piece>,
    score: u32,
    lines_cleared: u32,
    level: u8,
    /// -1 means no chain
    combo: i8,
    swapped_this_turn: bool,
    gravity_timer: u16,
    floor_timer: u16,
    floor_move_counter: u8,
    entry_delay: u16,
    gravity_just_acted: bool,
    paused: bool,
    game_over: bool,
    display_cell_size: Vec2,
    timing: Timing,
    pending_lock: Option<PendingLock>,
    /// Last lock event (consumed by the host)
    last_event: Option<CoreLastEvent>,
}

impl GameState {
    /// Create a new game and spawn its first piece.
    pub fn new(seed: u32, timing: Timing, display_cell_size: Vec2) -> Self {
        Self::with_bag(Bag::new(seed), timing, display_cell_size)
    }

    /// Create a new game drawing from an existing bag.
    ///
    /// Only the active and next pieces are drawn; the hold slot starts empty
    /// without consuming a draw, so every bag begins at a spawn.
    pub fn with_bag(mut bag: Bag, timing: Timing, display_cell_size: Vec2) -> Self {
        let next = Piece::new(bag.draw(), display_cell_size);
        let mut state = Self {
            field: Field::new(),
            bag,
            active: None,
            next,
            held: None,
            score: 0,
            lines_cleared: 0,
            level: 1,
            combo: -1,
            swapped_this_turn: false,
            gravity_timer: 0,
            floor_timer: 0,
            floor_move_counter: 0,
            entry_delay: 0,
            gravity_just_acted: false,
            paused: false,
            game_over: false,
            display_cell_size,
            timing,
            pending_lock: None,
            last_event: None,
        };
        // The field is empty, so the first spawn always fits.
        state.spawn();
        state
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn combo(&self) -> i8 {
        self.combo
    }

    pub fn entry_delay(&self) -> u16 {
        self.entry_delay
    }

    pub fn floor_timer(&self) -> u16 {
        self.floor_timer
    }

    pub fn floor_move_counter(&self) -> u8 {
        self.floor_move_counter
    }

    pub fn gravity_timer(&self) -> u16 {
        self.gravity_timer
    }

    pub fn swapped_this_turn(&self) -> bool {
        self.swapped_this_turn
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Paused state is owned by the host's pause loop; `step` never toggles it.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn display_cell_size(&self) -> Vec2 {
        self.display_cell_size
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Whether the active piece rests on the floor or the stack.
    pub fn on_floor(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| !self.field.fits(piece, Vec2::DOWN))
    }

    /// The active piece moved to where a hard drop would put it.
    pub fn ghost(&self) -> Option<Piece> {
        self.active.map(|mut piece| {
            let distance = self.field.drop_distance(&piece);
            piece.translate(Vec2::new(distance, 0));
            piece
        })
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    /// Advance the game by one frame.
    ///
    /// Returns [`Flow::Stop`] on quit or when the next piece cannot spawn.
    pub fn step(&mut self, input: Option<GameAction>) -> Flow {
        if self.game_over || input == Some(GameAction::Quit) {
            return Flow::Stop;
        }

        if self.entry_delay > 0 {
            self.entry_delay -= 1;
            if self.entry_delay > 0 {
                return Flow::Continue;
            }
            if !self.spawn() {
                return Flow::Stop;
            }
        }

        if self.active.is_none() {
            return Flow::Continue;
        }

        if !self.on_floor() {
            self.reset_floor_budget();
        }

        if let Some(action) = input {
            self.apply_action(action);
        }

        if self.active.is_some() && self.on_floor() {
            if self.gravity_just_acted {
                self.floor_timer = self.timing.lock_frames();
            }
            self.floor_timer = self.floor_timer.saturating_sub(1);
            if self.floor_timer == 0 {
                self.lock_piece(0);
            }
        }

        if self.active.is_some() {
            self.apply_gravity();
        }

        if let Some(pending) = self.pending_lock.take() {
            self.resolve_lock(pending);
        }

        Flow::Continue
    }

    /// Dispatch one input to the active piece.
    ///
    /// `Pause` and `Quit` are handled by the host and `step` respectively.
    fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => {
                self.shift(Vec2::LEFT);
            }
            GameAction::MoveRight => {
                self.shift(Vec2::RIGHT);
            }
            GameAction::RotateCw => {
                self.rotate(true);
            }
            GameAction::RotateCcw => {
                self.rotate(false);
            }
            GameAction::Hold => {
                self.hold();
            }
            GameAction::HardDrop => self.hard_drop(),
            GameAction::SoftDrop => {
                self.soft_drop();
            }
            GameAction::Pause | GameAction::Quit => {}
        }
    }

    /// Move the active piece by `offset` if the result fits.
    pub fn try_move(&mut self, offset: Vec2) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !self.field.fits(active, offset) {
            return false;
        }
        active.translate(offset);
        true
    }

    /// Horizontal move; a success while grounded spends one floor reset.
    fn shift(&mut self, dir: Vec2) -> bool {
        let grounded = self.on_floor();
        let moved = self.try_move(dir);
        if moved && grounded {
            self.grant_floor_reset();
        }
        moved
    }

    /// Rotate with wall kicks; a success while grounded spends one floor reset.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let grounded = self.on_floor();

        let turned = active.rotated(clockwise);
        let field = &self.field;
        let Some((_, offset)) = try_rotate(active.kind(), active.orientation(), clockwise, |offset| {
            field.fits(&turned, offset)
        }) else {
            return false;
        };

        let mut rotated = turned;
        rotated.translate(offset);
        self.active = Some(rotated);

        if grounded {
            self.grant_floor_reset();
        }
        true
    }

    /// Swap the active piece with the held one, at most once per piece.
    pub fn hold(&mut self) -> bool {
        if self.swapped_this_turn {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let mut incoming = self.held.unwrap_or(self.next);
        incoming.set_position(active.position());
        if !self.field.fits(&incoming, Vec2::ZERO) {
            return false;
        }

        if self.held.is_none() {
            self.next = Piece::new(self.bag.draw(), self.display_cell_size);
        }

        let mut outgoing = active;
        outgoing.reset_to_spawn();
        self.held = Some(outgoing);
        self.active = Some(incoming);
        self.swapped_this_turn = true;
        self.reset_floor_budget();
        true
    }

    fn soft_drop(&mut self) -> bool {
        if !self.try_move(Vec2::DOWN) {
            return false;
        }
        self.score = self.score.saturating_add(calculate_drop_score(1, false));
        self.gravity_just_acted = true;
        true
    }

    fn hard_drop(&mut self) {
        let mut cells = 0u32;
        while self.try_move(Vec2::DOWN) {
            cells += 1;
        }
        self.score = self.score.saturating_add(calculate_drop_score(cells, true));
        self.lock_piece(cells);
    }

    fn apply_gravity(&mut self) {
        self.gravity_timer = self.gravity_timer.saturating_sub(1);
        if self.gravity_timer > 0 {
            self.gravity_just_acted = false;
            return;
        }

        self.gravity_timer = self.timing.gravity_frames(self.level);
        self.gravity_just_acted = true;
        if !self.try_move(Vec2::DOWN) {
            self.lock_piece(0);
        }
    }

    fn reset_floor_budget(&mut self) {
        self.floor_timer = self.timing.lock_frames();
        self.floor_move_counter = FLOOR_MOVES;
    }

    fn grant_floor_reset(&mut self) {
        if self.floor_move_counter > 0 {
            self.floor_move_counter -= 1;
            self.floor_timer = self.timing.lock_frames();
        }
    }

    /// Promote the next piece and draw a new one. Returns false on top-out.
    fn spawn(&mut self) -> bool {
        let mut piece = self.next;
        piece.reset_to_spawn();
        self.next = Piece::new(self.bag.draw(), self.display_cell_size);
        self.swapped_this_turn = false;
        self.gravity_just_acted = false;
        self.gravity_timer = self.timing.gravity_frames(self.level);
        self.reset_floor_budget();

        if !self.field.fits(&piece, Vec2::ZERO) {
            self.game_over = true;
            self.active = None;
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Write the active piece into the field and start the entry delay.
    fn lock_piece(&mut self, hard_drop_cells: u32) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.field.lock(&active);
        self.entry_delay = self.timing.entry_delay_frames();
        self.pending_lock = Some(PendingLock {
            kind: active.kind(),
            hard_drop_cells,
        });
    }

    /// Clear lines for a lock and update score, combo and level.
    fn resolve_lock(&mut self, pending: PendingLock) {
        let cleared = self.field.clear_full_rows();
        let lines = cleared.len();

        let mut perfect_clear = false;
        let mut score_gained = 0;
        if lines > 0 {
            self.combo = self.combo.saturating_add(1);
            perfect_clear = self.field.is_perfect_clear();
            let result = calculate_score(lines, self.level, self.combo, perfect_clear);
            score_gained = result.total;
            self.score = self.score.saturating_add(result.total);
            self.lines_cleared = self.lines_cleared.saturating_add(lines as u32);
            self.level = calculate_level(self.lines_cleared);
        } else {
            self.combo = -1;
        }

        self.last_event = Some(CoreLastEvent {
            kind: pending.kind,
            lines_cleared: lines as u32,
            score_gained,
            perfect_clear,
            combo: self.combo,
            level: self.level,
            hard_drop_cells: pending.hard_drop_cells,
        });
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.field = *self.field.rows();
        out.active = self.active;
        out.ghost = self.ghost();
        out.held = self.held;
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines_cleared;
        out.combo = self.combo;
        out.floor_timer = self.floor_timer;
        out.grounded = self.on_floor();
        out.entry_delay = self.entry_delay;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.display_cell_size = self.display_cell_size;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, Timing::default(), Vec2::new(1, 2))
    }
}
