//! Game state: playfield, containers, movement, landing slides, line clear.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Grid width in cells, border columns included.
pub const GRID_WIDTH: usize = 12;
/// Grid height in cells, border floor included.
pub const GRID_HEIGHT: usize = 20;
/// Side of the square scaffold a piece is generated in.
pub const PIECE_SIZE: usize = 4;
/// Column the piece scaffold is anchored at on spawn.
pub const SPAWN_COLUMN: usize = (GRID_WIDTH - PIECE_SIZE) / 2;

/// Playable columns; column 0 and GRID_WIDTH - 1 are border.
pub const INTERIOR_COLUMNS: Range<usize> = 1..GRID_WIDTH - 1;
const INTERIOR_WIDTH: usize = GRID_WIDTH - 2;
/// Lowest row a container can rest on; the row below it is border.
pub const FLOOR_ROW: usize = GRID_HEIGHT - 2;
/// A settled container in any of these top rows ends the game at once.
const DANGER_ROWS: usize = 2;

/// Frames between lateral steps while a direction is held.
pub const LATERAL_SPEED: u32 = 15;
/// Frames between turn attempts. Turning never changes anything.
pub const TURNING_SPEED: u32 = 12;
/// Frames after a spawn before holding down speeds the fall up.
pub const FAST_FALL_AWAIT: u32 = 30;
/// Frames a completed row blinks before it is removed.
pub const FADING_TIME: u32 = 33;
const FADE_BLINK_PERIOD: u32 = 8;
pub const INITIAL_GRAVITY_SPEED: u32 = 15;
pub const MIN_GRAVITY_SPEED: u32 = 4;
/// Frames between a same-colour contact and the end of the game.
pub const GAME_OVER_COUNTDOWN: u32 = 120;
const GAME_OVER_PENALTY: i64 = 200;
const CLEAR_BASE_SCORE: i64 = 56;
const CLEAR_LINE_SCORE: i64 = 98;

/// Container colours. Two equal colours touching is what ends a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasteColor {
    Red,
    Blue,
    Yellow,
}

impl WasteColor {
    pub const ALL: [Self; 3] = [Self::Red, Self::Blue, Self::Yellow];

    /// Index into the theme palette.
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Blue => 1,
            Self::Yellow => 2,
        }
    }
}

/// State of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Part of the falling piece.
    Moving,
    /// Settled container.
    Full,
    /// Border; never changes.
    Block,
    /// Row completed, waiting to be removed.
    Fading,
}

/// Left or right; used for lateral moves and for diagonal slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Column next to `x` on this side. Only called on interior columns, so
    /// the result is at worst a border column.
    const fn step(self, x: usize) -> usize {
        match self {
            Self::Left => x - 1,
            Self::Right => x + 1,
        }
    }

    const fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Where a landed container came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub x: usize,
    pub y: usize,
    pub color: WasteColor,
    /// Diagonal taken after touching down, if any.
    pub slide: Option<Side>,
    pub steps: u32,
}

/// The board: cell states plus the colour recorded for each cell.
///
/// `cells[y][x]`, y = 0 is the top row. The border ring (column 0, column
/// GRID_WIDTH - 1, row GRID_HEIGHT - 1) is written once by `new` and never
/// again; every mutation below walks interior indices only, which is also
/// what keeps neighbour probes in bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    cells: [[Cell; GRID_WIDTH]; GRID_HEIGHT],
    /// Last colour written to each slot. Stale where the cell is not a container.
    colors: [[Option<WasteColor>; GRID_WIDTH]; GRID_HEIGHT],
}

impl Playfield {
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; GRID_WIDTH]; GRID_HEIGHT];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if y == GRID_HEIGHT - 1 || x == 0 || x == GRID_WIDTH - 1 {
                    *cell = Cell::Block;
                }
            }
        }
        Self {
            cells,
            colors: [[None; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Recorded colour of a slot; meaningful for `Full` and `Fading` cells.
    #[inline]
    pub fn color(&self, x: usize, y: usize) -> Option<WasteColor> {
        self.colors.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    fn put_full(&mut self, x: usize, y: usize, color: WasteColor) {
        self.cells[y][x] = Cell::Full;
        self.colors[y][x] = Some(color);
    }

    /// Moving cells, bottom row first.
    pub fn moving_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in (0..=FLOOR_ROW).rev() {
            for x in INTERIOR_COLUMNS {
                if self.cells[y][x] == Cell::Moving {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Writes the piece's moving cells at its anchor. Refuses, leaving the
    /// grid untouched, if any target is off the interior or not empty.
    pub fn project(&mut self, piece: &ActivePiece) -> bool {
        let Some(targets) = piece.cell_positions().collect::<Option<Vec<_>>>() else {
            return false;
        };
        if targets
            .iter()
            .any(|&(x, y)| self.get(x, y) != Some(Cell::Empty))
        {
            return false;
        }
        for (x, y) in targets {
            self.cells[y][x] = Cell::Moving;
        }
        true
    }

    /// True if any moving cell has a container or the floor directly below it.
    pub fn landing_contact(&self) -> bool {
        self.moving_cells()
            .into_iter()
            .any(|(x, y)| matches!(self.cells[y + 1][x], Cell::Full | Cell::Block))
    }

    /// Moves every moving cell down one row. Caller checks `landing_contact` first.
    pub fn shift_moving_down(&mut self) {
        // Bottom-up, so a cell never lands on one that has not moved yet.
        for (x, y) in self.moving_cells() {
            self.cells[y + 1][x] = Cell::Moving;
            self.cells[y][x] = Cell::Empty;
        }
    }

    /// Moves the falling piece one column. Returns false, changing nothing,
    /// when a border or a container is in the way.
    pub fn shift_moving(&mut self, side: Side) -> bool {
        let moving = self.moving_cells();
        let blocked = moving
            .iter()
            .any(|&(x, y)| matches!(self.cells[y][side.step(x)], Cell::Full | Cell::Block));
        if blocked {
            return false;
        }
        for &(x, y) in &moving {
            self.cells[y][x] = Cell::Empty;
        }
        for &(x, y) in &moving {
            self.cells[y][side.step(x)] = Cell::Moving;
        }
        true
    }

    /// Settles the moving cell at `(x, y)` and lets it run down a diagonal.
    ///
    /// Both diagonals are looked at once, before anything moves; down-left
    /// wins when both are open. The slide continues while the next cell on
    /// the same diagonal is empty; the floor and the side walls stop it.
    pub fn settle(&mut self, x: usize, y: usize, color: WasteColor) -> Landing {
        self.put_full(x, y, color);
        let slide = if self.cells[y + 1][x - 1] == Cell::Empty {
            Some(Side::Left)
        } else if self.cells[y + 1][x + 1] == Cell::Empty {
            Some(Side::Right)
        } else {
            None
        };

        let (mut cx, mut cy, mut steps) = (x, y, 0);
        if let Some(side) = slide {
            loop {
                let (nx, ny) = (side.step(cx), cy + 1);
                if self.cells[ny][nx] != Cell::Empty {
                    break;
                }
                self.cells[cy][cx] = Cell::Empty;
                self.put_full(nx, ny, color);
                (cx, cy) = (nx, ny);
                steps += 1;
            }
        }
        Landing {
            x: cx,
            y: cy,
            color,
            slide,
            steps,
        }
    }

    /// True if an orthogonal neighbour of `(x, y)` is a container of `color`.
    pub fn has_matching_neighbour(&self, x: usize, y: usize, color: WasteColor) -> bool {
        let above = y.checked_sub(1).map(|ay| (x, ay));
        [Some((x - 1, y)), Some((x + 1, y)), above, Some((x, y + 1))]
            .into_iter()
            .flatten()
            .any(|(nx, ny)| self.cells[ny][nx] == Cell::Full && self.colors[ny][nx] == Some(color))
    }

    /// Marks every completely filled row as fading. Returns how many were marked.
    pub fn mark_full_rows(&mut self) -> usize {
        let mut marked = 0;
        for y in 0..=FLOOR_ROW {
            let full = INTERIOR_COLUMNS
                .filter(|&x| self.cells[y][x] == Cell::Full)
                .count();
            if full == INTERIOR_WIDTH {
                for x in INTERIOR_COLUMNS {
                    self.cells[y][x] = Cell::Fading;
                }
                marked += 1;
            }
        }
        marked
    }

    /// Removes fading rows, dropping everything above each one by a row.
    ///
    /// Rows are marked whole, so the first interior cell stands for the row.
    /// A row is re-checked after each collapse since a fading row above may
    /// have dropped into it. With `carry_colors` false the colour map stays
    /// put and shifted containers take the colour last recorded at their new
    /// slot (their own if the slot never held one).
    pub fn clear_fading_rows(&mut self, carry_colors: bool) -> u32 {
        let mut cleared = 0;
        for y in (0..=FLOOR_ROW).rev() {
            while self.cells[y][INTERIOR_COLUMNS.start] == Cell::Fading {
                self.collapse_onto(y, carry_colors);
                cleared += 1;
            }
        }
        cleared
    }

    fn collapse_onto(&mut self, y: usize, carry_colors: bool) {
        for x in INTERIOR_COLUMNS {
            self.cells[y][x] = Cell::Empty;
        }
        for row in (0..y).rev() {
            for x in INTERIOR_COLUMNS {
                let cell = self.cells[row][x];
                if !matches!(cell, Cell::Full | Cell::Fading) {
                    continue;
                }
                self.cells[row + 1][x] = cell;
                self.cells[row][x] = Cell::Empty;
                if carry_colors || self.colors[row + 1][x].is_none() {
                    self.colors[row + 1][x] = self.colors[row][x];
                }
            }
        }
    }

    /// A settled container sits in one of the top rows.
    pub fn danger_zone_occupied(&self) -> bool {
        self.cells[..DANGER_ROWS]
            .iter()
            .any(|row| row[INTERIOR_COLUMNS].contains(&Cell::Full))
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece: a 4x4 scaffold holding one moving cell, and its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    cells: [[Cell; PIECE_SIZE]; PIECE_SIZE],
    pub color: WasteColor,
}

impl Piece {
    /// Scaffold with a single moving cell at `(x, y)`; both must be below PIECE_SIZE.
    pub fn single(x: usize, y: usize, color: WasteColor) -> Self {
        let mut cells = [[Cell::Empty; PIECE_SIZE]; PIECE_SIZE];
        cells[y][x] = Cell::Moving;
        Self { cells, color }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    /// Offsets of the moving cells inside the scaffold.
    pub fn moving_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell == Cell::Moving)
                .map(move |(x, _)| (x, y))
        })
    }
}

/// The falling piece and where its scaffold is anchored on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Piece,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    pub const fn spawn(shape: Piece) -> Self {
        Self {
            shape,
            x: SPAWN_COLUMN as i32,
            y: 0,
        }
    }

    /// Grid positions of the moving cells; `None` for one left of or above the grid.
    fn cell_positions(&self) -> impl Iterator<Item = Option<(usize, usize)>> + '_ {
        self.shape.moving_offsets().map(|(dx, dy)| {
            let x = usize::try_from(self.x + dx as i32).ok()?;
            let y = usize::try_from(self.y + dy as i32).ok()?;
            Some((x, y))
        })
    }
}

/// Random single-cell pieces in one of three colours.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
}

impl PieceGenerator {
    /// Seeded generators repeat the same sequence; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { rng }
    }

    pub fn next_piece(&mut self) -> Piece {
        let x = self.rng.gen_range(0..PIECE_SIZE);
        let y = self.rng.gen_range(0..PIECE_SIZE);
        let color = WasteColor::ALL[self.rng.gen_range(0..WasteColor::ALL.len())];
        Piece::single(x, y, color)
    }
}

/// What the simulation is doing between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Next frame spawns the incoming piece.
    NoActivePiece,
    PieceFalling(ActivePiece),
    /// Completed rows are blinking; removed once `fade_ticks` reaches FADING_TIME.
    LineClearing { fade_ticks: u32 },
}

impl Phase {
    /// Fading rows are shown lit for four frames, then dim for four.
    pub fn fade_lit(&self) -> bool {
        matches!(self, Self::LineClearing { fade_ticks }
            if fade_ticks % FADE_BLINK_PERIOD < FADE_BLINK_PERIOD / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Two containers of one colour touched and the countdown ran out.
    AdjacentMatch,
    /// A container settled in the top rows.
    Overflow,
    /// The next piece had nowhere to appear.
    BlockedSpawn,
}

/// Game-over status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Doom {
    Safe,
    /// A same-colour contact happened; play goes on until the countdown ends.
    Armed { ticks_left: u32 },
    Over(GameOverCause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Shown, never advanced.
    pub level: u32,
    pub lines: u32,
    /// Signed: the game-over penalty can take it below zero.
    pub score: i64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            level: 1,
            lines: 0,
            score: 0,
        }
    }
}

/// Frame counts since each kind of action last fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counters {
    gravity: u32,
    lateral: u32,
    turn: u32,
    fast_fall: u32,
}

/// Input sampled for one frame: press edges since the last frame plus keys held now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub up_pressed: bool,
    pub left_held: bool,
    pub right_held: bool,
    pub down_held: bool,
}

impl TickInput {
    /// Requested lateral direction; left wins if both are down.
    pub const fn lateral(&self) -> Option<Side> {
        if self.left_held || self.left_pressed {
            Some(Side::Left)
        } else if self.right_held || self.right_pressed {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LateralOutcome {
    Moved(Side),
    /// A wall or container was in the way; nothing changed.
    Blocked(Side),
    /// No direction held.
    Idle,
}

/// Everything that happened during one frame.
///
/// The frame loop reads game state directly; the report is what tests
/// assert on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: bool,
    pub landing: Option<Landing>,
    pub lateral: Option<LateralOutcome>,
    pub rows_marked: usize,
    pub rows_cleared: u32,
    pub armed: bool,
    pub game_over: Option<GameOverCause>,
}

/// Game state: playfield, falling piece, preview, score, counters.
#[derive(Debug, Clone)]
pub struct GameState {
    pub playfield: Playfield,
    pub phase: Phase,
    /// Preview of the piece that spawns next.
    pub incoming: Piece,
    generator: PieceGenerator,
    pub stats: Stats,
    counters: Counters,
    /// Frames per automatic drop.
    pub gravity_speed: u32,
    pub doom: Doom,
    pub paused: bool,
    mutate_on_clear: bool,
}

impl GameState {
    pub fn new(config: &crate::GameConfig) -> Self {
        let mut generator = PieceGenerator::new(config.seed);
        // The first spawn consumes this one and draws another, so the
        // preview is populated before play starts.
        let incoming = generator.next_piece();
        Self {
            playfield: Playfield::new(),
            phase: Phase::NoActivePiece,
            incoming,
            generator,
            stats: Stats::default(),
            counters: Counters::default(),
            gravity_speed: INITIAL_GRAVITY_SPEED,
            doom: Doom::Safe,
            paused: false,
            mutate_on_clear: config.mutate_on_clear,
        }
    }

    pub const fn is_over(&self) -> bool {
        matches!(self.doom, Doom::Over(_))
    }

    pub const fn game_over_cause(&self) -> Option<GameOverCause> {
        match self.doom {
            Doom::Over(cause) => Some(cause),
            _ => None,
        }
    }

    /// Frames left before an armed game over fires.
    pub const fn countdown(&self) -> Option<u32> {
        match self.doom {
            Doom::Armed { ticks_left } => Some(ticks_left),
            _ => None,
        }
    }

    pub const fn active_piece(&self) -> Option<&ActivePiece> {
        match &self.phase {
            Phase::PieceFalling(piece) => Some(piece),
            _ => None,
        }
    }

    /// Display colour of a cell: the piece colour for moving cells, the
    /// recorded colour for containers.
    pub fn cell_color(&self, x: usize, y: usize) -> Option<WasteColor> {
        match self.playfield.get(x, y)? {
            Cell::Moving => self.active_piece().map(|p| p.shape.color),
            Cell::Full | Cell::Fading => self.playfield.color(x, y),
            Cell::Empty | Cell::Block => None,
        }
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() || self.paused {
            return report;
        }

        if let Doom::Armed { ticks_left } = self.doom {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 {
                self.finish(GameOverCause::AdjacentMatch, &mut report);
                return report;
            }
            self.doom = Doom::Armed { ticks_left };
        }

        if self.playfield.danger_zone_occupied() {
            self.finish(GameOverCause::Overflow, &mut report);
            return report;
        }

        match self.phase {
            Phase::NoActivePiece => self.spawn(&mut report),
            Phase::PieceFalling(piece) => self.advance_piece(piece, input, &mut report),
            Phase::LineClearing { fade_ticks } => self.advance_fade(fade_ticks + 1, &mut report),
        }
        report
    }

    fn finish(&mut self, cause: GameOverCause, report: &mut TickReport) {
        self.doom = Doom::Over(cause);
        report.game_over = Some(cause);
    }

    fn spawn(&mut self, report: &mut TickReport) {
        let shape = std::mem::replace(&mut self.incoming, self.generator.next_piece());
        let piece = ActivePiece::spawn(shape);
        self.counters.fast_fall = 0;
        if self.playfield.project(&piece) {
            self.phase = Phase::PieceFalling(piece);
            report.spawned = true;
        } else {
            self.finish(GameOverCause::BlockedSpawn, report);
        }
    }

    fn advance_piece(&mut self, mut piece: ActivePiece, input: &TickInput, report: &mut TickReport) {
        let counters = &mut self.counters;
        counters.fast_fall += 1;
        counters.gravity += 1;
        counters.lateral += 1;
        counters.turn += 1;

        if input.left_pressed || input.right_pressed {
            counters.lateral = LATERAL_SPEED;
        }
        if input.up_pressed {
            counters.turn = TURNING_SPEED;
        }
        if input.down_held && counters.fast_fall >= FAST_FALL_AWAIT {
            counters.gravity += self.gravity_speed;
        }

        if self.counters.gravity >= self.gravity_speed {
            self.counters.gravity = 0;
            if self.playfield.landing_contact() {
                self.land(piece.shape.color, report);
                self.phase = Phase::NoActivePiece;
                // A held direction must not carry over to the next piece.
                self.counters.lateral = 0;
            } else {
                self.playfield.shift_moving_down();
                piece.y += 1;
            }
            self.check_completion(report);
            if !matches!(self.phase, Phase::PieceFalling(_)) {
                return;
            }
        }

        if self.counters.lateral >= LATERAL_SPEED {
            let outcome = match input.lateral() {
                Some(side) if self.playfield.shift_moving(side) => {
                    piece.x += side.dx();
                    LateralOutcome::Moved(side)
                }
                Some(side) => LateralOutcome::Blocked(side),
                None => LateralOutcome::Idle,
            };
            // Left at the threshold when blocked, so a held key keeps retrying.
            if !matches!(outcome, LateralOutcome::Blocked(_)) {
                self.counters.lateral = 0;
            }
            report.lateral = Some(outcome);
        }

        if self.counters.turn >= TURNING_SPEED && self.resolve_turn() {
            self.counters.turn = 0;
        }

        self.phase = Phase::PieceFalling(piece);
    }

    /// Single-cell pieces have nothing to rotate.
    const fn resolve_turn(&self) -> bool {
        false
    }

    fn land(&mut self, color: WasteColor, report: &mut TickReport) {
        for (x, y) in self.playfield.moving_cells() {
            self.stats.score += landing_score(self.stats.lines);
            let landing = self.playfield.settle(x, y, color);
            self.stats.score += i64::from(landing.steps);
            if self
                .playfield
                .has_matching_neighbour(landing.x, landing.y, color)
            {
                self.arm_game_over(report);
            }
            report.landing = Some(landing);
        }
    }

    fn arm_game_over(&mut self, report: &mut TickReport) {
        if self.doom != Doom::Safe {
            return;
        }
        self.doom = Doom::Armed {
            ticks_left: GAME_OVER_COUNTDOWN,
        };
        self.stats.score -= GAME_OVER_PENALTY;
        report.armed = true;
    }

    fn check_completion(&mut self, report: &mut TickReport) {
        let marked = self.playfield.mark_full_rows();
        if marked > 0 {
            report.rows_marked = marked;
            self.phase = Phase::LineClearing { fade_ticks: 0 };
        }
    }

    fn advance_fade(&mut self, fade_ticks: u32, report: &mut TickReport) {
        if fade_ticks < FADING_TIME {
            self.phase = Phase::LineClearing { fade_ticks };
            return;
        }
        let cleared = self.playfield.clear_fading_rows(!self.mutate_on_clear);
        if cleared > 0 {
            self.stats.lines += cleared;
            self.stats.score += CLEAR_BASE_SCORE + i64::from(self.stats.lines) * CLEAR_LINE_SCORE;
            self.gravity_speed = self
                .gravity_speed
                .saturating_sub(cleared)
                .max(MIN_GRAVITY_SPEED);
        }
        report.rows_cleared = cleared;
        self.phase = Phase::NoActivePiece;
    }
}

/// Points for setting a container down; largest with few lines cleared.
fn landing_score(lines: u32) -> i64 {
    1 + (19 - (2 * i64::from(lines) + 1)).abs() / 4
}

#[cfg(test)]
impl Playfield {
    fn fill(&mut self, x: usize, y: usize, color: WasteColor) {
        assert!(INTERIOR_COLUMNS.contains(&x) && y <= FLOOR_ROW);
        self.put_full(x, y, color);
    }

    fn border_intact(&self) -> bool {
        (0..GRID_HEIGHT).all(|y| self.cells[y][0] == Cell::Block && self.cells[y][GRID_WIDTH - 1] == Cell::Block)
            && self.cells[GRID_HEIGHT - 1].iter().all(|c| *c == Cell::Block)
    }
}
