//! Puzzle model - piece list, shuffle, swap and completion check.
//!
//! Pieces are stored in id order. A reverse index (`by_slot`) is kept in sync
//! so slot lookups used by hit testing stay O(1).

use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::{PieceId, Slot};

/// The board: `grid_size²` pieces whose current positions form a permutation.
#[derive(Debug, Clone)]
pub struct Puzzle {
    grid_size: u8,
    pieces: Vec<Piece>,
    by_slot: Vec<PieceId>,
    rng: SimpleRng,
    seed: u32,
}

impl Puzzle {
    /// Build a solved board (every piece in its own slot). No shuffle.
    pub fn solved(grid_size: u8, seed: u32) -> Self {
        let grid_size = grid_size.max(1);
        let mut puzzle = Self {
            grid_size,
            pieces: Vec::new(),
            by_slot: Vec::new(),
            rng: SimpleRng::new(seed),
            seed,
        };
        puzzle.reset_pieces();
        puzzle
    }

    /// Build the board and shuffle it.
    pub fn new(grid_size: u8, seed: u32) -> Self {
        let mut puzzle = Self::solved(grid_size, seed);
        puzzle.shuffle();
        puzzle
    }

    /// Rebuild the piece set for the same grid and shuffle it.
    ///
    /// The random stream continues, so a restart does not replay the first
    /// layout.
    pub fn initialize(&mut self) {
        self.reset_pieces();
        self.shuffle();
    }

    fn reset_pieces(&mut self) {
        let count = self.len() as u16;
        self.pieces.clear();
        self.pieces.extend((0..count).map(Piece::new));
        self.by_slot.clear();
        self.by_slot.extend(0..count);
    }

    /// Fisher-Yates over the piece collection, swapping current positions.
    ///
    /// May leave the board solved; that case is not excluded.
    pub fn shuffle(&mut self) {
        for i in (1..self.pieces.len()).rev() {
            let j = self.rng.next_range((i + 1) as u32) as usize;
            self.exchange(i, j);
        }
    }

    /// Exchange the current positions of pieces `a` and `b`.
    ///
    /// Returns `false` without changing anything when either id is unknown.
    /// Swapping a piece with itself is a successful no-op.
    pub fn swap(&mut self, a: PieceId, b: PieceId) -> bool {
        let (a, b) = (a as usize, b as usize);
        if a >= self.pieces.len() || b >= self.pieces.len() {
            return false;
        }
        self.exchange(a, b);
        true
    }

    fn exchange(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let pa = self.pieces[a].current_position;
        let pb = self.pieces[b].current_position;
        self.pieces[a].current_position = pb;
        self.pieces[b].current_position = pa;
        self.by_slot[pb as usize] = a as PieceId;
        self.by_slot[pa as usize] = b as PieceId;
    }

    /// True iff every piece sits in its correct slot.
    pub fn is_complete(&self) -> bool {
        self.pieces.iter().all(Piece::is_in_place)
    }

    pub fn correct_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_in_place()).count()
    }

    pub fn grid_size(&self) -> u8 {
        self.grid_size
    }

    /// Number of pieces (`grid_size²`).
    pub fn len(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Seed the puzzle was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Pieces in id order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id as usize)
    }

    /// Id of the piece currently in `slot`.
    pub fn piece_at(&self, slot: Slot) -> Option<PieceId> {
        self.by_slot.get(slot as usize).copied()
    }

    /// Pieces sorted by current position (render order).
    pub fn ordered(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.by_slot.iter().map(move |&id| &self.pieces[id as usize])
    }

    /// Current positions in id order.
    pub fn positions(&self) -> Vec<Slot> {
        self.pieces.iter().map(Piece::current_position).collect()
    }

    /// Force-assign current positions (`positions[id] = slot`).
    ///
    /// Rejects anything that is not a permutation of `0..N-1`.
    pub fn set_positions(&mut self, positions: &[Slot]) -> bool {
        if positions.len() != self.pieces.len() {
            return false;
        }
        let mut seen = vec![false; positions.len()];
        for &slot in positions {
            match seen.get_mut(slot as usize) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }
        for (id, &slot) in positions.iter().enumerate() {
            self.pieces[id].current_position = slot;
            self.by_slot[slot as usize] = id as PieceId;
        }
        true
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new(crate::types::GRID_SIZE, 1)
    }
}
