//! Board structure and scoped probe placements

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::{Player, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::EngineError;

/// Row-of-cells form used on the wire: `null`, `"black"` or `"white"`.
pub type Rows = Vec<Vec<Option<Player>>>;

/// Game board.
///
/// The only public mutation is [`Board::place_stone`], which moves a cell
/// from Empty to a color. Hypothetical placements go through [`Board::probe`]
/// or [`Board::with_stone`], both of which leave the original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Rows", into = "Rows")]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Get stone at raw coordinates, `None` when off the board
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn get_at(&self, row: i32, col: i32) -> Option<Stone> {
        Pos::is_valid(row, col).then(|| self.get(Pos::new(row as u8, col as u8)))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone for a game move. Fails on an occupied cell.
    pub fn place_stone(&mut self, pos: Pos, player: Player) -> Result<(), EngineError> {
        if !self.is_empty(pos) {
            return Err(EngineError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        self.set(pos, player);
        Ok(())
    }

    /// Place a stone that is removed again when the returned guard drops.
    ///
    /// The guard dereferences to the board with the stone in place, so
    /// probes nest: `board.probe(a, Black).probe(b, White)`.
    #[inline]
    pub fn probe(&mut self, pos: Pos, player: Player) -> Probe<'_> {
        debug_assert!(self.is_empty(pos), "probe on occupied cell {pos:?}");
        self.set(pos, player);
        Probe { board: self, pos }
    }

    /// Copy of the board with one extra stone.
    #[inline]
    #[must_use]
    pub fn with_stone(&self, pos: Pos, player: Player) -> Board {
        let mut copy = *self;
        copy.set(pos, player);
        copy
    }

    #[inline]
    fn set(&mut self, pos: Pos, player: Player) {
        match player {
            Player::Black => self.black.set(pos),
            Player::White => self.white.set(pos),
        }
    }

    #[inline]
    fn clear(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Get bitboard for a color
    #[inline]
    pub fn stones(&self, player: Player) -> &Bitboard {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    /// All occupied cells
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black.union(&self.white)
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.is_empty(pos))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn count(&self, player: Player) -> u32 {
        self.stones(player).count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Player to move inferred from stone counts: White once Black is
    /// ahead, Black otherwise.
    pub fn side_to_move(&self) -> Player {
        if self.count(Player::Black) > self.count(Player::White) {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Rows of cells, `None` for empty
    pub fn to_rows(&self) -> Rows {
        (0..BOARD_SIZE as u8)
            .map(|r| {
                (0..BOARD_SIZE as u8)
                    .map(|c| self.get(Pos::new(r, c)).player())
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Rows> for Board {
    type Error = EngineError;

    fn try_from(rows: Rows) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::RowCount { found: rows.len() });
        }
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(EngineError::RowLength {
                    row: r,
                    found: row.len(),
                });
            }
            for (c, cell) in row.iter().enumerate() {
                if let Some(player) = cell {
                    board.set(Pos::new(r as u8, c as u8), *player);
                }
            }
        }
        Ok(board)
    }
}

impl From<Board> for Rows {
    fn from(board: Board) -> Rows {
        board.to_rows()
    }
}

/// A stone placed by [`Board::probe`]; removed on drop.
pub struct Probe<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl Deref for Probe<'_> {
    type Target = Board;

    #[inline]
    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Probe<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    #[inline]
    fn drop(&mut self) {
        self.board.clear(self.pos);
    }
}
