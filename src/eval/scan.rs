//! Contiguous line scanning through a hypothetical placement
//!
//! Every function here treats `pos` as already holding `player` without
//! touching the board. Only the cells at distance 1 and beyond are read, so
//! the scans are valid whether `pos` is empty or not.

use crate::board::{Axis, Board, Player, Pos, Stone};

/// Contiguous run through a placed stone along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineScan {
    /// Stones in the run, the placed one counted once
    pub length: u8,
    /// Cell past the backward end is on the board and empty
    pub open_start: bool,
    /// Cell past the forward end is on the board and empty
    pub open_end: bool,
}

impl LineScan {
    #[inline]
    pub fn open_ends(&self) -> u8 {
        u8::from(self.open_start) + u8::from(self.open_end)
    }

    #[inline]
    pub fn has_open_end(&self) -> bool {
        self.open_start || self.open_end
    }
}

/// Walk from `pos` along `(dr, dc)`: returns consecutive `stone` cells and
/// whether the first non-matching cell is an empty board cell.
#[inline]
fn walk(board: &Board, pos: Pos, stone: Stone, dr: i32, dc: i32) -> (u8, bool) {
    let mut count = 0u8;
    let mut r = i32::from(pos.row) + dr;
    let mut c = i32::from(pos.col) + dc;
    loop {
        match board.get_at(r, c) {
            Some(s) if s == stone => count += 1,
            Some(Stone::Empty) => return (count, true),
            _ => return (count, false),
        }
        r += dr;
        c += dc;
    }
}

/// Scan the run `player` would have through `pos` along `axis`.
pub fn scan_line(board: &Board, pos: Pos, player: Player, axis: Axis) -> LineScan {
    let stone = player.stone();
    let (dr, dc) = axis.delta();
    let (back, open_start) = walk(board, pos, stone, -dr, -dc);
    let (fwd, open_end) = walk(board, pos, stone, dr, dc);
    LineScan {
        length: 1 + back + fwd,
        open_start,
        open_end,
    }
}

/// Scans for all four axes, in [`Axis::ALL`] order.
pub fn scan_all(board: &Board, pos: Pos, player: Player) -> [LineScan; 4] {
    Axis::ALL.map(|axis| scan_line(board, pos, player, axis))
}

/// Whether placing at `pos` gives `player` five or more in a row.
///
/// ```
/// use gobang::{Board, Player, Pos};
/// use gobang::eval::would_win;
///
/// let mut board = Board::new();
/// for col in 5..9 {
///     board.place_stone(Pos::new(9, col), Player::Black).unwrap();
/// }
/// assert!(would_win(&board, Pos::new(9, 9), Player::Black));
/// assert!(would_win(&board, Pos::new(9, 4), Player::Black));
/// assert!(!would_win(&board, Pos::new(9, 10), Player::Black));
/// ```
pub fn would_win(board: &Board, pos: Pos, player: Player) -> bool {
    Axis::ALL
        .iter()
        .any(|&axis| scan_line(board, pos, player, axis).length >= 5)
}

/// Whether some axis has a run of exactly `length` through `pos`, with at
/// least one open end when `require_open_end` is set.
pub fn has_line_of_length(
    board: &Board,
    pos: Pos,
    player: Player,
    length: u8,
    require_open_end: bool,
) -> bool {
    Axis::ALL.iter().any(|&axis| {
        let scan = scan_line(board, pos, player, axis);
        scan.length == length && (!require_open_end || scan.has_open_end())
    })
}

#[inline]
pub fn forms_open_three(board: &Board, pos: Pos, player: Player) -> bool {
    has_line_of_length(board, pos, player, 3, true)
}

#[inline]
pub fn forms_open_four(board: &Board, pos: Pos, player: Player) -> bool {
    has_line_of_length(board, pos, player, 4, true)
}

#[inline]
pub fn forms_any_four(board: &Board, pos: Pos, player: Player) -> bool {
    has_line_of_length(board, pos, player, 4, false)
}
