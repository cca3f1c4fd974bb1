//! Forbidden move rules for Black
//!
//! Three independent restrictions, each switchable through [`ForbiddenRules`]:
//! - Overline: six or more Black stones in a row.
//! - Double-four: the move makes a four on two or more axes.
//! - Double-three: the move makes an open three on two or more axes.
//!
//! Shapes are matched with fixed windows over the 11 cells centred on the
//! move. This follows the usual Renju shapes closely but is not a full Renju
//! referee: it does not look ahead to decide whether a three can really
//! become a straight four.
//!
//! A move that completes exactly five is never forbidden by the double
//! rules; five wins first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Axis, Board, Player, Pos, Stone};

/// Which forbidden rules are active. White is never restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForbiddenRules {
    pub overline: bool,
    pub double_four: bool,
    pub double_three: bool,
}

impl ForbiddenRules {
    /// Free-style Gobang: nothing forbidden
    pub const NONE: ForbiddenRules = ForbiddenRules {
        overline: false,
        double_four: false,
        double_three: false,
    };

    /// All three restrictions on
    pub const RENJU: ForbiddenRules = ForbiddenRules {
        overline: true,
        double_four: true,
        double_three: true,
    };

    #[inline]
    pub fn any(&self) -> bool {
        self.overline || self.double_four || self.double_three
    }
}

/// Reason a Black move is forbidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForbiddenKind {
    Overline,
    DoubleFour,
    DoubleThree,
}

impl fmt::Display for ForbiddenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForbiddenKind::Overline => "overline",
            ForbiddenKind::DoubleFour => "double-four",
            ForbiddenKind::DoubleThree => "double-three",
        })
    }
}

/// Half-width of the window around the move
const REACH: usize = 5;
const LINE_LEN: usize = 2 * REACH + 1;

/// Cells along one axis, the move at index `REACH`. `None` is off the board.
type Line = [Option<Stone>; LINE_LEN];

#[allow(clippy::cast_possible_wrap)]
fn line_through(board: &Board, pos: Pos, axis: Axis) -> Line {
    let (dr, dc) = axis.delta();
    let mut cells = [None; LINE_LEN];
    for (i, cell) in cells.iter_mut().enumerate() {
        let step = i as i32 - REACH as i32;
        *cell = board.get_at(
            i32::from(pos.row) + dr * step,
            i32::from(pos.col) + dc * step,
        );
    }
    cells
}

#[inline]
fn is_black(cell: Option<Stone>) -> bool {
    cell == Some(Stone::Black)
}

#[inline]
fn is_empty(cell: Option<Stone>) -> bool {
    cell == Some(Stone::Empty)
}

/// Contiguous Black stones through the centre cell
fn run_length(line: &Line) -> usize {
    let back = line[..REACH].iter().rev().take_while(|&&c| is_black(c)).count();
    let fwd = line[REACH + 1..].iter().take_while(|&&c| is_black(c)).count();
    1 + back + fwd
}

/// Four Black plus one empty in a 5-window through the centre, where filling
/// the empty gives exactly five.
fn is_four(line: &Line) -> bool {
    if run_length(line) >= 5 {
        return false;
    }
    (1..=REACH).any(|s| {
        let window = &line[s..s + 5];
        window.iter().filter(|&&c| is_black(c)).count() == 4
            && window.iter().filter(|&&c| is_empty(c)).count() == 1
            && !is_black(line[s - 1])
            && !is_black(line[s + 5])
    })
}

/// Three Black and one gap inside a 6-window through the centre whose
/// outer cells are empty: `_BBB__`, `__BBB_`, `_B_BB_`, `_BB_B_`.
fn is_open_three(line: &Line) -> bool {
    if is_four(line) || run_length(line) >= 5 {
        return false;
    }
    (1..=REACH - 1).any(|j| {
        let inner = &line[j + 1..j + 5];
        is_empty(line[j])
            && is_empty(line[j + 5])
            && inner.iter().filter(|&&c| is_black(c)).count() == 3
            && inner.iter().filter(|&&c| is_empty(c)).count() == 1
            && !is_black(line[j - 1])
            && !is_black(line[j + 6])
    })
}

fn lines_after_move(board: &Board, pos: Pos) -> [Line; 4] {
    let placed = board.with_stone(pos, Player::Black);
    Axis::ALL.map(|axis| line_through(&placed, pos, axis))
}

/// Whether Black playing `pos` makes six or more in a row.
pub fn is_overline(board: &Board, pos: Pos) -> bool {
    lines_after_move(board, pos)
        .iter()
        .any(|line| run_length(line) >= 6)
}

/// Number of axes on which Black playing `pos` makes a four.
pub fn count_fours(board: &Board, pos: Pos) -> u8 {
    lines_after_move(board, pos)
        .iter()
        .map(|line| u8::from(is_four(line)))
        .sum()
}

/// Number of axes on which Black playing `pos` makes an open three.
pub fn count_open_threes(board: &Board, pos: Pos) -> u8 {
    lines_after_move(board, pos)
        .iter()
        .map(|line| u8::from(is_open_three(line)))
        .sum()
}

/// Why `player` may not play `pos` under `rules`, if it may not.
///
/// Only an empty cell played by Black with at least one rule enabled can be
/// forbidden. Checks run in the order overline, double-four, double-three on
/// a copy of the board. Each check runs only when its own flag is set. A move
/// that makes exactly five on some axis is never forbidden by the double
/// rules.
pub fn forbidden_kind(
    board: &Board,
    pos: Pos,
    player: Player,
    rules: &ForbiddenRules,
) -> Option<ForbiddenKind> {
    if player != Player::Black || !rules.any() || !board.is_empty(pos) {
        return None;
    }

    let lines = lines_after_move(board, pos);

    if rules.overline && lines.iter().any(|line| run_length(line) >= 6) {
        return Some(ForbiddenKind::Overline);
    }
    if lines.iter().any(|line| run_length(line) == 5) {
        return None;
    }

    if rules.double_four && lines.iter().filter(|line| is_four(line)).count() >= 2 {
        return Some(ForbiddenKind::DoubleFour);
    }
    if rules.double_three && lines.iter().filter(|line| is_open_three(line)).count() >= 2 {
        return Some(ForbiddenKind::DoubleThree);
    }
    None
}

/// Whether the move is forbidden. Never mutates `board`.
#[inline]
pub fn is_forbidden_at(board: &Board, pos: Pos, player: Player, rules: &ForbiddenRules) -> bool {
    forbidden_kind(board, pos, player, rules).is_some()
}

/// A move is valid if the cell is empty and no active rule forbids it.
pub fn is_valid_move(board: &Board, pos: Pos, player: Player, rules: &ForbiddenRules) -> bool {
    board.is_empty(pos) && !is_forbidden_at(board, pos, player, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_black(board: &mut Board, cells: &[(u8, u8)]) {
        for &(r, c) in cells {
            board.place_stone(Pos::new(r, c), Player::Black).unwrap();
        }
    }

    #[test]
    fn test_not_forbidden_empty_board() {
        let board = Board::new();
        assert_eq!(
            forbidden_kind(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU),
            None
        );
    }

    #[test]
    fn test_invalid_move_occupied() {
        let mut board = Board::new();
        place_black(&mut board, &[(9, 9)]);
        assert!(!is_valid_move(&board, Pos::CENTER, Player::White, &ForbiddenRules::NONE));
        assert!(
            !is_forbidden_at(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU),
            "Occupied cells are illegal, not forbidden"
        );
    }

    #[test]
    fn test_open_three_consecutive_horizontal() {
        let mut board = Board::new();
        // _ B _ B _ : placing at 7 makes _ B B B _
        place_black(&mut board, &[(9, 6), (9, 8)]);
        assert_eq!(count_open_threes(&board, Pos::new(9, 7)), 1);
    }

    #[test]
    fn test_open_three_with_gap() {
        let mut board = Board::new();
        // Placing at 9 makes _ B B _ B _
        place_black(&mut board, &[(9, 6), (9, 7)]);
        assert_eq!(count_open_threes(&board, Pos::new(9, 9)), 1);
    }

    #[test]
    fn test_not_open_three_blocked() {
        let mut board = Board::new();
        board.place_stone(Pos::new(9, 5), Player::White).unwrap();
        place_black(&mut board, &[(9, 6), (9, 8)]);
        assert_eq!(
            count_open_threes(&board, Pos::new(9, 7)),
            0,
            "W B B B _ is not an open three"
        );
    }

    #[test]
    fn test_double_three_cross_pattern() {
        let mut board = Board::new();
        place_black(&mut board, &[(9, 8), (9, 10), (8, 9), (10, 9)]);

        assert_eq!(count_open_threes(&board, Pos::CENTER), 2);
        assert_eq!(
            forbidden_kind(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU),
            Some(ForbiddenKind::DoubleThree)
        );
        assert!(!is_valid_move(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU));
    }

    #[test]
    fn test_double_three_diagonal_cross() {
        let mut board = Board::new();
        place_black(&mut board, &[(8, 8), (10, 10), (8, 10), (10, 8)]);
        assert_eq!(count_open_threes(&board, Pos::CENTER), 2);
        assert!(is_forbidden_at(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU));
    }

    #[test]
    fn test_double_three_only_binds_black() {
        let mut board = Board::new();
        for &(r, c) in &[(9, 8), (9, 10), (8, 9), (10, 9)] {
            board.place_stone(Pos::new(r, c), Player::White).unwrap();
        }
        assert!(!is_forbidden_at(&board, Pos::CENTER, Player::White, &ForbiddenRules::RENJU));
    }

    #[test]
    fn test_double_three_rule_disabled() {
        let mut board = Board::new();
        place_black(&mut board, &[(9, 8), (9, 10), (8, 9), (10, 9)]);
        let rules = ForbiddenRules {
            double_three: false,
            ..ForbiddenRules::RENJU
        };
        assert!(!is_forbidden_at(&board, Pos::CENTER, Player::Black, &rules));
    }

    #[test]
    fn test_single_open_three_allowed() {
        let mut board = Board::new();
        place_black(&mut board, &[(9, 8), (9, 10)]);
        assert_eq!(count_open_threes(&board, Pos::CENTER), 1);
        assert!(is_valid_move(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU));
    }

    #[test]
    fn test_four_stones_not_open_three() {
        let mut board = Board::new();
        place_black(&mut board, &[(9, 6), (9, 7), (9, 9)]);
        assert_eq!(count_open_threes(&board, Pos::new(9, 8)), 0);
        assert_eq!(count_fours(&board, Pos::new(9, 8)), 1);
    }

    #[test]
    fn test_edge_blocked_three() {
        let mut board = Board::new();
        place_black(&mut board, &[(0, 0), (0, 2)]);
        assert_eq!(
            count_open_threes(&board, Pos::new(0, 1)),
            0,
            "Board edge closes the three"
        );
    }

    #[test]
    fn test_edge_with_space_is_open_three() {
        let mut board = Board::new();
        place_black(&mut board, &[(0, 1), (0, 3)]);
        assert_eq!(count_open_threes(&board, Pos::new(0, 2)), 1);
    }

    #[test]
    fn test_four_three_allowed() {
        let mut board = Board::new();
        // Horizontal B B [x] _ B is a four, vertical is an open three
        place_black(&mut board, &[(9, 5), (9, 6), (9, 9), (10, 7), (11, 7)]);
        let pos = Pos::new(9, 7);
        assert_eq!(count_fours(&board, pos), 1);
        assert_eq!(count_open_threes(&board, pos), 1);
        assert!(!is_forbidden_at(&board, pos, Player::Black, &ForbiddenRules::RENJU));
    }

    #[test]
    fn test_double_four() {
        let mut board = Board::new();
        // Horizontal B B _ B [x], vertical B B B [x]
        place_black(&mut board, &[(9, 5), (9, 6), (9, 8), (6, 9), (7, 9), (8, 9)]);
        assert_eq!(count_fours(&board, Pos::CENTER), 2);
        assert_eq!(
            forbidden_kind(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU),
            Some(ForbiddenKind::DoubleFour)
        );
    }

    #[test]
    fn test_blocked_four_still_counts() {
        let mut board = Board::new();
        board.place_stone(Pos::new(9, 5), Player::White).unwrap();
        place_black(&mut board, &[(9, 6), (9, 7), (9, 8)]);
        assert_eq!(count_fours(&board, Pos::CENTER), 1);
    }

    #[test]
    fn test_four_that_would_overline_is_not_four() {
        let mut board = Board::new();
        // W B B B [x] _ B: the only completion gives six
        board.place_stone(Pos::new(9, 2), Player::White).unwrap();
        place_black(&mut board, &[(9, 3), (9, 4), (9, 5), (9, 8)]);
        assert_eq!(count_fours(&board, Pos::new(9, 6)), 0);
    }

    #[test]
    fn test_overline() {
        let mut board = Board::new();
        place_black(&mut board, &[(9, 3), (9, 4), (9, 5), (9, 7), (9, 8)]);
        let pos = Pos::new(9, 6);
        assert!(is_overline(&board, pos));
        assert_eq!(
            forbidden_kind(&board, pos, Player::Black, &ForbiddenRules::RENJU),
            Some(ForbiddenKind::Overline)
        );

        let rules = ForbiddenRules {
            overline: false,
            ..ForbiddenRules::RENJU
        };
        assert_eq!(forbidden_kind(&board, pos, Player::Black, &rules), None);
    }

    #[test]
    fn test_double_three_checked_when_overline_off() {
        let mut board = Board::new();
        // Six horizontally plus an open three vertically and diagonally
        place_black(&mut board, &[(9, 3), (9, 4), (9, 5), (9, 7), (9, 8)]);
        place_black(&mut board, &[(8, 6), (10, 6), (8, 5), (10, 7)]);
        let pos = Pos::new(9, 6);
        assert_eq!(count_open_threes(&board, pos), 2);

        let rules = ForbiddenRules {
            overline: false,
            double_four: false,
            double_three: true,
        };
        assert_eq!(
            forbidden_kind(&board, pos, Player::Black, &rules),
            Some(ForbiddenKind::DoubleThree)
        );
        assert_eq!(
            forbidden_kind(&board, pos, Player::Black, &ForbiddenRules::RENJU),
            Some(ForbiddenKind::Overline)
        );
    }

    #[test]
    fn test_exact_five_never_forbidden() {
        let mut board = Board::new();
        // Five horizontally plus an open three vertically and diagonally
        place_black(&mut board, &[(9, 5), (9, 6), (9, 7), (9, 8)]);
        place_black(&mut board, &[(8, 9), (10, 9), (8, 8), (10, 10)]);
        assert!(!is_forbidden_at(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU));
    }

    #[test]
    fn test_forbidden_check_leaves_board() {
        let mut board = Board::new();
        place_black(&mut board, &[(9, 8), (9, 10), (8, 9), (10, 9)]);
        let before = board;
        let _ = forbidden_kind(&board, Pos::CENTER, Player::Black, &ForbiddenRules::RENJU);
        assert_eq!(board, before);
    }

    #[test]
    fn test_rules_wire_names() {
        let rules: ForbiddenRules =
            serde_json::from_str(r#"{"overline":true,"doubleThree":true}"#).unwrap();
        assert_eq!(
            rules,
            ForbiddenRules {
                overline: true,
                double_four: false,
                double_three: true
            }
        );
    }
}
