//! Move scoring and static board evaluation
//!
//! Two evaluators live here:
//! - [`score_move`] rates one empty cell for the player about to move. It is
//!   what move ordering, candidate ranking and the public API use.
//! - [`evaluate_board`] rates a whole position for the search leaves. It is
//!   symmetric: `evaluate_board(b, Black) == -evaluate_board(b, White)`.

use crate::board::{Axis, Bitboard, Board, Player, Pos, Stone, BOARD_SIZE};

use super::patterns::{Pattern, PatternScore};
use super::scan::{forms_any_four, forms_open_four, forms_open_three, scan_line, would_win};

/// Score of an occupied or off-board cell
pub const ILLEGAL_MOVE: f64 = -1_000_000.0;
/// Score of a cell that completes five for the mover
pub const WINNING_MOVE: f64 = 1_000_000.0;
/// Score of a cell where the opponent would complete five
pub const BLOCKING_MOVE: f64 = 500_000.0;

/// Bonuses added by [`score_move`] for non-terminal cells.
///
/// Each bonus is larger than the one below it, and all of them together
/// stay below [`BLOCKING_MOVE`].
pub struct MoveWeight;

impl MoveWeight {
    pub const OPEN_FOUR: f64 = 30_000.0;
    pub const BLOCK_OPEN_FOUR: f64 = 28_000.0;
    pub const ANY_FOUR: f64 = 15_000.0;
    pub const BLOCK_ANY_FOUR: f64 = 14_000.0;
    pub const OPEN_THREE: f64 = 10_000.0;
    pub const BLOCK_OPEN_THREE: f64 = 9_500.0;
    /// Center bonus is `max(CENTER_REACH - distance, 0)`
    pub const CENTER_REACH: f64 = 10.0;
    /// Per 8-neighbor holding an own stone
    pub const OWN_NEIGHBOR: f64 = 5.0;
    /// Per 8-neighbor holding an opponent stone
    pub const OPP_NEIGHBOR: f64 = 3.0;
}

/// Maximum Manhattan distance from center on 19x19 board
const MAX_CENTER_DIST: i32 = 18;

/// Weight per distance unit from center
const POSITION_WEIGHT: i32 = 3;

/// Weight per empty cell touching a player's stones
const MOBILITY_WEIGHT: i32 = 2;

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Win and block sentinels shared by every move heuristic.
///
/// `None` means the cell is legal and not decisive.
pub fn terminal_score(board: &Board, pos: Pos, player: Player) -> Option<f64> {
    if !board.is_empty(pos) {
        Some(ILLEGAL_MOVE)
    } else if would_win(board, pos, player) {
        Some(WINNING_MOVE)
    } else if would_win(board, pos, player.opponent()) {
        Some(BLOCKING_MOVE)
    } else {
        None
    }
}

/// Rate `pos` as a move for `player`.
///
/// ```
/// use gobang::{Board, Player, Pos};
/// use gobang::eval::{score_move, ILLEGAL_MOVE};
///
/// let mut board = Board::new();
/// board.place_stone(Pos::CENTER, Player::Black).unwrap();
///
/// assert_eq!(score_move(&board, Pos::CENTER, Player::White), ILLEGAL_MOVE);
/// assert!(score_move(&board, Pos::new(9, 10), Player::White) > 0.0);
/// ```
pub fn score_move(board: &Board, pos: Pos, player: Player) -> f64 {
    terminal_score(board, pos, player).unwrap_or_else(|| positional_terms(board, pos, player))
}

/// Non-terminal part of [`score_move`]: threat bonuses, center and contact.
pub fn positional_terms(board: &Board, pos: Pos, player: Player) -> f64 {
    let opponent = player.opponent();
    let mut score = 0.0;

    if forms_open_four(board, pos, player) {
        score += MoveWeight::OPEN_FOUR;
    }
    if forms_open_four(board, pos, opponent) {
        score += MoveWeight::BLOCK_OPEN_FOUR;
    }
    if forms_any_four(board, pos, player) {
        score += MoveWeight::ANY_FOUR;
    }
    if forms_any_four(board, pos, opponent) {
        score += MoveWeight::BLOCK_ANY_FOUR;
    }
    if forms_open_three(board, pos, player) {
        score += MoveWeight::OPEN_THREE;
    }
    if forms_open_three(board, pos, opponent) {
        score += MoveWeight::BLOCK_OPEN_THREE;
    }

    score + center_bonus(pos) + contact_bonus(board, pos, player)
}

/// Weight applied to opponent shapes in [`pattern_terms`]
const PATTERN_BLOCK_FACTOR: f64 = 0.9;
/// Keeps pattern sums below [`BLOCKING_MOVE`]
const PATTERN_SCALE: f64 = 10.0;

/// Non-terminal score built from per-axis pattern weights of both sides.
pub fn pattern_terms(board: &Board, pos: Pos, player: Player) -> f64 {
    let axis_sum = |who: Player| -> f64 {
        Axis::ALL
            .iter()
            .map(|&axis| f64::from(Pattern::from_scan(scan_line(board, pos, who, axis)).score()))
            .sum()
    };
    let own = axis_sum(player);
    let blocked = axis_sum(player.opponent());
    (own + PATTERN_BLOCK_FACTOR * blocked) / PATTERN_SCALE + center_bonus(pos)
}

/// `max(10 - euclidean distance to center, 0)`
pub fn center_bonus(pos: Pos) -> f64 {
    let dr = f64::from(pos.row) - f64::from(Pos::CENTER.row);
    let dc = f64::from(pos.col) - f64::from(Pos::CENTER.col);
    (MoveWeight::CENTER_REACH - (dr * dr + dc * dc).sqrt()).max(0.0)
}

fn contact_bonus(board: &Board, pos: Pos, player: Player) -> f64 {
    let own = player.stone();
    let mut bonus = 0.0;
    for &(dr, dc) in &NEIGHBORS {
        match pos.offset(dr, dc, 1).map(|p| board.get(p)) {
            Some(s) if s == own => bonus += MoveWeight::OWN_NEIGHBOR,
            Some(Stone::Empty) | None => {}
            Some(_) => bonus += MoveWeight::OPP_NEIGHBOR,
        }
    }
    bonus
}

/// Evaluate the board from the perspective of `player`.
///
/// Positive values favor `player`. The search checks for completed fives
/// itself, so this only weighs shapes, center control and mobility.
#[must_use]
pub fn evaluate_board(board: &Board, player: Player) -> i32 {
    let opponent = player.opponent();

    let pattern_score = evaluate_patterns(board, player) - evaluate_patterns(board, opponent);
    let position_score = evaluate_positions(board, player) - evaluate_positions(board, opponent);
    let mobility_score = (mobility(board, player) - mobility(board, opponent)) * MOBILITY_WEIGHT;

    pattern_score + position_score + mobility_score
}

/// Sum of line patterns for one color, with bonuses for threat pairs the
/// opponent cannot block with a single stone.
fn evaluate_patterns(board: &Board, player: Player) -> i32 {
    let mut score = 0;
    let mut open_fours = 0i32;
    let mut closed_fours = 0i32;
    let mut open_threes = 0i32;

    for pos in board.stones(player).iter_ones() {
        for axis in Axis::ALL {
            let line_score = evaluate_line(board, pos, axis, player.stone());
            score += line_score;

            if line_score >= PatternScore::OPEN_FOUR {
                open_fours += 1;
            } else if line_score >= PatternScore::CLOSED_FOUR {
                closed_fours += 1;
            } else if line_score >= PatternScore::OPEN_THREE {
                open_threes += 1;
            }
        }
    }

    if open_fours >= 1 && (closed_fours >= 1 || open_threes >= 1) {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 2 {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 1 && open_threes >= 1 {
        score += PatternScore::OPEN_FOUR;
    }
    if open_threes >= 2 {
        score += PatternScore::OPEN_FOUR;
    }

    score
}

/// Score the line segment starting at `pos` along `axis`.
///
/// Only the first stone of a segment (no same-color stone behind it) is
/// scored, so each segment counts once. One interior gap is allowed, which
/// picks up `O_OOO` and `OO_OO` shapes.
fn evaluate_line(board: &Board, pos: Pos, axis: Axis, color: Stone) -> i32 {
    let (dr, dc) = axis.delta();
    let behind = pos.offset(dr, dc, -1).map(|p| board.get(p));
    if behind == Some(color) {
        return 0;
    }

    let mut count = 1;
    let mut open_ends = u8::from(behind == Some(Stone::Empty));
    let mut has_gap = false;
    let mut span = 1;

    let mut step = 1;
    while let Some(p) = pos.offset(dr, dc, step) {
        match board.get(p) {
            s if s == color => {
                count += 1;
                span += 1;
            }
            Stone::Empty if !has_gap => {
                let after = pos.offset(dr, dc, step + 1).map(|q| board.get(q));
                if after == Some(color) {
                    has_gap = true;
                    span += 1;
                    step += 1;
                    continue;
                }
                open_ends += 1;
                break;
            }
            Stone::Empty => {
                open_ends += 1;
                break;
            }
            _ => break,
        }
        step += 1;
    }

    // Filling the gap is always one move away, so a gapped shape is never a five.
    if has_gap {
        match count {
            5.. => PatternScore::OPEN_FOUR,
            4 if span == 5 => PatternScore::OPEN_FOUR,
            4 => PatternScore::CLOSED_FOUR,
            3 if open_ends == 2 => PatternScore::OPEN_THREE,
            3 if open_ends == 1 => PatternScore::CLOSED_THREE,
            _ => 0,
        }
    } else {
        match (count, open_ends) {
            (5.., _) => PatternScore::FIVE,
            (4, 2) => PatternScore::OPEN_FOUR,
            (4, 1) => PatternScore::CLOSED_FOUR,
            (3, 2) => PatternScore::OPEN_THREE,
            (3, 1) => PatternScore::CLOSED_THREE,
            (2, 2) => PatternScore::OPEN_TWO,
            (2, 1) => PatternScore::CLOSED_TWO,
            _ => 0,
        }
    }
}

/// Stones closer to the center are worth more.
#[allow(clippy::cast_possible_wrap)]
fn evaluate_positions(board: &Board, player: Player) -> i32 {
    let center = (BOARD_SIZE / 2) as i32;
    board
        .stones(player)
        .iter_ones()
        .map(|pos| {
            let dist = (i32::from(pos.row) - center).abs() + (i32::from(pos.col) - center).abs();
            (MAX_CENTER_DIST - dist) * POSITION_WEIGHT
        })
        .sum()
}

/// Distinct empty cells touching `player`'s stones.
#[allow(clippy::cast_possible_wrap)]
fn mobility(board: &Board, player: Player) -> i32 {
    let mut reach = Bitboard::new();
    for pos in board.stones(player).iter_ones() {
        for &(dr, dc) in &NEIGHBORS {
            if let Some(p) = pos.offset(dr, dc, 1) {
                if board.is_empty(p) {
                    reach.set(p);
                }
            }
        }
    }
    reach.count() as i32
}
