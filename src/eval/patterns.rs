//! Pattern classification and pattern scores
//!
//! [`classify`] names the strongest shape a move creates. [`PatternScore`]
//! holds the weights used by the static board evaluation and the search.

use serde::Serialize;

use crate::board::{Axis, Board, Player, Pos};

use super::scan::{scan_line, LineScan};

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    // Winning patterns
    /// Five in a row - immediate win
    pub const FIVE: i32 = 1_000_000;

    // Strong attacking patterns
    /// Open four: _OOOO_
    pub const OPEN_FOUR: i32 = 100_000;
    /// Closed four: XOOOO_ or _OOOOX (one way to extend)
    pub const CLOSED_FOUR: i32 = 50_000;

    // Moderate threats
    /// Open three: _OOO_ (becomes open four if not blocked)
    pub const OPEN_THREE: i32 = 10_000;
    /// Closed three: XOOO_ or _OOOX
    pub const CLOSED_THREE: i32 = 1_500;

    // Building patterns
    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 1_000;
    /// Closed two: XOO_ or _OOX
    pub const CLOSED_TWO: i32 = 200;
}

/// Shape created by a move along one axis.
///
/// Variants are declared weakest first, so `Ord` is the priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Pattern {
    None,
    HalfOpenTwo,
    OpenTwo,
    HalfOpenThree,
    OpenThree,
    HalfOpenFour,
    OpenFour,
    Five,
}

impl Pattern {
    /// Map a contiguous run to its pattern.
    pub fn from_scan(scan: LineScan) -> Pattern {
        match (scan.length, scan.open_ends()) {
            (5.., _) => Pattern::Five,
            (4, 2) => Pattern::OpenFour,
            (4, 1) => Pattern::HalfOpenFour,
            (3, 2) => Pattern::OpenThree,
            (3, 1) => Pattern::HalfOpenThree,
            (2, 2) => Pattern::OpenTwo,
            (2, 1) => Pattern::HalfOpenTwo,
            _ => Pattern::None,
        }
    }

    /// Weight of this shape in [`PatternScore`] units
    pub fn score(self) -> i32 {
        match self {
            Pattern::Five => PatternScore::FIVE,
            Pattern::OpenFour => PatternScore::OPEN_FOUR,
            Pattern::HalfOpenFour => PatternScore::CLOSED_FOUR,
            Pattern::OpenThree => PatternScore::OPEN_THREE,
            Pattern::HalfOpenThree => PatternScore::CLOSED_THREE,
            Pattern::OpenTwo => PatternScore::OPEN_TWO,
            Pattern::HalfOpenTwo => PatternScore::CLOSED_TWO,
            Pattern::None => 0,
        }
    }
}

/// Strongest pattern for a move with the run and axis that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub pattern: Pattern,
    /// Contiguous run length on `axis`; 0 when no axis forms a pattern
    pub length: u8,
    pub axis: Option<Axis>,
}

impl PatternMatch {
    pub const NONE: PatternMatch = PatternMatch {
        pattern: Pattern::None,
        length: 0,
        axis: None,
    };
}

/// Classify the shape `player` creates by playing `pos`.
///
/// Axes are checked in [`Axis::ALL`] order and the first axis reaching the
/// best pattern is reported.
///
/// ```
/// use gobang::{Board, Player, Pos};
/// use gobang::board::Axis;
/// use gobang::eval::{classify, Pattern};
///
/// let mut board = Board::new();
/// board.place_stone(Pos::new(8, 9), Player::White).unwrap();
/// board.place_stone(Pos::new(10, 9), Player::White).unwrap();
///
/// let found = classify(&board, Pos::new(9, 9), Player::White);
/// assert_eq!(found.pattern, Pattern::OpenThree);
/// assert_eq!(found.length, 3);
/// assert_eq!(found.axis, Some(Axis::Vertical));
/// ```
pub fn classify(board: &Board, pos: Pos, player: Player) -> PatternMatch {
    let mut best = PatternMatch::NONE;
    for axis in Axis::ALL {
        let scan = scan_line(board, pos, player, axis);
        let pattern = Pattern::from_scan(scan);
        if pattern > best.pattern {
            best = PatternMatch {
                pattern,
                length: scan.length,
                axis: Some(axis),
            };
        }
    }
    best
}
