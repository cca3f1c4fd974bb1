//! Evaluation: line scanning, pattern classification and move scoring

pub mod heuristic;
pub mod network;
pub mod patterns;
pub mod scan;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Pos};

pub use heuristic::{
    center_bonus, evaluate_board, pattern_terms, positional_terms, score_move, terminal_score,
    MoveWeight, BLOCKING_MOVE, ILLEGAL_MOVE, WINNING_MOVE,
};
pub use network::network_terms;
pub use patterns::{classify, Pattern, PatternMatch, PatternScore};
pub use scan::{
    forms_any_four, forms_open_four, forms_open_three, has_line_of_length, scan_all, scan_line,
    would_win, LineScan,
};

/// Candidate scorer used by the move selector.
///
/// All variants share the illegal, win and block sentinels of
/// [`terminal_score`] and differ only in how quiet cells are rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Heuristic {
    /// Threat bonuses, center distance and contact ([`score_move`])
    #[default]
    Positional,
    /// Per-axis pattern weights for both sides
    Pattern,
    /// Fixed-weight network over line features
    Network,
}

impl Heuristic {
    pub fn score(self, board: &Board, pos: Pos, player: Player) -> f64 {
        terminal_score(board, pos, player).unwrap_or_else(|| match self {
            Heuristic::Positional => positional_terms(board, pos, player),
            Heuristic::Pattern => pattern_terms(board, pos, player),
            Heuristic::Network => network_terms(board, pos, player),
        })
    }
}
