//! Fixed-depth negamax with alpha-beta pruning
//!
//! Each ply regenerates its candidate list, ranks it with the configured
//! heuristic and keeps the top-K. Leaves use the symmetric static
//! evaluation from [`crate::eval::evaluate_board`]. A move that completes
//! five ends the line with a win score that shrinks with ply, so faster wins
//! are preferred.
//!
//! The search owns a scratch copy of the board and places stones through
//! [`Board::probe`] guards, so the caller's board is never touched.
//!
//! # Example
//!
//! ```
//! use gobang::{Board, Player, Pos, SearchOptions};
//! use gobang::search::Searcher;
//!
//! let mut board = Board::new();
//! for col in 0..4 {
//!     board.place_stone(Pos::new(9, col), Player::Black).unwrap();
//! }
//!
//! let options = SearchOptions { depth: 2, ..SearchOptions::default() };
//! let mut searcher = Searcher::new(&options);
//! let result = searcher.search(&board, Player::Black);
//! assert_eq!(result.best_move, Some(Pos::new(9, 4)));
//! ```

use log::trace;

use crate::board::{Board, Player, Pos};
use crate::config::SearchOptions;
use crate::eval::{evaluate_board, would_win, Heuristic, PatternScore};
use crate::rules::ForbiddenRules;

use super::candidates::{generate_candidates, rank_candidates};

/// Infinity score for alpha-beta bounds
const INF: i32 = PatternScore::FIVE + 1;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Negamax score of the best move for the side to move
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
}

/// Alpha-beta searcher configured from [`SearchOptions`].
///
/// Holds no board state between calls; only the node counter of the last
/// search survives.
#[derive(Debug, Clone)]
pub struct Searcher {
    depth: u8,
    candidate_limit: usize,
    radius: u8,
    defense_weight: f64,
    heuristic: Heuristic,
    rules: ForbiddenRules,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(options: &SearchOptions) -> Self {
        Self {
            depth: options.depth.max(1),
            candidate_limit: options.candidate_limit.max(1),
            radius: options.radius,
            defense_weight: options.defense_weight,
            heuristic: options.heuristic,
            rules: options.rules,
            nodes: 0,
        }
    }

    /// Nodes visited by the last search
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `board` for `player` to the configured depth.
    #[must_use]
    pub fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        self.nodes = 0;
        let mut work = *board;

        let mut result = SearchResult {
            best_move: None,
            score: -INF,
            depth: self.depth,
            nodes: 0,
        };

        let mut alpha = -INF;
        for mov in self.ordered_moves(&work, player) {
            let score = if would_win(&work, mov, player) {
                PatternScore::FIVE
            } else {
                let mut child = work.probe(mov, player);
                -self.alpha_beta(&mut child, player.opponent(), self.depth - 1, -INF, -alpha, 1)
            };

            if result.best_move.is_none() || score > result.score {
                result.best_move = Some(mov);
                result.score = score;
            }
            alpha = alpha.max(score);
            if score >= PatternScore::FIVE {
                break;
            }
        }

        if result.best_move.is_none() {
            result.score = 0;
        }
        result.nodes = self.nodes;
        trace!(
            "alpha-beta depth {} nodes {} best {:?} score {}",
            result.depth,
            result.nodes,
            result.best_move,
            result.score
        );
        result
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate_board(board, player);
        }

        let moves = self.ordered_moves(board, player);
        if moves.is_empty() {
            return 0;
        }

        let mut best = -INF;
        for mov in moves {
            if would_win(board, mov, player) {
                return PatternScore::FIVE - ply;
            }

            let score = {
                let mut child = board.probe(mov, player);
                -self.alpha_beta(&mut child, player.opponent(), depth - 1, -beta, -alpha, ply + 1)
            };

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Top-K ranked candidates for one node.
    fn ordered_moves(&self, board: &Board, player: Player) -> Vec<Pos> {
        let candidates = generate_candidates(board, player, self.radius, &self.rules);
        rank_candidates(board, player, &candidates, self.heuristic, self.defense_weight)
            .into_iter()
            .take(self.candidate_limit)
            .map(|m| m.pos)
            .collect()
    }
}
