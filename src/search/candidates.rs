//! Candidate generation, ranking and fallback scans

use serde::Serialize;

use crate::board::{Bitboard, Board, Player, Pos};
use crate::eval::Heuristic;
use crate::rules::{is_valid_move, ForbiddenRules};

/// A cell and its score; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveScore {
    pub pos: Pos,
    pub score: f64,
}

/// Legal cells within Chebyshev `radius` of any stone, in row-major order.
///
/// An empty board yields the center only.
pub fn generate_candidates(
    board: &Board,
    player: Player,
    radius: u8,
    rules: &ForbiddenRules,
) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![Pos::CENTER];
    }

    let radius = i32::from(radius);
    let mut near = Bitboard::new();
    for pos in board.occupied().iter_ones() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if let Some(p) = pos.offset(dr, dc, 1) {
                    near.set(p);
                }
            }
        }
    }

    near.iter_ones()
        .filter(|&pos| is_valid_move(board, pos, player, rules))
        .collect()
}

/// Score `candidates` for `player`, best first.
///
/// With a non-zero `defense_weight`, the score the opponent would get on the
/// same cell is added with that weight. The sort is stable, so equal scores
/// keep the input order.
pub fn rank_candidates(
    board: &Board,
    player: Player,
    candidates: &[Pos],
    heuristic: Heuristic,
    defense_weight: f64,
) -> Vec<MoveScore> {
    let opponent = player.opponent();
    let mut ranked: Vec<MoveScore> = candidates
        .iter()
        .map(|&pos| {
            let mut score = heuristic.score(board, pos, player);
            if defense_weight > 0.0 {
                score += defense_weight * heuristic.score(board, pos, opponent);
            }
            MoveScore { pos, score }
        })
        .collect();
    sort_by_score(&mut ranked);
    ranked
}

/// Stable descending sort.
pub fn sort_by_score(moves: &mut [MoveScore]) {
    moves.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// First legal cell on rings of growing Chebyshev distance around the
/// center, up to `max_ring`. Cells on a ring are visited row-major.
pub fn spiral_fallback(
    board: &Board,
    player: Player,
    rules: &ForbiddenRules,
    max_ring: u8,
) -> Option<Pos> {
    let max_ring = i32::from(max_ring);
    for ring in 0..=max_ring {
        for dr in -ring..=ring {
            for dc in -ring..=ring {
                if dr.abs().max(dc.abs()) != ring {
                    continue;
                }
                if let Some(pos) = Pos::CENTER.offset(dr, dc, 1) {
                    if is_valid_move(board, pos, player, rules) {
                        return Some(pos);
                    }
                }
            }
        }
    }
    None
}

/// First legal cell in row-major order.
pub fn first_available(board: &Board, player: Player, rules: &ForbiddenRules) -> Option<Pos> {
    board
        .empty_cells()
        .find(|&pos| is_valid_move(board, pos, player, rules))
}
