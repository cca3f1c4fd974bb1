//! Move selector and public entry points
//!
//! [`Engine`] picks one move per call by walking a fixed priority list:
//!
//! 1. **Immediate win**: first cell, row-major, that completes five
//! 2. **Defense**: first cell, row-major, where the opponent would complete five
//! 3. **Alpha-Beta**: when the configured depth is above 1
//! 4. **Heuristic**: best ranked candidate, optionally randomized
//! 5. **Fallback**: center spiral, then any legal cell
//!
//! Cells forbidden for the mover are never returned. The engine keeps no
//! board between calls; its only state is the random generator used for
//! randomized picks.
//!
//! # Example
//!
//! ```
//! use gobang::{Board, Difficulty, Engine, Player, Pos, SearchType};
//!
//! let mut engine = Engine::from_difficulty(Difficulty::Medium);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(9, 9), Player::Black).unwrap();
//!
//! let result = engine.select_move_with_stats(&board, Player::White);
//! assert!(result.best_move.is_some());
//! assert_eq!(result.search_type, SearchType::AlphaBeta);
//! ```

use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::board::{Board, Player, Pos, Stone};
use crate::config::{Difficulty, SearchOptions, MAX_DEPTH, MAX_RADIUS};
use crate::error::EngineError;
use crate::eval::{
    classify, score_move, would_win, PatternMatch, BLOCKING_MOVE, ILLEGAL_MOVE, WINNING_MOVE,
};
use crate::rules::{forbidden_kind, is_forbidden_at, is_valid_move, ForbiddenRules};
use crate::search::{
    first_available, generate_candidates, rank_candidates, sort_by_score, spiral_fallback,
    MoveScore, Searcher,
};

/// Rings around the center tried by the fallback scan
const SPIRAL_RINGS: u8 = 2;

/// Stage of the selector that produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchType {
    /// Move completes five
    ImmediateWin,
    /// Move blocks the opponent's five
    Defense,
    /// Alpha-beta search result
    AlphaBeta,
    /// Picked from the ranked candidate list
    Heuristic,
    /// Spiral or row-major scan
    Fallback,
    /// No legal cell left
    NoMove,
}

/// Result of a move selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Sentinel, candidate score or search score, depending on `search_type`
    pub score: f64,
    pub search_type: SearchType,
    /// Nodes visited by alpha-beta, 0 for the other stages
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn found(pos: Pos, score: f64, search_type: SearchType) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            nodes: 0,
        }
    }

    #[inline]
    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            search_type: SearchType::NoMove,
            nodes: 0,
        }
    }
}

/// Move selector configured by [`SearchOptions`].
#[derive(Debug, Clone)]
pub struct Engine {
    options: SearchOptions,
    rng: ChaCha8Rng,
}

impl Engine {
    /// Engine with default options: depth 1, no randomness, no forbidden rules.
    #[must_use]
    pub fn new() -> Self {
        Self::build(SearchOptions::default())
    }

    /// Engine with validated options.
    pub fn with_options(options: SearchOptions) -> Result<Self, EngineError> {
        options.validate()?;
        Ok(Self::build(options))
    }

    #[must_use]
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::build(difficulty.options())
    }

    fn build(options: SearchOptions) -> Self {
        let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            options,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Best move for `player`, or `None` when no legal cell is left.
    #[must_use]
    pub fn select_move(&mut self, board: &Board, player: Player) -> Option<Pos> {
        self.select_move_with_stats(board, player).best_move
    }

    /// Best move with the stage that produced it.
    #[must_use]
    pub fn select_move_with_stats(&mut self, board: &Board, player: Player) -> MoveResult {
        let rules = self.options.rules;

        // 1. Immediate win
        if let Some(pos) = find_winning_cell(board, player, player, &rules) {
            debug!("immediate win at {pos:?}");
            return MoveResult::found(pos, WINNING_MOVE, SearchType::ImmediateWin);
        }

        // 2. Block the opponent's five
        if let Some(pos) = find_winning_cell(board, player.opponent(), player, &rules) {
            debug!("blocking five at {pos:?}");
            return MoveResult::found(pos, BLOCKING_MOVE, SearchType::Defense);
        }

        // 3. Search
        if self.options.depth > 1 {
            let result = Searcher::new(&self.options).search(board, player);
            if let Some(pos) = result.best_move {
                debug!(
                    "alpha-beta picked {pos:?} (score {}, nodes {})",
                    result.score, result.nodes
                );
                return MoveResult {
                    best_move: Some(pos),
                    score: f64::from(result.score),
                    search_type: SearchType::AlphaBeta,
                    nodes: result.nodes,
                };
            }
        }

        // 4. Ranked candidates
        let candidates = generate_candidates(board, player, self.options.radius, &rules);
        if !candidates.is_empty() {
            let ranked = self.shortlist(board, player, &candidates);
            if let Some(choice) = self.pick(&ranked) {
                debug!("heuristic picked {:?} (score {})", choice.pos, choice.score);
                return MoveResult::found(choice.pos, choice.score, SearchType::Heuristic);
            }
        }

        // 5. Fallback scans
        let fallback = spiral_fallback(board, player, &rules, SPIRAL_RINGS)
            .or_else(|| first_available(board, player, &rules));
        match fallback {
            Some(pos) => {
                debug!("fallback scan picked {pos:?}");
                MoveResult::found(pos, score_move(board, pos, player), SearchType::Fallback)
            }
            None => {
                debug!("no legal move for {player:?}");
                MoveResult::no_move()
            }
        }
    }

    /// Ranked, jittered and truncated candidate list.
    fn shortlist(&mut self, board: &Board, player: Player, candidates: &[Pos]) -> Vec<MoveScore> {
        let mut ranked = rank_candidates(
            board,
            player,
            candidates,
            self.options.heuristic,
            self.options.defense_weight,
        );
        if self.options.jitter > 0.0 {
            for m in &mut ranked {
                m.score += self.rng.gen_range(0.0..self.options.jitter);
            }
            sort_by_score(&mut ranked);
        }
        ranked.truncate(self.options.candidate_limit.max(1));
        ranked
    }

    /// Best entry, or with probability `randomness` a uniform pick among
    /// the top `random_pool`.
    fn pick(&mut self, ranked: &[MoveScore]) -> Option<MoveScore> {
        let randomness = self.options.randomness;
        if randomness > 0.0 && self.rng.gen_bool(randomness.min(1.0)) {
            let pool = self.options.random_pool.min(ranked.len());
            if let Some(choice) = ranked[..pool].choose(&mut self.rng) {
                return Some(*choice);
            }
        }
        ranked.first().copied()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// First legal cell for `mover`, row-major, where `owner` would complete five.
fn find_winning_cell(
    board: &Board,
    owner: Player,
    mover: Player,
    rules: &ForbiddenRules,
) -> Option<Pos> {
    board
        .empty_cells()
        .find(|&pos| would_win(board, pos, owner) && !is_forbidden_at(board, pos, mover, rules))
}

/// Options forced into their supported ranges.
fn clamp_options(options: &SearchOptions) -> SearchOptions {
    let finite_non_negative = |x: f64| if x.is_finite() { x.max(0.0) } else { 0.0 };
    SearchOptions {
        depth: options.depth.clamp(1, MAX_DEPTH),
        candidate_limit: options.candidate_limit.max(1),
        randomness: finite_non_negative(options.randomness).min(1.0),
        random_pool: options.random_pool.max(1),
        radius: options.radius.clamp(1, MAX_RADIUS),
        defense_weight: finite_non_negative(options.defense_weight),
        jitter: finite_non_negative(options.jitter),
        ..options.clone()
    }
}

/// Whether `(row, col)` is on the board and empty.
///
/// ```
/// use gobang::{is_legal_move, Board};
///
/// let board = Board::new();
/// assert!(is_legal_move(&board, 0, 18));
/// assert!(!is_legal_move(&board, 19, 0));
/// ```
pub fn is_legal_move(board: &Board, row: i32, col: i32) -> bool {
    board.get_at(row, col) == Some(Stone::Empty)
}

/// Score of `(row, col)` for `player`; [`ILLEGAL_MOVE`] when off the board
/// or occupied.
pub fn evaluate_move(board: &Board, row: i32, col: i32, player: Player) -> f64 {
    match Pos::try_new(row, col) {
        Ok(pos) => score_move(board, pos, player),
        Err(_) => ILLEGAL_MOVE,
    }
}

/// Strongest pattern `player` would make at `(row, col)`.
pub fn classify_move(
    board: &Board,
    row: i32,
    col: i32,
    player: Player,
) -> Result<PatternMatch, EngineError> {
    let pos = Pos::try_new(row, col)?;
    if !board.is_empty(pos) {
        return Err(EngineError::Occupied {
            row: pos.row,
            col: pos.col,
        });
    }
    Ok(classify(board, pos, player))
}

/// Whether `player` is barred from `(row, col)` by `rules`.
///
/// Off-board and occupied cells are not forbidden, only illegal.
pub fn is_forbidden(
    board: &Board,
    row: i32,
    col: i32,
    player: Player,
    rules: &ForbiddenRules,
) -> bool {
    Pos::try_new(row, col).is_ok_and(|pos| is_forbidden_at(board, pos, player, rules))
}

/// Select a move with one-off options.
///
/// Out-of-range options are clamped into range rather than rejected; use
/// [`Engine::with_options`] for strict validation.
///
/// ```
/// use gobang::{select_move, Board, Pos, Player, SearchOptions};
///
/// let board = Board::new();
/// let pos = select_move(&board, Player::Black, &SearchOptions::default());
/// assert_eq!(pos, Some(Pos::new(9, 9)));
/// ```
pub fn select_move(board: &Board, player: Player, options: &SearchOptions) -> Option<Pos> {
    Engine::build(clamp_options(options)).select_move(board, player)
}

/// Validate a move before committing it: on the board, empty and not
/// forbidden for `player`.
pub fn check_move(
    board: &Board,
    row: i32,
    col: i32,
    player: Player,
    rules: &ForbiddenRules,
) -> Result<Pos, EngineError> {
    let pos = Pos::try_new(row, col)?;
    if !board.is_empty(pos) {
        return Err(EngineError::Occupied {
            row: pos.row,
            col: pos.col,
        });
    }
    if let Some(kind) = forbidden_kind(board, pos, player, rules) {
        return Err(EngineError::Forbidden {
            row: pos.row,
            col: pos.col,
            kind,
        });
    }
    Ok(pos)
}

/// Closest legal cell to a suggested `(row, col)` by Manhattan distance,
/// ties broken row-major. The suggestion itself is returned when legal.
///
/// ```
/// use gobang::{nearest_legal_move, Board, ForbiddenRules, Player, Pos};
///
/// let mut board = Board::new();
/// board.place_stone(Pos::new(9, 9), Player::Black).unwrap();
///
/// let repaired = nearest_legal_move(&board, 9, 9, Player::White, &ForbiddenRules::NONE);
/// assert_eq!(repaired, Some(Pos::new(8, 9)));
/// ```
pub fn nearest_legal_move(
    board: &Board,
    row: i32,
    col: i32,
    player: Player,
    rules: &ForbiddenRules,
) -> Option<Pos> {
    board
        .empty_cells()
        .filter(|&pos| is_valid_move(board, pos, player, rules))
        .min_by_key(|pos| {
            let dr = i32::from(pos.row).abs_diff(row);
            let dc = i32::from(pos.col).abs_diff(col);
            u64::from(dr) + u64::from(dc)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in black {
            board.place_stone(Pos::new(r, c), Player::Black).unwrap();
        }
        for &(r, c) in white {
            board.place_stone(Pos::new(r, c), Player::White).unwrap();
        }
        board
    }

    fn full_board() -> Board {
        let mut board = Board::new();
        for pos in Pos::all() {
            let player = if (pos.row / 2 + pos.col) % 2 == 0 {
                Player::Black
            } else {
                Player::White
            };
            board.place_stone(pos, player).unwrap();
        }
        board
    }

    #[test]
    fn test_engine_empty_board() {
        let mut engine = Engine::new();
        let result = engine.select_move_with_stats(&Board::new(), Player::Black);
        assert_eq!(result.best_move, Some(Pos::CENTER));
        assert_eq!(result.search_type, SearchType::Heuristic);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let board = board_with(
            &[(9, 5), (9, 6), (9, 7), (9, 8)],
            &[(3, 0), (3, 1), (3, 2), (3, 3)],
        );
        let mut engine = Engine::new();
        let result = engine.select_move_with_stats(&board, Player::White);
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.best_move, Some(Pos::new(3, 4)));
        assert_eq!(result.score, WINNING_MOVE);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let board = board_with(&[(9, 5), (9, 6), (9, 7), (9, 8), (0, 0)], &[(8, 8), (7, 7)]);
        let mut engine = Engine::new();
        let result = engine.select_move_with_stats(&board, Player::White);
        assert_eq!(result.search_type, SearchType::Defense);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)), "First block in row-major order");
    }

    #[test]
    fn test_engine_skips_forbidden_win_cell() {
        // Black's win and White's win share (5, 3), an overline for Black
        let board = board_with(
            &[(5, 0), (5, 1), (5, 2), (5, 4), (5, 5)],
            &[(4, 3), (6, 3), (7, 3), (8, 3)],
        );
        let options = SearchOptions::default().with_rules(ForbiddenRules::RENJU);
        let mut engine = Engine::with_options(options).unwrap();
        let result = engine.select_move_with_stats(&board, Player::Black);
        assert_eq!(result.search_type, SearchType::Heuristic);
        assert!(result.best_move.is_some());
        assert_ne!(result.best_move, Some(Pos::new(5, 3)));

        // Without the overline rule the same cell wins outright
        let mut engine = Engine::new();
        let result = engine.select_move_with_stats(&board, Player::Black);
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.best_move, Some(Pos::new(5, 3)));
    }

    #[test]
    fn test_engine_full_board_no_move() {
        let mut engine = Engine::from_difficulty(Difficulty::Hard);
        let result = engine.select_move_with_stats(&full_board(), Player::Black);
        assert_eq!(result, MoveResult::no_move());
    }

    #[test]
    fn test_engine_difficulties_respond() {
        let board = board_with(&[(9, 9), (9, 10)], &[(10, 9)]);
        for difficulty in Difficulty::ALL {
            let mut engine = Engine::from_difficulty(difficulty);
            let pos = engine.select_move(&board, Player::White);
            assert!(
                pos.is_some_and(|p| board.is_empty(p)),
                "{difficulty} must return an empty cell"
            );
        }
    }

    #[test]
    fn test_engine_leaves_board_untouched() {
        let board = board_with(&[(9, 9), (10, 10)], &[(9, 10)]);
        let before = board;
        let mut engine = Engine::from_difficulty(Difficulty::Hard);
        let _ = engine.select_move(&board, Player::White);
        assert_eq!(board, before);
    }

    #[test]
    fn test_randomness_zero_is_deterministic() {
        let board = board_with(&[(9, 9), (8, 10)], &[(10, 8)]);
        let mut a = Engine::new();
        let mut b = Engine::new();
        assert_eq!(a.select_move(&board, Player::Black), b.select_move(&board, Player::Black));
    }

    #[test]
    fn test_randomness_stays_in_pool() {
        let board = board_with(&[(9, 9)], &[(9, 10)]);
        let options = SearchOptions {
            randomness: 1.0,
            random_pool: 3,
            seed: Some(42),
            ..SearchOptions::default()
        };
        let candidates = generate_candidates(&board, Player::Black, 2, &ForbiddenRules::NONE);
        let ranked = rank_candidates(&board, Player::Black, &candidates, options.heuristic, 0.0);
        let pool: Vec<Pos> = ranked.iter().take(3).map(|m| m.pos).collect();

        let mut engine = Engine::with_options(options).unwrap();
        for _ in 0..20 {
            let pos = engine.select_move(&board, Player::Black).unwrap();
            assert!(pool.contains(&pos), "{pos:?} outside top-3 pool");
        }
    }

    #[test]
    fn test_seeded_engines_agree() {
        let board = board_with(&[(9, 9)], &[(9, 10)]);
        let options = SearchOptions {
            randomness: 0.5,
            jitter: 100.0,
            seed: Some(7),
            ..SearchOptions::default()
        };
        let mut a = Engine::with_options(options.clone()).unwrap();
        let mut b = Engine::with_options(options).unwrap();
        for _ in 0..5 {
            assert_eq!(a.select_move(&board, Player::Black), b.select_move(&board, Player::Black));
        }
    }

    #[test]
    fn test_with_options_rejects_invalid() {
        let options = SearchOptions {
            depth: 9,
            ..SearchOptions::default()
        };
        assert!(matches!(
            Engine::with_options(options),
            Err(EngineError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_select_move_clamps_options() {
        let options = SearchOptions {
            depth: 0,
            radius: 9,
            candidate_limit: 0,
            ..SearchOptions::default()
        };
        assert_eq!(select_move(&Board::new(), Player::Black, &options), Some(Pos::CENTER));
    }

    #[test]
    fn test_is_legal_move_bounds() {
        let board = board_with(&[(0, 0)], &[]);
        assert!(!is_legal_move(&board, 0, 0));
        assert!(!is_legal_move(&board, -1, 5));
        assert!(!is_legal_move(&board, 5, 19));
        assert!(is_legal_move(&board, 18, 18));
    }

    #[test]
    fn test_evaluate_move_out_of_bounds() {
        let board = Board::new();
        assert_eq!(evaluate_move(&board, 19, 19, Player::Black), ILLEGAL_MOVE);
        assert_eq!(evaluate_move(&board, -3, 0, Player::White), ILLEGAL_MOVE);
    }

    #[test]
    fn test_classify_move_errors() {
        let board = board_with(&[(4, 4)], &[]);
        assert_eq!(
            classify_move(&board, 4, 4, Player::White),
            Err(EngineError::Occupied { row: 4, col: 4 })
        );
        assert_eq!(
            classify_move(&board, 4, 20, Player::White),
            Err(EngineError::OutOfBounds { row: 4, col: 20 })
        );
    }

    #[test]
    fn test_check_move_reports_forbidden_kind() {
        let board = board_with(&[(9, 8), (9, 10), (8, 9), (10, 9)], &[]);
        assert_eq!(
            check_move(&board, 9, 9, Player::Black, &ForbiddenRules::RENJU),
            Err(EngineError::Forbidden {
                row: 9,
                col: 9,
                kind: crate::rules::ForbiddenKind::DoubleThree
            })
        );
        assert_eq!(
            check_move(&board, 9, 9, Player::Black, &ForbiddenRules::NONE),
            Ok(Pos::CENTER)
        );
        assert_eq!(
            check_move(&board, 9, 9, Player::White, &ForbiddenRules::RENJU),
            Ok(Pos::CENTER)
        );
    }

    #[test]
    fn test_nearest_legal_move_skips_forbidden() {
        let board = board_with(&[(9, 8), (9, 10), (8, 9), (10, 9)], &[]);
        let pos = nearest_legal_move(&board, 9, 9, Player::Black, &ForbiddenRules::RENJU);
        // (9,9) is forbidden; distance-1 cells are occupied; (7,9) is the first at distance 2
        assert_eq!(pos, Some(Pos::new(7, 9)));
    }

    #[test]
    fn test_nearest_legal_move_off_board_suggestion() {
        let board = Board::new();
        assert_eq!(
            nearest_legal_move(&board, -4, 30, Player::White, &ForbiddenRules::NONE),
            Some(Pos::new(0, 18))
        );
        assert_eq!(
            nearest_legal_move(&full_board(), 3, 3, Player::White, &ForbiddenRules::NONE),
            None
        );
    }

    #[test]
    fn test_nearest_legal_move_extreme_coordinates() {
        let board = Board::new();
        let rules = ForbiddenRules::NONE;
        assert_eq!(
            nearest_legal_move(&board, i32::MIN, 0, Player::White, &rules),
            Some(Pos::new(0, 0))
        );
        assert_eq!(
            nearest_legal_move(&board, i32::MAX, i32::MIN, Player::White, &rules),
            Some(Pos::new(18, 0))
        );
        assert_eq!(
            nearest_legal_move(&board, i32::MAX, i32::MAX, Player::Black, &rules),
            Some(Pos::new(18, 18))
        );
    }
}
