//! Gobang move engine with Renju-style forbidden moves
//!
//! Move evaluation, pattern detection and move selection for five-in-a-row
//! on a 19x19 board:
//! - Standard 19x19 board, Black moves first
//! - Five or more in a row wins
//! - Optional forbidden moves for Black: overline, double-four, double-three
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and scoped probes
//! - [`eval`]: Line scanning, pattern classification and move scoring
//! - [`rules`]: Win detection and forbidden moves
//! - [`search`]: Candidate ranking and alpha-beta search
//! - [`config`]: Search options and difficulty presets
//! - [`engine`]: Move selector and the public entry points
//!
//! # Quick Start
//!
//! ```
//! use gobang::{Board, Difficulty, Engine, Player, Pos};
//!
//! let mut board = Board::new();
//! let mut engine = Engine::from_difficulty(Difficulty::Easy);
//!
//! board.place_stone(Pos::new(9, 9), Player::Black).unwrap();
//!
//! // Engine responds as White
//! if let Some(pos) = engine.select_move(&board, Player::White) {
//!     board.place_stone(pos, Player::White).unwrap();
//!     println!("Engine plays at ({}, {})", pos.row, pos.col);
//! }
//! ```
//!
//! # Selection Priority
//!
//! 1. Immediate winning move
//! 2. Block of the opponent's immediate win
//! 3. Alpha-beta search (depth 2 and above)
//! 4. Best ranked candidate, optionally randomized
//! 5. Center spiral, then row-major scan

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Axis, Board, Player, Pos, Stone, BOARD_SIZE};
pub use config::{Difficulty, SearchOptions};
pub use engine::{
    check_move, classify_move, evaluate_move, is_forbidden, is_legal_move, nearest_legal_move,
    select_move, Engine, MoveResult, SearchType,
};
pub use error::EngineError;
pub use eval::{Heuristic, Pattern, PatternMatch, BLOCKING_MOVE, ILLEGAL_MOVE, WINNING_MOVE};
pub use rules::{ForbiddenKind, ForbiddenRules};
