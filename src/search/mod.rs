//! Search module
//!
//! Contains:
//! - Candidate generation and ranking
//! - Alpha-Beta search to a fixed depth
//! - Fallback scans for boards with no nearby candidates

pub mod alphabeta;
pub mod candidates;

pub use alphabeta::{SearchResult, Searcher};
pub use candidates::{
    first_available, generate_candidates, rank_candidates, sort_by_score, spiral_fallback,
    MoveScore,
};
