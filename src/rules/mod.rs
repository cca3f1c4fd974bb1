//! Game rules for Gobang
//!
//! - Win conditions (five or more in a row)
//! - Forbidden moves for Black (overline, double-four, double-three)

pub mod forbidden;
pub mod win;

// Re-exports for convenient access
pub use forbidden::{
    count_fours, count_open_threes, forbidden_kind, is_forbidden_at, is_overline, is_valid_move,
    ForbiddenKind, ForbiddenRules,
};
pub use win::{check_winner, has_five_at, winning_line};
