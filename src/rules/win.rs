//! Win condition: five or more stones in a row

use crate::board::{Axis, Board, Player, Pos};

/// Whether the stone of `player` at `pos` is part of five or more in a row.
///
/// Returns false when `pos` does not hold a `player` stone.
#[inline]
pub fn has_five_at(board: &Board, pos: Pos, player: Player) -> bool {
    board.get(pos) == player.stone() && crate::eval::would_win(board, pos, player)
}

/// Cells of the first five-or-longer line of `player`, scanning stones in
/// row-major order.
pub fn winning_line(board: &Board, player: Player) -> Option<Vec<Pos>> {
    let stone = player.stone();

    for pos in board.stones(player).iter_ones() {
        for axis in Axis::ALL {
            let (dr, dc) = axis.delta();
            // Start of segment only
            if pos.offset(dr, dc, -1).map(|p| board.get(p)) == Some(stone) {
                continue;
            }
            let line: Vec<Pos> = (0..)
                .map_while(|step| pos.offset(dr, dc, step).filter(|&p| board.get(p) == stone))
                .collect();
            if line.len() >= 5 {
                return Some(line);
            }
        }
    }
    None
}

/// The player with five in a row, if any. Black is checked first.
pub fn check_winner(board: &Board) -> Option<Player> {
    Player::ALL
        .into_iter()
        .find(|&player| winning_line(board, player).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_horizontal_five() {
        let mut board = Board::new();
        for col in 5..10 {
            board.place_stone(Pos::new(9, col), Player::Black).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Player::Black));
        assert!(has_five_at(&board, Pos::new(9, 7), Player::Black));
        assert_eq!(
            winning_line(&board, Player::Black),
            Some((5..10).map(|c| Pos::new(9, c)).collect())
        );
    }

    #[test]
    fn test_anti_diagonal_five() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, 10 - i), Player::White).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Player::White));
        assert_eq!(winning_line(&board, Player::White).map(|l| l.len()), Some(5));
    }

    #[test]
    fn test_four_is_not_win() {
        let mut board = Board::new();
        for row in 0..4 {
            board.place_stone(Pos::new(row, 0), Player::Black).unwrap();
        }
        assert_eq!(check_winner(&board), None);
        assert!(!has_five_at(&board, Pos::new(0, 0), Player::Black));
    }

    #[test]
    fn test_overline_wins() {
        let mut board = Board::new();
        for col in 0..6 {
            board.place_stone(Pos::new(18, col), Player::White).unwrap();
        }
        assert_eq!(winning_line(&board, Player::White).map(|l| l.len()), Some(6));
    }

    #[test]
    fn test_has_five_requires_own_stone() {
        let mut board = Board::new();
        for col in 0..4 {
            board.place_stone(Pos::new(3, col), Player::Black).unwrap();
        }
        assert!(
            !has_five_at(&board, Pos::new(3, 4), Player::Black),
            "Empty cell is not part of a five"
        );
    }
}
