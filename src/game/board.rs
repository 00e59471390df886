use crate::error::MoveError;

use super::Player;

/// Number of aligned pieces required to win.
pub const WIN_LENGTH: usize = 4;

/// Canonical board geometry.
pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

/// A Connect Four grid. Row 0 is the top; pieces settle toward the bottom,
/// so within any column the empty cells are contiguous at the top.
///
/// Cells are addressed 0-based via [`Board::get`]; moves are 1-based column
/// numbers in `1..=width`, matching the column labels shown to players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Both dimensions must fit at least one winning
    /// line.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= WIN_LENGTH && height >= WIN_LENGTH,
            "board must be at least {WIN_LENGTH}x{WIN_LENGTH}, got {width}x{height}"
        );
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Create an empty board with the canonical 7x6 geometry.
    pub fn standard() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position. Row 0 is the top.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// Whether `column` (1-based) exists and still has room for a piece.
    pub fn is_valid_move(&self, column: usize) -> bool {
        (1..=self.width).contains(&column) && self.get(0, column - 1) == Cell::Empty
    }

    /// Drop a piece in `column` (1-based), returning the row where it landed.
    /// The board is unchanged on error.
    pub fn place(&mut self, column: usize, player: Player) -> Result<usize, MoveError> {
        if !(1..=self.width).contains(&column) {
            return Err(MoveError::InvalidColumn {
                column,
                width: self.width,
            });
        }

        let col = column - 1;
        if self.get(0, col) != Cell::Empty {
            return Err(MoveError::ColumnFull(column));
        }

        // Find the lowest empty row in this column
        for row in (0..self.height).rev() {
            if self.get(row, col) == Cell::Empty {
                self.cells[row * self.width + col] = player.to_cell();
                return Ok(row);
            }
        }

        unreachable!("column with an empty top cell has an empty row");
    }

    /// All playable columns (1-based), in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (1..=self.width)
            .filter(|&column| self.is_valid_move(column))
            .collect()
    }

    /// Check if the board is completely full.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Number of empty cells remaining.
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Empty).count()
    }

    /// Whether `player` has four in a row anywhere on the board, scanning
    /// every valid starting cell in all four line directions.
    pub fn has_won(&self, player: Player) -> bool {
        let target = player.to_cell();
        let run = |row: usize, col: usize, dr: isize, dc: isize| {
            (0..WIN_LENGTH).all(|i| {
                let r = (row as isize + dr * i as isize) as usize;
                let c = (col as isize + dc * i as isize) as usize;
                self.get(r, c) == target
            })
        };

        // Horizontal
        for row in 0..self.height {
            for col in 0..=self.width - WIN_LENGTH {
                if run(row, col, 0, 1) {
                    return true;
                }
            }
        }

        // Vertical
        for col in 0..self.width {
            for row in 0..=self.height - WIN_LENGTH {
                if run(row, col, 1, 0) {
                    return true;
                }
            }
        }

        // Diagonal (down-right, \)
        for row in 0..=self.height - WIN_LENGTH {
            for col in 0..=self.width - WIN_LENGTH {
                if run(row, col, 1, 1) {
                    return true;
                }
            }
        }

        // Diagonal (up-right, /)
        for row in WIN_LENGTH - 1..self.height {
            for col in 0..=self.width - WIN_LENGTH {
                if run(row, col, -1, 1) {
                    return true;
                }
            }
        }

        false
    }

    /// Whether the game has concluded: either side won or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.has_won(Player::X) || self.has_won(Player::O) || self.is_full()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::standard();
        for row in 0..board.height() {
            for col in 0..board.width() {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.empty_cells(), 42);
    }

    #[test]
    fn test_place() {
        let mut board = Board::standard();

        // Drop first piece in column 4
        let row = board.place(4, Player::X).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::X);

        // Drop second piece in same column
        let row = board.place(4, Player::O).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::O);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::standard();

        // Fill column 1
        for _ in 0..board.height() {
            board.place(1, Player::X).unwrap();
        }

        assert!(!board.is_valid_move(1));
        let before = board.clone();
        assert_eq!(board.place(1, Player::O), Err(MoveError::ColumnFull(1)));
        assert_eq!(board, before, "failed place must leave the board unchanged");
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::standard();
        let before = board.clone();
        assert_eq!(
            board.place(8, Player::X),
            Err(MoveError::InvalidColumn {
                column: 8,
                width: 7
            })
        );
        assert_eq!(
            board.place(0, Player::X),
            Err(MoveError::InvalidColumn {
                column: 0,
                width: 7
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_legal_moves_ascending() {
        let mut board = Board::standard();
        assert_eq!(board.legal_moves(), vec![1, 2, 3, 4, 5, 6, 7]);

        for _ in 0..board.height() {
            board.place(3, Player::X).unwrap();
        }
        assert_eq!(board.legal_moves(), vec![1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut board = Board::standard();
        for col in 1..=board.width() {
            for _ in 0..board.height() {
                board.place(col, Player::X).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
        assert!(board.is_terminal());
        assert_eq!(board.empty_cells(), 0);
    }

    #[test]
    fn test_pieces_settle_bottom_up() {
        let mut board = Board::standard();
        board.place(5, Player::X).unwrap();
        board.place(5, Player::O).unwrap();
        board.place(5, Player::X).unwrap();

        // Empty cells are contiguous at the top of the column
        let col = 4;
        let mut seen_piece = false;
        for row in 0..board.height() {
            if board.get(row, col) != Cell::Empty {
                seen_piece = true;
            } else {
                assert!(!seen_piece, "empty cell below a piece at row {row}");
            }
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::standard();
        for col in 1..=4 {
            board.place(col, Player::X).unwrap();
        }
        assert!(board.has_won(Player::X));
        assert!(!board.has_won(Player::O));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::standard();
        for _ in 0..4 {
            board.place(4, Player::O).unwrap();
        }
        assert!(board.has_won(Player::O));
        assert!(!board.has_won(Player::X));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::standard();
        // Staircase rising to the right, X on top of each step
        board.place(1, Player::X).unwrap();

        board.place(2, Player::O).unwrap();
        board.place(2, Player::X).unwrap();

        board.place(3, Player::O).unwrap();
        board.place(3, Player::O).unwrap();
        board.place(3, Player::X).unwrap();

        board.place(4, Player::O).unwrap();
        board.place(4, Player::O).unwrap();
        board.place(4, Player::O).unwrap();
        board.place(4, Player::X).unwrap();

        assert!(board.has_won(Player::X));
        assert!(!board.has_won(Player::O));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::standard();
        // Staircase falling to the right
        board.place(7, Player::X).unwrap();

        board.place(6, Player::O).unwrap();
        board.place(6, Player::X).unwrap();

        board.place(5, Player::O).unwrap();
        board.place(5, Player::O).unwrap();
        board.place(5, Player::X).unwrap();

        board.place(4, Player::O).unwrap();
        board.place(4, Player::O).unwrap();
        board.place(4, Player::O).unwrap();
        board.place(4, Player::X).unwrap();

        assert!(board.has_won(Player::X));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::standard();
        for col in 1..=3 {
            board.place(col, Player::X).unwrap();
        }
        assert!(!board.has_won(Player::X));
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_win_detection_on_small_board() {
        let mut board = Board::new(4, 4);
        assert_eq!(board.legal_moves(), vec![1, 2, 3, 4]);
        for _ in 0..4 {
            board.place(2, Player::X).unwrap();
        }
        assert!(board.has_won(Player::X));
    }

    #[test]
    fn test_win_detection_on_wide_board() {
        let mut board = Board::new(9, 5);
        for col in 6..=9 {
            board.place(col, Player::O).unwrap();
        }
        assert!(board.has_won(Player::O));
    }

    #[test]
    #[should_panic(expected = "board must be at least")]
    fn test_rejects_too_small_geometry() {
        let _ = Board::new(3, 6);
    }
}
