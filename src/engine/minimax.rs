use crate::error::SearchError;
use crate::game::{Board, GameState, Player};

use super::agent::Agent;
use super::heuristic::{Heuristic, StreakHeuristic};

/// Outcome of a search: the score of the position and the column to play.
/// `column` is `None` only for leaf evaluations inside the recursion, which
/// cannot surface through [`search`] on a playable position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub column: Option<usize>,
}

/// How deep to look ahead from a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Always search to the same depth.
    Fixed(u32),
    /// Search deeper as the board fills up and the branching factor shrinks:
    /// depth 3 above 30 empty cells, 5 above 15, otherwise 7.
    Dynamic,
}

impl DepthPolicy {
    pub fn depth_for(&self, board: &Board) -> u32 {
        match *self {
            DepthPolicy::Fixed(depth) => depth,
            DepthPolicy::Dynamic => {
                let empty = board.empty_cells();
                if empty > 30 {
                    3
                } else if empty > 15 {
                    5
                } else {
                    7
                }
            }
        }
    }
}

/// Sort `moves` by their one-ply lookahead score: each move is applied to a
/// disposable copy of the board as the side-to-move's piece and scored with
/// `heuristic`. Descending when maximizing, ascending when minimizing; ties
/// keep their original column order. The input board is not touched.
///
/// Exploring the most promising branch first maximizes alpha-beta cutoffs.
pub fn order_moves(
    board: &Board,
    moves: &[usize],
    maximizing: bool,
    heuristic: &dyn Heuristic,
) -> Vec<usize> {
    let mover = if maximizing { Player::X } else { Player::O };

    let mut scored: Vec<(f64, usize)> = moves
        .iter()
        .map(|&column| {
            let mut child = board.clone();
            child.place(column, mover).expect("move is legal");
            (heuristic.evaluate(&child), column)
        })
        .collect();

    // Vec::sort_by is stable, so equal scores keep the input order
    if maximizing {
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    } else {
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    scored.into_iter().map(|(_, column)| column).collect()
}

/// Minimax with alpha-beta pruning. Explores move sequences `depth` plies
/// deep and returns the best column for the side to move together with its
/// score. X maximizes, O minimizes.
///
/// Invoking this on a finished (or full) board, or with a zero depth, is a
/// contract violation and fails fast instead of producing a degraded result.
pub fn search(
    board: &Board,
    maximizing: bool,
    depth: u32,
    alpha: f64,
    beta: f64,
    heuristic: &dyn Heuristic,
) -> Result<SearchResult, SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    if board.is_terminal() {
        return Err(SearchError::TerminalPosition);
    }
    Ok(minimax(board, maximizing, depth, alpha, beta, heuristic))
}

fn minimax(
    board: &Board,
    maximizing: bool,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    heuristic: &dyn Heuristic,
) -> SearchResult {
    if depth == 0 || board.is_terminal() {
        return SearchResult {
            score: heuristic.evaluate(board),
            column: None,
        };
    }

    let moves = board.legal_moves();
    debug_assert!(!moves.is_empty(), "non-terminal board has a legal move");
    let ordered = order_moves(board, &moves, maximizing, heuristic);

    let mover = if maximizing { Player::X } else { Player::O };
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_column = ordered[0];

    for &column in &ordered {
        let mut child = board.clone();
        child.place(column, mover).expect("ordered move is legal");

        // An immediate win is always optimal; no need to recurse
        if child.has_won(mover) {
            return SearchResult {
                score: if maximizing {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                },
                column: Some(column),
            };
        }

        let value = minimax(&child, !maximizing, depth - 1, alpha, beta, heuristic).score;

        if maximizing {
            if value > best {
                best = value;
                best_column = column;
            }
            alpha = alpha.max(best);
        } else {
            if value < best {
                best = value;
                best_column = column;
            }
            beta = beta.min(best);
        }

        if alpha >= beta {
            break;
        }
    }

    SearchResult {
        score: best,
        column: Some(best_column),
    }
}

/// Agent backed by the alpha-beta search. Maximizes when playing X,
/// minimizes when playing O.
pub struct MinimaxAgent {
    depth_policy: DepthPolicy,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth_policy: DepthPolicy) -> Self {
        MinimaxAgent {
            depth_policy,
            heuristic: Box::new(StreakHeuristic),
        }
    }

    pub fn with_heuristic(depth_policy: DepthPolicy, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            depth_policy,
            heuristic,
        }
    }

    fn best_move(&self, state: &GameState) -> usize {
        let legal = state.legal_actions();
        assert!(!legal.is_empty(), "no legal moves available");

        let maximizing = state.current_player() == Player::X;
        let depth = self.depth_policy.depth_for(state.board());
        let result = search(
            state.board(),
            maximizing,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            self.heuristic.as_ref(),
        )
        .expect("preconditions hold on a playable position");

        result.column.unwrap_or(legal[0])
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> usize {
        self.best_move(state)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(MinimaxAgent::new(self.depth_policy))
    }
}
