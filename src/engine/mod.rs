//! Adversarial search: static evaluation heuristics, minimax with alpha-beta
//! pruning, and the agents that play with them.

mod agent;
mod heuristic;
mod minimax;
mod random;

pub use agent::Agent;
pub use heuristic::{Heuristic, PairHeuristic, StreakHeuristic};
pub use minimax::{order_moves, search, DepthPolicy, MinimaxAgent, SearchResult};
pub use random::RandomAgent;
