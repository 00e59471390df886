use crate::game::GameState;

/// Universal interface for move-selecting agents.
pub trait Agent {
    /// Select a column (1-based) to play in the current state.
    fn select_action(&mut self, state: &GameState) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Clone the agent into a boxed trait object.
    fn clone_agent(&self) -> Box<dyn Agent>;
}
