use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::config::AppConfig;
use crate::engine::{Agent, MinimaxAgent};
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Player};

/// Interactive game: the human plays X, the engine answers as O.
pub struct App {
    config: AppConfig,
    game_state: GameState,
    engine: MinimaxAgent,
    selected_column: usize, // 0-based display index
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let game_state = GameState::with_board(config.board.build());
        let engine = config.engine.build_agent();
        let selected_column = config.board.width / 2;
        App {
            config,
            game_state,
            engine,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game_state.board().width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                // Reset game
                self.game_state = GameState::with_board(self.config.board.build());
                self.selected_column = self.config.board.width / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop the human's piece in the selected column, then let the engine
    /// reply. The engine searches synchronously; at the configured depths
    /// its reply is near-instant.
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column + 1) {
            Ok(()) => {}
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
                return;
            }
            Err(err) => {
                self.message = Some(err.to_string());
                return;
            }
        }

        if self.announce_outcome() {
            return;
        }

        let reply = self.engine.select_action(&self.game_state);
        if self.game_state.apply_move_mut(reply).is_ok() && !self.announce_outcome() {
            self.message = Some(format!("Engine drops column {reply}"));
        }
    }

    /// Set the outcome message if the game just ended.
    fn announce_outcome(&mut self) -> bool {
        match self.game_state.outcome() {
            Some(GameOutcome::Winner(player)) => {
                let verdict = if player == Player::X {
                    "You win!"
                } else {
                    "The engine wins."
                };
                self.message = Some(format!("{} connects four. {verdict}", player.name()));
                true
            }
            Some(GameOutcome::Draw) => {
                self.message = Some("It's a draw!".to_string());
                true
            }
            None => false,
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game_state, self.selected_column, &self.message);
    }
}
