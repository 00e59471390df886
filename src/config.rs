use std::path::Path;

use crate::engine::{DepthPolicy, Heuristic, MinimaxAgent, PairHeuristic, StreakHeuristic};
use crate::error::ConfigError;
use crate::game::{Board, DEFAULT_COLS, DEFAULT_ROWS, WIN_LENGTH};

/// Board geometry settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_COLS,
            height: DEFAULT_ROWS,
        }
    }
}

impl BoardConfig {
    pub fn build(&self) -> Board {
        Board::new(self.width, self.height)
    }
}

/// Search engine settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Derive the search depth from the number of empty cells. When false,
    /// `fixed_depth` is used for every move.
    pub dynamic_depth: bool,
    pub fixed_depth: u32,
    /// Evaluation function: "streaks" (center + aligned windows) or "pairs"
    /// (horizontal adjacency counting).
    pub heuristic: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            dynamic_depth: true,
            fixed_depth: 4,
            heuristic: "streaks".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn depth_policy(&self) -> DepthPolicy {
        if self.dynamic_depth {
            DepthPolicy::Dynamic
        } else {
            DepthPolicy::Fixed(self.fixed_depth)
        }
    }

    pub fn build_heuristic(&self) -> Box<dyn Heuristic> {
        match self.heuristic.as_str() {
            "pairs" => Box::new(PairHeuristic),
            _ => Box::new(StreakHeuristic),
        }
    }

    pub fn build_agent(&self) -> MinimaxAgent {
        MinimaxAgent::with_heuristic(self.depth_policy(), self.build_heuristic())
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width < WIN_LENGTH {
            return Err(ConfigError::Validation(format!(
                "board.width must be >= {WIN_LENGTH}"
            )));
        }
        if self.board.height < WIN_LENGTH {
            return Err(ConfigError::Validation(format!(
                "board.height must be >= {WIN_LENGTH}"
            )));
        }
        if self.engine.fixed_depth == 0 {
            return Err(ConfigError::Validation(
                "engine.fixed_depth must be >= 1".into(),
            ));
        }
        match self.engine.heuristic.as_str() {
            "streaks" | "pairs" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "engine.heuristic must be 'streaks' or 'pairs', got '{other}'"
                )));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
