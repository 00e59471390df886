use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use minimax_connect_four::config::AppConfig;
use minimax_connect_four::engine::{search, Agent};
use minimax_connect_four::game::{Board, Cell, GameOutcome, GameState, Player};

/// Analyze Connect Four positions with the minimax engine.
#[derive(Parser)]
#[command(name = "analyze", about = "Analyze a Connect Four position headlessly")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Columns (1-based) replayed from the empty board, X moving first
    #[arg(long, value_delimiter = ',')]
    moves: Vec<usize>,

    /// Override the configured depth policy with a fixed depth
    #[arg(long)]
    depth: Option<u32>,

    /// Play an engine-vs-engine game from the position and print each move
    #[arg(long)]
    selfplay: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        if depth == 0 {
            bail!("--depth must be at least 1");
        }
        config.engine.dynamic_depth = false;
        config.engine.fixed_depth = depth;
    }

    let mut state = GameState::with_board(config.board.build());
    for (i, &column) in cli.moves.iter().enumerate() {
        state = state
            .apply_move(column)
            .with_context(|| format!("move {} (column {column}) is not playable", i + 1))?;
    }

    print_board(state.board());

    if cli.selfplay {
        run_selfplay(state, &config)
    } else {
        report_best_move(&state, &config)
    }
}

fn report_best_move(state: &GameState, config: &AppConfig) -> Result<()> {
    match state.outcome() {
        Some(GameOutcome::Winner(player)) => {
            println!("Game over: {} wins", player.name());
            return Ok(());
        }
        Some(GameOutcome::Draw) => {
            println!("Game over: draw");
            return Ok(());
        }
        None => {}
    }

    let maximizing = state.current_player() == Player::X;
    let depth = config.engine.depth_policy().depth_for(state.board());
    let heuristic = config.engine.build_heuristic();
    let result = search(
        state.board(),
        maximizing,
        depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        heuristic.as_ref(),
    )
    .context("searching the position")?;

    let column = result.column.context("no playable column")?;
    println!("{} to move", state.current_player().name());
    println!(
        "Best move: column {column} (depth {depth}, score {})",
        format_score(result.score)
    );
    Ok(())
}

fn run_selfplay(mut state: GameState, config: &AppConfig) -> Result<()> {
    let mut engine = config.engine.build_agent();

    while !state.is_terminal() {
        let column = engine.select_action(&state);
        println!("{} plays column {column}", state.current_player().name());
        state = state
            .apply_move(column)
            .context("engine selected an unplayable column")?;
    }

    print_board(state.board());
    match state.outcome() {
        Some(GameOutcome::Winner(player)) => println!("{} wins", player.name()),
        Some(GameOutcome::Draw) => println!("Draw"),
        None => unreachable!("terminal state has an outcome"),
    }
    Ok(())
}

fn format_score(score: f64) -> String {
    if score == f64::INFINITY {
        "+inf, forced win for X".to_string()
    } else if score == f64::NEG_INFINITY {
        "-inf, forced win for O".to_string()
    } else {
        format!("{score:.1}")
    }
}

fn print_board(board: &Board) {
    let mut header = String::from(" ");
    for column in 1..=board.width() {
        header.push_str(&format!(" {column}  "));
    }
    println!("{header}");

    for row in 0..board.height() {
        let mut line = String::from("|");
        for col in 0..board.width() {
            let symbol = match board.get(row, col) {
                Cell::Empty => ' ',
                Cell::X => 'X',
                Cell::O => 'O',
            };
            line.push_str(&format!(" {symbol} |"));
        }
        println!("{line}");
    }
    println!();
}
