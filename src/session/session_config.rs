//! Command-line options and the validated session configuration built from
//! them.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::utils::render_game_state::PieceStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameMode {
    /// Two players share the terminal.
    Pvp,
    /// Play against the computer.
    Pvc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    Stockfish,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HumanColor {
    White,
    Black,
}

impl From<HumanColor> for Color {
    fn from(value: HumanColor) -> Self {
        match value {
            HumanColor::White => Color::White,
            HumanColor::Black => Color::Black,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "terminal-chess", version, about = "Chess in the terminal, against a friend or Stockfish")]
pub struct Args {
    /// Player vs player, or player vs computer.
    #[arg(long, value_enum, default_value_t = GameMode::Pvp)]
    pub mode: GameMode,

    /// Engine skill level, 1 (weakest) to 20.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=20))]
    pub difficulty: u8,

    /// Which computer opponent to use in pvc mode.
    #[arg(long, value_enum, default_value_t = OpponentKind::Stockfish)]
    pub opponent: OpponentKind,

    /// Side the human plays in pvc mode.
    #[arg(long, value_enum, default_value_t = HumanColor::White)]
    pub human_color: HumanColor,

    /// Stockfish executable; searched for in the usual places when omitted.
    #[arg(long, env = "STOCKFISH_PATH")]
    pub engine_path: Option<PathBuf>,

    /// Engine thinking time per move.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..=60_000))]
    pub movetime_ms: u64,

    #[arg(long, value_enum, default_value_t = PieceStyle::Unicode)]
    pub pieces: PieceStyle,

    /// Start from this position instead of the initial one.
    #[arg(long)]
    pub fen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub difficulty: u8,
    pub opponent: OpponentKind,
    pub human_color: Color,
    pub engine_path: Option<PathBuf>,
    pub movetime: Duration,
    pub piece_style: PieceStyle,
    pub start_position: GameState,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Pvp,
            difficulty: 2,
            opponent: OpponentKind::Stockfish,
            human_color: Color::White,
            engine_path: None,
            movetime: Duration::from_millis(100),
            piece_style: PieceStyle::Unicode,
            start_position: GameState::new_game(),
        }
    }
}

impl TryFrom<Args> for SessionConfig {
    type Error = ChessError;

    fn try_from(args: Args) -> ChessResult<Self> {
        let start_position = match args.fen.as_deref() {
            Some(fen) => GameState::from_fen(fen)?,
            None => GameState::new_game(),
        };

        Ok(Self {
            mode: args.mode,
            difficulty: args.difficulty,
            opponent: args.opponent,
            human_color: args.human_color.into(),
            engine_path: args.engine_path,
            movetime: Duration::from_millis(args.movetime_ms),
            piece_style: args.pieces,
            start_position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, GameMode, OpponentKind, SessionConfig};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::Color;
    use crate::utils::render_game_state::PieceStyle;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn defaults_match_a_plain_two_player_game() {
        let args = Args::try_parse_from(["terminal-chess"]).expect("no arguments is valid");
        let config = SessionConfig::try_from(args).expect("default config is valid");
        assert_eq!(config.mode, GameMode::Pvp);
        assert_eq!(config.difficulty, 2);
        assert_eq!(config.movetime, Duration::from_millis(100));
        assert_eq!(config.piece_style, PieceStyle::Unicode);
        assert_eq!(config.human_color, Color::White);
    }

    #[test]
    fn computer_game_options() {
        let args = Args::try_parse_from([
            "terminal-chess",
            "--mode",
            "pvc",
            "--difficulty",
            "20",
            "--opponent",
            "random",
            "--human-color",
            "black",
            "--pieces",
            "letters",
            "--engine-path",
            "/opt/sf",
        ])
        .expect("arguments are valid");
        let config = SessionConfig::try_from(args).expect("config is valid");
        assert_eq!(config.mode, GameMode::Pvc);
        assert_eq!(config.difficulty, 20);
        assert_eq!(config.opponent, OpponentKind::Random);
        assert_eq!(config.human_color, Color::Black);
        assert_eq!(config.piece_style, PieceStyle::Letters);
        assert_eq!(config.engine_path.as_deref(), Some(std::path::Path::new("/opt/sf")));
    }

    #[test]
    fn difficulty_outside_range_is_rejected() {
        assert!(Args::try_parse_from(["terminal-chess", "--difficulty", "0"]).is_err());
        assert!(Args::try_parse_from(["terminal-chess", "--difficulty", "21"]).is_err());
        assert!(Args::try_parse_from(["terminal-chess", "--mode", "online"]).is_err());
    }

    #[test]
    fn start_fen_is_validated() {
        let args = Args::try_parse_from(["terminal-chess", "--fen", "8/8/8/8/8/8/8/8 w - - 0 1"])
            .expect("arguments are valid");
        assert!(matches!(
            SessionConfig::try_from(args),
            Err(ChessError::InvalidState(_))
        ));
    }
}
