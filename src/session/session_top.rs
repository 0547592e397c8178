//! Interactive game loop.
//!
//! Renders the board, collects moves from the players (or from the computer
//! opponent on its turn), routes commands, and reports the result. Input and
//! output are generic so the loop can be driven by scripted text in tests.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::engines::engine_locator::locate_engine;
use crate::engines::engine_random::RandomOpponent;
use crate::engines::engine_stockfish::{StockfishOpponent, StockfishSettings};
use crate::engines::engine_trait::{Opponent, OpponentError};
use crate::errors::ChessError;
use crate::game_state::chess_types::Color;
use crate::game_state::game_status::GameStatus;
use crate::rules_engine::RulesEngine;
use crate::session::session_commands::{parse_command, SessionCommand, HELP_TEXT};
use crate::session::session_config::{GameMode, OpponentKind, SessionConfig};
use crate::utils::render_game_state::{render_board_marked, PieceStyle};
use crate::utils::san::{legal_moves_san, parse_move_input, to_san};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished(GameStatus),
    /// A player typed `quit` or input ran out.
    Abandoned,
}

/// Run a session on the process's stdin and stdout.
pub fn run_stdio_session(config: SessionConfig) -> io::Result<SessionOutcome> {
    let opponent = build_opponent(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = GameSession::new(config, opponent, stdin.lock(), stdout.lock());
    session.run()
}

/// The computer opponent for a pvc game, or `None` for pvp. An engine that
/// cannot be started is reported and the game continues as pvp.
pub fn build_opponent(config: &SessionConfig) -> Option<Box<dyn Opponent>> {
    if config.mode == GameMode::Pvp {
        return None;
    }

    match config.opponent {
        OpponentKind::Random => Some(Box::new(RandomOpponent::new())),
        OpponentKind::Stockfish => match start_stockfish(config) {
            Ok(engine) => Some(Box::new(engine)),
            Err(err) => {
                warn!(error = %err, "stockfish unavailable, falling back to player vs player");
                None
            }
        },
    }
}

fn start_stockfish(config: &SessionConfig) -> Result<StockfishOpponent, OpponentError> {
    let path = locate_engine(config.engine_path.as_deref())?;
    let settings = StockfishSettings {
        skill_level: config.difficulty,
        movetime: config.movetime,
        ..StockfishSettings::default()
    };
    StockfishOpponent::spawn(&path, settings)
}

pub struct GameSession<R, W> {
    engine: RulesEngine,
    opponent: Option<Box<dyn Opponent>>,
    computer_color: Option<Color>,
    piece_style: PieceStyle,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> GameSession<R, W> {
    pub fn new(config: SessionConfig, opponent: Option<Box<dyn Opponent>>, input: R, out: W) -> Self {
        let computer_color = opponent.as_ref().map(|_| config.human_color.opposite());
        Self {
            engine: RulesEngine::with_state(config.start_position),
            opponent,
            computer_color,
            piece_style: config.piece_style,
            input,
            out,
        }
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    pub fn run(&mut self) -> io::Result<SessionOutcome> {
        if let Some(opponent) = &self.opponent {
            writeln!(self.out, "Playing against {}.", opponent.name())?;
        } else {
            info!("starting player vs player game");
        }

        loop {
            let status = self.engine.status().map_err(io::Error::other)?;
            if status.is_game_over() {
                self.show_board()?;
                writeln!(self.out, "\nGame Over!")?;
                let message = self.result_message(status);
                writeln!(self.out, "{message}")?;
                info!(?status, fen = %self.engine.fen(), "game finished");
                return Ok(SessionOutcome::Finished(status));
            }

            self.show_board()?;
            if status == GameStatus::Check {
                writeln!(self.out, "Check!")?;
            }

            if self.computer_color == Some(self.engine.side_to_move()) {
                self.computer_turn()?;
                continue;
            }

            write!(self.out, "{}'s turn. Enter move (or 'help'): ", self.engine.side_to_move())?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                info!("input closed, leaving game");
                return Ok(SessionOutcome::Abandoned);
            }

            if !self.handle_line(&line)? {
                info!("player quit");
                return Ok(SessionOutcome::Abandoned);
            }
        }
    }

    /// Returns `false` when the player asked to leave.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match parse_command(line) {
            SessionCommand::Help => writeln!(self.out, "{HELP_TEXT}")?,
            SessionCommand::Quit => return Ok(false),
            SessionCommand::Undo => self.undo()?,
            SessionCommand::Moves => match legal_moves_san(self.engine.state()) {
                Ok(moves) => writeln!(self.out, "Legal moves: {}", moves.join(", "))?,
                Err(err) => writeln!(self.out, "{err}")?,
            },
            SessionCommand::Fen => writeln!(self.out, "{}", self.engine.fen())?,
            SessionCommand::Pieces(style) => {
                self.piece_style = style.unwrap_or(match self.piece_style {
                    PieceStyle::Unicode => PieceStyle::Letters,
                    PieceStyle::Letters => PieceStyle::Unicode,
                });
                let name = match self.piece_style {
                    PieceStyle::Unicode => "unicode",
                    PieceStyle::Letters => "letters",
                };
                writeln!(self.out, "Switched to {name} piece representation.")?;
            }
            SessionCommand::UnknownPieceStyle(mode) => {
                writeln!(self.out, "Invalid piece mode '{mode}'. Use 'unicode' or 'letters'.")?
            }
            SessionCommand::Move(text) if text.is_empty() => {}
            SessionCommand::Move(text) => self.human_move(&text)?,
        }
        Ok(true)
    }

    fn human_move(&mut self, text: &str) -> io::Result<()> {
        let result = parse_move_input(text, self.engine.state())
            .and_then(|mv| self.engine.apply_move(mv));

        match result {
            Ok(_) => {}
            Err(ChessError::IllegalMove(reason)) => {
                writeln!(self.out, "Illegal move! Try again. ({reason})")?
            }
            Err(ChessError::InvalidNotation(_) | ChessError::InvalidSquare(_)) => writeln!(
                self.out,
                "Invalid move notation! Use Standard Algebraic Notation (e4, Nf3, O-O) or long algebraic (e2e4)."
            )?,
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(())
    }

    fn computer_turn(&mut self) -> io::Result<()> {
        let Some(opponent) = self.opponent.as_mut() else {
            return Ok(());
        };

        let chosen = opponent.choose_move(self.engine.state());
        let name = opponent.name().to_owned();

        let applied = chosen.and_then(|mv| {
            let san = to_san(self.engine.state(), mv)?;
            self.engine.apply_move(mv)?;
            Ok(san)
        });

        match applied {
            Ok(san) => writeln!(self.out, "{name} plays {san}")?,
            Err(err) => {
                warn!(error = %err, "computer move failed, continuing as player vs player");
                writeln!(self.out, "Computer move error: {err}")?;
                writeln!(self.out, "Continuing as player vs player.")?;
                self.opponent = None;
                self.computer_color = None;
            }
        }
        Ok(())
    }

    /// One ply in pvp; in pvc, back to the human's previous turn.
    fn undo(&mut self) -> io::Result<()> {
        if self.engine.undo().is_none() {
            writeln!(self.out, "No moves to undo!")?;
            return Ok(());
        }

        while self.computer_color == Some(self.engine.side_to_move()) && self.engine.ply_count() > 0 {
            self.engine.undo();
        }
        writeln!(self.out, "Last move undone.")
    }

    /// After a move, the squares the side to move can now reach are marked.
    fn show_board(&mut self) -> io::Result<()> {
        let last_move = self.engine.last_move();
        let destinations = match last_move {
            Some(_) => self
                .engine
                .legal_moves()
                .map_or(0, |moves| moves.iter().fold(0u64, |mask, mv| mask | mv.to.bit())),
            None => 0,
        };
        let board =
            render_board_marked(self.engine.state(), self.piece_style, last_move, destinations);
        writeln!(self.out, "\n{board}")
    }

    fn result_message(&self, status: GameStatus) -> String {
        match status {
            GameStatus::Checkmate => {
                format!("Checkmate! {} wins!", self.engine.side_to_move().opposite())
            }
            GameStatus::Stalemate => "Stalemate! The game is a draw.".to_owned(),
            GameStatus::DrawByInsufficientMaterial => {
                "Insufficient material. The game is a draw.".to_owned()
            }
            GameStatus::DrawByFiftyMove => "Fifty-move rule. The game is a draw.".to_owned(),
            GameStatus::DrawByRepetition => "Threefold repetition. The game is a draw.".to_owned(),
            GameStatus::Ongoing | GameStatus::Check => String::new(),
        }
    }
}
