//! Parsing of the words a player may type instead of a move.

use clap::ValueEnum;

use crate::utils::render_game_state::PieceStyle;

pub const HELP_TEXT: &str = "\
Enter moves in Standard Algebraic Notation (e4, Nf3, exd5, O-O, e8=Q)
or long algebraic notation (e2e4, e7e8q).
Commands:
  help             show this help
  undo             take back the last move
  moves            list the legal moves
  fen              print the position as FEN
  pieces unicode   switch to Unicode chess pieces
  pieces letters   switch to letter-based chess pieces
  quit             leave the game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Help,
    Quit,
    Undo,
    Moves,
    Fen,
    /// `None` toggles between the two styles.
    Pieces(Option<PieceStyle>),
    UnknownPieceStyle(String),
    /// Anything else is treated as move text.
    Move(String),
}

pub fn parse_command(line: &str) -> SessionCommand {
    let trimmed = line.trim();
    let mut words = trimmed.split_whitespace();
    let first = words.next().unwrap_or_default().to_ascii_lowercase();

    match first.as_str() {
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        "undo" => SessionCommand::Undo,
        "moves" => SessionCommand::Moves,
        "fen" => SessionCommand::Fen,
        "pieces" => match words.next() {
            None => SessionCommand::Pieces(None),
            Some(mode) => match PieceStyle::from_str(mode, true) {
                Ok(style) => SessionCommand::Pieces(Some(style)),
                Err(_) => SessionCommand::UnknownPieceStyle(mode.to_owned()),
            },
        },
        _ => SessionCommand::Move(trimmed.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, SessionCommand};
    use crate::utils::render_game_state::PieceStyle;

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_command("HELP"), SessionCommand::Help);
        assert_eq!(parse_command(" exit "), SessionCommand::Quit);
        assert_eq!(parse_command("Undo"), SessionCommand::Undo);
        assert_eq!(parse_command("moves"), SessionCommand::Moves);
        assert_eq!(parse_command("fen"), SessionCommand::Fen);
    }

    #[test]
    fn piece_style_switching() {
        assert_eq!(
            parse_command("pieces letters"),
            SessionCommand::Pieces(Some(PieceStyle::Letters))
        );
        assert_eq!(
            parse_command("pieces Unicode"),
            SessionCommand::Pieces(Some(PieceStyle::Unicode))
        );
        assert_eq!(parse_command("pieces"), SessionCommand::Pieces(None));
        assert_eq!(
            parse_command("pieces emoji"),
            SessionCommand::UnknownPieceStyle("emoji".to_owned())
        );
    }

    #[test]
    fn everything_else_is_move_text() {
        assert_eq!(parse_command(" Nf3 "), SessionCommand::Move("Nf3".to_owned()));
        assert_eq!(parse_command("e2e4"), SessionCommand::Move("e2e4".to_owned()));
        // Move text keeps its case: B is a bishop, b a pawn file.
        assert_eq!(parse_command("Bb5"), SessionCommand::Move("Bb5".to_owned()));
    }
}
