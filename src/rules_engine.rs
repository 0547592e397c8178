//! Public face of the rules layer.
//!
//! The free functions are stateless and take the position explicitly.
//! `RulesEngine` owns the single active game for a front end, together with
//! the positions it came from so moves can be taken back.

use crate::errors::ChessResult;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;

pub use crate::game_state::game_status::{game_status, GameStatus};
pub use crate::move_generation::legal_move_apply::apply_move;
pub use crate::move_generation::legal_move_checks::is_in_check;
pub use crate::move_generation::legal_move_generator::legal_moves;

/// Standard initial position, White to move.
pub fn new_game() -> GameState {
    GameState::new_game()
}

#[derive(Debug, Clone)]
pub struct RulesEngine {
    state: GameState,
    // Earlier positions paired with the move played from each.
    history: Vec<(GameState, Move)>,
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine {
    pub fn new() -> Self {
        Self::with_state(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        GameState::from_fen(fen).map(Self::with_state)
    }

    pub fn with_state(state: GameState) -> Self {
        Self {
            state,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move()
    }

    pub fn legal_moves(&self) -> ChessResult<Vec<Move>> {
        legal_moves(&self.state)
    }

    /// Play `mv`. On error the engine is unchanged.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<GameStatus> {
        let next = apply_move(&self.state, mv)?;
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push((previous, mv));
        game_status(&self.state)
    }

    pub fn status(&self) -> ChessResult<GameStatus> {
        game_status(&self.state)
    }

    pub fn is_in_check(&self, color: Color) -> ChessResult<bool> {
        is_in_check(&self.state, color)
    }

    /// Take back the last move. Returns the move undone, or `None` at the
    /// start of the game.
    pub fn undo(&mut self) -> Option<Move> {
        let (previous, mv) = self.history.pop()?;
        self.state = previous;
        Some(mv)
    }

    /// Number of moves that can currently be taken back.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    pub fn fen(&self) -> String {
        self.state.to_fen()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|&(_, mv)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, game_status, is_in_check, legal_moves, new_game, GameStatus, RulesEngine};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::{Color, Move, Square};

    fn mv(text: &str) -> Move {
        let from: Square = text[0..2].parse().expect("source square");
        let to: Square = text[2..4].parse().expect("destination square");
        Move::new(from, to)
    }

    fn play(engine: &mut RulesEngine, moves: &[&str]) -> GameStatus {
        let mut status = GameStatus::Ongoing;
        for text in moves {
            status = engine.apply_move(mv(text)).expect("scripted move is legal");
        }
        status
    }

    #[test]
    fn ruy_lopez_leaves_black_out_of_check() {
        let mut engine = RulesEngine::new();
        let status = play(&mut engine, &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);
        assert_eq!(status, GameStatus::Ongoing);
        assert!(!engine.is_in_check(Color::Black).expect("valid state"));
        assert_eq!(engine.side_to_move(), Color::Black);
    }

    #[test]
    fn scholars_mate_is_checkmate() {
        let mut engine = RulesEngine::new();
        let status = play(
            &mut engine,
            &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
        );
        assert_eq!(status, GameStatus::Checkmate);
        assert!(engine.legal_moves().expect("valid state").is_empty());
    }

    #[test]
    fn castling_is_lost_once_the_king_has_moved() {
        let mut engine =
            RulesEngine::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        play(&mut engine, &["e1f1", "e8f8", "f1e1", "f8e8"]);
        let moves = engine.legal_moves().expect("valid state");
        assert!(!moves.contains(&mv("e1g1")));
        assert!(!moves.contains(&mv("e1c1")));
        assert!(matches!(
            engine.apply_move(mv("e1g1")),
            Err(ChessError::IllegalMove(_))
        ));
    }

    #[test]
    fn en_passant_is_only_available_immediately() {
        let mut engine = RulesEngine::new();
        play(&mut engine, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert!(engine.legal_moves().expect("valid state").contains(&mv("e5d6")));

        play(&mut engine, &["h2h3", "a6a5"]);
        assert!(!engine.legal_moves().expect("valid state").contains(&mv("e5d6")));
    }

    #[test]
    fn knight_shuffle_draws_by_repetition() {
        let mut engine = RulesEngine::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        assert_eq!(play(&mut engine, &shuffle), GameStatus::Ongoing);
        assert_eq!(play(&mut engine, &shuffle), GameStatus::DrawByRepetition);
        assert_eq!(engine.state().repetition_count(), 3);
    }

    #[test]
    fn irreversible_move_clears_repetition_history() {
        let mut engine = RulesEngine::new();
        play(&mut engine, &["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"]);
        assert_eq!(engine.state().repetition_count(), 1);
    }

    #[test]
    fn failed_move_does_not_change_the_engine() {
        let mut engine = RulesEngine::new();
        play(&mut engine, &["e2e4"]);
        let fen = engine.fen();
        assert!(engine.apply_move(mv("e4e5")).is_err());
        assert_eq!(engine.fen(), fen);
        assert_eq!(engine.ply_count(), 1);
    }

    #[test]
    fn undo_restores_previous_position_and_last_move() {
        let mut engine = RulesEngine::new();
        play(&mut engine, &["e2e4", "e7e5"]);
        assert_eq!(engine.last_move(), Some(mv("e7e5")));

        assert_eq!(engine.undo(), Some(mv("e7e5")));
        assert_eq!(engine.last_move(), Some(mv("e2e4")));
        assert_eq!(engine.side_to_move(), Color::Black);

        assert_eq!(engine.undo(), Some(mv("e2e4")));
        assert_eq!(engine.state(), &new_game());
        assert_eq!(engine.undo(), None);
    }

    #[test]
    fn free_functions_agree_with_the_engine() {
        let game = new_game();
        assert_eq!(legal_moves(&game).expect("valid state").len(), 20);
        assert!(!is_in_check(&game, Color::White).expect("valid state"));
        let next = apply_move(&game, mv("e2e4")).expect("e2e4 is legal");
        assert_eq!(game_status(&next).expect("valid state"), GameStatus::Ongoing);
    }
}
