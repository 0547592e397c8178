//! Crate root module declarations for the terminal chess game.
//!
//! The rules engine (game state, move generation, status detection) is
//! independent of everything else; notation helpers, the board renderer,
//! computer opponents and the interactive session are layered on top.

pub mod errors;
pub mod rules_engine;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod game_status;
    pub mod zobrist;
}

pub mod moves {
    pub mod leaper_attacks;
    pub mod move_descriptions;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod engines {
    pub mod engine_locator;
    pub mod engine_random;
    pub mod engine_stockfish;
    pub mod engine_trait;
}

pub mod session {
    pub mod session_commands;
    pub mod session_config;
    pub mod session_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod san;
}
