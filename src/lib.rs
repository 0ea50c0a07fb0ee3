//! Crate root module declarations for the Jieqi engine.
//!
//! Exposes the board model with its dark-piece bookkeeping, move generation,
//! search and evaluation, the thinkers, the host layer and the UCCI front end
//! so the binary, tests and benches can import stable module paths.

pub mod jieqi_errors;

pub mod game_state {
    pub mod dark_pieces;
    pub mod game_state;
    pub mod jieqi_rules;
    pub mod jieqi_types;
    pub mod undo_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod piece_deltas;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_advisor;
    pub mod legal_moves_bishop;
    pub mod legal_moves_cannon;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod empty_head_cannon;
    pub mod iterative_deepening;
    pub mod piece_square_tables;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_greedy;
    pub mod engine_trait;
}

pub mod host {
    pub mod engine_host;
    pub mod session_registry;
}

pub mod ucci {
    pub mod ucci_top;
}

pub mod utils {
    pub mod board_text;
    pub mod notation;
}
