use std::sync::Arc;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::game_state::jieqi_types::{Move, Side};
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves_in_place, is_capture};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub reveals: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.reveals += rhs.reveals;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf counts after `depth` plies.
///
/// Dark pieces are revealed by their assumed identity, so the state must be
/// fully determinized.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut state = game_state.clone();
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }
    perft_recurse(generator, &mut state, depth, &mut total)?;
    Ok(total)
}

/// Root moves split across threads, one per move.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let mut state = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = play(&mut state, mv, &mut local, depth == 1).and_then(|()| {
                if depth > 1 {
                    perft_recurse(generator_ref.as_ref(), &mut state, depth - 1, &mut local)
                } else {
                    Ok(())
                }
            });
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle.join().map_err(|_| {
            MoveGenerationError::InvalidState("perft worker thread panicked".to_owned())
        })?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let moves = generator.generate_legal_moves(game_state)?;
    for mv in moves {
        play(game_state, mv, counts, depth == 1)?;
        if depth > 1 {
            perft_recurse(generator, game_state, depth - 1, counts)?;
        }
        unmake_move_in_place(game_state).map_err(|x| {
            MoveGenerationError::InvalidState(format!("unmake_move_in_place failed: {x}"))
        })?;
    }
    Ok(())
}

/// Make `mv`, tallying it when it is a leaf.
fn play(
    game_state: &mut GameState,
    mv: Move,
    counts: &mut PerftCounts,
    leaf: bool,
) -> MoveGenResult<()> {
    let capture = is_capture(game_state.mover_placement(), mv);
    let reveals_before = revealed_total(game_state);

    make_move_in_place(game_state, mv).map_err(|x| {
        MoveGenerationError::InvalidState(format!("make_move_in_place failed: {x}"))
    })?;

    if leaf {
        counts.nodes += 1;
        if capture {
            counts.captures += 1;
        }
        if revealed_total(game_state) > reveals_before {
            counts.reveals += 1;
        }
        if is_in_check(game_state) {
            counts.checks += 1;
            if generate_legal_moves_in_place(game_state)?.is_empty() {
                counts.checkmates += 1;
            }
        }
    }
    Ok(())
}

fn revealed_total(game_state: &GameState) -> u32 {
    game_state.dark.revealed_counts(Side::Red).total()
        + game_state.dark.revealed_counts(Side::Black).total()
}
