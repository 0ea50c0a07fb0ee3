//! Make/unmake on both perspective arrays.
//!
//! A moving dark piece is revealed as its assumed identity, and so is a dark
//! piece it captures. The hash is updated incrementally and every position
//! reached is counted in the repetition history.

use crate::game_state::game_state::{to_red_square, GameState};
use crate::game_state::jieqi_types::*;
use crate::moves::move_descriptions::{move_from, move_to};
use crate::search::zobrist::{cell_key, side_to_move_key};
use crate::utils::notation::reverse;

pub fn apply_move(game_state: &GameState, mv: Move) -> Result<GameState, String> {
    let mut next = game_state.clone();
    make_move_in_place(&mut next, mv)?;
    Ok(next)
}

pub fn make_move_in_place(game_state: &mut GameState, mv: Move) -> Result<(), String> {
    let mover = game_state.side_to_move;
    let enemy = mover.opposite();
    let from = move_from(mv);
    let to = move_to(mv);

    let own = &game_state.placement[mover.index()];
    let moved_cell = own[from as usize];
    let captured_cell = own[to as usize];
    if !moved_cell.belongs_to(Camp::Bottom) {
        return Err(format!("no piece of the side to move on square {from}"));
    }
    if captured_cell == Cell::Offboard || captured_cell.belongs_to(Camp::Bottom) {
        return Err(format!("square {to} cannot be entered"));
    }

    let red_from = to_red_square(mover, from);
    let red_to = to_red_square(mover, to);

    let revealed_mover = match moved_cell {
        Cell::Dark(..) => Some(
            game_state
                .dark
                .assumed_value(red_from)
                .ok_or_else(|| format!("dark piece on square {from} has no assumed identity"))?,
        ),
        _ => None,
    };
    let revealed_capture = match captured_cell {
        Cell::Dark(..) => Some(
            game_state
                .dark
                .assumed_value(red_to)
                .ok_or_else(|| format!("dark piece on square {to} has no assumed identity"))?,
        ),
        _ => None,
    };

    if let Some(kind) = revealed_mover {
        game_state.dark.reveal(mover, red_from, kind);
    }
    if let Some(kind) = revealed_capture {
        game_state.dark.reveal(enemy, red_to, kind);
    }

    let placed_cell = match revealed_mover {
        Some(kind) => Cell::Revealed(Camp::Bottom, kind),
        None => moved_cell,
    };

    let prev_zobrist_key = game_state.zobrist_key;
    game_state.zobrist_key ^= cell_key(mover, moved_cell, red_from)
        ^ cell_key(enemy, captured_cell, red_to)
        ^ cell_key(mover, placed_cell, red_to)
        ^ side_to_move_key();

    write_both(game_state, mover, from, Cell::Empty);
    write_both(game_state, mover, to, placed_cell);

    game_state.undo_stack.push(UndoState {
        mv,
        mover,
        moved_cell,
        captured_cell,
        revealed_mover,
        revealed_capture,
        prev_zobrist_key,
    });

    if mover == Side::Black {
        game_state.round = game_state.round.saturating_add(1);
    }
    game_state.side_to_move = enemy;
    game_state.ply = game_state.ply.saturating_add(1);
    game_state.record_position();

    debug_assert!(game_state.is_mirror_consistent());
    Ok(())
}

pub fn unmake_move_in_place(game_state: &mut GameState) -> Result<(), String> {
    let undo = game_state
        .undo_stack
        .pop()
        .ok_or_else(|| "no move to unmake".to_owned())?;

    game_state.forget_position();

    let mover = undo.mover;
    let from = move_from(undo.mv);
    let to = move_to(undo.mv);

    write_both(game_state, mover, from, undo.moved_cell);
    write_both(game_state, mover, to, undo.captured_cell);

    if let Some(kind) = undo.revealed_capture {
        game_state
            .dark
            .unreveal(mover.opposite(), to_red_square(mover, to), kind);
    }
    if let Some(kind) = undo.revealed_mover {
        game_state
            .dark
            .unreveal(mover, to_red_square(mover, from), kind);
    }

    if mover == Side::Black {
        game_state.round = game_state.round.saturating_sub(1);
    }
    game_state.side_to_move = mover;
    game_state.ply = game_state.ply.saturating_sub(1);
    game_state.zobrist_key = undo.prev_zobrist_key;

    debug_assert!(game_state.is_mirror_consistent());
    Ok(())
}

/// Write `cell` (as seen by `perspective`) into both placements.
#[inline]
fn write_both(game_state: &mut GameState, perspective: Side, square: Square, cell: Cell) {
    game_state.placement[perspective.index()][square as usize] = cell;
    game_state.placement[perspective.opposite().index()][reverse(square) as usize] =
        cell.swap_camp();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::jieqi_rules::INITIAL_CONCEALED_COUNTS;
    use crate::move_generation::legal_move_generator::generate_legal_moves_in_place;
    use crate::moves::move_descriptions::pack_move;
    use crate::search::zobrist::compute_zobrist_key;
    use crate::utils::notation::to_internal;
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    fn determinized_game(seed: u64) -> GameState {
        let mut game = GameState::new_game();
        game.generate_random_map(&mut StdRng::seed_from_u64(seed));
        game
    }

    fn assert_conserved(game: &GameState) {
        for side in [Side::Red, Side::Black] {
            for kind in PieceKind::CONCEALABLE {
                assert_eq!(
                    game.dark.remaining_concealed(side).count(kind)
                        + game.dark.revealed_counts(side).count(kind),
                    INITIAL_CONCEALED_COUNTS.count(kind)
                );
            }
        }
    }

    #[test]
    fn moving_a_dark_piece_reveals_it_and_unmake_hides_it() {
        let mut game = determinized_game(11);
        let from = to_internal(3, 0);
        let assumed = game.dark.assumed_value(from).expect("assigned");
        let key_before = game.zobrist_key;

        make_move_in_place(&mut game, pack_move(from, to_internal(4, 0))).expect("legal");
        assert_eq!(
            game.placement[Side::Red.index()][to_internal(4, 0) as usize],
            Cell::Revealed(Camp::Bottom, assumed)
        );
        assert_eq!(game.side_to_move, Side::Black);
        assert_eq!(game.dark.revealed_counts(Side::Red).count(assumed), 1);
        assert!(game.is_mirror_consistent());
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));

        unmake_move_in_place(&mut game).expect("unmake");
        assert_eq!(
            game.placement[Side::Red.index()][from as usize],
            Cell::Dark(Camp::Bottom, PieceKind::Pawn)
        );
        assert_eq!(game.dark.assumed_value(from), Some(assumed));
        assert_eq!(game.zobrist_key, key_before);
        assert_eq!(game.side_to_move, Side::Red);
    }

    #[test]
    fn capture_of_a_dark_piece_reveals_the_victim() {
        let mut game = determinized_game(5);
        let victim_square = to_internal(9, 1);
        let victim = game.dark.assumed_value(victim_square).expect("assigned");

        make_move_in_place(&mut game, pack_move(to_internal(2, 1), victim_square)).expect("legal");
        assert_eq!(game.dark.revealed_counts(Side::Black).count(victim), 1);
        assert_eq!(game.dark.assumed_value(victim_square), None);

        unmake_move_in_place(&mut game).expect("unmake");
        assert_eq!(game.dark.revealed_counts(Side::Black).count(victim), 0);
        assert_eq!(game.dark.assumed_value(victim_square), Some(victim));
    }

    #[test]
    fn black_moves_are_written_in_both_frames() {
        let mut game = determinized_game(9);
        game.side_to_move = Side::Black;
        game.zobrist_key = compute_zobrist_key(&game);

        // black's own (3, 4) pawn, red frame (6, 4)
        make_move_in_place(&mut game, pack_move(to_internal(3, 4), to_internal(4, 4)))
            .expect("legal");
        assert!(game.is_mirror_consistent());
        assert!(game.placement[Side::Red.index()][to_internal(5, 4) as usize]
            .belongs_to(Camp::Top));
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
        assert_eq!(game.round, 1);
    }

    #[test]
    fn random_playout_keeps_every_invariant() {
        let mut game = determinized_game(2024);
        let mut rng = StdRng::seed_from_u64(99);
        let start_key = game.zobrist_key;
        let mut made = 0;

        for _ in 0..60 {
            let moves = generate_legal_moves_in_place(&game).expect("moves");
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            make_move_in_place(&mut game, *mv).expect("legal");
            made += 1;
            assert!(game.is_mirror_consistent());
            assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
            assert_conserved(&game);
        }

        for _ in 0..made {
            unmake_move_in_place(&mut game).expect("unmake");
            assert_conserved(&game);
        }
        assert_eq!(game.zobrist_key, start_key);
        assert_eq!(game.history.get(&start_key), Some(&1));
        assert_eq!(game.history.len(), 1);
    }

    #[test]
    fn rejects_moves_from_empty_or_onto_own_squares() {
        let mut game = determinized_game(1);
        assert!(make_move_in_place(&mut game, pack_move(to_internal(4, 4), to_internal(5, 4))).is_err());
        assert!(make_move_in_place(&mut game, pack_move(to_internal(0, 0), to_internal(0, 1))).is_err());
        assert!(unmake_move_in_place(&mut GameState::new_game()).is_err());
    }
}
