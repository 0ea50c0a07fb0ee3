//! Full legal move generation pipeline.
//!
//! Dispatches each bottom-camp piece to its per-kind generator, then drops
//! moves that leave the mover's general attacked.

use crate::game_state::game_state::GameState;
use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_checks::is_bottom_general_attacked;
use crate::move_generation::legal_moves_advisor::generate_advisor_moves;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_cannon::generate_cannon_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::moves::move_descriptions::{move_from, move_to};
use crate::utils::notation::board_squares;

pub struct JieqiMoveGenerator;

impl MoveGenerator for JieqiMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<Move>> {
        generate_legal_moves_in_place(game_state)
    }
}

/// Legal moves for the side to move, in its own perspective.
#[inline]
pub fn generate_legal_moves_in_place(game_state: &GameState) -> MoveGenResult<Vec<Move>> {
    Ok(generate_legal_moves_for_placement(game_state.mover_placement()))
}

pub fn generate_legal_moves_for_placement(placement: &Placement) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(64);
    generate_pseudo_legal_moves(placement, &mut pseudo);

    let mut scratch = *placement;
    pseudo.retain(|mv| {
        let from = move_from(*mv) as usize;
        let to = move_to(*mv) as usize;
        let (moved, captured) = (scratch[from], scratch[to]);
        scratch[to] = moved;
        scratch[from] = Cell::Empty;
        let illegal = is_bottom_general_attacked(&scratch);
        scratch[from] = moved;
        scratch[to] = captured;
        !illegal
    });
    pseudo
}

/// Every move of the bottom camp ignoring whether its general is left
/// attacked.
pub fn generate_pseudo_legal_moves(placement: &Placement, out: &mut Vec<Move>) {
    for from in board_squares() {
        let (kind, dark) = match placement[from as usize] {
            Cell::Revealed(Camp::Bottom, kind) => (kind, false),
            Cell::Dark(Camp::Bottom, kind) => (kind, true),
            _ => continue,
        };
        match kind {
            PieceKind::Rook => generate_rook_moves(placement, from, out),
            PieceKind::Knight => generate_knight_moves(placement, from, out),
            PieceKind::Bishop => generate_bishop_moves(placement, from, dark, out),
            PieceKind::Advisor => generate_advisor_moves(placement, from, dark, out),
            PieceKind::King => generate_king_moves(placement, from, out),
            PieceKind::Cannon => generate_cannon_moves(placement, from, out),
            PieceKind::Pawn => generate_pawn_moves(placement, from, out),
        }
    }
}

/// Whether `mv` lands on an enemy piece of `placement`.
#[inline]
pub fn is_capture(placement: &Placement, mv: Move) -> bool {
    placement[move_to(mv) as usize].belongs_to(Camp::Top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::pack_move;
    use crate::utils::board_text::parse_external_cells;
    use crate::utils::notation::to_internal;

    #[test]
    fn opening_has_forty_four_moves_for_each_side() {
        let mut game = GameState::new_game();
        assert_eq!(generate_legal_moves_in_place(&game).expect("moves").len(), 44);
        game.side_to_move = Side::Black;
        assert_eq!(generate_legal_moves_in_place(&game).expect("moves").len(), 44);
    }

    #[test]
    fn opening_captures_are_the_two_cannon_jumps() {
        let game = GameState::new_game();
        let moves = generate_legal_moves_in_place(&game).expect("moves");
        let placement = game.mover_placement();
        let captures: Vec<Move> = moves
            .into_iter()
            .filter(|mv| is_capture(placement, *mv))
            .collect();
        assert_eq!(captures.len(), 2);
        assert!(captures.contains(&pack_move(to_internal(2, 1), to_internal(9, 1))));
    }

    #[test]
    fn pinned_piece_cannot_expose_the_general() {
        let mut text = [b'.'; 90];
        text[4] = b'K'; // (0, 4)
        text[2 * 9 + 4] = b'R'; // (2, 4) shields the file
        text[9 * 9 + 4] = b'r'; // (9, 4)
        text[9 * 9 + 3] = b'k'; // (9, 3)
        let placement = parse_external_cells(&text).expect("valid");

        let moves = generate_legal_moves_for_placement(&placement);
        let rook = to_internal(2, 4);
        assert!(moves.iter().all(|mv| move_from(*mv) != rook || move_to(*mv) % 16 == rook % 16));
        assert!(moves.contains(&pack_move(rook, to_internal(9, 4))));
    }

    #[test]
    fn empty_board_has_no_moves() {
        assert!(generate_legal_moves_in_place(&GameState::new_empty())
            .expect("moves")
            .is_empty());
    }
}
