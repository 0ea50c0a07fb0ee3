//! Attack detection against the bottom camp's general.
//!
//! Every placement puts the side of interest at the bottom, so one routine
//! answers "is this side in check" for both players.

use crate::game_state::{game_state::GameState, jieqi_types::*};
use crate::move_generation::legal_move_shared::bottom_general_square;
use crate::moves::piece_deltas::{offset, BISHOP_JUMPS, DIAGONAL, KNIGHT_ATTACKERS, ORTHOGONAL};

#[inline]
pub fn is_side_in_check(game_state: &GameState, side: Side) -> bool {
    is_bottom_general_attacked(&game_state.placement[side.index()])
}

#[inline]
pub fn is_in_check(game_state: &GameState) -> bool {
    is_side_in_check(game_state, game_state.side_to_move)
}

/// False when the bottom general is missing.
pub fn is_bottom_general_attacked(placement: &Placement) -> bool {
    match bottom_general_square(placement) {
        Some(square) => is_square_attacked_by_top(placement, square),
        None => false,
    }
}

/// Whether a top-camp piece could capture on `square` (a palace square).
///
/// Dark advisors and bishops cannot leave their own half, so only revealed
/// ones are considered.
pub fn is_square_attacked_by_top(placement: &Placement, square: Square) -> bool {
    for delta in ORTHOGONAL {
        let mut to = offset(square, delta);
        while placement[to as usize].is_empty() {
            to = offset(to, delta);
        }
        let first = placement[to as usize];
        if first.moves_as(Camp::Top, PieceKind::Rook) {
            return true;
        }
        if delta == 16 && first == Cell::Revealed(Camp::Top, PieceKind::King) {
            return true;
        }
        if first == Cell::Offboard {
            continue;
        }
        to = offset(to, delta);
        while placement[to as usize].is_empty() {
            to = offset(to, delta);
        }
        if placement[to as usize].moves_as(Camp::Top, PieceKind::Cannon) {
            return true;
        }
    }

    for (eye, sources) in KNIGHT_ATTACKERS {
        if !placement[offset(square, eye) as usize].is_empty() {
            continue;
        }
        for source in sources {
            if placement[offset(square, source) as usize].moves_as(Camp::Top, PieceKind::Knight) {
                return true;
            }
        }
    }

    for delta in [16, -1, 1] {
        if placement[offset(square, delta) as usize].moves_as(Camp::Top, PieceKind::Pawn) {
            return true;
        }
    }

    for (jump, eye) in BISHOP_JUMPS.into_iter().zip(DIAGONAL) {
        if placement[offset(square, eye) as usize] == Cell::Revealed(Camp::Top, PieceKind::Advisor)
        {
            return true;
        }
        if placement[offset(square, eye) as usize].is_empty()
            && placement[offset(square, jump) as usize]
                == Cell::Revealed(Camp::Top, PieceKind::Bishop)
        {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::notation::{empty_placement, to_internal};

    fn with_general() -> Placement {
        let mut placement = empty_placement();
        placement[to_internal(0, 4) as usize] = Cell::Revealed(Camp::Bottom, PieceKind::King);
        placement
    }

    #[test]
    fn facing_generals_count_as_check() {
        let mut placement = with_general();
        placement[to_internal(9, 4) as usize] = Cell::Revealed(Camp::Top, PieceKind::King);
        assert!(is_bottom_general_attacked(&placement));
        placement[to_internal(5, 4) as usize] = Cell::Dark(Camp::Bottom, PieceKind::Pawn);
        assert!(!is_bottom_general_attacked(&placement));
    }

    #[test]
    fn cannon_needs_a_screen_rook_does_not() {
        let mut placement = with_general();
        placement[to_internal(0, 8) as usize] = Cell::Dark(Camp::Top, PieceKind::Cannon);
        assert!(!is_bottom_general_attacked(&placement));
        placement[to_internal(0, 6) as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Bishop);
        assert!(is_bottom_general_attacked(&placement));

        let mut placement = with_general();
        placement[to_internal(0, 0) as usize] = Cell::Revealed(Camp::Top, PieceKind::Rook);
        assert!(is_bottom_general_attacked(&placement));
    }

    #[test]
    fn knight_leg_blocks_the_check() {
        let mut placement = with_general();
        placement[to_internal(2, 5) as usize] = Cell::Revealed(Camp::Top, PieceKind::Knight);
        assert!(is_bottom_general_attacked(&placement));
        placement[to_internal(1, 5) as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Advisor);
        assert!(!is_bottom_general_attacked(&placement));
    }

    #[test]
    fn pawns_attack_from_front_and_sides_only() {
        let mut placement = with_general();
        placement[to_internal(1, 4) as usize] = Cell::Revealed(Camp::Top, PieceKind::Pawn);
        assert!(is_bottom_general_attacked(&placement));

        let mut placement = with_general();
        placement[to_internal(0, 3) as usize] = Cell::Revealed(Camp::Top, PieceKind::Pawn);
        assert!(is_bottom_general_attacked(&placement));
    }

    #[test]
    fn revealed_advisor_and_bishop_reach_the_palace() {
        let mut placement = with_general();
        placement[to_internal(1, 5) as usize] = Cell::Revealed(Camp::Top, PieceKind::Advisor);
        assert!(is_bottom_general_attacked(&placement));

        let mut placement = with_general();
        placement[to_internal(2, 6) as usize] = Cell::Revealed(Camp::Top, PieceKind::Bishop);
        assert!(is_bottom_general_attacked(&placement));
        placement[to_internal(1, 5) as usize] = Cell::Revealed(Camp::Bottom, PieceKind::Pawn);
        assert!(!is_bottom_general_attacked(&placement));
    }

    #[test]
    fn opening_position_has_no_check() {
        let game = GameState::new_game();
        assert!(!is_side_in_check(&game, Side::Red));
        assert!(!is_side_in_check(&game, Side::Black));
    }
}
