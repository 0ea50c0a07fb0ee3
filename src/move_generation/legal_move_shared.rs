use crate::game_state::jieqi_types::*;
use crate::moves::move_descriptions::pack_move;

/// Destination a bottom-camp piece may land on: empty or an enemy piece.
#[inline]
pub fn is_enterable(cell: Cell) -> bool {
    match cell {
        Cell::Empty => true,
        Cell::Revealed(camp, _) | Cell::Dark(camp, _) => camp == Camp::Top,
        Cell::Offboard => false,
    }
}

#[inline]
pub fn push_if_enterable(placement: &Placement, from: Square, to: Square, out: &mut Vec<Move>) {
    if is_enterable(placement[to as usize]) {
        out.push(pack_move(from, to));
    }
}

/// Square of the bottom camp's general, if on the board.
pub fn bottom_general_square(placement: &Placement) -> Option<Square> {
    find_general(placement, Camp::Bottom)
}

pub fn find_general(placement: &Placement, camp: Camp) -> Option<Square> {
    placement
        .iter()
        .position(|cell| *cell == Cell::Revealed(camp, PieceKind::King))
        .map(|index| index as Square)
}
