use crate::game_state::jieqi_types::{Move, Square};
use crate::utils::notation::encode_move;

const FROM_SHIFT: u16 = 8;
const SQUARE_MASK: u16 = 0xFF;

#[inline]
pub const fn pack_move(from: Square, to: Square) -> Move {
    ((from as u16) << FROM_SHIFT) | to as u16
}

#[inline]
pub const fn move_from(mv: Move) -> Square {
    ((mv >> FROM_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn move_to(mv: Move) -> Square {
    (mv & SQUARE_MASK) as Square
}

/// 4-char notation of a packed move, in the frame it was generated in.
#[inline]
pub fn move_to_notation(mv: Move) -> String {
    encode_move(move_from(mv), move_to(mv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::notation::to_internal;

    #[test]
    fn pack_and_unpack_squares() {
        let from = to_internal(2, 1);
        let to = to_internal(9, 1);
        let mv = pack_move(from, to);
        assert_eq!(move_from(mv), from);
        assert_eq!(move_to(mv), to);
        assert_eq!(move_to_notation(mv), "b2b9");
    }
}
