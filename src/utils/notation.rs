//! Coordinate and move-notation layer.
//!
//! External coordinates are zero-based `(row, col)` with row 0 on red's back
//! rank. Internally the 10x9 board sits inside a 16x16 grid with a three-cell
//! border of `Offboard` sentinels. Moves travel as 4-character strings such as
//! `b2e2` (column letter, row digit, column letter, row digit).

use crate::game_state::jieqi_types::{Cell, Placement, Square, BOARD_CELLS};
use crate::jieqi_errors::JieqiError;

pub const BOARD_ROWS: u8 = 10;
pub const BOARD_COLS: u8 = 9;

const RANK_TOP: u8 = 3;
const FILE_LEFT: u8 = 3;
const RANK_BOTTOM: u8 = RANK_TOP + BOARD_ROWS - 1;
const FILE_RIGHT: u8 = FILE_LEFT + BOARD_COLS - 1;

/// Sum of a square and its rotational counterpart.
const REVERSE_PIVOT: u8 = (RANK_TOP + RANK_BOTTOM) * 16 + (FILE_LEFT + FILE_RIGHT);

/// Map an external `(row, col)` to the internal padded index.
///
/// # Panics
/// Panics when `row > 9` or `col > 8`; callers validate user input first.
#[inline]
pub fn to_internal(row: u8, col: u8) -> Square {
    assert!(
        row < BOARD_ROWS && col < BOARD_COLS,
        "coordinate ({row}, {col}) is off the board"
    );
    (row + RANK_TOP) * 16 + (col + FILE_LEFT)
}

/// Inverse of [`to_internal`] for on-board squares.
#[inline]
pub const fn from_internal(square: Square) -> (u8, u8) {
    ((square >> 4) - RANK_TOP, (square & 0x0F) - FILE_LEFT)
}

#[inline]
pub const fn is_on_board(square: Square) -> bool {
    let rank = square >> 4;
    let file = square & 0x0F;
    rank >= RANK_TOP && rank <= RANK_BOTTOM && file >= FILE_LEFT && file <= FILE_RIGHT
}

/// Row of an on-board square, 0 being the bottom camp's back rank.
#[inline]
pub const fn row_of(square: Square) -> u8 {
    (square >> 4) - RANK_TOP
}

#[inline]
pub const fn col_of(square: Square) -> u8 {
    (square & 0x0F) - FILE_LEFT
}

/// Rotational counterpart of a square: `(row, col) -> (9 - row, 8 - col)`.
#[inline]
pub const fn reverse(square: Square) -> Square {
    REVERSE_PIVOT - square
}

/// All 90 on-board squares in external row-major order.
pub fn board_squares() -> impl Iterator<Item = Square> {
    (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| to_internal(row, col)))
}

/// An all-empty placement with sentinel borders.
pub fn empty_placement() -> Placement {
    let mut placement = [Cell::Offboard; BOARD_CELLS];
    for square in board_squares() {
        placement[square as usize] = Cell::Empty;
    }
    placement
}

/// Rotate a placement by 180 degrees and swap camps.
///
/// Dark cells stay dark: rotation never reveals identity.
pub fn rotate(placement: &Placement) -> Placement {
    let mut out = [Cell::Offboard; BOARD_CELLS];
    for square in board_squares() {
        out[reverse(square) as usize] = placement[square as usize].swap_camp();
    }
    out
}

/// Encode an internal move pair as 4-char notation.
pub fn encode_move(from: Square, to: Square) -> String {
    let mut out = String::with_capacity(4);
    push_square(&mut out, from);
    push_square(&mut out, to);
    out
}

fn push_square(out: &mut String, square: Square) {
    let (row, col) = from_internal(square);
    out.push(char::from(b'a' + col));
    out.push(char::from(b'0' + row));
}

/// Decode 4-char notation into internal `(from, to)`.
pub fn decode_move(notation: &str) -> Result<(Square, Square), JieqiError> {
    let bytes = notation.as_bytes();
    if bytes.len() != 4 {
        return Err(JieqiError::InvalidNotation(notation.to_owned()));
    }
    let from = decode_square(bytes[0], bytes[1])
        .ok_or_else(|| JieqiError::InvalidNotation(notation.to_owned()))?;
    let to = decode_square(bytes[2], bytes[3])
        .ok_or_else(|| JieqiError::InvalidNotation(notation.to_owned()))?;
    Ok((from, to))
}

fn decode_square(col_byte: u8, row_byte: u8) -> Option<Square> {
    if !(b'a'..=b'i').contains(&col_byte) || !row_byte.is_ascii_digit() {
        return None;
    }
    Some(to_internal(row_byte - b'0', col_byte - b'a'))
}

/// Re-express a move found on the rotated board in the other frame.
pub fn reverse_notation(notation: &str) -> Result<String, JieqiError> {
    let (from, to) = decode_move(notation)?;
    Ok(encode_move(reverse(from), reverse(to)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::jieqi_types::{Camp, PieceKind};

    #[test]
    fn corner_squares_map_inside_the_padding() {
        assert_eq!(to_internal(0, 0), 51);
        assert_eq!(to_internal(9, 8), 203);
        assert!(is_on_board(to_internal(4, 4)));
        assert!(!is_on_board(50));
        assert!(!is_on_board(204));
        assert!(!is_on_board(to_internal(5, 8) + 1));
    }

    #[test]
    #[should_panic]
    fn out_of_range_coordinate_is_fatal() {
        let _ = to_internal(10, 0);
    }

    #[test]
    fn reverse_is_an_involution_on_every_square() {
        for square in board_squares() {
            assert!(is_on_board(reverse(square)));
            assert_eq!(reverse(reverse(square)), square);
            let (row, col) = from_internal(square);
            assert_eq!(from_internal(reverse(square)), (9 - row, 8 - col));
        }
    }

    #[test]
    fn move_notation_round_trips_for_all_square_pairs() {
        for from in board_squares() {
            for to in board_squares() {
                let text = encode_move(from, to);
                assert_eq!(text.len(), 4);
                assert_eq!(decode_move(&text).expect("valid notation"), (from, to));
            }
        }
    }

    #[test]
    fn notation_uses_column_letter_then_row_digit() {
        assert_eq!(encode_move(to_internal(0, 0), to_internal(9, 8)), "a0i9");
        assert_eq!(encode_move(to_internal(2, 1), to_internal(2, 4)), "b2e2");
    }

    #[test]
    fn malformed_notation_is_rejected() {
        for bad in ["", "a0", "a0a", "j0a1", "a0aa", "ERROR", "a0a10"] {
            assert!(decode_move(bad).is_err(), "{bad} should not decode");
        }
    }

    #[test]
    fn reverse_notation_matches_square_reversal() {
        assert_eq!(reverse_notation("b2e2").expect("valid"), "h7e7");
        assert_eq!(reverse_notation("a0i9").expect("valid"), "i9a0");
    }

    #[test]
    fn rotate_swaps_camps_and_keeps_dark_markers() {
        let mut placement = empty_placement();
        placement[to_internal(0, 0) as usize] = Cell::Dark(Camp::Bottom, PieceKind::Rook);
        placement[to_internal(2, 1) as usize] = Cell::Revealed(Camp::Top, PieceKind::Cannon);

        let rotated = rotate(&placement);
        assert_eq!(
            rotated[to_internal(9, 8) as usize],
            Cell::Dark(Camp::Top, PieceKind::Rook)
        );
        assert_eq!(
            rotated[to_internal(7, 7) as usize],
            Cell::Revealed(Camp::Bottom, PieceKind::Cannon)
        );
        assert_eq!(rotated[0], Cell::Offboard);
        assert_eq!(rotate(&rotated), placement);
    }
}
