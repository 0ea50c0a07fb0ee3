//! Flat board text used at the host boundary, plus a terminal renderer.
//!
//! The text is 90 bytes in row-major order, row 0 (red's back rank) first.
//! Uppercase letters are red, lowercase black. `RNBAKCP` are revealed pieces,
//! `DEFGHI` dark markers for the rook, knight, bishop, advisor, cannon and
//! pawn start squares, `.` is empty.

use crate::game_state::jieqi_types::{Camp, Cell, PieceKind, Placement};
use crate::jieqi_errors::JieqiError;
use crate::utils::notation::{board_squares, empty_placement, to_internal, BOARD_COLS, BOARD_ROWS};

pub const EXTERNAL_CELLS: usize = 90;

/// Parse external cells into a red-perspective placement.
pub fn parse_external_cells(cells: &[u8]) -> Result<Placement, JieqiError> {
    if cells.len() != EXTERNAL_CELLS {
        return Err(JieqiError::InvalidBoardLength(cells.len()));
    }
    let mut placement = empty_placement();
    for (index, (square, code)) in board_squares().zip(cells.iter()).enumerate() {
        placement[square as usize] =
            cell_from_code(*code).ok_or(JieqiError::InvalidCellCode {
                index,
                code: char::from(*code),
            })?;
    }
    Ok(placement)
}

/// Serialize a red-perspective placement back to external cells.
pub fn placement_to_external(placement: &Placement) -> String {
    board_squares()
        .map(|square| cell_to_code(placement[square as usize]))
        .collect()
}

/// Bottom camp is uppercase, as in a red-perspective placement.
pub fn cell_from_code(code: u8) -> Option<Cell> {
    if code == b'.' {
        return Some(Cell::Empty);
    }
    let camp = if code.is_ascii_uppercase() {
        Camp::Bottom
    } else {
        Camp::Top
    };
    let cell = match code.to_ascii_uppercase() {
        b'R' => Cell::Revealed(camp, PieceKind::Rook),
        b'N' => Cell::Revealed(camp, PieceKind::Knight),
        b'B' => Cell::Revealed(camp, PieceKind::Bishop),
        b'A' => Cell::Revealed(camp, PieceKind::Advisor),
        b'K' => Cell::Revealed(camp, PieceKind::King),
        b'C' => Cell::Revealed(camp, PieceKind::Cannon),
        b'P' => Cell::Revealed(camp, PieceKind::Pawn),
        b'D' => Cell::Dark(camp, PieceKind::Rook),
        b'E' => Cell::Dark(camp, PieceKind::Knight),
        b'F' => Cell::Dark(camp, PieceKind::Bishop),
        b'G' => Cell::Dark(camp, PieceKind::Advisor),
        b'H' => Cell::Dark(camp, PieceKind::Cannon),
        b'I' => Cell::Dark(camp, PieceKind::Pawn),
        _ => return None,
    };
    Some(cell)
}

pub fn cell_to_code(cell: Cell) -> char {
    let (camp, upper) = match cell {
        Cell::Offboard | Cell::Empty => return '.',
        Cell::Revealed(camp, kind) => (camp, revealed_letter(kind)),
        Cell::Dark(camp, kind) => (camp, dark_letter(kind)),
    };
    match camp {
        Camp::Bottom => upper,
        Camp::Top => upper.to_ascii_lowercase(),
    }
}

fn revealed_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Rook => 'R',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Advisor => 'A',
        PieceKind::King => 'K',
        PieceKind::Cannon => 'C',
        PieceKind::Pawn => 'P',
    }
}

fn dark_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Rook => 'D',
        PieceKind::Knight => 'E',
        PieceKind::Bishop => 'F',
        PieceKind::Advisor => 'G',
        PieceKind::Cannon => 'H',
        PieceKind::Pawn => 'I',
        PieceKind::King => 'K',
    }
}

/// Render a placement for terminal output, top row first.
pub fn render_placement(placement: &Placement) -> String {
    let mut out = String::new();
    for row in (0..BOARD_ROWS).rev() {
        out.push(char::from(b'0' + row));
        out.push(' ');
        for col in 0..BOARD_COLS {
            out.push(cell_to_code(placement[to_internal(row, col) as usize]));
            if col + 1 < BOARD_COLS {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h i");
    out
}
