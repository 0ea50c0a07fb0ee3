use crate::game_state::jieqi_types::*;

/// Single undo record for `make_move_in_place` / `unmake_move_in_place`.
///
/// Cells are stored as seen from the mover's perspective.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub mover: Side,
    pub moved_cell: Cell,
    pub captured_cell: Cell,

    /// Identity the moving dark piece was revealed as.
    pub revealed_mover: Option<PieceKind>,
    /// Identity a captured dark piece was revealed as.
    pub revealed_capture: Option<PieceKind>,

    pub prev_zobrist_key: u64,
}
