//! Core value types shared by every layer of the engine.
//!
//! Squares index a padded 16x16 grid, cells describe what occupies a square
//! from one perspective, and camps name the owner of a cell relative to that
//! perspective.

pub use crate::game_state::dark_pieces::{DarkPieceModel, PieceCounts};
pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Index into a padded 256-cell placement array.
pub type Square = u8;

/// Packed move: `from << 8 | to`, both in the mover's perspective.
pub type Move = u16;

pub const BOARD_CELLS: usize = 256;

/// One perspective's view of the board.
pub type Placement = [Cell; BOARD_CELLS];

/// Absolute player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }
}

/// Owner of a cell relative to the perspective the placement is drawn from.
///
/// In `placement[p]`, `Bottom` is side `p` and plays from rows 0..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Camp {
    Bottom,
    Top,
}

impl Camp {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Camp::Bottom => 0,
            Camp::Top => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Camp::Bottom => Camp::Top,
            Camp::Top => Camp::Bottom,
        }
    }

    /// Absolute side owning this camp when viewed from `perspective`.
    #[inline]
    pub const fn side_from(self, perspective: Side) -> Side {
        match self {
            Camp::Bottom => perspective,
            Camp::Top => perspective.opposite(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Rook,
    Knight,
    Bishop,
    Advisor,
    King,
    Cannon,
    Pawn,
}

pub const PIECE_KIND_COUNT: usize = 7;

impl PieceKind {
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Advisor,
        PieceKind::King,
        PieceKind::Cannon,
        PieceKind::Pawn,
    ];

    /// Kinds that can start face-down. Generals never do.
    pub const CONCEALABLE: [PieceKind; 6] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Advisor,
        PieceKind::Cannon,
        PieceKind::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Rook => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Advisor => 3,
            PieceKind::King => 4,
            PieceKind::Cannon => 5,
            PieceKind::Pawn => 6,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PieceKind::Rook),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Advisor),
            4 => Some(PieceKind::King),
            5 => Some(PieceKind::Cannon),
            6 => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Contents of one square as seen from a perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Offboard,
    Empty,
    Revealed(Camp, PieceKind),
    /// Face-down piece. The kind is the marker: the piece whose start square
    /// it occupies, which also decides how it moves until revealed.
    Dark(Camp, PieceKind),
}

/// Number of distinct occupied-cell codes: seven revealed kinds plus six dark
/// markers.
pub const CELL_CODE_COUNT: usize = 13;

impl Cell {
    #[inline]
    pub const fn camp(self) -> Option<Camp> {
        match self {
            Cell::Revealed(camp, _) | Cell::Dark(camp, _) => Some(camp),
            Cell::Offboard | Cell::Empty => None,
        }
    }

    /// Kind that governs movement: the real kind when revealed, the marker
    /// kind when dark.
    #[inline]
    pub const fn movement_kind(self) -> Option<PieceKind> {
        match self {
            Cell::Revealed(_, kind) | Cell::Dark(_, kind) => Some(kind),
            Cell::Offboard | Cell::Empty => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_piece(self) -> bool {
        matches!(self, Cell::Revealed(..) | Cell::Dark(..))
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        matches!(self, Cell::Dark(..))
    }

    #[inline]
    pub fn belongs_to(self, camp: Camp) -> bool {
        self.camp() == Some(camp)
    }

    /// True when the cell is `camp`'s piece moving as `kind`.
    #[inline]
    pub fn moves_as(self, camp: Camp, kind: PieceKind) -> bool {
        match self {
            Cell::Revealed(c, k) | Cell::Dark(c, k) => c == camp && k == kind,
            Cell::Offboard | Cell::Empty => false,
        }
    }

    /// Same cell seen from the opposite perspective.
    #[inline]
    pub const fn swap_camp(self) -> Self {
        match self {
            Cell::Revealed(camp, kind) => Cell::Revealed(camp.opposite(), kind),
            Cell::Dark(camp, kind) => Cell::Dark(camp.opposite(), kind),
            other => other,
        }
    }

    /// Dense code used by hashing and piece-square tables.
    ///
    /// Revealed kinds map to `0..=6`, dark markers to `7..=12`.
    #[inline]
    pub const fn code(self) -> Option<usize> {
        match self {
            Cell::Revealed(_, kind) => Some(kind.index()),
            Cell::Dark(_, kind) => Some(dark_marker_code(kind)),
            Cell::Offboard | Cell::Empty => None,
        }
    }
}

/// Table code of the dark marker for `kind`.
#[inline]
pub const fn dark_marker_code(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Rook => 7,
        PieceKind::Knight => 8,
        PieceKind::Bishop => 9,
        PieceKind::Advisor => 10,
        PieceKind::Cannon => 11,
        PieceKind::Pawn => 12,
        // never concealed
        PieceKind::King => 7,
    }
}
