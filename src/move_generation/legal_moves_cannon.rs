use crate::game_state::jieqi_types::*;
use crate::moves::move_descriptions::pack_move;
use crate::moves::piece_deltas::{offset, ORTHOGONAL};

/// Slides like a rook; captures by jumping exactly one screen.
pub fn generate_cannon_moves(placement: &Placement, from: Square, out: &mut Vec<Move>) {
    for delta in ORTHOGONAL {
        let mut to = offset(from, delta);
        while placement[to as usize].is_empty() {
            out.push(pack_move(from, to));
            to = offset(to, delta);
        }
        if placement[to as usize] == Cell::Offboard {
            continue;
        }
        // `to` is the screen
        to = offset(to, delta);
        loop {
            match placement[to as usize] {
                Cell::Empty => to = offset(to, delta),
                cell if cell.belongs_to(Camp::Top) => {
                    out.push(pack_move(from, to));
                    break;
                }
                _ => break,
            }
        }
    }
}
