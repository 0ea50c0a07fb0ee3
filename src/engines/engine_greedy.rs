use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{ThinkOutput, Thinker};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_generator::JieqiMoveGenerator;
use crate::move_generation::move_generator::{MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::move_to_notation;
use crate::search::board_scoring::{BoardScorer, JieqiScorer};

/// One-ply thinker: plays the move whose resulting position evaluates best.
///
/// The requested depth is ignored.
pub struct GreedyThinker<'a> {
    game_state: &'a mut GameState,
    move_generator: JieqiMoveGenerator,
    scorer: JieqiScorer,
    rng: StdRng,
}

impl<'a> GreedyThinker<'a> {
    pub fn new(game_state: &'a mut GameState, scorer: JieqiScorer, seed: u64) -> Self {
        Self {
            game_state,
            move_generator: JieqiMoveGenerator,
            scorer,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Thinker for GreedyThinker<'_> {
    fn name(&self) -> &str {
        "Jieqi Greedy"
    }

    fn search(&mut self, _max_depth: u8) -> Result<ThinkOutput, MoveGenerationError> {
        self.game_state.generate_random_map(&mut self.rng);

        let legal_moves = self.move_generator.generate_legal_moves(self.game_state)?;
        let mut best: Option<(u16, i32)> = None;

        for mv in legal_moves {
            make_move_in_place(self.game_state, mv).map_err(|x| {
                MoveGenerationError::InvalidState(format!("make_move_in_place failed: {x}"))
            })?;
            // opponent to move now
            let score = -self.scorer.score(self.game_state);
            unmake_move_in_place(self.game_state).map_err(|x| {
                MoveGenerationError::InvalidState(format!("unmake_move_in_place failed: {x}"))
            })?;

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        let (best_move, score) = best.ok_or(MoveGenerationError::NoLegalMoves)?;
        Ok(ThinkOutput {
            best_move,
            notation: move_to_notation(best_move),
            score,
            depth: 1,
            nodes: 0,
            info_lines: vec![format!("info depth 1 score {score}")],
        })
    }
}
