use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{ThinkOutput, Thinker};
use crate::game_state::game_state::GameState;
use crate::game_state::jieqi_types::Side;
use crate::move_generation::legal_move_generator::JieqiMoveGenerator;
use crate::move_generation::move_generator::MoveGenerationError;
use crate::moves::move_descriptions::move_to_notation;
use crate::search::board_scoring::JieqiScorer;
use crate::search::iterative_deepening::{
    iterative_deepening_search, principal_variation_from_tt, SearchConfig,
};
use crate::search::transposition_table::SharedTranspositionTable;

/// Iterative-deepening alpha-beta over one determinization of the position.
pub struct AlphaBetaThinker<'a> {
    game_state: &'a mut GameState,
    move_generator: JieqiMoveGenerator,
    scorer: JieqiScorer,
    tt: Arc<SharedTranspositionTable>,
    rng: StdRng,
}

impl<'a> AlphaBetaThinker<'a> {
    pub fn new(
        game_state: &'a mut GameState,
        scorer: JieqiScorer,
        tt: Arc<SharedTranspositionTable>,
        seed: u64,
    ) -> Self {
        Self {
            game_state,
            move_generator: JieqiMoveGenerator,
            scorer,
            tt,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Thinker for AlphaBetaThinker<'_> {
    fn name(&self) -> &str {
        "Jieqi AlphaBeta"
    }

    fn search(&mut self, max_depth: u8) -> Result<ThinkOutput, MoveGenerationError> {
        self.game_state.generate_random_map(&mut self.rng);
        debug_assert!(self
            .game_state
            .dark
            .is_fully_assigned(&self.game_state.placement[Side::Red.index()]));
        log::debug!("drew identities for the dark pieces");

        let depth = max_depth.max(1);
        let result = iterative_deepening_search(
            self.game_state,
            &self.move_generator,
            &self.scorer,
            SearchConfig { max_depth: depth },
            &self.tt,
        )?;
        let best_move = result.best_move.ok_or(MoveGenerationError::NoLegalMoves)?;

        let pv: Vec<String> =
            principal_variation_from_tt(self.game_state, &self.move_generator, &self.tt, depth)
                .into_iter()
                .map(move_to_notation)
                .collect();

        let mut info_lines = vec![format!(
            "info depth {} score {} nodes {} nps {}",
            result.reached_depth, result.best_score, result.nodes, result.nps
        )];
        if !pv.is_empty() {
            info_lines.push(format!("info pv {}", pv.join(" ")));
        }

        Ok(ThinkOutput {
            best_move,
            notation: move_to_notation(best_move),
            score: result.best_score,
            depth: result.reached_depth,
            nodes: result.nodes,
            info_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_trait::is_error_answer;
    use crate::move_generation::legal_move_generator::generate_legal_moves_in_place;
    use crate::utils::notation::{board_squares, decode_move};
    use crate::moves::move_descriptions::pack_move;

    fn shared() -> Arc<SharedTranspositionTable> {
        SharedTranspositionTable::with_capacity(1 << 16)
    }

    #[test]
    fn opening_answer_is_a_legal_move() {
        let mut game = GameState::new_game();
        let answer = AlphaBetaThinker::new(&mut game, JieqiScorer::default(), shared(), 5).think(2);
        assert!(!is_error_answer(&answer), "got {answer}");

        let (from, to) = decode_move(&answer).expect("notation");
        let legal = generate_legal_moves_in_place(&game).expect("moves");
        assert!(legal.contains(&pack_move(from, to)));
    }

    #[test]
    fn thinking_determinizes_the_position() {
        let mut game = GameState::new_game();
        AlphaBetaThinker::new(&mut game, JieqiScorer::default(), shared(), 5)
            .search(1)
            .expect("search");
        assert!(game
            .dark
            .is_fully_assigned(&game.placement[Side::Red.index()]));
    }

    #[test]
    fn each_search_redraws_the_assignment() {
        let mut game = GameState::new_game();
        let mut thinker = AlphaBetaThinker::new(&mut game, JieqiScorer::default(), shared(), 5);
        let mut draws = Vec::new();
        for _ in 0..4 {
            thinker.search(1).expect("search");
            let assumed: Vec<_> = board_squares()
                .map(|square| thinker.game_state.dark.assumed_value(square))
                .collect();
            draws.push(assumed);
        }
        assert!(draws.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn empty_board_reports_no_legal_moves() {
        let mut game = GameState::new_empty();
        let answer = AlphaBetaThinker::new(&mut game, JieqiScorer::default(), shared(), 0).think(1);
        assert_eq!(answer, "ERROR:no legal moves");
    }

    #[test]
    fn search_reports_depth_and_pv() {
        let mut game = GameState::new_game();
        let output = AlphaBetaThinker::new(&mut game, JieqiScorer::default(), shared(), 9)
            .search(2)
            .expect("search");
        assert_eq!(output.depth, 2);
        assert!(output.info_lines.iter().any(|l| l.starts_with("info pv ")));
    }
}
