//! Process-wide engine resources and the stateless position-query host.
//!
//! Resources (score tables and the shared transposition table) are built once
//! per process. Every `EngineHost` query parses its own board, so nothing
//! about one call leaks into the next except what is cached in the shared
//! table.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::engines::engine_alpha_beta::AlphaBetaThinker;
use crate::engines::engine_greedy::GreedyThinker;
use crate::engines::engine_trait::{Thinker, ThinkerKind, ERROR_PREFIX};
use crate::game_state::game_state::GameState;
use crate::game_state::jieqi_types::Side;
use crate::jieqi_errors::JieqiError;
use crate::search::board_scoring::{BoardScorer, JieqiScorer};
use crate::search::empty_head_cannon::CannonWeights;
use crate::search::piece_square_tables::ScoreTables;
use crate::search::transposition_table::{SharedTranspositionTable, MAX_ZOBRIST};
use crate::utils::notation::reverse_notation;

pub const DEFAULT_SEARCH_DEPTH: u8 = 8;
pub const DEFAULT_SCORE_TABLE_PATH: &str = "score.conf";

/// Overrides [`DEFAULT_SCORE_TABLE_PATH`] when set.
pub const SCORE_TABLE_ENV: &str = "JIEQI_SCORE_CONF";

/// Read-only evaluation data plus the transposition table all searches share.
#[derive(Debug)]
pub struct EngineResources {
    pub tables: Arc<ScoreTables>,
    pub tt: Arc<SharedTranspositionTable>,
    pub weights: CannonWeights,
}

impl EngineResources {
    /// Load tables from `path` (zeroed on failure) and allocate `capacity`
    /// table slots (disabled on failure).
    pub fn load(path: impl AsRef<Path>, capacity: usize) -> Self {
        Self {
            tables: Arc::new(ScoreTables::load_or_zeroed(path)),
            tt: SharedTranspositionTable::with_capacity(capacity),
            weights: CannonWeights::default(),
        }
    }

    pub fn scorer(&self) -> JieqiScorer {
        JieqiScorer::with_weights(Arc::clone(&self.tables), self.weights)
    }
}

static RESOURCES: OnceLock<Arc<EngineResources>> = OnceLock::new();

/// Score table path: `$JIEQI_SCORE_CONF`, else `score.conf`.
pub fn score_table_path() -> PathBuf {
    env::var_os(SCORE_TABLE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE_TABLE_PATH))
}

/// Idempotent process-wide setup with the default path and table size.
pub fn initialize() -> Arc<EngineResources> {
    initialize_with(score_table_path(), MAX_ZOBRIST)
}

/// Like [`initialize`]; arguments only matter for the first call.
pub fn initialize_with(path: impl AsRef<Path>, capacity: usize) -> Arc<EngineResources> {
    let resources = RESOURCES.get_or_init(|| {
        log::info!("initializing engine resources");
        Arc::new(EngineResources::load(path, capacity))
    });
    Arc::clone(resources)
}

pub fn create_thinker<'a>(
    kind: ThinkerKind,
    game_state: &'a mut GameState,
    scorer: JieqiScorer,
    tt: Arc<SharedTranspositionTable>,
    seed: u64,
) -> Box<dyn Thinker + 'a> {
    match kind {
        ThinkerKind::AlphaBeta => Box::new(AlphaBetaThinker::new(game_state, scorer, tt, seed)),
        ThinkerKind::Greedy => Box::new(GreedyThinker::new(game_state, scorer, seed)),
    }
}

/// Map a mover-frame answer back to red coordinates.
pub fn answer_in_red_frame(answer: String, mover: Side) -> String {
    if mover == Side::Red || answer.starts_with(ERROR_PREFIX) {
        return answer;
    }
    match reverse_notation(&answer) {
        Ok(red) => red,
        Err(err) => format!("{ERROR_PREFIX}{err}"),
    }
}

/// Stateless host: each query is answered from the board it carries.
#[derive(Debug, Clone)]
pub struct EngineHost {
    resources: Arc<EngineResources>,
    kind: ThinkerKind,
    seed: Option<u64>,
    game_state: GameState,
}

impl EngineHost {
    pub fn new(resources: Arc<EngineResources>) -> Self {
        Self {
            resources,
            kind: ThinkerKind::default(),
            seed: None,
            game_state: GameState::new_game(),
        }
    }

    /// Host over the process-wide resources.
    pub fn initialized() -> Self {
        Self::new(initialize())
    }

    /// Fixed determinization seed; without one each query draws from the OS.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_thinker(mut self, kind: ThinkerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Replace the held position. History does not carry over.
    pub fn set_position(
        &mut self,
        cells: &[u8],
        red_to_move: bool,
        history_len: usize,
    ) -> Result<(), JieqiError> {
        self.game_state = GameState::from_external(cells, red_to_move, history_len)?;
        Ok(())
    }

    /// Best move in red coordinates, or an `ERROR:` token.
    pub fn get_move(
        &mut self,
        cells: &[u8],
        red_to_move: bool,
        history_len: usize,
        depth: Option<u8>,
    ) -> String {
        if let Err(err) = self.set_position(cells, red_to_move, history_len) {
            log::warn!("rejected position: {err}");
            return format!("{ERROR_PREFIX}{err}");
        }
        let seed = self.seed.unwrap_or_else(rand::random);
        let mover = self.game_state.side_to_move;
        let answer = create_thinker(
            self.kind,
            &mut self.game_state,
            self.resources.scorer(),
            Arc::clone(&self.resources.tt),
            seed,
        )
        .think(depth.unwrap_or(DEFAULT_SEARCH_DEPTH));
        answer_in_red_frame(answer, mover)
    }

    /// Side-to-move-relative evaluation without search.
    pub fn get_static_evaluation(
        &mut self,
        cells: &[u8],
        red_to_move: bool,
        history_len: usize,
    ) -> Result<i32, JieqiError> {
        self.set_position(cells, red_to_move, history_len)?;
        Ok(self.resources.scorer().score(&self.game_state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_trait::is_error_answer;
    use crate::game_state::jieqi_rules::STARTING_POSITION;
    use crate::move_generation::legal_move_generator::generate_legal_moves_in_place;
    use crate::moves::move_descriptions::pack_move;
    use crate::utils::notation::{decode_move, reverse};

    fn host() -> EngineHost {
        EngineHost::new(Arc::new(EngineResources::load("/nonexistent/score.conf", 1 << 12)))
            .with_seed(17)
    }

    #[test]
    fn opening_static_evaluation_is_zero_for_both_sides() {
        let mut host = host();
        let cells = STARTING_POSITION.as_bytes();
        assert_eq!(host.get_static_evaluation(cells, true, 0), Ok(0));
        assert_eq!(host.get_static_evaluation(cells, false, 0), Ok(0));
    }

    #[test]
    fn black_answer_is_a_legal_black_move_in_red_coordinates() {
        let mut host = host();
        let answer = host.get_move(STARTING_POSITION.as_bytes(), false, 1, Some(1));
        assert!(!is_error_answer(&answer), "got {answer}");

        let (from, to) = decode_move(&answer).expect("notation");
        let legal = generate_legal_moves_in_place(host.game_state()).expect("moves");
        assert!(legal.contains(&pack_move(reverse(from), reverse(to))));
    }

    #[test]
    fn bad_board_text_is_an_error_token() {
        let mut host = host();
        assert!(host.get_move(b"short", true, 0, Some(1)).starts_with(ERROR_PREFIX));
        assert!(host.get_static_evaluation(b"short", true, 0).is_err());
    }

    #[test]
    fn greedy_host_answers_too() {
        let mut host = host().with_thinker(ThinkerKind::Greedy);
        let answer = host.get_move(STARTING_POSITION.as_bytes(), true, 0, None);
        assert!(!is_error_answer(&answer), "got {answer}");
    }

    #[test]
    fn red_answers_pass_through_unchanged() {
        assert_eq!(answer_in_red_frame("b2e2".into(), Side::Red), "b2e2");
        assert_eq!(answer_in_red_frame("a0a1".into(), Side::Black), "i9i8");
        assert_eq!(
            answer_in_red_frame("ERROR:no legal moves".into(), Side::Black),
            "ERROR:no legal moves"
        );
    }
}
