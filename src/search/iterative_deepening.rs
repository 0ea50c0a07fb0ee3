//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Every node works on the placement of the side to move, so the same code
//! searches for red and black. Depth-0 nodes return the static evaluation;
//! there is no quiescence stage.

use std::time::Instant;

use crate::game_state::game_state::GameState;
use crate::game_state::jieqi_types::*;
use crate::move_generation::legal_move_apply::{apply_move, make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::{move_from, move_to};
use crate::search::board_scoring::{BoardScorer, MATE_SCORE, PIECE_VALUES};
use crate::search::transposition_table::{
    tt_score_for_storage, Bound, SharedTranspositionTable, TTEntry, TTStats,
};

/// Score of a repeated position.
pub const DRAW_SCORE: i32 = 0;

/// Score of a repeated position for the side being checked in it: the
/// checking side is the one repeating.
pub const PERPETUAL_CHECK_SCORE: i32 = 300;

/// Victim value used for move ordering when the victim is still dark.
const DARK_VICTIM_VALUE: i32 = 320;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 4 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub tt_stats: TTStats,
}

struct SearchContext<'a, G, S> {
    generator: &'a G,
    scorer: &'a S,
    tt: &'a SharedTranspositionTable,
    nodes: u64,
}

/// Search `game_state` to `config.max_depth`, one iteration per depth.
///
/// Dark pieces are revealed by their assumed identity during search, so the
/// state must be determinized first. With no legal move the result carries no
/// best move and a mate score.
pub fn iterative_deepening_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
    tt: &SharedTranspositionTable,
) -> MoveGenResult<SearchResult> {
    let started_at = Instant::now();

    if config.max_depth == 0 {
        return Ok(SearchResult {
            best_move: None,
            best_score: scorer.score(game_state),
            reached_depth: 0,
            nodes: 1,
            elapsed_ms: started_at.elapsed().as_millis() as u64,
            nps: 0,
            tt_stats: tt.stats(),
        });
    }

    let mut ctx = SearchContext {
        generator,
        scorer,
        tt,
        nodes: 0,
    };
    let mut root_state = game_state.clone();
    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        let (best_move, best_score) =
            negamax_root(&mut root_state, &mut ctx, depth, result.best_move)?;

        result.best_move = best_move;
        result.best_score = best_score;
        result.reached_depth = depth;

        tt.store(TTEntry {
            key: root_state.zobrist_key,
            depth,
            score: best_score,
            bound: Bound::Exact,
            best_move,
        });
        log::debug!(
            "depth {depth} score {best_score} nodes {} best {:?}",
            ctx.nodes,
            best_move
        );

        if best_move.is_none() {
            break;
        }
    }

    result.nodes = ctx.nodes;
    result.elapsed_ms = started_at.elapsed().as_millis() as u64;
    result.nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    result.tt_stats = tt.stats();

    Ok(result)
}

fn negamax_root<G: MoveGenerator, S: BoardScorer>(
    game_state: &mut GameState,
    ctx: &mut SearchContext<'_, G, S>,
    depth: u8,
    previous_best: Option<Move>,
) -> MoveGenResult<(Option<Move>, i32)> {
    ctx.nodes += 1;
    let mut moves = ctx.generator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        return Ok((None, -MATE_SCORE));
    }

    let tt_move = ctx.tt.entry(game_state.zobrist_key).and_then(|e| e.best_move);
    order_moves(game_state.mover_placement(), &mut moves, tt_move, previous_best);

    let mut alpha = -MATE_SCORE;
    let beta = MATE_SCORE;
    let mut best_move = None;
    let mut best_score = -MATE_SCORE;

    for mv in moves {
        make_move_in_place(game_state, mv).map_err(|x| {
            MoveGenerationError::InvalidState(format!("make_move_in_place failed: {x}"))
        })?;

        let score = negamax(game_state, ctx, depth - 1, -beta, -alpha, 1);

        unmake_move_in_place(game_state).map_err(|x| {
            MoveGenerationError::InvalidState(format!("unmake_move_in_place failed: {x}"))
        })?;

        let score = -score?;
        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
    }

    Ok((best_move, best_score))
}

fn negamax<G: MoveGenerator, S: BoardScorer>(
    game_state: &mut GameState,
    ctx: &mut SearchContext<'_, G, S>,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ply: u8,
) -> MoveGenResult<i32> {
    ctx.nodes += 1;

    if game_state.repetition_count() >= 2 {
        return Ok(if is_in_check(game_state) {
            PERPETUAL_CHECK_SCORE
        } else {
            DRAW_SCORE
        });
    }

    let alpha_orig = alpha;
    let probe = ctx.tt.probe(game_state.zobrist_key, depth, ply, alpha, beta);
    if probe.hit {
        return Ok(probe.score);
    }

    let mut moves = ctx.generator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        return Ok(-MATE_SCORE + i32::from(ply));
    }

    if depth == 0 {
        return Ok(ctx.scorer.score(game_state));
    }

    order_moves(game_state.mover_placement(), &mut moves, probe.best_move, None);

    let mut best = -MATE_SCORE;
    let mut best_move: Option<Move> = None;

    for mv in moves {
        make_move_in_place(game_state, mv).map_err(|x| {
            MoveGenerationError::InvalidState(format!("make_move_in_place failed: {x}"))
        })?;

        let score = negamax(game_state, ctx, depth - 1, -beta, -alpha, ply.saturating_add(1));

        unmake_move_in_place(game_state).map_err(|x| {
            MoveGenerationError::InvalidState(format!("unmake_move_in_place failed: {x}"))
        })?;

        let score = -score?;
        if best_move.is_none() || score > best {
            best = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    let bound = if best <= alpha_orig {
        Bound::Upper
    } else if best >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };

    ctx.tt.store(TTEntry {
        key: game_state.zobrist_key,
        depth,
        score: tt_score_for_storage(best, ply),
        bound,
        best_move,
    });

    Ok(best)
}

fn order_moves(
    placement: &Placement,
    moves: &mut [Move],
    tt_move: Option<Move>,
    previous_best: Option<Move>,
) {
    moves.sort_by_key(|m| -move_order_score(placement, *m, tt_move, previous_best));
}

fn move_order_score(
    placement: &Placement,
    mv: Move,
    tt_move: Option<Move>,
    previous_best: Option<Move>,
) -> i32 {
    if Some(mv) == tt_move {
        return 2_000_000;
    }
    if Some(mv) == previous_best {
        return 1_000_000;
    }
    let victim = match placement[move_to(mv) as usize] {
        Cell::Revealed(Camp::Top, kind) => PIECE_VALUES[kind.index()],
        Cell::Dark(Camp::Top, _) => DARK_VICTIM_VALUE,
        _ => return 0,
    };
    let attacker = match placement[move_from(mv) as usize] {
        Cell::Revealed(_, kind) => PIECE_VALUES[kind.index()],
        _ => DARK_VICTIM_VALUE,
    };
    100_000 + victim * 10 - attacker / 10
}

/// Follow best moves stored in the table from `game_state`.
///
/// Stops at the first missing entry or a stored move that is not legal here.
pub fn principal_variation_from_tt<G: MoveGenerator>(
    game_state: &GameState,
    generator: &G,
    tt: &SharedTranspositionTable,
    max_depth: u8,
) -> Vec<Move> {
    let mut pv = Vec::new();
    let mut state = game_state.clone();

    for _ in 0..max_depth {
        let Some(best_move) = tt.entry(state.zobrist_key).and_then(|e| e.best_move) else {
            break;
        };
        let Ok(legal) = generator.generate_legal_moves(&state) else {
            break;
        };
        if !legal.contains(&best_move) {
            break;
        }
        let Ok(next) = apply_move(&state, best_move) else {
            break;
        };
        pv.push(best_move);
        state = next;
    }

    pv
}
