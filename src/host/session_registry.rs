//! Stateful host: games keyed by opaque ids.
//!
//! A session keeps its `GameState` between queries, so repetition history
//! and hashing state accumulate over a game fed position by position. Each
//! session sits behind its own mutex; the registry map lock is only held to
//! look a session up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{ThinkerKind, ERROR_PREFIX};
use crate::game_state::game_state::GameState;
use crate::game_state::jieqi_types::Side;
use crate::host::engine_host::{
    answer_in_red_frame, create_thinker, initialize, EngineResources, DEFAULT_SEARCH_DEPTH,
};
use crate::jieqi_errors::{GameId, JieqiError};
use crate::search::board_scoring::BoardScorer;
use crate::search::transposition_table::SharedTranspositionTable;
use crate::utils::board_text::render_placement;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Determinization seed; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Slots of a table owned by this session alone. `None` shares the
    /// process-wide table.
    pub private_table_capacity: Option<usize>,
}

#[derive(Debug)]
pub struct GameSession {
    game_state: GameState,
    rng: StdRng,
    tt: Option<Arc<SharedTranspositionTable>>,
    created_at: DateTime<Utc>,
    last_used: DateTime<Utc>,
}

impl GameSession {
    fn new(options: SessionOptions) -> Self {
        let now = Utc::now();
        Self {
            game_state: GameState::new_empty(),
            rng: match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
            tt: options
                .private_table_capacity
                .map(SharedTranspositionTable::with_capacity),
            created_at: now,
            last_used: now,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_used(&self) -> DateTime<Utc> {
        self.last_used
    }

    fn touch(&mut self) {
        self.last_used = Utc::now();
    }
}

#[derive(Debug)]
pub struct SessionRegistry {
    resources: Arc<EngineResources>,
    kind: ThinkerKind,
    sessions: Mutex<HashMap<GameId, Arc<Mutex<GameSession>>>>,
    next_id: AtomicU64,
}

impl SessionRegistry {
    pub fn new(resources: Arc<EngineResources>) -> Self {
        Self {
            resources,
            kind: ThinkerKind::default(),
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registry over the process-wide resources.
    pub fn initialized() -> Self {
        Self::new(initialize())
    }

    pub fn with_thinker(mut self, kind: ThinkerKind) -> Self {
        self.set_thinker(kind);
        self
    }

    /// Applies to every later `get_move`, existing sessions included.
    pub fn set_thinker(&mut self, kind: ThinkerKind) {
        self.kind = kind;
    }

    /// New game on an empty board.
    pub fn create_game(&self) -> GameId {
        self.create_game_with(SessionOptions::default())
    }

    pub fn create_game_with(&self, options: SessionOptions) -> GameId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = Arc::new(Mutex::new(GameSession::new(options)));
        self.map().insert(id, session);
        log::debug!("created game {id}");
        id
    }

    pub fn delete_game(&self, id: GameId) -> Result<(), JieqiError> {
        match self.map().remove(&id) {
            Some(_) => {
                log::debug!("deleted game {id}");
                Ok(())
            }
            None => Err(JieqiError::UnknownSession(id)),
        }
    }

    /// Feed the next position of a game. History is kept.
    pub fn set_board(
        &self,
        id: GameId,
        cells: &[u8],
        red_to_move: bool,
        history_len: usize,
    ) -> Result<(), JieqiError> {
        let session = self.session(id)?;
        let mut session = lock(&session);
        session.touch();
        session
            .game_state
            .set_from_external(cells, red_to_move, history_len)
    }

    /// Best move in red coordinates, or an `ERROR:` token.
    pub fn get_move(&self, id: GameId, depth: Option<u8>) -> String {
        let session = match self.session(id) {
            Ok(session) => session,
            Err(err) => return format!("{ERROR_PREFIX}{err}"),
        };
        let mut guard = lock(&session);
        let session = &mut *guard;
        session.touch();

        let tt = session
            .tt
            .clone()
            .unwrap_or_else(|| Arc::clone(&self.resources.tt));
        let seed = session.rng.random();
        let mover = session.game_state.side_to_move;
        let answer = create_thinker(
            self.kind,
            &mut session.game_state,
            self.resources.scorer(),
            tt,
            seed,
        )
        .think(depth.unwrap_or(DEFAULT_SEARCH_DEPTH));
        log::debug!("game {id}: {answer}");
        answer_in_red_frame(answer, mover)
    }

    /// Side-to-move-relative evaluation without search.
    pub fn get_static_evaluation(&self, id: GameId) -> Result<i32, JieqiError> {
        let session = self.session(id)?;
        let mut session = lock(&session);
        session.touch();
        Ok(self.resources.scorer().score(&session.game_state))
    }

    /// Board of a session drawn for a terminal.
    pub fn render(&self, id: GameId) -> Result<String, JieqiError> {
        let session = self.session(id)?;
        let session = lock(&session);
        Ok(render_placement(&session.game_state.placement[Side::Red.index()]))
    }

    /// Evict sessions idle for longer than `max_idle`. Returns how many went.
    ///
    /// A session locked by a running query is busy, not idle, and is kept
    /// without waiting on it.
    pub fn reap_idle(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let mut map = self.map();
        let before = map.len();
        map.retain(|id, session| {
            let session = match session.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return true,
            };
            let keep = now.signed_duration_since(session.last_used()) <= max_idle;
            if !keep {
                log::info!(
                    "reaping idle game {id} (created {}, last used {})",
                    session.created_at(),
                    session.last_used()
                );
            }
            keep
        });
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    fn session(&self, id: GameId) -> Result<Arc<Mutex<GameSession>>, JieqiError> {
        self.map()
            .get(&id)
            .cloned()
            .ok_or(JieqiError::UnknownSession(id))
    }

    fn map(&self) -> MutexGuard<'_, HashMap<GameId, Arc<Mutex<GameSession>>>> {
        lock(&self.sessions)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
