use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::JoinHandle;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};
use wordgame::{
    visualize_board, Action, Board, BoardSnapshot, IllegalBoardState, IllegalMove, Lexicon,
    MoveMetaInfo, Placement, Rack, Tile, TilePool,
};

use crate::history::PreviousFlags;
use crate::participant::Mailbox;
use crate::{
    Config, GameError, GameEvent, HistoryEntry, Participant, ScheduledTask, TurnLatch,
};

/// Identifies a registered player, in order of registration.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlayerId(pub usize);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The token proving the identity of a player on every call that acts for them.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SecretKey(u128);

impl SecretKey {
    fn generate() -> Self {
        Self(rand::random())
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey(..)")
    }
}

/// Returned by [`Game::register_player()`].
#[derive(Copy, Clone, Debug)]
pub struct Registration {
    pub id: PlayerId,
    pub key: SecretKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub score: i32,
}

/// The lifecycle of a game. It only moves forward, except that taking back
/// a move while ending returns to `Started`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    BeforeStart,
    Started,
    Ending,
    Ended,
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameState::BeforeStart => "not started",
            GameState::Started => "started",
            GameState::Ending => "ending",
            GameState::Ended => "ended",
        };
        write!(f, "{}", name)
    }
}

struct PlayerInfo {
    name: String,
    key: SecretKey,
    rack: Rack,
    score: i32,
    last_action_error: bool,
    last_action: Option<Action>,
    mailbox: Mailbox,
}

struct GameInner {
    board: Board,
    pool: TilePool,
    rng: StdRng,
    players: Vec<PlayerInfo>,
    observers: Vec<Mailbox>,
    turn_queue: VecDeque<PlayerId>,
    move_nr: u32,
    state: GameState,
    history: Vec<HistoryEntry>,
    /// Released by whatever completes the current prompt.
    latch: Option<TurnLatch>,
    end_timer: Option<ScheduledTask>,
    /// Tells a timer that fired after being cancelled that it is stale.
    end_generation: u64,
}

/// Why a move was not played.
enum Refusal {
    Rule(IllegalMove),
    Board(IllegalBoardState),
}

impl From<IllegalMove> for Refusal {
    fn from(err: IllegalMove) -> Self {
        Refusal::Rule(err)
    }
}

impl From<IllegalBoardState> for Refusal {
    fn from(err: IllegalBoardState) -> Self {
        Refusal::Board(err)
    }
}

/// The effects of an action before the turn is completed.
#[derive(Default)]
struct Outcome {
    score: u32,
    spent: Vec<Tile>,
    meta: Option<MoveMetaInfo>,
    pool_before_exchange: Option<TilePool>,
}

/// One match.
///
/// All methods lock the whole game state for their full duration, so they
/// are linearizable with respect to each other. Participants are notified
/// through queues of their own and never called while the lock is held.
pub struct Game {
    config: Config,
    lexicon: Arc<dyn Lexicon>,
    inner: Mutex<GameInner>,
    /// Notified on every state change and every completed move.
    state_changed: Condvar,
    this: Weak<Game>,
}

impl Game {
    pub fn new(lexicon: Arc<dyn Lexicon>, config: Config) -> Result<Arc<Self>, GameError> {
        config.validate()?;
        let ruleset = lexicon.ruleset();
        ruleset.validate()?;
        if ruleset.tile_count() == 0 {
            return Err(GameError::InvalidConfiguration(String::from(
                "the ruleset has no tiles",
            )));
        }
        let inner = GameInner {
            board: Board::new(ruleset),
            pool: TilePool::default(),
            rng: StdRng::seed_from_u64(config.seed),
            players: Vec::new(),
            observers: Vec::new(),
            turn_queue: VecDeque::new(),
            move_nr: 0,
            state: GameState::BeforeStart,
            history: Vec::new(),
            latch: None,
            end_timer: None,
            end_generation: 0,
        };
        Ok(Arc::new_cyclic(|this| Self {
            config,
            lexicon,
            inner: Mutex::new(inner),
            state_changed: Condvar::new(),
            this: this.clone(),
        }))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn register_player(
        &self,
        name: &str,
        participant: Box<dyn Participant>,
    ) -> Result<Registration, GameError> {
        let mut inner = self.lock();
        expect_state(&inner, GameState::BeforeStart)?;
        let id = PlayerId(inner.players.len());
        let mailbox = Mailbox::spawn(name, participant, self.config.event_queue_capacity)
            .map_err(GameError::ThreadSpawn)?;
        let key = SecretKey::generate();
        inner.players.push(PlayerInfo {
            name: name.to_string(),
            key,
            rack: Rack::new(),
            score: 0,
            last_action_error: false,
            last_action: None,
            mailbox,
        });
        info!(player = %name, id = id.0, "Player registered");
        Ok(Registration { id, key })
    }

    /// Adds a participant that is told everything everyone is told, but
    /// doesn't play.
    pub fn add_observer(&self, observer: Box<dyn Participant>) -> Result<(), GameError> {
        let mut inner = self.lock();
        let mailbox = Mailbox::spawn("observer", observer, self.config.event_queue_capacity)
            .map_err(GameError::ThreadSpawn)?;
        inner.observers.push(mailbox);
        Ok(())
    }

    /// Starts the game and drives it until it has ended.
    ///
    /// This prompts one player after the other and waits for each turn to
    /// be completed by [`play()`](Self::play) (from any thread), or for the
    /// turn timeout, in which case the turn is skipped. When this returns,
    /// every participant has received all its events.
    pub fn start(&self) -> Result<(), GameError> {
        {
            let mut inner = self.lock();
            expect_state(&inner, GameState::BeforeStart)?;
            if inner.players.is_empty() {
                return Err(GameError::NoPlayers);
            }

            let GameInner {
                players,
                pool,
                rng,
                turn_queue,
                ..
            } = &mut *inner;
            let mut order: Vec<PlayerId> = (0..players.len()).map(PlayerId).collect();
            order.shuffle(rng);
            *turn_queue = order.into();
            *pool = TilePool::filled(self.lexicon.ruleset(), rng);
            for player in players.iter_mut() {
                player.rack.refill(pool);
            }

            info!(
                seed = self.config.seed,
                players = inner.players.len(),
                "Game starting"
            );
            let players = summaries(&inner);
            broadcast(&mut inner, GameEvent::BeforeGameStart { players });
            self.set_state(&mut inner, GameState::Started);
        }

        loop {
            let (latch, player, move_nr) = {
                let mut inner = self.lock();
                while inner.state == GameState::Ending {
                    inner = self
                        .state_changed
                        .wait(inner)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                if inner.state != GameState::Started {
                    break;
                }
                let head = inner.turn_queue.front().copied();
                let Some(player) = head else {
                    error!("The turn queue is empty, ending the game");
                    self.set_state(&mut inner, GameState::Ended);
                    break;
                };
                let latch = TurnLatch::new();
                inner.latch = Some(latch.clone());
                let name = inner.players[player.0].name.clone();
                debug!(player = %name, move_nr = inner.move_nr, "Prompting player");
                broadcast(&mut inner, GameEvent::PlayRequired { player, name });
                (latch, player, inner.move_nr)
            };

            if !latch.wait(self.config.turn_timeout) {
                let mut inner = self.lock();
                let still_waiting = inner.state == GameState::Started
                    && inner.move_nr == move_nr
                    && inner.turn_queue.front() == Some(&player);
                if still_waiting {
                    warn!(
                        player = %inner.players[player.0].name,
                        "Turn timed out, skipping it"
                    );
                    // A skip is never refused
                    let _ = self.apply_action(&mut inner, player, Action::SkipTurn);
                }
            }
        }

        let handles: Vec<JoinHandle<()>> = {
            let mut inner = self.lock();
            let players = summaries(&inner);
            for player in &players {
                info!(player = %player.name, score = player.score, "Final score");
            }
            broadcast(&mut inner, GameEvent::AfterGameEnd { players });
            let GameInner {
                players, observers, ..
            } = &mut *inner;
            let handles = players
                .iter_mut()
                .map(|player| &mut player.mailbox)
                .chain(observers.iter_mut())
                .filter_map(Mailbox::close)
                .collect();
            handles
        };
        for handle in handles {
            if handle.join().is_err() {
                warn!("A participant panicked");
            }
        }
        Ok(())
    }

    /// Plays an action for the player whose turn it is.
    ///
    /// Returns the points scored. A rejected move returns
    /// [`GameError::Rejected`], which tells whether the turn was consumed.
    pub fn play(&self, player: PlayerId, key: SecretKey, action: Action) -> Result<i32, GameError> {
        let mut inner = self.lock();
        authenticate(&inner, player, key)?;
        expect_state(&inner, GameState::Started)?;
        if inner.turn_queue.front() != Some(&player) {
            return Err(GameError::NotYourTurn { player });
        }
        self.apply_action(&mut inner, player, action.normalized())
    }

    /// Takes back the last move that counted, whoever played it.
    ///
    /// This also cancels the end of the game, if it was ending.
    pub fn rollback_last_move(&self, player: PlayerId, key: SecretKey) -> Result<(), GameError> {
        let mut inner = self.lock();
        authenticate(&inner, player, key)?;
        if !matches!(inner.state, GameState::Started | GameState::Ending) {
            return Err(GameError::InvalidState {
                expected: GameState::Started,
                actual: inner.state,
            });
        }
        let last = inner
            .history
            .last()
            .ok_or(GameError::NoHistoryToRollback)?;
        let mover = last.player;
        if !inner.players[mover.0].rack.clone().remove_tiles(&last.drawn) {
            error!(
                player = %inner.players[mover.0].name,
                move_nr = last.move_nr,
                "Drawn tiles are missing from the rack"
            );
            return Err(GameError::InconsistentHistory {
                move_nr: last.move_nr,
            });
        }
        let Some(entry) = inner.history.pop() else {
            return Err(GameError::NoHistoryToRollback);
        };

        if let Some(timer) = inner.end_timer.take() {
            timer.cancel();
        }
        inner.end_generation += 1;

        let GameInner {
            board,
            pool,
            players,
            turn_queue,
            ..
        } = &mut *inner;
        {
            let info = &mut players[mover.0];
            match (&entry.meta, entry.pool_before_exchange) {
                (Some(meta), _) => {
                    board.revert(meta);
                    pool.undraw(&entry.drawn);
                }
                (None, Some(before)) => *pool = before,
                (None, None) => pool.undraw(&entry.drawn),
            }
            info.rack = entry.rack_before;
            info.last_action_error = entry.previous.last_action_error;
            info.last_action = entry.previous.last_action;
        }
        for (id, delta) in &entry.score_deltas {
            players[id.0].score -= delta;
        }

        if let Some(pos) = turn_queue.iter().rposition(|&id| id == mover) {
            turn_queue.remove(pos);
        }
        turn_queue.push_front(mover);
        inner.move_nr = entry.move_nr;

        info!(
            player = %inner.players[mover.0].name,
            move_nr = entry.move_nr,
            "Move taken back"
        );
        broadcast(
            &mut inner,
            GameEvent::AfterRollback {
                move_nr: entry.move_nr,
                player: mover,
            },
        );
        if inner.state != GameState::Started {
            self.set_state(&mut inner, GameState::Started);
        }
        release_turn(&mut inner);
        self.state_changed.notify_all();
        Ok(())
    }

    pub fn rack(&self, player: PlayerId, key: SecretKey) -> Result<Vec<Tile>, GameError> {
        let inner = self.lock();
        authenticate(&inner, player, key)?;
        Ok(inner.players[player.0].rack.tiles().to_vec())
    }

    pub fn board(&self) -> Board {
        self.lock().board.clone()
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.lock().board.to_snapshot()
    }

    pub fn players(&self) -> Vec<PlayerSummary> {
        summaries(&self.lock())
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.clone()
    }

    /// Ends the game at once, telling everyone why.
    pub fn quit(&self, player: PlayerId, key: SecretKey, message: &str) -> Result<(), GameError> {
        let mut inner = self.lock();
        authenticate(&inner, player, key)?;
        if inner.state == GameState::Ended {
            return Ok(());
        }
        let text = format!("{} quit: {}", inner.players[player.0].name, message);
        info!(player = %inner.players[player.0].name, "Player quit");
        broadcast(&mut inner, GameEvent::Message { text });
        if let Some(timer) = inner.end_timer.take() {
            timer.cancel();
        }
        inner.end_generation += 1;
        self.set_state(&mut inner, GameState::Ended);
        release_turn(&mut inner);
        Ok(())
    }

    pub fn send_message(&self, player: PlayerId, key: SecretKey, text: &str) -> Result<(), GameError> {
        let mut inner = self.lock();
        authenticate(&inner, player, key)?;
        let text = format!("Message of {}: {}", inner.players[player.0].name, text);
        broadcast(&mut inner, GameEvent::Message { text });
        Ok(())
    }

    /// The player whose turn it is, while the game is running.
    pub fn player_to_play(&self) -> Option<PlayerId> {
        let inner = self.lock();
        match inner.state {
            GameState::Started => inner.turn_queue.front().copied(),
            _ => None,
        }
    }

    pub fn state(&self) -> GameState {
        self.lock().state
    }

    /// The number of moves that counted so far.
    pub fn move_nr(&self) -> u32 {
        self.lock().move_nr
    }

    pub fn score(&self, player: PlayerId) -> Result<i32, GameError> {
        let inner = self.lock();
        player_info(&inner, player).map(|info| info.score)
    }

    /// Whether the last move of the player that counted was a rejected one.
    pub fn is_last_play_error(&self, player: PlayerId) -> Result<bool, GameError> {
        let inner = self.lock();
        player_info(&inner, player).map(|info| info.last_action_error)
    }

    pub fn pool_size(&self) -> usize {
        self.lock().pool.len()
    }

    /// Blocks until the move `move_nr` has been completed or the game has
    /// ended. Returns `false` on timeout.
    pub fn await_end_of_move(&self, move_nr: u32, timeout: Duration) -> bool {
        let inner = self.lock();
        let (inner, _) = self
            .state_changed
            .wait_timeout_while(inner, timeout, |inner| {
                inner.move_nr <= move_nr && inner.state != GameState::Ended
            })
            .unwrap_or_else(PoisonError::into_inner);
        inner.move_nr > move_nr || inner.state == GameState::Ended
    }

    /// Blocks until the game is in `state`. Returns `false` on timeout.
    pub fn await_state(&self, state: GameState, timeout: Duration) -> bool {
        let inner = self.lock();
        let (inner, _) = self
            .state_changed
            .wait_timeout_while(inner, timeout, |inner| inner.state != state)
            .unwrap_or_else(PoisonError::into_inner);
        inner.state == state
    }

    fn lock(&self) -> MutexGuard<'_, GameInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, inner: &mut GameInner, state: GameState) {
        info!(from = %inner.state, to = %state, "Game state changed");
        inner.state = state;
        broadcast(inner, GameEvent::StateChanged { state });
        self.state_changed.notify_all();
    }

    fn apply_action(
        &self,
        inner: &mut GameInner,
        player: PlayerId,
        action: Action,
    ) -> Result<i32, GameError> {
        let rack_before = inner.players[player.0].rack.clone();
        let outcome = match &action {
            Action::PlaceWord(placement) => self.place_word(inner, player, placement),
            Action::Exchange { letters } => self.exchange(inner, player, letters),
            Action::SkipTurn => Ok(Outcome::default()),
        };

        let result = match outcome {
            Ok(outcome) => {
                let score = self.complete_turn(inner, player, action, outcome, rack_before, None);
                Ok(score)
            }
            Err(Refusal::Board(err)) => {
                inner.players[player.0].rack = rack_before;
                error!(
                    player = %inner.players[player.0].name,
                    action = %action,
                    "Illegal board state: {}",
                    err
                );
                Err(GameError::IllegalBoardState(err))
            }
            Err(Refusal::Rule(err)) => {
                let retry_allowed = self.config.retry_accepted || err.accepts_retry();
                let reason = err.to_string();
                warn!(
                    player = %inner.players[player.0].name,
                    action = %action,
                    retry_allowed,
                    "Move rejected: {}",
                    reason
                );
                inner.players[player.0]
                    .mailbox
                    .post(GameEvent::AfterRejectedAction {
                        player,
                        action: action.clone(),
                        reason: reason.clone(),
                    });
                if !retry_allowed {
                    let outcome = Outcome::default();
                    self.complete_turn(inner, player, action, outcome, rack_before, Some(reason));
                }
                Err(GameError::Rejected { err, retry_allowed })
            }
        };

        release_turn(inner);
        self.state_changed.notify_all();
        result
    }

    fn place_word(
        &self,
        inner: &mut GameInner,
        player: PlayerId,
        placement: &Placement,
    ) -> Result<Outcome, Refusal> {
        let mut meta = inner.board.evaluate(placement)?;
        if meta.touches_ends {
            return Err(IllegalMove::IncompleteWord {
                word: placement.word.clone(),
            }
            .into());
        }
        if meta.filled.is_empty() {
            return Err(IllegalMove::NoTilePlaced.into());
        }

        let rack = &inner.players[player.0].rack;
        if let Some(placement) = position_blanks(rack, &meta)? {
            meta = inner.board.evaluate(&placement)?;
        }
        let missing = rack.missing(&meta.requested_tiles());
        if !missing.is_empty() {
            return Err(IllegalMove::MissingLetters { letters: missing }.into());
        }

        if inner.board.is_empty() {
            if meta.placement.len() < 2 || !meta.covers(inner.board.center()) {
                return Err(IllegalMove::FirstWordTooShortOrOffCenter.into());
            }
        } else if !meta.overlaps && meta.crosswords.is_empty() {
            return Err(IllegalMove::MustTouchExistingWord.into());
        }

        for word in meta.words() {
            if !self.lexicon.is_admissible(&word) {
                return Err(IllegalMove::WordNotInLexicon { word }.into());
            }
        }

        let GameInner {
            board,
            players,
            move_nr,
            ..
        } = inner;
        let rack = &mut players[player.0].rack;
        let tiles = rack
            .remove_matching(&meta.requested_tiles())
            .map_err(|err| IllegalMove::MissingLetters {
                letters: err.missing,
            })?;
        board.commit(&meta, &tiles, *move_nr)?;

        info!(
            player = %players[player.0].name,
            word = %meta.placement.marked_word(),
            score = meta.score,
            bingo = meta.is_bingo,
            "Word placed"
        );
        Ok(Outcome {
            score: meta.score,
            spent: tiles,
            meta: Some(meta),
            ..Outcome::default()
        })
    }

    fn exchange(
        &self,
        inner: &mut GameInner,
        player: PlayerId,
        letters: &[char],
    ) -> Result<Outcome, Refusal> {
        let GameInner {
            pool,
            rng,
            players,
            ..
        } = inner;
        if pool.len() < self.config.min_pool_for_exchange {
            return Err(IllegalMove::ExchangeNotAllowed {
                pool_size: pool.len(),
            }
            .into());
        }
        let rack = &mut players[player.0].rack;
        let pool_before_exchange = pool.clone();
        let spent = rack
            .remove_exact(letters)
            .map_err(|err| IllegalMove::MissingLetters {
                letters: err.missing,
            })?;
        pool.return_tiles(spent.iter().copied(), rng);

        info!(player = %players[player.0].name, count = spent.len(), "Tiles exchanged");
        Ok(Outcome {
            spent,
            pool_before_exchange: Some(pool_before_exchange),
            ..Outcome::default()
        })
    }

    /// Records a move that counted and hands the turn to the next player.
    fn complete_turn(
        &self,
        inner: &mut GameInner,
        player: PlayerId,
        action: Action,
        outcome: Outcome,
        rack_before: Rack,
        rejection: Option<String>,
    ) -> i32 {
        let score = outcome.score as i32;
        let GameInner {
            players,
            pool,
            history,
            turn_queue,
            move_nr,
            ..
        } = &mut *inner;

        let info = &mut players[player.0];
        let previous = PreviousFlags {
            last_action_error: info.last_action_error,
            last_action: info.last_action.take(),
        };
        let drawn = info.rack.refill(pool);
        info.score += score;
        info.last_action_error = rejection.is_some();
        info.last_action = Some(action.clone());

        history.push(HistoryEntry {
            move_nr: *move_nr,
            player,
            player_name: info.name.clone(),
            action: action.clone(),
            rejection,
            score,
            score_deltas: BTreeMap::from([(player, score)]),
            drawn,
            spent: outcome.spent,
            meta: outcome.meta,
            pool_before_exchange: outcome.pool_before_exchange,
            rack_before,
            previous,
        });

        if turn_queue.pop_front() != Some(player) {
            error!(player = player.0, "Completed a turn out of order");
        }
        turn_queue.push_back(player);
        let finished_move = *move_nr;
        *move_nr += 1;

        broadcast(
            inner,
            GameEvent::AfterPlay {
                move_nr: finished_move,
                player,
                action,
                score,
            },
        );
        debug!("Board after move {}:\n{}", finished_move, visualize_board(&inner.board));
        trace!(pool = inner.pool.len(), "Tiles left in the pool");

        self.check_end_of_game(inner, player);
        score
    }

    fn check_end_of_game(&self, inner: &mut GameInner, mover: PlayerId) {
        let went_out = inner.players[mover.0].rack.is_empty() && inner.pool.is_empty();
        let all_skipped = inner
            .players
            .iter()
            .all(|info| !info.last_action_error && info.last_action == Some(Action::SkipTurn));
        if went_out {
            self.end_game(inner, Some(mover));
        } else if all_skipped {
            self.end_game(inner, None);
        }
    }

    /// Settles the scores and schedules the end of the game.
    ///
    /// Every player but the finisher loses the value of their rack, which the
    /// finisher gains.
    fn end_game(&self, inner: &mut GameInner, finisher: Option<PlayerId>) {
        let mut deltas: BTreeMap<PlayerId, i32> = BTreeMap::new();
        let mut bonus = 0;
        for (i, info) in inner.players.iter_mut().enumerate() {
            let id = PlayerId(i);
            if Some(id) == finisher {
                continue;
            }
            let penalty = info.rack.points() as i32;
            if penalty != 0 {
                info.score -= penalty;
                *deltas.entry(id).or_default() -= penalty;
                bonus += penalty;
            }
        }
        if let Some(finisher) = finisher {
            if bonus != 0 {
                inner.players[finisher.0].score += bonus;
                *deltas.entry(finisher).or_default() += bonus;
            }
        }
        if let Some(entry) = inner.history.last_mut() {
            for (id, delta) in deltas {
                *entry.score_deltas.entry(id).or_default() += delta;
            }
        }

        match finisher {
            Some(id) => info!(player = %inner.players[id.0].name, "Player went out"),
            None => info!("Every player skipped their turn"),
        }
        self.set_state(inner, GameState::Ending);

        inner.end_generation += 1;
        let generation = inner.end_generation;
        let game = self.this.clone();
        let timer = ScheduledTask::schedule("end-of-game", self.config.delay_before_end, move || {
            if let Some(game) = game.upgrade() {
                game.finish(generation);
            }
        });
        match timer {
            Ok(timer) => inner.end_timer = Some(timer),
            Err(err) => {
                error!("Could not schedule the end of the game: {}", err);
                self.set_state(inner, GameState::Ended);
            }
        }
    }

    fn finish(&self, generation: u64) {
        let mut inner = self.lock();
        if inner.state != GameState::Ending || inner.end_generation != generation {
            return;
        }
        inner.end_timer = None;
        self.set_state(&mut inner, GameState::Ended);
        release_turn(&mut inner);
    }
}

/// Marks the letters of the placement that have to be played with blanks,
/// because the rack has no letter tile for them. `None` if nothing changes.
///
/// This only works if the rack has none of that letter at all; if it has
/// some, the player has to say which occurrences are blanks.
fn position_blanks(rack: &Rack, meta: &MoveMetaInfo) -> Result<Option<Placement>, IllegalMove> {
    let mut placement: Option<Placement> = None;
    let mut blanks_needed = meta.required_blanks();
    let mut letters = meta.required_letters();
    letters.sort_unstable();
    letters.dedup();
    for letter in letters {
        let cells: Vec<usize> = meta
            .filled
            .iter()
            .filter(|cell| !cell.blank && cell.letter == letter)
            .map(|cell| cell.index)
            .collect();
        let available = rack.letter_count(letter);
        if available >= cells.len() {
            continue;
        }
        blanks_needed += cells.len() - available;
        if blanks_needed > rack.blank_count() {
            return Err(IllegalMove::MissingLetters {
                letters: rack.missing(&meta.requested_tiles()),
            });
        }
        if available > 0 {
            return Err(IllegalMove::BlankPositionRequired { letter });
        }
        let mut marked = placement.take().unwrap_or_else(|| meta.placement.clone());
        for index in cells {
            marked = marked.with_blank_at(index);
        }
        placement = Some(marked);
    }
    Ok(placement)
}

fn authenticate(inner: &GameInner, player: PlayerId, key: SecretKey) -> Result<(), GameError> {
    let info = player_info(inner, player)?;
    if info.key != key {
        return Err(GameError::Unauthenticated);
    }
    Ok(())
}

fn player_info(inner: &GameInner, player: PlayerId) -> Result<&PlayerInfo, GameError> {
    inner
        .players
        .get(player.0)
        .ok_or(GameError::UnknownPlayer(player))
}

fn expect_state(inner: &GameInner, expected: GameState) -> Result<(), GameError> {
    if inner.state != expected {
        return Err(GameError::InvalidState {
            expected,
            actual: inner.state,
        });
    }
    Ok(())
}

fn summaries(inner: &GameInner) -> Vec<PlayerSummary> {
    inner
        .players
        .iter()
        .enumerate()
        .map(|(i, info)| PlayerSummary {
            id: PlayerId(i),
            name: info.name.clone(),
            score: info.score,
        })
        .collect()
}

fn broadcast(inner: &mut GameInner, event: GameEvent) {
    for info in &mut inner.players {
        info.mailbox.post(event.clone());
    }
    for observer in &mut inner.observers {
        observer.post(event.clone());
    }
}

fn release_turn(inner: &mut GameInner) {
    if let Some(latch) = inner.latch.take() {
        latch.count_down();
    }
}

#[cfg(test)]
mod tests {
    use wordgame::{LetterSpec, Ruleset, TileId, WordList, BLANK};

    use super::*;
    use crate::Silent;

    fn rack_of(letters: &str) -> Rack {
        let mut rack = Rack::new();
        rack.add(letters.chars().enumerate().map(|(i, c)| {
            if c == BLANK {
                Tile::blank(TileId(i as u16))
            } else {
                Tile::letter(TileId(i as u16), c, 1)
            }
        }));
        rack
    }

    fn zoo(word: &str) -> MoveMetaInfo {
        let board = Board::new(&Ruleset::english());
        board
            .evaluate(&Placement::from_notation("H8", word).unwrap())
            .unwrap()
    }

    #[test]
    fn blank_stands_in_for_an_absent_letter() {
        let placement = position_blanks(&rack_of("?OO"), &zoo("ZOO")).unwrap();
        assert_eq!(placement.unwrap().marked_word(), "zOO");
    }

    #[test]
    fn nothing_to_position() {
        assert_eq!(position_blanks(&rack_of("ZOO"), &zoo("ZOO")), Ok(None));
        assert_eq!(position_blanks(&rack_of("?OO"), &zoo("zOO")), Ok(None));
    }

    #[test]
    fn ambiguous_blank() {
        assert_eq!(
            position_blanks(&rack_of("Z?O"), &zoo("ZOO")),
            Err(IllegalMove::BlankPositionRequired { letter: 'O' })
        );
        assert!(position_blanks(&rack_of("Z?O"), &zoo("ZoO")).unwrap().is_none());
    }

    #[test]
    fn not_enough_blanks() {
        assert_eq!(
            position_blanks(&rack_of("ZO"), &zoo("ZOO")),
            Err(IllegalMove::MissingLetters {
                letters: vec!['O']
            })
        );
    }

    #[test]
    fn rollback_refuses_a_move_that_no_longer_matches() {
        let ruleset = Ruleset::new(
            vec![LetterSpec {
                letter: 'A',
                count: 20,
                points: 1,
            }],
            0,
            15,
        )
        .unwrap();
        let lexicon = Arc::new(WordList::from_words(["AA"], ruleset));
        let game = Game::new(lexicon, Config::default()).unwrap();
        let alice = game.register_player("alice", Box::new(Silent)).unwrap();
        let driver = {
            let game = Arc::clone(&game);
            std::thread::spawn(move || game.start())
        };
        assert!(game.await_state(GameState::Started, Duration::from_secs(5)));
        game.play(alice.id, alice.key, "H8 AA".parse().unwrap())
            .unwrap();

        let lost = game.lock().history[0].drawn[0];
        assert!(game.lock().players[0].rack.remove_tiles(&[lost]));
        assert!(matches!(
            game.rollback_last_move(alice.id, alice.key),
            Err(GameError::InconsistentHistory { move_nr: 0 })
        ));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.move_nr(), 1);
        assert_eq!(game.board_snapshot().tiles.len(), 2);
        assert_eq!(game.rack(alice.id, alice.key).unwrap().len(), 6);

        game.quit(alice.id, alice.key, "done").unwrap();
        driver.join().unwrap().unwrap();
    }
}
