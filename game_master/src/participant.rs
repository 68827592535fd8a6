use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use tracing::{trace, warn};
use wordgame::Action;

use crate::{GameEvent, GameState, PlayerId, PlayerSummary};

/// Receives the notifications of a game.
///
/// Every method does nothing by default, so implementations only pick the
/// ones they care about. The methods are called on a thread of their own, one
/// per participant, in the order the game sent the events. They may call back
/// into the game, e.g. play a move from [`on_play_required()`](Self::on_play_required).
pub trait Participant: Send {
    fn before_game_start(&mut self, _players: &[PlayerSummary]) {}

    fn on_play_required(&mut self, _player: PlayerId, _name: &str) {}

    fn after_play(&mut self, _move_nr: u32, _player: PlayerId, _action: &Action, _score: i32) {}

    fn after_rejected_action(&mut self, _player: PlayerId, _action: &Action, _reason: &str) {}

    fn after_rollback(&mut self, _move_nr: u32, _player: PlayerId) {}

    fn on_game_state_changed(&mut self, _state: GameState) {}

    fn on_dispatch_message(&mut self, _message: &str) {}

    fn after_game_end(&mut self, _players: &[PlayerSummary]) {}
}

/// A participant that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Participant for Silent {}

/// Forwards every event into a channel, e.g. to handle them on another thread.
pub struct Forwarder(pub mpsc::Sender<GameEvent>);

impl Forwarder {
    fn forward(&self, event: GameEvent) {
        // The other side only goes away when it is no longer interested
        let _ = self.0.send(event);
    }
}

impl Participant for Forwarder {
    fn before_game_start(&mut self, players: &[PlayerSummary]) {
        self.forward(GameEvent::BeforeGameStart {
            players: players.to_vec(),
        });
    }

    fn on_play_required(&mut self, player: PlayerId, name: &str) {
        self.forward(GameEvent::PlayRequired {
            player,
            name: name.to_string(),
        });
    }

    fn after_play(&mut self, move_nr: u32, player: PlayerId, action: &Action, score: i32) {
        self.forward(GameEvent::AfterPlay {
            move_nr,
            player,
            action: action.clone(),
            score,
        });
    }

    fn after_rejected_action(&mut self, player: PlayerId, action: &Action, reason: &str) {
        self.forward(GameEvent::AfterRejectedAction {
            player,
            action: action.clone(),
            reason: reason.to_string(),
        });
    }

    fn after_rollback(&mut self, move_nr: u32, player: PlayerId) {
        self.forward(GameEvent::AfterRollback { move_nr, player });
    }

    fn on_game_state_changed(&mut self, state: GameState) {
        self.forward(GameEvent::StateChanged { state });
    }

    fn on_dispatch_message(&mut self, message: &str) {
        self.forward(GameEvent::Message {
            text: message.to_string(),
        });
    }

    fn after_game_end(&mut self, players: &[PlayerSummary]) {
        self.forward(GameEvent::AfterGameEnd {
            players: players.to_vec(),
        });
    }
}

/// The sending end of the event queue of one participant, whose thread
/// delivers the events.
pub(crate) struct Mailbox {
    name: String,
    sender: Option<SyncSender<GameEvent>>,
    handle: Option<JoinHandle<()>>,
}

impl Mailbox {
    pub(crate) fn spawn(
        name: &str,
        mut participant: Box<dyn Participant>,
        capacity: usize,
    ) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::sync_channel::<GameEvent>(capacity);
        let handle = thread::Builder::new()
            .name(format!("events-{}", name))
            .spawn(move || {
                for event in receiver {
                    event.deliver(participant.as_mut());
                }
            })?;
        Ok(Self {
            name: name.to_string(),
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queues the event. Blocks while the queue is full.
    pub(crate) fn post(&mut self, event: GameEvent) {
        let Some(sender) = self.sender.clone() else {
            return;
        };
        let event = match sender.try_send(event) {
            Ok(()) => return,
            Err(TrySendError::Full(event)) => {
                trace!(participant = %self.name, "Event queue is full, waiting");
                event
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(participant = %self.name, "Participant stopped receiving events");
                self.sender = None;
                return;
            }
        };
        if sender.send(event).is_err() {
            warn!(participant = %self.name, "Participant stopped receiving events");
            self.sender = None;
        }
    }

    /// Stops accepting events. The thread exits once it has delivered the
    /// events already queued; its handle is returned for joining.
    pub(crate) fn close(&mut self) -> Option<JoinHandle<()>> {
        self.sender = None;
        self.handle.take()
    }
}
