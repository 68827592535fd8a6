use serde::Serialize;
use wordgame::Action;

use crate::{GameState, Participant, PlayerId, PlayerSummary};

/// A notification from the game to a participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    StateChanged {
        state: GameState,
    },
    BeforeGameStart {
        players: Vec<PlayerSummary>,
    },
    /// The player is expected to submit an action now.
    PlayRequired {
        player: PlayerId,
        name: String,
    },
    /// An action has been played, or rejected and counted as played.
    AfterPlay {
        move_nr: u32,
        player: PlayerId,
        action: Action,
        score: i32,
    },
    /// Sent only to the player whose action was rejected.
    AfterRejectedAction {
        player: PlayerId,
        action: Action,
        reason: String,
    },
    /// The move `move_nr` has been taken back.
    AfterRollback {
        move_nr: u32,
        player: PlayerId,
    },
    AfterGameEnd {
        players: Vec<PlayerSummary>,
    },
    Message {
        text: String,
    },
}

impl GameEvent {
    /// Calls the matching method of the participant.
    pub fn deliver(&self, participant: &mut dyn Participant) {
        match self {
            GameEvent::StateChanged { state } => participant.on_game_state_changed(*state),
            GameEvent::BeforeGameStart { players } => participant.before_game_start(players),
            GameEvent::PlayRequired { player, name } => {
                participant.on_play_required(*player, name)
            }
            GameEvent::AfterPlay {
                move_nr,
                player,
                action,
                score,
            } => participant.after_play(*move_nr, *player, action, *score),
            GameEvent::AfterRejectedAction {
                player,
                action,
                reason,
            } => participant.after_rejected_action(*player, action, reason),
            GameEvent::AfterRollback { move_nr, player } => {
                participant.after_rollback(*move_nr, *player)
            }
            GameEvent::AfterGameEnd { players } => participant.after_game_end(players),
            GameEvent::Message { text } => participant.on_dispatch_message(text),
        }
    }
}
