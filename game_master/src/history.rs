use std::collections::BTreeMap;

use serde::Serialize;
use wordgame::{Action, MoveMetaInfo, Rack, Tile, TilePool};

use crate::PlayerId;

/// What the player's flags were before a move, so they can be restored.
#[derive(Clone, Debug, Default)]
pub(crate) struct PreviousFlags {
    pub(crate) last_action_error: bool,
    pub(crate) last_action: Option<Action>,
}

/// The record of one move that counted, including rejected moves that
/// consumed the turn.
#[derive(Clone, Debug, Serialize)]
pub struct HistoryEntry {
    pub move_nr: u32,
    pub player: PlayerId,
    pub player_name: String,
    pub action: Action,
    /// Why the action was rejected, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
    pub score: i32,
    /// Every score change caused by this move, end-of-game settlement included.
    pub score_deltas: BTreeMap<PlayerId, i32>,
    /// The tiles the player drew afterwards, in draw order.
    pub drawn: Vec<Tile>,
    /// The tiles that left the rack, placed or exchanged.
    pub spent: Vec<Tile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MoveMetaInfo>,
    #[serde(skip)]
    pub(crate) pool_before_exchange: Option<TilePool>,
    /// The mover's rack, in order, before the move.
    #[serde(skip)]
    pub(crate) rack_before: Rack,
    #[serde(skip)]
    pub(crate) previous: PreviousFlags,
}

impl HistoryEntry {
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// E.g. `alice - H8 CAT 10 pts`, with a `*` before the action if it was rejected.
    pub fn format_as_string(&self) -> String {
        format!(
            "{} - {}{} {} pts",
            self.player_name,
            if self.is_rejected() { "*" } else { "" },
            self.action,
            self.score
        )
    }
}
