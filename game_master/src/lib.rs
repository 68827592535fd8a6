mod error;
mod event;
mod game;
mod history;
mod latch;
mod participant;
mod timer;
pub use error::*;
pub use event::*;
pub use game::*;
pub use history::*;
pub use latch::*;
pub use participant::*;
pub use timer::*;

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Seeds the turn order, the tile pool and every reshuffle.
    pub seed: u64,
    /// Whether a rejected move leaves the turn with the player.
    pub retry_accepted: bool,
    /// How long a game stays in the ending state, during which the last
    /// move can still be taken back.
    pub delay_before_end: Duration,
    /// After this long without a move, the turn is skipped. `None` waits forever.
    pub turn_timeout: Option<Duration>,
    pub event_queue_capacity: usize,
    /// Exchanging needs at least this many tiles in the pool.
    pub min_pool_for_exchange: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            retry_accepted: true,
            delay_before_end: Duration::from_secs(3),
            turn_timeout: None,
            event_queue_capacity: 1024,
            min_pool_for_exchange: wordgame::RACK_SIZE,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.event_queue_capacity == 0 {
            return Err(GameError::InvalidConfiguration(String::from(
                "the event queue capacity must be positive",
            )));
        }
        if self.turn_timeout == Some(Duration::ZERO) {
            return Err(GameError::InvalidConfiguration(String::from(
                "the turn timeout must be positive",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.retry_accepted);
        assert_eq!(config.delay_before_end, Duration::from_secs(3));
        assert_eq!(config.min_pool_for_exchange, 7);
    }

    #[test]
    fn invalid_config() {
        let config = Config {
            event_queue_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
        let config = Config {
            turn_timeout: Some(Duration::ZERO),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }
}
