use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PlayerId = Uuid;

/// Upper bound of race progress, in percent
pub const FINISH_LINE: f64 = 100.0;

/// A registered racer and the outcome of their turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    payout_address: String,
    progress: f64,
    finish_time_ms: Option<u64>,
    position: Option<usize>,
}

impl Player {
    pub(crate) fn new(name: String, payout_address: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            payout_address,
            progress: 0.0,
            finish_time_ms: None,
            position: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payout_address(&self) -> &str {
        &self.payout_address
    }

    /// Progress in percent, always within `0..=100`
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn finish_time_ms(&self) -> Option<u64> {
        self.finish_time_ms
    }

    /// Final rank, 1 being the fastest. `None` until results are in, and for
    /// players that did not finish.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn has_finished(&self) -> bool {
        self.finish_time_ms.is_some()
    }

    /// Raises progress to `progress`, never lowering it. Returns the stored value.
    pub(crate) fn advance_progress(&mut self, progress: f64) -> f64 {
        let clamped = progress.clamp(0.0, FINISH_LINE);
        if clamped > self.progress {
            self.progress = clamped;
        }
        self.progress
    }

    pub(crate) fn finish(&mut self, elapsed_ms: u64) {
        self.progress = FINISH_LINE;
        self.finish_time_ms = Some(elapsed_ms);
    }

    pub(crate) fn set_position(&mut self, position: Option<usize>) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_blank() {
        let player = Player::new("Alice".to_string(), "alice@ln.example".to_string());
        assert_eq!(player.name(), "Alice");
        assert_eq!(player.payout_address(), "alice@ln.example");
        assert_eq!(player.progress(), 0.0);
        assert_eq!(player.finish_time_ms(), None);
        assert_eq!(player.position(), None);
        assert!(!player.has_finished());
    }

    #[test]
    fn test_progress_is_clamped_and_monotone() {
        let mut player = Player::new("Bob".to_string(), "addr".to_string());

        assert_eq!(player.advance_progress(-5.0), 0.0);
        assert_eq!(player.advance_progress(42.5), 42.5);
        assert_eq!(player.advance_progress(10.0), 42.5);
        assert_eq!(player.advance_progress(250.0), FINISH_LINE);
    }

    #[test]
    fn test_finish_pins_progress() {
        let mut player = Player::new("Carol".to_string(), "addr".to_string());
        player.advance_progress(97.0);
        player.finish(1800);

        assert!(player.has_finished());
        assert_eq!(player.progress(), FINISH_LINE);
        assert_eq!(player.finish_time_ms(), Some(1800));
    }
}
