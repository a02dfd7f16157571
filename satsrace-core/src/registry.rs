use crate::{Player, PlayerId, RaceError, Result};

/// Registered players in registration order, which is also turn order
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player. Both fields are trimmed and must be non-empty.
    pub fn register(&mut self, name: &str, payout_address: &str) -> Result<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RaceError::validation("Please enter a name"));
        }

        let payout_address = payout_address.trim();
        if payout_address.is_empty() {
            return Err(RaceError::validation("Please enter a payout address"));
        }

        let player = Player::new(name.to_string(), payout_address.to_string());
        let player_id = player.id();
        self.players.push(player);

        tracing::info!("Registered player {} ({})", name, player_id);
        Ok(player_id)
    }

    /// Store a progress report, returning the value actually kept
    pub fn record_progress(&mut self, id: PlayerId, progress: f64) -> Result<f64> {
        if progress.is_nan() {
            return Err(RaceError::validation("Progress must be a number"));
        }

        let player = self.get_mut(id)?;
        let stored = player.advance_progress(progress);

        tracing::debug!("Player {} progress {:.1}%", id, stored);
        Ok(stored)
    }

    pub fn record_finish(&mut self, id: PlayerId, elapsed_ms: u64) -> Result<()> {
        let player = self.get_mut(id)?;
        if let Some(previous) = player.finish_time_ms() {
            return Err(RaceError::precondition(format!(
                "{} already finished in {} ms",
                player.name(),
                previous
            )));
        }

        player.finish(elapsed_ms);

        tracing::info!("Player {} finished in {} ms", id, elapsed_ms);
        Ok(())
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(RaceError::PlayerNotFound(id))
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub fn first(&self) -> Option<&Player> {
        self.players.first()
    }

    /// The player registered right after `id`, if any
    pub fn next_after(&self, id: PlayerId) -> Option<&Player> {
        self.index_of(id).and_then(|index| self.players.get(index + 1))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn as_slice(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FINISH_LINE;
    use uuid::Uuid;

    #[test]
    fn test_register_appends_in_order() {
        let mut registry = PlayerRegistry::new();
        let alice = registry.register("Alice", "addrA").unwrap();
        let bob = registry.register("  Bob  ", " addrB ").unwrap();

        assert_eq!(registry.len(), 2);
        assert_ne!(alice, bob);
        assert_eq!(registry.index_of(alice), Some(0));
        assert_eq!(registry.index_of(bob), Some(1));

        let bob = registry.get(bob).unwrap();
        assert_eq!(bob.name(), "Bob");
        assert_eq!(bob.payout_address(), "addrB");
    }

    #[test]
    fn test_register_rejects_blank_fields() {
        let mut registry = PlayerRegistry::new();

        let err = registry.register("   ", "addr").unwrap_err();
        assert!(matches!(err, RaceError::Validation(_)));

        let err = registry.register("Alice", "").unwrap_err();
        assert!(matches!(err, RaceError::Validation(_)));

        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_player() {
        let mut registry = PlayerRegistry::new();
        registry.register("Alice", "addrA").unwrap();
        let stranger = Uuid::new_v4();

        assert!(matches!(
            registry.record_progress(stranger, 10.0),
            Err(RaceError::PlayerNotFound(id)) if id == stranger
        ));
        assert!(matches!(
            registry.record_finish(stranger, 1000),
            Err(RaceError::PlayerNotFound(_))
        ));
    }

    #[test]
    fn test_progress_and_finish() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", "addrA").unwrap();

        assert_eq!(registry.record_progress(id, 30.0).unwrap(), 30.0);
        assert_eq!(registry.record_progress(id, 20.0).unwrap(), 30.0);
        assert_eq!(registry.record_progress(id, 130.0).unwrap(), FINISH_LINE);
        assert!(registry.record_progress(id, f64::NAN).is_err());

        registry.record_finish(id, 2000).unwrap();
        let err = registry.record_finish(id, 1000).unwrap_err();
        assert!(matches!(err, RaceError::Precondition(_)));
        assert_eq!(registry.get(id).unwrap().finish_time_ms(), Some(2000));
    }

    #[test]
    fn test_turn_order_navigation() {
        let mut registry = PlayerRegistry::new();
        let a = registry.register("A", "1").unwrap();
        let b = registry.register("B", "2").unwrap();

        assert_eq!(registry.first().map(|p| p.id()), Some(a));
        assert_eq!(registry.next_after(a).map(|p| p.id()), Some(b));
        assert!(registry.next_after(b).is_none());
        assert!(registry.next_after(Uuid::new_v4()).is_none());
    }
}
