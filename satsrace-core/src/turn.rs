use crate::{PlayerId, PlayerRegistry, RaceError, Result};

/// Result of moving past the active player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    Next(PlayerId),
    Exhausted,
}

/// Tracks whose turn it is. Turn order is registration order, no skipping.
#[derive(Debug, Clone, Default)]
pub struct TurnController {
    current: Option<PlayerId>,
}

impl TurnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<PlayerId> {
        self.current
    }

    /// Hand the first turn to the first registered player
    pub fn begin(&mut self, registry: &PlayerRegistry) -> Result<PlayerId> {
        let first = registry
            .first()
            .map(|p| p.id())
            .ok_or_else(|| RaceError::precondition("No players registered"))?;

        self.current = Some(first);
        Ok(first)
    }

    pub fn advance(&mut self, registry: &PlayerRegistry) -> Result<TurnStep> {
        let current = self
            .current
            .ok_or_else(|| RaceError::precondition("No turn in progress"))?;

        if !registry.contains(current) {
            return Err(RaceError::precondition(format!(
                "Active player {} is no longer registered",
                current
            )));
        }

        match registry.next_after(current) {
            Some(next) => {
                let next = next.id();
                self.current = Some(next);
                Ok(TurnStep::Next(next))
            }
            None => {
                self.current = None;
                Ok(TurnStep::Exhausted)
            }
        }
    }

    pub fn is_last_turn(&self, registry: &PlayerRegistry) -> bool {
        self.current
            .and_then(|id| registry.index_of(id))
            .is_some_and(|index| index + 1 == registry.len())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
