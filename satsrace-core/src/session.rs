use crate::{
    ranking, PaymentRequest, Player, PlayerId, PlayerRegistry, RaceConfig, RaceError, Result,
    TurnController, TurnStep,
};
use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse stage of a session. Moves forward only; `reset` is the way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Racing,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Racing => "racing",
            Phase::Results => "results",
        };
        f.write_str(name)
    }
}

/// The one owned game state. Every mutation goes through the methods below,
/// and a failed call leaves the session untouched.
#[derive(Debug, Clone)]
pub struct RaceSession {
    config: RaceConfig,
    registry: PlayerRegistry,
    turns: TurnController,
    phase: Phase,
}

impl Default for RaceSession {
    fn default() -> Self {
        Self {
            config: RaceConfig::default(),
            registry: PlayerRegistry::new(),
            turns: TurnController::new(),
            phase: Phase::Setup,
        }
    }
}

impl RaceSession {
    pub fn new(config: RaceConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reward(&self) -> Amount {
        self.config.reward()
    }

    pub fn players(&self) -> &[Player] {
        self.registry.as_slice()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.registry.get(id)
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.turns.current()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.turns.current().and_then(|id| self.registry.get(id))
    }

    /// True while the active player is the last one to race
    pub fn is_last_turn(&self) -> bool {
        self.turns.is_last_turn(&self.registry)
    }

    /// Player ranked first, once results are in
    pub fn winner(&self) -> Option<&Player> {
        if self.phase != Phase::Results {
            return None;
        }
        self.players().iter().find(|p| p.position() == Some(1))
    }

    /// Finished players, fastest first
    pub fn standings(&self) -> Vec<&Player> {
        ranking::standings(self.players())
    }

    pub fn register(&mut self, name: &str, payout_address: &str) -> Result<PlayerId> {
        self.require_phase(Phase::Setup, "register players")?;
        self.registry.register(name, payout_address)
    }

    /// Start racing. The first registered player gets the first turn.
    pub fn begin(&mut self) -> Result<PlayerId> {
        self.require_phase(Phase::Setup, "start the race")?;

        let min_players = self.config.min_players;
        if self.registry.len() < min_players {
            return Err(RaceError::precondition(format!(
                "You need at least {} players to start a race",
                min_players
            )));
        }

        let first = self.turns.begin(&self.registry)?;
        self.phase = Phase::Racing;

        tracing::info!(
            "Race started with {} players, {} goes first",
            self.registry.len(),
            first
        );
        Ok(first)
    }

    pub fn record_progress(&mut self, id: PlayerId, progress: f64) -> Result<f64> {
        self.require_active_racer(id)?;
        self.registry.record_progress(id, progress)
    }

    pub fn record_finish(&mut self, id: PlayerId, elapsed_ms: u64) -> Result<()> {
        self.require_active_racer(id)?;
        self.registry.record_finish(id, elapsed_ms)
    }

    /// Move to the next player's turn. After the last turn the race is
    /// ranked and the session enters `Results` in the same step, returning
    /// `None`.
    pub fn advance(&mut self) -> Result<Option<PlayerId>> {
        self.require_phase(Phase::Racing, "advance turns")?;

        match self.turns.advance(&self.registry)? {
            TurnStep::Next(next) => {
                tracing::info!("Next up: {}", next);
                Ok(Some(next))
            }
            TurnStep::Exhausted => {
                let winner = ranking::rank_players(self.registry.players_mut());
                self.phase = Phase::Results;

                match winner {
                    Some(id) => tracing::info!(
                        "Race complete. Winner: {} wins {} sats",
                        id,
                        self.reward().to_sat()
                    ),
                    None => tracing::warn!("Race complete with no finishers"),
                }
                Ok(None)
            }
        }
    }

    /// Drop every player and return to `Setup`. The configuration is kept.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.turns.clear();
        self.phase = Phase::Setup;

        tracing::info!("Session reset");
    }

    /// Payout details for the winner, once there is one
    pub fn payment_request(&self) -> Option<PaymentRequest> {
        self.winner()
            .map(|winner| PaymentRequest::new(winner.payout_address(), self.reward(), winner.name()))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            players: self.players().to_vec(),
            current_player_id: self.current_player_id(),
            reward_sats: self.reward().to_sat(),
            winner_id: self.winner().map(|p| p.id()),
        }
    }

    fn require_phase(&self, expected: Phase, action: &str) -> Result<()> {
        if self.phase != expected {
            return Err(RaceError::precondition(format!(
                "Cannot {} during {}",
                action, self.phase
            )));
        }
        Ok(())
    }

    fn require_active_racer(&self, id: PlayerId) -> Result<()> {
        let player = self.registry.get(id).ok_or(RaceError::PlayerNotFound(id))?;
        self.require_phase(Phase::Racing, "record race results")?;

        if self.turns.current() != Some(id) {
            return Err(RaceError::precondition(format!(
                "It is not {}'s turn",
                player.name()
            )));
        }

        if player.has_finished() {
            return Err(RaceError::precondition(format!(
                "{} already crossed the finish line",
                player.name()
            )));
        }

        Ok(())
    }
}

/// Read-only view of a session for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub players: Vec<Player>,
    pub current_player_id: Option<PlayerId>,
    pub reward_sats: u64,
    pub winner_id: Option<PlayerId>,
}
