//! satsrace - Core game logic for a local tap-to-race game
//!
//! Players register with a name and a payout address, then race one at a
//! time by tapping. The fastest finish time wins a fixed sats reward, paid
//! out through a scannable payment code.
//!
//! Everything lives in a single owned [`RaceSession`] that moves through
//! [`Phase::Setup`], [`Phase::Racing`] and [`Phase::Results`].

pub mod config;
pub mod error;
pub mod payment;
pub mod player;
pub mod ranking;
pub mod registry;
pub mod session;
pub mod tap;
pub mod turn;

pub use config::{RaceConfig, DEFAULT_REWARD_SATS, MIN_PLAYERS};
pub use error::{ErrorKind, RaceError, Result};
pub use payment::{PaymentCodeRenderer, PaymentRequest};
pub use player::{Player, PlayerId, FINISH_LINE};
pub use registry::PlayerRegistry;
pub use session::{Phase, RaceSession, SessionSnapshot};
pub use tap::{format_elapsed, TapMeter, TapOutcome};
pub use turn::{TurnController, TurnStep};

pub use ::bitcoin::Amount;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_full_game_with_tap_meter() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mut session = RaceSession::default();
        session.register("Alice", "alice@ln.example").unwrap();
        session.register("Bob", "bob@ln.example").unwrap();
        session.begin().unwrap();

        let start = Instant::now();
        let mut meter = TapMeter::from_config(session.config());

        for step in [4.0, 5.0] {
            let id = session.current_player_id().unwrap();
            meter.reset();
            meter.start(start);

            let mut tick = 0;
            loop {
                tick += 10;
                match meter.tap_with_step(start + Duration::from_millis(tick), step) {
                    TapOutcome::Progress(progress) => {
                        session.record_progress(id, progress).unwrap();
                    }
                    TapOutcome::Finished { elapsed_ms } => {
                        session.record_finish(id, elapsed_ms).unwrap();
                        break;
                    }
                    TapOutcome::Idle => unreachable!(),
                }
            }
            session.advance().unwrap();
        }

        assert_eq!(session.phase(), Phase::Results);
        let winner = session.winner().unwrap();
        assert_eq!(winner.name(), "Bob");
        assert_eq!(winner.finish_time_ms(), Some(200));
        assert_eq!(session.players()[0].finish_time_ms(), Some(250));
        assert_eq!(session.players()[0].position(), Some(2));
    }
}
