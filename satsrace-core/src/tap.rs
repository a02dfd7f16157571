//! Input accumulation for a single turn.
//!
//! A turn starts once the countdown is over. Every tap moves the racer a
//! random step forward until the finish line is reached, at which point the
//! elapsed time becomes the player's finish time.

use crate::{RaceConfig, FINISH_LINE};
use rand::Rng;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// The tap was ignored: the turn has not started or is already over
    Idle,
    Progress(f64),
    Finished { elapsed_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct TapMeter {
    step_min: f64,
    step_max: f64,
    progress: f64,
    taps: u32,
    started_at: Option<Instant>,
    finish_ms: Option<u64>,
}

impl TapMeter {
    pub fn new(step_min: f64, step_max: f64) -> Self {
        Self {
            step_min,
            step_max,
            progress: 0.0,
            taps: 0,
            started_at: None,
            finish_ms: None,
        }
    }

    pub fn from_config(config: &RaceConfig) -> Self {
        Self::new(config.tap_step_min, config.tap_step_max)
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.finish_ms.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.finish_ms.is_some()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn taps(&self) -> u32 {
        self.taps
    }

    pub fn finish_ms(&self) -> Option<u64> {
        self.finish_ms
    }

    /// Time on the clock: frozen once finished, zero before the start
    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        if let Some(ms) = self.finish_ms {
            return ms;
        }
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn tap(&mut self, now: Instant) -> TapOutcome {
        let step = if self.step_min < self.step_max {
            rand::thread_rng().gen_range(self.step_min..self.step_max)
        } else {
            self.step_min
        };
        self.tap_with_step(now, step)
    }

    pub fn tap_with_step(&mut self, now: Instant, step: f64) -> TapOutcome {
        if !self.is_running() {
            return TapOutcome::Idle;
        }

        self.taps += 1;
        self.progress = (self.progress + step.max(0.0)).min(FINISH_LINE);

        if self.progress >= FINISH_LINE {
            let elapsed_ms = self.elapsed_ms(now);
            self.finish_ms = Some(elapsed_ms);
            TapOutcome::Finished { elapsed_ms }
        } else {
            TapOutcome::Progress(self.progress)
        }
    }

    /// Clear everything for the next player's turn
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.taps = 0;
        self.started_at = None;
        self.finish_ms = None;
    }
}

/// `"2.35s"`, or `"Did not finish"` when there is no time
pub fn format_elapsed(ms: Option<u64>) -> String {
    match ms {
        Some(ms) => format!("{:.2}s", ms as f64 / 1000.0),
        None => "Did not finish".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_taps_before_start_are_ignored() {
        let mut meter = TapMeter::new(1.5, 2.5);
        assert_eq!(meter.tap(Instant::now()), TapOutcome::Idle);
        assert_eq!(meter.taps(), 0);
        assert_eq!(meter.progress(), 0.0);
    }

    #[test]
    fn test_reaches_finish_line() {
        let start = Instant::now();
        let mut meter = TapMeter::new(1.5, 2.5);
        meter.start(start);

        for i in 1..10 {
            let now = start + Duration::from_millis(100 * i);
            assert_eq!(
                meter.tap_with_step(now, 10.0),
                TapOutcome::Progress(10.0 * i as f64)
            );
        }

        let end = start + Duration::from_millis(1234);
        assert_eq!(
            meter.tap_with_step(end, 10.0),
            TapOutcome::Finished { elapsed_ms: 1234 }
        );
        assert!(meter.is_finished());
        assert_eq!(meter.taps(), 10);
        assert_eq!(meter.progress(), FINISH_LINE);

        // the clock stops at the finish line
        assert_eq!(meter.elapsed_ms(end + Duration::from_secs(5)), 1234);
        assert_eq!(meter.tap_with_step(end, 10.0), TapOutcome::Idle);
    }

    #[test]
    fn test_overshoot_is_capped() {
        let start = Instant::now();
        let mut meter = TapMeter::new(1.5, 2.5);
        meter.start(start);
        meter.tap_with_step(start, 99.0);

        let outcome = meter.tap_with_step(start + Duration::from_millis(50), 5.0);
        assert_eq!(outcome, TapOutcome::Finished { elapsed_ms: 50 });
        assert_eq!(meter.progress(), FINISH_LINE);
    }

    #[test]
    fn test_random_steps_stay_in_range() {
        let start = Instant::now();
        let mut meter = TapMeter::new(1.5, 2.5);
        meter.start(start);

        let mut previous = 0.0;
        while let TapOutcome::Progress(progress) = meter.tap(start) {
            let step = progress - previous;
            assert!(step > 1.5 - 1e-9 && step < 2.5 + 1e-9, "step {} out of range", step);
            previous = progress;
        }
        assert!(meter.is_finished());
        assert!(meter.taps() >= 40 && meter.taps() <= 67);
    }

    #[test]
    fn test_reset() {
        let start = Instant::now();
        let mut meter = TapMeter::from_config(&RaceConfig::default());
        meter.start(start);
        meter.tap_with_step(start, 100.0);
        assert!(meter.is_finished());

        meter.reset();
        assert!(!meter.is_running());
        assert_eq!(meter.finish_ms(), None);
        assert_eq!(meter.elapsed_ms(start), 0);
        assert_eq!(meter.taps(), 0);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Some(2000)), "2.00s");
        assert_eq!(format_elapsed(Some(1534)), "1.53s");
        assert_eq!(format_elapsed(None), "Did not finish");
    }
}
