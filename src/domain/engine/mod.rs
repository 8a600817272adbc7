//! The workout timer state machine.
//!
//! A [`TimerEngine`] is a plain synchronous object. It never sleeps and never
//! spawns anything: the owner calls [`TimerEngine::tick`] once per second
//! while [`Phase::is_ticking`] holds, forwards user actions, and drains the
//! queued [`TimerEvent`]s and the single [`SessionOutcome`] on its own
//! schedule.

mod event;
mod rules;
mod snapshot;

pub use event::{SessionOutcome, TimerEvent};
pub use rules::{InvalidConfigError, Rules};
pub use snapshot::TimerSnapshot;

use std::collections::vec_deque::{Drain, VecDeque};

use crate::domain::entity::{
    Countdown, CountdownAdvance, Phase, Progress, RoundMarkers, TimerConfig, TimerVariant,
};

use rules::{Advance, Clock, VariantRules};

/// The timer of one workout session.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    rules: Rules,
    phase: Phase,
    countdown: Countdown,
    clock: Clock,
    markers: RoundMarkers,
    events: VecDeque<TimerEvent>,
    outcome: Option<SessionOutcome>,
}

impl TimerEngine {
    /// Creates an idle [`TimerEngine`].
    ///
    /// # Errors
    ///
    /// This function will return an error if a relevant duration or round
    /// count is zero.
    pub fn new(variant: TimerVariant, config: &TimerConfig) -> Result<Self, InvalidConfigError> {
        Ok(Self::with_rules(Rules::try_new(variant, config)?))
    }

    /// Creates an idle [`TimerEngine`] from validated rules.
    pub fn with_rules(rules: Rules) -> Self {
        let clock = Clock::new(rules.initial_seconds());
        Self {
            rules,
            phase: Phase::initial(),
            countdown: Countdown::new(),
            clock,
            markers: RoundMarkers::new(),
            events: VecDeque::new(),
            outcome: None,
        }
    }

    /// Begin the 3-2-1-GO pre-roll. Only valid while idle.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }

        let step = self.countdown.activate();
        self.phase = Phase::CountingDown;
        tracing::debug!(variant = %self.variant(), "Countdown started");
        self.events.push_back(TimerEvent::CountdownPulse { step });
    }

    /// Leave the pre-roll and start the main clock. Called automatically
    /// when the pre-roll ends, but hosts that render their own pre-roll may
    /// call it directly.
    pub fn complete_countdown(&mut self) {
        if self.phase != Phase::CountingDown {
            return;
        }

        self.clock = Clock::new(self.rules.initial_seconds());
        self.phase = Phase::Running;
        tracing::debug!(variant = %self.variant(), seconds = self.clock.seconds, "Timer running");
        self.events.push_back(TimerEvent::CountdownFinished);
    }

    /// Play/pause. Starts the pre-roll when idle.
    pub fn toggle(&mut self) {
        match self.phase {
            Phase::Idle => self.start(),
            Phase::Running => {
                self.phase = Phase::Paused;
                tracing::debug!("Timer paused");
                self.events.push_back(TimerEvent::Paused);
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                tracing::debug!("Timer resumed");
                self.events.push_back(TimerEvent::Resumed);
            }
            Phase::CountingDown | Phase::Completed | Phase::Stopped => {}
        }
    }

    /// Apply one second. Ignored unless counting down or running.
    pub fn tick(&mut self) {
        match self.phase {
            Phase::CountingDown => self.tick_countdown(),
            Phase::Running => self.tick_clock(),
            _ => {}
        }
    }

    fn tick_countdown(&mut self) {
        match self.countdown.advance() {
            CountdownAdvance::Pulse(step) => {
                self.events.push_back(TimerEvent::CountdownPulse { step });
            }
            CountdownAdvance::Finished => self.complete_countdown(),
            CountdownAdvance::Idle => {}
        }
    }

    fn tick_clock(&mut self) {
        match self.rules.advance(&mut self.clock) {
            Advance::Continue => {}
            Advance::Transition(event) => {
                tracing::debug!(?event, "Timer transition");
                self.events.push_back(event);
            }
            Advance::Complete => self.complete(),
        }
    }

    /// Abandon the session. Only valid once the main clock has started.
    pub fn stop(&mut self) {
        if !self.phase.is_active() {
            return;
        }

        self.phase = Phase::Stopped;
        tracing::debug!("Timer stopped");
        self.outcome = Some(SessionOutcome::Stopped);
    }

    /// Complete the session now with the current result, e.g. when a For
    /// Time workout is done.
    pub fn finish(&mut self) {
        if !self.phase.is_active() {
            return;
        }

        self.complete();
    }

    fn complete(&mut self) {
        let result = self.rules.result(&self.clock);
        self.phase = Phase::Completed;
        tracing::debug!(result, "Timer completed");
        self.outcome = Some(SessionOutcome::Completed { result });
    }

    /// Mark an AMRAP round as done. Ignored for other variants and unless
    /// running.
    pub fn mark_round(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let Some(elapsed) = self.rules.lap_elapsed(&self.clock) else {
            return;
        };

        let lap = self.markers.mark(elapsed);
        self.clock.round += 1;
        tracing::debug!(lap, round = self.clock.round, "Round marked");
        self.events.push_back(TimerEvent::RoundMarked {
            rounds: self.markers.count() as u64,
            lap,
        });
    }

    /// Take the queued transient events.
    pub fn drain_events(&mut self) -> Drain<'_, TimerEvent> {
        self.events.drain(..)
    }

    /// Take the terminal outcome. Returns `Some` at most once per engine.
    pub fn take_outcome(&mut self) -> Option<SessionOutcome> {
        self.outcome.take()
    }

    /// Returns the variant this engine was built for.
    pub fn variant(&self) -> TimerVariant {
        self.rules.variant()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining seconds, or elapsed seconds for For Time.
    pub fn seconds(&self) -> u64 {
        self.clock.seconds()
    }

    /// Returns the current round, or the rounds marked so far for AMRAP.
    pub fn round(&self) -> u64 {
        self.clock.round
    }

    /// Tabata only: `true` during work, `false` during rest.
    pub fn is_work_phase(&self) -> bool {
        self.clock.work
    }

    /// Returns the AMRAP lap history.
    pub fn markers(&self) -> &RoundMarkers {
        &self.markers
    }

    /// Returns the progress ring value and its fill direction.
    pub fn progress(&self) -> Progress {
        self.rules.progress(&self.clock)
    }

    /// Returns a [`TimerSnapshot`] of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        let progress = self.progress();
        let label = if self.phase == Phase::Paused {
            "PAUSED"
        } else {
            self.rules.label(&self.clock)
        };

        TimerSnapshot {
            variant: self.variant(),
            phase: self.phase,
            seconds: self.seconds(),
            display: self.rules.display_time(&self.clock),
            label,
            round: self.clock.round,
            total_rounds: self.rules.total_rounds(),
            work_phase: self.clock.work,
            laps: self.markers.laps().to_vec(),
            average_lap: self.markers.average(),
            progress: progress.percent(),
            direction: progress.direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::entity::{CountdownStep, Direction};

    fn running(variant: TimerVariant, config: TimerConfig) -> TimerEngine {
        let mut engine = TimerEngine::new(variant, &config).unwrap();
        engine.start();
        for _ in 0..4 {
            engine.tick();
        }
        assert_eq!(engine.phase(), Phase::Running);
        engine.drain_events().for_each(drop);
        engine
    }

    #[test]
    fn countdown_emits_each_step_once() {
        let mut engine = TimerEngine::new(TimerVariant::Emom, &TimerConfig::emom(3, 2)).unwrap();
        engine.start();
        assert_eq!(engine.phase(), Phase::CountingDown);
        for _ in 0..3 {
            engine.tick();
            assert_eq!(engine.phase(), Phase::CountingDown);
        }
        engine.tick();
        assert_eq!(engine.phase(), Phase::Running);

        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![
                TimerEvent::CountdownPulse {
                    step: CountdownStep::Three
                },
                TimerEvent::CountdownPulse {
                    step: CountdownStep::Two
                },
                TimerEvent::CountdownPulse {
                    step: CountdownStep::One
                },
                TimerEvent::CountdownPulse {
                    step: CountdownStep::Go
                },
                TimerEvent::CountdownFinished,
            ]
        );
        assert_eq!(engine.seconds(), 2);
        assert_eq!(engine.round(), 1);
    }

    #[test]
    fn start_only_from_idle() {
        let mut engine = running(TimerVariant::Amrap, TimerConfig::amrap(60));
        engine.start();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.drain_events().count(), 0);
    }

    #[test]
    fn toggle_from_idle_starts_and_is_ignored_during_countdown() {
        let mut engine = TimerEngine::new(TimerVariant::Tabata, &TimerConfig::default()).unwrap();
        engine.toggle();
        assert_eq!(engine.phase(), Phase::CountingDown);
        engine.toggle();
        assert_eq!(engine.phase(), Phase::CountingDown);
        engine.stop();
        assert_eq!(engine.phase(), Phase::CountingDown);
        assert_eq!(engine.take_outcome(), None);
    }

    #[test]
    fn complete_countdown_only_while_counting_down() {
        let mut engine = TimerEngine::new(TimerVariant::ForTime, &TimerConfig::default()).unwrap();
        engine.complete_countdown();
        assert_eq!(engine.phase(), Phase::Idle);
        engine.start();
        engine.complete_countdown();
        assert_eq!(engine.phase(), Phase::Running);
        // The pre-roll no longer drives the engine once running.
        engine.tick();
        assert_eq!(engine.seconds(), 1);
    }

    #[test]
    fn emom_example_scenario() {
        let mut engine = running(TimerVariant::Emom, TimerConfig::emom(3, 2));
        let mut trace = Vec::new();
        while engine.phase() == Phase::Running {
            engine.tick();
            trace.push((engine.round(), engine.seconds()));
        }

        assert_eq!(
            trace,
            vec![
                (1, 1),
                (1, 0),
                (2, 2),
                (2, 1),
                (2, 0),
                (3, 2),
                (3, 1),
                (3, 0),
                (3, 0),
            ]
        );
        assert_eq!(engine.phase(), Phase::Completed);
        assert_eq!(
            engine.take_outcome(),
            Some(SessionOutcome::Completed { result: 3 })
        );
    }

    #[test]
    fn emom_completes_after_rounds_times_interval_plus_one() {
        for (rounds, interval) in [(1, 1), (3, 2), (4, 5), (10, 60)] {
            let mut engine = running(TimerVariant::Emom, TimerConfig::emom(rounds, interval));
            let total = rounds * (interval + 1);
            for _ in 0..total - 1 {
                engine.tick();
            }
            assert_eq!(engine.phase(), Phase::Running, "{rounds}x{interval}");
            assert_eq!(engine.take_outcome(), None);

            engine.tick();
            assert_eq!(engine.phase(), Phase::Completed);
            assert_eq!(
                engine.take_outcome(),
                Some(SessionOutcome::Completed { result: rounds })
            );
        }
    }

    #[test]
    fn emom_emits_round_started() {
        let mut engine = running(TimerVariant::Emom, TimerConfig::emom(2, 1));
        engine.tick();
        engine.tick();
        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(events, vec![TimerEvent::RoundStarted { round: 2 }]);
    }

    #[test]
    fn amrap_completes_after_total_ticks() {
        let mut engine = running(TimerVariant::Amrap, TimerConfig::amrap(5));
        for _ in 0..4 {
            engine.tick();
        }
        assert_eq!(engine.phase(), Phase::Running);
        engine.tick();
        assert_eq!(engine.phase(), Phase::Completed);
        assert_eq!(engine.seconds(), 0);
        assert_eq!(
            engine.take_outcome(),
            Some(SessionOutcome::Completed { result: 1 })
        );
    }

    #[test]
    fn amrap_marks_rounds() {
        let mut engine = running(TimerVariant::Amrap, TimerConfig::amrap(100));
        for _ in 0..10 {
            engine.tick();
        }
        engine.mark_round();
        for _ in 0..30 {
            engine.tick();
        }
        engine.mark_round();

        assert_eq!(engine.markers().laps(), &[10, 30]);
        assert_eq!(engine.markers().average(), 20);
        assert_eq!(engine.round(), 3);

        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![
                TimerEvent::RoundMarked { rounds: 1, lap: 10 },
                TimerEvent::RoundMarked { rounds: 2, lap: 30 },
            ]
        );

        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(
            engine.take_outcome(),
            Some(SessionOutcome::Completed { result: 3 })
        );
    }

    #[test]
    fn mark_round_ignored_when_not_applicable() {
        let mut engine = running(TimerVariant::Emom, TimerConfig::default());
        engine.mark_round();
        assert_eq!(engine.round(), 1);
        assert!(engine.markers().laps().is_empty());

        let mut engine = running(TimerVariant::Amrap, TimerConfig::default());
        engine.toggle();
        engine.mark_round();
        assert_eq!(engine.round(), 1);

        let mut engine = TimerEngine::new(TimerVariant::Amrap, &TimerConfig::default()).unwrap();
        engine.mark_round();
        assert_eq!(engine.round(), 1);
    }

    #[test]
    fn for_time_counts_up_forever() {
        let mut engine = running(TimerVariant::ForTime, TimerConfig::default());
        for n in 1..=5000 {
            engine.tick();
            assert_eq!(engine.seconds(), n);
        }
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.take_outcome(), None);
        assert_eq!(engine.progress().percent(), 100.0);

        engine.finish();
        assert_eq!(
            engine.take_outcome(),
            Some(SessionOutcome::Completed { result: 5000 })
        );
    }

    #[test]
    fn tabata_alternates_work_and_rest() {
        let (rounds, work, rest) = (2, 2, 1);
        let mut engine = running(TimerVariant::Tabata, TimerConfig::tabata(rounds, work, rest));

        let mut labels = Vec::new();
        let mut ticks = 0;
        while engine.phase() == Phase::Running {
            labels.push(engine.is_work_phase());
            engine.tick();
            ticks += 1;
        }

        let mut expected = Vec::new();
        for _ in 0..rounds {
            expected.extend(std::iter::repeat(true).take(work as usize + 1));
            expected.extend(std::iter::repeat(false).take(rest as usize + 1));
        }
        assert_eq!(labels, expected);
        assert_eq!(ticks, rounds * (work + rest + 2));
        assert_eq!(
            engine.take_outcome(),
            Some(SessionOutcome::Completed { result: rounds })
        );
    }

    #[test]
    fn tabata_events() {
        let mut engine = running(TimerVariant::Tabata, TimerConfig::tabata(2, 1, 1));
        for _ in 0..4 {
            engine.tick();
        }
        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![
                TimerEvent::RestStarted { round: 1 },
                TimerEvent::RoundStarted { round: 2 },
            ]
        );
    }

    #[test]
    fn pause_freezes_state() {
        let mut engine = running(TimerVariant::Tabata, TimerConfig::tabata(3, 5, 3));
        for _ in 0..3 {
            engine.tick();
        }
        engine.toggle();
        assert_eq!(engine.phase(), Phase::Paused);
        let before = (engine.seconds(), engine.round(), engine.is_work_phase());

        for _ in 0..100 {
            engine.tick();
        }
        assert_eq!(
            (engine.seconds(), engine.round(), engine.is_work_phase()),
            before
        );
        assert_eq!(engine.snapshot().label, "PAUSED");

        engine.toggle();
        assert_eq!(engine.phase(), Phase::Running);
        engine.tick();
        assert_eq!(engine.seconds(), before.0 - 1);

        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(events, vec![TimerEvent::Paused, TimerEvent::Resumed]);
    }

    #[test]
    fn outcome_is_delivered_once() {
        let mut engine = running(TimerVariant::Amrap, TimerConfig::amrap(1));
        engine.tick();
        engine.stop();
        engine.finish();
        engine.tick();
        assert_eq!(engine.phase(), Phase::Completed);
        assert_eq!(
            engine.take_outcome(),
            Some(SessionOutcome::Completed { result: 1 })
        );
        assert_eq!(engine.take_outcome(), None);
    }

    #[test]
    fn stop_is_terminal_and_exclusive() {
        let mut engine = running(TimerVariant::Emom, TimerConfig::emom(1, 1));
        engine.toggle();
        engine.stop();
        assert_eq!(engine.phase(), Phase::Stopped);

        engine.toggle();
        for _ in 0..10 {
            engine.tick();
        }
        engine.finish();
        assert_eq!(engine.phase(), Phase::Stopped);
        assert_eq!(engine.take_outcome(), Some(SessionOutcome::Stopped));
        assert_eq!(engine.take_outcome(), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(TimerEngine::new(TimerVariant::Emom, &TimerConfig::emom(10, 0)).is_err());
        assert!(TimerEngine::new(TimerVariant::Tabata, &TimerConfig::tabata(0, 20, 10)).is_err());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut engine = running(TimerVariant::Emom, TimerConfig::emom(5, 60));
        for _ in 0..15 {
            engine.tick();
        }
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.variant, TimerVariant::Emom);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.seconds, 45);
        assert_eq!(snapshot.display, "45");
        assert_eq!(snapshot.label, "seconds");
        assert_eq!(snapshot.progress, 75.0);
        assert_eq!(snapshot.direction, Direction::Emptying);
        assert_eq!(snapshot.round_caption().as_deref(), Some("Round 1 of 5"));

        let engine = running(TimerVariant::Amrap, TimerConfig::amrap(300));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.display, "5:00");
        assert_eq!(snapshot.round_caption(), None);
        assert_eq!(snapshot.direction, Direction::Filling);
    }
}
