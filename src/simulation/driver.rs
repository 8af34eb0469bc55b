//! Simulated display layer and run driver
//!
//! The driver stands in for the animated front end the elevators were built for. It
//! forwards button presses to the house, plays back every command the elevators emit
//! and turns motion, door and timer commands into completion signals scheduled on a
//! virtual clock. Signals are delivered strictly in time order; signals due at the
//! same instant keep the order they were scheduled in.
//!
//! # Usage Example
//!
//! ```rust
//! use house_elevator_simulator::simulation::*;
//! use house_elevator_simulator::types::*;
//!
//! let mut driver = SimulationDriver::new(&HouseConfig::default()).unwrap();
//! driver.press(EntranceId(0), RequestKind::Call, FloorId(3)).unwrap();
//! driver.run_until_idle().unwrap();
//!
//! let elevator = driver.house().entrance(EntranceId(0)).unwrap();
//! assert_eq!(elevator.current_floor(), FloorId(3));
//! ```

use crate::elevator::{ElevatorCommand, TimerTicket};
use crate::facility::House;
use crate::simulation::clock::{SimClock, MAX_ELAPSED_MS};
use crate::simulation::error::{ElevatorError, SimulationError, SimulationResult};
use crate::simulation::record::{save_json_lines, LogRecord};
use crate::simulation::scenario::Scenario;
use crate::simulation::statistics::{EntranceStatistics, SimulationStatistics};
use crate::simulation::timing::TransitionTiming;
use crate::types::{EntranceId, FloorId, HouseConfig, RequestKind, RunId};
use crate::{perf_span, sim_event};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Completion signal the display layer delivers to an elevator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplaySignal {
    /// Cabin motion finished
    MotionCompleted,
    /// Door opening finished
    DoorsOpened,
    /// Door closing finished
    DoorsClosed,
    /// An auto-close timer expired
    AutoClose(TimerTicket),
}

/// What became of a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The elevator took the request
    Accepted,
    /// The button was disabled or the cabin panel hidden
    Ignored,
    /// The elevator rejected the floor
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSignal {
    at_ms: u64,
    seq: u64,
    entrance: EntranceId,
    signal: DisplaySignal,
}

impl Ord for PendingSignal {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at_ms, self.seq).cmp(&(other.at_ms, other.seq))
    }
}

impl PartialOrd for PendingSignal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Runs a house against a simulated display layer
#[derive(Debug)]
pub struct SimulationDriver {
    run_id: RunId,
    house: House,
    clock: SimClock,
    timing: TransitionTiming,
    pending: BinaryHeap<Reverse<PendingSignal>>,
    next_seq: u64,
    log: Vec<LogRecord>,
    statistics: SimulationStatistics,
}

impl SimulationDriver {
    /// Build the house described by `config` and an empty display layer for it
    #[instrument(skip(config), fields(entrances = config.entrances, storeys = config.storeys))]
    pub fn new(config: &HouseConfig) -> SimulationResult<Self> {
        let house = House::build(config)?;
        let run_id = RunId::new();

        match config.seed {
            Some(seed) => info!("Using deterministic seed: {}", seed),
            None => debug!("Using entropy-based random seed"),
        }

        let statistics = SimulationStatistics::new(run_id, house.entrance_count());
        Ok(Self {
            run_id,
            house,
            clock: SimClock::new(),
            timing: TransitionTiming::from_config(config),
            pending: BinaryHeap::new(),
            next_seq: 0,
            log: Vec::new(),
            statistics,
        })
    }

    /// Replace the clock, e.g. to anchor timestamps at a fixed instant
    pub fn with_clock(mut self, clock: SimClock) -> Self {
        self.clock = clock;
        self
    }

    /// Identifier stamped on every log record
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// The simulated house
    pub fn house(&self) -> &House {
        &self.house
    }

    /// The virtual clock
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Milliseconds since the run started
    pub fn now_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    /// Commands played back so far
    pub fn log(&self) -> &[LogRecord] {
        &self.log
    }

    /// Counters collected so far
    pub fn statistics(&self) -> &SimulationStatistics {
        &self.statistics
    }

    /// Number of completion signals waiting to be delivered
    pub fn pending_signals(&self) -> usize {
        self.pending.len()
    }

    /// Time of the next completion signal
    pub fn next_signal_at(&self) -> Option<u64> {
        self.pending.peek().map(|Reverse(next)| next.at_ms)
    }

    /// Whether nothing is pending and every elevator rests
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.house.is_idle()
    }

    /// Press a button the way a user of the front end would
    ///
    /// Disabled buttons do nothing, and neither do cabin buttons while the cabin panel
    /// is hidden. Unknown entrances are an error.
    #[instrument(skip(self))]
    pub fn press(
        &mut self,
        entrance: EntranceId,
        kind: RequestKind,
        floor: FloorId,
    ) -> SimulationResult<PressOutcome> {
        let display = self.house.entrance(entrance)?.display();
        let disabled = display.button_enabled(kind.button(), floor) == Some(false);
        let panel_hidden = kind == RequestKind::Select && !display.panel_visible();

        if disabled || panel_hidden {
            debug!("Ignoring {} press for floor {}", kind.button(), floor);
            self.count(entrance, |stats| stats.presses_ignored += 1);
            return Ok(PressOutcome::Ignored);
        }

        let result = match kind {
            RequestKind::Call => self.house.call_floor(entrance, floor),
            RequestKind::Select => self.house.select_floor(entrance, floor),
        };

        let outcome = match result {
            Ok(()) => {
                self.count(entrance, |stats| match kind {
                    RequestKind::Call => stats.calls_accepted += 1,
                    RequestKind::Select => stats.selections_accepted += 1,
                });
                PressOutcome::Accepted
            }
            Err(ElevatorError::InvalidFloor { .. }) => {
                self.count(entrance, |stats| stats.requests_rejected += 1);
                PressOutcome::Rejected
            }
            Err(error) => return Err(error.into()),
        };

        self.play_commands(entrance)?;
        Ok(outcome)
    }

    /// Deliver a completion signal to an elevator right now
    ///
    /// Signals the elevator does not expect in its current phase are counted as
    /// protocol violations and otherwise dropped.
    pub fn deliver(&mut self, entrance: EntranceId, signal: DisplaySignal) -> SimulationResult<()> {
        let elevator = self.house.entrance_mut(entrance)?;
        let result = match signal {
            DisplaySignal::MotionCompleted => elevator.motion_completed().map(|()| false),
            DisplaySignal::DoorsOpened => elevator.door_reached_open_state().map(|()| false),
            DisplaySignal::DoorsClosed => elevator.door_reached_closed_state().map(|()| false),
            DisplaySignal::AutoClose(ticket) => Ok(elevator.auto_close_elapsed(ticket)),
        };

        match result {
            Ok(true) => self.count(entrance, |stats| stats.auto_close_expiries += 1),
            Ok(false) => {}
            Err(error) if error.is_protocol_violation() => {
                self.count(entrance, |stats| stats.protocol_violations += 1);
            }
            Err(error) => return Err(error.into()),
        }

        self.play_commands(entrance)
    }

    /// Deliver the next pending signal; returns `false` when nothing was pending
    pub fn step(&mut self) -> SimulationResult<bool> {
        let Some(Reverse(next)) = self.pending.pop() else {
            return Ok(false);
        };
        self.advance_clock(next.at_ms);
        self.deliver(next.entrance, next.signal)?;
        Ok(true)
    }

    /// Deliver every signal due up to `at_ms`, then move the clock there
    pub fn run_until(&mut self, at_ms: u64) -> SimulationResult<()> {
        while self.next_signal_at().is_some_and(|next| next <= at_ms) {
            self.step()?;
        }
        self.advance_clock(at_ms);
        Ok(())
    }

    /// Deliver signals until none are left
    pub fn run_until_idle(&mut self) -> SimulationResult<()> {
        while self.step()? {}
        Ok(())
    }

    /// Play a scenario: presses at their times, interleaved with due signals, then
    /// everything that follows until the house comes to rest
    pub fn run_scenario(&mut self, scenario: &Scenario) -> SimulationResult<()> {
        scenario.validate_against(&self.house)?;

        let span = perf_span!("run_scenario", steps = scenario.len() as u64);
        let _enter = span.enter();
        sim_event!(
            info,
            "Running scenario",
            name = scenario.name.as_deref().unwrap_or("unnamed"),
            steps = scenario.len() as u64,
        );

        for step in &scenario.steps {
            self.run_until(step.at_ms)?;
            let outcome = self.press(step.entrance, step.kind, step.floor)?;
            debug!("{} {} for floor {} at {} ms: {:?}", step.entrance, step.kind, step.floor, step.at_ms, outcome);
        }
        self.run_until_idle()?;

        sim_event!(
            info,
            "Scenario finished",
            elapsed_ms = self.clock.elapsed_ms(),
            commands = self.log.len() as u64,
        );
        Ok(())
    }

    /// Write the command log as JSON lines
    pub fn save_log<P: AsRef<Path>>(&self, path: P) -> SimulationResult<()> {
        save_json_lines(&self.log, path)
    }

    fn play_commands(&mut self, entrance: EntranceId) -> SimulationResult<()> {
        let commands = self.house.entrance_mut(entrance)?.drain_commands();
        let now = self.clock.elapsed_ms();

        for command in commands {
            match &command {
                ElevatorCommand::SetCabinPosition { distance, .. } => {
                    let floors = (distance / self.house.storey_height()).round() as u64;
                    self.count(entrance, |stats| {
                        stats.motion_legs += 1;
                        stats.floors_travelled += floors;
                    });
                    let after = self.timing.motion_ms(*distance).unwrap_or(u64::MAX);
                    self.schedule(entrance, now, after, DisplaySignal::MotionCompleted)?;
                }
                ElevatorCommand::SetDoorVisual { open } => {
                    let after = self.timing.door_ms().unwrap_or(u64::MAX);
                    let signal = if *open {
                        self.count(entrance, |stats| stats.door_cycles += 1);
                        DisplaySignal::DoorsOpened
                    } else {
                        DisplaySignal::DoorsClosed
                    };
                    self.schedule(entrance, now, after, signal)?;
                }
                ElevatorCommand::StartAutoClose { ticket, after_ms } => {
                    self.schedule(entrance, now, *after_ms, DisplaySignal::AutoClose(*ticket))?;
                }
                ElevatorCommand::CancelAutoClose { ticket } => {
                    let cancelled = DisplaySignal::AutoClose(*ticket);
                    self.pending.retain(|Reverse(pending)| {
                        !(pending.entrance == entrance && pending.signal == cancelled)
                    });
                }
                _ => {}
            }

            self.log.push(LogRecord {
                run_id: self.run_id,
                timestamp: self.clock.now(),
                elapsed_ms: now,
                entrance,
                command,
            });
            self.statistics.commands_played += 1;
        }
        Ok(())
    }

    fn schedule(
        &mut self,
        entrance: EntranceId,
        now_ms: u64,
        after_ms: u64,
        signal: DisplaySignal,
    ) -> SimulationResult<()> {
        let at_ms = now_ms
            .checked_add(after_ms)
            .filter(|at_ms| *at_ms <= MAX_ELAPSED_MS)
            .ok_or(SimulationError::TimeOverflow { entrance, now_ms, after_ms })?;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(PendingSignal { at_ms, seq, entrance, signal }));
        Ok(())
    }

    fn advance_clock(&mut self, at_ms: u64) {
        self.clock.advance_to(at_ms);
        self.statistics.simulated_ms = self.clock.elapsed_ms();
    }

    fn count(&mut self, entrance: EntranceId, update: impl FnOnce(&mut EntranceStatistics)) {
        if let Some(stats) = self.statistics.entrance_mut(entrance) {
            update(stats);
        }
    }
}
