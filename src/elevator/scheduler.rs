//! Request scheduling and the motion/door state machine of one elevator
//!
//! Two kinds of requests feed a single [`TravelQueue`]: outside calls join the tail,
//! cabin selections jump to the head. The queue head is the floor to go. Two rules
//! hold at all times:
//!
//! 1. Once the car starts moving its target is latched until it arrives, whatever is
//!    pressed meanwhile.
//! 2. The car only moves with its doors closed.
//!
//! Every input posts [`ElevatorEvent`]s into the scheduler's inbox and drains it before
//! returning. The four events are the only code paths that change the current floor,
//! the door flag or the engagement flag.

use crate::elevator::command::{ElevatorCommand, ElevatorEvent};
use crate::elevator::display::DisplayState;
use crate::elevator::door_timer::{DoorTimer, TimerTicket};
use crate::elevator::queue::TravelQueue;
use crate::simulation::error::{ElevatorError, ElevatorResult, Signal};
use crate::types::config::defaults;
use crate::types::{ButtonKind, ElevatorPhase, EntranceId, FloorId, IndicatorState};
use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

/// Scheduler and state machine of the single elevator of one entrance
#[derive(Debug, Clone)]
pub struct ElevatorScheduler {
    entrance: EntranceId,
    storeys: u32,
    storey_height: f64,
    current_floor: FloorId,
    doors_open: bool,
    is_engaged: bool,
    phase: ElevatorPhase,
    queue: TravelQueue,
    door_timer: DoorTimer,
    display: DisplayState,
    inbox: VecDeque<ElevatorEvent>,
    outbox: Vec<ElevatorCommand>,
}

impl ElevatorScheduler {
    /// Create an idle elevator on the ground floor with closed doors
    pub fn new(entrance: EntranceId, storeys: u32, storey_height: f64) -> ElevatorResult<Self> {
        if storeys == 0 {
            return Err(ElevatorError::InvalidStoreyCount);
        }
        if !(storey_height.is_finite() && storey_height > 0.0) {
            return Err(ElevatorError::InvalidStoreyHeight(storey_height));
        }

        Ok(Self {
            entrance,
            storeys,
            storey_height,
            current_floor: FloorId::GROUND,
            doors_open: false,
            is_engaged: false,
            phase: ElevatorPhase::Idle,
            queue: TravelQueue::new(),
            door_timer: DoorTimer::new(defaults::AUTO_CLOSE_MS),
            display: DisplayState::new(storeys),
            inbox: VecDeque::new(),
            outbox: Vec::new(),
        })
    }

    /// Use a different door auto-close delay
    pub fn with_auto_close_ms(mut self, delay_ms: u64) -> Self {
        self.door_timer = DoorTimer::new(delay_ms);
        self
    }

    /// Entrance this elevator belongs to
    pub fn entrance(&self) -> EntranceId {
        self.entrance
    }

    /// Number of storeys served
    pub fn storeys(&self) -> u32 {
        self.storeys
    }

    /// Distance between two storeys in display units
    pub fn storey_height(&self) -> f64 {
        self.storey_height
    }

    /// Floor the cabin last arrived at
    pub fn current_floor(&self) -> FloorId {
        self.current_floor
    }

    /// Whether the doors are fully open (they stay flagged open while closing)
    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    /// Whether a motion/door cycle is in progress
    pub fn is_engaged(&self) -> bool {
        self.is_engaged
    }

    /// Current phase of the motion/door cycle
    pub fn phase(&self) -> ElevatorPhase {
        self.phase
    }

    /// Whether the elevator rests with closed doors and nothing to do
    pub fn is_idle(&self) -> bool {
        self.phase == ElevatorPhase::Idle
    }

    /// Pending stops in visiting order
    pub fn queue(&self) -> &TravelQueue {
        &self.queue
    }

    /// Latched target of the trip in progress
    pub fn target(&self) -> Option<FloorId> {
        match self.phase {
            ElevatorPhase::Moving { target } => Some(target),
            _ => None,
        }
    }

    /// Indicator, button, door and panel state as last commanded
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Ticket of the armed auto-close timer, if any
    pub fn auto_close_armed(&self) -> Option<TimerTicket> {
        self.door_timer.armed()
    }

    /// Whether commands are waiting to be drained
    pub fn has_pending_commands(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Take all commands emitted since the last drain, in emission order
    pub fn drain_commands(&mut self) -> Vec<ElevatorCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Outside hallway button pressed for `floor`
    ///
    /// The floor joins the tail of the queue (a floor already queued keeps its place)
    /// and dispatch is evaluated.
    #[instrument(skip(self), fields(entrance = %self.entrance))]
    pub fn call_floor(&mut self, floor: FloorId) -> ElevatorResult<()> {
        self.check_floor(floor)?;

        let command = self.display.set_button_enabled(ButtonKind::Outside, floor, false);
        self.emit(command);
        self.mark_called(floor);

        if self.queue.push_back(floor) {
            debug!(queue = ?self.queue.to_vec(), "Outside call queued");
        } else {
            debug!("Floor {} already queued", floor);
        }

        self.post(ElevatorEvent::QueueChanged);
        self.pump();
        Ok(())
    }

    /// Cabin panel button pressed for `floor`
    ///
    /// The floor becomes the next stop. With the doors open this also starts closing
    /// them; the doors-closed transition then dispatches. While moving, the selection
    /// lines up directly behind the latched target instead.
    #[instrument(skip(self), fields(entrance = %self.entrance))]
    pub fn select_floor(&mut self, floor: FloorId) -> ElevatorResult<()> {
        self.check_floor(floor)?;

        let command = self.display.set_button_enabled(ButtonKind::Cabin, floor, false);
        self.emit(command);
        self.mark_called(floor);

        match self.phase {
            ElevatorPhase::Moving { .. } => self.queue.insert_after_head(floor),
            _ => self.queue.move_to_front(floor),
        }
        debug!(queue = ?self.queue.to_vec(), "Cabin selection queued");

        match self.phase {
            ElevatorPhase::DoorsOpen => self.close_doors(),
            // Doors already closed: no doors-closed transition will come to dispatch
            ElevatorPhase::Idle => {
                self.post(ElevatorEvent::QueueChanged);
                self.pump();
            }
            _ => {}
        }
        Ok(())
    }

    /// The display layer finished moving the cabin
    #[instrument(skip(self), fields(entrance = %self.entrance))]
    pub fn motion_completed(&mut self) -> ElevatorResult<()> {
        if !self.phase.is_moving() {
            return Err(self.out_of_order(Signal::MotionCompleted));
        }
        self.post(ElevatorEvent::Arrived);
        self.pump();
        Ok(())
    }

    /// The display layer finished opening the doors
    #[instrument(skip(self), fields(entrance = %self.entrance))]
    pub fn door_reached_open_state(&mut self) -> ElevatorResult<()> {
        if self.phase != ElevatorPhase::DoorsOpening {
            return Err(self.out_of_order(Signal::DoorsOpened));
        }
        self.post(ElevatorEvent::DoorsOpened);
        self.pump();
        Ok(())
    }

    /// The display layer finished closing the doors
    #[instrument(skip(self), fields(entrance = %self.entrance))]
    pub fn door_reached_closed_state(&mut self) -> ElevatorResult<()> {
        if self.phase != ElevatorPhase::DoorsClosing {
            return Err(self.out_of_order(Signal::DoorsClosed));
        }
        self.post(ElevatorEvent::DoorsClosed);
        self.pump();
        Ok(())
    }

    /// An armed auto-close timer expired
    ///
    /// Returns `true` if this started closing the doors. Expiries of cancelled or
    /// superseded timers are ignored.
    #[instrument(skip(self), fields(entrance = %self.entrance))]
    pub fn auto_close_elapsed(&mut self, ticket: TimerTicket) -> bool {
        if !self.door_timer.expire(ticket) {
            debug!("Ignoring stale auto-close #{}", ticket.0);
            return false;
        }
        if self.phase != ElevatorPhase::DoorsOpen {
            debug!("Auto-close #{} expired while {}", ticket.0, self.phase);
            return false;
        }
        self.close_doors();
        true
    }

    fn check_floor(&self, floor: FloorId) -> ElevatorResult<()> {
        if floor.is_within(self.storeys) {
            Ok(())
        } else {
            warn!(entrance = %self.entrance, "Rejecting request for floor {}", floor);
            Err(ElevatorError::InvalidFloor { floor, storeys: self.storeys })
        }
    }

    fn out_of_order(&self, signal: Signal) -> ElevatorError {
        warn!(entrance = %self.entrance, "Protocol violation: {} while {}", signal, self.phase);
        ElevatorError::OutOfOrderSignal {
            entrance: self.entrance,
            signal,
            phase: self.phase.to_string(),
        }
    }

    /// Light the indicator for a requested floor; a floor being serviced stays active
    fn mark_called(&mut self, floor: FloorId) {
        if self.display.indicator(floor) != Some(IndicatorState::Active) {
            let command = self.display.set_indicator(floor, IndicatorState::Called);
            self.emit(command);
        }
    }

    fn emit(&mut self, command: Option<ElevatorCommand>) {
        if let Some(command) = command {
            self.outbox.push(command);
        }
    }

    fn post(&mut self, event: ElevatorEvent) {
        self.inbox.push_back(event);
    }

    /// Handle queued events one at a time until the inbox is empty
    fn pump(&mut self) {
        while let Some(event) = self.inbox.pop_front() {
            debug!(?event, phase = %self.phase, "Handling event");
            match event {
                ElevatorEvent::QueueChanged => self.on_queue_changed(),
                ElevatorEvent::Arrived => self.on_arrived(),
                ElevatorEvent::DoorsOpened => self.on_doors_opened(),
                ElevatorEvent::DoorsClosed => self.on_doors_closed(),
            }
        }
    }

    fn on_queue_changed(&mut self) {
        if self.is_engaged {
            // The running cycle picks the new stop up in queue order
            return;
        }
        let Some(head) = self.queue.head() else {
            return;
        };

        self.is_engaged = true;
        if head == self.current_floor {
            self.post(ElevatorEvent::Arrived);
        } else {
            self.start_motion(head);
        }
    }

    fn on_arrived(&mut self) {
        let Some(floor) = self.queue.pop_front() else {
            warn!(entrance = %self.entrance, "Arrived with an empty queue");
            return;
        };
        if let ElevatorPhase::Moving { target } = self.phase {
            debug_assert_eq!(target, floor, "queue head must stay latched while moving");
        }

        self.current_floor = floor;
        self.phase = ElevatorPhase::DoorsOpening;
        debug!("Arrived at floor {}", floor);

        let indicator = self.display.set_indicator(floor, IndicatorState::Active);
        self.emit(indicator);
        let doors = self.display.set_doors_open(true);
        self.emit(doors);
    }

    fn on_doors_opened(&mut self) {
        self.doors_open = true;
        self.phase = ElevatorPhase::DoorsOpen;

        let floor = self.current_floor;
        let button = self.display.set_button_enabled(ButtonKind::Cabin, floor, false);
        self.emit(button);
        let panel = self.display.set_panel_visible(true);
        self.emit(panel);

        let ticket = self.door_timer.start();
        self.outbox.push(ElevatorCommand::StartAutoClose {
            ticket,
            after_ms: self.door_timer.delay_ms(),
        });
    }

    fn on_doors_closed(&mut self) {
        self.doors_open = false;

        let floor = self.current_floor;
        let reopening = self.queue.head() == Some(floor);

        let panel = self.display.set_panel_visible(false);
        self.emit(panel);
        // A floor requested again while its doors were open keeps its buttons and indicator
        if !reopening {
            let outside = self.display.set_button_enabled(ButtonKind::Outside, floor, true);
            self.emit(outside);
            let cabin = self.display.set_button_enabled(ButtonKind::Cabin, floor, true);
            self.emit(cabin);
            let indicator = self.display.set_indicator(floor, IndicatorState::Idle);
            self.emit(indicator);
        }

        if let Some(ticket) = self.door_timer.cancel() {
            self.outbox.push(ElevatorCommand::CancelAutoClose { ticket });
        }

        match self.queue.head() {
            None => {
                self.is_engaged = false;
                self.phase = ElevatorPhase::Idle;
                debug!("Resting at floor {}", floor);
            }
            Some(_) if reopening => {
                debug!("Reopening at floor {}", floor);
                self.post(ElevatorEvent::Arrived);
            }
            Some(head) => self.start_motion(head),
        }
    }

    fn close_doors(&mut self) {
        self.phase = ElevatorPhase::DoorsClosing;
        let command = self.display.set_doors_open(false);
        self.emit(command);
    }

    fn start_motion(&mut self, target: FloorId) {
        debug_assert!(!self.doors_open, "cabin must not move with open doors");

        let distance = f64::from(self.current_floor.distance_to(target)) * self.storey_height;
        let offset = f64::from(target.number() - 1) * self.storey_height;

        self.phase = ElevatorPhase::Moving { target };
        self.display.set_cabin_floor(target);
        self.outbox.push(ElevatorCommand::SetCabinPosition { floor: target, offset, distance });
        debug!("Moving from {} to {}", self.current_floor, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elevator(storeys: u32) -> ElevatorScheduler {
        ElevatorScheduler::new(EntranceId(0), storeys, 100.0).unwrap()
    }

    /// Run a full cycle to `floor` and leave the doors open there
    fn open_at(scheduler: &mut ElevatorScheduler, floor: u32) {
        scheduler.call_floor(FloorId(floor)).unwrap();
        if scheduler.phase().is_moving() {
            scheduler.motion_completed().unwrap();
        }
        scheduler.door_reached_open_state().unwrap();
    }

    #[test]
    fn test_new_elevator_is_idle_on_ground_floor() {
        let scheduler = elevator(5);
        assert_eq!(scheduler.current_floor(), FloorId(1));
        assert!(!scheduler.doors_open());
        assert!(!scheduler.is_engaged());
        assert!(scheduler.queue().is_empty());
        assert!(scheduler.is_idle());
        assert!(!scheduler.has_pending_commands());
    }

    #[test]
    fn test_construction_rejects_bad_dimensions() {
        assert_eq!(
            ElevatorScheduler::new(EntranceId(0), 0, 100.0).unwrap_err(),
            ElevatorError::InvalidStoreyCount
        );
        assert!(matches!(
            ElevatorScheduler::new(EntranceId(0), 5, -2.0),
            Err(ElevatorError::InvalidStoreyHeight(_))
        ));
        assert!(matches!(
            ElevatorScheduler::new(EntranceId(0), 5, f64::INFINITY),
            Err(ElevatorError::InvalidStoreyHeight(_))
        ));
    }

    #[test]
    fn test_call_starts_motion() {
        let mut scheduler = elevator(5);
        scheduler.call_floor(FloorId(3)).unwrap();

        assert_eq!(scheduler.queue().to_vec(), vec![FloorId(3)]);
        assert_eq!(scheduler.target(), Some(FloorId(3)));
        assert!(scheduler.is_engaged());

        let commands = scheduler.drain_commands();
        assert_eq!(
            commands,
            vec![
                ElevatorCommand::SetButtonEnabled {
                    kind: ButtonKind::Outside,
                    floor: FloorId(3),
                    enabled: false
                },
                ElevatorCommand::SetIndicator { floor: FloorId(3), state: IndicatorState::Called },
                ElevatorCommand::SetCabinPosition {
                    floor: FloorId(3),
                    offset: 200.0,
                    distance: 200.0
                },
            ]
        );
    }

    #[test]
    fn test_invalid_floor_leaves_state_untouched() {
        let mut scheduler = elevator(5);
        let error = scheduler.call_floor(FloorId(6)).unwrap_err();
        assert_eq!(error, ElevatorError::InvalidFloor { floor: FloorId(6), storeys: 5 });
        assert!(scheduler.select_floor(FloorId(0)).is_err());
        assert!(scheduler.queue().is_empty());
        assert!(!scheduler.has_pending_commands());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_arrival_opens_doors_and_arms_timer() {
        let mut scheduler = elevator(5);
        scheduler.call_floor(FloorId(3)).unwrap();
        scheduler.drain_commands();

        scheduler.motion_completed().unwrap();
        assert_eq!(scheduler.current_floor(), FloorId(3));
        assert_eq!(scheduler.phase(), ElevatorPhase::DoorsOpening);
        assert!(scheduler.queue().is_empty());
        assert_eq!(scheduler.display().indicator(FloorId(3)), Some(IndicatorState::Active));
        assert!(scheduler.drain_commands().contains(&ElevatorCommand::SetDoorVisual { open: true }));

        scheduler.door_reached_open_state().unwrap();
        assert!(scheduler.doors_open());
        assert_eq!(scheduler.display().button_enabled(ButtonKind::Cabin, FloorId(3)), Some(false));
        assert!(scheduler.display().panel_visible());
        let ticket = scheduler.auto_close_armed().unwrap();
        assert!(scheduler
            .drain_commands()
            .contains(&ElevatorCommand::StartAutoClose { ticket, after_ms: 3_000 }));
    }

    #[test]
    fn test_same_floor_call_synthesizes_arrival() {
        let mut scheduler = elevator(5);
        open_at(&mut scheduler, 2);
        let ticket = scheduler.auto_close_armed().unwrap();
        assert!(scheduler.auto_close_elapsed(ticket));
        scheduler.door_reached_closed_state().unwrap();
        assert!(scheduler.is_idle());
        scheduler.drain_commands();

        scheduler.call_floor(FloorId(2)).unwrap();
        assert_eq!(scheduler.phase(), ElevatorPhase::DoorsOpening);
        assert_eq!(scheduler.current_floor(), FloorId(2));
        let commands = scheduler.drain_commands();
        assert!(!commands.iter().any(|c| matches!(c, ElevatorCommand::SetCabinPosition { .. })));
        assert!(commands.contains(&ElevatorCommand::SetDoorVisual { open: true }));
    }

    #[test]
    fn test_auto_close_with_empty_queue_goes_idle() {
        let mut scheduler = elevator(5);
        open_at(&mut scheduler, 4);
        let ticket = scheduler.auto_close_armed().unwrap();

        assert!(scheduler.auto_close_elapsed(ticket));
        assert_eq!(scheduler.phase(), ElevatorPhase::DoorsClosing);
        scheduler.door_reached_closed_state().unwrap();

        assert!(!scheduler.is_engaged());
        assert!(!scheduler.doors_open());
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.current_floor(), FloorId(4));
        assert_eq!(scheduler.display().indicator(FloorId(4)), Some(IndicatorState::Idle));
        assert_eq!(scheduler.display().button_enabled(ButtonKind::Outside, FloorId(4)), Some(true));
        assert_eq!(scheduler.display().button_enabled(ButtonKind::Cabin, FloorId(4)), Some(true));
    }

    #[test]
    fn test_selection_closes_doors_and_cancels_timer_on_close() {
        let mut scheduler = elevator(5);
        open_at(&mut scheduler, 3);
        let ticket = scheduler.auto_close_armed().unwrap();
        scheduler.drain_commands();

        scheduler.select_floor(FloorId(5)).unwrap();
        assert_eq!(scheduler.queue().to_vec(), vec![FloorId(5)]);
        assert_eq!(scheduler.phase(), ElevatorPhase::DoorsClosing);

        scheduler.door_reached_closed_state().unwrap();
        assert_eq!(scheduler.target(), Some(FloorId(5)));
        assert_eq!(scheduler.display().indicator(FloorId(3)), Some(IndicatorState::Idle));
        assert!(scheduler.drain_commands().contains(&ElevatorCommand::CancelAutoClose { ticket }));
        // The cancelled timer no longer closes anything
        assert!(!scheduler.auto_close_elapsed(ticket));
    }

    #[test]
    fn test_calls_while_moving_do_not_retarget() {
        let mut scheduler = elevator(9);
        scheduler.call_floor(FloorId(7)).unwrap();
        scheduler.call_floor(FloorId(2)).unwrap();
        scheduler.select_floor(FloorId(4)).unwrap();

        assert_eq!(scheduler.target(), Some(FloorId(7)));
        assert_eq!(scheduler.queue().to_vec(), vec![FloorId(7), FloorId(4), FloorId(2)]);

        scheduler.motion_completed().unwrap();
        assert_eq!(scheduler.current_floor(), FloorId(7));
    }

    #[test]
    fn test_out_of_order_signals_are_rejected() {
        let mut scheduler = elevator(5);
        let error = scheduler.motion_completed().unwrap_err();
        assert!(error.is_protocol_violation());
        assert!(scheduler.door_reached_open_state().is_err());
        assert!(scheduler.door_reached_closed_state().is_err());

        scheduler.call_floor(FloorId(2)).unwrap();
        assert!(scheduler.door_reached_open_state().is_err());
        assert_eq!(scheduler.target(), Some(FloorId(2)));
    }

    #[test]
    fn test_repeated_call_is_idempotent() {
        let mut scheduler = elevator(5);
        scheduler.call_floor(FloorId(4)).unwrap();
        scheduler.call_floor(FloorId(3)).unwrap();
        scheduler.drain_commands();

        scheduler.call_floor(FloorId(3)).unwrap();
        assert_eq!(scheduler.queue().to_vec(), vec![FloorId(4), FloorId(3)]);
        assert!(!scheduler.has_pending_commands());
    }
}
