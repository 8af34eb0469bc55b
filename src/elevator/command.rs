//! Messages flowing in and out of a scheduler
//!
//! [`ElevatorCommand`] is everything a scheduler asks of its display layer.
//! [`ElevatorEvent`] is the scheduler's own inbox: the four transitions that are the
//! only legal way to change its position, doors or engagement.

use crate::elevator::door_timer::TimerTicket;
use crate::types::{ButtonKind, FloorId, IndicatorState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Command emitted by a scheduler for the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ElevatorCommand {
    /// Show a floor indicator in a new state
    SetIndicator {
        /// Floor the indicator belongs to
        floor: FloorId,
        /// New indicator state
        state: IndicatorState,
    },
    /// Enable or disable one button
    SetButtonEnabled {
        /// Which button set
        kind: ButtonKind,
        /// Floor the button belongs to
        floor: FloorId,
        /// New enablement
        enabled: bool,
    },
    /// Start opening or closing the doors
    SetDoorVisual {
        /// `true` to open, `false` to close
        open: bool,
    },
    /// Start moving the cabin to a floor
    SetCabinPosition {
        /// Destination floor
        floor: FloorId,
        /// Height of the destination above the ground floor
        offset: f64,
        /// Length of the trip in display units
        distance: f64,
    },
    /// Show or hide the in-cabin floor selection panel
    SetFloorPanelVisible {
        /// New visibility
        visible: bool,
    },
    /// Arm the door auto-close timer
    StartAutoClose {
        /// Ticket to hand back when the timer expires
        ticket: TimerTicket,
        /// Delay in milliseconds
        after_ms: u64,
    },
    /// Disarm a previously armed auto-close timer
    CancelAutoClose {
        /// Ticket of the timer to cancel
        ticket: TimerTicket,
    },
}

impl ElevatorCommand {
    /// Whether this command drives a visual element (as opposed to the timer)
    pub fn is_display(&self) -> bool {
        !matches!(
            self,
            ElevatorCommand::StartAutoClose { .. } | ElevatorCommand::CancelAutoClose { .. }
        )
    }
}

impl fmt::Display for ElevatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorCommand::SetIndicator { floor, state } => {
                write!(f, "indicator {} -> {}", floor, state)
            }
            ElevatorCommand::SetButtonEnabled { kind, floor, enabled } => {
                let verb = if *enabled { "enable" } else { "disable" };
                write!(f, "{} {} button {}", verb, kind, floor)
            }
            ElevatorCommand::SetDoorVisual { open: true } => write!(f, "open doors"),
            ElevatorCommand::SetDoorVisual { open: false } => write!(f, "close doors"),
            ElevatorCommand::SetCabinPosition { floor, distance, .. } => {
                write!(f, "move cabin to {} ({} units)", floor, distance)
            }
            ElevatorCommand::SetFloorPanelVisible { visible: true } => write!(f, "show panel"),
            ElevatorCommand::SetFloorPanelVisible { visible: false } => write!(f, "hide panel"),
            ElevatorCommand::StartAutoClose { ticket, after_ms } => {
                write!(f, "arm auto-close #{} in {} ms", ticket.0, after_ms)
            }
            ElevatorCommand::CancelAutoClose { ticket } => {
                write!(f, "cancel auto-close #{}", ticket.0)
            }
        }
    }
}

/// Internal transition events of a scheduler, processed in FIFO order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorEvent {
    /// The queue gained a stop; evaluate dispatch
    QueueChanged,
    /// The cabin stands at the head of the queue
    Arrived,
    /// The doors reached the open state
    DoorsOpened,
    /// The doors reached the closed state
    DoorsClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization_is_tagged() {
        let command = ElevatorCommand::SetIndicator { floor: FloorId(3), state: IndicatorState::Called };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"command":"set_indicator","floor":3,"state":"called"}"#);

        let back: ElevatorCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn test_timer_commands_are_not_display() {
        assert!(!ElevatorCommand::CancelAutoClose { ticket: TimerTicket(1) }.is_display());
        assert!(ElevatorCommand::SetDoorVisual { open: true }.is_display());
    }

    #[test]
    fn test_command_display() {
        let command = ElevatorCommand::SetButtonEnabled {
            kind: ButtonKind::Cabin,
            floor: FloorId(2),
            enabled: false,
        };
        assert_eq!(command.to_string(), "disable cabin button 2");
    }
}
