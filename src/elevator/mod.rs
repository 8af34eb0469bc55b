//! Elevator scheduling and state machine
//!
//! This module contains everything one entrance's elevator needs: the travel queue,
//! the scheduler with its motion/door state machine, the auto-close timer, the
//! display state it keeps in sync and the commands it emits.
//!
//! # Overview
//!
//! - **ElevatorScheduler**: accepts outside calls and cabin selections and reacts to
//!   completion signals from the display layer
//! - **TravelQueue**: duplicate-free visiting order; the head is the floor to go
//! - **DoorTimer**: cancellable auto-close timer identified by tickets
//! - **DisplayState**: per-floor indicator and button tables
//! - **ElevatorCommand**: what the scheduler asks the display layer to do
//!
//! # Usage Example
//!
//! ```rust
//! use house_elevator_simulator::elevator::*;
//! use house_elevator_simulator::types::*;
//!
//! let mut elevator = ElevatorScheduler::new(EntranceId(0), 5, 100.0).unwrap();
//!
//! elevator.call_floor(FloorId(3)).unwrap();
//! assert_eq!(elevator.target(), Some(FloorId(3)));
//!
//! // The display layer animates the trip, then reports back
//! elevator.motion_completed().unwrap();
//! elevator.door_reached_open_state().unwrap();
//! assert!(elevator.doors_open());
//!
//! for command in elevator.drain_commands() {
//!     println!("{}", command);
//! }
//! ```

pub mod command;
pub mod display;
pub mod door_timer;
pub mod queue;
pub mod scheduler;

// Re-export all public types for convenience
pub use command::{ElevatorCommand, ElevatorEvent};
pub use display::DisplayState;
pub use door_timer::{DoorTimer, TimerTicket};
pub use queue::TravelQueue;
pub use scheduler::ElevatorScheduler;
