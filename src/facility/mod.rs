//! House layout
//!
//! This module turns the configured house dimensions into floors and entrances, with
//! one elevator per entrance.
//!
//! # Usage Example
//!
//! ```rust
//! use house_elevator_simulator::facility::*;
//! use house_elevator_simulator::types::*;
//!
//! let config = HouseConfig { entrances: 2, storeys: 5, ..Default::default() };
//! let mut house = House::build(&config).unwrap();
//!
//! assert_eq!(house.storeys_top_down().first(), Some(&FloorId(5)));
//! house.call_floor(EntranceId(1), FloorId(4)).unwrap();
//! assert!(house.entrance(EntranceId(0)).unwrap().is_idle());
//! ```

pub mod house;

pub use house::House;
