//! Core types and identifiers for the elevator simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: floor numbers, entrance indices and run identifiers
//! - **Enums**: indicator states, button kinds, scheduler phases and request kinds
//! - **Configuration**: house configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use house_elevator_simulator::types::*;
//!
//! let floor = FloorId::new(3);
//! assert!(floor.is_within(5));
//!
//! let config = HouseConfig {
//!     entrances: 3,
//!     storeys: 9,
//!     ..Default::default()
//! };
//! config.validate().unwrap();
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
