//! Identifier types for the elevator simulator
//!
//! This module contains the floor and entrance identifiers used by the schedulers
//! and the UUID-based run identifier stamped on every simulation log record.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// A floor number, counted from 1 at the ground floor upwards
///
/// A `FloorId` on its own is just a number. Whether it is a valid floor depends on
/// the storey count of the house it is used with, which is why the schedulers check
/// the range at their boundary instead of here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorId(pub u32);

impl FloorId {
    /// The ground floor
    pub const GROUND: FloorId = FloorId(1);

    /// Create a floor identifier from its number
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Get the floor number
    pub fn number(self) -> u32 {
        self.0
    }

    /// Check whether this floor exists in a house with `storeys` storeys
    pub fn is_within(self, storeys: u32) -> bool {
        (1..=storeys).contains(&self.0)
    }

    /// Number of storeys between this floor and `other`
    pub fn distance_to(self, other: FloorId) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// Zero-based slot of this floor in per-floor display tables.
    /// Only meaningful for floors that passed a range check.
    pub(crate) fn slot(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FloorId {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

/// Index of an entrance (and its single elevator car) within a house
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntranceId(pub usize);

impl EntranceId {
    /// Get the zero-based index of the entrance
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ENTRANCE_{}", self.0)
    }
}

/// Unique identifier for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUN_{}", self.0.simple())
    }
}

impl Serialize for RunId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("RUN_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for RunId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("RUN_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(RunId(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_range_check() {
        assert!(FloorId(1).is_within(5));
        assert!(FloorId(5).is_within(5));
        assert!(!FloorId(0).is_within(5));
        assert!(!FloorId(6).is_within(5));
    }

    #[test]
    fn test_floor_distance_is_symmetric() {
        assert_eq!(FloorId(2).distance_to(FloorId(5)), 3);
        assert_eq!(FloorId(5).distance_to(FloorId(2)), 3);
        assert_eq!(FloorId(4).distance_to(FloorId(4)), 0);
    }

    #[test]
    fn test_floor_slot() {
        assert_eq!(FloorId::GROUND.slot(), 0);
        assert_eq!(FloorId(7).slot(), 6);
    }

    #[test]
    fn test_floor_serializes_as_number() {
        assert_eq!(serde_json::to_string(&FloorId(3)).unwrap(), "3");
        let floor: FloorId = serde_json::from_str("4").unwrap();
        assert_eq!(floor, FloorId(4));
    }

    #[test]
    fn test_run_id_display() {
        let id = RunId::new();
        let display_str = format!("{}", id);

        // Should start with RUN_ prefix
        assert!(display_str.starts_with("RUN_"));

        // RUN_ + 32 hex chars
        assert_eq!(display_str.len(), 36);
    }

    #[test]
    fn test_run_id_accepts_raw_uuid() {
        let uuid = Uuid::new_v4();
        let json = format!("\"{}\"", uuid);
        let id: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(id.0, uuid);
    }
}
