//! Scripted button presses
//!
//! A scenario is a list of timed presses, loaded from JSON:
//!
//! ```json
//! {
//!   "name": "morning rush",
//!   "steps": [
//!     { "at_ms": 0,    "entrance": 0, "kind": "call",   "floor": 3 },
//!     { "at_ms": 2500, "entrance": 0, "kind": "select", "floor": 5 }
//!   ]
//! }
//! ```

use crate::facility::House;
use crate::simulation::clock::MAX_ELAPSED_MS;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{EntranceId, FloorId, RequestKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One timed button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Simulation time of the press
    pub at_ms: u64,
    /// Entrance whose button is pressed
    pub entrance: EntranceId,
    /// Outside call or cabin selection
    pub kind: RequestKind,
    /// Requested floor; out-of-range floors are passed on and rejected
    pub floor: FloorId,
}

impl ScenarioStep {
    /// Create an outside call step
    pub fn call(at_ms: u64, entrance: usize, floor: u32) -> Self {
        Self { at_ms, entrance: EntranceId(entrance), kind: RequestKind::Call, floor: FloorId(floor) }
    }

    /// Create a cabin selection step
    pub fn select(at_ms: u64, entrance: usize, floor: u32) -> Self {
        Self { at_ms, entrance: EntranceId(entrance), kind: RequestKind::Select, floor: FloorId(floor) }
    }
}

/// Ordered list of timed presses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Optional human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Presses in time order
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Create a scenario; steps are ordered by time, keeping the order of equal times
    pub fn new(steps: Vec<ScenarioStep>) -> Self {
        let mut scenario = Self { name: None, steps };
        scenario.sort();
        scenario
    }

    /// Give the scenario a name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse a scenario from JSON text
    pub fn from_json(json: &str) -> SimulationResult<Self> {
        let mut scenario: Scenario = serde_json::from_str(json)?;
        scenario.sort();
        Ok(scenario)
    }

    /// Load a scenario from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SimulationError::scenario_error(format!(
                "Scenario file not found: {}",
                path.display()
            )));
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return Err(SimulationError::scenario_error(format!(
                "Unsupported scenario file format: {} (supported: .json)",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let scenario = Self::from_json(&content)?;
        info!("Loaded scenario with {} steps from {}", scenario.len(), path.display());
        Ok(scenario)
    }

    /// Built-in scenario exercising every entrance: calls to the top, middle and
    /// ground floors while the first trip is still under way
    pub fn demo(house: &House) -> Self {
        let top = house.storeys();
        let middle = (top + 1) / 2;

        let steps = house
            .entrance_ids()
            .flat_map(|entrance| {
                let offset = entrance.index() as u64 * 400;
                [
                    ScenarioStep::call(offset, entrance.index(), top),
                    ScenarioStep::call(offset + 200, entrance.index(), middle),
                    ScenarioStep::call(offset + 600, entrance.index(), 1),
                ]
            })
            .collect();

        Self::new(steps).named("demo")
    }

    /// Check that every step addresses an existing entrance and falls within
    /// simulation time
    pub fn validate_against(&self, house: &House) -> SimulationResult<()> {
        if let Some(step) = self.steps.iter().find(|step| step.at_ms > MAX_ELAPSED_MS) {
            return Err(SimulationError::scenario_error(format!(
                "Step at {} ms is past the end of simulation time ({} ms)",
                step.at_ms, MAX_ELAPSED_MS
            )));
        }
        if let Some(step) = self.steps.iter().find(|step| step.entrance.index() >= house.entrance_count()) {
            return Err(SimulationError::scenario_error(format!(
                "Step at {} ms addresses {} but the house has {} entrances",
                step.at_ms,
                step.entrance,
                house.entrance_count()
            )));
        }
        debug!("Scenario with {} steps fits the house", self.steps.len());
        Ok(())
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the scenario has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time of the last step
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.at_ms)
    }

    fn sort(&mut self) {
        self.steps.sort_by_key(|step| step.at_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HouseConfig;

    #[test]
    fn test_parse_and_sort() {
        let json = r#"{
            "steps": [
                { "at_ms": 900, "entrance": 1, "kind": "select", "floor": 2 },
                { "at_ms": 100, "entrance": 0, "kind": "call", "floor": 4 }
            ]
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.name, None);
        assert_eq!(scenario.steps[0], ScenarioStep::call(100, 0, 4));
        assert_eq!(scenario.steps[1], ScenarioStep::select(900, 1, 2));
        assert_eq!(scenario.duration_ms(), 900);
    }

    #[test]
    fn test_equal_times_keep_their_order() {
        let scenario =
            Scenario::new(vec![ScenarioStep::call(5, 0, 3), ScenarioStep::call(5, 0, 2), ScenarioStep::call(1, 0, 4)]);
        let floors: Vec<u32> = scenario.steps.iter().map(|s| s.floor.number()).collect();
        assert_eq!(floors, vec![4, 3, 2]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let error = Scenario::from_json(r#"{ "steps": [ { "at_ms": 0 } ] }"#).unwrap_err();
        assert!(matches!(error, SimulationError::SerializationError(_)));
    }

    #[test]
    fn test_validate_against_house() {
        let house = House::build(&HouseConfig::default()).unwrap();
        Scenario::new(vec![ScenarioStep::call(0, 1, 9)]).validate_against(&house).unwrap();

        let error = Scenario::new(vec![ScenarioStep::call(0, 2, 3)]).validate_against(&house).unwrap_err();
        assert!(matches!(error, SimulationError::ScenarioError(_)));
    }

    #[test]
    fn test_steps_past_the_end_of_time_are_rejected() {
        let house = House::build(&HouseConfig::default()).unwrap();
        Scenario::new(vec![ScenarioStep::call(MAX_ELAPSED_MS, 0, 3)]).validate_against(&house).unwrap();

        let error = Scenario::new(vec![ScenarioStep::call(u64::MAX - 10, 0, 3)])
            .validate_against(&house)
            .unwrap_err();
        assert_eq!(error.category(), "Scenario");
    }

    #[test]
    fn test_demo_covers_every_entrance() {
        let house = House::build(&HouseConfig { entrances: 3, storeys: 7, ..Default::default() }).unwrap();
        let demo = Scenario::demo(&house);
        assert_eq!(demo.name.as_deref(), Some("demo"));
        assert_eq!(demo.len(), 9);
        assert!(demo.steps.iter().any(|s| s.entrance == EntranceId(2) && s.floor == FloorId(7)));
        assert!(demo.steps.windows(2).all(|pair| pair[0].at_ms <= pair[1].at_ms));
        demo.validate_against(&house).unwrap();
    }
}
