//! House layout and entrance management
//!
//! This module contains the House struct, which turns the configured dimensions into
//! floor identifiers and one elevator per entrance, and routes requests to them.

use crate::elevator::ElevatorScheduler;
use crate::simulation::error::{ElevatorError, ElevatorResult, SimulationResult};
use crate::types::{EntranceId, FloorId, HouseConfig};
use tracing::{debug, info, instrument};

/// A house of identical entrances, each with its own elevator
#[derive(Debug, Clone)]
pub struct House {
    storeys: u32,
    storey_height: f64,
    entrances: Vec<ElevatorScheduler>,
}

impl House {
    /// Validate the configuration and create one idle elevator per entrance
    #[instrument(skip(config), fields(entrances = config.entrances, storeys = config.storeys))]
    pub fn build(config: &HouseConfig) -> SimulationResult<Self> {
        config.validate()?;

        let entrances = (0..config.entrances)
            .map(|index| {
                ElevatorScheduler::new(EntranceId(index), config.storeys, config.storey_height)
                    .map(|scheduler| scheduler.with_auto_close_ms(config.auto_close_ms))
            })
            .collect::<ElevatorResult<Vec<_>>>()?;

        info!(
            "Built house with {} entrances of {} storeys ({} units per storey)",
            config.entrances, config.storeys, config.storey_height
        );

        Ok(Self { storeys: config.storeys, storey_height: config.storey_height, entrances })
    }

    /// Number of storeys
    pub fn storeys(&self) -> u32 {
        self.storeys
    }

    /// Distance between two storeys in display units
    pub fn storey_height(&self) -> f64 {
        self.storey_height
    }

    /// Number of entrances
    pub fn entrance_count(&self) -> usize {
        self.entrances.len()
    }

    /// Identifiers of all entrances in order
    pub fn entrance_ids(&self) -> impl Iterator<Item = EntranceId> + '_ {
        self.entrances.iter().map(ElevatorScheduler::entrance)
    }

    /// All floors, ground floor first
    pub fn floors(&self) -> Vec<FloorId> {
        (1..=self.storeys).map(FloorId).collect()
    }

    /// All floors, top floor first (the order storeys are drawn in)
    pub fn storeys_top_down(&self) -> Vec<FloorId> {
        (1..=self.storeys).rev().map(FloorId).collect()
    }

    /// Checked conversion of a raw floor number
    pub fn floor(&self, number: u32) -> ElevatorResult<FloorId> {
        let floor = FloorId(number);
        if floor.is_within(self.storeys) {
            Ok(floor)
        } else {
            Err(ElevatorError::InvalidFloor { floor, storeys: self.storeys })
        }
    }

    /// The elevator of an entrance
    pub fn entrance(&self, id: EntranceId) -> ElevatorResult<&ElevatorScheduler> {
        let entrances = self.entrances.len();
        self.entrances.get(id.index()).ok_or(ElevatorError::UnknownEntrance { entrance: id, entrances })
    }

    /// Mutable access to the elevator of an entrance
    pub fn entrance_mut(&mut self, id: EntranceId) -> ElevatorResult<&mut ElevatorScheduler> {
        let entrances = self.entrances.len();
        self.entrances
            .get_mut(id.index())
            .ok_or(ElevatorError::UnknownEntrance { entrance: id, entrances })
    }

    /// All elevators in entrance order
    pub fn entrances(&self) -> &[ElevatorScheduler] {
        &self.entrances
    }

    /// Outside call at an entrance
    pub fn call_floor(&mut self, entrance: EntranceId, floor: FloorId) -> ElevatorResult<()> {
        debug!("Routing call for floor {} to {}", floor, entrance);
        self.entrance_mut(entrance)?.call_floor(floor)
    }

    /// Cabin selection at an entrance
    pub fn select_floor(&mut self, entrance: EntranceId, floor: FloorId) -> ElevatorResult<()> {
        debug!("Routing selection of floor {} to {}", floor, entrance);
        self.entrance_mut(entrance)?.select_floor(floor)
    }

    /// Whether every elevator rests with nothing to do
    pub fn is_idle(&self) -> bool {
        self.entrances.iter().all(ElevatorScheduler::is_idle)
    }

    /// Total height of the shaft from ground floor to top floor
    pub fn shaft_height(&self) -> f64 {
        f64::from(self.storeys.saturating_sub(1)) * self.storey_height
    }
}
