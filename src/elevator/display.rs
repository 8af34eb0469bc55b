//! Display state owned by a scheduler
//!
//! Per-floor tables are built once at construction and indexed by floor, so no
//! transition ever scans for the button or indicator it needs. Every setter returns
//! the command to emit, or `None` when the state did not actually change; this is
//! what makes repeated requests for the same floor collapse.

use crate::elevator::command::ElevatorCommand;
use crate::types::{ButtonKind, FloorId, IndicatorState};
use serde::Serialize;

/// Mirror of everything the display layer shows for one entrance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    indicators: Vec<IndicatorState>,
    outside_enabled: Vec<bool>,
    cabin_enabled: Vec<bool>,
    doors_open: bool,
    panel_visible: bool,
    cabin_floor: FloorId,
}

impl DisplayState {
    /// All indicators idle, all buttons enabled, doors closed, cabin on the ground floor
    pub fn new(storeys: u32) -> Self {
        let slots = storeys as usize;
        Self {
            indicators: vec![IndicatorState::Idle; slots],
            outside_enabled: vec![true; slots],
            cabin_enabled: vec![true; slots],
            doors_open: false,
            panel_visible: false,
            cabin_floor: FloorId::GROUND,
        }
    }

    /// Number of floors tracked
    pub fn storeys(&self) -> u32 {
        self.indicators.len() as u32
    }

    /// Indicator state of a floor
    pub fn indicator(&self, floor: FloorId) -> Option<IndicatorState> {
        self.slot(floor).map(|slot| self.indicators[slot])
    }

    /// Enablement of a button
    pub fn button_enabled(&self, kind: ButtonKind, floor: FloorId) -> Option<bool> {
        let slot = self.slot(floor)?;
        Some(match kind {
            ButtonKind::Outside => self.outside_enabled[slot],
            ButtonKind::Cabin => self.cabin_enabled[slot],
        })
    }

    /// Whether the doors are shown open (or opening)
    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    /// Whether the floor selection panel is shown
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Floor the cabin was last sent to
    pub fn cabin_floor(&self) -> FloorId {
        self.cabin_floor
    }

    /// Floors whose indicator is not idle, in ascending order
    pub fn lit_indicators(&self) -> Vec<(FloorId, IndicatorState)> {
        self.indicators
            .iter()
            .enumerate()
            .filter(|(_, state)| **state != IndicatorState::Idle)
            .map(|(slot, state)| (FloorId(slot as u32 + 1), *state))
            .collect()
    }

    pub(crate) fn set_indicator(
        &mut self,
        floor: FloorId,
        state: IndicatorState,
    ) -> Option<ElevatorCommand> {
        let slot = self.slot(floor)?;
        if self.indicators[slot] == state {
            return None;
        }
        self.indicators[slot] = state;
        Some(ElevatorCommand::SetIndicator { floor, state })
    }

    pub(crate) fn set_button_enabled(
        &mut self,
        kind: ButtonKind,
        floor: FloorId,
        enabled: bool,
    ) -> Option<ElevatorCommand> {
        let slot = self.slot(floor)?;
        let current = match kind {
            ButtonKind::Outside => &mut self.outside_enabled[slot],
            ButtonKind::Cabin => &mut self.cabin_enabled[slot],
        };
        if *current == enabled {
            return None;
        }
        *current = enabled;
        Some(ElevatorCommand::SetButtonEnabled { kind, floor, enabled })
    }

    pub(crate) fn set_doors_open(&mut self, open: bool) -> Option<ElevatorCommand> {
        if self.doors_open == open {
            return None;
        }
        self.doors_open = open;
        Some(ElevatorCommand::SetDoorVisual { open })
    }

    pub(crate) fn set_panel_visible(&mut self, visible: bool) -> Option<ElevatorCommand> {
        if self.panel_visible == visible {
            return None;
        }
        self.panel_visible = visible;
        Some(ElevatorCommand::SetFloorPanelVisible { visible })
    }

    pub(crate) fn set_cabin_floor(&mut self, floor: FloorId) {
        self.cabin_floor = floor;
    }

    fn slot(&self, floor: FloorId) -> Option<usize> {
        floor.is_within(self.storeys()).then(|| floor.slot())
    }
}
