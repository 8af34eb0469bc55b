//! Statistics collection and reporting
//!
//! Counters are kept per entrance and summed on demand. The driver updates them as
//! presses are routed and as the display layer plays back commands.

use crate::types::{EntranceId, RunId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters for one entrance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceStatistics {
    /// Outside calls accepted by the scheduler
    pub calls_accepted: usize,
    /// Cabin selections accepted by the scheduler
    pub selections_accepted: usize,
    /// Requests rejected for an out-of-range floor
    pub requests_rejected: usize,
    /// Presses on disabled buttons or a hidden panel
    pub presses_ignored: usize,
    /// Motion legs started
    pub motion_legs: usize,
    /// Floors travelled over all legs
    pub floors_travelled: u64,
    /// Door open/close cycles started
    pub door_cycles: usize,
    /// Auto-close timers that closed the doors
    pub auto_close_expiries: usize,
    /// Completion signals the scheduler rejected as out of order
    pub protocol_violations: usize,
}

impl EntranceStatistics {
    /// Accepted requests of both kinds
    pub fn accepted_requests(&self) -> usize {
        self.calls_accepted + self.selections_accepted
    }

    /// All presses seen, whether accepted, rejected or ignored
    pub fn total_presses(&self) -> usize {
        self.accepted_requests() + self.requests_rejected + self.presses_ignored
    }

    /// Percentage of presses that were ignored
    pub fn ignored_press_percentage(&self) -> f64 {
        let total = self.total_presses();
        if total == 0 {
            0.0
        } else {
            (self.presses_ignored as f64 / total as f64) * 100.0
        }
    }

    /// Average floors per motion leg
    pub fn average_leg_length(&self) -> f64 {
        if self.motion_legs == 0 {
            0.0
        } else {
            self.floors_travelled as f64 / self.motion_legs as f64
        }
    }

    fn accumulate(&mut self, other: &EntranceStatistics) {
        self.calls_accepted += other.calls_accepted;
        self.selections_accepted += other.selections_accepted;
        self.requests_rejected += other.requests_rejected;
        self.presses_ignored += other.presses_ignored;
        self.motion_legs += other.motion_legs;
        self.floors_travelled += other.floors_travelled;
        self.door_cycles += other.door_cycles;
        self.auto_close_expiries += other.auto_close_expiries;
        self.protocol_violations += other.protocol_violations;
    }
}

/// Statistics of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Run the statistics belong to
    pub run_id: RunId,
    /// Counters per entrance, indexed by entrance
    pub entrances: Vec<EntranceStatistics>,
    /// Simulated time covered by the run
    pub simulated_ms: u64,
    /// Display commands played back
    pub commands_played: usize,
}

impl SimulationStatistics {
    /// Create zeroed statistics for a house with `entrances` entrances
    pub fn new(run_id: RunId, entrances: usize) -> Self {
        Self {
            run_id,
            entrances: vec![EntranceStatistics::default(); entrances],
            simulated_ms: 0,
            commands_played: 0,
        }
    }

    /// Counters of one entrance
    pub fn entrance(&self, id: EntranceId) -> Option<&EntranceStatistics> {
        self.entrances.get(id.index())
    }

    /// Mutable counters of one entrance
    pub fn entrance_mut(&mut self, id: EntranceId) -> Option<&mut EntranceStatistics> {
        self.entrances.get_mut(id.index())
    }

    /// Counters summed over all entrances
    pub fn total(&self) -> EntranceStatistics {
        self.entrances.iter().fold(EntranceStatistics::default(), |mut total, entrance| {
            total.accumulate(entrance);
            total
        })
    }

    /// Simulated time in seconds
    pub fn simulated_seconds(&self) -> f64 {
        self.simulated_ms as f64 / 1000.0
    }

    /// Generate the human-readable summary printed at the end of a run
    pub fn generate_summary(&self) -> String {
        let total = self.total();
        let mut output = String::new();

        output.push_str("🛗 House Elevator Simulation Complete!\n");
        output.push_str("======================================\n\n");

        output.push_str("📊 Run Summary:\n");
        output.push_str(&format!("   Run: {}\n", self.run_id));
        output.push_str(&format!("   Simulated Time: {:.1} seconds\n", self.simulated_seconds()));
        output.push_str(&format!("   Entrances: {}\n", self.entrances.len()));
        output.push_str(&format!("   Commands Played: {}\n\n", self.commands_played));

        output.push_str("📈 Requests:\n");
        output.push_str(&format!(
            "   Accepted: {} ({} calls, {} selections)\n",
            total.accepted_requests(),
            total.calls_accepted,
            total.selections_accepted
        ));
        output.push_str(&format!("   Rejected: {}\n", total.requests_rejected));
        output.push_str(&format!(
            "   Ignored Presses: {} ({:.1}%)\n\n",
            total.presses_ignored,
            total.ignored_press_percentage()
        ));

        output.push_str("🚪 Motion and Doors:\n");
        output.push_str(&format!(
            "   Motion Legs: {} ({} floors, avg {:.1} per leg)\n",
            total.motion_legs,
            total.floors_travelled,
            total.average_leg_length()
        ));
        output.push_str(&format!("   Door Cycles: {}\n", total.door_cycles));
        output.push_str(&format!("   Auto-close Expiries: {}\n", total.auto_close_expiries));
        if total.protocol_violations > 0 {
            output.push_str(&format!("   ⚠️  Protocol Violations: {}\n", total.protocol_violations));
        }

        if self.entrances.len() > 1 {
            output.push_str("\n🏢 Per Entrance:\n");
            for (index, entrance) in self.entrances.iter().enumerate() {
                output.push_str(&format!(
                    "   {}: {} requests, {} legs, {} floors, {} door cycles\n",
                    EntranceId(index),
                    entrance.accepted_requests(),
                    entrance.motion_legs,
                    entrance.floors_travelled,
                    entrance.door_cycles
                ));
            }
        }

        output
    }

    /// One-line summary for logs
    pub fn compact_summary(&self) -> String {
        let total = self.total();
        format!(
            "{} requests, {} legs, {} floors, {} door cycles in {:.1}s",
            total.accepted_requests(),
            total.motion_legs,
            total.floors_travelled,
            total.door_cycles,
            self.simulated_seconds()
        )
    }
}

impl fmt::Display for SimulationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact_summary())
    }
}
