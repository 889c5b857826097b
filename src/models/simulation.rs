use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Document;

/// Fuel spend per traffic level, keyed the way the dashboard reads it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FuelCostBreakdown {
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Medium")]
    pub medium: f64,
    #[serde(rename = "High")]
    pub high: f64,
}

/// Persisted summary of one simulation run. Never mutated after insert.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub total_profit: f64,
    pub efficiency_score: f64,
    pub on_time_deliveries: u32,
    /// Absent on records written before late deliveries were tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_deliveries: Option<u32>,
    pub total_deliveries: u32,
    pub fuel_cost_low: f64,
    pub fuel_cost_medium: f64,
    pub fuel_cost_high: f64,
    pub timestamp: DateTime<Utc>,
}

impl SimulationRecord {
    /// Late count, derived from the other counters for legacy records.
    pub fn late_deliveries_or_derived(&self) -> u32 {
        match self.late_deliveries {
            Some(late) if late > 0 => late,
            _ => self.total_deliveries.saturating_sub(self.on_time_deliveries),
        }
    }
}

impl Document for SimulationRecord {
    const COLLECTION: &'static str = "simulations";

    fn id(&self) -> Uuid {
        self.id
    }
}
