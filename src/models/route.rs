use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::input;
use crate::repository::Document;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        };
        f.write_str(label)
    }
}

impl FromStr for TrafficLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(TrafficLevel::Low),
            "Medium" => Ok(TrafficLevel::Medium),
            "High" => Ok(TrafficLevel::High),
            other => Err(format!("unknown traffic level: {}", other)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Business key that orders reference through `assignedRoute`.
    pub route_id: String,
    /// Kilometres.
    pub distance: f64,
    pub traffic_level: TrafficLevel,
    /// Minutes.
    pub base_time: f64,
}

impl Route {
    pub fn new(route_id: &str, distance: f64, traffic_level: TrafficLevel, base_time: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            route_id: route_id.to_string(),
            distance,
            traffic_level,
            base_time,
        }
    }

    pub fn apply(&mut self, patch: RoutePatch) {
        if let Some(route_id) = patch.route_id {
            self.route_id = route_id;
        }
        if let Some(distance) = patch.distance {
            self.distance = distance;
        }
        if let Some(level) = patch.traffic_level {
            self.traffic_level = level;
        }
        if let Some(base_time) = patch.base_time {
            self.base_time = base_time;
        }
    }
}

impl Document for Route {
    const COLLECTION: &'static str = "routes";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePatch {
    pub route_id: Option<String>,
    #[serde(default, deserialize_with = "input::optional_number")]
    pub distance: Option<f64>,
    pub traffic_level: Option<TrafficLevel>,
    #[serde(default, deserialize_with = "input::optional_number")]
    pub base_time: Option<f64>,
}
