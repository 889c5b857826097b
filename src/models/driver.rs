use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::input;
use crate::repository::Document;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    /// Hours already worked in the active shift.
    pub current_shift_hours: f64,
    #[serde(default)]
    pub past_7_day_hours: Vec<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(name: &str, current_shift_hours: f64, past_7_day_hours: Vec<f64>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            current_shift_hours,
            past_7_day_hours,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: DriverPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(hours) = patch.current_shift_hours {
            self.current_shift_hours = hours;
        }
        if let Some(history) = patch.past_7_day_hours {
            self.past_7_day_hours = history;
        }
        self.updated_at = Utc::now();
    }
}

impl Document for Driver {
    const COLLECTION: &'static str = "drivers";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Partial driver body, shared by create and update requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "input::optional_number")]
    pub current_shift_hours: Option<f64>,
    pub past_7_day_hours: Option<Vec<f64>>,
}
