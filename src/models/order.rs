use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::input;
use crate::repository::Document;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub order_id: String,
    pub value_rs: f64,
    /// Foreign key into `Route::route_id`.
    pub assigned_route: String,
    pub delivery_timestamp: DateTime<Utc>,
}

impl Order {
    pub fn new(
        order_id: &str,
        value_rs: f64,
        assigned_route: &str,
        delivery_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: order_id.to_string(),
            value_rs,
            assigned_route: assigned_route.to_string(),
            delivery_timestamp,
        }
    }

    pub fn apply(&mut self, patch: OrderPatch) {
        if let Some(order_id) = patch.order_id {
            self.order_id = order_id;
        }
        if let Some(value) = patch.value_rs {
            self.value_rs = value;
        }
        if let Some(route) = patch.assigned_route {
            self.assigned_route = route;
        }
        if let Some(ts) = patch.delivery_timestamp {
            self.delivery_timestamp = ts;
        }
    }
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "input::optional_number")]
    pub value_rs: Option<f64>,
    pub assigned_route: Option<String>,
    /// `datetime-local` values without an offset are read as UTC.
    #[serde(default, deserialize_with = "input::optional_timestamp")]
    pub delivery_timestamp: Option<DateTime<Utc>>,
}
