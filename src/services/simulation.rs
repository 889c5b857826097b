//! Delivery simulation.
//!
//! Replays the stored order book against a roster of drivers in one strictly
//! sequential pass. Orders are handed out round-robin; every assignment adds
//! its delivery time to the driver's shift, which feeds the fatigue check for
//! that driver's next order. The pass cannot be parallelised without changing
//! results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Driver, FuelCostBreakdown, Order, Route, SimulationRecord, TrafficLevel};
use crate::repository::{Store, StoreError};

/// Drivers past this many shift hours are fatigued.
pub const FATIGUE_THRESHOLD_HOURS: f64 = 8.0;
pub const FATIGUE_MULTIPLIER: f64 = 1.3;
pub const FUEL_COST_PER_KM: f64 = 5.0;
pub const HIGH_TRAFFIC_SURCHARGE_PER_KM: f64 = 2.0;
/// Minutes allowed on top of a route's base time before a delivery is late.
pub const GRACE_MINUTES: f64 = 10.0;
pub const LATE_PENALTY: f64 = 50.0;
pub const HIGH_VALUE_THRESHOLD: f64 = 1000.0;
pub const HIGH_VALUE_BONUS_RATE: f64 = 0.1;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid simulation input: {0}")]
    InvalidInput(&'static str),

    #[error("Insufficient data for simulation")]
    InsufficientData,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Cost breakdown of a single delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryOutcome {
    /// Minutes, including any fatigue slowdown.
    pub delivery_time: f64,
    pub fuel_cost: f64,
    pub penalty: f64,
    pub bonus: f64,
    pub profit: f64,
}

impl DeliveryOutcome {
    pub fn is_late(&self) -> bool {
        self.penalty > 0.0
    }
}

pub fn fuel_cost(route: &Route) -> f64 {
    let base = route.distance * FUEL_COST_PER_KM;
    match route.traffic_level {
        TrafficLevel::High => base + route.distance * HIGH_TRAFFIC_SURCHARGE_PER_KM,
        TrafficLevel::Medium | TrafficLevel::Low => base,
    }
}

/// Prices one order delivered over `route` by a driver with `shift_hours`
/// already on the clock.
pub fn evaluate_delivery(shift_hours: f64, route: &Route, order: &Order) -> DeliveryOutcome {
    let mut delivery_time = route.base_time;
    if shift_hours > FATIGUE_THRESHOLD_HOURS {
        delivery_time *= FATIGUE_MULTIPLIER;
    }

    let fuel_cost = fuel_cost(route);

    let allowed_time = route.base_time + GRACE_MINUTES;
    let penalty = if delivery_time > allowed_time {
        LATE_PENALTY
    } else {
        0.0
    };

    let bonus = if order.value_rs > HIGH_VALUE_THRESHOLD && penalty == 0.0 {
        order.value_rs * HIGH_VALUE_BONUS_RATE
    } else {
        0.0
    };

    DeliveryOutcome {
        delivery_time,
        fuel_cost,
        penalty,
        bonus,
        profit: order.value_rs + bonus - penalty - fuel_cost,
    }
}

/// Aggregates of one simulation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub total_profit: f64,
    pub efficiency_score: f64,
    pub on_time_deliveries: u32,
    pub late_deliveries: u32,
    pub total_deliveries: u32,
    pub fuel_cost_breakdown: FuelCostBreakdown,
}

/// Percentage of on-time deliveries rounded to two decimals, 0 when nothing
/// was delivered.
pub fn efficiency_score(on_time: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = f64::from(on_time) / f64::from(total) * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Runs the pass, mutating each assigned driver's `current_shift_hours`.
///
/// Orders whose route is unknown are skipped without touching any counter,
/// but still consume a turn of the round-robin cursor. An empty roster yields
/// an empty summary.
pub fn simulate(drivers: &mut [Driver], routes: &[Route], orders: &[Order]) -> SimulationSummary {
    let mut summary = SimulationSummary::default();
    if drivers.is_empty() {
        return summary;
    }

    // First route wins on duplicate ids.
    let mut route_index: HashMap<&str, &Route> = HashMap::with_capacity(routes.len());
    for route in routes {
        route_index.entry(route.route_id.as_str()).or_insert(route);
    }

    let roster = drivers.len();
    let mut cursor = 0usize;
    for order in orders {
        let driver = &mut drivers[cursor];
        cursor = (cursor + 1) % roster;

        let Some(route) = route_index.get(order.assigned_route.as_str()) else {
            warn!(
                order_id = %order.order_id,
                route_id = %order.assigned_route,
                "Skipping order with unknown route"
            );
            continue;
        };

        let outcome = evaluate_delivery(driver.current_shift_hours, route, order);

        let fuel = &mut summary.fuel_cost_breakdown;
        match route.traffic_level {
            TrafficLevel::High => fuel.high += outcome.fuel_cost,
            TrafficLevel::Medium => fuel.medium += outcome.fuel_cost,
            TrafficLevel::Low => fuel.low += outcome.fuel_cost,
        }

        if outcome.is_late() {
            summary.late_deliveries += 1;
        } else {
            summary.on_time_deliveries += 1;
        }
        summary.total_deliveries += 1;
        summary.total_profit += outcome.profit;

        debug!(
            order_id = %order.order_id,
            driver = %driver.name,
            shift_hours = driver.current_shift_hours,
            delivery_time = outcome.delivery_time,
            profit = outcome.profit,
            late = outcome.is_late(),
            "Order assigned"
        );

        driver.current_shift_hours += outcome.delivery_time / 60.0;
    }

    summary.efficiency_score =
        efficiency_score(summary.on_time_deliveries, summary.total_deliveries);
    summary
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub number_of_drivers: Option<f64>,
    /// Time-of-day string. Required but not used by the pass.
    pub start_time: Option<String>,
    /// Required but not used by the pass.
    pub max_hours_per_day: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub number_of_drivers: usize,
    pub start_time: String,
    pub max_hours_per_day: f64,
}

impl SimulationRequest {
    pub fn validate(&self) -> Result<SimulationParams, SimulationError> {
        let drivers = match self.number_of_drivers {
            Some(n) if n > 0.0 && n.fract() == 0.0 => n as usize,
            _ => {
                return Err(SimulationError::InvalidInput(
                    "numberOfDrivers must be a positive integer",
                ))
            }
        };

        let max_hours = match self.max_hours_per_day {
            Some(h) if h > 0.0 => h,
            _ => {
                return Err(SimulationError::InvalidInput(
                    "maxHoursPerDay must be a positive number",
                ))
            }
        };

        let start_time = match self.start_time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(SimulationError::InvalidInput("startTime is required")),
        };

        Ok(SimulationParams {
            number_of_drivers: drivers,
            start_time,
            max_hours_per_day: max_hours,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: SimulationSummary,
    pub saved_result: SimulationRecord,
}

#[derive(Clone)]
pub struct SimulationService {
    store: Store,
}

impl SimulationService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Validates, loads inputs, runs the pass and records the summary.
    ///
    /// Driver hour changes live only for the duration of the call; they are
    /// never written back, so runs do not compound fatigue.
    pub async fn run(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResponse, SimulationError> {
        let params = request.validate()?;

        let mut drivers = self.store.drivers.find_limit(params.number_of_drivers).await?;
        let routes = self.store.routes.find_all().await?;
        let orders = self.store.orders.find_all().await?;

        if drivers.is_empty() || routes.is_empty() || orders.is_empty() {
            return Err(SimulationError::InsufficientData);
        }

        let summary = simulate(&mut drivers, &routes, &orders);

        let record = SimulationRecord {
            id: Uuid::new_v4(),
            total_profit: summary.total_profit,
            efficiency_score: summary.efficiency_score,
            on_time_deliveries: summary.on_time_deliveries,
            late_deliveries: Some(summary.late_deliveries),
            total_deliveries: summary.total_deliveries,
            fuel_cost_low: summary.fuel_cost_breakdown.low,
            fuel_cost_medium: summary.fuel_cost_breakdown.medium,
            fuel_cost_high: summary.fuel_cost_breakdown.high,
            timestamp: chrono::Utc::now(),
        };
        self.store.simulations.insert(&record).await?;

        info!(
            drivers = drivers.len(),
            orders = orders.len(),
            delivered = summary.total_deliveries,
            on_time = summary.on_time_deliveries,
            total_profit = summary.total_profit,
            efficiency = summary.efficiency_score,
            "Simulation completed"
        );

        Ok(SimulationResponse {
            message: "Simulation completed".to_string(),
            summary,
            saved_result: record,
        })
    }

    /// Every stored run, newest first, with the late count filled in for
    /// records that predate it.
    pub async fn history(&self) -> Result<Vec<SimulationRecord>, SimulationError> {
        let records = self.store.simulations.find_newest_first().await?;
        Ok(records
            .into_iter()
            .map(|record| SimulationRecord {
                late_deliveries: Some(record.late_deliveries_or_derived()),
                ..record
            })
            .collect())
    }
}
