//! Seed data import from CSV exports.
//!
//! Each file is parsed in full before its collection is replaced, so a file
//! that fails to read leaves the existing collection untouched. Rows with a
//! missing or unparseable field are skipped with a warning.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::models::{Driver, Order, Route, TrafficLevel};
use crate::repository::{Store, StoreError};

pub const DRIVERS_FILE: &str = "drivers.csv";
pub const ROUTES_FILE: &str = "routes.csv";
pub const ORDERS_FILE: &str = "orders.csv";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub drivers: usize,
    pub routes: usize,
    pub orders: usize,
}

#[derive(Debug, Deserialize)]
struct DriverRow {
    name: Option<String>,
    shift_hours: Option<String>,
    past_week_hours: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    route_id: Option<String>,
    distance_km: Option<String>,
    traffic_level: Option<String>,
    base_time_min: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: Option<String>,
    value_rs: Option<String>,
    route_id: Option<String>,
    delivery_time: Option<String>,
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input)
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

pub fn parse_drivers<R: Read>(input: R) -> Result<Vec<Driver>, ImportError> {
    let mut drivers = Vec::new();
    for (line, row) in reader(input).deserialize::<DriverRow>().enumerate() {
        let row = row?;
        match driver_from_row(&row) {
            Some(driver) => drivers.push(driver),
            None => tracing::warn!(line = line + 2, ?row, "Skipping driver row"),
        }
    }
    Ok(drivers)
}

fn driver_from_row(row: &DriverRow) -> Option<Driver> {
    let name = present(&row.name)?;
    let shift_hours: f64 = present(&row.shift_hours)?.parse().ok()?;
    let history = present(&row.past_week_hours)?
        .split('|')
        .map(|h| h.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    Some(Driver::new(name, shift_hours, history))
}

pub fn parse_routes<R: Read>(input: R) -> Result<Vec<Route>, ImportError> {
    let mut routes = Vec::new();
    for (line, row) in reader(input).deserialize::<RouteRow>().enumerate() {
        let row = row?;
        match route_from_row(&row) {
            Some(route) => routes.push(route),
            None => tracing::warn!(line = line + 2, ?row, "Skipping route row"),
        }
    }
    Ok(routes)
}

fn route_from_row(row: &RouteRow) -> Option<Route> {
    let route_id = present(&row.route_id)?;
    let distance: f64 = present(&row.distance_km)?.parse().ok()?;
    let level: TrafficLevel = present(&row.traffic_level)?.parse().ok()?;
    let base_time: f64 = present(&row.base_time_min)?.parse().ok()?;

    Some(Route::new(route_id, distance, level, base_time))
}

pub fn parse_orders<R: Read>(input: R) -> Result<Vec<Order>, ImportError> {
    let mut orders = Vec::new();
    for (line, row) in reader(input).deserialize::<OrderRow>().enumerate() {
        let row = row?;
        match order_from_row(&row) {
            Some(order) => orders.push(order),
            None => tracing::warn!(line = line + 2, ?row, "Skipping order row"),
        }
    }
    Ok(orders)
}

fn order_from_row(row: &OrderRow) -> Option<Order> {
    let order_id = present(&row.order_id)?;
    let value: f64 = present(&row.value_rs)?.parse().ok()?;
    let route_id = present(&row.route_id)?;
    let time = NaiveTime::parse_from_str(present(&row.delivery_time)?, "%H:%M").ok()?;

    // Exports carry only a time of day; pin it to a fixed date.
    let day = NaiveDate::from_ymd_opt(2024, 1, 1)?;
    let timestamp = Utc.from_utc_datetime(&day.and_time(time));

    Some(Order::new(order_id, value, route_id, timestamp))
}

fn open(dir: &Path, name: &str) -> Result<File, ImportError> {
    let path = dir.join(name);
    File::open(&path).map_err(|source| ImportError::Open {
        path: path.display().to_string(),
        source,
    })
}

/// Replaces drivers, routes and orders with the contents of `dir`.
pub async fn import_dir(store: &Store, dir: &Path) -> Result<ImportSummary, ImportError> {
    let mut summary = ImportSummary::default();

    let drivers = parse_drivers(open(dir, DRIVERS_FILE)?)?;
    summary.drivers = store.drivers.replace_all(&drivers).await?;
    tracing::info!(count = summary.drivers, "Imported drivers");

    let routes = parse_routes(open(dir, ROUTES_FILE)?)?;
    summary.routes = store.routes.replace_all(&routes).await?;
    tracing::info!(count = summary.routes, "Imported routes");

    let orders = parse_orders(open(dir, ORDERS_FILE)?)?;
    summary.orders = store.orders.replace_all(&orders).await?;
    tracing::info!(count = summary.orders, "Imported orders");

    Ok(summary)
}
