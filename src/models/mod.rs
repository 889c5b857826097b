pub mod driver;
pub mod input;
pub mod order;
pub mod route;
pub mod simulation;
pub mod user;

pub use driver::{Driver, DriverPatch};
pub use order::{Order, OrderPatch};
pub use route::{Route, RoutePatch, TrafficLevel};
pub use simulation::{FuelCostBreakdown, SimulationRecord};
pub use user::User;
