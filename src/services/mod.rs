pub mod auth;
pub mod import;
pub mod simulation;

use crate::config::Config;
use crate::repository::Store;

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub auth: auth::AuthService,
    pub simulation: simulation::SimulationService,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        let auth = auth::AuthService::new(
            store.users.clone(),
            &config.jwt_secret,
            config.jwt_expiry_hours,
        );
        let simulation = simulation::SimulationService::new(store.clone());

        Self {
            config,
            store,
            auth,
            simulation,
        }
    }
}
