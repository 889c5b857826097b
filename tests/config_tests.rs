//! Tests for environment configuration.

use serial_test::serial;

use deliverydesk::config::Config;

const VARS: [&str; 5] = [
    "PORT",
    "DATABASE_URL",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
    "FRONTEND_URL",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_applied() {
    clear_env();
    std::env::set_var("JWT_SECRET", "abc");

    let config = Config::from_environment().unwrap();
    assert_eq!(config.port, 5000);
    assert_eq!(config.jwt_expiry_hours, 24);
    assert!(config.database_url.is_none(), "No DATABASE_URL means in-memory store");
    assert!(config.frontend_url.is_none());
}

#[test]
#[serial]
fn test_values_read_from_environment() {
    clear_env();
    std::env::set_var("JWT_SECRET", "abc");
    std::env::set_var("PORT", "8081");
    std::env::set_var("DATABASE_URL", "postgres://localhost/deliveries");
    std::env::set_var("FRONTEND_URL", "http://localhost:5173");

    let config = Config::from_environment().unwrap();
    assert_eq!(config.port, 8081);
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/deliveries"));
    assert_eq!(config.frontend_url.as_deref(), Some("http://localhost:5173"));
    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_returns_error() {
    clear_env();
    std::env::set_var("JWT_SECRET", "abc");
    std::env::set_var("PORT", "not_a_number");

    let result = std::panic::catch_unwind(Config::from_environment);
    assert!(result.is_ok(), "Config must not panic on invalid PORT");
    assert!(result.unwrap().is_err(), "Invalid PORT must be an error");
    clear_env();
}

#[test]
#[serial]
fn test_missing_secret_returns_error() {
    clear_env();
    assert!(Config::from_environment().is_err(), "JWT_SECRET is required");
}
