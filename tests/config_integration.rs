//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use hypercube::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("HCUBE_SIMULATION__SERIAL", "TEST12");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.simulation.serial, "TEST12");
    std::env::remove_var("HCUBE_SIMULATION__SERIAL");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("HCUBE_SIMULATION__SERIAL");

    let config = AppConfig::load().unwrap();
    assert_eq!(config.simulation.serial, "AB3XY9");
    assert_eq!(config.timing.sweep, 2.0);
    assert_eq!(config.timing.pre_sweep_pause, 0.75);
}

#[test]
#[serial]
fn test_timing_env_override() {
    std::env::set_var("HCUBE_TIMING__SWEEP", "3.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.timing.sweep, 3.5);
    std::env::remove_var("HCUBE_TIMING__SWEEP");
}
