// src/utils/env.rs
use log::debug;

/// Load variables from a local .env file into the process environment, if
/// one is present. Missing files are fine; deployments set real env vars.
pub fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => debug!("No .env file found, using process environment"),
    }
}
