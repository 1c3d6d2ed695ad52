use std::env;

use crate::constants::envvars;

/// Loads `.env` from the working directory, then the file named by
/// `BATTERY_ALERT_ENV_FILE` if set. Variables already in the environment win.
pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        println!("Loaded local .env")
    }
    if let Ok(extra) = env::var(envvars::ENV_FILE) {
        match dotenv::from_path(&extra) {
            Ok(()) => println!("Loaded {extra}"),
            Err(e) => eprintln!("Could not load {extra}: {e}"),
        }
    }
}
