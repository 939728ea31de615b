//! sim_bundler - React Native simulator build packager.
//!
//! Produces `<name>.zip` containing the simulator `.app` with its offline JS
//! bundle, leaving the project sources as they were.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match sim_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
