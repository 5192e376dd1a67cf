//! # Tally Register Entry Point
//!
//! Thin wrapper around `tally_register_lib::run()`.

use tracing::error;

fn main() {
    if let Err(err) = tally_register_lib::run() {
        error!(error = %err, "Register failed to start");
        eprintln!("tally-register: {}", err);
        std::process::exit(1);
    }
}
