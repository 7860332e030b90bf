//! app_packager - builds a standalone executable from a Python desktop app.
//!
//! Installs requirements, bundles the entry point with PyInstaller, and
//! reports where the executable landed.

use app_packager::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
