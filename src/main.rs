//! pinpoint CLI entry point
//!
//! Location picker - pick, search and reverse geocode from the terminal

use pinpoint::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
