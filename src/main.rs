// TravelMate CLI - Main Entry Point

use clap::Parser;
use travelmate_cc::commands::{self, Cli};
use travelmate_cc::v_error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = commands::run(cli).await {
        v_error!("❌ {}", e);
        if e.is_unauthorized() {
            v_error!("💡 Check that you are logged in (and as an admin for admin-only endpoints)");
        }
        std::process::exit(1);
    }

    Ok(())
}
