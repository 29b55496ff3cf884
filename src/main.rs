// Fortnight Calendar
// Main entry point: fetch holidays, render the two-week grid, save the PNG

use anyhow::{Context, Result};
use chrono::Local;

use fortnight_calendar::services::holiday::HolidayFetcher;
use fortnight_calendar::services::settings::SettingsService;
use fortnight_calendar::services::snapshot::SnapshotService;

fn run() -> Result<()> {
    let settings = SettingsService::load_default()?;
    let fetcher = HolidayFetcher::from_settings(&settings)
        .context("Failed to set up holiday fetcher")?;
    let service = SnapshotService::new(&settings);

    let today = Local::now().date_naive();
    let path = service.run(&fetcher, today)?;
    println!("{}", path.display());
    Ok(())
}

fn main() {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Fortnight Calendar");

    if let Err(err) = run() {
        log::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
