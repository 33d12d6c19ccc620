#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use duty_roster::{AppConfig, extract_roster, find_current_roster_file, http_api, load_grid, telemetry};

    telemetry::init();
    let config = AppConfig::load()?;
    let addr: SocketAddr = config.http_addr.parse()?;

    let path = match std::env::args().nth(1) {
        Some(path) => std::path::PathBuf::from(path),
        None => find_current_roster_file(&config.roster_dir)?.ok_or_else(|| {
            format!(
                "no roster file for the current month in {}",
                config.roster_dir.display()
            )
        })?,
    };

    let grid = load_grid(&path)?;
    let schedule = extract_roster(&grid)?;
    tracing::info!(file = %path.display(), days = schedule.get_full_schedule().len(), "roster loaded");
    http_api::serve(addr, schedule).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
