use anyhow::Result;
use moneymap::{logging, navigation::Location, App};
use moneymap_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = logging::init_logging()?;
    tracing::info!("Logging to {}", log_path.display());

    let settings = Settings::new()?;
    settings.validate().map_err(|e| anyhow::anyhow!(e))?;

    // An optional path to open, e.g. `moneymap /transactions`
    let start = std::env::args()
        .nth(1)
        .map(|path| Location::parse(&path))
        .unwrap_or_else(Location::root);

    App::new(settings, start).run().await?;

    Ok(())
}
