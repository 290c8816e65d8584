use anyhow::Context;
use autogen::configuration::Settings;
use autogen::startup::Application;
use autogen::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("autogen".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get().context("Failed to read configuration.")?;
    let application = Application::build(config).await?;
    tracing::info!(port = application.port, "Server running");
    application.run_until_stopped().await?;

    Ok(())
}
