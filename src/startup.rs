use std::{net::TcpListener, sync::Arc};

use actix_web::dev::Server;
use anyhow::Context;

use crate::{
    configuration::Settings,
    email_client::{MailTransport, SmtpEmailClient},
    relay::ContactRelay,
    routes::StaticAssets,
    run,
};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let transport = build_transport(&config)?;
        Self::build_with_transport(config, transport).await
    }

    /// Like [`Application::build`], but with the mail transport supplied by the caller.
    /// `None` puts the relay in log-only mode.
    pub async fn build_with_transport(
        config: Settings,
        transport: Option<Arc<dyn MailTransport>>,
    ) -> Result<Self, anyhow::Error> {
        let recipient = config
            .email
            .recipient()
            .map_err(anyhow::Error::msg)
            .context("Invalid notification recipient")?;
        let relay = ContactRelay::new(recipient, transport)
            .context("Failed to load the notification templates")?;

        let assets = StaticAssets {
            root: config.application.static_dir.clone(),
            environment: config.environment,
        };

        let address = (config.application.host.as_str(), config.application.port);
        let listener = TcpListener::bind(address)
            .with_context(|| format!("Failed to bind {}:{}", address.0, address.1))?;
        let port = listener.local_addr()?.port();

        let server = run(listener, relay, assets)?;

        Ok(Self { port, server })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn build_transport(config: &Settings) -> Result<Option<Arc<dyn MailTransport>>, anyhow::Error> {
    let Some(credentials) = config.email.credentials() else {
        tracing::warn!(
            smtp_host = %config.email.host,
            "SMTP credentials not configured, contact submissions will only be logged"
        );
        return Ok(None);
    };

    let sender = config
        .email
        .sender()
        .map_err(anyhow::Error::msg)
        .context("Invalid sender email")?;
    let client = SmtpEmailClient::new(
        &config.email.host,
        config.email.port,
        config.email.secure,
        sender,
        credentials,
        config.email.timeout(),
    )
    .context("Failed to configure the SMTP transport")?;

    tracing::info!(
        smtp_host = %config.email.host,
        smtp_port = config.email.port,
        secure = config.email.secure,
        "SMTP transport configured"
    );

    Ok(Some(Arc::new(client)))
}
