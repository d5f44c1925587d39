use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use contact_mailer::config::{AppConfig, EmailProvider};
use contact_mailer::services::dispatcher::{DispatchSettings, Dispatcher};
use contact_mailer::services::email::resend::ResendTransport;
use contact_mailer::services::email::smtp::{SmtpSettings, SmtpTransport};
use contact_mailer::services::email::EmailTransport;
use contact_mailer::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let transport: Arc<dyn EmailTransport> = match config.email_provider {
        EmailProvider::Resend => {
            tracing::info!("using Resend email provider (url: {})", config.resend_api_url);
            Arc::new(ResendTransport::new(
                config.resend_api_key.clone(),
                config.resend_api_url.clone(),
                config.sender_mailbox(),
            )?)
        }
        EmailProvider::Smtp => {
            tracing::info!(
                "using SMTP email provider ({}:{})",
                config.smtp_host,
                config.smtp_port
            );
            Arc::new(SmtpTransport::new(SmtpSettings {
                host: config.smtp_host.clone(),
                port: config.smtp_port,
                user: config.smtp_user.clone(),
                password: config.smtp_password.clone(),
                starttls: config.smtp_starttls,
                from: config.sender_mailbox(),
            })?)
        }
    };

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "email transport not configured, submissions will be refused");
    }
    if let Some(owner) = &config.account_owner_email {
        tracing::info!(owner = %owner, "restricted provider account, all mail goes to the verified owner");
    }

    let dispatcher = Dispatcher::new(transport, DispatchSettings::from_config(&config));
    let state = Arc::new(AppState {
        config: config.clone(),
        dispatcher,
    });

    let app = contact_mailer::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
