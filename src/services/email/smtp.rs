use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{EmailTransport, SEND_TIMEOUT};
use crate::errors::TransportError;
use crate::models::OutgoingEmail;

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub starttls: bool,
    pub from: String,
}

pub struct SmtpTransport {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpTransport {
    /// Without credentials no mailer is built and every send fails with
    /// `MissingCredentials`.
    pub fn new(settings: SmtpSettings) -> anyhow::Result<Self> {
        if settings.user.is_empty() || settings.password.is_empty() {
            return Ok(Self {
                mailer: None,
                from: settings.from,
            });
        }

        let builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        };

        let mailer = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.user, settings.password))
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self {
            mailer: Some(mailer),
            from: settings.from,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, TransportError> {
        let from: Mailbox = parse_mailbox(&self.from)?;
        let to: Mailbox = parse_mailbox(&email.to)?;

        let mut builder = Message::builder().from(from).to(to);
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        builder
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|e| TransportError::Build(e.to_string()))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| TransportError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl EmailTransport for SmtpTransport {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let Some(mailer) = &self.mailer else {
            return Err(TransportError::MissingCredentials(
                "SMTP_USER/SMTP_PASSWORD".to_string(),
            ));
        };

        let message = self.build_message(email)?;
        mailer.send(message).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
