pub mod resend;
pub mod smtp;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::TransportError;
use crate::models::OutgoingEmail;

/// Upper bound on a single provider call.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), TransportError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}
