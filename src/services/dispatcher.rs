use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::config::AppConfig;
use crate::errors::TransportError;
use crate::models::{OutgoingEmail, Submission};
use crate::services::email::EmailTransport;
use crate::services::templates;

/// Addresses and branding the dispatcher needs; copied out of `AppConfig`.
#[derive(Clone, Debug)]
pub struct DispatchSettings {
    pub brand: String,
    pub admin_email: String,
    pub verified_recipient: Option<String>,
}

impl DispatchSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            brand: config.sender_name.clone(),
            admin_email: config.admin_email.clone(),
            verified_recipient: config.account_owner_email.clone(),
        }
    }
}

#[derive(Debug)]
pub enum Delivery {
    Sent { to: String },
    Failed { kind: &'static str, error: String },
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent { .. })
    }
}

#[derive(Debug)]
pub struct DispatchReport {
    pub confirmation: Delivery,
    pub notification: Delivery,
}

/// Sends the confirmation and owner notification for accepted submissions,
/// off the request path.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn EmailTransport>,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn EmailTransport>, settings: DispatchSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Runs `deliver` on a detached task. Callers may drop the handle.
    pub fn spawn(&self, submission: Submission) -> JoinHandle<DispatchReport> {
        let dispatcher = self.clone();
        let span = tracing::info_span!("dispatch", submission_id = %submission.id);
        tokio::spawn(async move { dispatcher.deliver(&submission).await }.instrument(span))
    }

    /// Attempts both sends concurrently. Neither outcome affects the other, and
    /// failures are only logged.
    pub async fn deliver(&self, submission: &Submission) -> DispatchReport {
        tracing::info!(transport = self.transport.name(), "starting email dispatch");

        let (confirmation, notification) = tokio::join!(
            self.attempt("confirmation", self.confirmation_email(submission)),
            self.attempt("notification", self.notification_email(submission)),
        );

        tracing::info!(
            confirmation_sent = confirmation.is_sent(),
            notification_sent = notification.is_sent(),
            "email dispatch finished"
        );

        DispatchReport {
            confirmation,
            notification,
        }
    }

    fn confirmation_email(&self, submission: &Submission) -> OutgoingEmail {
        OutgoingEmail {
            to: self.resolve_recipient(&submission.email),
            reply_to: Some(self.settings.admin_email.clone()),
            subject: templates::confirmation_subject(&self.settings.brand),
            html: templates::confirmation_html(
                submission,
                &self.settings.brand,
                &self.settings.admin_email,
            ),
        }
    }

    fn notification_email(&self, submission: &Submission) -> OutgoingEmail {
        OutgoingEmail {
            to: self.resolve_recipient(&self.settings.admin_email),
            reply_to: Some(submission.email.clone()),
            subject: templates::notification_subject(submission),
            html: templates::notification_html(submission),
        }
    }

    /// Restricted provider accounts can only deliver to their verified owner;
    /// anything else is redirected there.
    pub fn resolve_recipient(&self, requested: &str) -> String {
        match &self.settings.verified_recipient {
            Some(owner) if !owner.eq_ignore_ascii_case(requested) => {
                tracing::warn!(
                    requested = %requested,
                    substitute = %owner,
                    "provider only delivers to the verified owner address, redirecting"
                );
                owner.clone()
            }
            _ => requested.to_string(),
        }
    }

    async fn attempt(&self, purpose: &'static str, email: OutgoingEmail) -> Delivery {
        tracing::info!(purpose, to = %email.to, subject = %email.subject, "sending email");

        match self.transport.send_email(&email).await {
            Ok(()) => {
                tracing::info!(purpose, to = %email.to, "email sent");
                Delivery::Sent { to: email.to }
            }
            Err(e) => {
                log_failure(purpose, &email.to, &e);
                Delivery::Failed {
                    kind: e.kind(),
                    error: e.to_string(),
                }
            }
        }
    }
}

fn log_failure(purpose: &str, to: &str, error: &TransportError) {
    tracing::error!(purpose, to = %to, kind = error.kind(), error = %error, "failed to send email");
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::ContactForm;

    /// Fails every send addressed to `fail_to`.
    struct MockTransport {
        sent: Arc<Mutex<Vec<OutgoingEmail>>>,
        fail_to: Option<String>,
    }

    #[async_trait]
    impl EmailTransport for MockTransport {
        async fn send_email(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
            self.sent.lock().unwrap().push(email.clone());
            if self.fail_to.as_deref() == Some(email.to.as_str()) {
                return Err(TransportError::Rejected {
                    status: 500,
                    body: "mock failure".to_string(),
                });
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn settings(verified: Option<&str>) -> DispatchSettings {
        DispatchSettings {
            brand: "Acme".to_string(),
            admin_email: "owner@acme.test".to_string(),
            verified_recipient: verified.map(String::from),
        }
    }

    fn dispatcher(
        fail_to: Option<&str>,
        verified: Option<&str>,
    ) -> (Dispatcher, Arc<Mutex<Vec<OutgoingEmail>>>) {
        let sent = Arc::new(Mutex::new(vec![]));
        let transport = MockTransport {
            sent: Arc::clone(&sent),
            fail_to: fail_to.map(String::from),
        };
        (Dispatcher::new(Arc::new(transport), settings(verified)), sent)
    }

    fn submission() -> Submission {
        Submission::from_form(ContactForm {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_sends_both_emails() {
        let (dispatcher, sent) = dispatcher(None, None);
        let report = dispatcher.deliver(&submission()).await;

        assert!(report.confirmation.is_sent());
        assert!(report.notification.is_sent());

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 2);

        let confirmation = sent.iter().find(|e| e.to == "ana@example.com").unwrap();
        assert_eq!(confirmation.subject, "Thank You for Contacting Acme");
        assert_eq!(confirmation.reply_to.as_deref(), Some("owner@acme.test"));

        let notification = sent.iter().find(|e| e.to == "owner@acme.test").unwrap();
        assert_eq!(notification.subject, "New Contact Form Submission from Ana");
        assert_eq!(notification.reply_to.as_deref(), Some("ana@example.com"));
    }

    /// Never completes a send addressed to `stall_to`.
    struct StallingTransport {
        attempted: Arc<Mutex<Vec<String>>>,
        stall_to: String,
    }

    #[async_trait]
    impl EmailTransport for StallingTransport {
        async fn send_email(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
            self.attempted.lock().unwrap().push(email.to.clone());
            if email.to == self.stall_to {
                std::future::pending::<()>().await;
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "stalling"
        }
    }

    #[tokio::test]
    async fn test_stalled_confirmation_does_not_block_notification() {
        let attempted = Arc::new(Mutex::new(vec![]));
        let transport = StallingTransport {
            attempted: Arc::clone(&attempted),
            stall_to: "ana@example.com".to_string(),
        };
        let dispatcher = Dispatcher::new(Arc::new(transport), settings(None));

        let handle = dispatcher.spawn(submission());

        let mut notified = false;
        for _ in 0..100 {
            if attempted.lock().unwrap().iter().any(|to| to == "owner@acme.test") {
                notified = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(notified, "attempted: {:?}", attempted.lock().unwrap());
    }

    #[tokio::test]
    async fn test_confirmation_failure_does_not_block_notification() {
        let (dispatcher, sent) = dispatcher(Some("ana@example.com"), None);
        let report = dispatcher.deliver(&submission()).await;

        match report.confirmation {
            Delivery::Failed { kind, .. } => assert_eq!(kind, "rejected"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(report.notification.is_sent());
        assert_eq!(sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_notification_failure_is_contained() {
        let (dispatcher, _sent) = dispatcher(Some("owner@acme.test"), None);
        let report = dispatcher.deliver(&submission()).await;

        assert!(report.confirmation.is_sent());
        assert!(!report.notification.is_sent());
    }

    #[tokio::test]
    async fn test_restricted_account_redirects_recipients() {
        let (dispatcher, sent) = dispatcher(None, Some("Verified@Acme.test"));
        let report = dispatcher.deliver(&submission()).await;
        assert!(report.confirmation.is_sent());

        let sent = sent.lock().unwrap();
        assert!(sent.iter().all(|e| e.to == "Verified@Acme.test"));
    }

    #[test]
    fn test_resolve_recipient_keeps_owner_address() {
        let (dispatcher, _) = dispatcher(None, Some("owner@acme.test"));
        assert_eq!(dispatcher.resolve_recipient("OWNER@acme.test"), "OWNER@acme.test");
        assert_eq!(dispatcher.resolve_recipient("ana@example.com"), "owner@acme.test");

        let (unrestricted, _) = self::dispatcher(None, None);
        assert_eq!(unrestricted.resolve_recipient("ana@example.com"), "ana@example.com");
    }

    #[tokio::test]
    async fn test_spawn_runs_detached() {
        let (dispatcher, sent) = dispatcher(None, None);
        let report = dispatcher.spawn(submission()).await.unwrap();
        assert!(report.confirmation.is_sent());
        assert_eq!(sent.lock().unwrap().len(), 2);
    }
}
