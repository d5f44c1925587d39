use std::env;

const DEFAULT_SENDER: &str = "onboarding@resend.dev";
const DEFAULT_SENDER_NAME: &str = "Intrinsic Spiders";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailProvider {
    Resend,
    Smtp,
}

impl EmailProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailProvider::Resend => "resend",
            EmailProvider::Smtp => "smtp",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub email_provider: EmailProvider,
    pub resend_api_key: String,
    pub resend_api_url: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_starttls: bool,
    pub sender_email: String,
    pub sender_name: String,
    /// Set when the provider account may only deliver to its verified owner.
    pub account_owner_email: Option<String>,
    pub admin_email: String,
    pub development: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Blank values count as unset.
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let resend_api_key = var("RESEND_API_KEY").unwrap_or_default();

        let email_provider = match var("EMAIL_PROVIDER").map(|v| v.to_lowercase()).as_deref() {
            Some("smtp") | Some("gmail") => EmailProvider::Smtp,
            Some("resend") => EmailProvider::Resend,
            other => {
                let inferred = if resend_api_key.is_empty() {
                    EmailProvider::Smtp
                } else {
                    EmailProvider::Resend
                };
                if let Some(unknown) = other {
                    tracing::warn!(
                        value = %unknown,
                        using = inferred.as_str(),
                        "unrecognised EMAIL_PROVIDER, inferring from credentials"
                    );
                }
                inferred
            }
        };

        let smtp_user = var("SMTP_USER").or_else(|| var("GMAIL_USER"));

        // An SMTP account sends as itself unless told otherwise.
        let sender_email = var("SENDER_EMAIL")
            .or_else(|| match email_provider {
                EmailProvider::Smtp => smtp_user.clone(),
                EmailProvider::Resend => var("GMAIL_USER"),
            })
            .unwrap_or_else(|| DEFAULT_SENDER.to_string());
        let account_owner_email = var("ACCOUNT_OWNER_EMAIL");
        let admin_email = var("ADMIN_EMAIL")
            .or_else(|| account_owner_email.clone())
            .unwrap_or_else(|| sender_email.clone());

        Self {
            port: var("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            email_provider,
            resend_api_key,
            resend_api_url: var("RESEND_API_URL")
                .unwrap_or_else(|| "https://api.resend.com".to_string()),
            smtp_host: var("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: var("SMTP_PORT").and_then(|v| v.parse().ok()).unwrap_or(465),
            smtp_user: smtp_user.unwrap_or_default(),
            smtp_password: var("SMTP_PASSWORD")
                .or_else(|| var("GMAIL_APP_PASSWORD"))
                .unwrap_or_default(),
            smtp_starttls: var("SMTP_STARTTLS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            sender_email,
            sender_name: var("SENDER_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
            account_owner_email,
            admin_email,
            development: var("APP_ENV").is_some_and(|v| v == "development"),
        }
    }

    /// Names of the settings the selected provider needs but doesn't have.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.email_provider {
            EmailProvider::Resend => {
                if self.resend_api_key.is_empty() {
                    missing.push("RESEND_API_KEY");
                }
            }
            EmailProvider::Smtp => {
                if self.smtp_user.is_empty() {
                    missing.push("SMTP_USER");
                }
                if self.smtp_password.is_empty() {
                    missing.push("SMTP_PASSWORD");
                }
            }
        }
        if self.sender_email.is_empty() {
            missing.push("SENDER_EMAIL");
        }
        if self.admin_email.is_empty() {
            missing.push("ADMIN_EMAIL");
        }
        missing
    }

    /// `Name <address>` form used in the From header.
    pub fn sender_mailbox(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender_email)
    }
}
