//! Email service for sending expiry alert notifications via SMTP.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use larder_core::{AppError, Config};

/// Email service for sending alert notifications.
/// No-op if email alerts are disabled or SMTP is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl EmailService {
    /// Create email service from config. Returns `None` if disabled or SMTP not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_alerts_enabled() {
            tracing::debug!("Email alerts disabled (EMAIL_ALERTS_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }

    /// Send a plain-text email to the given recipients.
    pub async fn send(&self, to: &[String], subject: &str, body_plain: &str) -> Result<(), AppError> {
        if to.is_empty() {
            return Ok(());
        }
        let to_addrs: Vec<Mailbox> = to.iter().filter_map(|s| s.parse().ok()).collect::<Vec<_>>();
        if to_addrs.is_empty() {
            return Err(AppError::Email("No valid recipient addresses".to_string()));
        }
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| AppError::Email(format!("Invalid SMTP_FROM: {}", e)))?;

        let mut builder = Message::builder().from(from_addr).subject(subject);
        for mb in &to_addrs {
            builder = builder.to(mb.clone());
        }
        let email = builder
            .header(ContentType::TEXT_PLAIN)
            .body(body_plain.to_string())
            .map_err(|e| AppError::Email(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;
        info!(count = to.len(), "Expiry alert email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::config::BaseConfig;

    fn config_without_email() -> Config {
        Config {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["*".to_string()],
                db_max_connections: 5,
                db_timeout_seconds: 30,
                jwt_secret: "test-secret-key-min-32-characters-long".to_string(),
                jwt_expiry_hours: 24,
                environment: "development".to_string(),
            },
            database_url: "postgresql://localhost/larder_test".to_string(),
            anthropic_api_key: None,
            anthropic_model: "claude-sonnet-4-20250514".to_string(),
            email_alerts_enabled: false,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: true,
            expiry_check_enabled: true,
            expiry_check_interval_secs: 86_400,
            frontend_url: None,
        }
    }

    /// EmailService::from_config returns None when email alerts are disabled.
    #[test]
    fn from_config_returns_none_when_email_disabled() {
        let config = config_without_email();
        assert!(
            EmailService::from_config(&config).is_none(),
            "When EMAIL_ALERTS_ENABLED=false, from_config should return None"
        );
    }

    /// Alerts enabled but SMTP host missing also yields None.
    #[test]
    fn from_config_returns_none_without_smtp_host() {
        let mut config = config_without_email();
        config.email_alerts_enabled = true;
        assert!(EmailService::from_config(&config).is_none());
    }
}
