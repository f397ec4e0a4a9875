//! Outbound email delivery over SMTP.
//!
//! `Mailer` is cheap to clone and shared through `AppState`. When no SMTP relay is configured
//! the mailer is disabled: messages are logged and reported as sent.

pub mod template;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::server::{config::SmtpConfig, error::mail::MailError};

/// Port that selects implicit TLS instead of STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// A rendered HTML email ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

#[derive(Clone)]
struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

/// Sends emails through the configured SMTP relay, or only logs them when disabled.
#[derive(Clone)]
pub struct Mailer {
    smtp: Option<SmtpMailer>,
}

impl Mailer {
    /// Creates a mailer that never contacts a relay.
    pub fn disabled() -> Self {
        Self { smtp: None }
    }

    /// Builds a pooled SMTP transport from configuration.
    ///
    /// # Arguments
    /// - `config` - Relay settings; port 465 uses implicit TLS, any other port STARTTLS
    ///
    /// # Returns
    /// - `Ok(Mailer)` - Enabled mailer
    /// - `Err(MailError::Transport)` - The relay host could not be used to build a TLS transport
    /// - `Err(MailError::InvalidAddress)` - The sender address is malformed
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let builder = builder.port(config.port);
        let builder = match (&config.user, &config.password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            smtp: Some(SmtpMailer {
                transport: builder.build(),
                from: parse_mailbox(&config.from)?,
            }),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.smtp.is_some()
    }

    /// Sends `email`, or logs it at debug level when the mailer is disabled.
    pub async fn send(&self, email: &Email) -> Result<(), MailError> {
        let Some(smtp) = &self.smtp else {
            tracing::debug!(to = %email.to, subject = %email.subject, "email delivery disabled, skipping");

            return Ok(());
        };

        let message = Message::builder()
            .from(smtp.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())?;

        smtp.transport.send(message).await?;

        tracing::debug!(to = %email.to, subject = %email.subject, "email sent");

        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| MailError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::{Email, Mailer};

    /// Expect a disabled mailer to accept messages without contacting a relay
    #[tokio::test]
    async fn disabled_mailer_accepts_messages() {
        let mailer = Mailer::disabled();
        let email = Email {
            to: "someone@example.com".to_string(),
            subject: "Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
        };

        assert!(!mailer.is_enabled());
        assert!(mailer.send(&email).await.is_ok());
    }
}
