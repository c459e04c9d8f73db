use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::utils::template::{EmailTemplate, RenderedEmail};

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("delivery failed: {0}")]
    Delivery(#[source] anyhow::Error),
}

/// Hands a finished message to a relay.
#[cfg_attr(test, mockall::automock)]
pub trait Mailer: Send + Sync {
    fn deliver(&self, message: &Message) -> anyhow::Result<()>;
}

impl Mailer for SmtpTransport {
    fn deliver(&self, message: &Message) -> anyhow::Result<()> {
        self.send(message)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Sent,
    Skipped,
}

pub struct EmailService {
    mailer: Box<dyn Mailer>,
    from_address: Mailbox,
    skip_send: bool,
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, EmailError> {
    raw.trim()
        .parse()
        .map_err(|_| EmailError::InvalidAddress(raw.to_string()))
}

impl EmailService {
    pub fn from_config(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mailer = if config.username.is_empty() {
            SmtpTransport::builder_dangerous(&config.host)
                .port(config.port)
                .build()
        } else {
            let creds = Credentials::new(config.username.clone(), config.password.clone());
            SmtpTransport::relay(&config.host)?
                .port(config.port)
                .credentials(creds)
                .build()
        };
        Ok(Self::with_mailer(
            Box::new(mailer),
            &config.from_address,
            config.skip_send,
        )?)
    }

    pub fn with_mailer(
        mailer: Box<dyn Mailer>,
        from_address: &str,
        skip_send: bool,
    ) -> Result<Self, EmailError> {
        Ok(Self {
            mailer,
            from_address: parse_mailbox(from_address)?,
            skip_send,
        })
    }

    pub fn compose(&self, to: &str, rendered: &RenderedEmail) -> Result<Message, EmailError> {
        let message = Message::builder()
            .from(self.from_address.clone())
            .to(parse_mailbox(to)?)
            .subject(rendered.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(rendered.body.clone())?;
        Ok(message)
    }

    pub fn send(&self, to: &str, rendered: &RenderedEmail) -> Result<Delivery, EmailError> {
        let message = self.compose(to, rendered)?;
        if self.skip_send {
            tracing::info!(to = %to, subject = %rendered.subject, "SMTP_SKIP_SEND set, not delivering");
            return Ok(Delivery::Skipped);
        }
        self.mailer.deliver(&message).map_err(EmailError::Delivery)?;
        tracing::info!(to = %to, "email delivered");
        Ok(Delivery::Sent)
    }

    pub fn send_templated(
        &self,
        to: &str,
        template: &EmailTemplate,
        values: &HashMap<String, String>,
    ) -> Result<(RenderedEmail, Delivery), EmailError> {
        let rendered = template.render(values);
        if !rendered.unresolved.is_empty() {
            tracing::warn!(tokens = ?rendered.unresolved, "sending email with unresolved placeholders");
        }
        let delivery = self.send(to, &rendered)?;
        Ok((rendered, delivery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> EmailTemplate {
        EmailTemplate {
            subject: "Your visit".into(),
            body: "Hi {{client_name}}, see you {{date}}".into(),
        }
    }

    fn values() -> HashMap<String, String> {
        HashMap::from([("client_name".to_string(), "Sam".to_string())])
    }

    #[test]
    fn sends_rendered_message_through_mailer() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_deliver()
            .withf(|message| {
                let raw = String::from_utf8_lossy(&message.formatted()).to_string();
                raw.contains("Hi Sam, see you {{date}}") && raw.contains("sam@example.com")
            })
            .times(1)
            .returning(|_| Ok(()));
        let service =
            EmailService::with_mailer(Box::new(mailer), "noreply@sheduleapp.local", false).unwrap();

        let (rendered, delivery) = service
            .send_templated("sam@example.com", &template(), &values())
            .unwrap();
        assert_eq!(delivery, Delivery::Sent);
        assert_eq!(rendered.unresolved, vec!["date".to_string()]);
    }

    #[test]
    fn skip_send_never_touches_mailer() {
        let mut mailer = MockMailer::new();
        mailer.expect_deliver().times(0);
        let service =
            EmailService::with_mailer(Box::new(mailer), "noreply@sheduleapp.local", true).unwrap();

        let (_, delivery) = service
            .send_templated("sam@example.com", &template(), &values())
            .unwrap();
        assert_eq!(delivery, Delivery::Skipped);
    }

    #[test]
    fn invalid_recipient_is_reported_before_delivery() {
        let mut mailer = MockMailer::new();
        mailer.expect_deliver().times(0);
        let service =
            EmailService::with_mailer(Box::new(mailer), "noreply@sheduleapp.local", false).unwrap();

        let err = service
            .send_templated("not an address", &template(), &values())
            .unwrap_err();
        assert!(matches!(err, EmailError::InvalidAddress(_)));
    }

    #[test]
    fn relay_failure_is_a_delivery_error() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_deliver()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        let service =
            EmailService::with_mailer(Box::new(mailer), "noreply@sheduleapp.local", false).unwrap();

        let err = service
            .send_templated("sam@example.com", &template(), &values())
            .unwrap_err();
        assert!(matches!(err, EmailError::Delivery(_)));
    }
}
