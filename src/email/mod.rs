pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::company::Company;
use crate::config::SmtpConfig;

/// Delivers a rendered HTML message.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}

/// Company-facing mails.
pub struct CompanyEmail {
    mailer: Arc<dyn Mailer>,
    base_url: String,
}

impl CompanyEmail {
    pub fn new(mailer: Arc<dyn Mailer>, base_url: String) -> Self {
        Self { mailer, base_url }
    }

    pub async fn send_register_email(&self, company: &Company) -> Result<(), String> {
        if company.email.is_empty() {
            return Err(format!("Company {} has no email address", company.slug_name));
        }
        let html = templates::render_company_register(company, &self.base_url)?;
        self.mailer
            .send(
                &company.email,
                "Account activation code for the website",
                &html,
            )
            .await
    }
}
