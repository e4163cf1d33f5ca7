//! Outgoing email over SMTP.
//!
//! `EmailService` is either backed by a lettre SMTP transport or disabled. A disabled
//! service accepts every send and only logs it, so callers never branch on configuration.

use std::sync::Arc;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::server::{config::SmtpConfig, error::AppError, model::user::User};

#[derive(Clone)]
pub struct EmailService {
    mailer: Option<Arc<Mailer>>,
    frontend_url: String,
}

struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailService {
    /// Builds a service that relays through the configured SMTP server with STARTTLS.
    ///
    /// # Returns
    /// - `Ok(EmailService)` - Transport configured; no connection is opened yet
    /// - `Err(AppError::InternalError)` - The relay host or sender address is invalid
    pub fn smtp(config: &SmtpConfig, frontend_url: String) -> Result<Self, AppError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| AppError::InternalError(format!("Invalid EMAIL_FROM address: {}", e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::InternalError(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            mailer: Some(Arc::new(Mailer { transport, from })),
            frontend_url,
        })
    }

    pub fn disabled(frontend_url: String) -> Self {
        Self {
            mailer: None,
            frontend_url,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Sends one HTML message.
    ///
    /// # Returns
    /// - `Ok(())` - Message accepted by the relay, or skipped because email is disabled
    /// - `Err(AppError::InternalError)` - Bad recipient address or relay failure
    pub async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), AppError> {
        let Some(mailer) = &self.mailer else {
            tracing::info!("Email disabled, skipping '{}' to {}", subject, to);
            return Ok(());
        };

        let to: Mailbox = to
            .parse()
            .map_err(|e| AppError::InternalError(format!("Invalid recipient {}: {}", to, e)))?;

        let message = Message::builder()
            .from(mailer.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| AppError::InternalError(format!("Failed to build email: {}", e)))?;

        mailer
            .transport
            .send(message)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    pub async fn send_welcome(&self, user: &User) -> Result<(), AppError> {
        let name = user.full_name.as_deref().unwrap_or(&user.username);

        self.send(&user.email, "Welcome to Libris", welcome_body(name, &self.frontend_url))
            .await
    }

    /// Sends the link a user follows to choose a new password.
    pub async fn send_password_reset(&self, user: &User, token: &str) -> Result<(), AppError> {
        let link = self.reset_link(token);

        self.send(&user.email, "Reset your Libris password", reset_body(&user.username, &link))
            .await
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!(
            "{}/reset-password?token={}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }
}

fn welcome_body(name: &str, frontend_url: &str) -> String {
    format!(
        "<html><body>\
         <h2>Welcome to Libris, {name}!</h2>\
         <p>Your account is ready. Start reading at <a href=\"{url}\">{url}</a>.</p>\
         </body></html>",
        name = html_escape(name),
        url = frontend_url,
    )
}

fn reset_body(username: &str, link: &str) -> String {
    format!(
        "<html><body>\
         <h2>Password reset</h2>\
         <p>Hi {name}, we received a request to reset your password.</p>\
         <p><a href=\"{link}\">Choose a new password</a></p>\
         <p>If you did not ask for this you can ignore this email.</p>\
         </body></html>",
        name = html_escape(username),
        link = link,
    )
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_link_points_at_frontend() {
        let service = EmailService::disabled("https://libris.app/".to_string());

        assert_eq!(
            service.reset_link("abc"),
            "https://libris.app/reset-password?token=abc"
        );
    }

    #[test]
    fn names_are_escaped() {
        let body = welcome_body("<b>Ann</b>", "http://localhost:3000");

        assert!(body.contains("&lt;b&gt;Ann&lt;/b&gt;"));
        assert!(!body.contains("<b>Ann"));
    }
}
