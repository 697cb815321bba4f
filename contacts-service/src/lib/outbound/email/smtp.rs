use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::config::MailConfig;
use crate::domain::auth::errors::NotificationError;
use crate::domain::auth::models::Notification;
use crate::domain::auth::ports::Mailer;

/// Subject and HTML body of a rendered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: &'static str,
    pub html: String,
}

/// Render the email for a notification.
///
/// Verification emails link to `{origin}api/auth/verify_email/{token}`.
/// Reset emails carry the raw token to submit with the new password.
pub fn render(notification: &Notification) -> RenderedEmail {
    match notification {
        Notification::Verification {
            username,
            token,
            origin,
            ..
        } => {
            let link = format!("{}api/auth/verify_email/{}", origin, token);
            RenderedEmail {
                subject: "Verify your email",
                html: format!(
                    "<html><body>\
                     <p>Hi {username},</p>\
                     <p>Thanks for signing up. Please confirm your email address:</p>\
                     <p><a href=\"{link}\">{link}</a></p>\
                     </body></html>",
                    username = username,
                    link = link,
                ),
            }
        }
        Notification::PasswordReset { token, origin, .. } => RenderedEmail {
            subject: "Reset Password request",
            html: format!(
                "<html><body>\
                 <p>A password reset was requested for your account.</p>\
                 <p>Submit this token with your new password to \
                 <code>{origin}api/auth/password-reset-confirm/</code>:</p>\
                 <p><code>{token}</code></p>\
                 <p>If you did not request a reset, you can ignore this email.</p>\
                 </body></html>",
                origin = origin,
                token = token,
            ),
        },
    }
}

/// Mailer sending HTML emails over implicit-TLS SMTP
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the SMTP transport. No connection is made until the first send.
    ///
    /// # Errors
    /// * `InvalidMessage` - Sender address is not a valid mailbox
    /// * `DeliveryFailed` - Relay could not be configured
    pub fn new(config: &MailConfig) -> Result<Self, NotificationError> {
        let from = format!("{} <{}>", config.from_name, config.from)
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::InvalidMessage(e.to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)
            .map_err(|e| NotificationError::DeliveryFailed(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, NotificationError> {
        let to = notification
            .recipient()
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::InvalidMessage(e.to_string()))?;
        let email = render(notification);

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)
            .map_err(|e| NotificationError::InvalidMessage(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let message = self.build_message(notification)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::DeliveryFailed(e.to_string()))?;

        Ok(())
    }
}
