//! SMTP alert and report mail over STARTTLS.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use flash_core::SmtpConfig;

use crate::error::AlertError;

pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Build the STARTTLS transport and parse the configured addresses.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Email`] when the relay host is unusable or an
    /// address does not parse.
    pub fn new(config: &SmtpConfig) -> Result<Self, AlertError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            .map_err(|e| AlertError::Email(format!("SMTP relay setup: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        let from = config
            .user
            .parse::<Mailbox>()
            .map_err(|e| AlertError::Email(format!("invalid sender address: {e}")))?;
        let to = config
            .alert_to
            .parse::<Mailbox>()
            .map_err(|e| AlertError::Email(format!("invalid recipient address: {e}")))?;

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    /// Send a plain-text alert mail.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Email`] when the message cannot be built or
    /// the SMTP conversation fails.
    pub async fn send(&self, subject: &str, body: &str) -> Result<(), AlertError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AlertError::Email(format!("message build: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AlertError::Email(format!("SMTP send: {e}")))?;
        Ok(())
    }

    /// Send a generated report to an explicit recipient, attached as a file.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Email`] when the recipient or content type does
    /// not parse, the message cannot be built, or the SMTP conversation
    /// fails.
    pub async fn send_report(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<(), AlertError> {
        let message =
            self.report_message(to, subject, body, filename, content_type, content)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| AlertError::Email(format!("SMTP send: {e}")))?;
        Ok(())
    }

    fn report_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<Message, AlertError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| AlertError::Email(format!("invalid recipient address: {e}")))?;
        let mime = content_type
            .parse::<ContentType>()
            .map_err(|e| AlertError::Email(format!("invalid attachment content type: {e}")))?;
        let attachment = Attachment::new(filename.to_string()).body(content, mime);

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body.to_string()))
                    .singlepart(attachment),
            )
            .map_err(|e| AlertError::Email(format!("message build: {e}")))
    }
}
