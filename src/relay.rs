use std::sync::Arc;

use chrono::Utc;
use tera::{Context, Tera};

use crate::{
    domain::{ContactSubmission, Email, SubmissionResult},
    email_client::{MailTransport, Notification, TransportError},
    utils::error_chain_fmt,
};

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We will get back to you shortly.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, we couldn't send your message right now. Please try again later or contact us directly.";

const HTML_TEMPLATE: &str = "contact_notification.html";
const TEXT_TEMPLATE: &str = "contact_notification.txt";

#[derive(thiserror::Error)]
pub enum RelayError {
    #[error("failed to render the notification")]
    Compose(#[from] tera::Error),
    #[error("failed to deliver the notification")]
    Transport(#[from] TransportError),
}

impl std::fmt::Debug for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// What happened to a submission after it reached the relay.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The transport accepted the notification.
    Delivered,
    /// No mail credentials are configured; the submission only went to the logs.
    LoggedOnly,
    Failed(RelayError),
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, DeliveryOutcome::Failed(_))
    }

    /// Visitor-facing result. Never carries error details.
    pub fn to_result(&self) -> SubmissionResult {
        if self.is_success() {
            SubmissionResult::success(SUCCESS_MESSAGE)
        } else {
            SubmissionResult::failure(FAILURE_MESSAGE)
        }
    }
}

/// Turns contact submissions into notifications for the operator's inbox.
pub struct ContactRelay {
    recipient: Email,
    transport: Option<Arc<dyn MailTransport>>,
    templates: Tera,
}

impl ContactRelay {
    /// Without a transport the relay runs in log-only mode.
    pub fn new(
        recipient: Email,
        transport: Option<Arc<dyn MailTransport>>,
    ) -> Result<Self, tera::Error> {
        let mut templates = Tera::default();
        templates.add_raw_templates(vec![
            (HTML_TEMPLATE, include_str!("templates/contact_notification.html")),
            (TEXT_TEMPLATE, include_str!("templates/contact_notification.txt")),
        ])?;

        Ok(Self {
            recipient,
            transport,
            templates,
        })
    }

    pub fn compose(&self, submission: &ContactSubmission) -> Result<Notification, RelayError> {
        let mut context = Context::new();
        context.insert("name", submission.name.as_ref());
        context.insert("email", submission.email.as_ref());
        context.insert("phone", submission.phone.as_ref());
        context.insert("message", submission.message.as_ref());
        context.insert(
            "received_at",
            &Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        );

        Ok(Notification {
            to: self.recipient.clone(),
            reply_to: submission.email.clone(),
            subject: format!("New enquiry from {}", submission.name.as_ref()),
            text_body: self.templates.render(TEXT_TEMPLATE, &context)?,
            html_body: self.templates.render(HTML_TEMPLATE, &context)?,
        })
    }

    #[tracing::instrument(
        name = "Relaying a contact submission",
        skip(self, submission),
        fields(contact_email = %submission.email)
    )]
    pub async fn relay(&self, submission: &ContactSubmission) -> DeliveryOutcome {
        let notification = match self.compose(submission) {
            Ok(notification) => notification,
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to compose the notification");
                return DeliveryOutcome::Failed(e);
            }
        };

        let Some(transport) = &self.transport else {
            tracing::info!(
                submitter_name = %submission.name.as_ref(),
                submitter_email = %submission.email,
                submitter_phone = %submission.phone.as_ref(),
                submitter_message = %submission.message.as_ref(),
                "Mail credentials are not configured, logging the contact submission instead of sending it"
            );
            return DeliveryOutcome::LoggedOnly;
        };

        match transport.send(&notification).await {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => {
                let e = RelayError::from(e);
                tracing::error!(error.cause_chain = ?e, "Failed to deliver the contact notification");
                DeliveryOutcome::Failed(e)
            }
        }
    }
}
