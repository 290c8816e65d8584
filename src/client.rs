//! Contact form state as the page sees it, plus the HTTP client that talks to
//! `POST /api/contact`.
//!
//! A form goes `idle -> loading -> success | error`. Only one submission can be
//! in flight per form, and nothing is retried automatically.

use crate::domain::{ContactFormBody, SubmissionResult};

/// Shown when the relay answered but did not say what went wrong.
pub const SERVER_ERROR_FALLBACK: &str = "Something went wrong. Please try again later.";
/// Shown when the relay could not be reached at all.
pub const NETWORK_ERROR_FALLBACK: &str =
    "We couldn't reach our server. Please check your connection and try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// How a single request to the relay settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx with `success: true`.
    Accepted(SubmissionResult),
    /// The relay answered, but not with a success. Carries its message if it sent one.
    Rejected(Option<String>),
    /// No response came back.
    Unreachable,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    pub fields: ContactFormBody,
    status: FormStatus,
    message: Option<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The submit button is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Loading
    }

    /// Moves the form to `loading` and hands back the payload to send.
    pub fn begin_submit(&mut self) -> Result<ContactFormBody, FormError> {
        if !self.can_submit() {
            return Err(FormError::AlreadySubmitting);
        }

        self.status = FormStatus::Loading;
        self.message = None;
        Ok(self.fields.clone())
    }

    pub fn finish(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted(result) => {
                self.status = FormStatus::Success;
                self.message = Some(result.message);
                self.fields = ContactFormBody::default();
            }
            SubmitOutcome::Rejected(message) => {
                self.status = FormStatus::Error;
                self.message =
                    Some(message.unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()));
            }
            SubmitOutcome::Unreachable => {
                self.status = FormStatus::Error;
                self.message = Some(NETWORK_ERROR_FALLBACK.to_string());
            }
        }
    }

    pub async fn submit(&mut self, client: &ContactClient) -> Result<FormStatus, FormError> {
        let body = self.begin_submit()?;
        let outcome = client.send(&body).await;
        self.finish(outcome);

        Ok(self.status)
    }
}

#[derive(Clone)]
pub struct ContactClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ContactClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http_client: reqwest::Client::new(),
        }
    }

    /// Sends exactly one request. No timeout beyond reqwest's defaults.
    #[tracing::instrument(name = "Submitting the contact form", skip(self, body))]
    pub async fn send(&self, body: &ContactFormBody) -> SubmitOutcome {
        let url = format!("{}/api/contact", self.base_url);

        let response = match self.http_client.post(url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Contact endpoint unreachable");
                return SubmitOutcome::Unreachable;
            }
        };

        let status = response.status();
        match response.json::<SubmissionResult>().await {
            Ok(result) if status.is_success() && result.success => SubmitOutcome::Accepted(result),
            Ok(result) => SubmitOutcome::Rejected(Some(result.message).filter(|m| !m.is_empty())),
            Err(e) => {
                tracing::warn!(error = %e, %status, "Undecodable contact endpoint response");
                SubmitOutcome::Rejected(None)
            }
        }
    }
}
