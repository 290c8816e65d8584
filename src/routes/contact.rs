use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, HttpRequest, HttpResponse, ResponseError,
};

use crate::{
    domain::{ContactFormBody, ContactSubmission, SubmissionResult},
    relay::{ContactRelay, DeliveryOutcome, RelayError, FAILURE_MESSAGE},
    utils::error_chain_fmt,
};

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to relay the contact submission")]
    RelayError(#[source] RelayError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::RelayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ContactError::ValidationError(reason) => {
                SubmissionResult::failure(format!("Please check your details: {reason}."))
            }
            ContactError::RelayError(_) => SubmissionResult::failure(FAILURE_MESSAGE),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(body, relay),
    fields(
        contact_email = %body.email,
        contact_name = %body.name,
    ),
)]
pub async fn contact(
    body: web::Json<ContactFormBody>,
    relay: web::Data<ContactRelay>,
) -> Result<HttpResponse, ContactError> {
    let submission =
        ContactSubmission::try_from(body.into_inner()).map_err(ContactError::ValidationError)?;

    match relay.relay(&submission).await {
        outcome @ (DeliveryOutcome::Delivered | DeliveryOutcome::LoggedOnly) => {
            Ok(HttpResponse::Ok().json(outcome.to_result()))
        }
        DeliveryOutcome::Failed(e) => Err(ContactError::RelayError(e)),
    }
}

/// Answers undecodable JSON bodies in the same shape as every other contact response.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected an undecodable contact form body");
    let response = HttpResponse::build(err.status_code())
        .json(SubmissionResult::failure(json_error_message(&err)));
    InternalError::from_response(err, response).into()
}

fn json_error_message(err: &JsonPayloadError) -> &'static str {
    match err {
        JsonPayloadError::ContentType => "Please send the form as JSON.",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Your message is too long. Please shorten it and try again."
        }
        JsonPayloadError::Deserialize(e) if e.is_data() => {
            "Name, email, phone number and message must all be text."
        }
        _ => "We couldn't read your submission. Please try again.",
    }
}
