mod contact_message;
mod contact_name;
mod contact_phone;
mod contact_submission;
mod email;
mod submission_result;

pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use contact_phone::ContactPhone;
pub use contact_submission::{ContactFormBody, ContactSubmission};
pub use email::Email;
pub use submission_result::SubmissionResult;
