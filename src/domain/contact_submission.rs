use serde::{Deserialize, Serialize};

use crate::domain::{ContactMessage, ContactName, ContactPhone, Email};

/// Wire shape of `POST /api/contact`. Missing fields decode as empty strings
/// so they go through the same validation as blank ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormBody {
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: Email,
    pub phone: ContactPhone,
    pub message: ContactMessage,
}

impl TryFrom<ContactFormBody> for ContactSubmission {
    type Error = String;

    fn try_from(value: ContactFormBody) -> Result<Self, Self::Error> {
        let name = ContactName::parse(value.name)?;
        let email = Email::parse(value.email)?;
        let phone = ContactPhone::parse(value.phone)?;
        let message = ContactMessage::parse(value.message)?;

        Ok(Self {
            name,
            email,
            phone,
            message,
        })
    }
}
